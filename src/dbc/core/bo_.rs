use tracing::debug;

use crate::dbc::core::{sg_, strings};
use crate::dbc::types::{
    database::{DatabaseDBC, FrameKey},
    errors::DbcParseError,
    frame::FrameDBC,
};

/// Decode a `BO_` header and the `SG_` block that immediately follows it.
/// Accepts both: `BO_ 123 NAME: 8 Node` and `BO_ 123 NAME : 8 Node`.
///
/// `lines[idx]` is the header. The block ends at the first line whose first
/// token is not `SG_` (a blank line ends it too); running out of lines before
/// that is a [`DbcParseError::TruncatedSignalBlock`]. The caller's cursor is
/// not advanced: the `SG_` lines are visited again by the main loop and ignored.
pub(crate) fn decode(
    db: &mut DatabaseDBC,
    lines: &[&str],
    idx: usize,
) -> Result<(), DbcParseError> {
    let line_no: usize = idx + 1;
    let parts: Vec<&str> = strings::header_tokens(lines[idx]);
    if parts.len() < 5 || parts[0] != "BO_" {
        return Ok(());
    }

    // 1) header: id, name, dlc, transmitter
    let raw_id: u32 = strings::parse_u32(parts[1], line_no)?;
    let name: &str = parts[2];
    let dlc: u16 = strings::parse_u16(parts[3], line_no)?;
    let transmitter: &str = parts[4];

    let frame: FrameDBC = FrameDBC::new(name, transmitter, raw_id, dlc);
    let id: u32 = frame.id;
    let Some(frame_key) = db.add_frame(frame) else {
        return Err(DbcParseError::DuplicateFrameId { line: line_no, id });
    };

    // 2) contiguous SG_ block
    let mut next: usize = idx + 1;
    loop {
        let Some(line) = lines.get(next) else {
            return Err(DbcParseError::TruncatedSignalBlock { line: line_no });
        };
        if strings::keyword(line) != "SG_" {
            break;
        }
        sg_::decode(db, frame_key, line, next + 1)?;
        next += 1;
    }

    // 3) output order is by start position
    db.sort_frame_signals(frame_key);

    debug!(line = line_no, frame = name, id, signals = next - idx - 1, "decoded message");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dbc::types::signal::SignalDBC;

    fn first_frame(db: &DatabaseDBC) -> &FrameDBC {
        db.get_frame_by_key(db.frames_order[0]).unwrap()
    }

    #[test]
    fn header_and_block() {
        let lines: Vec<&str> = vec![
            "BO_ 2364540158 EEC1: 8 Engine",
            " SG_ EngineSpeed : 24|16@1+ (0.125,0) [0|8031.875] \"rpm\" Cab",
            " SG_ TorqueMode : 0|4@1+ (1,0) [0|15] \"\" Cab,Trans",
            "",
            " SG_ Orphan : 40|8@1+ (1,0) [0|255] \"\" Body",
        ];
        let mut db: DatabaseDBC = DatabaseDBC::default();
        decode(&mut db, &lines, 0).unwrap();

        let frame: &FrameDBC = first_frame(&db);
        assert_eq!(frame.name, "EEC1");
        assert_eq!(frame.id, 0x0CF0_04FE);
        assert_eq!(frame.dlc, 8);
        assert_eq!(frame.transmitter, "Engine");
        assert_eq!(frame.pgn, 0xF004);
        assert_eq!(frame.source_address, 0xFE);
        assert_eq!(frame.receivers, vec!["Cab", "Trans"]);

        // blank line ends the block, sorted by start position
        let names: Vec<&str> = frame.signals(&db).map(|s: &SignalDBC| s.name.as_str()).collect();
        assert_eq!(names, vec!["TorqueMode", "EngineSpeed"]);
    }

    #[test]
    fn block_running_past_eof_is_fatal() {
        let lines: Vec<&str> = vec![
            "BO_ 2364540158 EEC1: 8 Engine",
            " SG_ EngineSpeed : 24|16@1+ (0.125,0) [0|8031.875] \"rpm\" Cab",
        ];
        let mut db: DatabaseDBC = DatabaseDBC::default();
        assert!(matches!(
            decode(&mut db, &lines, 0),
            Err(DbcParseError::TruncatedSignalBlock { line: 1 })
        ));
    }

    #[test]
    fn bad_header_numbers() {
        let lines: Vec<&str> = vec!["BO_ 0x18FEF100 CCVS: 8 Cab", ""];
        let mut db: DatabaseDBC = DatabaseDBC::default();
        assert!(matches!(
            decode(&mut db, &lines, 0),
            Err(DbcParseError::InvalidNumber { line: 1, .. })
        ));

        let lines: Vec<&str> = vec!["BO_ 2566844672 CCVS: eight Cab", ""];
        assert!(matches!(
            decode(&mut db, &lines, 0),
            Err(DbcParseError::InvalidNumber { line: 1, .. })
        ));
    }

    #[test]
    fn short_header_is_skipped() {
        let lines: Vec<&str> = vec!["BO_ 3221225472 VECTOR__INDEPENDENT_SIG_MSG: 0", ""];
        let mut db: DatabaseDBC = DatabaseDBC::default();
        decode(&mut db, &lines, 0).unwrap();
        assert!(db.frames.is_empty());
    }
}
