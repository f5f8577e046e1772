use tracing::{debug, warn};

use crate::dbc::core::strings;
use crate::dbc::types::{
    database::{DatabaseDBC, FrameKey},
    errors::DbcParseError,
    signal::{Endianness, SignalDBC},
};

/// Decode a `SG_` line belonging to the frame `frame_key`.
/// Format (typical):
/// SG_ <name> [M|mX] : <start>|<length>@<endian><sign> (<factor>,<offset>) [<min>|<max>] "<unit>" <receivers>
///
/// Scaling, range, unit and sign are not modeled. The multiplexer indicator is
/// only tolerated: `SG_ name m0 : ...` is read like `SG_ name : ...`.
pub(crate) fn decode(
    db: &mut DatabaseDBC,
    frame_key: FrameKey,
    line: &str,
    line_no: usize,
) -> Result<(), DbcParseError> {
    let malformed = || DbcParseError::MalformedSignal {
        line: line_no,
        text: line.trim().to_string(),
    };

    let parts: Vec<&str> = strings::tokens(line);
    let name: &str = parts.get(1).ok_or_else(malformed)?;

    // 1) layout field "<start>|<length>@<endian><sign>"
    let layout_idx: usize = if parts.get(3) == Some(&":") { 4 } else { 3 };
    let layout: &str = parts.get(layout_idx).ok_or_else(malformed)?;
    let fields: Vec<&str> = layout.split(['|', '@']).collect();
    if fields.len() < 3 {
        return Err(malformed());
    }
    let start_position: u32 = strings::parse_u32(fields[0], line_no)?;
    let bit_length: u32 = strings::parse_u32(fields[1], line_no)?;
    let endian_char: char = fields[2].chars().next().ok_or_else(malformed)?;

    // 2) receivers "<node>,<node>" four tokens after the layout
    let receivers: &str = parts.get(layout_idx + 4).ok_or_else(malformed)?;

    if let Some(frame) = db.get_frame_by_key_mut(frame_key) {
        for rx in receivers.split(',').filter(|r| !r.is_empty()) {
            frame.add_receiver(rx);
        }
    }

    let signal: SignalDBC = SignalDBC {
        name: name.to_string(),
        start_position,
        bit_length,
        endian: Endianness::from_dbc_char(endian_char),
        ..Default::default()
    };
    if db.add_signal_if_absent(frame_key, signal).is_none() {
        warn!(line = line_no, signal = name, "duplicate signal name in message, keeping the first");
    } else {
        debug!(line = line_no, signal = name, start_position, bit_length, "decoded signal");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dbc::types::frame::FrameDBC;

    fn setup() -> (DatabaseDBC, FrameKey) {
        let mut db: DatabaseDBC = DatabaseDBC::default();
        let fk: FrameKey = db
            .add_frame(FrameDBC::new("EEC1", "Engine", 0x0CF0_0400, 8))
            .unwrap();
        (db, fk)
    }

    #[test]
    fn plain_signal() {
        let (mut db, fk) = setup();
        decode(
            &mut db,
            fk,
            " SG_ EngineSpeed : 24|16@1+ (0.125,0) [0|8031.875] \"rpm\" Cab,Trans",
            3,
        )
        .unwrap();

        let frame: &FrameDBC = db.get_frame_by_key(fk).unwrap();
        let sig: &SignalDBC = frame.signals(&db).next().unwrap();
        assert_eq!(sig.name, "EngineSpeed");
        assert_eq!(sig.start_position, 24);
        assert_eq!(sig.bit_length, 16);
        assert_eq!(sig.endian, Endianness::Little);
        assert_eq!(frame.receivers, vec!["Cab", "Trans"]);
    }

    #[test]
    fn multiplexed_indicator_is_tolerated() {
        let (mut db, fk) = setup();
        decode(&mut db, fk, "SG_ Torque m0 : 8|8@0- (1,-125) [-125|125] \"%\" Cab", 4).unwrap();
        let sig = db.get_frame_by_key(fk).unwrap().signals(&db).next().unwrap();
        assert_eq!(sig.start_position, 8);
        assert_eq!(sig.endian, Endianness::Big);
    }

    #[test]
    fn malformed_lines_abort() {
        let (mut db, fk) = setup();
        assert!(matches!(
            decode(&mut db, fk, "SG_ Speed : 24|16 (1,0) [0|1] \"\" Cab", 9),
            Err(DbcParseError::MalformedSignal { line: 9, .. })
        ));
        assert!(matches!(
            decode(&mut db, fk, "SG_ Speed : x|16@1+ (1,0) [0|1] \"\" Cab", 10),
            Err(DbcParseError::InvalidNumber { line: 10, .. })
        ));
        assert!(matches!(
            decode(&mut db, fk, "SG_ Speed : 0|16@1+ (1,0) [0|1]", 11),
            Err(DbcParseError::MalformedSignal { line: 11, .. })
        ));
    }
}
