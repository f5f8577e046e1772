use tracing::{debug, warn};

use crate::dbc::core::{attributes::numeric_value, strings};
use crate::dbc::types::{
    attributes::*,
    database::DatabaseDBC,
    errors::DbcParseError,
    frame::{FrameDBC, TransmitMode},
};

/// `BA_ "Attribute" BO_ <ID> <value>;`
///
/// `parts` holds exactly five whitespace tokens. The id is masked to 29 bits
/// before lookup. Yes/No enums are true only for index 1.
pub(crate) fn decode(
    db: &mut DatabaseDBC,
    parts: &[&str],
    line_no: usize,
) -> Result<(), DbcParseError> {
    // 1) Attribute name
    let attr_name: &str = parts[1].trim_matches('"');
    let Some(attr) = vendor_attribute(attr_name, AttrObject::Frame) else {
        return Ok(());
    };

    // 2) Message ID (numeric)
    let frame_id: u32 = strings::parse_u32(parts[3], line_no)?;
    let value: &str = strings::attribute_value(parts[4]);

    // 3) Lookup by ID
    let Some(frame) = db.get_frame_by_id_mut(frame_id) else {
        warn!(
            line = line_no,
            id = frame_id,
            attribute = attr_name,
            "attribute targets an unknown message",
        );
        return Ok(());
    };

    // 4) Assign
    let num: u32 = numeric_value(attr, value, line_no)?;
    assign(frame, attr.name, num);
    debug!(
        line = line_no,
        frame = %frame.name,
        attribute = attr_name,
        value = num,
        "applied message attribute",
    );
    Ok(())
}

fn assign(frame: &mut FrameDBC, attr_name: &str, num: u32) {
    match attr_name {
        PHD_IGNORE_SOURCE_ADDRESS => frame.ignore_source_address = num == 1,
        PHD_NOTIFY_STALE => frame.notify_stale = num == 1,
        PHD_STALE_TIMEOUT_PERIOD => frame.stale_timeout_period = num,
        PHD_RATE_LIMIT => frame.rate_limit = num,
        PHD_IGNORE_DUPLICATE => frame.ignore_duplicate = num == 1,
        GEN_MSG_SEND_TYPE => frame.transmit_mode = TransmitMode::from_index(num),
        GEN_MSG_CYCLE_TIME => frame.transmit_rate = num,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db_with_frame() -> DatabaseDBC {
        let mut db: DatabaseDBC = DatabaseDBC::default();
        db.add_frame(FrameDBC::new("CCVS", "Cab", 0x18FE_F117, 8));
        db
    }

    fn apply(db: &mut DatabaseDBC, line: &str) -> Result<(), DbcParseError> {
        decode(db, &strings::tokens(line), 1)
    }

    #[test]
    fn frame_fields() {
        let mut db: DatabaseDBC = db_with_frame();
        // DBC files store extended ids with bit 31 set
        let id: u32 = 0x98FE_F117;
        for line in [
            format!("BA_ \"PHD_ignoreSourceAddress\" BO_ {id} 1;"),
            format!("BA_ \"PHD_notifyStale\" BO_ {id} 1;"),
            format!("BA_ \"PHD_staleTimeoutPeriod\" BO_ {id} 5000;"),
            format!("BA_ \"PHD_rateLimit\" BO_ {id} 100;"),
            format!("BA_ \"PHD_ignoreDuplicate\" BO_ {id} 0;"),
            format!("BA_ \"GenMsgSendType\" BO_ {id} 0;"),
            format!("BA_ \"GenMsgCycleTime\" BO_ {id} \"50\";"),
        ] {
            apply(&mut db, &line).unwrap();
        }

        let frame: &FrameDBC = db.get_frame_by_id(id).unwrap();
        assert!(frame.ignore_source_address);
        assert!(frame.notify_stale);
        assert_eq!(frame.stale_timeout_period, 5000);
        assert_eq!(frame.rate_limit, 100);
        assert!(!frame.ignore_duplicate);
        assert_eq!(frame.transmit_mode, TransmitMode::Periodic);
        assert_eq!(frame.transmit_rate, 50);
    }

    #[test]
    fn applying_twice_is_idempotent() {
        let mut db: DatabaseDBC = db_with_frame();
        let line: &str = "BA_ \"GenMsgSendType\" BO_ 2566844695 2;";
        apply(&mut db, line).unwrap();
        let once: FrameDBC = db.get_frame_by_id(0x18FE_F117).unwrap().clone();
        apply(&mut db, line).unwrap();
        assert_eq!(db.get_frame_by_id(0x18FE_F117).unwrap(), &once);
        assert_eq!(once.transmit_mode, TransmitMode::OnRequest);
    }

    #[test]
    fn misses_and_errors() {
        let mut db: DatabaseDBC = db_with_frame();
        // unknown message
        apply(&mut db, "BA_ \"PHD_rateLimit\" BO_ 1234 10;").unwrap();
        // attribute of another owner
        apply(&mut db, "BA_ \"PHD_stringLength\" BO_ 2566844695 10;").unwrap();
        assert_eq!(db.get_frame_by_id(0x18FE_F117).unwrap().rate_limit, 250);

        assert!(matches!(
            apply(&mut db, "BA_ \"PHD_rateLimit\" BO_ 2566844695 fast;"),
            Err(DbcParseError::InvalidNumber { .. })
        ));
        assert!(matches!(
            apply(&mut db, "BA_ \"PHD_rateLimit\" BO_ CCVS 10;"),
            Err(DbcParseError::InvalidNumber { .. })
        ));
    }
}
