use tracing::{debug, warn};

use crate::dbc::core::{attributes::numeric_value, strings};
use crate::dbc::types::{
    attributes::*,
    database::DatabaseDBC,
    errors::DbcParseError,
    signal::SignalDataType,
};

/// `BA_ "Attribute" SG_ <ID msg> <sig_name> <value>;`
///
/// `parts` holds exactly six whitespace tokens. The signal is resolved within
/// the message identified by the masked id.
pub(crate) fn decode(
    db: &mut DatabaseDBC,
    parts: &[&str],
    line_no: usize,
) -> Result<(), DbcParseError> {
    // 1) Attribute name
    let attr_name: &str = parts[1].trim_matches('"');
    let Some(attr) = vendor_attribute(attr_name, AttrObject::Signal) else {
        return Ok(());
    };

    // 2) Message ID, signal name and value
    let frame_id: u32 = strings::parse_u32(parts[3], line_no)?;
    let sig_name: &str = parts[4];
    let value: &str = strings::attribute_value(parts[5]);

    // 3) Lookup within the message
    let Some(sig) = db.get_signal_mut(frame_id, sig_name) else {
        warn!(
            line = line_no,
            id = frame_id,
            signal = sig_name,
            attribute = attr_name,
            "attribute targets an unknown signal",
        );
        return Ok(());
    };

    // 4) Assign
    let num: u32 = numeric_value(attr, value, line_no)?;
    match attr.name {
        PHD_SIGNAL_DATA_TYPE => sig.data_type = SignalDataType::from_index(num),
        PHD_STRING_LENGTH => sig.string_length = num,
        _ => {}
    }
    debug!(
        line = line_no,
        signal = sig_name,
        attribute = attr_name,
        value = num,
        "applied signal attribute",
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dbc::types::{
        database::FrameKey,
        frame::FrameDBC,
        signal::SignalDBC,
    };

    fn setup() -> DatabaseDBC {
        let mut db: DatabaseDBC = DatabaseDBC::default();
        let fk: FrameKey = db.add_frame(FrameDBC::new("VI", "Cab", 0x18FE_EC00, 8)).unwrap();
        db.add_signal_if_absent(
            fk,
            SignalDBC {
                name: "VIN".to_string(),
                bit_length: 8,
                ..Default::default()
            },
        );
        db
    }

    fn apply(db: &mut DatabaseDBC, line: &str) -> Result<(), DbcParseError> {
        decode(db, &strings::tokens(line), 1)
    }

    #[test]
    fn string_signal() {
        let mut db: DatabaseDBC = setup();
        apply(&mut db, "BA_ \"PHD_SignalDataType\" SG_ 2566843392 VIN 2;").unwrap();
        apply(&mut db, "BA_ \"PHD_stringLength\" SG_ 2566843392 VIN 8;").unwrap();

        let sig: &mut SignalDBC = db.get_signal_mut(0x18FE_EC00, "VIN").unwrap();
        assert_eq!(sig.data_type, SignalDataType::String);
        assert_eq!(sig.string_length, 8);
        assert_eq!(sig.effective_length(), 64);
        assert_eq!(sig.bit_length, 8);
    }

    #[test]
    fn misses_are_ignored() {
        let mut db: DatabaseDBC = setup();
        apply(&mut db, "BA_ \"PHD_SignalDataType\" SG_ 2566843392 Missing 1;").unwrap();
        apply(&mut db, "BA_ \"PHD_SignalDataType\" SG_ 1 VIN 1;").unwrap();
        apply(&mut db, "BA_ \"GenSigStartValue\" SG_ 2566843392 VIN 1;").unwrap();
        assert_eq!(
            db.get_signal_mut(0x18FE_EC00, "VIN").unwrap().data_type,
            SignalDataType::Integer
        );
    }
}
