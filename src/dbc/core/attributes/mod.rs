pub(crate) mod ba_bo_;
pub(crate) mod ba_bu_;
pub(crate) mod ba_sg_;

use tracing::warn;

use crate::dbc::core::strings;
use crate::dbc::types::{attributes::VendorAttribute, errors::DbcParseError};

/// Parse the numeric value of a vendor attribute.
///
/// Values outside the declared range are kept as-is and only reported.
pub(crate) fn numeric_value(
    attr: &VendorAttribute,
    value: &str,
    line_no: usize,
) -> Result<u32, DbcParseError> {
    let num: u32 = strings::parse_u32(value, line_no)?;
    if attr.is_out_of_range(num) {
        warn!(
            line = line_no,
            attribute = attr.name,
            value = num,
            "attribute value outside its declared range",
        );
    }
    Ok(num)
}
