// Tokenizing helpers shared by the line decoders.
//
// DBC statements are processed one line at a time. Header lines (`BU_`, `BO_`)
// are split on whitespace and `:`, every other statement on whitespace only.

use crate::dbc::types::errors::DbcParseError;

// Split on ASCII whitespace, dropping empty tokens.
pub(crate) fn tokens(line: &str) -> Vec<&str> {
    line.split_ascii_whitespace().collect()
}

// Split on ASCII whitespace and ':' (so "BU_:" and "NAME:" lose their colon).
pub(crate) fn header_tokens(line: &str) -> Vec<&str> {
    line.split(|c: char| c.is_ascii_whitespace() || c == ':')
        .filter(|t| !t.is_empty())
        .collect()
}

// First whitespace-separated token of a line ("" for blank lines).
pub(crate) fn keyword(line: &str) -> &str {
    line.split_ascii_whitespace().next().unwrap_or("")
}

// Strip the statement terminator and the quotes around an attribute value.
pub(crate) fn attribute_value(token: &str) -> &str {
    token.trim_end_matches(';').trim_matches('"')
}

// Parse an unsigned decimal, reporting the offending token on failure.
pub(crate) fn parse_u32(token: &str, line: usize) -> Result<u32, DbcParseError> {
    token
        .parse::<u32>()
        .map_err(|_| DbcParseError::InvalidNumber {
            line,
            token: token.to_string(),
        })
}

pub(crate) fn parse_u16(token: &str, line: usize) -> Result<u16, DbcParseError> {
    token
        .parse::<u16>()
        .map_err(|_| DbcParseError::InvalidNumber {
            line,
            token: token.to_string(),
        })
}
