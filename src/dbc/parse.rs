use crate::dbc::core::{attributes, bo_, bu_, strings};
use crate::dbc::types::database::DatabaseDBC;
use crate::dbc::types::errors::DbcParseError;

use std::fs;
use std::path::Path;

use encoding_rs::WINDOWS_1252;
use tracing::{info, warn};

/// Parses a DBC file and returns a populated [`DatabaseDBC`] instance.
///
/// This function reads a DBC file from disk, decodes it as Windows-1252 and
/// hands the text to [`from_str`].
///
/// # Parameters
/// - `path`: Path to the `.dbc` file to parse.
///
/// # Errors
/// Returns an `Err(DbcParseError)` if:
/// - The path does not end in `.dbc`.
/// - The file does not exist, cannot be opened or read.
/// - The content cannot be parsed (see [`from_str`]).
///
/// # Example
/// ```no_run
/// use dbc2phd::dbc;
///
/// let db = dbc::from_file("truck.dbc").expect("Failed to parse DBC file");
/// println!("Parsed {} messages", db.frames.len());
/// ```
pub fn from_file(path: &str) -> Result<DatabaseDBC, DbcParseError> {
    // check if provided file has .dbc format
    if !path.ends_with(".dbc") {
        return Err(DbcParseError::InvalidExtension {
            path: path.to_string(),
        });
    }
    if !Path::new(path).is_file() {
        return Err(DbcParseError::NotFound {
            path: path.to_string(),
        });
    }

    let bytes: Vec<u8> = fs::read(path).map_err(|source| DbcParseError::Read {
        path: path.to_string(),
        source,
    })?;
    let text: String = decode_windows_1252(&bytes);

    let db: DatabaseDBC = from_str(&text)?;
    info!(
        path,
        nodes = db.nodes.len(),
        messages = db.frames.len(),
        signals = db.signals.len(),
        "loaded database"
    );
    Ok(db)
}

/// Parses DBC text into a [`DatabaseDBC`].
///
/// One pass over the lines, each dispatched on its first token:
/// - **Nodes** (from the `BU_` line)
/// - **Messages** and their **signals** (from `BO_` headers and the contiguous `SG_` block)
/// - **Vendor attributes** for nodes, messages and signals (from `BA_` lines)
///
/// Every other statement is ignored. Once the pass is complete the messages
/// are ordered by ascending PGN.
///
/// # Errors
/// Malformed numbers, malformed or truncated signal blocks and duplicate
/// message identifiers abort the whole parse. Attribute lines that reference
/// an unknown node, message or signal are skipped.
pub fn from_str(text: &str) -> Result<DatabaseDBC, DbcParseError> {
    let lines: Vec<&str> = text.lines().collect();

    // Initialize DatabaseDBC
    let mut db: DatabaseDBC = DatabaseDBC::default();

    for (idx, line) in lines.iter().enumerate() {
        let line_no: usize = idx + 1;

        match strings::keyword(line) {
            // Some DBCs use "BU_:" while others use "BU_ :". Accept both.
            "BU_" | "BU_:" => {
                bu_::decode(&mut db, line);
            }
            "BO_" => {
                bo_::decode(&mut db, &lines, idx)?;
            }
            "BA_" => {
                let parts: Vec<&str> = strings::tokens(line);
                match (parts.len(), parts.get(2).copied()) {
                    (5, Some("BU_")) => attributes::ba_bu_::decode(&mut db, &parts, line_no)?,
                    (5, Some("BO_")) => attributes::ba_bo_::decode(&mut db, &parts, line_no)?,
                    (6, Some("SG_")) => attributes::ba_sg_::decode(&mut db, &parts, line_no)?,
                    _ => {}
                }
            }
            _ => {}
        }
    }

    // re-order
    db.sort_frames_by_pgn();

    if db.is_empty() {
        warn!("database declares no nodes");
    }

    Ok(db)
}

// DBC files are written in the Windows-1252 code page. A leading BOM is not
// honoured: its bytes decode as Windows-1252 like the rest of the file.
pub(crate) fn decode_windows_1252(bytes: &[u8]) -> String {
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    text.into_owned()
}
