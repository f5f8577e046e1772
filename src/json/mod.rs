//! # json
//!
//! Projection of a [`DatabaseDBC`] onto the PHD controller-application
//! configuration: one `can0` interface in `J1939` mode, one controller
//! application per selected node with its receive and transmit messages.

pub(crate) mod document;
pub(crate) mod formatter;

pub use document::{DEVICE_NAME, MODE};

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::dbc::types::{database::DatabaseDBC, errors::JsonExportError, node::NodeDBC};
use document::Document;
use formatter::PhdFormatter;

/// Renders the configuration for the `selected` nodes.
///
/// Nodes appear in selection order; a name selected twice is emitted once.
/// Frames keep the database order (ascending PGN after a parse). The text
/// ends with a newline.
///
/// # Errors
/// - [`JsonExportError::UnknownNode`] if a selected name is not in `db`.
/// - [`JsonExportError::Serialize`] if serialization fails.
pub fn to_string<S: AsRef<str>>(
    db: &DatabaseDBC,
    selected: &[S],
) -> Result<String, JsonExportError> {
    // 1) Resolve the selection, first occurrence wins
    let mut nodes: Vec<&NodeDBC> = Vec::with_capacity(selected.len());
    for name in selected {
        let name: &str = name.as_ref();
        let Some(node) = db.get_node_by_name(name) else {
            return Err(JsonExportError::UnknownNode {
                name: name.to_string(),
            });
        };
        if !nodes.iter().any(|n| n.name == node.name) {
            nodes.push(node);
        }
    }

    // 2) Serialize
    let document: Document<'_> = Document::new(db, &nodes);
    let mut buf: Vec<u8> = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PhdFormatter::default());
    document.serialize(&mut ser)?;
    buf.push(b'\n');

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Renders the configuration for the `selected` nodes and writes it to `path`.
///
/// The destination must end in `.json`; missing parent directories are created
/// and an existing file is replaced.
///
/// # Example
/// ```no_run
/// use dbc2phd::{dbc, json};
///
/// let db = dbc::from_file("truck.dbc").expect("Failed to parse DBC file");
/// json::to_file("phd_config.json", &db, &["Engine"]).expect("Failed to export");
/// ```
pub fn to_file<S: AsRef<str>>(
    path: &str,
    db: &DatabaseDBC,
    selected: &[S],
) -> Result<(), JsonExportError> {
    if !path.ends_with(".json") {
        return Err(JsonExportError::InvalidExtension {
            path: path.to_string(),
        });
    }

    let text: String = to_string(db, selected)?;

    let path_ref: &Path = Path::new(path);
    if let Some(parent) = path_ref.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| JsonExportError::CreateDirectory {
            path: parent.display().to_string(),
            source,
        })?;
    }

    let file: File = File::create(path_ref).map_err(|source| JsonExportError::CreateFile {
        path: path.to_string(),
        source,
    })?;
    let mut writer: BufWriter<File> = BufWriter::new(file);
    writer
        .write_all(text.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|source| JsonExportError::Write {
            path: path.to_string(),
            source,
        })?;

    info!(path, nodes = selected.len(), bytes = text.len(), "exported configuration");
    Ok(())
}
