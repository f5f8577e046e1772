//! Session: the working database and the four boundary operations.
//!
//! A [`Session`] owns at most one parsed [`DatabaseDBC`] together with the
//! path it was read from. Loading parses into a fresh database and swaps it
//! in only on success.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::dbc::{self, types::database::DatabaseDBC};
use crate::dbc::types::errors::{JsonExportError, SessionError};
use crate::json;

/// Receive and transmit frame names of one node, in database order.
#[derive(Default, Clone, PartialEq, Eq, Debug)]
pub struct NodeFrames {
    pub receive: Vec<String>,
    pub transmit: Vec<String>,
}

#[derive(Default, Debug)]
pub struct Session {
    database: Option<DatabaseDBC>,
    path: Option<PathBuf>,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    /// Currently loaded database, if any.
    pub fn database(&self) -> Option<&DatabaseDBC> {
        self.database.as_ref()
    }

    /// Path of the working DBC file, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    /// Parses `path` and makes it the working database.
    ///
    /// Returns the node names in declaration order. On error the previously
    /// loaded database stays in place.
    pub fn load_database(&mut self, path: &str) -> Result<Vec<String>, SessionError> {
        let db: DatabaseDBC = dbc::from_file(path)?;
        let names: Vec<String> = db.node_names();
        if names.is_empty() {
            warn!(path, "no nodes found, nothing can be selected or exported");
        }

        self.database = Some(db);
        self.path = Some(PathBuf::from(path));
        Ok(names)
    }

    /// Frames received and transmitted by `name`; `None` when the node is unknown
    /// or no database is loaded.
    pub fn select_node(&self, name: &str) -> Option<NodeFrames> {
        let db: &DatabaseDBC = self.database.as_ref()?;
        db.get_node_key_by_name(name)?;

        Some(NodeFrames {
            receive: db.rx_frames_of(name).map(|f| f.name.clone()).collect(),
            transmit: db.tx_frames_of(name).map(|f| f.name.clone()).collect(),
        })
    }

    /// Writes the compatible copy of `path` and loads it as the working database.
    ///
    /// Returns the path of the new file. When the copy cannot be parsed the
    /// file stays on disk and the error is returned.
    pub fn make_compatible(&mut self, path: &str) -> Result<PathBuf, SessionError> {
        let created: PathBuf = dbc::make_compatible(path)?;

        let created_str: String = created.to_string_lossy().into_owned();
        self.load_database(&created_str)?;
        info!(path = %created_str, "compatible file set as the working file");
        Ok(created)
    }

    /// Exports the JSON configuration of the `selected` nodes to `path`.
    pub fn export_json<S: AsRef<str>>(
        &self,
        path: &str,
        selected: &[S],
    ) -> Result<(), SessionError> {
        if !path.ends_with(".json") {
            return Err(JsonExportError::InvalidExtension {
                path: path.to_string(),
            }
            .into());
        }
        let Some(db) = self.database.as_ref() else {
            return Err(SessionError::NoDatabase);
        };
        json::to_file(path, db, selected)?;
        Ok(())
    }
}
