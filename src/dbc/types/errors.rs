use std::io;
use thiserror::Error;

/// Errors produced while loading and parsing a `.dbc` file.
///
/// Input errors (extension, missing file, I/O) come first; the remaining
/// variants abort a parse and carry the 1-based line number.
#[derive(Debug, Error)]
pub enum DbcParseError {
    #[error("Not a valid .dbc file: {path}")]
    InvalidExtension { path: String },
    #[error("File not found: {path}")]
    NotFound { path: String },
    #[error("Failed while reading '{path}'. \nError: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Line {line}: '{token}' is not a valid unsigned number")]
    InvalidNumber { line: usize, token: String },
    #[error("Line {line}: malformed signal definition '{text}'")]
    MalformedSignal { line: usize, text: String },
    #[error("Line {line}: signal block of the message runs past the end of the file")]
    TruncatedSignalBlock { line: usize },
    #[error("Line {line}: message identifier {id} is already assigned to another message")]
    DuplicateFrameId { line: usize, id: u32 },
}

/// Errors produced while writing the compatible copy of a `.dbc` file.
#[derive(Debug, Error)]
pub enum DbcCompatError {
    #[error("Not a valid .dbc file: {path}")]
    InvalidExtension { path: String },
    #[error("File not found: {path}")]
    NotFound { path: String },
    #[error("Failed while reading '{path}'. \nError: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to create '{path}'. \nError: {source}")]
    CreateFile {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed while writing '{path}'. \nError: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Errors produced while exporting the JSON configuration.
#[derive(Debug, Error)]
pub enum JsonExportError {
    #[error("Output path must end in .json: {path}")]
    InvalidExtension { path: String },
    #[error("Node '{name}' is not present in the database")]
    UnknownNode { name: String },
    #[error("Failed to format JSON content. \nError: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to create directories for '{path}'. \nError: {source}")]
    CreateDirectory {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to create '{path}'. \nError: {source}")]
    CreateFile {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed while writing '{path}'. \nError: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Errors returned by the [`Session`](crate::session::Session) boundary operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No database loaded")]
    NoDatabase,
    #[error(transparent)]
    Parse(#[from] DbcParseError),
    #[error(transparent)]
    Compat(#[from] DbcCompatError),
    #[error(transparent)]
    Export(#[from] JsonExportError),
}
