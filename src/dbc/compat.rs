//! Compatible copy of a `.dbc` file.
//!
//! The copy carries every vendor attribute of
//! [`VENDOR_ATTRIBUTES`](crate::dbc::types::attributes::VENDOR_ATTRIBUTES)
//! exactly once: pre-existing definitions and defaults of those attributes
//! are dropped, then the canonical `BA_DEF_` block and `BA_DEF_DEF_` block are
//! inserted in front of the first remaining definition and default.

use std::borrow::Cow;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use encoding_rs::WINDOWS_1252;
use tracing::{debug, info};

use crate::dbc::core::strings;
use crate::dbc::parse::decode_windows_1252;
use crate::dbc::types::{
    attributes::{AttrObject, VENDOR_ATTRIBUTES, is_vendor_attribute, vendor_attribute},
    errors::DbcCompatError,
};

// Statements the definition block may be placed in front of when no `BA_DEF_` is left.
const DEFINITION_FALLBACK: &[&str] = &["BA_DEF_DEF_", "BA_", "VAL_", "SIG_VALTYPE_"];
// Statements the defaults block may be placed in front of when no `BA_DEF_DEF_` follows.
const DEFAULTS_FALLBACK: &[&str] = &["BA_", "VAL_", "SIG_VALTYPE_"];

/// Writes a compatible sibling of the DBC file at `path` and returns its path.
///
/// The new file is named `<stem>_<N>.dbc`, next to the input, with `N` the
/// smallest positive integer whose file does not exist yet. Existing files
/// are never overwritten. Text is read and written as Windows-1252 and the
/// input's line terminator is kept.
///
/// # Errors
/// - [`DbcCompatError::InvalidExtension`] / [`DbcCompatError::NotFound`] for bad input paths.
/// - [`DbcCompatError::Read`], [`DbcCompatError::CreateFile`], [`DbcCompatError::Write`] on I/O failures.
///
/// # Example
/// ```no_run
/// use dbc2phd::dbc;
///
/// let created = dbc::make_compatible("truck.dbc").expect("Failed to write compatible DBC");
/// println!("{}", created.display()); // truck_1.dbc
/// ```
pub fn make_compatible(path: &str) -> Result<PathBuf, DbcCompatError> {
    if !path.ends_with(".dbc") {
        return Err(DbcCompatError::InvalidExtension {
            path: path.to_string(),
        });
    }
    let input: &Path = Path::new(path);
    if !input.is_file() {
        return Err(DbcCompatError::NotFound {
            path: path.to_string(),
        });
    }

    // 1) Read and decode
    let bytes: Vec<u8> = std::fs::read(input).map_err(|source| DbcCompatError::Read {
        path: path.to_string(),
        source,
    })?;
    let text: String = decode_windows_1252(&bytes);
    let newline: &str = if text.contains("\r\n") { "\r\n" } else { "\n" };

    // 2) Rewrite
    let lines: Vec<String> = text.lines().map(str::to_string).collect();
    let removed: usize = find_conflicting_lines(&lines).len();
    let lines: Vec<String> = augment_lines(lines);

    let mut out: String = lines.join(newline);
    out.push_str(newline);
    let (encoded, _, _): (Cow<'_, [u8]>, _, _) = WINDOWS_1252.encode(&out);

    // 3) Write to the first free `<stem>_<N>.dbc`
    let (target, file) = create_sibling(input)?;
    write_sibling(&target, file, &encoded)?;

    info!(
        input = path,
        output = %target.display(),
        removed,
        "created compatible database"
    );
    Ok(target)
}

/// Indices (ascending) of the lines that define a vendor attribute or its default.
///
/// A `BA_DEF_` line conflicts when its owner keyword and quoted name match one
/// of the vendor attributes of that owner. A `BA_DEF_DEF_` line conflicts when
/// its quoted name matches any vendor attribute.
pub fn find_conflicting_lines<S: AsRef<str>>(lines: &[S]) -> Vec<usize> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| is_conflicting(line.as_ref()))
        .map(|(idx, _)| idx)
        .collect()
}

fn is_conflicting(line: &str) -> bool {
    let parts: Vec<&str> = strings::tokens(line);
    if parts.len() < 3 {
        return false;
    }
    match parts[0] {
        "BA_DEF_" => {
            let Some(object) = AttrObject::from_keyword(parts[1]) else {
                return false;
            };
            quoted(parts[2]).is_some_and(|name| vendor_attribute(name, object).is_some())
        }
        "BA_DEF_DEF_" => quoted(parts[1]).is_some_and(is_vendor_attribute),
        _ => false,
    }
}

// `"Name"` → `Name`; `None` when the token is not a quoted string.
fn quoted(token: &str) -> Option<&str> {
    token.strip_prefix('"')?.strip_suffix('"')
}

// First statement (three tokens or more) starting with one of `keywords`, at or after `from`.
fn find_statement(lines: &[String], from: usize, keywords: &[&str]) -> Option<usize> {
    lines.iter().enumerate().skip(from).find_map(|(idx, line)| {
        let parts: Vec<&str> = strings::tokens(line);
        (parts.len() >= 3 && keywords.contains(&parts[0])).then_some(idx)
    })
}

/// Drops conflicting lines and inserts the canonical definition and default blocks.
pub(crate) fn augment_lines(mut lines: Vec<String>) -> Vec<String> {
    // 1) Remove, highest index first
    for idx in find_conflicting_lines(&lines).into_iter().rev() {
        debug!(line = idx + 1, text = %lines[idx], "dropping conflicting attribute line");
        lines.remove(idx);
    }

    // 2) Definition block
    let def_at: usize = find_statement(&lines, 0, &["BA_DEF_"])
        .or_else(|| find_statement(&lines, 0, DEFINITION_FALLBACK))
        .unwrap_or(lines.len());
    let definitions: Vec<String> = VENDOR_ATTRIBUTES.iter().map(|a| a.definition_line()).collect();
    let def_end: usize = def_at + definitions.len();
    lines.splice(def_at..def_at, definitions);

    // 3) Defaults block, after the definitions
    let default_at: usize = find_statement(&lines, def_end, &["BA_DEF_DEF_"])
        .or_else(|| find_statement(&lines, def_end, DEFAULTS_FALLBACK))
        .unwrap_or(lines.len());
    let defaults: Vec<String> = VENDOR_ATTRIBUTES.iter().map(|a| a.default_line()).collect();
    lines.splice(default_at..default_at, defaults);

    lines
}

// Creates `<stem>_<N>.dbc` next to `input` with create-new semantics.
fn create_sibling(input: &Path) -> Result<(PathBuf, File), DbcCompatError> {
    let dir: &Path = input.parent().unwrap_or_else(|| Path::new(""));
    let stem: String = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut n: u32 = 1;
    loop {
        let candidate: PathBuf = dir.join(format!("{}_{}.dbc", stem, n));
        match OpenOptions::new().write(true).create_new(true).open(&candidate) {
            Ok(file) => return Ok((candidate, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => n += 1,
            Err(source) => {
                return Err(DbcCompatError::CreateFile {
                    path: candidate.display().to_string(),
                    source,
                });
            }
        }
    }
}

// Writes `bytes` to the freshly created `target`; the file is removed again on failure.
fn write_sibling(target: &Path, file: File, bytes: &[u8]) -> Result<(), DbcCompatError> {
    let mut writer: BufWriter<File> = BufWriter::new(file);
    let written: std::io::Result<()> = writer.write_all(bytes).and_then(|_| writer.flush());
    drop(writer);

    if let Err(source) = written {
        if let Err(e) = std::fs::remove_file(target) {
            debug!(path = %target.display(), error = %e, "could not remove partial copy");
        }
        return Err(DbcCompatError::Write {
            path: target.display().to_string(),
            source,
        });
    }
    Ok(())
}
