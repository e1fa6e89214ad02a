// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

fn read_to_string(path: &Path, kind: &'static str) -> Result<String> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => Error::ResourceNotFound {
            kind,
            path: path.to_path_buf(),
        },
        _ => Error::io(path, source),
    })
}

/// Reads the compiler debug dump as one opaque text blob.
pub fn read_debug_dump(path: &Path) -> Result<String> {
    read_to_string(path, "debug dump")
}

/// Reads and parses the module description document.
pub fn read_document(path: &Path) -> Result<Value> {
    let text = read_to_string(path, "module document")?;
    serde_json::from_str(&text).map_err(|source| Error::MalformedDocument {
        path: path.to_path_buf(),
        source,
    })
}

/// Serializes `document` with `indent` spaces per level and a trailing
/// newline.
pub fn to_pretty_string(document: &Value, indent: usize) -> Result<String> {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    document.serialize(&mut ser)?;
    buf.push(b'\n');
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Writes the document to `path`. The content goes to a temporary file in the
/// same directory first and is then renamed over `path`, so a failure never
/// leaves a partially written document behind. An existing document keeps its
/// permissions.
pub fn write_document(path: &Path, document: &Value, indent: usize) -> Result<()> {
    let text = to_pretty_string(document, indent)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    tmp.write_all(text.as_bytes())
        .and_then(|_| tmp.flush())
        .map_err(|e| Error::io(tmp.path(), e))?;
    match fs::metadata(path) {
        Ok(meta) => tmp
            .as_file()
            .set_permissions(meta.permissions())
            .map_err(|e| Error::io(tmp.path(), e))?,
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(Error::io(path, e)),
    }
    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;
    Ok(())
}
