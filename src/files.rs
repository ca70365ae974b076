//! Filesystem helper for handlers that serve files.

use std::path::Path;

/// Reads a filesystem path into a `(status, body)` pair.
///
/// Missing entries and directories map to 404, regular files to 200 with
/// their bytes.
pub fn serve_file(path: impl AsRef<Path>) -> (u16, Vec<u8>) {
    let path = path.as_ref();

    let meta = match std::fs::metadata(path) {
        Ok(meta) => meta,
        Err(_) => return (404, b"404 Not Found".to_vec()),
    };

    if meta.is_dir() {
        return (404, b"404 Not Found".to_vec());
    }

    match std::fs::read(path) {
        Ok(bytes) => (200, bytes),
        Err(_) => (404, b"404 Not Found".to_vec()),
    }
}
