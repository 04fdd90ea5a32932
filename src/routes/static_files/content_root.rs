use std::path::{Component, Path, PathBuf};

use super::StaticFileError;

/// The directory static assets are served from.
#[derive(Debug, Clone)]
pub struct ContentRoot {
    root: PathBuf,
    index_file: String,
}

impl ContentRoot {
    /// `root` is expected to be absolute and canonical.
    pub fn new(root: PathBuf, index_file: String) -> Self {
        Self { root, index_file }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Map a raw (still percent-encoded) request path onto a path under the
    /// root. Decoding happens before normalisation so encoded separators and
    /// dot segments cannot slip past the containment check.
    pub fn resolve(&self, raw_path: &str) -> Result<PathBuf, StaticFileError> {
        let decoded = urlencoding::decode(raw_path).map_err(|_| StaticFileError::BadRequest)?;
        let relative = if decoded == "/" {
            self.index_file.as_str()
        } else {
            decoded.as_ref()
        };

        let candidate = normalize(&self.root.join(relative.trim_start_matches('/')));
        if !candidate.starts_with(&self.root) {
            tracing::warn!(
                request_path = raw_path,
                "Path traversal attempt blocked."
            );
            return Err(StaticFileError::Forbidden);
        }

        // A trailing slash can only name a directory, never a servable file.
        if relative.ends_with('/') {
            return Err(StaticFileError::NotFound);
        }

        Ok(candidate)
    }
}

/// Lexically collapse `.` and `..` without touching the filesystem. `..` at
/// the filesystem root stays at the root.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
