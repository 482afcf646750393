// SPDX-License-Identifier: Apache-2.0

//! Safe resolution of user-supplied download names.
//!
//! A requested name is reduced to its final path segment, checked against an
//! extension allow-list and joined onto the downloads directory. The result
//! is accepted only if it exists and its canonical form sits directly inside
//! the canonical downloads directory.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Why a requested filename was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Name was empty, only whitespace, or ended in a separator.
    #[error("Filename is required")]
    EmptyName,

    /// Extension is not on the allow-list.
    #[error("File type not allowed")]
    DisallowedExtension,

    /// Name would resolve outside the downloads directory.
    #[error("Invalid file path")]
    Escape,

    /// No regular file with that name exists.
    #[error("File not found")]
    NotFound,
}

impl Rejection {
    /// Returns true when the rejection is the caller's fault (HTTP 400).
    ///
    /// [`Rejection::NotFound`] is the only 404.
    #[must_use]
    pub fn is_bad_request(&self) -> bool {
        !matches!(self, Rejection::NotFound)
    }
}

/// Resolves `requested` to a file directly inside `base_dir`.
///
/// Allow-list entries are compared case-insensitively and may be written
/// with or without the leading dot.
pub fn resolve<S: AsRef<str>>(
    requested: &str,
    base_dir: &Path,
    allowed_extensions: &[S],
) -> Result<PathBuf, Rejection> {
    if requested.trim().is_empty() {
        return Err(Rejection::EmptyName);
    }

    let segment = final_segment(requested);
    if segment.is_empty() {
        return Err(Rejection::EmptyName);
    }
    if segment == "." || segment == ".." || segment.contains('\0') {
        return Err(Rejection::Escape);
    }

    let extension = Path::new(segment)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or(Rejection::DisallowedExtension)?;
    let allowed = allowed_extensions.iter().any(|allowed| {
        allowed
            .as_ref()
            .trim_start_matches('.')
            .eq_ignore_ascii_case(&extension)
    });
    if !allowed {
        return Err(Rejection::DisallowedExtension);
    }

    let candidate = base_dir.join(segment);
    if !candidate.is_file() {
        return Err(Rejection::NotFound);
    }

    let canonical_base = base_dir.canonicalize().map_err(|_| Rejection::NotFound)?;
    let canonical = candidate.canonicalize().map_err(|_| Rejection::NotFound)?;
    if canonical.parent() != Some(canonical_base.as_path()) {
        tracing::warn!(
            requested = %requested,
            resolved = %canonical.display(),
            "Download resolved outside the downloads directory"
        );
        return Err(Rejection::Escape);
    }

    Ok(candidate)
}

/// Keeps only the text after the last `/` or `\`.
fn final_segment(requested: &str) -> &str {
    requested
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(requested)
}

/// A downloads directory paired with its extension allow-list.
#[derive(Debug, Clone)]
pub struct ResourceLocator {
    base_dir: PathBuf,
    allowed_extensions: Vec<String>,
}

impl ResourceLocator {
    /// Creates a locator for `base_dir`.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>, allowed_extensions: Vec<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            allowed_extensions,
        }
    }

    /// Resolves a requested name against this locator's directory.
    pub fn resolve(&self, requested: &str) -> Result<PathBuf, Rejection> {
        resolve(requested, &self.base_dir, &self.allowed_extensions)
    }

    /// The downloads directory.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Creates the downloads directory if it does not exist yet.
    pub fn ensure_base_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.base_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const ALLOWED: [&str; 5] = [".txt", ".pdf", ".jpg", ".png", ".doc"];

    fn downloads() -> (TempDir, PathBuf) {
        let root = TempDir::new().unwrap();
        let base = root.path().join("downloads");
        fs::create_dir(&base).unwrap();
        fs::write(base.join("report.pdf"), b"%PDF-1.4").unwrap();
        fs::write(base.join("test.txt"), b"hello").unwrap();
        fs::write(root.path().join("secret.txt"), b"top secret").unwrap();
        (root, base)
    }

    #[test]
    fn resolves_existing_allowed_file() {
        let (_root, base) = downloads();
        let path = resolve("report.pdf", &base, &[".pdf"]).unwrap();
        assert_eq!(path, base.join("report.pdf"));
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        let (_root, base) = downloads();
        assert_eq!(resolve("", &base, &ALLOWED), Err(Rejection::EmptyName));
        assert_eq!(resolve("   ", &base, &ALLOWED), Err(Rejection::EmptyName));
    }

    #[test]
    fn trailing_separator_leaves_no_name() {
        let (_root, base) = downloads();
        for requested in ["dir/", "dir\\", "../", "/"] {
            assert_eq!(
                resolve(requested, &base, &ALLOWED),
                Err(Rejection::EmptyName),
                "{requested}"
            );
        }
    }

    #[test]
    fn rejects_disallowed_extension() {
        let (_root, base) = downloads();
        assert_eq!(
            resolve("a.exe", &base, &[".pdf", ".txt"]),
            Err(Rejection::DisallowedExtension)
        );
        assert_eq!(
            resolve("Makefile", &base, &ALLOWED),
            Err(Rejection::DisallowedExtension)
        );
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        let (_root, base) = downloads();
        fs::write(base.join("PHOTO.JPG"), b"jpeg").unwrap();
        let path = resolve("PHOTO.JPG", &base, &ALLOWED).unwrap();
        assert_eq!(path, base.join("PHOTO.JPG"));
        assert!(resolve("test.txt", &base, &["TXT"]).is_ok());
    }

    #[test]
    fn parent_traversal_never_escapes() {
        let (_root, base) = downloads();
        let result = resolve("../../etc/passwd", &base, &[".txt"]);
        assert!(matches!(
            result,
            Err(Rejection::Escape | Rejection::DisallowedExtension)
        ));
    }

    #[test]
    fn traversal_is_stripped_to_final_segment() {
        let (_root, base) = downloads();
        // The sibling secret.txt must not be reachable; only downloads/secret.txt,
        // which does not exist.
        assert_eq!(
            resolve("../secret.txt", &base, &ALLOWED),
            Err(Rejection::NotFound)
        );
        assert_eq!(
            resolve("..\\..\\test.txt", &base, &ALLOWED).unwrap(),
            base.join("test.txt")
        );
        assert_eq!(
            resolve("/etc/../test.txt", &base, &ALLOWED).unwrap(),
            base.join("test.txt")
        );
    }

    #[test]
    fn dot_segments_are_escapes() {
        let (_root, base) = downloads();
        assert_eq!(resolve("..", &base, &ALLOWED), Err(Rejection::Escape));
        assert_eq!(resolve("a/..", &base, &ALLOWED), Err(Rejection::Escape));
        assert_eq!(resolve(".", &base, &ALLOWED), Err(Rejection::Escape));
    }

    #[test]
    fn nul_byte_is_an_escape() {
        let (_root, base) = downloads();
        assert_eq!(
            resolve("test.txt\0.pdf", &base, &ALLOWED),
            Err(Rejection::Escape)
        );
    }

    #[test]
    fn missing_file_is_not_found() {
        let (_root, base) = downloads();
        assert_eq!(
            resolve("missing.txt", &base, &ALLOWED),
            Err(Rejection::NotFound)
        );
    }

    #[test]
    fn directory_is_not_found() {
        let (_root, base) = downloads();
        fs::create_dir(base.join("folder.txt")).unwrap();
        assert_eq!(
            resolve("folder.txt", &base, &ALLOWED),
            Err(Rejection::NotFound)
        );
    }

    #[cfg(unix)]
    #[test]
    fn symlink_out_of_base_is_an_escape() {
        let (root, base) = downloads();
        std::os::unix::fs::symlink(root.path().join("secret.txt"), base.join("link.txt"))
            .unwrap();
        assert_eq!(resolve("link.txt", &base, &ALLOWED), Err(Rejection::Escape));
    }

    #[test]
    fn rejection_status_classes() {
        assert!(Rejection::EmptyName.is_bad_request());
        assert!(Rejection::DisallowedExtension.is_bad_request());
        assert!(Rejection::Escape.is_bad_request());
        assert!(!Rejection::NotFound.is_bad_request());
    }

    #[test]
    fn locator_wraps_resolve() {
        let (_root, base) = downloads();
        let locator = ResourceLocator::new(&base, vec![".txt".to_string()]);
        assert_eq!(locator.resolve("test.txt").unwrap(), base.join("test.txt"));
        assert_eq!(
            locator.resolve("report.pdf"),
            Err(Rejection::DisallowedExtension)
        );
        assert_eq!(locator.base_dir(), base.as_path());
    }
}
