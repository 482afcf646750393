// SPDX-License-Identifier: Apache-2.0
// SPDX-FileCopyrightText: 2026 SecLab Contributors

#![no_main]

use std::path::PathBuf;
use std::sync::LazyLock;

use libfuzzer_sys::fuzz_target;
use seclab_core::ResourceLocator;
use tempfile::TempDir;

struct Sandbox {
    _root: TempDir,
    locator: ResourceLocator,
    base: PathBuf,
}

// A downloads dir with one allowed file, plus a sibling that must stay unreachable.
static SANDBOX: LazyLock<Sandbox> = LazyLock::new(|| {
    let root = TempDir::new().unwrap();
    let base = root.path().join("downloads");
    std::fs::create_dir(&base).unwrap();
    std::fs::write(base.join("test.txt"), b"ok").unwrap();
    std::fs::write(root.path().join("secret.txt"), b"no").unwrap();

    let locator = ResourceLocator::new(&base, vec![".txt".to_string(), ".pdf".to_string()]);
    let base = base.canonicalize().unwrap();
    Sandbox {
        _root: root,
        locator,
        base,
    }
});

fuzz_target!(|data: &[u8]| {
    if let Ok(requested) = std::str::from_utf8(data)
        && let Ok(path) = SANDBOX.locator.resolve(requested)
    {
        let canonical = path.canonicalize().unwrap();
        assert_eq!(canonical.parent(), Some(SANDBOX.base.as_path()));
    }
});
