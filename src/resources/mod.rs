//! Loading external files and owning the resources created from them.
//!
//! - `managed` holds [`managed::Managed`], the scoped owner for GPU textures,
//!   render targets, buffers and decoded images, together with the
//!   kind-specific loaders.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

pub mod managed;

/// Directory searched for relative asset paths that don't exist as given.
pub const ASSET_DIR: &str = "assets";

/// Resolve `file_name` to a readable path.
///
/// Absolute paths and relative paths that exist from the working directory
/// are used as they are; anything else is looked up under `./assets/`.
pub fn resolve_asset_path(file_name: impl AsRef<Path>) -> PathBuf {
    let file_name = file_name.as_ref();
    if file_name.is_absolute() || file_name.exists() {
        return file_name.to_path_buf();
    }
    Path::new("./").join(ASSET_DIR).join(file_name)
}

pub fn load_string(file_name: impl AsRef<Path>) -> anyhow::Result<String> {
    let path = resolve_asset_path(file_name);
    std::fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))
}

pub fn load_binary(file_name: impl AsRef<Path>) -> anyhow::Result<Vec<u8>> {
    let path = resolve_asset_path(file_name);
    std::fs::read(&path).with_context(|| format!("failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn existing_paths_are_used_verbatim() {
        let dir = tempfile::tempdir().expect("creating temp dir");
        let file = dir.path().join("hello.txt");
        std::fs::write(&file, "hi").expect("writing file");

        assert_eq!(resolve_asset_path(&file), file);
        assert_eq!(load_string(&file).expect("reading file"), "hi");
        assert_eq!(load_binary(&file).expect("reading file"), b"hi");
    }

    #[test]
    fn missing_relative_paths_fall_back_to_assets() {
        let resolved = resolve_asset_path("definitely/missing.png");
        assert_eq!(resolved, Path::new("./assets/definitely/missing.png"));
        assert!(load_binary("definitely/missing.png").is_err());
    }
}
