use path_clean::PathClean;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

pub const DATA_DIR: &str = "data";
pub const DATA_FILE: &str = "campus_points.json";

/// Location of the point data relative to a tool root directory
pub fn data_path_in(root: &Path) -> PathBuf {
    root.join(DATA_DIR).join(DATA_FILE).clean()
}

/// The data file shipped alongside this crate
pub fn default_data_path() -> PathBuf {
    data_path_in(Path::new(env!("CARGO_MANIFEST_DIR")))
}

/// Hex-encoded SHA-256 of `bytes`
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_path_is_cleaned() {
        let path = data_path_in(Path::new("/srv/app/bin/.."));
        assert_eq!(path, PathBuf::from("/srv/app/data/campus_points.json"));
    }

    #[test]
    fn default_path_points_into_the_crate() {
        let path = default_data_path();
        assert!(path.ends_with("data/campus_points.json"));
        assert!(path.starts_with(env!("CARGO_MANIFEST_DIR")));
    }

    #[test]
    fn sha256_of_empty_input() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
