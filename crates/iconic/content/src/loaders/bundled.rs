//! Bundled dataset loader.

use std::path::{Path, PathBuf};

use iconic_core::SpriteSheet;

use crate::loaders::{LoadResult, read_bytes, read_file};

/// File name of the encoded dataset payload.
pub const DATASET_FILE: &str = "iconic.txt";

/// File name of the sprite sheet image.
pub const SPRITE_FILE: &str = "iconic.png";

/// Raw bundled dataset: the undecoded payload and its sprite sheet.
#[derive(Clone, Debug)]
pub struct BundledData {
    pub text: String,
    pub sprite: SpriteSheet,
}

/// Loader for the dataset files shipped in a data directory.
pub struct BundledLoader {
    data_dir: PathBuf,
}

impl BundledLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Reads `iconic.txt` and `iconic.png` from the data directory.
    ///
    /// The payload is returned undecoded so the store can apply its
    /// version rules before installing it.
    pub fn load(&self) -> LoadResult<BundledData> {
        let text = read_file(&self.data_dir.join(DATASET_FILE))?;
        let bytes = read_bytes(&self.data_dir.join(SPRITE_FILE))?;
        let sprite = SpriteSheet::from_png(bytes)
            .map_err(|e| anyhow::anyhow!("Failed to decode {}: {}", SPRITE_FILE, e))?;

        Ok(BundledData {
            text: text.trim_end().to_string(),
            sprite,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_header(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = vec![0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];
        bytes.extend_from_slice(&13u32.to_be_bytes());
        bytes.extend_from_slice(b"IHDR");
        bytes.extend_from_slice(&width.to_be_bytes());
        bytes.extend_from_slice(&height.to_be_bytes());
        bytes
    }

    #[test]
    fn loads_payload_and_sprite_from_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DATASET_FILE), "5#m|0|1|0,0|1$1#A^B\n").unwrap();
        std::fs::write(dir.path().join(SPRITE_FILE), png_header(128, 64)).unwrap();

        let data = BundledLoader::new(dir.path()).load().unwrap();
        assert_eq!(data.text, "5#m|0|1|0,0|1$1#A^B");
        assert_eq!((data.sprite.width(), data.sprite.height()), (128, 64));
    }

    #[test]
    fn missing_files_are_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = BundledLoader::new(dir.path()).load().unwrap_err();
        assert!(err.to_string().contains(DATASET_FILE));
    }

    #[test]
    fn invalid_sprite_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DATASET_FILE), "5#m|0|1|0,0|1$1#A^B").unwrap();
        std::fs::write(dir.path().join(SPRITE_FILE), b"not a png").unwrap();

        let err = BundledLoader::new(dir.path()).load().unwrap_err();
        assert!(err.to_string().contains(SPRITE_FILE));
    }
}
