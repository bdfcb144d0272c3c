//! Sprite-sheet handle carried alongside a dataset snapshot.

use std::sync::Arc;

use crate::error::DecodeError;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Texture sampling mode requested from the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FilterMode {
    /// Nearest-neighbour; keeps pixel-art cell edges crisp.
    Point,
    #[default]
    Bilinear,
}

/// Shared, immutable sprite-sheet image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpriteSheet {
    bytes: Arc<[u8]>,
    width: u32,
    height: u32,
    filter_mode: FilterMode,
}

impl SpriteSheet {
    /// Wraps PNG bytes, reading the pixel size from the IHDR chunk.
    pub fn from_png(bytes: impl Into<Arc<[u8]>>) -> Result<Self, DecodeError> {
        let bytes = bytes.into();
        // Signature (8) + chunk length (4) + "IHDR" (4) + width (4) + height (4).
        if bytes.len() < 24 || bytes[..8] != PNG_SIGNATURE || bytes[12..16] != *b"IHDR" {
            return Err(DecodeError::InvalidSprite);
        }

        let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
        let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);

        Ok(Self {
            bytes,
            width,
            height,
            filter_mode: FilterMode::default(),
        })
    }

    /// Placeholder sheet with known dimensions and no pixel data.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            bytes: Arc::from(Vec::new()),
            width,
            height,
            filter_mode: FilterMode::default(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn filter_mode(&self) -> FilterMode {
        self.filter_mode
    }

    #[must_use]
    pub fn with_filter_mode(mut self, filter_mode: FilterMode) -> Self {
        self.filter_mode = filter_mode;
        self
    }
}

#[cfg(test)]
fn png_header(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = PNG_SIGNATURE.to_vec();
    bytes.extend_from_slice(&13u32.to_be_bytes());
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_dimensions_from_header() {
        let sheet = SpriteSheet::from_png(png_header(512, 256)).unwrap();
        assert_eq!((sheet.width(), sheet.height()), (512, 256));
        assert_eq!(sheet.filter_mode(), FilterMode::Bilinear);
    }

    #[test]
    fn rejects_non_png_bytes() {
        assert_eq!(
            SpriteSheet::from_png(b"GIF89a not a png at all".to_vec()),
            Err(DecodeError::InvalidSprite)
        );
    }
}
