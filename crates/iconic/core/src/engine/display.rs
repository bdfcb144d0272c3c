//! What the module face should show. Rendering itself is the host's job.

use crate::config::IconicConfig;
use crate::data::{IconRecord, SpriteSheet};

/// Texture the icon image should use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IconTexture {
    /// A cell of the dataset sprite sheet, addressed by [`Display::uv`].
    Sprite,
    /// Placeholder shown while idle.
    Empty,
    /// Shown once solved.
    Solved,
}

/// Normalized texture rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UvRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl UvRect {
    pub const FULL: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 1.0,
        height: 1.0,
    };

    /// Rectangle of an icon's cell within the sprite sheet.
    ///
    /// The y origin follows the renderer's bottom-up convention, measured
    /// from the top row of cells.
    pub fn for_icon(icon: &IconRecord, sprite: &SpriteSheet) -> Self {
        if sprite.width() == 0 || sprite.height() == 0 {
            return Self::FULL;
        }

        let cell = IconicConfig::SPRITE_CELL as f32;
        let x = cell / sprite.width() as f32;
        let y = cell / sprite.height() as f32;
        Self {
            x: x * icon.location_x() as f32,
            y: y - y * (icon.location_y() as f32 + 2.0),
            width: x,
            height: y,
        }
    }
}

/// Complete display model for one frame.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Display {
    /// Part name while active, otherwise the idle or solved caption.
    pub text: String,
    pub texture: IconTexture,
    pub uv: UvRect,
    /// Unit name with no icon of its own, shown next to the fallback icon.
    pub missing_name: Option<String>,
    /// Whether the selection grid accepts clicks.
    pub grid_enabled: bool,
    /// Whether the module face captures pointer input.
    pub captures_input: bool,
}

impl Display {
    pub const IDLE_TEXT: &'static str = "Iconic";
    pub const SOLVED_TEXT: &'static str = "GG!";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uv_rect_addresses_sprite_cell() {
        let icon = IconRecord::new("Wires", "wires", (2, 1), Vec::new());
        let uv = UvRect::for_icon(&icon, &SpriteSheet::blank(256, 128));
        assert_eq!(uv.width, 0.125);
        assert_eq!(uv.height, 0.25);
        assert_eq!(uv.x, 0.25);
        assert_eq!(uv.y, 0.25 - 0.25 * 3.0);
    }

    #[test]
    fn extreme_locations_do_not_overflow() {
        let icon = IconRecord::new("Far", "far", (i32::MAX, i32::MAX), Vec::new());
        let uv = UvRect::for_icon(&icon, &SpriteSheet::blank(64, 64));
        assert!(uv.x.is_finite());
        assert!(uv.y < 0.0);
    }

    #[test]
    fn degenerate_sprite_uses_full_rect() {
        let icon = IconRecord::new("Wires", "wires", (2, 1), Vec::new());
        assert_eq!(UvRect::for_icon(&icon, &SpriteSheet::blank(0, 0)), UvRect::FULL);
    }
}
