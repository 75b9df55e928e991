use serde::{Deserialize, Serialize};

/// 8-bit RGBA colour used by renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const RED: Rgba = Rgba::opaque(255, 0, 0);
    pub const GREEN: Rgba = Rgba::opaque(0, 255, 0);
    pub const BLUE: Rgba = Rgba::opaque(0, 0, 255);
    pub const YELLOW: Rgba = Rgba::opaque(255, 255, 0);

    /// Multiplier applied per channel by [`Rgba::darker`].
    pub const DARKEN_FACTOR: f64 = 0.7;

    #[must_use]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Scales every colour channel by [`Rgba::DARKEN_FACTOR`], keeping alpha.
    #[must_use]
    pub fn darker(self) -> Self {
        let scale = |c: u8| (f64::from(c) * Self::DARKEN_FACTOR) as u8;
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
            a: self.a,
        }
    }

    #[must_use]
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    #[must_use]
    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }
}
