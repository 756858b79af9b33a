use crate::foundation::error::{CardError, CardResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Drawing surface dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// The card surface: every render targets this fixed 1200×800 canvas.
pub const CARD_CANVAS: Canvas = Canvas {
    width: 1200,
    height: 800,
};

impl Canvas {
    /// Create a validated canvas. The CPU raster context addresses surfaces
    /// with 16-bit coordinates, so both dimensions must fit in a `u16`.
    pub fn new(width: u32, height: u32) -> CardResult<Self> {
        if width == 0 || height == 0 {
            return Err(CardError::validation("canvas width/height must be > 0"));
        }
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(CardError::validation("canvas width/height must fit in u16"));
        }
        Ok(Self { width, height })
    }

    /// Dimensions as the `u16` pair the raster context wants.
    pub fn as_u16(self) -> CardResult<(u16, u16)> {
        let w: u16 = self
            .width
            .try_into()
            .map_err(|_| CardError::render("canvas width exceeds u16"))?;
        let h: u16 = self
            .height
            .try_into()
            .map_err(|_| CardError::render("canvas height exceeds u16"))?;
        Ok((w, h))
    }

    /// Width as `f64` for layout math.
    pub fn w(self) -> f64 {
        f64::from(self.width)
    }

    /// Height as `f64` for layout math.
    pub fn h(self) -> f64 {
        f64::from(self.height)
    }

    /// Horizontal midpoint; all card text is centered on this axis.
    pub fn mid_x(self) -> f64 {
        self.w() / 2.0
    }
}
