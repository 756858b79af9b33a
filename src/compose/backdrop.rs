use crate::foundation::core::Canvas;
use crate::foundation::rng::Rng64;

/// Gradient endpoint at the top-left corner.
pub const GRADIENT_START: [u8; 3] = [0x03, 0x0a, 0x1a];
/// Gradient endpoint at the bottom-right corner.
pub const GRADIENT_END: [u8; 3] = [0x07, 0x13, 0x32];

/// Grid line spacing on both axes.
pub const GRID_STEP: f64 = 50.0;
/// Grid line width.
pub const GRID_LINE_WIDTH: f64 = 1.0;
/// Grid stroke color, straight alpha (blue at 0.05).
pub const GRID_RGBA: [u8; 4] = [76, 154, 255, 13];

/// Number of decorative bloom circles.
pub const BLOOM_COUNT: usize = 5;
/// Minimum bloom circle radius.
pub const BLOOM_MIN_RADIUS: f64 = 50.0;
/// Maximum bloom circle radius.
pub const BLOOM_MAX_RADIUS: f64 = 200.0;
/// Gaussian sigma for the bloom soft edge, in full-resolution pixels.
pub const BLOOM_SIGMA: f32 = 50.0;

// Circles alternate between these two hues (blue, violet at 0.1 alpha).
const BLOOM_HUES: [[u8; 4]; 2] = [[76, 154, 255, 26], [140, 111, 255, 26]];

/// One decorative circle, in full-resolution surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BloomCircle {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    /// Fill color, straight alpha.
    pub rgba: [u8; 4],
}

/// Sample the bloom circles for one render.
///
/// Per circle the draw order is x, y, radius; positions are uniform over the
/// surface and radii uniform in [`BLOOM_MIN_RADIUS`, `BLOOM_MAX_RADIUS`).
pub fn scatter_bloom(canvas: Canvas, rng: &mut Rng64) -> Vec<BloomCircle> {
    (0..BLOOM_COUNT)
        .map(|i| {
            let cx = rng.in_range(0.0, canvas.w());
            let cy = rng.in_range(0.0, canvas.h());
            let radius = rng.in_range(BLOOM_MIN_RADIUS, BLOOM_MAX_RADIUS);
            BloomCircle {
                cx,
                cy,
                radius,
                rgba: BLOOM_HUES[i % BLOOM_HUES.len()],
            }
        })
        .collect()
}

/// Materialize the background gradient as opaque RGBA8 bytes.
///
/// The ramp runs corner to corner: each pixel's position is projected onto
/// the (W, H) diagonal, so `t` is 0 at the top-left and approaches 1 at the
/// bottom-right.
pub fn gradient_ramp(canvas: Canvas) -> Vec<u8> {
    let w = canvas.width as usize;
    let h = canvas.height as usize;
    let denom = canvas.w() * canvas.w() + canvas.h() * canvas.h();

    let mut bytes = vec![0u8; w * h * 4];
    for y in 0..h {
        for x in 0..w {
            let t = ((x as f64) * canvas.w() + (y as f64) * canvas.h()) / denom;
            let idx = (y * w + x) * 4;
            for c in 0..3 {
                let a = f64::from(GRADIENT_START[c]);
                let b = f64::from(GRADIENT_END[c]);
                bytes[idx + c] = (a + (b - a) * t).round().clamp(0.0, 255.0) as u8;
            }
            bytes[idx + 3] = 255;
        }
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::CARD_CANVAS;

    #[test]
    fn scatter_respects_ranges_and_alternates_hues() {
        let mut rng = Rng64::new(99);
        let circles = scatter_bloom(CARD_CANVAS, &mut rng);
        assert_eq!(circles.len(), BLOOM_COUNT);
        for (i, c) in circles.iter().enumerate() {
            assert!((0.0..CARD_CANVAS.w()).contains(&c.cx));
            assert!((0.0..CARD_CANVAS.h()).contains(&c.cy));
            assert!((BLOOM_MIN_RADIUS..BLOOM_MAX_RADIUS).contains(&c.radius));
            assert_eq!(c.rgba, BLOOM_HUES[i % 2]);
        }
    }

    #[test]
    fn scatter_is_seed_deterministic() {
        let a = scatter_bloom(CARD_CANVAS, &mut Rng64::new(5));
        let b = scatter_bloom(CARD_CANVAS, &mut Rng64::new(5));
        assert_eq!(a, b);
    }

    #[test]
    fn gradient_starts_dark_navy_and_deepens() {
        let canvas = Canvas::new(64, 48).unwrap();
        let bytes = gradient_ramp(canvas);
        assert_eq!(bytes.len(), 64 * 48 * 4);

        // Top-left pixel is exactly the start color, fully opaque.
        assert_eq!(&bytes[0..4], &[0x03, 0x0a, 0x1a, 0xff]);

        // Bottom-right pixel has moved toward the end color on every channel.
        let last = bytes.len() - 4;
        assert!(bytes[last] > GRADIENT_START[0]);
        assert!(bytes[last + 1] > GRADIENT_START[1]);
        assert!(bytes[last + 2] > GRADIENT_START[2]);
        assert_eq!(bytes[last + 3], 0xff);
    }
}
