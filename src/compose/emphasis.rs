use kurbo::Point;

use crate::compose::text::phrase_baseline;
use crate::foundation::core::Canvas;

/// Number of concentric rings around the phrase.
pub const RING_COUNT: usize = 3;
/// Horizontal ring radius is the measured phrase width divided by this.
pub const RING_RX_DIVISOR: f64 = 1.7;
/// Vertical radius of the innermost ring.
pub const RING_BASE_RY: f64 = 70.0;
/// Each successive ring grows by this much on both radii.
pub const RING_EXPAND_STEP: f64 = 10.0;
/// Rings are centered this far above the phrase baseline.
pub const RING_LIFT: f64 = 20.0;

/// Dots per side of the phrase.
pub const DOT_PER_SIDE: usize = 3;
/// Dot radius.
pub const DOT_RADIUS: f64 = 2.0;
/// Spacing between successive dots, and between the text edge and the first.
pub const DOT_SPACING: f64 = 15.0;

/// Watermark line near the bottom edge.
pub const WATERMARK_LINE: &str = "Powered by Sui";
/// Watermark font size.
pub const WATERMARK_SIZE: f32 = 18.0;
/// Watermark color (white at 0.15).
pub const WATERMARK_RGBA: [u8; 4] = [255, 255, 255, 38];
/// Watermark baseline distance from the bottom edge.
pub const WATERMARK_MARGIN: f64 = 40.0;

// Ring and dot accents share the card's blue hue.
const ACCENT_RGB: [u8; 3] = [76, 154, 255];

/// One glow ring: an elliptical stroke.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingSpec {
    pub center: Point,
    pub rx: f64,
    pub ry: f64,
    pub stroke_width: f64,
    /// Stroke color, straight alpha.
    pub rgba: [u8; 4],
}

/// One filled accent dot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DotSpec {
    pub center: Point,
    pub radius: f64,
    /// Fill color, straight alpha.
    pub rgba: [u8; 4],
}

/// The three glow rings for a phrase of the given measured width.
///
/// Ring `i` expands by `RING_EXPAND_STEP * i`, thins from stroke width 4 to
/// 2, and fades from 0.8 to 0.4 opacity.
pub fn ring_schedule(canvas: Canvas, text_width: f64) -> Vec<RingSpec> {
    let center = Point::new(canvas.mid_x(), phrase_baseline(canvas) - RING_LIFT);
    (0..RING_COUNT)
        .map(|i| {
            let expand = RING_EXPAND_STEP * i as f64;
            RingSpec {
                center,
                rx: text_width / RING_RX_DIVISOR + expand,
                ry: RING_BASE_RY + expand,
                stroke_width: 4.0 - i as f64,
                rgba: accent_rgba(0.8 - 0.2 * i as f64),
            }
        })
        .collect()
}

/// The six accent dots flanking the phrase, left side then right side,
/// walking outward with fading opacity (0.7, 0.5, 0.3).
pub fn dot_schedule(canvas: Canvas, text_width: f64) -> Vec<DotSpec> {
    let cy = phrase_baseline(canvas);
    let cx = canvas.mid_x();
    let mut dots = Vec::with_capacity(DOT_PER_SIDE * 2);
    for side in [-1.0, 1.0] {
        for i in 0..DOT_PER_SIDE {
            let offset = text_width / 2.0 + DOT_SPACING * (i + 1) as f64;
            dots.push(DotSpec {
                center: Point::new(cx + side * offset, cy),
                radius: DOT_RADIUS,
                rgba: accent_rgba(0.7 - 0.2 * i as f64),
            });
        }
    }
    dots
}

/// Watermark baseline position.
pub fn watermark_baseline(canvas: Canvas) -> f64 {
    canvas.h() - WATERMARK_MARGIN
}

fn accent_rgba(alpha: f64) -> [u8; 4] {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    [ACCENT_RGB[0], ACCENT_RGB[1], ACCENT_RGB[2], a]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::CARD_CANVAS;

    #[test]
    fn rings_center_above_phrase_baseline() {
        let rings = ring_schedule(CARD_CANVAS, 340.0);
        assert_eq!(rings.len(), RING_COUNT);
        for r in &rings {
            assert_eq!(r.center, Point::new(600.0, 440.0));
        }
        assert!((rings[0].rx - 340.0 / 1.7).abs() < 1e-9);
        assert_eq!(rings[0].ry, 70.0);
        assert_eq!(rings[1].ry, 80.0);
        assert_eq!(rings[2].ry, 90.0);
    }

    #[test]
    fn rings_thin_and_fade_outward() {
        let rings = ring_schedule(CARD_CANVAS, 200.0);
        let widths: Vec<f64> = rings.iter().map(|r| r.stroke_width).collect();
        assert_eq!(widths, vec![4.0, 3.0, 2.0]);
        let alphas: Vec<u8> = rings.iter().map(|r| r.rgba[3]).collect();
        assert_eq!(alphas, vec![204, 153, 102]);
    }

    #[test]
    fn dots_flank_the_measured_text() {
        let tw = 300.0;
        let dots = dot_schedule(CARD_CANVAS, tw);
        assert_eq!(dots.len(), 6);
        // Left side walks outward from the text edge.
        assert_eq!(dots[0].center, Point::new(600.0 - 150.0 - 15.0, 460.0));
        assert_eq!(dots[2].center, Point::new(600.0 - 150.0 - 45.0, 460.0));
        // Right side mirrors it.
        assert_eq!(dots[3].center, Point::new(600.0 + 150.0 + 15.0, 460.0));
        assert_eq!(dots[5].center, Point::new(600.0 + 150.0 + 45.0, 460.0));
        let alphas: Vec<u8> = dots[..3].iter().map(|d| d.rgba[3]).collect();
        assert_eq!(alphas, vec![179, 128, 77]);
    }

    #[test]
    fn watermark_sits_near_the_bottom() {
        assert_eq!(watermark_baseline(CARD_CANVAS), 760.0);
    }
}
