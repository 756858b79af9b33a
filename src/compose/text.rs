use crate::foundation::core::Canvas;

/// Fixed first line of every card.
pub const BRAND_LINE: &str = "Sui";
/// Fixed second line of every card.
pub const CONNECTOR_LINE: &str = "is for";
/// Phrase rendered by the startup default card.
pub const DEFAULT_PHRASE: &str = "everyone";

/// Headline font size for all three lines.
pub const HEADLINE_SIZE: f32 = 80.0;
/// Brand and connector lines are opaque white.
pub const HEADLINE_WHITE: [u8; 4] = [255, 255, 255, 255];
/// The phrase line is a lighter blue.
pub const PHRASE_BLUE: [u8; 4] = [0x7c, 0xc5, 0xff, 0xff];

/// Baseline of the brand line.
pub fn brand_baseline(canvas: Canvas) -> f64 {
    canvas.h() / 3.0 - 40.0
}

/// Baseline of the connector line.
pub fn connector_baseline(canvas: Canvas) -> f64 {
    canvas.h() / 3.0 + 40.0
}

/// Baseline of the phrase line.
pub fn phrase_baseline(canvas: Canvas) -> f64 {
    canvas.h() / 2.0 + 60.0
}

/// One line of card text, ready for shaping.
#[derive(Clone, Debug)]
pub struct LineSpec {
    pub text: String,
    pub size: f32,
    /// Fill color, straight alpha.
    pub rgba: [u8; 4],
    /// Vertical baseline position on the surface.
    pub baseline: f64,
    pub bold: bool,
}

/// The three headline lines, centered at `canvas.mid_x()`. The phrase is
/// carried verbatim; overflow past the surface edge is accepted (no wrapping
/// or scaling).
pub fn headline_lines(phrase: &str, canvas: Canvas) -> [LineSpec; 3] {
    [
        LineSpec {
            text: BRAND_LINE.to_string(),
            size: HEADLINE_SIZE,
            rgba: HEADLINE_WHITE,
            baseline: brand_baseline(canvas),
            bold: true,
        },
        LineSpec {
            text: CONNECTOR_LINE.to_string(),
            size: HEADLINE_SIZE,
            rgba: HEADLINE_WHITE,
            baseline: connector_baseline(canvas),
            bold: true,
        },
        LineSpec {
            text: phrase.to_string(),
            size: HEADLINE_SIZE,
            rgba: PHRASE_BLUE,
            baseline: phrase_baseline(canvas),
            bold: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::CARD_CANVAS;

    #[test]
    fn baselines_match_card_layout() {
        assert_eq!(phrase_baseline(CARD_CANVAS), 460.0);
        assert!((brand_baseline(CARD_CANVAS) - (800.0 / 3.0 - 40.0)).abs() < 1e-9);
        assert!((connector_baseline(CARD_CANVAS) - (800.0 / 3.0 + 40.0)).abs() < 1e-9);
    }

    #[test]
    fn phrase_line_is_verbatim_and_blue() {
        let lines = headline_lines("best  friends", CARD_CANVAS);
        assert_eq!(lines[0].text, "Sui");
        assert_eq!(lines[1].text, "is for");
        assert_eq!(lines[2].text, "best  friends");
        assert_eq!(lines[2].rgba, PHRASE_BLUE);
        assert!(lines.iter().all(|l| l.size == HEADLINE_SIZE && l.bold));
    }
}
