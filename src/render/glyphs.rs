use crate::foundation::error::{CardError, CardResult};

/// RGBA8 brush color carried through Parley layout styles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<[u8; 4]> for TextBrushRgba8 {
    fn from(rgba: [u8; 4]) -> Self {
        Self {
            r: rgba[0],
            g: rgba[1],
            b: rgba[2],
            a: rgba[3],
        }
    }
}

/// Stateful helper for shaping single lines of card text.
///
/// Resolves the system sans-serif family by default; `register_font` switches
/// every subsequent layout to a family registered from raw font bytes.
pub(crate) struct GlyphEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family: Option<String>,
}

impl Default for GlyphEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            family: None,
        }
    }

    /// Register a font from raw bytes and use its first family from now on.
    pub(crate) fn register_font(&mut self, font_bytes: &[u8]) -> CardResult<()> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| CardError::validation("no font families registered from font bytes"))?;
        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CardError::validation("registered font family has no name"))?
            .to_string();
        self.family = Some(family_name);
        Ok(())
    }

    /// Shape and lay out one line. Lines never break: the card accepts
    /// overflow for long phrases.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        bold: bool,
        brush: TextBrushRgba8,
    ) -> CardResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CardError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let stack = match &self.family {
            Some(name) => parley::style::FontStack::Source(std::borrow::Cow::Owned(name.clone())),
            None => parley::style::FontStack::Single(parley::style::FontFamily::Generic(
                parley::style::GenericFamily::SansSerif,
            )),
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(stack));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        if bold {
            builder.push_default(parley::style::StyleProperty::FontWeight(
                parley::style::FontWeight::BOLD,
            ));
        }
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// Measured advance width of a laid-out line, the card's analogue of a 2D
/// context's `measureText().width`.
pub(crate) fn measured_width(layout: &parley::Layout<TextBrushRgba8>) -> f64 {
    f64::from(layout.width())
}

/// Distance from the layout's top edge to the first baseline. Zero when the
/// layout produced no lines (no usable font on the host).
pub(crate) fn first_baseline(layout: &parley::Layout<TextBrushRgba8>) -> f64 {
    layout
        .lines()
        .next()
        .map(|line| f64::from(line.metrics().baseline))
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brush_from_rgba_keeps_channels() {
        let b = TextBrushRgba8::from([1, 2, 3, 4]);
        assert_eq!((b.r, b.g, b.b, b.a), (1, 2, 3, 4));
    }

    #[test]
    fn layout_rejects_bad_size() {
        let mut engine = GlyphEngine::new();
        assert!(
            engine
                .layout_line("Sui", 0.0, true, TextBrushRgba8::default())
                .is_err()
        );
        assert!(
            engine
                .layout_line("Sui", f32::NAN, true, TextBrushRgba8::default())
                .is_err()
        );
    }

    #[test]
    fn wider_text_measures_wider() {
        let mut engine = GlyphEngine::new();
        let short = engine
            .layout_line("hi", 80.0, true, TextBrushRgba8::default())
            .unwrap();
        let long = engine
            .layout_line("hi there, much longer", 80.0, true, TextBrushRgba8::default())
            .unwrap();
        // On hosts with no fonts both measure zero; otherwise longer text
        // must measure at least as wide.
        assert!(measured_width(&long) >= measured_width(&short));
    }

    #[test]
    fn register_font_rejects_garbage() {
        let mut engine = GlyphEngine::new();
        assert!(engine.register_font(&[0, 1, 2, 3]).is_err());
    }
}
