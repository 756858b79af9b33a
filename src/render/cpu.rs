use std::sync::Arc;

use kurbo::Shape;

use crate::compose::backdrop::{
    self, BLOOM_SIGMA, GRID_LINE_WIDTH, GRID_RGBA, GRID_STEP, scatter_bloom,
};
use crate::compose::emphasis::{
    self, DotSpec, RingSpec, WATERMARK_LINE, WATERMARK_RGBA, WATERMARK_SIZE,
};
use crate::compose::text::headline_lines;
use crate::foundation::core::Canvas;
use crate::foundation::error::{CardError, CardResult};
use crate::foundation::rng::Rng64;
use crate::model::FrameRgba;
use crate::render::blur::GaussianBlur;
use crate::render::glyphs::{GlyphEngine, TextBrushRgba8, first_baseline, measured_width};

// The bloom layer is rasterized and blurred at this fraction of the surface
// size, then drawn scaled back up through the image paint. The layer exists
// only to be soft, so the downscale is invisible and the separable blur runs
// on a quarter of the pixels.
const BLOOM_DOWNSCALE: u32 = 2;

/// Stage composer: turns `(phrase, canvas, scatter rng)` into a raw frame by
/// walking the four card stages in order against a reused raster context.
pub(crate) struct CardComposer {
    glyphs: GlyphEngine,
    ctx: Option<vello_cpu::RenderContext>,
    bloom_ctx: Option<vello_cpu::RenderContext>,
    pixmap: Option<vello_cpu::Pixmap>,
    gradient: Option<CachedGradient>,
    bloom_blur: Option<GaussianBlur>,
}

struct CachedGradient {
    canvas: Canvas,
    image: vello_cpu::Image,
}

impl CardComposer {
    pub(crate) fn new() -> Self {
        Self {
            glyphs: GlyphEngine::new(),
            ctx: None,
            bloom_ctx: None,
            pixmap: None,
            gradient: None,
            bloom_blur: None,
        }
    }

    /// Switch text shaping to a font registered from raw bytes.
    pub(crate) fn load_font(&mut self, font_bytes: &[u8]) -> CardResult<()> {
        self.glyphs.register_font(font_bytes)
    }

    /// Render one card frame. The surface is cleared and fully redrawn; the
    /// retained context and pixmap are reused across calls.
    pub(crate) fn compose(
        &mut self,
        phrase: &str,
        canvas: Canvas,
        rng: &mut Rng64,
    ) -> CardResult<FrameRgba> {
        let (w16, h16) = canvas.as_u16()?;

        // Stage 1 and 2 paints. The bloom layer consumes the rng.
        let gradient = self.gradient_image(canvas)?;
        let bloom = self.bloom_image(canvas, rng)?;

        // Stage 3 layout runs before rasterization so stage 4 can derive its
        // geometry from the measured phrase width.
        let lines = headline_lines(phrase, canvas);
        let mut line_draws = Vec::with_capacity(lines.len());
        for spec in &lines {
            let layout =
                self.glyphs
                    .layout_line(&spec.text, spec.size, spec.bold, spec.rgba.into())?;
            let x = canvas.mid_x() - measured_width(&layout) / 2.0;
            let y = spec.baseline - first_baseline(&layout);
            line_draws.push((layout, x, y));
        }
        let phrase_width = measured_width(&line_draws[2].0);
        let rings = emphasis::ring_schedule(canvas, phrase_width);
        let dots = emphasis::dot_schedule(canvas, phrase_width);

        let watermark = self.glyphs.layout_line(
            WATERMARK_LINE,
            WATERMARK_SIZE,
            false,
            WATERMARK_RGBA.into(),
        )?;
        let wm_x = canvas.mid_x() - measured_width(&watermark) / 2.0;
        let wm_y = emphasis::watermark_baseline(canvas) - first_baseline(&watermark);

        let mut ctx = take_context(&mut self.ctx, w16, h16);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

        // 4.1 backdrop gradient
        ctx.set_paint(gradient);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, canvas.w(), canvas.h()));

        // 4.2 grid, then the blurred bloom layer scaled back to full size
        draw_grid(&mut ctx, canvas);
        ctx.set_transform(vello_cpu::kurbo::Affine::scale(f64::from(BLOOM_DOWNSCALE)));
        ctx.set_paint(bloom);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            canvas.w() / f64::from(BLOOM_DOWNSCALE),
            canvas.h() / f64::from(BLOOM_DOWNSCALE),
        ));
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

        // 4.3 the three headline lines
        for (layout, x, y) in &line_draws {
            draw_layout(&mut ctx, layout, *x, *y);
        }

        // 4.4 emphasis: rings, dots, watermark — in that order, over the text
        for ring in &rings {
            draw_ring(&mut ctx, ring);
        }
        for dot in &dots {
            draw_dot(&mut ctx, dot);
        }
        draw_layout(&mut ctx, &watermark, wm_x, wm_y);

        ctx.flush();
        let mut pixmap = match self.pixmap.take() {
            Some(p) if p.width() == w16 && p.height() == h16 => p,
            _ => vello_cpu::Pixmap::new(w16, h16),
        };
        ctx.render_to_pixmap(&mut pixmap);

        let frame = FrameRgba {
            width: canvas.width,
            height: canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
        };
        self.pixmap = Some(pixmap);
        self.ctx = Some(ctx);
        Ok(frame)
    }

    fn gradient_image(&mut self, canvas: Canvas) -> CardResult<vello_cpu::Image> {
        if let Some(g) = &self.gradient
            && g.canvas == canvas
        {
            return Ok(g.image.clone());
        }
        let bytes = backdrop::gradient_ramp(canvas);
        let image = image_from_premul(&bytes, canvas.width, canvas.height)?;
        self.gradient = Some(CachedGradient {
            canvas,
            image: image.clone(),
        });
        Ok(image)
    }

    fn bloom_image(&mut self, canvas: Canvas, rng: &mut Rng64) -> CardResult<vello_cpu::Image> {
        let bw = (canvas.width / BLOOM_DOWNSCALE).max(1);
        let bh = (canvas.height / BLOOM_DOWNSCALE).max(1);
        let bw16: u16 = bw
            .try_into()
            .map_err(|_| CardError::render("bloom width exceeds u16"))?;
        let bh16: u16 = bh
            .try_into()
            .map_err(|_| CardError::render("bloom height exceeds u16"))?;
        let scale = 1.0 / f64::from(BLOOM_DOWNSCALE);

        let circles = scatter_bloom(canvas, rng);

        let mut ctx = take_context(&mut self.bloom_ctx, bw16, bh16);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        for c in &circles {
            let circle = kurbo::Circle::new((c.cx * scale, c.cy * scale), c.radius * scale);
            let path = path_to_cpu(circle.path_elements(0.1));
            ctx.set_paint(color_from_rgba(c.rgba));
            ctx.fill_path(&path);
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(bw16, bh16);
        ctx.render_to_pixmap(&mut pixmap);
        self.bloom_ctx = Some(ctx);

        // Soften the whole layer in one separable pass. Sigma scales with the
        // downsample so the softness matches the full-resolution intent.
        if self.bloom_blur.is_none() {
            let sigma = BLOOM_SIGMA / BLOOM_DOWNSCALE as f32;
            let radius = (2.0 * sigma).ceil() as u32;
            self.bloom_blur = Some(GaussianBlur::new(radius, sigma)?);
        }
        if let Some(blur) = &mut self.bloom_blur {
            blur.apply(pixmap.data_as_u8_slice_mut(), bw, bh)?;
        }

        Ok(vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        })
    }
}

fn take_context(
    slot: &mut Option<vello_cpu::RenderContext>,
    width: u16,
    height: u16,
) -> vello_cpu::RenderContext {
    let mut ctx = match slot.take() {
        Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
        _ => vello_cpu::RenderContext::new(width, height),
    };
    ctx.reset();
    ctx
}

fn draw_grid(ctx: &mut vello_cpu::RenderContext, canvas: Canvas) {
    ctx.set_paint(color_from_rgba(GRID_RGBA));
    let mut y = 0.0;
    while y < canvas.h() {
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            y,
            canvas.w(),
            y + GRID_LINE_WIDTH,
        ));
        y += GRID_STEP;
    }
    let mut x = 0.0;
    while x < canvas.w() {
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            x,
            0.0,
            x + GRID_LINE_WIDTH,
            canvas.h(),
        ));
        x += GRID_STEP;
    }
}

fn draw_layout(
    ctx: &mut vello_cpu::RenderContext,
    layout: &parley::Layout<TextBrushRgba8>,
    x: f64,
    y: f64,
) {
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((x, y)));
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(run.run().font())
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
}

fn draw_ring(ctx: &mut vello_cpu::RenderContext, ring: &RingSpec) {
    let ellipse = kurbo::Ellipse::new(ring.center, (ring.rx, ring.ry), 0.0);
    // The backend fills; expand the stroke to an outline first.
    let outline = kurbo::stroke(
        ellipse.path_elements(0.1),
        &kurbo::Stroke::new(ring.stroke_width),
        &kurbo::StrokeOpts::default(),
        0.1,
    );
    ctx.set_paint(color_from_rgba(ring.rgba));
    ctx.fill_path(&path_to_cpu(outline.elements().iter().copied()));
}

fn draw_dot(ctx: &mut vello_cpu::RenderContext, dot: &DotSpec) {
    let circle = kurbo::Circle::new(dot.center, dot.radius);
    ctx.set_paint(color_from_rgba(dot.rgba));
    ctx.fill_path(&path_to_cpu(circle.path_elements(0.1)));
}

fn color_from_rgba(rgba: [u8; 4]) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3])
}

fn path_to_cpu(elements: impl IntoIterator<Item = kurbo::PathEl>) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in elements {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn image_from_premul(bytes: &[u8], width: u32, height: u32) -> CardResult<vello_cpu::Image> {
    let w: u16 = width
        .try_into()
        .map_err(|_| CardError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| CardError::render("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(CardError::render("pixmap byte len mismatch"));
    }

    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}
