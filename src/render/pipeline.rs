use crate::encode::png::encode_png;
use crate::foundation::core::{CARD_CANVAS, Canvas};
use crate::foundation::error::{CardError, CardResult};
use crate::foundation::rng::{Rng64, entropy_seed};
use crate::model::{RenderOptions, RenderRequest, RenderResult};
use crate::render::cpu::CardComposer;

/// Whether a render is currently in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Rendering,
}

/// The card render pipeline: owns the drawing surface and walks the four
/// composition stages per render.
///
/// One pipeline serves one surface. Overlap policy: a render requested while
/// another is in flight is rejected with [`CardError::Busy`] — triggers are
/// never queued, and the in-flight render keeps exclusive use of the surface.
pub struct RenderPipeline {
    canvas: Canvas,
    opts: RenderOptions,
    composer: CardComposer,
    state: PipelineState,
}

impl std::fmt::Debug for RenderPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderPipeline")
            .field("canvas", &self.canvas)
            .field("opts", &self.opts)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl RenderPipeline {
    /// Build a pipeline for the standard 1200×800 card surface.
    pub fn new(opts: RenderOptions) -> CardResult<Self> {
        let mut composer = CardComposer::new();
        if let Some(path) = &opts.font {
            let bytes = std::fs::read(path).map_err(|e| {
                CardError::validation(format!("read font '{}': {e}", path.display()))
            })?;
            composer.load_font(&bytes)?;
        }
        Ok(Self {
            canvas: CARD_CANVAS,
            opts,
            composer,
            state: PipelineState::Idle,
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Render one card.
    ///
    /// Runs to completion or failure — no cancellation, no retry. Failures
    /// are logged to the diagnostic sink here at the orchestration boundary;
    /// callers keep their previous result and simply leave the busy state.
    pub fn render(&mut self, request: &RenderRequest) -> CardResult<RenderResult> {
        if self.state == PipelineState::Rendering {
            return Err(CardError::Busy);
        }
        self.state = PipelineState::Rendering;
        let started = std::time::Instant::now();
        let out = self.render_card(request);
        self.state = PipelineState::Idle;

        match out {
            Ok(result) => {
                tracing::debug!(
                    phrase = %request.phrase(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    png_bytes = result.png.len(),
                    "card rendered"
                );
                Ok(result)
            }
            Err(e) => {
                tracing::error!(phrase = %request.phrase(), error = %e, "card render failed");
                Err(e)
            }
        }
    }

    fn render_card(&mut self, request: &RenderRequest) -> CardResult<RenderResult> {
        let seed = self.opts.seed.unwrap_or_else(entropy_seed);
        let mut rng = Rng64::new(seed);
        let frame = self
            .composer
            .compose(request.phrase(), self.canvas, &mut rng)?;
        let png = encode_png(&frame)?;
        Ok(RenderResult {
            text: request.phrase().to_string(),
            width: frame.width,
            height: frame.height,
            png,
        })
    }
}
