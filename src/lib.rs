//! Suicard composes the "Sui is for <phrase>" share card and renders it to a
//! 1200×800 PNG on the CPU.
//!
//! The public API is small:
//!
//! - Build a [`RenderRequest`] and a [`RenderPipeline`], call
//!   [`RenderPipeline::render`], get a [`RenderResult`] (PNG bytes plus the
//!   phrase that produced them).
//! - Or drive the whole product flow — counter, download, share links —
//!   through [`App`] with events from [`app::state`].
//!
//! Backgrounds are intentionally non-deterministic render to render; pin
//! [`RenderOptions::seed`] for byte-identical output.
#![forbid(unsafe_code)]

pub mod app;
pub mod compose;
pub mod encode;
pub mod export;
pub mod foundation;
pub mod model;
pub mod render;
pub mod share;
pub mod store;

pub use crate::app::driver::App;
pub use crate::app::effects::{EffectHost, FsEffectHost};
pub use crate::app::state::{AppState, Command, Event, reduce};
pub use crate::compose::text::DEFAULT_PHRASE;
pub use crate::encode::png::{encode_png, write_png};
pub use crate::export::download_filename;
pub use crate::foundation::core::{CARD_CANVAS, Canvas};
pub use crate::foundation::error::{CardError, CardResult};
pub use crate::foundation::rng::Rng64;
pub use crate::model::{FrameRgba, RenderOptions, RenderRequest, RenderResult};
pub use crate::render::pipeline::{PipelineState, RenderPipeline};
pub use crate::share::{GITHUB_SHARE_URL, SharePlatform, share_url};
pub use crate::store::{COUNT_KEY, CountStore, JsonCountStore, MemoryCountStore};
