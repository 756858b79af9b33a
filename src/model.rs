use std::path::PathBuf;

use crate::foundation::error::{CardError, CardResult};

/// Input to one render: the phrase composed into the card's third line.
///
/// Construction is the validation boundary — an empty or whitespace-only
/// phrase never reaches the composer.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct RenderRequest {
    phrase: String,
}

impl RenderRequest {
    /// Accept a phrase verbatim. Internal whitespace is preserved; a phrase
    /// that trims to nothing is rejected.
    pub fn new(phrase: impl Into<String>) -> CardResult<Self> {
        let phrase = phrase.into();
        if phrase.trim().is_empty() {
            return Err(CardError::validation("phrase must be non-empty"));
        }
        Ok(Self { phrase })
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }
}

/// Knobs for a render pipeline.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct RenderOptions {
    /// Seed for the background scatter. `None` draws a fresh entropy seed per
    /// render; setting it makes output byte-for-byte reproducible.
    pub seed: Option<u64>,
    /// Font file override. `None` uses the system sans-serif family.
    pub font: Option<PathBuf>,
}

/// One finished card: the encoded PNG payload and the phrase that produced it.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// The phrase, exactly as requested.
    pub text: String,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// PNG-encoded image payload.
    pub png: Vec<u8>,
}

/// Raw frame handed from the composer to the encoder: row-major
/// premultiplied RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgba {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}
