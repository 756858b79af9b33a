use url::Url;

use crate::compose::text::DEFAULT_PHRASE;
use crate::export::download_filename;
use crate::model::{RenderRequest, RenderResult};
use crate::share::{SharePlatform, share_url};

/// Immutable application state. Events go through [`reduce`]; all mutation
/// happens by building the next state.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Canonical page address embedded in share links.
    pub page_url: Url,
    /// Current contents of the phrase input.
    pub phrase_input: String,
    /// True while a render is in flight; new triggers are dropped.
    pub busy: bool,
    /// Total cards generated, mirrored from the persistent store.
    pub count: u64,
    /// The card currently on display, if any.
    pub current: Option<RenderResult>,
}

impl AppState {
    pub fn new(page_url: Url, count: u64) -> Self {
        Self {
            page_url,
            phrase_input: String::new(),
            busy: false,
            count,
            current: None,
        }
    }
}

/// Discrete application events.
#[derive(Clone, Debug)]
pub enum Event {
    PhraseChanged(String),
    /// A render trigger. `user: false` is the startup render of the default
    /// phrase; it never counts. `user: true` renders the current input and
    /// bumps the counter on success.
    RenderRequested {
        user: bool,
    },
    RenderSucceeded {
        result: RenderResult,
        user: bool,
    },
    RenderFailed,
    DownloadRequested,
    ShareRequested(SharePlatform),
}

/// Side effects the reducer asks the driver to perform.
#[derive(Clone, Debug)]
pub enum Command {
    StartRender { request: RenderRequest, user: bool },
    PersistCount(u64),
    SaveImage { filename: String, png: Vec<u8> },
    OpenUrl(Url),
}

/// Pure reducer: `(state, event) -> (state, commands)`.
///
/// Failed renders leave the previous result on display; they only clear the
/// busy flag (the pipeline already logged the error).
pub fn reduce(mut state: AppState, event: Event) -> (AppState, Vec<Command>) {
    match event {
        Event::PhraseChanged(phrase) => {
            state.phrase_input = phrase;
            (state, Vec::new())
        }
        Event::RenderRequested { user } => {
            if state.busy {
                return (state, Vec::new());
            }
            let phrase = if user {
                state.phrase_input.clone()
            } else {
                DEFAULT_PHRASE.to_string()
            };
            match RenderRequest::new(phrase) {
                Ok(request) => {
                    state.busy = true;
                    (state, vec![Command::StartRender { request, user }])
                }
                // Blank input: the trigger is silently ignored, matching the
                // upstream guard in the form handler.
                Err(_) => (state, Vec::new()),
            }
        }
        Event::RenderSucceeded { result, user } => {
            state.busy = false;
            state.current = Some(result);
            if user {
                state.count += 1;
                let count = state.count;
                (state, vec![Command::PersistCount(count)])
            } else {
                (state, Vec::new())
            }
        }
        Event::RenderFailed => {
            state.busy = false;
            (state, Vec::new())
        }
        Event::DownloadRequested => match &state.current {
            Some(result) => {
                let cmd = Command::SaveImage {
                    filename: download_filename(&result.text),
                    png: result.png.clone(),
                };
                (state, vec![cmd])
            }
            None => (state, Vec::new()),
        },
        Event::ShareRequested(platform) => match &state.current {
            Some(result) => match share_url(platform, &result.text, &state.page_url) {
                Ok(url) => (state, vec![Command::OpenUrl(url)]),
                Err(e) => {
                    tracing::error!(%platform, error = %e, "share url construction failed");
                    (state, Vec::new())
                }
            },
            None => (state, Vec::new()),
        },
    }
}
