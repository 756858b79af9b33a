use std::collections::VecDeque;

use url::Url;

use crate::app::effects::EffectHost;
use crate::app::state::{AppState, Command, Event, reduce};
use crate::foundation::error::CardResult;
use crate::model::RenderOptions;
use crate::render::pipeline::RenderPipeline;
use crate::store::CountStore;

/// Owns the moving parts — state, pipeline, counter store — and runs the
/// event/command loop. Renders execute synchronously inside `dispatch`, so a
/// `RenderRequested` event settles into `RenderSucceeded`/`RenderFailed`
/// before `dispatch` returns.
pub struct App {
    state: AppState,
    pipeline: RenderPipeline,
    store: Box<dyn CountStore>,
}

impl App {
    /// Load the persisted count and build the pipeline.
    pub fn new(
        page_url: Url,
        options: RenderOptions,
        store: Box<dyn CountStore>,
    ) -> CardResult<Self> {
        let count = store.load()?;
        Ok(Self {
            state: AppState::new(page_url, count),
            pipeline: RenderPipeline::new(options)?,
            store,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Feed one event through the reducer and execute the resulting commands,
    /// following any events they produce until the queue drains.
    pub fn dispatch(&mut self, event: Event, host: &mut dyn EffectHost) -> CardResult<()> {
        let mut queue = VecDeque::from([event]);
        while let Some(event) = queue.pop_front() {
            let (next, commands) = reduce(self.state.clone(), event);
            self.state = next;
            for command in commands {
                match command {
                    Command::StartRender { request, user } => {
                        match self.pipeline.render(&request) {
                            Ok(result) => queue.push_back(Event::RenderSucceeded { result, user }),
                            // Already logged at the pipeline boundary; the UI
                            // only sees the busy flag clear.
                            Err(_) => queue.push_back(Event::RenderFailed),
                        }
                    }
                    Command::PersistCount(count) => self.store.store(count)?,
                    Command::SaveImage { filename, png } => host.save_image(&filename, &png)?,
                    Command::OpenUrl(url) => host.open_url(&url)?,
                }
            }
        }
        Ok(())
    }
}
