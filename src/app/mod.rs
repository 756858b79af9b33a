//! Application wiring around the render pipeline: an immutable state record
//! with a pure reducer, commands for every side effect, and a driver that
//! executes them against the pipeline, the counter store, and an effect host.

pub mod driver;
pub mod effects;
pub mod state;
