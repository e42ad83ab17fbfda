//! Controller layer: pagination/search state and the transitions that drive fetch, store and surface.

mod orchestration;
mod state;

pub use orchestration::{Controller, ControllerOptions, DEFAULT_PAGE_SIZE};
pub use state::ControllerSnapshot;
