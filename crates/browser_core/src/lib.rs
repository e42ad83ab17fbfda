//! Pagination/search state machine between the catalog client and a presentation surface.

pub mod controller;
pub mod store;
pub mod surface;

pub use controller::{Controller, ControllerOptions, ControllerSnapshot};
pub use store::ResultStore;
pub use surface::{
    intent_channel, IntentReceiver, IntentSender, PaginationView, PresentationSurface, UiIntent,
};
