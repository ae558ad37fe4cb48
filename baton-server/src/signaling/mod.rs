mod event_output;
mod signaling_service;
mod ws_handler;

pub use event_output::*;
pub use signaling_service::*;
pub use ws_handler::*;
