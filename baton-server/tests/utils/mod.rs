pub mod mock_output;
pub mod ws_client;

pub use mock_output::*;
pub use ws_client::*;
