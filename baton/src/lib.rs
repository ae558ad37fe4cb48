pub use baton_core::model::{PeerId, RoomName};

pub mod model {
    pub use baton_core::model::*;
    pub use baton_core::ProtocolError;
}

#[cfg(feature = "server")]
pub mod server {
    pub use baton_server::*;
}

#[cfg(feature = "client")]
pub mod client {
    pub use baton_client::*;
}
