//! Settings page surface: inbound requests, the push channel, and the
//! handler that ties them to the visibility controller.

mod channel;
mod handler;
mod message;

pub use channel::{ChannelState, Outbound, WebUiChannel};
pub use handler::AssistantSettingsHandler;
pub use message::{VISIBILITY_CHANGED_EVENT, WebUiRequest};
