pub mod handler;
pub mod router;

pub use handler::{ChannelClient, EventHandler};
pub use router::{classify, Action, Inbound, InboundMessage};
