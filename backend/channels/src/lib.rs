pub mod line;

pub use line::{LineAdapter, LineClient, LineConfig};
