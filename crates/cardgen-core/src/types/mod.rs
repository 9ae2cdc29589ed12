//! Data model shared by the engine, the CLI and the server.

mod card;
mod options;
mod order;
mod scenario;

pub use card::*;
pub use options::*;
pub use order::*;
pub use scenario::*;
