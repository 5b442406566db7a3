pub mod config;
pub mod session;
pub mod sources;
pub mod statefile;

pub use config::*;
pub use session::*;
pub use sources::*;
pub use statefile::*;
