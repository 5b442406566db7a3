pub mod batch;
pub mod client;
pub mod retry;

pub use batch::*;
pub use client::*;
pub use retry::*;
