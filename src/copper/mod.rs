pub mod client;
pub mod shaper;
pub mod status;

pub use client::{CopperClient, CopperError};
