pub mod config;
pub mod error;
pub mod export;
pub mod info;

pub use config::*;
pub use error::*;
pub use export::*;
pub use info::*;
