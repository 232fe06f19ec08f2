pub mod block;
pub mod error;
pub mod lead;
pub mod recording;
pub mod tag;

pub use block::*;
pub use error::*;
pub use lead::*;
pub use recording::*;
pub use tag::*;
