pub mod bits;
pub mod error;
pub mod types;

pub use bits::{BitReader, BitWriter};
pub use error::{Malformed, RiceError, RiceResult};
pub use types::*;
