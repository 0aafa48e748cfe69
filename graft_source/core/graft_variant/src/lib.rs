#![forbid(unsafe_code)]

pub mod convert;
pub mod enums;
pub mod error;
pub mod native;
pub mod wire;

pub use convert::*;
pub use enums::*;
pub use error::*;
pub use native::*;
pub use wire::*;
