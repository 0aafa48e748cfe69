#![forbid(unsafe_code)]

pub mod accessor;
pub mod bag;
pub mod catalog;
pub mod container;
pub mod error;
pub mod path;

pub use accessor::*;
pub use bag::*;
pub use catalog::*;
pub use container::*;
pub use error::*;
pub use path::*;
