pub mod error;
pub mod marker;
pub mod probe;
pub mod select;

pub use error::*;
pub use marker::*;
pub use probe::*;
pub use select::*;
