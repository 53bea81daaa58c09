pub mod authority;
pub mod entity;
pub mod segment;

pub use authority::*;
pub use entity::*;
pub use segment::*;
