pub mod color;
pub mod structs3d;

pub use color::Color;
pub use structs3d::*;
