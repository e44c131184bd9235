pub mod attribute;
pub mod geometry;
pub mod primitives;

pub use attribute::{
    Attribute, BufferAttribute, ElementType, InterleavedBuffer, InterleavedBufferAttribute,
    TypedArray,
};
pub use geometry::{BoundingSphere, BufferGeometry, DrawGroup};
pub use primitives::PrimitiveData;
