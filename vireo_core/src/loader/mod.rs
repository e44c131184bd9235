pub mod animation_loader;
pub mod buffers;
pub mod compat;
pub mod diagnostics;
pub mod error;
pub mod geometry_loader;
pub mod json;
pub mod material_loader;
pub mod object_loader;
pub mod serialize;
pub mod texture_loader;

pub use buffers::{AttributeError, BufferStore};
pub use compat::CollectionView;
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use error::LoadError;
pub use object_loader::{LoadedDocument, ObjectLoader};
pub use serialize::to_json;
