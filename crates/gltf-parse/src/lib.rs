//! Validating parser for glTF 2.0 assets.
//!
//! This crate turns the two physical carriers of glTF — a standalone JSON
//! document next to its containing directory, and the binary GLB container —
//! into a fully validated, owned [`Asset`] graph. Cross-references between
//! entities are plain indices, exactly as they appeared in the input; the
//! crate never reads the external files those entities may point at.
//!
//! # Example
//!
//! ```
//! use gltf_parse::{Extensions, JsonSource, Options, Parser};
//!
//! # fn main() -> Result<(), gltf_parse::GltfError> {
//! let source = JsonSource::from_bytes(br#"{"asset": {"version": "2.0"}}"#);
//!
//! let parser = Parser::new(Extensions::empty());
//! let mut gltf = parser.load_gltf(&source, ".", Options::empty())?;
//! gltf.parse_all()?;
//!
//! let asset = gltf.into_asset()?;
//! assert!(asset.meshes.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! For GLB input, [`Parser::load_binary_gltf`] splits the container first;
//! with [`Options::LOAD_GLB_BUFFERS`] the embedded BIN payload is copied
//! into the first buffer, otherwise the buffer records a lazy file
//! byte-range for the caller to read later.
//!
//! Entity arrays parse on demand: call the individual `parse_*` routines on
//! [`Gltf`] in any order, or [`Gltf::parse_all`]. The first schema violation
//! is stored and every later call short-circuits, so [`Gltf::into_asset`]
//! never exposes a partially parsed document.

pub mod base64;
pub mod error;
pub mod json;
pub mod options;
pub mod parser;
pub mod types;

mod glb;
mod uri;

pub use error::GltfError;
pub use json::JsonSource;
pub use options::{Extensions, Options};
pub use parser::{Gltf, Parser};
pub use types::{
    Accessor, AccessorType, Asset, Buffer, BufferTarget, BufferView, ComponentType, DataSource,
    Image, Material, Mesh, MimeType, Node, PbrData, Primitive, PrimitiveType, Scene, Texture,
    TextureInfo,
};
