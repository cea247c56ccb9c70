//! The parsed asset graph.
//!
//! An [`Asset`] owns one `Vec` per glTF entity kind. Entities never point at
//! each other directly; every cross-reference is the zero-based index of the
//! target in its sequence, exactly as it appeared in the source JSON. The
//! parser only guarantees that emitted indices were literally present in the
//! input; bounds-checking them against the finished sequences is left to the
//! consumer.

use std::path::PathBuf;

/// Recognized payload media types.
///
/// Unrecognized MIME strings are carried as `Option::None` rather than as a
/// variant, so a `Some` here is always one of the types the loader pipeline
/// knows how to hand off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MimeType {
    Jpeg,
    Png,
    Ktx2,
    Dds,
    GltfBuffer,
    OctetStream,
}

impl MimeType {
    /// Maps a MIME string to its enumerated type, `None` for anything else.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/jpeg" => Some(MimeType::Jpeg),
            "image/png" => Some(MimeType::Png),
            "image/ktx2" => Some(MimeType::Ktx2),
            "image/vnd-ms.dds" => Some(MimeType::Dds),
            "application/gltf-buffer" => Some(MimeType::GltfBuffer),
            "application/octet-stream" => Some(MimeType::OctetStream),
            _ => None,
        }
    }
}

/// Where the payload of a [`Buffer`] or [`Image`] lives.
///
/// The variant is the location tag: either the bytes were materialized
/// during parsing (data URIs, eagerly loaded GLB chunks), or they sit in an
/// external file the caller reads later, or (images only) they are reachable
/// through a buffer view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Owned bytes, decoded or copied in during parsing.
    Vector {
        bytes: Vec<u8>,
        mime_type: Option<MimeType>,
    },
    /// An external file, optionally restricted to a byte range. The parser
    /// records the location but never opens the file.
    FilePath {
        path: PathBuf,
        file_byte_offset: u64,
        length: Option<u64>,
        mime_type: Option<MimeType>,
    },
    /// Reachable through a buffer view (image payloads only).
    BufferView {
        buffer_view: usize,
        mime_type: Option<MimeType>,
    },
}

/// WebGL component types as used by accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    Byte = 5120,
    UnsignedByte = 5121,
    Short = 5122,
    UnsignedShort = 5123,
    UnsignedInt = 5125,
    Float = 5126,
    Double = 5130,
}

impl ComponentType {
    /// Maps the WebGL enum value reported in JSON, `None` if out of range.
    pub fn from_gl(value: u64) -> Option<Self> {
        match value {
            5120 => Some(ComponentType::Byte),
            5121 => Some(ComponentType::UnsignedByte),
            5122 => Some(ComponentType::Short),
            5123 => Some(ComponentType::UnsignedShort),
            5125 => Some(ComponentType::UnsignedInt),
            5126 => Some(ComponentType::Float),
            5130 => Some(ComponentType::Double),
            _ => None,
        }
    }

    /// Size of one component in bytes.
    pub fn byte_size(self) -> usize {
        match self {
            ComponentType::Byte | ComponentType::UnsignedByte => 1,
            ComponentType::Short | ComponentType::UnsignedShort => 2,
            ComponentType::UnsignedInt | ComponentType::Float => 4,
            ComponentType::Double => 8,
        }
    }
}

/// Element shapes an accessor can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorType {
    Scalar,
    Vec2,
    Vec3,
    Vec4,
    Mat2,
    Mat3,
    Mat4,
}

impl AccessorType {
    /// Maps the `type` string reported in JSON, `None` for anything else.
    pub fn from_gltf(name: &str) -> Option<Self> {
        match name {
            "SCALAR" => Some(AccessorType::Scalar),
            "VEC2" => Some(AccessorType::Vec2),
            "VEC3" => Some(AccessorType::Vec3),
            "VEC4" => Some(AccessorType::Vec4),
            "MAT2" => Some(AccessorType::Mat2),
            "MAT3" => Some(AccessorType::Mat3),
            "MAT4" => Some(AccessorType::Mat4),
            _ => None,
        }
    }

    /// Number of components per element.
    pub fn component_count(self) -> usize {
        match self {
            AccessorType::Scalar => 1,
            AccessorType::Vec2 => 2,
            AccessorType::Vec3 => 3,
            AccessorType::Vec4 => 4,
            AccessorType::Mat2 => 4,
            AccessorType::Mat3 => 9,
            AccessorType::Mat4 => 16,
        }
    }
}

/// Intended GPU binding point of a buffer view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    ArrayBuffer = 34962,
    ElementArrayBuffer = 34963,
}

impl BufferTarget {
    pub fn from_gl(value: u64) -> Option<Self> {
        match value {
            34962 => Some(BufferTarget::ArrayBuffer),
            34963 => Some(BufferTarget::ElementArrayBuffer),
            _ => None,
        }
    }
}

/// Topology of a mesh primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrimitiveType {
    Points = 0,
    Lines = 1,
    LineLoop = 2,
    LineStrip = 3,
    #[default]
    Triangles = 4,
    TriangleStrip = 5,
    TriangleFan = 6,
}

impl PrimitiveType {
    pub fn from_mode(mode: u64) -> Option<Self> {
        match mode {
            0 => Some(PrimitiveType::Points),
            1 => Some(PrimitiveType::Lines),
            2 => Some(PrimitiveType::LineLoop),
            3 => Some(PrimitiveType::LineStrip),
            4 => Some(PrimitiveType::Triangles),
            5 => Some(PrimitiveType::TriangleStrip),
            6 => Some(PrimitiveType::TriangleFan),
            _ => None,
        }
    }
}

/// A raw byte buffer referenced by buffer views.
#[derive(Debug, Clone, PartialEq)]
pub struct Buffer {
    pub byte_length: usize,
    pub data: DataSource,
    pub name: Option<String>,
}

/// A contiguous sub-range of a buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferView {
    pub buffer: usize,
    pub byte_offset: usize,
    pub byte_length: usize,
    pub byte_stride: Option<usize>,
    pub target: Option<BufferTarget>,
    pub name: Option<String>,
}

/// A typed view into a buffer view describing homogeneous elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Accessor {
    pub buffer_view: Option<usize>,
    pub byte_offset: usize,
    pub component_type: ComponentType,
    pub element_type: AccessorType,
    pub count: usize,
    pub normalized: bool,
    pub name: Option<String>,
}

impl Accessor {
    /// Size in bytes of one tightly packed element.
    pub fn element_byte_size(&self) -> usize {
        self.component_type.byte_size() * self.element_type.component_count()
    }
}

/// An image payload; decoding the pixels is the consumer's job.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub data: DataSource,
    pub name: Option<String>,
}

/// A reference from materials to an image, optionally through a sampler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    /// The image this texture samples. Extensions may redirect this to a
    /// compressed alternative; the plain glTF `source` is then kept in
    /// `fallback_image`.
    pub image: Option<usize>,
    pub fallback_image: Option<usize>,
    pub sampler: Option<usize>,
    pub name: Option<String>,
}

/// A material's reference to a texture, with UV selection and transform.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureInfo {
    pub texture: usize,
    pub tex_coord: usize,
    /// Only meaningful when this info references a normal texture.
    pub scale: f32,
    pub rotation: f32,
    pub uv_offset: [f32; 2],
    pub uv_scale: [f32; 2],
}

/// Metallic-roughness parameters of a material.
#[derive(Debug, Clone, PartialEq)]
pub struct PbrData {
    pub base_color_factor: [f32; 4],
    pub metallic_factor: f32,
    pub roughness_factor: f32,
    pub base_color_texture: Option<TextureInfo>,
    pub metallic_roughness_texture: Option<TextureInfo>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub emissive_factor: [f32; 3],
    pub normal_texture: Option<TextureInfo>,
    pub occlusion_texture: Option<TextureInfo>,
    pub emissive_texture: Option<TextureInfo>,
    pub pbr: Option<PbrData>,
    pub name: Option<String>,
}

/// One drawable part of a mesh.
///
/// `attributes` keeps every semantic found in the JSON, known or not, in the
/// order the entries were read.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub attributes: Vec<(String, usize)>,
    pub mode: PrimitiveType,
    pub indices: Option<usize>,
    pub material: Option<usize>,
}

impl Primitive {
    /// Looks up the accessor bound to a semantic such as `POSITION`.
    pub fn attribute(&self, semantic: &str) -> Option<usize> {
        self.attributes
            .iter()
            .find(|(name, _)| name == semantic)
            .map(|&(_, accessor)| accessor)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub primitives: Vec<Primitive>,
    pub name: Option<String>,
}

/// A scene graph node.
///
/// When `matrix` is `Some`, consumers must prefer it over the TRS fields,
/// which always hold their defaults or the values read from JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub mesh: Option<usize>,
    pub children: Vec<usize>,
    /// Column-major, exactly as supplied.
    pub matrix: Option<[f32; 16]>,
    pub translation: [f32; 3],
    /// Unit quaternion in (x, y, z, w) order.
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    pub nodes: Vec<usize>,
    pub name: Option<String>,
}

/// The root aggregate produced by a successful parse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Asset {
    pub accessors: Vec<Accessor>,
    pub buffers: Vec<Buffer>,
    pub buffer_views: Vec<BufferView>,
    pub images: Vec<Image>,
    pub materials: Vec<Material>,
    pub meshes: Vec<Mesh>,
    pub nodes: Vec<Node>,
    pub scenes: Vec<Scene>,
    pub textures: Vec<Texture>,
    pub default_scene: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_type_classification() {
        assert_eq!(MimeType::from_mime("image/jpeg"), Some(MimeType::Jpeg));
        assert_eq!(MimeType::from_mime("image/png"), Some(MimeType::Png));
        assert_eq!(MimeType::from_mime("image/ktx2"), Some(MimeType::Ktx2));
        assert_eq!(MimeType::from_mime("image/vnd-ms.dds"), Some(MimeType::Dds));
        assert_eq!(
            MimeType::from_mime("application/gltf-buffer"),
            Some(MimeType::GltfBuffer)
        );
        assert_eq!(
            MimeType::from_mime("application/octet-stream"),
            Some(MimeType::OctetStream)
        );
        assert_eq!(MimeType::from_mime("image/webp"), None);
        assert_eq!(MimeType::from_mime(""), None);
    }

    #[test]
    fn component_type_values() {
        assert_eq!(ComponentType::from_gl(5120), Some(ComponentType::Byte));
        assert_eq!(ComponentType::from_gl(5126), Some(ComponentType::Float));
        assert_eq!(ComponentType::from_gl(5130), Some(ComponentType::Double));
        // 5124 (INT) is not part of glTF 2.0.
        assert_eq!(ComponentType::from_gl(5124), None);
    }

    #[test]
    fn element_byte_sizes() {
        let accessor = Accessor {
            buffer_view: Some(0),
            byte_offset: 0,
            component_type: ComponentType::Float,
            element_type: AccessorType::Vec3,
            count: 8,
            normalized: false,
            name: None,
        };
        assert_eq!(accessor.element_byte_size(), 12);
        assert_eq!(ComponentType::UnsignedShort.byte_size(), 2);
        assert_eq!(AccessorType::Mat4.component_count(), 16);
    }

    #[test]
    fn primitive_attribute_lookup() {
        let primitive = Primitive {
            attributes: vec![
                ("POSITION".to_owned(), 3),
                ("NORMAL".to_owned(), 1),
                ("_CUSTOM".to_owned(), 7),
            ],
            mode: PrimitiveType::Triangles,
            indices: None,
            material: None,
        };
        assert_eq!(primitive.attribute("POSITION"), Some(3));
        assert_eq!(primitive.attribute("_CUSTOM"), Some(7));
        assert_eq!(primitive.attribute("TANGENT"), None);
    }
}
