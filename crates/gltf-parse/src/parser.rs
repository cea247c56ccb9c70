//! The parser front end and the per-entity parse routines.
//!
//! [`Parser`] owns the enabled extension set and turns an input carrier
//! (JSON text or a GLB file) into a [`Gltf`] session. The session walks the
//! tokenized document one top-level array at a time; each routine validates
//! required fields, applies schema defaults, and appends strongly-typed
//! entities to the [`Asset`] under construction. The first failure is stored
//! on the session and every later call short-circuits with it, so a partial
//! asset can never leak to the caller.

use std::mem;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::GltfError;
use crate::glb::{self, GlbBinary};
use crate::json::JsonSource;
use crate::options::{Extensions, Options, EXTENSION_FLAGS};
use crate::types::{
    Accessor, AccessorType, Asset, Buffer, BufferTarget, BufferView, ComponentType, DataSource,
    Image, Material, Mesh, MimeType, Node, PbrData, Primitive, PrimitiveType, Scene, Texture,
    TextureInfo,
};
use crate::uri::decode_uri;

type JsonObject = serde_json::Map<String, Value>;

// ============================================================================
// JSON field access
// ============================================================================
//
// Every helper distinguishes "absent" (`Ok(None)`) from "present but
// malformed" (`Err(InvalidGltf)`); required fields layer `.ok_or(...)` on
// top, optional fields layer `.unwrap_or(default)`.

fn member_object<'a>(parent: &'a JsonObject, key: &str) -> Result<Option<&'a JsonObject>, GltfError> {
    match parent.get(key) {
        None => Ok(None),
        Some(Value::Object(object)) => Ok(Some(object)),
        Some(_) => Err(GltfError::InvalidGltf),
    }
}

fn member_array<'a>(parent: &'a JsonObject, key: &str) -> Result<Option<&'a [Value]>, GltfError> {
    match parent.get(key) {
        None => Ok(None),
        Some(Value::Array(array)) => Ok(Some(array.as_slice())),
        Some(_) => Err(GltfError::InvalidGltf),
    }
}

fn member_str<'a>(parent: &'a JsonObject, key: &str) -> Result<Option<&'a str>, GltfError> {
    match parent.get(key) {
        None => Ok(None),
        Some(value) => value.as_str().map(Some).ok_or(GltfError::InvalidGltf),
    }
}

fn member_u64(parent: &JsonObject, key: &str) -> Result<Option<u64>, GltfError> {
    match parent.get(key) {
        None => Ok(None),
        Some(value) => value.as_u64().map(Some).ok_or(GltfError::InvalidGltf),
    }
}

fn member_index(parent: &JsonObject, key: &str) -> Result<Option<usize>, GltfError> {
    Ok(member_u64(parent, key)?.map(|value| value as usize))
}

fn member_f64(parent: &JsonObject, key: &str) -> Result<Option<f64>, GltfError> {
    match parent.get(key) {
        None => Ok(None),
        Some(value) => value.as_f64().map(Some).ok_or(GltfError::InvalidGltf),
    }
}

fn member_bool(parent: &JsonObject, key: &str) -> Result<Option<bool>, GltfError> {
    match parent.get(key) {
        None => Ok(None),
        Some(value) => value.as_bool().map(Some).ok_or(GltfError::InvalidGltf),
    }
}

fn index_value(value: &Value) -> Result<usize, GltfError> {
    value
        .as_u64()
        .map(|index| index as usize)
        .ok_or(GltfError::InvalidGltf)
}

/// Reads an exact-length array of numbers, narrowing to f32.
fn float_array<const N: usize>(value: &Value) -> Result<[f32; N], GltfError> {
    let array = value.as_array().ok_or(GltfError::InvalidGltf)?;
    if array.len() != N {
        return Err(GltfError::InvalidGltf);
    }
    let mut result = [0.0f32; N];
    for (slot, element) in result.iter_mut().zip(array) {
        *slot = element.as_f64().ok_or(GltfError::InvalidGltf)? as f32;
    }
    Ok(result)
}

fn member_float_array<const N: usize>(
    parent: &JsonObject,
    key: &str,
) -> Result<Option<[f32; N]>, GltfError> {
    match parent.get(key) {
        None => Ok(None),
        Some(value) => float_array::<N>(value).map(Some),
    }
}

// ============================================================================
// Document-level checks
// ============================================================================

fn check_asset_field(root: &JsonObject) -> Result<(), GltfError> {
    let asset = match root.get("asset") {
        Some(Value::Object(object)) => object,
        _ => return Err(GltfError::InvalidOrMissingAssetField),
    };
    match asset.get("version") {
        Some(Value::String(_)) => Ok(()),
        _ => Err(GltfError::InvalidOrMissingAssetField),
    }
}

/// Every entry of `extensionsRequired` must be known to this parser and
/// enabled by the caller. The two failure modes stay distinct.
fn check_required_extensions(root: &JsonObject, enabled: Extensions) -> Result<(), GltfError> {
    let Some(required) = member_array(root, "extensionsRequired")? else {
        return Ok(());
    };
    for entry in required {
        let name = entry.as_str().ok_or(GltfError::InvalidGltf)?;
        let flag = EXTENSION_FLAGS
            .iter()
            .find(|(known, _)| *known == name)
            .map(|&(_, flag)| flag)
            .ok_or(GltfError::UnsupportedExtensions)?;
        if !enabled.contains(flag) {
            return Err(GltfError::MissingExtensions);
        }
    }
    Ok(())
}

// ============================================================================
// Shared sub-parsers
// ============================================================================

/// Parses a material-side texture reference (`normalTexture`,
/// `baseColorTexture`, ...). Absence of the key is not an error.
fn parse_texture_info(
    parent: &JsonObject,
    key: &str,
    extensions: Extensions,
) -> Result<Option<TextureInfo>, GltfError> {
    let Some(object) = member_object(parent, key)? else {
        return Ok(None);
    };

    let texture = member_index(object, "index")?.ok_or(GltfError::InvalidGltf)?;
    let mut info = TextureInfo {
        texture,
        tex_coord: member_index(object, "texCoord")?.unwrap_or(0),
        // scale only applies to normal textures.
        scale: member_f64(object, "scale")?.unwrap_or(1.0) as f32,
        rotation: 0.0,
        uv_offset: [0.0, 0.0],
        uv_scale: [1.0, 1.0],
    };

    // With the transform extension disabled the fields above stay at their
    // identity values, even when the input supplies a transform object.
    if !extensions.contains(Extensions::KHR_TEXTURE_TRANSFORM) {
        return Ok(Some(info));
    }

    if let Some(extension_objects) = member_object(object, "extensions")? {
        if let Some(transform) = member_object(extension_objects, "KHR_texture_transform")? {
            if let Some(tex_coord) = member_index(transform, "texCoord")? {
                info.tex_coord = tex_coord;
            }
            info.rotation = member_f64(transform, "rotation")?.unwrap_or(0.0) as f32;
            if let Some(offset) = member_float_array::<2>(transform, "offset")? {
                info.uv_offset = offset;
            }
            if let Some(scale) = member_float_array::<2>(transform, "scale")? {
                info.uv_scale = scale;
            }
        }
    }

    Ok(Some(info))
}

/// Texture extensions that may redirect the image source, in priority order.
const TEXTURE_SOURCE_EXTENSIONS: [(&str, Extensions); 2] = [
    ("KHR_texture_basisu", Extensions::KHR_TEXTURE_BASISU),
    ("MSFT_texture_dds", Extensions::MSFT_TEXTURE_DDS),
];

fn texture_extension_source(
    extension_objects: &JsonObject,
    enabled: Extensions,
) -> Result<Option<usize>, GltfError> {
    for (name, flag) in TEXTURE_SOURCE_EXTENSIONS {
        if !enabled.contains(flag) {
            continue;
        }
        let Some(object) = member_object(extension_objects, name)? else {
            continue;
        };
        if let Some(source) = member_index(object, "source")? {
            return Ok(Some(source));
        }
    }
    Ok(None)
}

// ============================================================================
// Parser
// ============================================================================

/// Front end that loads glTF documents with a fixed extension set.
///
/// A parser holds no per-document state; parallel loads go through
/// independent instances or independent calls.
pub struct Parser {
    extensions: Extensions,
}

impl Parser {
    pub fn new(extensions: Extensions) -> Self {
        Self { extensions }
    }

    /// Loads a text glTF document. `directory` is the asset's containing
    /// directory, used to resolve relative URIs.
    pub fn load_gltf(
        &self,
        source: &JsonSource,
        directory: impl AsRef<Path>,
        options: Options,
    ) -> Result<Gltf, GltfError> {
        let directory = directory.as_ref();
        if !directory.is_dir() {
            return Err(GltfError::InvalidPath);
        }
        self.load(source, directory.to_path_buf(), None, options)
    }

    /// Loads a binary glTF (GLB) file, splitting the container first.
    pub fn load_binary_gltf(
        &self,
        path: impl AsRef<Path>,
        options: Options,
    ) -> Result<Gltf, GltfError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(GltfError::InvalidPath);
        }
        let contents = glb::read_glb(path, options)?;
        let directory = path.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
        let binding = contents.binary.map(|binary| GlbBinding {
            file: path.to_path_buf(),
            binary,
        });
        self.load(&contents.json, directory, binding, options)
    }

    fn load(
        &self,
        source: &JsonSource,
        directory: PathBuf,
        glb: Option<GlbBinding>,
        options: Options,
    ) -> Result<Gltf, GltfError> {
        let document: Value =
            serde_json::from_slice(source.as_bytes()).map_err(|_| GltfError::InvalidJson)?;
        let Value::Object(root) = document else {
            return Err(GltfError::InvalidJson);
        };

        if !options.contains(Options::DONT_REQUIRE_VALID_ASSET_MEMBER) {
            check_asset_field(&root)?;
        }
        check_required_extensions(&root, self.extensions)?;

        Ok(Gltf {
            root,
            directory,
            options,
            extensions: self.extensions,
            glb,
            asset: Asset::default(),
            error: None,
        })
    }
}

/// The GLB BIN chunk a buffer may bind to.
struct GlbBinding {
    file: PathBuf,
    binary: GlbBinary,
}

// ============================================================================
// Parse session
// ============================================================================

/// A loaded document whose entity arrays are parsed on demand.
///
/// The per-entity routines may run in any order. Each returns the first
/// schema violation it hits; once any routine has failed, every subsequent
/// call returns the stored error unchanged.
pub struct Gltf {
    root: JsonObject,
    directory: PathBuf,
    options: Options,
    extensions: Extensions,
    glb: Option<GlbBinding>,
    asset: Asset,
    error: Option<GltfError>,
}

impl Gltf {
    /// Runs every per-entity routine once and reports the first failure.
    pub fn parse_all(&mut self) -> Result<(), GltfError> {
        self.parse_accessors()?;
        self.parse_buffers()?;
        self.parse_buffer_views()?;
        self.parse_images()?;
        self.parse_materials()?;
        self.parse_meshes()?;
        self.parse_nodes()?;
        self.parse_scenes()?;
        self.parse_textures()?;
        debug!(
            accessors = self.asset.accessors.len(),
            buffers = self.asset.buffers.len(),
            meshes = self.asset.meshes.len(),
            nodes = self.asset.nodes.len(),
            "document parsed"
        );
        Ok(())
    }

    /// The first error any routine stored, if parsing has failed.
    pub fn error(&self) -> Option<GltfError> {
        self.error
    }

    /// Transfers the finished asset out, or reports why parsing failed.
    /// A partially populated asset is never returned.
    pub fn into_asset(self) -> Result<Asset, GltfError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.asset),
        }
    }

    pub fn parse_accessors(&mut self) -> Result<(), GltfError> {
        self.run(Self::accessors_impl)
    }

    pub fn parse_buffers(&mut self) -> Result<(), GltfError> {
        self.run(Self::buffers_impl)
    }

    pub fn parse_buffer_views(&mut self) -> Result<(), GltfError> {
        self.run(Self::buffer_views_impl)
    }

    pub fn parse_images(&mut self) -> Result<(), GltfError> {
        self.run(Self::images_impl)
    }

    pub fn parse_materials(&mut self) -> Result<(), GltfError> {
        self.run(Self::materials_impl)
    }

    pub fn parse_meshes(&mut self) -> Result<(), GltfError> {
        self.run(Self::meshes_impl)
    }

    pub fn parse_nodes(&mut self) -> Result<(), GltfError> {
        self.run(Self::nodes_impl)
    }

    pub fn parse_scenes(&mut self) -> Result<(), GltfError> {
        self.run(Self::scenes_impl)
    }

    pub fn parse_textures(&mut self) -> Result<(), GltfError> {
        self.run(Self::textures_impl)
    }

    /// Short-circuits on a stored error, stores the routine's failure.
    fn run(&mut self, routine: fn(&mut Self) -> Result<(), GltfError>) -> Result<(), GltfError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let result = routine(self);
        if let Err(error) = result {
            self.error = Some(error);
        }
        result
    }

    fn accessors_impl(&mut self) -> Result<(), GltfError> {
        let Some(values) = member_array(&self.root, "accessors")? else {
            return Ok(());
        };
        let mut accessors = Vec::with_capacity(values.len());
        for value in values {
            let object = value.as_object().ok_or(GltfError::InvalidGltf)?;

            let gl_value = member_u64(object, "componentType")?.ok_or(GltfError::InvalidGltf)?;
            let component_type =
                ComponentType::from_gl(gl_value).ok_or(GltfError::InvalidGltf)?;
            if component_type == ComponentType::Double
                && !self.options.contains(Options::ALLOW_DOUBLE)
            {
                return Err(GltfError::InvalidGltf);
            }

            let type_name = member_str(object, "type")?.ok_or(GltfError::InvalidGltf)?;
            let element_type =
                AccessorType::from_gltf(type_name).ok_or(GltfError::InvalidGltf)?;

            accessors.push(Accessor {
                buffer_view: member_index(object, "bufferView")?,
                byte_offset: member_index(object, "byteOffset")?.unwrap_or(0),
                component_type,
                element_type,
                count: member_index(object, "count")?.ok_or(GltfError::InvalidGltf)?,
                normalized: member_bool(object, "normalized")?.unwrap_or(false),
                name: member_str(object, "name")?.map(str::to_owned),
            });
        }
        self.asset.accessors = accessors;
        Ok(())
    }

    fn buffers_impl(&mut self) -> Result<(), GltfError> {
        let Some(values) = member_array(&self.root, "buffers")? else {
            return Ok(());
        };
        let mut buffers = Vec::with_capacity(values.len());
        for (index, value) in values.iter().enumerate() {
            let object = value.as_object().ok_or(GltfError::InvalidGltf)?;
            let byte_length = member_index(object, "byteLength")?.ok_or(GltfError::InvalidGltf)?;

            let data = match (member_str(object, "uri")?, index) {
                (Some(uri), _) => decode_uri(uri, &self.directory, self.options)?,
                // Only the first buffer of a GLB container may omit its URI;
                // it then binds to the BIN chunk.
                (None, 0) => match self.glb.as_mut() {
                    Some(binding) => match &mut binding.binary {
                        GlbBinary::Loaded(bytes) => DataSource::Vector {
                            bytes: mem::take(bytes),
                            mime_type: None,
                        },
                        GlbBinary::FileRange { offset, length } => DataSource::FilePath {
                            path: binding.file.clone(),
                            file_byte_offset: *offset,
                            length: Some(*length),
                            mime_type: Some(MimeType::GltfBuffer),
                        },
                    },
                    None => return Err(GltfError::InvalidGltf),
                },
                (None, _) => return Err(GltfError::InvalidGltf),
            };

            buffers.push(Buffer {
                byte_length,
                data,
                name: member_str(object, "name")?.map(str::to_owned),
            });
        }
        debug!(count = buffers.len(), "parsed buffers");
        self.asset.buffers = buffers;
        Ok(())
    }

    fn buffer_views_impl(&mut self) -> Result<(), GltfError> {
        let Some(values) = member_array(&self.root, "bufferViews")? else {
            return Ok(());
        };
        let mut views = Vec::with_capacity(values.len());
        for value in values {
            let object = value.as_object().ok_or(GltfError::InvalidGltf)?;

            let target = match member_u64(object, "target")? {
                None => None,
                Some(gl_value) => {
                    Some(BufferTarget::from_gl(gl_value).ok_or(GltfError::InvalidGltf)?)
                }
            };

            views.push(BufferView {
                buffer: member_index(object, "buffer")?.ok_or(GltfError::InvalidGltf)?,
                byte_offset: member_index(object, "byteOffset")?.unwrap_or(0),
                byte_length: member_index(object, "byteLength")?.ok_or(GltfError::InvalidGltf)?,
                byte_stride: member_index(object, "byteStride")?,
                target,
                name: member_str(object, "name")?.map(str::to_owned),
            });
        }
        self.asset.buffer_views = views;
        Ok(())
    }

    fn images_impl(&mut self) -> Result<(), GltfError> {
        let Some(values) = member_array(&self.root, "images")? else {
            return Ok(());
        };
        let mut images = Vec::with_capacity(values.len());
        for value in values {
            let object = value.as_object().ok_or(GltfError::InvalidGltf)?;

            let uri = member_str(object, "uri")?;
            let buffer_view = member_index(object, "bufferView")?;
            let mime = member_str(object, "mimeType")?;

            let data = match (uri, buffer_view) {
                // uri and bufferView are mutually exclusive.
                (Some(_), Some(_)) => return Err(GltfError::InvalidGltf),
                (Some(uri), None) => {
                    let mut data = decode_uri(uri, &self.directory, self.options)?;
                    if let Some(mime) = mime {
                        // An explicit mimeType overrides what the URI implied.
                        let classified = MimeType::from_mime(mime);
                        match &mut data {
                            DataSource::Vector { mime_type, .. }
                            | DataSource::FilePath { mime_type, .. }
                            | DataSource::BufferView { mime_type, .. } => *mime_type = classified,
                        }
                    }
                    data
                }
                (None, Some(buffer_view)) => {
                    // A bufferView source requires an explicit MIME type.
                    let mime = mime.ok_or(GltfError::InvalidGltf)?;
                    DataSource::BufferView {
                        buffer_view,
                        mime_type: MimeType::from_mime(mime),
                    }
                }
                (None, None) => return Err(GltfError::InvalidGltf),
            };

            images.push(Image {
                data,
                name: member_str(object, "name")?.map(str::to_owned),
            });
        }
        self.asset.images = images;
        Ok(())
    }

    fn materials_impl(&mut self) -> Result<(), GltfError> {
        let Some(values) = member_array(&self.root, "materials")? else {
            return Ok(());
        };
        let mut materials = Vec::with_capacity(values.len());
        for value in values {
            let object = value.as_object().ok_or(GltfError::InvalidGltf)?;

            let pbr = match member_object(object, "pbrMetallicRoughness")? {
                None => None,
                Some(pbr_object) => Some(PbrData {
                    base_color_factor: member_float_array::<4>(pbr_object, "baseColorFactor")?
                        .unwrap_or([1.0; 4]),
                    metallic_factor: member_f64(pbr_object, "metallicFactor")?.unwrap_or(1.0)
                        as f32,
                    roughness_factor: member_f64(pbr_object, "roughnessFactor")?.unwrap_or(1.0)
                        as f32,
                    base_color_texture: parse_texture_info(
                        pbr_object,
                        "baseColorTexture",
                        self.extensions,
                    )?,
                    metallic_roughness_texture: parse_texture_info(
                        pbr_object,
                        "metallicRoughnessTexture",
                        self.extensions,
                    )?,
                }),
            };

            materials.push(Material {
                emissive_factor: member_float_array::<3>(object, "emissiveFactor")?
                    .unwrap_or([0.0; 3]),
                normal_texture: parse_texture_info(object, "normalTexture", self.extensions)?,
                occlusion_texture: parse_texture_info(object, "occlusionTexture", self.extensions)?,
                emissive_texture: parse_texture_info(object, "emissiveTexture", self.extensions)?,
                pbr,
                name: member_str(object, "name")?.map(str::to_owned),
            });
        }
        self.asset.materials = materials;
        Ok(())
    }

    fn meshes_impl(&mut self) -> Result<(), GltfError> {
        let Some(values) = member_array(&self.root, "meshes")? else {
            return Ok(());
        };
        let mut meshes = Vec::with_capacity(values.len());
        for value in values {
            let object = value.as_object().ok_or(GltfError::InvalidGltf)?;

            // A mesh without a primitives array is dropped, not rejected.
            let Some(primitive_values) = member_array(object, "primitives")? else {
                continue;
            };

            let mut primitives = Vec::with_capacity(primitive_values.len());
            for primitive_value in primitive_values {
                let primitive_object =
                    primitive_value.as_object().ok_or(GltfError::InvalidGltf)?;

                let attribute_object = member_object(primitive_object, "attributes")?
                    .ok_or(GltfError::InvalidGltf)?;
                // Every semantic is kept verbatim, known to us or not.
                let mut attributes = Vec::with_capacity(attribute_object.len());
                for (semantic, accessor) in attribute_object {
                    attributes.push((semantic.clone(), index_value(accessor)?));
                }

                let mode = match member_u64(primitive_object, "mode")? {
                    None => PrimitiveType::Triangles,
                    Some(mode) => {
                        PrimitiveType::from_mode(mode).ok_or(GltfError::InvalidGltf)?
                    }
                };

                primitives.push(Primitive {
                    attributes,
                    mode,
                    indices: member_index(primitive_object, "indices")?,
                    material: member_index(primitive_object, "material")?,
                });
            }

            meshes.push(Mesh {
                primitives,
                name: member_str(object, "name")?.map(str::to_owned),
            });
        }
        self.asset.meshes = meshes;
        Ok(())
    }

    fn nodes_impl(&mut self) -> Result<(), GltfError> {
        let Some(values) = member_array(&self.root, "nodes")? else {
            return Ok(());
        };
        let mut nodes = Vec::with_capacity(values.len());
        for value in values {
            let object = value.as_object().ok_or(GltfError::InvalidGltf)?;

            let mut children = Vec::new();
            if let Some(child_values) = member_array(object, "children")? {
                children.reserve(child_values.len());
                for child in child_values {
                    children.push(index_value(child)?);
                }
            }

            // A matrix that is not 16 numbers silently falls back to the
            // identity; the TRS fields then govern.
            let matrix = object
                .get("matrix")
                .and_then(|value| float_array::<16>(value).ok());

            nodes.push(Node {
                mesh: member_index(object, "mesh")?,
                children,
                matrix,
                translation: member_float_array::<3>(object, "translation")?.unwrap_or([0.0; 3]),
                rotation: member_float_array::<4>(object, "rotation")?
                    .unwrap_or([0.0, 0.0, 0.0, 1.0]),
                scale: member_float_array::<3>(object, "scale")?.unwrap_or([1.0; 3]),
                name: member_str(object, "name")?.map(str::to_owned),
            });
        }
        self.asset.nodes = nodes;
        Ok(())
    }

    fn scenes_impl(&mut self) -> Result<(), GltfError> {
        let Some(values) = member_array(&self.root, "scenes")? else {
            return Ok(());
        };
        self.asset.default_scene = member_index(&self.root, "scene")?;

        let mut scenes = Vec::with_capacity(values.len());
        for value in values {
            let object = value.as_object().ok_or(GltfError::InvalidGltf)?;

            // The scene object may be completely empty.
            let mut nodes = Vec::new();
            if let Some(node_values) = member_array(object, "nodes")? {
                nodes.reserve(node_values.len());
                for node in node_values {
                    nodes.push(index_value(node)?);
                }
            }

            scenes.push(Scene {
                nodes,
                name: member_str(object, "name")?.map(str::to_owned),
            });
        }
        self.asset.scenes = scenes;
        Ok(())
    }

    fn textures_impl(&mut self) -> Result<(), GltfError> {
        let Some(values) = member_array(&self.root, "textures")? else {
            return Ok(());
        };
        let mut textures = Vec::with_capacity(values.len());
        for value in values {
            let object = value.as_object().ok_or(GltfError::InvalidGltf)?;

            let base = member_index(object, "source")?;
            let mut image = base;
            let mut fallback_image = None;
            if let Some(extension_objects) = member_object(object, "extensions")? {
                // Once an extensions object is present the plain source is
                // demoted to the fallback, whether or not an enabled
                // extension actually redirects the image.
                fallback_image = base;
                if let Some(source) =
                    texture_extension_source(extension_objects, self.extensions)?
                {
                    image = Some(source);
                }
            }
            // Some image source must exist, from the base field or from an
            // extension overlay.
            if image.is_none() {
                return Err(GltfError::InvalidGltf);
            }

            textures.push(Texture {
                image,
                fallback_image,
                sampler: member_index(object, "sampler")?,
                name: member_str(object, "name")?.map(str::to_owned),
            });
        }
        self.asset.textures = textures;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(json: &str) -> JsonObject {
        match serde_json::from_str(json).unwrap() {
            Value::Object(object) => object,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn member_helpers_distinguish_absent_from_malformed() {
        let parent = object(r#"{"count": 3, "flag": true, "label": "x", "bad": "y"}"#);
        assert_eq!(member_u64(&parent, "count"), Ok(Some(3)));
        assert_eq!(member_u64(&parent, "missing"), Ok(None));
        assert_eq!(member_u64(&parent, "bad"), Err(GltfError::InvalidGltf));
        assert_eq!(member_bool(&parent, "flag"), Ok(Some(true)));
        assert_eq!(member_str(&parent, "label"), Ok(Some("x")));
        assert_eq!(member_str(&parent, "count"), Err(GltfError::InvalidGltf));
    }

    #[test]
    fn float_array_requires_exact_length_and_numbers() {
        let parent = object(r#"{"ok": [1, 2.5], "short": [1], "mixed": [1, "x"]}"#);
        assert_eq!(member_float_array::<2>(&parent, "ok"), Ok(Some([1.0, 2.5])));
        assert_eq!(
            member_float_array::<2>(&parent, "short"),
            Err(GltfError::InvalidGltf)
        );
        assert_eq!(
            member_float_array::<2>(&parent, "mixed"),
            Err(GltfError::InvalidGltf)
        );
        assert_eq!(member_float_array::<2>(&parent, "absent"), Ok(None));
    }

    #[test]
    fn asset_field_check() {
        assert_eq!(check_asset_field(&object(r#"{"asset":{"version":"2.0"}}"#)), Ok(()));
        assert_eq!(
            check_asset_field(&object(r#"{"asset":{}}"#)),
            Err(GltfError::InvalidOrMissingAssetField)
        );
        assert_eq!(
            check_asset_field(&object(r#"{"asset":{"version":2}}"#)),
            Err(GltfError::InvalidOrMissingAssetField)
        );
        assert_eq!(
            check_asset_field(&object(r#"{}"#)),
            Err(GltfError::InvalidOrMissingAssetField)
        );
    }

    #[test]
    fn required_extension_checks_stay_distinct() {
        let root = object(r#"{"extensionsRequired": ["KHR_texture_transform"]}"#);
        assert_eq!(
            check_required_extensions(&root, Extensions::KHR_TEXTURE_TRANSFORM),
            Ok(())
        );
        assert_eq!(
            check_required_extensions(&root, Extensions::empty()),
            Err(GltfError::MissingExtensions)
        );

        let unknown = object(r#"{"extensionsRequired": ["KHR_materials_unlit"]}"#);
        assert_eq!(
            check_required_extensions(&unknown, Extensions::all()),
            Err(GltfError::UnsupportedExtensions)
        );

        let malformed = object(r#"{"extensionsRequired": [7]}"#);
        assert_eq!(
            check_required_extensions(&malformed, Extensions::all()),
            Err(GltfError::InvalidGltf)
        );
    }

    #[test]
    fn texture_info_transform_requires_enabled_extension() {
        let parent = object(
            r#"{"normalTexture": {
                "index": 2,
                "scale": 0.5,
                "extensions": {"KHR_texture_transform": {
                    "texCoord": 1,
                    "rotation": 1.5,
                    "offset": [0.25, 0.75],
                    "scale": [2.0, 3.0]
                }}
            }}"#,
        );

        let with = parse_texture_info(&parent, "normalTexture", Extensions::KHR_TEXTURE_TRANSFORM)
            .unwrap()
            .unwrap();
        assert_eq!(with.texture, 2);
        assert_eq!(with.tex_coord, 1);
        assert_eq!(with.scale, 0.5);
        assert_eq!(with.rotation, 1.5);
        assert_eq!(with.uv_offset, [0.25, 0.75]);
        assert_eq!(with.uv_scale, [2.0, 3.0]);

        // Disabled extension: the transform resets to identity defaults.
        let without = parse_texture_info(&parent, "normalTexture", Extensions::empty())
            .unwrap()
            .unwrap();
        assert_eq!(without.tex_coord, 0);
        assert_eq!(without.rotation, 0.0);
        assert_eq!(without.uv_offset, [0.0, 0.0]);
        assert_eq!(without.uv_scale, [1.0, 1.0]);
    }

    #[test]
    fn texture_info_absent_key_is_not_an_error() {
        let parent = object(r#"{}"#);
        assert_eq!(
            parse_texture_info(&parent, "normalTexture", Extensions::all()),
            Ok(None)
        );
    }

    #[test]
    fn texture_info_requires_index() {
        let parent = object(r#"{"emissiveTexture": {"texCoord": 1}}"#);
        assert_eq!(
            parse_texture_info(&parent, "emissiveTexture", Extensions::all()),
            Err(GltfError::InvalidGltf)
        );
    }

    #[test]
    fn extension_source_priority_prefers_basisu() {
        let extensions = object(
            r#"{"KHR_texture_basisu": {"source": 9}, "MSFT_texture_dds": {"source": 4}}"#,
        );
        assert_eq!(
            texture_extension_source(&extensions, Extensions::all()),
            Ok(Some(9))
        );
        assert_eq!(
            texture_extension_source(&extensions, Extensions::MSFT_TEXTURE_DDS),
            Ok(Some(4))
        );
        assert_eq!(
            texture_extension_source(&extensions, Extensions::empty()),
            Ok(None)
        );
    }
}
