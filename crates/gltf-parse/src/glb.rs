//! GLB binary container framing.
//!
//! Wire layout, all fields little-endian `u32`: a 12-byte header
//! `{magic, version, length}`, then tightly packed chunks of
//! `{chunkLength, chunkType, data}`. The JSON chunk is mandatory and comes
//! first; a BIN chunk may follow it immediately.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::GltfError;
use crate::json::{JsonSource, SCRATCH_PADDING};
use crate::options::Options;

/// ASCII "glTF".
const GLB_MAGIC: u32 = 0x4654_6C67;
const GLB_VERSION: u32 = 2;
/// ASCII "JSON".
const CHUNK_TYPE_JSON: u32 = 0x4E4F_534A;
/// ASCII "BIN\0".
const CHUNK_TYPE_BIN: u32 = 0x004E_4942;

const HEADER_SIZE: u64 = 12;
const CHUNK_HEADER_SIZE: u64 = 8;

/// Where a GLB's BIN payload ended up after reading the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum GlbBinary {
    /// Payload copied into memory (`Options::LOAD_GLB_BUFFERS`).
    Loaded(Vec<u8>),
    /// Payload left in the file at `offset`, `length` bytes long.
    FileRange { offset: u64, length: u64 },
}

/// The pieces a GLB container splits into.
pub(crate) struct GlbContents {
    pub json: JsonSource,
    pub binary: Option<GlbBinary>,
}

fn read_u32_le(file: &mut File) -> Result<u32, GltfError> {
    let mut bytes = [0u8; 4];
    file.read_exact(&mut bytes)
        .map_err(|_| GltfError::InvalidGlb)?;
    Ok(u32::from_le_bytes(bytes))
}

/// Validates the container framing and splits out the JSON text and the
/// BIN payload location. The file handle is dropped on every return path.
pub(crate) fn read_glb(path: &Path, options: Options) -> Result<GlbContents, GltfError> {
    let mut file = File::open(path).map_err(|_| GltfError::InvalidGlb)?;
    let file_size = file
        .metadata()
        .map_err(|_| GltfError::InvalidGlb)?
        .len();

    let magic = read_u32_le(&mut file)?;
    let version = read_u32_le(&mut file)?;
    let length = u64::from(read_u32_le(&mut file)?);
    if magic != GLB_MAGIC || version != GLB_VERSION || length > file_size {
        return Err(GltfError::InvalidGlb);
    }

    // The JSON chunk is mandatory and must come first.
    let json_length = u64::from(read_u32_le(&mut file)?);
    let json_type = read_u32_le(&mut file)?;
    if json_type != CHUNK_TYPE_JSON
        || HEADER_SIZE + CHUNK_HEADER_SIZE + json_length > length
    {
        return Err(GltfError::InvalidGlb);
    }

    let mut json_buffer = vec![0u8; json_length as usize + SCRATCH_PADDING];
    file.read_exact(&mut json_buffer[..json_length as usize])
        .map_err(|_| GltfError::InvalidGlb)?;
    let json = JsonSource::from_padded(json_buffer, json_length as usize);

    let mut position = HEADER_SIZE + CHUNK_HEADER_SIZE + json_length;

    // A second chunk, if the declared length admits one, must be BIN.
    if length <= position + CHUNK_HEADER_SIZE {
        debug!(json_length, "GLB container without BIN chunk");
        return Ok(GlbContents { json, binary: None });
    }

    let bin_length = u64::from(read_u32_le(&mut file)?);
    let bin_type = read_u32_le(&mut file)?;
    position += CHUNK_HEADER_SIZE;
    if bin_type != CHUNK_TYPE_BIN || position + bin_length > length {
        return Err(GltfError::InvalidGlb);
    }

    let binary = if options.contains(Options::LOAD_GLB_BUFFERS) {
        let mut payload = vec![0u8; bin_length as usize];
        file.read_exact(&mut payload)
            .map_err(|_| GltfError::InvalidGlb)?;
        GlbBinary::Loaded(payload)
    } else {
        GlbBinary::FileRange {
            offset: position,
            length: bin_length,
        }
    };
    debug!(json_length, bin_length, "GLB container chunks accepted");

    Ok(GlbContents {
        json,
        binary: Some(binary),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magic_matches_ascii() {
        assert_eq!(u32::from_le_bytes(*b"glTF"), GLB_MAGIC);
        assert_eq!(u32::from_le_bytes(*b"JSON"), CHUNK_TYPE_JSON);
        assert_eq!(u32::from_le_bytes(*b"BIN\0"), CHUNK_TYPE_BIN);
    }
}
