//! URI classification for buffer and image payloads.

use std::path::Path;

use crate::base64;
use crate::error::GltfError;
use crate::options::Options;
use crate::types::{DataSource, MimeType};

/// Classifies `uri` as either an inline data URI or a path relative to the
/// asset's containing directory.
///
/// Data URIs must use base64 encoding: `data:<mime>;base64,<payload>`. The
/// payload is decoded immediately; relative paths are only recorded, never
/// opened.
pub(crate) fn decode_uri(
    uri: &str,
    directory: &Path,
    options: Options,
) -> Result<DataSource, GltfError> {
    if !uri.starts_with("data") {
        return Ok(DataSource::FilePath {
            path: directory.join(uri),
            file_byte_offset: 0,
            length: None,
            mime_type: None,
        });
    }

    let semicolon = uri.find(';').ok_or(GltfError::InvalidGltf)?;
    let comma = uri[semicolon..]
        .find(',')
        .map(|offset| semicolon + offset)
        .ok_or(GltfError::InvalidGltf)?;

    let encoding = &uri[semicolon + 1..comma];
    if encoding != "base64" {
        return Err(GltfError::InvalidGltf);
    }

    // The media type sits between the "data:" prefix and the semicolon.
    let mime_type = uri.get(5..semicolon).and_then(MimeType::from_mime);

    let payload = &uri[comma + 1..];
    let bytes = if options.contains(Options::DONT_USE_SIMD) {
        base64::fallback_decode(payload)
    } else {
        base64::decode(payload)
    };
    if bytes.is_empty() && !payload.is_empty() {
        return Err(GltfError::InvalidGltf);
    }

    Ok(DataSource::Vector { bytes, mime_type })
}
