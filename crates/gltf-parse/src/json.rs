//! Owned JSON text buffers handed to the tokenizer.

use std::fs;
use std::io;
use std::path::Path;

/// Scratch space kept past the logical end of every buffer, zeroed so a
/// block-reading tokenizer can never pick up garbage.
pub(crate) const SCRATCH_PADDING: usize = 64;

/// A contiguous byte buffer holding glTF JSON text.
///
/// The buffer always owns [`SCRATCH_PADDING`] zero bytes beyond the logical
/// length; [`as_bytes`](JsonSource::as_bytes) exposes only the logical range.
pub struct JsonSource {
    buffer: Vec<u8>,
    len: usize,
}

impl JsonSource {
    /// Copies a borrowed byte range into a fresh padded buffer.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut buffer = Vec::with_capacity(bytes.len() + SCRATCH_PADDING);
        buffer.extend_from_slice(bytes);
        buffer.resize(bytes.len() + SCRATCH_PADDING, 0);
        Self {
            buffer,
            len: bytes.len(),
        }
    }

    /// Loads a file into a padded buffer, propagating I/O failure.
    pub fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let mut buffer = fs::read(path)?;
        let len = buffer.len();
        buffer.resize(len + SCRATCH_PADDING, 0);
        Ok(Self { buffer, len })
    }

    /// Wraps a buffer that already carries zeroed padding past `len`.
    pub(crate) fn from_padded(buffer: Vec<u8>, len: usize) -> Self {
        debug_assert!(buffer.len() >= len + SCRATCH_PADDING);
        Self { buffer, len }
    }

    /// The JSON text without the padding region.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_pads_and_preserves() {
        let source = JsonSource::from_bytes(b"{\"asset\":{}}");
        assert_eq!(source.as_bytes(), b"{\"asset\":{}}");
        assert_eq!(source.len(), 12);
        assert!(source.buffer.len() >= source.len() + SCRATCH_PADDING);
        assert!(source.buffer[source.len..].iter().all(|&b| b == 0));
    }

    #[test]
    fn from_path_missing_file_errors() {
        let result = JsonSource::from_path("/nonexistent/definitely-missing.gltf");
        assert!(result.is_err());
    }
}
