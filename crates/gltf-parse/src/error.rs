//! Error codes shared by every parsing stage.

use thiserror::Error;

/// Failure classes surfaced to callers.
///
/// The enum is deliberately flat: every fallible operation in the crate
/// returns `Result<_, GltfError>`, and the parse session stores the first
/// error it encounters so later calls can short-circuit with the same code.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GltfError {
    /// The supplied filesystem path is not a regular file or directory
    /// as the operation requires.
    #[error("path is not a regular file or directory")]
    InvalidPath,

    /// The JSON tokenizer rejected the input.
    #[error("input is not valid JSON")]
    InvalidJson,

    /// The JSON is well-formed but violates the glTF 2.0 schema: a required
    /// field is missing, a field has the wrong type, an enum value is out of
    /// range, or mutually exclusive fields are both present.
    #[error("JSON violates the glTF 2.0 schema")]
    InvalidGltf,

    /// The top-level `asset` object is absent or lacks a string `version`.
    #[error("missing or malformed top-level asset object")]
    InvalidOrMissingAssetField,

    /// The GLB header or chunk framing is wrong.
    #[error("invalid GLB header or chunk framing")]
    InvalidGlb,

    /// `extensionsRequired` names an extension unknown to this parser.
    #[error("required extension is not supported by this parser")]
    UnsupportedExtensions,

    /// `extensionsRequired` names a known extension that the caller did not
    /// enable when constructing the parser.
    #[error("required extension was not enabled")]
    MissingExtensions,
}
