//! Parser option flags and the extension registry.

use bitflags::bitflags;

bitflags! {
    /// Behavior switches accepted by the load operations. Flags compose.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Options: u32 {
        /// Skip the check that the document carries an `asset` object with
        /// a string `version` field.
        const DONT_REQUIRE_VALID_ASSET_MEMBER = 1 << 0;
        /// Force the scalar base64 path instead of the block-decoding one.
        const DONT_USE_SIMD = 1 << 1;
        /// Eagerly copy the GLB BIN payload into memory; otherwise the
        /// first buffer records a lazy file byte-range instead.
        const LOAD_GLB_BUFFERS = 1 << 2;
        /// Permit accessors with `componentType` 5130 (double).
        const ALLOW_DOUBLE = 1 << 3;
    }
}

bitflags! {
    /// Extensions this parser recognizes, enabled per [`Parser`] instance.
    ///
    /// Adding an extension means adding a flag here, an entry in the
    /// identifier table next to this type, and overlay logic at the entity
    /// it augments; the rest of the parser only ever tests bits.
    ///
    /// [`Parser`]: crate::Parser
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Extensions: u32 {
        /// Alternate compressed image source on textures.
        const KHR_TEXTURE_BASISU = 1 << 0;
        /// Affine UV transforms on texture references.
        const KHR_TEXTURE_TRANSFORM = 1 << 1;
        /// Alternate DDS image source on textures.
        const MSFT_TEXTURE_DDS = 1 << 2;
    }
}

/// Identifier strings as they appear in `extensionsRequired`, paired with
/// their flags.
pub(crate) const EXTENSION_FLAGS: [(&str, Extensions); 3] = [
    ("KHR_texture_basisu", Extensions::KHR_TEXTURE_BASISU),
    ("KHR_texture_transform", Extensions::KHR_TEXTURE_TRANSFORM),
    ("MSFT_texture_dds", Extensions::MSFT_TEXTURE_DDS),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_compose() {
        let options = Options::LOAD_GLB_BUFFERS | Options::ALLOW_DOUBLE;
        assert!(options.contains(Options::LOAD_GLB_BUFFERS));
        assert!(options.contains(Options::ALLOW_DOUBLE));
        assert!(!options.contains(Options::DONT_USE_SIMD));
        assert_eq!(Options::default(), Options::empty());
    }

    #[test]
    fn extension_table_matches_flags() {
        for (name, flag) in EXTENSION_FLAGS {
            assert!(!name.is_empty());
            assert_eq!(flag.bits().count_ones(), 1);
        }
        // Names are the wire identifiers, verbatim.
        assert_eq!(EXTENSION_FLAGS[0].0, "KHR_texture_basisu");
        assert_eq!(EXTENSION_FLAGS[1].0, "KHR_texture_transform");
        assert_eq!(EXTENSION_FLAGS[2].0, "MSFT_texture_dds");
    }
}
