use crate::{
    cursor::Cursor,
    parse::{Parse, PmxParseErrorKind},
    pmx_header::{PmxConfig, PmxIndexSize, PmxTextEncoding},
};
use serde::Serialize;
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PmxVec2 {
    pub x: f32,
    pub y: f32,
}

impl Parse for PmxVec2 {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        cursor.ensure_bytes::<PmxParseErrorKind>(8)?;

        let x = f32::parse(config, cursor)?;
        let y = f32::parse(config, cursor)?;

        Ok(Self { x, y })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PmxVec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Parse for PmxVec3 {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        cursor.ensure_bytes::<PmxParseErrorKind>(12)?;

        let x = f32::parse(config, cursor)?;
        let y = f32::parse(config, cursor)?;
        let z = f32::parse(config, cursor)?;

        Ok(Self { x, y, z })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PmxVec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Parse for PmxVec4 {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        cursor.ensure_bytes::<PmxParseErrorKind>(16)?;

        let x = f32::parse(config, cursor)?;
        let y = f32::parse(config, cursor)?;
        let z = f32::parse(config, cursor)?;
        let w = f32::parse(config, cursor)?;

        Ok(Self { x, y, z, w })
    }
}

/// Length-prefixed text, decoded with the encoding declared in the globals.
impl Parse for String {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        // byte length (4 bytes), read unsigned for the same reason as record counts
        let byte_len = u32::parse(config, cursor)? as usize;
        let bytes = cursor.read_dynamic::<PmxParseErrorKind>(byte_len)?;

        let encoding = match config.text_encoding {
            PmxTextEncoding::Utf16Le => encoding_rs::UTF_16LE,
            PmxTextEncoding::Utf8 => encoding_rs::UTF_8,
        };

        encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(Cow::into_owned)
            .ok_or(PmxParseErrorKind::TextDecoding)
    }
}

/// Kinds of cross-section references other than vertex references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PmxIndexKind {
    Texture,
    Material,
    Bone,
    Morph,
    Rigidbody,
}

/// Reads a non-vertex index. Every width is signed.
pub fn read_index(
    config: &PmxConfig,
    cursor: &mut Cursor,
    kind: PmxIndexKind,
) -> Result<i32, PmxParseErrorKind> {
    match config.index_size(kind)? {
        PmxIndexSize::Byte => i8::parse(config, cursor).map(i32::from),
        PmxIndexSize::Short => i16::parse(config, cursor).map(i32::from),
        PmxIndexSize::Int => i32::parse(config, cursor),
    }
}

/// Reads a vertex index. Unlike every other index kind, 1 and 2 byte vertex indices are unsigned;
/// 4 byte vertex indices stay signed.
pub fn read_vertex_index(
    config: &PmxConfig,
    cursor: &mut Cursor,
) -> Result<i32, PmxParseErrorKind> {
    match config.vertex_index_size()? {
        PmxIndexSize::Byte => u8::parse(config, cursor).map(i32::from),
        PmxIndexSize::Short => u16::parse(config, cursor).map(i32::from),
        PmxIndexSize::Int => i32::parse(config, cursor),
    }
}

macro_rules! pmx_index {
    ($(#[$meta:meta])* $name:ident, |$config:ident, $cursor:ident| $read:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            pub fn new(index: i32) -> Self {
                Self(index)
            }

            pub fn get(self) -> i32 {
                self.0
            }

            /// Negative indices (usually `-1`) mean "no reference".
            pub fn to_option(self) -> Option<u32> {
                u32::try_from(self.0).ok()
            }
        }

        impl Parse for $name {
            fn parse($config: &PmxConfig, $cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
                $read.map(Self)
            }
        }
    };
}

pmx_index!(
    /// Index into [`Pmx::vertices`](crate::Pmx::vertices).
    PmxVertexIndex,
    |config, cursor| read_vertex_index(config, cursor)
);
pmx_index!(
    /// Index into [`Pmx::textures`](crate::Pmx::textures).
    PmxTextureIndex,
    |config, cursor| read_index(config, cursor, PmxIndexKind::Texture)
);
pmx_index!(
    /// Index into [`Pmx::materials`](crate::Pmx::materials).
    PmxMaterialIndex,
    |config, cursor| read_index(config, cursor, PmxIndexKind::Material)
);
pmx_index!(
    /// Index into [`Pmx::bones`](crate::Pmx::bones).
    PmxBoneIndex,
    |config, cursor| read_index(config, cursor, PmxIndexKind::Bone)
);
pmx_index!(
    /// Index into [`Pmx::morphs`](crate::Pmx::morphs).
    PmxMorphIndex,
    |config, cursor| read_index(config, cursor, PmxIndexKind::Morph)
);
pmx_index!(
    /// Index into [`Pmx::rigidbodies`](crate::Pmx::rigidbodies).
    PmxRigidbodyIndex,
    |config, cursor| read_index(config, cursor, PmxIndexKind::Rigidbody)
);
