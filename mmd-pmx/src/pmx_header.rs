use crate::{
    cursor::Cursor,
    parse::{Parse, PmxParseErrorKind},
    pmx_primitives::PmxIndexKind,
};
use serde::Serialize;

pub const PMX_SIGNATURE: [u8; 4] = *b"PMX ";

/// Size of the smallest possible PMX header
/// - 4 bytes: signature
/// - 4 bytes: version
/// - 1 byte: globals count
/// - 16 bytes: 4 empty strings
pub const PMX_MIN_HEADER_SIZE: usize = 25;

/// Number of globals every supported PMX file declares.
pub const PMX_GLOBALS_COUNT: usize = 8;

/// Checks that the buffer is long enough to be a PMX file and starts with the PMX signature.
pub fn acknowledge(cursor: &mut Cursor) -> Result<(), PmxParseErrorKind> {
    if cursor.remaining() < PMX_MIN_HEADER_SIZE {
        return Err(PmxParseErrorKind::NotAcknowledged);
    }

    let signature = *cursor.read::<PmxParseErrorKind, 4>()?;

    if signature != PMX_SIGNATURE {
        return Err(PmxParseErrorKind::NotAcknowledged);
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PmxHeader {
    pub version: f32,
    /// Raw globals as declared, including any trailing entries this decoder does not use.
    pub globals: Vec<i8>,
    pub config: PmxConfig,
    pub model_name_local: String,
    pub model_name_universal: String,
    pub model_comment_local: String,
    pub model_comment_universal: String,
}

impl PmxHeader {
    /// Parses the header that follows the signature.
    pub fn parse(cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        // version (4 bytes)
        // globals count (1 byte)
        let size = 4 + 1;
        cursor.ensure_bytes::<PmxParseErrorKind>(size)?;

        let version = f32::from_le_bytes(*cursor.read::<PmxParseErrorKind, 4>()?);
        let globals_count = i8::from_le_bytes(*cursor.read::<PmxParseErrorKind, 1>()?);

        // decoding needs all 8 well-known slots
        if globals_count < PMX_GLOBALS_COUNT as i8 {
            return Err(PmxParseErrorKind::UnsupportedGlobals {
                version,
                count: globals_count,
            });
        }

        let globals = cursor
            .read_dynamic::<PmxParseErrorKind>(globals_count as usize)?
            .iter()
            .map(|&global| global as i8)
            .collect::<Vec<_>>();
        let config = PmxConfig::from_globals(&globals);

        let model_name_local = String::parse(&config, cursor)?;
        let model_name_universal = String::parse(&config, cursor)?;
        let model_comment_local = String::parse(&config, cursor)?;
        let model_comment_universal = String::parse(&config, cursor)?;

        Ok(Self {
            version,
            globals,
            config,
            model_name_local,
            model_name_universal,
            model_comment_local,
            model_comment_universal,
        })
    }
}

/// Decoding parameters fixed by the globals of a PMX file.
///
/// Index widths are kept as declared; an unsupported width is reported when an index of that kind
/// is actually read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PmxConfig {
    pub text_encoding: PmxTextEncoding,
    pub additional_vec4_count: u8,
    pub vertex_index_width: i8,
    pub texture_index_width: i8,
    pub material_index_width: i8,
    pub bone_index_width: i8,
    pub morph_index_width: i8,
    pub rigidbody_index_width: i8,
}

impl PmxConfig {
    /// Builds a config from at least [`PMX_GLOBALS_COUNT`] globals; missing slots read as zero.
    pub fn from_globals(globals: &[i8]) -> Self {
        let global = |index: usize| globals.get(index).copied().unwrap_or(0);

        Self {
            text_encoding: PmxTextEncoding::from(global(0)),
            additional_vec4_count: global(1).max(0) as u8,
            vertex_index_width: global(2),
            texture_index_width: global(3),
            material_index_width: global(4),
            bone_index_width: global(5),
            morph_index_width: global(6),
            rigidbody_index_width: global(7),
        }
    }

    pub fn vertex_index_size(&self) -> Result<PmxIndexSize, PmxParseErrorKind> {
        PmxIndexSize::from_width(self.vertex_index_width)
    }

    pub fn index_size(&self, kind: PmxIndexKind) -> Result<PmxIndexSize, PmxParseErrorKind> {
        let width = match kind {
            PmxIndexKind::Texture => self.texture_index_width,
            PmxIndexKind::Material => self.material_index_width,
            PmxIndexKind::Bone => self.bone_index_width,
            PmxIndexKind::Morph => self.morph_index_width,
            PmxIndexKind::Rigidbody => self.rigidbody_index_width,
        };
        PmxIndexSize::from_width(width)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PmxTextEncoding {
    Utf16Le,
    Utf8,
}

impl From<i8> for PmxTextEncoding {
    fn from(value: i8) -> Self {
        match value {
            0 => Self::Utf16Le,
            _ => Self::Utf8,
        }
    }
}

/// On-disk width of an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PmxIndexSize {
    Byte,
    Short,
    Int,
}

impl PmxIndexSize {
    pub fn from_width(width: i8) -> Result<Self, PmxParseErrorKind> {
        match width {
            1 => Ok(Self::Byte),
            2 => Ok(Self::Short),
            4 => Ok(Self::Int),
            width => Err(PmxParseErrorKind::UnsupportedIndexSize(width)),
        }
    }

    pub fn size(self) -> usize {
        match self {
            Self::Byte => 1,
            Self::Short => 2,
            Self::Int => 4,
        }
    }
}
