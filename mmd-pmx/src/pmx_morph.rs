use crate::{
    cursor::Cursor,
    parse::{Parse, PmxParseErrorKind},
    pmx_header::PmxConfig,
    pmx_primitives::{
        PmxBoneIndex, PmxMaterialIndex, PmxMorphIndex, PmxRigidbodyIndex, PmxVec3, PmxVec4,
        PmxVertexIndex,
    },
    primitives::parse_array,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PmxMorph {
    pub name_local: String,
    pub name_universal: String,
    pub panel: PmxMorphPanel,
    pub offset: PmxMorphOffset,
}

impl Parse for PmxMorph {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        let name_local = String::parse(config, cursor)?;
        let name_universal = String::parse(config, cursor)?;
        let panel = PmxMorphPanel::from(u8::parse(config, cursor)?);
        let kind = PmxMorphKind::try_from(i8::parse(config, cursor)?)?;
        let offset = PmxMorphOffset::parse(config, cursor, kind)?;

        Ok(Self {
            name_local,
            name_universal,
            panel,
            offset,
        })
    }
}

impl Parse for Vec<PmxMorph> {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        // names (8 bytes)
        // panel (1 byte)
        // kind (1 byte)
        // offset count (4 bytes)
        parse_array(config, cursor, 8 + 1 + 1 + 4)
    }
}

/// Panel of the editor UI the morph is listed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PmxMorphPanel {
    Hidden,
    Eyebrow,
    Eye,
    Mouth,
    Other,
    Unknown(u8),
}

impl From<u8> for PmxMorphPanel {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Hidden,
            1 => Self::Eyebrow,
            2 => Self::Eye,
            3 => Self::Mouth,
            4 => Self::Other,
            value => Self::Unknown(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PmxMorphKind {
    Group,
    Vertex,
    Bone,
    Uv,
    UvExt1,
    UvExt2,
    UvExt3,
    UvExt4,
    Material,
    Flip,
    Impulse,
}

impl TryFrom<i8> for PmxMorphKind {
    type Error = PmxParseErrorKind;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Group),
            1 => Ok(Self::Vertex),
            2 => Ok(Self::Bone),
            3 => Ok(Self::Uv),
            4 => Ok(Self::UvExt1),
            5 => Ok(Self::UvExt2),
            6 => Ok(Self::UvExt3),
            7 => Ok(Self::UvExt4),
            8 => Ok(Self::Material),
            9 => Ok(Self::Flip),
            10 => Ok(Self::Impulse),
            value => Err(PmxParseErrorKind::UnsupportedMorph(value)),
        }
    }
}

/// Offsets of a morph. The payload shape, and the kind of index each offset refers by, depend on
/// the morph kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PmxMorphOffset {
    Group(Vec<PmxMorphOffsetGroup>),
    Vertex(Vec<PmxMorphOffsetVertex>),
    Bone(Vec<PmxMorphOffsetBone>),
    /// `uv_index` is 0 for the base UV, 1 to 4 for the additional vec4s.
    Uv {
        uv_index: u8,
        offsets: Vec<PmxMorphOffsetUv>,
    },
    Material(Vec<PmxMorphOffsetMaterial>),
    Flip(Vec<PmxMorphOffsetFlip>),
    Impulse(Vec<PmxMorphOffsetImpulse>),
}

impl PmxMorphOffset {
    pub fn parse(
        config: &PmxConfig,
        cursor: &mut Cursor,
        kind: PmxMorphKind,
    ) -> Result<Self, PmxParseErrorKind> {
        // minimum record sizes below assume 1 byte indices
        let offset = match kind {
            PmxMorphKind::Group => Self::Group(parse_array(config, cursor, 1 + 4)?),
            PmxMorphKind::Vertex => Self::Vertex(parse_array(config, cursor, 1 + 12)?),
            PmxMorphKind::Bone => Self::Bone(parse_array(config, cursor, 1 + 12 + 16)?),
            PmxMorphKind::Uv
            | PmxMorphKind::UvExt1
            | PmxMorphKind::UvExt2
            | PmxMorphKind::UvExt3
            | PmxMorphKind::UvExt4 => {
                let uv_index = match kind {
                    PmxMorphKind::UvExt1 => 1,
                    PmxMorphKind::UvExt2 => 2,
                    PmxMorphKind::UvExt3 => 3,
                    PmxMorphKind::UvExt4 => 4,
                    _ => 0,
                };

                Self::Uv {
                    uv_index,
                    offsets: parse_array(config, cursor, 1 + 16)?,
                }
            }
            PmxMorphKind::Material => Self::Material(parse_array(config, cursor, 1 + 1 + 112)?),
            PmxMorphKind::Flip => Self::Flip(parse_array(config, cursor, 1 + 4)?),
            PmxMorphKind::Impulse => Self::Impulse(parse_array(config, cursor, 1 + 1 + 12 + 12)?),
        };

        Ok(offset)
    }

    pub fn kind(&self) -> PmxMorphKind {
        match self {
            Self::Group(_) => PmxMorphKind::Group,
            Self::Vertex(_) => PmxMorphKind::Vertex,
            Self::Bone(_) => PmxMorphKind::Bone,
            Self::Uv { uv_index: 1, .. } => PmxMorphKind::UvExt1,
            Self::Uv { uv_index: 2, .. } => PmxMorphKind::UvExt2,
            Self::Uv { uv_index: 3, .. } => PmxMorphKind::UvExt3,
            Self::Uv { uv_index: 4, .. } => PmxMorphKind::UvExt4,
            Self::Uv { .. } => PmxMorphKind::Uv,
            Self::Material(_) => PmxMorphKind::Material,
            Self::Flip(_) => PmxMorphKind::Flip,
            Self::Impulse(_) => PmxMorphKind::Impulse,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Group(offsets) => offsets.len(),
            Self::Vertex(offsets) => offsets.len(),
            Self::Bone(offsets) => offsets.len(),
            Self::Uv { offsets, .. } => offsets.len(),
            Self::Material(offsets) => offsets.len(),
            Self::Flip(offsets) => offsets.len(),
            Self::Impulse(offsets) => offsets.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PmxMorphOffsetGroup {
    pub index: PmxMorphIndex,
    pub coefficient: f32,
}

impl Parse for PmxMorphOffsetGroup {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        let index = PmxMorphIndex::parse(config, cursor)?;
        let coefficient = f32::parse(config, cursor)?;

        Ok(Self { index, coefficient })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PmxMorphOffsetVertex {
    pub index: PmxVertexIndex,
    pub translation: PmxVec3,
}

impl Parse for PmxMorphOffsetVertex {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        let index = PmxVertexIndex::parse(config, cursor)?;
        let translation = PmxVec3::parse(config, cursor)?;

        Ok(Self { index, translation })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PmxMorphOffsetBone {
    pub index: PmxBoneIndex,
    pub translation: PmxVec3,
    /// Quaternion.
    pub rotation: PmxVec4,
}

impl Parse for PmxMorphOffsetBone {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        let index = PmxBoneIndex::parse(config, cursor)?;
        let translation = PmxVec3::parse(config, cursor)?;
        let rotation = PmxVec4::parse(config, cursor)?;

        Ok(Self {
            index,
            translation,
            rotation,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PmxMorphOffsetUv {
    pub index: PmxVertexIndex,
    /// For the base UV only `x` and `y` are meaningful.
    pub vec4: PmxVec4,
}

impl Parse for PmxMorphOffsetUv {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        let index = PmxVertexIndex::parse(config, cursor)?;
        let vec4 = PmxVec4::parse(config, cursor)?;

        Ok(Self { index, vec4 })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PmxMorphOffsetMaterial {
    /// `-1` targets every material.
    pub index: PmxMaterialIndex,
    pub offset_mode: PmxMorphOffsetMaterialOffsetMode,
    pub diffuse_color: PmxVec4,
    pub specular_color: PmxVec3,
    pub specular_strength: f32,
    pub ambient_color: PmxVec3,
    pub edge_color: PmxVec4,
    pub edge_size: f32,
    pub texture_tint_color: PmxVec4,
    pub environment_tint_color: PmxVec4,
    pub toon_tint_color: PmxVec4,
}

impl Parse for PmxMorphOffsetMaterial {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        let index = PmxMaterialIndex::parse(config, cursor)?;

        // offset_mode (1 byte)
        // diffuse_color (16 bytes)
        // specular_color (12 bytes)
        // specular_strength (4 bytes)
        // ambient_color (12 bytes)
        // edge_color (16 bytes)
        // edge_size (4 bytes)
        // texture_tint_color (16 bytes)
        // environment_tint_color (16 bytes)
        // toon_tint_color (16 bytes)
        let size = 1 + 16 + 12 + 4 + 12 + 16 + 4 + 16 + 16 + 16;
        cursor.ensure_bytes::<PmxParseErrorKind>(size)?;

        let offset_mode = match u8::parse(config, cursor)? {
            0 => PmxMorphOffsetMaterialOffsetMode::Multiply,
            _ => PmxMorphOffsetMaterialOffsetMode::Additive,
        };
        let diffuse_color = PmxVec4::parse(config, cursor)?;
        let specular_color = PmxVec3::parse(config, cursor)?;
        let specular_strength = f32::parse(config, cursor)?;
        let ambient_color = PmxVec3::parse(config, cursor)?;
        let edge_color = PmxVec4::parse(config, cursor)?;
        let edge_size = f32::parse(config, cursor)?;
        let texture_tint_color = PmxVec4::parse(config, cursor)?;
        let environment_tint_color = PmxVec4::parse(config, cursor)?;
        let toon_tint_color = PmxVec4::parse(config, cursor)?;

        Ok(Self {
            index,
            offset_mode,
            diffuse_color,
            specular_color,
            specular_strength,
            ambient_color,
            edge_color,
            edge_size,
            texture_tint_color,
            environment_tint_color,
            toon_tint_color,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PmxMorphOffsetMaterialOffsetMode {
    Multiply,
    Additive,
}

/// Like a group offset, but only one of the referenced morphs applies at a time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PmxMorphOffsetFlip {
    pub index: PmxMorphIndex,
    pub coefficient: f32,
}

impl Parse for PmxMorphOffsetFlip {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        let index = PmxMorphIndex::parse(config, cursor)?;
        let coefficient = f32::parse(config, cursor)?;

        Ok(Self { index, coefficient })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PmxMorphOffsetImpulse {
    pub index: PmxRigidbodyIndex,
    pub is_local: bool,
    pub velocity: PmxVec3,
    pub torque: PmxVec3,
}

impl Parse for PmxMorphOffsetImpulse {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        let index = PmxRigidbodyIndex::parse(config, cursor)?;
        let is_local = u8::parse(config, cursor)? != 0;
        let velocity = PmxVec3::parse(config, cursor)?;
        let torque = PmxVec3::parse(config, cursor)?;

        Ok(Self {
            index,
            is_local,
            velocity,
            torque,
        })
    }
}
