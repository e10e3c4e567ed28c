use crate::{
    cursor::Cursor,
    parse::{Parse, PmxParseErrorKind},
    pmx_header::PmxConfig,
    pmx_primitives::{PmxTextureIndex, PmxVec3, PmxVec4},
    primitives::parse_array,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PmxMaterial {
    pub name_local: String,
    pub name_universal: String,
    pub diffuse_color: PmxVec4,
    pub specular_color: PmxVec3,
    pub specular_strength: f32,
    pub ambient_color: PmxVec3,
    pub flags: PmxMaterialFlags,
    pub edge_color: PmxVec4,
    pub edge_size: f32,
    pub texture_index: PmxTextureIndex,
    pub environment_texture_index: PmxTextureIndex,
    pub environment_blend_mode: PmxMaterialEnvironmentBlendMode,
    pub toon_mode: PmxMaterialToonMode,
    /// Free-form note; some tools store script or effect settings here.
    pub metadata: String,
    /// Number of surface indices (3 per triangle) this material draws, starting right after the
    /// indices of the previous material.
    pub surface_count: u32,
}

impl Parse for PmxMaterial {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        let name_local = String::parse(config, cursor)?;
        let name_universal = String::parse(config, cursor)?;

        // diffuse_color (16 bytes)
        // specular_color (12 bytes)
        // specular_strength (4 bytes)
        // ambient_color (12 bytes)
        // flags (1 byte)
        // edge_color (16 bytes)
        // edge_size (4 bytes)
        let size = 16 + 12 + 4 + 12 + 1 + 16 + 4;
        cursor.ensure_bytes::<PmxParseErrorKind>(size)?;

        let diffuse_color = PmxVec4::parse(config, cursor)?;
        let specular_color = PmxVec3::parse(config, cursor)?;
        let specular_strength = f32::parse(config, cursor)?;
        let ambient_color = PmxVec3::parse(config, cursor)?;
        let flags = PmxMaterialFlags::from_bits(u8::parse(config, cursor)?);
        let edge_color = PmxVec4::parse(config, cursor)?;
        let edge_size = f32::parse(config, cursor)?;

        let texture_index = PmxTextureIndex::parse(config, cursor)?;
        let environment_texture_index = PmxTextureIndex::parse(config, cursor)?;
        let environment_blend_mode =
            PmxMaterialEnvironmentBlendMode::from(u8::parse(config, cursor)?);
        let toon_mode = PmxMaterialToonMode::parse(config, cursor)?;
        let metadata = String::parse(config, cursor)?;
        let surface_count = u32::parse(config, cursor)?;

        Ok(Self {
            name_local,
            name_universal,
            diffuse_color,
            specular_color,
            specular_strength,
            ambient_color,
            flags,
            edge_color,
            edge_size,
            texture_index,
            environment_texture_index,
            environment_blend_mode,
            toon_mode,
            metadata,
            surface_count,
        })
    }
}

impl Parse for Vec<PmxMaterial> {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        // names (8 bytes)
        // colors, flags and edge (69 bytes)
        // texture indices (2 bytes at least)
        // environment blend mode, toon mode and toon value (3 bytes at least)
        // metadata (4 bytes)
        // surface_count (4 bytes)
        parse_array(config, cursor, 8 + 69 + 2 + 3 + 4 + 4)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PmxMaterialFlags {
    pub no_cull_back_face: bool,
    pub cast_shadow_on_ground: bool,
    pub cast_shadow_on_object: bool,
    pub receive_shadow: bool,
    pub has_edge: bool,
    pub vertex_color: bool,
    pub point_drawing: bool,
    pub line_drawing: bool,
}

impl PmxMaterialFlags {
    pub fn from_bits(bits: u8) -> Self {
        Self {
            no_cull_back_face: bits & 0x01 != 0,
            cast_shadow_on_ground: bits & 0x02 != 0,
            cast_shadow_on_object: bits & 0x04 != 0,
            receive_shadow: bits & 0x08 != 0,
            has_edge: bits & 0x10 != 0,
            vertex_color: bits & 0x20 != 0,
            point_drawing: bits & 0x40 != 0,
            line_drawing: bits & 0x80 != 0,
        }
    }

    pub fn bits(&self) -> u8 {
        let flags = [
            self.no_cull_back_face,
            self.cast_shadow_on_ground,
            self.cast_shadow_on_object,
            self.receive_shadow,
            self.has_edge,
            self.vertex_color,
            self.point_drawing,
            self.line_drawing,
        ];

        flags
            .iter()
            .enumerate()
            .fold(0, |bits, (bit, &set)| bits | ((set as u8) << bit))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PmxMaterialEnvironmentBlendMode {
    Disabled,
    Multiplicative,
    Additive,
    /// The environment texture is sampled with the first additional vec4 as UV.
    AdditionalVec4UV,
    Unknown(u8),
}

impl From<u8> for PmxMaterialEnvironmentBlendMode {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Disabled,
            1 => Self::Multiplicative,
            2 => Self::Additive,
            3 => Self::AdditionalVec4UV,
            value => Self::Unknown(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PmxMaterialToonMode {
    /// A toon texture from the model's own texture list.
    Texture { index: PmxTextureIndex },
    /// One of the shared `toon01.bmp`..`toon10.bmp` textures; `index` is zero based.
    InternalTexture { index: u8 },
}

impl Parse for PmxMaterialToonMode {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        match u8::parse(config, cursor)? {
            0 => Ok(Self::Texture {
                index: PmxTextureIndex::parse(config, cursor)?,
            }),
            _ => Ok(Self::InternalTexture {
                index: u8::parse(config, cursor)?,
            }),
        }
    }
}
