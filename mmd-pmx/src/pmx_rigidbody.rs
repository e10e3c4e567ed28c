use crate::{
    cursor::Cursor,
    parse::{Parse, PmxParseErrorKind},
    pmx_header::PmxConfig,
    pmx_primitives::{PmxBoneIndex, PmxVec3},
    primitives::parse_array,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PmxRigidbody {
    pub name_local: String,
    pub name_universal: String,
    /// `-1` for a body that follows no bone.
    pub bone_index: PmxBoneIndex,
    pub group_id: u8,
    /// Bit `n` set means the body does not collide with group `n`.
    pub non_collision_group: u16,
    pub shape: PmxRigidbodyShape,
    pub shape_size: PmxVec3,
    pub shape_position: PmxVec3,
    /// Euler angles in radians.
    pub shape_rotation: PmxVec3,
    pub mass: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub restitution: f32,
    pub friction: f32,
    pub physics_mode: PmxRigidbodyPhysicsMode,
}

impl Parse for PmxRigidbody {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        let name_local = String::parse(config, cursor)?;
        let name_universal = String::parse(config, cursor)?;
        let bone_index = PmxBoneIndex::parse(config, cursor)?;

        // group_id (1 byte)
        // non_collision_group (2 bytes)
        // shape (1 byte)
        // shape_size (12 bytes)
        // shape_position (12 bytes)
        // shape_rotation (12 bytes)
        // mass, damping, restitution and friction (20 bytes)
        // physics_mode (1 byte)
        let size = 1 + 2 + 1 + 12 + 12 + 12 + 20 + 1;
        cursor.ensure_bytes::<PmxParseErrorKind>(size)?;

        let group_id = u8::parse(config, cursor)?;
        let non_collision_group = u16::parse(config, cursor)?;
        let shape = PmxRigidbodyShape::from(u8::parse(config, cursor)?);
        let shape_size = PmxVec3::parse(config, cursor)?;
        let shape_position = PmxVec3::parse(config, cursor)?;
        let shape_rotation = PmxVec3::parse(config, cursor)?;
        let mass = f32::parse(config, cursor)?;
        let linear_damping = f32::parse(config, cursor)?;
        let angular_damping = f32::parse(config, cursor)?;
        let restitution = f32::parse(config, cursor)?;
        let friction = f32::parse(config, cursor)?;
        let physics_mode = PmxRigidbodyPhysicsMode::from(u8::parse(config, cursor)?);

        Ok(Self {
            name_local,
            name_universal,
            bone_index,
            group_id,
            non_collision_group,
            shape,
            shape_size,
            shape_position,
            shape_rotation,
            mass,
            linear_damping,
            angular_damping,
            restitution,
            friction,
            physics_mode,
        })
    }
}

impl Parse for Vec<PmxRigidbody> {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        // names (8 bytes)
        // bone_index (1 byte at least)
        // shape and physics (61 bytes)
        parse_array(config, cursor, 8 + 1 + 61)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PmxRigidbodyShape {
    Sphere,
    Box,
    Capsule,
    Unknown(u8),
}

impl From<u8> for PmxRigidbodyShape {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Sphere,
            1 => Self::Box,
            2 => Self::Capsule,
            value => Self::Unknown(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PmxRigidbodyPhysicsMode {
    /// Follows its bone; not simulated.
    Static,
    /// Simulated; drives its bone.
    Dynamic,
    /// Simulated for rotation only; the bone position is kept.
    DynamicWithBonePosition,
    Unknown(u8),
}

impl From<u8> for PmxRigidbodyPhysicsMode {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Static,
            1 => Self::Dynamic,
            2 => Self::DynamicWithBonePosition,
            value => Self::Unknown(value),
        }
    }
}
