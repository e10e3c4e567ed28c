use crate::{
    cursor::Cursor,
    parse::{Parse, PmxParseErrorKind},
    pmx_header::PmxConfig,
    pmx_primitives::{PmxRigidbodyIndex, PmxVec3},
    primitives::parse_array,
};
use serde::Serialize;

/// A constraint between two rigidbodies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PmxJoint {
    pub name_local: String,
    pub name_universal: String,
    pub kind: PmxJointKind,
    pub rigidbody_index_a: PmxRigidbodyIndex,
    pub rigidbody_index_b: PmxRigidbodyIndex,
    pub position: PmxVec3,
    /// Euler angles in radians.
    pub rotation: PmxVec3,
    pub position_min: PmxVec3,
    pub position_max: PmxVec3,
    pub rotation_min: PmxVec3,
    pub rotation_max: PmxVec3,
    pub position_spring: PmxVec3,
    pub rotation_spring: PmxVec3,
}

impl Parse for PmxJoint {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        let name_local = String::parse(config, cursor)?;
        let name_universal = String::parse(config, cursor)?;
        let kind = PmxJointKind::from(u8::parse(config, cursor)?);
        let rigidbody_index_a = PmxRigidbodyIndex::parse(config, cursor)?;
        let rigidbody_index_b = PmxRigidbodyIndex::parse(config, cursor)?;

        // position (12 bytes)
        // rotation (12 bytes)
        // position_min (12 bytes)
        // position_max (12 bytes)
        // rotation_min (12 bytes)
        // rotation_max (12 bytes)
        // position_spring (12 bytes)
        // rotation_spring (12 bytes)
        let size = 12 * 8;
        cursor.ensure_bytes::<PmxParseErrorKind>(size)?;

        let position = PmxVec3::parse(config, cursor)?;
        let rotation = PmxVec3::parse(config, cursor)?;
        let position_min = PmxVec3::parse(config, cursor)?;
        let position_max = PmxVec3::parse(config, cursor)?;
        let rotation_min = PmxVec3::parse(config, cursor)?;
        let rotation_max = PmxVec3::parse(config, cursor)?;
        let position_spring = PmxVec3::parse(config, cursor)?;
        let rotation_spring = PmxVec3::parse(config, cursor)?;

        Ok(Self {
            name_local,
            name_universal,
            kind,
            rigidbody_index_a,
            rigidbody_index_b,
            position,
            rotation,
            position_min,
            position_max,
            rotation_min,
            rotation_max,
            position_spring,
            rotation_spring,
        })
    }
}

impl Parse for Vec<PmxJoint> {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        // names (8 bytes)
        // kind (1 byte)
        // rigidbody indices (2 bytes at least)
        // transform, limits and springs (96 bytes)
        parse_array(config, cursor, 8 + 1 + 2 + 96)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PmxJointKind {
    Spring6Dof,
    SixDof,
    P2P,
    ConeTwist,
    Slider,
    Hinge,
    Unknown(u8),
}

impl From<u8> for PmxJointKind {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Spring6Dof,
            1 => Self::SixDof,
            2 => Self::P2P,
            3 => Self::ConeTwist,
            4 => Self::Slider,
            5 => Self::Hinge,
            value => Self::Unknown(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{config_with_widths, PmxBuilder};

    fn joint_buf(kind: u8) -> PmxBuilder {
        let mut builder = PmxBuilder::new()
            .text("髪")
            .text("hair")
            .u8(kind)
            .index(4, 70000)
            .index(4, -1);

        for component in 0..8 {
            builder = builder.floats(&[component as f32, 0.0, 0.0]);
        }

        builder
    }

    #[test]
    fn test_joint() {
        let buf = joint_buf(0).build();
        let mut cursor = Cursor::new(&buf);

        let joint = PmxJoint::parse(&config_with_widths(1, 4), &mut cursor).unwrap();

        assert_eq!(cursor.remaining(), 0);
        assert_eq!(joint.name_local, "髪");
        assert_eq!(joint.kind, PmxJointKind::Spring6Dof);
        assert_eq!(joint.rigidbody_index_a.get(), 70000);
        assert_eq!(joint.rigidbody_index_b.to_option(), None);
        assert_eq!(joint.position.x, 0.0);
        assert_eq!(joint.rotation_max.x, 5.0);
        assert_eq!(joint.rotation_spring.x, 7.0);
    }

    #[test]
    fn test_joints_array() {
        let buf = PmxBuilder::new()
            .i32(2)
            .bytes(&joint_buf(5).build())
            .bytes(&joint_buf(42).build())
            .build();
        let mut cursor = Cursor::new(&buf);

        let joints = Vec::<PmxJoint>::parse(&config_with_widths(1, 4), &mut cursor).unwrap();

        assert_eq!(cursor.remaining(), 0);
        assert_eq!(joints[0].kind, PmxJointKind::Hinge);
        assert_eq!(joints[1].kind, PmxJointKind::Unknown(42));
    }
}
