use crate::{
    cursor::Cursor,
    parse::{Parse, PmxParseErrorKind},
    pmx_header::PmxConfig,
    pmx_primitives::{PmxBoneIndex, PmxVec3},
    primitives::{parse_array, read_count},
};
use log::trace;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PmxBone {
    pub name_local: String,
    pub name_universal: String,
    pub position: PmxVec3,
    pub parent_index: PmxBoneIndex,
    /// Deform order; bones of a lower layer are transformed first.
    pub layer: i32,
    pub flags: PmxBoneFlags,
    pub tail: PmxBoneTail,
    /// Present if `flags.inherit_rotation` or `flags.inherit_translation` is set.
    pub inherit: Option<PmxBoneInherit>,
    /// Present if `flags.fixed_axis` is set.
    pub fixed_axis: Option<PmxVec3>,
    /// Present if `flags.local_coordinate` is set.
    pub local_coordinate: Option<PmxBoneLocalCoordinate>,
    /// Present if `flags.external_parent_deform` is set.
    pub external_parent_key: Option<i32>,
    /// Present if `flags.ik` is set.
    pub ik: Option<PmxBoneIk>,
}

impl Parse for PmxBone {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        let name_local = String::parse(config, cursor)?;
        let name_universal = String::parse(config, cursor)?;
        let position = PmxVec3::parse(config, cursor)?;
        let parent_index = PmxBoneIndex::parse(config, cursor)?;
        let layer = i32::parse(config, cursor)?;
        let flags = PmxBoneFlags::from_bits(u16::parse(config, cursor)?);

        // optional blocks follow in flag bit order; a block whose flag is unset is absent from
        // the file, not zero-filled
        let tail = if flags.indexed_tail_position {
            PmxBoneTail::Index(PmxBoneIndex::parse(config, cursor)?)
        } else {
            PmxBoneTail::Position(PmxVec3::parse(config, cursor)?)
        };

        let inherit = if flags.inherit_rotation || flags.inherit_translation {
            Some(PmxBoneInherit::parse(config, cursor)?)
        } else {
            None
        };

        let fixed_axis = if flags.fixed_axis {
            Some(PmxVec3::parse(config, cursor)?)
        } else {
            None
        };

        let local_coordinate = if flags.local_coordinate {
            Some(PmxBoneLocalCoordinate::parse(config, cursor)?)
        } else {
            None
        };

        let external_parent_key = if flags.external_parent_deform {
            Some(i32::parse(config, cursor)?)
        } else {
            None
        };

        let ik = if flags.ik {
            let ik = PmxBoneIk::parse(config, cursor)?;
            trace!(
                "bone `{}` has an IK chain of {} links.",
                name_local,
                ik.links.len()
            );
            Some(ik)
        } else {
            None
        };

        Ok(Self {
            name_local,
            name_universal,
            position,
            parent_index,
            layer,
            flags,
            tail,
            inherit,
            fixed_axis,
            local_coordinate,
            external_parent_key,
            ik,
        })
    }
}

impl Parse for Vec<PmxBone> {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        // names (8 bytes)
        // position (12 bytes)
        // parent_index (1 byte at least)
        // layer (4 bytes)
        // flags (2 bytes)
        // tail (1 byte at least)
        parse_array(config, cursor, 8 + 12 + 1 + 4 + 2 + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PmxBoneFlags {
    /// The flag word as stored, including bits without a named field.
    bits: u16,
    /// The tail is given as a bone index instead of a position offset.
    pub indexed_tail_position: bool,
    pub rotatable: bool,
    pub translatable: bool,
    pub visible: bool,
    pub enabled: bool,
    pub ik: bool,
    pub inherit_local: bool,
    pub inherit_rotation: bool,
    pub inherit_translation: bool,
    pub fixed_axis: bool,
    pub local_coordinate: bool,
    pub physics_after_deform: bool,
    pub external_parent_deform: bool,
}

impl PmxBoneFlags {
    pub fn from_bits(bits: u16) -> Self {
        Self {
            bits,
            indexed_tail_position: bits & 0x0001 != 0,
            rotatable: bits & 0x0002 != 0,
            translatable: bits & 0x0004 != 0,
            visible: bits & 0x0008 != 0,
            enabled: bits & 0x0010 != 0,
            ik: bits & 0x0020 != 0,
            inherit_local: bits & 0x0080 != 0,
            inherit_rotation: bits & 0x0100 != 0,
            inherit_translation: bits & 0x0200 != 0,
            fixed_axis: bits & 0x0400 != 0,
            local_coordinate: bits & 0x0800 != 0,
            physics_after_deform: bits & 0x1000 != 0,
            external_parent_deform: bits & 0x2000 != 0,
        }
    }

    pub fn bits(&self) -> u16 {
        self.bits
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PmxBoneTail {
    /// Offset from the bone position.
    Position(PmxVec3),
    Index(PmxBoneIndex),
}

/// Rotation and/or translation inherited from another bone, scaled by `coefficient`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PmxBoneInherit {
    pub parent_index: PmxBoneIndex,
    pub coefficient: f32,
}

impl Parse for PmxBoneInherit {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        let parent_index = PmxBoneIndex::parse(config, cursor)?;
        let coefficient = f32::parse(config, cursor)?;

        Ok(Self {
            parent_index,
            coefficient,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PmxBoneLocalCoordinate {
    pub x_axis: PmxVec3,
    pub z_axis: PmxVec3,
}

impl Parse for PmxBoneLocalCoordinate {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        let x_axis = PmxVec3::parse(config, cursor)?;
        let z_axis = PmxVec3::parse(config, cursor)?;

        Ok(Self { x_axis, z_axis })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PmxBoneIk {
    pub target_index: PmxBoneIndex,
    pub loop_count: i32,
    /// Maximum rotation per iteration, in radians.
    pub limit_angle: f32,
    pub links: Vec<PmxBoneIkLink>,
}

impl Parse for PmxBoneIk {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        let target_index = PmxBoneIndex::parse(config, cursor)?;
        let loop_count = i32::parse(config, cursor)?;
        let limit_angle = f32::parse(config, cursor)?;

        // bone_index (1 byte at least)
        // is_limited (1 byte)
        let link_count = read_count(config, cursor, 1 + 1)?;
        let mut links = Vec::with_capacity(link_count);

        for _ in 0..link_count {
            links.push(PmxBoneIkLink::parse(config, cursor)?);
        }

        Ok(Self {
            target_index,
            loop_count,
            limit_angle,
            links,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PmxBoneIkLink {
    pub bone_index: PmxBoneIndex,
    pub angle_limit: Option<PmxBoneIkAngleLimit>,
}

impl Parse for PmxBoneIkLink {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        let bone_index = PmxBoneIndex::parse(config, cursor)?;
        let is_limited = u8::parse(config, cursor)?;

        let angle_limit = if is_limited != 0 {
            Some(PmxBoneIkAngleLimit::parse(config, cursor)?)
        } else {
            None
        };

        Ok(Self {
            bone_index,
            angle_limit,
        })
    }
}

/// Euler angle limits in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PmxBoneIkAngleLimit {
    pub min: PmxVec3,
    pub max: PmxVec3,
}

impl Parse for PmxBoneIkAngleLimit {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        let min = PmxVec3::parse(config, cursor)?;
        let max = PmxVec3::parse(config, cursor)?;

        Ok(Self { min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{config_with_widths, default_config, PmxBuilder};

    fn bone_prefix(flags: u16) -> PmxBuilder {
        PmxBuilder::new()
            .text("センター")
            .text("center")
            .floats(&[0.0, 8.0, 0.0])
            .index(1, -1)
            .i32(0)
            .u16(flags)
    }

    #[test]
    fn test_bone_without_ik_ignores_missing_ik_data() {
        // rotatable | translatable | visible | enabled, tail as position, nothing else
        let buf = bone_prefix(0x001E).floats(&[0.0, 1.0, 0.0]).build();
        let mut cursor = Cursor::new(&buf);

        let bone = PmxBone::parse(&default_config(), &mut cursor).unwrap();

        assert_eq!(cursor.remaining(), 0);
        assert_eq!(bone.name_local, "センター");
        assert_eq!(bone.parent_index.to_option(), None);
        assert!(bone.flags.rotatable && bone.flags.translatable);
        assert!(!bone.flags.ik);
        assert_eq!(
            bone.tail,
            PmxBoneTail::Position(PmxVec3 {
                x: 0.0,
                y: 1.0,
                z: 0.0
            })
        );
        assert_eq!(bone.inherit, None);
        assert_eq!(bone.fixed_axis, None);
        assert_eq!(bone.local_coordinate, None);
        assert_eq!(bone.external_parent_key, None);
        assert_eq!(bone.ik, None);
    }

    #[test]
    fn test_bone_flags_keep_unnamed_bits() {
        // 0x0040 and 0x4000 have no meaning and gate no block
        let buf = bone_prefix(0x405E).floats(&[0.0, 1.0, 0.0]).build();
        let mut cursor = Cursor::new(&buf);

        let bone = PmxBone::parse(&default_config(), &mut cursor).unwrap();

        assert_eq!(cursor.remaining(), 0);
        assert_eq!(bone.flags.bits(), 0x405E);
        assert!(bone.flags.enabled);
        assert!(!bone.flags.ik && !bone.flags.inherit_local);
    }

    #[test]
    fn test_bone_with_every_block() {
        let config = config_with_widths(1, 2);
        let flags = 0x0001 | 0x0020 | 0x0100 | 0x0400 | 0x0800 | 0x2000;
        let buf = PmxBuilder::new()
            .text("左足ＩＫ")
            .text("leg IK_L")
            .floats(&[1.0, 1.0, 0.0])
            .index(2, 0)
            .i32(1)
            .u16(flags)
            // tail
            .index(2, 7)
            // inherit
            .index(2, 3)
            .f32(0.5)
            // fixed axis
            .floats(&[1.0, 0.0, 0.0])
            // local coordinate
            .floats(&[1.0, 0.0, 0.0])
            .floats(&[0.0, 0.0, 1.0])
            // external parent
            .i32(42)
            // ik
            .index(2, 12)
            .i32(40)
            .f32(2.0)
            .i32(2)
            .index(2, 10)
            .u8(1)
            .floats(&[-1.5, 0.0, 0.0])
            .floats(&[-0.01, 0.0, 0.0])
            .index(2, 9)
            .u8(0)
            .build();
        let mut cursor = Cursor::new(&buf);

        let bone = PmxBone::parse(&config, &mut cursor).unwrap();

        assert_eq!(cursor.remaining(), 0);
        assert_eq!(bone.layer, 1);
        assert_eq!(bone.tail, PmxBoneTail::Index(PmxBoneIndex::new(7)));
        assert_eq!(
            bone.inherit,
            Some(PmxBoneInherit {
                parent_index: PmxBoneIndex::new(3),
                coefficient: 0.5
            })
        );
        assert!(bone.flags.inherit_rotation && !bone.flags.inherit_translation);
        assert_eq!(
            bone.fixed_axis,
            Some(PmxVec3 {
                x: 1.0,
                y: 0.0,
                z: 0.0
            })
        );
        assert_eq!(
            bone.local_coordinate.map(|coordinate| coordinate.z_axis),
            Some(PmxVec3 {
                x: 0.0,
                y: 0.0,
                z: 1.0
            })
        );
        assert_eq!(bone.external_parent_key, Some(42));

        let ik = bone.ik.unwrap();
        assert_eq!(ik.target_index.get(), 12);
        assert_eq!(ik.loop_count, 40);
        assert_eq!(ik.limit_angle, 2.0);
        assert_eq!(ik.links.len(), 2);
        assert_eq!(ik.links[0].bone_index.get(), 10);
        assert_eq!(ik.links[0].angle_limit.map(|limit| limit.min.x), Some(-1.5));
        assert_eq!(ik.links[1].bone_index.get(), 9);
        assert_eq!(ik.links[1].angle_limit, None);
    }

    #[test]
    fn test_bone_inherit_translation_only() {
        let buf = bone_prefix(0x0200)
            .floats(&[0.0, 1.0, 0.0])
            .index(1, 2)
            .f32(-1.0)
            .build();
        let mut cursor = Cursor::new(&buf);

        let bone = PmxBone::parse(&default_config(), &mut cursor).unwrap();

        assert_eq!(cursor.remaining(), 0);
        assert_eq!(
            bone.inherit,
            Some(PmxBoneInherit {
                parent_index: PmxBoneIndex::new(2),
                coefficient: -1.0
            })
        );
    }

    #[test]
    fn test_bone_ik_truncated() {
        let buf = bone_prefix(0x0020)
            .floats(&[0.0, 1.0, 0.0])
            .index(1, 2)
            .i32(40)
            .build();
        let mut cursor = Cursor::new(&buf);

        assert_eq!(
            PmxBone::parse(&default_config(), &mut cursor),
            Err(PmxParseErrorKind::UnexpectedEof)
        );
    }
}
