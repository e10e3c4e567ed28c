use crate::{
    cursor::Cursor,
    parse::{Parse, PmxParseErrorKind},
    pmx_header::PmxConfig,
    pmx_primitives::{PmxBoneIndex, PmxVec2, PmxVec3, PmxVec4},
    primitives::read_count,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PmxVertex {
    pub position: PmxVec3,
    pub normal: PmxVec3,
    pub uv: PmxVec2,
    /// Exactly `additional_vec4_count` extra vectors, as declared in the globals.
    pub additional_vec4s: Vec<PmxVec4>,
    pub deform_kind: PmxVertexDeformKind,
    pub edge_size: f32,
}

impl Parse for PmxVertex {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        // position (12 bytes)
        // normal (12 bytes)
        // uv (8 bytes)
        // additional vec4s (16 * additional_vec4_count bytes)
        // deform kind (1 byte)
        let size = 12 + 12 + 8 + 16 * config.additional_vec4_count as usize + 1;
        cursor.ensure_bytes::<PmxParseErrorKind>(size)?;

        let position = PmxVec3::parse(config, cursor)?;
        let normal = PmxVec3::parse(config, cursor)?;
        let uv = PmxVec2::parse(config, cursor)?;

        let mut additional_vec4s = Vec::with_capacity(config.additional_vec4_count as usize);

        for _ in 0..config.additional_vec4_count {
            additional_vec4s.push(PmxVec4::parse(config, cursor)?);
        }

        let deform_kind = PmxVertexDeformKind::parse(config, cursor)?;
        let edge_size = f32::parse(config, cursor)?;

        Ok(Self {
            position,
            normal,
            uv,
            additional_vec4s,
            deform_kind,
            edge_size,
        })
    }
}

impl Parse for Vec<PmxVertex> {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        // smallest vertex: fixed fields, a BDEF1 with a 1 byte bone index and the edge size
        let size = 12 + 12 + 8 + 16 * config.additional_vec4_count as usize + 1 + 1 + 4;
        let count = read_count(config, cursor, size)?;
        let mut vertices = Vec::with_capacity(count);

        for _ in 0..count {
            vertices.push(PmxVertex::parse(config, cursor)?);
        }

        Ok(vertices)
    }
}

/// How a vertex follows the skeleton. Only the fields of the stored variant exist on disk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PmxVertexDeformKind {
    Bdef1 {
        bone_index: PmxBoneIndex,
    },
    Bdef2 {
        bone_index_1: PmxBoneIndex,
        bone_index_2: PmxBoneIndex,
        /// Weight of `bone_index_1`; `bone_index_2` gets the rest.
        bone_weight: f32,
    },
    Bdef4 {
        bone_index_1: PmxBoneIndex,
        bone_index_2: PmxBoneIndex,
        bone_index_3: PmxBoneIndex,
        bone_index_4: PmxBoneIndex,
        bone_weight_1: f32,
        bone_weight_2: f32,
        bone_weight_3: f32,
        bone_weight_4: f32,
    },
    Sdef {
        bone_index_1: PmxBoneIndex,
        bone_index_2: PmxBoneIndex,
        bone_weight: f32,
        c: PmxVec3,
        r0: PmxVec3,
        r1: PmxVec3,
    },
    Qdef {
        bone_index_1: PmxBoneIndex,
        bone_index_2: PmxBoneIndex,
        bone_index_3: PmxBoneIndex,
        bone_index_4: PmxBoneIndex,
        bone_weight_1: f32,
        bone_weight_2: f32,
        bone_weight_3: f32,
        bone_weight_4: f32,
    },
}

impl PmxVertexDeformKind {
    /// The on-disk tag of this deform kind.
    pub fn tag(&self) -> i8 {
        match self {
            Self::Bdef1 { .. } => 0,
            Self::Bdef2 { .. } => 1,
            Self::Bdef4 { .. } => 2,
            Self::Sdef { .. } => 3,
            Self::Qdef { .. } => 4,
        }
    }
}

impl Parse for PmxVertexDeformKind {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        let tag = i8::parse(config, cursor)?;

        match tag {
            0 => {
                let bone_index = PmxBoneIndex::parse(config, cursor)?;

                Ok(Self::Bdef1 { bone_index })
            }
            1 => {
                let bone_index_1 = PmxBoneIndex::parse(config, cursor)?;
                let bone_index_2 = PmxBoneIndex::parse(config, cursor)?;
                let bone_weight = f32::parse(config, cursor)?;

                Ok(Self::Bdef2 {
                    bone_index_1,
                    bone_index_2,
                    bone_weight,
                })
            }
            2 | 4 => {
                let bone_index_1 = PmxBoneIndex::parse(config, cursor)?;
                let bone_index_2 = PmxBoneIndex::parse(config, cursor)?;
                let bone_index_3 = PmxBoneIndex::parse(config, cursor)?;
                let bone_index_4 = PmxBoneIndex::parse(config, cursor)?;
                let bone_weight_1 = f32::parse(config, cursor)?;
                let bone_weight_2 = f32::parse(config, cursor)?;
                let bone_weight_3 = f32::parse(config, cursor)?;
                let bone_weight_4 = f32::parse(config, cursor)?;

                if tag == 2 {
                    Ok(Self::Bdef4 {
                        bone_index_1,
                        bone_index_2,
                        bone_index_3,
                        bone_index_4,
                        bone_weight_1,
                        bone_weight_2,
                        bone_weight_3,
                        bone_weight_4,
                    })
                } else {
                    Ok(Self::Qdef {
                        bone_index_1,
                        bone_index_2,
                        bone_index_3,
                        bone_index_4,
                        bone_weight_1,
                        bone_weight_2,
                        bone_weight_3,
                        bone_weight_4,
                    })
                }
            }
            3 => {
                let bone_index_1 = PmxBoneIndex::parse(config, cursor)?;
                let bone_index_2 = PmxBoneIndex::parse(config, cursor)?;
                let bone_weight = f32::parse(config, cursor)?;
                let c = PmxVec3::parse(config, cursor)?;
                let r0 = PmxVec3::parse(config, cursor)?;
                let r1 = PmxVec3::parse(config, cursor)?;

                Ok(Self::Sdef {
                    bone_index_1,
                    bone_index_2,
                    bone_weight,
                    c,
                    r0,
                    r1,
                })
            }
            tag => Err(PmxParseErrorKind::UnsupportedDeform(tag)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{config_with_widths, default_config, PmxBuilder};

    fn vertex_prefix() -> PmxBuilder {
        PmxBuilder::new()
            .floats(&[1.0, 2.0, 3.0])
            .floats(&[0.0, 1.0, 0.0])
            .floats(&[0.25, 0.75])
    }

    #[test]
    fn test_vertex_bdef1_consumes_exact_bytes() {
        let config = default_config();
        let buf = vertex_prefix()
            .i8(0)
            .index(1, 5)
            .f32(1.0)
            // trailing byte that must not be consumed
            .u8(0xAA)
            .build();
        let mut cursor = Cursor::new(&buf);

        let vertex = PmxVertex::parse(&config, &mut cursor).unwrap();

        assert_eq!(cursor.position(), 12 + 12 + 8 + 1 + 1 + 4);
        assert_eq!(
            vertex.position,
            PmxVec3 {
                x: 1.0,
                y: 2.0,
                z: 3.0
            }
        );
        assert_eq!(vertex.uv, PmxVec2 { x: 0.25, y: 0.75 });
        assert_eq!(
            vertex.deform_kind,
            PmxVertexDeformKind::Bdef1 {
                bone_index: PmxBoneIndex::new(5)
            }
        );
        assert_eq!(vertex.edge_size, 1.0);
    }

    #[test]
    fn test_vertex_sdef_consumes_exact_bytes() {
        let config = config_with_widths(1, 2);
        let buf = vertex_prefix()
            .i8(3)
            .index(2, 300)
            .index(2, -1)
            .f32(0.5)
            .floats(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0])
            .f32(0.0)
            .u8(0xAA)
            .build();
        let mut cursor = Cursor::new(&buf);

        let vertex = PmxVertex::parse(&config, &mut cursor).unwrap();

        assert_eq!(cursor.position(), 32 + 1 + 2 * 2 + 4 + 9 * 4 + 4);
        match vertex.deform_kind {
            PmxVertexDeformKind::Sdef {
                bone_index_1,
                bone_index_2,
                bone_weight,
                c,
                r0,
                r1,
            } => {
                assert_eq!(bone_index_1.get(), 300);
                assert_eq!(bone_index_2.get(), -1);
                assert_eq!(bone_weight, 0.5);
                assert_eq!(
                    c,
                    PmxVec3 {
                        x: 1.0,
                        y: 2.0,
                        z: 3.0
                    }
                );
                assert_eq!(
                    r0,
                    PmxVec3 {
                        x: 4.0,
                        y: 5.0,
                        z: 6.0
                    }
                );
                assert_eq!(
                    r1,
                    PmxVec3 {
                        x: 7.0,
                        y: 8.0,
                        z: 9.0
                    }
                );
            }
            other => panic!("unexpected deform kind {:?}", other),
        }
    }

    #[test]
    fn test_vertex_bdef2_bdef4_qdef_sizes() {
        let config = default_config();

        let cases = [(1, 2 + 4), (2, 4 + 4 * 4), (4, 4 + 4 * 4)];

        for (tag, payload_size) in cases {
            let mut builder = vertex_prefix().i8(tag);

            for _ in 0..payload_size {
                builder = builder.u8(0);
            }

            let buf = builder.f32(1.0).build();
            let mut cursor = Cursor::new(&buf);
            let vertex = PmxVertex::parse(&config, &mut cursor).unwrap();

            assert_eq!(vertex.deform_kind.tag(), tag);
            assert_eq!(cursor.remaining(), 0);
        }
    }

    #[test]
    fn test_vertex_additional_vec4s() {
        let config = PmxConfig::from_globals(&[0, 2, 1, 1, 1, 1, 1, 1]);
        let buf = vertex_prefix()
            .floats(&[1.0, 2.0, 3.0, 4.0])
            .floats(&[5.0, 6.0, 7.0, 8.0])
            .i8(0)
            .index(1, 0)
            .f32(1.0)
            .build();
        let mut cursor = Cursor::new(&buf);

        let vertex = PmxVertex::parse(&config, &mut cursor).unwrap();

        assert_eq!(
            vertex.additional_vec4s,
            vec![
                PmxVec4 {
                    x: 1.0,
                    y: 2.0,
                    z: 3.0,
                    w: 4.0
                },
                PmxVec4 {
                    x: 5.0,
                    y: 6.0,
                    z: 7.0,
                    w: 8.0
                },
            ]
        );
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_vertex_unsupported_deform() {
        let config = default_config();
        let buf = vertex_prefix().i8(5).index(1, 0).f32(1.0).build();
        let mut cursor = Cursor::new(&buf);

        assert_eq!(
            PmxVertex::parse(&config, &mut cursor),
            Err(PmxParseErrorKind::UnsupportedDeform(5))
        );
    }

    #[test]
    fn test_vertices_truncated() {
        let config = default_config();
        let buf = PmxBuilder::new()
            .i32(1)
            .bytes(&vertex_prefix().i8(0).index(1, 0).build())
            .build();
        let mut cursor = Cursor::new(&buf);

        assert_eq!(
            Vec::<PmxVertex>::parse(&config, &mut cursor),
            Err(PmxParseErrorKind::UnexpectedEof)
        );
    }
}
