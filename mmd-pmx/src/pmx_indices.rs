use crate::{
    cursor::Cursor,
    parse::{Parse, PmxParseErrorKind},
    pmx_header::{PmxConfig, PmxIndexSize},
    pmx_primitives::PmxVertexIndex,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PmxIndices {
    /// vertex indices of a triangle list, in CW order (DirectX style)
    pub vertex_indices: Vec<PmxVertexIndex>,
}

impl Parse for PmxIndices {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        // indices count (4 bytes)
        let count = u32::parse(config, cursor)? as usize;

        if count == 0 {
            return Ok(Self {
                vertex_indices: Vec::new(),
            });
        }

        // index data (count * vertex_index_size bytes)
        let index_size = config.vertex_index_size()?;
        let size = count
            .checked_mul(index_size.size())
            .ok_or(PmxParseErrorKind::UnexpectedEof)?;
        let bytes = cursor.read_dynamic::<PmxParseErrorKind>(size)?;

        // 1 and 2 byte vertex indices are unsigned, 4 byte ones are signed
        let vertex_indices = match index_size {
            PmxIndexSize::Byte => bytes
                .iter()
                .map(|&index| PmxVertexIndex::new(i32::from(index)))
                .collect(),
            PmxIndexSize::Short => bytes
                .chunks_exact(2)
                .map(|index| [index[0], index[1]])
                .map(u16::from_le_bytes)
                .map(|index| PmxVertexIndex::new(i32::from(index)))
                .collect(),
            PmxIndexSize::Int => bytes
                .chunks_exact(4)
                .map(|index| [index[0], index[1], index[2], index[3]])
                .map(i32::from_le_bytes)
                .map(PmxVertexIndex::new)
                .collect(),
        };

        Ok(Self { vertex_indices })
    }
}
