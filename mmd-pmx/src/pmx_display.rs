use crate::{
    cursor::Cursor,
    parse::{Parse, PmxParseErrorKind},
    pmx_header::PmxConfig,
    pmx_primitives::{PmxBoneIndex, PmxMorphIndex},
    primitives::parse_array,
};
use serde::Serialize;

/// A named group of bones and morphs, shown as one node in the editor UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PmxDisplay {
    pub name_local: String,
    pub name_universal: String,
    /// Set on the built-in `Root` and `表情` groups.
    pub is_special: bool,
    pub frames: Vec<PmxDisplayFrame>,
}

impl Parse for PmxDisplay {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        let name_local = String::parse(config, cursor)?;
        let name_universal = String::parse(config, cursor)?;
        let is_special = u8::parse(config, cursor)? != 0;
        let frames = Vec::parse(config, cursor)?;

        Ok(Self {
            name_local,
            name_universal,
            is_special,
            frames,
        })
    }
}

impl Parse for Vec<PmxDisplay> {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        // names (8 bytes)
        // is_special (1 byte)
        // frame count (4 bytes)
        parse_array(config, cursor, 8 + 1 + 4)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PmxDisplayFrame {
    Bone(PmxBoneIndex),
    Morph(PmxMorphIndex),
}

impl Parse for PmxDisplayFrame {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        match u8::parse(config, cursor)? {
            0 => Ok(Self::Bone(PmxBoneIndex::parse(config, cursor)?)),
            _ => Ok(Self::Morph(PmxMorphIndex::parse(config, cursor)?)),
        }
    }
}

impl Parse for Vec<PmxDisplayFrame> {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        // kind (1 byte)
        // index (1 byte at least)
        parse_array(config, cursor, 1 + 1)
    }
}
