mod cursor;
mod parse;
mod pmx_bone;
mod pmx_display;
mod pmx_header;
mod pmx_indices;
mod pmx_joint;
mod pmx_material;
mod pmx_morph;
mod pmx_primitives;
mod pmx_rigidbody;
mod pmx_texture;
mod pmx_vertex;
mod primitives;

#[cfg(test)]
mod test_utils;

pub use cursor::Cursor;
pub use parse::{Parse, ParseError, PmxParseErrorKind};
pub use pmx_bone::*;
pub use pmx_display::*;
pub use pmx_header::*;
pub use pmx_indices::*;
pub use pmx_joint::*;
pub use pmx_material::*;
pub use pmx_morph::*;
pub use pmx_primitives::*;
pub use pmx_rigidbody::*;
pub use pmx_texture::*;
pub use pmx_vertex::*;

use log::debug;
use serde::Serialize;
use std::fmt::Display;
use thiserror::Error;

/// Section of the file being decoded, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PmxParseStage {
    Signature,
    Header,
    Vertices,
    Indices,
    Textures,
    Materials,
    Bones,
    Morphs,
    Displays,
    Rigidbodies,
    Joints,
}

impl Display for PmxParseStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Signature => "signature",
            Self::Header => "header",
            Self::Vertices => "vertices",
            Self::Indices => "indices",
            Self::Textures => "textures",
            Self::Materials => "materials",
            Self::Bones => "bones",
            Self::Morphs => "morphs",
            Self::Displays => "display frames",
            Self::Rigidbodies => "rigidbodies",
            Self::Joints => "joints",
        };

        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("failed to parse PMX {stage}: {kind}")]
pub struct PmxParseError {
    pub stage: PmxParseStage,
    pub kind: PmxParseErrorKind,
}

impl PmxParseError {
    pub fn new(stage: PmxParseStage, kind: PmxParseErrorKind) -> Self {
        Self { stage, kind }
    }

    pub fn kind(&self) -> PmxParseErrorKind {
        self.kind
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pmx {
    pub header: PmxHeader,
    pub vertices: Vec<PmxVertex>,
    pub indices: PmxIndices,
    pub textures: Vec<PmxTexture>,
    pub materials: Vec<PmxMaterial>,
    pub bones: Vec<PmxBone>,
    pub morphs: Vec<PmxMorph>,
    pub displays: Vec<PmxDisplay>,
    pub rigidbodies: Vec<PmxRigidbody>,
    pub joints: Vec<PmxJoint>,
}

impl Pmx {
    /// Decodes a whole PMX file. The first failure aborts decoding; nothing is recovered.
    ///
    /// Bytes after the joints (e.g. PMX 2.1 soft bodies) are ignored.
    pub fn parse(buf: impl AsRef<[u8]>) -> Result<Self, PmxParseError> {
        let mut cursor = Cursor::new(buf.as_ref());

        pmx_header::acknowledge(&mut cursor)
            .map_err(|err| PmxParseError::new(PmxParseStage::Signature, err))?;

        let header = PmxHeader::parse(&mut cursor)
            .map_err(|err| PmxParseError::new(PmxParseStage::Header, err))?;
        debug!(
            "PMX v{} `{}` with globals {:?}.",
            header.version, header.model_name_local, header.globals
        );

        let config = &header.config;

        let vertices =
            parse_section::<Vec<PmxVertex>>(config, &mut cursor, PmxParseStage::Vertices)?;
        debug!("parsed {} vertices.", vertices.len());

        let indices = parse_section::<PmxIndices>(config, &mut cursor, PmxParseStage::Indices)?;
        debug!("parsed {} indices.", indices.vertex_indices.len());

        let textures =
            parse_section::<Vec<PmxTexture>>(config, &mut cursor, PmxParseStage::Textures)?;
        debug!("parsed {} textures.", textures.len());

        let materials =
            parse_section::<Vec<PmxMaterial>>(config, &mut cursor, PmxParseStage::Materials)?;
        debug!("parsed {} materials.", materials.len());

        let bones = parse_section::<Vec<PmxBone>>(config, &mut cursor, PmxParseStage::Bones)?;
        debug!("parsed {} bones.", bones.len());

        let morphs = parse_section::<Vec<PmxMorph>>(config, &mut cursor, PmxParseStage::Morphs)?;
        debug!("parsed {} morphs.", morphs.len());

        let displays =
            parse_section::<Vec<PmxDisplay>>(config, &mut cursor, PmxParseStage::Displays)?;
        debug!("parsed {} display frames.", displays.len());

        let rigidbodies =
            parse_section::<Vec<PmxRigidbody>>(config, &mut cursor, PmxParseStage::Rigidbodies)?;
        debug!("parsed {} rigidbodies.", rigidbodies.len());

        let joints = parse_section::<Vec<PmxJoint>>(config, &mut cursor, PmxParseStage::Joints)?;
        debug!("parsed {} joints.", joints.len());

        if cursor.remaining() != 0 {
            debug!("ignoring {} trailing bytes.", cursor.remaining());
        }

        Ok(Self {
            header,
            vertices,
            indices,
            textures,
            materials,
            bones,
            morphs,
            displays,
            rigidbodies,
            joints,
        })
    }
}

fn parse_section<T: Parse>(
    config: &PmxConfig,
    cursor: &mut Cursor,
    stage: PmxParseStage,
) -> Result<T, PmxParseError> {
    T::parse(config, cursor).map_err(|err| PmxParseError::new(stage, err))
}

/// Decodes a PMX file. Never panics; every malformed input is reported as an error.
pub fn try_resolve(buf: impl AsRef<[u8]>) -> Result<Pmx, PmxParseError> {
    Pmx::parse(buf)
}

/// Decodes a PMX file, panicking if it is malformed.
///
/// Use [`try_resolve`] unless a malformed file is unrecoverable for the caller anyway.
pub fn resolve(buf: impl AsRef<[u8]>) -> Pmx {
    match try_resolve(buf) {
        Ok(pmx) => pmx,
        Err(err) => panic!("{}", err),
    }
}

impl Display for Pmx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header = &self.header;
        let encoding = match header.config.text_encoding {
            PmxTextEncoding::Utf16Le => "UTF-16LE",
            PmxTextEncoding::Utf8 => "UTF-8",
        };

        write!(f, "PMX v{:.1}, {} text", header.version, encoding)?;

        match header.config.additional_vec4_count {
            0 => writeln!(f)?,
            1 => writeln!(f, ", 1 additional vec4")?,
            count => writeln!(f, ", {} additional vec4s", count)?,
        }

        writeln!(
            f,
            "  name: {} / {}",
            header.model_name_local, header.model_name_universal
        )?;

        // comments are often multi-line; the first line is enough for a summary
        let comment = &header.model_comment_local;

        if let Some(line) = comment.lines().find(|line| !line.is_empty()) {
            writeln!(f, "  comment: {}", line)?;
        }

        let sections = [
            (PmxParseStage::Vertices, self.vertices.len()),
            (PmxParseStage::Indices, self.indices.vertex_indices.len()),
            (PmxParseStage::Textures, self.textures.len()),
            (PmxParseStage::Materials, self.materials.len()),
            (PmxParseStage::Bones, self.bones.len()),
            (PmxParseStage::Morphs, self.morphs.len()),
            (PmxParseStage::Displays, self.displays.len()),
            (PmxParseStage::Rigidbodies, self.rigidbodies.len()),
            (PmxParseStage::Joints, self.joints.len()),
        ];

        for (stage, count) in sections {
            writeln!(f, "  {}: {}", stage, count)?;
        }

        Ok(())
    }
}
