use crate::{
    cursor::Cursor,
    parse::{Parse, PmxParseErrorKind},
    pmx_header::PmxConfig,
    primitives::parse_array,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PmxTexture {
    /// Path of the image, usually relative to the model file.
    pub path: String,
}

impl Parse for PmxTexture {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        let path = String::parse(config, cursor)?;

        Ok(Self { path })
    }
}

impl Parse for Vec<PmxTexture> {
    fn parse(config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
        // path length (4 bytes)
        parse_array(config, cursor, 4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{default_config, PmxBuilder};

    #[test]
    fn test_textures() {
        let buf = PmxBuilder::new()
            .i32(2)
            .text("tex\\body.png")
            .text("toon01.bmp")
            .build();
        let mut cursor = Cursor::new(&buf);

        let textures = Vec::<PmxTexture>::parse(&default_config(), &mut cursor).unwrap();

        assert_eq!(
            textures,
            vec![
                PmxTexture {
                    path: "tex\\body.png".to_owned()
                },
                PmxTexture {
                    path: "toon01.bmp".to_owned()
                },
            ]
        );
    }
}
