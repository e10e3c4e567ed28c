use crate::pmx_header::PmxConfig;

/// UTF-16LE text, no additional vec4s, 1 byte indices everywhere.
pub fn default_config() -> PmxConfig {
    PmxConfig::from_globals(&[0, 0, 1, 1, 1, 1, 1, 1])
}

pub fn config_with_widths(vertex_index_width: i8, index_width: i8) -> PmxConfig {
    PmxConfig::from_globals(&[
        0,
        0,
        vertex_index_width,
        index_width,
        index_width,
        index_width,
        index_width,
        index_width,
    ])
}

/// Little-endian byte builder for synthesizing PMX fragments.
#[derive(Debug, Default, Clone)]
pub struct PmxBuilder {
    buf: Vec<u8>,
}

impl PmxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(self) -> Vec<u8> {
        self.buf
    }

    pub fn bytes(mut self, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub fn u8(self, value: u8) -> Self {
        self.bytes(&[value])
    }

    pub fn i8(self, value: i8) -> Self {
        self.bytes(&value.to_le_bytes())
    }

    pub fn u16(self, value: u16) -> Self {
        self.bytes(&value.to_le_bytes())
    }

    pub fn i16(self, value: i16) -> Self {
        self.bytes(&value.to_le_bytes())
    }

    pub fn u32(self, value: u32) -> Self {
        self.bytes(&value.to_le_bytes())
    }

    pub fn i32(self, value: i32) -> Self {
        self.bytes(&value.to_le_bytes())
    }

    pub fn f32(self, value: f32) -> Self {
        self.bytes(&value.to_le_bytes())
    }

    pub fn floats(mut self, values: &[f32]) -> Self {
        for &value in values {
            self = self.f32(value);
        }
        self
    }

    /// Index of the given on-disk width, truncated the way the format stores it.
    pub fn index(self, width: i8, value: i32) -> Self {
        match width {
            1 => self.u8(value as u8),
            2 => self.u16(value as u16),
            4 => self.i32(value),
            _ => panic!("invalid index width {}", width),
        }
    }

    /// UTF-16LE text.
    pub fn text(self, text: &str) -> Self {
        let units = text.encode_utf16().collect::<Vec<_>>();
        let mut builder = self.i32(units.len() as i32 * 2);

        for unit in units {
            builder = builder.u16(unit);
        }

        builder
    }

    pub fn text_utf8(self, text: &str) -> Self {
        self.i32(text.len() as i32).bytes(text.as_bytes())
    }

    /// Signature, version 2.0 and the given 8 globals, followed by 4 empty names.
    pub fn header(self, globals: [i8; 8]) -> Self {
        let mut builder = self.bytes(b"PMX ").f32(2.0).i8(8);

        for global in globals {
            builder = builder.i8(global);
        }

        builder.i32(0).i32(0).i32(0).i32(0)
    }
}

/// The smallest valid PMX file: a header with 1 byte indices and nine empty sections.
pub fn minimal_pmx() -> Vec<u8> {
    let mut builder = PmxBuilder::new().header([0, 0, 1, 1, 1, 1, 1, 1]);

    for _ in 0..9 {
        builder = builder.i32(0);
    }

    builder.build()
}
