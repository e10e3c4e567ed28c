use crate::{
    cursor::Cursor,
    parse::{Parse, PmxParseErrorKind},
    pmx_header::PmxConfig,
};

macro_rules! impl_parse_le {
    ($($ty:ty => $size:literal),* $(,)?) => {
        $(
            impl Parse for $ty {
                fn parse(_config: &PmxConfig, cursor: &mut Cursor) -> Result<Self, PmxParseErrorKind> {
                    Ok(<$ty>::from_le_bytes(*cursor.read::<PmxParseErrorKind, $size>()?))
                }
            }
        )*
    };
}

impl_parse_le! {
    u8 => 1,
    i8 => 1,
    u16 => 2,
    i16 => 2,
    u32 => 4,
    i32 => 4,
    f32 => 4,
}

/// Reads a 4 byte record count and makes sure the buffer can hold that many records of at least
/// `record_size` bytes each.
///
/// Counts are stored as `int32`, but they are read unsigned: a negative count could never be
/// satisfied, and as a huge unsigned value it fails as EOF right here instead of driving a huge
/// allocation.
pub fn read_count(
    config: &PmxConfig,
    cursor: &mut Cursor,
    record_size: usize,
) -> Result<usize, PmxParseErrorKind> {
    let count = u32::parse(config, cursor)? as usize;
    let size = count
        .checked_mul(record_size)
        .ok_or(PmxParseErrorKind::UnexpectedEof)?;
    cursor.ensure_bytes::<PmxParseErrorKind>(size)?;

    Ok(count)
}

/// Reads a record count followed by that many records.
pub fn parse_array<T: Parse>(
    config: &PmxConfig,
    cursor: &mut Cursor,
    record_size: usize,
) -> Result<Vec<T>, PmxParseErrorKind> {
    let count = read_count(config, cursor, record_size)?;
    let mut items = Vec::with_capacity(count);

    for _ in 0..count {
        items.push(T::parse(config, cursor)?);
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{default_config, PmxBuilder};

    #[test]
    fn test_parse_little_endian_scalars() {
        let buf = PmxBuilder::new()
            .u16(0x1234)
            .i16(-2)
            .i32(-100000)
            .f32(1.5)
            .build();
        let config = default_config();
        let mut cursor = Cursor::new(&buf);

        assert_eq!(u16::parse(&config, &mut cursor), Ok(0x1234));
        assert_eq!(i16::parse(&config, &mut cursor), Ok(-2));
        assert_eq!(i32::parse(&config, &mut cursor), Ok(-100000));
        assert_eq!(f32::parse(&config, &mut cursor), Ok(1.5));
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_read_count_rejects_unsatisfiable_count() {
        // 3 records of 4 bytes each, but only 8 bytes follow
        let buf = PmxBuilder::new().i32(3).u32(0).u32(0).build();
        let config = default_config();
        let mut cursor = Cursor::new(&buf);

        assert_eq!(
            read_count(&config, &mut cursor, 4),
            Err(PmxParseErrorKind::UnexpectedEof)
        );
    }

    #[test]
    fn test_read_count_negative_is_eof() {
        let buf = PmxBuilder::new().i32(-1).u32(0).build();
        let config = default_config();
        let mut cursor = Cursor::new(&buf);

        assert_eq!(
            read_count(&config, &mut cursor, 1),
            Err(PmxParseErrorKind::UnexpectedEof)
        );
    }

    #[test]
    fn test_parse_array() {
        let buf = PmxBuilder::new().i32(2).u16(7).u16(9).build();
        let config = default_config();
        let mut cursor = Cursor::new(&buf);

        assert_eq!(parse_array::<u16>(&config, &mut cursor, 2), Ok(vec![7, 9]));
    }
}
