use crate::parse::ParseError;

/// Bounds-checked reader over an immutable byte buffer.
///
/// Every read is checked against the end of the buffer before any byte is touched. A read that
/// would run past the end fails and pins the cursor to the end, so all subsequent reads fail too.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    position: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, position: 0 }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.position
    }

    /// Fails if fewer than `size` bytes remain.
    pub fn ensure_bytes<E: ParseError>(&mut self, size: usize) -> Result<(), E> {
        if self.remaining() < size {
            self.position = self.buf.len();
            return Err(E::error_unexpected_eof());
        }

        Ok(())
    }

    pub fn read<E: ParseError, const N: usize>(&mut self) -> Result<&'a [u8; N], E> {
        let bytes = self.read_dynamic::<E>(N)?;
        bytes.try_into().map_err(|_| E::error_unexpected_eof())
    }

    pub fn read_dynamic<E: ParseError>(&mut self, size: usize) -> Result<&'a [u8], E> {
        self.ensure_bytes::<E>(size)?;

        let bytes = &self.buf[self.position..self.position + size];
        self.position += size;

        Ok(bytes)
    }

    pub fn skip<E: ParseError>(&mut self, size: usize) -> Result<(), E> {
        self.read_dynamic::<E>(size).map(|_| ())
    }
}
