use crate::error::TcoError;
use std::io::{self, Read};

/// A fixed-size structure that can be decoded from a little-endian byte stream.
pub trait ReadStruct: Sized {
    /// The exact number of bytes the structure occupies on disk.
    const SIZE: usize;

    /// Reads the structure from the reader, consuming exactly [`ReadStruct::SIZE`] bytes.
    fn read<R: Read>(reader: &mut R) -> io::Result<Self>;
}

/// A bounds-checked sequential reader over an in-memory buffer.
///
/// A read is only allowed when at least one byte remains after the structure, so a
/// struct ending exactly at the end of the buffer is rejected.
#[derive(Debug, Clone)]
pub struct BinaryCursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BinaryCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Returns the current read position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns every byte from the current position to the end of the buffer.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.position.min(self.data.len())..]
    }

    /// Reads the structure and advances past it.
    pub fn read_struct<S: ReadStruct>(&mut self) -> Result<S, TcoError> {
        let value = self.peek_struct::<S>()?;
        self.position += S::SIZE;
        Ok(value)
    }

    /// Reads the structure without advancing.
    pub fn peek_struct<S: ReadStruct>(&self) -> Result<S, TcoError> {
        let end = self
            .position
            .checked_add(S::SIZE)
            .filter(|end| *end < self.data.len())
            .ok_or_else(|| {
                TcoError::Truncated(format!(
                    "{} bytes requested at offset {} of a {} byte buffer",
                    S::SIZE,
                    self.position,
                    self.data.len()
                ))
            })?;

        let mut slice = &self.data[self.position..end];
        Ok(S::read(&mut slice)?)
    }
}
