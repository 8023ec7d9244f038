use crate::error::TcoError;
use crate::ext::binary_cursor::ReadStruct;
use crate::headers::TextureDescriptor;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{self, Read};

/// Describes the compressed block that follows the texture descriptor.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionHeader {
    /// The type of the file, repeated from the flag header.
    pub flag: u32,
    /// Unknown bytes, kept as-is.
    pub reserved: [u8; 8],
    /// The size of the header that follows, always the size of a [`TextureDescriptor`].
    pub data_header_size: u32,
    /// The size of the compressed payload in bytes.
    pub compressed_size: u32,
    /// The size of the payload once decompressed.
    pub decompressed_size: u32,
}

impl CompressionHeader {
    /// Fails when the declared data header is not a texture descriptor.
    pub fn validate(&self) -> Result<(), TcoError> {
        if self.data_header_size as usize != TextureDescriptor::SIZE {
            return Err(TcoError::MalformedHeader(format!(
                "File dataHeaderSize ({}) did not match TCOHeader size ({})",
                self.data_header_size,
                TextureDescriptor::SIZE
            )));
        }
        Ok(())
    }
}

impl ReadStruct for CompressionHeader {
    const SIZE: usize = 0x18;

    fn read<R: Read>(reader: &mut R) -> io::Result<Self> {
        let flag = reader.read_u32::<LittleEndian>()?;
        let mut reserved = [0u8; 8];
        reader.read_exact(&mut reserved)?;
        Ok(Self {
            flag,
            reserved,
            data_header_size: reader.read_u32::<LittleEndian>()?,
            compressed_size: reader.read_u32::<LittleEndian>()?,
            decompressed_size: reader.read_u32::<LittleEndian>()?,
        })
    }
}
