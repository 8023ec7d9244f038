use crate::error::TcoError;
use crate::ext::binary_cursor::ReadStruct;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{self, Read};

/// Flag value marking a file whose payload is compressed.
pub const COMPRESSED_PAYLOAD_FLAG: u32 = 0x4;

/// The type discriminator shared by every TCO header.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerFlagHeader {
    /// The type of the file, only [`COMPRESSED_PAYLOAD_FLAG`] is supported.
    pub flag: u32,
}

impl ContainerFlagHeader {
    /// Fails unless the flag announces a compressed payload.
    pub fn validate(&self) -> Result<(), TcoError> {
        if self.flag != COMPRESSED_PAYLOAD_FLAG {
            return Err(TcoError::MalformedHeader(format!(
                "File has unsupported type flag: {}",
                self.flag
            )));
        }
        Ok(())
    }
}

impl ReadStruct for ContainerFlagHeader {
    const SIZE: usize = 0x4;

    fn read<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            flag: reader.read_u32::<LittleEndian>()?,
        })
    }
}
