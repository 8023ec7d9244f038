use crate::error::TcoError;
use crate::ext::binary_cursor::ReadStruct;
use crate::pixel_layout::PixelLayout;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{self, Read};

/// Describes the texture stored in the payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureDescriptor {
    /// The type of the file, repeated from the flag header.
    pub flag: u32,
    /// The width of the top mip in pixels.
    pub width: u32,
    /// The height of the top mip in pixels.
    pub height: u32,
    /// The declared encoding of the payload.
    pub layout: PixelLayout,
    /// The number of mip levels in the payload.
    pub num_mips: u32,
    /// Whether the rows are already stored top to bottom.
    pub flip_v: bool,
    /// Padding to keep the descriptor 4-byte aligned.
    pub padding: [u8; 3],
}

impl TextureDescriptor {
    /// Returns the number of pixels in the top mip.
    pub fn pixel_count(&self) -> Result<usize, TcoError> {
        if self.width == 0 || self.height == 0 {
            return Err(TcoError::MalformedHeader(format!(
                "Texture has an empty extent: {}x{}",
                self.width, self.height
            )));
        }
        (self.width as usize)
            .checked_mul(self.height as usize)
            .ok_or_else(|| self.overflow())
    }

    /// Returns the size in bytes of the top mip once converted to `channels` 8-bit channels.
    pub fn output_size(&self, channels: u32) -> Result<usize, TcoError> {
        self.pixel_count()?
            .checked_mul(channels as usize)
            .ok_or_else(|| self.overflow())
    }

    fn overflow(&self) -> TcoError {
        TcoError::MalformedHeader(format!(
            "Texture extent {}x{} overflows the pixel buffer size",
            self.width, self.height
        ))
    }
}

impl ReadStruct for TextureDescriptor {
    const SIZE: usize = 0x18;

    fn read<R: Read>(reader: &mut R) -> io::Result<Self> {
        let flag = reader.read_u32::<LittleEndian>()?;
        let width = reader.read_u32::<LittleEndian>()?;
        let height = reader.read_u32::<LittleEndian>()?;
        let layout = PixelLayout::from(reader.read_i32::<LittleEndian>()?);
        let num_mips = reader.read_u32::<LittleEndian>()?;
        let flip_v = reader.read_u8()? != 0;
        let mut padding = [0u8; 3];
        reader.read_exact(&mut padding)?;
        Ok(Self {
            flag,
            width,
            height,
            layout,
            num_mips,
            flip_v,
            padding,
        })
    }
}
