use std::fmt;

/// Represents the on-disk pixel encoding declared by a TCO texture descriptor.
///
/// The discriminants match the values stored in the file. Value 5 is reserved by the format
/// and never carries convertible data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    Bc1,
    Bc2,
    Bc3,
    Bc4,
    Bc5,
    NotUsed,
    /// Declared as packed floats, but the cached data is plain RGBA8.
    R11G11B10,
    Rgba8,
    Rg16,
    R16,
    R32,
    R32G8,
    R24G8,
    R8,
    /// Unknown layout, stores the raw value.
    Unknown(i32),
}

impl PixelLayout {
    /// Returns the raw value as stored in the texture descriptor.
    pub fn raw(self) -> i32 {
        match self {
            PixelLayout::Bc1 => 0,
            PixelLayout::Bc2 => 1,
            PixelLayout::Bc3 => 2,
            PixelLayout::Bc4 => 3,
            PixelLayout::Bc5 => 4,
            PixelLayout::NotUsed => 5,
            PixelLayout::R11G11B10 => 6,
            PixelLayout::Rgba8 => 7,
            PixelLayout::Rg16 => 8,
            PixelLayout::R16 => 9,
            PixelLayout::R32 => 10,
            PixelLayout::R32G8 => 11,
            PixelLayout::R24G8 => 12,
            PixelLayout::R8 => 13,
            PixelLayout::Unknown(other) => other,
        }
    }

    /// Returns the number of 8-bit channels the layout decodes to, if it can be decoded.
    pub fn channel_count(self) -> Option<u32> {
        match self {
            PixelLayout::Bc1
            | PixelLayout::Bc2
            | PixelLayout::Bc3
            | PixelLayout::R11G11B10
            | PixelLayout::Rgba8 => Some(4),
            PixelLayout::Bc5 | PixelLayout::Rg16 | PixelLayout::R32G8 | PixelLayout::R24G8 => {
                Some(2)
            }
            PixelLayout::Bc4 | PixelLayout::R16 | PixelLayout::R32 | PixelLayout::R8 => Some(1),
            PixelLayout::NotUsed | PixelLayout::Unknown(_) => None,
        }
    }

    /// Whether the layout is one of the block-compressed formats.
    pub fn is_block_compressed(self) -> bool {
        matches!(
            self,
            PixelLayout::Bc1
                | PixelLayout::Bc2
                | PixelLayout::Bc3
                | PixelLayout::Bc4
                | PixelLayout::Bc5
        )
    }
}

impl From<i32> for PixelLayout {
    fn from(value: i32) -> Self {
        match value {
            0 => PixelLayout::Bc1,
            1 => PixelLayout::Bc2,
            2 => PixelLayout::Bc3,
            3 => PixelLayout::Bc4,
            4 => PixelLayout::Bc5,
            5 => PixelLayout::NotUsed,
            6 => PixelLayout::R11G11B10,
            7 => PixelLayout::Rgba8,
            8 => PixelLayout::Rg16,
            9 => PixelLayout::R16,
            10 => PixelLayout::R32,
            11 => PixelLayout::R32G8,
            12 => PixelLayout::R24G8,
            13 => PixelLayout::R8,
            other => PixelLayout::Unknown(other),
        }
    }
}

impl fmt::Display for PixelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PixelLayout::Bc1 => "BC1",
            PixelLayout::Bc2 => "BC2",
            PixelLayout::Bc3 => "BC3",
            PixelLayout::Bc4 => "BC4",
            PixelLayout::Bc5 => "BC5",
            PixelLayout::NotUsed => "NOT USED",
            PixelLayout::R11G11B10 => "R11G11B10",
            PixelLayout::Rgba8 => "RGBA8",
            PixelLayout::Rg16 => "RG16",
            PixelLayout::R16 => "R16",
            PixelLayout::R32 => "R32",
            PixelLayout::R32G8 => "R32G8",
            PixelLayout::R24G8 => "R24G8",
            PixelLayout::R8 => "R8",
            PixelLayout::Unknown(_) => "ERROR",
        };
        f.write_str(name)
    }
}
