//! Decoding of block-compressed (BC1-BC5) payloads into 8-bit channels.
//!
//! Only the top mip is decoded. BC1, BC3, BC4 and BC5 go through `texture2ddecoder`,
//! which hands back one packed `0xAARRGGBB` word per pixel. BC2 goes through `squish`,
//! which writes RGBA8 directly.
use crate::error::TcoError;
use crate::headers::TextureDescriptor;
use crate::pixel_layout::PixelLayout;
use squish::Format as SquishFormat;

const BLOCK_DIM: u32 = 4;

type DecodeFn = fn(&[u8], usize, usize, &mut [u32]) -> Result<(), &'static str>;

/// Decodes the top mip of a block-compressed texture.
///
/// Returns the pixels packed as RGBA8 (BC1-BC3), R8 (BC4) or RG8 (BC5).
pub fn decode_block_compressed(
    descriptor: &TextureDescriptor,
    data: &[u8],
) -> Result<Vec<u8>, TcoError> {
    let layout = descriptor.layout;
    let channels = layout
        .channel_count()
        .filter(|_| layout.is_block_compressed())
        .ok_or(TcoError::UnsupportedLayout(layout.raw()))?;
    let output_size = descriptor.output_size(channels)?;

    let required = block_data_size(descriptor.width, descriptor.height, bytes_per_block(layout))?;
    let data = data.get(..required).ok_or_else(|| {
        TcoError::Truncated(format!(
            "{layout} top mip needs {required} bytes but the payload holds {}",
            data.len()
        ))
    })?;

    let decode: DecodeFn = match layout {
        PixelLayout::Bc1 => texture2ddecoder::decode_bc1,
        PixelLayout::Bc2 => {
            let mut pixels = vec![0u8; output_size];
            SquishFormat::Bc2.decompress(
                data,
                descriptor.width as usize,
                descriptor.height as usize,
                &mut pixels,
            );
            return Ok(pixels);
        }
        PixelLayout::Bc3 => texture2ddecoder::decode_bc3,
        PixelLayout::Bc4 => texture2ddecoder::decode_bc4,
        PixelLayout::Bc5 => texture2ddecoder::decode_bc5,
        _ => return Err(TcoError::UnsupportedLayout(layout.raw())),
    };

    let width = descriptor.width as usize;
    let height = descriptor.height as usize;
    let mut packed = vec![0u32; descriptor.pixel_count()?];
    decode(data, width, height, &mut packed).map_err(|e| {
        TcoError::DecompressionFailed(format!("Failed to decompress image data: {e}"))
    })?;

    let mut pixels = Vec::with_capacity(output_size);
    for argb in packed {
        let [b, g, r, a] = argb.to_le_bytes();
        match channels {
            1 => pixels.push(r),
            2 => pixels.extend_from_slice(&[r, g]),
            _ => pixels.extend_from_slice(&[r, g, b, a]),
        }
    }
    pixels.truncate(output_size);
    Ok(pixels)
}

fn bytes_per_block(layout: PixelLayout) -> usize {
    match layout {
        PixelLayout::Bc1 | PixelLayout::Bc4 => 8,
        _ => 16,
    }
}

fn block_data_size(width: u32, height: u32, bytes_per_block: usize) -> Result<usize, TcoError> {
    let blocks_w = width.div_ceil(BLOCK_DIM) as usize;
    let blocks_h = height.div_ceil(BLOCK_DIM) as usize;
    blocks_w
        .checked_mul(blocks_h)
        .and_then(|blocks| blocks.checked_mul(bytes_per_block))
        .ok_or_else(|| {
            TcoError::MalformedHeader(format!(
                "Texture extent {width}x{height} overflows the block data size"
            ))
        })
}
