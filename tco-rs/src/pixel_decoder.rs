//! Reinterpretation of a decompressed payload as 8-bit channels.
//!
//! Every layout converts to one of three outputs: one, two or four 8-bit channels per
//! pixel. Layouts whose payload is already 8-bit are borrowed straight from the payload,
//! everything else is repacked into a freshly allocated buffer.
use crate::block_decoder::decode_block_compressed;
use crate::error::TcoError;
use crate::headers::TextureDescriptor;
use crate::pixel_layout::PixelLayout;
use byteorder::{ByteOrder, LittleEndian};
use std::borrow::Cow;

const U16_RANGE: u64 = u16::MAX as u64;
// R32 payloads hold 16-bit words but are scaled against the full 32-bit range.
const U32_RANGE: u64 = u32::MAX as u64;
const R24_RANGE: u64 = 0xFFFF_FF00;

/// A texture converted to interleaved 8-bit channels, ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedTexture<'a> {
    pub width: u32,
    pub height: u32,
    /// Channels per pixel, one of 1, 2 or 4.
    pub channels: u32,
    /// Exactly `width * height * channels` bytes.
    pub pixels: Cow<'a, [u8]>,
}

impl DecodedTexture<'_> {
    /// Whether the pixels alias the decompressed payload.
    pub fn is_borrowed(&self) -> bool {
        matches!(self.pixels, Cow::Borrowed(_))
    }
}

/// Converts the payload described by `descriptor` into 8-bit channels.
pub fn decode_pixels<'a>(
    descriptor: &TextureDescriptor,
    payload: &'a [u8],
) -> Result<DecodedTexture<'a>, TcoError> {
    let layout = descriptor.layout;
    let channels = layout
        .channel_count()
        .ok_or(TcoError::UnsupportedLayout(layout.raw()))?;
    let output_size = descriptor.output_size(channels)?;

    let pixels = match layout {
        PixelLayout::Bc1
        | PixelLayout::Bc2
        | PixelLayout::Bc3
        | PixelLayout::Bc4
        | PixelLayout::Bc5 => Cow::Owned(decode_block_compressed(descriptor, payload)?),
        PixelLayout::R11G11B10 | PixelLayout::Rgba8 | PixelLayout::R8 => {
            Cow::Borrowed(passthrough(layout, payload, output_size)?)
        }
        PixelLayout::Rg16 => Cow::Owned(repack(payload, output_size, 4, |src| {
            [
                rescale(LittleEndian::read_u16(&src[0..2]) as u64, U16_RANGE),
                rescale(LittleEndian::read_u16(&src[2..4]) as u64, U16_RANGE),
            ]
        })),
        PixelLayout::R16 => Cow::Owned(repack(payload, output_size, 4, |src| {
            [rescale(LittleEndian::read_u16(src) as u64, U16_RANGE)]
        })),
        PixelLayout::R32 => Cow::Owned(repack(payload, output_size, 4, |src| {
            [rescale(LittleEndian::read_u16(src) as u64, U32_RANGE)]
        })),
        PixelLayout::R32G8 => Cow::Owned(repack(payload, output_size, 3, |src| {
            [
                rescale(LittleEndian::read_u16(src) as u64, U16_RANGE),
                src[2],
            ]
        })),
        PixelLayout::R24G8 => Cow::Owned(repack(payload, output_size, 4, |src| {
            let word = LittleEndian::read_u32(src);
            [
                rescale((word & 0xFFFF_FF00) as u64, R24_RANGE),
                (word & 0xFF) as u8,
            ]
        })),
        PixelLayout::NotUsed | PixelLayout::Unknown(_) => {
            return Err(TcoError::UnsupportedLayout(layout.raw()))
        }
    };

    Ok(DecodedTexture {
        width: descriptor.width,
        height: descriptor.height,
        channels,
        pixels,
    })
}

/// Rounds `value * 255 / range` to the nearest integer.
fn rescale(value: u64, range: u64) -> u8 {
    ((value * 255 + range / 2) / range) as u8
}

fn passthrough(layout: PixelLayout, payload: &[u8], output_size: usize) -> Result<&[u8], TcoError> {
    payload.get(..output_size).ok_or_else(|| {
        TcoError::Truncated(format!(
            "{layout} texture needs {output_size} bytes but the payload holds {}",
            payload.len()
        ))
    })
}

/// Converts each `stride`-byte source pixel into `N` channels.
///
/// Pixels past the end of the payload stay zero, surplus payload is ignored.
fn repack<const N: usize>(
    payload: &[u8],
    output_size: usize,
    stride: usize,
    convert: impl Fn(&[u8]) -> [u8; N],
) -> Vec<u8> {
    let mut pixels = vec![0u8; output_size];
    for (out, src) in pixels.chunks_exact_mut(N).zip(payload.chunks_exact(stride)) {
        out.copy_from_slice(&convert(src));
    }
    pixels
}
