use crate::error::TcoError;
use crate::pixel_decoder::DecodedTexture;
use image::codecs::tga::TgaEncoder;
use image::{ExtendedColorType, ImageEncoder};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Extension given to every written image.
pub const OUTPUT_EXTENSION: &str = "tga";

/// Writes the texture as an uncompressed TGA image.
///
/// When `flip_vertically` is set the rows are written bottom to top. Run-length encoding
/// is disabled so the pixel data lands in the file as-is.
pub fn write_tga(
    path: &Path,
    texture: &DecodedTexture<'_>,
    flip_vertically: bool,
) -> Result<(), TcoError> {
    let color = match texture.channels {
        1 => ExtendedColorType::L8,
        2 => ExtendedColorType::La8,
        4 => ExtendedColorType::Rgba8,
        other => {
            return Err(TcoError::WriteFailed(format!(
                "{other} channel images cannot be written"
            )))
        }
    };

    let pixels = if flip_vertically {
        Cow::Owned(flip_rows(
            &texture.pixels,
            texture.width as usize * texture.channels as usize,
        ))
    } else {
        Cow::Borrowed(&*texture.pixels)
    };

    let mut writer = BufWriter::new(File::create(path).map_err(|e| write_failed(path, e))?);
    TgaEncoder::new(&mut writer)
        .disable_rle()
        .write_image(&pixels, texture.width, texture.height, color)
        .map_err(|e| write_failed(path, e))?;
    writer.flush().map_err(|e| write_failed(path, e))
}

fn write_failed(path: &Path, error: impl std::fmt::Display) -> TcoError {
    TcoError::WriteFailed(format!("{}: {error}", path.display()))
}

fn flip_rows(pixels: &[u8], row_pitch: usize) -> Vec<u8> {
    pixels
        .chunks_exact(row_pitch)
        .rev()
        .flatten()
        .copied()
        .collect()
}
