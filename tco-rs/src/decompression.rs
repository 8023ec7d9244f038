use crate::error::TcoError;
use crate::headers::CompressionHeader;

/// Decompresses the LZ4 block that follows the headers.
///
/// `data` is everything after the texture descriptor. Only the first `compressed_size`
/// bytes are handed to the decompressor, and the result must fill exactly
/// `decompressed_size` bytes.
pub fn decompress_payload(data: &[u8], header: &CompressionHeader) -> Result<Vec<u8>, TcoError> {
    let compressed_size = header.compressed_size as usize;
    let decompressed_size = header.decompressed_size as usize;

    let compressed = data.get(..compressed_size).ok_or_else(|| {
        TcoError::Truncated(format!(
            "compressedSize is {compressed_size} but only {} bytes remain",
            data.len()
        ))
    })?;

    let mut decompressed = vec![0u8; decompressed_size];
    let written = lz4_flex::block::decompress_into(compressed, &mut decompressed)
        .map_err(|e| TcoError::DecompressionFailed(format!("Failed to decompress file data: {e}")))?;

    if written == 0 || written < decompressed_size {
        return Err(TcoError::DecompressionFailed(format!(
            "Failed to decompress file data: expected {decompressed_size} bytes, got {written}"
        )));
    }
    Ok(decompressed)
}
