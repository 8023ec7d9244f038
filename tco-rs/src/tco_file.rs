use crate::decompression::decompress_payload;
use crate::error::TcoError;
use crate::error_report::ErrorReport;
use crate::ext::binary_cursor::{BinaryCursor, ReadStruct};
use crate::headers::{CompressionHeader, ContainerFlagHeader, TextureDescriptor};
use crate::image_writer::{write_tga, OUTPUT_EXTENSION};
use crate::pixel_decoder::decode_pixels;
use std::fs;
use std::path::{Path, PathBuf};

/// The headers of a TCO file and the compressed bytes that follow them.
#[derive(Debug, Clone, Copy)]
pub struct ParsedTco<'a> {
    pub compression: CompressionHeader,
    pub descriptor: TextureDescriptor,
    /// Everything after the texture descriptor.
    pub compressed: &'a [u8],
}

impl<'a> ParsedTco<'a> {
    /// Validates and parses the headers of an in-memory TCO file.
    pub fn parse(data: &'a [u8]) -> Result<Self, TcoError> {
        if data.len() < TextureDescriptor::SIZE {
            return Err(TcoError::MalformedHeader(
                "File is incomplete or malformed".to_string(),
            ));
        }

        let mut cursor = BinaryCursor::new(data);

        cursor
            .peek_struct::<ContainerFlagHeader>()
            .map_err(|e| context("Failed to read base header", e))?
            .validate()?;

        let compression = cursor
            .read_struct::<CompressionHeader>()
            .map_err(|e| context("Failed to read compressed data header", e))?;
        log::info!(
            "File is COMPRESSED: compressedSize: {}, decompressedSize: {}, dataHeaderSize: {}",
            compression.compressed_size,
            compression.decompressed_size,
            compression.data_header_size
        );
        compression.validate()?;

        let descriptor = cursor
            .read_struct::<TextureDescriptor>()
            .map_err(|e| context("Failed to read TCO header", e))?;
        log::info!(
            "TCO header: width: {}, height: {}, layout: {}, numMips: {}, flipV: {}",
            descriptor.width,
            descriptor.height,
            descriptor.layout,
            descriptor.num_mips,
            descriptor.flip_v
        );

        Ok(Self {
            compression,
            descriptor,
            compressed: cursor.remaining(),
        })
    }
}

fn context(stage: &str, error: TcoError) -> TcoError {
    match error {
        TcoError::Truncated(detail) => TcoError::Truncated(format!("{stage}: {detail}")),
        other => other,
    }
}

/// A single cache file on disk and the pipeline that turns it into an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcoFile {
    path: PathBuf,
    file_name: String,
}

impl TcoFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, file_name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The file name without its directory, used in every report about this file.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns where the image for this file is written: the full file name with the
    /// image extension appended.
    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(format!("{}.{OUTPUT_EXTENSION}", self.file_name))
    }

    /// Runs the pipeline, recording any failure in `report`.
    ///
    /// Returns whether an image was written.
    pub fn process(&self, output_dir: &Path, report: &ErrorReport) -> bool {
        match self.dump(output_dir) {
            Ok(written) => written.is_some(),
            Err(err) => {
                report.record(&self.file_name, err);
                false
            }
        }
    }

    /// Reads, decodes and writes this file.
    ///
    /// Returns the written image path, or `None` when the file is empty and was skipped.
    pub fn dump(&self, output_dir: &Path) -> Result<Option<PathBuf>, TcoError> {
        log::info!("Reading TCO file '{}'", self.file_name);

        let data = fs::read(&self.path)?;
        if data.is_empty() {
            log::warn!("Skipping empty TCO file '{}'", self.file_name);
            return Ok(None);
        }

        let parsed = ParsedTco::parse(&data)?;
        let payload = decompress_payload(parsed.compressed, &parsed.compression)?;
        let texture = decode_pixels(&parsed.descriptor, &payload)?;

        // Stored rows run bottom to top unless flipV is set.
        let output = self.output_path(output_dir);
        write_tga(&output, &texture, !parsed.descriptor.flip_v)?;
        log::info!("Wrote output file '{}'", output.display());

        Ok(Some(output))
    }
}
