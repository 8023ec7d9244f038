//! # tco-rs
//!
//! `tco-rs` is a pure Rust reader for TCO texture cache files. It recovers the cached
//! textures and writes each one out as an uncompressed TGA image.
//!
//! ## Features
//! - Validate the flag, compression and texture headers of a TCO file
//! - Decompress the LZ4 payload
//! - Convert every known pixel layout (BC1-BC5, RGBA8, RG16, R16, R32, R32G8, R24G8, R8)
//!   to 8-bit channels
//! - Dump a whole cache directory on all cores, collecting per-file errors
//!
//! ## Usage
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! tco-rs = "0.1"
//! ```
//!
//! ### Example: Dumping a cache directory
//! ```no_run
//! use tco_rs::dump_config::DumpConfig;
//! use tco_rs::tco_dumper::TcoDumper;
//!
//! let mut config = DumpConfig::new();
//! config.input_dir = "Cache/Textures".into();
//! config.output_dir = "Cache/Textures_OUT".into();
//!
//! let summary = TcoDumper::open(config).unwrap().run();
//! println!("Wrote {} of {} textures", summary.written, summary.discovered);
//! ```
//!
//! ### Example: Decoding a single file in memory
//! ```no_run
//! use tco_rs::decompression::decompress_payload;
//! use tco_rs::pixel_decoder::decode_pixels;
//! use tco_rs::tco_file::ParsedTco;
//!
//! let data = std::fs::read("rock_dif.tco").unwrap();
//! let parsed = ParsedTco::parse(&data).unwrap();
//! let payload = decompress_payload(parsed.compressed, &parsed.compression).unwrap();
//! let texture = decode_pixels(&parsed.descriptor, &payload).unwrap();
//! assert_eq!(texture.pixels.len(), (texture.width * texture.height * texture.channels) as usize);
//! ```
pub mod block_decoder;
pub mod decompression;
pub mod dump_config;
pub mod error;
pub mod error_report;
pub mod ext;
pub mod headers;
pub mod image_writer;
pub mod pixel_decoder;
pub mod pixel_layout;
pub mod tco_dumper;
pub mod tco_file;
