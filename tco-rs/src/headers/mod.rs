//! Fixed-layout headers found at the start of every TCO file.
//!
//! A TCO file is laid out as a [`CompressionHeader`] followed by a [`TextureDescriptor`] and
//! the compressed pixel payload. Both headers start with the same 32-bit flag, which is
//! modelled on its own by [`ContainerFlagHeader`] so it can be checked before anything else.
pub mod compression_header;
pub mod container_flag_header;
pub mod texture_descriptor;

pub use compression_header::CompressionHeader;
pub use container_flag_header::ContainerFlagHeader;
pub use texture_descriptor::TextureDescriptor;
