//! # Codec Gateway
//!
//! Everything that touches file formats: picking a decoder from the input
//! path, decoding to RGBA8, and encoding RGBA8 to PNG, JPEG or WebP.
//! Extension matching is confined to [`format`].

pub mod decode;
pub mod encode;
pub mod format;

pub use format::{InputKind, OutputFormat};
