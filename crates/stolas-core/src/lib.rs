//! # Stolas Core
//!
//! Core traits, types, and error handling for the Stolas compression library.
//!
//! Stolas is named after the 36th demon of the Ars Goetia, a teacher of
//! astronomy and the virtues of precious stones - fitting for a library whose
//! business is knowing the worth of every symbol.
//!
//! ## Core Traits
//!
//! - [`Compressor`] - One-shot compression operations
//! - [`Decompressor`] - One-shot decompression operations
//! - [`Codec`] - Combined compress/decompress capability
//!
//! ## Example
//!
//! ```ignore
//! use stolas_core::Codec;
//! use stolas_huffman::HuffmanCodec;
//!
//! let codec = HuffmanCodec::new();
//! let compressed = codec.compress(data)?;
//! let original = codec.decompress(&compressed)?;
//! ```

pub mod error;
pub mod stats;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use stats::CompressionStats;
pub use traits::{Codec, Compressor, Decompressor};
pub use types::CompressionRatio;
