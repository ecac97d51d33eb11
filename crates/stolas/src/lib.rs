//! # Stolas
//!
//! Prefix-code compression for the Daemoniorum ecosystem.
//!
//! Stolas packs byte streams with canonical variable-width Huffman codes
//! behind a self-describing archive header. The format is self-contained:
//! it is not interchangeable with DEFLATE, Zstandard, or any other standard
//! entropy coder.
//!
//! ## Quick Start
//!
//! ```
//! let archive = stolas::compress(b"Hello, Stolas!");
//! let original = stolas::decompress(&archive)?;
//! assert_eq!(original, b"Hello, Stolas!");
//! # Ok::<(), stolas::Error>(())
//! ```
//!
//! Callers that only need a yes/no on archive integrity can use
//! [`decompress_checked`]; everything else lives on the [`Codec`] trait
//! surface of [`HuffmanCodec`].

pub use stolas_core::{
    Codec, CompressionRatio, CompressionStats, Compressor, Decompressor, Error, Result,
};
pub use stolas_huffman::{
    compress, decompress, decompress_checked, CodeEntry, CodeTable, DecodeMap, HuffmanCodec, Tree,
    WidthClass, MAX_CODE_WIDTH,
};
