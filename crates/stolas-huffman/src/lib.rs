//! # Stolas Huffman
//!
//! Variable-width prefix-code compression over byte streams.
//!
//! The compressor counts byte frequencies, builds a Huffman tree, derives a
//! flat code table, and emits a self-describing header followed by the
//! bit-packed payload. The decompressor parses the header back into a table
//! and decodes the payload one bit at a time through a level-indexed lookup
//! map, so no tree walk happens on the hot path.
//!
//! The wire format is self-designed and self-contained; it is not compatible
//! with DEFLATE or any other standard entropy-coding format.
//!
//! ## Example
//!
//! ```
//! let archive = stolas_huffman::compress(b"abracadabra");
//! let original = stolas_huffman::decompress(&archive)?;
//! assert_eq!(original, b"abracadabra");
//! # Ok::<(), stolas_core::Error>(())
//! ```

pub mod bitio;
pub mod codec;
pub mod decode;
pub mod table;
pub mod tree;

pub use bitio::{BitReader, BitWriter};
pub use codec::{compress, decompress, decompress_checked, HuffmanCodec};
pub use decode::DecodeMap;
pub use table::{CodeEntry, CodeTable, WidthClass};
pub use tree::Tree;

/// Widest representable code, in bits.
///
/// Trees deeper than this cannot be expressed by any width class of the
/// header format; the encoder treats exceeding it as an internal error.
pub const MAX_CODE_WIDTH: u8 = 32;
