//! One-shot prefix-code compression and decompression.
//!
//! Archive layout: code-table header, then the original byte count as a
//! little-endian `u64`, then the MSB-first bit-packed payload padded to a
//! byte. Any byte string compresses - empty and single-symbol inputs
//! included - while decompression validates everything it reads and reports
//! corrupt archives as errors, never panics.

use stolas_core::{Codec, Compressor, Decompressor, Error, Result};
use tracing::debug;

use crate::bitio::{BitReader, BitWriter};
use crate::table::CodeTable;
use crate::tree::{Tree, SYMBOL_SPACE};

/// Size of the original-length field between header and payload.
const LEN_FIELD: usize = 8;

/// Worst-case header footprint: class tag, symbol count, and a full
/// 256-symbol table in the 32-bit class, plus the length field.
const MAX_OVERHEAD: usize = 3 + SYMBOL_SPACE * 6 + LEN_FIELD;

/// Prefix-code codec over in-memory byte buffers.
///
/// Stateless: every operation derives what it needs from its input, so a
/// single value can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffmanCodec;

impl HuffmanCodec {
    /// Create a new codec.
    pub fn new() -> Self {
        Self
    }
}

impl Compressor for HuffmanCodec {
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        Ok(compress(input))
    }

    fn compress_to(&self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        let compressed = compress(input);
        if compressed.len() > output.len() {
            return Err(Error::buffer_too_small(compressed.len(), output.len()));
        }
        output[..compressed.len()].copy_from_slice(&compressed);
        Ok(compressed.len())
    }

    fn max_compressed_size(&self, input_len: usize) -> usize {
        // worst case: every byte carries a maximum-width code
        MAX_OVERHEAD + input_len * 4
    }
}

impl Decompressor for HuffmanCodec {
    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        decompress(input)
    }

    fn decompress_to(&self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        let decompressed = decompress(input)?;
        if decompressed.len() > output.len() {
            return Err(Error::buffer_too_small(decompressed.len(), output.len()));
        }
        output[..decompressed.len()].copy_from_slice(&decompressed);
        Ok(decompressed.len())
    }
}

impl Codec for HuffmanCodec {
    fn new() -> Self {
        HuffmanCodec::new()
    }
}

/// Compress a byte string into a self-contained archive.
///
/// There is no failure path: every input, including the empty string, has a
/// well-defined archive.
pub fn compress(input: &[u8]) -> Vec<u8> {
    let mut freq = [0u64; SYMBOL_SPACE];
    for &byte in input {
        freq[byte as usize] += 1;
    }

    let mut table = CodeTable::new();
    match Tree::from_frequencies(&freq) {
        Some(tree) => {
            tree.walk(|symbol, bits, width| table.push(symbol, bits as u32, width));
            table.finalize(tree.max_depth());
        }
        None => table.finalize(0),
    }

    let mut writer = BitWriter::with_capacity(input.len() / 2 + 1);
    for &byte in input {
        if let Some((bits, width)) = table.code_for(byte) {
            writer.write_bits(bits, width);
        }
    }
    let payload = writer.finish();

    debug!(
        symbols = table.len(),
        class = ?table.class(),
        original = input.len(),
        payload = payload.len(),
        "compressed"
    );

    let header = table.header_bytes();
    let mut out = Vec::with_capacity(header.len() + LEN_FIELD + payload.len());
    out.extend_from_slice(&header);
    out.extend_from_slice(&(input.len() as u64).to_le_bytes());
    out.extend_from_slice(&payload);
    out
}

/// Decompress an archive produced by [`compress`].
///
/// Malformed headers and undecodable bitstreams are reported as corrupted
/// data; the failure is local and nothing is retried.
pub fn decompress(input: &[u8]) -> Result<Vec<u8>> {
    let (table, header_len) = CodeTable::parse(input)?;

    if input.len() < header_len + LEN_FIELD {
        return Err(Error::corrupted_at(
            "missing original-length field",
            input.len(),
        ));
    }
    let mut len_bytes = [0u8; LEN_FIELD];
    len_bytes.copy_from_slice(&input[header_len..header_len + LEN_FIELD]);
    let original_len = usize::try_from(u64::from_le_bytes(len_bytes))
        .map_err(|_| Error::corrupted("declared length exceeds addressable memory"))?;

    if original_len == 0 {
        return Ok(Vec::new());
    }
    let Some(mut map) = table.decode_map() else {
        return Err(Error::corrupted(
            "empty code table with nonzero declared length",
        ));
    };

    let mut reader = BitReader::new(&input[header_len + LEN_FIELD..]);
    // every symbol costs at least one bit, so the payload bounds the count
    if original_len > reader.bits_remaining() {
        return Err(Error::corrupted(
            "declared length exceeds payload capacity",
        ));
    }

    let mut out = Vec::with_capacity(original_len);
    while out.len() < original_len {
        map.push_bit(reader.read_bit()?);
        if let Some(symbol) = map.symbol() {
            out.push(symbol);
            map.reset();
        } else if map.is_exhausted() {
            return Err(Error::corrupted("bit pattern matches no code"));
        }
    }

    debug!(original = out.len(), archive = input.len(), "decompressed");
    Ok(out)
}

/// Decompress, flattening every failure to `None`.
///
/// Convenience for callers that only care whether the archive was intact.
pub fn decompress_checked(input: &[u8]) -> Option<Vec<u8>> {
    decompress(input).ok()
}
