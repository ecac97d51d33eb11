//! Serializable code table derived from a prefix-code tree.
//!
//! The table is the wire-format's description of the code: one entry per
//! symbol carrying the code bits and their width. A width class picks the
//! narrowest fixed-size representation (8, 16, or 32 bits) that holds the
//! deepest code, so shallow tables stay compact.
//!
//! Header layout:
//!
//! ```text
//! [class: 1][symbol_count: 2 LE]
//! repeat: [symbol: 1][width: 1][bits: 1|2|4 LE]
//! ```

use stolas_core::{Error, Result};

use crate::decode::DecodeMap;
use crate::tree::{Tree, SYMBOL_SPACE};
use crate::MAX_CODE_WIDTH;

/// Fixed-width storage class for serialized code bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidthClass {
    /// Codes up to 8 bits, one byte each.
    #[default]
    B8,
    /// Codes up to 16 bits, two bytes each.
    B16,
    /// Codes up to 32 bits, four bytes each.
    B32,
}

impl WidthClass {
    /// Narrowest class that holds codes of the given depth.
    /// The caller guarantees `max_depth <= MAX_CODE_WIDTH`.
    pub fn for_depth(max_depth: u8) -> Self {
        match max_depth {
            0..=8 => WidthClass::B8,
            9..=16 => WidthClass::B16,
            _ => WidthClass::B32,
        }
    }

    /// Widest code this class can hold, in bits.
    pub fn bits(self) -> u8 {
        match self {
            WidthClass::B8 => 8,
            WidthClass::B16 => 16,
            WidthClass::B32 => 32,
        }
    }

    /// Serialized size of one code, in bytes.
    pub fn code_bytes(self) -> usize {
        match self {
            WidthClass::B8 => 1,
            WidthClass::B16 => 2,
            WidthClass::B32 => 4,
        }
    }

    /// Wire tag for the header.
    pub fn tag(self) -> u8 {
        match self {
            WidthClass::B8 => 0,
            WidthClass::B16 => 1,
            WidthClass::B32 => 2,
        }
    }

    /// Inverse of [`WidthClass::tag`].
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(WidthClass::B8),
            1 => Some(WidthClass::B16),
            2 => Some(WidthClass::B32),
            _ => None,
        }
    }
}

/// One symbol's code: `width` significant low bits of `bits`, MSB first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeEntry {
    /// The byte value this code stands for.
    pub symbol: u8,
    /// Code bits, left-padded into the low end.
    pub bits: u32,
    /// Code length in bits.
    pub width: u8,
}

/// Flat symbol-to-code mapping with a serializable header form.
#[derive(Debug, Clone)]
pub struct CodeTable {
    entries: Vec<CodeEntry>,
    lookup: Box<[Option<(u32, u8)>; SYMBOL_SPACE]>,
    class: WidthClass,
    max_width: u8,
}

impl Default for CodeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for CodeTable {
    fn eq(&self, other: &Self) -> bool {
        // lookup is derived from entries
        self.entries == other.entries
            && self.class == other.class
            && self.max_width == other.max_width
    }
}

impl CodeTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            lookup: Box::new([None; SYMBOL_SPACE]),
            class: WidthClass::default(),
            max_width: 0,
        }
    }

    /// Append a symbol's code.
    ///
    /// # Panics
    /// If `width` is outside `1..=MAX_CODE_WIDTH` or the symbol already has
    /// a code; both indicate a broken builder, not bad input.
    pub fn push(&mut self, symbol: u8, bits: u32, width: u8) {
        assert!(
            (1..=MAX_CODE_WIDTH).contains(&width),
            "code width {width} outside 1..={MAX_CODE_WIDTH}"
        );
        assert!(
            self.lookup[symbol as usize].is_none(),
            "symbol {symbol} already has a code"
        );
        self.entries.push(CodeEntry {
            symbol,
            bits,
            width,
        });
        self.lookup[symbol as usize] = Some((bits, width));
    }

    /// Fix the width class from the tree's maximum depth. Must be called
    /// after all codes are pushed and before [`CodeTable::header_bytes`].
    ///
    /// # Panics
    /// If `max_depth` exceeds [`MAX_CODE_WIDTH`]; no width class can
    /// represent such a code.
    pub fn finalize(&mut self, max_depth: u8) {
        assert!(
            max_depth <= MAX_CODE_WIDTH,
            "max code width {max_depth} exceeds representable limit {MAX_CODE_WIDTH}"
        );
        self.max_width = max_depth;
        self.class = WidthClass::for_depth(max_depth);
    }

    /// Look up the code for a byte.
    #[inline]
    pub fn code_for(&self, symbol: u8) -> Option<(u32, u8)> {
        self.lookup[symbol as usize]
    }

    /// All entries in insertion (traversal) order.
    pub fn entries(&self) -> &[CodeEntry] {
        &self.entries
    }

    /// Number of symbols with codes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no codes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Active width class.
    pub fn class(&self) -> WidthClass {
        self.class
    }

    /// Widest code in the table, in bits.
    pub fn max_width(&self) -> u8 {
        self.max_width
    }

    /// Serialize the table to its self-describing header form.
    pub fn header_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(3 + self.entries.len() * (2 + self.class.code_bytes()));
        out.push(self.class.tag());
        out.extend_from_slice(&(self.entries.len() as u16).to_le_bytes());
        for entry in &self.entries {
            out.push(entry.symbol);
            out.push(entry.width);
            match self.class {
                WidthClass::B8 => out.push(entry.bits as u8),
                WidthClass::B16 => out.extend_from_slice(&(entry.bits as u16).to_le_bytes()),
                WidthClass::B32 => out.extend_from_slice(&entry.bits.to_le_bytes()),
            }
        }
        out
    }

    /// Parse a header produced by [`CodeTable::header_bytes`].
    ///
    /// Returns the table and the number of bytes consumed. Every malformed
    /// shape - unknown class tag, truncation, out-of-range widths, duplicate
    /// symbols, or a code set that is not prefix-free - is reported as
    /// corrupted data, never a panic.
    pub fn parse(data: &[u8]) -> Result<(CodeTable, usize)> {
        if data.len() < 3 {
            return Err(Error::corrupted_at("code table header truncated", data.len()));
        }
        let class = WidthClass::from_tag(data[0])
            .ok_or_else(|| Error::corrupted(format!("unknown width class tag {}", data[0])))?;
        let count = u16::from_le_bytes([data[1], data[2]]) as usize;
        if count > SYMBOL_SPACE {
            return Err(Error::corrupted(format!(
                "symbol count {count} exceeds alphabet size {SYMBOL_SPACE}"
            )));
        }

        let entry_len = 2 + class.code_bytes();
        let header_len = 3 + count * entry_len;
        if data.len() < header_len {
            return Err(Error::corrupted_at("code table truncated", data.len()));
        }

        let mut table = CodeTable::new();
        let mut kraft = 0u64;
        for chunk in data[3..header_len].chunks_exact(entry_len) {
            let symbol = chunk[0];
            let width = chunk[1];
            if width == 0 || width > class.bits() {
                return Err(Error::corrupted(format!(
                    "code width {width} invalid for the {}-bit class",
                    class.bits()
                )));
            }
            let bits = match class {
                WidthClass::B8 => u32::from(chunk[2]),
                WidthClass::B16 => u32::from(u16::from_le_bytes([chunk[2], chunk[3]])),
                WidthClass::B32 => u32::from_le_bytes([chunk[2], chunk[3], chunk[4], chunk[5]]),
            };
            if width < MAX_CODE_WIDTH && (bits >> width) != 0 {
                return Err(Error::corrupted(format!(
                    "code bits for symbol {symbol} wider than declared width {width}"
                )));
            }
            if table.code_for(symbol).is_some() {
                return Err(Error::corrupted(format!(
                    "duplicate symbol {symbol} in code table"
                )));
            }
            kraft += 1u64 << (MAX_CODE_WIDTH - width);
            table.push(symbol, bits, width);
        }

        let max_width = table.entries.iter().map(|e| e.width).max().unwrap_or(0);
        if WidthClass::for_depth(max_width) != class {
            return Err(Error::corrupted(format!(
                "width class {}-bit inconsistent with deepest code of {max_width} bits",
                class.bits()
            )));
        }
        if count > 1 && kraft != 1u64 << MAX_CODE_WIDTH {
            return Err(Error::corrupted("code set is not a complete prefix code"));
        }
        // full prefix-freeness: the codes must assemble back into a tree
        table.rebuild_tree()?;

        table.class = class;
        table.max_width = max_width;
        Ok((table, header_len))
    }

    /// Reconstruct the prefix-code tree from the table alone.
    ///
    /// Fails with a corruption error if any code is a prefix of another.
    pub fn rebuild_tree(&self) -> Result<Tree> {
        let mut tree = Tree::new();
        for entry in &self.entries {
            tree.insert_code(entry.symbol, entry.bits, entry.width)?;
        }
        Ok(tree)
    }

    /// Build the per-bit decoding map. Returns `None` for an empty table.
    pub fn decode_map(&self) -> Option<DecodeMap> {
        if self.is_empty() {
            None
        } else {
            Some(DecodeMap::from_table(self))
        }
    }
}
