//! Prefix-code tree over byte values.
//!
//! The tree is an arena of nodes addressed by index, so deeply skewed trees
//! cost no call-stack depth and nodes need no heap pointers. A well-formed
//! tree is either a single leaf (single-symbol input) or every internal node
//! has exactly two children.

use std::collections::VecDeque;

use stolas_core::{Error, Result};

use crate::MAX_CODE_WIDTH;

/// Number of distinct byte values.
pub const SYMBOL_SPACE: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Node {
    symbol: Option<u8>,
    children: [Option<u32>; 2],
}

impl Node {
    const fn leaf(symbol: u8) -> Self {
        Node {
            symbol: Some(symbol),
            children: [None, None],
        }
    }

    const fn bare() -> Self {
        Node {
            symbol: None,
            children: [None, None],
        }
    }
}

/// Binary prefix-code tree, built from frequencies or rebuilt code by code.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    nodes: Vec<Node>,
    root: Option<u32>,
}

/// Pop the lighter front of the two queues; a leaf wins weight ties.
fn take_lighter(
    leaves: &mut VecDeque<(u64, u32)>,
    merged: &mut VecDeque<(u64, u32)>,
) -> Option<(u64, u32)> {
    match (leaves.front(), merged.front()) {
        (Some(&(lw, _)), Some(&(mw, _))) => {
            if lw <= mw {
                leaves.pop_front()
            } else {
                merged.pop_front()
            }
        }
        (Some(_), None) => leaves.pop_front(),
        (None, _) => merged.pop_front(),
    }
}

impl Tree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree by greedy Huffman construction over byte frequencies.
    ///
    /// Returns `None` if no byte has a nonzero count (empty input).
    ///
    /// Construction is deterministic: leaves enter the queue in ascending
    /// byte order, stably sorted by ascending count, and on equal weight a
    /// leaf is taken before a merged subtree. The first node taken becomes
    /// the zero-branch child.
    pub fn from_frequencies(freq: &[u64; SYMBOL_SPACE]) -> Option<Self> {
        let mut tree = Tree::new();

        let mut leaves: Vec<(u64, u32)> = Vec::new();
        for (byte, &count) in freq.iter().enumerate() {
            if count > 0 {
                let id = tree.push_node(Node::leaf(byte as u8));
                leaves.push((count, id));
            }
        }
        if leaves.is_empty() {
            return None;
        }
        leaves.sort_by_key(|&(count, _)| count);

        let mut leaves: VecDeque<(u64, u32)> = leaves.into();
        let mut merged: VecDeque<(u64, u32)> = VecDeque::new();

        loop {
            let first = take_lighter(&mut leaves, &mut merged)?;
            match take_lighter(&mut leaves, &mut merged) {
                Some(second) => {
                    let id = tree.push_node(Node {
                        symbol: None,
                        children: [Some(first.1), Some(second.1)],
                    });
                    merged.push_back((first.0 + second.0, id));
                }
                None => {
                    tree.root = Some(first.1);
                    return Some(tree);
                }
            }
        }
    }

    fn push_node(&mut self, node: Node) -> u32 {
        let id = self.nodes.len() as u32;
        self.nodes.push(node);
        id
    }

    /// Insert a leaf at the path described by the low `width` bits of `bits`
    /// (most significant bit first), extending internal nodes as needed.
    ///
    /// Used to reconstruct a tree from a deserialized code table without the
    /// original frequencies. A path that routes through or lands on an
    /// already-assigned node means the code set is not prefix-free and
    /// yields a corruption error.
    ///
    /// # Panics
    /// If `width` is zero or exceeds [`MAX_CODE_WIDTH`]; codes of that shape
    /// cannot come from a well-formed table.
    pub fn insert_code(&mut self, symbol: u8, bits: u32, width: u8) -> Result<()> {
        assert!(
            (1..=MAX_CODE_WIDTH).contains(&width),
            "code width {width} outside 1..={MAX_CODE_WIDTH}"
        );

        let mut cur = match self.root {
            Some(id) => id,
            None => {
                let id = self.push_node(Node::bare());
                self.root = Some(id);
                id
            }
        };

        for i in (0..width).rev() {
            if self.nodes[cur as usize].symbol.is_some() {
                return Err(Error::corrupted(format!(
                    "code for symbol {symbol} routes through an assigned leaf"
                )));
            }
            let branch = ((bits >> i) & 1) as usize;
            cur = match self.nodes[cur as usize].children[branch] {
                Some(id) => id,
                None => {
                    let id = self.push_node(Node::bare());
                    self.nodes[cur as usize].children[branch] = Some(id);
                    id
                }
            };
        }

        let node = &mut self.nodes[cur as usize];
        if node.symbol.is_some() || node.children != [None, None] {
            return Err(Error::corrupted(format!(
                "conflicting code for symbol {symbol}: prefix of an existing code"
            )));
        }
        node.symbol = Some(symbol);
        Ok(())
    }

    /// Depth-first traversal, zero branch first, visiting every leaf with its
    /// accumulated path bits and depth.
    ///
    /// The degenerate single-leaf tree emits a defined 1-bit code of 0.
    pub fn walk<F: FnMut(u8, u64, u8)>(&self, mut visit: F) {
        let Some(root) = self.root else { return };
        if let Some(symbol) = self.nodes[root as usize].symbol {
            visit(symbol, 0, 1);
            return;
        }

        let mut stack: Vec<(u32, u64, u8)> = vec![(root, 0, 0)];
        while let Some((id, bits, depth)) = stack.pop() {
            let node = &self.nodes[id as usize];
            if let Some(symbol) = node.symbol {
                visit(symbol, bits, depth);
                continue;
            }
            // push the one-branch first so the zero-branch pops first
            if let Some(right) = node.children[1] {
                stack.push((right, (bits << 1) | 1, depth + 1));
            }
            if let Some(left) = node.children[0] {
                stack.push((left, bits << 1, depth + 1));
            }
        }
    }

    /// Longest root-to-leaf path, measured as emitted code width.
    ///
    /// The single-leaf tree reports 1, matching its defined 1-bit code; an
    /// empty tree reports 0.
    pub fn max_depth(&self) -> u8 {
        let mut max = 0;
        self.walk(|_, _, depth| max = max.max(depth));
        max
    }

    /// Number of nodes in the arena.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}
