//! Symbol <-> code tables.
//!
//! A [`CodeTable`] is derived from a [`HuffmanTree`] by walking it depth
//! first: a step to the left child appends `0`, a step to the right child
//! appends `1`, and each leaf receives the bits accumulated on its path.
//! A tree that is a single leaf gives its symbol the one-bit code `0`.
//!
//! The reverse direction (code -> symbol) is a binary trie built from the
//! codes. Building the trie is also where a table is validated: a duplicate
//! code or a code that prefixes another is rejected, whether the codes came
//! from a fresh tree or from storage.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use log::debug;

use crate::code::Code;
use crate::error::{CodeTableError, Result};
use crate::tree::{HuffmanTree, Node};

/// Index of the trie root.
pub(crate) const TRIE_ROOT: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrieNode {
    /// Children for bit 0 and bit 1
    Branch([Option<usize>; 2]),
    /// End of a code; index into `CodeTable::entries`
    Leaf(usize),
}

/// Where one decode step lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TrieStep {
    /// Inside a code; continue from this trie node
    Branch(usize),
    /// A complete code for `entries[index]`
    Symbol(usize),
}

/// Bijective mapping between symbols and prefix-free codes.
///
/// Immutable once built. Encoders and decoders only borrow it, so one table
/// can serve any number of threads at once.
#[derive(Debug, Clone)]
pub struct CodeTable<S> {
    /// (symbol, code) pairs sorted by code
    entries: Vec<(S, Code)>,
    /// symbol -> position in `entries`
    index: HashMap<S, usize>,
    trie: Vec<TrieNode>,
}

impl<S> CodeTable<S>
where
    S: Clone + Eq + Hash + Debug,
{
    /// Build a tree from `(frequency, symbol)` pairs and derive its codes.
    pub fn from_frequencies<I>(frequencies: I) -> Result<Self>
    where
        I: IntoIterator<Item = (f64, S)>,
    {
        Self::from_tree(&HuffmanTree::build(frequencies)?)
    }

    /// Derive codes by walking `tree`.
    ///
    /// The walk is iterative, so very deep trees are fine.
    pub fn from_tree(tree: &HuffmanTree<S>) -> Result<Self> {
        let mut entries = Vec::with_capacity(tree.len());

        match tree.at(tree.root()) {
            Node::Leaf { symbol, .. } => entries.push((symbol.clone(), Code::from_bits([false]))),
            Node::Internal { .. } => {
                let mut stack = vec![(tree.root(), Code::new())];
                while let Some((id, prefix)) = stack.pop() {
                    match tree.at(id) {
                        Node::Leaf { symbol, .. } => entries.push((symbol.clone(), prefix)),
                        Node::Internal { left, right, .. } => {
                            stack.push((*right, prefix.with_bit(true)));
                            stack.push((*left, prefix.with_bit(false)));
                        }
                    }
                }
            }
        }

        Self::from_codes(entries)
    }

    /// Build a table from explicit `(symbol, code)` pairs, e.g. ones loaded
    /// from storage.
    ///
    /// # Errors
    /// `CodeTableError` if the table is empty, a code is empty, a symbol or
    /// code repeats, or one code is a prefix of another.
    pub fn from_codes<I>(codes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Code)>,
    {
        let mut entries: Vec<(S, Code)> = codes.into_iter().collect();
        if entries.is_empty() {
            return Err(CodeTableError::Empty.into());
        }
        entries.sort_by(|a, b| a.1.cmp(&b.1));

        let mut index = HashMap::with_capacity(entries.len());
        let mut trie = vec![TrieNode::Branch([None, None])];

        for (position, (symbol, code)) in entries.iter().enumerate() {
            if code.is_empty() {
                return Err(CodeTableError::EmptyCode {
                    symbol: format!("{symbol:?}"),
                }
                .into());
            }
            if index.insert(symbol.clone(), position).is_some() {
                return Err(CodeTableError::DuplicateSymbol {
                    symbol: format!("{symbol:?}"),
                }
                .into());
            }
            insert_code(&mut trie, &entries, position)?;
        }

        let table = Self {
            entries,
            index,
            trie,
        };
        debug!(
            "code table ready: {} symbols, code lengths {}..={}",
            table.len(),
            table.min_code_len(),
            table.max_code_len()
        );
        Ok(table)
    }

    /// Code assigned to `symbol`.
    pub fn code(&self, symbol: &S) -> Option<&Code> {
        self.index.get(symbol).map(|&i| &self.entries[i].1)
    }

    pub fn contains(&self, symbol: &S) -> bool {
        self.index.contains_key(symbol)
    }

    /// Weighted mean code length in bits per symbol.
    ///
    /// Symbols missing from the table are ignored. Returns `None` when the
    /// remaining total weight is zero.
    pub fn weighted_average_len<'a, I>(&self, frequencies: I) -> Option<f64>
    where
        I: IntoIterator<Item = &'a (f64, S)>,
        S: 'a,
    {
        let (bits, total) = frequencies
            .into_iter()
            .filter_map(|(f, s)| self.code(s).map(|c| (*f, c.len())))
            .fold((0.0, 0.0), |(bits, total), (f, len)| {
                (bits + f * len as f64, total + f)
            });
        (total > 0.0).then(|| bits / total)
    }
}

impl<S> CodeTable<S> {
    /// Symbol whose code is exactly `code`.
    pub fn symbol(&self, code: &Code) -> Option<&S> {
        let mut at = TRIE_ROOT;
        for bit in code.bits().iter().by_vals() {
            match self.step(at, bit)? {
                TrieStep::Branch(next) => at = next,
                TrieStep::Symbol(i) => {
                    let (symbol, found) = &self.entries[i];
                    return (found.len() == code.len()).then_some(symbol);
                }
            }
        }
        None
    }

    /// Entries in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, &Code)> {
        self.entries.iter().map(|(s, c)| (s, c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_code_len(&self) -> usize {
        self.entries.iter().map(|(_, c)| c.len()).max().unwrap_or(0)
    }

    pub fn min_code_len(&self) -> usize {
        self.entries.iter().map(|(_, c)| c.len()).min().unwrap_or(0)
    }

    /// True if every bit string eventually decodes, i.e. the Kraft sum is 1.
    ///
    /// Tables derived from a tree with two or more symbols are complete. A
    /// single-symbol table, or a partial table loaded from storage, is not.
    pub fn is_complete(&self) -> bool {
        self.trie.iter().all(|node| match node {
            TrieNode::Branch(children) => children.iter().all(Option::is_some),
            TrieNode::Leaf(_) => true,
        })
    }

    /// Follow one bit from trie node `at`. `None` means no code continues
    /// with that bit.
    pub(crate) fn step(&self, at: usize, bit: bool) -> Option<TrieStep> {
        let TrieNode::Branch(children) = self.trie[at] else {
            return None;
        };
        let next = children[usize::from(bit)]?;
        Some(match self.trie[next] {
            TrieNode::Branch(_) => TrieStep::Branch(next),
            TrieNode::Leaf(i) => TrieStep::Symbol(i),
        })
    }

    pub(crate) fn entry_symbol(&self, index: usize) -> &S {
        &self.entries[index].0
    }
}

/// Add `entries[position]`'s code to the trie, rejecting collisions.
fn insert_code<S>(trie: &mut Vec<TrieNode>, entries: &[(S, Code)], position: usize) -> Result<()> {
    let code = &entries[position].1;
    let last = code.len() - 1;
    let mut at = TRIE_ROOT;

    for (depth, bit) in code.bits().iter().by_vals().enumerate() {
        let slot = usize::from(bit);
        let TrieNode::Branch(children) = trie[at] else {
            unreachable!("descent only continues through branches");
        };

        match children[slot] {
            None => {
                let node = if depth == last {
                    TrieNode::Leaf(position)
                } else {
                    TrieNode::Branch([None, None])
                };
                trie.push(node);
                let new_index = trie.len() - 1;
                if let TrieNode::Branch(children) = &mut trie[at] {
                    children[slot] = Some(new_index);
                }
                at = new_index;
            }
            Some(next) => match trie[next] {
                TrieNode::Leaf(_) if depth == last => {
                    return Err(CodeTableError::DuplicateCode {
                        code: code.to_string(),
                    }
                    .into());
                }
                TrieNode::Leaf(other) => {
                    return Err(CodeTableError::PrefixConflict {
                        prefix: entries[other].1.to_string(),
                        code: code.to_string(),
                    }
                    .into());
                }
                TrieNode::Branch(_) if depth == last => {
                    return Err(CodeTableError::PrefixConflict {
                        prefix: code.to_string(),
                        code: first_code_below(trie, entries, next),
                    }
                    .into());
                }
                TrieNode::Branch(_) => at = next,
            },
        }
    }

    Ok(())
}

/// Any code stored at or below trie node `at`, for error messages.
fn first_code_below<S>(trie: &[TrieNode], entries: &[(S, Code)], mut at: usize) -> String {
    loop {
        match trie[at] {
            TrieNode::Leaf(i) => return entries[i].1.to_string(),
            TrieNode::Branch([Some(next), _]) | TrieNode::Branch([None, Some(next)]) => at = next,
            TrieNode::Branch([None, None]) => return String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn code(s: &str) -> Code {
        s.parse().unwrap()
    }

    #[test]
    fn test_derive_small_table() {
        // b and c merge first; a ties with their merge and, being older, goes left
        let table =
            CodeTable::from_frequencies(vec![(2.0, 'a'), (1.0, 'b'), (1.0, 'c'), (5.0, 'd')])
                .unwrap();

        assert_eq!(table.len(), 4);
        assert_eq!(table.code(&'d'), Some(&code("1")));
        assert_eq!(table.code(&'a'), Some(&code("00")));
        assert_eq!(table.code(&'b'), Some(&code("010")));
        assert_eq!(table.code(&'c'), Some(&code("011")));
        assert!(table.is_complete());
    }

    #[test]
    fn test_single_symbol_gets_one_bit() {
        let table = CodeTable::from_frequencies(vec![(1.0, "solo")]).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.code(&"solo"), Some(&code("0")));
        assert_eq!(table.symbol(&code("0")), Some(&"solo"));
        assert_eq!(table.symbol(&code("1")), None);
        assert!(!table.is_complete());
    }

    #[test]
    fn test_reverse_lookup() {
        let table = CodeTable::from_codes(vec![
            ('x', code("0")),
            ('y', code("10")),
            ('z', code("11")),
        ])
        .unwrap();

        assert_eq!(table.symbol(&code("10")), Some(&'y'));
        assert_eq!(table.symbol(&code("1")), None);
        assert_eq!(table.symbol(&code("110")), None);
        assert_eq!(table.symbol(&code("00")), None);
    }

    #[test]
    fn test_iter_in_code_order() {
        let table = CodeTable::from_codes(vec![
            ('z', code("11")),
            ('x', code("0")),
            ('y', code("10")),
        ])
        .unwrap();

        let symbols: Vec<char> = table.iter().map(|(s, _)| *s).collect();
        assert_eq!(symbols, vec!['x', 'y', 'z']);
        assert_eq!(table.min_code_len(), 1);
        assert_eq!(table.max_code_len(), 2);
    }

    #[test]
    fn test_rejects_empty() {
        let result = CodeTable::<char>::from_codes(Vec::new());
        assert!(matches!(result, Err(Error::CodeTable(CodeTableError::Empty))));
    }

    #[test]
    fn test_rejects_empty_code() {
        let result = CodeTable::from_codes(vec![('a', Code::new()), ('b', code("1"))]);
        assert!(matches!(
            result,
            Err(Error::CodeTable(CodeTableError::EmptyCode { .. }))
        ));
    }

    #[test]
    fn test_rejects_duplicate_code() {
        let result = CodeTable::from_codes(vec![('a', code("01")), ('b', code("01"))]);
        match result {
            Err(Error::CodeTable(CodeTableError::DuplicateCode { code })) => {
                assert_eq!(code, "01");
            }
            other => panic!("expected duplicate code, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_duplicate_symbol() {
        let result = CodeTable::from_codes(vec![('a', code("0")), ('a', code("1"))]);
        assert!(matches!(
            result,
            Err(Error::CodeTable(CodeTableError::DuplicateSymbol { .. }))
        ));
    }

    #[test]
    fn test_rejects_prefix_conflict_either_order() {
        // shorter code sorts first, so the longer one hits a leaf on the way down
        let result = CodeTable::from_codes(vec![('a', code("0110")), ('b', code("01"))]);
        match result {
            Err(Error::CodeTable(CodeTableError::PrefixConflict { prefix, code })) => {
                assert_eq!(prefix, "01");
                assert_eq!(code, "0110");
            }
            other => panic!("expected prefix conflict, got {other:?}"),
        }

        let result = CodeTable::from_codes(vec![('a', code("0")), ('b', code("00"))]);
        assert!(matches!(
            result,
            Err(Error::CodeTable(CodeTableError::PrefixConflict { .. }))
        ));
    }

    #[test]
    fn test_weighted_average_len() {
        let freqs = vec![(2.0, 'a'), (1.0, 'b'), (1.0, 'c'), (5.0, 'd')];
        let table = CodeTable::from_frequencies(freqs.clone()).unwrap();

        // (2*2 + 1*3 + 1*3 + 5*1) / 9
        let avg = table.weighted_average_len(&freqs).unwrap();
        assert!((avg - 15.0 / 9.0).abs() < 1e-12);

        assert_eq!(table.weighted_average_len(&[(0.0, 'a')]), None);
    }

    #[test]
    fn test_deep_tree_derivation() {
        let freqs: Vec<(f64, u16)> = (0..40).map(|i| (1.5f64.powi(i) + i as f64, i as u16)).collect();
        let table = CodeTable::from_frequencies(freqs).unwrap();
        assert_eq!(table.len(), 40);
        assert!(table.is_complete());
    }
}
