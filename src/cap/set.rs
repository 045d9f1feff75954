//! Capability Sets
//!
//! A set of capabilities, independent of any particular kernel version and
//! the width of its capability sets.
//!
//! # Storage
//! ```text
//! ┌────────────────┬────────────────┬────────────────┬─────
//! │    words[0]    │    words[1]    │    words[2]    │ ...
//! │  caps 0..=31   │  caps 32..=63  │  caps 64..=95  │
//! └────────────────┴────────────────┴────────────────┴─────
//! ```
//! Bit 0 of a word is the lowest capability number in that word. The word
//! sequence grows when needed to add a capability but never shrinks on its
//! own: dropping capabilities leaves trailing zero words in place, and
//! equality compares the stored words as they are.

use std::fmt;
use std::str::FromStr;

use super::names::{compare_names, display_name};
use crate::error::{self, Error};
use crate::syscall::abi::CAP_U32S;
use crate::syscall::last_capability;

/// Number of capability bits per stored word.
const WORD_BITS: usize = 32;

/// A set of capabilities, identified by their numbers.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct CapabilitySet {
    words: Vec<u32>,
}

/// Split a capability number into its word index and bit number.
///
/// # Panics
/// Negative capability numbers are a programming error.
#[inline]
fn word_bit(capno: i32) -> (usize, u32) {
    assert!(
        capno >= 0,
        "invalid negative capability bit number {}",
        capno
    );
    let capno = capno as usize;
    (capno / WORD_BITS, (capno % WORD_BITS) as u32)
}

impl CapabilitySet {
    /// Create a new empty set.
    #[inline]
    pub const fn new() -> Self {
        Self { words: Vec::new() }
    }

    /// Create a set with all capabilities supported by the running kernel.
    pub fn all() -> Self {
        Self::all_up_to(last_capability())
    }

    /// Create a set with every capability from 0 up to and including
    /// `last`.
    ///
    /// The set has exactly as many words as needed; bits above `last` in
    /// the highest word stay clear.
    pub fn all_up_to(last: i32) -> Self {
        let (top, bit) = word_bit(last);
        let mut words = vec![u32::MAX; top + 1];
        words[top] = u32::MAX >> (31 - bit);
        Self { words }
    }

    /// Build a set directly from its words, lowest word first.
    pub fn from_words(words: Vec<u32>) -> Self {
        Self { words }
    }

    /// The stored words, lowest word first.
    #[inline]
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Number of stored words.
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if no capability is set, regardless of the stored length.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Add a capability, growing the set as necessary.
    ///
    /// # Panics
    /// If `capno` is negative.
    pub fn add(&mut self, capno: i32) -> &mut Self {
        let (idx, bit) = word_bit(capno);
        if idx >= self.words.len() {
            self.words.resize(idx + 1, 0);
        }
        self.words[idx] |= 1 << bit;
        self
    }

    /// Add several capabilities.
    pub fn add_all<I: IntoIterator<Item = i32>>(&mut self, capnos: I) -> &mut Self {
        for capno in capnos {
            self.add(capno);
        }
        self
    }

    /// Drop a capability.
    ///
    /// Never grows the set: a capability beyond the stored words isn't in
    /// the set anyway. Never shrinks it either.
    ///
    /// # Panics
    /// If `capno` is negative.
    pub fn drop(&mut self, capno: i32) -> &mut Self {
        let (idx, bit) = word_bit(capno);
        if let Some(word) = self.words.get_mut(idx) {
            *word &= !(1 << bit);
        }
        self
    }

    /// Drop several capabilities.
    pub fn drop_all<I: IntoIterator<Item = i32>>(&mut self, capnos: I) -> &mut Self {
        for capno in capnos {
            self.drop(capno);
        }
        self
    }

    /// Check if the set contains a capability.
    ///
    /// # Panics
    /// If `capno` is negative.
    #[inline]
    pub fn has(&self, capno: i32) -> bool {
        let (idx, bit) = word_bit(capno);
        self.words.get(idx).map_or(false, |&w| w & (1 << bit) != 0)
    }

    /// Remove all capabilities, leaving an empty set without any words.
    pub fn clear(&mut self) {
        self.words = Vec::new();
    }

    /// Iterate over the capability numbers in this set, lowest first.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            words: &self.words,
            idx: 0,
            bits: self.words.first().copied().unwrap_or(0),
        }
    }

    /// Names of the capabilities in this set, by increasing number.
    ///
    /// Numbers without a known name show up as `CAP_<number>`.
    pub fn names(&self) -> Vec<String> {
        self.iter().map(|capno| display_name(capno).into_owned()).collect()
    }

    /// Names of the capabilities in this set, sorted lexicographically but
    /// with anonymous `CAP_<number>` names last.
    pub fn sorted_names(&self) -> Vec<String> {
        let mut names = self.names();
        names.sort_by(|a, b| compare_names(a, b));
        names
    }

    /// Hexadecimal representation, most significant word first.
    ///
    /// Always renders at least the words the kernel's capability data
    /// structure holds, even for shorter sets.
    pub fn to_hex(&self) -> String {
        let size = self.words.len().max(CAP_U32S);
        (0..size)
            .rev()
            .map(|idx| format!("{:08x}", self.words.get(idx).copied().unwrap_or(0)))
            .collect()
    }

    /// Parse a hexadecimal representation as produced by [`Self::to_hex`].
    ///
    /// The digit count must be even. Byte strings that aren't a whole
    /// number of words are zero-extended at the most significant end.
    pub fn from_hex(s: &str) -> error::Result<Self> {
        let bytes = hex::decode(s)?;
        let pad = (4 - bytes.len() % 4) % 4;
        let mut padded = vec![0u8; pad];
        padded.extend_from_slice(&bytes);

        let words = padded
            .chunks_exact(4)
            .rev()
            .map(|chunk| u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();
        Ok(Self { words })
    }
}

impl fmt::Display for CapabilitySet {
    /// Names joined by `", "` in plain lexicographic order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = self.names();
        names.sort();
        write!(f, "{}", names.join(", "))
    }
}

impl fmt::Debug for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CapabilitySet")
            .field(&format_args!("{:08x?}", self.words))
            .finish()
    }
}

impl FromStr for CapabilitySet {
    type Err = Error;

    fn from_str(s: &str) -> error::Result<Self> {
        Self::from_hex(s)
    }
}

impl Extend<i32> for CapabilitySet {
    fn extend<I: IntoIterator<Item = i32>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl FromIterator<i32> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        let mut set = Self::new();
        set.add_all(iter);
        set
    }
}

impl<'a> IntoIterator for &'a CapabilitySet {
    type Item = i32;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Iterator over the capability numbers of a [`CapabilitySet`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    words: &'a [u32],
    idx: usize,
    /// Bits of `words[idx]` not yet yielded.
    bits: u32,
}

impl Iterator for Iter<'_> {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        while self.bits == 0 {
            self.idx += 1;
            self.bits = *self.words.get(self.idx)?;
        }
        let bit = self.bits.trailing_zeros() as usize;
        self.bits &= self.bits - 1;
        Some((self.idx * WORD_BITS + bit) as i32)
    }
}
