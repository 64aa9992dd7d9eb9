//! Bag-of-words vectorization of movie tags
//!
//! The vocabulary is built once from the whole corpus, then every tag is
//! mapped to a sparse term-count vector over it. Both are produced by the same
//! call so a vector can never reference a token outside its vocabulary.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use super::stopwords::is_stop_word;

/// Splits a tag into lowercase tokens
///
/// Boundaries are any character that is not alphanumeric or `_`. Tokens
/// shorter than two characters are dropped, as are stop words.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().count() >= 2)
        .map(str::to_lowercase)
        .filter(|t| !is_stop_word(t))
}

/// Fixed token → index mapping for one corpus
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    /// Token → dimension index, assigned in lexicographic token order
    index: BTreeMap<String, usize>,
}

impl Vocabulary {
    fn from_tokens(tokens: BTreeSet<String>) -> Self {
        let index = tokens
            .into_iter()
            .enumerate()
            .map(|(i, token)| (token, i))
            .collect();
        Self { index }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    /// Tokens in index order
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }
}

/// Sparse term-count vector over a [`Vocabulary`]
///
/// Entries are `(index, count)` pairs sorted by index with non-zero counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentVector {
    entries: Vec<(usize, u32)>,
}

impl DocumentVector {
    pub fn entries(&self) -> &[(usize, u32)] {
        &self.entries
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count at a vocabulary index (zero when absent)
    pub fn count(&self, index: usize) -> u32 {
        self.entries
            .binary_search_by_key(&index, |&(i, _)| i)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0)
    }

    /// Euclidean length
    pub fn norm(&self) -> f64 {
        self.entries
            .iter()
            .map(|&(_, c)| f64::from(c) * f64::from(c))
            .sum::<f64>()
            .sqrt()
    }

    /// Dot product via a merge over both sorted entry lists
    pub fn dot(&self, other: &DocumentVector) -> f64 {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    sum += f64::from(a[i].1) * f64::from(b[j].1);
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Expands to a dense vector of `dimension` counts
    pub fn to_dense(&self, dimension: usize) -> Vec<u32> {
        let mut dense = vec![0; dimension];
        for &(i, c) in &self.entries {
            dense[i] = c;
        }
        dense
    }
}

/// Builds the vocabulary and one count vector per tag, in corpus order
///
/// An empty corpus gives an empty vocabulary and no vectors. An empty tag
/// gives an all-zero vector.
pub fn build<S: AsRef<str>>(corpus_tags: &[S]) -> (Vocabulary, Vec<DocumentVector>) {
    let tokenized: Vec<Vec<String>> = corpus_tags
        .iter()
        .map(|tag| tokenize(tag.as_ref()).collect())
        .collect();

    let vocabulary = Vocabulary::from_tokens(tokenized.iter().flatten().cloned().collect());

    let vectors = tokenized
        .iter()
        .map(|tokens| {
            let mut counts: BTreeMap<usize, u32> = BTreeMap::new();
            for token in tokens {
                if let Some(i) = vocabulary.index_of(token) {
                    *counts.entry(i).or_insert(0) += 1;
                }
            }
            DocumentVector {
                entries: counts.into_iter().collect(),
            }
        })
        .collect();

    (vocabulary, vectors)
}
