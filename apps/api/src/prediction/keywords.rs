#![allow(dead_code)]

//! Keyword trie for counting job-description keyword hits in long text.

use std::collections::HashMap;

/// Keywords this short or shorter are not indexed.
const MIN_KEYWORD_CHARS: usize = 2;

pub const DEFAULT_CHUNK_CHARS: usize = 1000;

#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<char, TrieNode>,
    terminal: bool,
}

/// Case-insensitive prefix trie over a keyword list.
#[derive(Debug, Default)]
pub struct KeywordTrie {
    root: TrieNode,
    len: usize,
}

impl KeywordTrie {
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Self {
        let mut trie = Self::default();
        for keyword in keywords {
            let keyword = keyword.as_ref();
            if keyword.chars().count() > MIN_KEYWORD_CHARS {
                trie.insert(keyword);
            }
        }
        trie
    }

    fn insert(&mut self, keyword: &str) {
        let mut node = &mut self.root;
        for c in keyword.to_lowercase().chars() {
            node = node.children.entry(c).or_default();
        }
        if !node.terminal {
            node.terminal = true;
            self.len += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of start positions in `text` at which some keyword begins.
    /// Each position counts once, on its shortest matching keyword.
    pub fn count_matches(&self, text: &str) -> usize {
        let chars: Vec<char> = text.to_lowercase().chars().collect();
        (0..chars.len())
            .filter(|&start| self.matches_at(&chars[start..]))
            .count()
    }

    fn matches_at(&self, chars: &[char]) -> bool {
        let mut node = &self.root;
        for c in chars {
            match node.children.get(c) {
                Some(next) => node = next,
                None => return false,
            }
            if node.terminal {
                return true;
            }
        }
        false
    }
}

/// Splits `text` into pieces of at most `chunk_chars` characters.
pub fn chunk_text(text: &str, chunk_chars: usize) -> impl Iterator<Item = &str> {
    let chunk_chars = chunk_chars.max(1);
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let split = rest
            .char_indices()
            .nth(chunk_chars)
            .map_or(rest.len(), |(idx, _)| idx);
        let (chunk, tail) = rest.split_at(split);
        rest = tail;
        Some(chunk)
    })
}

/// Sums keyword hits chunk by chunk. Keywords straddling a chunk boundary are missed.
pub fn count_matches_chunked(trie: &KeywordTrie, text: &str, chunk_chars: usize) -> usize {
    chunk_text(text, chunk_chars)
        .map(|chunk| trie.count_matches(chunk))
        .sum()
}
