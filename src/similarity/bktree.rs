//! BK-tree over Levenshtein distance.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::merge::SynthesisPool;
use crate::util::levenshtein::levenshtein_distance;

/// A word found by [`BkTree::search`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimilarityHit {
    pub word: String,
    pub distance: usize,
}

#[derive(Debug, Clone)]
struct Node {
    word: String,
    /// Edit distance to this node's word -> index of the child node.
    children: BTreeMap<usize, usize>,
}

impl Node {
    fn new(word: &str) -> Self {
        Node {
            word: word.to_string(),
            children: BTreeMap::new(),
        }
    }
}

/// A set of words indexed for range queries by edit distance.
///
/// Nodes live in an arena; index 0 is the root. Words can be added but never
/// removed.
#[derive(Debug, Clone, Default)]
pub struct BkTree {
    nodes: Vec<Node>,
}

impl BkTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from every normalized form in `pool`.
    pub fn from_pool(pool: &SynthesisPool) -> Self {
        let mut tree = Self::new();
        tree.extend(pool.normalized_forms());
        tree
    }

    /// Insert every word from `words`.
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.insert(word.as_ref());
        }
    }

    /// Insert `word`. Returns `false` if it was empty or already present.
    pub fn insert(&mut self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        if self.nodes.is_empty() {
            self.nodes.push(Node::new(word));
            return true;
        }

        let mut current = 0;
        loop {
            let distance = levenshtein_distance(word, &self.nodes[current].word);
            if distance == 0 {
                return false;
            }

            match self.nodes[current].children.get(&distance) {
                Some(&child) => current = child,
                None => {
                    let index = self.nodes.len();
                    self.nodes.push(Node::new(word));
                    self.nodes[current].children.insert(distance, index);
                    return true;
                }
            }
        }
    }

    /// Every word within `max_distance` of `query`, in no particular order.
    ///
    /// An empty tree or empty query yields no hits.
    pub fn search(&self, query: &str, max_distance: usize) -> Vec<SimilarityHit> {
        let mut hits = Vec::new();
        if self.nodes.is_empty() || query.is_empty() {
            return hits;
        }

        let mut stack = vec![0];
        while let Some(index) = stack.pop() {
            let node = &self.nodes[index];
            let distance = levenshtein_distance(query, &node.word);
            if distance <= max_distance {
                hits.push(SimilarityHit {
                    word: node.word.clone(),
                    distance,
                });
            }

            // Triangle inequality: only children keyed within
            // [distance - max, distance + max] can hold matches.
            let low = distance.saturating_sub(max_distance);
            let high = distance.saturating_add(max_distance);
            stack.extend(node.children.range(low..=high).map(|(_, &child)| child));
        }

        hits
    }

    pub fn contains(&self, word: &str) -> bool {
        self.search(word, 0).iter().any(|hit| hit.distance == 0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Indexed words in insertion order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|node| node.word.as_str())
    }
}

impl<S: AsRef<str>> FromIterator<S> for BkTree {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tree = BkTree::new();
        tree.extend(iter);
        tree
    }
}

/// Sort hits by distance, then word, and keep at most `limit` (0 keeps all).
pub fn rank_hits(mut hits: Vec<SimilarityHit>, limit: usize) -> Vec<SimilarityHit> {
    hits.sort_by(|a, b| a.distance.cmp(&b.distance).then_with(|| a.word.cmp(&b.word)));
    if limit > 0 {
        hits.truncate(limit);
    }
    hits
}
