//! BK-tree search must match a brute-force linear scan exactly.

use std::collections::BTreeSet;

use polyglex::similarity::{BkTree, SimilarityHit};
use polyglex::util::levenshtein::levenshtein_distance;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_word(rng: &mut StdRng, alphabet: &[char]) -> String {
    let length = rng.random_range(1..=8);
    (0..length)
        .map(|_| alphabet[rng.random_range(0..alphabet.len())])
        .collect()
}

fn brute_force(words: &[String], query: &str, max_distance: usize) -> BTreeSet<(String, usize)> {
    words
        .iter()
        .map(|w| (w.clone(), levenshtein_distance(query, w)))
        .filter(|(_, d)| *d <= max_distance)
        .collect()
}

fn as_set(hits: Vec<SimilarityHit>) -> BTreeSet<(String, usize)> {
    hits.into_iter().map(|h| (h.word, h.distance)).collect()
}

#[test]
fn test_search_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    // A small alphabet produces many near neighbours and deep trees.
    let alphabet = ['a', 'b', 'c', 'd', 'e'];

    let mut words: Vec<String> = (0..600).map(|_| random_word(&mut rng, &alphabet)).collect();
    let tree: BkTree = words.iter().collect();
    words.sort();
    words.dedup();
    assert_eq!(tree.len(), words.len());

    for _ in 0..200 {
        let query = random_word(&mut rng, &alphabet);
        for max_distance in 0..=3 {
            let hits = tree.search(&query, max_distance);
            let count = hits.len();
            let found = as_set(hits);
            assert_eq!(found.len(), count, "duplicate hit for {query:?}");
            assert_eq!(
                found,
                brute_force(&words, &query, max_distance),
                "query={query:?} max_distance={max_distance}"
            );
        }
    }
}

#[test]
fn test_contains_matches_membership() {
    let mut rng = StdRng::seed_from_u64(7);
    let alphabet = ['x', 'y', 'z'];

    let words: Vec<String> = (0..200).map(|_| random_word(&mut rng, &alphabet)).collect();
    let tree: BkTree = words.iter().collect();
    let members: BTreeSet<&String> = words.iter().collect();

    for _ in 0..200 {
        let query = random_word(&mut rng, &alphabet);
        assert_eq!(tree.contains(&query), members.contains(&query), "query={query:?}");
    }
}

#[test]
fn test_unicode_words() {
    let words = ["çay", "cay", "çaý", "kahve"];
    let tree: BkTree = words.iter().collect();

    let found = as_set(tree.search("çay", 1));
    let expected: BTreeSet<(String, usize)> = [("çay", 0), ("cay", 1), ("çaý", 1)]
        .into_iter()
        .map(|(w, d)| (w.to_string(), d))
        .collect();
    assert_eq!(found, expected);
}
