//! Levenshtein edit distance.
//!
//! Distances are measured over Unicode code points, not bytes, and use two
//! rolling rows sized to the shorter input, so auxiliary space is
//! `O(min(len1, len2))`.

use std::cmp::min;

/// Calculate the Levenshtein distance between two strings.
///
/// This is the minimum number of single-character insertions, deletions or
/// substitutions required to change one string into the other. The result is
/// symmetric and zero exactly when the inputs are identical.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    if s1 == s2 {
        return 0;
    }

    let (s1_len, s2_len) = (s1.chars().count(), s2.chars().count());
    let (short, long, long_len) = if s1_len <= s2_len {
        (s1, s2, s2_len)
    } else {
        (s2, s1, s1_len)
    };

    // Only the shorter input is materialized; the longer one is streamed.
    let short: Vec<char> = short.chars().collect();
    if short.is_empty() {
        return long_len;
    }

    let mut prev_row: Vec<usize> = (0..=short.len()).collect();
    let mut curr_row = vec![0; short.len() + 1];

    for (j, lc) in long.chars().enumerate() {
        curr_row[0] = j + 1;

        for (i, &sc) in short.iter().enumerate() {
            let cost = usize::from(sc != lc);

            curr_row[i + 1] = min(
                min(
                    prev_row[i + 1] + 1, // deletion
                    curr_row[i] + 1,     // insertion
                ),
                prev_row[i] + cost, // substitution
            );
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[short.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("", "a"), 1);
        assert_eq!(levenshtein_distance("a", ""), 1);
        assert_eq!(levenshtein_distance("a", "a"), 0);
        assert_eq!(levenshtein_distance("ab", "ac"), 1);
        assert_eq!(levenshtein_distance("abc", "def"), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("search", "serach"), 2);
        assert_eq!(levenshtein_distance("hello", "hallo"), 1);
        assert_eq!(levenshtein_distance("hello", "help"), 2);
    }

    #[test]
    fn test_empty_string_distance_is_length() {
        for s in ["x", "word", "lengthy", "çğış"] {
            assert_eq!(levenshtein_distance("", s), s.chars().count());
            assert_eq!(levenshtein_distance(s, ""), s.chars().count());
        }
    }

    #[test]
    fn test_symmetry() {
        let words = ["care", "car", "scare", "racecar", "", "über", "uber"];
        for a in words {
            for b in words {
                assert_eq!(
                    levenshtein_distance(a, b),
                    levenshtein_distance(b, a),
                    "asymmetric for {a:?} / {b:?}"
                );
            }
        }
    }

    #[test]
    fn test_code_point_level() {
        // One substitution, although 'ü' is two bytes in UTF-8.
        assert_eq!(levenshtein_distance("über", "uber"), 1);
        assert_eq!(levenshtein_distance("çay", "cay"), 1);
    }

    #[test]
    fn test_long_input_against_short() {
        let long = format!("{}ş", "a".repeat(500));
        assert_eq!(levenshtein_distance("aş", &long), 499);
        assert_eq!(levenshtein_distance(&long, "aş"), 499);
        assert_eq!(levenshtein_distance("ş", &long), 500);
        // Equal char counts but different byte lengths.
        assert_eq!(levenshtein_distance("şşa", "abc"), 3);
        assert_eq!(levenshtein_distance("abc", "şşa"), 3);
    }
}
