//! Frequency tables from sample data.
//!
//! The tree builder takes `(frequency, symbol)` pairs. These helpers produce
//! them from a sample of symbols: count each symbol, then optionally scale
//! the counts to relative frequencies. Symbols are listed in the order they
//! first appear, so the same sample always gives the same table.

use std::collections::HashMap;
use std::hash::Hash;

/// Count how often each symbol occurs, in order of first appearance.
pub fn count_symbols<S, I>(data: I) -> Vec<(u64, S)>
where
    S: Clone + Eq + Hash,
    I: IntoIterator<Item = S>,
{
    let mut positions: HashMap<S, usize> = HashMap::new();
    let mut counts: Vec<(u64, S)> = Vec::new();

    for symbol in data {
        match positions.get(&symbol) {
            Some(&i) => counts[i].0 += 1,
            None => {
                positions.insert(symbol.clone(), counts.len());
                counts.push((1, symbol));
            }
        }
    }

    counts
}

/// Scale counts so they sum to 1.
///
/// An all-zero (or empty) table is returned with every frequency at 0.
pub fn relative<S>(counts: Vec<(u64, S)>) -> Vec<(f64, S)> {
    let total: u64 = counts.iter().map(|(n, _)| n).sum();
    counts
        .into_iter()
        .map(|(n, s)| {
            let f = if total == 0 { 0.0 } else { n as f64 / total as f64 };
            (f, s)
        })
        .collect()
}

/// Relative frequency of every symbol in `data`.
pub fn frequencies_of<S, I>(data: I) -> Vec<(f64, S)>
where
    S: Clone + Eq + Hash,
    I: IntoIterator<Item = S>,
{
    relative(count_symbols(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_in_first_seen_order() {
        let counts = count_symbols("hello world".chars());
        assert_eq!(
            counts,
            vec![
                (1, 'h'),
                (1, 'e'),
                (3, 'l'),
                (2, 'o'),
                (1, ' '),
                (1, 'w'),
                (1, 'r'),
                (1, 'd'),
            ]
        );
    }

    #[test]
    fn test_relative_sums_to_one() {
        let freqs = frequencies_of("abracadabra".bytes());
        let total: f64 = freqs.iter().map(|(f, _)| f).sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert_eq!(freqs[0], (5.0 / 11.0, b'a'));
    }

    #[test]
    fn test_empty_input() {
        assert!(count_symbols(Vec::<u8>::new()).is_empty());
        assert!(relative(Vec::<(u64, u8)>::new()).is_empty());
    }

    #[test]
    fn test_zero_counts() {
        assert_eq!(relative(vec![(0, 'a')]), vec![(0.0, 'a')]);
    }
}
