//! Sample text generation for the demo.
//!
//! When no input is given we generate text with uneven character statistics,
//! so the code table has something to exploit.
//!
//! # Design
//!
//! Generated text mixes:
//! - Prose-like sections (common words, weighted towards the short ones)
//! - Runs of one character (very skewed frequencies)
//! - Uniformly random letters (close to flat frequencies)
//!
//! This makes the effect of the frequency table visible in the stats.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Common English words, most frequent first.
const WORDS: &[&str] = &[
    "the", "of", "and", "to", "a", "in", "is", "it", "you", "that", "he", "was", "for", "on",
    "are", "with", "as", "his", "they", "be", "at", "one", "have", "this", "from", "or", "had",
    "by", "word", "but", "what", "some", "we", "can", "out", "other", "were", "all", "there",
    "when", "up", "use", "your", "how", "said", "each", "she", "which", "do", "their", "time",
];

const PUNCTUATION: &[char] = &['.', ',', ';', '!', '?'];

/// Generate sample text of exactly `size_chars` characters.
///
/// # Arguments
/// - `seed`: random seed for determinism
/// - `size_chars`: number of characters to produce
pub fn generate_sample_text(seed: u64, size_chars: usize) -> String {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut text = String::with_capacity(size_chars);
    let mut remaining = size_chars;

    while remaining > 0 {
        let section = remaining.min(2048);

        let chunk = match rng.gen_range(0..10) {
            // 60% prose
            0..=5 => prose(&mut rng, section),
            // 20% runs of one character
            6..=7 => {
                let ch = char::from(rng.gen_range(b'a'..=b'z'));
                std::iter::repeat(ch).take(section).collect()
            }
            // 20% random letters and spaces
            _ => (0..section)
                .map(|_| {
                    if rng.gen_bool(0.15) {
                        ' '
                    } else {
                        char::from(rng.gen_range(b'a'..=b'z'))
                    }
                })
                .collect(),
        };

        text.extend(chunk.chars().take(section));
        remaining = remaining.saturating_sub(section);
    }

    text
}

/// At least `size` characters of word-like text.
fn prose(rng: &mut ChaCha8Rng, size: usize) -> String {
    let mut out = String::with_capacity(size + 16);
    let mut sentence_start = true;

    while out.chars().count() < size {
        // squaring a uniform sample favours the front of the list
        let r: f64 = rng.gen();
        let word = WORDS[((r * r) * WORDS.len() as f64) as usize % WORDS.len()];

        if sentence_start {
            let mut letters = word.chars();
            if let Some(first) = letters.next() {
                out.extend(first.to_uppercase());
                out.extend(letters);
            }
        } else {
            out.push_str(word);
        }

        sentence_start = false;
        if rng.gen_bool(0.1) {
            let mark = PUNCTUATION[rng.gen_range(0..PUNCTUATION.len())];
            out.push(mark);
            sentence_start = matches!(mark, '.' | '!' | '?');
        }
        out.push(if rng.gen_bool(0.05) { '\n' } else { ' ' });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_sample_text() {
        let text = generate_sample_text(42, 1000);
        assert_eq!(text.chars().count(), 1000);
    }

    #[test]
    fn test_determinism() {
        let text1 = generate_sample_text(12345, 5000);
        let text2 = generate_sample_text(12345, 5000);

        assert_eq!(text1, text2);
    }

    #[test]
    fn test_different_seeds() {
        let text1 = generate_sample_text(1, 1000);
        let text2 = generate_sample_text(2, 1000);

        assert_ne!(text1, text2);
    }

    #[test]
    fn test_various_sizes() {
        for size in [0, 1, 100, 1000, 10000] {
            let text = generate_sample_text(999, size);
            assert_eq!(text.chars().count(), size);
        }
    }

    #[test]
    fn test_prose_is_skewed() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let text = prose(&mut rng, 4000);
        let spaces = text.chars().filter(|c| *c == ' ').count();
        let zs = text.chars().filter(|c| *c == 'z').count();
        assert!(spaces > zs);
    }
}
