//! Mandarin tone sandhi within a segmented word.

use super::Syllable;

/// Rewrites tones in place, left to right, against each syllable's right
/// neighbour:
///
/// - 不 before a fourth tone becomes second tone.
/// - 一 before a fourth tone becomes second tone, before tones 1-3 fourth.
/// - Two third tones in a row: the first becomes second tone.
///
/// The last syllable of a word is never changed.
pub fn apply(word: &mut [Syllable]) {
    for i in 1..word.len() {
        let next = word[i].tone;
        let current = &mut word[i - 1];
        current.tone = match (current.hanzi, current.tone, next) {
            ('不', _, 4) => 2,
            ('一', _, 4) => 2,
            ('一', _, 1..=3) => 4,
            (_, 3, 3) => 2,
            (_, tone, _) => tone,
        };
    }
}
