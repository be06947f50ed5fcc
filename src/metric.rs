//! Per-verse score: the number of ASCII vowels in the text.
//!
//! Only the literal set a, e, i, o, u counts. Accented vowels and other
//! scripts score nothing, so non-English text is undercounted.

const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

pub fn vowel_score(text: &str) -> u32 {
    let normalized = text.to_lowercase();
    let count = normalized
        .trim()
        .chars()
        .filter(|ch| VOWELS.contains(ch))
        .count();
    saturate(count)
}

/// Clamp to `u32::MAX` instead of wrapping.
fn saturate(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}
