//! Junk sentence filter
//!
//! Drops sentences dominated by punctuation and digits (tables, scores,
//! menus, page numbers).

/// Whether a sentence is worth keeping
///
/// Counts characters that are ASCII punctuation or ASCII digits and keeps the
/// sentence only when that count is below half its length in characters,
/// with integer division: for odd lengths the threshold rounds down. Empty
/// sentences are never kept.
pub fn keep(sentence: &str) -> bool {
    let (length, noisy) = sentence.chars().fold((0usize, 0usize), |(length, noisy), ch| {
        let is_noise = ch.is_ascii_punctuation() || ch.is_ascii_digit();
        (length + 1, noisy + usize::from(is_noise))
    });
    noisy < length / 2
}

/// Result of filtering one record's sentences
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Kept sentences, each followed by a newline
    pub text: String,
    /// Number of kept sentences
    pub kept: usize,
    /// Number of dropped sentences
    pub dropped: usize,
}

impl FilterOutcome {
    /// True when nothing survived
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Keep the good sentences and join them into one newline-terminated blob
pub fn filter_sentences<I, S>(sentences: I) -> FilterOutcome
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut outcome = FilterOutcome::default();
    for sentence in sentences {
        let sentence = sentence.as_ref();
        if keep(sentence) {
            outcome.text.push_str(sentence);
            outcome.text.push('\n');
            outcome.kept += 1;
        } else {
            outcome.dropped += 1;
        }
    }
    outcome
}
