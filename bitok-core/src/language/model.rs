//! Rule-based sentence boundary model
//!
//! A [`SentenceModel`] is built from a language table and segments text at
//! terminator runs, using abbreviation lists and orthographic context to
//! reject false boundaries.

use crate::error::{PipelineError, Result};
use crate::language::config::LanguageConfig;
use std::collections::HashSet;
use std::path::Path;

/// In-process sentence boundary detector for one language
#[derive(Debug, Clone)]
pub struct SentenceModel {
    code: String,
    name: String,
    terminators: HashSet<char>,
    no_space: HashSet<char>,
    closing: HashSet<char>,
    opening: HashSet<char>,
    abbreviations: HashSet<String>,
    require_capital: bool,
    initials: bool,
}

impl SentenceModel {
    /// Build a model from a validated configuration
    pub(crate) fn from_config(config: &LanguageConfig) -> std::result::Result<Self, String> {
        config.validate()?;

        let abbreviations = config
            .abbreviations
            .categories
            .values()
            .flatten()
            .map(|abbr| abbr.trim_end_matches('.').to_lowercase())
            .filter(|abbr| !abbr.is_empty())
            .collect();

        Ok(Self {
            code: config.metadata.code.clone(),
            name: config.metadata.name.clone(),
            terminators: config.terminators.chars.iter().copied().collect(),
            no_space: config.terminators.no_space.iter().copied().collect(),
            closing: config.enclosures.closing.iter().copied().collect(),
            opening: config.enclosures.opening.iter().copied().collect(),
            abbreviations,
            require_capital: config.rules.require_capital,
            initials: config.rules.initials,
        })
    }

    /// Parse a language table from TOML
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: LanguageConfig = toml::from_str(source).map_err(|e| PipelineError::ModelLoad {
            language: "<toml>".to_string(),
            reason: e.to_string(),
        })?;
        Self::from_config(&config).map_err(|reason| PipelineError::ModelLoad {
            language: config.metadata.code.clone(),
            reason,
        })
    }

    /// Load a language table from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| PipelineError::file(path, e))?;
        Self::from_toml_str(&source).map_err(|e| match e {
            PipelineError::ModelLoad { reason, .. } => PipelineError::ModelLoad {
                language: path.display().to_string(),
                reason,
            },
            other => other,
        })
    }

    /// Language code, e.g. `en`
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Human-readable language name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether `word` (without its final dot) is a known abbreviation
    pub fn is_abbreviation(&self, word: &str) -> bool {
        self.abbreviations
            .contains(&word.trim_end_matches('.').to_lowercase())
    }

    /// Split `text` into sentences
    ///
    /// Spans are trimmed of surrounding whitespace and never empty. Text
    /// without any accepted boundary comes back as a single span.
    pub fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i < chars.len() {
            if !self.terminators.contains(&chars[i].1) {
                i += 1;
                continue;
            }

            let mut j = i;
            while j < chars.len() && self.terminators.contains(&chars[j].1) {
                j += 1;
            }
            while j < chars.len() && self.closing.contains(&chars[j].1) {
                j += 1;
            }

            if self.is_boundary(text, &chars, i, j) {
                let end = chars.get(j).map_or(text.len(), |&(pos, _)| pos);
                push_trimmed(&mut sentences, &text[start..end]);
                start = end;
            }
            i = j;
        }

        push_trimmed(&mut sentences, &text[start..]);
        sentences
    }

    /// Decide on the terminator run `chars[run_start..run_end]`
    fn is_boundary(&self, text: &str, chars: &[(usize, char)], run_start: usize, run_end: usize) -> bool {
        let run = &chars[run_start..run_end];
        if run.iter().any(|(_, ch)| self.no_space.contains(ch)) {
            return true;
        }

        let Some(&(_, next)) = chars.get(run_end) else {
            return true;
        };
        if !next.is_whitespace() {
            return false;
        }

        let ends_with_period = run
            .iter()
            .rev()
            .find(|(_, ch)| !self.closing.contains(ch))
            .is_some_and(|&(_, ch)| ch == '.');
        if !ends_with_period {
            return true;
        }

        let single_period = run_end - run_start == 1
            || run[1..].iter().all(|(_, ch)| self.closing.contains(ch));
        if single_period {
            let word = self.word_before(text, chars, run_start);
            if !word.is_empty() && self.is_abbreviation(word) {
                return false;
            }
            if self.initials && is_initial(word) {
                return false;
            }
        }

        if self.require_capital {
            let upcoming = chars[run_end..]
                .iter()
                .map(|&(_, ch)| ch)
                .find(|ch| !ch.is_whitespace());
            if let Some(ch) = upcoming {
                return self.can_start_sentence(ch);
            }
        }
        true
    }

    /// The word directly before the terminator at `chars[index]`
    fn word_before<'a>(&self, text: &'a str, chars: &[(usize, char)], index: usize) -> &'a str {
        let end = chars[index].0;
        let mut k = index;
        while k > 0 && !chars[k - 1].1.is_whitespace() {
            k -= 1;
        }
        let begin = chars.get(k).map_or(end, |&(pos, _)| pos);
        text[begin..end].trim_start_matches(|ch| self.opening.contains(&ch))
    }

    fn can_start_sentence(&self, ch: char) -> bool {
        ch.is_uppercase()
            || ch.is_ascii_digit()
            || self.opening.contains(&ch)
            || (ch.is_alphabetic() && !ch.is_lowercase())
    }
}

fn is_initial(word: &str) -> bool {
    let mut letters = word.chars();
    matches!((letters.next(), letters.next()), (Some(ch), None) if ch.is_alphabetic())
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, span: &'a str) {
    let span = span.trim();
    if !span.is_empty() {
        sentences.push(span);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"
[metadata]
code = "t"
name = "Test"

[terminators]
chars = [".", "!", "?", "。"]
no_space = ["。"]

[enclosures]
closing = ['"', ")"]
opening = ['"', "("]

[abbreviations]
titles = ["Dr", "Mr."]
latin = ["e.g", "etc"]
"#;

    fn model() -> SentenceModel {
        SentenceModel::from_toml_str(TABLE).unwrap()
    }

    #[test]
    fn test_basic_segmentation() {
        assert_eq!(
            model().segment("Hello world. This is a test! Is it? Yes."),
            vec!["Hello world.", "This is a test!", "Is it?", "Yes."]
        );
    }

    #[test]
    fn test_abbreviations_do_not_split() {
        assert_eq!(
            model().segment("Dr. Smith arrived. Mr. Jones left."),
            vec!["Dr. Smith arrived.", "Mr. Jones left."]
        );
        assert_eq!(
            model().segment("Fruit, e.g. Apples and pears. Done."),
            vec!["Fruit, e.g. Apples and pears.", "Done."]
        );
    }

    #[test]
    fn test_initials_do_not_split() {
        assert_eq!(
            model().segment("J. R. Tolkien wrote it. Fine."),
            vec!["J. R. Tolkien wrote it.", "Fine."]
        );
    }

    #[test]
    fn test_decimal_numbers_do_not_split() {
        assert_eq!(
            model().segment("Pi is 3.14 roughly. Next."),
            vec!["Pi is 3.14 roughly.", "Next."]
        );
    }

    #[test]
    fn test_lowercase_continuation_does_not_split() {
        assert_eq!(
            model().segment("It costs 5 p. per unit. Cheap."),
            vec!["It costs 5 p. per unit.", "Cheap."]
        );
    }

    #[test]
    fn test_closing_quote_stays_with_sentence() {
        assert_eq!(
            model().segment("He said \"stop.\" Then he left."),
            vec!["He said \"stop.\"", "Then he left."]
        );
    }

    #[test]
    fn test_ellipsis_run() {
        assert_eq!(
            model().segment("Wait... What happened?"),
            vec!["Wait...", "What happened?"]
        );
    }

    #[test]
    fn test_no_space_terminator() {
        assert_eq!(
            model().segment("これはペンです。あれは本です。"),
            vec!["これはペンです。", "あれは本です。"]
        );
    }

    #[test]
    fn test_empty_and_whitespace_text() {
        assert!(model().segment("").is_empty());
        assert!(model().segment("  \n ").is_empty());
    }

    #[test]
    fn test_text_without_terminator() {
        assert_eq!(model().segment("  no terminator here "), vec!["no terminator here"]);
    }

    #[test]
    fn test_abbreviation_lookup_ignores_case_and_dot() {
        let model = model();
        assert!(model.is_abbreviation("dr"));
        assert!(model.is_abbreviation("MR."));
        assert!(model.is_abbreviation("E.G"));
        assert!(!model.is_abbreviation("house"));
    }

    #[test]
    fn test_invalid_table_is_model_load_error() {
        let err = SentenceModel::from_toml_str("[metadata]\ncode = \"x\"").unwrap_err();
        assert!(matches!(err, PipelineError::ModelLoad { .. }));
    }
}
