/// Answer text prepared once per grading call and shared by every analyzer.
#[derive(Debug, Clone)]
pub struct Answer {
    text: String,
    lower: String,
    word_count: usize,
    sentence_count: usize,
}

impl Answer {
    pub fn new(text: &str) -> Self {
        let text = text.trim().to_string();
        let lower = text.to_lowercase();
        let word_count = text.split_whitespace().count();
        let sentence_count = text
            .split(['.', '!', '?', '\n'])
            .filter(|s| s.split_whitespace().count() >= 2)
            .count();
        Self {
            text,
            lower,
            word_count,
            sentence_count,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lowercased text. Rule patterns match against this.
    pub fn lower(&self) -> &str {
        &self.lower
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Sentence-like fragments with at least two words.
    pub fn sentence_count(&self) -> usize {
        self.sentence_count
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether `term` (lowercase) occurs as a word, optionally followed by a common
    /// inflection ("trend" matches "trends", "tam" does not match "tamper"). A trailing
    /// `*` marks a stem that matches any continuation ("monetiz*" matches
    /// "monetization").
    pub fn mentions(&self, term: &str) -> bool {
        let (term, stem) = match term.strip_suffix('*') {
            Some(stem) => (stem, true),
            None => (term, false),
        };
        if term.is_empty() {
            return false;
        }
        self.lower.match_indices(term).any(|(i, _)| {
            let starts_word = self.lower[..i]
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_alphanumeric());
            starts_word && (stem || ends_word(&self.lower[i + term.len()..]))
        })
    }
}

/// Suffixes a whole-word term may carry and still count as mentioned.
const INFLECTIONS: &[&str] = &["s", "es", "ed", "ing", "er", "ers", "ly"];

fn ends_word(rest: &str) -> bool {
    let tail_len = rest
        .find(|c: char| !c.is_alphanumeric())
        .unwrap_or(rest.len());
    let tail = &rest[..tail_len];
    tail.is_empty() || INFLECTIONS.contains(&tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_words_and_sentences() {
        let answer = Answer::new("  We will launch in Q3. Then expand!  Ok ");
        assert_eq!(answer.word_count(), 8);
        assert_eq!(answer.sentence_count(), 2);
        assert_eq!(answer.text(), "We will launch in Q3. Then expand!  Ok");
    }

    #[test]
    fn mentions_requires_word_start() {
        let answer = Answer::new("Emerging trends in the Market today");
        assert!(answer.mentions("trend"));
        assert!(answer.mentions("market"));
        assert!(!answer.mentions("merging"));
        assert!(!answer.mentions(""));
    }

    #[test]
    fn short_keywords_do_not_match_longer_words() {
        let answer = Answer::new("A tamper-proof costume for the Marketplace");
        assert!(!answer.mentions("tam"));
        assert!(!answer.mentions("cost"));
        assert!(!answer.mentions("market"));

        let answer = Answer::new("Our TAM grows while costs fall and competitors partnered up");
        assert!(answer.mentions("tam"));
        assert!(answer.mentions("cost"));
        assert!(answer.mentions("competitor"));
        assert!(answer.mentions("partner"));
    }

    #[test]
    fn starred_stems_match_any_continuation() {
        let answer = Answer::new("Monetization starts once we differentiate");
        assert!(answer.mentions("monetiz*"));
        assert!(answer.mentions("differentiat*"));
        assert!(!answer.mentions("monetiz"));
        assert!(!answer.mentions("*"));
    }
}
