//! On-the-fly vocabulary table.
//!
//! A [`Lexicon`] is an explicit, caller-owned string↔code table built over
//! whatever sentences are being compared. Sentence metrics require both
//! inputs to be codified against the *same* lexicon; the
//! [`Lexicon::ensure_codified`] step makes that precondition explicit
//! rather than relying on shared global state.

use rustc_hash::FxHashMap;

use crate::sentence::ChunkedSentence;
use crate::types::UNCODED;

/// Bijective word↔code table.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    codes: FxHashMap<String, i32>,
    words: Vec<String>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Code for a word, or [`UNCODED`] if absent.
    pub fn code(&self, word: &str) -> i32 {
        self.codes.get(word).copied().unwrap_or(UNCODED)
    }

    /// Word for a code, or `None` if out of range.
    pub fn word(&self, code: i32) -> Option<&str> {
        usize::try_from(code)
            .ok()
            .and_then(|i| self.words.get(i))
            .map(String::as_str)
    }

    /// Insert a word if absent and return its code.
    pub fn add(&mut self, word: &str) -> i32 {
        if let Some(&code) = self.codes.get(word) {
            return code;
        }
        let code = self.words.len() as i32;
        self.codes.insert(word.to_string(), code);
        self.words.push(word.to_string());
        code
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Drop all entries, keeping allocated capacity.
    pub fn clear(&mut self) {
        self.codes.clear();
        self.words.clear();
    }

    /// Assign a lexical code to every token of `sentence`, adding unseen
    /// words to the table. Idempotent: re-running reassigns the same codes.
    pub fn codify(&mut self, sentence: &mut ChunkedSentence) {
        for token in sentence.tokens_mut() {
            token.lex_code = self.add(&token.surface);
        }
    }

    /// Codify both sentences of a comparison pair against this lexicon.
    ///
    /// This is the explicit precondition step for every sentence metric;
    /// it mutates the passed-in sentences.
    pub fn ensure_codified(&mut self, a: &mut ChunkedSentence, b: &mut ChunkedSentence) {
        self.codify(a);
        self.codify(b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_idempotent() {
        let mut lex = Lexicon::new();
        let c1 = lex.add("dog");
        let c2 = lex.add("dog");
        assert_eq!(c1, c2);
        assert_eq!(lex.len(), 1);
    }

    #[test]
    fn test_round_trip() {
        let mut lex = Lexicon::new();
        let code = lex.add("cat");
        assert_eq!(lex.word(code), Some("cat"));
        assert_eq!(lex.code("cat"), code);
        assert_eq!(lex.code("missing"), UNCODED);
        assert_eq!(lex.word(UNCODED), None);
    }

    #[test]
    fn test_codify_assigns_every_token() {
        let mut lex = Lexicon::new();
        let mut s = ChunkedSentence::parse("[NP the/DT dog/NN] ran/VBD").unwrap();
        lex.codify(&mut s);
        assert!(s.tokens().iter().all(|t| t.lex_code != UNCODED));
        // Shared vocabulary across sentences.
        let mut t = ChunkedSentence::parse("[NP the/DT cat/NN]").unwrap();
        lex.codify(&mut t);
        assert_eq!(s.tokens()[0].lex_code, t.tokens()[0].lex_code);
    }

    #[test]
    fn test_clear() {
        let mut lex = Lexicon::new();
        lex.add("dog");
        lex.clear();
        assert!(lex.is_empty());
        assert_eq!(lex.code("dog"), UNCODED);
    }
}
