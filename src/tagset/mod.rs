//! Static tag-set enumerations.
//!
//! A [`TagSet`] is a fixed, bidirectional string↔code table. Two built-in
//! sets cover the external tagger's vocabulary: the Penn-Treebank POS tags
//! and the shallow-chunk tags (plus synthetic `PUNCT`/`UNDEF` entries).

use rustc_hash::FxHashMap;

use crate::types::UNCODED;

/// Penn-Treebank POS tags, including bracket/punctuation tags and the
/// synthetic `UNDEF` tag for unparsable input.
const PENN_POS: &[&str] = &[
    "CC", "CD", "DT", "EX", "FW", "IN", "JJ", "JJR", "JJS", "LS", "MD", "NN",
    "NNS", "NNP", "NNPS", "PDT", "POS", "PRP", "PRP$", "RB", "RBR", "RBS",
    "RP", "SYM", "TO", "UH", "VB", "VBD", "VBG", "VBN", "VBP", "VBZ", "WDT",
    "WP", "WP$", "WRB", ".", ",", ":", "``", "''", "-LRB-", "-RRB-", "$",
    "#", "UNDEF",
];

/// Shallow-chunk tags plus the synthetic `PUNCT` and `UNDEF` entries.
const CHUNK_TAGS: &[&str] = &[
    "NP", "VP", "PP", "ADVP", "ADJP", "PRT", "SBAR", "CONJP", "INTJ", "LST",
    "UCP", "PUNCT", "UNDEF",
];

/// A fixed enumeration of tag strings with integer codes.
///
/// Lookups are case-insensitive; unknown tags code to [`UNCODED`].
#[derive(Debug, Clone)]
pub struct TagSet {
    tags: Vec<String>,
    index: FxHashMap<String, i32>,
}

impl TagSet {
    /// Build a tag set from an explicit list. Codes are assigned in list
    /// order starting at 0; duplicate entries keep their first code.
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self {
            tags: Vec::new(),
            index: FxHashMap::default(),
        };
        for tag in tags {
            let tag = tag.as_ref().to_uppercase();
            if !set.index.contains_key(&tag) {
                let code = set.tags.len() as i32;
                set.index.insert(tag.clone(), code);
                set.tags.push(tag);
            }
        }
        set
    }

    /// The Penn-Treebank POS tag set.
    pub fn penn_pos() -> Self {
        Self::from_tags(PENN_POS.iter().copied())
    }

    /// The shallow-chunk tag set.
    pub fn chunk_tags() -> Self {
        Self::from_tags(CHUNK_TAGS.iter().copied())
    }

    /// Code for a tag, or [`UNCODED`] if the tag is unknown.
    pub fn code(&self, tag: &str) -> i32 {
        self.index
            .get(&tag.to_uppercase())
            .copied()
            .unwrap_or(UNCODED)
    }

    /// Tag string for a code, or `None` if out of range.
    pub fn tag(&self, code: i32) -> Option<&str> {
        usize::try_from(code)
            .ok()
            .and_then(|i| self.tags.get(i))
            .map(String::as_str)
    }

    /// Number of tags in the set.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
