use serde::{Deserialize, Serialize};

/// Identifier for a term entry, assigned by the index at install time.
/// Unique across every installed dictionary and stable for the index
/// lifetime; the resolver's deduplication relies on this.
pub type EntryId = u64;

/// A single term definition as stored in the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermEntry {
    pub id: EntryId,
    pub expression: String,
    pub reading: String,
    /// Part-of-speech and usage tags (e.g. "v1", "P").
    pub tags: Vec<String>,
    pub glossary: Vec<String>,
}

/// A single kanji definition as stored in the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KanjiEntry {
    pub character: char,
    pub kunyomi: Vec<String>,
    pub onyomi: Vec<String>,
    pub glossary: Vec<String>,
}

/// One reverse-conjugation rule: strip `from_suffix`, append `to_suffix`.
/// The reduced form must carry one of `required_tags` in the dictionary
/// for the application to be considered valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeinflectRule {
    pub from_suffix: String,
    pub to_suffix: String,
    pub required_tags: Vec<String>,
    pub name: String,
}

/// One chain of rule applications reducing a surface form to a root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deinflection {
    /// The original surface form the chain started from.
    pub source: String,
    /// The reduced candidate root, to be re-queried against the index.
    pub root: String,
    /// Rule names in application order, outermost suffix first.
    pub rules: Vec<String>,
}

/// One ranked lookup result: a dictionary entry plus the surface span
/// and rule chain that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interpretation {
    pub expression: String,
    pub reading: String,
    pub glossary: Vec<String>,
    pub tags: Vec<String>,
    /// The matched prefix of the input text.
    pub source: String,
    pub rules: Vec<String>,
}

/// Result of a full term resolution over an input span.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TermResolution {
    pub interpretations: Vec<Interpretation>,
    /// Longest matched source span, in chars. 0 when nothing matched.
    pub max_source_len: usize,
}
