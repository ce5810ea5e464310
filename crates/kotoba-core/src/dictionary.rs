use std::collections::HashMap;

use crate::types::{EntryId, KanjiEntry, TermEntry};

/// A term definition as handed over by the ingestion layer, before the
/// index assigns it an id.
#[derive(Debug, Clone)]
pub struct TermDef {
    pub expression: String,
    pub reading: String,
    pub tags: Vec<String>,
    pub glossary: Vec<String>,
}

/// Pre-validated term dictionary data: an ordered definition list plus a
/// surface-form index into it. The ingestion layer guarantees every index
/// in `indices` is in range for `defs`.
#[derive(Debug, Clone, Default)]
pub struct TermDictData {
    pub indices: HashMap<String, Vec<usize>>,
    pub defs: Vec<TermDef>,
}

/// Pre-validated kanji dictionary data.
#[derive(Debug, Clone, Default)]
pub struct KanjiDictData {
    pub chars: HashMap<char, (Vec<String>, Vec<String>, Vec<String>)>,
}

struct TermDict {
    name: String,
    entries: Vec<TermEntry>,
    indices: HashMap<String, Vec<usize>>,
}

struct KanjiDict {
    name: String,
    entries: HashMap<char, KanjiEntry>,
}

/// Exact-match index over every installed term and kanji dictionary.
/// Read-only once populated; lookup order follows dictionary install order.
#[derive(Default)]
pub struct DictionaryIndex {
    term_dicts: Vec<TermDict>,
    kanji_dicts: Vec<KanjiDict>,
    next_id: EntryId,
}

impl DictionaryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a term dictionary. Reinstalling under an existing name
    /// replaces that dictionary's entry set, keeping its position in the
    /// lookup order. Entries are fully materialized before the swap, so a
    /// dictionary is never partially visible.
    pub fn install_term_dict(&mut self, name: &str, data: TermDictData) {
        let mut entries = Vec::with_capacity(data.defs.len());
        for def in data.defs {
            entries.push(TermEntry {
                id: self.next_id,
                expression: def.expression,
                reading: def.reading,
                tags: def.tags,
                glossary: def.glossary,
            });
            self.next_id += 1;
        }

        let dict = TermDict {
            name: name.to_string(),
            entries,
            indices: data.indices,
        };
        tracing::info!(name, entries = dict.entries.len(), "installed term dictionary");

        match self.term_dicts.iter_mut().find(|d| d.name == name) {
            Some(slot) => *slot = dict,
            None => self.term_dicts.push(dict),
        }
    }

    /// Install a kanji dictionary, with the same replace-by-name semantics
    /// as [`Self::install_term_dict`].
    pub fn install_kanji_dict(&mut self, name: &str, data: KanjiDictData) {
        let entries: HashMap<char, KanjiEntry> = data
            .chars
            .into_iter()
            .map(|(character, (kunyomi, onyomi, glossary))| {
                (
                    character,
                    KanjiEntry {
                        character,
                        kunyomi,
                        onyomi,
                        glossary,
                    },
                )
            })
            .collect();

        let dict = KanjiDict {
            name: name.to_string(),
            entries,
        };
        tracing::info!(name, entries = dict.entries.len(), "installed kanji dictionary");

        match self.kanji_dicts.iter_mut().find(|d| d.name == name) {
            Some(slot) => *slot = dict,
            None => self.kanji_dicts.push(dict),
        }
    }

    /// Exact-match lookup across all term dictionaries. Order is dictionary
    /// install order, then index order within a dictionary. Absence is an
    /// empty result, never an error.
    pub fn find_term(&self, surface: &str) -> Vec<&TermEntry> {
        let mut results = Vec::new();
        for dict in &self.term_dicts {
            if let Some(indices) = dict.indices.get(surface) {
                for &idx in indices {
                    if let Some(entry) = dict.entries.get(idx) {
                        results.push(entry);
                    }
                }
            }
        }
        results
    }

    /// Kanji lookup: at most one entry per dictionary defining `character`.
    pub fn find_kanji(&self, character: char) -> Vec<&KanjiEntry> {
        self.kanji_dicts
            .iter()
            .filter_map(|d| d.entries.get(&character))
            .collect()
    }

    /// Validity check used by the deinflection engine: does `candidate`
    /// name a dictionary entry carrying one of `required_tags`? An empty
    /// requirement accepts any entry.
    pub fn valid_root(&self, candidate: &str, required_tags: &[String]) -> bool {
        let entries = self.find_term(candidate);
        if required_tags.is_empty() {
            return !entries.is_empty();
        }
        entries
            .iter()
            .any(|e| e.tags.iter().any(|t| required_tags.contains(t)))
    }
}
