use std::collections::HashSet;

use crate::deinflect::Deinflector;
use crate::dictionary::{DictionaryIndex, KanjiDictData, TermDictData};
use crate::preprocess;
use crate::state::LoadState;
use crate::types::{DeinflectRule, EntryId, Interpretation, KanjiEntry, TermResolution};

/// Top-level resolution API: owns the dictionary index, the deinflection
/// engine and the load state, and drives candidate generation and ranking.
#[derive(Default)]
pub struct Translator {
    dictionary: DictionaryIndex,
    deinflector: Deinflector,
    state: LoadState,
}

impl Translator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install_rules(&mut self, rules: Vec<DeinflectRule>) {
        self.state.begin();
        self.deinflector.set_rules(rules);
    }

    pub fn install_term_dictionary(&mut self, name: &str, data: TermDictData) {
        self.state.begin();
        self.dictionary.install_term_dict(name, data);
    }

    pub fn install_kanji_dictionary(&mut self, name: &str, data: KanjiDictData) {
        self.state.begin();
        self.dictionary.install_kanji_dict(name, data);
    }

    /// Mark installation complete; lookups are reliable from here on.
    pub fn finish_loading(&mut self) {
        self.state.finish();
    }

    pub fn is_ready(&self) -> bool {
        self.state.is_ready()
    }

    /// Resolve every interpretation of a prefix of `text`, ranked.
    ///
    /// Prefixes are walked longest-first; each is deinflected against the
    /// rule table, each resulting root queried against the index, and hits
    /// deduplicated by entry id. Ranking: descending matched span length,
    /// then "P"-tagged entries first, then ascending rule-chain length.
    pub fn resolve_term(&self, text: &str) -> TermResolution {
        if !self.is_ready() {
            tracing::warn!("resolve_term called before data load completed");
            return TermResolution::default();
        }

        let chars: Vec<char> = text.chars().collect();

        let mut seen: HashSet<EntryId> = HashSet::new();
        let mut interpretations: Vec<Interpretation> = Vec::new();

        for i in (1..=chars.len()).rev() {
            // `prefix` stays in the caller's coordinate space; only the
            // candidate handed to the engine is normalized. NFKC can expand
            // a char (㌀ to アパート), and reported spans must still index
            // the caller's original text.
            let prefix: String = chars[..i].iter().collect();
            let term = preprocess::normalize(&prefix);
            if term.is_empty() {
                continue;
            }
            let deinflections = self
                .deinflector
                .deinflect(&term, |candidate, required| {
                    self.dictionary.valid_root(candidate, required)
                });

            match deinflections {
                // No reduction validated: fall back to the literal form.
                None => self.collect(&mut seen, &mut interpretations, &prefix, &term, &[]),
                Some(list) => {
                    for d in &list {
                        self.collect(&mut seen, &mut interpretations, &prefix, &d.root, &d.rules);
                    }
                }
            }
        }

        // Stable sort keeps prefix-iteration order among full ties.
        interpretations.sort_by(|a, b| {
            let len_a = a.source.chars().count();
            let len_b = b.source.chars().count();
            let p_a = a.tags.iter().any(|t| t == "P");
            let p_b = b.tags.iter().any(|t| t == "P");
            len_b.cmp(&len_a)
                .then(p_b.cmp(&p_a))
                .then(a.rules.len().cmp(&b.rules.len()))
        });

        let max_source_len = interpretations
            .iter()
            .map(|r| r.source.chars().count())
            .max()
            .unwrap_or(0);

        TermResolution {
            interpretations,
            max_source_len,
        }
    }

    /// Look up every distinct kanji in `text`, in first-occurrence order.
    pub fn resolve_kanji(&self, text: &str) -> Vec<KanjiEntry> {
        if !self.is_ready() {
            tracing::warn!("resolve_kanji called before data load completed");
            return Vec::new();
        }

        let text = preprocess::normalize(text);
        let mut processed: HashSet<char> = HashSet::new();
        let mut results = Vec::new();
        for c in text.chars() {
            if processed.insert(c) {
                results.extend(self.dictionary.find_kanji(c).into_iter().cloned());
            }
        }
        results
    }

    fn collect(
        &self,
        seen: &mut HashSet<EntryId>,
        out: &mut Vec<Interpretation>,
        source: &str,
        root: &str,
        rules: &[String],
    ) {
        for entry in self.dictionary.find_term(root) {
            if !seen.insert(entry.id) {
                continue;
            }
            out.push(Interpretation {
                expression: entry.expression.clone(),
                reading: entry.reading.clone(),
                glossary: entry.glossary.clone(),
                tags: entry.tags.clone(),
                source: source.to_string(),
                rules: rules.to_vec(),
            });
        }
    }
}
