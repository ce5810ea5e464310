use std::collections::{HashMap, HashSet};

use crate::types::{DeinflectRule, Deinflection};

/// Upper bound on rule applications per chain. Degenerate rule tables
/// (equal-length or growing rewrites) terminate here instead of looping.
const MAX_CHAIN_DEPTH: usize = 8;

/// Reverse-conjugation engine over an installed rule table.
///
/// Rules are indexed by `from_suffix`; a candidate is reduced by probing
/// every char-boundary suffix up to the longest installed one. Exploration
/// is an explicit worklist with a visited set keyed by (candidate, rule
/// index), so cyclic rule tables cannot recurse forever.
#[derive(Default)]
pub struct Deinflector {
    rules: Vec<DeinflectRule>,
    by_suffix: HashMap<String, Vec<usize>>,
    max_suffix_chars: usize,
}

impl Deinflector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the rule table. Rule order within a shared suffix follows
    /// load order.
    pub fn set_rules(&mut self, rules: Vec<DeinflectRule>) {
        self.by_suffix.clear();
        self.max_suffix_chars = 0;
        for (i, rule) in rules.iter().enumerate() {
            self.by_suffix
                .entry(rule.from_suffix.clone())
                .or_default()
                .push(i);
            self.max_suffix_chars = self
                .max_suffix_chars
                .max(rule.from_suffix.chars().count());
        }
        self.rules = rules;
        tracing::info!(rules = self.rules.len(), "installed deinflection rules");
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Reduce `surface` to every dictionary root reachable through the rule
    /// table, validating each candidate through `is_valid_root` (which is
    /// expected to consult the dictionary index and check tag overlap).
    ///
    /// The literal surface form is included as a zero-rule result when it
    /// validates on its own. Returns `None` when nothing validated at all,
    /// letting the caller fall back to the literal surface form.
    pub fn deinflect<F>(&self, surface: &str, mut is_valid_root: F) -> Option<Vec<Deinflection>>
    where
        F: FnMut(&str, &[String]) -> bool,
    {
        let mut results = Vec::new();
        if is_valid_root(surface, &[]) {
            results.push(Deinflection {
                source: surface.to_string(),
                root: surface.to_string(),
                rules: Vec::new(),
            });
        }

        let mut seen: HashSet<(String, usize)> = HashSet::new();
        let mut work: Vec<(String, Vec<String>)> = vec![(surface.to_string(), Vec::new())];

        while let Some((term, chain)) = work.pop() {
            if chain.len() >= MAX_CHAIN_DEPTH {
                continue;
            }
            for (stem, suffix) in suffix_splits(&term, self.max_suffix_chars) {
                let Some(rule_ids) = self.by_suffix.get(suffix) else {
                    continue;
                };
                for &ri in rule_ids {
                    let rule = &self.rules[ri];
                    let root = format!("{stem}{}", rule.to_suffix);
                    if root.is_empty() {
                        continue;
                    }
                    if !seen.insert((root.clone(), ri)) {
                        continue;
                    }
                    let mut rules = chain.clone();
                    rules.push(rule.name.clone());
                    if is_valid_root(&root, &rule.required_tags) {
                        results.push(Deinflection {
                            source: surface.to_string(),
                            root: root.clone(),
                            rules: rules.clone(),
                        });
                    }
                    work.push((root, rules));
                }
            }
        }

        if results.is_empty() { None } else { Some(results) }
    }
}

/// Split `term` at every char boundary from the end, shortest suffix
/// first, up to `max_chars` suffix chars.
fn suffix_splits(term: &str, max_chars: usize) -> Vec<(&str, &str)> {
    let mut splits = Vec::new();
    for (taken, (pos, _)) in term.char_indices().rev().enumerate() {
        if taken >= max_chars {
            break;
        }
        splits.push((&term[..pos], &term[pos..]));
    }
    splits
}
