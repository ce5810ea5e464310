//! Data-ingestion boundary: parses serialized rule tables and dictionaries
//! into the core's validated in-memory structures. Malformed data fails
//! fast here; the core assumes everything it receives is well-formed.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use kotoba_core::preprocess;
use kotoba_core::{DeinflectRule, KanjiDictData, TermDef, TermDictData};

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("term dictionary {dict}: def row {row} has fewer than 3 fields")]
    ShortTermRow { dict: String, row: usize },

    #[error("term dictionary {dict}: surface {surface:?} points at def {index}, out of range")]
    IndexOutOfRange {
        dict: String,
        surface: String,
        index: usize,
    },

    #[error("kanji dictionary {dict}: key {key:?} is not a single character")]
    BadKanjiKey { dict: String, key: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Deserialize)]
struct RuleRow {
    from: String,
    to: String,
    #[serde(default)]
    tags: Vec<String>,
    name: String,
}

#[derive(Debug, Deserialize)]
struct TermDictJson {
    indices: HashMap<String, Vec<usize>>,
    defs: Vec<Vec<String>>,
}

/// Parse a deinflection rule table from its JSON form:
/// an array of `{"from", "to", "tags", "name"}` objects, in table order.
pub fn parse_rules(json: &str) -> Result<Vec<DeinflectRule>, IngestError> {
    let rows: Vec<RuleRow> = serde_json::from_str(json)?;
    Ok(rows
        .into_iter()
        .map(|r| DeinflectRule {
            from_suffix: r.from,
            to_suffix: r.to,
            required_tags: r.tags,
            name: r.name,
        })
        .collect())
}

/// Parse a term dictionary from its JSON form: a surface-form index plus
/// def rows of `[expression, reading, space-separated-tags, glossary...]`.
/// Surface keys are NFKC-normalized so they agree with normalized lookup
/// input; index targets are bounds-checked here, never in the core.
pub fn parse_term_dict(name: &str, json: &str) -> Result<TermDictData, IngestError> {
    let raw: TermDictJson = serde_json::from_str(json)?;

    let mut defs = Vec::with_capacity(raw.defs.len());
    for (row, fields) in raw.defs.into_iter().enumerate() {
        let mut fields = fields.into_iter();
        let (Some(expression), Some(reading), Some(tags)) =
            (fields.next(), fields.next(), fields.next())
        else {
            return Err(IngestError::ShortTermRow {
                dict: name.to_string(),
                row,
            });
        };
        defs.push(TermDef {
            // Normalized like the surface keys below, so the expression
            // echoed in results matches what normalized lookups see.
            expression: preprocess::normalize(&expression),
            reading,
            tags: tags.split_whitespace().map(str::to_string).collect(),
            glossary: fields.collect(),
        });
    }

    let mut indices: HashMap<String, Vec<usize>> = HashMap::with_capacity(raw.indices.len());
    for (surface, targets) in raw.indices {
        for &index in &targets {
            if index >= defs.len() {
                return Err(IngestError::IndexOutOfRange {
                    dict: name.to_string(),
                    surface,
                    index,
                });
            }
        }
        indices
            .entry(preprocess::normalize(&surface))
            .or_default()
            .extend(targets);
    }

    Ok(TermDictData { indices, defs })
}

/// Parse a kanji dictionary from its JSON form: a map from character to
/// a `[kunyomi, onyomi, glossary]` triple of string arrays.
pub fn parse_kanji_dict(name: &str, json: &str) -> Result<KanjiDictData, IngestError> {
    let raw: HashMap<String, (Vec<String>, Vec<String>, Vec<String>)> =
        serde_json::from_str(json)?;

    let mut chars = HashMap::with_capacity(raw.len());
    for (key, def) in raw {
        let mut key_chars = key.chars();
        let (Some(character), None) = (key_chars.next(), key_chars.next()) else {
            return Err(IngestError::BadKanjiKey {
                dict: name.to_string(),
                key,
            });
        };
        chars.insert(character, def);
    }

    Ok(KanjiDictData { chars })
}

pub fn load_rules(path: &Path) -> Result<Vec<DeinflectRule>, IngestError> {
    tracing::info!(path = %path.display(), "loading deinflection rules");
    let json = fs::read_to_string(path)?;
    let rules = parse_rules(&json)?;
    tracing::info!(rules = rules.len(), "parsed deinflection rules");
    Ok(rules)
}

pub fn load_term_dict(name: &str, path: &Path) -> Result<TermDictData, IngestError> {
    tracing::info!(name, path = %path.display(), "loading term dictionary");
    let json = fs::read_to_string(path)?;
    let data = parse_term_dict(name, &json)?;
    tracing::info!(name, defs = data.defs.len(), "parsed term dictionary");
    Ok(data)
}

pub fn load_kanji_dict(name: &str, path: &Path) -> Result<KanjiDictData, IngestError> {
    tracing::info!(name, path = %path.display(), "loading kanji dictionary");
    let json = fs::read_to_string(path)?;
    let data = parse_kanji_dict(name, &json)?;
    tracing::info!(name, chars = data.chars.len(), "parsed kanji dictionary");
    Ok(data)
}
