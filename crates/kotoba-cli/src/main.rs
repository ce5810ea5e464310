use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use kotoba_core::Translator;

/// Look up a span of Japanese text against local dictionary files.
#[derive(Debug, Parser)]
#[command(name = "kotoba", version)]
struct Args {
    /// Deinflection rule table (JSON).
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Term dictionary file; may be given multiple times. Lookup order
    /// follows argument order.
    #[arg(long = "term-dict")]
    term_dicts: Vec<PathBuf>,

    /// Kanji dictionary file; may be given multiple times.
    #[arg(long = "kanji-dict")]
    kanji_dicts: Vec<PathBuf>,

    /// Look up individual kanji instead of terms.
    #[arg(long)]
    kanji: bool,

    /// Emit results as JSON instead of plain text.
    #[arg(long)]
    json: bool,

    /// Text to resolve.
    text: String,
}

/// Dictionary name for a data file: the file stem, unless another file
/// already claimed it, in which case the full path. Installing two
/// dictionaries under one name would silently replace the first.
fn dict_name(path: &Path, used: &mut HashSet<String>) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let name = if used.contains(&stem) {
        tracing::warn!(
            stem = %stem,
            path = %path.display(),
            "dictionary name collision, using full path"
        );
        path.display().to_string()
    } else {
        stem
    };
    used.insert(name.clone());
    name
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut translator = Translator::new();
    let mut used_names: HashSet<String> = HashSet::new();
    if let Some(path) = &args.rules {
        let rules = kotoba_ingest::load_rules(path)
            .with_context(|| format!("loading rules from {}", path.display()))?;
        translator.install_rules(rules);
    }
    for path in &args.term_dicts {
        let name = dict_name(path, &mut used_names);
        let data = kotoba_ingest::load_term_dict(&name, path)
            .with_context(|| format!("loading term dictionary {}", path.display()))?;
        translator.install_term_dictionary(&name, data);
    }
    for path in &args.kanji_dicts {
        let name = dict_name(path, &mut used_names);
        let data = kotoba_ingest::load_kanji_dict(&name, path)
            .with_context(|| format!("loading kanji dictionary {}", path.display()))?;
        translator.install_kanji_dictionary(&name, data);
    }
    translator.finish_loading();

    if args.kanji {
        let results = translator.resolve_kanji(&args.text);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&results)?);
        } else {
            for entry in results {
                println!(
                    "{}\tkun: {}\ton: {}\t{}",
                    entry.character,
                    entry.kunyomi.join("、"),
                    entry.onyomi.join("、"),
                    entry.glossary.join("; ")
                );
            }
        }
        return Ok(());
    }

    let resolution = translator.resolve_term(&args.text);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
    } else {
        for hit in &resolution.interpretations {
            let rules = if hit.rules.is_empty() {
                String::new()
            } else {
                format!(" ({})", hit.rules.join(" < "))
            };
            println!(
                "{} [{}]{}\t{}",
                hit.expression,
                hit.reading,
                rules,
                hit.glossary.join("; ")
            );
        }
        tracing::debug!(
            matched = resolution.max_source_len,
            hits = resolution.interpretations.len(),
            "resolution finished"
        );
    }

    Ok(())
}
