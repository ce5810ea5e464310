use std::collections::HashMap;

use kotoba_core::{DeinflectRule, KanjiDictData, TermDef, TermDictData, Translator};

fn term_data(defs: &[(&str, &str, &str, &str)]) -> TermDictData {
    let mut data = TermDictData::default();
    for (i, (expression, reading, tags, gloss)) in defs.iter().enumerate() {
        data.defs.push(TermDef {
            expression: expression.to_string(),
            reading: reading.to_string(),
            tags: tags.split_whitespace().map(str::to_string).collect(),
            glossary: vec![gloss.to_string()],
        });
        data.indices
            .entry(expression.to_string())
            .or_default()
            .push(i);
    }
    data
}

fn rule(from: &str, to: &str, tags: &[&str], name: &str) -> DeinflectRule {
    DeinflectRule {
        from_suffix: from.to_string(),
        to_suffix: to.to_string(),
        required_tags: tags.iter().map(|t| t.to_string()).collect(),
        name: name.to_string(),
    }
}

fn loaded_translator() -> Translator {
    let mut translator = Translator::new();
    translator.install_rules(vec![
        rule("た", "る", &["v1"], "past"),
        rule("ない", "る", &["v1"], "negative"),
    ]);
    translator.install_term_dictionary(
        "edict",
        term_data(&[
            ("食べる", "たべる", "v1 P", "to eat"),
            ("日本", "にほん", "n P", "Japan"),
            ("日本語", "にほんご", "n", "Japanese language"),
            ("日", "ひ", "n", "day"),
        ]),
    );
    translator.finish_loading();
    translator
}

#[test]
fn deinflected_match_reports_rule_chain() {
    let translator = loaded_translator();
    let resolution = translator.resolve_term("食べた");

    assert_eq!(resolution.interpretations.len(), 1);
    let hit = &resolution.interpretations[0];
    assert_eq!(hit.expression, "食べる");
    assert_eq!(hit.source, "食べた");
    assert_eq!(hit.rules, vec!["past".to_string()]);
    assert_eq!(resolution.max_source_len, 3);
}

#[test]
fn empty_input_resolves_to_nothing() {
    let translator = loaded_translator();
    let resolution = translator.resolve_term("");

    assert!(resolution.interpretations.is_empty());
    assert_eq!(resolution.max_source_len, 0);
}

#[test]
fn unmatched_input_resolves_to_nothing() {
    let translator = loaded_translator();
    let resolution = translator.resolve_term("xyz");

    assert!(resolution.interpretations.is_empty());
    assert_eq!(resolution.max_source_len, 0);
}

#[test]
fn max_source_len_never_exceeds_input_length() {
    let translator = loaded_translator();
    // \u{3300} (㌀) NFKC-expands to アパート, 1 char to 4.
    for text in ["食べた", "日本語です", "日", "ですです", "", "\u{3300}食べた"] {
        let resolution = translator.resolve_term(text);
        assert!(
            resolution.max_source_len <= text.chars().count(),
            "max_source_len {} exceeds input length {} for {text:?}",
            resolution.max_source_len,
            text.chars().count()
        );
    }
}

#[test]
fn expanding_compatibility_char_reports_original_span() {
    let mut translator = Translator::new();
    translator.install_rules(Vec::new());
    translator.install_term_dictionary(
        "edict",
        term_data(&[("アパート", "アパート", "n", "apartment")]),
    );
    translator.finish_loading();

    // The single char ㌀ normalizes to アパート and must match, but the
    // reported span indexes the caller's text, not the normalized form.
    let resolution = translator.resolve_term("\u{3300}");
    assert_eq!(resolution.interpretations.len(), 1);
    assert_eq!(resolution.interpretations[0].expression, "アパート");
    assert_eq!(resolution.interpretations[0].source, "\u{3300}");
    assert_eq!(resolution.max_source_len, 1);
}

#[test]
fn longer_matched_span_ranks_first() {
    let translator = loaded_translator();
    let resolution = translator.resolve_term("日本語");

    let expressions: Vec<&str> = resolution
        .interpretations
        .iter()
        .map(|i| i.expression.as_str())
        .collect();
    assert_eq!(expressions, vec!["日本語", "日本", "日"]);
    assert_eq!(resolution.max_source_len, 3);
}

#[test]
fn primary_tag_breaks_equal_span_ties() {
    let mut translator = Translator::new();
    translator.install_rules(Vec::new());
    // Same surface, one entry common-tagged, installed after the plain one.
    translator.install_term_dictionary(
        "edict",
        term_data(&[
            ("雨", "あめ", "n", "candy (rare spelling)"),
            ("雨", "あめ", "n P", "rain"),
        ]),
    );
    translator.finish_loading();

    let resolution = translator.resolve_term("雨");
    assert_eq!(resolution.interpretations.len(), 2);
    assert!(resolution.interpretations[0].tags.contains(&"P".to_string()));
    assert_eq!(resolution.interpretations[0].glossary, vec!["rain".to_string()]);
}

#[test]
fn fewer_rule_applications_break_remaining_ties() {
    let mut translator = Translator::new();
    // Two chains over the same surface length landing on distinct entries:
    // a literal adjective and a deinflected verb.
    translator.install_rules(vec![rule("ない", "る", &["v1"], "negative")]);
    translator.install_term_dictionary(
        "edict",
        term_data(&[
            ("見る", "みる", "v1", "to see"),
            ("見ない", "みない", "adj-i", "unseen (fictitious)"),
        ]),
    );
    translator.finish_loading();

    let resolution = translator.resolve_term("見ない");
    assert_eq!(resolution.interpretations.len(), 2);
    assert!(resolution.interpretations[0].rules.is_empty());
    assert_eq!(resolution.interpretations[1].rules, vec!["negative".to_string()]);
}

#[test]
fn duplicated_chains_deduplicate_by_entry() {
    let mut translator = Translator::new();
    // Both rules reduce 食べた to the same root.
    translator.install_rules(vec![
        rule("た", "る", &["v1"], "past"),
        rule("べた", "べる", &["v1"], "past-compound"),
    ]);
    translator.install_term_dictionary(
        "edict",
        term_data(&[("食べる", "たべる", "v1", "to eat")]),
    );
    translator.finish_loading();

    let resolution = translator.resolve_term("食べた");
    assert_eq!(resolution.interpretations.len(), 1);
}

#[test]
fn every_installed_expression_is_found_literally() {
    let defs = [
        ("食べる", "たべる", "v1 P", "to eat"),
        ("走る", "はしる", "v5r", "to run"),
        ("静か", "しずか", "adj-na", "quiet"),
    ];
    let mut translator = Translator::new();
    translator.install_rules(Vec::new());
    translator.install_term_dictionary("edict", term_data(&defs));
    translator.finish_loading();

    for (expression, _, _, _) in defs {
        let resolution = translator.resolve_term(expression);
        assert!(
            resolution
                .interpretations
                .iter()
                .any(|i| i.expression == expression && i.rules.is_empty()),
            "literal lookup failed for {expression}"
        );
    }
}

#[test]
fn resolve_before_finish_is_empty_not_a_panic() {
    let mut translator = Translator::new();
    translator.install_rules(Vec::new());
    translator.install_term_dictionary("edict", term_data(&[("猫", "ねこ", "n", "cat")]));

    let resolution = translator.resolve_term("猫");
    assert!(resolution.interpretations.is_empty());
    assert!(translator.resolve_kanji("猫").is_empty());

    translator.finish_loading();
    assert_eq!(translator.resolve_term("猫").interpretations.len(), 1);
}

#[test]
fn kanji_pass_deduplicates_and_keeps_first_occurrence_order() {
    let mut translator = Translator::new();
    translator.install_rules(Vec::new());

    let mut chars: HashMap<char, (Vec<String>, Vec<String>, Vec<String>)> = HashMap::new();
    chars.insert(
        '日',
        (
            vec!["ひ".to_string()],
            vec!["ニチ".to_string()],
            vec!["sun, day".to_string()],
        ),
    );
    chars.insert(
        '本',
        (
            vec!["もと".to_string()],
            vec!["ホン".to_string()],
            vec!["book, origin".to_string()],
        ),
    );
    translator.install_kanji_dictionary("kanjidic", KanjiDictData { chars });
    translator.finish_loading();

    let results = translator.resolve_kanji("日本日本語");
    let characters: Vec<char> = results.iter().map(|k| k.character).collect();
    // 語 is not defined; repeats of 日 and 本 appear once.
    assert_eq!(characters, vec!['日', '本']);
}
