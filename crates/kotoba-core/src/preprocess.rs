use unicode_normalization::UnicodeNormalization;

/// NFKC-normalize a span of text. Applied per candidate on the lookup side
/// and to dictionary surface keys and expressions at install time so the
/// two sides agree on composed forms and width variants. Deliberately does
/// nothing else: callers measure spans on their own original text, so this
/// must not shift or drop characters beyond what NFKC itself does.
pub fn normalize(text: &str) -> String {
    text.nfkc().collect()
}
