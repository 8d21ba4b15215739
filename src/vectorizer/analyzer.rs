/// Minimum token length kept by the analyzer
pub const MIN_TOKEN_CHARS: usize = 2;

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split text into lower-cased word tokens.
///
/// A token is a maximal run of word characters (alphanumeric or `_`);
/// runs shorter than [`MIN_TOKEN_CHARS`] are dropped.
///
/// # Examples
/// ```
/// use recipe_matcher::vectorizer::analyzer::tokenize;
/// assert_eq!(tokenize("Brown sugar, 2 eggs & vanilla-extract"),
///            vec!["brown", "sugar", "eggs", "vanilla", "extract"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    lowered
        .split(|c: char| !is_word_char(c))
        .filter(|tok| tok.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}
