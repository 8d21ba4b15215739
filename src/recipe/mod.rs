pub mod loader;
pub mod response;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One row of the dataset as stored: list-valued columns are JSON arrays
/// encoded in a text cell.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecipeRow {
    pub title: String,
    pub ingredients: String,
    pub directions: String,
    #[serde(rename = "NER")]
    pub ner: String,
}

/// Parsed, immutable recipe.
///
/// Deserializing goes through [`RecipeRecord::new`], which derives the
/// lower-cased NER copy used for matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RecipeFields")]
pub struct RecipeRecord {
    title: String,
    /// ingredient display strings, e.g. "1 c. brown sugar"
    ingredients: Vec<String>,
    /// cooking steps in order
    directions: Vec<String>,
    /// normalized ingredient names
    ner: Vec<String>,
    /// `ner` lower-cased once for substring matching
    #[serde(skip_serializing)]
    ner_lower: Vec<String>,
}

/// Stored shape of a [`RecipeRecord`]
#[derive(Deserialize)]
struct RecipeFields {
    title: String,
    ingredients: Vec<String>,
    directions: Vec<String>,
    ner: Vec<String>,
}

impl From<RecipeFields> for RecipeRecord {
    fn from(fields: RecipeFields) -> Self {
        Self::new(fields.title, fields.ingredients, fields.directions, fields.ner)
    }
}

fn parse_list(raw: &str, row: usize, column: &'static str) -> Result<Vec<String>> {
    serde_json::from_str(raw).map_err(|source| Error::MalformedField { row, column, source })
}

impl RecipeRecord {
    pub fn new(title: String, ingredients: Vec<String>, directions: Vec<String>, ner: Vec<String>) -> Self {
        let ner_lower = ner.iter().map(|n| n.to_lowercase()).collect();
        Self { title, ingredients, directions, ner, ner_lower }
    }

    /// Parse a raw row. `row` is the 1-based data row number used in errors.
    pub fn from_raw(raw: RawRecipeRow, row: usize) -> Result<Self> {
        let ingredients = parse_list(&raw.ingredients, row, "ingredients")?;
        let directions = parse_list(&raw.directions, row, "directions")?;
        let ner = parse_list(&raw.ner, row, "NER")?;
        Ok(Self::new(raw.title, ingredients, directions, ner))
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    #[inline]
    pub fn directions(&self) -> &[String] {
        &self.directions
    }

    #[inline]
    pub fn ner(&self) -> &[String] {
        &self.ner
    }

    /// NER list joined by single spaces; the text the TF-IDF model sees
    pub fn ner_text(&self) -> String {
        self.ner.join(" ")
    }

    /// Length of the NER list
    #[inline]
    pub fn ingredient_count(&self) -> usize {
        self.ner.len()
    }

    /// Steps joined into one text
    pub fn instructions(&self) -> String {
        self.directions.join(" ")
    }

    /// Whether some normalized ingredient contains `term_lower`.
    /// `term_lower` must already be lower-cased.
    #[inline]
    pub fn has_ingredient_like(&self, term_lower: &str) -> bool {
        self.ner_lower.iter().any(|ing| ing.contains(term_lower))
    }

    /// Number of `terms_lower` found in some normalized ingredient
    pub fn matched_count<T: AsRef<str>>(&self, terms_lower: &[T]) -> usize {
        terms_lower.iter().filter(|t| self.has_ingredient_like(t.as_ref())).count()
    }

    /// Every term is found in some normalized ingredient
    pub fn full_match<T: AsRef<str>>(&self, terms_lower: &[T]) -> bool {
        terms_lower.iter().all(|t| self.has_ingredient_like(t.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(ner: &str) -> RawRecipeRow {
        RawRecipeRow {
            title: "Rice Bowl".to_string(),
            ingredients: r#"["1 c. rice", "2 chicken breasts"]"#.to_string(),
            directions: r#"["Boil rice.", "Add chicken."]"#.to_string(),
            ner: ner.to_string(),
        }
    }

    #[test]
    fn parses_json_list_columns() {
        let rec = RecipeRecord::from_raw(raw(r#"["Chicken Breasts", "rice"]"#), 1).expect("parse");
        assert_eq!(rec.title(), "Rice Bowl");
        assert_eq!(rec.ingredients(), ["1 c. rice", "2 chicken breasts"]);
        assert_eq!(rec.directions(), ["Boil rice.", "Add chicken."]);
        assert_eq!(rec.ner_text(), "Chicken Breasts rice");
        assert_eq!(rec.ingredient_count(), 2);
        assert_eq!(rec.instructions(), "Boil rice. Add chicken.");
    }

    #[test]
    fn malformed_list_reports_row_and_column() {
        let err = RecipeRecord::from_raw(raw("['rice'"), 7).unwrap_err();
        match err {
            Error::MalformedField { row, column, .. } => {
                assert_eq!(row, 7);
                assert_eq!(column, "NER");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn substring_match_is_case_insensitive() {
        let rec = RecipeRecord::from_raw(raw(r#"["Chicken Breasts", "brown rice"]"#), 1).expect("parse");
        assert!(rec.has_ingredient_like("chick"));
        assert!(rec.has_ingredient_like("rice"));
        assert!(!rec.has_ingredient_like("salt"));
        assert!(rec.full_match(&["chicken", "rice"]));
        assert!(!rec.full_match(&["chicken", "salt"]));
        assert_eq!(rec.matched_count(&["chicken", "salt", "brown"]), 2);
    }

    #[test]
    fn deserialize_rebuilds_matching_copy() {
        let json = r#"{
            "title": "Bowl",
            "ingredients": ["1 c. chicken", "1 c. rice"],
            "directions": ["Cook."],
            "ner": ["Chicken", "Brown Rice"],
            "ner_lower": ["salt"]
        }"#;
        let rec: RecipeRecord = serde_json::from_str(json).expect("record");
        assert!(rec.full_match(&["chicken", "rice"]));
        assert!(!rec.has_ingredient_like("salt"));
        assert_eq!(rec.ner(), ["Chicken", "Brown Rice"]);

        let stored = serde_json::to_value(&rec).expect("json");
        assert!(stored.get("ner_lower").is_none());
        let back: RecipeRecord = serde_json::from_value(stored).expect("record");
        assert_eq!(back, rec);
    }
}
