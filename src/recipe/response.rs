//! Wire shapes of the query and result records.
use serde::{Deserialize, Serialize};

use crate::engine::MatchResult;

/// A recognized ingredient as sent by clients; `count` does not take part in matching
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizedProduct {
    pub name: String,
    #[serde(default)]
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    pub title: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: String,
    pub matched_ingredients_count: usize,
}

impl From<&MatchResult<'_>> for RecipeResponse {
    fn from(result: &MatchResult<'_>) -> Self {
        let recipe = result.recipe;
        Self {
            title: recipe.title().to_string(),
            ingredients: recipe.ingredients().iter().map(|name| Ingredient { name: name.clone() }).collect(),
            instructions: recipe.instructions(),
            matched_ingredients_count: result.matched_count,
        }
    }
}

/// Project engine results into response records, keeping their order
pub fn to_responses(results: &[MatchResult<'_>]) -> Vec<RecipeResponse> {
    results.iter().map(RecipeResponse::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::RecipeRecord;

    #[test]
    fn serializes_with_camel_case_count() {
        let recipe = RecipeRecord::new(
            "Fried Rice".to_string(),
            vec!["2 c. rice".to_string(), "1 egg".to_string()],
            vec!["Cook rice.".to_string(), "Fry.".to_string()],
            vec!["rice".to_string(), "egg".to_string()],
        );
        let result = MatchResult { recipe: &recipe, row: 0, matched_count: 2, pass_size: 2, similarity: 0.9 };
        let json = serde_json::to_value(to_responses(&[result])).expect("json");
        assert_eq!(
            json,
            serde_json::json!([{
                "title": "Fried Rice",
                "ingredients": [{"name": "2 c. rice"}, {"name": "1 egg"}],
                "instructions": "Cook rice. Fry.",
                "matchedIngredientsCount": 2
            }])
        );
    }

    #[test]
    fn product_count_is_optional() {
        let products: Vec<RecognizedProduct> =
            serde_json::from_str(r#"[{"name": "tomato", "count": 3}, {"name": "basil"}]"#).expect("products");
        assert_eq!(products[1], RecognizedProduct { name: "basil".to_string(), count: 0 });
    }
}
