//! Combinatorial relaxation search.
//!
//! Query terms are tried together first, then in ever smaller subsets. For
//! every subset the TF-IDF cosine similarity narrows the corpus down to
//! candidates, and a case-insensitive substring test against each candidate's
//! normalized ingredients decides admission.
pub mod combination;
pub mod query;

use std::collections::HashSet;

use rayon::prelude::*;
use tracing::debug;

use crate::{
    config::{Config, DEFAULT_MAX_QUERY_TERMS, DEFAULT_SIMILARITY_THRESHOLD},
    engine::combination::{binomial, Combinations},
    error::{Error, Result},
    index::CorpusIndex,
    recipe::RecipeRecord,
};

pub use query::Query;

/// A recipe admitted by one combination of query terms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult<'a> {
    pub recipe: &'a RecipeRecord,
    /// row in the corpus index
    pub row: usize,
    /// combination terms found among the recipe's normalized ingredients
    pub matched_count: usize,
    /// size of the combination that admitted the recipe
    pub pass_size: usize,
    /// cosine similarity between the combination text and the recipe
    pub similarity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchEngine {
    /// minimum cosine similarity for a recipe to reach the substring test
    pub similarity_threshold: f64,
    /// queries with more distinct terms are rejected
    pub max_query_terms: usize,
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            max_query_terms: DEFAULT_MAX_QUERY_TERMS,
        }
    }
}

impl From<&Config> for MatchEngine {
    fn from(config: &Config) -> Self {
        Self {
            similarity_threshold: config.similarity_threshold,
            max_query_terms: config.max_query_terms,
        }
    }
}

impl MatchEngine {
    /// Run the search.
    ///
    /// Passes go from all terms down to single terms. Each pass collects the
    /// recipes admitted by every combination of that size, stable-sorted by
    /// ascending ingredient count. Descending stops once the collected rows
    /// (duplicates included) reach the target. The final list keeps the first
    /// entry per title and is cut to the target.
    pub fn search<'a>(&self, index: &'a CorpusIndex, query: &Query) -> Result<Vec<MatchResult<'a>>> {
        let terms = query.terms();
        let n = terms.len();
        if n > self.max_query_terms {
            return Err(Error::TooManyTerms { given: n, max: self.max_query_terms });
        }
        let target = query.target_count();
        let lowered: Vec<String> = terms.iter().map(|t| t.to_lowercase()).collect();

        let mut collected: Vec<MatchResult<'a>> = Vec::new();
        for r in (1..=n).rev() {
            let combos: Vec<Vec<usize>> = Combinations::new(n, r).collect();
            let per_combo: Vec<Vec<MatchResult<'a>>> = combos
                .par_iter()
                .map(|combo| self.evaluate(index, terms, &lowered, combo))
                .collect();
            let mut pass: Vec<MatchResult<'a>> = per_combo.into_iter().flatten().collect();
            pass.sort_by_key(|m| m.recipe.ingredient_count());
            debug!(r, combinations = %binomial(n, r), admitted = pass.len(), "pass finished");
            collected.extend(pass);
            if collected.len() >= target {
                debug!(r, collected = collected.len(), target, "target reached");
                break;
            }
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let results: Vec<MatchResult<'a>> = collected
            .into_iter()
            .filter(|m| seen.insert(m.recipe.title()))
            .take(target)
            .collect();
        debug!(terms = n, returned = results.len(), "search finished");
        Ok(results)
    }

    /// Recipes admitted by one combination, in corpus order
    fn evaluate<'a>(
        &self,
        index: &'a CorpusIndex,
        terms: &[String],
        lowered: &[String],
        combo: &[usize],
    ) -> Vec<MatchResult<'a>> {
        let text = combo.iter().map(|&i| terms[i].as_str()).collect::<Vec<_>>().join(" ");
        let combo_lower: Vec<&str> = combo.iter().map(|&i| lowered[i].as_str()).collect();

        let mut hits = index.similarity(&text);
        hits.retain_min_score(self.similarity_threshold);
        hits.list
            .iter()
            .filter_map(|hit| {
                let recipe = index.recipe(hit.row)?;
                if !recipe.full_match(&combo_lower) {
                    return None;
                }
                Some(MatchResult {
                    recipe,
                    row: hit.row,
                    matched_count: recipe.matched_count(&combo_lower),
                    pass_size: combo.len(),
                    similarity: hit.score,
                })
            })
            .collect()
    }
}

/// Search with the default engine settings
pub fn search<'a, S: AsRef<str>>(
    query_terms: &[S],
    index: &'a CorpusIndex,
    target_count: usize,
) -> Result<Vec<MatchResult<'a>>> {
    let query = Query::new(query_terms.iter().map(|t| t.as_ref())).with_target(target_count);
    MatchEngine::default().search(index, &query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(title: &str, ner: &[&str]) -> RecipeRecord {
        RecipeRecord::new(
            title.to_string(),
            ner.iter().map(|n| n.to_string()).collect(),
            vec!["Cook.".to_string()],
            ner.iter().map(|n| n.to_string()).collect(),
        )
    }

    fn index(recipes: Vec<RecipeRecord>) -> CorpusIndex {
        CorpusIndex::build(recipes).expect("build")
    }

    #[test]
    fn too_many_terms_is_rejected_before_searching() {
        let idx = index(vec![recipe("Rice", &["rice"])]);
        let engine = MatchEngine { max_query_terms: 2, ..MatchEngine::default() };
        let query = Query::new(["rice", "salt", "pepper"]);
        assert!(matches!(engine.search(&idx, &query), Err(Error::TooManyTerms { given: 3, max: 2 })));
    }

    #[test]
    fn larger_passes_rank_first() {
        let idx = index(vec![
            recipe("Only Rice", &["rice"]),
            recipe("Chicken Rice", &["chicken", "rice", "salt", "pepper", "onion"]),
            recipe("Only Chicken", &["chicken"]),
        ]);
        let results = search(&["chicken", "rice"], &idx, 10).expect("search");
        let titles: Vec<&str> = results.iter().map(|m| m.recipe.title()).collect();
        assert_eq!(titles, vec!["Chicken Rice", "Only Chicken", "Only Rice"]);
        assert_eq!(results[0].pass_size, 2);
        assert_eq!(results[0].matched_count, 2);
        assert!(results[1..].iter().all(|m| m.pass_size == 1 && m.matched_count == 1));
    }

    #[test]
    fn stop_check_happens_between_passes_only() {
        let idx = index(vec![
            recipe("A", &["chicken", "rice"]),
            recipe("B", &["chicken", "rice", "salt"]),
            recipe("C", &["chicken"]),
        ]);
        // both full matches come from the r=2 pass, which already meets the target
        let results = search(&["chicken", "rice"], &idx, 2).expect("search");
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|m| m.pass_size == 2));

        // target not reached after r=2 so r=1 runs; A and B reappear there and are deduplicated
        let results = search(&["chicken", "rice"], &idx, 3).expect("search");
        let titles: Vec<&str> = results.iter().map(|m| m.recipe.title()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn zero_target_returns_nothing() {
        let idx = index(vec![recipe("Rice", &["rice"])]);
        assert!(search(&["rice"], &idx, 0).expect("search").is_empty());
    }

    #[test]
    fn cosine_filter_gates_substring_match() {
        // "ice" is a substring of "rice" but shares no token with the corpus
        let idx = index(vec![recipe("Rice", &["rice"]), recipe("Salad", &["lettuce"])]);
        assert!(search(&["ice"], &idx, 10).expect("search").is_empty());

        // a strict threshold can reject a recipe that shares only a minor token
        let engine = MatchEngine { similarity_threshold: 0.99, ..MatchEngine::default() };
        let idx = index(vec![recipe("Fried Rice", &["rice", "egg", "soy sauce", "scallion"])]);
        let query = Query::new(["rice"]);
        assert!(engine.search(&idx, &query).expect("search").is_empty());
    }

    #[test]
    fn out_of_vocabulary_term_still_takes_part_in_substring_test() {
        // "chick" is not a corpus token, but with "rice" the combination still
        // clears the cosine filter and "chick" matches "chicken" as a substring
        let idx = index(vec![recipe("Chicken Rice", &["chicken", "rice"]), recipe("Rice", &["rice"])]);
        let results = search(&["rice", "chick"], &idx, 10).expect("search");
        assert_eq!(results[0].recipe.title(), "Chicken Rice");
        assert_eq!(results[0].matched_count, 2);
    }
}
