use std::collections::HashSet;

use crate::{config::DEFAULT_TARGET_COUNT, recipe::response::RecognizedProduct};

/// Ingredient terms to match plus the number of recipes wanted.
///
/// Terms are de-duplicated case-insensitively on construction; the first
/// spelling wins and order is preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    terms: Vec<String>,
    target_count: usize,
}

impl Query {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let terms = terms
            .into_iter()
            .map(Into::into)
            .filter(|term: &String| seen.insert(term.to_lowercase()))
            .collect();
        Self { terms, target_count: DEFAULT_TARGET_COUNT }
    }

    /// Query from client-side recognized products; counts are ignored
    pub fn from_products(products: &[RecognizedProduct]) -> Self {
        Self::new(products.iter().map(|p| p.name.as_str()))
    }

    pub fn with_target(mut self, target_count: usize) -> Self {
        self.target_count = target_count;
        self
    }

    #[inline]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    #[inline]
    pub fn target_count(&self) -> usize {
        self.target_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedupes_case_insensitively_keeping_first() {
        let q = Query::new(["Chicken", "rice", "chicken", "RICE", "salt"]);
        assert_eq!(q.terms(), ["Chicken", "rice", "salt"]);
        assert_eq!(q.target_count(), DEFAULT_TARGET_COUNT);
    }

    #[test]
    fn from_products_uses_names() {
        let products = vec![
            RecognizedProduct { name: "tomato".to_string(), count: 3 },
            RecognizedProduct { name: "basil".to_string(), count: 1 },
        ];
        let q = Query::from_products(&products).with_target(5);
        assert_eq!(q.terms(), ["tomato", "basil"]);
        assert_eq!(q.target_count(), 5);
    }

    #[test]
    fn empty_query() {
        assert!(Query::new(Vec::<String>::new()).is_empty());
    }
}
