use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::vectorizer::token::TokenFrequency;

/// Document count and per-term document frequency of a training set.
/// It does not keep document text or keys.
///
/// Used as the base data for IDF calculation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    /// number of documents added
    pub doc_num: u64,
    /// term -> number of documents containing it
    pub term_counts: IndexMap<Box<str>, u64>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the token frequencies of every document, in parallel
    pub fn from_freqs(freqs: &[TokenFrequency]) -> Self {
        freqs
            .par_iter()
            .fold(Corpus::new, |mut corpus, freq| {
                corpus.add_set(&freq.token_set_ref_str());
                corpus
            })
            .reduce(Corpus::new, |mut a, b| {
                a.merge_corpus(b);
                a
            })
    }

    /// Add one document's distinct terms
    pub fn add_set<T>(&mut self, terms: &[T])
    where
        T: AsRef<str>,
    {
        self.doc_num += 1;
        for term in terms {
            *self.term_counts.entry(term.as_ref().into()).or_insert(0) += 1;
        }
    }

    /// Merge another corpus into self
    pub fn merge_corpus(&mut self, other: Corpus) {
        self.doc_num += other.doc_num;
        for (term, count) in other.term_counts {
            *self.term_counts.entry(term).or_insert(0) += count;
        }
    }

    #[inline]
    pub fn get_doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Document frequency of `term`
    #[inline]
    pub fn get_term_count(&self, term: &str) -> u64 {
        self.term_counts.get(term).copied().unwrap_or(0)
    }

    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.term_counts.len()
    }

    /// All terms in lexicographic order
    pub fn sorted_terms(&self) -> Vec<Box<str>> {
        let mut terms: Vec<Box<str>> = self.term_counts.keys().cloned().collect();
        terms.par_sort_unstable();
        terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_frequency_ignores_repeats_within_a_document() {
        let mut corpus = Corpus::new();
        corpus.add_set(&["salt", "pepper"]);
        corpus.add_set(&["salt"]);
        assert_eq!(corpus.get_doc_num(), 2);
        assert_eq!(corpus.get_term_count("salt"), 2);
        assert_eq!(corpus.get_term_count("pepper"), 1);
        assert_eq!(corpus.get_term_count("sugar"), 0);
    }

    #[test]
    fn parallel_build_matches_serial_counts() {
        let freqs: Vec<TokenFrequency> = ["salt salt pepper", "pepper rice", "rice", "chicken rice salt"]
            .iter()
            .map(|t| TokenFrequency::from_text(t))
            .collect();
        let corpus = Corpus::from_freqs(&freqs);
        assert_eq!(corpus.get_doc_num(), 4);
        assert_eq!(corpus.get_term_count("salt"), 2);
        assert_eq!(corpus.get_term_count("rice"), 3);
        assert_eq!(corpus.vocab_size(), 4);
        let terms = corpus.sorted_terms();
        let sorted: Vec<&str> = terms.iter().map(|t| &**t).collect();
        assert_eq!(sorted, vec!["chicken", "pepper", "rice", "salt"]);
    }
}
