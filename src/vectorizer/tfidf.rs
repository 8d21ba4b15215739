use indexmap::IndexSet;
use num::Float;

use crate::{utils::math::vector::ZeroSpVec, vectorizer::{corpus::Corpus, token::TokenFrequency}};

/// TF-IDF calculation strategy
///
/// `vocabulary` maps a token to its dimension (its position in the set).
pub trait TFIDFEngine<N>
where
    N: Float + Into<f64>,
{
    /// Build the IDF vector, one weight per vocabulary entry
    ///
    /// # Arguments
    /// * `corpus` - training corpus statistics
    /// * `vocabulary` - token dimensions
    fn idf_vec(corpus: &Corpus, vocabulary: &IndexSet<Box<str>>) -> Vec<N>;

    /// Build the sparse TF vector of a document.
    /// Tokens outside `vocabulary` are ignored.
    fn tf_vec(freq: &TokenFrequency, vocabulary: &IndexSet<Box<str>>) -> ZeroSpVec<N>;

    /// TF × IDF, scaled to unit length
    fn tfidf_vec(freq: &TokenFrequency, vocabulary: &IndexSet<Box<str>>, idf: &[N]) -> ZeroSpVec<N> {
        let tf = Self::tf_vec(freq, vocabulary);
        let pairs = tf
            .raw_iter()
            .map(|(idx, tf)| (idx, tf * idf.get(idx).copied().unwrap_or_else(N::zero)))
            .collect();
        let mut vec = ZeroSpVec::from_pairs(vocabulary.len(), pairs);
        vec.normalize_l2();
        vec
    }
}

/// Default TF-IDF engine
///
/// - tf: raw token count
/// - idf: smoothed, `ln((1 + n) / (1 + df)) + 1`
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl DefaultTFIDFEngine {
    #[inline]
    pub fn idf_calc(doc_num: u64, doc_freq: u64) -> f64 {
        ((1.0 + doc_num as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
    }
}

impl<N> TFIDFEngine<N> for DefaultTFIDFEngine
where
    N: Float + Into<f64>,
{
    fn idf_vec(corpus: &Corpus, vocabulary: &IndexSet<Box<str>>) -> Vec<N> {
        let doc_num = corpus.get_doc_num();
        vocabulary
            .iter()
            .map(|token| {
                let idf = Self::idf_calc(doc_num, corpus.get_term_count(token));
                num::cast::<f64, N>(idf).unwrap_or_else(N::zero)
            })
            .collect()
    }

    fn tf_vec(freq: &TokenFrequency, vocabulary: &IndexSet<Box<str>>) -> ZeroSpVec<N> {
        let pairs = freq
            .iter()
            .filter_map(|(token, count)| {
                let idx = vocabulary.get_index_of(token)?;
                Some((idx, num::cast::<u32, N>(count)?))
            })
            .collect();
        ZeroSpVec::from_pairs(vocabulary.len(), pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(terms: &[&str]) -> IndexSet<Box<str>> {
        terms.iter().map(|t| Box::<str>::from(*t)).collect()
    }

    #[test]
    fn smoothed_idf_matches_formula() {
        // 3 documents, term in 1 of them: ln(4 / 2) + 1
        let idf = DefaultTFIDFEngine::idf_calc(3, 1);
        assert!((idf - (2.0_f64.ln() + 1.0)).abs() < 1e-12);
        // term in every document still weighs 1.0
        assert!((DefaultTFIDFEngine::idf_calc(3, 3) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn tf_vec_skips_out_of_vocabulary_tokens() {
        let vocabulary = vocab(&["chicken", "rice"]);
        let freq = TokenFrequency::from_text("rice unicorn rice");
        let tf: ZeroSpVec<f64> = DefaultTFIDFEngine::tf_vec(&freq, &vocabulary);
        assert_eq!(tf.len(), 2);
        assert_eq!(tf.raw_iter().collect::<Vec<_>>(), vec![(1, 2.0)]);
    }

    #[test]
    fn tfidf_rows_are_unit_length() {
        let mut corpus = Corpus::new();
        corpus.add_set(&["chicken", "rice"]);
        corpus.add_set(&["rice"]);
        let vocabulary = vocab(&["chicken", "rice"]);
        let idf: Vec<f64> = DefaultTFIDFEngine::idf_vec(&corpus, &vocabulary);
        let freq = TokenFrequency::from_text("chicken rice");
        let row = DefaultTFIDFEngine::tfidf_vec(&freq, &vocabulary, &idf[..]);
        assert!((row.norm() - 1.0).abs() < 1e-12);
        // rarer term carries more weight
        assert!(row.get(0) > row.get(1));
    }

    #[test]
    fn all_oov_query_is_zero_vector() {
        let vocabulary = vocab(&["chicken"]);
        let idf = vec![1.0_f64];
        let freq = TokenFrequency::from_text("unicorn");
        let row = DefaultTFIDFEngine::tfidf_vec(&freq, &vocabulary, &idf[..]);
        assert_eq!(row.nnz(), 0);
    }
}
