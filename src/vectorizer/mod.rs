pub mod analyzer;
pub mod corpus;
pub mod evaluate;
pub mod tfidf;
pub mod token;

use std::marker::PhantomData;

use indexmap::IndexSet;
use num::Float;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{Error, Result},
    utils::math::vector::ZeroSpVec,
    vectorizer::{corpus::Corpus, tfidf::{DefaultTFIDFEngine, TFIDFEngine}, token::TokenFrequency},
};

/// TF-IDF Vectorizer fitted once over a fixed set of documents.
///
/// Holds the vocabulary, the IDF weights and one unit-length TF-IDF row per
/// training document, in training order. Nothing is refit after [`fit`].
///
/// [`fit`]: TFIDFVectorizer::fit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TFIDFVectorizer<N = f64, E = DefaultTFIDFEngine>
where
    N: Float + Into<f64> + Send + Sync,
    E: TFIDFEngine<N>,
{
    /// Document rows, aligned with the training order
    pub documents: Vec<DocVector<N>>,
    /// Token dimensions, lexicographic
    pub vocabulary: IndexSet<Box<str>>,
    pub idf: IDFVector<N>,
    #[serde(skip)]
    _marker: PhantomData<E>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocVector<N> {
    /// unit-length TF-IDF weights
    pub tfidf_vec: ZeroSpVec<N>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IDFVector<N> {
    /// dense, one weight per vocabulary entry
    pub idf_vec: Vec<N>,
    pub doc_num: u64,
}

impl<N, E> TFIDFVectorizer<N, E>
where
    N: Float + Into<f64> + Send + Sync,
    E: TFIDFEngine<N>,
{
    /// Fit over raw texts
    pub fn fit<T>(texts: &[T]) -> Result<Self>
    where
        T: AsRef<str> + Sync,
    {
        let freqs: Vec<TokenFrequency> = texts
            .par_iter()
            .map(|text| TokenFrequency::from_text(text.as_ref()))
            .collect();
        Self::fit_freqs(&freqs)
    }

    /// Fit over already tokenized documents.
    /// Fails with [`Error::EmptyVocabulary`] when no document has a token.
    pub fn fit_freqs(freqs: &[TokenFrequency]) -> Result<Self> {
        let corpus = Corpus::from_freqs(freqs);
        if corpus.vocab_size() == 0 {
            return Err(Error::EmptyVocabulary);
        }
        let vocabulary: IndexSet<Box<str>> = corpus.sorted_terms().into_iter().collect();
        let idf = IDFVector {
            idf_vec: E::idf_vec(&corpus, &vocabulary),
            doc_num: corpus.get_doc_num(),
        };
        let documents: Vec<DocVector<N>> = freqs
            .par_iter()
            .map(|freq| {
                let mut tfidf_vec = E::tfidf_vec(freq, &vocabulary, &idf.idf_vec);
                tfidf_vec.shrink_to_fit();
                DocVector { tfidf_vec }
            })
            .collect();
        debug!(docs = documents.len(), vocab = vocabulary.len(), "tf-idf model fitted");
        Ok(Self { documents, vocabulary, idf, _marker: PhantomData })
    }

    /// Vectorize a query against the fitted model.
    /// Out-of-vocabulary tokens contribute nothing.
    pub fn transform(&self, text: &str) -> ZeroSpVec<N> {
        let freq = TokenFrequency::from_text(text);
        E::tfidf_vec(&freq, &self.vocabulary, &self.idf.idf_vec)
    }

    /// Row of the `index`-th training document
    #[inline]
    pub fn row(&self, index: usize) -> Option<&DocVector<N>> {
        self.documents.get(index)
    }

    #[inline]
    pub fn doc_num(&self) -> usize {
        self.documents.len()
    }

    /// Vector dimensionality (vocabulary size)
    #[inline]
    pub fn dim(&self) -> usize {
        self.vocabulary.len()
    }

    #[inline]
    pub fn contains_token(&self, token: &str) -> bool {
        self.vocabulary.contains(token)
    }
}
