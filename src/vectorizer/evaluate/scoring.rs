use std::fmt::Debug;

use num::Float;
use rayon::prelude::*;

use crate::{utils::math::vector::ZeroSpVec, vectorizer::{tfidf::TFIDFEngine, TFIDFVectorizer}};

/// One scored document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitEntry {
    /// row index in the fitted corpus
    pub row: usize,
    pub score: f64,
}

/// Structure to store search results
pub struct Hits {
    pub list: Vec<HitEntry>,
}

impl Hits {
    pub fn new(list: Vec<HitEntry>) -> Self {
        Hits { list }
    }

    /// Keep entries scoring at least `min_score`, NaN scores are dropped
    pub fn retain_min_score(&mut self, min_score: f64) -> &mut Self {
        self.list.retain(|hit| hit.score >= min_score);
        self
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

impl Debug for Hits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            writeln!(f, "Hits [")?;
            for hit in &self.list {
                writeln!(f, "    #{}: {:.6}", hit.row, hit.score)?;
            }
            write!(f, "]")
        } else {
            f.debug_list().entries(&self.list).finish()
        }
    }
}

impl<N, E> TFIDFVectorizer<N, E>
where
    N: Float + Into<f64> + Send + Sync,
    E: TFIDFEngine<N>,
{
    /// Cosine similarity of `text` against every row, in row order
    pub fn similarity(&self, text: &str) -> Hits {
        let query = self.transform(text);
        self.similarity_vec(&query)
    }

    /// Cosine similarity of an already vectorized query against every row.
    ///
    /// Rows and queries produced by this vectorizer are unit length, so the
    /// score is their dot product.
    /// cosθ = A・B / (|A||B|)
    pub fn similarity_vec(&self, query: &ZeroSpVec<N>) -> Hits {
        if query.nnz() == 0 {
            let list = (0..self.documents.len()).map(|row| HitEntry { row, score: 0.0 }).collect();
            return Hits::new(list);
        }
        let list = self
            .documents
            .par_iter()
            .enumerate()
            .map(|(row, doc)| HitEntry { row, score: query.dot(&doc.tfidf_vec) })
            .collect();
        Hits::new(list)
    }
}
