pub mod snapshot;

use std::{path::Path, time::Instant};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    config::Config,
    error::{Error, Result},
    recipe::{loader, RawRecipeRow, RecipeRecord},
    vectorizer::{evaluate::scoring::Hits, TFIDFVectorizer},
};

/// Recipes plus the TF-IDF model fitted over their NER text.
///
/// Row `i` of the model belongs to `recipes()[i]`. Built once, read-only
/// afterwards; share it by reference across searches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusIndex {
    recipes: Vec<RecipeRecord>,
    vectorizer: TFIDFVectorizer,
}

impl CorpusIndex {
    /// Fit the model over parsed recipes
    pub fn build(recipes: Vec<RecipeRecord>) -> Result<Self> {
        let started = Instant::now();
        let texts: Vec<String> = recipes.par_iter().map(RecipeRecord::ner_text).collect();
        let vectorizer = TFIDFVectorizer::fit(&texts)?;
        let index = Self { recipes, vectorizer };
        info!(
            recipes = index.len(),
            vocabulary = index.vectorizer.dim(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "corpus index built"
        );
        Ok(index)
    }

    /// Parse raw rows and fit. Any unparseable row fails the build.
    pub fn build_from_raw(rows: Vec<RawRecipeRow>) -> Result<Self> {
        let recipes = rows
            .into_iter()
            .enumerate()
            .map(|(i, raw)| RecipeRecord::from_raw(raw, i + 1))
            .collect::<Result<Vec<_>>>()?;
        Self::build(recipes)
    }

    /// Load a CSV dataset and fit
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::build(loader::load_csv(path)?)
    }

    /// Startup entry point: prefer the snapshot when configured and present,
    /// otherwise build from the dataset and write the snapshot if configured.
    pub fn open(config: &Config) -> Result<Self> {
        if let Some(snapshot) = &config.snapshot_path {
            if snapshot.exists() {
                return Self::load(snapshot);
            }
        }
        let index = Self::from_csv(&config.data_path)?;
        if let Some(snapshot) = &config.snapshot_path {
            index.save(snapshot)?;
        }
        Ok(index)
    }

    #[inline]
    pub fn recipes(&self) -> &[RecipeRecord] {
        &self.recipes
    }

    #[inline]
    pub fn recipe(&self, row: usize) -> Option<&RecipeRecord> {
        self.recipes.get(row)
    }

    #[inline]
    pub fn vectorizer(&self) -> &TFIDFVectorizer {
        &self.vectorizer
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Cosine similarity of `text` against every recipe
    pub fn similarity(&self, text: &str) -> Hits {
        self.vectorizer.similarity(text)
    }

    pub(crate) fn check_consistency(&self) -> Result<()> {
        let rows = self.vectorizer.doc_num();
        if rows != self.recipes.len() {
            return Err(Error::InconsistentIndex { recipes: self.recipes.len(), rows });
        }
        Ok(())
    }
}
