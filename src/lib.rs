/// This crate retrieves recipes whose normalized ingredient lists best match
/// a set of recognized ingredient names.
pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod recipe;
pub mod utils;
pub mod vectorizer;

/// Crate error and result types
pub use error::{Error, Result};

/// Layered configuration (defaults, `recipe-matcher.toml`, `RECIPE_*` env)
pub use config::Config;

/// Corpus Index
/// Owns every parsed recipe together with the TF-IDF model fitted over the
/// recipes' normalized ingredient text.
///
/// Built once with `CorpusIndex::build` / `CorpusIndex::from_csv`
/// (or restored from a CBOR snapshot) and never modified afterwards.
/// Searches borrow it immutably, so it can be shared across threads.
pub use index::CorpusIndex;

/// Match Engine
/// Descending combinatorial search over subsets of the query terms:
/// - cosine similarity of the subset text as a coarse pre-filter
/// - case-insensitive substring match of every subset term as admission test
/// - simpler recipes (fewer ingredients) first within a pass
///
/// `search` runs it with default settings; `MatchEngine` carries the tunables.
pub use engine::{search, MatchEngine, MatchResult, Query};

/// Recipe Record
/// A strongly typed dataset row: title, ingredient display strings,
/// instruction steps and the normalized ingredient (NER) list.
pub use recipe::RecipeRecord;

/// Response records in the client-facing shape
pub use recipe::response::{Ingredient, RecipeResponse, RecognizedProduct};

/// TF-IDF Vectorizer
/// Fitted once over a document set; holds the sorted vocabulary, smoothed IDF
/// weights and one unit-length TF-IDF row per document.
///
/// `TFIDFVectorizer<N, E>` has the following generic parameters:
/// - `N`: Vector parameter type (`f32` or `f64`)
/// - `E`: TF-IDF calculation engine type (e.g., DefaultTFIDFEngine)
pub use vectorizer::TFIDFVectorizer;

/// TF IDF Calculation Engine Trait
/// Plug a different weighting into `TFIDFVectorizer<N, E>` by implementing it.
/// `DefaultTFIDFEngine` uses raw counts for TF and `ln((1 + n) / (1 + df)) + 1`
/// for IDF, with L2-normalized rows.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// Token Frequency structure
/// Token occurrence counts of a single document.
pub use vectorizer::token::TokenFrequency;

/// Search Hits and Hit Entry structures
/// - `Hits`: a list of scored rows
/// - `HitEntry`: one row index and its score
pub use vectorizer::evaluate::scoring::{HitEntry, Hits};
