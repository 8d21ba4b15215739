use std::{fs::File, io::Read, path::Path};

use tracing::info;

use crate::{
    error::{Error, Result},
    recipe::{RawRecipeRow, RecipeRecord},
};

/// Read every row of a RecipeNLG-style CSV file.
///
/// Columns `title`, `ingredients`, `directions` and `NER` are required,
/// others are ignored. Loading is all-or-nothing: the first bad row aborts.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<RecipeRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let records = read_csv(file)?;
    info!(path = %path.display(), recipes = records.len(), "recipe dataset loaded");
    Ok(records)
}

/// Parse recipes from any CSV source with a header row
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<RecipeRecord>> {
    read_raw_rows(reader)?
        .into_iter()
        .enumerate()
        .map(|(i, raw)| RecipeRecord::from_raw(raw, i + 1))
        .collect()
}

/// Rows with list columns still serialized
pub fn read_raw_rows<R: Read>(reader: R) -> Result<Vec<RawRecipeRow>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for row in csv_reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}
