//! CBOR persistence of a built [`CorpusIndex`].
//!
//! A snapshot is a frozen copy of the whole index; loading it skips parsing
//! and fitting but yields exactly the same rows.
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use tracing::info;

use crate::{
    error::{Error, Result},
    index::CorpusIndex,
};

impl CorpusIndex {
    /// Write the index to `path`, replacing any existing file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| Error::io(path, e))?;
        let mut writer = BufWriter::new(file);
        serde_cbor::to_writer(&mut writer, self)?;
        writer.flush().map_err(|e| Error::io(path, e))?;
        info!(path = %path.display(), recipes = self.len(), "index snapshot written");
        Ok(())
    }

    /// Read an index written by [`CorpusIndex::save`]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let index: CorpusIndex = serde_cbor::from_reader(BufReader::new(file))?;
        index.check_consistency()?;
        info!(path = %path.display(), recipes = index.len(), "index snapshot loaded");
        Ok(index)
    }
}
