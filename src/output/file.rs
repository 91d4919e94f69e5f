//! Newline-delimited file output

use crate::output::traits::{OutputError, OutputHandler, OutputResult};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes one endpoint per line to a file, replacing any previous content
#[derive(Debug, Clone)]
pub struct FileOutput {
    path: PathBuf,
}

impl FileOutput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_to_file(&self, endpoints: &BTreeSet<String>) -> std::io::Result<()> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        for endpoint in endpoints {
            writeln!(writer, "{}", endpoint)?;
        }
        writer.flush()
    }
}

impl OutputHandler for FileOutput {
    fn write_endpoints(&mut self, endpoints: &BTreeSet<String>) -> OutputResult<()> {
        self.write_to_file(endpoints)
            .map_err(|source| OutputError::Write {
                path: self.path.display().to_string(),
                source,
            })?;

        tracing::info!("Wrote {} endpoints to {}", endpoints.len(), self.path.display());
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
