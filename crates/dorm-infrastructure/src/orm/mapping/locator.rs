//! Mapping file locator

use crate::error_ext::ErrorContext;
use dorm_domain::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Finds mapping files named `<name><extension>` in one directory
#[derive(Debug, Clone)]
pub struct FileLocator {
    dir: PathBuf,
    extension: String,
}

impl FileLocator {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Path of the mapping file for `name`
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}{}", self.extension))
    }

    /// True when the mapping file for `name` exists
    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).is_file()
    }

    /// Read the mapping file for `name`
    pub fn read(&self, name: &str) -> Result<String> {
        let path = self.path_for(name);
        std::fs::read_to_string(&path)
            .io_context(format!("Failed to read mapping file {}", path.display()))
    }

    /// Names of every mapping file in the directory, sorted
    pub fn names(&self) -> Result<Vec<String>> {
        if !self.dir.is_dir() {
            return Err(Error::mapping(format!(
                "Mapping directory \"{}\" does not exist",
                self.dir.display()
            )));
        }

        let entries = std::fs::read_dir(&self.dir).io_context(format!(
            "Failed to list mapping directory {}",
            self.dir.display()
        ))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.io_context("Failed to read mapping directory entry")?;
            let file_name = entry.file_name();
            if let Some(name) = file_name
                .to_str()
                .and_then(|f| f.strip_suffix(self.extension.as_str()))
            {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}
