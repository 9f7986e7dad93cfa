//! Find the GAP documents to scan
//!
//! The input is laid out as `root/<year>/<document>`. Every entry of a year directory counts as
//! a document, whatever its extension.
use std::fs;
use std::path::{Path, PathBuf};
use config::YearSelector;
use errors::*;

/// One GAP text file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: PathBuf,
    /// Name of the directory the document is in
    pub year: String,
    /// File name without directories
    pub name: String,
}

impl Document {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let name = file_name(&path);
        let year = path.parent().map(file_name).unwrap_or_default();
        Document { path: path, year: year, name: name }
    }

    /// Read the whole document. A document that isn't UTF-8 text aborts the run.
    pub fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path)
            .map_err(|err| Error::Unreadable(self.path.clone(), err))
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// List the documents for `year`, sorted so output order doesn't depend on the filesystem
pub fn resolve(root: &Path, year: &YearSelector) -> Result<Vec<Document>> {
    let paths = match *year {
        YearSelector::All => {
            let mut paths = vec![];
            for subdir in year_dirs(root)? {
                paths.extend(list_dir(&subdir)?);
            }
            paths
        }
        YearSelector::Year(ref year) => list_dir(&root.join(year))?,
    };
    debug!("Resolved {} documents for {} under {}", paths.len(), year, root.display());
    Ok(paths.into_iter().map(Document::new).collect())
}

/// Subdirectories of `root`, sorted
fn year_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = vec![];
    for path in list_dir(root)? {
        if path.is_dir() {
            dirs.push(path);
        } else {
            debug!("Skipping {}, it is not a year directory", path.display());
        }
    }
    Ok(dirs)
}

/// Every entry directly inside `dir`, sorted
fn list_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .map_err(|err| Error::Enumeration(dir.to_path_buf(), err))?;
    let mut paths = vec![];
    for entry in entries {
        let entry = entry.map_err(|err| Error::Enumeration(dir.to_path_buf(), err))?;
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}
