//! Upfront check that every input and output location is there
use std::path::Path;
use errors::*;

/// Fail on the first path in `paths` that does not exist.
///
/// Nothing is read or written before this passes, so a typo in a directory name costs nothing.
pub fn check_exist<P: AsRef<Path>>(paths: &[P]) -> Result<()> {
    for path in paths {
        let path = path.as_ref();
        if !path.exists() {
            error!("checkexist: {} does not exist", path.display());
            return Err(Error::MissingPath(path.to_path_buf()));
        }
    }
    Ok(())
}
