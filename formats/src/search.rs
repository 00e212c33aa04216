//! Find the ADS-B data file.
//!
//! Depending on where the tools are run from, the data lives in a different place relative to
//! the current directory so we try a list of candidates in order.
//!

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::FormatError;

/// Where we look by default.
///
pub const DEFAULT_SEARCH: [&str; 4] = [
    "adsb25/orly.jsonl.gz",
    "TP_FINAL/adsb25/orly.jsonl.gz",
    "../TP_FINAL/adsb25/orly.jsonl.gz",
    "./adsb25/orly.jsonl.gz",
];

/// Return the first candidate that exists, or the list of everything we tried.
///
#[tracing::instrument(skip(candidates))]
pub fn find_data_file<P: AsRef<Path>>(candidates: &[P]) -> Result<PathBuf, FormatError> {
    for cand in candidates {
        let cand = cand.as_ref();
        trace!("trying {cand:?}");
        if cand.exists() {
            debug!("found data in {cand:?}");
            return Ok(cand.to_path_buf());
        }
    }
    Err(FormatError::DataFileNotFound(
        candidates.iter().map(|p| p.as_ref().to_path_buf()).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_find_first_existing() {
        let dir = tempdir().unwrap();
        let second = dir.path().join("b.jsonl.gz");
        let third = dir.path().join("c.jsonl.gz");
        File::create(&second).unwrap();
        File::create(&third).unwrap();

        let cands = [dir.path().join("a.jsonl.gz"), second.clone(), third];
        assert_eq!(second, find_data_file(&cands).unwrap());
    }

    #[test]
    fn test_find_lists_everything() {
        let err = find_data_file(&["/nonexistent/a.jsonl.gz", "/nonexistent/b.jsonl.gz"])
            .unwrap_err();

        match &err {
            FormatError::DataFileNotFound(list) => assert_eq!(2, list.len()),
            _ => panic!("wrong error {err:?}"),
        }
        let msg = err.to_string();
        assert!(msg.contains("/nonexistent/a.jsonl.gz"));
        assert!(msg.contains("/nonexistent/b.jsonl.gz"));
    }

    #[test]
    fn test_find_nothing_to_search() {
        let none: [&str; 0] = [];
        assert!(find_data_file(&none).is_err());
    }
}
