use thiserror::Error;

#[derive(Debug, Error)]
pub enum Status {
    #[error("Bad file version {0}, expected {1}")]
    BadFileVersion(usize, usize),
    #[error("Gap must be a positive number of seconds, not {0}")]
    BadGap(i64),
    #[error("No usable record in {0}")]
    NoRecords(String),
    #[error("Output {0} is not a directory")]
    BadOutput(String),
}
