//! Read line-delimited JSON, plain or compressed.
//!
//! Compressed input is recognised either from its `.gz` extension or from the gzip magic bytes,
//! so a mis-named file is still read correctly.
//!

use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::ops::Add;
use std::path::Path;

use flate2::read::MultiGzDecoder;
use tracing::{debug, info, trace};

use crate::{FormatError, PositionRecord};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// What happened while reading a file.
///
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IngestStats {
    /// Non-blank lines seen
    pub lines: usize,
    /// Decoded records
    pub parsed: usize,
    /// Lines we could not decode
    pub skipped: usize,
}

impl Add for IngestStats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        IngestStats {
            lines: self.lines + rhs.lines,
            parsed: self.parsed + rhs.parsed,
            skipped: self.skipped + rhs.skipped,
        }
    }
}

impl Display for IngestStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} lines, {} records, {} skipped",
            self.lines, self.parsed, self.skipped
        )
    }
}

/// Decode every line of `input`.  Blank lines are ignored, bad ones skipped and counted.
/// Invalid UTF-8 is replaced rather than rejected.
///
#[tracing::instrument(skip(input))]
pub fn read_records<R: BufRead>(
    mut input: R,
) -> Result<(Vec<PositionRecord>, IngestStats), FormatError> {
    let mut stats = IngestStats::default();
    let mut records = vec![];
    let mut buf = vec![];
    let mut lineno = 0;

    loop {
        buf.clear();
        let n = input
            .read_until(b'\n', &mut buf)
            .map_err(|e| FormatError::Read(lineno + 1, e))?;
        if n == 0 {
            break;
        }
        lineno += 1;

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        stats.lines += 1;

        match serde_json::from_str::<PositionRecord>(line) {
            Ok(r) => {
                records.push(r.sanitised());
                stats.parsed += 1;
            }
            Err(e) => {
                debug!("line {lineno} skipped: {e}");
                stats.skipped += 1;
            }
        }
    }
    trace!("{stats}");
    Ok((records, stats))
}

/// Open `fname`, uncompress if needed, and decode everything in it.
///
#[tracing::instrument]
pub fn read_file(fname: &Path) -> Result<(Vec<PositionRecord>, IngestStats), FormatError> {
    let file = File::open(fname).map_err(|e| FormatError::Open(fname.to_path_buf(), e))?;
    let mut file = BufReader::new(file);

    let by_name = fname.extension().is_some_and(|ext| ext == "gz");
    let by_magic = file
        .fill_buf()
        .map_err(|e| FormatError::Open(fname.to_path_buf(), e))?
        .starts_with(&GZIP_MAGIC);

    let input: Box<dyn Read> = if by_name || by_magic {
        debug!("{fname:?} is gzip-compressed");
        Box::new(MultiGzDecoder::new(file))
    } else {
        Box::new(file)
    };

    let (records, stats) = read_records(BufReader::new(input))?;
    info!("Read {fname:?}: {stats}");
    Ok((records, stats))
}
