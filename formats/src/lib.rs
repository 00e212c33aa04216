//! ADS-B position records as received around an airport and the way we read them.
//!
//! Input is a line-delimited JSON file, possibly compressed with `gzip`.  Each line is one
//! broadcast reception, decoded into a [`PositionRecord`].  Lines we can not decode are skipped
//! and counted in [`IngestStats`].
//!
//! The whole file ends up in a [`RecordStore`] which is what the flight engine works on.
//!

pub use error::*;
pub use reader::*;
pub use record::*;
pub use search::*;
pub use store::*;

mod error;
mod reader;
mod record;
mod search;
mod store;
