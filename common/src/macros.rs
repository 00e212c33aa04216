/// Easy way to build a path from several components.
///
/// ```
/// use std::path::PathBuf;
/// use tarmac_common::makepath;
///
/// let p: PathBuf = makepath!("adsb25", "orly.jsonl.gz");
/// assert_eq!(PathBuf::from("adsb25/orly.jsonl.gz"), p);
/// ```
///
#[macro_export]
macro_rules! makepath {
    ($($item:expr),+) => {
        [
        $(::std::path::PathBuf::from($item),)+
        ]
        .iter()
        .collect::<::std::path::PathBuf>()
    };
}
