//! Split the record store into per-aircraft buckets.
//!
//! Buckets come out in ascending key order so that every traversal of the same store gives the
//! same flights in the same order.  Within a bucket records keep their arrival order, sorting is
//! the segmenter's job.
//!

use std::collections::BTreeMap;

use strum::{Display, EnumString};
use tracing::trace;

use tarmac_formats::PositionRecord;

/// How aircraft are told apart.
///
#[derive(Clone, Copy, Debug, Default, Display, EnumString, PartialEq, Eq)]
#[strum(serialize_all = "kebab-case")]
pub enum GroupingMode {
    /// Transponder address and callsign, records without callsign get their own group
    #[default]
    Strict,
    /// Transponder address only, groups with a single record are dropped
    IdentityOnly,
}

/// Bucket key.  `None` sorts before any callsign.
///
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct GroupKey {
    pub icao24: String,
    pub callsign: Option<String>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Grouper {
    mode: GroupingMode,
}

impl Grouper {
    pub fn new(mode: GroupingMode) -> Self {
        Grouper { mode }
    }

    pub fn mode(&self) -> GroupingMode {
        self.mode
    }

    /// Group `records`, copying them into their bucket.
    ///
    #[tracing::instrument(skip(self, records), fields(mode = %self.mode))]
    pub fn group<'a, I>(&self, records: I) -> BTreeMap<GroupKey, Vec<PositionRecord>>
    where
        I: IntoIterator<Item = &'a PositionRecord>,
    {
        let mut buckets: BTreeMap<GroupKey, Vec<PositionRecord>> = BTreeMap::new();

        for r in records {
            let key = GroupKey {
                icao24: r.icao24.clone(),
                callsign: match self.mode {
                    GroupingMode::Strict => r.callsign.clone(),
                    GroupingMode::IdentityOnly => None,
                },
            };
            buckets.entry(key).or_default().push(r.clone());
        }

        if self.mode == GroupingMode::IdentityOnly {
            buckets.retain(|_, v| v.len() > 1);
        }
        trace!("{} groups", buckets.len());
        buckets
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn rec(icao24: &str, callsign: Option<&str>, t: i64) -> PositionRecord {
        PositionRecord::new(icao24, callsign, Utc.timestamp_opt(t, 0).unwrap())
    }

    fn sample() -> Vec<PositionRecord> {
        vec![
            rec("4ca7b5", Some("EIN5HB"), 30),
            rec("39c902", Some("AFR12AB"), 20),
            rec("39c902", None, 10),
            rec("39c902", Some("AFR12AB"), 0),
            rec("3c6444", Some("DLH1234"), 40),
        ]
    }

    #[test]
    fn test_group_strict() {
        let records = sample();
        let groups = Grouper::new(GroupingMode::Strict).group(&records);

        let keys: Vec<_> = groups
            .keys()
            .map(|k| (k.icao24.as_str(), k.callsign.as_deref()))
            .collect();
        assert_eq!(
            vec![
                ("39c902", None),
                ("39c902", Some("AFR12AB")),
                ("3c6444", Some("DLH1234")),
                ("4ca7b5", Some("EIN5HB")),
            ],
            keys
        );

        // Arrival order is kept
        //
        let afr = &groups[&GroupKey {
            icao24: "39c902".into(),
            callsign: Some("AFR12AB".into()),
        }];
        assert_eq!(20, afr[0].timestamp.timestamp());
        assert_eq!(0, afr[1].timestamp.timestamp());
    }

    #[test]
    fn test_group_identity_only_drops_singletons() {
        let records = sample();
        let groups = Grouper::new(GroupingMode::IdentityOnly).group(&records);

        assert_eq!(1, groups.len());
        let (key, v) = groups.iter().next().unwrap();
        assert_eq!("39c902", key.icao24);
        assert!(key.callsign.is_none());
        assert_eq!(3, v.len());
    }

    #[test]
    fn test_group_nothing() {
        let none: Vec<PositionRecord> = vec![];
        let groups = Grouper::default().group(&none);
        assert!(groups.is_empty());
    }

    #[test]
    fn test_grouping_mode_names() {
        assert_eq!("identity-only", GroupingMode::IdentityOnly.to_string());
        assert_eq!(Ok(GroupingMode::Strict), "strict".parse());
    }
}
