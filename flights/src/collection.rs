//! The whole set of records seen as flights.
//!
//! A `FlightCollection` owns the records and the engine configuration, flights are rebuilt on
//! each traversal so the collection itself never changes.  Two groupings are available, see
//! [`GroupingMode`]: `iter()` and `len()` use the strict one, the landing/takeoff helpers and
//! `statistics()` the identity-only one.
//!

use std::fmt::{Display, Formatter};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, trace};

use tarmac_formats::RecordStore;

use crate::{EngineConfig, FlightEpisode, FlightStats, Grouper, GroupingMode, Label};

/// How to select a sub-collection.
///
#[derive(Clone, Debug, PartialEq)]
pub enum LookupKey {
    /// Callsign or icao24
    Ident(String),
    /// Everything strictly within the 24h after this instant
    Day(DateTime<Utc>),
}

/// A lookup finding exactly one flight returns it directly.
///
#[derive(Debug)]
pub enum Lookup {
    One(FlightEpisode),
    Many(FlightCollection),
}

#[derive(Clone, Debug, Default)]
pub struct FlightCollection {
    store: RecordStore,
    config: EngineConfig,
}

impl FlightCollection {
    pub fn new(store: RecordStore, config: EngineConfig) -> Self {
        FlightCollection { store, config }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Traverse all flights with the given grouping.
    ///
    #[tracing::instrument(skip(self))]
    pub fn episodes(&self, mode: GroupingMode) -> impl Iterator<Item = FlightEpisode> + '_ {
        let segmenter = self.config.segmenter();
        Grouper::new(mode)
            .group(self.store.iter())
            .into_values()
            .flat_map(move |group| segmenter.split(group))
            .filter_map(|run| FlightEpisode::new(run).ok())
    }

    /// Flights per (icao24, callsign).
    ///
    pub fn iter(&self) -> impl Iterator<Item = FlightEpisode> + '_ {
        self.episodes(GroupingMode::Strict)
    }

    /// Number of flights per (icao24, callsign).
    ///
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Flights per icao24 only, aircraft heard only once are ignored.
    ///
    pub fn filter_by_icao24_only(&self) -> impl Iterator<Item = FlightEpisode> + '_ {
        self.episodes(GroupingMode::IdentityOnly)
    }

    pub fn classify(&self, episode: &FlightEpisode) -> Label {
        self.config.classifier.classify(episode)
    }

    /// Landings we can draw.
    ///
    #[tracing::instrument(skip(self))]
    pub fn filter_landings(&self) -> Vec<FlightEpisode> {
        let cl = self.config.classifier;
        let v: Vec<_> = self
            .filter_by_icao24_only()
            .filter(|ep| cl.is_landing(ep) && ep.has_valid_trajectory())
            .collect();
        debug!("{} landings", v.len());
        v
    }

    /// Takeoffs we can draw.
    ///
    #[tracing::instrument(skip(self))]
    pub fn filter_takeoffs(&self) -> Vec<FlightEpisode> {
        let cl = self.config.classifier;
        let v: Vec<_> = self
            .filter_by_icao24_only()
            .filter(|ep| cl.is_takeoff(ep) && ep.has_valid_trajectory())
            .collect();
        debug!("{} takeoffs", v.len());
        v
    }

    /// Count flights, landings and takeoffs.  Unlike `filter_landings()` and
    /// `filter_takeoffs()` flights without a usable trajectory are counted too.
    ///
    #[tracing::instrument(skip(self))]
    pub fn statistics(&self) -> FlightStats {
        let cl = self.config.classifier;
        self.filter_by_icao24_only()
            .map(|ep| {
                FlightStats::new(
                    1,
                    cl.is_landing(&ep) as usize,
                    cl.is_takeoff(&ep) as usize,
                )
            })
            .sum()
    }

    /// Select records by identity or day and rebuild flights from them.
    ///
    #[tracing::instrument(skip(self))]
    pub fn lookup(&self, key: LookupKey) -> Lookup {
        let store = match &key {
            LookupKey::Ident(s) => self
                .store
                .filter(|r| r.icao24 == *s || r.callsign.as_deref() == Some(s.as_str())),
            LookupKey::Day(t) => {
                let (from, to) = (*t, *t + Duration::days(1));
                self.store
                    .filter(|r| from < r.timestamp && r.timestamp < to)
            }
        };
        trace!("{} records selected", store.len());

        let sub = FlightCollection::new(store, self.config);
        let single = {
            let mut it = sub.iter();
            match (it.next(), it.next()) {
                (Some(ep), None) => Some(ep),
                _ => None,
            }
        };
        match single {
            Some(ep) => Lookup::One(ep),
            None => Lookup::Many(sub),
        }
    }
}

impl Display for FlightCollection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "FlightCollection with {} flights", self.len())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use tarmac_formats::PositionRecord;

    use super::*;

    const T0: i64 = 1741970000;

    fn rec(icao24: &str, callsign: &str, t: i64) -> PositionRecord {
        PositionRecord::new(icao24, Some(callsign), Utc.timestamp_opt(t, 0).unwrap())
    }

    /// - 39c902 lands, then takes off again 30000s later
    /// - 4ca7b5 is heard once
    /// - 3c6444 lands but without any position
    ///
    fn sample() -> FlightCollection {
        let mut records = vec![];
        for (i, (alt, vr)) in [(3000., -1200.), (1200., -1800.), (300., -1600.), (50., -700.)]
            .into_iter()
            .enumerate()
        {
            records.push(
                rec("39c902", "AFR12AB", T0 + 60 * i as i64)
                    .with_position(48.80 - 0.02 * i as f64, 2.40)
                    .with_altitude(alt)
                    .with_vertical_rate(vr),
            );
        }
        for (i, (alt, vr)) in [(0., 0.), (800., 3500.), (2500., 3000.)].into_iter().enumerate() {
            records.push(
                rec("39c902", "AFR12AB", T0 + 30_000 + 60 * i as i64)
                    .with_position(48.72 + 0.02 * i as f64, 2.37)
                    .with_altitude(alt)
                    .with_vertical_rate(vr),
            );
        }
        records.push(rec("4ca7b5", "EIN5HB", T0 + 100).with_altitude(12000.));
        records.push(
            rec("3c6444", "DLH1234", T0 + 200)
                .with_altitude(80.)
                .with_vertical_rate(-2000.),
        );
        records.push(
            rec("3c6444", "DLH1234", T0 + 260)
                .with_altitude(20.)
                .with_vertical_rate(-900.),
        );
        FlightCollection::new(RecordStore::new(records), EngineConfig::default())
    }

    #[test]
    fn test_collection_strict() {
        let fc = sample();
        assert_eq!(4, fc.len());
        assert_eq!("FlightCollection with 4 flights", fc.to_string());

        let ids: Vec<_> = fc.iter().map(|ep| ep.icao24().to_string()).collect();
        assert_eq!(vec!["39c902", "39c902", "3c6444", "4ca7b5"], ids);
    }

    #[test]
    fn test_collection_every_record_once() {
        let fc = sample();
        let n: usize = fc.iter().map(|ep| ep.len()).sum();
        assert_eq!(fc.store().len(), n);
    }

    #[test]
    fn test_collection_identity_only_skips_singletons() {
        let fc = sample();
        let eps: Vec<_> = fc.filter_by_icao24_only().collect();

        assert_eq!(3, eps.len());
        assert!(eps.iter().all(|ep| ep.icao24() != "4ca7b5"));

        // Restartable
        //
        assert_eq!(3, fc.filter_by_icao24_only().count());
    }

    #[test]
    fn test_collection_landings_takeoffs() {
        let fc = sample();

        let landings = fc.filter_landings();
        assert_eq!(1, landings.len());
        assert_eq!("39c902_AFR12AB_20250314_163320", landings[0].flight_id());

        let takeoffs = fc.filter_takeoffs();
        assert_eq!(1, takeoffs.len());
        assert_eq!(Label::Takeoff, fc.classify(&takeoffs[0]));
    }

    #[test]
    fn test_collection_statistics() {
        let fc = sample();
        let stats = fc.statistics();

        assert_eq!(FlightStats::new(3, 2, 1), stats);
        assert!(stats.landings >= fc.filter_landings().len());
        assert!(stats.takeoffs >= fc.filter_takeoffs().len());
    }

    #[test]
    fn test_collection_lookup_ident() {
        let fc = sample();

        match fc.lookup(LookupKey::Ident("EIN5HB".into())) {
            Lookup::One(ep) => assert_eq!("4ca7b5", ep.icao24()),
            Lookup::Many(_) => panic!("expected one flight"),
        }
        match fc.lookup(LookupKey::Ident("39c902".into())) {
            Lookup::Many(sub) => assert_eq!(2, sub.len()),
            Lookup::One(_) => panic!("expected two flights"),
        }
        match fc.lookup(LookupKey::Ident("nobody".into())) {
            Lookup::Many(sub) => assert!(sub.is_empty()),
            Lookup::One(_) => panic!("expected nothing"),
        }
    }

    #[test]
    fn test_collection_lookup_day() {
        let fc = sample();
        let day = |d| Utc.with_ymd_and_hms(2025, 3, d, 0, 0, 0).unwrap();

        match fc.lookup(LookupKey::Day(day(14))) {
            Lookup::Many(sub) => assert_eq!(3, sub.len()),
            Lookup::One(_) => panic!("expected three flights"),
        }
        match fc.lookup(LookupKey::Day(day(15))) {
            Lookup::One(ep) => assert_eq!(Label::Takeoff, fc.classify(&ep)),
            Lookup::Many(_) => panic!("expected one flight"),
        }
    }

    #[test]
    fn test_collection_lookup_day_bounds_exclusive() {
        let midnight = Utc.with_ymd_and_hms(2025, 3, 15, 0, 0, 0).unwrap();
        let records = vec![PositionRecord::new("39c902", None, midnight)];
        let fc = FlightCollection::new(RecordStore::new(records), EngineConfig::default());

        assert!(matches!(fc.lookup(LookupKey::Day(midnight)), Lookup::Many(sub) if sub.is_empty()));
        let before = midnight - Duration::days(1);
        assert!(matches!(fc.lookup(LookupKey::Day(before)), Lookup::Many(sub) if sub.is_empty()));
    }

    #[test]
    fn test_collection_custom_gap() {
        let config = EngineConfig {
            gap_threshold: 50_000,
            ..EngineConfig::default()
        };
        let fc = FlightCollection::new(sample().store().clone(), config);
        assert_eq!(3, fc.len());
    }
}
