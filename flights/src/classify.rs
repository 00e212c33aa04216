//! Landing and takeoff heuristics.
//!
//! A flight is a landing if it got close to the ground while descending fast, a takeoff if it was
//! close to the ground and climbed fast.  Both only look at the altitude and vertical rate
//! extremes so record order does not matter.  A flight missing either value is neither.
//!

use serde::Deserialize;
use strum::{Display, EnumString};

use crate::FlightEpisode;

/// Altitudes are in feet, rates in ft/min.
///
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LandingThresholds {
    /// Lowest altitude must be at or under this
    pub altitude: f64,
    /// Lowest vertical rate must be at or under this (negative)
    pub descent_rate: f64,
}

impl Default for LandingThresholds {
    fn default() -> Self {
        LandingThresholds {
            altitude: 100.,
            descent_rate: -1500.,
        }
    }
}

impl LandingThresholds {
    pub fn matches(&self, episode: &FlightEpisode) -> bool {
        match (episode.altitude_range(), episode.vertical_rate_range()) {
            (Some((alt_min, _)), Some((vr_min, _))) => {
                alt_min <= self.altitude && vr_min <= self.descent_rate
            }
            _ => false,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct TakeoffThresholds {
    /// Lowest altitude must be at or under this
    pub altitude: f64,
    /// Highest vertical rate must be at or over this
    pub climb_rate: f64,
}

impl Default for TakeoffThresholds {
    fn default() -> Self {
        TakeoffThresholds {
            altitude: 100.,
            climb_rate: 3000.,
        }
    }
}

impl TakeoffThresholds {
    pub fn matches(&self, episode: &FlightEpisode) -> bool {
        match (episode.altitude_range(), episode.vertical_rate_range()) {
            (Some((alt_min, _)), Some((_, vr_max))) => {
                alt_min <= self.altitude && vr_max >= self.climb_rate
            }
            _ => false,
        }
    }
}

/// Result of [`Classifier::classify`].  `Both` happens with noisy data, e.g. a touch-and-go.
///
#[derive(Clone, Copy, Debug, Display, EnumString, Eq, Hash, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum Label {
    Landing,
    Takeoff,
    Both,
    Neither,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Classifier {
    pub landing: LandingThresholds,
    pub takeoff: TakeoffThresholds,
}

impl Classifier {
    pub fn new(landing: LandingThresholds, takeoff: TakeoffThresholds) -> Self {
        Classifier { landing, takeoff }
    }

    #[inline]
    pub fn is_landing(&self, episode: &FlightEpisode) -> bool {
        episode.is_landing(&self.landing)
    }

    #[inline]
    pub fn is_takeoff(&self, episode: &FlightEpisode) -> bool {
        episode.is_takeoff(&self.takeoff)
    }

    pub fn classify(&self, episode: &FlightEpisode) -> Label {
        match (self.is_landing(episode), self.is_takeoff(episode)) {
            (true, true) => Label::Both,
            (true, false) => Label::Landing,
            (false, true) => Label::Takeoff,
            (false, false) => Label::Neither,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;
    use rstest::rstest;

    use tarmac_formats::PositionRecord;

    use super::*;

    fn episode(samples: &[(Option<f64>, Option<f64>)]) -> FlightEpisode {
        let records = samples
            .iter()
            .enumerate()
            .map(|(i, (alt, vr))| {
                let mut r = PositionRecord::new("39c902", None, Utc.timestamp_opt(i as i64, 0).unwrap());
                r.altitude = *alt;
                r.vertical_rate = *vr;
                r
            })
            .collect();
        FlightEpisode::new(records).unwrap()
    }

    #[test]
    fn test_landing_reference() {
        let ep = episode(&[
            (Some(50.), Some(-200.)),
            (Some(30.), Some(-1800.)),
            (Some(10.), Some(-100.)),
        ]);
        let cl = Classifier::default();

        assert!(cl.is_landing(&ep));
        assert!(!cl.is_takeoff(&ep));
        assert_eq!(Label::Landing, cl.classify(&ep));
    }

    #[test]
    fn test_takeoff_reference() {
        let ep = episode(&[
            (Some(0.), Some(0.)),
            (Some(400.), Some(2500.)),
            (Some(1500.), Some(3200.)),
        ]);
        assert_eq!(Label::Takeoff, Classifier::default().classify(&ep));
    }

    #[rstest]
    #[case(&[(None, Some(-2000.)), (None, Some(4000.))])]
    #[case(&[(Some(10.), None), (Some(20.), None)])]
    #[case(&[(None, None)])]
    fn test_missing_data_is_neither(#[case] samples: &[(Option<f64>, Option<f64>)]) {
        let ep = episode(samples);
        assert_eq!(Label::Neither, Classifier::default().classify(&ep));
    }

    #[test]
    fn test_both() {
        let ep = episode(&[(Some(20.), Some(-1600.)), (Some(30.), Some(3100.))]);
        assert_eq!(Label::Both, Classifier::default().classify(&ep));
    }

    #[rstest]
    #[case(100., -1500., true)]
    #[case(100.1, -1500., false)]
    #[case(100., -1499.9, false)]
    fn test_landing_bounds_inclusive(#[case] alt: f64, #[case] vr: f64, #[case] res: bool) {
        let ep = episode(&[(Some(alt), Some(vr))]);
        assert_eq!(res, ep.is_landing(&LandingThresholds::default()));
    }

    #[test]
    fn test_custom_thresholds() {
        let ep = episode(&[(Some(150.), Some(-1000.))]);
        let th = LandingThresholds {
            altitude: 200.,
            descent_rate: -900.,
        };
        assert!(ep.is_landing(&th));
        assert!(!ep.is_landing(&LandingThresholds::default()));
    }

    #[test]
    fn test_label_names() {
        assert_eq!("landing", Label::Landing.to_string());
        assert_eq!(Ok(Label::Neither), "neither".parse());
    }

    proptest! {
        #[test]
        fn test_classification_ignores_order(
            samples in prop::collection::vec(
                (prop::option::of(-100f64..5000.), prop::option::of(-4000f64..4000.)),
                1..32,
            ),
        ) {
            let cl = Classifier::default();
            let fwd = episode(&samples);
            let mut rev = samples.clone();
            rev.reverse();
            let rev = episode(&rev);

            prop_assert_eq!(cl.classify(&fwd), cl.classify(&rev));
        }
    }
}
