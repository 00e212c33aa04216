//! One decoded ADS-B broadcast.
//!
//! Fields are named after the usual ADS-B JSON dumps.  Numeric fields are forgiving: a number, a
//! numeric string, `null`, a missing field or garbage like `"ground"` are all accepted, the last
//! three giving `None`.  Only `icao24` and `timestamp` are mandatory.
//!

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_with::formats::Flexible;
use serde_with::{serde_as, DefaultOnError, DisplayFromStr, PickFirst, TimestampSecondsWithFrac};

/// A single position/state sample.
///
#[serde_as]
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PositionRecord {
    /// Aircraft transponder address
    pub icao24: String,
    /// Flight callsign, trimmed, `None` when blank
    #[serde(default, deserialize_with = "callsign")]
    pub callsign: Option<String>,
    /// Reception time, seconds since epoch (with fractional part)
    #[serde_as(as = "TimestampSecondsWithFrac<f64, Flexible>")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnError<PickFirst<(Option<_>, Option<DisplayFromStr>)>>")]
    pub latitude: Option<f64>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnError<PickFirst<(Option<_>, Option<DisplayFromStr>)>>")]
    pub longitude: Option<f64>,
    /// Barometric altitude in feet
    #[serde(default)]
    #[serde_as(as = "DefaultOnError<PickFirst<(Option<_>, Option<DisplayFromStr>)>>")]
    pub altitude: Option<f64>,
    /// Vertical rate in ft/min, negative when descending
    #[serde(default)]
    #[serde_as(as = "DefaultOnError<PickFirst<(Option<_>, Option<DisplayFromStr>)>>")]
    pub vertical_rate: Option<f64>,
    /// Ground speed in knots
    #[serde(default, alias = "groundspeed")]
    #[serde_as(as = "DefaultOnError<PickFirst<(Option<_>, Option<DisplayFromStr>)>>")]
    pub ground_speed: Option<f64>,
}

/// Trim the callsign and drop it entirely if nothing is left.
///
fn callsign<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(normalise_callsign(s))
}

fn normalise_callsign(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl PositionRecord {
    /// Create a record with only identity and time, everything else can be added with the
    /// `with_*` methods.
    ///
    pub fn new(icao24: &str, callsign: Option<&str>, timestamp: DateTime<Utc>) -> Self {
        PositionRecord {
            icao24: icao24.to_string(),
            callsign: normalise_callsign(callsign.map(String::from)),
            timestamp,
            latitude: None,
            longitude: None,
            altitude: None,
            vertical_rate: None,
            ground_speed: None,
        }
    }

    pub fn with_position(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }

    pub fn with_vertical_rate(mut self, vertical_rate: f64) -> Self {
        self.vertical_rate = Some(vertical_rate);
        self
    }

    pub fn with_ground_speed(mut self, ground_speed: f64) -> Self {
        self.ground_speed = Some(ground_speed);
        self
    }

    /// Strings like `"NaN"` or `"inf"` parse as floats, treat them as missing.
    ///
    pub(crate) fn sanitised(mut self) -> Self {
        for v in [
            &mut self.latitude,
            &mut self.longitude,
            &mut self.altitude,
            &mut self.vertical_rate,
            &mut self.ground_speed,
        ] {
            if v.is_some_and(|v| !v.is_finite()) {
                *v = None;
            }
        }
        self
    }

    /// Do we have everything needed to draw this sample in 3D?
    ///
    #[inline]
    pub fn has_position(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some() && self.altitude.is_some()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_record_full() {
        let line = r##"{"icao24":"39c902","callsign":"AFR12AB ","timestamp":1741970000,"latitude":48.7233,"longitude":2.3794,"altitude":1200,"vertical_rate":-704,"groundspeed":142.5}"##;

        let r: PositionRecord = serde_json::from_str(line).unwrap();
        assert_eq!("39c902", r.icao24);
        assert_eq!(Some("AFR12AB".to_string()), r.callsign);
        assert_eq!(Utc.timestamp_opt(1741970000, 0).unwrap(), r.timestamp);
        assert_eq!(Some(48.7233), r.latitude);
        assert_eq!(Some(1200.), r.altitude);
        assert_eq!(Some(-704.), r.vertical_rate);
        assert_eq!(Some(142.5), r.ground_speed);
        assert!(r.has_position());
    }

    #[test]
    fn test_record_fractional_time() {
        let line = r##"{"icao24":"39c902","timestamp":1741970000.5}"##;

        let r: PositionRecord = serde_json::from_str(line).unwrap();
        assert_eq!(500, r.timestamp.timestamp_subsec_millis());
        assert!(r.callsign.is_none());
        assert!(!r.has_position());
    }

    #[rstest]
    #[case(r##""1200""##, Some(1200.))]
    #[case("1200.5", Some(1200.5))]
    #[case("null", None)]
    #[case(r##""ground""##, None)]
    #[case("[1, 2]", None)]
    fn test_record_coerce_altitude(#[case] alt: &str, #[case] res: Option<f64>) {
        let line = format!(r##"{{"icao24":"39c902","timestamp":1741970000,"altitude":{alt}}}"##);

        let r: PositionRecord = serde_json::from_str(&line).unwrap();
        assert_eq!(res, r.altitude);
    }

    #[rstest]
    #[case(r##""""##)]
    #[case(r##""    ""##)]
    #[case("null")]
    fn test_record_blank_callsign(#[case] cs: &str) {
        let line = format!(r##"{{"icao24":"39c902","callsign":{cs},"timestamp":1741970000}}"##);

        let r: PositionRecord = serde_json::from_str(&line).unwrap();
        assert!(r.callsign.is_none());
    }

    #[rstest]
    #[case(r##"{"callsign":"AFR12AB","timestamp":1741970000}"##)]
    #[case(r##"{"icao24":"39c902","callsign":"AFR12AB"}"##)]
    #[case(r##"{"icao24":"39c902","timestamp":"yesterday"}"##)]
    fn test_record_missing_mandatory(#[case] line: &str) {
        let r = serde_json::from_str::<PositionRecord>(line);
        assert!(r.is_err());
    }

    #[test]
    fn test_record_builder() {
        let t = Utc.timestamp_opt(1741970000, 0).unwrap();
        let r = PositionRecord::new("39c902", Some(" AFR12AB"), t)
            .with_position(48.7, 2.4)
            .with_altitude(300.)
            .with_vertical_rate(-1200.);
        assert_eq!(Some("AFR12AB"), r.callsign.as_deref());
        assert!(r.has_position());
        assert!(r.ground_speed.is_none());
    }
}
