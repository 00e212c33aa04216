//! Project a flight onto a map and keep what falls around the airport.
//!
//! The coordinate transform is given by the caller on every call, anything implementing
//! [`GeodeticTransform`] works including plain closures.  [`Lambert93`] is the one used for
//! French airports (EPSG:2154).
//!

use std::f64::consts::FRAC_PI_4;

use chrono::{DateTime, Utc};
use geo::{Coord, LineString, MultiPoint, Point};
use serde::Deserialize;
use tracing::trace;

use crate::{FlightEpisode, TrajectoryPoint};

/// Map geographic (longitude, latitude) degrees to planar (x, y).
///
pub trait GeodeticTransform {
    fn transform(&self, lon: f64, lat: f64) -> (f64, f64);

    /// Transform whole arrays at once.
    ///
    fn transform_all(&self, lon: &[f64], lat: &[f64]) -> (Vec<f64>, Vec<f64>) {
        lon.iter()
            .zip(lat.iter())
            .map(|(&lon, &lat)| self.transform(lon, lat))
            .unzip()
    }
}

impl<F> GeodeticTransform for F
where
    F: Fn(f64, f64) -> (f64, f64),
{
    fn transform(&self, lon: f64, lat: f64) -> (f64, f64) {
        self(lon, lat)
    }
}

// GRS80 ellipsoid
//
const GRS80_A: f64 = 6_378_137.0;
const GRS80_F: f64 = 1. / 298.257_222_101;

/// Lambert conformal conic with two standard parallels on GRS80, with the Lambert-93 parameters
/// by default.
///
#[derive(Clone, Copy, Debug)]
pub struct Lambert93 {
    e: f64,
    n: f64,
    /// a * F
    af: f64,
    rho0: f64,
    lon0: f64,
    x0: f64,
    y0: f64,
}

impl Default for Lambert93 {
    fn default() -> Self {
        Lambert93::new(46.5, 3., 49., 44., 700_000., 6_600_000.)
    }
}

impl Lambert93 {
    /// All angles in degrees.
    ///
    pub fn new(lat0: f64, lon0: f64, lat1: f64, lat2: f64, x0: f64, y0: f64) -> Self {
        let e = (2. * GRS80_F - GRS80_F * GRS80_F).sqrt();

        let m = |phi: f64| phi.cos() / (1. - e * e * phi.sin().powi(2)).sqrt();
        let t = |phi: f64| {
            let es = e * phi.sin();
            (FRAC_PI_4 - phi / 2.).tan() / ((1. - es) / (1. + es)).powf(e / 2.)
        };

        let (lat0, lat1, lat2) = (lat0.to_radians(), lat1.to_radians(), lat2.to_radians());
        let n = (m(lat1).ln() - m(lat2).ln()) / (t(lat1).ln() - t(lat2).ln());
        let af = GRS80_A * m(lat1) / (n * t(lat1).powf(n));

        Lambert93 {
            e,
            n,
            af,
            rho0: af * t(lat0).powf(n),
            lon0: lon0.to_radians(),
            x0,
            y0,
        }
    }
}

impl GeodeticTransform for Lambert93 {
    fn transform(&self, lon: f64, lat: f64) -> (f64, f64) {
        let phi = lat.to_radians();
        let es = self.e * phi.sin();
        let t = (FRAC_PI_4 - phi / 2.).tan() / ((1. - es) / (1. + es)).powf(self.e / 2.);
        let rho = self.af * t.powf(self.n);
        let theta = self.n * (lon.to_radians() - self.lon0);

        (
            self.x0 + rho * theta.sin(),
            self.y0 + self.rho0 - rho * theta.cos(),
        )
    }
}

/// Square area of interest in projected coordinates.
///
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Window {
    pub center_x: f64,
    pub center_y: f64,
    pub half_width: f64,
}

/// Paris-Orly in Lambert-93, 100 km around.
///
impl Default for Window {
    fn default() -> Self {
        Window {
            center_x: 650_000.,
            center_y: 6_860_000.,
            half_width: 100_000.,
        }
    }
}

impl Window {
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (x - self.center_x).abs() <= self.half_width && (y - self.center_y).abs() <= self.half_width
    }
}

/// A trajectory point once projected.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedPoint {
    pub point: Point<f64>,
    pub timestamp: DateTime<Utc>,
    pub altitude: f64,
    pub vertical_rate: Option<f64>,
}

/// What is left of a flight inside the window.  A single point has no path.
///
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectedTrajectory {
    pub points: Vec<ProjectedPoint>,
    pub path: Option<LineString<f64>>,
}

impl ProjectedTrajectory {
    pub fn multi_point(&self) -> MultiPoint<f64> {
        self.points.iter().map(|p| p.point).collect()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Projector {
    window: Window,
}

impl Projector {
    pub fn new(window: Window) -> Self {
        Projector { window }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Project the flight's trajectory, `None` if nothing remains.
    ///
    #[tracing::instrument(skip(self, episode, transform), fields(flight = %episode.flight_id()))]
    pub fn project<T>(&self, episode: &FlightEpisode, transform: &T) -> Option<ProjectedTrajectory>
    where
        T: GeodeticTransform + ?Sized,
    {
        self.project_points(episode.trajectory(), transform)
    }

    pub fn project_points<T>(
        &self,
        trajectory: &[TrajectoryPoint],
        transform: &T,
    ) -> Option<ProjectedTrajectory>
    where
        T: GeodeticTransform + ?Sized,
    {
        if trajectory.is_empty() {
            return None;
        }

        let lon: Vec<_> = trajectory.iter().map(|p| p.longitude).collect();
        let lat: Vec<_> = trajectory.iter().map(|p| p.latitude).collect();
        let (xs, ys) = transform.transform_all(&lon, &lat);

        let points: Vec<_> = trajectory
            .iter()
            .zip(xs.into_iter().zip(ys))
            .filter(|(_, (x, y))| self.window.contains(*x, *y))
            .map(|(p, (x, y))| ProjectedPoint {
                point: Point::new(x, y),
                timestamp: p.timestamp,
                altitude: p.altitude,
                vertical_rate: p.vertical_rate,
            })
            .collect();
        trace!("{}/{} points in window", points.len(), trajectory.len());

        match points.len() {
            0 => None,
            1 => Some(ProjectedTrajectory { points, path: None }),
            _ => {
                let path = points.iter().map(|p| Coord::from(p.point)).collect();
                Some(ProjectedTrajectory {
                    points,
                    path: Some(path),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;

    use tarmac_formats::PositionRecord;

    use super::*;

    fn episode(positions: &[(f64, f64)]) -> FlightEpisode {
        let records = positions
            .iter()
            .enumerate()
            .map(|(i, &(lat, lon))| {
                PositionRecord::new("39c902", None, Utc.timestamp_opt(i as i64, 0).unwrap())
                    .with_position(lat, lon)
                    .with_altitude(1000.)
            })
            .collect();
        FlightEpisode::new(records).unwrap()
    }

    #[rstest]
    #[case(3., 46.5, 700_000., 6_600_000.)]
    #[case(2.3499, 48.853, 652_296.97, 6_861_636.36)]
    #[case(2.0, 48.0, 625_422.40, 6_767_095.93)]
    fn test_lambert93(#[case] lon: f64, #[case] lat: f64, #[case] x: f64, #[case] y: f64) {
        let (px, py) = Lambert93::default().transform(lon, lat);
        assert!((px - x).abs() < 0.01, "x = {px}");
        assert!((py - y).abs() < 0.01, "y = {py}");
    }

    #[test]
    fn test_closure_is_transform() {
        let ident = |lon: f64, lat: f64| (lon, lat);
        let (xs, ys) = ident.transform_all(&[1., 2.], &[3., 4.]);
        assert_eq!(vec![1., 2.], xs);
        assert_eq!(vec![3., 4.], ys);
    }

    #[test]
    fn test_project_keeps_window() {
        // Paris, Orly, Lyon
        //
        let ep = episode(&[(48.853, 2.3499), (48.7233, 2.3794), (45.76, 4.84)]);
        let proj = Projector::default()
            .project(&ep, &Lambert93::default())
            .unwrap();

        assert_eq!(2, proj.points.len());
        assert_eq!(2, proj.path.as_ref().map(|p| p.0.len()).unwrap_or(0));
        assert_eq!(2, proj.multi_point().0.len());
    }

    #[test]
    fn test_project_single_point_has_no_path() {
        let ep = episode(&[(48.7233, 2.3794), (45.76, 4.84)]);
        let proj = Projector::default()
            .project(&ep, &Lambert93::default())
            .unwrap();

        assert_eq!(1, proj.points.len());
        assert!(proj.path.is_none());
    }

    #[test]
    fn test_project_nothing_left() {
        let ep = episode(&[(45.76, 4.84), (43.30, 5.37)]);
        assert!(Projector::default()
            .project(&ep, &Lambert93::default())
            .is_none());

        let empty = FlightEpisode::new(vec![PositionRecord::new(
            "39c902",
            None,
            Utc.timestamp_opt(0, 0).unwrap(),
        )])
        .unwrap();
        assert!(Projector::default()
            .project(&empty, &Lambert93::default())
            .is_none());
    }

    #[test]
    fn test_project_custom_window_and_transform() {
        let ep = episode(&[(1., 1.), (2., 2.), (50., 50.)]);
        let window = Window {
            center_x: 0.,
            center_y: 0.,
            half_width: 10.,
        };
        let proj = Projector::new(window)
            .project(&ep, &|lon: f64, lat: f64| (lon, lat))
            .unwrap();

        assert_eq!(2, proj.points.len());
        assert_eq!(Point::new(2., 2.), proj.points[1].point);
    }
}
