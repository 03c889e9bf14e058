//! Distance functions between holes.

use crate::error::{Error, Result};
use crate::instance::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Distance function used to turn coordinates into travel times
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// |x1 - x2| + |y1 - y2|
    Manhattan,
    /// sqrt((x1 - x2)^2 + (y1 - y2)^2)
    #[default]
    Euclidean,
}

impl Metric {
    /// Legacy integer identifiers (0 = Manhattan, 1 = Euclidean)
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            0 => Ok(Metric::Manhattan),
            1 => Ok(Metric::Euclidean),
            other => Err(Error::UnsupportedMetric(format!("code {}", other))),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Metric::Manhattan => 0,
            Metric::Euclidean => 1,
        }
    }

    #[inline]
    pub fn distance(&self, a: Point, b: Point) -> f64 {
        match self {
            Metric::Manhattan => manhattan_distance(a, b),
            Metric::Euclidean => euclidean_distance(a, b),
        }
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manhattan" => Ok(Metric::Manhattan),
            "euclidean" => Ok(Metric::Euclidean),
            other => Err(Error::UnsupportedMetric(other.to_string())),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Manhattan => write!(f, "manhattan"),
            Metric::Euclidean => write!(f, "euclidean"),
        }
    }
}

#[inline]
pub fn manhattan_distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

#[inline]
pub fn euclidean_distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Build the full travel-time matrix for a list of coordinates.
///
/// Only the upper triangle is evaluated; the lower one is mirrored and the
/// diagonal is left at zero.
pub fn distance_matrix(points: &[Point], metric: Metric) -> Vec<Vec<f64>> {
    let n = points.len();
    let mut matrix = vec![vec![0.0; n]; n];

    for i in 0..n {
        for j in i + 1..n {
            let d = metric.distance(points[i], points[j]);
            matrix[i][j] = d;
            matrix[j][i] = d;
        }
    }

    matrix
}
