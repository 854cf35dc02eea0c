use std::fmt::Display;

use itertools::Itertools;
use log::trace;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{distance, Bounds, Point, TourError};

/// Ordered cities for one round. A city's index is its identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CitySet {
    points: Vec<Point>,
}

impl CitySet {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Places `count` cities uniformly at random inside `bounds`, keeping
    /// `margin` clear on every side so markers and labels stay visible.
    /// Coincident cities are allowed.
    pub fn generate<R: Rng>(
        count: usize,
        bounds: Bounds,
        margin: f64,
        rng: &mut R,
    ) -> Result<Self, TourError> {
        if count == 0 {
            return Err(TourError::NoCities);
        }
        if !bounds.fits_margin(margin) {
            return Err(TourError::BoundsTooSmall {
                width: bounds.width,
                height: bounds.height,
                margin,
            });
        }

        let points = (0..count)
            .map(|_| {
                Point::new(
                    rng.random_range(margin..bounds.width - margin),
                    rng.random_range(margin..bounds.height - margin),
                )
            })
            .collect::<Vec<_>>();
        trace!(target: "cities", "Generated cities: {:?}", points);

        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    /// Label shown next to a city; players count from one.
    pub fn label(index: usize) -> usize {
        index + 1
    }

    /// Every unordered pair `(i, j, distance)` with `i < j`, in index order.
    pub fn pairwise_distances(&self) -> Vec<(usize, usize, f64)> {
        (0..self.len())
            .tuple_combinations()
            .map(|(i, j)| (i, j, distance(self.points[i], self.points[j])))
            .collect()
    }
}

impl Display for CitySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, point) in self.points.iter().enumerate() {
            writeln!(
                f,
                "{:>2}: ({:.1}, {:.1})",
                Self::label(index),
                point.x,
                point.y
            )?;
        }
        Ok(())
    }
}
