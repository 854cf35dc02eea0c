use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::{distance, CitySet, TourError};

/// A closed visiting order over city indices; the last city connects back to the first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tour(Vec<usize>);

impl Tour {
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<usize> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    pub fn push(&mut self, index: usize) {
        self.0.push(index);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn reversed(&self) -> Tour {
        Tour(self.0.iter().rev().copied().collect())
    }

    /// Edges in visiting order, ending with the closing edge back to the start.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        closed_edges(&self.0)
    }

    /// Checks that this tour visits every city of a set of `city_count` exactly once.
    pub fn validate(&self, city_count: usize) -> Result<(), TourError> {
        validate_indices(&self.0, city_count)
    }
}

impl Display for Tour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let labels = self
            .0
            .iter()
            .map(|&index| CitySet::label(index).to_string())
            .collect::<Vec<_>>();
        write!(f, "{}", labels.join(" -> "))
    }
}

fn closed_edges(indices: &[usize]) -> impl Iterator<Item = (usize, usize)> + '_ {
    let closing = match (indices.last(), indices.first()) {
        (Some(&last), Some(&first)) => Some((last, first)),
        _ => None,
    };
    indices
        .windows(2)
        .map(|pair| (pair[0], pair[1]))
        .chain(closing)
}

fn validate_indices(indices: &[usize], city_count: usize) -> Result<(), TourError> {
    if city_count == 0 {
        return Err(TourError::NoCities);
    }
    if indices.len() != city_count {
        return Err(TourError::LengthMismatch {
            expected: city_count,
            actual: indices.len(),
        });
    }
    let mut seen = vec![false; city_count];
    for &index in indices {
        if index >= city_count {
            return Err(TourError::IndexOutOfRange {
                index,
                len: city_count,
            });
        }
        if seen[index] {
            return Err(TourError::DuplicateCity(index));
        }
        seen[index] = true;
    }
    Ok(())
}

/// Total length of `tour` over `cities`, including the closing edge.
pub fn tour_length(cities: &CitySet, tour: &[usize]) -> Result<f64, TourError> {
    validate_indices(tour, cities.len())?;
    Ok(closed_length(cities, tour))
}

/// Closed length without validation. Indices must be in range for `cities`.
pub(crate) fn closed_length(cities: &CitySet, tour: &[usize]) -> f64 {
    let points = cities.points();
    closed_edges(tour)
        .map(|(from, to)| distance(points[from], points[to]))
        .sum()
}
