use log::debug;

use super::permutations;
use crate::model::{closed_length, CitySet, Tour, TourError};

/// Finds the shortest closed tour by scoring every ordering of the cities.
///
/// Orderings are visited lexicographically and only a strictly shorter tour
/// replaces the current best, so ties resolve to the lexicographically
/// smallest minimiser. Costs O(n!·n); there is no size cap.
///
/// Every rotation and mirror image is scored separately. Pinning the first
/// city would cut the work by a factor of n but change which tour wins ties.
pub fn solve(cities: &CitySet) -> Result<(Tour, f64), TourError> {
    if cities.is_empty() {
        return Err(TourError::NoCities);
    }

    let mut enumerator = permutations(cities.len());
    let mut best_tour = Vec::with_capacity(cities.len());
    let mut best_length = f64::INFINITY;
    let mut evaluated: u64 = 0;

    while let Some(ordering) = enumerator.advance() {
        evaluated += 1;
        let length = closed_length(cities, ordering);
        if length < best_length {
            best_length = length;
            best_tour.clear();
            best_tour.extend_from_slice(ordering);
        }
    }

    debug!(
        target: "solver",
        "Scored {} orderings of {} cities; best {:.3} via {:?}",
        evaluated,
        cities.len(),
        best_length,
        best_tour
    );
    Ok((Tour::new(best_tour), best_length))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{tour_length, Bounds, Point};
    use itertools::Itertools;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn square() -> CitySet {
        CitySet::new(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ])
    }

    #[test]
    fn test_square_optimum_is_perimeter() {
        let (tour, length) = solve(&square()).unwrap();
        assert!((length - 40.0).abs() < 1e-9);
        // first minimiser in lexicographic order
        assert_eq!(tour, Tour::new(vec![0, 1, 2, 3]));
    }

    #[test]
    fn test_optimum_is_no_longer_than_any_ordering() {
        let mut rng = StdRng::seed_from_u64(2024);
        let cities = CitySet::generate(6, Bounds::new(800.0, 600.0), 25.0, &mut rng).unwrap();
        let (tour, length) = solve(&cities).unwrap();

        assert_eq!(tour.validate(cities.len()), Ok(()));
        assert!((tour_length(&cities, tour.as_slice()).unwrap() - length).abs() < 1e-9);
        for ordering in (0..cities.len()).permutations(cities.len()) {
            assert!(length <= tour_length(&cities, &ordering).unwrap());
        }
    }

    #[test]
    fn test_solve_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(99);
        let cities = CitySet::generate(7, Bounds::new(800.0, 600.0), 25.0, &mut rng).unwrap();
        let first = solve(&cities).unwrap();
        let second = solve(&cities).unwrap();
        assert_eq!(first.0, second.0);
        assert_eq!(first.1, second.1);
    }

    #[test]
    fn test_single_city() {
        let cities = CitySet::new(vec![Point::new(4.0, 4.0)]);
        assert_eq!(solve(&cities).unwrap(), (Tour::new(vec![0]), 0.0));
    }

    #[test]
    fn test_coincident_cities() {
        let cities = CitySet::new(vec![
            Point::new(1.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(4.0, 5.0),
        ]);
        let (_, length) = solve(&cities).unwrap();
        assert!((length - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_city_set_is_rejected() {
        assert_eq!(solve(&CitySet::default()), Err(TourError::NoCities));
    }
}
