/// Lexicographic enumeration of every ordering of `0..n`.
///
/// The orderings are produced in place: [`Permutations::advance`] lends the
/// current ordering without allocating. The [`Iterator`] impl copies each one
/// out for callers that want owned tours.
///
/// All `n!` orderings are visited, including rotations and mirror images of
/// the same cycle. Restart by calling [`permutations`] again.
#[derive(Debug, Clone)]
pub struct Permutations {
    current: Vec<usize>,
    started: bool,
    exhausted: bool,
}

pub fn permutations(n: usize) -> Permutations {
    Permutations::new(n)
}

impl Permutations {
    pub fn new(n: usize) -> Self {
        Self {
            current: (0..n).collect(),
            started: false,
            exhausted: false,
        }
    }

    /// Moves to the next ordering and returns it, or `None` once all have been seen.
    pub fn advance(&mut self) -> Option<&[usize]> {
        if self.exhausted {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(&self.current);
        }
        if next_permutation(&mut self.current) {
            Some(&self.current)
        } else {
            self.exhausted = true;
            None
        }
    }
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().map(<[usize]>::to_vec)
    }
}

/// Rearranges `values` into the next lexicographically greater ordering.
/// Returns false, leaving `values` untouched, when it is already the last one.
fn next_permutation(values: &mut [usize]) -> bool {
    if values.len() < 2 {
        return false;
    }
    let Some(pivot) = (0..values.len() - 1).rev().find(|&i| values[i] < values[i + 1]) else {
        return false;
    };
    let successor = (pivot + 1..values.len())
        .rev()
        .find(|&j| values[j] > values[pivot])
        .unwrap_or(pivot + 1);
    values.swap(pivot, successor);
    values[pivot + 1..].reverse();
    true
}
