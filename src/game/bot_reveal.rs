use super::timer_queue::TimerId;
use crate::model::Tour;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStep {
    Edge { from: usize, to: usize },
    /// The edge back to the starting city; the reveal is finished after it.
    Closing { from: usize, to: usize },
}

/// Walks an optimal tour one edge per timer tick.
#[derive(Debug)]
pub struct BotReveal {
    tour: Tour,
    next_edge: usize,
    timer: TimerId,
}

impl BotReveal {
    pub fn new(tour: Tour, timer: TimerId) -> Self {
        Self {
            tour,
            next_edge: 0,
            timer,
        }
    }

    pub fn timer(&self) -> TimerId {
        self.timer
    }

    pub fn tour(&self) -> &Tour {
        &self.tour
    }

    pub fn step(&mut self) -> Option<RevealStep> {
        let cities = self.tour.as_slice();
        let index = self.next_edge;
        if index >= cities.len() {
            return None;
        }
        self.next_edge += 1;
        if index + 1 < cities.len() {
            Some(RevealStep::Edge {
                from: cities[index],
                to: cities[index + 1],
            })
        } else {
            Some(RevealStep::Closing {
                from: cities[index],
                to: cities[0],
            })
        }
    }
}
