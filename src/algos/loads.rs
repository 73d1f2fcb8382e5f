use crate::model::VolunteerId;
use std::collections::HashMap;

/// Running number of students given to each volunteer during one pass.
#[derive(Debug)]
pub struct Loads {
    loads: HashMap<VolunteerId, usize>,
}

impl Loads {
    pub fn new(volunteers: &[VolunteerId]) -> Self {
        Self {
            loads: volunteers.iter().map(|&v| (v, 0)).collect(),
        }
    }

    pub fn get(&self, volunteer: VolunteerId) -> usize {
        self.loads.get(&volunteer).copied().unwrap_or(0)
    }

    pub fn increment(&mut self, volunteer: VolunteerId) {
        *self.loads.entry(volunteer).or_insert(0) += 1;
    }

    /// Difference between the most and the least loaded volunteers.
    pub fn spread(&self) -> usize {
        let max = self.loads.values().max().copied().unwrap_or(0);
        let min = self.loads.values().min().copied().unwrap_or(0);
        max - min
    }
}

#[test]
fn test_loads() {
    let mut loads = Loads::new(&[VolunteerId(10), VolunteerId(20)]);
    assert_eq!(loads.get(VolunteerId(10)), 0);
    assert_eq!(loads.spread(), 0);
    loads.increment(VolunteerId(10));
    loads.increment(VolunteerId(10));
    loads.increment(VolunteerId(20));
    assert_eq!(loads.get(VolunteerId(10)), 2);
    assert_eq!(loads.get(VolunteerId(20)), 1);
    assert_eq!(loads.get(VolunteerId(30)), 0);
    assert_eq!(loads.spread(), 1);
}
