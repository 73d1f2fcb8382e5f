use crate::model::{Matching, VolunteerId};

/// Number of volunteers carrying each load: the entry at index `n` counts
/// the volunteers given exactly `n` students. Trailing zeroes are dropped.
pub fn load_distribution(m: &Matching, volunteers: &[VolunteerId]) -> Vec<usize> {
    let mut loads = vec![0; m.len() + 1];
    for &volunteer in volunteers {
        loads[m.load_of(volunteer)] += 1;
    }
    let latest = loads.iter().rposition(|&n| n != 0).map_or(0, |n| n + 1);
    loads.truncate(latest);
    loads
}

/// Difference between the most and the least loaded volunteers.
pub fn load_spread(m: &Matching, volunteers: &[VolunteerId]) -> usize {
    let loads = volunteers.iter().map(|&v| m.load_of(v));
    let max = loads.clone().max().unwrap_or(0);
    let min = loads.min().unwrap_or(0);
    max - min
}
