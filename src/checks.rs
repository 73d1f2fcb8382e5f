use crate::model::{Matching, Roster, StudentId};
use tracing::warn;

/// Warn about students who were given a volunteer they never worked with
/// although one of their previous volunteers was available, and return them.
pub fn check_lost_affinity(roster: &Roster, m: &Matching) -> Vec<StudentId> {
    let mut lost = Vec::new();
    for student in &roster.students {
        let Some(volunteer) = m.volunteer_for(student.id) else {
            continue;
        };
        let previous = roster.previous_volunteers(student.id);
        if previous.is_empty() || previous.contains(&volunteer) {
            continue;
        }
        if let Some(missed) = previous.iter().find_map(|&v| roster.volunteer(v)) {
            warn!(
                "student {} did not get previous volunteer {}",
                student,
                missed
            );
            lost.push(student.id);
        }
    }
    lost
}
