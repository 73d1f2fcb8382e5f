use crate::model::{Attendance, StudentId, VolunteerId};
use std::collections::HashMap;

/// Number of past sessions for every (student, volunteer) pair found in the
/// history. Duplicate rows accumulate.
#[derive(Debug, Default)]
pub struct Affinity {
    counts: HashMap<(StudentId, VolunteerId), usize>,
}

impl Affinity {
    pub fn from_history(history: &[Attendance]) -> Self {
        let mut counts = HashMap::new();
        for a in history {
            *counts.entry((a.student_id, a.volunteer_id)).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn count(&self, student: StudentId, volunteer: VolunteerId) -> usize {
        self.counts
            .get(&(student, volunteer))
            .copied()
            .unwrap_or(0)
    }
}

#[test]
fn test_affinity_counts() {
    let history = [
        Attendance::new(StudentId(1), VolunteerId(10)),
        Attendance::new(StudentId(1), VolunteerId(10)),
        Attendance::new(StudentId(1), VolunteerId(20)),
        Attendance::new(StudentId(2), VolunteerId(10)),
    ];
    let affinity = Affinity::from_history(&history);
    assert_eq!(affinity.count(StudentId(1), VolunteerId(10)), 2);
    assert_eq!(affinity.count(StudentId(1), VolunteerId(20)), 1);
    assert_eq!(affinity.count(StudentId(2), VolunteerId(10)), 1);
    assert_eq!(affinity.count(StudentId(2), VolunteerId(20)), 0);
    assert_eq!(affinity.count(StudentId(3), VolunteerId(30)), 0);
}
