use super::{StudentId, VolunteerId};
use std::collections::BTreeMap;

/// Result of one matching pass: every student seen in the input is mapped to
/// a volunteer, or to `None` when no volunteer was available.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Matching {
    assigned_to: BTreeMap<StudentId, Option<VolunteerId>>,
}

impl Matching {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome for `student`. A student recorded twice keeps the
    /// latest outcome.
    pub fn record(&mut self, student: StudentId, volunteer: Option<VolunteerId>) {
        self.assigned_to.insert(student, volunteer);
    }

    #[cfg(test)]
    pub fn contains(&self, student: StudentId) -> bool {
        self.assigned_to.contains_key(&student)
    }

    pub fn volunteer_for(&self, student: StudentId) -> Option<VolunteerId> {
        self.assigned_to.get(&student).copied().flatten()
    }

    #[cfg(test)]
    pub fn all_students(&self) -> Vec<StudentId> {
        self.assigned_to.keys().copied().collect()
    }

    pub fn students_for(&self, volunteer: VolunteerId) -> Vec<StudentId> {
        self.assigned_to
            .iter()
            .filter_map(|(&s, &v)| if v == Some(volunteer) { Some(s) } else { None })
            .collect()
    }

    pub fn load_of(&self, volunteer: VolunteerId) -> usize {
        self.assigned_to
            .values()
            .filter(|&&v| v == Some(volunteer))
            .count()
    }

    pub fn unassigned_students(&self) -> Vec<StudentId> {
        self.assigned_to
            .iter()
            .filter_map(|(&s, v)| if v.is_none() { Some(s) } else { None })
            .collect()
    }

    /// Iterate over outcomes in ascending student order.
    pub fn pairs(&self) -> impl Iterator<Item = (StudentId, Option<VolunteerId>)> + '_ {
        self.assigned_to.iter().map(|(&s, &v)| (s, v))
    }

    pub fn len(&self) -> usize {
        self.assigned_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned_to.is_empty()
    }
}

#[test]
fn test_record_and_query() {
    let mut m = Matching::new();
    m.record(StudentId(3), Some(VolunteerId(10)));
    m.record(StudentId(1), Some(VolunteerId(10)));
    m.record(StudentId(2), None);
    assert_eq!(m.len(), 3);
    assert_eq!(m.volunteer_for(StudentId(3)), Some(VolunteerId(10)));
    assert_eq!(m.volunteer_for(StudentId(2)), None);
    assert_eq!(m.volunteer_for(StudentId(42)), None);
    assert!(m.contains(StudentId(2)));
    assert!(!m.contains(StudentId(42)));
    assert_eq!(
        m.students_for(VolunteerId(10)),
        vec![StudentId(1), StudentId(3)]
    );
    assert_eq!(m.load_of(VolunteerId(10)), 2);
    assert_eq!(m.load_of(VolunteerId(20)), 0);
    assert_eq!(m.unassigned_students(), vec![StudentId(2)]);
    assert_eq!(
        m.pairs().map(|(s, _)| s).collect::<Vec<_>>(),
        vec![StudentId(1), StudentId(2), StudentId(3)]
    );
}

#[test]
fn test_record_twice_keeps_latest() {
    let mut m = Matching::new();
    m.record(StudentId(1), Some(VolunteerId(10)));
    m.record(StudentId(1), Some(VolunteerId(20)));
    assert_eq!(m.len(), 1);
    assert_eq!(m.volunteer_for(StudentId(1)), Some(VolunteerId(20)));
    assert_eq!(m.load_of(VolunteerId(10)), 0);
}
