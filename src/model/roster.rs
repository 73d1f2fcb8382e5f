use super::{Attendance, Matching, Student, StudentId, Volunteer, VolunteerId};
use crate::algos::Greedy;
use rand::Rng;

/// Everything needed to match students for one session: all students, the
/// volunteers available for the session, and the whole attendance history.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    pub students: Vec<Student>,
    pub volunteers: Vec<Volunteer>,
    pub history: Vec<Attendance>,
}

impl Roster {
    pub fn new(students: Vec<Student>, volunteers: Vec<Volunteer>, history: Vec<Attendance>) -> Self {
        Self {
            students,
            volunteers,
            history,
        }
    }

    pub fn student_ids(&self) -> Vec<StudentId> {
        self.students.iter().map(|s| s.id).collect()
    }

    pub fn volunteer_ids(&self) -> Vec<VolunteerId> {
        self.volunteers.iter().map(|v| v.id).collect()
    }

    pub fn student(&self, id: StudentId) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn volunteer(&self, id: VolunteerId) -> Option<&Volunteer> {
        self.volunteers.iter().find(|v| v.id == id)
    }

    /// Number of past sessions `student` had with `volunteer`.
    pub fn sessions_together(&self, student: StudentId, volunteer: VolunteerId) -> usize {
        self.history
            .iter()
            .filter(|a| a.student_id == student && a.volunteer_id == volunteer)
            .count()
    }

    /// Volunteers `student` has worked with before, whether available or not.
    pub fn previous_volunteers(&self, student: StudentId) -> Vec<VolunteerId> {
        let mut volunteers = self
            .history
            .iter()
            .filter_map(|a| if a.student_id == student { Some(a.volunteer_id) } else { None })
            .collect::<Vec<_>>();
        volunteers.sort();
        volunteers.dedup();
        volunteers
    }

    pub fn assign<R: Rng>(&self, algo: &mut Greedy<R>) -> Matching {
        algo.assign(&self.student_ids(), &self.volunteer_ids(), &self.history)
    }
}

#[test]
fn test_history_queries() {
    let roster = Roster::new(
        vec![Student {
            id: StudentId(1),
            name: "Ada".into(),
        }],
        vec![Volunteer {
            id: VolunteerId(10),
            name: "Grace".into(),
        }],
        vec![
            Attendance::new(StudentId(1), VolunteerId(20)),
            Attendance::new(StudentId(1), VolunteerId(10)),
            Attendance::new(StudentId(1), VolunteerId(20)),
            Attendance::new(StudentId(2), VolunteerId(10)),
        ],
    );
    assert_eq!(roster.sessions_together(StudentId(1), VolunteerId(20)), 2);
    assert_eq!(roster.sessions_together(StudentId(2), VolunteerId(20)), 0);
    assert_eq!(
        roster.previous_volunteers(StudentId(1)),
        vec![VolunteerId(10), VolunteerId(20)]
    );
    assert_eq!(roster.student(StudentId(1)).map(|s| s.name.as_str()), Some("Ada"));
    assert!(roster.volunteer(VolunteerId(20)).is_none());
}
