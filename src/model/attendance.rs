use super::{StudentId, VolunteerId};
use serde::Deserialize;

/// A past session in which a volunteer tutored a student.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize)]
pub struct Attendance {
    pub student_id: StudentId,
    pub volunteer_id: VolunteerId,
}

impl Attendance {
    pub fn new(student_id: StudentId, volunteer_id: VolunteerId) -> Self {
        Self {
            student_id,
            volunteer_id,
        }
    }
}
