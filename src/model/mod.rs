pub use self::attendance::Attendance;
pub use self::matching::Matching;
pub use self::roster::Roster;
pub use self::student::{Student, StudentId};
pub use self::volunteer::{Volunteer, VolunteerId};

mod attendance;
mod matching;
mod roster;
mod student;
mod volunteer;
