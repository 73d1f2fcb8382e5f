use super::available_volunteers;
use crate::model::{Attendance, Roster, Student, Volunteer, VolunteerId};
use eyre::{Result, WrapErr};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Load a roster from `students.csv`, `volunteers.csv`, and optionally
/// `availability.csv` and `attendance.csv`, all with a header row.
pub struct CsvLoader {
    directory: PathBuf,
}

#[derive(Debug, Deserialize)]
struct AvailabilityRow {
    volunteer_id: VolunteerId,
    date: String,
}

fn read_records<T: DeserializeOwned, R: io::Read>(reader: R) -> Result<Vec<T>, csv::Error> {
    csv::Reader::from_reader(reader).into_deserialize().collect()
}

fn available_on(rows: &[AvailabilityRow], date: &str) -> Vec<VolunteerId> {
    rows.iter()
        .filter_map(|r| if r.date == date { Some(r.volunteer_id) } else { None })
        .collect()
}

impl CsvLoader {
    pub fn new(directory: &Path) -> Self {
        Self {
            directory: directory.to_owned(),
        }
    }

    fn read<T: DeserializeOwned>(&self, file_name: &str) -> Result<Vec<T>> {
        let path = self.directory.join(file_name);
        let file =
            File::open(&path).wrap_err_with(|| format!("cannot open {}", path.display()))?;
        read_records(file).wrap_err_with(|| format!("cannot parse {}", path.display()))
    }

    fn read_optional<T: DeserializeOwned>(&self, file_name: &str) -> Result<Vec<T>> {
        if self.directory.join(file_name).exists() {
            self.read(file_name)
        } else {
            debug!(file_name, "optional file missing");
            Ok(Vec::new())
        }
    }

    pub fn load(&self, date: Option<&str>) -> Result<Roster> {
        let students: Vec<Student> = self.read("students.csv").wrap_err("cannot load students")?;
        let volunteers: Vec<Volunteer> = self
            .read("volunteers.csv")
            .wrap_err("cannot load volunteers")?;
        let volunteers = match date {
            Some(date) => {
                let rows: Vec<AvailabilityRow> = self
                    .read_optional("availability.csv")
                    .wrap_err("cannot load availability")?;
                available_volunteers(volunteers, &available_on(&rows, date))
            }
            None => volunteers,
        };
        let history: Vec<Attendance> = self
            .read_optional("attendance.csv")
            .wrap_err("cannot load attendance history")?;
        info!(
            directory = %self.directory.display(),
            students = students.len(),
            volunteers = volunteers.len(),
            history = history.len(),
            "roster loaded from csv files"
        );
        Ok(Roster::new(students, volunteers, history))
    }
}

#[test]
fn test_read_students() {
    let data = "id,name\n2,Blaise Pascal\n1,Ada Lovelace\n";
    let students: Vec<Student> = read_records(data.as_bytes()).unwrap();
    assert_eq!(students.len(), 2);
    assert_eq!(students[0].id.0, 2);
    assert_eq!(students[1].name, "Ada Lovelace");
}

#[test]
fn test_read_attendance() {
    let data = "student_id,volunteer_id\n1,10\n1,10\n";
    let history: Vec<Attendance> = read_records(data.as_bytes()).unwrap();
    assert_eq!(history.len(), 2);
    assert!(history.iter().all(|a| a.volunteer_id == VolunteerId(10)));
}

#[test]
fn test_read_invalid() {
    let data = "id,name\nten,Grace\n";
    assert!(read_records::<Volunteer, _>(data.as_bytes()).is_err());
}

#[test]
fn test_available_on() {
    let data = "volunteer_id,date\n10,2024-03-01\n20,2024-03-08\n30,2024-03-01\n";
    let rows: Vec<AvailabilityRow> = read_records(data.as_bytes()).unwrap();
    assert_eq!(
        available_on(&rows, "2024-03-01"),
        vec![VolunteerId(10), VolunteerId(30)]
    );
    assert!(available_on(&rows, "2024-03-15").is_empty());
}

#[test]
fn test_missing_directory() {
    let loader = CsvLoader::new(Path::new("/nonexistent/vcmatch"));
    assert!(loader.load(None).is_err());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn directory(files: &[(&str, &str)]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("students.csv"), "id,name\n1,Ada\n2,Blaise\n").unwrap();
        fs::write(
            dir.path().join("volunteers.csv"),
            "id,name\n30,Edsger\n10,Grace\n20,Alan\n",
        )
        .unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        dir
    }

    fn volunteer_ids(roster: &Roster) -> Vec<i64> {
        roster.volunteers.iter().map(|v| v.id.0).collect()
    }

    #[test]
    fn attendance_is_optional() {
        let dir = directory(&[]);
        let roster = CsvLoader::new(dir.path()).load(None).unwrap();
        assert_eq!(roster.students.len(), 2);
        assert_eq!(volunteer_ids(&roster), vec![30, 10, 20]);
        assert!(roster.history.is_empty());
    }

    #[test]
    fn missing_availability_keeps_everyone() {
        let dir = directory(&[("attendance.csv", "student_id,volunteer_id\n1,10\n1,10\n")]);
        let roster = CsvLoader::new(dir.path()).load(Some("2024-03-01")).unwrap();
        assert_eq!(volunteer_ids(&roster), vec![30, 10, 20]);
        assert_eq!(roster.history.len(), 2);
    }

    #[test]
    fn availability_filters_volunteers_for_date() {
        let dir = directory(&[(
            "availability.csv",
            "volunteer_id,date\n10,2024-03-01\n20,2024-03-08\n30,2024-03-01\n",
        )]);
        let loader = CsvLoader::new(dir.path());
        let roster = loader.load(Some("2024-03-01")).unwrap();
        assert_eq!(volunteer_ids(&roster), vec![30, 10]);
        let roster = loader.load(Some("2024-03-15")).unwrap();
        assert_eq!(volunteer_ids(&roster), vec![30, 10, 20]);
    }
}
