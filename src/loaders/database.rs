use super::available_volunteers;
use crate::model::{Attendance, Roster, Student, StudentId, Volunteer, VolunteerId};
use eyre::{Result, WrapErr};
use sqlx::any::{AnyConnectOptions, AnyRow};
use sqlx::{AnyConnection, Connection, Row};
use std::str::FromStr;
use tracing::{debug, info};

pub struct DatabaseLoader {
    conn: AnyConnection,
}

impl DatabaseLoader {
    pub async fn new(url: &str) -> Result<Self> {
        sqlx::any::install_default_drivers();
        let options = AnyConnectOptions::from_str(url)
            .wrap_err_with(|| format!("invalid database url {url}"))?;
        Ok(Self {
            conn: AnyConnection::connect_with(&options)
                .await
                .wrap_err("cannot connect to database")?,
        })
    }

    /// Load the roster for a session. Without a date, every volunteer is
    /// considered available.
    pub async fn load(&mut self, date: Option<&str>) -> Result<Roster> {
        let students = self.load_students().await.wrap_err("cannot load students")?;
        let volunteers = self
            .load_volunteers()
            .await
            .wrap_err("cannot load volunteers")?;
        let volunteers = match date {
            Some(date) => {
                let available = self
                    .load_availability(date)
                    .await
                    .wrap_err("cannot load availability")?;
                debug!(date, declared = available.len(), "loaded availability");
                available_volunteers(volunteers, &available)
            }
            None => volunteers,
        };
        let history = self
            .load_attendance()
            .await
            .wrap_err("cannot load attendance history")?;
        info!(
            students = students.len(),
            volunteers = volunteers.len(),
            history = history.len(),
            "roster loaded from database"
        );
        Ok(Roster::new(students, volunteers, history))
    }

    async fn load_students(&mut self) -> Result<Vec<Student>> {
        sqlx::query("SELECT id, name FROM students ORDER BY id")
            .try_map(|row: AnyRow| {
                Ok(Student {
                    id: StudentId(row.try_get("id")?),
                    name: row.try_get("name")?,
                })
            })
            .fetch_all(&mut self.conn)
            .await
            .map_err(Into::into)
    }

    async fn load_volunteers(&mut self) -> Result<Vec<Volunteer>> {
        sqlx::query("SELECT id, name FROM volunteers ORDER BY id")
            .try_map(|row: AnyRow| {
                Ok(Volunteer {
                    id: VolunteerId(row.try_get("id")?),
                    name: row.try_get("name")?,
                })
            })
            .fetch_all(&mut self.conn)
            .await
            .map_err(Into::into)
    }

    async fn load_availability(&mut self, date: &str) -> Result<Vec<VolunteerId>> {
        sqlx::query("SELECT volunteer_id FROM availability WHERE date = ?")
            .bind(date.to_owned())
            .try_map(|row: AnyRow| Ok(VolunteerId(row.try_get("volunteer_id")?)))
            .fetch_all(&mut self.conn)
            .await
            .map_err(Into::into)
    }

    async fn load_attendance(&mut self) -> Result<Vec<Attendance>> {
        sqlx::query("SELECT student_id, volunteer_id FROM attendance")
            .try_map(|row: AnyRow| {
                Ok(Attendance::new(
                    StudentId(row.try_get("student_id")?),
                    VolunteerId(row.try_get("volunteer_id")?),
                ))
            })
            .fetch_all(&mut self.conn)
            .await
            .map_err(Into::into)
    }

    pub async fn close(self) -> Result<()> {
        self.conn.close().await.wrap_err("cannot close database connection")
    }
}
