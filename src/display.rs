use crate::model::{Matching, Roster, Student, Volunteer};
use crate::stats;
use eyre::{Result, WrapErr};
use serde::Serialize;

pub fn display_details(roster: &Roster, m: &Matching) {
    let mut volunteers = roster.volunteers.iter().collect::<Vec<_>>();
    volunteers.sort_by_key(|v| v.name.clone());
    for v in volunteers {
        let mut students = m
            .students_for(v.id)
            .into_iter()
            .filter_map(|s| roster.student(s))
            .collect::<Vec<_>>();
        students.sort_by_key(|s| s.name.clone());
        if !students.is_empty() {
            println!("{}:", v.name);
            for s in students {
                print!("  - {}", s.name);
                match roster.sessions_together(s.id, v.id) {
                    0 => (),
                    1 => print!(" (1 previous session)"),
                    n => print!(" ({n} previous sessions)"),
                }
                println!();
            }
            println!();
        }
    }
}

pub fn display_stats(roster: &Roster, m: &Matching) {
    let students = m.len();
    let unassigned = m.unassigned_students().len();
    println!(
        "Students assigned/unassigned/total: {}/{}/{}",
        students - unassigned,
        unassigned,
        students
    );
    let volunteers = roster.volunteer_ids();
    let loads = stats::load_distribution(m, &volunteers);
    if !loads.is_empty() {
        println!("Volunteer loads (spread {}):", stats::load_spread(m, &volunteers));
        for (load, n) in loads.iter().enumerate() {
            if *n != 0 {
                println!("  - {} student(s): {} volunteer(s)", load, n);
            }
        }
    }
}

pub fn display_idle(roster: &Roster, m: &Matching) {
    let mut volunteers = roster
        .volunteers
        .iter()
        .filter(|v| m.load_of(v.id) == 0)
        .collect::<Vec<_>>();
    volunteers.sort_by_key(|v| v.name.clone());
    if !volunteers.is_empty() {
        println!("Idle volunteers:");
        for v in volunteers {
            println!("  - {}", v.name);
        }
    }
}

pub fn display_unassigned(roster: &Roster, m: &Matching) {
    let mut students = m
        .unassigned_students()
        .into_iter()
        .filter_map(|s| roster.student(s))
        .collect::<Vec<_>>();
    students.sort_by_key(|s| s.name.clone());
    if !students.is_empty() {
        println!("Students without a volunteer:");
        for s in students {
            println!("  - {}", s.name);
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Pair<'a> {
    pub student: &'a Student,
    pub volunteer: Option<&'a Volunteer>,
}

/// Join the matching back to the loaded records, in student order.
pub fn pairs<'a>(roster: &'a Roster, m: &Matching) -> Vec<Pair<'a>> {
    m.pairs()
        .filter_map(|(s, v)| {
            roster.student(s).map(|student| Pair {
                student,
                volunteer: v.and_then(|v| roster.volunteer(v)),
            })
        })
        .collect()
}

pub fn to_json(roster: &Roster, m: &Matching) -> Result<String> {
    serde_json::to_string_pretty(&pairs(roster, m)).wrap_err("cannot serialize matching")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{StudentId, VolunteerId};

    #[test]
    fn json_joins_records() {
        let roster = Roster::new(
            vec![
                Student {
                    id: StudentId(2),
                    name: "Blaise".into(),
                },
                Student {
                    id: StudentId(1),
                    name: "Ada".into(),
                },
            ],
            vec![Volunteer {
                id: VolunteerId(10),
                name: "Grace".into(),
            }],
            Vec::new(),
        );
        let mut m = Matching::new();
        m.record(StudentId(2), Some(VolunteerId(10)));
        m.record(StudentId(1), None);
        let json: serde_json::Value = serde_json::from_str(&to_json(&roster, &m).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "student": { "id": 1, "name": "Ada" }, "volunteer": null },
                {
                    "student": { "id": 2, "name": "Blaise" },
                    "volunteer": { "id": 10, "name": "Grace" }
                },
            ])
        );
    }
}
