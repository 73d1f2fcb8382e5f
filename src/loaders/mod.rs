pub use self::csv_loader::CsvLoader;
pub use self::database::DatabaseLoader;

use crate::model::{Volunteer, VolunteerId};
use tracing::debug;

mod csv_loader;
mod database;

/// Keep the volunteers declared available, in their original order. When
/// nobody declared availability, everybody is considered available.
pub fn available_volunteers(volunteers: Vec<Volunteer>, available: &[VolunteerId]) -> Vec<Volunteer> {
    if available.is_empty() {
        debug!("No availability declared, considering all {} volunteers", volunteers.len());
        return volunteers;
    }
    volunteers
        .into_iter()
        .filter(|v| available.contains(&v.id))
        .collect()
}

#[cfg(test)]
fn volunteer(id: i64, name: &str) -> Volunteer {
    Volunteer {
        id: VolunteerId(id),
        name: name.to_owned(),
    }
}

#[test]
fn test_available_volunteers() {
    let all = vec![volunteer(30, "Cy"), volunteer(10, "Al"), volunteer(20, "Bo")];
    let ids = |vs: &[Volunteer]| vs.iter().map(|v| v.id.0).collect::<Vec<_>>();
    assert_eq!(
        ids(&available_volunteers(all.clone(), &[VolunteerId(10), VolunteerId(30)])),
        vec![30, 10]
    );
    assert_eq!(ids(&available_volunteers(all.clone(), &[])), vec![30, 10, 20]);
    assert!(available_volunteers(all, &[VolunteerId(99)]).is_empty());
}
