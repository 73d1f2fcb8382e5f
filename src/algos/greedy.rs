use super::{Affinity, Loads};
use crate::model::{Attendance, Matching, StudentId, VolunteerId};
use rand::Rng;
use serde::Deserialize;
use tracing::{debug, instrument, trace};

/// Coefficients of the score given to a volunteer for a student:
/// `affinity * sessions_together - load_penalty * current_load + tie_break`.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Weights {
    pub affinity: f64,
    pub load_penalty: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            affinity: 10.0,
            load_penalty: 5.0,
        }
    }
}

/// Greedy, order-sensitive matcher. Students are considered one at a time
/// and each gets the best scoring volunteer given the loads accumulated so
/// far. The random source only provides the tie-break term, which lies in
/// `[0, 1)`.
pub struct Greedy<R> {
    weights: Weights,
    rng: R,
}

impl<R: Rng> Greedy<R> {
    pub fn new(weights: Weights, rng: R) -> Self {
        Self { weights, rng }
    }

    #[instrument(skip_all, fields(students = students.len(), volunteers = volunteers.len()))]
    pub fn assign(
        &mut self,
        students: &[StudentId],
        volunteers: &[VolunteerId],
        history: &[Attendance],
    ) -> Matching {
        let mut matching = Matching::new();
        if volunteers.is_empty() {
            debug!("No volunteer available, leaving every student unassigned");
            for &student in students {
                matching.record(student, None);
            }
            return matching;
        }
        let affinity = Affinity::from_history(history);
        let mut loads = Loads::new(volunteers);
        for &student in students {
            let volunteer = self.best_volunteer_for(student, volunteers, &affinity, &loads);
            if let Some(volunteer) = volunteer {
                trace!(
                    %student,
                    %volunteer,
                    affinity = affinity.count(student, volunteer),
                    load = loads.get(volunteer),
                    "assigning volunteer"
                );
                loads.increment(volunteer);
            }
            matching.record(student, volunteer);
        }
        debug!(spread = loads.spread(), "matching complete");
        matching
    }

    fn score(&mut self, affinity: usize, load: usize) -> f64 {
        self.weights.affinity * affinity as f64 - self.weights.load_penalty * load as f64
            + self.rng.random::<f64>()
    }

    /// Return the volunteer with the strictly highest score, the first one
    /// winning exact ties.
    fn best_volunteer_for(
        &mut self,
        student: StudentId,
        volunteers: &[VolunteerId],
        affinity: &Affinity,
        loads: &Loads,
    ) -> Option<VolunteerId> {
        let mut best: Option<(VolunteerId, f64)> = None;
        for &volunteer in volunteers {
            let score = self.score(affinity.count(student, volunteer), loads.get(volunteer));
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((volunteer, score));
            }
        }
        best.map(|(volunteer, _)| volunteer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    const TRIALS: usize = 1000;

    /// Random source whose tie-break is always 0.
    struct NoTieBreak;

    impl RngCore for NoTieBreak {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    fn match_students(
        students: &[StudentId],
        volunteers: &[VolunteerId],
        history: &[Attendance],
    ) -> Matching {
        Greedy::new(Weights::default(), rand::rng()).assign(students, volunteers, history)
    }

    fn students(ids: &[i64]) -> Vec<StudentId> {
        ids.iter().copied().map(StudentId).collect()
    }

    fn volunteers(ids: &[i64]) -> Vec<VolunteerId> {
        ids.iter().copied().map(VolunteerId).collect()
    }

    fn history(pairs: &[(i64, i64)]) -> Vec<Attendance> {
        pairs
            .iter()
            .map(|&(s, v)| Attendance::new(StudentId(s), VolunteerId(v)))
            .collect()
    }

    #[test]
    fn no_volunteer_leaves_everyone_unassigned() {
        let m = match_students(&students(&[1, 2, 3]), &[], &history(&[(1, 10)]));
        assert_eq!(m.len(), 3);
        assert_eq!(m.unassigned_students(), students(&[1, 2, 3]));
    }

    #[test]
    fn no_student_gives_empty_matching() {
        let m = match_students(&[], &volunteers(&[10, 20]), &history(&[(1, 10)]));
        assert!(m.is_empty());
    }

    #[test]
    fn every_student_appears_exactly_once() {
        let input = students(&[3, 1, 3, 2, 1]);
        let m = match_students(&input, &volunteers(&[10, 20]), &[]);
        assert_eq!(m.all_students(), students(&[1, 2, 3]));
        assert!(m.unassigned_students().is_empty());
    }

    #[test]
    fn single_volunteer_takes_everyone() {
        let input = students(&[1, 2, 3, 4, 5]);
        let m = match_students(&input, &volunteers(&[10]), &history(&[(2, 99)]));
        for s in &input {
            assert_eq!(m.volunteer_for(*s), Some(VolunteerId(10)));
        }
        assert_eq!(m.load_of(VolunteerId(10)), input.len());
    }

    #[test]
    fn prior_volunteer_is_preferred() {
        let input = students(&[1]);
        let pool = volunteers(&[10, 20, 30]);
        let past = history(&[(1, 20), (1, 20), (1, 10)]);
        let hits = (0..TRIALS)
            .filter(|_| {
                match_students(&input, &pool, &past).volunteer_for(StudentId(1))
                    == Some(VolunteerId(20))
            })
            .count();
        assert!(hits * 100 > TRIALS * 99, "only {hits} hits out of {TRIALS}");
    }

    #[test]
    fn load_is_balanced_without_history() {
        let input = students(&[1, 2, 3, 4]);
        let pool = volunteers(&[10, 20]);
        let balanced = (0..TRIALS)
            .filter(|_| {
                let m = match_students(&input, &pool, &[]);
                m.load_of(VolunteerId(10)).abs_diff(m.load_of(VolunteerId(20))) <= 1
            })
            .count();
        assert!(balanced * 100 > TRIALS * 99, "only {balanced} balanced out of {TRIALS}");
    }

    #[test]
    fn worked_example() {
        let input = students(&[1, 2]);
        let pool = volunteers(&[10, 20]);
        let past = history(&[(1, 10), (1, 10), (1, 10)]);
        for seed in 0..100 {
            let mut algo = Greedy::new(Weights::default(), StdRng::seed_from_u64(seed));
            let m = algo.assign(&input, &pool, &past);
            assert_eq!(m.volunteer_for(StudentId(1)), Some(VolunteerId(10)));
            assert_eq!(m.volunteer_for(StudentId(2)), Some(VolunteerId(20)));
        }
    }

    #[test]
    fn exact_ties_go_to_first_volunteer() {
        let mut algo = Greedy::new(Weights::default(), NoTieBreak);
        let m = algo.assign(&students(&[1, 2, 3]), &volunteers(&[20, 10]), &[]);
        assert_eq!(m.volunteer_for(StudentId(1)), Some(VolunteerId(20)));
        assert_eq!(m.volunteer_for(StudentId(2)), Some(VolunteerId(10)));
        assert_eq!(m.volunteer_for(StudentId(3)), Some(VolunteerId(20)));
    }

    #[test]
    fn processing_order_matters() {
        let pool = volunteers(&[10, 20]);
        let past = history(&[(1, 10), (2, 10)]);
        let mut algo = Greedy::new(
            Weights {
                affinity: 10.0,
                load_penalty: 15.0,
            },
            NoTieBreak,
        );
        // The first student processed claims volunteer 10, the second one is
        // pushed to 20 by the load penalty.
        let m = algo.assign(&students(&[1, 2]), &pool, &past);
        assert_eq!(m.volunteer_for(StudentId(1)), Some(VolunteerId(10)));
        assert_eq!(m.volunteer_for(StudentId(2)), Some(VolunteerId(20)));
        let m = algo.assign(&students(&[2, 1]), &pool, &past);
        assert_eq!(m.volunteer_for(StudentId(2)), Some(VolunteerId(10)));
        assert_eq!(m.volunteer_for(StudentId(1)), Some(VolunteerId(20)));
    }

    #[test]
    fn unknown_history_is_ignored() {
        let mut algo = Greedy::new(Weights::default(), NoTieBreak);
        let past = history(&[(1, 99), (1, 99), (7, 20)]);
        let m = algo.assign(&students(&[1]), &volunteers(&[10, 20]), &past);
        assert_eq!(m.volunteer_for(StudentId(1)), Some(VolunteerId(10)));
    }

    #[test]
    fn duplicate_student_counts_twice_towards_load() {
        let mut algo = Greedy::new(Weights::default(), NoTieBreak);
        // Student 1 is processed twice, loading both volunteers, so student 2
        // falls back to the first volunteer on the tie.
        let m = algo.assign(&students(&[1, 1, 2]), &volunteers(&[10, 20]), &[]);
        assert_eq!(m.volunteer_for(StudentId(1)), Some(VolunteerId(20)));
        assert_eq!(m.volunteer_for(StudentId(2)), Some(VolunteerId(10)));
    }

    #[test]
    fn without_load_penalty_affinity_wins_everything() {
        let mut algo = Greedy::new(
            Weights {
                affinity: 10.0,
                load_penalty: 0.0,
            },
            StdRng::seed_from_u64(7),
        );
        let past = history(&[(1, 20), (2, 20), (3, 20)]);
        let m = algo.assign(&students(&[1, 2, 3]), &volunteers(&[10, 20]), &past);
        assert_eq!(m.load_of(VolunteerId(20)), 3);
    }
}
