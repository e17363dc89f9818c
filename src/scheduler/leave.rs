use crate::model::{LeavePeriod, PersonId};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Index des congés actifs par personne.
///
/// Les périodes inactives (annulées) et incohérentes (`start > end`) sont
/// ignorées à la construction : elles ne bloquent jamais un créneau.
#[derive(Debug, Clone, Default)]
pub struct LeaveOracle {
    by_person: HashMap<PersonId, Vec<(NaiveDate, NaiveDate)>>,
}

impl LeaveOracle {
    pub fn new(leaves: &[LeavePeriod]) -> Self {
        let mut by_person: HashMap<PersonId, Vec<(NaiveDate, NaiveDate)>> = HashMap::new();
        for leave in leaves.iter().filter(|l| l.active && l.is_consistent()) {
            by_person
                .entry(leave.person_id.clone())
                .or_default()
                .push((leave.start, leave.end));
        }
        Self { by_person }
    }

    /// Vrai si un congé actif contient `date` (bornes incluses).
    pub fn is_on_leave(&self, person: &PersonId, date: NaiveDate) -> bool {
        self.periods(person)
            .any(|(start, end)| start <= date && date <= end)
    }

    /// Vrai si un congé actif chevauche `[range_start, range_end]`, même partiellement.
    pub fn overlaps_interval(
        &self,
        person: &PersonId,
        range_start: NaiveDate,
        range_end: NaiveDate,
    ) -> bool {
        self.periods(person)
            .any(|(start, end)| start <= range_end && end >= range_start)
    }

    fn periods(&self, person: &PersonId) -> impl Iterator<Item = (NaiveDate, NaiveDate)> + '_ {
        self.by_person
            .get(person)
            .into_iter()
            .flat_map(|v| v.iter().copied())
    }
}
