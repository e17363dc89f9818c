use super::WeekAssignment;
use crate::calendar;
use crate::model::{Person, RotationConfig, RotationGroup};
use chrono::NaiveDate;

/// Partitionne l'effectif actif en trois niveaux pour la semaine de `query`.
///
/// Aucune prise en compte des congés ici. L'ordre de chaque niveau suit
/// l'ordre de `roster`.
pub(super) fn compute_week_assignment(
    roster: &[Person],
    config: &RotationConfig,
    query: NaiveDate,
) -> WeekAssignment {
    let week_number = calendar::rotation_week_number(query, config.reference_date);
    let group_at_tier1 = calendar::group_at_tier1(week_number, config.initial_group_at_tier1);

    let mut tier1 = Vec::new();
    let mut tier2 = Vec::new();
    let mut tier3 = Vec::new();

    for person in roster.iter().filter(|p| p.active) {
        match person.group {
            RotationGroup::Fixed => tier3.push(person.clone()),
            g if group_at_tier1.matches(g) => tier1.push(person.clone()),
            _ => tier2.push(person.clone()),
        }
    }

    debug_event!(
        week_number,
        group = %group_at_tier1,
        tier1 = tier1.len(),
        tier2 = tier2.len(),
        tier3 = tier3.len(),
        "week partitioned"
    );

    WeekAssignment {
        week_number,
        group_at_tier1,
        tier1,
        tier2,
        tier3,
    }
}
