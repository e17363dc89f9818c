use super::{util, AssignedPerson, LeaveOracle, ResolvedAssignment, WeekAssignment};
use chrono::NaiveDate;

/// Remplacements de la semaine `[week_start, week_end]`.
///
/// Chaque titulaire du niveau 1 en congé sur l'intervalle est remplacé par le
/// premier membre du niveau 2 de même unité, disponible et encore présent au
/// niveau 2 ; ce dernier quitte alors le niveau 2. Sans candidat, le titulaire
/// reste à sa place marqué `on_leave`. Les niveaux 2 et 3 sont seulement annotés.
pub(super) fn resolve_week_substitutions(
    week: &WeekAssignment,
    oracle: &LeaveOracle,
    week_start: NaiveDate,
    week_end: NaiveDate,
) -> ResolvedAssignment {
    let away = |p: &crate::model::Person| oracle.overlaps_interval(&p.id, week_start, week_end);

    let mut tier2: Vec<AssignedPerson> =
        week.tier2.iter().cloned().map(AssignedPerson::plain).collect();
    let mut tier1 = Vec::with_capacity(week.tier1.len());

    for holder in &week.tier1 {
        if !away(holder) {
            tier1.push(AssignedPerson::plain(holder.clone()));
            continue;
        }
        match util::find_same_unit_index(holder, &tier2, |r| !away(r)) {
            Some(idx) => {
                let mut substitute = tier2.remove(idx);
                debug_event!(
                    holder = %holder.id,
                    substitute = %substitute.person.id,
                    unit = %holder.unit,
                    "tier-1 slot backfilled from tier 2"
                );
                substitute.is_substitute = true;
                substitute.substitutes_for = Some(holder.name.clone());
                tier1.push(substitute);
            }
            None => {
                debug_event!(holder = %holder.id, "tier-1 slot left uncovered");
                let mut kept = AssignedPerson::plain(holder.clone());
                kept.on_leave = true;
                tier1.push(kept);
            }
        }
    }

    for entry in tier2.iter_mut() {
        entry.on_leave = away(&entry.person);
    }

    let tier3 = week
        .tier3
        .iter()
        .map(|p| AssignedPerson {
            on_leave: away(p),
            ..AssignedPerson::plain(p.clone())
        })
        .collect();

    ResolvedAssignment {
        week_number: week.week_number,
        group_at_tier1: week.group_at_tier1,
        tier1,
        tier2,
        tier3,
        on_leave: Vec::new(),
    }
}
