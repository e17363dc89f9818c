use super::{util, AssignedPerson, LeaveOracle, ResolvedAssignment};
use crate::model::Person;
use chrono::NaiveDate;

/// Vue d'un jour précis au-dessus d'une semaine déjà résolue.
///
/// 1. Les personnes en congé à `date` sortent des niveaux (conservées dans `on_leave`).
/// 2. Un membre restant du niveau 2 (resp. 3) est annoté promu s'il partage
///    l'unité d'un absent du niveau 1 (resp. 2) ; à plusieurs absents possibles,
///    l'identifiant le plus petit gagne.
///
/// Personne ne change de niveau : seules les annotations bougent.
pub(super) fn apply_point_in_time_promotions(
    resolved: ResolvedAssignment,
    oracle: &LeaveOracle,
    date: NaiveDate,
) -> ResolvedAssignment {
    let ResolvedAssignment {
        week_number,
        group_at_tier1,
        tier1,
        tier2,
        tier3,
        mut on_leave,
    } = resolved;

    let absent = |a: &AssignedPerson| oracle.is_on_leave(a.id(), date);
    let absents_of = |tier: &[AssignedPerson]| -> Vec<Person> {
        tier.iter()
            .filter(|a| absent(a))
            .map(|a| a.person.clone())
            .collect()
    };
    let absent_tier1 = absents_of(&tier1);
    let absent_tier2 = absents_of(&tier2);

    let mut keep = |tier: Vec<AssignedPerson>| -> Vec<AssignedPerson> {
        let (gone, present): (Vec<_>, Vec<_>) = tier.into_iter().partition(|a| absent(a));
        on_leave.extend(gone.into_iter().map(|mut a| {
            a.on_leave = true;
            a
        }));
        present
    };
    let tier1 = keep(tier1);
    let tier2 = annotate(keep(tier2), &absent_tier1);
    let tier3 = annotate(keep(tier3), &absent_tier2);

    ResolvedAssignment {
        week_number,
        group_at_tier1,
        tier1,
        tier2,
        tier3,
        on_leave,
    }
}

/// Complète `on_leave` avec les personnes actives de `roster` absentes à `date`
/// qui ne figurent plus dans aucun niveau (titulaire remplacé en passe 1).
pub(super) fn collect_roster_absents(
    mut day: ResolvedAssignment,
    roster: &[Person],
    oracle: &LeaveOracle,
    date: NaiveDate,
) -> ResolvedAssignment {
    for p in roster.iter().filter(|p| p.active && oracle.is_on_leave(&p.id, date)) {
        let listed = day.on_leave.iter().any(|a| a.id() == &p.id) || day.tier_of(&p.id).is_some();
        if !listed {
            let mut entry = AssignedPerson::plain(p.clone());
            entry.on_leave = true;
            day.on_leave.push(entry);
        }
    }
    day
}

fn annotate(tier: Vec<AssignedPerson>, absents_above: &[Person]) -> Vec<AssignedPerson> {
    let absents: Vec<&Person> = absents_above.iter().collect();
    tier.into_iter()
        .map(|mut a| {
            if let Some(v) = util::lowest_id_same_unit(&a.person, &absents) {
                debug_event!(person = %a.person.id, replaces = %v.id, "promoted due to leave");
                a.promoted_due_to_leave = true;
                a.promotion_reason = Some(format!("replaces {} (leave)", v.name));
            }
            a
        })
        .collect()
}
