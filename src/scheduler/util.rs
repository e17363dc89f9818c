use super::AssignedPerson;
use crate::model::Person;

/// Position du premier candidat de même unité qui satisfait `available`.
pub(super) fn find_same_unit_index<F>(
    absent: &Person,
    candidates: &[AssignedPerson],
    available: F,
) -> Option<usize>
where
    F: Fn(&Person) -> bool,
{
    candidates.iter().position(|c| {
        let p = &c.person;
        p.id != absent.id && p.active && p.unit == absent.unit && available(p)
    })
}

/// Parmi les absents de même unité, celui d'identifiant le plus petit.
pub(super) fn lowest_id_same_unit<'a>(
    person: &Person,
    absents: &'a [&'a Person],
) -> Option<&'a Person> {
    absents
        .iter()
        .copied()
        .filter(|v| v.unit == person.unit && v.id != person.id)
        .min_by(|a, b| a.id.cmp(&b.id))
}
