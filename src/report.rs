use crate::io::status_and_note;
use crate::model::{Person, Tier};
use crate::scheduler::{AssignedPerson, LeaveOracle, ResolvedAssignment};
use chrono::NaiveDate;

/// Compteurs d'effectif pour un jour donné.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverageStats {
    pub total_active: usize,
    pub on_leave: usize,
    pub available: usize,
}

pub fn coverage_stats(people: &[Person], oracle: &LeaveOracle, date: NaiveDate) -> CoverageStats {
    let active: Vec<&Person> = people.iter().filter(|p| p.active).collect();
    let on_leave = active
        .iter()
        .filter(|p| oracle.is_on_leave(&p.id, date))
        .count();
    CoverageStats {
        total_active: active.len(),
        on_leave,
        available: active.len() - on_leave,
    }
}

/// Permet de customiser le rendu d'une répartition (texte, chat, etc.).
pub trait AssignmentRenderer {
    fn render(&self, heading: &str, assignment: &ResolvedAssignment) -> String;
}

/// Rendu texte brut, une ligne par personne.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextRenderer;

impl AssignmentRenderer for TextRenderer {
    fn render(&self, heading: &str, assignment: &ResolvedAssignment) -> String {
        let mut out = format!(
            "{heading} | week {} | tier 1: group {}\n",
            assignment.week_number, assignment.group_at_tier1
        );
        for tier in [Tier::One, Tier::Two, Tier::Three] {
            out.push_str(&format!("[tier {}]\n", u8::from(tier)));
            push_lines(&mut out, assignment.tier(tier));
        }
        if !assignment.on_leave.is_empty() {
            out.push_str("[on leave]\n");
            push_lines(&mut out, &assignment.on_leave);
        }
        out
    }
}

fn push_lines(out: &mut String, entries: &[AssignedPerson]) {
    if entries.is_empty() {
        out.push_str("  -\n");
    }
    for a in entries {
        let (status, note) = status_and_note(a);
        out.push_str(&format!("  {} ({}) {}", a.person.name, a.person.unit, status));
        if !note.is_empty() {
            out.push_str(&format!(": {note}"));
        }
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LeavePeriod, PersonId, RotationConfig, RotationGroup};
    use crate::scheduler::Scheduler;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
    }

    fn roster() -> Vec<Person> {
        vec![
            Person::new("Jason", "Infra", RotationGroup::A).with_id("p1"),
            Person::new("Elvin", "Data", RotationGroup::A).with_id("p2"),
            Person::new("Aneudy", "Infra", RotationGroup::B).with_id("p3"),
            Person::new("Minerva", "Infra", RotationGroup::Fixed).with_id("p4"),
        ]
    }

    #[test]
    fn text_rendering_of_a_substituted_day() {
        let leaves =
            vec![LeavePeriod::new(PersonId::new("p1"), d(8, 25), d(8, 31), "vacaciones").unwrap()];
        let s = Scheduler::new(RotationConfig::default(), roster(), &leaves);
        let text = TextRenderer.render("2025-08-27", &s.day(d(8, 27)));
        insta::assert_snapshot!(text, @r"
        2025-08-27 | week 1 | tier 1: group A
        [tier 1]
          Aneudy (Infra) substitute: substitutes Jason
          Elvin (Data) active
        [tier 2]
          -
        [tier 3]
          Minerva (Infra) active
        [on leave]
          Jason (Infra) on_leave
        ");
    }

    #[test]
    fn stats_count_active_people_only() {
        let mut people = roster();
        people[1].active = false;
        let leaves = vec![
            LeavePeriod::new(PersonId::new("p1"), d(9, 1), d(9, 5), "").unwrap(),
            LeavePeriod::new(PersonId::new("p2"), d(9, 1), d(9, 5), "").unwrap(),
        ];
        let stats = coverage_stats(&people, &LeaveOracle::new(&leaves), d(9, 3));
        assert_eq!(
            stats,
            CoverageStats {
                total_active: 3,
                on_leave: 1,
                available: 2
            }
        );
    }
}
