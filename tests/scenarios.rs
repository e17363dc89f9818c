#![forbid(unsafe_code)]
use astreinte_rotation::{
    apply_point_in_time_promotions, compute_week_assignment, monday_of,
    resolve_week_substitutions, sunday_of, LeaveOracle, LeavePeriod, Person, PersonId,
    RotatingGroup, RotationConfig, RotationGroup, Scheduler, Tier,
};
use chrono::NaiveDate;

fn d(m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, m, day).unwrap()
}

fn config() -> RotationConfig {
    RotationConfig::new(d(8, 25), RotatingGroup::A)
}

fn roster() -> Vec<Person> {
    vec![
        Person::new("P1", "Infra", RotationGroup::A).with_id("p1"),
        Person::new("P2", "Data", RotationGroup::A).with_id("p2"),
        Person::new("P3", "Infra", RotationGroup::B).with_id("p3"),
        Person::new("P4", "Ops", RotationGroup::Fixed).with_id("p4"),
    ]
}

fn leave(person: &str, start: NaiveDate, end: NaiveDate) -> LeavePeriod {
    LeavePeriod::new(PersonId::new(person), start, end, "vacaciones").unwrap()
}

fn ids(entries: &[astreinte_rotation::AssignedPerson]) -> Vec<&str> {
    entries.iter().map(|a| a.person.id.as_str()).collect()
}

#[test]
fn weeks_alternate_from_reference() {
    let w1 = compute_week_assignment(&roster(), &config(), d(8, 25));
    assert_eq!(w1.week_number, 1);
    assert_eq!(w1.group_at_tier1, RotatingGroup::A);

    let w2 = compute_week_assignment(&roster(), &config(), d(9, 1));
    assert_eq!(w2.week_number, 2);
    assert_eq!(w2.group_at_tier1, RotatingGroup::B);
    assert_eq!(w2.tier1.len(), 1);
    assert_eq!(w2.tier1[0].id.as_str(), "p3");
    assert_eq!(w2.tier2.len(), 2);
    assert_eq!(w2.tier3[0].id.as_str(), "p4");
}

#[test]
fn tier2_substitutes_same_unit_for_the_week() {
    let week = compute_week_assignment(&roster(), &config(), d(8, 27));
    let leaves = vec![leave("p1", d(8, 25), d(8, 31))];
    let resolved = resolve_week_substitutions(&week, &leaves, d(8, 25), d(8, 31));

    assert_eq!(resolved.group_at_tier1, RotatingGroup::A);
    assert_eq!(ids(&resolved.tier1), vec!["p3", "p2"]);
    assert!(resolved.tier1[0].is_substitute);
    assert_eq!(resolved.tier1[0].substitutes_for.as_deref(), Some("P1"));
    assert!(resolved.tier2.is_empty());
    assert_eq!(resolved.tier_of(&PersonId::new("p3")), Some(Tier::One));
    assert_eq!(resolved.tier_of(&PersonId::new("p1")), None);
    assert_eq!(ids(&resolved.tier3), vec!["p4"]);
    assert!(!resolved.tier3[0].on_leave);
}

#[test]
fn no_same_unit_candidate_leaves_slot_on_leave() {
    let mut people = roster();
    people[2].unit = "Network".into();
    let week = compute_week_assignment(&people, &config(), d(8, 27));
    let leaves = vec![leave("p1", d(8, 25), d(8, 31))];
    let resolved = resolve_week_substitutions(&week, &leaves, d(8, 25), d(8, 31));

    assert_eq!(ids(&resolved.tier1), vec!["p1", "p2"]);
    assert!(resolved.tier1[0].on_leave);
    assert!(!resolved.tier1[0].is_substitute);
    assert_eq!(ids(&resolved.tier2), vec!["p3"]);
    assert!(!resolved.tier2[0].on_leave);
}

#[test]
fn mid_week_leave_overlaps_week() {
    let oracle = LeaveOracle::new(&[leave("p1", d(9, 3), d(9, 5))]);
    assert!(oracle.overlaps_interval(&PersonId::new("p1"), d(9, 1), d(9, 7)));
}

#[test]
fn cancelled_leave_never_blocks() {
    let mut cancelled = leave("p1", d(8, 25), d(8, 31));
    cancelled.active = false;
    let oracle = LeaveOracle::new(std::slice::from_ref(&cancelled));
    let p1 = PersonId::new("p1");
    assert!(!oracle.is_on_leave(&p1, d(8, 27)));
    assert!(!oracle.overlaps_interval(&p1, d(8, 25), d(8, 31)));

    let s = Scheduler::new(config(), roster(), &[cancelled]);
    let week = s.week(d(8, 27));
    assert_eq!(ids(&week.tier1), vec!["p1", "p2"]);
    assert!(week.tier1.iter().all(|a| !a.on_leave));
}

#[test]
fn tier2_and_tier3_leave_is_only_annotated() {
    let leaves = vec![leave("p3", d(8, 29), d(9, 2)), leave("p4", d(8, 20), d(8, 25))];
    let s = Scheduler::new(config(), roster(), &leaves);
    let week = s.week(d(8, 25));
    assert_eq!(ids(&week.tier2), vec!["p3"]);
    assert!(week.tier2[0].on_leave);
    assert!(week.tier3[0].on_leave);
}

#[test]
fn day_view_drops_absent_and_promotes_same_unit() {
    // P1 absent mercredi seulement, P3 absent lundi : la semaine n'a pas de remplaçant
    let leaves = vec![leave("p1", d(8, 27), d(8, 27)), leave("p3", d(8, 25), d(8, 25))];
    let week = compute_week_assignment(&roster(), &config(), d(8, 27));
    let resolved = resolve_week_substitutions(&week, &leaves, monday_of(d(8, 27)), sunday_of(d(8, 27)));
    assert!(resolved.tier1[0].on_leave);

    let day = apply_point_in_time_promotions(resolved, &leaves, d(8, 27));
    assert_eq!(ids(&day.tier1), vec!["p2"]);
    assert_eq!(ids(&day.on_leave), vec!["p1"]);
    assert!(day.tier2[0].promoted_due_to_leave);
    assert_eq!(day.tier2[0].promotion_reason.as_deref(), Some("replaces P1 (leave)"));
    assert_eq!(day.tier2[0].person.id.as_str(), "p3");
}

#[test]
fn fixed_member_promoted_when_tier2_absent() {
    let mut people = roster();
    people[3].unit = "Infra".into();
    let leaves = vec![leave("p3", d(8, 26), d(8, 26))];
    let s = Scheduler::new(config(), people, &leaves);

    let day = s.day(d(8, 26));
    assert!(day.tier2.is_empty());
    assert!(day.tier3[0].promoted_due_to_leave);
    assert_eq!(day.tier3[0].promotion_reason.as_deref(), Some("replaces P3 (leave)"));

    let other_day = s.day(d(8, 27));
    assert!(!other_day.tier3[0].promoted_due_to_leave);
    assert!(other_day.on_leave.is_empty());
}

#[test]
fn empty_inputs_are_valid() {
    let s = Scheduler::new(config(), vec![], &[]);
    let day = s.day(d(9, 3));
    assert_eq!(day.week_number, 2);
    assert!(day.tier1.is_empty() && day.tier2.is_empty() && day.tier3.is_empty());

    let week = compute_week_assignment(&roster(), &config(), d(8, 25));
    let resolved = resolve_week_substitutions(&week, &[], d(8, 25), d(8, 31));
    assert_eq!(ids(&resolved.tier1), vec!["p1", "p2"]);
    assert!(resolved.tier1.iter().all(|a| !a.on_leave && !a.is_substitute));
}

#[test]
fn inactive_people_are_not_scheduled() {
    let mut people = roster();
    people[0].active = false;
    let week = compute_week_assignment(&people, &config(), d(8, 25));
    assert_eq!(week.tier1.len(), 1);
    assert_eq!(week.tier1[0].id.as_str(), "p2");
}
