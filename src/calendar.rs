//! Arithmétique de semaines : lundi/dimanche d'une date et numéro de rotation.
//!
//! Tout est exprimé en [`NaiveDate`] : une date calendaire sans heure ni fuseau,
//! donc aucun décalage d'heure d'été ou d'offset UTC ne peut déplacer une semaine.

use crate::model::RotatingGroup;
use crate::scheduler::SchedError;
use chrono::{Datelike, Duration, NaiveDate};

/// Lundi (jour ISO 1) de la semaine contenant `date`.
///
/// Le dimanche est le dernier jour de la semaine : il renvoie le lundi six jours avant.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Dimanche de la semaine contenant `date` (`monday_of(date) + 6 jours`).
pub fn sunday_of(date: NaiveDate) -> NaiveDate {
    monday_of(date) + Duration::days(6)
}

/// Numéro de rotation (base 1) de la semaine de `query` par rapport à `reference`.
///
/// La semaine de référence vaut 1, la précédente 0, etc.
pub fn rotation_week_number(query: NaiveDate, reference: NaiveDate) -> i64 {
    let days = monday_of(query)
        .signed_duration_since(monday_of(reference))
        .num_days();
    days.div_euclid(7) + 1
}

/// Groupe au niveau 1 pour un numéro de semaine donné.
///
/// Semaine impaire : le groupe initial ; paire : l'autre. La parité est
/// euclidienne, donc l'alternance reste stricte pour les numéros ≤ 0.
pub fn group_at_tier1(week_number: i64, initial: RotatingGroup) -> RotatingGroup {
    if week_number.rem_euclid(2) == 1 {
        initial
    } else {
        initial.other()
    }
}

/// Parse une date `YYYY-MM-DD` stricte en date calendaire locale.
pub fn parse_local_date(raw: &str) -> Result<NaiveDate, SchedError> {
    let bytes = raw.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shape_ok {
        return Err(SchedError::InvalidDateFormat(raw.to_string()));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| SchedError::InvalidDateFormat(raw.to_string()))
}

/// Lundis successifs de `from` à `to` inclus (semaines touchées par l'intervalle).
pub(crate) fn mondays_between(from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let first = monday_of(from);
    std::iter::successors(Some(first), |d| d.checked_add_signed(Duration::days(7)))
        .take_while(move |d| *d <= to)
}
