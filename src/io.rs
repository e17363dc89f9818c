use crate::calendar::parse_local_date;
use crate::model::{Dataset, LeavePeriod, Person, PersonId, RotationGroup, Tier};
use crate::scheduler::{AssignedPerson, ResolvedAssignment};
use anyhow::{bail, Context};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import de personnes depuis CSV: header `id,name,unit,phone,group,tier[,active]`
///
/// Un `id` vide génère un identifiant aléatoire.
pub fn import_people_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Person>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let id = rec.get(0).context("missing id")?.trim();
        let name = rec.get(1).context("missing name")?.trim();
        let unit = rec.get(2).context("missing unit")?.trim();
        let phone = rec.get(3).context("missing phone")?.trim();
        let group = rec.get(4).context("missing group")?.trim();
        let tier = rec.get(5).context("missing tier")?.trim();
        if name.is_empty() || unit.is_empty() {
            bail!("invalid people row (empty name or unit)");
        }
        let group = group
            .parse::<RotationGroup>()
            .with_context(|| format!("invalid group for {name}"))?;
        let mut person = Person::new(name, unit, group).with_phone(phone);
        if !id.is_empty() {
            person.id = PersonId::new(id);
        }
        if !tier.is_empty() {
            let n = tier
                .parse::<u8>()
                .with_context(|| format!("invalid tier for {name}"))?;
            person.base_tier = Tier::try_from(n)?;
        }
        if let Some(flag) = rec.get(6) {
            let flag = flag.trim();
            if !flag.is_empty() {
                person.active =
                    parse_bool(flag).with_context(|| format!("invalid active value for {name}"))?;
            }
        }
        out.push(person);
    }
    Ok(out)
}

/// Import de congés: header `person_id,start,end[,active][,reason]` (dates `YYYY-MM-DD`)
pub fn import_leaves_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<LeavePeriod>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let person = rec.get(0).context("missing person_id")?.trim();
        if person.is_empty() {
            bail!("invalid leave row (empty person_id)");
        }
        let start = parse_field_date(rec.get(1), "start")?;
        let end = parse_field_date(rec.get(2), "end")?;
        let reason = rec.get(4).map(str::trim).unwrap_or("");
        let mut leave = LeavePeriod::new(PersonId::new(person), start, end, reason)
            .with_context(|| format!("leave for {person}"))?;
        if let Some(flag) = rec.get(3) {
            let flag = flag.trim();
            if !flag.is_empty() {
                leave.active =
                    parse_bool(flag).with_context(|| format!("invalid active value for {person}"))?;
            }
        }
        out.push(leave);
    }
    Ok(out)
}

fn parse_field_date(raw: Option<&str>, field: &str) -> anyhow::Result<NaiveDate> {
    let raw = raw.with_context(|| format!("missing {field}"))?.trim();
    Ok(parse_local_date(raw).with_context(|| format!("{field} date"))?)
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "oui" | "si" => Ok(true),
        "false" | "0" | "no" | "n" | "non" => Ok(false),
        _ => bail!("expected boolean"),
    }
}

/// Export JSON complet (sauvegarde), jolie mise en forme
pub fn export_dataset_json<P: AsRef<Path>>(path: P, dataset: &Dataset) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(dataset)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV d'une semaine résolue:
/// header `week,tier,id,name,unit,phone,status,note`
pub fn export_assignment_csv<P: AsRef<Path>>(
    path: P,
    assignment: &ResolvedAssignment,
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["week", "tier", "id", "name", "unit", "phone", "status", "note"])?;
    let week = assignment.week_number.to_string();
    let rows = [
        ("1", &assignment.tier1),
        ("2", &assignment.tier2),
        ("3", &assignment.tier3),
        ("leave", &assignment.on_leave),
    ];
    for (tier, entries) in rows {
        for a in entries.iter() {
            let (status, note) = status_and_note(a);
            w.write_record([
                week.as_str(),
                tier,
                a.person.id.as_str(),
                a.person.name.as_str(),
                a.person.unit.as_str(),
                a.person.phone.as_str(),
                status,
                note.as_str(),
            ])?;
        }
    }
    w.flush()?;
    Ok(())
}

pub(crate) fn status_and_note(a: &AssignedPerson) -> (&'static str, String) {
    if a.on_leave {
        ("on_leave", String::new())
    } else if a.is_substitute {
        let note = a
            .substitutes_for
            .as_deref()
            .map(|n| format!("substitutes {n}"))
            .unwrap_or_default();
        ("substitute", note)
    } else if a.promoted_due_to_leave {
        ("promoted", a.promotion_reason.clone().unwrap_or_default())
    } else {
        ("active", String::new())
    }
}
