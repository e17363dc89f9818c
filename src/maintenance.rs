//! Tâches de maintenance par lots, indépendantes du calcul de rotation.
//!
//! Elles opèrent sur un [`Dataset`] que l'appelant sauvegarde ensuite ; le
//! cœur (`scheduler`) n'en dépend jamais.

use crate::model::{Dataset, LeaveId, PersonId, RotationGroup, Tier};
use chrono::{Months, NaiveDate};
use std::collections::HashSet;

/// Options de maintenance
#[derive(Debug, Clone, Copy)]
pub struct MaintenanceOptions {
    /// Durée de conservation des congés annulés après leur fin.
    pub leave_retention_months: u32,
}

impl Default for MaintenanceOptions {
    fn default() -> Self {
        Self {
            leave_retention_months: 6,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub expired_leaves: Vec<LeaveId>,
    pub orphan_leaves: Vec<LeaveId>,
    pub removed_people: Vec<PersonId>,
}

impl CleanupReport {
    pub fn total(&self) -> usize {
        self.expired_leaves.len() + self.orphan_leaves.len() + self.removed_people.len()
    }
}

/// Supprime les congés inactifs terminés avant `today - retention`.
pub fn purge_expired_leaves(
    dataset: &mut Dataset,
    today: NaiveDate,
    opts: MaintenanceOptions,
) -> Vec<LeaveId> {
    let Some(limit) = today.checked_sub_months(Months::new(opts.leave_retention_months)) else {
        return Vec::new();
    };
    let mut removed = Vec::new();
    dataset.leaves.retain(|l| {
        let expired = !l.active && l.end < limit;
        if expired {
            removed.push(l.id.clone());
        }
        !expired
    });
    debug_event!(count = removed.len(), %limit, "expired leaves purged");
    removed
}

/// Supprime les congés dont la personne n'existe plus.
pub fn purge_orphan_leaves(dataset: &mut Dataset) -> Vec<LeaveId> {
    let known: HashSet<&PersonId> = dataset.people.iter().map(|p| &p.id).collect();
    let mut removed = Vec::new();
    let mut kept = Vec::with_capacity(dataset.leaves.len());
    for leave in dataset.leaves.drain(..) {
        if known.contains(&leave.person_id) {
            kept.push(leave);
        } else {
            removed.push(leave.id);
        }
    }
    dataset.leaves = kept;
    debug_event!(count = removed.len(), "orphan leaves purged");
    removed
}

/// Supprime les personnes inactives sans aucun congé enregistré.
pub fn purge_inactive_people(dataset: &mut Dataset) -> Vec<PersonId> {
    let with_leaves: HashSet<PersonId> =
        dataset.leaves.iter().map(|l| l.person_id.clone()).collect();
    let mut removed = Vec::new();
    dataset.people.retain(|p| {
        let drop = !p.active && !with_leaves.contains(&p.id);
        if drop {
            removed.push(p.id.clone());
        }
        !drop
    });
    debug_event!(count = removed.len(), "inactive people purged");
    removed
}

/// Nettoyage complet : congés expirés, congés orphelins, puis personnes inactives.
pub fn run_full_cleanup(
    dataset: &mut Dataset,
    today: NaiveDate,
    opts: MaintenanceOptions,
) -> CleanupReport {
    let expired_leaves = purge_expired_leaves(dataset, today, opts);
    let orphan_leaves = purge_orphan_leaves(dataset);
    let removed_people = purge_inactive_people(dataset);
    CleanupReport {
        expired_leaves,
        orphan_leaves,
        removed_people,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    InconsistentLeaveInterval,
    OrphanLeave,
    FixedOutsideTier3,
    DuplicatePersonId,
}

#[derive(Debug, Clone)]
pub struct Issue {
    pub kind: IssueKind,
    pub subject: String,
    pub detail: String,
}

/// Contrôle de cohérence du jeu de données (aucune modification).
pub fn audit(dataset: &Dataset) -> Vec<Issue> {
    let mut out = Vec::new();

    let mut seen = HashSet::new();
    for p in &dataset.people {
        if !seen.insert(&p.id) {
            out.push(Issue {
                kind: IssueKind::DuplicatePersonId,
                subject: p.id.to_string(),
                detail: format!("id shared by several people (last: {})", p.name),
            });
        }
        if p.group == RotationGroup::Fixed && p.base_tier != Tier::Three {
            out.push(Issue {
                kind: IssueKind::FixedOutsideTier3,
                subject: p.id.to_string(),
                detail: format!(
                    "{} is FIXED but declares tier {}",
                    p.name,
                    u8::from(p.base_tier)
                ),
            });
        }
    }

    for l in &dataset.leaves {
        if !l.is_consistent() {
            out.push(Issue {
                kind: IssueKind::InconsistentLeaveInterval,
                subject: l.id.as_str().to_string(),
                detail: format!("start {} is after end {}", l.start, l.end),
            });
        }
        if !seen.contains(&l.person_id) {
            out.push(Issue {
                kind: IssueKind::OrphanLeave,
                subject: l.id.as_str().to_string(),
                detail: format!("unknown person {}", l.person_id),
            });
        }
    }

    out
}
