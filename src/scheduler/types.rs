use crate::model::{Person, PersonId, RotatingGroup, Tier};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Répartition brute d'une semaine, avant toute prise en compte des congés.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekAssignment {
    pub week_number: i64,
    pub group_at_tier1: RotatingGroup,
    pub tier1: Vec<Person>,
    pub tier2: Vec<Person>,
    pub tier3: Vec<Person>,
}

/// Personne affectée à un niveau, avec les annotations de congé/remplacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedPerson {
    pub person: Person,
    #[serde(default)]
    pub on_leave: bool,
    #[serde(default)]
    pub is_substitute: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub substitutes_for: Option<String>,
    #[serde(default)]
    pub promoted_due_to_leave: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion_reason: Option<String>,
}

impl AssignedPerson {
    pub fn plain(person: Person) -> Self {
        Self {
            person,
            on_leave: false,
            is_substitute: false,
            substitutes_for: None,
            promoted_due_to_leave: false,
            promotion_reason: None,
        }
    }

    pub fn id(&self) -> &PersonId {
        &self.person.id
    }
}

/// Répartition finale d'une semaine, après remplacements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAssignment {
    pub week_number: i64,
    pub group_at_tier1: RotatingGroup,
    pub tier1: Vec<AssignedPerson>,
    pub tier2: Vec<AssignedPerson>,
    pub tier3: Vec<AssignedPerson>,
    /// Personnes retirées des niveaux par la vue d'un jour précis.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub on_leave: Vec<AssignedPerson>,
}

impl ResolvedAssignment {
    pub fn tier(&self, tier: Tier) -> &[AssignedPerson] {
        match tier {
            Tier::One => &self.tier1,
            Tier::Two => &self.tier2,
            Tier::Three => &self.tier3,
        }
    }

    /// Niveau courant d'une personne dans cette répartition.
    pub fn tier_of(&self, id: &PersonId) -> Option<Tier> {
        [Tier::One, Tier::Two, Tier::Three]
            .into_iter()
            .find(|t| self.tier(*t).iter().any(|a| a.id() == id))
    }
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("invalid date format (expected YYYY-MM-DD): {0}")]
    InvalidDateFormat(String),
    #[error("inconsistent leave interval {id}: start {start} is after end {end}")]
    InconsistentLeaveInterval {
        id: String,
        start: NaiveDate,
        end: NaiveDate,
    },
    #[error("invalid date range: end must not be before start")]
    InvalidRange,
    #[error("invalid rotation group: {0}")]
    InvalidGroup(String),
    #[error("invalid tier: {0} (expected 1, 2 or 3)")]
    InvalidTier(u8),
    #[error("unknown person: {0}")]
    UnknownPerson(String),
    #[error("unknown leave period: {0}")]
    UnknownLeave(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
