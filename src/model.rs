use crate::scheduler::SchedError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifiant fort pour Person
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PersonId(String);

impl PersonId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifiant fort pour LeavePeriod
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeaveId(String);

impl LeaveId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Groupe de rotation d'une personne.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationGroup {
    A,
    B,
    #[serde(rename = "FIXED", alias = "FIJO")]
    Fixed,
}

impl FromStr for RotationGroup {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "FIXED" | "FIJO" | "FIXE" => Ok(Self::Fixed),
            _ => Err(SchedError::InvalidGroup(s.to_string())),
        }
    }
}

impl fmt::Display for RotationGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::A => "A",
            Self::B => "B",
            Self::Fixed => "FIXED",
        })
    }
}

/// Groupe qui alterne entre niveau 1 et niveau 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotatingGroup {
    A,
    B,
}

impl RotatingGroup {
    pub fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    pub fn matches(self, group: RotationGroup) -> bool {
        matches!(
            (self, group),
            (Self::A, RotationGroup::A) | (Self::B, RotationGroup::B)
        )
    }
}

impl FromStr for RotatingGroup {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            _ => Err(SchedError::InvalidGroup(s.to_string())),
        }
    }
}

impl fmt::Display for RotatingGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::A => "A",
            Self::B => "B",
        })
    }
}

/// Niveau de couverture (1 = premier intervenant, 3 = filet fixe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Tier {
    One,
    Two,
    Three,
}

impl TryFrom<u8> for Tier {
    type Error = SchedError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(SchedError::InvalidTier(other)),
        }
    }
}

impl From<Tier> for u8 {
    fn from(t: Tier) -> u8 {
        match t {
            Tier::One => 1,
            Tier::Two => 2,
            Tier::Three => 3,
        }
    }
}

/// Membre d'astreinte
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub unit: String,
    #[serde(default)]
    pub phone: String,
    pub group: RotationGroup,
    pub base_tier: Tier,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl Person {
    /// Crée une personne active ; le niveau de base suit le groupe (FIXED → 3).
    pub fn new<N: Into<String>, U: Into<String>>(name: N, unit: U, group: RotationGroup) -> Self {
        let base_tier = match group {
            RotationGroup::A => Tier::One,
            RotationGroup::B => Tier::Two,
            RotationGroup::Fixed => Tier::Three,
        };
        Self {
            id: PersonId::random(),
            name: name.into(),
            unit: unit.into(),
            phone: String::new(),
            group,
            base_tier,
            active: true,
        }
    }

    pub fn with_id<S: AsRef<str>>(mut self, id: S) -> Self {
        self.id = PersonId::new(id);
        self
    }

    pub fn with_phone<S: Into<String>>(mut self, phone: S) -> Self {
        self.phone = phone.into();
        self
    }
}

fn default_true() -> bool {
    true
}

/// Période de congé, bornes incluses.
///
/// `person_id` est une référence faible : la personne peut avoir été
/// désactivée ou supprimée alors que l'historique de congés subsiste.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeavePeriod {
    pub id: LeaveId,
    pub person_id: PersonId,
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub reason: String,
}

impl LeavePeriod {
    /// Crée une période active en validant `start <= end`.
    pub fn new<R: Into<String>>(
        person_id: PersonId,
        start: NaiveDate,
        end: NaiveDate,
        reason: R,
    ) -> Result<Self, SchedError> {
        let id = LeaveId::random();
        if start > end {
            return Err(SchedError::InconsistentLeaveInterval {
                id: id.as_str().to_string(),
                start,
                end,
            });
        }
        Ok(Self {
            id,
            person_id,
            start,
            end,
            active: true,
            reason: reason.into(),
        })
    }

    pub fn is_consistent(&self) -> bool {
        self.start <= self.end
    }
}

/// Paramètres de rotation, versionnés et passés explicitement à chaque calcul.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationConfig {
    /// Lundi qui porte le numéro de rotation 1 (toute date de la semaine convient).
    pub reference_date: NaiveDate,
    pub initial_group_at_tier1: RotatingGroup,
    #[serde(default = "default_version")]
    pub version: u32,
}

fn default_version() -> u32 {
    1
}

impl RotationConfig {
    pub fn new(reference_date: NaiveDate, initial_group_at_tier1: RotatingGroup) -> Self {
        Self {
            reference_date,
            initial_group_at_tier1,
            version: 1,
        }
    }

    /// Nouvelle version de la config avec d'autres paramètres.
    pub fn revise(&self, reference_date: NaiveDate, initial_group_at_tier1: RotatingGroup) -> Self {
        Self {
            reference_date,
            initial_group_at_tier1,
            version: self.version.saturating_add(1),
        }
    }
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            reference_date: NaiveDate::from_ymd_opt(2025, 8, 25).unwrap_or(NaiveDate::MIN),
            initial_group_at_tier1: RotatingGroup::A,
            version: 1,
        }
    }
}

/// Jeu de données complet : config, effectif et congés.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Dataset {
    #[serde(default)]
    pub config: RotationConfig,
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub leaves: Vec<LeavePeriod>,
}

impl Dataset {
    pub fn active_people(&self) -> Vec<Person> {
        self.people.iter().filter(|p| p.active).cloned().collect()
    }
    pub fn find_person_by_id<'a>(&'a self, id: &PersonId) -> Option<&'a Person> {
        self.people.iter().find(|p| &p.id == id)
    }
    pub fn find_person_mut_by_id(&mut self, id: &PersonId) -> Option<&mut Person> {
        self.people.iter_mut().find(|p| &p.id == id)
    }
    pub fn find_leave_mut(&mut self, id: &LeaveId) -> Option<&mut LeavePeriod> {
        self.leaves.iter_mut().find(|l| &l.id == id)
    }

    pub fn add_person(&mut self, person: Person) {
        self.people.push(person);
    }

    /// Désactivation douce : la personne sort de la rotation, ses congés restent.
    pub fn deactivate_person(&mut self, id: &PersonId) -> Result<(), SchedError> {
        let person = self
            .find_person_mut_by_id(id)
            .ok_or_else(|| SchedError::UnknownPerson(id.as_str().to_string()))?;
        person.active = false;
        Ok(())
    }

    /// Ajoute un congé pour une personne connue.
    pub fn add_leave(&mut self, leave: LeavePeriod) -> Result<LeaveId, SchedError> {
        if !leave.is_consistent() {
            return Err(SchedError::InconsistentLeaveInterval {
                id: leave.id.as_str().to_string(),
                start: leave.start,
                end: leave.end,
            });
        }
        if self.find_person_by_id(&leave.person_id).is_none() {
            return Err(SchedError::UnknownPerson(leave.person_id.as_str().to_string()));
        }
        let id = leave.id.clone();
        self.leaves.push(leave);
        Ok(id)
    }

    /// Annulation douce : le congé est conservé mais ne bloque plus rien.
    pub fn cancel_leave(&mut self, id: &LeaveId) -> Result<(), SchedError> {
        let leave = self
            .find_leave_mut(id)
            .ok_or_else(|| SchedError::UnknownLeave(id.as_str().to_string()))?;
        leave.active = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
    }

    #[test]
    fn leave_requires_ordered_bounds() {
        let err = LeavePeriod::new(PersonId::new("p1"), d(9, 5), d(9, 1), "").unwrap_err();
        assert!(matches!(err, SchedError::InconsistentLeaveInterval { .. }));
        assert!(LeavePeriod::new(PersonId::new("p1"), d(9, 1), d(9, 1), "").is_ok());
    }

    #[test]
    fn soft_delete_and_cancel() {
        let mut ds = Dataset::default();
        ds.add_person(Person::new("Ana", "Infra", RotationGroup::A).with_id("p1"));
        let leave = LeavePeriod::new(PersonId::new("p1"), d(9, 1), d(9, 5), "vacaciones").unwrap();
        let id = ds.add_leave(leave).unwrap();

        ds.cancel_leave(&id).unwrap();
        assert!(!ds.leaves[0].active);
        ds.deactivate_person(&PersonId::new("p1")).unwrap();
        assert!(ds.active_people().is_empty());
        assert_eq!(ds.people.len(), 1);

        let orphan = LeavePeriod::new(PersonId::new("ghost"), d(9, 1), d(9, 5), "").unwrap();
        assert!(matches!(ds.add_leave(orphan), Err(SchedError::UnknownPerson(_))));
        assert!(matches!(
            ds.cancel_leave(&LeaveId::new("nope")),
            Err(SchedError::UnknownLeave(_))
        ));
    }

    #[test]
    fn json_accepts_fijo_and_numeric_tier() {
        let raw = r#"{"id":"p9","name":"Vlady","unit":"Ops","group":"FIJO","base_tier":3}"#;
        let p: Person = serde_json::from_str(raw).unwrap();
        assert_eq!(p.group, RotationGroup::Fixed);
        assert_eq!(p.base_tier, Tier::Three);
        assert!(p.active);
        assert!(serde_json::from_str::<Person>(&raw.replace(":3", ":4")).is_err());
    }

    #[test]
    fn config_revision_bumps_version() {
        let cfg = RotationConfig::default();
        let next = cfg.revise(d(9, 1), RotatingGroup::B);
        assert_eq!(next.version, cfg.version + 1);
        assert_eq!(next.initial_group_at_tier1, RotatingGroup::B);
    }
}
