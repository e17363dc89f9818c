mod assignment;
mod leave;
mod promotion;
mod substitution;
mod types;
mod util;

pub use leave::LeaveOracle;
pub use types::{AssignedPerson, ResolvedAssignment, SchedError, WeekAssignment};

use crate::calendar;
use crate::model::{LeavePeriod, Person, RotationConfig};
use crate::storage::SnapshotSource;
use chrono::NaiveDate;

/// Répartit l'effectif actif en niveaux pour la semaine de `query`.
pub fn compute_week_assignment(
    roster: &[Person],
    config: &RotationConfig,
    query: NaiveDate,
) -> WeekAssignment {
    assignment::compute_week_assignment(roster, config, query)
}

/// Passe 1 : remplacements niveau 1 ← niveau 2 sur l'intervalle de la semaine.
pub fn resolve_week_substitutions(
    week: &WeekAssignment,
    leaves: &[LeavePeriod],
    week_start: NaiveDate,
    week_end: NaiveDate,
) -> ResolvedAssignment {
    let oracle = LeaveOracle::new(leaves);
    substitution::resolve_week_substitutions(week, &oracle, week_start, week_end)
}

/// Passe 2 : vue d'un jour précis (absents retirés, promotions annotées).
pub fn apply_point_in_time_promotions(
    resolved: ResolvedAssignment,
    leaves: &[LeavePeriod],
    date: NaiveDate,
) -> ResolvedAssignment {
    let oracle = LeaveOracle::new(leaves);
    promotion::apply_point_in_time_promotions(resolved, &oracle, date)
}

/// Scheduler : instantané figé (config, effectif, congés) sur lequel on interroge.
#[derive(Debug, Clone)]
pub struct Scheduler {
    config: RotationConfig,
    roster: Vec<Person>,
    oracle: LeaveOracle,
}

impl Scheduler {
    pub fn new(config: RotationConfig, roster: Vec<Person>, leaves: &[LeavePeriod]) -> Self {
        Self {
            config,
            roster,
            oracle: LeaveOracle::new(leaves),
        }
    }

    /// Charge un instantané cohérent depuis une source externe.
    pub fn from_source<S: SnapshotSource + ?Sized>(source: &S) -> anyhow::Result<Self> {
        let config = source.fetch_config()?;
        let roster = source.fetch_active_roster()?;
        let leaves = source.fetch_leave_periods()?;
        Ok(Self::new(config, roster, &leaves))
    }

    pub fn config(&self) -> &RotationConfig {
        &self.config
    }
    pub fn roster(&self) -> &[Person] {
        &self.roster
    }
    pub fn oracle(&self) -> &LeaveOracle {
        &self.oracle
    }

    /// Semaine contenant `date`, remplacements appliqués.
    pub fn week(&self, date: NaiveDate) -> ResolvedAssignment {
        let raw = assignment::compute_week_assignment(&self.roster, &self.config, date);
        substitution::resolve_week_substitutions(
            &raw,
            &self.oracle,
            calendar::monday_of(date),
            calendar::sunday_of(date),
        )
    }

    /// Vue du jour `date` : semaine résolue puis promotions ponctuelles.
    ///
    /// `on_leave` liste tout l'effectif actif absent ce jour-là, y compris un
    /// titulaire déjà remplacé pour la semaine.
    pub fn day(&self, date: NaiveDate) -> ResolvedAssignment {
        let day = promotion::apply_point_in_time_promotions(self.week(date), &self.oracle, date);
        promotion::collect_roster_absents(day, &self.roster, &self.oracle, date)
    }

    /// Une semaine résolue par lundi de `[monday_of(from), to]`.
    pub fn plan(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<(NaiveDate, ResolvedAssignment)>, SchedError> {
        if to < from {
            return Err(SchedError::InvalidRange);
        }
        Ok(calendar::mondays_between(from, to)
            .map(|monday| (monday, self.week(monday)))
            .collect())
    }
}
