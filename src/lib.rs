#![forbid(unsafe_code)]
//! Astreinte rotation — planification hebdomadaire d'astreinte par niveaux.
//!
//! - Rotation A/B entre niveau 1 et niveau 2, groupe FIXE toujours au niveau 3.
//! - Remplacements par unité quand un titulaire est en congé.
//! - Dates calendaires locales (`YYYY-MM-DD`), jamais de conversion de fuseau.
//! - Le cœur est pur : stockage, CSV et CLI restent en périphérie.

/// Trace de debug, compilée seulement avec la feature `logging`.
#[cfg(feature = "logging")]
macro_rules! debug_event {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "logging"))]
macro_rules! debug_event {
    ($($arg:tt)*) => {};
}

pub mod calendar;
pub mod io;
pub mod maintenance;
pub mod model;
pub mod report;
pub mod scheduler;
pub mod storage;

pub use calendar::{monday_of, parse_local_date, rotation_week_number, sunday_of};
pub use maintenance::{CleanupReport, Issue, IssueKind, MaintenanceOptions};
pub use model::{
    Dataset, LeaveId, LeavePeriod, Person, PersonId, RotatingGroup, RotationConfig, RotationGroup,
    Tier,
};
pub use report::{coverage_stats, AssignmentRenderer, CoverageStats, TextRenderer};
pub use scheduler::{
    apply_point_in_time_promotions, compute_week_assignment, resolve_week_substitutions,
    AssignedPerson, LeaveOracle, ResolvedAssignment, SchedError, Scheduler, WeekAssignment,
};
pub use storage::{JsonStorage, SnapshotSource, Storage};
