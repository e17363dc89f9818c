#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use astreinte_rotation::{
    calendar::{monday_of, parse_local_date, sunday_of},
    io, maintenance,
    maintenance::{IssueKind, MaintenanceOptions},
    model::{Dataset, LeaveId, LeavePeriod, PersonId, RotatingGroup},
    report::{coverage_stats, AssignmentRenderer, TextRenderer},
    scheduler::Scheduler,
    storage::{JsonStorage, Storage},
};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de rotation d'astreinte par niveaux (A/B/FIXE)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du jeu de données
    #[arg(long, global = true, default_value = "rotation.json")]
    data: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Créer un jeu de données vide
    Init {
        /// Lundi de la semaine de rotation 1 (YYYY-MM-DD)
        #[arg(long, default_value = "2025-08-25")]
        reference: String,
        #[arg(long, default_value = "A")]
        initial_group: String,
        /// Écrase un fichier existant
        #[arg(long)]
        force: bool,
    },

    /// Modifier la configuration de rotation (nouvelle version)
    Config {
        #[arg(long)]
        reference: Option<String>,
        #[arg(long)]
        initial_group: Option<String>,
    },

    /// Importer des personnes depuis un CSV
    ImportPeople {
        #[arg(long)]
        csv: String,
    },

    /// Importer des congés depuis un CSV
    ImportLeaves {
        #[arg(long)]
        csv: String,
    },

    /// Ajouter un congé
    AddLeave {
        #[arg(long)]
        person: String,
        /// YYYY-MM-DD
        #[arg(long)]
        start: String,
        /// YYYY-MM-DD (inclus)
        #[arg(long)]
        end: String,
        #[arg(long, default_value = "")]
        reason: String,
    },

    /// Annuler un congé (il reste dans l'historique)
    CancelLeave {
        #[arg(long)]
        id: String,
    },

    /// Répartition de la semaine contenant une date
    Week {
        /// YYYY-MM-DD (défaut : aujourd'hui)
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Vue d'un jour précis (absents retirés, promotions)
    Day {
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Planning sur plusieurs semaines
    Plan {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },

    /// Vérifier la cohérence du jeu de données
    Check,

    /// Nettoyage des congés expirés/orphelins et des inactifs
    Cleanup {
        /// Date de référence (défaut : aujourd'hui)
        #[arg(long)]
        today: Option<String>,
        #[arg(long, default_value_t = 6)]
        retention_months: u32,
        #[arg(long)]
        dry_run: bool,
    },

    /// Export JSON complet (sauvegarde)
    Export {
        #[arg(long)]
        out: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.data)?;

    if let Commands::Init {
        reference,
        initial_group,
        force,
    } = &cli.cmd
    {
        if storage.exists() && !force {
            bail!("{} already exists (use --force)", storage.path().display());
        }
        let mut dataset = Dataset::default();
        dataset.config.reference_date = parse_date(reference)?;
        dataset.config.initial_group_at_tier1 = parse_group(initial_group)?;
        storage.save(&dataset)?;
        println!("initialized {}", storage.path().display());
        std::process::exit(0);
    }

    let mut dataset = storage.load()?;

    let code = match cli.cmd {
        Commands::Init { .. } => 0,
        Commands::Config {
            reference,
            initial_group,
        } => {
            let reference = match reference {
                Some(r) => parse_date(&r)?,
                None => dataset.config.reference_date,
            };
            let group = match initial_group {
                Some(g) => parse_group(&g)?,
                None => dataset.config.initial_group_at_tier1,
            };
            dataset.config = dataset.config.revise(reference, group);
            storage.save(&dataset)?;
            println!(
                "config v{}: reference {} group {}",
                dataset.config.version,
                dataset.config.reference_date,
                dataset.config.initial_group_at_tier1
            );
            0
        }
        Commands::ImportPeople { csv } => {
            let people = io::import_people_csv(csv)?;
            println!("imported {} people", people.len());
            dataset.people.extend(people);
            storage.save(&dataset)?;
            0
        }
        Commands::ImportLeaves { csv } => {
            let leaves = io::import_leaves_csv(csv)?;
            let count = leaves.len();
            for leave in leaves {
                dataset.add_leave(leave)?;
            }
            println!("imported {count} leave period(s)");
            storage.save(&dataset)?;
            0
        }
        Commands::AddLeave {
            person,
            start,
            end,
            reason,
        } => {
            let leave = LeavePeriod::new(
                PersonId::new(&person),
                parse_date(&start)?,
                parse_date(&end)?,
                reason,
            )?;
            let id = dataset.add_leave(leave)?;
            storage.save(&dataset)?;
            println!("{}", id.as_str());
            0
        }
        Commands::CancelLeave { id } => {
            dataset.cancel_leave(&LeaveId::new(id))?;
            storage.save(&dataset)?;
            0
        }
        Commands::Week { date, out_csv } => {
            let date = date_or_today(date.as_deref())?;
            let scheduler = Scheduler::from_source(&dataset)?;
            let week = scheduler.week(date);
            let heading = format!("{} - {}", monday_of(date), sunday_of(date));
            print!("{}", TextRenderer.render(&heading, &week));
            if let Some(path) = out_csv {
                io::export_assignment_csv(path, &week)?;
            }
            0
        }
        Commands::Day { date, out_csv } => {
            let date = date_or_today(date.as_deref())?;
            let scheduler = Scheduler::from_source(&dataset)?;
            let day = scheduler.day(date);
            print!("{}", TextRenderer.render(&date.to_string(), &day));
            let stats = coverage_stats(&dataset.people, scheduler.oracle(), date);
            println!(
                "active {} | on leave {} | available {}",
                stats.total_active, stats.on_leave, stats.available
            );
            if let Some(path) = out_csv {
                io::export_assignment_csv(path, &day)?;
            }
            0
        }
        Commands::Plan { from, to } => {
            let scheduler = Scheduler::from_source(&dataset)?;
            let weeks = scheduler.plan(parse_date(&from)?, parse_date(&to)?)?;
            for (monday, week) in &weeks {
                let heading = format!("{} - {}", monday, sunday_of(*monday));
                print!("{}", TextRenderer.render(&heading, week));
            }
            0
        }
        Commands::Check => {
            let issues = maintenance::audit(&dataset);
            if issues.is_empty() {
                println!("OK: no issues");
                0
            } else {
                eprintln!("Found {} issue(s)", issues.len());
                for issue in &issues {
                    let kind = match issue.kind {
                        IssueKind::InconsistentLeaveInterval => "inconsistent-leave",
                        IssueKind::OrphanLeave => "orphan-leave",
                        IssueKind::FixedOutsideTier3 => "fixed-tier",
                        IssueKind::DuplicatePersonId => "duplicate-id",
                    };
                    eprintln!("{kind} | {} | {}", issue.subject, issue.detail);
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::Cleanup {
            today,
            retention_months,
            dry_run,
        } => {
            let today = date_or_today(today.as_deref())?;
            let opts = MaintenanceOptions {
                leave_retention_months: retention_months,
            };
            let mut target = dataset.clone();
            let report = maintenance::run_full_cleanup(&mut target, today, opts);
            println!(
                "expired leaves {} | orphan leaves {} | removed people {}",
                report.expired_leaves.len(),
                report.orphan_leaves.len(),
                report.removed_people.len()
            );
            if !dry_run && report.total() > 0 {
                storage.save(&target)?;
            }
            0
        }
        Commands::Export { out } => {
            io::export_dataset_json(out, &dataset)?;
            0
        }
    };

    std::process::exit(code);
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    Ok(parse_local_date(raw.trim())?)
}

fn parse_group(raw: &str) -> Result<RotatingGroup> {
    raw.parse::<RotatingGroup>()
        .with_context(|| format!("initial group must be A or B, got {raw}"))
}

fn date_or_today(raw: Option<&str>) -> Result<NaiveDate> {
    match raw {
        Some(r) => parse_date(r),
        None => Ok(Local::now().date_naive()),
    }
}
