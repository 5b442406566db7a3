use std::path::Path;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fhb_core::{
    BidDraft, FreelancerTier, Milestone, Money, PricingInput, Project, ProjectId, Task, TaskId,
    Timeline,
};
use fhb_session::{BiddingSession, JsonProjectFile, ProjectSource, SessionConfig, SessionState};
use fhb_submit::{BatchSubmission, RetryPolicy, SubmissionClient, SubmissionReceipt, SubmitError};

#[derive(Parser)]
#[command(name = "fhb", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Initialize a bidding session in the current directory (config, demo
    /// project fixture, empty session state)
    Init {
        /// starter | pro | elite
        #[arg(long, default_value = "starter")]
        tier: String,
    },

    /// Show capacity and per-task states
    Status,

    /// Start drafting a bid for a task
    Draft {
        #[arg(long)]
        task: String,
    },

    /// Cancel an in-progress draft
    Cancel {
        #[arg(long)]
        task: String,
    },

    /// Submit a drafted bid (fixed --amount, or hourly --rate + --hours)
    Submit {
        #[arg(long)]
        task: String,
        /// Fixed amount in rupees
        #[arg(long)]
        amount: Option<i64>,
        /// Hourly rate in rupees
        #[arg(long)]
        rate: Option<i64>,
        #[arg(long)]
        hours: Option<u32>,
        /// Proposed start, days from today
        #[arg(long, default_value_t = 1)]
        start_in_days: i64,
        /// Proposed duration in days
        #[arg(long, default_value_t = 14)]
        duration_days: i64,
        #[arg(long)]
        notes: String,
        #[arg(long)]
        attachment: Vec<String>,
        #[arg(long)]
        link: Vec<String>,
    },

    /// Withdraw a submitted bid, freeing its capacity slot
    Withdraw {
        #[arg(long)]
        task: String,
    },

    /// Print the compiled batch payload without sending it
    Compile,

    /// Compile and hand the batch to the submission endpoint
    Send {
        /// Print what would be sent instead of sending it
        #[arg(long)]
        dry_run: bool,
    },
}

fn now_unix() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

fn parse_tier(s: &str) -> Result<FreelancerTier> {
    match s {
        "starter" => Ok(FreelancerTier::Starter),
        "pro" => Ok(FreelancerTier::Pro),
        "elite" => Ok(FreelancerTier::Elite),
        other => Err(anyhow!("unknown tier: {} (starter|pro|elite)", other)),
    }
}

fn demo_project() -> Project {
    Project {
        id: ProjectId::from_str("demo-project"),
        title: "AI-Based Model for Predicting Data Trends".to_string(),
        budget: Money::from_rupees(7_000),
        deadline_unix: now_unix() + 30 * 86_400,
        tasks: vec![
            Task {
                id: TaskId::from_str("data-collection"),
                title: "Data Collection".to_string(),
                budget: Money::from_rupees(1_500),
                estimated_hours: Some(40),
                skills: vec!["Python".to_string(), "Pandas".to_string()],
                milestones: vec![Milestone {
                    title: "Raw dataset delivered".to_string(),
                    amount: Money::from_rupees(800),
                }],
            },
            Task {
                id: TaskId::from_str("model-development"),
                title: "Model Development".to_string(),
                budget: Money::from_rupees(3_000),
                estimated_hours: Some(80),
                skills: vec!["TensorFlow".to_string(), "Machine Learning".to_string()],
                milestones: vec![],
            },
            Task {
                id: TaskId::from_str("model-evaluation"),
                title: "Model Evaluation".to_string(),
                budget: Money::from_rupees(2_000),
                estimated_hours: Some(30),
                skills: vec!["Python".to_string(), "Data Analysis".to_string()],
                milestones: vec![],
            },
        ],
    }
}

fn open_session(root: &Path) -> Result<(SessionConfig, BiddingSession)> {
    let cfg = SessionConfig::load_or_init(&SessionConfig::config_path(root))?;
    let project = JsonProjectFile::new(SessionConfig::project_path(root)).fetch_project()?;

    let state_path = SessionConfig::state_path(root);
    let session = if state_path.exists() {
        let state = SessionState::load_from(&state_path)?;
        BiddingSession::restore(project, state.tier, &cfg.tiers, state.phases, state.bids)
    } else {
        BiddingSession::new(project, FreelancerTier::Starter, &cfg.tiers)
    };
    Ok((cfg, session))
}

fn save_session(root: &Path, session: &BiddingSession) -> Result<()> {
    SessionState::of(session).save_to(&SessionConfig::state_path(root))
}

/// Stand-in for the backend endpoint: prints the payload instead of posting
/// it and accepts everything.
struct ConsoleClient;

impl SubmissionClient for ConsoleClient {
    fn send(&self, batch: &BatchSubmission) -> Result<SubmissionReceipt, SubmitError> {
        println!(
            "{}",
            serde_json::to_string_pretty(batch).unwrap_or_default()
        );
        Ok(SubmissionReceipt {
            batch_hash: batch.batch_hash.clone(),
            accepted_tasks: batch.bids.iter().map(|b| b.task_id.clone()).collect(),
        })
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let root = std::env::current_dir()?;

    match cli.cmd {
        Command::Init { tier } => {
            let tier = parse_tier(&tier)?;
            let cfg = SessionConfig::load_or_init(&SessionConfig::config_path(&root))?;

            let project_path = SessionConfig::project_path(&root);
            let project = if project_path.exists() {
                JsonProjectFile::new(project_path.clone()).fetch_project()?
            } else {
                let demo = demo_project();
                std::fs::write(&project_path, serde_json::to_vec_pretty(&demo)?)?;
                demo
            };

            let session = BiddingSession::new(project, tier, &cfg.tiers);
            save_session(&root, &session)?;
            println!(
                "Initialized session: {} tasks, tier {:?}, capacity {}",
                session.project().tasks.len(),
                session.tier(),
                session.capacity()
            );
        }
        Command::Status => {
            let (_cfg, session) = open_session(&root)?;
            println!(
                "Tier {:?} | capacity {} | submitted {}",
                session.tier(),
                session.capacity(),
                session.submitted_count()
            );
            for (task_id, state) in session.display_states() {
                let title = session
                    .project()
                    .task(&task_id)
                    .map(|t| t.title.clone())
                    .unwrap_or_default();
                println!("- {} [{:?}] {}", task_id.as_str(), state, title);
            }
        }
        Command::Draft { task } => {
            let (_cfg, mut session) = open_session(&root)?;
            session.start_draft(&TaskId::from_str(task.clone()))?;
            save_session(&root, &session)?;
            println!("Drafting bid for {}", task);
        }
        Command::Cancel { task } => {
            let (_cfg, mut session) = open_session(&root)?;
            session.cancel_draft(&TaskId::from_str(task.clone()))?;
            save_session(&root, &session)?;
            println!("Cancelled draft for {}", task);
        }
        Command::Submit {
            task,
            amount,
            rate,
            hours,
            start_in_days,
            duration_days,
            notes,
            attachment,
            link,
        } => {
            let (_cfg, mut session) = open_session(&root)?;
            let pricing = match (amount, rate, hours) {
                (Some(rupees), None, None) => PricingInput::Fixed {
                    amount: Money::from_rupees(rupees),
                },
                (None, Some(rate), Some(hours)) => PricingInput::Hourly {
                    hourly_rate: Money::from_rupees(rate),
                    estimated_hours: hours,
                },
                _ => {
                    return Err(anyhow!(
                        "pass either --amount, or both --rate and --hours"
                    ))
                }
            };
            let today = now_unix();
            let draft = BidDraft {
                task_id: TaskId::from_str(task.clone()),
                pricing,
                timeline: Timeline {
                    proposed_start_unix: today + start_in_days * 86_400,
                    proposed_end_unix: today + (start_in_days + duration_days) * 86_400,
                },
                notes,
                attachments: attachment,
                portfolio_links: link,
            };
            let bid = session.submit(draft, today)?;
            save_session(&root, &session)?;
            println!(
                "Submitted bid for {}: {} ({}/{} slots used)",
                task,
                bid.total,
                session.submitted_count(),
                session.capacity()
            );
        }
        Command::Withdraw { task } => {
            let (_cfg, mut session) = open_session(&root)?;
            let bid = session.withdraw(&TaskId::from_str(task.clone()))?;
            save_session(&root, &session)?;
            println!(
                "Withdrew bid for {} ({}); {}/{} slots used",
                task,
                bid.total,
                session.submitted_count(),
                session.capacity()
            );
        }
        Command::Compile => {
            let (_cfg, session) = open_session(&root)?;
            let batch = session.compile_batch(now_unix());
            println!("{}", serde_json::to_string_pretty(&batch)?);
        }
        Command::Send { dry_run } => {
            let (cfg, session) = open_session(&root)?;
            let batch = session.compile_batch(now_unix());
            if batch.bids.is_empty() {
                return Err(anyhow!("no submitted bids to send"));
            }
            if dry_run {
                println!(
                    "DRY RUN: would send batch {} with {} bids",
                    batch.batch_hash,
                    batch.bids.len()
                );
                return Ok(());
            }
            let policy = RetryPolicy {
                max_attempts: cfg.submission.max_attempts,
                ..RetryPolicy::default()
            };
            let receipt = session.send_batch(&ConsoleClient, &policy, now_unix())?;
            println!(
                "Sent batch {}: {} bids accepted",
                receipt.batch_hash,
                receipt.accepted_tasks.len()
            );
        }
    }

    Ok(())
}
