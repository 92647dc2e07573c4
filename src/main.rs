mod error;
mod ingest;
mod models;
mod progress;
mod storage;
mod store;

use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;

use chrono::NaiveDate;

use error::{Error, Result};
use models::{GeneratedPlan, JsonOutput, StudyPlan};
use storage::Storage;
use store::PlanStore;

const DEFAULT_DB_NAME: &str = "certprep.db";

#[derive(Parser)]
#[command(name = "certprep")]
#[command(about = "Track certification study plans and per-topic progress")]
#[command(version)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the plan database
    Init,

    /// Manage study plans
    #[command(subcommand)]
    Plan(PlanCommands),

    /// Flip a topic between done and not done
    Toggle {
        /// Plan ID
        plan_id: String,

        /// Module ID
        module_id: String,

        /// Topic ID
        topic_id: String,
    },

    /// Show study statistics across all plans
    Stats,
}

#[derive(Subcommand)]
enum PlanCommands {
    /// Create a plan from a generated outline (JSON file, or - for stdin)
    Create {
        /// Path to the generated outline
        file: PathBuf,

        /// Exam this plan prepares for
        #[arg(long, short)]
        exam_name: String,

        /// Exam date (YYYY-MM-DD)
        #[arg(long, short)]
        target_date: String,
    },

    /// List all plans, newest first
    List,

    /// Show plan details, including module and topic IDs
    Show {
        /// Plan ID
        id: String,
    },

    /// Delete a plan
    Delete {
        /// Plan ID
        id: String,
    },
}

fn get_db_path() -> PathBuf {
    if let Ok(path) = std::env::var("CERTPREP_DB") {
        return PathBuf::from(path);
    }

    let config_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("certprep");

    std::fs::create_dir_all(&config_dir).ok();
    config_dir.join(DEFAULT_DB_NAME)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let db_path = get_db_path();
    let storage = Storage::open(&db_path)?;
    let mut store = PlanStore::open(storage)?;

    match cli.command {
        Commands::Init => {
            if cli.json {
                println!("{}", serde_json::to_string(&JsonOutput::<()>::ok(()))?);
            } else {
                println!("Plan database initialized at: {}", db_path.display());
            }
        }

        Commands::Plan(plan_cmd) => match plan_cmd {
            PlanCommands::Create {
                file,
                exam_name,
                target_date,
            } => {
                let date = NaiveDate::parse_from_str(&target_date, "%Y-%m-%d").map_err(|_| {
                    Error::invalid_input(format!(
                        "Invalid target date '{}'. Use YYYY-MM-DD",
                        target_date
                    ))
                })?;

                let raw = if file.as_os_str() == "-" {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                } else {
                    std::fs::read_to_string(&file)?
                };

                let response: GeneratedPlan = serde_json::from_str(&raw).map_err(|e| {
                    Error::invalid_input(format!(
                        "Invalid generated plan in {}: {}",
                        file.display(),
                        e
                    ))
                })?;

                let plan = store.create_plan(ingest::ingest(response, &exam_name, date))?;

                if cli.json {
                    println!("{}", serde_json::to_string(&JsonOutput::ok(plan))?);
                } else {
                    println!("Created plan '{}' with ID: {}", plan.title, plan.id);
                    println!();
                    print_plan(plan);
                }
            }

            PlanCommands::List => {
                let plans = store.plans();
                if cli.json {
                    println!("{}", serde_json::to_string(&JsonOutput::ok(plans))?);
                } else if plans.is_empty() {
                    println!("No plans found.");
                } else {
                    println!("{:<38} {:<20} {:<14} TARGET", "ID", "EXAM", "PROGRESS");
                    println!("{}", "-".repeat(84));
                    for plan in plans {
                        let progress = format!(
                            "{}/{} ({:.0}%)",
                            plan.completed_topics_count,
                            plan.total_topics_count,
                            plan.progress_percent()
                        );
                        println!(
                            "{:<38} {:<20} {:<14} {}",
                            plan.id,
                            truncate(&plan.exam_name, 18),
                            progress,
                            plan.target_date
                        );
                    }
                }
            }

            PlanCommands::Show { id } => {
                // Selecting an id that does not resolve just shows nothing
                store.select_plan(Some(&id));
                if let Some(plan) = store.active_plan() {
                    if cli.json {
                        println!("{}", serde_json::to_string(&JsonOutput::ok(plan))?);
                    } else {
                        print_plan(plan);
                    }
                } else if cli.json {
                    println!(
                        "{}",
                        serde_json::to_string(&JsonOutput::<()>::err("Plan not found"))?
                    );
                } else {
                    println!("Plan not found.");
                }
            }

            PlanCommands::Delete { id } => {
                if store.delete_plan(&id)? {
                    if cli.json {
                        println!("{}", serde_json::to_string(&JsonOutput::<()>::ok(()))?);
                    } else {
                        println!("Plan {} deleted.", id);
                    }
                } else if cli.json {
                    println!(
                        "{}",
                        serde_json::to_string(&JsonOutput::<()>::err("Plan not found"))?
                    );
                } else {
                    println!("Plan not found.");
                }
            }
        },

        Commands::Toggle {
            plan_id,
            module_id,
            topic_id,
        } => {
            if store.toggle_topic(&plan_id, &module_id, &topic_id)? {
                if let Some(plan) = store.plan(&plan_id) {
                    if cli.json {
                        println!("{}", serde_json::to_string(&JsonOutput::ok(plan))?);
                    } else {
                        println!(
                            "Progress for '{}': {}/{} topics ({:.0}%)",
                            plan.title,
                            plan.completed_topics_count,
                            plan.total_topics_count,
                            plan.progress_percent()
                        );
                    }
                }
            } else if cli.json {
                println!(
                    "{}",
                    serde_json::to_string(&JsonOutput::<()>::err(
                        "No matching topic; nothing changed"
                    ))?
                );
            } else {
                println!("No matching topic; nothing changed.");
            }
        }

        Commands::Stats => {
            let stats = store.stats();
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string(&JsonOutput::ok(serde_json::json!({
                        "total_plans": stats.total_plans,
                        "completed_plans": stats.completed_plans,
                        "total_topics": stats.total_topics,
                        "completed_topics": stats.completed_topics
                    })))?
                );
            } else {
                println!("=== Study Statistics ===");
                println!("Total plans: {}", stats.total_plans);
                println!("Completed plans: {}", stats.completed_plans);
                println!("Total topics: {}", stats.total_topics);
                println!("Topics completed: {}", stats.completed_topics);
            }
        }
    }

    Ok(())
}

fn print_plan(plan: &StudyPlan) {
    println!("Plan: {}", plan.title);
    println!("ID: {}", plan.id);
    println!("Exam: {}", plan.exam_name);
    println!("Target date: {}", plan.target_date);
    println!("Estimated hours: {}", plan.estimated_hours);
    if !plan.description.is_empty() {
        println!("Description: {}", plan.description);
    }
    println!(
        "Progress: {}/{} topics ({:.0}%)",
        plan.completed_topics_count,
        plan.total_topics_count,
        plan.progress_percent()
    );

    for module in &plan.modules {
        println!();
        println!("Module: {} (ID: {})", module.title, module.id);
        if let Some(desc) = &module.description {
            println!("  {}", desc);
        }
        for topic in &module.topics {
            let mark = if topic.is_completed { "x" } else { " " };
            println!("  [{}] {} (ID: {})", mark, topic.title, topic.id);
        }
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    // Measured in chars; a byte offset can land inside a multi-byte char
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let prefix: String = s.chars().take(max_len - 3).collect();
        format!("{}...", prefix)
    }
}
