//! CLI entry point: plans a task, runs the tools, prints the report.
//!
//! Tool errors are data, not process failures: the process exits 0 on
//! completion regardless of per-step errors. The only fatal path is a
//! startup configuration error.

use anyhow::{Context, Result};
use clap::Parser;

use assistant::io::config::Config;
use assistant::io::llm::HttpLlmClient;
use assistant::io::tools::LiveToolSet;
use assistant::run::{TaskRequest, run_task};

#[derive(Parser)]
#[command(
    name = "assistant",
    version,
    about = "AI operations assistant: plan, execute, verify"
)]
struct Cli {
    /// User task description.
    #[arg(long)]
    task: String,

    /// City for weather lookup when the task does not name one.
    #[arg(long)]
    location: Option<String>,

    /// Weather units.
    #[arg(long, default_value = "metric", value_parser = ["metric", "imperial"])]
    units: String,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    assistant::logging::init();
    let cli = Cli::parse();

    let config = Config::from_env()?;
    let llm = HttpLlmClient::new(&config.llm)?;
    let tools = LiveToolSet::new(&config)?;

    let request = TaskRequest {
        task: cli.task,
        location: cli.location,
        units: cli.units,
    };
    let output = run_task(&llm, &tools, &request);

    println!(
        "Plan:\n{}",
        serde_json::to_string_pretty(&output.plan).context("serialize plan")?
    );
    println!(
        "\nResults:\n{}",
        serde_json::to_string_pretty(&output.results).context("serialize results")?
    );
    println!("\nFinal Output:\n{}", output.report);
    Ok(())
}
