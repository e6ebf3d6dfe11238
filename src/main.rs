use anyhow::{Context, Result};
use seqpipe::agent::GeminiClient;
use seqpipe::cli::output::*;
use seqpipe::cli::{AskCommand, Cli, Command, ValidateCommand};
use seqpipe::core::{Pipeline, PipelineConfig, SessionIds, Stage};
use seqpipe::execution::{InMemorySessionService, PipelineExecutor, RunOutcome, StageRunner};
use seqpipe::sink;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    // Execute command
    match &cli.command {
        Command::Ask(cmd) => ask(cmd).await?,
        Command::Validate(cmd) => validate_pipeline(cmd)?,
    }

    Ok(())
}

/// The built-in three-stage science pipeline, used when no file is given
fn science_pipeline() -> Result<Pipeline> {
    let stages = vec![
        Stage::new(
            "ValidateInput",
            "Validate the input is a question about science (must).",
        )
        .with_output_key("validation_status"),
        Stage::new(
            "ProcessData",
            "Process data if {validation_status} is 'valid'.",
        )
        .with_output_key("result"),
        Stage::new("ReportResult", "Report the result from {result}."),
    ];

    Ok(Pipeline::build("DataPipeline", stages)?)
}

async fn ask(cmd: &AskCommand) -> Result<()> {
    // Credentials are read from the environment once, before any pipeline
    // construction, and passed down as configuration
    let model = GeminiClient::from_env().context("model credentials unavailable")?;

    // Load pipeline
    let pipeline = match &cmd.file {
        Some(path) => PipelineConfig::from_file(path)
            .context("Failed to load pipeline config")?
            .to_pipeline()?,
        None => science_pipeline()?,
    };

    println!(
        "{} Loaded pipeline: {}",
        INFO,
        style(&pipeline.name).bold()
    );

    let ids = SessionIds::new(&cmd.app, &cmd.session, &cmd.user);
    let runner = StageRunner::new(model, Arc::new(InMemorySessionService::new()));
    let executor = PipelineExecutor::new(runner);

    println!("{} Pipeline started", ROCKET);
    let spinner = create_spinner("streaming events...");
    let outcome = executor.run(&pipeline, &cmd.question, &ids).await;
    spinner.finish_and_clear();

    match outcome {
        Ok(RunOutcome::Completed(text)) => {
            println!(
                "{} {} completed {}",
                CHECK,
                style(&pipeline.name).bold(),
                style("successfully").green()
            );
            println!("\n{}", text);

            if !cmd.no_save {
                let path = sink::persist(
                    &sink::ResultValue::Text(text),
                    &cmd.output,
                    &cmd.filename,
                )?;
                println!(
                    "\n{} Result saved to {}",
                    INFO,
                    style(path.display()).dim()
                );
            }
        }
        Ok(RunOutcome::Exhausted) => {
            // A normal negative result: diagnostic only, no output file
            println!(
                "{} No valid result produced by stage '{}'",
                WARN,
                style(&pipeline.terminal_stage().name).bold()
            );
        }
        Err(e) => {
            println!(
                "{} {} {}",
                CROSS,
                style(&pipeline.name).bold(),
                style("failed").red()
            );
            return Err(e.into());
        }
    }

    Ok(())
}

fn validate_pipeline(cmd: &ValidateCommand) -> Result<()> {
    println!("{} Validating pipeline...", INFO);

    match PipelineConfig::from_file(&cmd.file) {
        Ok(config) => {
            println!("{} Pipeline configuration is valid!", CHECK);
            println!("  Name: {}", style(&config.name).bold());
            println!("  Stages: {}", style(config.stages.len()).cyan());

            if cmd.json {
                let json = serde_json::to_string_pretty(&config)?;
                println!("\n{}", json);
            }
            Ok(())
        }
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(e).red());
            std::process::exit(1);
        }
    }
}
