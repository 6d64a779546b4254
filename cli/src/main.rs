//! CLI entrypoint for symptom-checker
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use symptom_application::{SymptomApi, SymptomCheckController, UiEvent};
use symptom_domain::{DemographicField, PredictionOutcome};
use symptom_infrastructure::{ConfigLoader, HttpSymptomApi, LocalFileLoader, load_file_handles};
use symptom_presentation::{Cli, ConsoleFormatter, ReplPresenter, SymptomRepl};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    // Load configuration
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    config.validate()?;

    if cli.no_color || !config.ui.color {
        colored::control::set_override(false);
    }

    info!("Starting symptom-checker (backend: {})", config.api.base_url);

    // === Dependency Injection ===
    let api = Arc::new(HttpSymptomApi::new(config.api.base_url.clone())?);
    let (tx, rx) = mpsc::unbounded_channel();
    let controller = SymptomCheckController::new(api, config.to_controller_config(), tx);
    let show_progress = config.ui.show_progress && !cli.quiet;

    if cli.is_one_shot() {
        return run_one_shot(&cli, controller, rx, show_progress).await;
    }

    let history_file = config.ui.history_file.as_deref().map(expand_home);
    SymptomRepl::new(controller, Arc::new(LocalFileLoader::new()))
        .with_history_file(history_file)
        .with_backend_label(config.api.base_url.clone())
        .run(rx, ReplPresenter::new(show_progress))
        .await?;

    Ok(())
}

/// Predict (and optionally analyze a lab report) from command-line flags
async fn run_one_shot<A: SymptomApi + 'static>(
    cli: &Cli,
    controller: SymptomCheckController<A>,
    mut events: mpsc::UnboundedReceiver<UiEvent>,
    show_progress: bool,
) -> Result<()> {
    let json = cli.json;
    let renderer = tokio::spawn(async move {
        let mut presenter = ReplPresenter::new(show_progress);
        while let Some(event) = events.recv().await {
            if !json && shown_in_one_shot(&event) {
                presenter.render(&event);
            }
        }
    });

    for symptom in &cli.symptoms {
        controller.add_symptom(symptom);
    }
    let demographics = [
        (DemographicField::Age, &cli.age),
        (DemographicField::Gender, &cli.gender),
        (DemographicField::Weight, &cli.weight),
        (DemographicField::Height, &cli.height),
    ];
    for (field, value) in demographics {
        if let Some(value) = value {
            controller.set_demographic(field, value);
        }
    }
    if cli.weight.is_some() && cli.height.is_some() {
        let _ = controller.compute_bmi();
    }

    // The analyzed report goes first: analysis always uses the first staged file
    let mut paths: Vec<PathBuf> = cli.analyze.iter().cloned().collect();
    paths.extend(cli.files.iter().filter(|p| Some(*p) != cli.analyze.as_ref()).cloned());
    if !paths.is_empty() {
        let handles = load_file_handles(&paths).await?;
        controller.stage_files(handles)?;
    }

    let result = run_requests(cli, &controller).await;

    drop(controller);
    let _ = renderer.await;
    result
}

async fn run_requests<A: SymptomApi + 'static>(
    cli: &Cli,
    controller: &SymptomCheckController<A>,
) -> Result<()> {
    if cli.analyze.is_some() {
        let summary = controller.analyze_lab_report().await?;
        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({ "lab_report": summary }))?
            );
        }
    }

    if cli.symptoms.is_empty() {
        return Ok(());
    }

    match controller.submit().await? {
        PredictionOutcome::Success(report) => {
            if cli.json {
                println!("{}", ConsoleFormatter::format_json(&report));
            }
            Ok(())
        }
        PredictionOutcome::Failure(failure) => bail!(failure.reason()),
    }
}

/// One-shot output skips the per-keystroke chatter of the interactive session
fn shown_in_one_shot(event: &UiEvent) -> bool {
    matches!(
        event,
        UiEvent::StagingRejected { .. }
            | UiEvent::BmiResult(_)
            | UiEvent::BmiError { .. }
            | UiEvent::SubmissionStarted { .. }
            | UiEvent::PredictionResult(_)
            | UiEvent::SubmissionFinished
            | UiEvent::LabReportStarted { .. }
            | UiEvent::LabReportResult { .. }
    )
}

fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}
