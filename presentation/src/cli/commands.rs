//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for symptom-checker
#[derive(Parser, Debug)]
#[command(name = "symptom-checker")]
#[command(author, version, about = "Symptom checker - AI-assisted condition prediction")]
#[command(long_about = r#"
Symptom checker collects symptoms, optional demographics and lab reports,
and asks a prediction backend for the most likely conditions.

Without --symptom it starts an interactive session. Type part of a symptom to
get suggestions, /pick one, then /submit.

Configuration files are loaded from (in priority order):
1. --config <path>                 Explicit config file
2. ./symptom-checker.toml          Project-level config
3. ~/.config/symptom-checker/config.toml   Global config
4. SYMPTOM_CHECKER_* environment variables

Example:
  symptom-checker
  symptom-checker -s fever -s cough --age 34 --gender female
  symptom-checker -s fatigue --file blood_panel.pdf --json
  symptom-checker --analyze blood_panel.pdf
"#)]
pub struct Cli {
    /// Symptom to include (repeat for several); skips the interactive session
    #[arg(short, long = "symptom", value_name = "SYMPTOM")]
    pub symptoms: Vec<String>,

    /// Patient age
    #[arg(long)]
    pub age: Option<String>,

    /// Patient gender
    #[arg(long)]
    pub gender: Option<String>,

    /// Weight in kilograms
    #[arg(long)]
    pub weight: Option<String>,

    /// Height in centimeters
    #[arg(long)]
    pub height: Option<String>,

    /// Lab report to send with the prediction (PDF, JPEG or PNG; repeatable)
    #[arg(short, long = "file", value_name = "PATH")]
    pub files: Vec<PathBuf>,

    /// Analyze a single lab report and print its summary
    #[arg(long, value_name = "PATH")]
    pub analyze: Option<PathBuf>,

    /// Print the prediction as JSON
    #[arg(long)]
    pub json: bool,

    /// Backend base URL (overrides config)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Whether to run a single prediction instead of the interactive session
    pub fn is_one_shot(&self) -> bool {
        !self.symptoms.is_empty() || self.analyze.is_some()
    }
}
