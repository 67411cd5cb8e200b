use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cyclepredict",
    version,
    about = "Predict your menstrual cycle from health bills and cycle history"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as human-readable text instead of JSON
    #[arg(long = "human", short = 'H', global = true)]
    pub human: bool,

    /// Override today's date (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub date: Option<NaiveDate>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the cycle profile and data directory
    Init {
        /// Skip interactive setup, use defaults
        #[arg(long)]
        skip: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Extract medicines from bill text and predict the next period
    Analyze {
        /// Bill file (plain text, or a PDF/image whose text layer is passed through)
        #[arg(required_unless_present = "text")]
        file: Option<PathBuf>,

        /// Bill text given inline instead of a file
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,

        /// Start date of the last period, if known
        #[arg(long)]
        last_period: Option<NaiveDate>,

        /// Do not store the bill or the prediction
        #[arg(long)]
        no_save: bool,
    },

    /// List analyzed bills
    Bills {
        /// Number of recent bills to show
        #[arg(long)]
        last: Option<u32>,
    },

    /// Record and review period history
    Cycle {
        #[command(subcommand)]
        action: CycleAction,
    },

    /// Predict the next period from cycle history
    Predict {
        /// Do not store the prediction
        #[arg(long)]
        no_save: bool,
    },

    /// Show stored predictions
    Predictions {
        /// Number of recent predictions to show
        #[arg(long)]
        last: Option<u32>,
    },

    /// Current phase, next period and fertile window
    Status,

    /// Spending trends, top medicines and prediction stats
    Insights,

    /// Personalized wellness recommendations from the text generator
    Recommend,

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set a config value
    Set {
        /// Config key (cycle_length, period_length, generator.command, logging.filter)
        key: String,
        /// Config value
        value: String,
    },
}

#[derive(Subcommand)]
pub enum CycleAction {
    /// Record a period start
    Log {
        /// Period start date (YYYY-MM-DD)
        start: NaiveDate,

        /// Flow intensity: light, normal or heavy
        #[arg(long, default_value = "normal")]
        flow: String,

        /// Comma-separated symptoms
        #[arg(long)]
        symptoms: Option<String>,
    },
    /// List recorded periods, most recent first
    List {
        /// Number of entries to show
        #[arg(long)]
        last: Option<u32>,
    },
    /// Remove a recorded period by id
    Remove {
        /// Entry id
        id: String,
    },
}

impl Commands {
    /// Name used in the JSON envelope.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Init { .. } => "init",
            Self::Config { .. } => "config",
            Self::Analyze { .. } => "analyze",
            Self::Bills { .. } => "bills",
            Self::Cycle { action } => match action {
                CycleAction::Log { .. } => "cycle_log",
                CycleAction::List { .. } => "cycle_list",
                CycleAction::Remove { .. } => "cycle_remove",
            },
            Self::Predict { .. } => "predict",
            Self::Predictions { .. } => "predictions",
            Self::Status => "status",
            Self::Insights => "insights",
            Self::Recommend => "recommend",
            Self::Completions { .. } => "completions",
        }
    }
}
