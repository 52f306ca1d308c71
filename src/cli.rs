use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "agrodose",
    version,
    about = "Pesticide dosage and pre-harvest interval calculator"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute an application plan
    Calculate(CalculateArgs),
    /// Check whether a pesticide is registered for a crop
    Check {
        #[arg(short, long)]
        pesticide: u32,
        #[arg(short = 'r', long)]
        crop: u32,
    },
    /// List protective equipment not yet acknowledged
    Epi {
        #[arg(short, long)]
        pesticide: u32,
        /// Acknowledged equipment item (repeatable)
        #[arg(short, long = "ack")]
        ack: Vec<String>,
    },
    /// Spraying advice for the given conditions
    Advice(ConditionsArgs),
    /// List catalog entries
    List {
        #[command(subcommand)]
        what: ListTarget,
    },
    /// Run interactive setup
    Init,
}

#[derive(Subcommand)]
pub enum ListTarget {
    Pesticides {
        /// Only pesticides of this type (e.g. Herbicida)
        #[arg(short = 't', long = "type")]
        pesticide_type: Option<String>,
    },
    Crops,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct ConditionsArgs {
    /// Air temperature in °C (default 25)
    #[arg(long, allow_negative_numbers = true)]
    pub temp: Option<f64>,
    /// Relative humidity in % (default 60)
    #[arg(long)]
    pub humidity: Option<f64>,
    /// Wind speed in km/h (default 5)
    #[arg(long)]
    pub wind: Option<f64>,
}

#[derive(Args)]
pub struct CalculateArgs {
    #[arg(short, long)]
    pub pesticide: u32,
    #[arg(short = 'r', long)]
    pub crop: u32,
    /// Treated area in hectares (defaults to config value)
    #[arg(short, long, allow_negative_numbers = true)]
    pub area: Option<f64>,
    #[command(flatten)]
    pub conditions: ConditionsArgs,
    /// Acknowledged equipment item (repeatable)
    #[arg(long = "ack")]
    pub ack: Vec<String>,
    /// Proceed without prompting when the pairing is not registered
    #[arg(short, long)]
    pub yes: bool,
    /// Print the plan as JSON
    #[arg(long)]
    pub json: bool,
    /// Register the application after calculating
    #[arg(long)]
    pub register: bool,
    /// Notes stored with the registered application
    #[arg(long, requires = "register")]
    pub notes: Option<String>,
}
