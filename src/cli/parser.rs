use clap::{Parser, Subcommand};

/// Command-line interface definition for fieldflow
/// Track municipal maintenance requests: field submission → inspector → contractor
#[derive(Parser)]
#[command(
    name = "fieldflow",
    version = env!("CARGO_PKG_VERSION"),
    about = "Role-based workflow for municipal maintenance requests, stored in SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Login name (funcionario, fiscal, empresa)
    #[arg(global = true, long = "user", env = "FIELDFLOW_USER")]
    pub user: Option<String>,

    /// Password for --user
    #[arg(
        global = true,
        long = "password",
        env = "FIELDFLOW_PASSWORD",
        hide_env_values = true
    )]
    pub password: Option<String>,

    /// Skip the simulated network latency
    #[arg(global = true, long = "no-delay")]
    pub no_delay: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,
    },

    /// Print the internal log table (migrations, simulated e-mails)
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(
            long = "notifications",
            help = "Only show the simulated e-mails"
        )]
        notifications: bool,
    },

    /// Check credentials and show the screen for the role
    Login,

    /// File a new service request (field worker)
    Submit {
        /// Photo taken before the work (any image file)
        #[arg(long = "photo", value_name = "FILE")]
        photo: String,

        /// Latitude of the request
        #[arg(long = "lat", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude of the request
        #[arg(long = "lng", allow_negative_numbers = true)]
        lng: Option<f64>,

        /// Service category (Poda, Capinação, Outro, ...)
        #[arg(long = "service", default_value = "Poda")]
        service: String,

        /// Name shown on the request (defaults to the login name)
        #[arg(long = "name")]
        name: Option<String>,
    },

    /// List requests and forward pending ones to the contractor (inspector)
    Inspect {
        /// Request id to forward; repeat or separate with commas
        #[arg(long = "send", value_delimiter = ',')]
        send: Vec<u64>,

        /// Forward every request still waiting for the inspector
        #[arg(long = "all", conflicts_with = "send")]
        all: bool,
    },

    /// List assigned requests and mark them completed (contractor)
    Contract {
        /// Request id to complete
        #[arg(long = "complete", requires = "photo")]
        complete: Option<u64>,

        /// Photo of the finished work
        #[arg(long = "photo", value_name = "FILE", requires = "complete")]
        photo: Option<String>,
    },
}
