//! Command-line definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use studex_domain::{
    DEFAULT_BASE_URL, DEFAULT_COHORT_YEAR, DEFAULT_IMAGE_URL_TEMPLATE, DEFAULT_TIMEOUT_SECS,
};

#[derive(Parser, Debug)]
#[command(name = "studex")]
#[command(version)]
#[command(about = "Student directory client")]
pub struct Cli {
    #[command(flatten)]
    pub service: ServiceArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Where the service lives and where tokens are kept.
#[derive(Args, Debug, Clone)]
pub struct ServiceArgs {
    /// Base URL of the directory service
    #[arg(long, global = true, env = "STUDEX_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Cohort year used in directory paths
    #[arg(long, global = true, env = "STUDEX_COHORT_YEAR", default_value_t = DEFAULT_COHORT_YEAR)]
    pub cohort_year: u16,

    /// Student image URL template; `{id}` is replaced by the identifier
    #[arg(
        long,
        global = true,
        env = "STUDEX_IMAGE_URL_TEMPLATE",
        default_value = DEFAULT_IMAGE_URL_TEMPLATE
    )]
    pub image_url_template: String,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "STUDEX_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Credential file (default: <data dir>/studex/credentials.json)
    #[arg(long, global = true, env = "STUDEX_CREDENTIALS", value_name = "PATH")]
    pub credentials: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and store the issued tokens
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "STUDEX_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "STUDEX_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// List every student
    Roster,

    /// List students whose birthday is today
    Birthdays,

    /// Look a student up and show their details
    Search {
        /// Student identifier
        id: String,
    },

    /// Print the image URL for a student
    ImageUrl {
        /// Student identifier
        id: u64,
    },

    /// End the session
    Logout {
        /// Also delete the stored tokens
        #[arg(long)]
        forget: bool,
    },
}
