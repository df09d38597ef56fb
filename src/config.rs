use std::{path::PathBuf, time::Duration};

use clap::Parser;

use crate::{
    pipeline::{DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY},
    wikidata_api::WIKIDATA_API_URL,
    BacklinkError, Language, MaxAttempts,
};

/// Command-line arguments. Every flag is optional; the defaults reproduce a plain
/// run over `balletmasters_final.csv`.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Args {
    /// CSV file with a header row, holding the names to look up
    #[arg(long, default_value = "balletmasters_final.csv")]
    pub input: PathBuf,

    /// Column of the input file that holds the names
    #[arg(long, default_value = "ballet_master")]
    pub column: String,

    /// CSV file the results are written to (truncated first)
    #[arg(long, default_value = "wikidata_results.csv")]
    pub output: PathBuf,

    /// Action API endpoint, ending in /w/api.php
    #[arg(long, default_value = WIKIDATA_API_URL)]
    pub api_url: String,

    /// Language names are searched in
    #[arg(long, default_value = "en")]
    pub language: String,

    /// Attempts per name before "N/A" is written
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub attempts: u8,

    /// Seconds to wait between two attempts for the same name
    #[arg(long, default_value_t = DEFAULT_RETRY_DELAY.as_secs())]
    pub retry_delay: u64,

    /// User agent sent with every request
    #[arg(long)]
    pub user_agent: Option<String>,
}

/// Validated run configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    input: PathBuf,
    column: String,
    output: PathBuf,
    api_url: String,
    language: Language,
    max_attempts: MaxAttempts,
    retry_delay: Duration,
    user_agent: Option<String>,
}

impl Config {
    pub fn input(&self) -> &PathBuf {
        &self.input
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn output(&self) -> &PathBuf {
        &self.output
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub const fn language(&self) -> &Language {
        &self.language
    }

    pub const fn max_attempts(&self) -> MaxAttempts {
        self.max_attempts
    }

    pub const fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }
}

impl TryFrom<Args> for Config {
    type Error = BacklinkError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let max_attempts = MaxAttempts::try_new(args.attempts)
            .map_err(|_| BacklinkError::InvalidAttempts(args.attempts.to_string()))?;
        Ok(Self {
            input: args.input,
            column: args.column,
            output: args.output,
            api_url: args.api_url,
            language: Language::parse(args.language)?,
            max_attempts,
            retry_delay: Duration::from_secs(args.retry_delay),
            user_agent: args.user_agent,
        })
    }
}
