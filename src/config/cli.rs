use crate::adapters::DEFAULT_CATALOG_ENDPOINT;
use crate::config::toml_config::DEFAULT_DEADLINE_SECONDS;
use crate::core::favorites::DEFAULT_TOP_K;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "coupon-engine")]
#[command(about = "Spend coupons across catalog items and rank favorites")]
pub struct CliConfig {
    /// Path to a TOML configuration file; replaces the flags below
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, default_value = DEFAULT_CATALOG_ENDPOINT)]
    pub catalog_endpoint: String,

    /// Upper bound for resolving a whole batch of items
    #[arg(long, default_value_t = DEFAULT_DEADLINE_SECONDS)]
    pub deadline_seconds: u64,

    /// CSV file of favorite marks (user_id,item_id)
    #[arg(long)]
    pub marks_path: Option<String>,

    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    pub top_k: usize,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Spend a coupon amount across as many of the given items as possible
    Apply {
        /// Comma-separated catalog item ids
        #[arg(long, value_delimiter = ',', required = true)]
        items: Vec<String>,

        /// Coupon amount
        #[arg(long)]
        amount: Decimal,
    },

    /// List the most favorited items
    Favorites,
}

impl ConfigProvider for CliConfig {
    fn catalog_endpoint(&self) -> &str {
        &self.catalog_endpoint
    }

    fn batch_deadline(&self) -> Duration {
        Duration::from_secs(self.deadline_seconds)
    }

    fn favorites_path(&self) -> Option<&str> {
        self.marks_path.as_deref()
    }

    fn top_k(&self) -> usize {
        self.top_k
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("catalog_endpoint", &self.catalog_endpoint)?;
        validation::validate_range("deadline_seconds", self.deadline_seconds, 1, 300)?;
        validation::validate_positive_number("top_k", self.top_k, 1)?;
        if let Some(marks_path) = &self.marks_path {
            validation::validate_path("marks_path", marks_path)?;
        }
        Ok(())
    }
}
