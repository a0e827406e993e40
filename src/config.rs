//! Runtime configuration resolved from the command line.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail};

use crate::classify::Classifier;
use crate::cli::Cli;
use crate::todoist::cache;
use crate::types::Discipline;
use crate::visibility::VisibilityFilter;

/// Environment variable consulted when `--api-token` is not given.
pub const TOKEN_ENV_VAR: &str = "TODOIST_API_TOKEN";

/// Everything the process needs, fixed for its lifetime.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_token: String,
    pub label_name: String,
    pub delay: Duration,
    pub inbox_discipline: Option<Discipline>,
    pub parallel_suffix: char,
    pub serial_suffix: char,
    pub hide_future_days: i64,
    pub onetime: bool,
    /// `None` disables the on-disk sync cache.
    pub cache_path: Option<PathBuf>,
}

impl Config {
    /// Resolves the runtime configuration. The API token comes from the
    /// flag or from `$TODOIST_API_TOKEN`; having neither is fatal.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let api_token = match cli
            .api_token
            .clone()
            .or_else(|| std::env::var(TOKEN_ENV_VAR).ok())
        {
            Some(token) if !token.is_empty() => token,
            _ => bail!("no API token set; pass --api-token or set {TOKEN_ENV_VAR}"),
        };
        let cache_path = if cli.nocache {
            None
        } else {
            cache::default_cache_path(&api_token)
        };
        Ok(Self {
            api_token,
            label_name: cli.label.clone(),
            delay: Duration::from_secs(cli.delay),
            inbox_discipline: cli.inbox.discipline(),
            parallel_suffix: cli.parallel_suffix,
            serial_suffix: cli.serial_suffix,
            hide_future_days: cli.hide_future,
            onetime: cli.onetime,
            cache_path,
        })
    }

    pub fn classifier(&self) -> Classifier {
        Classifier::new(
            self.inbox_discipline,
            self.parallel_suffix,
            self.serial_suffix,
        )
    }

    pub fn visibility_filter(&self) -> VisibilityFilter {
        VisibilityFilter::new(self.hide_future_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_flag_token_is_used() {
        let cli = Cli::parse_from(["nextaction", "-a", "tok-123"]);
        let config = Config::from_cli(&cli).unwrap();
        assert_eq!(config.api_token, "tok-123");
        assert_eq!(config.delay, Duration::from_secs(5));
        assert_eq!(config.label_name, "next_action");
    }

    #[test]
    fn test_nocache_disables_cache_path() {
        let cli = Cli::parse_from(["nextaction", "-a", "tok", "--nocache"]);
        let config = Config::from_cli(&cli).unwrap();
        assert!(config.cache_path.is_none());
    }

    #[test]
    fn test_inbox_none_leaves_inbox_unmanaged() {
        let cli = Cli::parse_from(["nextaction", "-a", "tok", "--inbox", "none"]);
        let config = Config::from_cli(&cli).unwrap();
        assert_eq!(config.inbox_discipline, None);
    }
}
