//! Configuration and CLI argument handling

use std::time::Duration;

use chrono::TimeDelta;
use clap::Parser;

use crate::error::TimerError;

/// CLI argument parsing structure
#[derive(Parser)]
#[command(name = "thaw-timer")]
#[command(about = "A countdown timer service with pause and freeze interruptions")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Countdown duration in seconds
    #[arg(short, long, default_value = "60")]
    pub duration: u64,

    /// Identifier for the countdown (generated when omitted)
    #[arg(long)]
    pub id: Option<String>,

    /// Monitor poll interval in milliseconds
    #[arg(long, default_value = "250")]
    pub tick_ms: u64,

    /// Defrost automatically once a freeze has run its length
    #[arg(long)]
    pub auto_defrost: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Countdown duration as a signed delta
    pub fn timer_duration(&self) -> Result<TimeDelta, TimerError> {
        i64::try_from(self.duration)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .ok_or_else(|| TimerError::invalid(format!("duration {}s is out of range", self.duration)))
    }

    /// Monitor poll interval
    pub fn tick(&self) -> Result<Duration, TimerError> {
        if self.tick_ms == 0 {
            return Err(TimerError::invalid("tick interval must be positive"));
        }
        Ok(Duration::from_millis(self.tick_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("thaw-timer").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let config = parse(&[]);
        assert_eq!(config.address(), "0.0.0.0:20554");
        assert_eq!(config.timer_duration().unwrap(), TimeDelta::seconds(60));
        assert_eq!(config.tick().unwrap(), Duration::from_millis(250));
        assert_eq!(config.log_level(), "info");
        assert!(!config.auto_defrost);
        assert!(config.id.is_none());
    }

    #[test]
    fn flags_override_defaults() {
        let config = parse(&["-d", "5", "--tick-ms", "100", "--auto-defrost", "-v", "--id", "tea"]);
        assert_eq!(config.timer_duration().unwrap(), TimeDelta::seconds(5));
        assert_eq!(config.log_level(), "debug");
        assert!(config.auto_defrost);
        assert_eq!(config.id.as_deref(), Some("tea"));
    }

    #[test]
    fn zero_tick_is_invalid() {
        let config = parse(&["--tick-ms", "0"]);
        assert!(matches!(config.tick(), Err(TimerError::InvalidConfiguration { .. })));
    }

    #[test]
    fn huge_duration_is_invalid() {
        let config = parse(&["--duration", &u64::MAX.to_string()]);
        assert!(config.timer_duration().is_err());
    }
}
