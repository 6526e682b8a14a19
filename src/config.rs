//! Command line configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::aggregate::Deadlines;
use crate::error::ConfigError;
use crate::source::weather::Location;

#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Config {
    /// City shown in the weather title and sent to the alternate provider.
    #[arg(long, default_value = "Lucknow")]
    pub city: String,

    #[arg(long, default_value_t = 26.85, allow_negative_numbers = true)]
    pub latitude: f64,

    #[arg(long, default_value_t = 80.95, allow_negative_numbers = true)]
    pub longitude: f64,

    /// IANA time zone for the forecast request.
    #[arg(long, default_value = "Asia/Kolkata")]
    pub timezone: String,

    /// Deadline for a single provider call, in milliseconds.
    #[arg(long, default_value_t = 5_000)]
    pub provider_timeout_ms: u64,

    /// Deadline for a whole aggregation run, in milliseconds.
    #[arg(long, default_value_t = 12_000)]
    pub run_timeout_ms: u64,

    /// Refresh automatically every N seconds (0 = only on startup and `r`).
    #[arg(long, default_value_t = 0)]
    pub interval_secs: u64,

    /// Log file (the terminal belongs to the UI).
    #[arg(long, default_value = "livepanel.log")]
    pub log_file: PathBuf,

    /// Default log level when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Run a single aggregation, print it to stdout and exit.
    #[arg(long)]
    pub once: bool,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue(
                "provider timeout must be > 0".into(),
            ));
        }
        if self.run_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue("run timeout must be > 0".into()));
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ConfigError::InvalidValue(format!(
                "latitude {} is outside -90..=90",
                self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ConfigError::InvalidValue(format!(
                "longitude {} is outside -180..=180",
                self.longitude
            )));
        }
        Ok(())
    }

    pub fn location(&self) -> Location {
        Location {
            city: self.city.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            timezone: self.timezone.clone(),
        }
    }

    pub fn deadlines(&self) -> Deadlines {
        Deadlines {
            provider: Duration::from_millis(self.provider_timeout_ms),
            run: Duration::from_millis(self.run_timeout_ms),
        }
    }

    /// `None` when periodic refresh is disabled.
    pub fn interval(&self) -> Option<Duration> {
        (self.interval_secs > 0).then(|| Duration::from_secs(self.interval_secs))
    }
}
