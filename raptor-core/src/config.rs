//! Search configuration.

use std::path::{Path as FsPath, PathBuf};
use std::sync::Arc;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::debug::{DebugHandler, LoggingDebugHandler};
use crate::path::{ChainPathMapper, Path, PathComparator, PathCriteria};
use crate::transit::{
    DefaultCostCalculator, DefaultSlackProvider, ForwardTransitCalculator,
    ReverseTransitCalculator, SearchDirection, TransitCalculator,
};

/// Errors from loading or validating a [`SearchConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config is not valid JSON for a search config
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of range
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Parameters for the destination side of a search.
///
/// Every field has a default, so a config file only needs the values it
/// changes:
///
/// ```
/// use raptor_core::config::SearchConfig;
/// use raptor_core::transit::SearchDirection;
///
/// let config = SearchConfig::from_json_str(r#"{ "direction": "reverse", "include_c1": true }"#)?;
/// assert_eq!(config.direction, SearchDirection::Reverse);
/// assert_eq!(config.transfer_slack_secs, 60);
/// # Ok::<(), raptor_core::config::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub direction: SearchDirection,

    /// Minimum time between reaching a stop and boarding a flex egress
    /// (seconds).
    pub transfer_slack_secs: i32,

    /// Cost of waiting relative to riding. 1.0 makes a second of waiting
    /// cost the same as a second of travel.
    pub wait_reluctance: f64,

    /// Cost added for every ride on an egress leg (centi-seconds).
    pub transfer_cost: i32,

    /// Track generalized cost as a criterion.
    pub include_c1: bool,

    /// Keep one path per iteration of a range search.
    pub timetable: bool,

    /// Destinations reached later than this are rejected in a forward
    /// search (seconds since start of service day).
    pub latest_arrival_time: Option<i32>,

    /// Origins left earlier than this are rejected in a reverse search
    /// (seconds since start of service day).
    pub earliest_departure_time: Option<i32>,

    /// Log every accepted, rejected and dropped path.
    pub debug: bool,
}

impl SearchConfig {
    /// Parse and validate a config from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SearchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_file(path: impl AsRef<FsPath>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.transfer_slack_secs < 0 {
            return Err(ConfigError::Invalid(format!(
                "transfer_slack_secs must not be negative, was {}",
                self.transfer_slack_secs
            )));
        }
        if !self.wait_reluctance.is_finite() || self.wait_reluctance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "wait_reluctance must be a non-negative number, was {}",
                self.wait_reluctance
            )));
        }
        if self.transfer_cost < 0 {
            return Err(ConfigError::Invalid(format!(
                "transfer_cost must not be negative, was {}",
                self.transfer_cost
            )));
        }
        if let (Some(earliest), Some(latest)) =
            (self.earliest_departure_time, self.latest_arrival_time)
            && earliest > latest
        {
            return Err(ConfigError::Invalid(format!(
                "earliest_departure_time {earliest} is after latest_arrival_time {latest}"
            )));
        }
        Ok(())
    }

    /// Returns the transfer slack as a Duration.
    pub fn transfer_slack(&self) -> Duration {
        Duration::seconds(i64::from(self.transfer_slack_secs))
    }

    /// Calculator for the configured direction, limited by the matching
    /// time limit.
    pub fn transit_calculator(&self) -> Box<dyn TransitCalculator> {
        match self.direction {
            SearchDirection::Forward => {
                Box::new(ForwardTransitCalculator::new(self.latest_arrival_time))
            }
            SearchDirection::Reverse => {
                Box::new(ReverseTransitCalculator::new(self.earliest_departure_time))
            }
        }
    }

    /// `None` unless generalized cost is a criterion.
    pub fn cost_calculator(&self) -> Option<DefaultCostCalculator> {
        self.include_c1
            .then(|| DefaultCostCalculator::new(self.wait_reluctance, self.transfer_cost))
    }

    pub fn slack_provider(&self) -> DefaultSlackProvider {
        DefaultSlackProvider::new(self.transfer_slack_secs)
    }

    pub fn path_criteria(&self) -> PathCriteria {
        PathCriteria::from_flags(self.timetable, self.include_c1)
    }

    pub fn path_comparator(&self) -> PathComparator {
        PathComparator::new(self.path_criteria(), self.direction)
    }

    pub fn path_mapper(&self) -> ChainPathMapper {
        ChainPathMapper::new(self.direction)
    }

    /// A logging handler when `debug` is set.
    pub fn debug_handler(&self) -> Option<Arc<dyn DebugHandler<Path>>> {
        if self.debug {
            Some(Arc::new(LoggingDebugHandler))
        } else {
            None
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            direction: SearchDirection::Forward,
            transfer_slack_secs: 60,
            wait_reluctance: 1.0,
            transfer_cost: 0,
            include_c1: false,
            timetable: false,
            latest_arrival_time: None,
            earliest_departure_time: None,
            debug: false,
        }
    }
}
