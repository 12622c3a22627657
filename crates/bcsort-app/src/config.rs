//! Configuration management for bcsort
//!
//! Config stored at: ~/.config/bcsort/config.json

use std::path::{Path, PathBuf};

use bcsort_domain::model::ColumnRole;
use bcsort_domain::service::routing::DEFAULT_MINIBUS_MAX_GROSS_WEIGHT;
use bcsort_domain::service::{ExpectedColumn, RoutingOptions};
use bcsort_types::{ConfigError, OutputFormat, Result};
use serde::{Deserialize, Serialize};

/// Every key a config file may contain
const KNOWN_KEYS: [&str; 17] = [
    "search_url",
    "plate_column",
    "decision_column",
    "body_column",
    "make_column",
    "model_column",
    "seats_column",
    "gross_weight_column",
    "unladen_weight_column",
    "body_types",
    "auto_minibus",
    "minibus_max_gross_weight",
    "trust_previous",
    "store_path",
    "city",
    "help_interval",
    "output_format",
];

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Image search page; the plate is appended
    #[serde(default = "default_search_url")]
    pub search_url: String,

    #[serde(default = "default_plate_column")]
    pub plate_column: String,

    /// Column that receives the decision letter
    #[serde(default = "default_decision_column")]
    pub decision_column: String,

    #[serde(default = "default_body_column")]
    pub body_column: String,

    #[serde(default = "default_make_column")]
    pub make_column: String,

    #[serde(default = "default_model_column")]
    pub model_column: String,

    #[serde(default = "default_seats_column")]
    pub seats_column: String,

    #[serde(default = "default_gross_weight_column")]
    pub gross_weight_column: String,

    #[serde(default = "default_unladen_weight_column")]
    pub unladen_weight_column: String,

    /// Accepted body types. Empty accepts every row.
    #[serde(default = "default_body_types")]
    pub body_types: Vec<String>,

    /// Classify light minibuses without asking
    #[serde(default = "default_true")]
    pub auto_minibus: bool,

    #[serde(default = "default_minibus_max_gross_weight")]
    pub minibus_max_gross_weight: f64,

    /// Reuse settled decisions from the input file and the decision store
    #[serde(default = "default_true")]
    pub trust_previous: bool,

    /// Decision store CSV (disabled if unset)
    #[serde(default)]
    pub store_path: Option<PathBuf>,

    /// City label recorded with new store entries. Defaults to the input file stem.
    #[serde(default)]
    pub city: Option<String>,

    /// Show the exit hint every this many plates (0 = never)
    #[serde(default = "default_help_interval")]
    pub help_interval: usize,

    #[serde(default)]
    pub output_format: OutputFormat,
}

fn default_search_url() -> String {
    "https://www.flickr.com/search/?text=".to_string()
}

fn default_plate_column() -> String {
    "Plate".to_string()
}

fn default_decision_column() -> String {
    "BusCoach".to_string()
}

fn default_body_column() -> String {
    "DVLA_VEHICLE_BODY".to_string()
}

fn default_make_column() -> String {
    "MVRIS_MAKE_DESC".to_string()
}

fn default_model_column() -> String {
    "MVRIS_MODEL_DESC".to_string()
}

fn default_seats_column() -> String {
    "DVLA_VEHICLE_SEATING_CAPACITY".to_string()
}

fn default_gross_weight_column() -> String {
    "MVRIS_GROSS_WEIGHT".to_string()
}

fn default_unladen_weight_column() -> String {
    "MVRIS_UNLADEN_WEIGHT".to_string()
}

fn default_body_types() -> Vec<String> {
    ["S/D BUS/COACH", "D/D BUS/COACH", "H/D BUS/COACH", "MINIBUS"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_minibus_max_gross_weight() -> f64 {
    DEFAULT_MINIBUS_MAX_GROSS_WEIGHT
}

fn default_help_interval() -> usize {
    10
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
            plate_column: default_plate_column(),
            decision_column: default_decision_column(),
            body_column: default_body_column(),
            make_column: default_make_column(),
            model_column: default_model_column(),
            seats_column: default_seats_column(),
            gross_weight_column: default_gross_weight_column(),
            unladen_weight_column: default_unladen_weight_column(),
            body_types: default_body_types(),
            auto_minibus: true,
            minibus_max_gross_weight: default_minibus_max_gross_weight(),
            trust_previous: true,
            store_path: None,
            city: None,
            help_interval: default_help_interval(),
            output_format: OutputFormat::default(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("bcsort");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from the default location, or use defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from `path`, or use defaults if it does not exist.
    /// Unknown keys are reported and ignored.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse JSON config text, dropping unrecognised keys with a warning
    pub fn from_json(content: &str) -> Result<Self> {
        let mut value: serde_json::Value = serde_json::from_str(content)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        let object = value
            .as_object_mut()
            .ok_or_else(|| ConfigError::ParseError("expected a JSON object".to_string()))?;

        let unknown: Vec<String> = object
            .keys()
            .filter(|key| !KNOWN_KEYS.contains(&key.as_str()))
            .cloned()
            .collect();
        for key in unknown {
            tracing::warn!(option = %key, "unrecognised config option ignored");
            object.remove(&key);
        }

        let config: Config =
            serde_json::from_value(value).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.search_url.trim().is_empty() {
            return Err(ConfigError::InvalidOption {
                option: "search_url".to_string(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        if !self.minibus_max_gross_weight.is_finite() || self.minibus_max_gross_weight < 0.0 {
            return Err(ConfigError::InvalidOption {
                option: "minibus_max_gross_weight".to_string(),
                reason: format!("{} is not a usable weight", self.minibus_max_gross_weight),
            }
            .into());
        }
        Ok(())
    }

    /// Columns the run needs, with requirement levels derived from the
    /// enabled features
    pub fn expected_columns(&self) -> Vec<ExpectedColumn> {
        let mut columns = vec![
            ExpectedColumn::required(ColumnRole::Plate, &self.plate_column),
            ExpectedColumn::optional(ColumnRole::Decision, &self.decision_column),
        ];

        if self.auto_minibus || !self.body_types.is_empty() {
            columns.push(ExpectedColumn::required(ColumnRole::BodyType, &self.body_column));
        } else {
            columns.push(ExpectedColumn::optional(ColumnRole::BodyType, &self.body_column));
        }

        columns.push(ExpectedColumn::optional(ColumnRole::Make, &self.make_column));
        columns.push(ExpectedColumn::optional(ColumnRole::Model, &self.model_column));
        columns.push(ExpectedColumn::optional(ColumnRole::Seats, &self.seats_column));

        if self.auto_minibus {
            columns.push(ExpectedColumn::required(ColumnRole::GrossWeight, &self.gross_weight_column));
        } else {
            columns.push(ExpectedColumn::optional(ColumnRole::GrossWeight, &self.gross_weight_column));
        }

        columns.push(ExpectedColumn::optional(ColumnRole::UnladenWeight, &self.unladen_weight_column));
        columns
    }

    pub fn routing_options(&self) -> RoutingOptions {
        RoutingOptions {
            trust_previous: self.trust_previous,
            auto_minibus: self.auto_minibus,
            minibus_max_gross_weight: self.minibus_max_gross_weight,
        }
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "bcsort Configuration")?;
        writeln!(f, "====================")?;
        writeln!(f)?;
        writeln!(f, "Search URL:       {}", self.search_url)?;
        writeln!(f, "Plate column:     {}", self.plate_column)?;
        writeln!(f, "Decision column:  {}", self.decision_column)?;
        writeln!(f, "Body column:      {}", self.body_column)?;
        writeln!(f, "Body types:       {}", self.body_types.join(", "))?;
        writeln!(
            f,
            "Auto minibus:     {} (gross weight <= {})",
            self.auto_minibus, self.minibus_max_gross_weight
        )?;
        writeln!(f, "Trust previous:   {}", self.trust_previous)?;
        writeln!(
            f,
            "Decision store:   {}",
            self.store_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(none)".to_string())
        )?;
        writeln!(f, "City:             {}", self.city.as_deref().unwrap_or("(input file name)"))?;
        writeln!(f, "Output format:    {}", self.output_format)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:      {}", path.display())?;
        }

        Ok(())
    }
}
