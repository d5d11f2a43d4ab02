//! CLI configuration from environment.

use anyhow::{Context, Result};
use bfp_core::{Chart, Performance};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Chart file; the built-in chart is used when unset.
    pub chart_path: Option<PathBuf>,
    pub cruise_speed_kmh: Option<f64>,
    pub km_per_unit: Option<f64>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            chart_path: env::var_os("BFP_CHART").map(PathBuf::from),
            cruise_speed_kmh: env::var("BFP_CRUISE_SPEED_KMH")
                .ok()
                .and_then(|s| s.parse().ok()),
            km_per_unit: env::var("BFP_KM_PER_UNIT")
                .ok()
                .and_then(|s| s.parse().ok()),
        }
    }

    /// Command-line values win over environment values.
    pub fn with_chart_override(mut self, chart: Option<PathBuf>) -> Self {
        if chart.is_some() {
            self.chart_path = chart;
        }
        self
    }

    pub fn load_chart(&self) -> Result<Chart> {
        let chart = match &self.chart_path {
            Some(path) => Chart::load(path)
                .with_context(|| format!("Failed to load chart {}", path.display()))?,
            None => Chart::builtin().context("Built-in chart is invalid")?,
        };

        if self.cruise_speed_kmh.is_none() && self.km_per_unit.is_none() {
            return Ok(chart);
        }

        let base = chart.performance().clone();
        let performance = Performance {
            cruise_speed_kmh: self.cruise_speed_kmh.unwrap_or(base.cruise_speed_kmh),
            km_per_unit: self.km_per_unit.unwrap_or(base.km_per_unit),
            ..base
        };
        tracing::debug!(?performance, "performance overridden from environment");
        chart
            .with_performance(performance)
            .context("Invalid performance override")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_builtin_chart() {
        let chart = Config::default().load_chart().unwrap();
        assert!(chart.airport("BRUY").is_some());
        assert_eq!(chart.performance(), &Performance::default());
    }

    #[test]
    fn speed_override_is_applied() {
        let config = Config {
            cruise_speed_kmh: Some(556.0),
            ..Config::default()
        };
        let chart = config.load_chart().unwrap();
        assert_eq!(chart.performance().cruise_speed_kmh, 556.0);
        assert_eq!(chart.performance().km_per_unit, 0.1);
    }

    #[test]
    fn invalid_override_is_rejected() {
        let config = Config {
            km_per_unit: Some(-1.0),
            ..Config::default()
        };
        assert!(config.load_chart().is_err());
    }

    #[test]
    fn missing_chart_file_is_reported() {
        let config = Config::default()
            .with_chart_override(Some(PathBuf::from("/nonexistent/chart.json")));
        let err = config.load_chart().unwrap_err();
        assert!(err.to_string().contains("Failed to load chart"));
    }

    #[test]
    fn chart_override_only_replaces_when_given() {
        let config = Config {
            chart_path: Some(PathBuf::from("env.json")),
            ..Config::default()
        };
        assert_eq!(
            config.clone().with_chart_override(None).chart_path,
            Some(PathBuf::from("env.json"))
        );
        assert_eq!(
            config
                .with_chart_override(Some(PathBuf::from("flag.json")))
                .chart_path,
            Some(PathBuf::from("flag.json"))
        );
    }
}
