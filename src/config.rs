//! Default item attributes loaded from YAML.
//!
//! ```yaml
//! line_width: 2.0
//! line_style: "--"
//! symbol: o
//! highlight_color: "#ff0000"
//! histogram_type: center
//! profile_line_width: 3
//! profile_method: sum
//! ```
//!
//! Every key is optional; missing keys keep their built-in value.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Deserialize;

use crate::color::Rgba8;
use crate::error::{PlotError, Result};
use crate::histogram::HistogramType;
use crate::profile::{ProfileMethod, ProfileOptions};
use crate::style::{LineStyle, Symbol};

/// Environment variable naming a configuration file to try first.
pub const CONFIG_ENV_VAR: &str = "PLOT_ITEMS_CONFIG";

/// File names searched for in the working directory.
const CONFIG_FILENAMES: &[&str] = &["plot_items.yml", "plot_items.yaml"];

/// Attributes given to newly created items.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlotDefaults {
    pub color: Rgba8,
    pub highlight_color: Rgba8,
    pub line_width: f64,
    pub line_style: LineStyle,
    pub symbol: Symbol,
    pub symbol_size: f64,
    pub histogram_type: Option<HistogramType>,
    pub profile_line_width: u32,
    pub profile_method: ProfileMethod,
}

impl Default for PlotDefaults {
    fn default() -> Self {
        Self {
            color: Rgba8::BLACK,
            highlight_color: Rgba8::BLACK,
            line_width: 1.0,
            line_style: LineStyle::Solid,
            symbol: Symbol::None,
            symbol_size: 6.0,
            histogram_type: None,
            profile_line_width: 1,
            profile_method: ProfileMethod::Mean,
        }
    }
}

impl PlotDefaults {
    /// Replace out-of-range numeric values with their built-in defaults.
    fn sanitize(mut self) -> Self {
        let builtin = Self::default();
        if !(self.line_width.is_finite() && self.line_width >= 0.0) {
            self.line_width = builtin.line_width;
        }
        if !(self.symbol_size.is_finite() && self.symbol_size > 0.0) {
            self.symbol_size = builtin.symbol_size;
        }
        self.profile_line_width = self.profile_line_width.max(1);
        self
    }

    pub fn from_yaml_str(contents: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str::<Self>(contents).map(Self::sanitize)
    }

    /// Strictly load one file: missing or malformed files are errors.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let defaults = Self::from_yaml_str(&contents).map_err(|source| PlotError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loaded plot defaults from {}", path.display());
        Ok(defaults)
    }

    pub fn profile_options(&self) -> ProfileOptions {
        ProfileOptions {
            method: self.profile_method,
            line_width: self.profile_line_width,
        }
    }
}

/// Loaded defaults with the file they came from and the problems met on
/// the way.
#[derive(Debug, Clone)]
pub struct PlotConfigHandle {
    pub defaults: PlotDefaults,
    pub source: Option<PathBuf>,
    pub warnings: Vec<String>,
}

/// Candidate paths in search order, flagged when explicitly named.
fn config_candidates(custom_path: Option<&Path>) -> Vec<(PathBuf, bool)> {
    let mut candidates = Vec::new();
    if let Some(path) = custom_path {
        candidates.push((path.to_path_buf(), true));
    }
    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        candidates.push((PathBuf::from(env_path), true));
    }
    if let Ok(cwd) = std::env::current_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push((cwd.join(name), false));
        }
    }
    candidates
}

/// Find and load the first readable configuration file.
///
/// Search order: `custom_path`, `$PLOT_ITEMS_CONFIG`, then
/// `plot_items.yml` / `plot_items.yaml` in the working directory.
/// Unreadable or malformed candidates, and explicitly named files that do
/// not exist, are skipped with a warning; when none loads, built-in
/// defaults are returned.
pub fn load_plot_config(custom_path: Option<&Path>) -> PlotConfigHandle {
    let mut warnings = Vec::new();
    for (candidate, explicit) in config_candidates(custom_path) {
        if !candidate.is_file() {
            if explicit {
                warn!("plot config {} not found", candidate.display());
                warnings.push(format!("{}: not found", candidate.display()));
            }
            continue;
        }
        match PlotDefaults::load(&candidate) {
            Ok(defaults) => {
                return PlotConfigHandle {
                    defaults,
                    source: Some(candidate),
                    warnings,
                }
            }
            Err(err) => {
                warn!("skipping plot config {}: {}", candidate.display(), err);
                warnings.push(format!("{}: {}", candidate.display(), err));
            }
        }
    }
    warnings.push("no plot config found; using built-in defaults".to_string());
    PlotConfigHandle {
        defaults: PlotDefaults::default(),
        source: None,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let d = PlotDefaults::from_yaml_str("line_width: 2.5\nhistogram_type: center\n").unwrap();
        assert_eq!(d.line_width, 2.5);
        assert_eq!(d.histogram_type, Some(HistogramType::Center));
        assert_eq!(d.line_style, LineStyle::Solid);
        assert_eq!(d.profile_line_width, 1);
    }

    #[test]
    fn test_full_yaml() {
        let yaml = r##"
color: blue
highlight_color: "#ff000080"
line_style: "-."
symbol: s
symbol_size: 3
profile_line_width: 4
profile_method: sum
"##;
        let d = PlotDefaults::from_yaml_str(yaml).unwrap();
        assert_eq!(d.color, Rgba8::new_opaque(0, 0, 255));
        assert_eq!(d.highlight_color, Rgba8::new(255, 0, 0, 128));
        assert_eq!(d.line_style, LineStyle::DashDot);
        assert_eq!(d.symbol, Symbol::Square);
        assert_eq!(d.symbol_size, 3.0);
        let opts = d.profile_options();
        assert_eq!(opts.line_width, 4);
        assert_eq!(opts.method, ProfileMethod::Sum);
    }

    #[test]
    fn test_invalid_values_are_rejected_or_sanitized() {
        assert!(PlotDefaults::from_yaml_str("histogram_type: top").is_err());
        assert!(PlotDefaults::from_yaml_str("line_style: \"~\"").is_err());
        let d = PlotDefaults::from_yaml_str("line_width: -3\nprofile_line_width: 0\n").unwrap();
        assert_eq!(d.line_width, 1.0);
        assert_eq!(d.profile_line_width, 1);
    }

    #[test]
    fn test_load_reports_missing_and_malformed_files() {
        let dir = std::env::temp_dir().join(format!("plot-items-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        assert!(matches!(
            PlotDefaults::load(&dir.join("absent.yml")),
            Err(PlotError::Io(_))
        ));

        let bad = dir.join("bad.yml");
        fs::write(&bad, "line_width: [1, 2]\n").unwrap();
        assert!(matches!(PlotDefaults::load(&bad), Err(PlotError::Config { .. })));
        let handle = load_plot_config(Some(&bad));
        assert!(handle.warnings.iter().any(|w| w.contains("bad.yml")));

        let handle = load_plot_config(Some(&dir.join("absent.yml")));
        assert!(handle
            .warnings
            .iter()
            .any(|w| w.contains("absent.yml") && w.contains("not found")));

        let good = dir.join("good.yml");
        fs::write(&good, "symbol: o\n").unwrap();
        let handle = load_plot_config(Some(&good));
        assert_eq!(handle.source.as_deref(), Some(good.as_path()));
        assert_eq!(handle.defaults.symbol, Symbol::Circle);

        fs::remove_dir_all(&dir).unwrap();
    }
}
