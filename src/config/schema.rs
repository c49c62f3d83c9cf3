use serde::{Deserialize, Serialize};

/// Display preferences loaded from `~/.config/gpa-calc/config.yaml`.
///
/// Example YAML:
/// ```yaml
/// color: auto
/// format: table
/// breakdown: true
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub color: ColorMode,

    #[serde(default)]
    pub format: OutputFormat,

    /// Print the per-subject table along with the GPA
    #[serde(default = "default_breakdown")]
    pub breakdown: bool,
}

fn default_breakdown() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color: ColorMode::default(),
            format: OutputFormat::default(),
            breakdown: default_breakdown(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn enabled(&self, is_terminal: bool) -> bool {
        match self {
            ColorMode::Auto => is_terminal,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Tsv,
    Json,
}
