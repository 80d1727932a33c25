use crate::feature::GeometryKind;
use crate::label::LabelMode;
use crate::style::{FontWeight, TextAlign, TextBaseline};
use clap::Parser;
use config::{
    Config as ConfigCrate,
    ConfigError as ConfigCrateError,
    Environment,
    File,
    Map,
    Source,
    Value,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

// Using constants for default values makes them easy to change. They match
// the control defaults of the upstream vector-labels demo.
const DEFAULT_MODE: LabelMode = LabelMode::Normal;
const DEFAULT_ALIGN: TextAlign = TextAlign::Center;
const DEFAULT_BASELINE: TextBaseline = TextBaseline::Middle;
const DEFAULT_WEIGHT: FontWeight = FontWeight::Bold;
const DEFAULT_FONT_FAMILY: &str = "Verdana";
const DEFAULT_FONT_SIZE: u16 = 12;
const DEFAULT_FILL_COLOR: &str = "#aa3300";
const DEFAULT_OUTLINE_COLOR: &str = "#ffffff";
const DEFAULT_OUTLINE_WIDTH: u32 = 3;
const DEFAULT_MAX_RESOLUTION: f64 = 1200.0;
const DEFAULT_WRAP_WIDTH: u16 = 16;
const DEFAULT_SHORTEN_LENGTH: u16 = 12;
const DEFAULT_SEPARATOR: &str = "\n";
const DEFAULT_ELLIPSIS: &str = "...";

// Hex (#rgb/#rrggbb), rgb()/rgba(), or a named color.
const COLOR_PATTERN: &str = r"^(#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})|[a-zA-Z]+|rgba?\(\s*\d{1,3}\s*,\s*\d{1,3}\s*,\s*\d{1,3}\s*(,\s*(0|1|0?\.\d+)\s*)?\))$";

// Define potential errors during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] ConfigCrateError),
    #[error("Invalid wrap width for {0} labels: must be at least 1")]
    InvalidWidth(&'static str),
    #[error("Invalid shorten length for {0} labels: must be at least 1")]
    InvalidLength(&'static str),
    #[error("Invalid color value for {0} labels: {1}")]
    InvalidColor(&'static str, String),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Style parameters for one class of labels, the explicit replacement for
/// the upstream demo's per-geometry bundle of UI controls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelConfig {
    pub mode: LabelMode,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    pub font_family: String,
    pub weight: FontWeight,
    /// Font size in pixels.
    pub size: u16,
    pub color: String,
    pub outline_color: String,
    pub outline_width: u32,
    /// View resolutions above this render no label at all.
    pub max_resolution: f64,
    pub wrap_width: u16,
    pub shorten_length: u16,
    pub separator: String,
    pub ellipsis: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        LabelConfig {
            mode: DEFAULT_MODE,
            align: DEFAULT_ALIGN,
            baseline: DEFAULT_BASELINE,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            weight: DEFAULT_WEIGHT,
            size: DEFAULT_FONT_SIZE,
            color: DEFAULT_FILL_COLOR.to_string(),
            outline_color: DEFAULT_OUTLINE_COLOR.to_string(),
            outline_width: DEFAULT_OUTLINE_WIDTH,
            max_resolution: DEFAULT_MAX_RESOLUTION,
            wrap_width: DEFAULT_WRAP_WIDTH,
            shorten_length: DEFAULT_SHORTEN_LENGTH,
            separator: DEFAULT_SEPARATOR.to_string(),
            ellipsis: DEFAULT_ELLIPSIS.to_string(),
        }
    }
}

/// One config section per geometry kind, like the demo's three groups of
/// controls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StyleSheet {
    pub points: LabelConfig,
    pub lines: LabelConfig,
    pub polygons: LabelConfig,
}

impl StyleSheet {
    pub fn section(&self, kind: GeometryKind) -> &LabelConfig {
        match kind {
            GeometryKind::Point => &self.points,
            GeometryKind::Line => &self.lines,
            GeometryKind::Polygon => &self.polygons,
        }
    }
}

// Serde struct for deserializing config file values.
// Optional fields allow for layered config (defaults -> file -> env -> args).
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
struct FileLabelConfig {
    mode: Option<LabelMode>,
    align: Option<TextAlign>,
    baseline: Option<TextBaseline>,
    font_family: Option<String>,
    weight: Option<FontWeight>,
    size: Option<u16>,
    color: Option<String>,
    outline_color: Option<String>,
    outline_width: Option<u32>,
    max_resolution: Option<f64>,
    wrap_width: Option<u16>,
    shorten_length: Option<u16>,
    separator: Option<String>,
    ellipsis: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
struct FileConfig {
    points: FileLabelConfig,
    lines: FileLabelConfig,
    polygons: FileLabelConfig,
}

// Command line arguments defined using clap. Style flags apply to every
// geometry section; per-section values belong in the config file.
#[derive(Parser, Debug)]
#[command(author, version, about = "Label styling for map features", long_about = None)]
pub struct CliArgs {
    /// Feature names to label; read from stdin when empty
    pub features: Vec<String>,

    /// Path to a custom configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Geometry kind of the input features
    #[arg(long, default_value = "point")]
    pub geometry: GeometryKind,

    /// View resolution to style at
    #[arg(long, default_value_t = 100.0)]
    pub resolution: f64,

    /// Print the merged configuration and exit
    #[arg(long)]
    pub debug_config: bool,

    // --- Mirrored style settings ---
    #[arg(long)]
    pub mode: Option<LabelMode>,
    #[arg(long)]
    pub align: Option<TextAlign>,
    #[arg(long)]
    pub baseline: Option<TextBaseline>,
    #[arg(long)]
    pub font_family: Option<String>,
    #[arg(long)]
    pub weight: Option<FontWeight>,
    #[arg(long)]
    pub size: Option<u16>,
    #[arg(long)]
    pub color: Option<String>,
    #[arg(long)]
    pub outline_color: Option<String>,
    #[arg(long)]
    pub outline_width: Option<u32>,
    #[arg(long)]
    pub max_resolution: Option<f64>,
    #[arg(long)]
    pub wrap_width: Option<u16>,
    #[arg(long)]
    pub shorten_length: Option<u16>,
    #[arg(long)]
    pub separator: Option<String>,
    #[arg(long)]
    pub ellipsis: Option<String>,
}

// Function to load configuration from all sources.
pub fn load_config(args: &CliArgs) -> Result<StyleSheet, ConfigError> {
    // Build environment source separately and collect it into a map so it
    // can be layered via set_override. Missing env vars are fine.
    let env_source = Environment::with_prefix("MAPLABEL").separator("__");
    let env_map: Map<String, Value> = env_source.collect().unwrap_or_else(|_| Map::new());

    build_config_from_args(args, Some(env_map))
}

// Separate function to allow testing with specific args and override sources
fn build_config_from_args(
    args: &CliArgs,
    override_source: Option<Map<String, Value>>,
) -> Result<StyleSheet, ConfigError> {
    // 1. Determine config file path
    let config_file_path = args.config.clone().or_else(|| {
        directories::ProjectDirs::from("", "", "maplabel-rs")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    });

    // 2. Build configuration source using the `config` crate
    let mut config_builder = ConfigCrate::builder();

    if let Some(ref path) = config_file_path {
        config_builder = config_builder.add_source(File::from(path.clone()).required(false));
    }

    // Layer on the provided override source (e.g., environment or test map)
    // with higher priority than the file source.
    if let Some(overrides) = override_source {
        for (key, value) in overrides {
            config_builder = config_builder.set_override(&key, value)?;
        }
    }

    let loaded: FileConfig = config_builder.build()?.try_deserialize()?;

    // 3. Layer the configurations: args > overrides > file > defaults
    let sheet = StyleSheet {
        points: merge_section(&loaded.points, args),
        lines: merge_section(&loaded.lines, args),
        polygons: merge_section(&loaded.polygons, args),
    };

    validate_sheet(&sheet)?;

    Ok(sheet)
}

fn merge_section(file: &FileLabelConfig, args: &CliArgs) -> LabelConfig {
    LabelConfig {
        mode: args.mode.or(file.mode).unwrap_or(DEFAULT_MODE),
        align: args.align.or(file.align).unwrap_or(DEFAULT_ALIGN),
        baseline: args.baseline.or(file.baseline).unwrap_or(DEFAULT_BASELINE),
        font_family: args
            .font_family
            .clone()
            .or_else(|| file.font_family.clone())
            .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string()),
        weight: args.weight.or(file.weight).unwrap_or(DEFAULT_WEIGHT),
        size: args.size.or(file.size).unwrap_or(DEFAULT_FONT_SIZE),
        color: args
            .color
            .clone()
            .or_else(|| file.color.clone())
            .unwrap_or_else(|| DEFAULT_FILL_COLOR.to_string()),
        outline_color: args
            .outline_color
            .clone()
            .or_else(|| file.outline_color.clone())
            .unwrap_or_else(|| DEFAULT_OUTLINE_COLOR.to_string()),
        outline_width: args
            .outline_width
            .or(file.outline_width)
            .unwrap_or(DEFAULT_OUTLINE_WIDTH),
        max_resolution: args
            .max_resolution
            .or(file.max_resolution)
            .unwrap_or(DEFAULT_MAX_RESOLUTION),
        wrap_width: args
            .wrap_width
            .or(file.wrap_width)
            .unwrap_or(DEFAULT_WRAP_WIDTH),
        shorten_length: args
            .shorten_length
            .or(file.shorten_length)
            .unwrap_or(DEFAULT_SHORTEN_LENGTH),
        separator: args
            .separator
            .clone()
            .or_else(|| file.separator.clone())
            .unwrap_or_else(|| DEFAULT_SEPARATOR.to_string()),
        ellipsis: args
            .ellipsis
            .clone()
            .or_else(|| file.ellipsis.clone())
            .unwrap_or_else(|| DEFAULT_ELLIPSIS.to_string()),
    }
}

/// Validates the merged configuration: color syntax plus nonzero wrap and
/// shorten values. The text functions tolerate zero on their own, but a
/// zero here is a mistake worth surfacing at the boundary.
fn validate_sheet(sheet: &StyleSheet) -> Result<(), ConfigError> {
    let color_re =
        Regex::new(COLOR_PATTERN).map_err(|e| ConfigError::ValidationError(e.to_string()))?;

    let sections: [(&'static str, &LabelConfig); 3] = [
        ("point", &sheet.points),
        ("line", &sheet.lines),
        ("polygon", &sheet.polygons),
    ];

    for (name, section) in sections {
        if section.wrap_width == 0 {
            return Err(ConfigError::InvalidWidth(name));
        }
        if section.shorten_length == 0 {
            return Err(ConfigError::InvalidLength(name));
        }
        if !color_re.is_match(&section.color) {
            return Err(ConfigError::InvalidColor(name, section.color.clone()));
        }
        if !color_re.is_match(&section.outline_color) {
            return Err(ConfigError::InvalidColor(
                name,
                section.outline_color.clone(),
            ));
        }
    }

    Ok(())
}
