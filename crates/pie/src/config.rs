use derive_more::{AsRef, Deref, Display, From, Into};
use directories::ProjectDirs;
use palette::{Srgb, Srgba, WithAlpha};
use palette::rgb::FromHexError;
use pie_layout::Point;
use serde::Deserialize;
use serde_with::DeserializeFromStr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

const ENV_PREFIX: &str = "PIE";
const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
pub enum Shape {
    #[default]
    #[strum(serialize = "circle", serialize = "c")]
    Circle,
    #[strum(serialize = "square", serialize = "s")]
    Square,
    #[strum(serialize = "diamond", serialize = "d")]
    Diamond,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Display, Deref, From, Into, AsRef)]
#[serde(transparent)]
pub struct VariantLabel(String);

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VariantConfig {
    pub label: VariantLabel,
    #[serde(default)]
    pub shape: Shape,
}

#[derive(Debug, Error)]
pub enum ColorError {
    #[error("'{0}' is not a hex color")]
    NotHex(String),
    #[error(transparent)]
    Hex(#[from] FromHexError),
}

/// A color written as `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, DeserializeFromStr, Deref, From, Into)]
pub struct HexColor(Srgba<f64>);

impl HexColor {
    pub fn transparent() -> Self {
        Self(Srgba::new(0.0, 0.0, 0.0, 0.0))
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s.strip_prefix('#').unwrap_or(s);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::NotHex(s.to_string()));
        }
        // palette parses the alpha forms and the opaque forms separately
        let rgba: Srgba<u8> = match digits.len() {
            3 | 6 => digits.parse::<Srgb<u8>>()?.with_alpha(u8::MAX),
            _ => digits.parse()?,
        };
        Ok(Self(rgba.into_format()))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CanvasConfig {
    pub width: i32,
    pub height: i32,
    #[serde(default = "HexColor::transparent")]
    pub background: HexColor,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            background: HexColor::transparent(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PieConfig {
    #[serde(default = "PieConfig::default_radius")]
    pub radius: f64,
    #[serde(default = "PieConfig::default_segment_radius")]
    pub segment_radius: f64,
    #[serde(default = "PieConfig::default_item_radius")]
    pub item_radius: f64,
    #[serde(default)]
    pub origin: Point,
    #[serde(default)]
    pub canvas: CanvasConfig,
    #[serde(default)]
    pub variants: Vec<VariantConfig>,
    #[serde(default)]
    pub colors: Vec<HexColor>,
}

impl PieConfig {
    fn default_radius() -> f64 {
        140.0
    }

    fn default_segment_radius() -> f64 {
        220.0
    }

    fn default_item_radius() -> f64 {
        44.0
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "pie", "pie").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn build<S>(file: S, env: config::Environment) -> Result<PieConfig, ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    let s = config::Config::builder()
        .add_source(file)
        .add_source(env)
        .build()?;

    Ok(s.try_deserialize()?)
}

/// Loads `path` (which must exist) with `PIE_*` environment overrides on top.
pub fn load_config(path: &Path) -> Result<PieConfig, ConfigError> {
    build(
        config::File::from(path)
            .format(config::FileFormat::Toml)
            .required(true),
        environment(),
    )
}

/// The configuration shipped with the binary, with environment overrides.
pub fn bundled_config() -> Result<PieConfig, ConfigError> {
    build(
        config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml),
        environment(),
    )
}

/// Resolves the configuration for a run: an explicit path wins, then the user
/// config file, then the bundled default.
pub fn load_or_default(explicit: Option<&Path>) -> Result<PieConfig, ConfigError> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    match get_config_path() {
        Ok(path) if path.exists() => load_config(&path),
        Ok(path) => {
            log::warn!("No config at {}, using the bundled default", path.display());
            bundled_config()
        }
        Err(e) => {
            log::warn!("{}, using the bundled default", e);
            bundled_config()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    write_default_config_to(&path)?;
    Ok(path)
}

/// Writes the bundled config to `path` unless a file is already there.
pub fn write_default_config_to(path: &Path) -> std::io::Result<bool> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if path.exists() {
        return Ok(false);
    }
    fs_err::write(path, DEFAULT_CONFIG)?;
    Ok(true)
}
