use crate::app::cli::Cli;
use crate::app::models::{
    MergeConfig, DEFAULT_DIRECTORY, DEFAULT_EXTENSIONS, DEFAULT_IGNORE_DIRS, DEFAULT_OUTPUT,
};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
struct PresetConfig {
    output: Option<String>,
    extensions: Option<Vec<String>>,
    ignore_dirs: Option<Vec<String>>,
}

fn presets_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home
        .join(".config")
        .join("project_merger")
        .join("presets.toml"))
}

fn load_presets_file(config_path: &Path) -> Result<HashMap<String, PresetConfig>> {
    if !config_path.exists() {
        log::debug!("No presets file at {}", config_path.display());
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config at {:?}", config_path))?;

    let parsed: PresetsFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", config_path.display()))?;

    Ok(parsed.presets)
}

fn lookup_preset(
    presets: &HashMap<String, PresetConfig>,
    name: Option<&str>,
) -> Result<PresetConfig> {
    let Some(name) = name else {
        return Ok(PresetConfig::default());
    };
    match presets.get(name) {
        Some(preset) => {
            log::info!("Using preset '{}'", name);
            Ok(preset.clone())
        }
        None => bail!("Unknown preset '{}'", name),
    }
}

/// Splits a comma-separated option into a set, trimming items and
/// dropping empty ones.
pub fn split_list(raw: &str) -> BTreeSet<String> {
    normalize_items(raw.split(','))
}

fn normalize_items<'a>(items: impl IntoIterator<Item = &'a str>) -> BTreeSet<String> {
    items
        .into_iter()
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Makes `path` absolute against `base` without touching the filesystem.
/// `.` segments are dropped and `..` pops the previous segment.
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

pub fn resolve_config(cli: Cli) -> Result<MergeConfig> {
    let presets = match cli.preset {
        Some(_) => load_presets_file(&presets_path()?)?,
        None => HashMap::new(),
    };
    let current_dir = env::current_dir().context("Failed to get current directory")?;
    resolve_with(cli, &presets, &current_dir)
}

/// Field-by-field resolution: CLI flag, then preset, then built-in default.
fn resolve_with(
    cli: Cli,
    presets: &HashMap<String, PresetConfig>,
    current_dir: &Path,
) -> Result<MergeConfig> {
    let preset = lookup_preset(presets, cli.preset.as_deref())?;

    let directory = cli.directory.as_deref().unwrap_or(DEFAULT_DIRECTORY);

    let output = cli
        .output
        .or(preset.output)
        .unwrap_or_else(|| DEFAULT_OUTPUT.to_string());

    let extensions = match (cli.extensions, preset.extensions) {
        (Some(raw), _) => split_list(&raw),
        (None, Some(list)) => normalize_items(list.iter().map(String::as_str)),
        (None, None) => split_list(DEFAULT_EXTENSIONS),
    };

    let ignore_dirs = match (cli.ignore_dirs, preset.ignore_dirs) {
        (Some(raw), _) => split_list(&raw),
        (None, Some(list)) => normalize_items(list.iter().map(String::as_str)),
        (None, None) => split_list(DEFAULT_IGNORE_DIRS),
    };

    let output = PathBuf::from(output);
    let config = MergeConfig {
        directory: absolutize(Path::new(directory), current_dir),
        output_abs: absolutize(&output, current_dir),
        output,
        extensions,
        ignore_dirs,
    };
    log::debug!("Resolved configuration: {:?}", config);

    Ok(config)
}
