use crate::app::cli::Cli;
use crate::app::error::ExtractError;
use crate::app::models::{ExtensionSelection, RuntimeConfig, ScanConfig};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Always pruned, in addition to the output directory and user extras.
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &[".git", "node_modules", "__pycache__"];

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PresetConfig {
    pub extensions: Option<Vec<String>>,
    pub exclude_dirs: Option<Vec<String>>,
    pub exclude_files: Option<Vec<String>>,
}

pub fn presets_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home
        .join(".config")
        .join("md_extract")
        .join("presets.toml"))
}

/// Reads presets from `path`; a missing file means no presets.
pub fn load_presets_file(path: &Path) -> Result<HashMap<String, PresetConfig>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read presets at {:?}", path))?;

    let parsed: PresetsFile = toml::from_str(&content).context("Failed to parse presets.toml")?;

    Ok(parsed.presets)
}

fn merge_vecs(preset_vec: Option<Vec<String>>, cli_vec: Option<Vec<String>>) -> Vec<String> {
    let mut combined = preset_vec.unwrap_or_default();
    if let Some(mut cli_items) = cli_vec {
        combined.append(&mut cli_items);
    }
    // Deduplicate while keeping order
    let mut seen = std::collections::HashSet::new();
    combined.retain(|item| seen.insert(item.clone()));
    combined
}

/// Picks the directory and raw extensions from exactly one invocation style.
fn select_mode(
    cli: &Cli,
    preset_exts: Vec<String>,
) -> Result<(PathBuf, Vec<String>), ExtractError> {
    match (&cli.simple_dir, &cli.directory) {
        (Some(_), Some(_)) => Err(ExtractError::config(
            "use either a positional directory or -d/--directory, not both",
        )),
        (None, None) => Err(ExtractError::config(
            "a directory is required: `<directory> <extension>` or `-d <directory> -e <ext>...`",
        )),
        (Some(dir), None) => {
            if cli.extensions.is_some() {
                return Err(ExtractError::config(
                    "-e/--extensions belongs to extended mode; use -d <directory> with it",
                ));
            }
            let ext = cli.simple_ext.clone().ok_or_else(|| {
                ExtractError::config("simple mode requires both directory and extension")
            })?;
            Ok((dir.clone(), vec![ext]))
        }
        (None, Some(dir)) => {
            let exts = merge_vecs(Some(preset_exts), cli.extensions.clone());
            if exts.is_empty() {
                return Err(ExtractError::config("extended mode requires -e/--extensions"));
            }
            Ok((dir.clone(), exts))
        }
    }
}

/// Final path component of the output directory, used to keep reports out of the scan.
fn output_dir_name(output_dir: &Path) -> Option<String> {
    output_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

pub fn resolve_config(
    cli: Cli,
    presets: &HashMap<String, PresetConfig>,
) -> Result<RuntimeConfig, ExtractError> {
    let preset = match cli.preset.as_deref() {
        Some(name) => presets
            .get(name)
            .cloned()
            .ok_or_else(|| ExtractError::config(format!("unknown preset `{}`", name)))?,
        None => PresetConfig::default(),
    };

    let (root, raw_exts) = select_mode(&cli, preset.extensions.clone().unwrap_or_default())?;
    if raw_exts.len() > 1 && raw_exts.iter().any(|ext| ext.eq_ignore_ascii_case("all")) {
        return Err(ExtractError::config(
            "`all` must be the only extension; it cannot be combined with others",
        ));
    }

    let mut builtin: Vec<String> = DEFAULT_EXCLUDE_DIRS.iter().map(|d| d.to_string()).collect();
    builtin.extend(output_dir_name(&cli.output_dir));
    builtin.extend(preset.exclude_dirs.unwrap_or_default());

    let scan = ScanConfig {
        root,
        extensions: ExtensionSelection::from_args(&raw_exts),
        exclude_dirs: merge_vecs(Some(builtin), cli.exclude_dirs),
        exclude_files: merge_vecs(preset.exclude_files, cli.exclude_files),
        respect_gitignore: cli.gitignore,
    };

    Ok(RuntimeConfig {
        scan,
        output_dir: cli.output_dir,
    })
}

/// `extract_<root_name>-<exts>_`, shared by every report of the same run shape.
fn report_prefix(root: &Path, extensions: &ExtensionSelection) -> String {
    let folder = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "root".to_string());

    format!("extract_{}-{}_", folder, extensions.file_name_part())
}

/// `<output_dir>/extract_<root_name>-<exts>_<YYYYMMDD>.md`
pub fn output_path(
    output_dir: &Path,
    root: &Path,
    extensions: &ExtensionSelection,
    date: NaiveDate,
) -> PathBuf {
    output_dir.join(format!(
        "{}{}.md",
        report_prefix(root, extensions),
        date.format("%Y%m%d")
    ))
}

/// True for a report written by an earlier run into `report_dir`.
///
/// Catches output directories such as `.` whose name cannot be pruned.
/// `report_dir` and `path` must both be canonical.
pub fn is_earlier_report(
    path: &Path,
    report_dir: &Path,
    root: &Path,
    extensions: &ExtensionSelection,
) -> bool {
    if path.parent() != Some(report_dir) {
        return false;
    }
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let Some(stamp) = name
        .strip_prefix(report_prefix(root, extensions).as_str())
        .and_then(|rest| rest.strip_suffix(".md"))
    else {
        return false;
    };

    stamp.len() == 8 && stamp.bytes().all(|b| b.is_ascii_digit())
}
