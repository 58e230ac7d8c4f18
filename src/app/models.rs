use chrono::NaiveDateTime;
use std::path::PathBuf;

use super::extensions;

/// Which extensions a run asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionSelection {
    /// The `all` shortcut: every key of the extension table.
    All,
    /// Normalized suffixes, each lowercase with a leading `.`.
    Listed(Vec<String>),
}

impl ExtensionSelection {
    /// Builds a selection from raw user input such as `js`, `.PY` or `all`.
    ///
    /// `all` is a shortcut only when it is the sole argument.
    pub fn from_args(raw: &[String]) -> Self {
        if let [only] = raw {
            if only.eq_ignore_ascii_case("all") {
                return ExtensionSelection::All;
            }
        }

        let mut listed: Vec<String> = Vec::with_capacity(raw.len());
        for ext in raw {
            let ext = ext.trim().to_lowercase();
            let normalized = if ext.starts_with('.') {
                ext
            } else {
                format!(".{}", ext)
            };
            if !listed.contains(&normalized) {
                listed.push(normalized);
            }
        }
        ExtensionSelection::Listed(listed)
    }

    pub fn suffixes(&self) -> Vec<String> {
        match self {
            ExtensionSelection::All => extensions::all_suffixes(),
            ExtensionSelection::Listed(list) => list.clone(),
        }
    }

    /// Text for the `File types:` header line.
    pub fn describe(&self) -> String {
        match self {
            ExtensionSelection::All => "All supported types".to_string(),
            ExtensionSelection::Listed(list) => list.join(", "),
        }
    }

    /// Fragment used in the report file name: `all` or `js-py`.
    pub fn file_name_part(&self) -> String {
        match self {
            ExtensionSelection::All => "all".to_string(),
            ExtensionSelection::Listed(list) => list
                .iter()
                .map(|ext| ext.trim_start_matches('.'))
                .collect::<Vec<_>>()
                .join("-"),
        }
    }
}

/// Normalized, immutable input to a scan.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub root: PathBuf,
    pub extensions: ExtensionSelection,
    /// Substrings matched against directory names; matches are pruned.
    pub exclude_dirs: Vec<String>,
    /// Globs matched against file names.
    pub exclude_files: Vec<String>,
    pub respect_gitignore: bool,
}

/// Everything a run needs: what to scan and where the report goes.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub scan: ScanConfig,
    pub output_dir: PathBuf,
}

/// A matched file. Content is read only when its section is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub relative_path: String,
}

impl FileEntry {
    /// In-document id: spaces and path separators become `-`.
    ///
    /// Distinct paths can collide (`a-b.py` vs `a/b.py`); no disambiguation
    /// is attempted.
    pub fn anchor(&self) -> String {
        self.relative_path
            .chars()
            .map(|c| match c {
                ' ' | '/' => '-',
                c if c == std::path::MAIN_SEPARATOR => '-',
                c => c,
            })
            .collect()
    }
}

/// Metadata written above the table of contents.
#[derive(Debug, Clone)]
pub struct ReportHeader {
    pub generated_at: NaiveDateTime,
    pub source_dir: PathBuf,
    pub file_types: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn extensions_gain_a_leading_dot() {
        let sel = ExtensionSelection::from_args(&args(&["py", ".JS", "py"]));
        assert_eq!(
            sel,
            ExtensionSelection::Listed(vec![".py".to_string(), ".js".to_string()])
        );
        assert_eq!(sel.describe(), ".py, .js");
        assert_eq!(sel.file_name_part(), "py-js");
    }

    #[test]
    fn all_keyword_is_case_insensitive() {
        let sel = ExtensionSelection::from_args(&args(&["ALL"]));
        assert_eq!(sel, ExtensionSelection::All);
        assert_eq!(sel.file_name_part(), "all");
        assert_eq!(sel.describe(), "All supported types");
        assert_eq!(sel.suffixes(), extensions::all_suffixes());
    }

    #[test]
    fn all_mixed_with_other_extensions_is_not_the_shortcut() {
        let sel = ExtensionSelection::from_args(&args(&["weird", "all"]));
        assert_eq!(
            sel,
            ExtensionSelection::Listed(vec![".weird".to_string(), ".all".to_string()])
        );
        assert!(sel.suffixes().contains(&".weird".to_string()));
    }

    #[test]
    fn compound_suffix_keeps_inner_dots_in_name() {
        let sel = ExtensionSelection::from_args(&args(&["tar.gz"]));
        assert_eq!(sel.suffixes(), vec![".tar.gz".to_string()]);
        assert_eq!(sel.file_name_part(), "tar.gz");
    }

    #[test]
    fn anchor_replaces_spaces_and_separators() {
        let entry = FileEntry {
            path: PathBuf::from("/root/src/my file.rs"),
            relative_path: "src/my file.rs".to_string(),
        };
        assert_eq!(entry.anchor(), "src-my-file.rs");
    }
}
