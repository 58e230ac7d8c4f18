use crate::app::error::ExtractError;
use crate::app::models::{FileEntry, ScanConfig};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::{DirEntry, WalkBuilder};
use pathdiff::diff_paths;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub struct Scanner {
    root: PathBuf,
    suffixes: Vec<String>,
    exclude_dirs: Vec<String>,
    exclude_files: GlobSet,
    respect_gitignore: bool,
}

impl Scanner {
    /// Resolves the root to an absolute path and compiles the exclusion globs.
    ///
    /// Fails with [`ExtractError::DirectoryAccess`] when the root is missing,
    /// not a directory, or cannot be listed.
    pub fn new(config: &ScanConfig) -> Result<Self, ExtractError> {
        let access_error = |source: io::Error| ExtractError::DirectoryAccess {
            path: config.root.clone(),
            source,
        };

        let root = fs::canonicalize(&config.root).map_err(access_error)?;
        if !root.is_dir() {
            return Err(access_error(io::Error::other("not a directory")));
        }
        fs::read_dir(&root).map_err(access_error)?;

        Ok(Self {
            root,
            suffixes: config.extensions.suffixes(),
            exclude_dirs: config.exclude_dirs.clone(),
            exclude_files: build_globset(&config.exclude_files)?,
            respect_gitignore: config.respect_gitignore,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walks the tree and returns matching files sorted by full path string.
    pub fn scan(&self) -> Vec<FileEntry> {
        let mut entries = Vec::new();

        log::info!("Scanning directory: {}", self.root.display());
        if !self.exclude_files.is_empty() {
            log::info!("Excluding files matching {} pattern(s)", self.exclude_files.len());
        }

        // Every entry is visited unless gitignore support was asked for.
        let mut builder = WalkBuilder::new(&self.root);
        builder.standard_filters(false).follow_links(false);
        if self.respect_gitignore {
            builder
                .git_ignore(true)
                .git_global(true)
                .git_exclude(true)
                .require_git(false);
        }

        let exclude_dirs = self.exclude_dirs.clone();
        builder.filter_entry(move |entry| !is_excluded_dir(entry, &exclude_dirs));

        for result in builder.build() {
            match result {
                Ok(entry) => {
                    if let Some(processed) = self.process_entry(&entry) {
                        entries.push(processed);
                    }
                }
                Err(err) => log::warn!("Error walking entry: {}", err),
            }
        }

        // Byte-wise on the whole path: "a.py" sorts before "a/b.py".
        entries.sort_by(|a, b| a.path.as_os_str().cmp(b.path.as_os_str()));
        log::info!("Total files found: {}", entries.len());
        entries
    }

    fn process_entry(&self, entry: &DirEntry) -> Option<FileEntry> {
        if entry.depth() == 0 || entry.file_type().map_or(true, |ft| ft.is_dir()) {
            return None;
        }
        // Symlinks count only when they resolve to a regular file.
        let path = entry.path();
        if !path.is_file() {
            return None;
        }

        let name = entry.file_name();
        if !self.matches_extension(&name.to_string_lossy()) {
            return None;
        }

        let relative = diff_paths(path, &self.root)?;
        let relative_path = relative.to_string_lossy().into_owned();

        if self.exclude_files.is_match(name) {
            log::info!("Excluded: {}", relative_path);
            return None;
        }

        log::info!("Found: {}", relative_path);
        Some(FileEntry {
            path: path.to_path_buf(),
            relative_path,
        })
    }

    fn matches_extension(&self, file_name: &str) -> bool {
        let lowered = file_name.to_lowercase();
        self.suffixes.iter().any(|suffix| lowered.ends_with(suffix.as_str()))
    }
}

/// The root is never pruned; other directories are pruned on a substring hit.
fn is_excluded_dir(entry: &DirEntry, exclude_dirs: &[String]) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_some_and(|ft| ft.is_dir()) {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    match exclude_dirs.iter().find(|ex| name.contains(ex.as_str())) {
        Some(ex) => {
            log::debug!("Pruned directory {} (matches {:?})", entry.path().display(), ex);
            true
        }
        None => false,
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet, ExtractError> {
    let invalid = |pat: &str, err: globset::Error| {
        ExtractError::config(format!("invalid exclude pattern `{}`: {}", pat, err))
    };

    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        builder.add(Glob::new(pat).map_err(|e| invalid(pat, e))?);
    }
    builder.build().map_err(|e| invalid(&patterns.join(" "), e))
}
