use crate::app::models::{MergeConfig, SourceFile, TraversalEntry};
use ignore::WalkBuilder;
use pathdiff::diff_paths;
use std::collections::{BTreeSet, HashMap};
use std::path::{Component, Path, PathBuf};

/// True when any segment of `path` is exactly one of the ignored names.
/// Callers pass paths relative to the scan root, so the root's own
/// ancestors never count.
pub fn should_ignore(path: &Path, ignore_dirs: &BTreeSet<String>) -> bool {
    path.components().any(|component| match component {
        Component::Normal(name) => name
            .to_str()
            .is_some_and(|name| ignore_dirs.contains(name)),
        _ => false,
    })
}

pub struct Scanner<'a> {
    config: &'a MergeConfig,
}

impl<'a> Scanner<'a> {
    pub fn new(config: &'a MergeConfig) -> Self {
        Self { config }
    }

    /// Walks the tree once and groups files under the directory that holds
    /// them. Directories come out in depth-first pre-order, names sorted at
    /// every level. Ignored directories are pruned, not descended.
    pub fn walk(&self) -> Vec<TraversalEntry> {
        let root = self.config.directory.clone();
        let ignore_dirs = self.config.ignore_dirs.clone();

        // Only the ignore set decides what is skipped, so every implicit
        // filter of the walker (hidden files, .gitignore, ...) is off.
        let walker = WalkBuilder::new(&self.config.directory)
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                    return true;
                }
                let relative = entry.path().strip_prefix(&root).unwrap_or(entry.path());
                !should_ignore(relative, &ignore_dirs)
            })
            .build();

        let mut entries: Vec<TraversalEntry> = Vec::new();
        let mut index: HashMap<PathBuf, usize> = HashMap::new();

        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("Error walking entry: {}", err);
                    continue;
                }
            };

            let path = entry.path();
            if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                log::trace!("Entering {}", path.display());
                index.insert(path.to_path_buf(), entries.len());
                entries.push(TraversalEntry {
                    path: path.to_path_buf(),
                    depth: entry.depth(),
                    files: Vec::new(),
                });
                continue;
            }

            // Symlinked directories are neither followed nor listed.
            if path.is_dir() {
                log::debug!("Skipping symlinked directory {}", path.display());
                continue;
            }

            let parent = path.parent().and_then(|p| index.get(p));
            match parent {
                Some(&i) => entries[i]
                    .files
                    .push(entry.file_name().to_string_lossy().into_owned()),
                None => log::debug!("Skipping {} (not inside a directory)", path.display()),
            }
        }

        log::debug!(
            "Walked {} directories under {}",
            entries.len(),
            self.config.directory.display()
        );
        entries
    }

    /// Indented listing of the tree; the first line is always the bare root name.
    pub fn directory_listing(&self) -> Vec<String> {
        let entries = self.walk();
        let mut lines = vec![format!("{}/", self.config.root_name())];

        for entry in &entries {
            if entry.depth > 0 {
                let name = entry.path.file_name().unwrap_or_default().to_string_lossy();
                lines.push(format!("{}{}/", "  ".repeat(entry.depth), name));
            }
            let file_indent = "  ".repeat(entry.depth + 1);
            for file in &entry.files {
                lines.push(format!("{}{}", file_indent, file));
            }
        }

        lines
    }

    /// Files whose name ends with one of the configured extensions, in walk order.
    pub fn source_files(&self) -> Vec<SourceFile> {
        let root_name = self.config.root_name();
        let mut files = Vec::new();

        for entry in self.walk() {
            for name in &entry.files {
                let Some(ext) = self.config.matching_extension(name) else {
                    continue;
                };
                let path = entry.path.join(name);
                if path == self.config.output_abs {
                    log::debug!("Not merging the output file {}", path.display());
                    continue;
                }
                let Some(relative) = diff_paths(&path, &self.config.directory) else {
                    continue;
                };
                log::trace!("{} matched '{}'", path.display(), ext);

                files.push(SourceFile {
                    relative_path: Path::new(&root_name)
                        .join(relative)
                        .to_string_lossy()
                        .into_owned(),
                    path,
                });
            }
        }

        files
    }
}
