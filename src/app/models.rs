use std::collections::BTreeSet;
use std::path::PathBuf;

pub const DEFAULT_DIRECTORY: &str = ".";
pub const DEFAULT_OUTPUT: &str = "project.txt";
pub const DEFAULT_EXTENSIONS: &str = ".py,.md,.env_template,.bat,.sh";
pub const DEFAULT_IGNORE_DIRS: &str = ".git,.venv,venv,node_modules,__pycache__,build,dist";

/// The final configuration after merging CLI args, presets and defaults.
/// Never mutated once resolved.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Absolute path of the directory being scanned.
    pub directory: PathBuf,
    /// Output file, as given by the user.
    pub output: PathBuf,
    /// Output file made absolute, used to keep it out of its own merge.
    pub output_abs: PathBuf,
    pub extensions: BTreeSet<String>,
    pub ignore_dirs: BTreeSet<String>,
}

impl MergeConfig {
    /// Name of the root folder, used as the first listing line and as the
    /// prefix of every banner path.
    pub fn root_name(&self) -> String {
        self.directory
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// First configured suffix the file name ends with, if any.
    pub fn matching_extension(&self, file_name: &str) -> Option<&str> {
        self.extensions
            .iter()
            .find(|ext| file_name.ends_with(ext.as_str()))
            .map(String::as_str)
    }
}

/// One directory visited during a walk along with the files directly inside it.
#[derive(Debug)]
pub struct TraversalEntry {
    pub path: PathBuf,
    /// 0 for the root itself.
    pub depth: usize,
    pub files: Vec<String>,
}

/// A file selected for merging.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Root folder name joined with the path relative to the root.
    pub relative_path: String,
}

/// Outcome of the merge pass, used by the report.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct MergeSummary {
    pub merged: usize,
    pub failed: usize,
}
