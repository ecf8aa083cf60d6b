use crate::app::models::{MergeConfig, MergeSummary, SourceFile};
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;

const RULE_WIDTH: usize = 80;

pub struct OutputGenerator;

impl OutputGenerator {
    fn rule() -> String {
        "=".repeat(RULE_WIDTH)
    }

    /// Writes the whole document: listing segment, then every source file.
    pub fn write_document<W: Write>(
        out: &mut W,
        listing: &[String],
        files: &[SourceFile],
    ) -> Result<MergeSummary> {
        Self::write_listing(out, listing).context("Failed to write directory listing")?;
        Self::merge_files(out, files)
    }

    pub fn write_listing<W: Write>(out: &mut W, listing: &[String]) -> std::io::Result<()> {
        writeln!(out, "Project Directory Structure:")?;
        writeln!(out, "============================\n")?;
        write!(out, "{}", listing.join("\n"))?;
        write!(out, "\n\n")?;
        writeln!(out, "{}\n", Self::rule())?;
        writeln!(out, "Project Files Content:")?;
        writeln!(out, "======================\n")?;
        Ok(())
    }

    /// Appends a banner and the content of each file. A file that cannot be
    /// read gets an `ERROR:` line instead and is left out of the count.
    pub fn merge_files<W: Write>(out: &mut W, files: &[SourceFile]) -> Result<MergeSummary> {
        let mut summary = MergeSummary::default();

        for file in files {
            writeln!(out, "{}", Self::rule())?;
            writeln!(out, "File: {}", file.relative_path)?;
            writeln!(out, "{}\n", Self::rule())?;

            match fs::read_to_string(&file.path) {
                Ok(content) => {
                    write!(out, "{}\n\n", content)?;
                    summary.merged += 1;
                    log::debug!("Merged {}", file.relative_path);
                }
                Err(e) => {
                    writeln!(
                        out,
                        "ERROR: Unable to read file {}. Error: {}\n",
                        file.relative_path, e
                    )?;
                    summary.failed += 1;
                    log::warn!("Unable to read {}: {}", file.path.display(), e);
                }
            }
        }

        Ok(summary)
    }

    pub fn format_report(config: &MergeConfig, summary: &MergeSummary) -> String {
        let join = |set: &std::collections::BTreeSet<String>| {
            set.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
        };

        format!(
            "Project merger completed:\n\
             - Directory processed: {}\n\
             - Output file: {}\n\
             - File extensions included: {}\n\
             - Directories ignored: {}\n\
             - Total files processed: {}",
            config.directory.display(),
            config.output.display(),
            join(&config.extensions),
            join(&config.ignore_dirs),
            summary.merged
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::split_list;
    use std::path::{Path, PathBuf};

    fn source(path: PathBuf, relative: &str) -> SourceFile {
        SourceFile {
            path,
            relative_path: relative.to_string(),
        }
    }

    #[test]
    fn listing_segment_layout() {
        let mut out = Vec::new();
        let listing = vec!["demo/".to_string(), "  a.py".to_string()];
        OutputGenerator::write_listing(&mut out, &listing).unwrap();

        let expected = format!(
            "Project Directory Structure:\n\
             ============================\n\n\
             demo/\n  a.py\n\n\
             {}\n\n\
             Project Files Content:\n\
             ======================\n\n",
            "=".repeat(80)
        );
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn merged_file_block_layout() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("a.py");
        fs::write(&path, "x=1").unwrap();

        let mut out = Vec::new();
        let summary =
            OutputGenerator::merge_files(&mut out, &[source(path, "demo/a.py")]).unwrap();

        let rule = "=".repeat(80);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("{rule}\nFile: demo/a.py\n{rule}\n\nx=1\n\n")
        );
        assert_eq!(summary, MergeSummary { merged: 1, failed: 0 });
    }

    #[test]
    fn undecodable_file_is_reported_inline_and_not_counted() {
        let tmp = tempfile::tempdir().unwrap();
        let bad = tmp.path().join("bad.py");
        let good = tmp.path().join("good.py");
        fs::write(&bad, b"\xff\xfe\x00\x80").unwrap();
        fs::write(&good, "ok").unwrap();

        let mut out = Vec::new();
        let summary = OutputGenerator::merge_files(
            &mut out,
            &[source(bad, "t/bad.py"), source(good, "t/good.py")],
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(summary, MergeSummary { merged: 1, failed: 1 });
        assert!(text.contains("ERROR: Unable to read file t/bad.py. Error: "));
        assert!(text.contains("File: t/good.py"));
        assert!(text.ends_with("ok\n\n"));
    }

    #[test]
    fn missing_file_is_reported_inline() {
        let tmp = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        let summary = OutputGenerator::merge_files(
            &mut out,
            &[source(tmp.path().join("gone.md"), "t/gone.md")],
        )
        .unwrap();

        assert_eq!(summary.merged, 0);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("File: t/gone.md"));
        assert!(text.contains("ERROR: Unable to read file t/gone.md."));
    }

    #[test]
    fn report_lists_everything() {
        let config = MergeConfig {
            directory: PathBuf::from("/work/demo"),
            output: PathBuf::from("project.txt"),
            output_abs: Path::new("/work/demo").join("project.txt"),
            extensions: split_list(".py,.md"),
            ignore_dirs: split_list("build"),
        };
        let report =
            OutputGenerator::format_report(&config, &MergeSummary { merged: 2, failed: 1 });

        assert_eq!(
            report,
            "Project merger completed:\n\
             - Directory processed: /work/demo\n\
             - Output file: project.txt\n\
             - File extensions included: .md, .py\n\
             - Directories ignored: build\n\
             - Total files processed: 2"
        );
    }
}
