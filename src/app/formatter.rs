use crate::app::error::ExtractError;
use crate::app::extensions::label_for;
use crate::app::models::{FileEntry, ReportHeader};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Outcome of a render that reached the end of the document.
#[derive(Debug, Default)]
pub struct RenderSummary {
    pub files_written: usize,
    /// Files whose section holds an inline error instead of content.
    pub unreadable: Vec<ExtractError>,
}

/// Streams the Markdown report section by section.
///
/// The table of contents, the file sections and the summary all iterate the
/// same slice, so anchors always point at the matching section.
pub struct ReportWriter<W: Write> {
    out: W,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn render(
        &mut self,
        header: &ReportHeader,
        entries: &[FileEntry],
    ) -> io::Result<RenderSummary> {
        self.write_header(header)?;
        self.write_table_of_contents(entries)?;
        let summary = self.write_sections(entries)?;
        self.write_summary(entries)?;
        self.out.flush()?;
        Ok(summary)
    }

    fn write_header(&mut self, header: &ReportHeader) -> io::Result<()> {
        writeln!(self.out, "# Files Concatenation Report\n")?;
        writeln!(
            self.out,
            "Generated on: {}\n",
            header.generated_at.format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(self.out, "Source directory: {}", header.source_dir.display())?;
        writeln!(self.out, "File types: {}\n", header.file_types)?;
        writeln!(self.out, "---\n")?;
        Ok(())
    }

    fn write_table_of_contents(&mut self, entries: &[FileEntry]) -> io::Result<()> {
        writeln!(self.out, "## Table of Contents\n")?;
        for entry in entries {
            writeln!(self.out, "- [{}](#{})", entry.relative_path, entry.anchor())?;
        }
        writeln!(self.out, "\n---\n")?;
        Ok(())
    }

    fn write_sections(&mut self, entries: &[FileEntry]) -> io::Result<RenderSummary> {
        let mut summary = RenderSummary::default();

        for entry in entries {
            writeln!(
                self.out,
                "## <a id='{}'></a>File: {}",
                entry.anchor(),
                entry.relative_path
            )?;
            writeln!(self.out, "**Full Path**: `{}`\n", entry.path.display())?;
            writeln!(self.out, "```{}", label_for(&entry.path))?;

            match fs::read_to_string(&entry.path) {
                Ok(content) => self.out.write_all(content.as_bytes())?,
                Err(source) => {
                    let err = ExtractError::FileRead {
                        path: entry.path.clone(),
                        source,
                    };
                    log::warn!("⚠️ {}: {}", entry.relative_path, err);
                    write!(self.out, "{}", err)?;
                    summary.unreadable.push(err);
                }
            }

            writeln!(self.out, "\n```\n")?;
            writeln!(self.out, "---\n")?;
            summary.files_written += 1;
        }

        Ok(summary)
    }

    fn write_summary(&mut self, entries: &[FileEntry]) -> io::Result<()> {
        writeln!(self.out, "## Summary")?;
        writeln!(self.out, "Total files processed: {}\n", entries.len())?;
        writeln!(self.out, "### Files List:")?;
        for entry in entries {
            writeln!(self.out, "- {}", entry.relative_path)?;
        }
        Ok(())
    }
}

/// Creates the parent directory, then renders the report into `path`.
pub fn write_report(
    path: &Path,
    header: &ReportHeader,
    entries: &[FileEntry],
) -> Result<RenderSummary, ExtractError> {
    let output_error = |source: io::Error| ExtractError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(output_error)?;
    }

    let file = File::create(path).map_err(output_error)?;
    let mut writer = ReportWriter::new(BufWriter::new(file));
    writer.render(header, entries).map_err(output_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn header(source_dir: &Path) -> ReportHeader {
        ReportHeader {
            generated_at: NaiveDate::from_ymd_opt(2024, 1, 2)
                .unwrap()
                .and_hms_opt(3, 4, 5)
                .unwrap(),
            source_dir: source_dir.to_path_buf(),
            file_types: ".py".to_string(),
        }
    }

    fn entry(root: &Path, rel: &str, content: &[u8]) -> FileEntry {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        FileEntry {
            path,
            relative_path: rel.to_string(),
        }
    }

    fn render_to_string(header: &ReportHeader, entries: &[FileEntry]) -> (String, RenderSummary) {
        let mut buf = Vec::new();
        let summary = ReportWriter::new(&mut buf).render(header, entries).unwrap();
        (String::from_utf8(buf).unwrap(), summary)
    }

    #[test]
    fn renders_full_document_layout() {
        let dir = tempdir().unwrap();
        let a = entry(dir.path(), "a.py", b"print('a')");
        let b = entry(dir.path(), "sub/b c.py", b"x = 1\n");

        let (doc, summary) = render_to_string(&header(dir.path()), &[a.clone(), b.clone()]);

        let expected = format!(
            "# Files Concatenation Report\n\n\
             Generated on: 2024-01-02 03:04:05\n\n\
             Source directory: {root}\n\
             File types: .py\n\n\
             ---\n\n\
             ## Table of Contents\n\n\
             - [a.py](#a.py)\n\
             - [sub/b c.py](#sub-b-c.py)\n\
             \n---\n\n\
             ## <a id='a.py'></a>File: a.py\n\
             **Full Path**: `{a}`\n\n\
             ```python\n\
             print('a')\n\
             ```\n\n\
             ---\n\n\
             ## <a id='sub-b-c.py'></a>File: sub/b c.py\n\
             **Full Path**: `{b}`\n\n\
             ```python\n\
             x = 1\n\n\
             ```\n\n\
             ---\n\n\
             ## Summary\n\
             Total files processed: 2\n\n\
             ### Files List:\n\
             - a.py\n\
             - sub/b c.py\n",
            root = dir.path().display(),
            a = a.path.display(),
            b = b.path.display(),
        );
        assert_eq!(doc, expected);
        assert_eq!(summary.files_written, 2);
        assert!(summary.unreadable.is_empty());
    }

    #[test]
    fn toc_sections_and_summary_share_order() {
        let dir = tempdir().unwrap();
        let entries = vec![
            entry(dir.path(), "a.rs", b"1"),
            entry(dir.path(), "m/n.rs", b"2"),
            entry(dir.path(), "z.rs", b"3"),
        ];
        let (doc, _) = render_to_string(&header(dir.path()), &entries);

        let positions = |needle: &str| -> Vec<usize> {
            entries
                .iter()
                .map(|e| doc.find(&needle.replace("{}", &e.anchor())).unwrap())
                .collect()
        };
        let toc = positions("](#{})");
        let sections = positions("<a id='{}'>");
        assert!(toc.windows(2).all(|w| w[0] < w[1]));
        assert!(sections.windows(2).all(|w| w[0] < w[1]));

        let list_start = doc.find("### Files List:").unwrap();
        let listed: Vec<&str> = doc[list_start..]
            .lines()
            .filter_map(|l| l.strip_prefix("- "))
            .collect();
        assert_eq!(listed, vec!["a.rs", "m/n.rs", "z.rs"]);
    }

    #[test]
    fn unreadable_files_become_inline_errors() {
        let dir = tempdir().unwrap();
        let bad = entry(dir.path(), "bad.txt", &[0xff, 0xfe, 0x00, 0x80]);
        let gone = FileEntry {
            path: dir.path().join("gone.txt"),
            relative_path: "gone.txt".to_string(),
        };
        let good = entry(dir.path(), "ok.txt", b"fine");

        let (doc, summary) = render_to_string(&header(dir.path()), &[bad, gone, good]);

        assert_eq!(summary.files_written, 3);
        assert_eq!(summary.unreadable.len(), 2);
        assert_eq!(doc.matches("```plaintext\nError reading file: ").count(), 2);
        assert!(doc.contains("```plaintext\nfine\n```"));
        assert!(doc.contains("Total files processed: 3"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let dir = tempdir().unwrap();
        let entries = vec![entry(dir.path(), "a.md", b"# hi\n"), entry(dir.path(), "b.md", b"")];
        let (first, _) = render_to_string(&header(dir.path()), &entries);
        let (second, _) = render_to_string(&header(dir.path()), &entries);
        assert_eq!(first, second);
    }

    #[test]
    fn write_report_creates_output_directory() {
        let dir = tempdir().unwrap();
        let entries = vec![entry(dir.path(), "src/a.py", b"pass\n")];
        let out = dir.path().join("export").join("nested").join("report.md");

        let summary = write_report(&out, &header(dir.path()), &entries).unwrap();

        assert_eq!(summary.files_written, 1);
        let doc = fs::read_to_string(&out).unwrap();
        assert!(doc.starts_with("# Files Concatenation Report\n"));
        assert!(doc.ends_with("- src/a.py\n"));
    }

    #[test]
    fn unwritable_output_is_output_write_error() {
        let dir = tempdir().unwrap();
        // A directory sits where the report file should go.
        let out = dir.path().join("taken");
        fs::create_dir(&out).unwrap();

        let err = write_report(&out, &header(dir.path()), &[]).unwrap_err();
        assert!(matches!(err, ExtractError::OutputWrite { path, .. } if path == out));
    }
}
