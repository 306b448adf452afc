use crate::domain::{ChecksumReport, ComparisonResult, FileHashComparison};
use crate::ports::OutputPort;
use anyhow::Result;
use std::path::Path;

struct OutputWriter {
    output_file: Option<String>,
}

impl OutputWriter {
    fn new() -> Self {
        Self { output_file: None }
    }

    fn with_file(path: &Path) -> Result<Self> {
        Ok(Self {
            output_file: Some(path.to_string_lossy().to_string()),
        })
    }

    fn write_content(&self, content: &str) -> Result<()> {
        match &self.output_file {
            Some(path) => {
                std::fs::write(path, content)?;
            }
            None => {
                print!("{}", content);
            }
        }
        Ok(())
    }
}

/// Line-oriented output: a `<ALGO>SUM:` header, one `<hexdigest> <path>`
/// line per valid file, then the invalid-files section unless suppressed.
pub struct ConsoleOutputAdapter {
    show_invalid: bool,
}

impl ConsoleOutputAdapter {
    pub fn new() -> Self {
        Self { show_invalid: true }
    }

    pub fn with_show_invalid(mut self, show_invalid: bool) -> Self {
        self.show_invalid = show_invalid;
        self
    }

    fn format_report(&self, report: &ChecksumReport) -> String {
        let mut output = String::new();

        if !report.sums.is_empty() {
            output.push_str(&format!("{}SUM:\n", report.algorithm));
            for sum in &report.sums {
                output.push_str(&format!("{} {}\n", sum.hash_sum, sum.filename));
            }
        }

        self.push_invalid_section(&mut output, report);
        output
    }

    fn format_comparisons(&self, report: &ChecksumReport, comparisons: &[FileHashComparison]) -> String {
        let mut output = String::new();

        if !comparisons.is_empty() {
            output.push_str(&format!("{}SUM check:\n", report.algorithm));
            for comparison in comparisons {
                let verdict = match comparison.result {
                    ComparisonResult::Match => "MATCH",
                    ComparisonResult::NotMatch => "NOT MATCH",
                };
                output.push_str(&format!(" {} -> {}\n", comparison.filename, verdict));
            }
        }

        self.push_invalid_section(&mut output, report);
        output
    }

    fn push_invalid_section(&self, output: &mut String, report: &ChecksumReport) {
        if !report.invalid_files.is_empty() && self.show_invalid {
            output.push_str("\nInvalid Files:\n");
            for invalid in &report.invalid_files {
                output.push_str(&format!(" {} -> {}\n", invalid.path, invalid.reason));
            }
            output.push('\n');
        }
    }

    pub fn write_comparisons(&self, report: &ChecksumReport, comparisons: &[FileHashComparison]) -> Result<()> {
        print!("{}", self.format_comparisons(report, comparisons));
        Ok(())
    }
}

impl Default for ConsoleOutputAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputPort for ConsoleOutputAdapter {
    fn write_report(&self, report: &ChecksumReport) -> Result<()> {
        print!("{}", self.format_report(report));
        Ok(())
    }
}

pub struct JsonOutputAdapter {
    writer: OutputWriter,
}

impl JsonOutputAdapter {
    pub fn with_file(path: &Path) -> Result<Self> {
        Ok(Self {
            writer: OutputWriter::with_file(path)?,
        })
    }

    pub fn with_stdout() -> Self {
        Self {
            writer: OutputWriter::new(),
        }
    }

    pub fn write_comparisons(&self, comparisons: &[FileHashComparison]) -> Result<()> {
        let json = serde_json::to_string_pretty(comparisons)?;
        self.writer.write_content(&format!("{}\n", json))
    }
}

impl OutputPort for JsonOutputAdapter {
    fn write_report(&self, report: &ChecksumReport) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_content(&format!("{}\n", json))
    }
}
