use crate::AuditReport;
use colored::Colorize;

const TITLE: &str = "Missing/Duplicate Locale Values";

/// A row of the audit table: either three columns or one spanning cell
enum Row {
    Cells([String; 3]),
    Span(String),
    Separator,
}

/// Formatter for rendering an audit report as a borderless text table
pub struct TableFormatter {
    color: bool,
}

impl TableFormatter {
    /// Create a new TableFormatter with colored headings
    pub fn new() -> Self {
        Self { color: true }
    }

    /// Create a TableFormatter with or without colored headings
    pub fn with_color(color: bool) -> Self {
        Self { color }
    }

    /// Format an audit report as a table
    pub fn format(&self, report: &AuditReport) -> String {
        let mut rows = vec![
            Row::Span(format!(
                "LOCALES SEARCHED: |{}|",
                report.target_locales.join("|")
            )),
            Row::Span(format!(
                "USING | {} | FOR TRANSLATION PREVIEW AND COMPARISON",
                report.base_locale
            )),
            Row::Separator,
        ];

        if !report.options.skip_empty_check {
            self.push_section(
                &mut rows,
                "EMPTY VALUES",
                "TRANSLATION PREVIEW",
                report.result.empty_values.iter(),
                report,
            );
        }

        if !report.options.skip_duplicate_check {
            self.push_section(
                &mut rows,
                "DUPLICATE VALUES",
                "DUPLICATE VALUE",
                report.result.duplicate_values.iter(),
                report,
            );
        }

        self.render(&rows)
    }

    fn push_section<'a>(
        &self,
        rows: &mut Vec<Row>,
        heading: &str,
        value_header: &str,
        files: impl Iterator<Item = (&'a String, &'a crate::FlatMap)>,
        report: &AuditReport,
    ) {
        rows.push(Row::Span(heading.to_string()));
        rows.push(Row::Separator);
        rows.push(Row::Cells([
            "FILE PATH".to_string(),
            "KEY".to_string(),
            value_header.to_string(),
        ]));
        rows.push(Row::Separator);

        let start = rows.len();
        for (file, flat) in files {
            for key in flat.keys() {
                rows.push(Row::Cells([
                    file.clone(),
                    key.clone(),
                    report.preview(key).to_string(),
                ]));
            }
        }
        if rows.len() == start {
            rows.push(Row::Span("none".to_string()));
        }
        rows.push(Row::Separator);
    }

    /// Lay rows out with every column padded to its widest cell
    fn render(&self, rows: &[Row]) -> String {
        let mut widths = [0usize; 3];
        for row in rows {
            if let Row::Cells(cells) = row {
                for (width, cell) in widths.iter_mut().zip(cells) {
                    *width = (*width).max(cell.chars().count());
                }
            }
        }

        let mut output = String::new();
        output.push_str(&self.heading(TITLE));
        output.push('\n');
        output.push_str(&"=".repeat(TITLE.len()));
        output.push_str("\n\n");

        for row in rows {
            let line = match row {
                Row::Cells(cells) => {
                    let padded: Vec<String> = cells
                        .iter()
                        .zip(widths)
                        .map(|(cell, width)| {
                            let pad = width.saturating_sub(cell.chars().count());
                            format!("{}{}", cell, " ".repeat(pad))
                        })
                        .collect();
                    padded.join("  ").trim_end().to_string()
                }
                Row::Span(text) => self.heading(text),
                Row::Separator => widths
                    .iter()
                    .map(|w| "-".repeat((*w).max(1)))
                    .collect::<Vec<_>>()
                    .join("  "),
            };
            output.push(' ');
            output.push_str(&line);
            output.push('\n');
        }

        output
    }

    fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AuditOptions, AuditResult, FlatMap, LocaleValue};
    use std::collections::BTreeMap;

    fn report(options: AuditOptions) -> AuditReport {
        let mut empty = FlatMap::new();
        empty.insert("farewell".to_string(), LocaleValue::text(""));
        let mut duplicates = FlatMap::new();
        duplicates.insert("greeting".to_string(), LocaleValue::text("Hello"));

        let mut result = AuditResult::default();
        result
            .empty_values
            .insert("core/locale/en_US/messages.json".to_string(), empty);
        result
            .duplicate_values
            .insert("core/locale/fr_FR/messages.json".to_string(), duplicates);

        let mut previews = BTreeMap::new();
        previews.insert("farewell".to_string(), String::new());
        previews.insert("greeting".to_string(), "Hello".to_string());

        AuditReport {
            base_locale: "en_US".to_string(),
            target_locales: vec!["fr_FR".to_string(), "es_ES".to_string()],
            options,
            result,
            previews,
        }
    }

    #[test]
    fn test_table_headers() {
        let output = TableFormatter::with_color(false).format(&report(AuditOptions::default()));
        assert!(output.starts_with("Missing/Duplicate Locale Values\n"));
        assert!(output.contains("LOCALES SEARCHED: |fr_FR|es_ES|"));
        assert!(output.contains("USING | en_US | FOR TRANSLATION PREVIEW AND COMPARISON"));
        assert!(output.contains("EMPTY VALUES"));
        assert!(output.contains("DUPLICATE VALUES"));
    }

    #[test]
    fn test_table_rows_are_aligned() {
        let output = TableFormatter::with_color(false).format(&report(AuditOptions::default()));
        let row = output
            .lines()
            .find(|line| line.contains("fr_FR/messages.json"))
            .unwrap();
        assert_eq!(row, " core/locale/fr_FR/messages.json  greeting  Hello");

        let header = output
            .lines()
            .find(|line| line.contains("DUPLICATE VALUE") && line.contains("KEY"))
            .unwrap();
        assert_eq!(header.find("KEY"), row.find("greeting"));
    }

    #[test]
    fn test_skipped_sections_are_omitted() {
        let options = AuditOptions {
            skip_empty_check: true,
            skip_duplicate_check: false,
        };
        let output = TableFormatter::with_color(false).format(&report(options));
        assert!(!output.contains("EMPTY VALUES"));
        assert!(output.contains("DUPLICATE VALUES"));
    }

    #[test]
    fn test_empty_section_says_none() {
        let mut clean = report(AuditOptions::default());
        clean.result = AuditResult::default();
        let output = TableFormatter::with_color(false).format(&clean);
        assert_eq!(output.lines().filter(|line| line.trim() == "none").count(), 2);
    }
}
