use crate::AuditReport;

/// Formatter for simple, machine-readable output: `kind:file:key:preview`
pub struct SimpleFormatter;

impl SimpleFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Format an audit report, one line per reported key
    pub fn format(&self, report: &AuditReport) -> String {
        let mut output = String::new();

        let sections = [
            ("empty", &report.result.empty_values),
            ("duplicate", &report.result.duplicate_values),
        ];
        for (kind, files) in sections {
            for (file, flat) in files {
                for key in flat.keys() {
                    let line = format!(
                        "{}:{}:{}:{}",
                        kind,
                        file,
                        key,
                        report.preview(key).replace('\n', " ")
                    );
                    output.push_str(&line);
                    output.push('\n');
                }
            }
        }

        output
    }
}

impl Default for SimpleFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AuditOptions, AuditResult, FlatMap, LocaleValue};
    use std::collections::BTreeMap;

    fn empty_report() -> AuditReport {
        AuditReport {
            base_locale: "en_US".to_string(),
            target_locales: vec!["fr_FR".to_string()],
            options: AuditOptions::default(),
            result: AuditResult::default(),
            previews: BTreeMap::new(),
        }
    }

    #[test]
    fn test_format_duplicate_entry() {
        let mut report = empty_report();
        let mut flat = FlatMap::new();
        flat.insert("app.title".to_string(), LocaleValue::text("My App"));
        report
            .result
            .duplicate_values
            .insert("core/locale/fr_FR/messages.json".to_string(), flat);
        report
            .previews
            .insert("app.title".to_string(), "My App".to_string());

        let output = SimpleFormatter::new().format(&report);
        assert_eq!(
            output,
            "duplicate:core/locale/fr_FR/messages.json:app.title:My App\n"
        );
    }

    #[test]
    fn test_format_empty_before_duplicates() {
        let mut report = empty_report();
        let mut empty = FlatMap::new();
        empty.insert("farewell".to_string(), LocaleValue::null());
        let mut duplicate = FlatMap::new();
        duplicate.insert("greeting".to_string(), LocaleValue::text("Hello\nthere"));
        report
            .result
            .empty_values
            .insert("core/locale/en_US/a.json".to_string(), empty);
        report
            .result
            .duplicate_values
            .insert("core/locale/fr_FR/a.json".to_string(), duplicate);
        report
            .previews
            .insert("greeting".to_string(), "Hello\nthere".to_string());

        let output = SimpleFormatter::new().format(&report);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "empty:core/locale/en_US/a.json:farewell:farewell",
                "duplicate:core/locale/fr_FR/a.json:greeting:Hello there",
            ]
        );
    }

    #[test]
    fn test_format_clean_report_is_empty() {
        assert_eq!(SimpleFormatter::new().format(&empty_report()), "");
    }
}
