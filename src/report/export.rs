//! Report export: CSV and a Word-compatible HTML document.

use std::fmt::Write as _;
use std::str::FromStr;

use super::Report;
use crate::model::format_iso_date;

/// Download format for a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Word,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Word => "doc",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" | "excel" => Ok(ExportFormat::Csv),
            "doc" | "word" => Ok(ExportFormat::Word),
            _ => Err(format!(
                "Invalid export format '{}'. Valid formats: csv, doc",
                s
            )),
        }
    }
}

/// `tasks_report_<period>_<reference>.<ext>`
pub fn export_file_name(report: &Report, format: ExportFormat) -> String {
    format!(
        "tasks_report_{}_{}.{}",
        report.period.as_str().to_ascii_lowercase(),
        format_iso_date(report.reference),
        format.extension()
    )
}

pub fn render(report: &Report, format: ExportFormat) -> String {
    match format {
        ExportFormat::Csv => to_csv(report),
        ExportFormat::Word => to_word_html(report),
    }
}

fn csv_quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

pub fn to_csv(report: &Report) -> String {
    let mut out = String::from("ID,Title,Description,Date,Status,Remarks");
    for task in &report.tasks {
        out.push('\n');
        out.push_str(
            &[
                task.id.clone(),
                csv_quote(&task.title),
                csv_quote(&task.description),
                task.date.clone(),
                task.status.to_string(),
                csv_quote(&task.remarks),
            ]
            .join(","),
        );
    }
    out
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// HTML that Word opens as a document; starts with a UTF-8 BOM
pub fn to_word_html(report: &Report) -> String {
    let mut out = String::from('\u{feff}');
    out.push_str(
        "<html xmlns:o='urn:schemas-microsoft-com:office:office' \
         xmlns:w='urn:schemas-microsoft-com:office:word' \
         xmlns='http://www.w3.org/TR/REC-html40'>\n",
    );
    out.push_str("<head>\n<title>Task Report</title>\n<style>\n");
    out.push_str("body { font-family: Arial, sans-serif; }\n");
    out.push_str("table { border-collapse: collapse; width: 100%; }\n");
    out.push_str("th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }\n");
    out.push_str("th { background-color: #f2f2f2; }\n");
    out.push_str(".status { font-weight: bold; }\n");
    out.push_str("</style>\n</head>\n<body>\n");

    // Writing into a String cannot fail
    let _ = writeln!(out, "<h1>Task Report - {}</h1>", report.period);
    let _ = writeln!(out, "<h3>Period: {}</h3>", escape_html(&report.label));
    out.push_str("<table>\n");
    out.push_str(
        "<tr><th>Title</th><th>Date</th><th>Status</th><th>Description</th><th>Remarks</th></tr>\n",
    );
    for task in &report.tasks {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td class=\"status\">{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&task.title),
            escape_html(&task.date),
            task.status,
            escape_html(&task.description),
            escape_html(&task.remarks)
        );
    }
    out.push_str("</table>\n</body>\n</html>\n");
    out
}
