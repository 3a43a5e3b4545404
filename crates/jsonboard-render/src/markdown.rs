use crate::text::format_size;
use jsonboard_types::{DataPath, FileSummary, HealthReport};
use time::format_description::well_known::Rfc3339;

pub fn render_files_markdown(files: &[FileSummary]) -> String {
    let mut out = String::new();
    out.push_str("# JSON files\n\n");

    if files.is_empty() {
        out.push_str("No JSON files found.\n");
        return out;
    }

    out.push_str("| File | Kind | Records | Size | Last modified |\n");
    out.push_str("|---|---|---:|---:|---|\n");
    for f in files {
        let m = &f.metadata;
        let modified = m
            .last_modified
            .and_then(|t| t.format(&Rfc3339).ok())
            .unwrap_or_else(|| "-".to_string());
        match &m.error {
            Some(err) => out.push_str(&format!(
                "| `{}` | error: {} | - | {} | {} |\n",
                f.relative_path,
                err,
                format_size(m.size),
                modified
            )),
            None => out.push_str(&format!(
                "| `{}` | {} | {} | {} | {} |\n",
                f.relative_path,
                if m.is_array { "array" } else { "object" },
                m.record_count,
                format_size(m.size),
                modified
            )),
        }
    }
    out
}

pub fn render_health_markdown(reports: &[(DataPath, HealthReport)]) -> String {
    let mut out = String::new();
    out.push_str("# Jsonboard health report\n\n");

    let flagged = reports.iter().filter(|(_, r)| r.has_issues).count();
    out.push_str(&format!(
        "- Files: {}\n- With issues: {}\n\n",
        reports.len(),
        flagged
    ));

    if flagged == 0 {
        out.push_str("No issues.\n");
        return out;
    }

    out.push_str("## Issues\n\n");
    for (path, report) in reports.iter().filter(|(_, r)| r.has_issues) {
        out.push_str(&format!("### `{path}`\n\n"));
        for issue in &report.issues {
            out.push_str(&format!("- {issue}\n"));
        }
        if !report.suggestions.is_empty() {
            out.push('\n');
            for suggestion in &report.suggestions {
                out.push_str(&format!("> {suggestion}\n"));
            }
        }
        out.push('\n');
    }
    out
}
