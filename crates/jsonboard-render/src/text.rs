use jsonboard_domain::shape::ShapeNode;
use jsonboard_types::{DataPath, FileSummary, HealthReport, ValidationResult};

/// `512 B`, `1.5 KB`, `2.0 MB`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

/// One line per file: path, kind, record count, size.
pub fn render_file_list(files: &[FileSummary]) -> String {
    if files.is_empty() {
        return "No JSON files found.\n".to_string();
    }

    let width = files
        .iter()
        .map(|f| f.relative_path.as_str().len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for f in files {
        let m = &f.metadata;
        let detail = match &m.error {
            Some(err) => format!("error: {err}"),
            None => {
                let kind = if m.is_array { "array" } else { "object" };
                let noun = if m.record_count == 1 { "record" } else { "records" };
                format!(
                    "{kind:<6}  {:>6} {noun:<7}  {:>9}",
                    m.record_count,
                    format_size(m.size)
                )
            }
        };
        out.push_str(&format!(
            "{:<width$}  {}\n",
            f.relative_path.as_str(),
            detail.trim_end()
        ));
    }
    out
}

pub fn render_validation(path: &DataPath, result: &ValidationResult) -> String {
    if result.valid {
        return format!("{path}: valid\n");
    }
    let mut out = format!("{path}: {} issue(s)\n", result.errors.len());
    for issue in &result.errors {
        out.push_str(&format!("  - {}\n", issue.dotted()));
    }
    out
}

/// Top-level label, then one line per field of the record object (the array element for
/// array files).
pub fn render_shape(path: &DataPath, shape: &ShapeNode) -> String {
    let mut out = format!("{path}: {}\n", shape.describe());
    let record = match shape {
        ShapeNode::Array { element } => element.as_ref(),
        other => other,
    };
    if let ShapeNode::Object { fields } = record {
        for field in fields {
            out.push_str(&format!("  {}: {}\n", field.name, field.shape.describe()));
        }
    }
    out
}

pub fn render_health_text(reports: &[(DataPath, HealthReport)]) -> String {
    let mut out = String::new();
    for (path, report) in reports {
        if !report.has_issues {
            out.push_str(&format!("{path}: healthy\n"));
            continue;
        }
        out.push_str(&format!("{path}:\n"));
        for issue in &report.issues {
            out.push_str(&format!("  issue: {issue}\n"));
        }
        for suggestion in &report.suggestions {
            out.push_str(&format!("  suggestion: {suggestion}\n"));
        }
    }
    out
}
