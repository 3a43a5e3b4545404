use crate::infer::infer;
use crate::validate::{parse_failure, validate_value};
use jsonboard_types::ids::{
    ISSUE_DEEP_NESTING, ISSUE_LARGE_ARRAY, SUGGEST_FIX_SYNTAX, SUGGEST_FLATTEN,
    SUGGEST_NORMALIZE_RECORDS, SUGGEST_PAGINATE,
};
use jsonboard_types::{HealthReport, ValidationResult};
use serde_json::Value;

/// Depth above which a document is reported as deeply nested.
pub const MAX_HEALTHY_DEPTH: usize = 10;

/// Root array length above which a collection is reported as large.
pub const MAX_HEALTHY_ARRAY_LEN: usize = 1000;

/// Depth of the deepest leaf; the root is depth 0 and empty containers are leaves.
pub fn max_depth(value: &Value) -> usize {
    depth_at(value, 0)
}

fn depth_at(value: &Value, depth: usize) -> usize {
    match value {
        Value::Array(items) if !items.is_empty() => items
            .iter()
            .map(|v| depth_at(v, depth + 1))
            .max()
            .unwrap_or(depth),
        Value::Object(map) if !map.is_empty() => map
            .values()
            .map(|v| depth_at(v, depth + 1))
            .max()
            .unwrap_or(depth),
        _ => depth,
    }
}

/// Health of raw file text. Structural heuristics are skipped when the text does not parse.
pub fn check_health_text(text: &str) -> HealthReport {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => check_health_value(&value),
        Err(err) => {
            let mut report = HealthReport::default();
            push_validation(&mut report, &parse_failure(&err), SUGGEST_FIX_SYNTAX);
            finish(report)
        }
    }
}

/// Health of an already parsed document: self-validation plus depth and size heuristics.
pub fn check_health_value(value: &Value) -> HealthReport {
    let mut report = HealthReport::default();

    let validation = ValidationResult::from_issues(validate_value(value, &infer(value)));
    push_validation(&mut report, &validation, SUGGEST_NORMALIZE_RECORDS);

    if max_depth(value) > MAX_HEALTHY_DEPTH {
        report.issues.push(ISSUE_DEEP_NESTING.to_string());
        report.suggestions.push(SUGGEST_FLATTEN.to_string());
    }

    if let Value::Array(items) = value
        && items.len() > MAX_HEALTHY_ARRAY_LEN
    {
        report.issues.push(ISSUE_LARGE_ARRAY.to_string());
        report.suggestions.push(SUGGEST_PAGINATE.to_string());
    }

    finish(report)
}

fn push_validation(report: &mut HealthReport, validation: &ValidationResult, suggestion: &str) {
    if validation.valid {
        return;
    }
    report
        .issues
        .extend(validation.errors.iter().map(|e| e.dotted()));
    report.suggestions.push(suggestion.to_string());
}

fn finish(mut report: HealthReport) -> HealthReport {
    report.has_issues = !report.issues.is_empty();
    report
}
