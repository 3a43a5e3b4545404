//! Developer tasks (schema generation, fixture conformance).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Project root (parent of the xtask directory).
fn project_root() -> anyhow::Result<PathBuf> {
    let manifest_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => std::env::current_dir().context("determine current directory")?,
    };

    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .map(Path::to_path_buf)
            .context("xtask has no parent directory")
    } else {
        Ok(manifest_dir)
    }
}

fn schemas_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("schemas"))
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

const FILES_SCHEMA: &str = "jsonboard.files.v1.json";
const VALIDATION_SCHEMA: &str = "jsonboard.validation.v1.json";
const HEALTH_SCHEMA: &str = "jsonboard.health.v1.json";

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "jsonboard.config.v1.json",
            generate: || schema_for!(jsonboard_settings::JsonboardConfigV1),
        },
        SchemaSpec {
            filename: FILES_SCHEMA,
            generate: || schema_for!(Vec<jsonboard_types::FileSummary>),
        },
        SchemaSpec {
            filename: "jsonboard.file-view.v1.json",
            generate: || schema_for!(jsonboard_types::FileView),
        },
        SchemaSpec {
            filename: VALIDATION_SCHEMA,
            generate: || schema_for!(jsonboard_types::ValidationResult),
        },
        SchemaSpec {
            filename: HEALTH_SCHEMA,
            generate: || schema_for!(jsonboard_types::HealthReport),
        },
    ]
}

/// Pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    fs::create_dir_all(&dir).context("create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json).with_context(|| format!("write {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Check that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual =
            fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {name}");
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {name}");
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("schema validation failed")
}

fn compile(name: &str) -> anyhow::Result<jsonschema::Validator> {
    let value: Value = serde_json::to_value(
        schema_specs()
            .into_iter()
            .find(|s| s.filename == name)
            .map(|s| (s.generate)())
            .with_context(|| format!("unknown schema {name}"))?,
    )?;
    jsonschema::validator_for(&value).map_err(|e| anyhow::anyhow!("compile {name}: {e}"))
}

fn check(
    validator: &jsonschema::Validator,
    value: &Value,
    label: &str,
    errors: &mut Vec<String>,
) {
    for err in validator.iter_errors(value) {
        errors.push(format!("{label}: schema validation: {err}"));
    }
}

/// Run the built binary and parse its stdout as JSON.
///
/// Exit code 2 (issues found) still produces a document.
fn run_json(bin: &Path, data_dir: &Path, args: &[&str]) -> anyhow::Result<Value> {
    let output = Command::new(bin)
        .arg("--dir")
        .arg(data_dir)
        .args(args)
        .output()
        .with_context(|| format!("run jsonboard {}", args.join(" ")))?;

    match output.status.code() {
        Some(0) | Some(2) => {}
        code => bail!(
            "jsonboard {} exited with {code:?}: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        ),
    }
    serde_json::from_slice(&output.stdout)
        .with_context(|| format!("parse output of jsonboard {}", args.join(" ")))
}

/// Run the binary on every fixture and check its JSON output against the schemas.
///
/// Fixtures with an `expected.files.json` golden also have their listing compared.
fn conform() -> anyhow::Result<()> {
    let root = project_root()?;
    let bin = root.join("target").join("debug").join("jsonboard");
    #[cfg(target_os = "windows")]
    let bin = bin.with_extension("exe");

    if !bin.exists() {
        bail!(
            "jsonboard binary not found at {}.\nRun `cargo build -p jsonboard-cli` first.",
            bin.display()
        );
    }

    let files_schema = compile(FILES_SCHEMA)?;
    let validation_schema = compile(VALIDATION_SCHEMA)?;
    let health_schema = compile(HEALTH_SCHEMA)?;

    let fixtures = root.join("tests").join("fixtures");
    let mut errors = Vec::new();
    let mut fixture_count = 0;

    for entry in fs::read_dir(&fixtures).context("read tests/fixtures/")? {
        let fixture_dir = entry?.path();
        let data_dir = fixture_dir.join("data");
        if !data_dir.is_dir() {
            continue;
        }
        let name = fixture_dir
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let files = run_json(&bin, &data_dir, &["files", "--json"])?;
        check(&files_schema, &files, &format!("{name}: files"), &mut errors);

        let listed: Vec<String> = files
            .as_array()
            .map(|a| {
                a.iter()
                    .filter_map(|f| f.get("relativePath").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        for path in &listed {
            let result = run_json(&bin, &data_dir, &["validate", path, "--json"])?;
            check(
                &validation_schema,
                &result,
                &format!("{name}: validate {path}"),
                &mut errors,
            );
        }

        let health = run_json(&bin, &data_dir, &["health", "--json"])?;
        for item in health.as_array().into_iter().flatten() {
            let file = item.get("file").and_then(Value::as_str).unwrap_or("?");
            match item.get("health") {
                Some(report) => check(
                    &health_schema,
                    report,
                    &format!("{name}: health {file}"),
                    &mut errors,
                ),
                None => errors.push(format!("{name}: health entry for {file} has no report")),
            }
        }

        let golden = fixture_dir.join("expected.files.json");
        if golden.exists() {
            let expected: Vec<String> = serde_json::from_str(
                &fs::read_to_string(&golden)
                    .with_context(|| format!("read {}", golden.display()))?,
            )
            .with_context(|| format!("parse {}", golden.display()))?;
            if expected != listed {
                errors.push(format!(
                    "{name}: listing {listed:?} differs from expected.files.json {expected:?}"
                ));
            }
        }

        fixture_count += 1;
        println!("  ✓ {name} ({} files)", listed.len());
    }

    if fixture_count == 0 {
        bail!("no fixtures with a data/ directory under {}", fixtures.display());
    }

    if !errors.is_empty() {
        eprintln!("\nConformance errors:");
        for err in &errors {
            eprintln!("  - {err}");
        }
        bail!("conformance failed with {} errors", errors.len());
    }

    println!("\n✓ All {fixture_count} fixtures conform.");
    Ok(())
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Check jsonboard output on tests/fixtures against the schemas");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(String::as_str).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
