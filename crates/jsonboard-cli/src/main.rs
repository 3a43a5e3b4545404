//! CLI entry point for jsonboard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `jsonboard-app` crate.

#![forbid(unsafe_code)]

mod logging;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand};
use jsonboard_app::{
    add_record, check_health, check_health_all, create_file, delete_file, delete_record,
    file_path, generate_schema, infer_shape, list_files, load_config, open_store, read_file,
    save_file, update_record_by_id, update_record_by_index, validate_file, write_text,
};
use jsonboard_repo::JsonStore;
use jsonboard_settings::{Overrides, ResolvedConfig};
use serde_json::Value;
use time::OffsetDateTime;

/// Exit code when validation or health checks report issues.
const EXIT_ISSUES: i32 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "jsonboard",
    version,
    about = "Browse, edit and validate a directory of JSON files"
)]
struct Cli {
    /// Data directory (overrides `dir` from the config file).
    #[arg(long, global = true)]
    dir: Option<Utf8PathBuf>,

    /// Path to jsonboard config TOML. A missing file means defaults.
    #[arg(long, global = true, default_value = "jsonboard.toml")]
    config: Utf8PathBuf,

    /// Log filter, e.g. `info` or `jsonboard_app=debug`. Falls back to RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List discovered JSON files with their metadata.
    Files {
        #[arg(long, conflicts_with = "markdown")]
        json: bool,
        #[arg(long)]
        markdown: bool,
    },

    /// Print a file's content.
    Show {
        file: String,
        /// Print the full view (data plus metadata) as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the shape inferred from a file.
    Shape {
        file: String,
        #[arg(long)]
        json: bool,
    },

    /// Validate a file against the shape inferred from its own content.
    Validate {
        file: String,
        #[arg(long)]
        json: bool,
    },

    /// Structural health checks for one file, or every discovered file.
    Health {
        file: Option<String>,
        #[arg(long, conflicts_with = "markdown")]
        json: bool,
        #[arg(long)]
        markdown: bool,
    },

    /// Generate the Zod schema module for every discovered file.
    InitSchema {
        /// Output path (default: `schema_out` from the config, inside the data directory).
        #[arg(long)]
        out: Option<Utf8PathBuf>,
    },

    /// Create a new file; defaults to an empty collection.
    Create {
        file: String,
        #[arg(long)]
        data: Option<String>,
    },

    /// Overwrite a file with new content.
    Save {
        file: String,
        #[arg(long)]
        data: String,
    },

    /// Delete a file.
    Delete { file: String },

    /// Record operations on collection files.
    #[command(subcommand)]
    Record(RecordCommands),
}

#[derive(Subcommand, Debug)]
enum RecordCommands {
    /// Append a record; an `id` is assigned when missing.
    Add { file: String, json: String },

    /// Shallow-merge fields into one record.
    Update {
        file: String,
        #[command(flatten)]
        target: RecordTarget,
        json: String,
    },

    /// Remove the record with the given id.
    Delete {
        file: String,
        #[arg(long)]
        id: i64,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct RecordTarget {
    /// Record id (the id itself is never changed).
    #[arg(long)]
    id: Option<i64>,
    /// Zero-based position in the collection.
    #[arg(long)]
    index: Option<usize>,
}

fn main() {
    let cli = Cli::parse();
    logging::init(&logging::Config {
        level: cli.log_level.clone(),
        json: cli.log_json,
    });

    match run(&cli) {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("jsonboard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    let (config, base) = resolve(cli)?;
    let fs_store = open_store(&base, &config)?;
    let store: &dyn JsonStore = &fs_store;

    match &cli.cmd {
        Commands::Files { json, markdown } => {
            let files = list_files(store)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&files)?);
            } else if *markdown {
                print!("{}", jsonboard_render::render_files_markdown(&files));
            } else {
                print!("{}", jsonboard_render::render_file_list(&files));
            }
            Ok(0)
        }
        Commands::Show { file, json } => {
            let view = read_file(store, &file_path(file))?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&view.data)?);
            }
            Ok(0)
        }
        Commands::Shape { file, json } => {
            let path = file_path(file);
            let shape = infer_shape(store, &path)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&shape)?);
            } else {
                print!("{}", jsonboard_render::render_shape(&path, &shape));
            }
            Ok(0)
        }
        Commands::Validate { file, json } => {
            let path = file_path(file);
            let result = validate_file(store, &path)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", jsonboard_render::render_validation(&path, &result));
            }
            Ok(if result.valid { 0 } else { EXIT_ISSUES })
        }
        Commands::Health {
            file,
            json,
            markdown,
        } => {
            let reports = match file {
                Some(file) => {
                    let path = file_path(file);
                    let report = check_health(store, &path)?;
                    vec![(path, report)]
                }
                None => check_health_all(store)?,
            };
            if *json {
                let entries: Vec<Value> = reports
                    .iter()
                    .map(|(path, report)| {
                        serde_json::json!({ "file": path, "health": report })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if *markdown {
                print!("{}", jsonboard_render::render_health_markdown(&reports));
            } else {
                print!("{}", jsonboard_render::render_health_text(&reports));
            }
            let flagged = reports.iter().any(|(_, r)| r.has_issues);
            Ok(if flagged { EXIT_ISSUES } else { 0 })
        }
        Commands::InitSchema { out } => {
            let module = generate_schema(store, Some(OffsetDateTime::now_utc()))?;
            let out = match out {
                Some(out) => out.clone(),
                None => base.join(&config.dir).join(&config.schema_out),
            };
            write_text(&out, &module.text).context("write schema module")?;
            println!("wrote {out} ({} files)", module.files.len());
            Ok(0)
        }
        Commands::Create { file, data } => {
            let path = file_path(file);
            let data = data.as_deref().map(|d| parse_json_arg("--data", d)).transpose()?;
            create_file(store, &path, data.as_ref())?;
            println!("created {path}");
            Ok(0)
        }
        Commands::Save { file, data } => {
            let path = file_path(file);
            let created = save_file(store, &path, &parse_json_arg("--data", data)?)?;
            let verb = if created { "created" } else { "saved" };
            println!("{verb} {path}");
            Ok(0)
        }
        Commands::Delete { file } => {
            let path = file_path(file);
            delete_file(store, &path)?;
            println!("deleted {path}");
            Ok(0)
        }
        Commands::Record(cmd) => run_record(store, cmd),
    }
}

fn run_record(store: &dyn JsonStore, cmd: &RecordCommands) -> anyhow::Result<i32> {
    let record = match cmd {
        RecordCommands::Add { file, json } => {
            add_record(store, &file_path(file), parse_json_arg("record", json)?)?
        }
        RecordCommands::Update { file, target, json } => {
            let path = file_path(file);
            let patch = parse_json_arg("patch", json)?;
            match (target.id, target.index) {
                (Some(id), _) => update_record_by_id(store, &path, id, patch)?,
                (None, Some(index)) => update_record_by_index(store, &path, index, patch)?,
                (None, None) => anyhow::bail!("record update requires --id or --index"),
            }
        }
        RecordCommands::Delete { file, id } => delete_record(store, &file_path(file), *id)?,
    };
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(0)
}

/// Resolved config plus the directory the data directory is relative to.
///
/// `--dir` is taken relative to the working directory; `dir` from the config file is relative to
/// the config file's directory.
fn resolve(cli: &Cli) -> anyhow::Result<(ResolvedConfig, Utf8PathBuf)> {
    let config_text = match std::fs::read_to_string(&cli.config) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(err) => {
            return Err(err).with_context(|| format!("read config {}", cli.config));
        }
    };

    let overrides = Overrides {
        dir: cli.dir.as_ref().map(|d| d.to_string()),
    };
    let config = load_config(&config_text, overrides)?;

    let base = if cli.dir.is_some() {
        Utf8PathBuf::new()
    } else {
        config_base(&cli.config)
    };
    Ok((config, base))
}

fn config_base(config: &Utf8Path) -> Utf8PathBuf {
    config
        .parent()
        .map(Utf8Path::to_path_buf)
        .unwrap_or_default()
}

fn parse_json_arg(what: &str, text: &str) -> anyhow::Result<Value> {
    serde_json::from_str(text).with_context(|| format!("parse {what} as JSON"))
}
