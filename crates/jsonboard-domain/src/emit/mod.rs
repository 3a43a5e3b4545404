//! Schema emitter: inferred shapes to a TypeScript module of Zod validators.
//!
//! Pure text generation. The caller supplies the timestamp and persists the output.

mod naming;
mod zod;

pub use naming::assign_names;

use crate::error::EmitError;
use crate::shape::ShapeNode;
use jsonboard_types::DataPath;
use naming::{type_name, validate_fn_name};
use serde_json::Value;
use zod::{expression, string_literal};

/// One file's contribution to the generated module.
#[derive(Clone, Debug, PartialEq)]
pub struct SchemaSource {
    pub path: DataPath,
    pub shape: ShapeNode,
    /// The parsed content the shape was inferred from.
    pub sample: Value,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmitOptions {
    /// Written into the header as `Generated on: ...` when present.
    pub generated_at: Option<String>,
}

/// Emit the whole module for `sources`, in input order.
pub fn emit_module(sources: &[SchemaSource], opts: &EmitOptions) -> Result<String, EmitError> {
    let paths: Vec<DataPath> = sources.iter().map(|s| s.path.clone()).collect();
    let names = assign_names(&paths)?;

    let mut out = String::new();
    push_header(&mut out, &names, opts);

    for (source, name) in sources.iter().zip(&names) {
        out.push_str(&format!("// Schema for: {}\n", source.path));
        out.push_str(&format!(
            "export const {name} = {};\n\n",
            expression(&source.shape, &[&source.sample], 0)
        ));
    }

    for name in &names {
        push_validate_fn(&mut out, name);
    }

    out.push_str("// File Index - for easy reference\n");
    out.push_str("export const JsonBoardFiles = {\n");
    let entries: Vec<String> = sources
        .iter()
        .zip(&names)
        .map(|(source, name)| format!("  {}: {name}", string_literal(source.path.as_str())))
        .collect();
    if !entries.is_empty() {
        out.push_str(&entries.join(",\n"));
        out.push('\n');
    }
    out.push_str("} as const;\n\n");

    out.push_str(VALIDATE_FILE_FN);
    out.push_str(NORMALIZE_RESULT_BODY);
    out.push_str("}\n");

    if !names.is_empty() {
        out.push_str("\n// Type exports for TypeScript users\n");
        for name in &names {
            out.push_str(&format!(
                "export type {} = z.infer<typeof {name}>;\n",
                type_name(name)
            ));
        }
    }

    Ok(out)
}

fn push_header(out: &mut String, names: &[String], opts: &EmitOptions) {
    out.push_str("/**\n * JsonBoard Auto-Generated Schema File\n");
    if let Some(ts) = &opts.generated_at {
        out.push_str(&format!(" * Generated on: {ts}\n"));
    }
    out.push_str(" *\n * This file contains Zod schemas for all JSON files in your project.\n");
    if let Some(first) = names.first() {
        out.push_str(" * You can import and use these schemas for validation:\n *\n");
        out.push_str(&format!(
            " * import {{ {first} }} from './jsonboard.schema';\n *\n"
        ));
        out.push_str(" * // Validate data\n");
        out.push_str(&format!(" * const result = {first}.safeParse(data);\n"));
        out.push_str(" * if (!result.success) {\n");
        out.push_str(" *   console.error('Validation errors:', result.error.errors);\n");
        out.push_str(" * }\n");
    }
    out.push_str(" */\n\n");
    out.push_str("import { z } from 'zod';\n\n");
    out.push_str(VALIDATION_RESULT_TYPE);
    out.push('\n');
}

fn push_validate_fn(out: &mut String, name: &str) {
    out.push_str(&format!(
        "export function {func}(data: unknown): ValidationResult<z.infer<typeof {name}>> {{\n",
        func = validate_fn_name(name)
    ));
    out.push_str(&format!("  const result = {name}.safeParse(data);\n"));
    out.push_str(NORMALIZE_RESULT_BODY);
    out.push_str("}\n\n");
}

const VALIDATION_RESULT_TYPE: &str = "\
// Type definitions for better TypeScript support
export type ValidationResult<T> = {
  success: true;
  data: T;
} | {
  success: false;
  errors: Array<{
    path: (string | number)[];
    message: string;
  }>;
};
";

const NORMALIZE_RESULT_BODY: &str = "  \
if (result.success) {
    return { success: true, data: result.data };
  }
  return {
    success: false,
    errors: result.error.errors.map(err => ({
      path: err.path,
      message: err.message
    }))
  };
";

const VALIDATE_FILE_FN: &str = "\
// Utility function to validate any file by path
export function validateFile(filePath: string, data: unknown): ValidationResult<unknown> {
  const schema = (JsonBoardFiles as Record<string, z.ZodTypeAny>)[filePath];
  if (!schema) {
    return { success: false, errors: [{ path: [], message: `No schema found for file: ${filePath}` }] };
  }
  const result = schema.safeParse(data);
";
