//! Identifier generation for emitted schemas.
//!
//! Names are derived from the file stem. Each schema const also declares a `validate<Name>`
//! function and a `<Name>Type` alias, and all three must be unique across the module. Collisions
//! are resolved in fixed stages over the whole input set: directory-qualified names first, then a
//! path-hash suffix. Anything still colliding after that is an error.

use crate::error::EmitError;
use jsonboard_types::DataPath;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet};

const NAME_SUFFIX: &str = "Schema";
const HASH_PREFIX_LEN: usize = 8;

/// Generate one identifier per path, in input order.
pub fn assign_names(paths: &[DataPath]) -> Result<Vec<String>, EmitError> {
    let mut names: Vec<String> = paths
        .iter()
        .map(|p| schema_name(&camel_identifier(p.file_stem())))
        .collect();

    for idx in colliding(&names) {
        names[idx] = qualified_name(&paths[idx]);
    }

    for idx in colliding(&names) {
        names[idx] = format!("{}_{}", names[idx], path_hash(&paths[idx]));
    }

    if let Some((ident, owners)) = clashes(&names).into_iter().next() {
        let paths = owners
            .iter()
            .map(|&i| paths[i].as_str().to_string())
            .collect();
        return Err(EmitError::NameCollision { name: ident, paths });
    }

    Ok(names)
}

/// `usersSchema` -> `validateUsersSchema`.
pub fn validate_fn_name(name: &str) -> String {
    format!("validate{}", capitalize(name))
}

/// `usersSchema` -> `UsersSchemaType`.
pub fn type_name(name: &str) -> String {
    format!("{}Type", capitalize(name))
}

/// `usersSchema` -> `UsersSchema`.
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Non-alphanumeric runs become segment breaks; the first segment is kept as written and every
/// following one is capitalized. A leading digit gets a `_` prefix.
fn camel_identifier(raw: &str) -> String {
    let mut out = String::new();
    for (i, segment) in raw
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|s| !s.is_empty())
        .enumerate()
    {
        if i == 0 {
            out.push_str(segment);
        } else {
            out.push_str(&capitalize(segment));
        }
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

fn schema_name(base: &str) -> String {
    format!("{base}{NAME_SUFFIX}")
}

fn qualified_name(path: &DataPath) -> String {
    let parent = path.parent_name();
    if parent.is_empty() {
        return schema_name(&camel_identifier(path.file_stem()));
    }
    schema_name(&camel_identifier(&format!("{parent}_{}", path.file_stem())))
}

fn path_hash(path: &DataPath) -> String {
    let digest = Sha256::digest(path.as_str().as_bytes());
    let mut hex = hex::encode(digest);
    hex.truncate(HASH_PREFIX_LEN);
    hex
}

/// Every identifier declared for more than one input, with the indices declaring it.
fn clashes(names: &[String]) -> BTreeMap<String, BTreeSet<usize>> {
    let mut owners: BTreeMap<String, BTreeSet<usize>> = BTreeMap::new();
    for (i, name) in names.iter().enumerate() {
        for ident in [name.clone(), validate_fn_name(name), type_name(name)] {
            owners.entry(ident).or_default().insert(i);
        }
    }
    owners.retain(|_, idx| idx.len() > 1);
    owners
}

/// Indices of every name whose declarations clash with another input's.
fn colliding(names: &[String]) -> Vec<usize> {
    let all: BTreeSet<usize> = clashes(names).into_values().flatten().collect();
    all.into_iter().collect()
}
