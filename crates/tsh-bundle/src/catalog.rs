//! Bundle catalog reader.
//!
//! Each bundle directory holds a `templates.cfg` file declaring its targets,
//! one per line:
//!
//! ```text
//! # label ; file ; folder ; template [; type]
//! Java bean   ; ${BEANNAME}.java ; ${SRC}/${ROOT_PKG}/bean ; bean_java.vm
//! Readme      ; README.md        ;                         ; readme_md.vm ; 1
//! Logo        ; logo.png         ; static                  ; static/logo.png ; R
//! ```
//!
//! The optional type is `1` (once), `R` (resource) or `*` (per entity, the
//! default). Blank lines and `#` comments are ignored.

use std::fs;
use std::path::Path;

use tracing::{debug, instrument};

use crate::error::BundleError;
use crate::target::{TargetDefinition, TargetsDefinitions};

/// File name of the catalog inside a bundle directory.
pub const CATALOG_FILE: &str = "templates.cfg";

/// Load the catalog of the bundle stored in `bundle_dir`.
///
/// # Errors
///
/// Returns `BundleError::CatalogNotFound` if `templates.cfg` is missing.
/// Returns `BundleError::InvalidLine` if a line cannot be parsed.
/// Returns `BundleError::Io` if the file cannot be read.
#[instrument]
pub fn load_catalog(bundle_dir: &Path) -> Result<TargetsDefinitions, BundleError> {
    let path = bundle_dir.join(CATALOG_FILE);
    if !path.is_file() {
        return Err(BundleError::CatalogNotFound(path));
    }

    let content = fs::read_to_string(&path)?;
    let catalog = parse_catalog(&content)?;

    debug!(
        path = %path.display(),
        templates = catalog.templates().len(),
        resources = catalog.resources().len(),
        "bundle catalog loaded"
    );
    Ok(catalog)
}

/// Parse the content of a `templates.cfg` file.
///
/// Targets keep their declaration order. Resource targets are returned
/// separately from templated targets.
///
/// # Errors
///
/// Returns `BundleError::InvalidLine` with the 1-based line number of the
/// first malformed line.
pub fn parse_catalog(content: &str) -> Result<TargetsDefinitions, BundleError> {
    let mut templates = Vec::new();
    let mut resources = Vec::new();

    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let target = parse_line(line, index + 1)?;
        if target.is_resource() {
            resources.push(target);
        } else {
            templates.push(target);
        }
    }

    Ok(TargetsDefinitions::new(templates, resources))
}

fn parse_line(line: &str, number: usize) -> Result<TargetDefinition, BundleError> {
    let invalid = |reason: String| BundleError::InvalidLine {
        line: number,
        reason,
    };

    let fields: Vec<&str> = line.split(';').map(str::trim).collect();
    if !(4..=5).contains(&fields.len()) {
        return Err(invalid(format!(
            "expected 4 or 5 fields separated by ';', found {}",
            fields.len()
        )));
    }

    let (name, file, folder, template) = (fields[0], fields[1], fields[2], fields[3]);
    if file.is_empty() {
        return Err(invalid("empty file name".to_owned()));
    }
    if template.is_empty() {
        return Err(invalid("empty template".to_owned()));
    }

    let (once, resource) = match fields.get(4).copied().unwrap_or_default() {
        "" | "*" => (false, false),
        "1" => (true, false),
        "R" | "r" => (false, true),
        other => return Err(invalid(format!("unknown target type '{other}'"))),
    };

    Ok(TargetDefinition::builder()
        .id(target_id(folder, file, template))
        .name(name)
        .file(file)
        .folder(folder)
        .template(template)
        .once(once)
        .resource(resource)
        .build())
}

/// Identity of a target: two lines producing the same file from the same
/// template are the same target.
fn target_id(folder: &str, file: &str, template: &str) -> String {
    if folder.is_empty() {
        format!("{file}@{template}")
    } else {
        format!("{folder}/{file}@{template}")
    }
}
