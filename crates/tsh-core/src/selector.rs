//! Target selection.
//!
//! Turns a user pattern such as `*`, `java` or `_java, _xml` into a list of
//! target definitions. Selection is a union over criteria: a target is kept
//! when its template path contains any criterion (case-sensitive). Matches
//! are deduplicated by target id and the result is always sorted by
//! template path, since the map used for deduplication has no meaningful
//! order.

use std::collections::HashMap;

use tsh_bundle::TargetDefinition;

/// Translate a pattern argument into selection criteria.
///
/// `*` means no filter (`None`). Otherwise the argument is split on commas
/// and every trimmed, non-empty segment becomes a criterion.
pub fn build_criteria(arg: &str) -> Option<Vec<String>> {
    let arg = arg.trim();
    if arg == "*" {
        return None;
    }
    Some(
        arg.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect(),
    )
}

/// Select and sort the targets matching `criteria`.
pub fn filter(catalog: &[TargetDefinition], criteria: Option<&[String]>) -> Vec<TargetDefinition> {
    let mut selected = select(catalog, criteria);
    sort(&mut selected);
    selected
}

/// Select the targets whose template path contains any criterion.
///
/// Without criteria (or with an empty list) the whole catalog is returned
/// in its original order. With criteria the order is unspecified.
pub fn select(catalog: &[TargetDefinition], criteria: Option<&[String]>) -> Vec<TargetDefinition> {
    let criteria = match criteria {
        Some(criteria) if !criteria.is_empty() => criteria,
        _ => return catalog.to_vec(),
    };

    let mut selected: HashMap<&str, &TargetDefinition> = HashMap::new();
    for criterion in criteria {
        for target in catalog {
            if target.template().contains(criterion.as_str()) {
                selected.insert(target.id(), target);
            }
        }
    }
    selected.into_values().cloned().collect()
}

/// Sort targets by template path, ascending.
pub fn sort(targets: &mut [TargetDefinition]) {
    targets.sort_by(|a, b| a.template().cmp(b.template()));
}

/// Type marker of a target: `1` once, `R` resource, `*` per entity.
pub fn target_type(target: &TargetDefinition) -> &'static str {
    if target.is_once() {
        "1"
    } else if target.is_resource() {
        "R"
    } else {
        "*"
    }
}

/// Preview line for one target: ` . [*] bean_java.vm -> ${BEANNAME}.java`.
pub fn target_line(target: &TargetDefinition) -> String {
    format!(
        " . [{}] {} -> {}",
        target_type(target),
        target.template(),
        target.file()
    )
}

/// Preview of a target list, one line per target, or `No template`.
pub fn render_targets(targets: &[TargetDefinition]) -> String {
    if targets.is_empty() {
        return "No template".to_owned();
    }
    targets.iter().map(target_line).collect::<Vec<_>>().join("\n")
}
