//! Target definition types owned by a bundle.
//!
//! A [`TargetDefinition`] maps one template to one output file. The
//! [`TargetsDefinitions`] catalog splits a bundle's targets into templated
//! targets and static resource copies.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// A rule mapping one template to one output file.
///
/// Targets are read-only once loaded. The `id` is unique within a bundle
/// and is the key used to deduplicate selections.
///
/// # Examples
///
/// ```
/// use tsh_bundle::TargetDefinition;
///
/// let target = TargetDefinition::builder()
///     .id("bean")
///     .file("${BEANNAME}.java")
///     .template("bean_java.vm")
///     .build();
///
/// assert_eq!(target.template(), "bean_java.vm");
/// assert!(!target.is_once());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct TargetDefinition {
    /// Identity of the target within its bundle.
    #[builder(setter(into))]
    id: String,

    /// Human-readable label.
    #[builder(default, setter(into))]
    name: String,

    /// Output file name, possibly containing variables such as `${BEANNAME}`.
    #[builder(setter(into))]
    file: String,

    /// Output folder relative to the project destination.
    #[builder(default, setter(into))]
    folder: String,

    /// Template path relative to the bundle directory.
    #[builder(setter(into))]
    template: String,

    /// Produced at most once per generation run.
    #[builder(default)]
    #[serde(default)]
    once: bool,

    /// Static resource copy instead of templated generation.
    #[builder(default)]
    #[serde(default)]
    resource: bool,
}

impl TargetDefinition {
    /// Returns the target identity.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the human-readable label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the output file name.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Returns the output folder.
    pub fn folder(&self) -> &str {
        &self.folder
    }

    /// Returns the template path.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Whether the target is generated once regardless of entity count.
    pub fn is_once(&self) -> bool {
        self.once
    }

    /// Whether the target is a static resource.
    pub fn is_resource(&self) -> bool {
        self.resource
    }
}

/// All targets declared by a bundle, split by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetsDefinitions {
    #[serde(default)]
    templates: Vec<TargetDefinition>,

    #[serde(default)]
    resources: Vec<TargetDefinition>,
}

impl TargetsDefinitions {
    pub fn new(templates: Vec<TargetDefinition>, resources: Vec<TargetDefinition>) -> Self {
        Self {
            templates,
            resources,
        }
    }

    /// Templated targets (once and per-entity), in declaration order.
    pub fn templates(&self) -> &[TargetDefinition] {
        &self.templates
    }

    /// Resource targets, in declaration order.
    pub fn resources(&self) -> &[TargetDefinition] {
        &self.resources
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty() && self.resources.is_empty()
    }
}
