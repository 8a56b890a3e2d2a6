mod catalog;
mod error;
mod target;

pub use catalog::{CATALOG_FILE, load_catalog, parse_catalog};
pub use error::BundleError;
pub use target::{TargetDefinition, TargetsDefinitions};
