//! Module layer
//! - registry.rs: static table of tracked Noble modules
//! - attribution.rs: module versions per tag and module-scoped diffs

pub mod attribution;
pub mod registry;

pub use attribution::{
    ModuleDiff, ModuleManifest, module_diffs, module_manifest_for_tag, module_versions_for_tag,
};
pub use registry::{ModuleEntry, ModuleRegistry, NOBLE_MODULES};
