//! Parser layer
//! - upgrades.rs: mainnet upgrades table parser (latest release tag)
//! - go_mod.rs: go.mod parser (require and replace directives)

pub mod go_mod;
pub mod upgrades;

pub use go_mod::{GoModParser, Overrides, Requirements, apply_overrides};
pub use upgrades::{DocumentError, UpgradesParser};
