//! Well-known manifest keys.

pub const MIGRATION: &str = "migration";
pub const OPTIONS: &str = "options";
pub const VERSIONS: &str = "versions";
pub const VERSION: &str = "version";
pub const OPERATIONS: &str = "operations";
pub const ADDONS: &str = "addons";
pub const MODES: &str = "modes";
