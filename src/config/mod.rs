//! Tool settings.
//!
//! Settings control how definition documents are read and printed; they are
//! not definitions themselves. Tiers, lowest to highest precedence:
//! 1. **Defaults** - compiled in
//! 2. **Project** - `$CWD/qualified-config/config.yaml`
//! 3. **User** - `~/.qualified-config/config.yaml`
//! 4. **Environment** - `QUALIFIED_CONFIG_*` variables
//!
//! YAML tiers are deep-merged field by field.
//!
//! ## Environment Variables
//! - `QUALIFIED_CONFIG_PATH` - Explicit settings file (overrides all tiers)
//! - `QUALIFIED_CONFIG_PROJECT_DIR` - Project dir (default: `./qualified-config`)
//! - `QUALIFIED_CONFIG_USER_DIR` - User dir (default: `~/.qualified-config`)
//! - `QUALIFIED_CONFIG_FORMAT` - Output format

mod loader;
mod merge;
mod types;

pub use loader::{SettingsLoader, SettingsPaths, SettingsTier};
pub use merge::{merge_into, merge_tiers};
pub use types::*;
