//! action-exec: simulated per-domain executors behind the
//! `command_core::ActionExecutor` seam.
//!
//! These adapters are deliberately thin: they acknowledge, log, and mutate
//! session-local state instead of touching the real desktop. Swapping one for
//! a genuine OS/browser/spreadsheet binding is a registry edit.

mod spreadsheet;
pub use spreadsheet::{SheetSession, SpreadsheetExecutor};

mod email;
pub use email::EmailComposeExecutor;

mod system;
pub use system::SystemExecutor;

mod web;
pub use web::WebExecutor;

mod utility;
pub use utility::{InfoExecutor, UtilityExecutor};

mod media;
pub use media::{MediaExecutor, SmartHomeExecutor};

use command_core::{ExecutorRegistry, Intent};

/// Assemble the full executor set, one per dispatchable intent.
pub fn standard_registry() -> ExecutorRegistry {
    let mut registry = ExecutorRegistry::new();
    registry.register(Intent::Spreadsheet, Box::new(SpreadsheetExecutor::new()));
    registry.register(Intent::Email, Box::new(EmailComposeExecutor::new()));
    registry.register(Intent::System, Box::new(SystemExecutor::new()));
    registry.register(Intent::Web, Box::new(WebExecutor::new()));
    registry.register(Intent::Utility, Box::new(UtilityExecutor::new()));
    registry.register(Intent::Info, Box::new(InfoExecutor::new()));
    registry.register(Intent::Media, Box::new(MediaExecutor::new()));
    registry.register(Intent::SmartHome, Box::new(SmartHomeExecutor::new()));
    registry
}
