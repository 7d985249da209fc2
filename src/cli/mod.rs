//! CLI commands for Thicket.
//!
//! - **search**: rank the project corpus against a query
//! - **expand**: show how a query expands through the alias dictionary
//!
//! The hook command lives in [`crate::hooks`].

use std::path::Path;

use crate::config::Config;
use crate::core::AliasDictionary;
use crate::error::Result;

pub mod expand;
pub mod search;

pub use expand::ExpandCommand;
pub use search::SearchCommand;

/// Load the alias dictionary configured for the project containing `cwd`.
///
/// An explicitly configured dictionary must exist; the default project
/// dictionary is optional and yields an empty dictionary when absent.
pub fn load_dictionary(config: &Config, cwd: &Path) -> Result<AliasDictionary> {
    let (path, explicit) = config.tags_path(cwd);
    if explicit {
        AliasDictionary::load(&path)
    } else {
        AliasDictionary::load_or_empty(&path)
    }
}
