mod dirs;
mod settings;
mod validation;

pub use dirs::Directories;
pub use settings::{CatalogConfig, Config, DisplayConfig};
pub use validation::warn_unknown_fields;
