// Re-export all items from the submodules
mod profile;
mod scan_config;
pub mod validation;

// Re-export scan profile
pub use profile::{
    ScanProfile,
    load_or_default_profile,
};

// Re-export resolved configuration
pub use scan_config::ScanConfiguration;
