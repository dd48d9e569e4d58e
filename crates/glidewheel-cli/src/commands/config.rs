use std::path::Path;

use anyhow::Result;
use tracing::warn;

use glidewheel_core::AppConfig;

/// Print the effective configuration
pub fn show(config: &AppConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

pub fn path(config_path: &Path) -> Result<()> {
    println!("{}", config_path.display());
    Ok(())
}

/// Restore the scroll tuning defaults in the config file.
///
/// Frame pacing settings and the `[general]` section are kept; a file that
/// is missing or no longer parses is replaced with full defaults.
pub fn reset(config_path: &Path) -> Result<()> {
    let mut config = if config_path.exists() {
        AppConfig::load_from(config_path).unwrap_or_else(|e| {
            warn!("Replacing unreadable config {}: {}", config_path.display(), e);
            AppConfig::default()
        })
    } else {
        AppConfig::default()
    };
    config.scroll.reset_to_defaults();
    config.save_to(config_path)?;

    println!("Scroll settings reset to defaults: {}", config_path.display());
    Ok(())
}
