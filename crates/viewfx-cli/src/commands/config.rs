use std::path::Path;

use anyhow::Result;

use viewfx_core::AppConfig;

/// Print the effective configuration as TOML
pub fn show(config: &AppConfig) -> Result<()> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

/// Write the default configuration unless a file already exists
pub fn init(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Config already exists at {}", path.display());
        return Ok(());
    }

    AppConfig::default().save_to(path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
