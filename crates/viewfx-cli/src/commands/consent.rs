use anyhow::Result;

use viewfx_core::{consent::ConsentStore, AppConfig};

pub fn status(config: &AppConfig) -> Result<()> {
    let store = ConsentStore::from_config(config);

    match store.record()? {
        Some(record) if record.accepted => {
            let when = record
                .accepted_at
                .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "unknown time".to_string());
            println!("Cookies accepted ({})", when);
        }
        _ => {
            println!("Cookies not accepted. The consent banner would be shown.");
        }
    }
    println!("Consent file: {}", store.path().display());

    Ok(())
}

pub fn accept(config: &AppConfig) -> Result<()> {
    let store = ConsentStore::from_config(config);
    store.accept()?;
    println!("Consent recorded.");
    Ok(())
}

pub fn reset(config: &AppConfig) -> Result<()> {
    let store = ConsentStore::from_config(config);
    if store.reset()? {
        println!("Consent cleared.");
    } else {
        println!("No consent recorded.");
    }
    Ok(())
}
