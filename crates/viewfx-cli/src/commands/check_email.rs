use anyhow::{bail, Result};

use viewfx_core::{analytics, forms::is_valid_email};

pub fn run(email: &str) -> Result<()> {
    if !is_valid_email(email) {
        bail!("Please enter a valid email address");
    }

    analytics::form_submit(Some("newsletter"));
    println!("{} looks valid.", email);
    Ok(())
}
