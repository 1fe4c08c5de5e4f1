//! `fieldseal status` — show where the master key comes from and which
//! settings are in effect.

use console::style;

use crate::cli::{open_cipher, output, store_path, Cli};
use crate::config::Settings;
use crate::crypto::{MasterKeySource, MASTER_KEY_ENV};
use crate::errors::Result;

/// Execute the `status` command.
pub fn execute(cli: &Cli, settings: &Settings) -> Result<()> {
    let (cipher, source) = open_cipher(settings);

    println!("{:<16} {}", style("Key source:").bold(), source);
    println!(
        "{:<16} {:?}",
        style("Legacy blobs:").bold(),
        cipher.legacy_policy()
    );
    println!("{:<16} {:?}", style("Backend:").bold(), settings.backend);
    println!(
        "{:<16} {}",
        style("Store path:").bold(),
        store_path(cli, settings)?.display()
    );
    println!(
        "{:<16} {}",
        style("Default TTL:").bold(),
        settings
            .default_ttl_days
            .map_or_else(|| "none".to_string(), |d| format!("{d} day(s)"))
    );

    if source == MasterKeySource::Machine {
        output::warning(&format!(
            "Using a machine-derived key. Data will not decrypt on another host, user or working directory; set {MASTER_KEY_ENV} to pin the key."
        ));
    }

    Ok(())
}
