//! `fieldseal encrypt` / `fieldseal decrypt` — seal or open a single value.

use crate::cli::{open_cipher, read_value};
use crate::config::Settings;
use crate::errors::Result;

/// Execute the `encrypt` command.
pub fn execute_encrypt(settings: &Settings, value: Option<&str>) -> Result<()> {
    let plaintext = read_value(value, "Value to encrypt")?;
    let (cipher, _) = open_cipher(settings);

    println!("{}", cipher.encrypt(&plaintext)?);
    Ok(())
}

/// Execute the `decrypt` command.
pub fn execute_decrypt(settings: &Settings, value: Option<&str>) -> Result<()> {
    let sealed = read_value(value, "Ciphertext to decrypt")?;
    let (cipher, _) = open_cipher(settings);

    let plaintext = zeroize::Zeroizing::new(cipher.decrypt(sealed.trim())?);
    println!("{}", plaintext.as_str());
    Ok(())
}
