//! Styled terminal output shared by every command.
//!
//! Status lines for humans go through here. Values meant for piping
//! (ciphertexts, hashes, keys) are printed bare by the commands themselves.

use chrono::{DateTime, Utc};
use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::store::SecretMetadata;

/// Green check mark, stdout.
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Red cross, stderr.
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Yellow warning sign, stderr.
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Blue info sign, stdout.
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Dimmed hint line.
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

fn fmt_ts(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn fmt_opt(ts: Option<DateTime<Utc>>, none: &str) -> String {
    ts.map_or_else(|| none.to_string(), fmt_ts)
}

/// Print a table of secret metadata.
pub fn print_secrets_table(secrets: &[SecretMetadata]) {
    if secrets.is_empty() {
        info("No secrets stored yet.");
        tip("Run `fieldseal secret set <KEY>` to add your first secret.");
        return;
    }

    let now = Utc::now();
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Created", "Updated", "Last access", "Expires"]);

    for s in secrets {
        let expires = match s.expires_at {
            Some(exp) if exp <= now => format!("{} (expired)", fmt_ts(exp)),
            other => fmt_opt(other, "never"),
        };
        table.add_row(vec![
            s.name.clone(),
            fmt_ts(s.created_at),
            fmt_ts(s.updated_at),
            fmt_opt(s.last_accessed_at, "-"),
            expires,
        ]);
    }

    println!("{table}");
}
