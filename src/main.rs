use clap::Parser;
use fieldseal::cli::commands;
use fieldseal::cli::{Cli, Commands, PasswordAction, SecretAction};
use fieldseal::config::Settings;
use fieldseal::errors::Result;

fn main() {
    let cli = Cli::parse();

    // A broken config only fails the commands that read it.
    let settings = fieldseal::cli::load_settings();
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| settings.as_ref().ok().map(|s| s.log_level.clone()))
        .unwrap_or_else(|| "warn".to_string());
    fieldseal::logging::init(&log_level);

    if let Err(e) = run(&cli, settings) {
        tracing::debug!("command failed: {e:?}");
        fieldseal::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(cli: &Cli, settings: Result<Settings>) -> Result<()> {
    match &cli.command {
        Commands::Encrypt { value } => {
            commands::encrypt::execute_encrypt(&settings?, value.as_deref())
        }
        Commands::Decrypt { value } => {
            commands::encrypt::execute_decrypt(&settings?, value.as_deref())
        }
        Commands::Hash { value } => commands::hash::execute(value),
        Commands::VerifyHash { value, expected } => commands::hash::execute_verify(value, expected),
        Commands::Keygen => commands::keygen::execute(),
        Commands::Status => commands::status::execute(cli, &settings?),
        Commands::Secret { action } => {
            let settings = settings?;
            match action {
                SecretAction::Set {
                    key,
                    value,
                    ttl_days,
                } => commands::set::execute(cli, &settings, key, value.as_deref(), *ttl_days),
                SecretAction::Get { key } => commands::get::execute(cli, &settings, key),
                SecretAction::List => commands::list::execute(cli, &settings),
                SecretAction::Delete { key, force } => {
                    commands::delete::execute(cli, &settings, key, *force)
                }
                SecretAction::Purge => commands::purge::execute(cli, &settings),
            }
        }
        Commands::Password { action } => match action {
            PasswordAction::Hash => commands::password::execute_hash(),
            PasswordAction::Verify { hash } => commands::password::execute_verify(hash),
        },
        Commands::Version => commands::version::execute(),
        Commands::Completions { shell } => commands::completions::execute(*shell),
    }
}
