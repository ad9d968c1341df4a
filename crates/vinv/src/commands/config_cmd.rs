//! Config subcommand handlers.

use std::io::IsTerminal;
use std::path::PathBuf;

use dialoguer::{Input, Select};
use owo_colors::OwoColorize;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Defaults, Profile};
use crate::error::CliError;
use crate::output;

const MASK: &str = "****";

// ── Helpers ─────────────────────────────────────────────────────────

/// Confirmation line on stderr, green when stderr is a colour terminal.
fn success(message: &str) {
    if std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none() {
        eprintln!("{} {message}", "✓".green());
    } else {
        eprintln!("✓ {message}");
    }
}

/// Copy of the config with plaintext passwords masked.
fn redacted(cfg: &Config) -> Config {
    Config {
        default_profile: cfg.default_profile.clone(),
        defaults: Defaults {
            output: cfg.defaults.output.clone(),
            insecure: cfg.defaults.insecure,
            timeout: cfg.defaults.timeout,
        },
        profiles: cfg
            .profiles
            .iter()
            .map(|(name, p)| {
                let mut p = p.clone();
                if p.password.is_some() {
                    p.password = Some(MASK.into());
                }
                (name.clone(), p)
            })
            .collect(),
    }
}

/// Format config for display as TOML-like text. Expects a redacted config.
fn format_config(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    let _ = write!(out, "timeout = {}", cfg.defaults.timeout);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = write!(out, "\n\n[profiles.{name}]");
        let strings = [
            ("address", p.address.clone()),
            ("user", p.user.clone()),
            ("password", p.password.clone()),
            ("password_env", p.password_env.clone()),
            ("tenant", p.tenant.clone()),
            ("ca_cert", p.ca_cert.as_ref().map(|c| c.display().to_string())),
            ("workdir", p.workdir.as_ref().map(|w| w.display().to_string())),
        ];
        for (key, value) in strings {
            if let Some(value) = value {
                let _ = write!(out, "\n{key} = \"{value}\"");
            }
        }
        if let Some(port) = p.port {
            let _ = write!(out, "\nport = {port}");
        }
        if let Some(insecure) = p.insecure {
            let _ = write!(out, "\ninsecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = write!(out, "\ntimeout = {timeout}");
        }
    }

    out
}

fn save_config(cfg: &Config) -> Result<(), CliError> {
    config::save_config(cfg)?;
    Ok(())
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn keyring_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "keyring".into(),
        reason: format!("failed to store password in keyring: {e}"),
    }
}

fn store_in_keyring(profile_name: &str, secret: &str) -> Result<(), CliError> {
    config::password_entry(profile_name)?
        .set_password(secret)
        .map_err(keyring_err)
}

fn profile_not_found(cfg: &Config, name: String) -> CliError {
    let mut available: Vec<_> = cfg.profiles.keys().cloned().collect();
    available.sort();
    CliError::ProfileNotFound {
        name,
        available: if available.is_empty() {
            "(none)".into()
        } else {
            available.join(", ")
        },
    }
}

fn parse_value<T: std::str::FromStr>(field: &str, value: &str, hint: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: hint.into(),
    })
}

/// Apply `config set <key> <value>` to a profile.
fn set_key(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "address" => profile.address = Some(value),
        "port" => profile.port = Some(parse_value("port", &value, "must be a port number")?),
        "user" | "username" => profile.user = Some(value),
        "password" => profile.password = Some(value),
        "password_env" | "password-env" => profile.password_env = Some(value),
        "tenant" => profile.tenant = Some(value),
        "ca_cert" | "ca-cert" => profile.ca_cert = Some(PathBuf::from(value)),
        "insecure" => {
            profile.insecure = Some(parse_value("insecure", &value, "must be 'true' or 'false'")?);
        }
        "timeout" => {
            profile.timeout = Some(parse_value("timeout", &value, "must be a number (seconds)")?);
        }
        "workdir" => profile.workdir = Some(PathBuf::from(value)),
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!(
                    "unknown config key '{other}'. Valid keys: address, port, user, password, \
                     password_env, tenant, ca_cert, insecure, timeout, workdir"
                ),
            });
        }
    }
    Ok(())
}

// ── Init ────────────────────────────────────────────────────────────

fn init() -> Result<(), CliError> {
    let config_path = config::config_path();
    // A malformed file stops the wizard instead of being replaced.
    let mut cfg = config::load_config()?;
    eprintln!("vinv configuration wizard");
    eprintln!("   Config path: {}\n", config_path.display());

    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default("default".into())
        .interact_text()
        .map_err(prompt_err)?;

    let source_choices = &["vManage controller", "Local backup directory"];
    let source = Select::new()
        .with_prompt("Inventory source")
        .items(source_choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    let profile = if source == 0 {
        let address: String = Input::new()
            .with_prompt("vManage address")
            .interact_text()
            .map_err(prompt_err)?;
        let port: u16 = Input::new()
            .with_prompt("Port")
            .default(vinv_core::config::DEFAULT_PORT)
            .interact_text()
            .map_err(prompt_err)?;
        let user: String = Input::new()
            .with_prompt("Username")
            .interact_text()
            .map_err(prompt_err)?;
        let pass = rpassword::prompt_password("Password: ").map_err(prompt_err)?;
        if user.is_empty() || pass.is_empty() {
            return Err(CliError::Validation {
                field: "credentials".into(),
                reason: "username and password cannot be empty".into(),
            });
        }

        let storage = &[
            "Store in system keyring (recommended)",
            "Save to config file (plaintext)",
        ];
        let selection = Select::new()
            .with_prompt("Where to store the password?")
            .items(storage)
            .default(0)
            .interact()
            .map_err(prompt_err)?;
        let password = if selection == 0 {
            store_in_keyring(&profile_name, &pass)?;
            success("Password stored in system keyring");
            None
        } else {
            Some(pass)
        };

        let tenant: String = Input::new()
            .with_prompt("Tenant (empty for single-tenant)")
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_err)?;

        Profile {
            address: Some(address),
            port: (port != vinv_core::config::DEFAULT_PORT).then_some(port),
            user: Some(user),
            password,
            tenant: (!tenant.is_empty()).then_some(tenant),
            ..Profile::default()
        }
    } else {
        let workdir: String = Input::new()
            .with_prompt("Backup directory")
            .interact_text()
            .map_err(prompt_err)?;
        Profile {
            workdir: Some(PathBuf::from(workdir)),
            ..Profile::default()
        }
    };

    cfg.profiles.insert(profile_name.clone(), profile);
    cfg.default_profile = Some(profile_name.clone());
    save_config(&cfg)?;

    success(&format!("Configuration written to {}", config_path.display()));
    eprintln!("  Active profile: {profile_name}");
    eprintln!("\n  Test it: vinv inventory --reachable");
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(),

        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let format = config::output_format(global, &cfg);
            let out = output::render_single(format, &redacted(&cfg), format_config)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config()?;
            let profile_name = config::active_profile_name(global, &cfg);
            let profile = cfg.profiles.entry(profile_name.clone()).or_default();
            set_key(profile, &key, value)?;

            save_config(&cfg)?;
            success(&format!("Set {key} on profile '{profile_name}'"));
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_config()?;
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: vinv config init");
            } else {
                let mut names: Vec<_> = cfg.profiles.keys().collect();
                names.sort();
                for name in names {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config()?;
            if !cfg.profiles.contains_key(&name) {
                return Err(profile_not_found(&cfg, name));
            }

            cfg.default_profile = Some(name.clone());
            save_config(&cfg)?;
            success(&format!("Default profile set to '{name}'"));
            Ok(())
        }

        ConfigCommand::SetPassword { profile } => {
            let cfg = config::load_config()?;
            let profile_name = profile.unwrap_or_else(|| config::active_profile_name(global, &cfg));
            if !cfg.profiles.contains_key(&profile_name) {
                return Err(profile_not_found(&cfg, profile_name));
            }

            let secret = rpassword::prompt_password("Password: ").map_err(prompt_err)?;
            if secret.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "value cannot be empty".into(),
                });
            }
            store_in_keyring(&profile_name, &secret)?;
            success(&format!(
                "Password stored in system keyring for profile '{profile_name}'"
            ));
            Ok(())
        }

        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }
    }
}
