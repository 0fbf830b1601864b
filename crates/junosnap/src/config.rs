//! CLI configuration: thin wrapper around `junosnap_config` shared types.
//!
//! Adds the resolution that respects `GlobalOpts` overrides (--host, --user,
//! --insecure, --timeout) and turns the result into ready transports.

use std::io::IsTerminal;
use std::time::Duration;

use secrecy::SecretString;

use junosnap_api::{AnyTransport, ReplayTransport};
use junosnap_core::{DeviceConfig, Poller, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use junosnap_config::{
    Config, Profile, config_path, delete_password, load_config_or_default, save_config,
    store_password,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

pub fn available_profiles(config: &Config) -> String {
    if config.profiles.is_empty() {
        "(none)".into()
    } else {
        config.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// Username and password: flag, then the profile's credential chain, then
/// an interactive prompt when attached to a terminal.
fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<(String, SecretString), CliError> {
    let username = match &global.user {
        Some(user) => user.clone(),
        None => junosnap_config::resolve_username(profile, profile_name)?,
    };

    let password = match junosnap_config::resolve_password(profile, profile_name) {
        Ok(password) => password,
        Err(_) if std::io::stdin().is_terminal() => {
            let prompt = format!("Password for {username}@{}: ", profile.host);
            SecretString::from(rpassword::prompt_password(prompt)?)
        }
        Err(e) => return Err(e.into()),
    };

    Ok((username, password))
}

/// Translate a profile + global flags into a `DeviceConfig` per host.
///
/// Credentials are resolved once and shared by every host.
pub fn resolve_devices(
    config: &Config,
    global: &GlobalOpts,
) -> Result<Vec<DeviceConfig>, CliError> {
    let profile_name = active_profile_name(global, config);
    let profile = match (config.profile(&profile_name), global.hosts.first()) {
        (Some(profile), _) => profile.clone(),
        (None, Some(host)) if global.profile.is_none() => Profile::new(host.clone()),
        (None, _) if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(config),
            });
        }
        (None, _) => {
            return Err(CliError::NoConfig {
                path: config_path().display().to_string(),
            });
        }
    };

    let (username, password) = resolve_credentials(&profile, &profile_name, global)?;

    let tls = if global.insecure {
        TlsVerification::DangerAcceptInvalid
    } else {
        profile.tls()
    };
    let timeout = global
        .timeout
        .map_or_else(|| profile.timeout(&config.defaults), Duration::from_secs);

    let hosts = if global.hosts.is_empty() {
        vec![profile.host.clone()]
    } else {
        global.hosts.clone()
    };

    hosts
        .into_iter()
        .map(|host| {
            let target = Profile { host, ..profile.clone() };
            Ok(DeviceConfig {
                url: target.url()?,
                username: username.clone(),
                password: password.clone(),
                tls: tls.clone(),
                timeout,
            })
        })
        .collect()
}

/// Pollers for every target: the replay directory, or each device.
pub fn build_pollers(global: &GlobalOpts) -> Result<Vec<Poller<AnyTransport>>, CliError> {
    if let Some(dir) = &global.replay {
        if !dir.is_dir() {
            return Err(CliError::Validation {
                field: "replay".into(),
                reason: format!("{} is not a directory", dir.display()),
            });
        }
        let replay = ReplayTransport::new(dir);
        return Ok(vec![Poller::new(AnyTransport::Replay(replay))]);
    }

    let config = load_config_or_default();
    resolve_devices(&config, global)?
        .iter()
        .map(|device| Ok(Poller::new(AnyTransport::Rest(device.connect()?))))
        .collect()
}
