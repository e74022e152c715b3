use std::time::Duration;

use bevy::{platform::collections::HashMap, prelude::*};
use locomotion::ControllerSettings;

/// Controller tunables for this run.
#[derive(Resource, Debug, Clone, Copy, Deref)]
pub struct Settings(pub ControllerSettings);

pub(super) fn plugin(app: &mut App) {
    let settings = read_settings_from_cli_env();
    info!(
        "Controller settings: walk {} m/s, jump {} N·s, startup lock {:?}",
        settings.walk_speed_mps, settings.jump_impulse, settings.startup_lock
    );
    app.insert_resource(Settings(settings));
}

/// CLI flag name and its environment variable fallback.
const OPTIONS: [(&str, &str); 3] = [
    ("walk-speed", "LOCOMOTION_WALK_SPEED"),
    ("startup-lock", "LOCOMOTION_STARTUP_LOCK"),
    ("jump-impulse", "LOCOMOTION_JUMP_IMPULSE"),
];

fn read_settings_from_cli_env() -> ControllerSettings {
    parse_settings(std::env::args().skip(1), |key| std::env::var(key).ok())
}

/// Builds settings from CLI args, falling back to environment variables, then defaults.
///
/// Supported:
///   --walk-speed <m/s>      / --walk-speed=<m/s>      / LOCOMOTION_WALK_SPEED
///   --startup-lock <secs>   / --startup-lock=<secs>   / LOCOMOTION_STARTUP_LOCK
///   --jump-impulse <N·s>    / --jump-impulse=<N·s>    / LOCOMOTION_JUMP_IMPULSE
///
/// Malformed values are ignored with a warning. If the result fails validation, the
/// defaults are used instead.
fn parse_settings(
    args: impl IntoIterator<Item = String>,
    env: impl Fn(&str) -> Option<String>,
) -> ControllerSettings {
    let cli = collect_cli_values(args);
    let mut settings = ControllerSettings::default();

    for (flag, env_key) in OPTIONS {
        let Some(raw) = cli.get(flag).cloned().or_else(|| env(env_key)) else {
            continue;
        };
        let Ok(value) = raw.trim().parse::<f32>() else {
            warn!("Ignoring --{flag}: {raw:?} is not a number");
            continue;
        };

        match flag {
            "walk-speed" => settings.walk_speed_mps = value,
            "jump-impulse" => settings.jump_impulse = value,
            "startup-lock" => match Duration::try_from_secs_f32(value) {
                Ok(d) => settings.startup_lock = d,
                Err(_) => warn!("Ignoring --{flag}: {value} is not a valid duration"),
            },
            _ => {}
        }
    }

    if let Err(err) = settings.validate() {
        warn!("{err}; falling back to default controller settings");
        return ControllerSettings::default();
    }
    settings
}

fn collect_cli_values(args: impl IntoIterator<Item = String>) -> HashMap<&'static str, String> {
    let mut values = HashMap::default();
    let mut pending_key: Option<&'static str> = None;

    for arg in args {
        if let Some(key) = pending_key.take() {
            values.insert(key, arg);
            continue;
        }
        let Some(stripped) = arg.strip_prefix("--") else {
            continue;
        };
        for (flag, _) in OPTIONS {
            if stripped == flag {
                pending_key = Some(flag);
            } else if let Some(val) = stripped
                .strip_prefix(flag)
                .and_then(|rest| rest.strip_prefix('='))
            {
                values.insert(flag, val.to_string());
            }
        }
    }

    values
}
