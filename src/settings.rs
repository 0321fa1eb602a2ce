use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::constants::{DEFAULT_CLIENT_ID, DISCORD_PROCESS_NAMES};
use crate::error::{Error, Result};

const SETTINGS_DIR: &str = "league-presence";
const SETTINGS_FILE: &str = "settings.json";

/// How long to wait for a process before giving up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaitTimeout {
    #[default]
    Infinite,
    Seconds(u64),
}

impl WaitTimeout {
    /// Negative values mean "wait forever"
    pub fn from_secs(secs: i64) -> Self {
        u64::try_from(secs).map_or(Self::Infinite, Self::Seconds)
    }
}

/// Toggles that change how views are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    pub show_stats: bool,
    pub show_rank: bool,
    pub show_emojis: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_stats: true,
            show_rank: true,
            show_emojis: true,
        }
    }
}

/// Contents of the optional settings file. Every field may be omitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct FileSettings {
    pub client_id: Option<String>,
    pub no_stats: bool,
    pub no_rank: bool,
    pub hide_emojis: bool,
    pub add_process: Vec<String>,
    pub wait_for_league: Option<i64>,
    pub wait_for_discord: Option<i64>,
    pub launch_league: Option<PathBuf>,
}

/// Effective configuration after merging the settings file with CLI flags
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub client_id: String,
    pub display: DisplayOptions,
    pub discord_processes: Vec<String>,
    pub wait_for_league: WaitTimeout,
    pub wait_for_discord: WaitTimeout,
    pub launch_league: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self::merge(FileSettings::default(), &Cli::default())
    }
}

impl AppSettings {
    /// CLI flags win over the file; boolean toggles are OR-ed
    pub fn merge(file: FileSettings, cli: &Cli) -> Self {
        let client_id = cli
            .client_id
            .clone()
            .or(file.client_id)
            .unwrap_or_else(|| DEFAULT_CLIENT_ID.to_string());

        let display = DisplayOptions {
            show_stats: !(cli.no_stats || file.no_stats),
            show_rank: !(cli.no_rank || file.no_rank),
            show_emojis: !(cli.hide_emojis || file.hide_emojis),
        };

        let mut discord_processes: Vec<String> = DISCORD_PROCESS_NAMES
            .iter()
            .map(|name| name.to_string())
            .collect();
        for name in file.add_process.into_iter().chain(cli.add_process.iter().cloned()) {
            if !discord_processes.contains(&name) {
                discord_processes.push(name);
            }
        }

        let wait_for_league = cli.wait_for_league.or(file.wait_for_league).unwrap_or(-1);
        let wait_for_discord = cli.wait_for_discord.or(file.wait_for_discord).unwrap_or(-1);

        let launch_league = match &cli.launch_league {
            Some(Some(path)) => Some(path.clone()),
            Some(None) => Some(
                file.launch_league
                    .unwrap_or_else(crate::launcher::default_client_path),
            ),
            None => file.launch_league,
        };

        Self {
            client_id,
            display,
            discord_processes,
            wait_for_league: WaitTimeout::from_secs(wait_for_league),
            wait_for_discord: WaitTimeout::from_secs(wait_for_discord),
            launch_league,
        }
    }
}

fn get_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
}

/// Reads the settings file; a missing file yields defaults
pub fn load_file_settings(path: Option<&Path>) -> Result<FileSettings> {
    tracing::debug!("Loading settings");
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match get_settings_path() {
            Some(path) => path,
            None => return Ok(FileSettings::default()),
        },
    };

    if !path.exists() {
        return Ok(FileSettings::default());
    }

    let contents = fs::read_to_string(&path).map_err(|e| {
        Error::fatal(format!(
            "Failed to read settings file {}: {}",
            path.display(),
            e
        ))
    })?;

    serde_json::from_str(&contents).map_err(|e| {
        Error::fatal_with_guidance(
            format!("Failed to parse settings file {}: {}", path.display(), e),
            "Fix or remove the settings file, or pass --config with another path.",
        )
    })
}

pub fn load_settings(cli: &Cli) -> Result<AppSettings> {
    let file = load_file_settings(cli.config.as_deref())?;
    Ok(AppSettings::merge(file, cli))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["league-presence"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn negative_wait_means_infinite() {
        assert_eq!(WaitTimeout::from_secs(-1), WaitTimeout::Infinite);
        assert_eq!(WaitTimeout::from_secs(0), WaitTimeout::Seconds(0));
        assert_eq!(WaitTimeout::from_secs(30), WaitTimeout::Seconds(30));
    }

    #[test]
    fn defaults_without_file_or_flags() {
        let settings = AppSettings::merge(FileSettings::default(), &cli(&[]));
        assert_eq!(settings.client_id, DEFAULT_CLIENT_ID);
        assert_eq!(settings.display, DisplayOptions::default());
        assert_eq!(settings.wait_for_league, WaitTimeout::Infinite);
        assert!(settings.launch_league.is_none());
        assert_eq!(settings.discord_processes.len(), DISCORD_PROCESS_NAMES.len());
    }

    #[test]
    fn cli_overrides_file_values() {
        let file: FileSettings = serde_json::from_str(
            r#"{
                "client_id": "111",
                "no_rank": true,
                "wait_for_discord": 10,
                "add_process": ["Vesktop"]
            }"#,
        )
        .unwrap();
        let settings = AppSettings::merge(
            file,
            &cli(&["--client-id", "222", "--wait-for-discord", "20", "--add-process", "Vesktop"]),
        );

        assert_eq!(settings.client_id, "222");
        assert!(!settings.display.show_rank);
        assert!(settings.display.show_stats);
        assert_eq!(settings.wait_for_discord, WaitTimeout::Seconds(20));
        assert_eq!(
            settings
                .discord_processes
                .iter()
                .filter(|p| p.as_str() == "Vesktop")
                .count(),
            1
        );
    }

    #[test]
    fn launch_flag_without_value_uses_default_path() {
        let settings = AppSettings::merge(FileSettings::default(), &cli(&["--launch-league"]));
        assert_eq!(settings.launch_league, Some(crate::launcher::default_client_path()));

        let settings = AppSettings::merge(
            FileSettings::default(),
            &cli(&["--launch-league", "C:/Games/RiotClientServices.exe"]),
        );
        assert_eq!(
            settings.launch_league,
            Some(PathBuf::from("C:/Games/RiotClientServices.exe"))
        );
    }

    #[test]
    fn missing_settings_file_yields_defaults() {
        let path = std::env::temp_dir().join("league-presence-missing-settings.json");
        let file = load_file_settings(Some(&path)).unwrap();
        assert!(file.client_id.is_none());
    }

    #[test]
    fn malformed_settings_file_is_fatal() {
        let path = std::env::temp_dir().join(format!(
            "league-presence-bad-settings-{}.json",
            std::process::id()
        ));
        fs::write(&path, "{not json").unwrap();
        let err = load_file_settings(Some(&path)).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(err.is_fatal());
    }
}
