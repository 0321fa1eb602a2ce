//! Process table queries for the game client, the game and Discord

use std::time::{Duration, Instant};

use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind};

use crate::error::{Error, Result};
use crate::settings::WaitTimeout;

pub const CLIENT_PROCESS_NAMES: &[&str] = &["LeagueClient.exe", "LeagueClientUx.exe"];
pub const CLIENT_UX_PROCESS_NAME: &str = "LeagueClientUx.exe";
pub const GAME_PROCESS_NAME: &str = "League of Legends.exe";
pub const RIOT_CLIENT_PROCESS_NAMES: &[&str] = &["RiotClientServices.exe", "RiotClientUx.exe"];

const POLL_INTERVAL: Duration = Duration::from_secs(5);
const DEFAULT_LOCALE: &str = "en_US";

/// Coarse state derived from which executables are running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    NotRunning,
    InLobby,
    InGame,
}

fn matches_any(process_name: &str, names: &[&str]) -> bool {
    let process_name = process_name.to_lowercase();
    names
        .iter()
        .any(|name| process_name.contains(&name.to_lowercase()))
}

/// Case-insensitive substring match against a list of running process names
pub fn any_running<S: AsRef<str>>(running: &[S], names: &[&str]) -> bool {
    running.iter().any(|p| matches_any(p.as_ref(), names))
}

pub fn classify<S: AsRef<str>>(running: &[S]) -> ClientState {
    if !any_running(running, CLIENT_PROCESS_NAMES) {
        ClientState::NotRunning
    } else if any_running(running, &[GAME_PROCESS_NAME]) {
        ClientState::InGame
    } else {
        ClientState::InLobby
    }
}

/// Value of `--{key}=` in a process command line
pub fn cmdline_value<S: AsRef<str>>(args: &[S], key: &str) -> Option<String> {
    let prefix = format!("--{}=", key);
    args.iter().find_map(|arg| {
        arg.as_ref()
            .strip_prefix(&prefix)
            .map(|value| value.trim_matches('"').to_string())
    })
}

/// Thin wrapper over a sysinfo process table
pub struct ProcessTable {
    system: System,
}

impl ProcessTable {
    pub fn new() -> Self {
        Self {
            system: System::new(),
        }
    }

    pub fn refresh(&mut self) {
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_cmd(UpdateKind::OnlyIfNotSet),
        );
    }

    pub fn names(&self) -> Vec<String> {
        self.system
            .processes()
            .values()
            .map(|p| p.name().to_string_lossy().to_string())
            .collect()
    }

    /// Command line of the first process whose name matches `name`
    pub fn cmdline(&self, name: &str) -> Option<Vec<String>> {
        self.system
            .processes()
            .values()
            .find(|p| matches_any(&p.name().to_string_lossy(), &[name]))
            .map(|p| {
                p.cmd()
                    .iter()
                    .map(|arg| arg.to_string_lossy().to_string())
                    .collect()
            })
    }

    pub fn client_state(&mut self) -> ClientState {
        self.refresh();
        classify(&self.names())
    }

    pub fn is_running(&mut self, names: &[&str]) -> bool {
        self.refresh();
        any_running(&self.names(), names)
    }
}

impl Default for ProcessTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs `f` against `table` on the blocking pool; a full refresh walks
/// every process on the system
async fn scan<T, F>(mut table: ProcessTable, f: F) -> Result<(ProcessTable, T)>
where
    T: Send + 'static,
    F: FnOnce(&mut ProcessTable) -> T + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let out = f(&mut table);
        (table, out)
    })
    .await
    .map_err(|e| Error::Transient(format!("Process scan failed: {}", e)))
}

/// Current client state from a fresh process table
pub async fn client_state() -> Result<ClientState> {
    let (_, state) = scan(ProcessTable::new(), ProcessTable::client_state).await?;
    Ok(state)
}

/// Whether any of `names` is running, from a fresh process table
pub async fn is_running(names: &[&str]) -> Result<bool> {
    let names: Vec<String> = names.iter().map(|name| name.to_string()).collect();
    let (_, running) = scan(ProcessTable::new(), move |table| {
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        table.is_running(&names)
    })
    .await?;
    Ok(running)
}

fn read_locale(table: &mut ProcessTable) -> String {
    table.refresh();
    table
        .cmdline(CLIENT_UX_PROCESS_NAME)
        .and_then(|args| cmdline_value(&args, "locale"))
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string())
}

/// Locale the game client was started with
pub async fn game_locale() -> String {
    match scan(ProcessTable::new(), read_locale).await {
        Ok((_, locale)) => locale,
        Err(e) => {
            tracing::debug!("Falling back to {}: {}", DEFAULT_LOCALE, e);
            DEFAULT_LOCALE.to_string()
        }
    }
}

/// Polls until one of `names` is running. A bounded wait that expires is fatal.
pub async fn wait_for(
    label: &str,
    names: &[&str],
    timeout: WaitTimeout,
    guidance: &str,
) -> Result<()> {
    let started = Instant::now();
    let owned: Vec<String> = names.iter().map(|name| name.to_string()).collect();
    let mut table = ProcessTable::new();
    let mut announced = false;

    loop {
        let names = owned.clone();
        let (scanned, running) = scan(table, move |table| {
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            table.is_running(&names)
        })
        .await?;
        table = scanned;

        if running {
            tracing::info!("{} is running", label);
            return Ok(());
        }

        if let WaitTimeout::Seconds(secs) = timeout {
            if started.elapsed() >= Duration::from_secs(secs) {
                return Err(Error::fatal_with_guidance(
                    format!("{} was not found within {}s", label, secs),
                    guidance,
                ));
            }
        }

        if !announced {
            tracing::info!("Waiting for {}...", label);
            announced = true;
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_client_and_game_processes() {
        assert_eq!(classify(&["explorer.exe", "Discord.exe"]), ClientState::NotRunning);
        assert_eq!(
            classify(&["LeagueClientUx.exe", "Discord.exe"]),
            ClientState::InLobby
        );
        assert_eq!(
            classify(&["leagueclient.exe", "League of Legends.exe"]),
            ClientState::InGame
        );
        // The game alone without the client is treated as not running
        assert_eq!(classify(&["League of Legends.exe"]), ClientState::NotRunning);
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        assert!(any_running(&["DiscordCanary.exe"], &["discord"]));
        assert!(any_running(&["Vesktop"], &["vesk"]));
        assert!(!any_running(&["slack"], &["Discord"]));
    }

    #[test]
    fn reads_cmdline_values() {
        let args = [
            "C:/Riot Games/League of Legends/LeagueClientUx.exe",
            "--app-port=51234",
            "--locale=ko_KR",
            "--install-directory=\"C:/Riot Games/League of Legends\"",
        ];
        assert_eq!(cmdline_value(&args, "app-port").as_deref(), Some("51234"));
        assert_eq!(cmdline_value(&args, "locale").as_deref(), Some("ko_KR"));
        assert_eq!(
            cmdline_value(&args, "install-directory").as_deref(),
            Some("C:/Riot Games/League of Legends")
        );
        assert_eq!(cmdline_value(&args, "remoting-auth-token"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn bounded_wait_for_missing_process_is_fatal() {
        let err = wait_for(
            "Nonexistent",
            &["definitely-not-a-real-process-name-42"],
            WaitTimeout::Seconds(0),
            "Start it first.",
        )
        .await
        .unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(err.guidance(), Some("Start it first."));
    }

    #[tokio::test]
    async fn scans_run_on_the_blocking_pool() {
        // A current-thread runtime still answers while the scan runs elsewhere
        let state = client_state().await.unwrap();
        assert_ne!(state, ClientState::InGame);
        assert!(!is_running(&["definitely-not-a-real-process-name-42"]).await.unwrap());
        assert_eq!(game_locale().await, DEFAULT_LOCALE);
    }
}
