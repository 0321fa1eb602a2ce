//! Starts the game client through the Riot client services executable

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};

const RIOT_CLIENT_EXECUTABLE: &str = "RiotClientServices.exe";
const RIOT_CLIENT_RELATIVE_PATH: &str = "Riot Games/Riot Client/RiotClientServices.exe";
const COMMON_DRIVES: &[&str] = &["C:/", "D:/", "E:/", "F:/"];

/// First existing install across the common drives, or the `C:` location
pub fn default_client_path() -> PathBuf {
    COMMON_DRIVES
        .iter()
        .map(|drive| Path::new(drive).join(RIOT_CLIENT_RELATIVE_PATH))
        .find(|path| path.exists())
        .unwrap_or_else(|| Path::new(COMMON_DRIVES[0]).join(RIOT_CLIENT_RELATIVE_PATH))
}

/// Arguments for `path`; only the Riot client services needs the product flags
pub fn launch_args(path: &Path) -> Vec<&'static str> {
    let is_riot_client = path
        .file_name()
        .map(|name| name.to_string_lossy().eq_ignore_ascii_case(RIOT_CLIENT_EXECUTABLE))
        .unwrap_or(false);

    if is_riot_client {
        vec!["--launch-product=league_of_legends", "--launch-patchline=live"]
    } else {
        Vec::new()
    }
}

/// Spawns the client and leaves it running independently
pub fn launch_client(path: &Path) -> Result<()> {
    tracing::info!("Launching League of Legends from {}", path.display());

    Command::new(path)
        .args(launch_args(path))
        .spawn()
        .map(|_| ())
        .map_err(|e| {
            Error::fatal_with_guidance(
                format!("Failed to launch {}: {}", path.display(), e),
                "Check the path passed to --launch-league.",
            )
        })
}
