//! Port and auth token for the client API

use std::path::Path;

use crate::error::{Error, Result};
use crate::process::{cmdline_value, ProcessTable, CLIENT_UX_PROCESS_NAME};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcuCredentials {
    pub port: u16,
    pub token: String,
}

impl LcuCredentials {
    /// Reads `--app-port=` and `--remoting-auth-token=` from the client command line
    pub fn from_cmdline<S: AsRef<str>>(args: &[S]) -> Option<Self> {
        let port = cmdline_value(args, "app-port")?.parse().ok()?;
        let token = cmdline_value(args, "remoting-auth-token")?;
        if token.is_empty() {
            return None;
        }
        Some(Self { port, token })
    }

    /// Parses a lockfile: `name:pid:port:password:protocol`
    pub fn from_lockfile(contents: &str) -> Option<Self> {
        let mut parts = contents.trim().split(':');
        let _name = parts.next()?;
        let _pid = parts.next()?;
        let port = parts.next()?.parse().ok()?;
        let token = parts.next()?.to_string();
        let _protocol = parts.next()?;
        Some(Self { port, token })
    }

    pub fn base_url(&self) -> String {
        format!("https://127.0.0.1:{}", self.port)
    }

    pub fn websocket_url(&self) -> String {
        format!("wss://127.0.0.1:{}/", self.port)
    }
}

fn read_lockfile(install_dir: &Path) -> Option<LcuCredentials> {
    let path = install_dir.join("lockfile");
    match std::fs::read_to_string(&path) {
        Ok(contents) => LcuCredentials::from_lockfile(&contents),
        Err(e) => {
            tracing::debug!("Could not read lockfile {}: {}", path.display(), e);
            None
        }
    }
}

/// Locates the running client and extracts its credentials
pub fn discover() -> Result<LcuCredentials> {
    let mut table = ProcessTable::new();
    table.refresh();

    let args = table
        .cmdline(CLIENT_UX_PROCESS_NAME)
        .ok_or_else(|| Error::Transient("League client process not found".to_string()))?;

    if let Some(credentials) = LcuCredentials::from_cmdline(&args) {
        return Ok(credentials);
    }

    cmdline_value(&args, "install-directory")
        .and_then(|dir| read_lockfile(Path::new(&dir)))
        .ok_or_else(|| Error::Transient("League client credentials not available yet".to_string()))
}
