use std::path::PathBuf;

use clap::Parser;

/// Mirror the League of Legends client state onto Discord Rich Presence
#[derive(Parser, Debug, Default, Clone)]
#[command(name = "league-presence", version, about)]
pub struct Cli {
    /// Discord application id to present as
    #[arg(long)]
    pub client_id: Option<String>,

    /// Hide in-game stats (KDA, creep score, gold)
    #[arg(long)]
    pub no_stats: bool,

    /// Hide ranked emblems and standings
    #[arg(long)]
    pub no_rank: bool,

    /// Hide the status glyph in front of the availability
    #[arg(long)]
    pub hide_emojis: bool,

    /// Extra Discord process names to wait for (e.g. third party clients)
    #[arg(long, num_args = 1..)]
    pub add_process: Vec<String>,

    /// Seconds to wait for the game client, -1 waits forever
    #[arg(long, allow_negative_numbers = true)]
    pub wait_for_league: Option<i64>,

    /// Seconds to wait for Discord, -1 waits forever
    #[arg(long, allow_negative_numbers = true)]
    pub wait_for_discord: Option<i64>,

    /// Start the game client first; without a value the Riot client services path is probed
    #[arg(long, num_args = 0..=1, value_name = "PATH")]
    pub launch_league: Option<Option<PathBuf>>,

    /// Settings file to read instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Verbose logging
    #[arg(long)]
    pub debug: bool,
}
