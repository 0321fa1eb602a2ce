mod live;
mod ranked;
mod snapshot;
mod view;

pub use live::{ChampionArt, InGameMode, Kda, LiveGameSample};
pub use ranked::{ArenaStat, RankedStat, ARENA_QUEUE, FLEX_QUEUE, SOLO_DUO_QUEUE, TFT_QUEUE};
pub use snapshot::{Availability, Companion, Phase, SharedSnapshot, Snapshot};
pub use view::PresenceView;
