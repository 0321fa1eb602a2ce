mod presence;

pub use presence::{DiscordPresence, RECONNECT_ATTEMPTS, RECONNECT_DELAY};
