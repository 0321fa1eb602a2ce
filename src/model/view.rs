/// Fields pushed to the Discord activity.
///
/// Built fresh on every reconciliation pass and compared by value against
/// the last pushed view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PresenceView {
    pub large_image: String,
    pub large_text: String,
    pub small_image: String,
    pub small_text: String,
    /// First activity line
    pub details: String,
    /// Second activity line
    pub state: String,
    /// Epoch seconds the elapsed timer counts from
    pub start: i64,
}
