//! Plain data row types written by output backends.

/// One actor's position and status at a given round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorSnapshotRow {
    pub round:  u64,
    /// `parcel`, `forklift` or `truck`.
    pub kind:   &'static str,
    pub name:   String,
    pub x:      i32,
    pub y:      i32,
    pub status: &'static str,
}

/// What one actor did during a round, already rendered as text
/// (`GO [2,1]`, `TAKE box GREEN`, `WAITING 0/500`, …).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRow {
    pub round:  u64,
    pub actor:  String,
    pub action: String,
}

/// Delivery progress at the end of one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSummaryRow {
    pub round:     u64,
    pub delivered: u64,
    pub remaining: u64,
    pub status:    &'static str,
}

/// Final result of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeRow {
    pub rounds:    u64,
    pub status:    &'static str,
    pub delivered: u64,
    pub total:     u64,
}
