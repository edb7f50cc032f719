//! Minimum connection slack.

/// Supplies the minimum buffer between reaching a stop and boarding the next
/// vehicle.
pub trait SlackProvider: Send + Sync {
    /// Slack in seconds required for a transfer.
    fn transfer_slack(&self) -> i32;
}

/// Slack provider with a single fixed transfer slack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultSlackProvider {
    transfer_slack: i32,
}

impl DefaultSlackProvider {
    pub fn new(transfer_slack: i32) -> Self {
        Self { transfer_slack }
    }
}

impl SlackProvider for DefaultSlackProvider {
    fn transfer_slack(&self) -> i32 {
        self.transfer_slack
    }
}
