/// Where a session stands in its one interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionState {
    AwaitingData,
    Loaded,
}

impl SessionState {
    pub fn as_str(&self) -> &str {
        match self {
            SessionState::AwaitingData => "AwaitingData",
            SessionState::Loaded => "Loaded",
        }
    }
}
