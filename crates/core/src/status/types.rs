use serde::{Deserialize, Serialize};

/// Reveal state of a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealState {
    /// The token's public assets are placeholders; real data stays private.
    Hidden,
    /// The token's real assets are publicly visible.
    Revealed,
}

impl RevealState {
    /// Returns true for `Revealed`.
    pub fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }
}

impl From<bool> for RevealState {
    fn from(revealed: bool) -> Self {
        if revealed {
            Self::Revealed
        } else {
            Self::Hidden
        }
    }
}

impl std::fmt::Display for RevealState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hidden => write!(f, "hidden"),
            Self::Revealed => write!(f, "revealed"),
        }
    }
}
