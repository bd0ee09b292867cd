//! Team references and the reserved bracket sentinels.

use serde::{Deserialize, Serialize};

/// Identifier supplied by the team source. Opaque to the engine.
pub type TeamId = String;

/// Reserved id: "no opponent this round", a free pass.
pub const BYE_ID: &str = "bye";
/// Reserved id: slot whose occupant is not known yet.
pub const TO_BE_DEFINED_ID: &str = "to-be-defined";

/// Immutable reference to a team as it appears in a fixture slot.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: TeamId,
    pub name: String,
    #[serde(default)]
    pub crest_url: String,
}

impl TeamRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>, crest_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            crest_url: crest_url.into(),
        }
    }

    /// The free-pass sentinel.
    pub fn bye() -> Self {
        Self::new(BYE_ID, "Bye", "")
    }

    /// The unresolved-slot sentinel.
    pub fn to_be_defined() -> Self {
        Self::new(TO_BE_DEFINED_ID, "To be defined", "")
    }

    pub fn is_bye(&self) -> bool {
        self.id == BYE_ID
    }

    /// True for every occupant except `to-be-defined` (a bye counts as defined).
    pub fn is_defined(&self) -> bool {
        self.id != TO_BE_DEFINED_ID
    }

    /// A real team: neither sentinel.
    pub fn is_real(&self) -> bool {
        self.is_defined() && !self.is_bye()
    }

    /// Whether `id` collides with one of the sentinels.
    pub fn is_reserved_id(id: &str) -> bool {
        id == BYE_ID || id == TO_BE_DEFINED_ID
    }
}
