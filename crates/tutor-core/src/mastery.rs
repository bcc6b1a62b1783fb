use serde::{Deserialize, Serialize};

/// What a learner has recorded about one concept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mastery {
    /// The learner already knows the concept.
    #[serde(default)]
    pub has: bool,
    /// The learner explicitly asked to learn the concept.
    #[serde(default)]
    pub wants: bool,
}

impl Mastery {
    pub fn has() -> Self {
        Self {
            has: true,
            wants: false,
        }
    }

    pub fn wants() -> Self {
        Self {
            has: false,
            wants: true,
        }
    }
}
