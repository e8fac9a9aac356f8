use serde::{Deserialize, Serialize};

/// Library-list categories backing unconstrained value lookups for the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LibraryCategory {
    Offices,
    Positions,
    Signatories,
}

impl LibraryCategory {
    pub const ALL: [LibraryCategory; 3] = [
        LibraryCategory::Offices,
        LibraryCategory::Positions,
        LibraryCategory::Signatories,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LibraryCategory::Offices => "offices",
            LibraryCategory::Positions => "positions",
            LibraryCategory::Signatories => "signatories",
        }
    }

    pub fn parse(raw: &str) -> Option<LibraryCategory> {
        LibraryCategory::ALL.iter().copied().find(|c| c.as_str() == raw)
    }
}
