//! Review decision

use crate::prompts::APPROVAL_MARKER;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decision derived from the reviewer's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewVerdict {
    /// The review contains the approval marker
    Approved,
    /// Anything else
    NeedsImprovement,
}

impl ReviewVerdict {
    /// Classify a review by substring match on the approval marker
    pub fn from_review(review: &str) -> Self {
        if review.contains(APPROVAL_MARKER) {
            Self::Approved
        } else {
            Self::NeedsImprovement
        }
    }

    /// Whether the code was approved
    pub fn is_approved(self) -> bool {
        self == Self::Approved
    }
}

impl fmt::Display for ReviewVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Approved => f.write_str("approved"),
            Self::NeedsImprovement => f.write_str("needs improvement"),
        }
    }
}
