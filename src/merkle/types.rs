use core::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{POSITION_LEFT, POSITION_RIGHT};
use crate::hash::Hash;

/// Side occupied by a sibling relative to the node being proved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// Sibling is the left child; hash `sibling || current`.
    Left,
    /// Sibling is the right child; hash `current || sibling`.
    Right,
}

impl Position {
    /// Parses the JSON label (`"left"` or `"right"`).
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            POSITION_LEFT => Some(Position::Left),
            POSITION_RIGHT => Some(Position::Right),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Position::Left => POSITION_LEFT,
            Position::Right => POSITION_RIGHT,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Single sibling on an authentication path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStep {
    pub position: Position,
    pub hash: Hash,
}

impl ProofStep {
    pub fn new(position: Position, hash: Hash) -> Self {
        Self { position, hash }
    }
}

/// Membership proof for one leaf, ordered leaf to root.
///
/// The root travels next to the path; it is never one of the steps.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipProof {
    pub index: usize,
    pub leaf: Hash,
    pub proof: Vec<ProofStep>,
    pub root: Hash,
}

impl MembershipProof {
    /// Returns the sibling path.
    pub fn path(&self) -> &[ProofStep] {
        &self.proof
    }

    /// Folds the path from the embedded leaf and compares to the embedded root.
    pub fn verify(&self) -> bool {
        super::proof::verify(&self.leaf, &self.proof, &self.root)
    }

    /// Checks the path against an externally trusted root.
    pub fn verify_against(&self, expected_root: &Hash) -> bool {
        super::proof::verify(&self.leaf, &self.proof, expected_root)
    }
}
