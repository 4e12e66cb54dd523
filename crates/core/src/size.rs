//! The closed set of garment sizes.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Garment size label.
///
/// The set is closed and the declaration order is the canonical order used
/// everywhere sizes are enumerated or sorted (`P, M, G, GG, G1, G2, G3`).
/// `Ord` follows declaration order, so ordered collections keyed by `Size`
/// iterate canonically for free.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Size {
    P,
    M,
    G,
    GG,
    G1,
    G2,
    G3,
}

impl Size {
    /// All sizes in canonical order.
    pub const ALL: [Size; 7] = [
        Size::P,
        Size::M,
        Size::G,
        Size::GG,
        Size::G1,
        Size::G2,
        Size::G3,
    ];

    /// The standard grade (`P` through `GG`).
    pub const STANDARD: [Size; 4] = [Size::P, Size::M, Size::G, Size::GG];

    /// The plus grade (`G1` through `G3`).
    pub const PLUS: [Size; 3] = [Size::G1, Size::G2, Size::G3];

    pub fn as_str(&self) -> &'static str {
        match self {
            Size::P => "P",
            Size::M => "M",
            Size::G => "G",
            Size::GG => "GG",
            Size::G1 => "G1",
            Size::G2 => "G2",
            Size::G3 => "G3",
        }
    }

    /// Whether this size belongs to the plus grade (`G1`..`G3`).
    pub fn is_plus(&self) -> bool {
        matches!(self, Size::G1 | Size::G2 | Size::G3)
    }
}

impl core::fmt::Display for Size {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Size {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "P" => Ok(Size::P),
            "M" => Ok(Size::M),
            "G" => Ok(Size::G),
            "GG" => Ok(Size::GG),
            "G1" => Ok(Size::G1),
            "G2" => Ok(Size::G2),
            "G3" => Ok(Size::G3),
            other => Err(DomainError::validation(format!("unknown size label: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order_matches_declaration_order() {
        let mut sorted = Size::ALL;
        sorted.sort();
        assert_eq!(sorted, Size::ALL);
        assert!(Size::P < Size::M);
        assert!(Size::GG < Size::G1);
    }

    #[test]
    fn parse_accepts_known_labels_case_insensitively() {
        assert_eq!("gg".parse::<Size>().unwrap(), Size::GG);
        assert_eq!(" g1 ".parse::<Size>().unwrap(), Size::G1);
    }

    #[test]
    fn parse_rejects_unknown_labels() {
        let err = "XL".parse::<Size>().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn grades_partition_the_set() {
        for size in Size::ALL {
            let in_standard = Size::STANDARD.contains(&size);
            let in_plus = Size::PLUS.contains(&size);
            assert!(in_standard ^ in_plus);
            assert_eq!(size.is_plus(), in_plus);
        }
    }
}
