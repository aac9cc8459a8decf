//! Routine tags.
//!
//! The vocabulary is fixed. Sets of routines are always kept de-duplicated and
//! in alphabetical order, which is also the derived `Ord` of [`Routine`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::BigTimerError;

/// A muscle-group tag attached to a workout.
///
/// Variants are declared alphabetically so the derived ordering sorts by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Routine {
    Back,
    Biceps,
    Chest,
    Legs,
    Shoulder,
    Triceps,
}

impl Routine {
    /// All routines in picker order.
    pub const ALL: [Self; 6] = [
        Self::Back,
        Self::Legs,
        Self::Chest,
        Self::Shoulder,
        Self::Biceps,
        Self::Triceps,
    ];

    /// Parse a routine name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for names outside the vocabulary.
    pub fn parse(s: &str) -> Result<Self, BigTimerError> {
        match s.trim().to_lowercase().as_str() {
            "back" => Ok(Self::Back),
            "legs" | "leg" => Ok(Self::Legs),
            "chest" => Ok(Self::Chest),
            "shoulder" | "shoulders" => Ok(Self::Shoulder),
            "biceps" | "bicep" => Ok(Self::Biceps),
            "triceps" | "tricep" => Ok(Self::Triceps),
            other => Err(BigTimerError::InvalidArgument(format!(
                "Unknown routine '{other}' (expected one of: {})",
                Self::ALL.map(Self::display_name).join(", ")
            ))),
        }
    }

    /// Get display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Back => "Back",
            Self::Biceps => "Biceps",
            Self::Chest => "Chest",
            Self::Legs => "Legs",
            Self::Shoulder => "Shoulder",
            Self::Triceps => "Triceps",
        }
    }
}

impl std::fmt::Display for Routine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for Routine {
    type Err = BigTimerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// De-duplicate and sort routines.
pub fn normalize_routines<I>(routines: I) -> Vec<Routine>
where
    I: IntoIterator<Item = Routine>,
{
    routines
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Join routines for display.
#[must_use]
pub fn join_routines(routines: &[Routine]) -> String {
    routines
        .iter()
        .map(|r| r.display_name())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(Routine::parse("back").unwrap(), Routine::Back);
        assert_eq!(Routine::parse("LEGS").unwrap(), Routine::Legs);
        assert_eq!(Routine::parse(" Shoulders ").unwrap(), Routine::Shoulder);
        assert!(matches!(
            Routine::parse("cardio"),
            Err(BigTimerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_normalize_sorts_and_dedups() {
        let routines = normalize_routines([
            Routine::Triceps,
            Routine::Back,
            Routine::Legs,
            Routine::Back,
            Routine::Biceps,
        ]);
        assert_eq!(
            routines,
            vec![Routine::Back, Routine::Biceps, Routine::Legs, Routine::Triceps]
        );
    }

    #[test]
    fn test_order_matches_names() {
        let mut by_name = Routine::ALL.to_vec();
        by_name.sort_by_key(|r| r.display_name());

        let mut by_ord = Routine::ALL.to_vec();
        by_ord.sort();

        assert_eq!(by_name, by_ord);
    }

    #[test]
    fn test_serializes_as_name() {
        let json = serde_json::to_string(&[Routine::Chest, Routine::Shoulder]).unwrap();
        assert_eq!(json, r#"["Chest","Shoulder"]"#);

        let parsed: Vec<Routine> = serde_json::from_str(r#"["Legs"]"#).unwrap();
        assert_eq!(parsed, vec![Routine::Legs]);
    }

    #[test]
    fn test_join_routines() {
        assert_eq!(join_routines(&[Routine::Back, Routine::Legs]), "Back, Legs");
        assert_eq!(join_routines(&[]), "");
    }
}
