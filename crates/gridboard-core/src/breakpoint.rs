//! Responsive viewport tiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named viewport tier with its own grid column count.
///
/// Variants are declared largest first, so the derived `Ord` sorts the
/// canonical breakpoint before every derived one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Lg,
    Md,
    Sm,
    Xs,
    Xxs,
}

impl Breakpoint {
    /// All breakpoints, largest first.
    pub const ALL: [Breakpoint; 5] = [
        Breakpoint::Lg,
        Breakpoint::Md,
        Breakpoint::Sm,
        Breakpoint::Xs,
        Breakpoint::Xxs,
    ];

    /// The breakpoint whose layout is author-specified; all others are derived from it.
    pub const CANONICAL: Breakpoint = Breakpoint::Lg;

    /// Short name used as the key in persisted layouts.
    pub fn name(self) -> &'static str {
        match self {
            Breakpoint::Lg => "lg",
            Breakpoint::Md => "md",
            Breakpoint::Sm => "sm",
            Breakpoint::Xs => "xs",
            Breakpoint::Xxs => "xxs",
        }
    }

    /// Parse a breakpoint from its short name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|bp| bp.name() == name)
    }

    /// Column count used when no configuration overrides it.
    pub fn default_columns(self) -> u32 {
        match self {
            Breakpoint::Lg => 12,
            Breakpoint::Md => 10,
            Breakpoint::Sm => 6,
            Breakpoint::Xs => 4,
            Breakpoint::Xxs => 2,
        }
    }

    /// Minimum viewport width in pixels at which this breakpoint applies.
    pub fn default_min_width(self) -> u32 {
        match self {
            Breakpoint::Lg => 1200,
            Breakpoint::Md => 996,
            Breakpoint::Sm => 768,
            Breakpoint::Xs => 480,
            Breakpoint::Xxs => 0,
        }
    }

    /// Whether this is the canonical breakpoint.
    pub fn is_canonical(self) -> bool {
        self == Self::CANONICAL
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_names() {
        for bp in Breakpoint::ALL {
            assert_eq!(Breakpoint::parse(bp.name()), Some(bp));
        }
        assert_eq!(Breakpoint::parse("xl"), None);
    }

    #[test]
    fn test_ordering_is_largest_first() {
        let mut sorted = Breakpoint::ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, Breakpoint::ALL.to_vec());
        assert!(Breakpoint::ALL.windows(2).all(|w| w[0].default_columns() > w[1].default_columns()));
    }

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_string(&Breakpoint::Xxs).unwrap();
        assert_eq!(json, "\"xxs\"");
    }
}
