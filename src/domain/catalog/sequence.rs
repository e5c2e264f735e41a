//! Sequence enum - the two ordered phases of a switching procedure.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two ordered phases of the procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sequence {
    /// Sequence A: isolate, lock and earth the equipment.
    DeEnergise,
    /// Sequence B: return the equipment to service.
    Energise,
}

impl Sequence {
    /// All sequences in procedure order.
    pub const ALL: [Sequence; 2] = [Sequence::DeEnergise, Sequence::Energise];

    /// Short tab label.
    pub fn label(&self) -> &'static str {
        match self {
            Sequence::DeEnergise => "De-energise",
            Sequence::Energise => "Energise",
        }
    }

    /// Section heading used in rendered documents.
    pub fn title(&self) -> &'static str {
        match self {
            Sequence::DeEnergise => "De-energise – Make Safe",
            Sequence::Energise => "Energise – Return to Service",
        }
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn de_energise_precedes_energise() {
        assert!(Sequence::DeEnergise < Sequence::Energise);
        assert_eq!(Sequence::ALL[0], Sequence::DeEnergise);
    }

    #[test]
    fn sequence_serializes_to_snake_case() {
        assert_eq!(
            serde_json::to_string(&Sequence::DeEnergise).unwrap(),
            "\"de_energise\""
        );
    }

    #[test]
    fn title_describes_phase_purpose() {
        assert_eq!(Sequence::Energise.title(), "Energise – Return to Service");
    }
}
