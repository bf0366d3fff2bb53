//! Event tags attached to ledger months and their display labels

use serde::{Deserialize, Serialize};
use std::fmt;

/// Something that happened to pay or balances in a given month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventTag {
    /// Promotion raised basic by `percent` (whole percent, truncated)
    Promotion { percent: i64 },

    /// Annual increment of `percent` on basic
    AnnualIncrement { percent: i64 },

    /// January DA revision adding `step_percent` of basic to DA
    DaRevision { step_percent: i64 },

    /// Pay commission reset: DA zeroed and basic re-fixed
    PayCommissionReset { year: i32 },

    /// Interest deferred from March was credited into this month's opening balance
    PreviousFyInterestCredited,
}

impl fmt::Display for EventTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventTag::Promotion { percent } => write!(f, "Promotion: Basic +{}%", percent),
            EventTag::AnnualIncrement { percent } => write!(f, "Annual {}% Increment", percent),
            EventTag::DaRevision { step_percent } => {
                write!(f, "Annual DA Revision ({}% of Basic)", step_percent)
            }
            EventTag::PayCommissionReset { year } => write!(f, "Pay Commission {}, DA Reset", year),
            EventTag::PreviousFyInterestCredited => write!(f, "Previous FY Interest Credited"),
        }
    }
}

/// Join tags into the ledger's event text
///
/// Pay revisions are space-separated; the interest credit note follows after a comma.
pub fn event_label(tags: &[EventTag]) -> String {
    let mut label = String::new();
    for tag in tags {
        if !label.is_empty() {
            match tag {
                EventTag::PreviousFyInterestCredited => label.push_str(", "),
                _ => label.push(' '),
            }
        }
        label.push_str(&tag.to_string());
    }
    label
}

/// Whole percent used in labels for a fractional rate (0.04 -> 4)
pub(crate) fn whole_percent(rate: f64) -> i64 {
    (rate * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_labels() {
        assert_eq!(EventTag::Promotion { percent: 10 }.to_string(), "Promotion: Basic +10%");
        assert_eq!(EventTag::AnnualIncrement { percent: 3 }.to_string(), "Annual 3% Increment");
        assert_eq!(
            EventTag::DaRevision { step_percent: 4 }.to_string(),
            "Annual DA Revision (4% of Basic)"
        );
        assert_eq!(
            EventTag::PayCommissionReset { year: 2030 }.to_string(),
            "Pay Commission 2030, DA Reset"
        );
    }

    #[test]
    fn test_join_formatting() {
        assert_eq!(event_label(&[]), "");
        assert_eq!(
            event_label(&[EventTag::PreviousFyInterestCredited]),
            "Previous FY Interest Credited"
        );
        assert_eq!(
            event_label(&[
                EventTag::AnnualIncrement { percent: 3 },
                EventTag::DaRevision { step_percent: 2 },
            ]),
            "Annual 3% Increment Annual DA Revision (2% of Basic)"
        );
        assert_eq!(
            event_label(&[
                EventTag::Promotion { percent: 15 },
                EventTag::PreviousFyInterestCredited,
            ]),
            "Promotion: Basic +15%, Previous FY Interest Credited"
        );
    }

    #[test]
    fn test_whole_percent() {
        assert_eq!(whole_percent(0.04), 4);
        assert_eq!(whole_percent(0.02), 2);
        assert_eq!(whole_percent(0.01), 1);
        assert_eq!(whole_percent(0.03), 3);
    }
}
