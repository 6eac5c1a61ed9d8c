use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calculations::common::group_thousands;

/// Price range produced by the pricing engine, in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Estimate {
    pub low: i64,
    pub average: i64,
    pub high: i64,
}

impl Estimate {
    /// Range label embedded in the submitted form, e.g. `€39 950 - €58 750`.
    pub fn range_label(&self) -> String {
        format!(
            "€{} - €{}",
            group_thousands(self.low),
            group_thousands(self.high)
        )
    }
}

impl fmt::Display for Estimate {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "{} - {} € (moyenne : {} €)",
            group_thousands(self.low),
            group_thousands(self.high),
            group_thousands(self.average)
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn range_label_groups_thousands() {
        let estimate = Estimate {
            low: 39950,
            average: 47000,
            high: 58750,
        };

        assert_eq!(estimate.range_label(), "€39 950 - €58 750");
    }

    #[test]
    fn display_includes_average() {
        let estimate = Estimate {
            low: 850,
            average: 1000,
            high: 1250,
        };

        assert_eq!(estimate.to_string(), "850 - 1 250 € (moyenne : 1 000 €)");
    }
}
