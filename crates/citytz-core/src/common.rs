use crate::model::Record;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Simple aggregate statistics for a loaded dataset.
///
/// Country and timezone counts are distinct values; records with an empty
/// ISO2 code or timezone are not counted towards them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbStats {
    pub records: usize,
    pub countries: usize,
    pub timezones: usize,
}

impl DbStats {
    pub fn from_records(records: &[Record]) -> Self {
        let countries: HashSet<&str> = records
            .iter()
            .map(|r| r.iso2.as_str())
            .filter(|s| !s.is_empty())
            .collect();
        let timezones: HashSet<&str> = records
            .iter()
            .map(|r| r.timezone.as_str())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            records: records.len(),
            countries: countries.len(),
            timezones: timezones.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_distinct_non_empty_values() {
        let rec = |iso2: &str, tz: &str| Record {
            iso2: iso2.into(),
            timezone: tz.into(),
            ..Default::default()
        };
        let records = vec![
            rec("DE", "Europe/Berlin"),
            rec("DE", "Europe/Berlin"),
            rec("US", "America/Chicago"),
            rec("", ""),
        ];

        let stats = DbStats::from_records(&records);
        assert_eq!(
            stats,
            DbStats {
                records: 4,
                countries: 2,
                timezones: 2
            }
        );
    }
}
