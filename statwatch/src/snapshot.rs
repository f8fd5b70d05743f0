//! Parsing of the statistics line returned by the endpoint.
//!
//! The body is a single line of seven comma-separated values in fixed order:
//! load average, total memory, used memory, total disk, used disk, network
//! capacity and network usage. Byte counts are unsigned 64-bit integers and
//! network values are bytes per second.

use crate::error::{PollError, Result};

/// Number of fields in a statistics line
pub const FIELD_COUNT: usize = 7;

const FIELD_NAMES: [&str; FIELD_COUNT] = [
    "load average",
    "total memory",
    "used memory",
    "total disk",
    "used disk",
    "network capacity",
    "network usage",
];

/// One fully parsed statistics line.
///
/// A snapshot only exists when all seven fields parsed; there is no partial
/// form.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSnapshot {
    pub load_average: f64,
    /// Load average exactly as the server sent it, used for display
    pub load_average_text: String,
    pub total_memory: u64,
    pub used_memory: u64,
    pub total_disk: u64,
    pub used_disk: u64,
    pub network_capacity: u64,
    pub network_used: u64,
}

impl StatsSnapshot {
    /// Parse a raw response body.
    ///
    /// Any field that fails to parse rejects the whole body.
    pub fn parse(body: &str) -> Result<Self> {
        let line = body.trim();
        if line.is_empty() {
            return Err(PollError::EmptyBody);
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != FIELD_COUNT {
            return Err(PollError::FieldCount {
                expected: FIELD_COUNT,
                actual: fields.len(),
            });
        }

        let load_average = fields[0]
            .parse::<f64>()
            .map_err(|_| numeric_error(0, fields[0]))?;

        Ok(Self {
            load_average,
            load_average_text: fields[0].to_string(),
            total_memory: parse_u64(&fields, 1)?,
            used_memory: parse_u64(&fields, 2)?,
            total_disk: parse_u64(&fields, 3)?,
            used_disk: parse_u64(&fields, 4)?,
            network_capacity: parse_u64(&fields, 5)?,
            network_used: parse_u64(&fields, 6)?,
        })
    }
}

fn parse_u64(fields: &[&str], index: usize) -> Result<u64> {
    fields[index]
        .parse::<u64>()
        .map_err(|_| numeric_error(index, fields[index]))
}

fn numeric_error(index: usize, value: &str) -> PollError {
    PollError::NumericFormat {
        field: FIELD_NAMES[index],
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_line() {
        let snapshot = StatsSnapshot::parse(
            " 1.50, 16000000000, 8000000000, 500000000000, 100000000000, 125000000, 1000000\n",
        )
        .unwrap();

        assert_eq!(snapshot.load_average, 1.5);
        assert_eq!(snapshot.load_average_text, "1.50");
        assert_eq!(snapshot.total_memory, 16_000_000_000);
        assert_eq!(snapshot.used_memory, 8_000_000_000);
        assert_eq!(snapshot.total_disk, 500_000_000_000);
        assert_eq!(snapshot.used_disk, 100_000_000_000);
        assert_eq!(snapshot.network_capacity, 125_000_000);
        assert_eq!(snapshot.network_used, 1_000_000);
    }

    #[test]
    fn test_parse_empty_body() {
        assert!(matches!(StatsSnapshot::parse(""), Err(PollError::EmptyBody)));
        assert!(matches!(StatsSnapshot::parse("  \r\n\t"), Err(PollError::EmptyBody)));
    }

    #[test]
    fn test_parse_wrong_field_count() {
        let six = StatsSnapshot::parse("1,2,3,4,5,6");
        assert!(matches!(
            six,
            Err(PollError::FieldCount { expected: 7, actual: 6 })
        ));

        let eight = StatsSnapshot::parse("1,2,3,4,5,6,7,8");
        assert!(matches!(
            eight,
            Err(PollError::FieldCount { expected: 7, actual: 8 })
        ));
    }

    #[test]
    fn test_parse_bad_load_average() {
        let err = StatsSnapshot::parse("high,1,1,1,1,1,1").unwrap_err();
        match err {
            PollError::NumericFormat { field, value } => {
                assert_eq!(field, "load average");
                assert_eq!(value, "high");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_bad_integer_rejects_whole_line() {
        let err = StatsSnapshot::parse("1.0,100,85,100,50,100,-5").unwrap_err();
        match err {
            PollError::NumericFormat { field, value } => {
                assert_eq!(field, "network usage");
                assert_eq!(value, "-5");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(StatsSnapshot::parse("1.0,100,8.5,100,50,100,5").is_err());
        assert!(StatsSnapshot::parse("1.0,100,,100,50,100,5").is_err());
    }
}
