use crate::ingest::record::Record;

const MILLIS_PER_SECOND: f64 = 1000.0;

/// Record paired with its zero-based time in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedRecord {
    pub time: f64,
    pub record: Record,
}

/// Offsets every record by the first record's device clock and rescales to
/// seconds. Runs on the combined sequence so both derived streams share one
/// origin.
pub fn normalize_time(records: &[Record]) -> Vec<TimedRecord> {
    let Some(origin) = records.first().map(|record| record.time_raw) else {
        return Vec::new();
    };
    records
        .iter()
        .map(|record| TimedRecord {
            // Widened so clocks at opposite ends of the i64 range cannot overflow.
            time: (i128::from(record.time_raw) - i128::from(origin)) as f64 / MILLIS_PER_SECOND,
            record: *record,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(time_raw: i64, state: u32) -> Record {
        Record {
            time_raw,
            state,
            mode: 0,
            value: 0,
            voltage: 3700,
            level: 80,
        }
    }

    #[test]
    fn origin_is_first_record_of_combined_sequence() {
        let records = [record(5_000, 99), record(5_250, 0), record(7_000, 0)];
        let times: Vec<f64> = normalize_time(&records).iter().map(|t| t.time).collect();
        assert_eq!(times, vec![0.0, 0.25, 2.0]);
    }

    #[test]
    fn empty_sequence_normalizes_to_empty() {
        assert!(normalize_time(&[]).is_empty());
    }

    #[test]
    fn extreme_clock_values_do_not_overflow() {
        let records = [
            record(-9_000_000_000_000_000_000, 0),
            record(9_000_000_000_000_000_000, 0),
        ];
        let times: Vec<f64> = normalize_time(&records).iter().map(|t| t.time).collect();
        assert_eq!(times[0], 0.0);
        assert_eq!(times[1], 1.8e16);
    }
}
