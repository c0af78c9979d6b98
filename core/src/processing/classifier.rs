use crate::ingest::record::OperationalMode;
use crate::processing::timebase::TimedRecord;
use crate::telemetry::log::LogManager;

/// Battery reading: any record whose state is not the pulse sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerSample {
    pub time: f64,
    pub mode: OperationalMode,
    /// Signed microamps; the sign carries charge direction.
    pub current: i64,
    pub voltage: u32,
    pub level: u32,
}

/// Haptic trigger. Mode, voltage and level are meaningless for pulses and
/// are dropped here. `intensity` is the record's value as logged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseEvent {
    pub time: f64,
    pub intensity: i64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedStreams {
    pub power: Vec<PowerSample>,
    pub pulses: Vec<PulseEvent>,
}

impl ClassifiedStreams {
    pub fn len(&self) -> usize {
        self.power.len() + self.pulses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Splits timed records on the `state` sentinel into two owned streams.
pub struct RecordClassifier {
    logger: LogManager,
}

impl RecordClassifier {
    pub fn new() -> Self {
        Self {
            logger: LogManager::new("classifier"),
        }
    }

    pub fn classify(&self, records: &[TimedRecord]) -> ClassifiedStreams {
        let mut streams = ClassifiedStreams::default();
        for timed in records {
            let record = &timed.record;
            if record.is_pulse() {
                streams.pulses.push(PulseEvent {
                    time: timed.time,
                    intensity: record.value,
                });
            } else {
                streams.power.push(PowerSample {
                    time: timed.time,
                    mode: OperationalMode::from_raw(record.mode),
                    current: record.value,
                    voltage: record.voltage,
                    level: record.level,
                });
            }
        }

        if streams.power.is_empty() {
            self.logger.caution("no power samples in log");
        }
        self.logger.record(&format!(
            "{} power samples, {} pulse events",
            streams.power.len(),
            streams.pulses.len()
        ));
        streams
    }
}

impl Default for RecordClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::record::{Record, PULSE_STATE};

    fn timed(time: f64, state: u32, value: i64) -> TimedRecord {
        timed_with_mode(time, state, 1, value)
    }

    fn timed_with_mode(time: f64, state: u32, mode: u32, value: i64) -> TimedRecord {
        TimedRecord {
            time,
            record: Record {
                time_raw: (time * 1000.0) as i64,
                state,
                mode,
                value,
                voltage: 3700,
                level: 75,
            },
        }
    }

    #[test]
    fn partition_is_total_disjoint_and_ordered() {
        let records = vec![
            timed(0.0, 0, -10),
            timed(0.1, PULSE_STATE, 40),
            timed(0.2, 1, -20),
            timed(0.3, PULSE_STATE, 60),
            timed(0.4, 0, 30),
        ];
        let streams = RecordClassifier::new().classify(&records);

        assert_eq!(streams.len(), records.len());
        let power_times: Vec<f64> = streams.power.iter().map(|s| s.time).collect();
        let pulse_times: Vec<f64> = streams.pulses.iter().map(|p| p.time).collect();
        assert_eq!(power_times, vec![0.0, 0.2, 0.4]);
        assert_eq!(pulse_times, vec![0.1, 0.3]);
        assert_eq!(streams.pulses[1].intensity, 60);
        assert_eq!(streams.power[0].current, -10);
    }

    #[test]
    fn stream_without_power_samples_is_valid() {
        let streams = RecordClassifier::new().classify(&[timed(0.0, PULSE_STATE, 100)]);
        assert!(streams.power.is_empty());
        assert_eq!(streams.pulses.len(), 1);
    }

    #[test]
    fn pulse_intensity_is_passed_through_unchanged() {
        let streams = RecordClassifier::new().classify(&[
            timed(0.0, PULSE_STATE, -40),
            timed(0.5, PULSE_STATE, 250),
        ]);
        let intensities: Vec<i64> = streams.pulses.iter().map(|p| p.intensity).collect();
        assert_eq!(intensities, vec![-40, 250]);
    }

    #[test]
    fn undefined_mode_code_only_affects_power_samples() {
        let streams = RecordClassifier::new().classify(&[
            timed_with_mode(0.0, 0, 3, -60),
            timed_with_mode(0.5, PULSE_STATE, 3, 75),
            timed_with_mode(1.0, 0, 2, -50),
        ]);
        let modes: Vec<OperationalMode> = streams.power.iter().map(|s| s.mode).collect();
        assert_eq!(modes, vec![OperationalMode::Stealth, OperationalMode::Clinical]);
        assert_eq!(streams.pulses.len(), 1);
        assert_eq!(streams.pulses[0].intensity, 75);
    }
}
