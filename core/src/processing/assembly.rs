use crate::math::stats::StatsHelper;
use crate::processing::classifier::PulseEvent;
use crate::render_interface::{ModeRun, PowerPoint, PulsePoint, RenderPayload, SeriesStats};

/// Collapses consecutive samples with equal mode into runs. Each run ends at
/// the next run's first sample; the last run ends at its own last sample.
pub fn mode_runs(power: &[PowerPoint]) -> Vec<ModeRun> {
    let mut runs: Vec<ModeRun> = Vec::new();
    for point in power {
        if let Some(run) = runs.last_mut() {
            run.end_time = point.time;
            if run.mode == point.mode {
                continue;
            }
        }
        runs.push(ModeRun {
            mode: point.mode,
            start_time: point.time,
            end_time: point.time,
        });
    }
    runs
}

pub fn series_stats(power: &[PowerPoint]) -> SeriesStats {
    let currents: Vec<f64> = power.iter().map(|point| point.current_raw).collect();
    let levels: Vec<f64> = power.iter().map(|point| point.level).collect();
    SeriesStats {
        min_current: StatsHelper::min(&currents),
        min_level: StatsHelper::min(&levels),
        max_level: StatsHelper::max(&levels),
        mode_runs: mode_runs(power),
    }
}

/// Builds the finalized renderer payload.
pub fn assemble(power_series: Vec<PowerPoint>, pulses: &[PulseEvent]) -> RenderPayload {
    let pulse_series = pulses
        .iter()
        .map(|pulse| PulsePoint {
            time: pulse.time,
            intensity: pulse.intensity as f64,
        })
        .collect();
    let stats = series_stats(&power_series);
    RenderPayload {
        power_series,
        pulse_series,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::record::OperationalMode::{self, Clinical, Flux, Stealth};

    fn point(time: f64, mode: OperationalMode, current: f64, level: f64) -> PowerPoint {
        PowerPoint {
            time,
            mode,
            current_raw: current,
            current_smoothed: current,
            level,
        }
    }

    #[test]
    fn runs_span_to_next_run_start() {
        let power = vec![
            point(0.0, Stealth, 10.0, 80.0),
            point(1.0, Stealth, 12.0, 80.0),
            point(2.0, Flux, 30.0, 79.0),
            point(3.0, Clinical, 8.0, 79.0),
            point(4.0, Clinical, 9.0, 78.0),
        ];
        let runs = mode_runs(&power);
        assert_eq!(
            runs,
            vec![
                ModeRun {
                    mode: Stealth,
                    start_time: 0.0,
                    end_time: 2.0
                },
                ModeRun {
                    mode: Flux,
                    start_time: 2.0,
                    end_time: 3.0
                },
                ModeRun {
                    mode: Clinical,
                    start_time: 3.0,
                    end_time: 4.0
                },
            ]
        );
    }

    #[test]
    fn single_sample_final_run_has_zero_width() {
        let runs = mode_runs(&[point(0.0, Flux, 1.0, 50.0), point(1.5, Stealth, 1.0, 50.0)]);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].end_time, 1.5);
        assert_eq!(runs[1].duration(), 0.0);
    }

    #[test]
    fn stats_of_empty_power_stream_are_undefined() {
        let payload = assemble(
            Vec::new(),
            &[PulseEvent {
                time: 0.0,
                intensity: -40,
            }],
        );
        assert_eq!(payload.stats.min_current, None);
        assert_eq!(payload.stats.min_level, None);
        assert_eq!(payload.stats.max_level, None);
        assert!(payload.stats.mode_runs.is_empty());
        assert_eq!(payload.pulse_series[0].intensity, -40.0);
    }

    #[test]
    fn stats_pick_current_floor_and_level_extremes() {
        let power = vec![
            point(0.0, Stealth, 50.0, 80.0),
            point(1.0, Flux, 60.0, 79.0),
        ];
        let stats = series_stats(&power);
        assert_eq!(stats.min_current, Some(50.0));
        assert_eq!(stats.min_level, Some(79.0));
        assert_eq!(stats.max_level, Some(80.0));
    }
}
