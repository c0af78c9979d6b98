use anyhow::Context;
use clap::Parser;
use fluxcore::ingest::OperationalMode;
use fluxcore::render_interface::{Palette, RenderPayload, StyleConfig};
use fluxcore::run_pipeline;
use iced::{
    widget::{button, column, row, text, Canvas, Container},
    Alignment, Element, Length, Task, Theme,
};
use panels::{color, CurrentPanel, LevelPanel, ModePanel, TimeAxis};
use std::fs;
use std::path::{Path, PathBuf};

mod panels;

#[derive(Parser)]
#[command(author, version, about = "Three-panel haptic & power viewer")]
struct Args {
    /// Telemetry log, or a payload JSON exported by the analyzer
    input: PathBuf,
    /// Treat the input as an exported payload instead of a raw log
    #[arg(long, default_value_t = false)]
    payload: bool,
    /// YAML file with presentation colours
    #[arg(long)]
    style: Option<PathBuf>,
}

#[derive(Debug, Clone)]
enum Source {
    Log(PathBuf),
    Payload(PathBuf),
}

impl Source {
    fn load(&self) -> anyhow::Result<RenderPayload> {
        match self {
            Source::Log(path) => Ok(run_pipeline(path)
                .with_context(|| format!("processing {}", path.display()))?
                .payload),
            Source::Payload(path) => {
                let contents = fs::read_to_string(path)
                    .with_context(|| format!("reading payload {}", path.display()))?;
                RenderPayload::from_json(&contents)
                    .with_context(|| format!("parsing payload {}", path.display()))
            }
        }
    }
}

fn load_style(path: &Path) -> anyhow::Result<StyleConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading style {}", path.display()))?;
    serde_yaml::from_str(&contents).with_context(|| format!("parsing style {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let style = match &args.style {
        Some(path) => load_style(path)?,
        None => StyleConfig::default(),
    };
    let palette = style.palette().context("validating style")?;
    let source = if args.payload {
        Source::Payload(args.input)
    } else {
        Source::Log(args.input)
    };
    let payload = source.load()?;
    log::info!(
        "rendering {} power readings and {} haptic events",
        payload.power_series.len(),
        payload.pulse_series.len()
    );

    iced::application(
        move || Visualizer::boot(source.clone(), payload.clone(), style.clone(), palette),
        Visualizer::update,
        Visualizer::view,
    )
    .title(application_title)
    .theme(application_theme)
    .run()
    .map_err(|err| anyhow::anyhow!("visualizer failed: {err}"))
}

fn application_title(state: &Visualizer) -> String {
    state.style.title.clone()
}

fn application_theme(_: &Visualizer) -> Theme {
    Theme::Dark
}

struct Visualizer {
    source: Source,
    payload: RenderPayload,
    style: StyleConfig,
    palette: Palette,
    show_raw: bool,
    status: String,
}

#[derive(Debug, Clone)]
enum Message {
    Reload,
    ToggleRaw,
}

impl Visualizer {
    fn boot(
        source: Source,
        payload: RenderPayload,
        style: StyleConfig,
        palette: Palette,
    ) -> (Self, Task<Message>) {
        let status = status_line(&payload);
        (
            Visualizer {
                source,
                payload,
                style,
                palette,
                show_raw: true,
                status,
            },
            Task::none(),
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::Reload => match state.source.load() {
                Ok(payload) => {
                    state.status = status_line(&payload);
                    state.payload = payload;
                }
                Err(err) => {
                    log::warn!("reload failed: {err:#}");
                    state.status = format!("Reload failed: {err:#}");
                }
            },
            Message::ToggleRaw => state.show_raw = !state.show_raw,
        }
        Task::none()
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let payload = &state.payload;
        let palette = state.palette;
        let axis = TimeAxis::new(payload.time_span());
        let caption = |label: &str| text(label.to_string()).size(12).color(color(palette.text, 0.6));

        let current = Canvas::new(CurrentPanel {
            power: payload.power_series.clone(),
            pulses: payload.pulse_series.clone(),
            floor: payload.stats.min_current,
            axis,
            palette,
            show_raw: state.show_raw,
        })
        .width(Length::Fill)
        .height(Length::FillPortion(2));

        let level = Canvas::new(LevelPanel {
            power: payload.power_series.clone(),
            bounds: payload.stats.level_bounds(),
            axis,
            palette,
        })
        .width(Length::Fill)
        .height(Length::FillPortion(1));

        let mode = Canvas::new(ModePanel {
            power: payload.power_series.clone(),
            runs: payload.stats.mode_runs.clone(),
            axis,
            palette,
        })
        .width(Length::Fill)
        .height(Length::FillPortion(1));

        let legend = OperationalMode::ALL
            .iter()
            .fold(row![].spacing(16), |legend, &mode| {
                legend.push(
                    text(format!("{} = {}", mode.code(), mode.label()))
                        .size(12)
                        .color(color(palette.mode(mode), 1.0)),
                )
            });

        let header = row![
            text(state.style.title.clone())
                .size(22)
                .color(color(palette.power, 1.0)),
            button(if state.show_raw { "Hide raw trace" } else { "Show raw trace" })
                .on_press(Message::ToggleRaw)
                .padding(6),
            button("Reload").on_press(Message::Reload).padding(6),
        ]
        .spacing(20)
        .align_y(Alignment::Center);

        let layout = column![
            header,
            text(&state.status).size(14),
            caption("Current Draw (µA) + Haptic Triggers"),
            current,
            caption("Fuel Level (%)"),
            level,
            caption("Operational Mode"),
            mode,
            legend,
            caption(&format!(
                "Time (Seconds): {:.1} - {:.1}",
                axis.start, axis.end
            )),
        ]
        .spacing(8)
        .padding(16);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

fn status_line(payload: &RenderPayload) -> String {
    let stats = &payload.stats;
    match (stats.min_current, stats.min_level.zip(stats.max_level)) {
        (Some(floor), Some((low, high))) => format!(
            "{} power readings, {} haptic events | floor {:.0} µA | level {:.0}-{:.0}% | {} mode runs",
            payload.power_series.len(),
            payload.pulse_series.len(),
            floor,
            low,
            high,
            stats.mode_runs.len()
        ),
        _ => format!(
            "No power readings, {} haptic events",
            payload.pulse_series.len()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluxcore::render_interface::PulsePoint;

    #[test]
    fn status_line_handles_pulse_only_payload() {
        let payload = RenderPayload {
            pulse_series: vec![PulsePoint {
                time: 0.0,
                intensity: 80.0,
            }],
            ..Default::default()
        };
        assert_eq!(status_line(&payload), "No power readings, 1 haptic events");
    }

    #[test]
    fn payload_source_reads_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.json");
        fs::write(&path, RenderPayload::default().to_json().unwrap()).unwrap();
        let payload = Source::Payload(path).load().unwrap();
        assert_eq!(payload, RenderPayload::default());
    }
}
