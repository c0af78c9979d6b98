use fluxcore::ingest::OperationalMode;
use fluxcore::render_interface::{ModeRun, Palette, PowerPoint, PulsePoint, Rgb};
use iced::{
    mouse,
    widget::canvas::{self, Frame, Geometry, Path, Stroke},
    Color, Point, Rectangle, Renderer, Size, Theme,
};

const MARKER_HEIGHT: f32 = 12.0;
const GRID_DIVISIONS: usize = 4;

pub fn color(rgb: Rgb, alpha: f32) -> Color {
    Color {
        a: alpha,
        ..Color::from_rgb8(rgb.r, rgb.g, rgb.b)
    }
}

/// Shared horizontal extent of all three panels, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeAxis {
    pub start: f64,
    pub end: f64,
}

impl TimeAxis {
    pub fn new(span: Option<(f64, f64)>) -> Self {
        let (start, end) = span.unwrap_or((0.0, 1.0));
        if end > start {
            Self { start, end }
        } else {
            Self {
                start,
                end: start + 1.0,
            }
        }
    }
}

/// Maps data coordinates onto a canvas of a given size.
struct Axes {
    size: Size,
    time: TimeAxis,
    low: f64,
    high: f64,
}

impl Axes {
    fn new(size: Size, time: TimeAxis, low: f64, high: f64) -> Self {
        let high = if high > low { high } else { low + 1.0 };
        Self {
            size,
            time,
            low,
            high,
        }
    }

    fn x(&self, time: f64) -> f32 {
        ((time - self.time.start) / (self.time.end - self.time.start)) as f32 * self.size.width
    }

    fn y(&self, value: f64) -> f32 {
        let normalized = ((value - self.low) / (self.high - self.low)) as f32;
        self.size.height - normalized * self.size.height
    }

    fn point(&self, time: f64, value: f64) -> Point {
        Point::new(self.x(time), self.y(value))
    }
}

fn background(frame: &mut Frame, size: Size, palette: &Palette) {
    frame.fill_rectangle(Point::ORIGIN, size, color(palette.background, 1.0));
    let grid = Stroke::default()
        .with_width(1.0)
        .with_color(color(palette.grid, 1.0));
    for step in 1..GRID_DIVISIONS {
        let y = size.height * step as f32 / GRID_DIVISIONS as f32;
        let x = size.width * step as f32 / GRID_DIVISIONS as f32;
        frame.stroke(
            &Path::line(Point::new(0.0, y), Point::new(size.width, y)),
            grid.clone(),
        );
        frame.stroke(
            &Path::line(Point::new(x, 0.0), Point::new(x, size.height)),
            grid.clone(),
        );
    }
}

fn polyline<I>(points: I) -> Option<Path>
where
    I: IntoIterator<Item = Point>,
{
    let points: Vec<Point> = points.into_iter().collect();
    if points.len() < 2 {
        return None;
    }
    Some(Path::new(|builder| {
        builder.move_to(points[0]);
        for point in &points[1..] {
            builder.line_to(*point);
        }
    }))
}

/// Current draw with the smoothed trace over the faint raw trace, plus pulse
/// ticks at the current floor.
pub struct CurrentPanel {
    pub power: Vec<PowerPoint>,
    pub pulses: Vec<PulsePoint>,
    pub floor: Option<f64>,
    pub axis: TimeAxis,
    pub palette: Palette,
    pub show_raw: bool,
}

impl<Message> canvas::Program<Message> for CurrentPanel {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        background(&mut frame, bounds.size(), &self.palette);

        let values = self
            .power
            .iter()
            .flat_map(|p| [p.current_raw, p.current_smoothed]);
        let low = values.clone().fold(f64::INFINITY, f64::min);
        let high = values.fold(f64::NEG_INFINITY, f64::max);
        let (low, high) = if low.is_finite() { (low, high) } else { (0.0, 1.0) };
        let axes = Axes::new(bounds.size(), self.axis, low, high);

        if self.show_raw {
            if let Some(path) = polyline(self.power.iter().map(|p| axes.point(p.time, p.current_raw))) {
                frame.stroke(
                    &path,
                    Stroke::default()
                        .with_width(1.0)
                        .with_color(color(self.palette.power, self.palette.raw_alpha)),
                );
            }
        }
        if let Some(path) =
            polyline(self.power.iter().map(|p| axes.point(p.time, p.current_smoothed)))
        {
            frame.stroke(
                &path,
                Stroke::default()
                    .with_width(2.0)
                    .with_color(color(self.palette.power, 1.0)),
            );
        }

        // Without power samples there is no floor; ticks sit on the bottom edge.
        let marker_y = self
            .floor
            .map(|floor| axes.y(floor))
            .unwrap_or(bounds.height);
        let marker = Stroke::default()
            .with_width(1.5)
            .with_color(color(self.palette.pulse, self.palette.pulse_alpha));
        for pulse in &self.pulses {
            let x = axes.x(pulse.time);
            let top = (marker_y - MARKER_HEIGHT / 2.0).max(0.0);
            let bottom = (marker_y + MARKER_HEIGHT / 2.0).min(bounds.height);
            frame.stroke(
                &Path::line(Point::new(x, top), Point::new(x, bottom)),
                marker.clone(),
            );
        }

        vec![frame.into_geometry()]
    }
}

/// Fuel level percentage.
pub struct LevelPanel {
    pub power: Vec<PowerPoint>,
    pub bounds: Option<(f64, f64)>,
    pub axis: TimeAxis,
    pub palette: Palette,
}

impl<Message> canvas::Program<Message> for LevelPanel {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        background(&mut frame, bounds.size(), &self.palette);

        let (low, high) = self.bounds.unwrap_or((0.0, 100.0));
        let axes = Axes::new(bounds.size(), self.axis, low, high);
        if let Some(path) = polyline(self.power.iter().map(|p| axes.point(p.time, p.level))) {
            frame.stroke(
                &path,
                Stroke::default()
                    .with_width(2.0)
                    .with_color(color(self.palette.level, 1.0)),
            );
        }

        vec![frame.into_geometry()]
    }
}

/// Stepped mode indicator over mode-coloured background bands.
pub struct ModePanel {
    pub power: Vec<PowerPoint>,
    pub runs: Vec<ModeRun>,
    pub axis: TimeAxis,
    pub palette: Palette,
}

impl<Message> canvas::Program<Message> for ModePanel {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        background(&mut frame, bounds.size(), &self.palette);
        let axes = Axes::new(bounds.size(), self.axis, -0.5, 2.5);

        for run in &self.runs {
            let left = axes.x(run.start_time);
            let right = axes.x(run.end_time);
            frame.fill_rectangle(
                Point::new(left, 0.0),
                Size::new((right - left).max(0.0), bounds.height),
                color(self.palette.mode(run.mode), self.palette.band_alpha),
            );
        }

        let level = |mode: OperationalMode| f64::from(mode.code());
        let mut steps = Vec::with_capacity(self.power.len() * 2);
        for (idx, point) in self.power.iter().enumerate() {
            if idx > 0 {
                let previous = self.power[idx - 1].mode;
                steps.push(axes.point(point.time, level(previous)));
            }
            steps.push(axes.point(point.time, level(point.mode)));
        }
        if let Some(path) = polyline(steps) {
            frame.stroke(
                &path,
                Stroke::default()
                    .with_width(2.0)
                    .with_color(color(self.palette.text, 1.0)),
            );
        }

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_time_span_is_widened() {
        let axis = TimeAxis::new(Some((2.0, 2.0)));
        assert_eq!(axis, TimeAxis { start: 2.0, end: 3.0 });
        assert_eq!(TimeAxis::new(None), TimeAxis { start: 0.0, end: 1.0 });
    }

    #[test]
    fn axes_map_corners() {
        let axes = Axes::new(
            Size::new(200.0, 100.0),
            TimeAxis { start: 0.0, end: 10.0 },
            -0.5,
            2.5,
        );
        assert_eq!(axes.point(0.0, -0.5), Point::new(0.0, 100.0));
        assert_eq!(axes.point(10.0, 2.5), Point::new(200.0, 0.0));
        assert_eq!(axes.x(5.0), 100.0);
    }
}
