// Waveform viewer - plots a synthesized sequence
//
// Presentation only: nothing here feeds back into synthesis.

use egui::Color32;
use egui_plot::{GridMark, Legend, Line, Plot, PlotPoints};
use rand::Rng;

use crate::sequencer::{FrequencyRange, Sequence, SequenceError, TimeRange};

/// Everything the viewer needs, detached from the sequence
#[derive(Debug, Clone)]
pub struct PlotData {
    pub title: String,
    /// `[time, amplitude]` pairs
    pub points: Vec<[f64; 2]>,
    pub time_range: TimeRange,
    pub frequency_range: FrequencyRange,
    /// Whole beats inside the time range, one x grid mark each
    pub beat_ticks: Vec<f64>,
    /// `(bucket start, frequencies)` for the side panel
    pub buckets: Vec<(f64, Vec<f64>)>,
    pub colour: Color32,
}

impl PlotData {
    /// Extract plot data from a synthesized sequence
    pub fn from_sequence(sequence: &Sequence, title: impl Into<String>) -> Result<Self, SequenceError> {
        let samples = sequence.samples().ok_or(SequenceError::NotSynthesized)?;
        let times = sequence.sample_times().ok_or(SequenceError::NotSynthesized)?;
        let time_range = sequence.time_range();

        let points = times
            .iter()
            .zip(samples.iter())
            .map(|(&t, &y)| [t, y])
            .collect();

        Ok(Self {
            title: title.into(),
            points,
            time_range,
            frequency_range: sequence.frequency_range(),
            beat_ticks: beat_ticks(&time_range),
            buckets: sequence
                .buckets()
                .iter()
                .map(|bucket| (bucket.start, bucket.frequencies().to_vec()))
                .collect(),
            colour: random_line_colour(),
        })
    }
}

/// Whole-beat positions from `floor(start)` to `ceil(end)`
pub fn beat_ticks(range: &TimeRange) -> Vec<f64> {
    let first = range.start.floor() as i64;
    let last = range.end.ceil() as i64;
    (first..=last).map(|beat| beat as f64).collect()
}

/// Colour from six hex digits, "#RRGGBB"-style
pub fn colour_from_digits(digits: [u8; 6]) -> Color32 {
    let channel = |hi: u8, lo: u8| ((hi & 0x0f) << 4) | (lo & 0x0f);
    Color32::from_rgb(
        channel(digits[0], digits[1]),
        channel(digits[2], digits[3]),
        channel(digits[4], digits[5]),
    )
}

/// Random line colour; each hex digit is drawn from 0..=14
pub fn random_line_colour() -> Color32 {
    let mut rng = rand::thread_rng();
    let mut digits = [0u8; 6];
    for digit in digits.iter_mut() {
        *digit = rng.gen_range(0..15);
    }
    colour_from_digits(digits)
}

/// Native window showing the combined waveform
pub struct WaveformView {
    data: PlotData,
}

impl WaveformView {
    pub fn new(data: PlotData) -> Self {
        Self { data }
    }

    fn info_panel(&self, ui: &mut egui::Ui) {
        ui.heading("Sequence");
        ui.label(format!("Time: {} beats", self.data.time_range));
        ui.label(format!("Frequencies: {}", self.data.frequency_range));
        ui.label(format!("Samples: {}", self.data.points.len()));
        ui.separator();

        ui.heading("Buckets");
        egui::ScrollArea::vertical().show(ui, |ui| {
            for (start, frequencies) in &self.data.buckets {
                if frequencies.is_empty() {
                    ui.colored_label(Color32::YELLOW, format!("{start:>6.2}  (empty)"));
                } else {
                    let list: Vec<String> = frequencies.iter().map(|f| f.to_string()).collect();
                    ui.label(format!("{start:>6.2}  {}", list.join(", ")));
                }
            }
        });
    }
}

impl eframe::App for WaveformView {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        egui::SidePanel::left("sequence_info")
            .resizable(true)
            .show(ctx, |ui| self.info_panel(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(&self.data.title);

            let ticks = self.data.beat_ticks.clone();
            Plot::new("waveform_plot")
                .legend(Legend::default())
                .show_grid(true)
                .x_axis_label("beats")
                .y_axis_label("amplitude")
                .x_grid_spacer(move |_input| {
                    ticks
                        .iter()
                        .map(|&value| GridMark {
                            value,
                            step_size: 1.0,
                        })
                        .collect()
                })
                .show(ui, |plot_ui| {
                    let points = PlotPoints::from(self.data.points.clone());
                    plot_ui.line(
                        Line::new(points)
                            .color(self.data.colour)
                            .name("combined waveform"),
                    );
                });
        });
    }
}

/// Open the viewer window and block until it is closed
pub fn run_viewer(data: PlotData) -> Result<(), eframe::Error> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 500.0])
            .with_title(data.title.clone()),
        ..Default::default()
    };

    let title = data.title.clone();
    eframe::run_native(
        &title,
        native_options,
        Box::new(move |_cc| Ok(Box::new(WaveformView::new(data)))),
    )
}
