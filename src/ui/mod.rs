// UI module - waveform plotting

pub mod waveform_view;

pub use waveform_view::{PlotData, WaveformView, run_viewer};
