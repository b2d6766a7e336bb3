use riffwave::ui::{PlotData, run_viewer};
use riffwave::{Sequence, SynthesisConfig, Tempo, TimeSignature, load_score};
use std::error::Error;
use std::path::PathBuf;

const USAGE: &str = "Usage: riffwave <score.json> [--bucket-step=F] [--sample-step=F] \
[--config=FILE] [--bpm=F] [--time-signature=N/D] [--no-plot]";

#[derive(Debug, Default)]
struct Args {
    score: Option<PathBuf>,
    config: Option<PathBuf>,
    bucket_step: Option<f64>,
    sample_step: Option<f64>,
    bpm: Option<f64>,
    time_signature: Option<String>,
    no_plot: bool,
}

/// Parse `--flag=value` arguments; anything else starting with `--` is an error
fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args, Box<dyn Error>> {
    let mut parsed = Args::default();

    for arg in args {
        if arg == "--no-plot" {
            parsed.no_plot = true;
        } else if let Some(rest) = arg.strip_prefix("--config=") {
            parsed.config = Some(PathBuf::from(rest));
        } else if let Some(rest) = arg.strip_prefix("--bucket-step=") {
            parsed.bucket_step = Some(rest.parse()?);
        } else if let Some(rest) = arg.strip_prefix("--sample-step=") {
            parsed.sample_step = Some(rest.parse()?);
        } else if let Some(rest) = arg.strip_prefix("--bpm=") {
            parsed.bpm = Some(rest.parse()?);
        } else if let Some(rest) = arg.strip_prefix("--time-signature=") {
            parsed.time_signature = Some(rest.to_string());
        } else if arg.starts_with("--") {
            return Err(format!("unknown argument '{arg}'\n{USAGE}").into());
        } else if parsed.score.is_some() {
            return Err(format!("more than one score file given\n{USAGE}").into());
        } else {
            parsed.score = Some(PathBuf::from(arg));
        }
    }

    Ok(parsed)
}

fn build_config(args: &Args) -> Result<SynthesisConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => SynthesisConfig::load(path)?,
        None => SynthesisConfig::default(),
    };
    if let Some(step) = args.bucket_step {
        config.bucket_step = step;
    }
    if let Some(step) = args.sample_step {
        config.sample_step = step;
    }
    config.validate()?;
    Ok(config)
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = parse_args(std::env::args().skip(1))?;
    let score = args.score.clone().ok_or(USAGE)?;

    let config = build_config(&args)?;
    let tempo = match args.bpm {
        Some(bpm) => Tempo::new(bpm)?,
        None => Tempo::default(),
    };
    let time_signature: TimeSignature = match &args.time_signature {
        Some(ts) => ts.parse()?,
        None => TimeSignature::default(),
    };

    let notes = load_score(&score)?;
    let mut riff = Sequence::with_config(notes, config)?;
    riff.synthesize()?;

    println!("=== {} ===", score.display());
    println!("{}", riff.summary());
    println!(
        "Tempo: {} ({}) | t_per_beat: {:.3}s, t_per_bar: {:.3}s, total: {:.3}s",
        tempo,
        time_signature,
        tempo.beat_duration_seconds(),
        tempo.bar_duration_seconds(&time_signature),
        tempo.beats_to_seconds(riff.time_range().length()),
    );

    if args.no_plot {
        return Ok(());
    }

    let title = score
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| "riffwave".to_string());
    let data = PlotData::from_sequence(&riff, title)?;
    run_viewer(data).map_err(|e| format!("viewer failed: {e}"))?;

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }
}
