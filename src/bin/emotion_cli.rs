use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use voice_emotion::{AnalysisConfig, AudioSignal, EmotionAnalyzer};

#[derive(Parser, Debug)]
#[command(
    name = "emotion_cli",
    about = "Voice emotion analysis over decoded WAV clips"
)]
struct Cli {
    /// Optional JSON analysis configuration (defaults are used otherwise)
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a WAV file and report the emotion distribution
    Analyze {
        /// Path to a WAV file
        path: PathBuf,
        /// Emit the full report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print only the extracted feature vector for a WAV file
    Features {
        /// Path to a WAV file
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = cli
        .config
        .map(AnalysisConfig::load_from_file)
        .unwrap_or_default();
    let analyzer = EmotionAnalyzer::with_config(config);

    match cli.command {
        Commands::Analyze { path, json } => run_analyze(&analyzer, &path, json),
        Commands::Features { path } => run_features(&analyzer, &path),
    }
}

fn run_analyze(analyzer: &EmotionAnalyzer, path: &Path, json: bool) -> Result<ExitCode> {
    let signal = load_wav(path)?;
    let report = analyzer
        .analyze_full(&signal)
        .with_context(|| format!("analyzing {}", path.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let result = &report.result;
        println!("Dominant emotion: {}", result.dominant_emotion);
        println!("Confidence: {:.2}%", result.confidence);
        println!();
        println!("Distribution:");
        println!("  happy:   {:.2}%", result.distribution.happy);
        println!("  sad:     {:.2}%", result.distribution.sad);
        println!("  angry:   {:.2}%", result.distribution.angry);
        println!("  neutral: {:.2}%", result.distribution.neutral);
    }

    Ok(ExitCode::SUCCESS)
}

fn run_features(analyzer: &EmotionAnalyzer, path: &Path) -> Result<ExitCode> {
    let signal = load_wav(path)?;
    let features = analyzer
        .extractor()
        .extract_full(&signal)
        .with_context(|| format!("extracting features from {}", path.display()))?;

    println!("{}", serde_json::to_string_pretty(&features)?);
    Ok(ExitCode::SUCCESS)
}

/// Decode a WAV file into a mono signal, averaging channels if needed
fn load_wav(path: &Path) -> Result<AudioSignal> {
    let mut reader =
        hound::WavReader::open(path).with_context(|| format!("opening {}", path.display()))?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<Vec<_>, _>>()
            .context("decoding float samples")?,
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<Vec<_>, _>>()
                .context("decoding integer samples")?
        }
    };

    let mono: Vec<f32> = if spec.channels > 1 {
        samples
            .chunks(spec.channels as usize)
            .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
            .collect()
    } else {
        samples
    };

    AudioSignal::new(mono, spec.sample_rate)
        .with_context(|| format!("validating signal from {}", path.display()))
}
