//! Speech to sign-language display CLI

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::unbounded;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use signspeak::{
    AssetLibrary, AudioCapture, Config, ConsoleRenderer, DeviceSelector, DisplayLoop,
    Recognizer, TranscriptionWorker,
};

/// Speech to Sign-Language Display
#[derive(Parser)]
#[command(name = "signspeak")]
#[command(about = "Displays finger-spelled letters or sign clips for live speech", long_about = None)]
struct Cli {
    /// Show list of audio input devices and exit
    #[arg(short = 'l', long)]
    list_devices: bool,

    /// Audio file to store the raw captured recording to (16-bit PCM, no header)
    #[arg(short = 'f', long, value_name = "FILENAME")]
    filename: Option<PathBuf>,

    /// Input device (numeric ID or name substring)
    #[arg(short = 'd', long)]
    device: Option<DeviceSelector>,

    /// Sampling rate in Hz (defaults to the device's rate)
    #[arg(short = 'r', long)]
    samplerate: Option<u32>,

    /// Language model; e.g. en-us, fr, nl
    #[arg(short = 'm', long)]
    model: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging - quiet by default, use -v for more
    let log_level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(log_level.into()))
        .init();

    // Load configuration
    let mut config = if let Some(ref config_path) = cli.config {
        Config::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        Config::default()
    };

    // Apply CLI overrides
    if let Some(device) = cli.device {
        config.audio.device = Some(device);
    }
    if let Some(rate) = cli.samplerate {
        config.audio.sample_rate = Some(rate);
    }
    if let Some(model) = cli.model {
        config.recognizer.model = model;
    }
    if let Some(filename) = cli.filename {
        config.recognizer.dump_path = Some(filename);
    }

    if cli.list_devices {
        return list_devices(config);
    }

    run(config)
}

/// List available audio input devices
fn list_devices(config: Config) -> Result<()> {
    let capture = AudioCapture::new(config.audio)?;
    let devices = capture.list_devices()?;

    if devices.is_empty() {
        println!("No audio input devices found");
    } else {
        println!("Available audio input devices:");
        for device in devices {
            println!(
                "  {}: {} (default {} Hz)",
                device.index, device.name, device.default_sample_rate
            );
        }
    }

    Ok(())
}

#[cfg(feature = "vosk")]
fn build_recognizer(
    config: &signspeak::RecognizerConfig,
    sample_rate: u32,
) -> Result<Box<dyn Recognizer>> {
    let recognizer = signspeak::recognizer::VoskRecognizer::new(config, sample_rate)
        .context("Failed to initialize recognizer")?;
    Ok(Box::new(recognizer))
}

#[cfg(not(feature = "vosk"))]
fn build_recognizer(
    _config: &signspeak::RecognizerConfig,
    _sample_rate: u32,
) -> Result<Box<dyn Recognizer>> {
    anyhow::bail!("Built without a recognizer backend; rebuild with --features vosk")
}

/// Run the capture → transcription → display pipeline
fn run(config: Config) -> Result<()> {
    // Assets first: any missing letter or undecodable clip aborts startup
    let assets = AssetLibrary::load(&config.assets).context("Failed to load visual assets")?;

    let mut capture =
        AudioCapture::new(config.audio.clone()).context("Failed to create audio capture")?;
    capture.init().context("Failed to initialize audio capture")?;

    let sample_rate = capture.actual_sample_rate();
    let recognizer = build_recognizer(&config.recognizer, sample_rate)?;

    // Setup signal handler for graceful shutdown
    let shutdown = Arc::new(AtomicBool::new(false));
    let s = shutdown.clone();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        s.store(true, Ordering::SeqCst);
    })?;

    let (sentence_tx, sentence_rx) = unbounded();

    let worker = TranscriptionWorker::new(
        recognizer,
        capture.receiver(),
        sentence_tx,
        shutdown,
        config.recognizer.dump_path.as_deref(),
    )?;
    let worker_handle = worker.spawn()?;

    capture.start().context("Failed to start audio capture")?;

    println!("Listening... Press Ctrl+C to stop");

    // Display loop runs on the main thread until the worker hangs up
    let mut display = DisplayLoop::new(
        assets,
        Box::new(ConsoleRenderer::new()),
        config.display,
        sentence_rx,
    );
    let display_result = display.run();

    capture.stop();

    match worker_handle.join() {
        Ok(result) => result.context("Transcription worker failed")?,
        Err(_) => anyhow::bail!("Transcription worker panicked"),
    }

    display_result.context("Display loop failed")?;

    Ok(())
}
