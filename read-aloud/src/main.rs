//! read-aloud - Read PDF documents aloud using chunked text-to-speech

mod config;
mod display;
mod highlight;
mod pdf;
mod reader;
mod text;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::ReadAloudConfig;
use display::{Surface, TermSurface};
use reader::Reader;
use speech_client::{EngineKind, SpeechSynth};
use tokio::io::AsyncBufReadExt;

const SHELL_COMMANDS: &str =
    "Commands: open <path>, read, pause, resume, stop, status, voices, help, quit";

#[derive(Parser, Debug)]
#[command(name = "read-aloud")]
#[command(about = "Read PDF documents aloud using chunked text-to-speech", long_about = None)]
#[command(version)]
struct Args {
    /// Path to a PDF file to load at startup
    pdf_file: Option<PathBuf>,

    /// Voice to use (see the `voices` subcommand)
    #[arg(long)]
    voice: Option<String>,

    /// Speech engine: espeak or say (default: auto-detect)
    #[arg(long)]
    engine: Option<String>,

    /// Maximum chunk length in characters
    #[arg(long)]
    max_chunk: Option<usize>,

    /// Echo the rendered text region to stdout on each update
    #[arg(long, default_value_t = false)]
    echo_text: bool,

    /// Enable debug output
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Subcommands
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the voices offered by the selected speech engine
    Voices,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set the default voice
    SetVoice {
        /// Voice id understood by the engine
        voice: String,
    },
    /// Set the default speech engine
    SetEngine {
        /// Engine name (espeak, say)
        engine: String,
    },
    /// Set the default maximum chunk length
    SetMaxChunk {
        /// Length in characters (minimum 1)
        length: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Some(Commands::Config { action }) = &args.command {
        return handle_config_command(action);
    }

    let config = ReadAloudConfig::load().context("Failed to load configuration")?;

    let engine_name = args.engine.clone().or(config.engine.clone());
    let voice = args.voice.clone().or(config.voice.clone());
    let max_chunk = args.max_chunk.unwrap_or(config.max_chunk).max(1);

    let synth: Arc<dyn SpeechSynth> =
        Arc::from(speech_client::get_engine(engine_name.as_deref())?);

    if let Some(Commands::Voices) = &args.command {
        return list_voices(synth.as_ref()).await;
    }

    if args.debug {
        eprintln!("Engine: {}", synth.name());
        eprintln!("Voice: {}", voice.as_deref().unwrap_or("(default)"));
        eprintln!("Max chunk: {}", max_chunk);
    }

    let surface: Arc<dyn Surface> = Arc::new(TermSurface::new(args.echo_text));
    let reader = Reader::new(synth.clone(), surface.clone(), max_chunk);

    if let Some(path) = &args.pdf_file {
        load_document(&reader, surface.as_ref(), path).await;
    }

    run_shell(reader, synth, surface, voice).await
}

/// Load a PDF from disk and install its text in the reader.
///
/// Failures surface as a status message and a logged diagnostic; the
/// shell stays interactive and can accept another file.
async fn load_document(reader: &Reader, surface: &dyn Surface, path: &Path) {
    surface.set_status("Extracting text...");
    match read_pdf_text(path).await {
        Ok(text) if text.is_empty() => {
            log::error!("No text extracted from {}", path.display());
            surface.set_status("Error reading PDF!");
        }
        Ok(text) => match reader.load_text(text).await {
            Ok(()) => surface.set_status("Ready to read!"),
            Err(e) => {
                log::error!("Failed to install document text: {:#}", e);
                surface.set_status("Error reading PDF!");
            }
        },
        Err(e) => {
            log::error!("Failed to read {}: {:#}", path.display(), e);
            surface.set_status("Error reading PDF!");
        }
    }
}

/// Read a PDF file and extract its normalized text off the async runtime.
async fn read_pdf_text(path: &Path) -> Result<String> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    tokio::task::spawn_blocking(move || pdf::extract_text(&data))
        .await
        .context("Task join error")?
}

/// Interactive command loop driving the reader.
async fn run_shell(
    reader: Reader,
    synth: Arc<dyn SpeechSynth>,
    surface: Arc<dyn Surface>,
    voice: Option<String>,
) -> Result<()> {
    eprintln!("{}", SHELL_COMMANDS);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "open" => {
                if rest.is_empty() {
                    eprintln!("Usage: open <path>");
                } else {
                    load_document(&reader, surface.as_ref(), Path::new(rest)).await;
                }
            }
            "read" => {
                let reader = reader.clone();
                let voice = voice.clone();
                tokio::spawn(async move {
                    if let Err(e) = reader.read(voice).await {
                        log::error!("Playback failed: {:#}", e);
                    }
                });
            }
            "pause" => {
                if let Err(e) = reader.pause().await {
                    log::error!("Pause failed: {:#}", e);
                }
            }
            "resume" => {
                if let Err(e) = reader.resume().await {
                    log::error!("Resume failed: {:#}", e);
                }
            }
            "stop" => {
                if let Err(e) = reader.stop().await {
                    log::error!("Stop failed: {:#}", e);
                }
            }
            "status" => {
                let (index, total) = reader.progress();
                eprintln!("{:?} ({}/{} chunks)", reader.state(), index, total);
            }
            "voices" => {
                if let Err(e) = list_voices(synth.as_ref()).await {
                    log::error!("Voice listing failed: {:#}", e);
                }
            }
            "help" => eprintln!("{}", SHELL_COMMANDS),
            "quit" | "exit" => break,
            other => eprintln!("Unknown command: {}", other),
        }
    }

    reader.stop().await?;
    Ok(())
}

/// Print the engine's voice list.
async fn list_voices(synth: &dyn SpeechSynth) -> Result<()> {
    let voices = synth.voices().await?;
    if voices.is_empty() {
        println!("No voices reported by {}", synth.name());
        return Ok(());
    }
    for voice in voices {
        println!("{:<28} {:<10} {}", voice.id, voice.language, voice.name);
    }
    Ok(())
}

fn handle_config_command(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = ReadAloudConfig::load()?;
            println!("Configuration file: {:?}", ReadAloudConfig::config_path()?);
            println!();
            if let Some(voice) = &config.voice {
                println!("voice = \"{}\"", voice);
            } else {
                println!("voice = (engine default)");
            }
            if let Some(engine) = &config.engine {
                println!("engine = \"{}\"", engine);
            } else {
                println!("engine = (auto-detect)");
            }
            println!("max_chunk = {}", config.max_chunk);
        }
        ConfigAction::SetVoice { voice } => {
            let mut config = ReadAloudConfig::load()?;
            config.voice = Some(voice.clone());
            config.save()?;
            println!("Default voice set to: {}", voice);
        }
        ConfigAction::SetEngine { engine } => {
            EngineKind::from_str(engine)?;
            let mut config = ReadAloudConfig::load()?;
            config.engine = Some(engine.clone());
            config.save()?;
            println!("Default engine set to: {}", engine);
        }
        ConfigAction::SetMaxChunk { length } => {
            let mut config = ReadAloudConfig::load()?;
            config.max_chunk = (*length).max(1);
            config.save()?;
            println!("Default maximum chunk length set to: {}", config.max_chunk);
        }
    }
    Ok(())
}
