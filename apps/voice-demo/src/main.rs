//! Heat-Pump Voice Command Demo
//!
//! This application demonstrates end-to-end voice command processing:
//! Transcription → Normalization → Template Matching → Slot Parsing →
//! Action Dispatch (against a mock register bank)

use anyhow::Result;
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

use command_matcher::{load_catalog_file, CommandMatcher, MatchError, DEFAULT_THRESHOLD};
use heatpump_registry::{ActionRegistry, MockRegisters, RegisterAddress};

#[derive(Parser)]
#[command(name = "voice-demo")]
#[command(about = "Kronoterm Heat-Pump Voice Command Demo")]
struct Args {
    /// Recognize and execute a single utterance
    #[arg(long)]
    test_command: Option<String>,

    /// Interactive mode (read utterances from stdin)
    #[arg(long)]
    interactive: bool,

    /// Similarity threshold for accepting a command
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: u8,

    /// Recognize against a JSON catalog file instead of the built-in
    /// command set (recognition only, no dispatch)
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();

    let args = Args::parse();

    info!("🎤 Starting heat-pump voice command demo");

    let registry = ActionRegistry::slovene_default();
    let (matcher, dispatch) = match &args.catalog {
        Some(path) => {
            let templates = load_catalog_file(path)?;
            (CommandMatcher::new(templates)?, false)
        }
        None => (CommandMatcher::new(registry.templates())?, true),
    };

    let registers = demo_registers();

    if let Some(utterance) = &args.test_command {
        run_utterance(utterance, &matcher, &registry, &registers, &args, dispatch).await?;
    } else if args.interactive {
        run_interactive(&matcher, &registry, &registers, &args, dispatch).await?;
    } else {
        run_demo_commands(&matcher, &registry, &registers, &args, dispatch).await?;
    }

    info!("✅ Voice demo completed");
    Ok(())
}

/// Register bank preset so status queries have something to report.
fn demo_registers() -> MockRegisters {
    MockRegisters::new()
        .with_value(RegisterAddress::SYSTEM_STATUS, 1)
        .with_value(RegisterAddress::OPERATING_MODE, 0)
        .with_value(RegisterAddress::OUTSIDE_TEMP, 85)
        .with_value(RegisterAddress::DHW_TEMP, 482)
        .with_value(RegisterAddress::CURRENT_HP_LOAD, 37)
}

async fn run_utterance(
    utterance: &str,
    matcher: &CommandMatcher,
    registry: &ActionRegistry,
    registers: &MockRegisters,
    args: &Args,
    dispatch: bool,
) -> Result<()> {
    println!("🎤 \"{utterance}\"");

    match matcher.recognize_with_threshold(utterance, args.threshold) {
        Ok(recognized) => {
            println!("✓ Recognized: {}", recognized.action_id);
            if !recognized.parameters.is_empty() {
                println!("  Parameters: {:?}", recognized.parameters);
            }
            if dispatch {
                match registry.dispatch(&recognized, registers).await {
                    Ok(response) => println!("🔊 {response}"),
                    Err(err) => println!("❌ Dispatch failed: {err}"),
                }
            }
        }
        Err(MatchError::NoMatch { best_score, .. }) => {
            println!("🔊 Oprostite, tega ukaza ne razumem. (best score {best_score})");
        }
        Err(err) => println!("❌ {err}"),
    }

    Ok(())
}

async fn run_interactive(
    matcher: &CommandMatcher,
    registry: &ActionRegistry,
    registers: &MockRegisters,
    args: &Args,
    dispatch: bool,
) -> Result<()> {
    println!("🎤 Interactive heat-pump voice demo");
    println!("Type Slovene commands and press Enter (or 'quit' to exit):");
    println!("Examples:");
    println!("  - 'vklopi sistem'");
    println!("  - 'kakšna je zunanja temperatura'");
    println!("  - 'nastavi temperaturo sanitarne vode na petinštirideset stopinj'");
    println!("  - 'izklopi drugi ogrevalni krog'");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("🎤 Command: ");
        stdout.flush()?;

        let mut input = String::new();
        stdin.read_line(&mut input)?;
        let command = input.trim();

        if command.eq_ignore_ascii_case("quit") || command.eq_ignore_ascii_case("exit") {
            break;
        }

        if !command.is_empty() {
            run_utterance(command, matcher, registry, registers, args, dispatch).await?;
            println!();
        }
    }

    Ok(())
}

async fn run_demo_commands(
    matcher: &CommandMatcher,
    registry: &ActionRegistry,
    registers: &MockRegisters,
    args: &Args,
    dispatch: bool,
) -> Result<()> {
    let demo_commands = [
        "vklopi sistem",
        "kakšna je zunanja temperatura",
        "nastavi temperaturo sanitarne vode na petinštirideset stopinj",
        "hej prosim segrej sanitarno vodo na štirideset stopinj",
        "nastavi temperaturo prostora ena na dvaindvajset stopinj",
        "izklopi drugi ogrevalni krog",
        "kakšno je vreme danes",
    ];

    println!(
        "🎤 Running voice command demo with {} utterances",
        demo_commands.len()
    );
    println!();

    for (i, command) in demo_commands.iter().enumerate() {
        println!("{}/{}", i + 1, demo_commands.len());
        run_utterance(command, matcher, registry, registers, args, dispatch).await?;
        println!();
    }

    println!("🎉 Demo completed!");
    Ok(())
}

fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
