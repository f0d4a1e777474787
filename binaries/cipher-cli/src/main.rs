//! Cipher CLI
//!
//! Turns short phrases into deterministic glyph strips.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use cipher_config::CipherConfig;
use cipher_core::{Capabilities, Encoder, Scheme};
use cipher_session::{Applied, EncodeSession, FileStore, MemoryStore, Snapshot, PRESETS};
use cipher_visual::{StripRenderer, SvgRenderer, TerminalRenderer};

#[derive(Parser)]
#[command(name = "cipher")]
#[command(about = "Cipher - same phrase, same strip")]
#[command(version)]
struct Cli {
    /// Config file (YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Simulate an environment without a strong digest primitive
    #[arg(long, global = true)]
    no_strong_digest: bool,

    /// Neither read nor write the last input
    #[arg(long, global = true)]
    no_persist: bool,

    /// JSON output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct OutputArgs {
    /// Also write the strip as SVG
    #[arg(long)]
    svg: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a phrase
    Encode {
        /// Phrase (multiple words are joined with spaces)
        #[arg(required = true)]
        text: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List presets with their fingerprints
    Presets {
        /// Fail if two presets share a fingerprint
        #[arg(long)]
        check: bool,
    },

    /// Encode a random preset
    Random {
        /// Seed for reproducible picks
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Re-encode the last input (or the default preset)
    Last {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Clear the strip and the stored input
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = CipherConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    let session = build_session(&cli, &config);

    match cli.command {
        Commands::Encode { ref text, ref output } => {
            let applied = session.submit(&text.join(" ")).await;
            show(&applied, &config, cli.json, output.svg.as_deref())
        }
        Commands::Presets { check } => list_presets(session.encoder(), check, cli.json).await,
        Commands::Random { seed, ref output } => {
            let mut rng: Box<dyn RngCore> = match seed {
                Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
                None => Box::new(rand::thread_rng()),
            };
            let applied = session.submit_random(rng.as_mut()).await;
            show(&applied, &config, cli.json, output.svg.as_deref())
        }
        Commands::Last { ref output } => {
            let applied = session.restore().await;
            show(&applied, &config, cli.json, output.svg.as_deref())
        }
        Commands::Clear => {
            let applied = session.clear().await;
            if !applied.is_current() {
                bail!("clear was superseded");
            }
            println!("Cleared.");
            Ok(())
        }
    }
}

fn build_session(cli: &Cli, config: &CipherConfig) -> EncodeSession {
    let capabilities = if cli.no_strong_digest {
        Capabilities::none()
    } else {
        Capabilities::detect()
    };

    let session = EncodeSession::new(Encoder::new(Scheme::V1, capabilities))
        .with_max_input_chars(config.max_input_chars);

    if cli.no_persist || !config.persist {
        session.with_store(Arc::new(MemoryStore::new()))
    } else {
        let path = config.state_path();
        tracing::debug!(path = %path.display(), "using last-input file");
        session.with_store(Arc::new(FileStore::at_path(path)))
    }
}

fn show(applied: &Applied, config: &CipherConfig, json: bool, svg: Option<&Path>) -> Result<()> {
    let Some(snapshot) = applied.snapshot() else {
        bail!("encode was superseded by a newer input");
    };

    if let Some(path) = svg {
        let renderer = SvgRenderer::new(config.svg.width, config.svg.height);
        std::fs::write(path, renderer.render(&snapshot.encoding.glyphs))
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
    } else {
        print_snapshot(snapshot, config);
    }

    Ok(())
}

fn print_snapshot(snapshot: &Snapshot, config: &CipherConfig) {
    let encoding = &snapshot.encoding;
    if encoding.is_empty() {
        println!("(empty)");
        return;
    }

    let renderer = TerminalRenderer::with_colors(config.color);
    println!("{}", renderer.render(&encoding.glyphs));
    println!("{}", encoding.fingerprint);
    if let Some(path) = encoding.path {
        eprintln!("input: {:?} ({} digest)", encoding.canonical.as_str(), path);
    }
}

async fn list_presets(encoder: &Encoder, check: bool, json: bool) -> Result<()> {
    let mut rows = Vec::with_capacity(PRESETS.len());
    for preset in PRESETS {
        rows.push((preset, encoder.encode(preset).await.fingerprint));
    }

    if json {
        let map: Vec<_> = rows
            .iter()
            .map(|(preset, fp)| serde_json::json!({ "preset": preset, "fingerprint": fp }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
    } else {
        for (preset, fp) in &rows {
            println!("{fp}  {preset}");
        }
    }

    if check {
        let mut seen: HashMap<&str, &str> = HashMap::new();
        for (preset, fp) in &rows {
            if let Some(other) = seen.insert(fp.as_str(), *preset) {
                bail!("presets {other:?} and {preset:?} share fingerprint {fp}");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_encode_joins_words() {
        let cli = Cli::try_parse_from(["cipher", "encode", "coffee", "then", "build", "--svg", "out.svg"]).unwrap();
        match cli.command {
            Commands::Encode { text, output } => {
                assert_eq!(text.join(" "), "coffee then build");
                assert_eq!(output.svg, Some(PathBuf::from("out.svg")));
            }
            _ => panic!("expected encode"),
        }
    }

    #[test]
    fn test_encode_requires_text() {
        assert!(Cli::try_parse_from(["cipher", "encode"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["cipher", "random", "--seed", "3", "--no-strong-digest", "--json"]).unwrap();
        assert!(cli.no_strong_digest);
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Random { seed: Some(3), .. }));
    }

    #[tokio::test]
    async fn test_no_persist_session_uses_fallback_when_asked() {
        let cli = Cli::try_parse_from(["cipher", "--no-persist", "--no-strong-digest", "last"]).unwrap();
        let session = build_session(&cli, &CipherConfig::default());

        let applied = session.restore().await;
        let snapshot = applied.snapshot().unwrap();
        assert_eq!(snapshot.text, "coffee then build");
        assert_eq!(snapshot.encoding.fingerprint.as_str(), "▢○▢▣○◇◍⬡▧□·84");
    }
}
