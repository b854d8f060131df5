//! AgriProof command-line entry point.

mod config;
mod evidence;
mod script;

use agriproof_types::TransferLog;
use agriproof_utils::{init_logging, LogFormat};
use agriproof_verification::{RegistrySnapshot, VerificationConfig, VerificationRegistry};
use anyhow::Context;
use clap::Parser;
use config::CliConfig;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "agriproof", about = "Agricultural practice verification engine")]
struct Cli {
    /// Path to a TOML configuration file. File settings are the base;
    /// CLI flags and env vars override them.
    #[arg(long, env = "AGRIPROOF_CONFIG")]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "AGRIPROOF_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "AGRIPROOF_LOG_FORMAT")]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Replay a JSON transaction script and print one receipt per call.
    Replay {
        script: PathBuf,

        /// Registry snapshot to start from. A missing file starts fresh.
        #[arg(long)]
        state: Option<PathBuf>,

        /// Write the final registry back to `--state`.
        #[arg(long, requires = "state")]
        save: bool,
    },
    /// Print the blake2b-256 proof hash of an evidence file.
    Hash { file: PathBuf },
    /// Print the default configuration as TOML.
    Defaults,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => CliConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CliConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }

    let format: LogFormat = config
        .log_format
        .parse()
        .map_err(anyhow::Error::msg)
        .context("invalid log format")?;
    init_logging(format, &config.log_level).context("installing log subscriber")?;

    match cli.command {
        Command::Replay {
            script,
            state,
            save,
        } => run_replay(&config, &script, state.as_deref(), save),
        Command::Hash { file } => {
            let reader = File::open(&file)
                .with_context(|| format!("opening evidence file {}", file.display()))?;
            let hash = evidence::proof_hash_reader(BufReader::new(reader))
                .with_context(|| format!("reading evidence file {}", file.display()))?;
            println!("{hash}");
            Ok(())
        }
        Command::Defaults => {
            print!("{}", CliConfig::default().to_toml_string()?);
            Ok(())
        }
    }
}

fn run_replay(
    config: &CliConfig,
    script_path: &Path,
    state: Option<&Path>,
    save: bool,
) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(script_path)
        .with_context(|| format!("reading script {}", script_path.display()))?;
    let script = script::parse(&text)?;

    let mut registry = match state.filter(|path| path.exists()) {
        Some(path) => {
            let snapshot = load_snapshot(path)?;
            let registry = VerificationRegistry::restore(snapshot, TransferLog::new())
                .with_context(|| format!("inconsistent snapshot {}", path.display()))?;
            tracing::info!(
                path = %path.display(),
                records = registry.verification_count(),
                "restored registry snapshot"
            );
            registry
        }
        None => {
            let registry_config = VerificationConfig::from_params(config.registry.clone())
                .context("invalid [registry] parameters")?;
            VerificationRegistry::new(registry_config, TransferLog::new())
        }
    };

    let receipts = script::replay(&mut registry, script)?;

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for receipt in &receipts {
        serde_json::to_writer(&mut out, receipt)?;
        writeln!(out)?;
    }
    for transfer in registry.transfer().transfers() {
        serde_json::to_writer(&mut out, &serde_json::json!({ "transfer": transfer }))?;
        writeln!(out)?;
    }
    out.flush()?;

    let failed = receipts.iter().filter(|r| !r.ok).count();
    tracing::info!(calls = receipts.len(), failed, "replay finished");

    if save {
        if let Some(path) = state {
            save_snapshot(path, &registry.snapshot())?;
            tracing::info!(path = %path.display(), "saved registry snapshot");
        }
    }
    Ok(())
}

fn load_snapshot(path: &Path) -> anyhow::Result<RegistrySnapshot> {
    let file =
        File::open(path).with_context(|| format!("opening snapshot {}", path.display()))?;
    bincode::deserialize_from(BufReader::new(file))
        .with_context(|| format!("decoding snapshot {}", path.display()))
}

fn save_snapshot(path: &Path, snapshot: &RegistrySnapshot) -> anyhow::Result<()> {
    let file =
        File::create(path).with_context(|| format!("creating snapshot {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    bincode::serialize_into(&mut writer, snapshot)
        .with_context(|| format!("encoding snapshot {}", path.display()))?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use agriproof_types::{Principal, VerificationId};

    #[test]
    fn snapshot_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.bin");

        let mut registry: VerificationRegistry<TransferLog> = VerificationRegistry::default();
        registry
            .set_authority_contract("ST2AUTH".parse::<Principal>().unwrap())
            .unwrap();
        save_snapshot(&path, &registry.snapshot()).unwrap();

        let restored = load_snapshot(&path).unwrap();
        assert_eq!(restored, registry.snapshot());
    }

    #[test]
    fn tampered_snapshot_file_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.bin");

        let mut registry: VerificationRegistry<TransferLog> = VerificationRegistry::default();
        registry
            .set_authority_contract("ST2AUTH".parse::<Principal>().unwrap())
            .unwrap();
        let mut snapshot = registry.snapshot();
        snapshot.next_id = VerificationId::new(3);
        save_snapshot(&path, &snapshot).unwrap();

        let loaded = load_snapshot(&path).unwrap();
        assert!(VerificationRegistry::restore(loaded, TransferLog::new()).is_err());
    }

    #[test]
    fn garbage_snapshot_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.bin");
        std::fs::write(&path, b"\xff\xff\xff").unwrap();
        assert!(load_snapshot(&path).is_err());
    }

    #[test]
    fn cli_parses_replay_flags() {
        let cli = Cli::try_parse_from([
            "agriproof", "replay", "calls.json", "--state", "s.bin", "--save",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Replay { save: true, .. }));
    }

    #[test]
    fn save_requires_state() {
        assert!(Cli::try_parse_from(["agriproof", "replay", "calls.json", "--save"]).is_err());
    }
}
