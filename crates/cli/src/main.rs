use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use qemu_wrapper::{exec_delegate, ArgVector, LaunchConfig};

mod provenance;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Inspect and exercise the qemu-wrapper launcher")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Print the argument vector that would be handed to the emulator (JSON)
    Plan(LaunchArgs),
    /// Print version, code revision and the built-in defaults (JSON)
    Report,
    /// Replace this process with the emulator, injecting the -cpu pair
    Run(LaunchArgs),
}

#[derive(Args)]
struct LaunchArgs {
    /// Emulator binary; defaults to the path compiled into qemu-wrapper
    #[arg(long)]
    target: Option<PathBuf>,
    /// CPU model to inject; defaults to the model compiled into qemu-wrapper
    #[arg(long)]
    cpu: Option<OsString>,
    /// argv[0] seen by the emulator; defaults to this program's own argv[0]
    #[arg(long)]
    argv0: Option<OsString>,
    /// Arguments passed through after the injected pair (everything after `--`)
    #[arg(last = true)]
    args: Vec<OsString>,
}

impl LaunchArgs {
    fn config(&self) -> LaunchConfig {
        let mut cfg = LaunchConfig::default();
        if let Some(target) = &self.target {
            cfg = cfg.with_target(target);
        }
        if let Some(cpu) = &self.cpu {
            cfg = cfg.with_cpu_model(cpu);
        }
        cfg
    }

    fn into_argv(self, cfg: &LaunchConfig) -> ArgVector {
        let argv0 = self
            .argv0
            .or_else(|| std::env::args_os().next())
            .unwrap_or_else(|| OsString::from("cli"));
        let original: Vec<OsString> = std::iter::once(argv0).chain(self.args).collect();
        ArgVector::build(cfg, original)
    }
}

#[derive(Serialize)]
struct Plan {
    target: String,
    argv: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("QEMU_WRAPPER_LOG")
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Plan(args) => plan(args),
        Action::Report => report(),
        Action::Run(args) => run(args),
    }
}

fn plan(args: LaunchArgs) -> Result<()> {
    let cfg = args.config();
    let argv = args.into_argv(&cfg);
    let plan = Plan {
        target: cfg.target.display().to_string(),
        argv: argv.to_lossy_strings(),
    };
    print_json(&plan).context("printing plan")
}

fn report() -> Result<()> {
    let obj = provenance::Report::collect();
    print_json(&obj).context("printing report")
}

fn run(args: LaunchArgs) -> Result<()> {
    let cfg = args.config();
    let argv = args.into_argv(&cfg);
    tracing::info!(
        delegate = %cfg.target.display(),
        cpu = %cfg.cpu_model.to_string_lossy(),
        "run"
    );
    let err = exec_delegate(&cfg.target, argv);
    std::process::exit(err.exit_code());
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let doc = serde_json::to_string_pretty(value).context("serializing JSON")?;
    let mut out = std::io::stdout().lock();
    writeln!(out, "{doc}").context("writing to stdout")?;
    Ok(())
}
