use std::env;
use std::process::Command;

use anyhow::{bail, Result};

/// Options derived from the host machine used to configure cargo commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Codegen flags for release timing runs.
    pub rustflags: Option<String>,
    /// Extra cargo arguments from `DFTBENCH_CARGO_ARGS`.
    pub extra_args: Vec<String>,
}

/// Detect build configuration from the current machine.
pub fn detect_config() -> BuildConfig {
    let arch = detect_arch();
    let cpu_flags = detect_cpu_flags();
    let extra = env::var("DFTBENCH_CARGO_ARGS").unwrap_or_default();
    compute_config(&arch, &cpu_flags, &extra)
}

fn detect_arch() -> String {
    if let Ok(arch) = env::var("ARCH") {
        if !arch.trim().is_empty() {
            return arch;
        }
    }
    Command::new("uname")
        .arg("-m")
        .output()
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .unwrap_or_default()
}

fn detect_cpu_flags() -> String {
    if let Ok(out) = Command::new("lscpu").output() {
        let s = String::from_utf8_lossy(&out.stdout);
        for line in s.lines() {
            if line.to_lowercase().contains("flags") {
                return line.to_string();
            }
        }
    }
    if let Ok(out) = Command::new("sysctl")
        .args(["-n", "machdep.cpu.features"])
        .output()
    {
        return String::from_utf8_lossy(&out.stdout).to_string();
    }
    String::new()
}

/// Compute a [`BuildConfig`] from supplied inputs. Separated for testing.
pub fn compute_config(arch: &str, cpu_flags: &str, extra: &str) -> BuildConfig {
    let rustflags = if arch.contains("x86_64") {
        if cpu_flags.contains("avx512f") {
            Some("-C target-feature=+avx512f,+fma".to_string())
        } else if cpu_flags.contains("avx2") {
            Some("-C target-feature=+avx2,+fma".to_string())
        } else {
            None
        }
    } else if arch.contains("aarch64") || arch.contains("arm64") {
        Some("-C target-feature=+neon".to_string())
    } else {
        None
    };

    BuildConfig {
        rustflags,
        extra_args: extra.split_whitespace().map(str::to_string).collect(),
    }
}

fn cargo(cfg: &BuildConfig, subcommand: &str) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.arg(subcommand);
    cmd.args(&cfg.extra_args);
    cmd
}

fn with_rustflags(mut cmd: Command, cfg: &BuildConfig) -> Command {
    if let Some(rf) = &cfg.rustflags {
        cmd.env("RUSTFLAGS", rf);
    }
    cmd
}

pub fn build_command(cfg: &BuildConfig) -> Command {
    let mut cmd = cargo(cfg, "build");
    cmd.arg("--workspace");
    cmd
}

pub fn test_command(cfg: &BuildConfig) -> Command {
    let mut cmd = cargo(cfg, "test");
    cmd.arg("--workspace");
    cmd
}

pub fn clippy_command() -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"]);
    cmd
}

pub fn fmt_command() -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["fmt", "--all"]);
    cmd
}

/// Criterion benchmarks of the adapters and the harness.
pub fn bench_command(cfg: &BuildConfig) -> Command {
    let mut cmd = cargo(cfg, "bench");
    cmd.args(["-p", "dftbench-bench"]);
    with_rustflags(cmd, cfg)
}

/// Release build of the `dftbench` binary, forwarding `args` to it.
pub fn timing_command(cfg: &BuildConfig, args: &[String]) -> Command {
    let mut cmd = cargo(cfg, "run");
    cmd.args(["--release", "-p", "dftbench-cli", "--bin", "dftbench", "--"]);
    cmd.args(args);
    with_rustflags(cmd, cfg)
}

/// Run `first`, then `second` only if the first succeeded.
pub fn run_in_sequence(mut first: Command, mut second: Command) -> Result<()> {
    let status = first.status()?;
    if !status.success() {
        bail!("{:?} failed with {status}", first.get_program());
    }
    let status = second.status()?;
    if !status.success() {
        bail!("{:?} failed with {status}", second.get_program());
    }
    Ok(())
}
