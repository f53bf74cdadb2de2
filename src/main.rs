use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use scriptquill::backend::ReflectiveBackend;
use scriptquill::config::Config;
use scriptquill::sample;

/// ScriptQuill - evaluate path expressions against a sample object graph
#[derive(Parser)]
#[command(name = "scriptquill")]
#[command(version)]
#[command(about = "Evaluate path expressions against a live object graph", long_about = None)]
struct Cli {
    /// Config file (default: ~/.config/scriptquill/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run a command and exit instead of starting the REPL (repeatable)
    #[arg(short, long = "exec", value_name = "CMD")]
    exec: Vec<String>,

    /// Don't print the welcome message
    #[arg(short, long)]
    quiet: bool,
}

/// Chosen overloads are logged at `debug`, so `log_dispatch` lowers this
/// crate's level to match.
fn default_filter(config: &Config) -> &'static str {
    if config.log_dispatch {
        "warn,scriptquill=debug"
    } else {
        "warn"
    }
}

fn init_logging(config: &Config) {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter(config)),
    )
    .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    init_logging(&config);

    let mut backend = ReflectiveBackend::new(sample::world(), &config);

    if !cli.exec.is_empty() {
        let mut failed = false;
        for command in &cli.exec {
            let result = backend.exec(command);
            if result.is_exception {
                eprintln!("{}", result.output);
                failed = true;
            } else {
                println!("{}", result.output);
            }
        }
        return Ok(if failed {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        });
    }

    if !cli.quiet {
        println!("{}\n", backend.motd());
    }
    repl(&mut backend, &config).context("REPL failed")?;
    log::info!("{} commands run", backend.history().len());
    Ok(ExitCode::SUCCESS)
}

/// Reads commands from stdin until EOF, `exit`, or `quit`.
fn repl(backend: &mut ReflectiveBackend, config: &Config) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();
    loop {
        write!(stdout, "{}", config.prompt)?;
        stdout.flush()?;
        let Some(line) = lines.next() else {
            writeln!(stdout)?;
            break;
        };
        let line = line?;

        // Terminals in cooked mode only deliver whole lines, so a trailing
        // tab stands in for the completion key.
        if let Some(partial) = line.strip_suffix('\t') {
            let completions = backend.autocomplete(partial, None);
            if let Some(help) = completions.help_text {
                writeln!(stdout, "{}", help)?;
            }
            for candidate in completions.matches {
                writeln!(stdout, "  {}", candidate)?;
            }
            continue;
        }

        match line.trim() {
            "" => continue,
            "exit" | "quit" => break,
            command => {
                let result = backend.exec(command);
                writeln!(stdout, "{}", result.output)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_dispatch_enables_debug_records() {
        assert_eq!(default_filter(&Config::default()), "warn");
        let config = Config {
            log_dispatch: true,
            ..Config::default()
        };
        let filter = default_filter(&config);
        assert!(filter.contains("scriptquill=debug"));
    }
}
