//! Parley CLI entry point.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use parley_runtime::{Shell, ShellConfig};

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    config_file: Option<PathBuf>,
    commands: Vec<String>,
    files: Vec<PathBuf>,
    batch_mode: bool,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e
                .downcast_ref::<parley_foundation::Error>()
                .and_then(|err| err.context.as_ref())
            {
                Some(context) => eprintln!("\x1b[31mError: {e}\x1b[0m ({context})"),
                None => eprintln!("\x1b[31mError: {e}\x1b[0m"),
            }
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut args = args.into_iter().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-b" | "--batch" => config.batch_mode = true,
            "--config" => {
                let path = args.next().ok_or("--config requires a path")?;
                config.config_file = Some(PathBuf::from(path));
            }
            "-c" | "--command" => {
                let line = args.next().ok_or("-c requires a command line")?;
                config.commands.push(line);
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            path => config.files.push(PathBuf::from(path)),
        }
    }

    Ok(config)
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let cli = parse_args(args)?;

    if cli.show_help {
        print_help();
        return Ok(());
    }

    if cli.show_version {
        println!("parley {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = match &cli.config_file {
        Some(path) => ShellConfig::load(path)?,
        None => ShellConfig::default(),
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_filter))
        .init();

    let mut shell = Shell::new(config)?;

    for line in &cli.commands {
        if let Some(value) = shell.execute(line)? {
            if !value.is_nil() {
                println!("{value}");
            }
        }
    }

    for file in &cli.files {
        shell.run_script(file)?;
    }

    // One-shot commands and batch mode never enter the interactive loop.
    if cli.batch_mode || !cli.commands.is_empty() || shell.is_exiting() {
        return Ok(());
    }

    if !cli.files.is_empty() {
        shell = shell.without_banner();
    }

    shell.run()?;
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mParley\x1b[0m - Command parsing and dispatch shell

\x1b[1mUSAGE:\x1b[0m
    parley [OPTIONS] [FILES...]

\x1b[1mARGUMENTS:\x1b[0m
    [FILES...]    Scripts to run before starting the shell

\x1b[1mOPTIONS:\x1b[0m
    -h, --help            Print help information
    -V, --version         Print version information
    -b, --batch           Run scripts and exit (no shell)
    -c, --command LINE    Run one command line and exit (repeatable)
    --config PATH         Load shell settings from a TOML file

\x1b[1mENVIRONMENT:\x1b[0m
    RUST_LOG              Log filter (overrides log-filter in the config)

\x1b[1mEXAMPLES:\x1b[0m
    parley                          Start the interactive shell
    parley setup.parley             Run setup.parley, then start the shell
    parley -b nightly.parley        Run nightly.parley and exit
    parley -c 'echo \"hello world\"'  Run one command and exit

\x1b[1mSHELL COMMANDS:\x1b[0m
    help [prefix]        List commands
    describe <command>   Show a command's metadata
    echo [words...]      Print the arguments
    escape <text>        Quote text so it lexes as one token
    exit, quit           Leave the shell (Ctrl+D also works)"
    );
}
