use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use hostsys_common::{SystemError, Value};
use hostsys_module::{operations, FacadeConfig, ProcessControl};

/// hostsys - drive the system:* process control operations from a shell
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path (YAML)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

/// Program arguments that start with `-` can be passed after `--`.
#[derive(Subcommand, Debug)]
enum Command {
    /// List the available operations
    List,

    /// Print the current working directory
    Dir,

    /// Change directory, then print it or run a program there
    Chdir {
        path: String,
        /// Program (and arguments) to run in the new directory
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Start a program and print its process identifier without waiting
    Execute {
        program: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Start a program, wait for it and exit with its status code
    Run {
        program: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Wait for a child process and print its status code
    Wait {
        #[arg(allow_hyphen_values = true)]
        pid: f64,
    },

    /// Exit with the given code
    Exit {
        #[arg(allow_hyphen_values = true)]
        code: f64,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => FacadeConfig::load_from_file(path)?,
        None => FacadeConfig::default(),
    };

    initialize_logging(args.debug, &config.logging.level)?;
    if let Some(path) = &args.config {
        info!("Config file: {}", path);
    }

    let control = ProcessControl::new(&config);
    dispatch(&control, args.command)
}

fn dispatch(control: &ProcessControl, command: Command) -> Result<()> {
    match command {
        Command::List => {
            for entry in operations() {
                println!("{:<16} {}", entry.name, entry.documentation);
            }
        }
        Command::Dir => print_result(call(control, operations::CURRENT_DIRECTORY, vec![])?),
        Command::Chdir { path, command } => {
            call(control, operations::CHANGE_DIRECTORY, vec![Value::from(path.as_str())])?;
            match command.split_first() {
                Some((program, rest)) => run(control, program, rest)?,
                None => print_result(call(control, operations::CURRENT_DIRECTORY, vec![])?),
            }
        }
        Command::Execute { program, args } => {
            let pid = call(control, operations::EXECUTE, execute_arguments(&program, &args))?;
            print_result(pid);
        }
        Command::Run { program, args } => run(control, &program, &args)?,
        Command::Wait { pid } => {
            print_result(call(control, operations::WAIT, vec![Value::number(pid)])?)
        }
        Command::Exit { code } => {
            call(control, operations::EXIT, vec![Value::number(code)])?;
        }
    }

    Ok(())
}

/// Execute + wait, then exit with the child's status code.
fn run(control: &ProcessControl, program: &str, args: &[String]) -> Result<()> {
    let pid = call(control, operations::EXECUTE, execute_arguments(program, args))?
        .ok_or_else(|| anyhow!("{} returned no process identifier", operations::EXECUTE))?;
    debug!("Started {} as {}", program, pid);

    let status = call(control, operations::WAIT, vec![pid])?
        .ok_or_else(|| anyhow!("{} returned no status", operations::WAIT))?;
    info!("{} finished with status {}", program, status);

    call(control, operations::EXIT, vec![status])?;
    Ok(())
}

fn execute_arguments(program: &str, args: &[String]) -> Vec<Value> {
    let list = args.iter().map(|a| Value::from(a.as_str())).collect();
    vec![Value::from(program), Value::List(list)]
}

fn call(control: &ProcessControl, name: &str, arguments: Vec<Value>) -> Result<Option<Value>> {
    control
        .invoke(name, &arguments)
        .map_err(|e: SystemError| anyhow!("{}: {}", e.kind(), e))
}

fn print_result(result: Option<Value>) {
    match result {
        Some(Value::String(text)) => println!("{}", text),
        Some(value) => println!("{}", value),
        None => {}
    }
}

fn initialize_logging(debug: bool, configured_level: &str) -> Result<()> {
    let level = if debug { "debug" } else { configured_level };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}
