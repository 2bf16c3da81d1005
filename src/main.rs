//! OR-AF - agent orchestration framework
//!
//! Main entry point for the CLI application.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use or_af::agents::run_pipeline;
use or_af::cli::commands::{format_output, list_agents};
use or_af::core::parse_params;
use or_af::{Config, Repl};
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

/// OR-AF - register agents, dispatch tasks, inspect results
#[derive(Parser, Debug)]
#[command(name = "or-af")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Orchestrator name
    #[arg(long, short = 'n')]
    name: Option<String>,

    /// Enable debug output
    #[arg(long, short = 'd')]
    debug: bool,

    /// Read configuration from this file instead of the default location
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the configured agents
    Agents,

    /// Run a single task and print its result
    Run {
        /// Agent name
        agent: String,
        /// Task name
        task: String,
        /// Task parameters as a JSON object
        #[arg(long, short = 'p', default_value = "")]
        params: String,
    },

    /// Run the preprocess → optimize → report demo pipeline
    Pipeline {
        /// Raw data points
        #[arg(long, value_delimiter = ',', default_values_t = vec![1.0, 2.0, 3.0, 4.0, 5.0])]
        data: Vec<f64>,
    },

    /// Print the default configuration file
    Config {
        /// Write the active configuration to the config file
        #[arg(long)]
        save: bool,
    },
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Build configuration
    let _ = dotenvy::dotenv();
    let (mut config, config_problem) = match args.config {
        Some(ref path) => (Config::load_from_path(path)?, None),
        None => Config::load_or_default(&Config::config_file()),
    };

    // Apply CLI overrides
    if let Some(ref name) = args.name {
        config.set_name(name.clone());
    }

    if args.debug {
        config.set_debug(true);
    }

    init_logging(&config);

    if let Some(err) = config_problem {
        warn!(
            path = %Config::config_file().display(),
            error = %err,
            "ignoring config file, using defaults"
        );
    }

    let mut orchestrator = config.build_orchestrator();

    match args.command {
        Some(Command::Agents) => {
            println!("{}", orchestrator);
            println!("{}", list_agents(&orchestrator));
        }
        Some(Command::Run {
            agent,
            task,
            params,
        }) => {
            let params = parse_params(&params)?;
            let result = orchestrator.execute_task(&agent, &task, params)?;
            println!("{}", format_output(&result)?);
        }
        Some(Command::Pipeline { data }) => {
            let report = run_pipeline(&mut orchestrator, &data)?;
            println!("{}", report);
            println!("All results:");
            for key in orchestrator.get_results().keys() {
                println!("  {}", key);
            }
        }
        Some(Command::Config { save }) => {
            if save {
                if Config::config_exists() {
                    println!("Overwriting {}", Config::config_file().display());
                }
                let path = config.save()?;
                println!("Saved configuration to {}", path.display());
            } else {
                println!("# {}", Config::config_file().display());
                println!("{}", Config::default_config_toml());
            }
        }
        None => {
            let mut repl = Repl::with_config(&config);
            repl.run()?;
        }
    }

    Ok(())
}
