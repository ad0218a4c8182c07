use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{info, LevelFilter};

use relayd_core::orchestrator::{Options, Orchestrator, OrchestratorState, Startup};
use relayd_core::plugin_system::Category;

/// Relayd: event-forwarding daemon
#[derive(Parser, Debug)]
#[command(name = "relayd", about, long_about = None, disable_version_flag = true)]
struct CliArgs {
    /// Raise log verbosity to debug
    #[arg(short = 'd', long)]
    debug: bool,

    /// Configuration source; may be given multiple times, merged in order
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    config: Vec<PathBuf>,

    /// Directory of configuration fragments, ingested after all --config sources
    #[arg(long, value_name = "DIR")]
    config_directory: Option<PathBuf>,

    /// List discovered and activated plugins, then exit
    #[arg(long)]
    plugins: bool,

    /// List the declared option schemas of discovered plugins, then exit
    #[arg(long)]
    schemas: bool,

    /// Print the merged configuration, then exit
    #[arg(long)]
    dump: bool,

    /// Plugin search directory; may be given multiple times
    #[arg(long = "plugin-directory", value_name = "DIR")]
    plugin_directory: Vec<PathBuf>,

    /// Print version information and exit
    #[arg(short = 'v', long)]
    version: bool,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Version is answered before any config or plugin logic runs.
    if args.version {
        println!("relayd {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let level = if args.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let options = Options {
        debug: args.debug,
        config_sources: args.config.clone(),
        config_directory: args.config_directory.clone(),
        plugin_directories: args.plugin_directory.clone(),
    };
    let mut orchestrator = Orchestrator::new(options);

    // Listing and dump invocations short-circuit without reaching Ready.
    if args.dump {
        if let Err(e) = orchestrator.resolve_config() {
            eprintln!("relayd: {}", e);
            return ExitCode::FAILURE;
        }
        match serde_json::to_string_pretty(orchestrator.config()) {
            Ok(rendered) => println!("{}", rendered),
            Err(e) => {
                eprintln!("relayd: failed to render configuration: {}", e);
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    if args.plugins || args.schemas {
        if let Err(e) = discover_and_activate(&mut orchestrator) {
            eprintln!("relayd: {}", e);
            return ExitCode::FAILURE;
        }
        if args.plugins {
            print_plugins(&orchestrator);
        }
        if args.schemas {
            print_schemas(&orchestrator);
        }
        return ExitCode::SUCCESS;
    }

    match orchestrator.run() {
        Ok(startup) => {
            log_summary(&startup);
            // The runtime core (event routing, network I/O, processing
            // pipeline) takes ownership of `startup` from here.
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("relayd: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Drive the orchestrator to Activated for the listing commands.
fn discover_and_activate(
    orchestrator: &mut Orchestrator,
) -> relayd_core::orchestrator::Result<()> {
    orchestrator.resolve_config()?;
    orchestrator.discover_plugins()?;
    orchestrator.activate()?;
    Ok(())
}

fn print_plugins(orchestrator: &Orchestrator) {
    debug_assert_eq!(orchestrator.state(), OrchestratorState::Activated);

    if orchestrator.registry().is_empty() {
        println!("No plugins discovered.");
        return;
    }
    for category in Category::ALL {
        let activated: Vec<&str> = orchestrator
            .buckets()
            .get(category)
            .iter()
            .map(|plugin| plugin.descriptor.name.as_str())
            .collect();
        println!("{}:", category);
        for (descriptor_category, descriptor) in orchestrator.registry().all() {
            if descriptor_category != category {
                continue;
            }
            let status = if activated.contains(&descriptor.name.as_str()) {
                "activated"
            } else {
                "available"
            };
            let version = descriptor
                .version
                .as_ref()
                .map(|v| format!(" v{}", v))
                .unwrap_or_default();
            println!("  - {}{} [{}] ({})", descriptor.name, version, status, descriptor.source.display());
        }
    }
}

fn print_schemas(orchestrator: &Orchestrator) {
    for (category, descriptor) in orchestrator.registry().all() {
        println!("{}/{}:", category, descriptor.name);
        if let Some(description) = &descriptor.description {
            println!("  {}", description);
        }
        if descriptor.options.is_empty() {
            println!("  (no declared options)");
            continue;
        }
        for option in &descriptor.options {
            let default = if option.default.is_null() {
                "no default".to_string()
            } else {
                format!("default: {}", option.default)
            };
            match &option.help {
                Some(help) => println!("  {} ({}) - {}", option.name, default, help),
                None => println!("  {} ({})", option.name, default),
            }
        }
    }
}

fn log_summary(startup: &Startup) {
    for (category, plugins) in startup.buckets.iter() {
        for plugin in plugins {
            info!("Activated {} plugin '{}'", category, plugin.descriptor.name);
        }
    }
    info!(
        "Startup complete: {} plugin(s) activated, {} registered, handing off to the runtime core",
        startup.buckets.total(),
        startup.registry.len()
    );
}
