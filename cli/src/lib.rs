use anyhow::{anyhow, Error, Result};
use clap::{Parser, Subcommand};
use log::info;
use offlabel_np::config::Config;
use offlabel_np::driver;
use offlabel_np::profile::{default_key_path, Profile};
use oxigraph::model::NamedNode;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "offlabel-np")]
#[command(about = "Publish off-label drug indications as nanopublications")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Publish to the nanopub server; without it nanopubs are only signed locally
    #[clap(long, action, default_value = "false")]
    publish: bool,
    /// Check the first statement against the Biolink shapes
    #[clap(long, action, default_value = "false")]
    validate: bool,
    /// Verbose mode - sets the RUST_LOG level to info, defaults to warning level
    #[clap(long, short, action, default_value = "false", global = true)]
    verbose: bool,
    /// Debug mode - sets the RUST_LOG level to debug, defaults to warning level
    #[clap(long, action, default_value = "false", global = true)]
    debug: bool,
    /// JSON configuration file; command line flags override its values
    #[clap(long, short, global = true)]
    config: Option<PathBuf>,
    /// URL or path of the CSV export to read instead of the configured one
    #[clap(long, short)]
    source: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate an RSA signing key
    Keygen {
        /// Where to write the key, defaults to the configured key path or ~/.nanopub/id_rsa
        path: Option<PathBuf>,
        /// Overwrite an existing key
        #[clap(long, short, action = clap::ArgAction::SetTrue, default_value = "false")]
        force: bool,
    },
    /// Print the effective configuration
    Config,
}

pub fn run() -> Result<()> {
    driver::init_logging();
    let cmd = Cli::parse();
    execute(cmd)
}

pub fn run_from_args<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    driver::init_logging();
    let cmd = Cli::try_parse_from(args).map_err(Error::from)?;
    execute(cmd)
}

fn load_config(cmd: &Cli) -> Result<Config> {
    let mut config = match &cmd.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    // flags only switch modes on
    if cmd.publish {
        config.publish = true;
    }
    if cmd.validate {
        config.validate = true;
    }
    if let Some(source) = &cmd.source {
        config.source = source.clone();
    }
    Ok(config)
}

fn keygen(config: &Config, path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = path
        .or_else(|| config.key_path.clone())
        .or_else(default_key_path)
        .ok_or_else(|| anyhow!("No key path given and no home directory found"))?;
    if path.exists() && !force {
        return Err(anyhow!(
            "A key already exists at {}. Use --force to overwrite it.",
            path.display()
        ));
    }
    let profile = Profile::generate(NamedNode::new(config.creator.as_str())?)?;
    profile.save_key(&path)?;
    println!("Wrote signing key to {}", path.display());
    Ok(())
}

fn execute(cmd: Cli) -> Result<()> {
    // The RUST_LOG env var is set by `init_logging` if OFFLABEL_NP_LOG is present.
    // CLI flags for verbosity take precedence. If nothing is set, we default to "warn".
    if cmd.debug {
        std::env::set_var("RUST_LOG", "debug");
    } else if cmd.verbose {
        std::env::set_var("RUST_LOG", "info");
    } else if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "warn");
    }
    let _ = env_logger::try_init();

    let config = load_config(&cmd)?;
    if cmd.verbose || cmd.debug {
        config.print();
    }

    match cmd.command {
        Some(Commands::Keygen { path, force }) => keygen(&config, path, force),
        Some(Commands::Config) => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
        None => {
            info!(
                "Running in {} mode",
                if config.publish { "publish" } else { "dry-run" }
            );
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            driver::run(&config, &mut out)?;
            Ok(())
        }
    }
}
