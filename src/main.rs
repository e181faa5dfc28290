//! Binary entrypoint for the Roster CLI.
//!
//! Commands:
//! - `menu` - interactive menu (the default when no command is given)
//! - `list` - print every character
//! - `add --name <n> --class <c> --level <l> --hp <h> [--equipment <a|b>]` - append a character
//! - `level-up <number>` - raise the level of the numbered character from `list`
//! - `init` - write a starter `roster.toml` and an empty character file
//!
//! See the library crate docs for module-level details: `roster::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{debug, info};
use tokio::io::{stdin, stdout, BufReader};

use roster::config::Config;
use roster::menu::{render, Menu};
use roster::roster::{Record, RosterStore};

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Manage a comma-separated roster of RPG characters")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "roster.toml", global = true)]
    config: String,

    /// Character file path; overrides `store.path` from the config
    #[arg(short, long, global = true)]
    store: Option<String>,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive menu
    Menu,
    /// Display all characters
    List,
    /// Add a new character
    Add {
        /// Character name
        #[arg(long)]
        name: String,
        /// Character class
        #[arg(long = "class")]
        profession: String,
        /// Starting level
        #[arg(long, allow_hyphen_values = true)]
        level: i32,
        /// Hit points
        #[arg(long, allow_hyphen_values = true)]
        hp: i32,
        /// Equipment items separated by '|'
        #[arg(long, default_value = "")]
        equipment: String,
    },
    /// Raise a character's level by one
    LevelUp {
        /// Character number as shown by `list` / the menu (1-based)
        number: usize,
    },
    /// Create a default configuration file and an empty character file
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Init writes the config, so it starts from defaults
    let config = match cli.command {
        Some(Commands::Init) => Config::default(),
        _ => Config::load_or_default(&cli.config).await?,
    }
    .with_store_override(cli.store.clone());

    init_logging(&config, cli.verbose);
    debug!("using store {}", config.store.path);
    let store = RosterStore::from_config(&config.store);

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            let mut menu = Menu::new(store, BufReader::new(stdin()), stdout())
                .with_pause(config.menu.pause_after_action);
            menu.run().await?;
        }
        Commands::List => match store.list().await {
            Ok(roster) => print!("{}", render::listing(&roster)),
            Err(e) => exit_with(&e),
        },
        Commands::Add {
            name,
            profession,
            level,
            hp,
            equipment,
        } => {
            let record = Record::new(name, profession, level, hp, equipment.split('|'));
            match store.append(&record).await {
                Ok(()) => println!("Character added."),
                Err(e) => exit_with(&e),
            }
        }
        Commands::LevelUp { number } => {
            let Some(ordinal) = number.checked_sub(1) else {
                println!("Selection out of range.");
                std::process::exit(1);
            };
            match store.increment_selection(ordinal).await {
                Ok(up) => print!("{}", render::level_up_summary(&up)),
                Err(e) => exit_with(&e),
            }
        }
        Commands::Init => {
            Config::create_default(&cli.config).await?;
            info!("Configuration file created at {}", cli.config);
            if store.load_all().await?.is_none() {
                if let Some(parent) = store.path().parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await?;
                }
                tokio::fs::write(store.path(), "").await?;
                info!("Created empty character file at {}", store.path().display());
            }
            println!("Initialized {} and {}", cli.config, store.path().display());
        }
    }

    Ok(())
}

/// Print the user-facing message; notices exit cleanly, failures with status 1.
fn exit_with(err: &roster::roster::RosterError) {
    println!("{}", render::error_message(err));
    if !err.is_notice() {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

fn init_logging(config: &Config, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let base_level = match verbosity {
        0 => config.logging.level_filter(),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);
    if let Some(ref file) = config.logging.file {
        if let Ok(f) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(file)
        {
            let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));

            // Echo to the console only when attached to a terminal
            let is_tty = atty::is(atty::Stream::Stdout);

            builder.format(move |fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                let line = format!("{} [{}] {}", ts, record.level(), record.args());
                if let Ok(mut guard) = write_mutex.lock() {
                    let _ = writeln!(guard, "{}", line);
                }
                if is_tty {
                    writeln!(fmt, "{}", line)
                } else {
                    Ok(())
                }
            });
            let _ = builder.try_init();
            return;
        }
    }
    builder.format(|fmt, record| {
        let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
        writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
    });
    let _ = builder.try_init();
}
