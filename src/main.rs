use clap::Parser;
use pwvault::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => pwvault::cli::commands::init::execute(&cli),
        Commands::Add {
            ref username,
            ref value,
        } => pwvault::cli::commands::add::execute(&cli, username, value.as_deref()),
        Commands::Get { ref username } => pwvault::cli::commands::get::execute(&cli, username),
        Commands::Remove {
            ref username,
            force,
        } => pwvault::cli::commands::remove::execute(&cli, username, force),
        Commands::List => pwvault::cli::commands::list::execute(&cli),
        Commands::Shell => pwvault::cli::commands::shell::execute(&cli),
        Commands::Encrypt {
            ref input,
            ref output,
        } => pwvault::cli::commands::encrypt::execute(&cli, input, output.as_deref()),
        Commands::Decrypt {
            ref input,
            ref output,
        } => pwvault::cli::commands::decrypt::execute(&cli, input, output.as_deref()),
    };

    if let Err(e) = result {
        pwvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `PWVAULT_LOG` (default: warn).
fn init_logging() {
    let filter = EnvFilter::try_from_env("PWVAULT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
