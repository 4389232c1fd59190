use anyhow::Result;
use clap::Parser;
use phpup::{Cli, Commands, commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Status => commands::status::run(),
        Commands::List(args) => commands::list::run(args),
        Commands::Use(args) => commands::switch::run(args, cli.dry_run),
        Commands::Install(args) => commands::operate::run_install(args, cli.dry_run),
        Commands::Upgrade(args) => commands::operate::run_upgrade(args, cli.dry_run),
        Commands::Repair => commands::operate::run_repair(cli.dry_run),
        Commands::Sites => commands::sites::run(),
        Commands::Proxy(args) => commands::proxy::run(args, cli.dry_run),
        Commands::Secure(args) => commands::secure::run(args, true, cli.dry_run),
        Commands::Unsecure(args) => commands::secure::run(args, false, cli.dry_run),
        Commands::Extensions(args) => commands::extensions::run(args),
        Commands::Ini(args) => commands::ini::run(args, cli.dry_run),
        Commands::Completions(args) => commands::completions::run(args),
    }
}
