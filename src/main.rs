use clap::Parser;
use tagwiki::cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tagwiki=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve { host, port }) => {
            tagwiki::cli::serve::run(&cli.config, host, port).await?;
        }
        Some(Commands::Slug { titles, verbose }) => {
            tagwiki::cli::slug::run(&titles, verbose);
        }
        Some(Commands::Check) => {
            tagwiki::cli::check::run(&cli.config)?;
        }
        None => {
            // No subcommand provided, print help
            use clap::CommandFactory;
            Cli::command().print_help()?;
        }
    }

    Ok(())
}
