mod cli;
mod commands;
mod config;
mod error;
mod menu;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, MigrateArgs, MigrateCommand};
use crate::error::CliError;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Local-only commands: no credentials, no client
        Some(Command::Config(args)) => commands::config_cmd::handle(args, &cli.global),

        Some(Command::Completions(args)) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "bigctl", &mut std::io::stdout());
            Ok(())
        }

        Some(Command::Migrate(MigrateArgs {
            command: MigrateCommand::Plan,
        })) => {
            let cfg = config::load(&cli.global)?;
            commands::migrate::show_plan(&cfg.plan(), &cli.global);
            Ok(())
        }

        // Everything else talks to the appliance. Credentials are
        // resolved before the client is built.
        cmd => {
            let session = config::resolve_session(&cli.global)?;
            let client = session.appliance.connect()?;
            tracing::debug!(
                base = %session.appliance.endpoint.base(),
                partition = %session.appliance.partition,
                user = client.credentials().username(),
                "session ready"
            );

            match cmd {
                None => menu::run(&client, &session, &cli.global).await,
                Some(cmd) => commands::dispatch(cmd, &client, &session, &cli.global).await,
            }
        }
    }
}
