use clap::{CommandFactory, Parser};
use miette::Result;
use mdk::cli::{Cli, Commands};
use mdk::entities::EntityKind;
use mdk::logging::{self, LogConfig};

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    logging::init(&LogConfig::from_verbosity(cli.global.verbose, cli.global.quiet));

    match cli.command {
        Commands::Init(args) => mdk::cli::commands::init::run(args),
        Commands::ItemType(cmd) => mdk::cli::entity_cmd::run(EntityKind::ItemType, cmd, &cli.global),
        Commands::Uom(cmd) => mdk::cli::entity_cmd::run(EntityKind::Uom, cmd, &cli.global),
        Commands::Port(cmd) => {
            mdk::cli::entity_cmd::run(EntityKind::PortOfDischarge, cmd, &cli.global)
        }
        Commands::Profile(cmd) => mdk::cli::commands::profile::run(cmd, &cli.global),
        Commands::Validate(args) => mdk::cli::commands::validate::run(args),
        Commands::Schema(args) => mdk::cli::commands::schema::run(args),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "mdk", &mut std::io::stdout());
            Ok(())
        }
    }
}
