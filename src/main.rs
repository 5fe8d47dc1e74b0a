use anyhow::Result;
use clap::Parser;
use prodcost::cli::{AppContext, Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Build a context once, pass everywhere
    let ctx = AppContext {
        quiet: cli.quiet,
        no_color: cli.no_color,
    };

    prodcost::infra::logging::init(&ctx);

    match cli.command {
        Commands::Comps(args) => prodcost::comps_run(args, &ctx),
        Commands::Estimate(args) => prodcost::estimate_run(args, &ctx),
        Commands::Label(args) => prodcost::label_run(args, &ctx),
        Commands::Init(args) => prodcost::infra::config::init(args, &ctx),
        Commands::Completions(args) => prodcost::completion::run(args, &ctx),
    }
}
