use crate::demo::{
    run_demo, run_eligibility, run_pages, run_route, DemoArgs, EligibilityArgs, PagesArgs,
    RouteArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use visa_navigator::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Visa Navigator",
    about = "Resolve visa pages, check eligibility, and run the application wizard service",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Resolve the visa page for a destination and stay length
    Route(RouteArgs),
    /// Check advisory eligibility for a nationality
    Eligibility(EligibilityArgs),
    /// List every visa page the resolver can return
    Pages(PagesArgs),
    /// Walk a scripted wizard session end to end and print the outcome
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Route(args) => run_route(args),
        Command::Eligibility(args) => run_eligibility(args),
        Command::Pages(args) => run_pages(args),
        Command::Demo(args) => run_demo(args),
    }
}
