use crate::demo::{run_demo, run_recovery_report, DemoArgs, RecoveryReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use contentieux::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Contentieux Recovery Service",
    about = "Run the fine recovery service and its revenue distribution reports from the command line",
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
    /// Generate a revenue distribution report for a period
    Report(RecoveryReportArgs),
    /// Run an end-to-end CLI demo covering settlement and reporting
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
        Command::Report(args) => run_recovery_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
