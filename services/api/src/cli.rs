use crate::demo::{run_demo, run_templates, run_validate, DemoArgs, TemplatesArgs, ValidateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use plan_review::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "plan-review",
    about = "Validate and score business plans against their templates",
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
    /// Score a submission file and print the review
    Validate(ValidateArgs),
    /// List catalog templates or print one of them
    Templates(TemplatesArgs),
    /// Review a sample plan against the standard template
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
        Command::Validate(args) => run_validate(args),
        Command::Templates(args) => run_templates(args),
        Command::Demo(args) => run_demo(args),
    }
}
