use clap::{Parser, Subcommand};

mod cmd;
mod items;
mod params;
mod tax;

#[derive(Parser, Debug)]
#[command(
    name = "rateio",
    version,
    about = "Brazilian import tax apportionment (rateio) and ICMS gross-up calculator"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the augmented item table with allocated costs and taxes
    Compute(cmd::compute::ComputeCommand),
    /// Aggregate shipment totals
    Summary(cmd::summary::SummaryCommand),
    /// Print expected input formats
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Compute(cmd) => cmd.exec(),
        Command::Summary(cmd) => cmd.exec(),
        Command::Schema(cmd) => cmd.exec(),
    }
}
