use byte_units::cli::Cli;
use clap::Parser;

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(err) = cli.run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
