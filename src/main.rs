use clap::Parser;
use tidyshelf::cli::{Cli, run};
use tidyshelf::output::OutputFormatter;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        OutputFormatter::error(&e);
        std::process::exit(1);
    }
}
