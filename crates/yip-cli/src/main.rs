use clap::Parser;
use yip_cli::Cli;

fn main() {
    let args = Cli::parse();
    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    if let Err(err) = yip_cli::run(&args) {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}
