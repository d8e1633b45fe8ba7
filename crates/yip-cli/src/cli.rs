use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Compile XML layout documents into native UIKit and Android view code.
#[derive(Debug, Parser)]
#[command(name = "yip", version, about)]
pub struct Cli {
    /// Layout documents to compile
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Directory the generated sources are written to
    #[arg(short, long, default_value = "generated")]
    pub out: PathBuf,

    /// Target toolkit
    #[arg(short, long, value_enum, default_value_t = Platform::All)]
    pub platform: Platform,

    /// Project settings (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// More output; repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Platform {
    Ios,
    Android,
    All,
}

impl Platform {
    /// Whether code for the generator registered under `name` is wanted.
    pub fn includes(self, name: &str) -> bool {
        match self {
            Platform::All => true,
            Platform::Ios => name == "ios",
            Platform::Android => name == "android",
        }
    }
}

impl Cli {
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::parse_from(["yip", "-vv", "--platform", "android", "-o", "build", "a.xml", "b.xml"]);
        assert_eq!(cli.inputs, vec![PathBuf::from("a.xml"), PathBuf::from("b.xml")]);
        assert_eq!(cli.out, PathBuf::from("build"));
        assert_eq!(cli.platform, Platform::Android);
        assert_eq!(cli.log_level(), log::LevelFilter::Debug);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_inputs_are_required() {
        assert!(Cli::try_parse_from(["yip"]).is_err());
    }

    #[test]
    fn test_platform_filter() {
        assert!(Platform::All.includes("ios"));
        assert!(Platform::Ios.includes("ios"));
        assert!(!Platform::Ios.includes("android"));
    }

    #[test]
    fn test_command_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
