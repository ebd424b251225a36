use clap::Parser;
use log::LevelFilter;
use moneywise::core::config::{self, CliOverrides};
use moneywise::core::curriculum::Curriculum;
use moneywise::core::state::Tab;
use moneywise::tui;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::io;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "moneywise", about = "Personal finance lessons and budgeting in your terminal")]
struct Args {
    /// Tab to open after signing in
    #[arg(short, long, value_enum)]
    tab: Option<Tab>,

    /// Log level written to the log file (off, error, warn, info, debug, trace)
    #[arg(long, value_parser = parse_level)]
    log_level: Option<LevelFilter>,

    /// Print the curriculum outline as JSON and exit
    #[arg(long)]
    list_modules: bool,
}

fn parse_level(value: &str) -> Result<LevelFilter, String> {
    value
        .parse()
        .map_err(|_| format!("unknown log level: {value}"))
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let curriculum = Curriculum::builtin().map_err(io::Error::other)?;

    if args.list_modules {
        let json = serde_json::to_string_pretty(&curriculum.outline()).map_err(io::Error::other)?;
        println!("{json}");
        return Ok(());
    }

    let file_config = config::load_config().map_err(io::Error::other)?;
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            tab: args.tab,
            log_level: args.log_level,
        },
    );

    // The TUI owns stdout, so logs go to a file
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!(
        "MoneyWise starting: {} modules, start tab {:?}",
        curriculum.len(),
        resolved.start_tab
    );

    tui::run(resolved, Arc::new(curriculum))
}
