mod config;
mod offline;
mod ui;

use std::path::PathBuf;

use clap::Parser;
use eframe::egui;
use tictactoe_common::games::tictactoe::GameSession;
use tictactoe_common::logger::{self, LogLevel};
use tictactoe_common::{Mark, log, log_warn};

use config::{get_config_manager, load_config};
use offline::LocalBroadcaster;
use ui::{TicTacToeApp, prompt_for_sign};

#[derive(Parser)]
#[command(name = "tictactoe_desktop", about = "4x4 tic-tac-toe against the computer")]
struct Args {
    #[arg(long)]
    use_log_prefix: bool,

    /// Play as X or O without showing the sign dialog.
    #[arg(long)]
    sign: Option<Mark>,

    /// Config file; defaults to tictactoe_config.yaml next to the executable.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log search statistics and ignored clicks.
    #[arg(long)]
    verbose: bool,
}

/// Command line beats the dialog; a dismissed dialog falls back to the
/// configured default.
fn resolve_sign(cli_sign: Option<Mark>, default_sign: Mark, prompt: impl FnOnce(Mark) -> Option<Mark>) -> Mark {
    if let Some(sign) = cli_sign.filter(|sign| !sign.is_empty()) {
        return sign;
    }
    match prompt(default_sign) {
        Some(sign) if !sign.is_empty() => sign,
        _ => {
            log!("No sign chosen, playing as {}", default_sign);
            default_sign
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_manager = get_config_manager(args.config);
    let (config, config_warning) = load_config(&config_manager);

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    let level = if args.verbose { LogLevel::Debug } else { config.log_level };
    logger::init_logger(prefix, level);
    if let Some(warning) = config_warning {
        log_warn!("{}", warning);
    }

    let user_sign = resolve_sign(args.sign, config.default_sign, prompt_for_sign);
    let session = GameSession::with_broadcaster(user_sign, LocalBroadcaster::new())
        .ok_or("a session needs X or O")?
        .with_pruning(config.pruning);
    log!("Playing as {}, computer searches with {:?} pruning", user_sign, session.pruning());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_title("Tic-Tac-Toe"),
        ..Default::default()
    };

    eframe::run_native(
        "Tic-Tac-Toe",
        options,
        Box::new(move |_cc| Ok(Box::new(TicTacToeApp::new(session)))),
    )?;

    Ok(())
}
