//! Entry point for the **tabshift** native messaging host.
//!
//! The browser launches this binary when the extension connects and speaks
//! to it over stdin/stdout.  Logging goes to stderr (`RUST_LOG=debug` for
//! details), which the browser forwards to its own log.

use log::{error, info, warn};
use std::io::{BufReader, BufWriter};
use tabshift::arranger::TabArranger;
use tabshift::command::Command;
use tabshift::config::Config;
use tabshift::native::browser::NativeBrowser;

/// Resolve the config directory (`$XDG_CONFIG_HOME/tabshift`).
fn config_dir() -> std::path::PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    std::path::PathBuf::from(base).join("tabshift")
}

/// Try to load the config from `$XDG_CONFIG_HOME/tabshift/config.json`,
/// falling back to compiled-in defaults.
fn load_config() -> Config {
    let path = config_dir().join("config.json");
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            info!("no config file ({}), using defaults", e);
            Config::default()
        }
    }
}

fn main() {
    env_logger::init();

    let config = load_config();

    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();
    let browser = NativeBrowser::new(BufReader::new(stdin), BufWriter::new(stdout));

    let mut arranger = TabArranger::new(browser);
    arranger.set_config(config.arranger.clone());

    if config.startup.check_shortcuts {
        if let Err(e) = arranger.check_shortcuts() {
            warn!("shortcut check failed: {}", e);
        }
    }

    info!("tabshift running");
    loop {
        let name = match arranger.browser().next_command() {
            Ok(Some(name)) => name,
            Ok(None) => break,
            Err(e) => {
                error!("channel error: {}", e);
                std::process::exit(1);
            }
        };
        let cmd = match name.parse::<Command>() {
            Ok(cmd) => cmd,
            Err(e) => {
                warn!("{}", e);
                continue;
            }
        };
        if let Err(e) = arranger.handle(cmd) {
            error!("{} failed: {}", cmd, e);
        }
    }
    info!("extension disconnected, exiting");
}
