// Copyright (c) 2026 rezky_nightky

mod cell;
mod charset;
mod config;
mod dice;
mod display;
mod error;
mod frame;
mod input;
mod line;
mod logging;
mod palette;
mod password;
mod pool;
mod rain;
mod runtime;
mod terminal;
mod wake;

#[cfg(unix)]
use std::thread;

use clap::builder::styling::{AnsiColor as ClapAnsiColor, Color as ClapColor};
use clap::builder::styling::{Effects as ClapEffects, Style as ClapStyle};
use clap::builder::Styles as ClapStyles;
use clap::{CommandFactory, FromArgMatches};
use rand::{rngs::StdRng, SeedableRng};
use tracing::{error, info};

#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

use crate::config::{color_enabled_stdout, print_list_colors, print_list_commands, Args};
use crate::input::Keyboard;
use crate::rain::Rain;
use crate::terminal::{restore_terminal_best_effort, Screen};

const HELP_TEMPLATE_PLAIN: &str = "\
{before-help}{about-with-newline}
USAGE:
  {usage}

{all-args}{after-help}";

const HELP_TEMPLATE_COLOR: &str = "\
{before-help}{about-with-newline}
\x1b[1;36mUSAGE:\x1b[0m
  {usage}

{all-args}{after-help}";

fn build_info() -> String {
    let sha = env!("GLYPHRAIN_GIT_SHA");
    if sha.is_empty() {
        env!("GLYPHRAIN_BUILD").to_string()
    } else {
        format!("{} ({})", env!("GLYPHRAIN_BUILD"), sha)
    }
}

fn clap_styles() -> ClapStyles {
    ClapStyles::styled()
        .header(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Cyan))),
        )
        .usage(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Green))),
        )
        .literal(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Yellow))))
        .placeholder(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Magenta))))
}

fn install_exit_handlers() {
    std::panic::set_hook(Box::new(|info| {
        restore_terminal_best_effort();
        eprintln!("{}", info);
    }));

    #[cfg(unix)]
    {
        if let Ok(mut signals) = Signals::new([SIGINT, SIGTERM, SIGHUP]) {
            thread::spawn(move || {
                if let Some(sig) = signals.forever().next() {
                    restore_terminal_best_effort();
                    std::process::exit(128 + sig);
                }
            });
        }
    }

    #[cfg(windows)]
    {
        if let Err(e) = ctrlc::set_handler(|| {
            restore_terminal_best_effort();
            std::process::exit(130);
        }) {
            eprintln!("failed to install Ctrl-C handler: {}", e);
        }
    }
}

fn main() {
    install_exit_handlers();

    let mut cmd = Args::command();
    cmd = cmd.styles(clap_styles());
    let help_template = if color_enabled_stdout() {
        HELP_TEMPLATE_COLOR
    } else {
        HELP_TEMPLATE_PLAIN
    };
    cmd = cmd.help_template(help_template);
    cmd.build();

    if cmd.get_arguments().any(|a| a.get_id().as_str() == "help") {
        cmd = cmd.mut_arg("help", |a| a.help_heading("HELP"));
    }
    cmd.build();

    let matches = cmd.get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    if args.list_colors {
        print_list_colors();
        return;
    }

    if args.list_commands {
        print_list_commands();
        return;
    }

    if args.version {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return;
    }

    if args.info {
        println!("Version: v{}", env!("CARGO_PKG_VERSION"));
        println!("Build: {}", build_info());
        println!("Copyright: (c) 2026 {}", env!("CARGO_PKG_AUTHORS"));
        println!("License: {}", env!("CARGO_PKG_LICENSE"));
        println!("Source: {}", env!("CARGO_PKG_REPOSITORY"));
        return;
    }

    if let Some(path) = &args.log_file {
        if let Err(e) = logging::init(path) {
            eprintln!("failed to open log file {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }

    let exit_lock = if args.password {
        match password::prompt() {
            Ok(secret) => Some(secret),
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
    } else {
        None
    };

    let settings = args.settings();
    info!(?settings, seed = ?args.seed, "starting");

    if let Some(wait) = settings.start_timer {
        std::thread::sleep(wait);
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    loop {
        let run_rng = StdRng::from_rng(&mut rng);
        let result = Screen::new(args.do_not_clear)
            .map_err(error::RainError::from)
            .and_then(|mut screen| {
                let mut rain = Rain::new(settings.clone(), &mut screen, run_rng)?;
                rain.run(&mut screen, &mut Keyboard)
            });

        if let Err(e) = result {
            error!(%e, "rain failed");
            // The screen is gone by now; the message lands on the normal terminal.
            eprintln!("{}", e);
            std::process::exit(1);
        }

        let Some(lock) = &exit_lock else {
            break;
        };
        match password::prompt() {
            Ok(attempt) if attempt == *lock => break,
            Ok(_) => info!("wrong exit password"),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
    }
}
