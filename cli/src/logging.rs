use std::fs::OpenOptions;
use std::path::Path;

use env_logger::{Builder, Env, Target, WriteStyle};
use log::LevelFilter;

const LOG_FILE_NAME: &str = "tasklist.log";

/// Sets up `env_logger` from `RUST_LOG` (default `warn`).
///
/// The TUI owns the terminal, so in interactive mode records go to
/// `<data-dir>/tasklist.log` instead of stderr. If that file cannot be
/// opened, logging is switched off rather than drawn over the screen.
pub fn init(data_dir: Option<&Path>, interactive: bool) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));

    if interactive {
        let file = data_dir.and_then(|dir| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join(LOG_FILE_NAME))
                .ok()
        });
        match file {
            Some(file) => {
                builder.target(Target::Pipe(Box::new(file)));
                builder.write_style(WriteStyle::Never);
            }
            None => {
                builder.filter_level(LevelFilter::Off);
            }
        }
    }

    // Already initialized is fine.
    let _ = builder.try_init();
}
