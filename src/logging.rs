use env_logger::{Builder, Env, Target, WriteStyle};
use std::io::Write;

/// Installs the global logger. Records go to stderr so they never mix with the
/// prompts and progress on stdout.
///
/// `REFACTOR_LOG` overrides the level picked from `verbosity`. Level tags are
/// only colored when `color` is set and stderr is a terminal.
pub fn init_logger(verbosity: u8, color: bool) -> Result<(), log::SetLoggerError> {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env = Env::default().filter_or("REFACTOR_LOG", level);

    Builder::from_env(env)
        .target(Target::Stderr)
        .write_style(write_style(color))
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            writeln!(buf, "{style}[{}]{style:#} {}", record.level(), record.args())
        })
        .try_init()
}

fn write_style(color: bool) -> WriteStyle {
    if color { WriteStyle::Auto } else { WriteStyle::Never }
}
