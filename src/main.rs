use anyhow::Result;
use argh::FromArgs;
use pipeshell::Interpreter;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

#[derive(FromArgs)]
/// An interactive shell for one job: pipelines of external commands, with
/// optional file redirects at the ends and background execution.
struct Args {
    /// suppress the prompt (for scripted input)
    #[argh(switch, short = 't')]
    no_prompt: bool,

    /// log engine tracing at debug level
    #[argh(switch, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args: Args = argh::from_env();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    Interpreter::new().repl(!args.no_prompt)?;
    Ok(())
}
