use crate::cli::{Cli, Command};
use crate::commands;
use crate::context::AppContext;
use crate::error::AppResult;

pub fn run(cli: Cli) -> AppResult<()> {
    let Cli {
        source,
        json,
        verbose: _,
        command,
    } = cli;

    let ctx = AppContext::bootstrap(source, json)?;

    match command {
        Command::List => commands::list::run(&ctx),
        Command::Show(args) => commands::show::run(&ctx, args),
    }
}
