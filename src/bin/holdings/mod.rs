mod action;
mod parser;

#[macro_use] extern crate holdings;

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use log::error;

use holdings::config::Config;
use holdings::core::EmptyResult;
use holdings::reports;

use self::action::Action;
use self::parser::{Parser, GlobalOptions};

fn main() -> ExitCode {
    let mut parser = Parser::new();

    let global = match parser.parse_global() {
        Ok(global) => global,
        Err(err) => {
            let _ = writeln!(io::stderr(), "{err}.");
            return ExitCode::FAILURE;
        },
    };

    if let Err(err) = easy_logging::init(module_path!(), global.log_level) {
        let _ = writeln!(io::stderr(), "Failed to initialize the logging: {err}.");
        return ExitCode::FAILURE;
    }

    if let Err(err) = run(global, parser) {
        let message = err.to_string();

        if message.contains('\n') {
            error!("{err}");
        } else {
            error!("{err}.");
        }

        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(global: GlobalOptions, parser: Parser) -> EmptyResult {
    let config = Config::new(&global.config_dir)?;
    let action = parser.parse()?;

    match action {
        Action::Report {account, date} => reports::report(&config, account.as_deref(), date)?,
        Action::Show {account, date} => reports::show(&config, account.as_deref(), date)?,
        Action::MustHold {account, date} => reports::must_hold(&config, account.as_deref(), date)?,
        Action::Sellable {account, date} => reports::sellable(&config, account.as_deref(), date)?,

        Action::ShellCompletion {path, data} => {
            write_shell_completion(&path, &data).map_err(|e| format!(
                "Failed to write {:?}: {}", path, e))?;
        },
    };

    Ok(())
}

fn write_shell_completion(path: &Path, data: &[u8]) -> EmptyResult {
    Ok(File::create(path)?.write_all(data)?)
}
