use clap::{value_parser, Arg, ArgAction, ArgMatches};
use clap_complete::{self, Shell};

use holdings::cli;
use holdings::core::GenericResult;
use holdings::time;
use holdings::types::Date;

use super::action::Action;

pub struct Parser {
    matches: Option<ArgMatches>,
    completion: Option<Vec<u8>>,
}

pub struct GlobalOptions {
    pub log_level: log::Level,
    pub config_dir: String,
}

impl Parser {
    pub fn new() -> Parser {
        Parser {
            matches: None,
            completion: None,
        }
    }

    pub fn parse_global(&mut self) -> GenericResult<GlobalOptions> {
        let binary_name = "holdings";
        const DEFAULT_CONFIG_DIR_PATH: &str = "~/.holdings";

        let mut app = cli::new_app(binary_name, "Helps you with tracking sale eligibility of your brokerage holdings")
            .version(env!("CARGO_PKG_VERSION"))
            .subcommand_required(true)
            .arg_required_else_help(true)
            .args([
                cli::new_arg("config", "Configuration directory path [default: ~/.holdings]")
                    .short('c').long("config")
                    .value_name("PATH"),

                cli::new_arg("verbose", "Set verbosity level")
                    .short('v').long("verbose")
                    .action(ArgAction::Count),
            ])

            .subcommand(cli::new_subcommand(
                "report", "Show the full holdings digest")
                .long_about("\
                    Shows the account summary along with per-account listings of the holdings \
                    which are still locked by the holding period and of the fully sellable ones \
                    partitioned into winners and losers.")
                .args([account::arg(), date::arg()]))

            .subcommand(cli::new_subcommand(
                "show", "Show current holdings with their sale eligibility")
                .args([account::arg(), date::arg()]))

            .subcommand(cli::new_subcommand(
                "must-hold", "Show holdings locked by the holding period")
                .long_about("\
                    Shows the holdings which have lots that can't be sold yet and the per-lot \
                    maturity schedule for each of them.")
                .args([account::arg(), date::arg()]))

            .subcommand(cli::new_subcommand(
                "sellable", "Show fully sellable holdings")
                .args([account::arg(), date::arg()]))

            .subcommand(cli::new_subcommand(
                "completion", "Generate shell completion rules")
                .args([
                    cli::new_arg("shell", "Shell to generate completion rules for")
                        .short('s').long("shell").value_name("SHELL")
                        .value_parser(value_parser!(Shell))
                        .default_value("bash"),

                    cli::new_arg("PATH", "Path to save the rules to").required(true),
                ]));

        let matches = app.get_matches_mut();

        let log_level = match matches.get_count("verbose") {
            0 => log::Level::Info,
            1 => log::Level::Debug,
            2 => log::Level::Trace,
            _ => return Err!("Invalid verbosity level"),
        };

        let config_dir = matches.get_one::<String>("config").cloned().unwrap_or_else(||
            shellexpand::tilde(DEFAULT_CONFIG_DIR_PATH).to_string());

        {
            let mut app = app;
            let (command, matches) = matches.subcommand().unwrap();

            if command == "completion" {
                let mut completion = Vec::new();
                let shell = *matches.get_one::<Shell>("shell").unwrap();
                clap_complete::generate(shell, &mut app, binary_name, &mut completion);
                self.completion = Some(completion);
            }
        }

        self.matches = Some(matches);

        Ok(GlobalOptions {log_level, config_dir})
    }

    pub fn parse(mut self) -> GenericResult<Action> {
        let matches = self.matches.take().unwrap();
        let (command, matches) = matches.subcommand().unwrap();
        self.parse_command(command, matches)
    }

    fn parse_command(&self, command: &str, matches: &ArgMatches) -> GenericResult<Action> {
        Ok(match command {
            "report" => Action::Report {
                account: account::get(matches),
                date: date::get(matches)?,
            },

            "show" => Action::Show {
                account: account::get(matches),
                date: date::get(matches)?,
            },

            "must-hold" => Action::MustHold {
                account: account::get(matches),
                date: date::get(matches)?,
            },

            "sellable" => Action::Sellable {
                account: account::get(matches),
                date: date::get(matches)?,
            },

            "completion" => Action::ShellCompletion {
                path: matches.get_one::<String>("PATH").unwrap().into(),
                data: self.completion.as_ref().unwrap().clone(),
            },

            _ => unreachable!(),
        })
    }
}

mod account {
    use super::*;

    pub fn arg() -> Arg {
        cli::new_arg("ACCOUNT", "Account name (omit to process all configured accounts)")
    }

    pub fn get(matches: &ArgMatches) -> Option<String> {
        matches.get_one::<String>("ACCOUNT").cloned()
    }
}

mod date {
    use super::*;

    pub fn arg() -> Arg {
        cli::new_arg("date", "Date to evaluate sale eligibility at (in YYYY.MM.DD format)")
            .short('d').long("date")
            .value_name("DATE")
    }

    pub fn get(matches: &ArgMatches) -> GenericResult<Date> {
        Ok(match matches.get_one::<String>("date") {
            Some(date) => time::parse_user_date(date)?,
            None => time::today(),
        })
    }
}
