//! Parsing command-line arguments.

use clap::{command, error::ErrorKind, value_parser, Arg, ArgAction, ArgMatches, Command, Error};
use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use toruslife_lib::{Config, Rule};

/// A struct to store the parse results.
pub(crate) struct Args {
    pub(crate) config: Config,
    #[cfg_attr(not(feature = "tui"), allow(dead_code))]
    pub(crate) delay: Duration,
    pub(crate) interval: Option<Duration>,
    #[cfg(feature = "tui")]
    pub(crate) no_tui: bool,
}

fn command() -> Command {
    let cmd = command!()
        .long_about(
            "Conway's Game of Life on a toroidal grid\n\
             \n\
             The initial configuration is read from a text file: the number of rows \
             and columns, followed by one integer per cell in row-major order, \
             all separated by whitespace. `1` means alive, anything else means dead.\n\
             \n\
             A snapshot of every generation is saved in the output directory. \
             The run stops when a configuration repeats, or when the maximal \
             number of generations is reached.\n",
        )
        .arg(
            Arg::new("INPUT")
                .help("File holding the initial configuration")
                .index(1)
                .required_unless_present("CONFIG")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("CONFIG")
                .help("Reads settings from a TOML, YAML or JSON file")
                .long_help(
                    "Reads settings from a TOML, YAML or JSON file\n\
                     The format is chosen by the file extension. Command-line \
                     options override the values in the file.\n",
                )
                .short('c')
                .long("config")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("MAX")
                .help("Maximal number of generations [default: 100]")
                .short('m')
                .long("max")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("RULE")
                .help("Rule of the cellular automaton [default: B3/S23]")
                .long_help(
                    "Rule of the cellular automaton\n\
                     Only Conway's Game of Life is supported, in any notation.\n",
                )
                .short('r')
                .long("rule")
                .value_parser(|rule: &str| {
                    rule.parse::<Rule>()
                        .map(|_| rule.to_string())
                        .map_err(|e| e.to_string())
                }),
        )
        .arg(
            Arg::new("OUTPUT")
                .help("Directory to save snapshots in")
                .long_help(
                    "Directory to save snapshots in\n\
                     If omitted, a new directory named `<input>_<n>_out` is created \
                     in the current directory.\n",
                )
                .short('o')
                .long("output")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("NOSAVE")
                .help("Does not save snapshots")
                .long("no-save")
                .action(ArgAction::SetTrue)
                .conflicts_with("OUTPUT"),
        )
        .arg(
            Arg::new("INTERVAL")
                .help("Prints every generation, waiting this many milliseconds between two")
                .short('i')
                .long("interval")
                .value_parser(value_parser!(u64)),
        );

    #[cfg(feature = "tui")]
    let cmd = cmd
        .mut_arg("INTERVAL", |arg| arg.requires("NOTUI"))
        .arg(
            Arg::new("DELAY")
                .help("Interval between two steps in milliseconds, when playing or holding a key")
                .short('d')
                .long("delay")
                .default_value("150")
                .value_parser(value_parser!(u64))
                .conflicts_with("NOTUI"),
        )
        .arg(
            Arg::new("NOTUI")
                .help("Runs immediately until the end, without entering the TUI")
                .short('n')
                .long("no-tui")
                .action(ArgAction::SetTrue),
        );

    cmd
}

/// Reads a configuration file, choosing the format by its extension.
fn read_config(path: &Path) -> Result<Config, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    let mut config: Config = match path.extension().and_then(OsStr::to_str) {
        Some("toml") => toml::from_str(&text).map_err(|e| e.to_string())?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&text).map_err(|e| e.to_string())?,
        Some("json") => serde_json::from_str(&text).map_err(|e| e.to_string())?,
        _ => {
            return Err(format!(
                "{}: unknown configuration format, expected .toml, .yaml or .json",
                path.display()
            ))
        }
    };

    // Relative paths in the file are relative to the file itself.
    if let Some(base) = path.parent() {
        if config.input.is_relative() && !config.input.as_os_str().is_empty() {
            config.input = base.join(&config.input);
        }
        if let Some(output_dir) = config.output_dir.as_mut().filter(|dir| dir.is_relative()) {
            *output_dir = base.join(&*output_dir);
        }
    }
    Ok(config)
}

/// Merges the configuration file and the command-line options.
fn config_from_matches(matches: &ArgMatches) -> Result<Config, String> {
    let mut config = match matches.get_one::<PathBuf>("CONFIG") {
        Some(path) => read_config(path)?,
        None => Config::default(),
    };
    if let Some(input) = matches.get_one::<PathBuf>("INPUT") {
        config.input = input.clone();
    }
    if config.input.as_os_str().is_empty() {
        return Err(String::from("no input file is given"));
    }
    if let Some(&max) = matches.get_one::<u64>("MAX") {
        config = config.set_max_generations(max);
    }
    if let Some(rule) = matches.get_one::<String>("RULE") {
        config = config.set_rule_string(rule);
    }
    if let Some(output) = matches.get_one::<PathBuf>("OUTPUT") {
        config = config.set_output_dir(output.clone());
    }
    if matches.get_flag("NOSAVE") {
        config = config.set_save_snapshots(false);
    }
    config.rule().map_err(|e| e.to_string())?;
    Ok(config)
}

impl Args {
    /// Parses the command-line arguments.
    pub(crate) fn parse() -> Result<Self, Error> {
        Self::parse_from(std::env::args_os())
    }

    pub(crate) fn parse_from<I, T>(args: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut cmd = command();
        let matches = cmd.try_get_matches_from_mut(args)?;

        let config = config_from_matches(&matches)
            .map_err(|message| cmd.error(ErrorKind::InvalidValue, message))?;

        #[cfg(feature = "tui")]
        let delay = Duration::from_millis(*matches.get_one::<u64>("DELAY").unwrap_or(&150));
        #[cfg(not(feature = "tui"))]
        let delay = Duration::ZERO;

        let interval = matches
            .get_one::<u64>("INTERVAL")
            .map(|&ms| Duration::from_millis(ms));

        Ok(Args {
            config,
            delay,
            interval,
            #[cfg(feature = "tui")]
            no_tui: matches.get_flag("NOTUI"),
        })
    }
}
