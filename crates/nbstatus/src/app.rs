use clap::{Arg, ArgAction, ArgMatches, Command};

pub fn build_cli() -> Command {
    Command::new("nbstatus")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Show notebook save and checkpoint status in the terminal")
        .long_about("Hosts the notebook status widget. Reads one JSON object per line on stdin, either a document event ({\"event\": \"checkpoint_created\", \"data\": {...}}) or a dialog action ({\"action\": \"rename\"}), and prints each display slot as it changes.")
        .arg(
            Arg::new("name")
                .long("name")
                .help("Initial notebook name")
                .default_value("Untitled"),
        )
        .arg(
            Arg::new("path")
                .long("path")
                .help("Notebook path relative to the server root")
                .default_value("Untitled.ipynb"),
        )
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .help("Base URL the notebook server is mounted at")
                .default_value("/"),
        )
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .help("Emit logs as JSON lines on stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only log warnings and errors")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .help("Disable colored output")
                .action(ArgAction::SetTrue),
        )
}

/// Document identity taken from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostArgs {
    pub name: String,
    pub path: String,
    pub base_url: String,
}

impl HostArgs {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let get = |id: &str| {
            matches
                .get_one::<String>(id)
                .cloned()
                .unwrap_or_default()
        };
        Self {
            name: get("name"),
            path: get("path"),
            base_url: get("base-url"),
        }
    }
}
