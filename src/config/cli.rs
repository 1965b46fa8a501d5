/// CLI arguments parsed from command line.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Subcommand to execute.
    pub command: Option<Command>,
    /// Path to config file.
    pub config: Option<String>,
    /// Customer request (positional arg after the command).
    pub request_arg: Option<String>,
    /// Engine type.
    pub engine: Option<String>,
    /// Enable mock mode.
    pub mock: bool,
    /// Per-turn generation timeout in seconds.
    pub turn_timeout: Option<u64>,
    /// Maximum turns to run.
    pub max_turns: Option<usize>,
    /// Path to transcript file.
    pub transcript_file: Option<String>,
    /// Path to log directory.
    pub log_dir: Option<String>,
    /// Path for the workflow DOT file.
    pub flowchart_file: Option<String>,
    /// Skip flowchart output after a run.
    pub no_flowchart: bool,
    /// Show help.
    pub help: bool,
    /// Show version.
    pub version: bool,
}

/// Scrumsim subcommands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Initialize the .scrumsim/ directory and default config.
    Init,
    /// Run the conversation simulation.
    Run,
    /// Run the sequential planning pipeline.
    Plan,
    /// List roles and the expert roster.
    Roles,
    /// Render the workflow diagram.
    Flowchart,
}

impl Command {
    /// Parse command from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "init" => Some(Self::Init),
            "run" => Some(Self::Run),
            "plan" => Some(Self::Plan),
            "roles" => Some(Self::Roles),
            "flowchart" => Some(Self::Flowchart),
            _ => None,
        }
    }
}

/// Parse CLI arguments from an iterator.
pub fn parse_args<I>(args: I) -> CliArgs
where
    I: IntoIterator<Item = String>,
{
    let mut cli = CliArgs::default();
    let mut args = args.into_iter().peekable();

    // Skip program name
    args.next();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => cli.help = true,
            "-V" | "--version" => cli.version = true,
            "-c" | "--config" => cli.config = args.next(),
            "--engine" => cli.engine = args.next(),
            "--mock" => cli.mock = true,
            "--turn-timeout" => cli.turn_timeout = args.next().and_then(|s| s.parse().ok()),
            "--max-turns" => cli.max_turns = args.next().and_then(|s| s.parse().ok()),
            "--transcript-file" => cli.transcript_file = args.next(),
            "--log-dir" => cli.log_dir = args.next(),
            "--flowchart-file" => cli.flowchart_file = args.next(),
            "--no-flowchart" => cli.no_flowchart = true,
            _ if !arg.starts_with('-') && cli.command.is_none() && cli.request_arg.is_none() => {
                match Command::from_str(&arg) {
                    Some(command) => {
                        cli.command = Some(command);
                        // For "run <request>" and "plan <request>", the next
                        // non-flag arg is the customer request.
                        if matches!(cli.command, Some(Command::Run) | Some(Command::Plan)) {
                            if let Some(next) = args.peek() {
                                if !next.starts_with('-') {
                                    cli.request_arg = args.next();
                                }
                            }
                        }
                    }
                    // A bare request with the default command.
                    None => cli.request_arg = Some(arg),
                }
            }
            _ if !arg.starts_with('-') && cli.request_arg.is_none() => {
                // Bare request with the default command.
                cli.request_arg = Some(arg);
            }
            _ => {} // Ignore unknown flags
        }
    }

    cli
}
