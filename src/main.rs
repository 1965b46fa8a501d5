use std::env;
use std::fs;
use std::path::Path;
use std::process;
use std::time::Instant;

use scrumsim::color::{self, emoji};
use scrumsim::config::{self, Command, Config};
use scrumsim::conversation::Conversation;
use scrumsim::dispatch::Policy;
use scrumsim::engine;
use scrumsim::executor::{RunOutcome, TurnExecutor};
use scrumsim::flowchart::{workflow_edges, AsciiRenderer, DotRenderer, FlowchartRenderer};
use scrumsim::log::{self, RoleLogger};
use scrumsim::planning;
use scrumsim::report;
use scrumsim::role;
use scrumsim::shutdown;
use scrumsim::transcript;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    let args: Vec<String> = env::args().collect();
    let cli = config::parse_args(args);

    if cli.help {
        print_help();
        return;
    }

    if cli.version {
        println!("scrumsim {}", VERSION);
        return;
    }

    let config = Config::load(&cli);

    // Default command is Run if none specified
    let command = cli.command.clone().unwrap_or(Command::Run);

    // Register Ctrl+C handler for commands that call out to engines
    if matches!(command, Command::Run | Command::Plan) {
        if let Err(e) = shutdown::register_handler() {
            eprintln!("warning: {}", e);
        }
    }

    let result = match command {
        Command::Init => cmd_init(&config),
        Command::Run => cmd_run(&config),
        Command::Plan => cmd_plan(&config),
        Command::Roles => cmd_roles(),
        Command::Flowchart => cmd_flowchart(&config),
    };

    if let Err(e) = result {
        eprintln!("{}", color::error(&format!("error: {}", e)));
        process::exit(1);
    }
}

fn print_help() {
    println!(
        r#"scrumsim - multi-role project-planning conversation simulator

USAGE:
    scrumsim [OPTIONS] [COMMAND] [REQUEST]

COMMANDS:
    init              Initialize .scrumsim/ and a default scrumsim.toml
    run [REQUEST]     Run the conversation simulation (default)
    plan [REQUEST]    Run the sequential planning pipeline
    roles             List roles and the expert roster
    flowchart         Write the workflow DOT file and print the diagram

OPTIONS:
    -h, --help                 Show this help message
    -V, --version              Show version
    -c, --config <PATH>        Path to config file (default: scrumsim.toml)
    --engine <TYPE>            Engine type: claude, codex, mock
    --mock                     Force the mock engine (no network)
    --turn-timeout <SECS>      Per-turn generation timeout [default: {timeout}]
    --max-turns <N>            Maximum turns to run (0 = unbounded)
    --transcript-file <PATH>   Path to transcript file
    --log-dir <PATH>           Path to per-role log directory
    --flowchart-file <PATH>    Path for the workflow DOT file
    --no-flowchart             Skip flowchart output after a run

EXAMPLES:
    scrumsim init                          Initialize .scrumsim/
    scrumsim run "Build a bookstore app"   Simulate the planning conversation
    scrumsim --mock run                    Simulate offline with the mock engine
    scrumsim plan "Build a bookstore app"  Generate stories, criteria, tasks
    scrumsim flowchart                     Render the workflow diagram"#,
        timeout = config::DEFAULT_TURN_TIMEOUT_SECS,
    );
}

/// Initialize the .scrumsim/ directory and default config.
fn cmd_init(config: &Config) -> Result<(), String> {
    println!("Initializing scrumsim...");

    let transcript_path = Path::new(&config.files_transcript);
    ensure_parent_dir(transcript_path)?;
    if !transcript_path.exists() {
        fs::write(transcript_path, "")
            .map_err(|e| format!("failed to create {}: {}", config.files_transcript, e))?;
        println!("  Created {}", config.files_transcript);
    } else {
        println!("  Transcript already exists: {}", config.files_transcript);
    }

    if config.files_log_dir.is_empty() {
        return Err("log dir path is empty".to_string());
    }
    fs::create_dir_all(&config.files_log_dir)
        .map_err(|e| format!("failed to create log dir {}: {}", config.files_log_dir, e))?;
    println!("  Created log directory: {}", config.files_log_dir);

    if !Path::new("scrumsim.toml").exists() {
        fs::write("scrumsim.toml", Config::default_toml())
            .map_err(|e| format!("failed to create scrumsim.toml: {}", e))?;
        println!("  Created scrumsim.toml");
    } else {
        println!("  Config already exists: scrumsim.toml");
    }

    println!("\nScrumsim initialized.");
    println!("  Use 'scrumsim run \"<request>\"' to start a simulation.");
    println!("  Use 'scrumsim --mock run' to try it without network access.");
    Ok(())
}

/// Run the conversation simulation.
fn cmd_run(config: &Config) -> Result<(), String> {
    println!(
        "{}",
        color::announce(&format!(
            "{} Running Scrum simulation (engine={})",
            emoji::ROCKET,
            config.effective_engine().as_str()
        ))
    );
    println!("Customer request: {}", color::info(&config.customer_request));

    let engine = engine::create_engine(config.effective_engine(), config.turn_timeout_secs);
    let policy = Policy::standard();
    let mut conversation = Conversation::new(config.customer_request.clone());

    let transcript_path = Path::new(&config.files_transcript);
    ensure_parent_dir(transcript_path)?;
    transcript::write_boot_banner(transcript_path, &config.customer_request)
        .map_err(|e| format!("failed to write {}: {}", config.files_transcript, e))?;

    let log_dir = Path::new(&config.files_log_dir);
    if let Err(e) = log::rotate_logs_in_dir(log_dir, log::DEFAULT_MAX_LINES) {
        eprintln!("warning: failed to rotate logs: {}", e);
    }

    let mut executor =
        TurnExecutor::new(engine.as_ref(), &policy).with_max_turns(config.max_turns);
    let start = Instant::now();

    let outcome = loop {
        if conversation.done() {
            break RunOutcome::Completed;
        }
        if shutdown::requested() {
            println!(
                "{}",
                color::warning(&format!("{} Shutdown requested, ending run.", emoji::STOP))
            );
            break RunOutcome::Interrupted;
        }
        if config.max_turns > 0 && executor.turns_taken() >= config.max_turns {
            println!(
                "{}",
                color::warning(&format!("Reached max turns ({}), stopping.", config.max_turns))
            );
            break RunOutcome::TurnLimit;
        }

        println!();
        println!(
            "{}",
            color::announce(&format!(
                "{} is responding...",
                conversation.receiver().display_name()
            ))
        );

        match executor.step(&mut conversation) {
            Ok(record) => {
                println!("{}: {}", color::speaker(record.role), record.body);

                if let Err(e) =
                    transcript::write_entry(transcript_path, record.role.display_name(), &record.body)
                {
                    eprintln!("warning: failed to write transcript: {}", e);
                }

                let logger = RoleLogger::new(log_dir, record.role);
                let preview = if record.body.chars().count() > 500 {
                    let head: String = record.body.chars().take(500).collect();
                    format!("{}... [truncated, {} bytes total]", head, record.body.len())
                } else {
                    record.body.clone()
                };
                if let Err(e) = logger.log(&format!("Turn {}: {}", record.turn, preview)) {
                    eprintln!("warning: failed to write log: {}", e);
                }
            }
            Err(e) => {
                // Surface what accumulated before the failure.
                eprintln!();
                eprintln!("{}", color::error(&format!("{} {}", emoji::CROSS, e)));
                eprint!("{}", report::format_estimates(&conversation));
                return Err(e.to_string());
            }
        }
    };

    let elapsed = start.elapsed();

    println!();
    println!("=== {} {} ===", emoji::SPARKLES, color::label("RUN SUMMARY"));
    println!();
    print!("{}", report::format_run_summary(&conversation, outcome, executor.turns_taken()));
    println!();
    println!(
        "  {} Elapsed: {}",
        emoji::CLOCK,
        color::info(&report::format_duration(elapsed))
    );

    if let Some(summary) = conversation.summary() {
        if let Err(e) = transcript::write_entry(transcript_path, "Final Summary", summary) {
            eprintln!("warning: failed to write transcript: {}", e);
        }
    }
    println!("  {} Transcript: {}", emoji::TASK, config.files_transcript);

    if !config.no_flowchart {
        write_flowchart(config, &policy)?;
    }

    println!();
    println!(
        "{}",
        color::announce(&format!("{} Scrum simulation complete!", emoji::CHECK))
    );
    Ok(())
}

/// Run the sequential planning pipeline.
fn cmd_plan(config: &Config) -> Result<(), String> {
    println!(
        "{}",
        color::announce(&format!(
            "{} Generating Scrum plan (engine={})",
            emoji::TASK,
            config.effective_engine().as_str()
        ))
    );
    println!("Customer request: {}", color::info(&config.customer_request));
    println!();

    let engine = engine::create_engine(config.effective_engine(), config.turn_timeout_secs);
    let plan = planning::run_plan(engine.as_ref(), &config.customer_request)?;

    print!("{}", report::format_plan(&plan));
    Ok(())
}

/// List roles and the expert roster.
fn cmd_roles() -> Result<(), String> {
    let policy = Policy::standard();

    println!("Roles:");
    for r in role::ALL {
        let note = if Some(r) == policy.coordinator() {
            " (coordinator)"
        } else if r.is_expert() {
            " (expert)"
        } else {
            ""
        };
        println!("  {:<26} {}{}", r.as_str(), r.display_name(), note);
    }

    println!("\nExpert roster (round-robin order):");
    for (i, expert) in policy.experts().iter().enumerate() {
        println!("  {}. {}", i + 1, expert.display_name());
    }

    if let Some(coordinator) = policy.coordinator() {
        println!("\nCoordinator: {}", coordinator.display_name());
    }
    Ok(())
}

/// Write the workflow DOT file and print the ASCII diagram.
fn cmd_flowchart(config: &Config) -> Result<(), String> {
    let policy = Policy::standard();
    write_flowchart(config, &policy)?;

    let edges = workflow_edges(&policy);
    println!();
    print!("{}", AsciiRenderer.render(&edges));
    Ok(())
}

fn write_flowchart(config: &Config, policy: &Policy) -> Result<(), String> {
    let edges = workflow_edges(policy);
    let dot = DotRenderer.render(&edges);
    let path = Path::new(&config.files_flowchart);
    ensure_parent_dir(path)?;
    fs::write(path, dot)
        .map_err(|e| format!("failed to write {}: {}", config.files_flowchart, e))?;
    println!(
        "  {} Workflow diagram: {} (render with: dot -Tpng {} -o workflow.png)",
        emoji::CHART,
        config.files_flowchart,
        config.files_flowchart
    );
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("failed to create directory {}: {}", parent.display(), e))?;
        }
    }
    Ok(())
}
