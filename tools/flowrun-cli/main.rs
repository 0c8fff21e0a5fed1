use clap::Parser;
use flowrun::engine::{DEFAULT_MAX_STEPS, SessionSnapshot};
use flowrun::language;
use flowrun::prelude::*;
use flowrun::program::samples;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Mirrors every console line of the running program to stdout.
struct StdoutEcho;

impl IoBridge for StdoutEcho {
    fn emit(&mut self, line: &str) {
        println!("  | {}", line);
    }
}

/// Runs a bundled flowchart program one step at a time
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Name of the bundled program to run
    #[arg(short, long, default_value = "sum")]
    program: String,

    /// Steps allowed before the run is aborted as an infinite loop
    #[arg(long, env = "FLOWRUN_MAX_STEPS", default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: usize,

    /// Keep stepping without waiting for Enter between steps
    #[arg(short, long)]
    auto: bool,

    /// Pause between steps in auto mode, in milliseconds
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,

    /// Answers for input requests, used in order before falling back to stdin
    #[arg(long = "input", value_name = "VALUE")]
    inputs: Vec<String>,

    /// Print the final state as JSON instead of a summary
    #[arg(long)]
    json: bool,

    /// List the bundled programs and exit
    #[arg(short, long)]
    list: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("flowrun=warn")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.list {
        for name in samples::NAMES {
            println!("{}", name);
        }
        return;
    }

    let definition = samples::by_name(&cli.program).unwrap_or_else(|| {
        exit_with_error(&format!(
            "Unknown program '{}'. Available: {}",
            cli.program,
            samples::NAMES.join(", ")
        ))
    });

    let graph = ProgramBuilder::new(definition)
        .build()
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid program: {}", e)));
    preflight(&graph);

    let mut session = Session::builder(graph)
        .max_steps(cli.max_steps)
        .with_console(Box::new(StdoutEcho))
        .build();

    println!("Running '{}' (max {} steps)", cli.program, cli.max_steps);
    run(&mut session, &cli);

    let snapshot = session.snapshot();
    if cli.json {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{}", json),
            Err(e) => exit_with_error(&format!("Failed to serialize session: {}", e)),
        }
    } else {
        print_summary(&snapshot);
    }

    if session.status() == Status::Failed {
        std::process::exit(1);
    }
}

/// Parses every body up front so syntax errors are reported before the run reaches them,
/// and flags variables that are read somewhere but never assigned anywhere.
fn preflight(graph: &FlowGraph) {
    let mut assigned: Vec<String> = Vec::new();
    let mut reads: Vec<(NodeId, Expression)> = Vec::new();

    for node in graph.nodes() {
        if node.body.trim().is_empty() {
            continue;
        }
        let parsed = match node.kind {
            NodeKind::Decision => language::parse_expression(&node.body).map(|expr| vec![expr]),
            NodeKind::InputOutput => match language::InputDirective::parse(&node.body) {
                Some(directive) => {
                    assigned.push(directive.variable);
                    Ok(Vec::new())
                }
                None => statement_reads(&node.body, &mut assigned),
            },
            NodeKind::Process => statement_reads(&node.body, &mut assigned),
            _ => Ok(Vec::new()),
        };
        match parsed {
            Ok(exprs) => reads.extend(exprs.into_iter().map(|expr| (node.id, expr))),
            Err(e) => warn!(node = node.id, label = %node.label, error = %e, "body does not parse"),
        }
    }

    for (node, expr) in &reads {
        let mut names = Vec::new();
        expr.referenced_variables(&mut names);
        for name in names.into_iter().filter(|n| !assigned.iter().any(|a| a == n)) {
            warn!(node, variable = name, "variable is read but never assigned");
        }
    }
}

/// Collects the expressions a statement body reads and the names it assigns.
fn statement_reads(
    body: &str,
    assigned: &mut Vec<String>,
) -> std::result::Result<Vec<Expression>, ParseError> {
    let statements = language::parse_statements(body)?;
    Ok(statements
        .into_iter()
        .map(|statement| match statement {
            Statement::Assign { name, value } => {
                assigned.push(name);
                value
            }
            Statement::Expression(expr) => expr,
        })
        .collect())
}

fn run(session: &mut Session, cli: &Cli) {
    let mut scripted: VecDeque<String> = cli.inputs.iter().cloned().collect();
    let stdin = io::stdin();

    while !session.is_finished() {
        if session.status() == Status::WaitingForInput {
            let answer = match scripted.pop_front() {
                Some(value) => value,
                None => read_line(&stdin, "input"),
            };
            session.resume(&answer);
            continue;
        }

        if cli.auto {
            if cli.delay_ms > 0 {
                thread::sleep(Duration::from_millis(cli.delay_ms));
            }
        } else {
            read_line(&stdin, "Enter to step");
        }

        match session.step() {
            StepOutcome::Branched {
                from,
                outcome,
                fallback,
                reason,
                ..
            } => {
                let note = if fallback { " (no matching edge, took first)" } else { "" };
                println!("  node {} -> {}: {}{}", from, outcome, reason, note);
            }
            StepOutcome::Failed(e) => eprintln!("\nError: {}", e),
            _ => {}
        }
    }
}

fn read_line(stdin: &io::Stdin, prompt: &str) -> String {
    print!("> {}: ", prompt);
    if let Err(e) = io::stdout().flush() {
        exit_with_error(&format!("Failed to write to stdout: {}", e));
    }

    let mut line = String::new();
    match stdin.lock().read_line(&mut line) {
        Ok(0) => exit_with_error("stdin closed while the program was running"),
        Ok(_) => line.trim_end_matches(['\r', '\n']).to_string(),
        Err(e) => exit_with_error(&format!("Failed to read stdin: {}", e)),
    }
}

fn print_summary(snapshot: &SessionSnapshot) {
    println!("\n--- Session Summary ---");
    println!("Status:     {:?}", snapshot.status);
    println!("Steps:      {}", snapshot.steps);
    if let Some(error) = &snapshot.error {
        println!("Error:      {:?}: {}", error.kind, error.message);
    }
    println!("Variables:");
    for (name, value) in &snapshot.variables {
        println!("  {} = {}", name, value);
    }
    println!();
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
