use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use taskrank::scoring::{AnalyzeOptions, DueFacts, Strategy};

const EXIT_SUCCESS: i32 = 0;
const EXIT_OUTPUT: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank all tasks by priority (default if no subcommand)
    Analyze {
        /// Tab-separated output for scripting
        #[arg(long)]
        tsv: bool,
    },
    /// Show the top tasks due today
    Suggest {
        /// Number of suggestions (defaults to suggest_limit from config, or 3)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Print the dependency graph (Graphviz DOT, or JSON with --json)
    Graph,
}

#[derive(Parser, Debug)]
#[command(name = "taskrank")]
#[command(about = "Rank tasks by deadline, importance, effort and what they block", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging and per-task score breakdowns
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/taskrank/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Scoring strategy: smart_balance, deadline_driven, fastest_wins, high_impact
    #[arg(short, long, global = true)]
    strategy: Option<String>,

    /// Reference date (YYYY-MM-DD), defaults to the local date
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    /// Task file (JSON); reads stdin when absent or "-"
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// Skip batch validation and let missing fields take defaults
    #[arg(long, global = true)]
    lenient: bool,

    /// Print the report as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Write output to this file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Analyze { tsv: false });
    let start_time = Instant::now();

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match taskrank::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = taskrank::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    // Load tasks
    let batch = match taskrank::task::load_tasks(cli.input.as_deref()) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Input error: {:#}", e);
            std::process::exit(EXIT_INPUT);
        }
    };

    if !cli.lenient {
        if let Err(errors) = taskrank::task::validate_batch(&batch.tasks) {
            eprintln!("Invalid tasks:");
            for error in errors {
                eprintln!("  - {}", error);
            }
            eprintln!("Use --lenient to score anyway with defaults.");
            std::process::exit(EXIT_INPUT);
        }
    }

    // Command line beats the task file, which beats the config
    let strategy = match cli.strategy.as_deref() {
        Some(name) => match Strategy::parse(name) {
            Some(s) => s,
            None => {
                eprintln!("Unknown strategy '{}'", name);
                std::process::exit(EXIT_CONFIG);
            }
        },
        None => match batch.strategy.as_deref() {
            Some(name) => Strategy::from_name(name),
            None => config.strategy(),
        },
    };

    let today = cli.today.unwrap_or_else(taskrank::calendar::today);
    let options = AnalyzeOptions::on(today).with_parallel(config.parallel());
    debug!(
        tasks = batch.tasks.len(),
        strategy = strategy.key(),
        %today,
        "analyzing batch"
    );

    let use_colors = cli.output.is_none() && taskrank::output::should_use_colors();

    let rendered = match command {
        Commands::Analyze { tsv } => {
            let report = match taskrank::report::build_analysis_report(batch.tasks, strategy, &options)
            {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Input error: {:#}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };

            if !report.circular_dependencies.is_empty() {
                eprintln!(
                    "Warning: circular dependencies between: {}",
                    report.circular_dependencies.join(", ")
                );
            }

            if cli.json {
                taskrank::output::to_json(&report)
            } else if tsv {
                Ok(taskrank::output::format_tsv(&report.tasks))
            } else if cli.verbose {
                // Verbose mode: per-task breakdown
                let details: Vec<String> = report
                    .tasks
                    .iter()
                    .map(|scored| {
                        let facts = DueFacts::for_task(&scored.task, today);
                        let result =
                            taskrank::scoring::calculate_score(&scored.task, strategy, &facts);
                        taskrank::output::format_task_detail(scored, &result.breakdown, use_colors)
                    })
                    .collect();
                Ok(details.join("\n\n"))
            } else {
                Ok(taskrank::output::format_ranked_table(&report.tasks, use_colors))
            }
        }
        Commands::Suggest { limit } => {
            let limit = limit.unwrap_or_else(|| config.suggest_limit());
            let report =
                match taskrank::report::build_suggestions(batch.tasks, strategy, limit, &options) {
                    Ok(r) => r,
                    Err(e) => {
                        eprintln!("Input error: {:#}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                };

            if cli.json {
                taskrank::output::to_json(&report)
            } else {
                eprintln!("{}", report.message);
                if report.suggestions.is_empty() {
                    Ok("No tasks due today.".to_string())
                } else {
                    Ok(taskrank::output::format_ranked_table(
                        &report.suggestions,
                        use_colors,
                    ))
                }
            }
        }
        Commands::Graph => {
            let report = match taskrank::report::build_analysis_report(batch.tasks, strategy, &options)
            {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Input error: {:#}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };

            if cli.json {
                taskrank::output::to_json(&report.dependency_graph)
            } else {
                Ok(taskrank::output::format_graph_dot(&report.dependency_graph))
            }
        }
    };

    let rendered = match rendered {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Output error: {:#}", e);
            std::process::exit(EXIT_OUTPUT);
        }
    };

    match cli.output {
        Some(path) => {
            if let Err(e) = taskrank::output::write_output(&path, &rendered) {
                eprintln!("Output error: {:#}", e);
                std::process::exit(EXIT_OUTPUT);
            }
            if cli.verbose {
                eprintln!("Wrote {}", path.display());
            }
        }
        None => println!("{}", rendered.trim_end_matches('\n')),
    }

    if cli.verbose {
        eprintln!("Done in {:?}", start_time.elapsed());
    }

    std::process::exit(EXIT_SUCCESS);
}
