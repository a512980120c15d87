use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::graph::GraphView;
use crate::scoring::{ScoreBreakdown, CYCLE_SCORE};
use crate::task::{DueDateInput, ScoredTask};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with at most one decimal (85, 102.5)
pub fn format_score(score: f64) -> String {
    let formatted = format!("{:.1}", score);
    match formatted.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => formatted,
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
pub fn truncate_title(title: &str, max_width: usize) -> String {
    let chars: Vec<char> = title.chars().collect();
    if chars.len() <= max_width {
        title.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format tasks as a ranked table with columns: Index, Score, Title, Explanation
///
/// Index column: 3 chars (fits "99."), right-aligned.
/// Score column: 6 chars (fits "999.99"), right-aligned.
/// When stdout is a terminal the title and explanation share what is left of
/// its width; piped output is never truncated.
pub fn format_ranked_table(tasks: &[ScoredTask], use_colors: bool) -> String {
    if tasks.is_empty() {
        return "No tasks found.".to_string();
    }

    let term_width = get_terminal_width();

    let index_width = 3;
    let score_width = 6;
    let separator = "  ";
    let fixed_width = index_width + 1 + score_width + separator.len() * 2;

    tasks
        .iter()
        .enumerate()
        .map(|(idx, scored)| {
            let index_str = format!("{:>2}.", idx + 1);
            let score_padded = format!(
                "{:>width$}",
                format_score(scored.priority_score),
                width = score_width
            );

            let (title, explanation) = match term_width {
                Some(width) if width > fixed_width + 20 => {
                    let available = width - fixed_width;
                    let title = truncate_title(&scored.task.title, available * 2 / 5);
                    let rest = available.saturating_sub(title.chars().count());
                    (title, truncate_title(&scored.explanation, rest))
                }
                // Very narrow terminal
                Some(_) => (
                    truncate_title(&scored.task.title, 20),
                    truncate_title(&scored.explanation, 20),
                ),
                None => (scored.task.title.clone(), scored.explanation.clone()),
            };

            if use_colors {
                let score_colored = if scored.priority_score >= CYCLE_SCORE {
                    score_padded.red().bold().to_string()
                } else {
                    score_padded.bold().to_string()
                };
                format!(
                    "{} {}{}{}{}{}",
                    index_str.dimmed(),
                    score_colored,
                    separator,
                    title,
                    separator,
                    explanation.dimmed()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}",
                    index_str, score_padded, separator, title, separator, explanation
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format tasks as tab-separated values for scripting
/// Columns: id, priority_score, raw_score, title, explanation (no headers, no colors)
pub fn format_tsv(tasks: &[ScoredTask]) -> String {
    tasks
        .iter()
        .map(|scored| {
            format!(
                "{}\t{}\t{}\t{}\t{}",
                scored.task.id,
                scored.priority_score,
                scored.raw_score,
                scored.task.title,
                scored.explanation
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a single task with its score breakdown (for verbose mode)
pub fn format_task_detail(
    scored: &ScoredTask,
    breakdown: &ScoreBreakdown,
    use_colors: bool,
) -> String {
    let task = &scored.task;
    let due = match &task.due_date {
        Some(DueDateInput::Date(d)) => d.format("%Y-%m-%d").to_string(),
        Some(DueDateInput::Text(s)) => format!("{} (unparsable)", s),
        None => "none".to_string(),
    };
    let deps = if task.dependencies.is_empty() {
        "none".to_string()
    } else {
        task.dependencies
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut lines = Vec::new();
    if use_colors {
        lines.push(format!("{} {}", task.title.bold(), format!("#{}", task.id).dimmed()));
    } else {
        lines.push(format!("{} #{}", task.title, task.id));
    }
    lines.push(format!("  Due: {}", due));
    lines.push(format!(
        "  Importance: {}  Hours: {}",
        task.importance, task.estimated_hours
    ));
    lines.push(format!("  Depends on: {}", deps));

    for factor in &breakdown.factors {
        lines.push(format!(
            "  {:<12} {:<28} {:>7} -> {}",
            factor.label,
            factor.description,
            format_score(factor.before),
            format_score(factor.after)
        ));
    }

    let totals = format!(
        "  Raw: {}  Priority: {}",
        format_score(scored.raw_score),
        format_score(scored.priority_score)
    );
    if use_colors {
        lines.push(totals.bold().to_string());
    } else {
        lines.push(totals);
    }
    lines.push(format!("  {}", scored.explanation));

    lines.join("\n")
}

fn escape_dot(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Render the dependency view as Graphviz DOT. Edges run blocker -> blocked.
pub fn format_graph_dot(view: &GraphView) -> String {
    let mut out = String::new();
    out.push_str("digraph tasks {\n");
    out.push_str("  rankdir=LR;\n");
    out.push_str("  node [shape=box];\n\n");

    for node in &view.nodes {
        let style = if node.is_circular {
            "style=filled, fillcolor=lightcoral"
        } else {
            "style=filled, fillcolor=white"
        };
        out.push_str(&format!(
            "  \"{}\" [label=\"{}\\n{}\", {}];\n",
            node.id,
            escape_dot(&node.title),
            format_score(node.score),
            style
        ));
    }

    if !view.edges.is_empty() {
        out.push('\n');
    }
    for edge in &view.edges {
        if edge.is_circular {
            out.push_str(&format!(
                "  \"{}\" -> \"{}\" [label=\"blocks\", color=red];\n",
                edge.from, edge.to
            ));
        } else {
            out.push_str(&format!(
                "  \"{}\" -> \"{}\" [label=\"blocks\"];\n",
                edge.from, edge.to
            ));
        }
    }

    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphEdge, GraphNode};
    use crate::scoring::engine::FactorContribution;
    use crate::task::{Task, TaskInput};

    fn scored(title: &str, priority: f64, explanation: &str) -> ScoredTask {
        ScoredTask {
            task: Task::from_input(
                TaskInput::new(title)
                    .with_id(7)
                    .with_due("2024-01-10")
                    .with_importance(8)
                    .with_hours(2.0)
                    .with_dependencies(vec![3, 4]),
                0,
            ),
            raw_score: 85.0,
            priority_score: priority,
            explanation: explanation.to_string(),
        }
    }

    // format_score tests
    #[test]
    fn test_format_score_whole() {
        assert_eq!(format_score(85.0), "85");
    }

    #[test]
    fn test_format_score_zero() {
        assert_eq!(format_score(0.0), "0");
    }

    #[test]
    fn test_format_score_decimal() {
        assert_eq!(format_score(102.5), "102.5");
    }

    #[test]
    fn test_format_score_rounds_to_one_decimal() {
        assert_eq!(format_score(42.67), "42.7");
    }

    // truncate_title tests
    #[test]
    fn test_truncate_title_short() {
        assert_eq!(truncate_title("Short title", 20), "Short title");
    }

    #[test]
    fn test_truncate_title_long() {
        assert_eq!(truncate_title("This is a very long title", 15), "This is a ve...");
    }

    #[test]
    fn test_truncate_title_unicode() {
        assert_eq!(truncate_title("Réunion équipe", 14), "Réunion équipe");
        assert_eq!(truncate_title("Réunion équipe lundi", 10), "Réunion...");
    }

    #[test]
    fn test_truncate_title_very_narrow() {
        assert_eq!(truncate_title("Hello world", 3), "Hel");
    }

    // format_ranked_table tests
    #[test]
    fn test_format_ranked_table_empty() {
        assert_eq!(format_ranked_table(&[], false), "No tasks found.");
    }

    #[test]
    fn test_format_ranked_table_rows() {
        let tasks = vec![
            scored("Fix login bug", 144.0, "Due today (Imp: 8, Smart Balance)"),
            scored("Write docs", 40.5, "Due 2024-02-01 (18 working days) (Imp: 2, Smart Balance)"),
        ];
        let result = format_ranked_table(&tasks, false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(" 1."));
        assert!(lines[0].contains("144"));
        assert!(lines[1].starts_with(" 2."));
        assert!(lines[1].contains("40.5"));
    }

    // format_tsv tests
    #[test]
    fn test_format_tsv_empty() {
        assert_eq!(format_tsv(&[]), "");
    }

    #[test]
    fn test_format_tsv_single() {
        let tasks = vec![scored("Fix login bug", 120.5, "Due today")];
        assert_eq!(format_tsv(&tasks), "7\t120.5\t85\tFix login bug\tDue today");
    }

    #[test]
    fn test_format_task_detail() {
        let task = scored("Fix login bug", 120.5, "Due today");
        let breakdown = ScoreBreakdown {
            factors: vec![FactorContribution {
                label: "Urgency".to_string(),
                description: "due today".to_string(),
                before: 0.0,
                after: 90.0,
            }],
        };
        let result = format_task_detail(&task, &breakdown, false);
        assert!(result.starts_with("Fix login bug #7"));
        assert!(result.contains("Due: 2024-01-10"));
        assert!(result.contains("Depends on: 3, 4"));
        assert!(result.contains("Urgency"));
        assert!(result.contains("0 -> 90"));
        assert!(result.contains("Raw: 85  Priority: 120.5"));
    }

    #[test]
    fn test_format_graph_dot() {
        let view = GraphView {
            nodes: vec![
                GraphNode {
                    id: 1,
                    title: "Design \"v2\"".to_string(),
                    score: 60.0,
                    is_circular: false,
                },
                GraphNode {
                    id: 2,
                    title: "Build".to_string(),
                    score: 999.0,
                    is_circular: true,
                },
            ],
            edges: vec![GraphEdge {
                from: 1,
                to: 2,
                is_circular: false,
            }],
        };
        let dot = format_graph_dot(&view);
        assert!(dot.starts_with("digraph tasks {\n"));
        assert!(dot.contains("\"1\" [label=\"Design \\\"v2\\\"\\n60\""));
        assert!(dot.contains("fillcolor=lightcoral"));
        assert!(dot.contains("\"1\" -> \"2\" [label=\"blocks\"];"));
        assert!(dot.ends_with("}\n"));
    }
}
