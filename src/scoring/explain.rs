use chrono::NaiveDate;

use super::engine::DueFacts;
use super::strategy::Strategy;
use crate::calendar;
use crate::task::Task;

/// One-line justification of a task's base score.
pub fn explain(task: &Task, strategy: Strategy, today: NaiveDate) -> String {
    describe(task, strategy, &DueFacts::for_task(task, today))
}

/// Same as [`explain`], reusing already computed deadline facts.
pub fn describe(task: &Task, strategy: Strategy, facts: &DueFacts) -> String {
    if !facts.due_known {
        return format!("Due date unknown (Imp: {})", task.importance);
    }

    let phrase = if facts.days_until_due < 0 {
        format!("Overdue by {} days", facts.days_until_due.abs())
    } else if facts.days_until_due == 0 {
        if facts.today_is_working {
            "Due today".to_string()
        } else {
            "Due today (weekend/holiday)".to_string()
        }
    } else if facts.working_days_left <= 1 {
        if calendar::is_weekend(facts.due) {
            format!(
                "Due in {} working day (falls on weekend)",
                facts.working_days_left
            )
        } else {
            format!("Due in {} working day", facts.working_days_left)
        }
    } else if facts.working_days_left <= 3 {
        format!("Due in {} working days", facts.working_days_left)
    } else {
        format!(
            "Due {} ({} working days)",
            facts.due.format("%Y-%m-%d"),
            facts.working_days_left
        )
    };

    format!(
        "{} (Imp: {}, {})",
        phrase,
        task.importance,
        strategy.display_name()
    )
}

/// Short reasons a task stands out (overdue, due soon, important, quick).
///
/// Independent of the main pipeline; wording may differ from [`explain`].
pub fn explanation_reasons(task: &Task, strategy: Strategy, today: NaiveDate) -> Vec<String> {
    let mut reasons = Vec::new();

    let days_left = calendar::days_between(today, task.effective_due(today));
    if days_left < 0 {
        reasons.push(format!("Overdue by {} days", days_left.abs()));
    } else if days_left == 0 {
        reasons.push("Due today".to_string());
    } else if days_left <= 2 {
        reasons.push("Due very soon".to_string());
    }

    if task.importance >= 8 {
        reasons.push("High importance rating".to_string());
    }

    if task.estimated_hours > 0.0 && task.estimated_hours <= 2.0 {
        reasons.push("Quick win opportunity".to_string());
    }

    if reasons.is_empty() {
        reasons.push(format!("Balanced priority using {} strategy", strategy.key()));
    }

    reasons
}

/// [`explanation_reasons`] joined into one bullet string.
pub fn generate_explanation(task: &Task, strategy: Strategy, today: NaiveDate) -> String {
    explanation_reasons(task, strategy, today).join(" • ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskInput;
    use chrono::Duration;

    // Monday
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()
    }

    fn task_due(days: i64) -> Task {
        Task::from_input(
            TaskInput::new("t")
                .with_due(today() + Duration::days(days))
                .with_importance(6)
                .with_hours(4.0),
            0,
        )
    }

    #[test]
    fn test_overdue_phrase() {
        let text = explain(&task_due(-3), Strategy::SmartBalance, today());
        assert_eq!(text, "Overdue by 3 days (Imp: 6, Smart Balance)");
    }

    #[test]
    fn test_due_today_working_day() {
        let text = explain(&task_due(0), Strategy::HighImpact, today());
        assert_eq!(text, "Due today (Imp: 6, High Impact)");
    }

    #[test]
    fn test_due_today_on_holiday() {
        let new_year = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let t = Task::from_input(TaskInput::new("t").with_due(new_year), 0);
        let text = explain(&t, Strategy::DeadlineDriven, new_year);
        assert_eq!(text, "Due today (weekend/holiday) (Imp: 5, Deadline Driven)");
    }

    #[test]
    fn test_one_working_day() {
        let text = explain(&task_due(1), Strategy::FastestWins, today());
        assert_eq!(text, "Due in 1 working day (Imp: 6, Fastest Wins)");
    }

    #[test]
    fn test_one_working_day_falling_on_weekend() {
        let friday = NaiveDate::from_ymd_opt(2024, 1, 12).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2024, 1, 14).unwrap();
        let t = Task::from_input(TaskInput::new("t").with_due(sunday), 0);
        let text = explain(&t, Strategy::SmartBalance, friday);
        assert_eq!(
            text,
            "Due in 1 working day (falls on weekend) (Imp: 5, Smart Balance)"
        );
    }

    #[test]
    fn test_few_working_days() {
        let text = explain(&task_due(3), Strategy::SmartBalance, today());
        assert_eq!(text, "Due in 3 working days (Imp: 6, Smart Balance)");
    }

    #[test]
    fn test_far_out_shows_date() {
        let text = explain(&task_due(14), Strategy::SmartBalance, today());
        assert_eq!(text, "Due 2024-01-22 (10 working days) (Imp: 6, Smart Balance)");
    }

    #[test]
    fn test_unknown_due_date() {
        let t = Task::from_input(TaskInput::new("t").with_importance(12), 0);
        assert_eq!(
            explain(&t, Strategy::SmartBalance, today()),
            "Due date unknown (Imp: 12)"
        );
    }

    #[test]
    fn test_reasons_combined() {
        let t = Task::from_input(
            TaskInput::new("t")
                .with_due(today() + Duration::days(1))
                .with_importance(9)
                .with_hours(1.0),
            0,
        );
        assert_eq!(
            generate_explanation(&t, Strategy::SmartBalance, today()),
            "Due very soon • High importance rating • Quick win opportunity"
        );
    }

    #[test]
    fn test_reasons_overdue() {
        let reasons = explanation_reasons(&task_due(-2), Strategy::SmartBalance, today());
        assert_eq!(reasons, vec!["Overdue by 2 days".to_string()]);
    }

    #[test]
    fn test_reasons_fallback_names_strategy() {
        let reasons = explanation_reasons(&task_due(20), Strategy::HighImpact, today());
        assert_eq!(
            reasons,
            vec!["Balanced priority using high_impact strategy".to_string()]
        );
    }
}
