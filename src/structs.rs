pub const MAX_DEPARTURES: usize = 4;
pub const MAX_TASKS: usize = 6;

pub const UNKNOWN_ROUTE_NAME: &str = "???";
pub const DEFAULT_ROUTE_COLOR: &str = "#888888";
pub const DEFAULT_ROUTE_TEXT_COLOR: &str = "#FFFFFF";

/// One departure, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct DepartureRow {
    pub label: String,
    pub destination: String,
    pub color: String,
    pub text_color: String,
    pub time_text: String,
    pub is_live: bool,
    /// Up to two later clock times; only scheduled rows have them.
    pub additional_times: Vec<String>,
    /// Seconds until departure. Live and scheduled rows share this timeline.
    pub sort_key: f64,
}

/// Orders tasks: every active task before any completed one, active tasks
/// by descending priority, and alphabetically (case-insensitive) within that.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TaskSortKey {
    pub group: u8,
    pub priority_rank: u8,
    pub content_lower: String,
}

/// One task, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRow {
    pub content: String,
    /// 1 (low) ..= 4 (urgent).
    pub priority: u8,
    pub due_text: String,
    pub completed: bool,
    pub sort_key: TaskSortKey,
}

impl TaskRow {
    pub fn active(content: String, priority: u8, due_text: String) -> TaskRow {
        let priority = priority.max(1).min(4);
        let sort_key = TaskSortKey {
            group: 0,
            priority_rank: 5 - priority,
            content_lower: content.to_lowercase(),
        };
        return TaskRow {
            content: content,
            priority: priority,
            due_text: due_text,
            completed: false,
            sort_key: sort_key,
        };
    }

    pub fn completed(content: String) -> TaskRow {
        let sort_key = TaskSortKey {
            group: 1,
            priority_rank: 0,
            content_lower: content.to_lowercase(),
        };
        return TaskRow {
            content: content,
            priority: 1,
            due_text: "Completed".to_string(),
            completed: true,
            sort_key: sort_key,
        };
    }

    pub fn priority_label(&self) -> &'static str {
        match self.priority {
            4 => "Urgent",
            3 => "High",
            2 => "Medium",
            _ => "Low",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TaskRow;

    #[test]
    fn priority_is_clamped() {
        assert_eq!(1, TaskRow::active("a".to_string(), 0, "Today".to_string()).priority);
        assert_eq!(4, TaskRow::active("a".to_string(), 9, "Today".to_string()).priority);
    }

    #[test]
    fn completed_sorts_after_urgent_and_low() {
        let urgent = TaskRow::active("Zzz".to_string(), 4, "Today".to_string());
        let low = TaskRow::active("Zzz".to_string(), 1, "Today".to_string());
        let done = TaskRow::completed("Aaa".to_string());

        assert!(urgent.sort_key < low.sort_key);
        assert!(low.sort_key < done.sort_key);
        assert_eq!("Completed", done.due_text);
        assert_eq!("Low", done.priority_label());
        assert_eq!("Urgent", urgent.priority_label());
    }
}
