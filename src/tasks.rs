extern crate anyhow;
extern crate serde;
extern crate serde_json;
extern crate serde_with;

use anyhow::Context;
use crate::config;
use crate::fetch;
use crate::result;
use crate::structs;
use serde_with::{serde_as, VecSkipError};

const UNTITLED_TASK: &str = "Untitled Task";

/// Raw task lists as returned by the two Todoist endpoints.
#[derive(Debug, Default)]
pub struct TodoistTasks {
    pub active: Vec<TodoistTask>,
    pub completed: Vec<serde_json::Value>,
}

// Entries that don't fit the schema are dropped instead of failing the list.
#[serde_as]
#[derive(Deserialize, Debug, Default)]
#[serde(transparent)]
struct TodoistTaskList {
    #[serde_as(as = "VecSkipError<_>")]
    tasks: Vec<TodoistTask>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TodoistTask {
    content: Option<String>,
    priority: Option<i64>,
    due: Option<TodoistDue>,
}

#[derive(Deserialize, Debug, Clone)]
struct TodoistDue {
    string: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
struct TodoistCompletedResponse {
    #[serde(default)]
    items: Vec<serde_json::Value>,
}

#[derive(Deserialize, Debug)]
struct TodoistCompletedItem {
    content: Option<String>,
}

pub fn get_task_rows(config: &config::Config, today: chrono::NaiveDate) -> result::BoardResult<Vec<structs::TaskRow>> {
    let timeout = config.timeout();
    return get_task_rows_ext(config, today, &|request| fetch::real_fetch(request, timeout));
}

/// Fails only when the API token is missing; either fetch failing just
/// leaves its half of the board empty.
pub fn get_task_rows_ext(
    config: &config::Config,
    today: chrono::NaiveDate,
    fetch_fn: fetch::FetchFn) -> result::BoardResult<Vec<structs::TaskRow>> {
    let token = config.require_auth_token()?;

    let tasks = TodoistTasks {
        active: fetch_active_tasks(config, token, fetch_fn).unwrap_or_else(|err| {
            error!("Error fetching active tasks: {}", err);
            vec![]
        }),
        completed: fetch_completed_tasks(config, token, today, fetch_fn).unwrap_or_else(|err| {
            error!("Error fetching completed tasks: {}", err);
            vec![]
        }),
    };

    return Ok(process_tasks(&tasks));
}

fn fetch_active_tasks(config: &config::Config, token: &str, fetch_fn: fetch::FetchFn) -> result::BoardResult<Vec<TodoistTask>> {
    let request = fetch::FetchRequest {
        url: &config.tasks_url,
        query: vec![("filter", "today".to_string())],
        bearer_token: Some(token),
    };

    let body = fetch_fn(&request)?;
    let list: TodoistTaskList = serde_json::from_str(&body)
        .context("while parsing active tasks json")?;
    return Ok(list.tasks);
}

fn fetch_completed_tasks(
    config: &config::Config,
    token: &str,
    today: chrono::NaiveDate,
    fetch_fn: fetch::FetchFn) -> result::BoardResult<Vec<serde_json::Value>> {
    let request = fetch::FetchRequest {
        url: &config.completed_url,
        query: vec![("since", format!("{}T00:00", today.format("%Y-%m-%d")))],
        bearer_token: Some(token),
    };

    let body = fetch_fn(&request)?;
    let response: TodoistCompletedResponse = serde_json::from_str(&body)
        .context("while parsing completed tasks json")?;
    return Ok(response.items);
}

fn active_row(task: &TodoistTask) -> structs::TaskRow {
    let content = task.content.clone().unwrap_or(UNTITLED_TASK.to_string());
    let priority = task.priority.unwrap_or(1).max(1).min(4) as u8;
    let due_text = task.due.as_ref()
        .and_then(|d| d.string.clone())
        .filter(|s| !s.is_empty())
        .unwrap_or("Today".to_string());

    return structs::TaskRow::active(content, priority, due_text);
}

fn completed_row(item: &serde_json::Value) -> Option<structs::TaskRow> {
    if !item.is_object() {
        return None;
    }
    let item: TodoistCompletedItem = match serde_json::from_value(item.clone()) {
        Ok(item) => item,
        Err(err) => {
            warn!("Skipping malformed completed task: {}", err);
            return None;
        },
    };
    let sort_text = item.content.clone().unwrap_or_default().to_lowercase();
    let mut row = structs::TaskRow::completed(item.content.unwrap_or(UNTITLED_TASK.to_string()));
    // Untitled items sort by their empty content, ahead of titled ones.
    row.sort_key.content_lower = sort_text;
    return Some(row);
}

pub fn process_tasks(tasks: &TodoistTasks) -> Vec<structs::TaskRow> {
    let mut rows: Vec<structs::TaskRow> = tasks.active.iter().map(active_row).collect();
    rows.extend(tasks.completed.iter().filter_map(completed_row));

    rows.sort_by(|a, b| a.sort_key.cmp(&b.sort_key));
    rows.truncate(structs::MAX_TASKS);

    return rows;
}
