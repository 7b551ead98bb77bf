use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored in place of a date when the task was created without one.
pub const NO_DATE: &str = " ";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub complete: bool,

    #[serde(default = "no_date")]
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct List {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// Records addressed by an opaque string id.
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for Task {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for List {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Task {
    pub fn has_date(&self) -> bool {
        !self.date.trim().is_empty()
    }
}

fn no_date() -> String {
    NO_DATE.to_string()
}

pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn create_list(name: impl Into<String>) -> List {
    List {
        id: generate_id(),
        name: name.into(),
        tasks: vec![],
    }
}

/// `date` is stored verbatim: either already formatted or [`NO_DATE`].
pub fn create_task(name: impl Into<String>, date: impl Into<String>) -> Task {
    Task {
        id: generate_id(),
        name: name.into(),
        complete: false,
        date: date.into(),
    }
}

pub fn select_by_id<'a, T: Identified>(items: &'a [T], id: Option<&str>) -> Option<&'a T> {
    let id = id?;
    items.iter().find(|item| item.id() == id)
}

pub fn select_by_id_mut<'a, T: Identified>(
    items: &'a mut [T],
    id: Option<&str>,
) -> Option<&'a mut T> {
    let id = id?;
    items.iter_mut().find(|item| item.id() == id)
}

pub fn remove_completed(tasks: Vec<Task>) -> Vec<Task> {
    tasks.into_iter().filter(|task| !task.complete).collect()
}

pub fn remove_by_id<T: Identified>(items: Vec<T>, id: &str) -> Vec<T> {
    items.into_iter().filter(|item| item.id() != id).collect()
}

pub fn count_incomplete(tasks: &[Task]) -> usize {
    tasks.iter().filter(|task| !task.complete).count()
}

pub fn find_list_by_name<'a>(lists: &'a [List], name: &str) -> Option<&'a List> {
    let wanted = name.trim();
    lists
        .iter()
        .find(|list| list.name.trim().eq_ignore_ascii_case(wanted))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn task(name: &str, complete: bool) -> Task {
        let mut task = create_task(name, NO_DATE);
        task.complete = complete;
        task
    }

    #[test]
    fn new_list_is_empty_and_new_task_is_incomplete() {
        let list = create_list("Groceries");
        assert!(list.tasks.is_empty());
        assert!(!list.id.is_empty());

        let task = create_task("Eggs", "03/05/2024");
        assert!(!task.complete);
        assert_eq!(task.date, "03/05/2024");
    }

    #[test]
    fn ids_stay_unique_under_rapid_creation() {
        let ids: HashSet<String> = (0..1_000).map(|_| create_list("x").id).collect();
        assert_eq!(ids.len(), 1_000);
    }

    #[test]
    fn select_by_id_handles_absent_ids() {
        let lists = vec![create_list("a"), create_list("b")];
        let wanted = lists[1].id.clone();

        assert_eq!(
            select_by_id(&lists, Some(wanted.as_str())).map(|l| l.name.as_str()),
            Some("b")
        );
        assert!(select_by_id(&lists, None).is_none());
        assert!(select_by_id(&lists, Some("missing")).is_none());
    }

    #[test]
    fn remove_completed_keeps_order_of_open_tasks() {
        let tasks = vec![task("a", false), task("b", true), task("c", false)];
        let kept = remove_completed(tasks);
        let names: Vec<_> = kept.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn remove_by_id_drops_only_the_match() {
        let lists = vec![create_list("a"), create_list("b"), create_list("c")];
        let target = lists[1].id.clone();
        let kept = remove_by_id(lists, &target);
        let names: Vec<_> = kept.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn count_incomplete_ignores_done_tasks() {
        let tasks = vec![task("a", false), task("b", true), task("c", false)];
        assert_eq!(count_incomplete(&tasks), 2);
        assert_eq!(count_incomplete(&[]), 0);
    }

    #[test]
    fn list_lookup_by_name_is_case_insensitive() {
        let lists = vec![create_list("Home"), create_list("Work")];
        assert_eq!(
            find_list_by_name(&lists, " work ").map(|l| l.id.as_str()),
            Some(lists[1].id.as_str())
        );
        assert!(find_list_by_name(&lists, "garden").is_none());
    }

    #[test]
    fn legacy_records_deserialize() {
        let raw = r#"{"id":"1612345678901","name":"Old","tasks":[
            {"id":"1612345678902","name":"t","complete":true,"date":" "}
        ]}"#;
        let list: List = serde_json::from_str(raw).expect("parse legacy list");
        assert_eq!(list.tasks.len(), 1);
        assert!(list.tasks[0].complete);
        assert!(!list.tasks[0].has_date());
    }
}
