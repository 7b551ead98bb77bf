//! Toolkit-independent description of what the screen shows.
//!
//! [`render`] rebuilds the whole description from state on every change;
//! frontends only project it onto their widgets.

use serde::Serialize;

use crate::model::{List, count_incomplete};
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    pub sidebar: Vec<SidebarRow>,
    pub detail: Option<DetailPanel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarRow {
    pub id: String,
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailPanel {
    pub list_id: String,
    pub title: String,
    pub remaining: usize,
    pub count_label: String,
    pub tasks: Vec<TaskRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRow {
    pub id: String,
    pub name: String,
    pub checked: bool,
    pub date: String,
}

pub fn render(state: &AppState) -> View {
    let selected = state.selected_list_id.as_deref();
    let sidebar = state
        .lists
        .iter()
        .map(|list| SidebarRow {
            id: list.id.clone(),
            name: list.name.clone(),
            active: selected == Some(list.id.as_str()),
        })
        .collect();

    View {
        sidebar,
        detail: state.selected_list().map(render_detail),
    }
}

pub fn render_detail(list: &List) -> DetailPanel {
    let remaining = count_incomplete(&list.tasks);
    DetailPanel {
        list_id: list.id.clone(),
        title: list.name.clone(),
        remaining,
        count_label: count_label(remaining),
        tasks: list
            .tasks
            .iter()
            .map(|task| TaskRow {
                id: task.id.clone(),
                name: task.name.clone(),
                checked: task.complete,
                date: task.date.clone(),
            })
            .collect(),
    }
}

/// Partial render used after a checkbox toggle.
pub fn render_count(list: &List) -> String {
    count_label(count_incomplete(&list.tasks))
}

/// Brings an already-rendered detail panel in line with `list` after a
/// toggle, touching only the count and the checkbox states.
pub fn patch_count(view: &mut View, list: &List) {
    let Some(detail) = view.detail.as_mut() else {
        return;
    };
    if detail.list_id != list.id {
        return;
    }
    detail.remaining = count_incomplete(&list.tasks);
    detail.count_label = count_label(detail.remaining);
    for row in &mut detail.tasks {
        if let Some(task) = list.tasks.iter().find(|task| task.id == row.id) {
            row.checked = task.complete;
        }
    }
}

pub fn count_label(remaining: usize) -> String {
    let noun = if remaining == 1 { "task" } else { "tasks" };
    format!("{remaining} {noun} remaining")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NO_DATE, create_list, create_task};

    fn state_with(lists: Vec<List>, selected: Option<usize>) -> AppState {
        let selected_list_id = selected.map(|idx| lists[idx].id.clone());
        AppState {
            lists,
            selected_list_id,
        }
    }

    #[test]
    fn no_selection_hides_detail() {
        let view = render(&state_with(vec![create_list("a")], None));
        assert_eq!(view.sidebar.len(), 1);
        assert!(!view.sidebar[0].active);
        assert!(view.detail.is_none());
    }

    #[test]
    fn selected_list_is_marked_active_in_order() {
        let lists = vec![create_list("a"), create_list("b"), create_list("c")];
        let view = render(&state_with(lists, Some(1)));
        let marks: Vec<_> = view
            .sidebar
            .iter()
            .map(|row| (row.name.as_str(), row.active))
            .collect();
        assert_eq!(marks, [("a", false), ("b", true), ("c", false)]);
    }

    #[test]
    fn count_label_pluralizes() {
        assert_eq!(count_label(0), "0 tasks remaining");
        assert_eq!(count_label(1), "1 task remaining");
        assert_eq!(count_label(2), "2 tasks remaining");
    }

    #[test]
    fn remaining_matches_unchecked_rows() {
        for size in 0..=6usize {
            for mask in 0..(1u32 << size) {
                let mut list = create_list("Home");
                for idx in 0..size {
                    let mut task = create_task(format!("t{idx}"), NO_DATE);
                    task.complete = mask & (1 << idx) != 0;
                    list.tasks.push(task);
                }
                let view = render(&state_with(vec![list], Some(0)));
                let detail = view.detail.expect("detail shown");
                let unchecked = detail.tasks.iter().filter(|row| !row.checked).count();
                assert_eq!(detail.remaining, unchecked, "size {size} mask {mask:b}");
                assert_eq!(detail.remaining, size - mask.count_ones() as usize);
                assert_eq!(detail.count_label, count_label(unchecked));
            }
        }
    }

    #[test]
    fn patch_count_matches_full_render() {
        let mut list = create_list("Home");
        list.tasks.push(create_task("a", NO_DATE));
        list.tasks.push(create_task("b", NO_DATE));
        let mut state = state_with(vec![list], Some(0));
        let mut view = render(&state);

        state.lists[0].tasks[1].complete = true;
        patch_count(&mut view, &state.lists[0]);
        assert_eq!(view, render(&state));
    }

    #[test]
    fn empty_list_shows_zero_and_no_rows() {
        let view = render(&state_with(vec![create_list("Work")], Some(0)));
        let detail = view.detail.expect("detail shown");
        assert_eq!(detail.title, "Work");
        assert_eq!(detail.count_label, "0 tasks remaining");
        assert!(detail.tasks.is_empty());
    }
}
