use tracing::{debug, info};

use crate::cli::Command;
use crate::controller::{Controller, Event, Notice, NoticeLevel, Outcome, Refresh};
use crate::model::{List, find_list_by_name};
use crate::render::TextRenderer;
use crate::state::AppState;
use crate::storage::KeyValueStorage;
use crate::view::render_count;

/// Exit status for a run that printed an error notice.
pub const EXIT_STORAGE_FAILURE: i32 = 1;

/// Runs one terminal command against the controller and prints the result.
/// Returns the process exit status.
#[tracing::instrument(skip(controller, renderer))]
pub fn dispatch<S: KeyValueStorage>(
    controller: &mut Controller<S>,
    renderer: &TextRenderer,
    command: Command,
) -> anyhow::Result<i32> {
    let Some(event) = to_event(controller.state(), command, renderer)? else {
        renderer.print_view(&controller.view())?;
        return Ok(0);
    };

    info!(?event, "dispatching event");
    let outcome = controller.handle(event);
    report(controller, renderer, &outcome)?;

    Ok(if outcome.is_error() {
        EXIT_STORAGE_FAILURE
    } else {
        0
    })
}

/// `None` means "just show the current view".
fn to_event(
    state: &AppState,
    command: Command,
    renderer: &TextRenderer,
) -> anyhow::Result<Option<Event>> {
    let needs_selection = matches!(
        command,
        Command::Add { .. } | Command::Toggle { .. } | Command::ClearCompleted | Command::DeleteList
    );
    if needs_selection && state.selected_list().is_none() {
        renderer.print_notice(&Notice {
            level: NoticeLevel::Warning,
            message: "no list selected; run `checklist select <list>` first".to_string(),
        })?;
        return Ok(None);
    }

    let event = match command {
        Command::Show => return Ok(None),
        Command::NewList { name } => Event::CreateList {
            name: name.join(" "),
        },
        Command::Select { list } => Event::SelectList(resolve_list(&state.lists, &list)),
        Command::Add { name, date } => Event::CreateTask {
            name: name.join(" "),
            date: date.unwrap_or_default(),
        },
        Command::Toggle { task } => {
            let Some(list) = state.selected_list() else {
                return Ok(None);
            };
            Event::ToggleTask(resolve_task(list, &task))
        }
        Command::ClearCompleted => Event::ClearCompleted,
        Command::DeleteList => Event::DeleteList,
    };
    Ok(Some(event))
}

fn report<S: KeyValueStorage>(
    controller: &Controller<S>,
    renderer: &TextRenderer,
    outcome: &Outcome,
) -> anyhow::Result<()> {
    if let Some(notice) = &outcome.notice {
        renderer.print_notice(notice)?;
    }

    match outcome.refresh {
        Refresh::None => {}
        Refresh::Count => {
            if let Some(list) = controller.state().selected_list() {
                renderer.print_count(&render_count(list))?;
            }
        }
        Refresh::Full => renderer.print_view(&controller.view())?,
    }
    Ok(())
}

/// Exact id, then name, then unique id prefix. Unmatched input is passed
/// through so the controller reports it.
pub fn resolve_list(lists: &[List], wanted: &str) -> String {
    if let Some(list) = lists.iter().find(|list| list.id == wanted) {
        return list.id.clone();
    }
    if let Some(list) = find_list_by_name(lists, wanted) {
        debug!(name = %wanted, list_id = %list.id, "resolved list by name");
        return list.id.clone();
    }
    unique_prefix(lists.iter().map(|list| list.id.as_str()), wanted)
        .unwrap_or(wanted)
        .to_string()
}

/// 1-based row number, then exact id, then unique id prefix.
pub fn resolve_task(list: &List, wanted: &str) -> String {
    if let Ok(row) = wanted.trim().parse::<usize>()
        && let Some(task) = row.checked_sub(1).and_then(|idx| list.tasks.get(idx))
    {
        return task.id.clone();
    }
    if list.tasks.iter().any(|task| task.id == wanted) {
        return wanted.to_string();
    }
    unique_prefix(list.tasks.iter().map(|task| task.id.as_str()), wanted)
        .unwrap_or(wanted)
        .to_string()
}

fn unique_prefix<'a>(ids: impl Iterator<Item = &'a str>, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        return None;
    }
    let mut matches = ids.filter(|id| id.starts_with(prefix));
    let first = matches.next()?;
    match matches.next() {
        Some(_) => None,
        None => Some(first),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{List, NO_DATE, create_task};

    fn list_with_ids(ids: &[&str]) -> List {
        List {
            id: "list".to_string(),
            name: "Home".to_string(),
            tasks: ids
                .iter()
                .map(|id| {
                    let mut task = create_task(format!("task {id}"), NO_DATE);
                    task.id = id.to_string();
                    task
                })
                .collect(),
        }
    }

    #[test]
    fn task_resolves_by_row_number() {
        let list = list_with_ids(&["aaa", "bbb"]);
        assert_eq!(resolve_task(&list, "2"), "bbb");
    }

    #[test]
    fn task_resolves_by_unique_prefix_only() {
        let list = list_with_ids(&["abc1", "abd2", "xyz"]);
        assert_eq!(resolve_task(&list, "x"), "xyz");
        assert_eq!(resolve_task(&list, "ab"), "ab");
        assert_eq!(resolve_task(&list, "abd"), "abd2");
    }

    #[test]
    fn out_of_range_row_falls_through() {
        let list = list_with_ids(&["aaa"]);
        assert_eq!(resolve_task(&list, "0"), "0");
        assert_eq!(resolve_task(&list, "5"), "5");
    }

    #[test]
    fn list_resolves_by_name_then_prefix() {
        let lists = vec![
            List {
                id: "1111".to_string(),
                name: "Home".to_string(),
                tasks: vec![],
            },
            List {
                id: "2222".to_string(),
                name: "Work".to_string(),
                tasks: vec![],
            },
        ];
        assert_eq!(resolve_list(&lists, "work"), "2222");
        assert_eq!(resolve_list(&lists, "11"), "1111");
        assert_eq!(resolve_list(&lists, "garden"), "garden");
    }
}
