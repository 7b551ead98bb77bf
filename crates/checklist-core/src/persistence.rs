use tracing::{debug, info, warn};

use crate::error::Result;
use crate::model::{List, NO_DATE, create_list, create_task};
use crate::state::AppState;
use crate::storage::KeyValueStorage;

pub const LISTS_KEY: &str = "task.lists";
pub const SELECTED_LIST_ID_KEY: &str = "task.selectedListId";

/// Lists shown when nothing usable is stored yet.
pub fn seed_lists() -> Vec<List> {
    let mut personal = create_list("Personal");
    personal.tasks = vec![
        create_task("Water the plants", NO_DATE),
        create_task("Call the dentist", NO_DATE),
    ];
    let work = create_list("Work");
    vec![personal, work]
}

/// Reads both keys. Missing or corrupt lists fall back to [`seed_lists`];
/// a selection naming no list is dropped.
#[tracing::instrument(skip(storage))]
pub fn load<S: KeyValueStorage + ?Sized>(storage: &S) -> AppState {
    let lists = match storage.get_item(LISTS_KEY) {
        Ok(Some(raw)) => match serde_json::from_str::<Vec<List>>(&raw) {
            Ok(lists) => {
                debug!(count = lists.len(), "loaded lists from storage");
                lists
            }
            Err(err) => {
                warn!(error = %err, "stored lists are corrupt; using seed lists");
                seed_lists()
            }
        },
        Ok(None) => {
            info!("no stored lists; using seed lists");
            seed_lists()
        }
        Err(err) => {
            warn!(error = %err, "failed reading stored lists; using seed lists");
            seed_lists()
        }
    };

    let selected_list_id = match storage.get_item(SELECTED_LIST_ID_KEY) {
        Ok(value) => value.filter(|id| !id.trim().is_empty() && id != "null"),
        Err(err) => {
            warn!(error = %err, "failed reading stored selection");
            None
        }
    };

    let mut state = AppState {
        lists,
        selected_list_id,
    };
    if state.heal_selection() {
        warn!("stored selection referenced a missing list; cleared");
    }
    state
}

/// Writes both keys. No selection removes the selection key.
#[tracing::instrument(skip(storage, state), fields(lists = state.lists.len()))]
pub fn save<S: KeyValueStorage + ?Sized>(storage: &mut S, state: &AppState) -> Result<()> {
    let serialized = serde_json::to_string(&state.lists)?;
    storage.set_item(LISTS_KEY, &serialized)?;
    match state.selected_list_id.as_deref() {
        Some(id) => storage.set_item(SELECTED_LIST_ID_KEY, id)?,
        None => storage.remove_item(SELECTED_LIST_ID_KEY)?,
    }
    debug!(bytes = serialized.len(), "saved state");
    Ok(())
}
