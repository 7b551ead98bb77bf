use serde::{Deserialize, Serialize};

use crate::model::{List, select_by_id, select_by_id_mut};

/// Everything the application knows: the lists in insertion order and the
/// list shown in the detail panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    pub lists: Vec<List>,
    pub selected_list_id: Option<String>,
}

impl AppState {
    pub fn new(lists: Vec<List>, selected_list_id: Option<String>) -> Self {
        let mut state = Self {
            lists,
            selected_list_id,
        };
        state.heal_selection();
        state
    }

    pub fn selected_list(&self) -> Option<&List> {
        select_by_id(&self.lists, self.selected_list_id.as_deref())
    }

    pub fn selected_list_mut(&mut self) -> Option<&mut List> {
        let id = self.selected_list_id.clone();
        select_by_id_mut(&mut self.lists, id.as_deref())
    }

    /// Clears a selection that no longer names an existing list.
    /// Returns true when the selection was dropped.
    pub fn heal_selection(&mut self) -> bool {
        if self.selected_list_id.is_some() && self.selected_list().is_none() {
            self.selected_list_id = None;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::create_list;

    #[test]
    fn stale_selection_is_cleared_on_construction() {
        let state = AppState::new(vec![create_list("a")], Some("gone".to_string()));
        assert!(state.selected_list_id.is_none());
        assert!(state.selected_list().is_none());
    }

    #[test]
    fn valid_selection_is_kept() {
        let list = create_list("a");
        let id = list.id.clone();
        let mut state = AppState::new(vec![list], Some(id.clone()));
        assert_eq!(state.selected_list_id.as_deref(), Some(id.as_str()));
        assert!(!state.heal_selection());

        state.selected_list_mut().expect("selected").name = "b".to_string();
        assert_eq!(state.lists[0].name, "b");
    }
}
