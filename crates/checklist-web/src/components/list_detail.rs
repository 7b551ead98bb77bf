use checklist_core::view::DetailPanel;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

use super::{
  NewTaskForm,
  TaskRowItem
};

#[derive(Properties, PartialEq)]
pub struct ListDetailProps {
  pub detail:             DetailPanel,
  pub on_toggle:          Callback<String>,
  pub on_create_task:
    Callback<(String, String)>,
  pub on_clear_completed:
    Callback<MouseEvent>,
  pub on_delete_list:
    Callback<MouseEvent>
}

#[function_component(ListDetail)]
pub fn list_detail(
  props: &ListDetailProps
) -> Html {
  html! {
      <div class="panel todo-list">
          <div class="todo-header">
              <h2 class="list-title">{ &props.detail.title }</h2>
              <p class="task-count">{ &props.detail.count_label }</p>
          </div>
          <div class="todo-body">
              <div class="tasks">
                  {
                      for props.detail.tasks.iter().cloned().map(|row| {
                          let key = row.id.clone();
                          html! {
                              <TaskRowItem
                                  key={key}
                                  row={row}
                                  on_toggle={props.on_toggle.clone()}
                              />
                          }
                      })
                  }
              </div>
              <NewTaskForm on_submit={props.on_create_task.clone()} />
          </div>
          <div class="footer">
              <button class="btn" onclick={props.on_clear_completed.clone()}>
                  { "Clear completed tasks" }
              </button>
              <button class="btn delete" onclick={props.on_delete_list.clone()}>
                  { "Delete list" }
              </button>
          </div>
      </div>
  }
}
