use checklist_core::view::SidebarRow;
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

use super::NewListForm;

#[derive(Properties, PartialEq)]
pub struct ListSidebarProps {
  pub rows:           Vec<SidebarRow>,
  pub on_select:      Callback<String>,
  pub on_create_list: Callback<String>
}

#[function_component(ListSidebar)]
pub fn list_sidebar(
  props: &ListSidebarProps
) -> Html {
  html! {
      <div class="panel sidebar">
          <div class="header">{ "My lists" }</div>
          <ul class="task-list">
              {
                  for props.rows.iter().map(|row| {
                      let on_select = props.on_select.clone();
                      let id = row.id.clone();
                      html! {
                          <li
                              key={row.id.clone()}
                              data-list-id={row.id.clone()}
                              class={classes!("list-name", row.active.then_some("active-list"))}
                              onclick={move |_| on_select.emit(id.clone())}
                          >
                              { &row.name }
                          </li>
                      }
                  })
              }
          </ul>
          <NewListForm on_submit={props.on_create_list.clone()} />
      </div>
  }
}
