use checklist_core::view::TaskRow;
use yew::{
  Callback,
  Classes,
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskRowItemProps {
  pub row:       TaskRow,
  pub on_toggle: Callback<String>
}

#[function_component(TaskRowItem)]
pub fn task_row_item(
  props: &TaskRowItemProps
) -> Html {
  let id = props.row.id.clone();
  let on_toggle =
    props.on_toggle.clone();

  html! {
      <div class={row_classes(&props.row)}>
          <input
              type="checkbox"
              id={props.row.id.clone()}
              checked={props.row.checked}
              onclick={move |_| on_toggle.emit(id.clone())}
          />
          <label for={props.row.id.clone()}>
              <span class="name">{ &props.row.name }</span>
          </label>
          <span class="date">{ &props.row.date }</span>
      </div>
  }
}

fn row_classes(row: &TaskRow) -> Classes {
  classes!(
    "task",
    row.checked.then_some("done")
  )
}

#[cfg(test)]
mod tests {
  use checklist_core::view::TaskRow;
  use yew::Callback;

  use super::{
    TaskRowItemProps,
    row_classes
  };

  fn row(checked: bool) -> TaskRow {
    TaskRow {
      id: "t1".to_string(),
      name: "Buy milk".to_string(),
      checked,
      date: "03/05/2024".to_string()
    }
  }

  #[test]
  fn checked_rows_are_marked_done() {
    assert!(
      row_classes(&row(true))
        .contains("done")
    );
    let open = row_classes(&row(false));
    assert!(open.contains("task"));
    assert!(!open.contains("done"));
  }

  #[test]
  fn toggled_row_changes_props() {
    let on_toggle =
      Callback::from(|_: String| {});
    let before = TaskRowItemProps {
      row:       row(false),
      on_toggle: on_toggle.clone()
    };
    let same = TaskRowItemProps {
      row:       row(false),
      on_toggle: on_toggle.clone()
    };
    let after = TaskRowItemProps {
      row: row(true),
      on_toggle
    };
    assert!(before == same);
    assert!(before != after);
  }
}
