use yew::{
  Callback,
  Html,
  Properties,
  SubmitEvent,
  TargetCast,
  function_component,
  html,
  use_state
};

/// Emits `(name, date)`; `date` is the
/// raw `YYYY-MM-DD` value of the date
/// input, empty when left blank.
#[derive(Properties, PartialEq)]
pub struct NewTaskFormProps {
  pub on_submit:
    Callback<(String, String)>
}

#[function_component(NewTaskForm)]
pub fn new_task_form(
  props: &NewTaskFormProps
) -> Html {
  let name = use_state(String::new);
  let date = use_state(String::new);

  let on_name_input = {
    let name = name.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        name.set(input.value());
      }
    )
  };

  let on_date_input = {
    let date = date.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        date.set(input.value());
      }
    )
  };

  let on_submit = {
    let name = name.clone();
    let date = date.clone();
    let on_submit =
      props.on_submit.clone();
    Callback::from(
      move |e: SubmitEvent| {
        e.prevent_default();
        let submitted_name =
          (*name).clone();
        let accepted = !submitted_name
          .trim()
          .is_empty();
        on_submit.emit((
          submitted_name,
          (*date).clone()
        ));
        if accepted {
          name.set(String::new());
          date.set(String::new());
        }
      }
    )
  };

  html! {
      <form onsubmit={on_submit}>
          <input
              type="text"
              class="new task"
              placeholder="new task name"
              aria-label="new task name"
              value={(*name).clone()}
              oninput={on_name_input}
          />
          <input
              type="date"
              class="new date"
              aria-label="new task date"
              value={(*date).clone()}
              oninput={on_date_input}
          />
          <button class="btn create" aria-label="create new task">{ "+" }</button>
      </form>
  }
}
