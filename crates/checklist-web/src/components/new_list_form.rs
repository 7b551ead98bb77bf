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

#[derive(Properties, PartialEq)]
pub struct NewListFormProps {
  pub on_submit: Callback<String>
}

#[function_component(NewListForm)]
pub fn new_list_form(
  props: &NewListFormProps
) -> Html {
  let name = use_state(String::new);

  let on_input = {
    let name = name.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        name.set(input.value());
      }
    )
  };

  let on_submit = {
    let name = name.clone();
    let on_submit =
      props.on_submit.clone();
    Callback::from(
      move |e: SubmitEvent| {
        e.prevent_default();
        let submitted = (*name).clone();
        let accepted =
          !submitted.trim().is_empty();
        on_submit.emit(submitted);
        if accepted {
          name.set(String::new());
        }
      }
    )
  };

  html! {
      <form onsubmit={on_submit}>
          <input
              type="text"
              class="new list"
              placeholder="new list name"
              aria-label="new list name"
              value={(*name).clone()}
              oninput={on_input}
          />
          <button class="btn create" aria-label="create new list">{ "+" }</button>
      </form>
  }
}
