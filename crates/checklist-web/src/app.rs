use std::cell::RefCell;
use std::rc::Rc;

use checklist_core::controller::{
  Controller,
  Event,
  Notice,
  Refresh
};
use checklist_core::view::{
  View,
  patch_count
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  function_component,
  html,
  use_mut_ref,
  use_state
};

use crate::components::{
  ListDetail,
  ListSidebar,
  NoticeBanner
};
use crate::storage::LocalStorage;

type SharedController =
  Rc<RefCell<Controller<LocalStorage>>>;

#[function_component(App)]
pub fn app() -> Html {
  let controller: SharedController =
    use_mut_ref(|| {
      Controller::load(LocalStorage)
    });
  let view = {
    let controller = controller.clone();
    use_state(move || {
      controller.borrow().view()
    })
  };
  let notice =
    use_state(|| None::<Notice>);

  let dispatch = {
    let controller = controller.clone();
    let view = view.clone();
    let notice = notice.clone();
    Callback::from(move |event: Event| {
      tracing::debug!(
        ?event,
        "ui event"
      );
      let outcome = controller
        .borrow_mut()
        .handle(event);
      notice.set(outcome.notice.clone());

      match outcome.refresh {
        | Refresh::None => {}
        | Refresh::Count => {
          let controller =
            controller.borrow();
          if let Some(list) = controller
            .state()
            .selected_list()
          {
            let mut next: View =
              (*view).clone();
            patch_count(&mut next, list);
            view.set(next);
          }
        }
        | Refresh::Full => {
          view.set(
            controller.borrow().view()
          );
        }
      }
    })
  };

  let on_select = {
    let dispatch = dispatch.clone();
    Callback::from(move |id: String| {
      dispatch.emit(Event::SelectList(id));
    })
  };

  let on_create_list = {
    let dispatch = dispatch.clone();
    Callback::from(
      move |name: String| {
        dispatch.emit(
          Event::CreateList { name }
        );
      }
    )
  };

  let on_toggle = {
    let dispatch = dispatch.clone();
    Callback::from(move |id: String| {
      dispatch.emit(Event::ToggleTask(id));
    })
  };

  let on_create_task = {
    let dispatch = dispatch.clone();
    Callback::from(
      move |(name, date): (
        String,
        String
      )| {
        dispatch.emit(
          Event::CreateTask { name, date }
        );
      }
    )
  };

  let on_clear_completed = {
    let dispatch = dispatch.clone();
    Callback::from(move |_: MouseEvent| {
      dispatch.emit(Event::ClearCompleted);
    })
  };

  let on_delete_list = {
    let dispatch = dispatch.clone();
    Callback::from(move |_: MouseEvent| {
      dispatch.emit(Event::DeleteList);
    })
  };

  let on_dismiss = {
    let notice = notice.clone();
    Callback::from(move |_: MouseEvent| {
      notice.set(None);
    })
  };

  html! {
      <>
          <NoticeBanner notice={(*notice).clone()} on_dismiss={on_dismiss} />
          <div class="layout">
              <ListSidebar
                  rows={view.sidebar.clone()}
                  on_select={on_select}
                  on_create_list={on_create_list}
              />
              {
                  match view.detail.clone() {
                      Some(detail) => html! {
                          <ListDetail
                              detail={detail}
                              on_toggle={on_toggle}
                              on_create_task={on_create_task}
                              on_clear_completed={on_clear_completed}
                              on_delete_list={on_delete_list}
                          />
                      },
                      None => html! {},
                  }
              }
          </div>
      </>
  }
}
