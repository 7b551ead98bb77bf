use checklist_core::controller::{
  Notice,
  NoticeLevel
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct NoticeBannerProps {
  pub notice:     Option<Notice>,
  pub on_dismiss: Callback<MouseEvent>
}

#[function_component(NoticeBanner)]
pub fn notice_banner(
  props: &NoticeBannerProps
) -> Html {
  let Some(notice) = &props.notice
  else {
    return html! {};
  };

  let class = match notice.level {
    | NoticeLevel::Warning => {
      "notice warning"
    }
    | NoticeLevel::Error => {
      "notice error"
    }
  };

  html! {
      <div class={class} role="alert">
          <span>{ &notice.message }</span>
          <button class="btn" onclick={props.on_dismiss.clone()}>{ "Dismiss" }</button>
      </div>
  }
}
