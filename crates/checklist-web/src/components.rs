mod list_detail;
mod list_sidebar;
mod new_list_form;
mod new_task_form;
mod notice_banner;
mod task_row;

pub use list_detail::ListDetail;
pub use list_sidebar::ListSidebar;
pub use new_list_form::NewListForm;
pub use new_task_form::NewTaskForm;
pub use notice_banner::NoticeBanner;
pub use task_row::TaskRowItem;
