mod error_message;
mod filter_bar;
mod header;
mod loading_spinner;
mod task_form;
mod task_item;
mod task_list;

pub use error_message::ErrorMessage;
pub use filter_bar::FilterBar;
pub use header::Header;
pub use loading_spinner::LoadingSpinner;
pub use task_form::TaskForm;
pub use task_item::TaskItem;
pub use task_list::TaskList;
