pub mod task;

pub use task::{
    NewTask, Task, TaskError, TaskFilter, TaskPatch, TaskPriority, TaskSort, TaskStatus,
    parse_due_date,
};
