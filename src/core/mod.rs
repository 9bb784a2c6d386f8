pub mod client;
pub mod date;
pub mod project;
pub mod task;

pub use client::{Client, ClientPatch, NewClient};
pub use project::{NewProject, Project, ProjectPatch};
pub use task::{NewTask, Task, TaskPatch};
