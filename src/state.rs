//! The in-memory copy of the three collections and the only place that mutates it.
//!
//! Every mutation is two-phase: a request goes to the gateway, and only a
//! confirmed result is applied locally. A failed request leaves the
//! collections exactly as they were and hands the error back.
//!
//! UI runtimes that drive futures themselves use [`Tracker::request`] and feed
//! the outcome to [`Tracker::apply`]; everyone else awaits the intent handlers.

use std::collections::BTreeSet;
use std::future::Future;

use chrono::{Datelike, NaiveDate};

use crate::core::{Client, ClientPatch, NewClient, NewProject, NewTask, Project, ProjectPatch, Task, TaskPatch};
use crate::store::{AnyStore, BackendError, DocumentStore, Gateway};

/// Something the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    AddClient {
        name: String,
    },
    EditClient {
        id: String,
        name: String,
    },
    AddProject {
        client_id: String,
        name: String,
    },
    EditProject {
        id: String,
        name: String,
    },
    AddTask {
        project_id: String,
        name: String,
        completion_date: NaiveDate,
    },
    EditTask {
        id: String,
        name: String,
        completion_date: NaiveDate,
    },
}

impl Intent {
    /// Short description used in log lines.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::AddClient { .. } => "add client",
            Self::EditClient { .. } => "edit client",
            Self::AddProject { .. } => "add project",
            Self::EditProject { .. } => "edit project",
            Self::AddTask { .. } => "add task",
            Self::EditTask { .. } => "edit task",
        }
    }
}

/// A backend-confirmed change, ready to be applied to the collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Loaded {
        clients: Vec<Client>,
        projects: Vec<Project>,
        tasks: Vec<Task>,
    },
    ClientAdded(Client),
    ClientEdited {
        id: String,
        name: String,
    },
    ProjectAdded(Project),
    ProjectEdited {
        id: String,
        name: String,
    },
    TaskAdded(Task),
    TaskEdited {
        id: String,
        name: String,
        completion_date: NaiveDate,
    },
}

pub struct Tracker<S = AnyStore> {
    gateway: Gateway<S>,
    clients: Vec<Client>,
    projects: Vec<Project>,
    tasks: Vec<Task>,
}

impl<S: DocumentStore + 'static> Tracker<S> {
    /// A tracker with empty collections; call [`Tracker::load`] to fill them.
    pub fn new(gateway: Gateway<S>) -> Self {
        Self {
            gateway,
            clients: Vec::new(),
            projects: Vec::new(),
            tasks: Vec::new(),
        }
    }

    pub fn gateway(&self) -> &Gateway<S> {
        &self.gateway
    }

    // --- Queries ---

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn client(&self, id: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Tasks falling on `date`, in collection order.
    pub fn tasks_for_date(&self, date: NaiveDate) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.is_due_on(date)).collect()
    }

    /// Days of `month` (any date inside it) that have at least one task.
    pub fn busy_days(&self, month: NaiveDate) -> BTreeSet<NaiveDate> {
        self.tasks
            .iter()
            .map(|t| t.completion_date)
            .filter(|d| d.year() == month.year() && d.month() == month.month())
            .collect()
    }

    // --- Two-phase API ---

    /// Fetch all three collections. Independent, so they are listed concurrently.
    pub fn request_load(&self) -> impl Future<Output = Result<Change, BackendError>> + Send + 'static {
        let gateway = self.gateway.clone();
        async move {
            let (clients, projects, tasks) = futures::try_join!(
                gateway.list_clients(),
                gateway.list_projects(),
                gateway.list_tasks(),
            )
            .inspect_err(|e| log::error!("Error fetching data: {}", e))?;
            Ok(Change::Loaded {
                clients,
                projects,
                tasks,
            })
        }
    }

    /// Issue the backend call for `intent` without touching local state.
    pub fn request(&self, intent: Intent) -> impl Future<Output = Result<Change, BackendError>> + Send + 'static {
        let gateway = self.gateway.clone();
        async move {
            let what = intent.describe();
            let result = match intent {
                Intent::AddClient { name } => gateway
                    .create_client(NewClient::new(name))
                    .await
                    .map(Change::ClientAdded),
                Intent::EditClient { id, name } => gateway
                    .update_client(&id, &ClientPatch::rename(name.clone()))
                    .await
                    .map(|()| Change::ClientEdited { id, name }),
                Intent::AddProject { client_id, name } => gateway
                    .create_project(NewProject::new(client_id, name))
                    .await
                    .map(Change::ProjectAdded),
                Intent::EditProject { id, name } => gateway
                    .update_project(&id, &ProjectPatch::rename(name.clone()))
                    .await
                    .map(|()| Change::ProjectEdited { id, name }),
                Intent::AddTask {
                    project_id,
                    name,
                    completion_date,
                } => gateway
                    .create_task(NewTask::new(project_id, name, completion_date))
                    .await
                    .map(Change::TaskAdded),
                Intent::EditTask {
                    id,
                    name,
                    completion_date,
                } => {
                    let patch = TaskPatch {
                        name: Some(name.clone()),
                        completion_date: Some(completion_date),
                        ..Default::default()
                    };
                    gateway.update_task(&id, &patch).await.map(|()| Change::TaskEdited {
                        id,
                        name,
                        completion_date,
                    })
                }
            };
            result.inspect_err(|e| log::error!("Failed to {}: {}", what, e))
        }
    }

    /// Apply a confirmed change. Edits for ids that are not loaded are ignored.
    pub fn apply(&mut self, change: Change) {
        match change {
            Change::Loaded {
                clients,
                projects,
                tasks,
            } => {
                log::info!(
                    "Loaded {} clients, {} projects, {} tasks",
                    clients.len(),
                    projects.len(),
                    tasks.len()
                );
                self.clients = clients;
                self.projects = projects;
                self.tasks = tasks;
            }
            Change::ClientAdded(client) => {
                // A reload that finished first may already hold it
                if self.clients.iter().any(|x| x.id == client.id) {
                    log::debug!("Added client {} is already loaded", client.id);
                } else {
                    self.clients.push(client);
                }
            }
            Change::ClientEdited { id, name } => {
                match self.clients.iter_mut().find(|c| c.id == id) {
                    Some(client) => ClientPatch::rename(name).apply_to(client),
                    None => log::debug!("Edited client {} is not loaded", id),
                }
            }
            Change::ProjectAdded(project) => {
                // A reload that finished first may already hold it
                if self.projects.iter().any(|x| x.id == project.id) {
                    log::debug!("Added project {} is already loaded", project.id);
                } else {
                    self.projects.push(project);
                }
            }
            Change::ProjectEdited { id, name } => {
                match self.projects.iter_mut().find(|p| p.id == id) {
                    Some(project) => ProjectPatch::rename(name).apply_to(project),
                    None => log::debug!("Edited project {} is not loaded", id),
                }
            }
            Change::TaskAdded(task) => {
                // A reload that finished first may already hold it
                if self.tasks.iter().any(|x| x.id == task.id) {
                    log::debug!("Added task {} is already loaded", task.id);
                } else {
                    self.tasks.push(task);
                }
            }
            Change::TaskEdited {
                id,
                name,
                completion_date,
            } => match self.tasks.iter_mut().find(|t| t.id == id) {
                Some(task) => TaskPatch {
                    name: Some(name),
                    completion_date: Some(completion_date),
                    ..Default::default()
                }
                .apply_to(task),
                None => log::debug!("Edited task {} is not loaded", id),
            },
        }
    }

    // --- Awaitable handlers ---

    /// Replace all three collections with the backend's contents.
    pub async fn load(&mut self) -> Result<(), BackendError> {
        let change = self.request_load().await?;
        self.apply(change);
        Ok(())
    }

    pub async fn handle(&mut self, intent: Intent) -> Result<(), BackendError> {
        let change = self.request(intent).await?;
        self.apply(change);
        Ok(())
    }

    pub async fn add_client(&mut self, name: impl Into<String>) -> Result<(), BackendError> {
        self.handle(Intent::AddClient { name: name.into() }).await
    }

    pub async fn edit_client(&mut self, id: impl Into<String>, name: impl Into<String>) -> Result<(), BackendError> {
        self.handle(Intent::EditClient {
            id: id.into(),
            name: name.into(),
        })
        .await
    }

    pub async fn add_project(
        &mut self,
        client_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<(), BackendError> {
        self.handle(Intent::AddProject {
            client_id: client_id.into(),
            name: name.into(),
        })
        .await
    }

    pub async fn edit_project(&mut self, id: impl Into<String>, name: impl Into<String>) -> Result<(), BackendError> {
        self.handle(Intent::EditProject {
            id: id.into(),
            name: name.into(),
        })
        .await
    }

    pub async fn add_task(
        &mut self,
        project_id: impl Into<String>,
        name: impl Into<String>,
        completion_date: NaiveDate,
    ) -> Result<(), BackendError> {
        self.handle(Intent::AddTask {
            project_id: project_id.into(),
            name: name.into(),
            completion_date,
        })
        .await
    }

    pub async fn edit_task(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        completion_date: NaiveDate,
    ) -> Result<(), BackendError> {
        self.handle(Intent::EditTask {
            id: id.into(),
            name: name.into(),
            completion_date,
        })
        .await
    }
}
