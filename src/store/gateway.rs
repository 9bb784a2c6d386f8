//! Typed create/update/delete/list per entity, on top of a [`DocumentStore`].
//!
//! Every failure is logged here with the operation that failed and then handed
//! back to the caller unchanged.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{AnyStore, BackendError, CLIENTS, DocumentStore, Fields, PROJECTS, TASKS};
use crate::core::{Client, ClientPatch, NewClient, NewProject, NewTask, Project, ProjectPatch, Task, TaskPatch};

/// Entity-shaped access to the three collections.
///
/// Cloning is cheap: clones share the same backend.
#[derive(Debug)]
pub struct Gateway<S = AnyStore> {
    store: Arc<S>,
}

impl<S> Clone for Gateway<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: DocumentStore> Gateway<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn from_shared(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // --- Clients ---

    pub async fn create_client(&self, client: NewClient) -> Result<Client, BackendError> {
        let id = self.create(CLIENTS, "client", &client).await?;
        Ok(client.with_id(id))
    }

    pub async fn update_client(&self, id: &str, patch: &ClientPatch) -> Result<(), BackendError> {
        self.update(CLIENTS, "client", id, patch).await
    }

    pub async fn delete_client(&self, id: &str) -> Result<(), BackendError> {
        self.delete(CLIENTS, "client", id).await
    }

    pub async fn list_clients(&self) -> Result<Vec<Client>, BackendError> {
        let docs = self.list::<NewClient>(CLIENTS, "clients").await?;
        Ok(docs.into_iter().map(|(id, c)| c.with_id(id)).collect())
    }

    // --- Projects ---

    pub async fn create_project(&self, project: NewProject) -> Result<Project, BackendError> {
        let id = self.create(PROJECTS, "project", &project).await?;
        Ok(project.with_id(id))
    }

    pub async fn update_project(&self, id: &str, patch: &ProjectPatch) -> Result<(), BackendError> {
        self.update(PROJECTS, "project", id, patch).await
    }

    pub async fn delete_project(&self, id: &str) -> Result<(), BackendError> {
        self.delete(PROJECTS, "project", id).await
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, BackendError> {
        let docs = self.list::<NewProject>(PROJECTS, "projects").await?;
        Ok(docs.into_iter().map(|(id, p)| p.with_id(id)).collect())
    }

    // --- Tasks ---

    pub async fn create_task(&self, task: NewTask) -> Result<Task, BackendError> {
        let id = self.create(TASKS, "task", &task).await?;
        Ok(task.with_id(id))
    }

    pub async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<(), BackendError> {
        self.update(TASKS, "task", id, patch).await
    }

    pub async fn delete_task(&self, id: &str) -> Result<(), BackendError> {
        self.delete(TASKS, "task", id).await
    }

    pub async fn list_tasks(&self) -> Result<Vec<Task>, BackendError> {
        let docs = self.list::<NewTask>(TASKS, "tasks").await?;
        Ok(docs.into_iter().map(|(id, t)| t.with_id(id)).collect())
    }

    // --- Shared plumbing ---

    async fn create<T: Serialize>(
        &self,
        collection: &str,
        what: &str,
        value: &T,
    ) -> Result<String, BackendError> {
        let result = match to_fields(value) {
            Ok(fields) => self.store.create(collection, fields).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(id) => {
                log::debug!("Added {} {}", what, id);
                Ok(id)
            }
            Err(e) => {
                log::error!("Error adding {}: {}", what, e);
                Err(e)
            }
        }
    }

    async fn update<T: Serialize>(
        &self,
        collection: &str,
        what: &str,
        id: &str,
        patch: &T,
    ) -> Result<(), BackendError> {
        let result = match to_fields(patch) {
            Ok(fields) => self.store.update(collection, id, fields).await,
            Err(e) => Err(e),
        };
        result.inspect_err(|e| log::error!("Error updating {} {}: {}", what, id, e))
    }

    async fn delete(&self, collection: &str, what: &str, id: &str) -> Result<(), BackendError> {
        self.store
            .delete(collection, id)
            .await
            .inspect_err(|e| log::error!("Error deleting {} {}: {}", what, id, e))
    }

    /// List a collection and decode each document, skipping the ones that don't fit `T`.
    async fn list<T: DeserializeOwned>(
        &self,
        collection: &str,
        what: &str,
    ) -> Result<Vec<(String, T)>, BackendError> {
        let documents = self
            .store
            .list(collection)
            .await
            .inspect_err(|e| log::error!("Error getting {}: {}", what, e))?;

        let mut decoded = Vec::with_capacity(documents.len());
        for doc in documents {
            match serde_json::from_value::<T>(Value::Object(doc.fields)) {
                Ok(value) => decoded.push((doc.id, value)),
                Err(e) => log::warn!("Skipping malformed {}/{}: {}", collection, doc.id, e),
            }
        }
        Ok(decoded)
    }
}

fn to_fields<T: Serialize>(value: &T) -> Result<Fields, BackendError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(other) => Err(BackendError::Decode(format!("expected an object, got {}", other))),
        Err(e) => Err(BackendError::Decode(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Document, IdStrategy, MemoryStore};
    use chrono::NaiveDate;
    use serde_json::json;

    fn gateway() -> Gateway<MemoryStore> {
        Gateway::new(MemoryStore::with_ids(IdStrategy::Sequential))
    }

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[tokio::test]
    async fn created_client_is_listed() {
        let gw = gateway();
        let acme = gw.create_client(NewClient::new("Acme")).await.unwrap();
        assert_eq!(acme.id, "c1");

        let clients = gw.list_clients().await.unwrap();
        assert_eq!(
            clients,
            vec![Client {
                id: "c1".into(),
                name: "Acme".into()
            }]
        );
    }

    #[tokio::test]
    async fn project_references_its_client() {
        let gw = gateway();
        let acme = gw.create_client(NewClient::new("Acme")).await.unwrap();
        let website = gw
            .create_project(NewProject::new(&acme.id, "Website"))
            .await
            .unwrap();
        assert_eq!(website.id, "p1");

        let projects = gw.list_projects().await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].client_id, "c1");
        assert_eq!(projects[0].name, "Website");
    }

    #[tokio::test]
    async fn task_date_is_stored_as_iso_and_read_back() {
        let gw = gateway();
        gw.create_task(NewTask::new("p1", "Design mockup", march(15)))
            .await
            .unwrap();

        let raw = gw.store().list(TASKS).await.unwrap();
        assert_eq!(raw[0].fields["completionDate"], "2024-03-15T00:00:00.000Z");

        let tasks = gw.list_tasks().await.unwrap();
        assert_eq!(tasks[0].completion_date, march(15));
        assert_eq!(tasks[0].project_id, "p1");
    }

    #[tokio::test]
    async fn rename_touches_only_that_client() {
        let gw = gateway();
        gw.create_client(NewClient::new("Acme")).await.unwrap();
        gw.create_client(NewClient::new("Globex")).await.unwrap();

        gw.update_client("c1", &ClientPatch::rename("Acme Corp"))
            .await
            .unwrap();

        let names: Vec<String> = gw
            .list_clients()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Acme Corp", "Globex"]);
    }

    #[tokio::test]
    async fn partial_task_update_keeps_other_fields() {
        let gw = gateway();
        let task = gw
            .create_task(NewTask::new("p1", "Design mockup", march(15)))
            .await
            .unwrap();

        let patch = TaskPatch {
            completion_date: Some(march(20)),
            ..Default::default()
        };
        gw.update_task(&task.id, &patch).await.unwrap();

        let stored = &gw.list_tasks().await.unwrap()[0];
        assert_eq!(stored.name, "Design mockup");
        assert_eq!(stored.project_id, "p1");
        assert_eq!(stored.completion_date, march(20));
    }

    #[tokio::test]
    async fn empty_update_changes_nothing() {
        let gw = gateway();
        let project = gw
            .create_project(NewProject::new("c1", "Website"))
            .await
            .unwrap();
        let before = gw.list_projects().await.unwrap();

        gw.update_project(&project.id, &ProjectPatch::default())
            .await
            .unwrap();
        assert_eq!(gw.list_projects().await.unwrap(), before);
    }

    #[tokio::test]
    async fn updating_a_missing_document_fails() {
        let gw = gateway();
        let err = gw
            .update_client("ghost", &ClientPatch::rename("Nobody"))
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_removes_the_document() {
        let gw = gateway();
        gw.create_client(NewClient::new("Acme")).await.unwrap();
        gw.create_client(NewClient::new("Globex")).await.unwrap();

        gw.delete_client("c1").await.unwrap();
        let clients = gw.list_clients().await.unwrap();
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].id, "c2");

        assert!(gw.delete_client("c1").await.is_err());
    }

    #[tokio::test]
    async fn malformed_documents_are_skipped() {
        let gw = gateway();
        gw.create_task(NewTask::new("p1", "Good", march(15)))
            .await
            .unwrap();
        gw.store()
            .insert(
                TASKS,
                Document {
                    id: "broken".into(),
                    fields: json!({ "name": "No date", "projectId": "p1" })
                        .as_object()
                        .cloned()
                        .unwrap(),
                },
            )
            .await;
        gw.store()
            .insert(
                TASKS,
                Document {
                    id: "bad-date".into(),
                    fields: json!({ "name": "Bad", "projectId": "p1", "completionDate": "soon" })
                        .as_object()
                        .cloned()
                        .unwrap(),
                },
            )
            .await;

        let tasks = gw.list_tasks().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "Good");
    }

    #[tokio::test]
    async fn backend_failures_are_returned() {
        let gw = gateway();
        gw.store().set_offline(true);
        assert_eq!(
            gw.create_client(NewClient::new("Acme")).await.unwrap_err(),
            BackendError::Unavailable
        );
        assert_eq!(gw.list_tasks().await.unwrap_err(), BackendError::Unavailable);
        assert_eq!(gw.delete_task("t1").await.unwrap_err(), BackendError::Unavailable);
    }

    #[tokio::test]
    async fn clones_share_the_backend() {
        let gw = gateway();
        let other = gw.clone();
        other.create_client(NewClient::new("Acme")).await.unwrap();
        assert_eq!(gw.list_clients().await.unwrap().len(), 1);
    }
}
