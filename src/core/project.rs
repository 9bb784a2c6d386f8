use serde::{Deserialize, Serialize};

/// A piece of work for one client.
///
/// `client_id` is not enforced: if the client disappears the project simply
/// no longer resolves to a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub client_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub client_id: String,
    pub name: String,
}

impl NewProject {
    pub fn new(client_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            name: name.into(),
        }
    }

    pub fn with_id(self, id: impl Into<String>) -> Project {
        Project {
            id: id.into(),
            client_id: self.client_id,
            name: self.name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ProjectPatch {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.client_id.is_none() && self.name.is_none()
    }

    pub fn apply_to(&self, project: &mut Project) {
        if let Some(ref client_id) = self.client_id {
            project.client_id = client_id.clone();
        }
        if let Some(ref name) = self.name {
            project.name = name.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_fields_use_camel_case() {
        let value = serde_json::to_value(NewProject::new("c1", "Website")).unwrap();
        assert_eq!(value, serde_json::json!({ "clientId": "c1", "name": "Website" }));
    }

    #[test]
    fn rename_keeps_client() {
        let mut project = NewProject::new("c1", "Website").with_id("p1");
        ProjectPatch::rename("Storefront").apply_to(&mut project);
        assert_eq!(project.name, "Storefront");
        assert_eq!(project.client_id, "c1");
    }
}
