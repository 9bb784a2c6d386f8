use serde::{Deserialize, Serialize};

/// A customer that projects are done for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub id: String,
    pub name: String,
}

/// The stored shape of a client: everything except the backend-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClient {
    pub name: String,
}

impl NewClient {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn with_id(self, id: impl Into<String>) -> Client {
        Client {
            id: id.into(),
            name: self.name,
        }
    }
}

/// Field-level update for a client. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClientPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ClientPatch {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }

    pub fn apply_to(&self, client: &mut Client) {
        if let Some(ref name) = self.name {
            client.name = name.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_patch_leaves_client_alone() {
        let mut client = NewClient::new("Acme").with_id("c1");
        let patch = ClientPatch::default();
        assert!(patch.is_empty());
        patch.apply_to(&mut client);
        assert_eq!(client.name, "Acme");
        assert_eq!(client.id, "c1");
    }

    #[test]
    fn rename_patch_serializes_only_name() {
        let value = serde_json::to_value(ClientPatch::rename("Acme Corp")).unwrap();
        assert_eq!(value, serde_json::json!({ "name": "Acme Corp" }));

        let value = serde_json::to_value(ClientPatch::default()).unwrap();
        assert_eq!(value, serde_json::json!({}));
    }
}
