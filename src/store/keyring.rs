use std::collections::HashMap;

use super::BackendError;

const SERVICE_NAME: &str = "docket-firestore";

fn attributes(project_id: &str) -> HashMap<&str, &str> {
    let mut attrs = HashMap::new();
    attrs.insert("service", SERVICE_NAME);
    attrs.insert("project", project_id);
    attrs
}

async fn open() -> Result<oo7::Keyring, BackendError> {
    oo7::Keyring::new()
        .await
        .map_err(|e| BackendError::Credentials(format!("Failed to connect to keyring: {}", e)))
}

/// Store the Firestore API key for a project in the system keyring via Secret Service.
pub async fn store_api_key(project_id: &str, api_key: &str) -> Result<(), BackendError> {
    let keyring = open().await?;
    keyring
        .create_item(
            &format!("Docket Firestore ({})", project_id),
            &attributes(project_id),
            api_key.as_bytes(),
            true, // replace existing
        )
        .await
        .map_err(|e| BackendError::Credentials(format!("Failed to store API key: {}", e)))?;
    Ok(())
}

/// Load the Firestore API key for a project, if one was stored.
pub async fn load_api_key(project_id: &str) -> Result<Option<String>, BackendError> {
    let keyring = open().await?;
    let items = keyring
        .search_items(&attributes(project_id))
        .await
        .map_err(|e| BackendError::Credentials(format!("Failed to search keyring: {}", e)))?;

    if let Some(item) = items.first() {
        let secret_bytes = item
            .secret()
            .await
            .map_err(|e| BackendError::Credentials(format!("Failed to read secret: {}", e)))?;
        let key = String::from_utf8(secret_bytes.to_vec())
            .map_err(|e| BackendError::Credentials(format!("Invalid UTF-8 in secret: {}", e)))?;
        return Ok(Some(key));
    }

    Ok(None)
}

pub async fn delete_api_key(project_id: &str) -> Result<(), BackendError> {
    let keyring = open().await?;
    let items = keyring
        .search_items(&attributes(project_id))
        .await
        .map_err(|e| BackendError::Credentials(format!("Failed to search keyring: {}", e)))?;

    for item in items {
        item.delete()
            .await
            .map_err(|e| BackendError::Credentials(format!("Failed to delete API key: {}", e)))?;
    }

    Ok(())
}
