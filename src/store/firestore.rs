use reqwest::{Client, Method, Response, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::{BackendError, Document, DocumentStore, Fields};

const PRODUCTION_HOST: &str = "https://firestore.googleapis.com";
const PAGE_SIZE: &str = "300";

/// A document as the REST API returns it.
#[derive(Debug, Deserialize)]
struct RawDocument {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

impl RawDocument {
    fn into_document(self) -> Document {
        Document {
            id: document_id(&self.name).to_string(),
            fields: decode_fields(&self.fields),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    documents: Vec<RawDocument>,
    next_page_token: Option<String>,
}

/// Cloud Firestore over its REST API.
#[derive(Clone)]
pub struct FirestoreStore {
    documents_url: String,
    api_key: Option<String>,
    emulator: bool,
    http: Client,
}

impl std::fmt::Debug for FirestoreStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirestoreStore")
            .field("documents_url", &self.documents_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("emulator", &self.emulator)
            .finish()
    }
}

impl FirestoreStore {
    pub fn new(project_id: &str, database: &str, api_key: Option<String>) -> Result<Self, BackendError> {
        Self::build(PRODUCTION_HOST, project_id, database, api_key, false)
    }

    /// Talk to a local Firestore emulator (`localhost:8080` style host).
    pub fn emulator(host: &str, project_id: &str, database: &str) -> Result<Self, BackendError> {
        let host = if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("http://{}", host)
        };
        Self::build(&host, project_id, database, None, true)
    }

    fn build(
        host: &str,
        project_id: &str,
        database: &str,
        api_key: Option<String>,
        emulator: bool,
    ) -> Result<Self, BackendError> {
        let http = Client::builder()
            .build()
            .map_err(|e| BackendError::Transport(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            documents_url: format!(
                "{}/v1/projects/{}/databases/{}/documents",
                host.trim_end_matches('/'),
                project_id,
                database
            ),
            api_key: api_key.filter(|k| !k.is_empty()),
            emulator,
            http,
        })
    }

    pub fn documents_url(&self) -> &str {
        &self.documents_url
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}", self.documents_url, collection)
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}/{}", self.documents_url, collection, id)
    }

    /// A call with credentials attached: `?key=` for production, the
    /// "owner" bearer token for the emulator (it skips security rules).
    fn call(&self, method: Method, url: String) -> Call {
        let mut query = Vec::new();
        if let Some(ref key) = self.api_key {
            query.push(("key".to_string(), key.clone()));
        }
        Call {
            method,
            url,
            query,
            bearer: self.emulator.then_some("owner"),
            body: None,
        }
    }

    fn create_call(&self, collection: &str, fields: &Fields) -> Call {
        self.call(Method::POST, self.collection_url(collection))
            .with_body(json!({ "fields": encode_fields(fields) }))
    }

    /// PATCH with one `updateMask.fieldPaths` per field and an existence
    /// precondition. With no fields an empty mask would replace the whole
    /// document, so the call degrades to a GET that only checks existence.
    fn update_call(&self, collection: &str, id: &str, fields: &Fields) -> Call {
        let url = self.document_url(collection, id);
        if fields.is_empty() {
            return self.call(Method::GET, url);
        }
        let mut call = self
            .call(Method::PATCH, url)
            .with_body(json!({ "fields": encode_fields(fields) }));
        for key in fields.keys() {
            call = call.with_query("updateMask.fieldPaths", key);
        }
        call.with_query("currentDocument.exists", "true")
    }

    /// Firestore reports success for deletes of missing documents, so the
    /// DELETE is preceded by a GET.
    fn delete_calls(&self, collection: &str, id: &str) -> [Call; 2] {
        let url = self.document_url(collection, id);
        [self.call(Method::GET, url.clone()), self.call(Method::DELETE, url)]
    }

    fn list_call(&self, collection: &str, page_token: Option<&str>) -> Call {
        let call = self
            .call(Method::GET, self.collection_url(collection))
            .with_query("pageSize", PAGE_SIZE);
        match page_token {
            Some(token) => call.with_query("pageToken", token),
            None => call,
        }
    }

    async fn send(&self, call: Call) -> Result<Response, BackendError> {
        let mut req = self.http.request(call.method, &call.url).query(&call.query);
        if let Some(token) = call.bearer {
            req = req.bearer_auth(token);
        }
        if let Some(ref body) = call.body {
            req = req.json(body);
        }
        Ok(req.send().await?)
    }
}

/// One REST request, fully described before it is sent.
#[derive(Debug, Clone, PartialEq)]
struct Call {
    method: Method,
    url: String,
    query: Vec<(String, String)>,
    bearer: Option<&'static str>,
    body: Option<Value>,
}

impl Call {
    fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Values of every `key` parameter, in order.
    #[cfg(test)]
    fn query_values(&self, key: &str) -> Vec<&str> {
        self.query
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

impl DocumentStore for FirestoreStore {
    async fn create(&self, collection: &str, fields: Fields) -> Result<String, BackendError> {
        let resp = self.send(self.create_call(collection, &fields)).await?;
        let resp = expect_success(resp, collection, None).await?;
        let created: RawDocument = resp
            .json()
            .await
            .map_err(|e| BackendError::Decode(format!("create response: {}", e)))?;
        Ok(document_id(&created.name).to_string())
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), BackendError> {
        let resp = self.send(self.update_call(collection, id, &fields)).await?;
        expect_success(resp, collection, Some(id)).await?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), BackendError> {
        for call in self.delete_calls(collection, id) {
            let resp = self.send(call).await?;
            expect_success(resp, collection, Some(id)).await?;
        }
        Ok(())
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, BackendError> {
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let call = self.list_call(collection, page_token.as_deref());
            let resp = expect_success(self.send(call).await?, collection, None).await?;
            let text = resp.text().await?;
            let page = parse_list_response(&text)?;

            documents.extend(page.documents.into_iter().map(RawDocument::into_document));

            match next_page_token(page.next_page_token) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        log::debug!("Listed {} documents from {}", documents.len(), collection);
        Ok(documents)
    }
}

/// The last page carries no token, or an empty one.
fn next_page_token(token: Option<String>) -> Option<String> {
    token.filter(|t| !t.is_empty())
}

async fn expect_success(
    resp: Response,
    collection: &str,
    id: Option<&str>,
) -> Result<Response, BackendError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    if status == StatusCode::NOT_FOUND {
        if let Some(id) = id {
            return Err(BackendError::not_found(collection, id));
        }
    }
    Err(BackendError::Status {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

fn parse_list_response(text: &str) -> Result<ListResponse, BackendError> {
    serde_json::from_str(text).map_err(|e| BackendError::Decode(format!("list response: {}", e)))
}

/// Pull `error.message` out of a Firestore error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    parsed
        .as_ref()
        .and_then(|v| {
            v.pointer("/error/message")
                .or_else(|| v.pointer("/0/error/message"))
        })
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| body.trim().to_string())
}

/// The trailing segment of `projects/.../documents/{collection}/{id}`.
fn document_id(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

/// Wrap plain JSON fields in Firestore's typed value envelope.
pub fn encode_fields(fields: &Fields) -> Value {
    Value::Object(
        fields
            .iter()
            .map(|(k, v)| (k.clone(), encode_value(v)))
            .collect(),
    )
}

fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n.as_f64().unwrap_or_default() }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

/// Unwrap Firestore typed values back into plain JSON.
pub fn decode_fields(fields: &Map<String, Value>) -> Fields {
    fields
        .iter()
        .map(|(k, v)| (k.clone(), decode_value(v)))
        .collect()
}

fn decode_value(value: &Value) -> Value {
    let Some((kind, inner)) = value.as_object().and_then(|o| o.iter().next()) else {
        return Value::Null;
    };
    match kind.as_str() {
        "stringValue" | "booleanValue" | "doubleValue" | "timestampValue" | "referenceValue"
        | "bytesValue" | "geoPointValue" => inner.clone(),
        "integerValue" => match inner {
            Value::String(s) => s.parse::<i64>().map(Value::from).unwrap_or(Value::Null),
            other => other.clone(),
        },
        "nullValue" => Value::Null,
        "arrayValue" => Value::Array(
            inner
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(decode_value).collect())
                .unwrap_or_default(),
        ),
        "mapValue" => Value::Object(
            inner
                .get("fields")
                .and_then(Value::as_object)
                .map(decode_fields)
                .unwrap_or_default(),
        ),
        other => {
            log::debug!("Unsupported Firestore value type: {}", other);
            Value::Null
        }
    }
}
