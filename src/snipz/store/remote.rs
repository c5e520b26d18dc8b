use super::SnippetGateway;
use crate::error::{Result, SnipzError};
use crate::model::{sort_by_recency, Snippet, SnippetPayload};
use async_trait::async_trait;
use reqwest::{Client, Response, Url};

/// Remote backend: every operation is exactly one HTTP request.
///
/// | op     | request                  |
/// |--------|--------------------------|
/// | list   | `GET    {base}/snippets`      |
/// | create | `POST   {base}/snippets`      |
/// | update | `PUT    {base}/snippets/{id}` |
/// | delete | `DELETE {base}/snippets/{id}` |
///
/// No timeout and no retries: a hung server hangs the operation.
pub struct RemoteStore {
    client: Client,
    base_url: Url,
}

impl RemoteStore {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|e| SnipzError::Config(format!("Invalid API base '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(SnipzError::Config(format!(
                "Invalid API base '{}': cannot be a base URL",
                base_url
            )));
        }
        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/snippets`, or `{base}/snippets/{id}` with the id percent-encoded.
    pub fn endpoint(&self, id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("snippets");
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }
}

/// Turns any non-2xx response into a transport failure.
fn ensure_success(response: Response, op: &str) -> Result<Response> {
    let status = response.status();
    if !status.is_success() {
        tracing::debug!(%status, url = %response.url(), op, "remote request failed");
        return Err(SnipzError::Transport(format!(
            "Failed {}: server responded with {}",
            op, status
        )));
    }
    Ok(response)
}

#[async_trait]
impl SnippetGateway for RemoteStore {
    async fn list(&self) -> Result<Vec<Snippet>> {
        let url = self.endpoint(None);
        tracing::debug!(%url, "GET");
        let response = ensure_success(self.client.get(url).send().await?, "list")?;
        let mut snippets: Vec<Snippet> = response.json().await?;
        sort_by_recency(&mut snippets);
        Ok(snippets)
    }

    async fn create(&self, payload: SnippetPayload) -> Result<Snippet> {
        let url = self.endpoint(None);
        tracing::debug!(%url, "POST");
        let response = self.client.post(url).json(&payload).send().await?;
        let response = ensure_success(response, "create")?;
        Ok(response.json().await?)
    }

    async fn update(&self, id: &str, payload: SnippetPayload) -> Result<Snippet> {
        let url = self.endpoint(Some(id));
        tracing::debug!(%url, "PUT");
        let response = self.client.put(url).json(&payload).send().await?;
        let response = ensure_success(response, "update")?;
        Ok(response.json().await?)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let url = self.endpoint(Some(id));
        tracing::debug!(%url, "DELETE");
        ensure_success(self.client.delete(url).send().await?, "delete")?;
        Ok(true)
    }
}
