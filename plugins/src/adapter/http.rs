use async_trait::async_trait;
use loadplan_core::api::{AdapterError, ResourceAdapter, ResourceHandle};

use super::registry::AttachedRegistry;

const BODY_PREVIEW_LIMIT: usize = 512;

fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }

    let mut out = String::new();
    let mut truncated = false;
    for (idx, ch) in trimmed.chars().enumerate() {
        if idx >= BODY_PREVIEW_LIMIT {
            truncated = true;
            break;
        }
        out.push(ch);
    }

    if truncated {
        out.push_str("...");
    }

    out
}

fn describe_reqwest(err: &reqwest::Error) -> &'static str {
    if err.is_connect() {
        "connect"
    } else if err.is_request() {
        "request"
    } else if err.is_body() {
        "body"
    } else if err.is_decode() {
        "decode"
    } else {
        "unknown"
    }
}

/// Loads resources over HTTP(S).
///
/// Absolute `http://` / `https://` locators are fetched directly; anything
/// else is joined onto `base_url`.
pub struct HttpAdapter {
    base_url: Option<String>,
    api_key: String,
    http: reqwest::Client,
    attached: AttachedRegistry,
}

impl HttpAdapter {
    pub fn new(base_url: Option<String>, user_agent: &str, api_key: String) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            base_url: base_url.map(|b| b.trim_end_matches('/').to_string()),
            api_key,
            http,
            attached: AttachedRegistry::default(),
        })
    }

    pub fn resolve(&self, locator: &str) -> Result<String, AdapterError> {
        if locator.starts_with("http://") || locator.starts_with("https://") {
            return Ok(locator.to_string());
        }
        let Some(base) = self.base_url.as_deref() else {
            return Err(AdapterError::Rejected(format!(
                "{locator} is relative and no base_url is configured"
            )));
        };
        Ok(format!("{}/{}", base, locator.trim_start_matches('/')))
    }

    fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.api_key.trim().is_empty() {
            req
        } else {
            req.bearer_auth(&self.api_key)
        }
    }

    pub fn is_attached(&self, handle: &ResourceHandle) -> bool {
        self.attached.contains(&handle.id)
    }

    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }
}

#[async_trait]
impl ResourceAdapter for HttpAdapter {
    fn name(&self) -> &str {
        "http"
    }

    async fn attach(&self, locator: &str) -> Result<ResourceHandle, AdapterError> {
        let url = self.resolve(locator)?;
        tracing::debug!(target: "loadplan.adapter", adapter = "http", url = %url, "attach");

        let http_err = |err: reqwest::Error| AdapterError::Http {
            locator: locator.to_string(),
            status: err.status().map(|s| s.as_u16()),
            message: format!("{} error: {}", describe_reqwest(&err), err),
        };

        let resp = self.auth(self.http.get(&url)).send().await.map_err(http_err)?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AdapterError::Http {
                locator: locator.to_string(),
                status: Some(status.as_u16()),
                message: preview_body(&body),
            });
        }

        let body = resp.bytes().await.map_err(http_err)?;
        tracing::debug!(
            target: "loadplan.adapter",
            adapter = "http",
            url = %url,
            status = %status,
            bytes = body.len()
        );

        let handle = ResourceHandle::new(locator).with_size(body.len() as u64);
        self.attached.insert(handle.id, body);
        Ok(handle)
    }

    fn detach(&self, handle: ResourceHandle) {
        if self.attached.remove(&handle.id).is_none() {
            tracing::warn!(target: "loadplan.adapter", adapter = "http", locator = %handle.locator, "detach of unknown handle");
        }
    }
}
