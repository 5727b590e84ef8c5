//! # Document endpoints
//!
//! Template catalog, submission for approval and preview, all issued through
//! the [`Gateway`] so they share token handling and the 401 path.
//!
//! The catalog uses [`Gateway::request`] and reports failures through the
//! page's shared error display. Submission and preview use [`Gateway::send`]
//! and return their failures, because each has its own error area in the UI.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use store::KeyValueStore;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::gateway::Gateway;
use crate::models::{SubmitResponse, Template};
use crate::page::Page;
use crate::sanitize::strip_markup;
use crate::transport::{HttpRequest, Transport};

pub const REFRESH_PATH: &str = "/api/users/token/refresh/";
pub const TEMPLATES_PATH: &str = "/api/documents/templates/";

/// Name of the multipart field carrying the requested output format.
pub const FORMAT_FIELD: &str = "format";

pub fn submit_path(template_id: u64) -> String {
    format!("{TEMPLATES_PATH}{template_id}/submit/")
}

pub fn preview_path(template_id: u64) -> String {
    format!("{TEMPLATES_PATH}{template_id}/preview/")
}

/// Where to go after a successful submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub redirect_url: String,
}

/// A rendered template, ready to be wrapped in a local URL.
#[derive(Clone, PartialEq, Eq)]
pub struct Preview {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Preview {
    /// Inline `data:` URL for platforms without `Blob` object URLs.
    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            STANDARD.encode(&self.bytes)
        )
    }
}

impl std::fmt::Debug for Preview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preview")
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl<T, S, P> Gateway<T, S, P>
where
    T: Transport,
    S: KeyValueStore,
    P: Page,
{
    /// Fetch the template catalog. `None` means the failure was already
    /// handled (redirect or shared error display).
    pub async fn list_templates(&self) -> Option<Vec<Template>> {
        let url = self.config().api_url(TEMPLATES_PATH);
        let templates: Vec<Template> = self.request(HttpRequest::get(url)).await?;
        info!(count = templates.len(), "Loaded templates");
        Some(templates)
    }

    /// Submit filled placeholder values for approval.
    ///
    /// `fields` are sent in order as multipart text parts, followed by
    /// `format`. The body is read as JSON whatever the status, so the server's
    /// `error` message can be surfaced.
    pub async fn submit_document(
        &self,
        template_id: u64,
        fields: Vec<(String, String)>,
        format: &str,
    ) -> Result<SubmitOutcome, ApiError> {
        let mut parts = fields;
        parts.push((FORMAT_FIELD.to_string(), format.to_string()));
        let url = self.config().api_url(&submit_path(template_id));

        let response = self.send(HttpRequest::post_multipart(url, parts)).await?;
        let parsed = response.json::<SubmitResponse>();

        if !response.is_success() {
            let message = parsed
                .ok()
                .and_then(|body| body.error)
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| format!("Submission failed with status: {}", response.status));
            warn!(template_id, status = response.status, "Submission rejected");
            return Err(ApiError::http_status(response.status, strip_markup(&message)));
        }

        let target = parsed?
            .redirect_url
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| self.config().routes.after_submit.clone());
        let redirect_url = self.config().page_url(&target);
        info!(template_id, "Document submitted for approval");
        Ok(SubmitOutcome { redirect_url })
    }

    /// Fetch the rendered preview of a template.
    pub async fn preview_template(&self, template_id: u64) -> Result<Preview, ApiError> {
        let url = self.config().api_url(&preview_path(template_id));
        let response = self.send(HttpRequest::get(url)).await?;

        if !response.is_success() {
            let text = strip_markup(&response.text());
            let message = match text.trim() {
                "" => "Preview failed".to_string(),
                trimmed => trimmed.to_string(),
            };
            warn!(template_id, status = response.status, "Preview failed");
            return Err(ApiError::http_status(response.status, message));
        }

        Ok(Preview {
            content_type: response
                .content_type
                .clone()
                .unwrap_or_else(|| "application/pdf".to_string()),
            bytes: response.body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fresh_token, FakePage, FakeTransport};
    use crate::transport::{Body, HttpResponse, Method};
    use store::{ClientConfig, MemoryStore, ACCESS_TOKEN_KEY};

    fn setup() -> (FakeTransport, FakePage, Gateway<FakeTransport, MemoryStore, FakePage>) {
        let access = fresh_token();
        let store = MemoryStore::with_entries([(ACCESS_TOKEN_KEY, access.as_str())]);
        let transport = FakeTransport::new();
        let page = FakePage::new().with_csrf("csrf");
        let gw = Gateway::new(
            transport.clone(),
            store,
            page.clone(),
            ClientConfig::default(),
        );
        (transport, page, gw)
    }

    #[test]
    fn test_paths() {
        assert_eq!(submit_path(7), "/api/documents/templates/7/submit/");
        assert_eq!(preview_path(12), "/api/documents/templates/12/preview/");
    }

    #[tokio::test]
    async fn test_list_templates() {
        let (transport, page, gw) = setup();
        transport.push_json(
            200,
            r#"[{"id":1,"name":"NDA","placeholders":[{"name":"party","type":"text"}]}]"#,
        );

        let templates = gw.list_templates().await.unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].name, "NDA");
        assert_eq!(transport.requests()[0].url, "/api/documents/templates/");
        assert!(page.errors().is_empty());
    }

    #[tokio::test]
    async fn test_list_templates_failure_uses_shared_error() {
        let (transport, page, gw) = setup();
        transport.push_json(503, "");

        assert!(gw.list_templates().await.is_none());
        assert_eq!(page.errors(), vec!["HTTP error! status: 503".to_string()]);
    }

    #[tokio::test]
    async fn test_submit_posts_multipart_with_format() {
        let (transport, _page, gw) = setup();
        transport.push_json(200, r#"{"redirect_url":"/documents/submissions/42/"}"#);

        let outcome = gw
            .submit_document(
                7,
                vec![
                    ("start_date".into(), "2025-01-01".into()),
                    ("client_name".into(), "Acme Co".into()),
                ],
                "pdf",
            )
            .await
            .unwrap();
        assert_eq!(outcome.redirect_url, "/documents/submissions/42/");

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let sent = &requests[0];
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.url, "/api/documents/templates/7/submit/");
        assert_eq!(
            sent.body,
            Body::Multipart(vec![
                ("start_date".into(), "2025-01-01".into()),
                ("client_name".into(), "Acme Co".into()),
                ("format".into(), "pdf".into()),
            ])
        );
        assert!(sent.header("Content-Type").is_none());
        assert_eq!(sent.header("X-CSRFToken"), Some("csrf"));
    }

    #[tokio::test]
    async fn test_submit_defaults_redirect() {
        let (transport, _page, gw) = setup();
        transport.push_json(201, r#"{"message":"ok"}"#);

        let outcome = gw.submit_document(1, Vec::new(), "docx").await.unwrap();
        assert_eq!(outcome.redirect_url, "/documents/my-documents/");
    }

    #[tokio::test]
    async fn test_submit_redirect_is_joined_onto_configured_host() {
        let store = MemoryStore::with_entries([(ACCESS_TOKEN_KEY, fresh_token().as_str())]);
        let transport = FakeTransport::new();
        let mut config = ClientConfig::default();
        config.api.base_url = "https://docs.example.com".into();
        let gw = Gateway::new(transport.clone(), store, FakePage::new(), config);

        transport.push_json(201, r#"{"redirect_url":"/documents/submissions/9/"}"#);
        transport.push_json(201, r#"{"message":"ok"}"#);

        let outcome = gw.submit_document(1, Vec::new(), "docx").await.unwrap();
        assert_eq!(outcome.redirect_url, "https://docs.example.com/documents/submissions/9/");
        let outcome = gw.submit_document(1, Vec::new(), "docx").await.unwrap();
        assert_eq!(outcome.redirect_url, "https://docs.example.com/documents/my-documents/");
        assert_eq!(
            transport.requests()[0].url,
            "https://docs.example.com/api/documents/templates/1/submit/"
        );
    }

    #[tokio::test]
    async fn test_submit_error_prefers_server_message() {
        let (transport, page, gw) = setup();
        transport.push_json(400, r#"{"error":"Missing value for client_name"}"#);
        transport.push_json(500, "<html>oops</html>");

        let err = gw.submit_document(1, Vec::new(), "docx").await.unwrap_err();
        assert_eq!(err.to_string(), "Missing value for client_name");
        assert_eq!(err.status(), Some(400));

        let err = gw.submit_document(1, Vec::new(), "docx").await.unwrap_err();
        assert_eq!(err.to_string(), "Submission failed with status: 500");

        // Submission owns its error surface
        assert!(page.errors().is_empty());
    }

    #[tokio::test]
    async fn test_submit_success_with_unreadable_body_is_decode_error() {
        let (transport, _page, gw) = setup();
        transport.push_json(200, "Created");

        let err = gw.submit_document(1, Vec::new(), "docx").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_preview_returns_bytes() {
        let (transport, _page, gw) = setup();
        transport.push(HttpResponse::new(200, b"%PDF-1.7".to_vec()).with_content_type("application/pdf"));

        let preview = gw.preview_template(3).await.unwrap();
        assert_eq!(preview.bytes, b"%PDF-1.7");
        assert_eq!(preview.content_type, "application/pdf");
        assert_eq!(preview.data_url(), "data:application/pdf;base64,JVBERi0xLjc=");
        assert_eq!(transport.requests()[0].url, "/api/documents/templates/3/preview/");
    }

    #[tokio::test]
    async fn test_preview_error_is_sanitized() {
        let (transport, _page, gw) = setup();
        transport.push(HttpResponse::new(500, "<h1>LibreOffice <i>conversion</i> failed</h1>"));
        transport.push(HttpResponse::new(404, "  "));

        let err = gw.preview_template(3).await.unwrap_err();
        assert_eq!(err.to_string(), "LibreOffice conversion failed");

        let err = gw.preview_template(3).await.unwrap_err();
        assert_eq!(err.to_string(), "Preview failed");
    }

    #[tokio::test]
    async fn test_preview_401_redirects() {
        let (transport, page, gw) = setup();
        transport.push(HttpResponse::new(401, ""));

        let err = gw.preview_template(3).await.unwrap_err();
        assert_eq!(err, ApiError::AuthRejected);
        assert_eq!(page.navigations(), vec!["/users/login-page/".to_string()]);
    }
}
