//! Server-rendered form: one URL input, one button, one report.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use pulldown_cmark::{Options, Parser, html};
use tracing::warn;

use crate::{
    app_state::{AppState, MISSING_API_KEY_MESSAGE},
    audit::{dtos::AuditForm, handlers::status_for, service::AuditError},
};

const STYLES: &str = r#"
h1 a, h2 a, h3 a { display: none; }
body { background-color: #f4f6f9; font-family: 'Arial', sans-serif; margin: 0; }
main { max-width: 720px; margin: 0 auto; padding: 48px 16px; }
.subtitle { color: #444; margin-top: -8px; }
.banner { border-radius: 4px; padding: 12px 16px; margin: 16px 0; }
.banner.info { background: #e7f0fb; color: #0b3d75; }
.banner.warning { background: #fff6e0; color: #7a5200; }
.banner.error { background: #fdecea; color: #8a1c1c; }
.banner.success { background: #e8f5e9; color: #1b5e20; }
label { display: block; font-weight: 600; margin-bottom: 6px; }
input[type=url], input[type=text] { width: 100%; box-sizing: border-box; padding: 10px; border: 1px solid #ccc; border-radius: 4px; }
button { background-color: #0056b3; color: white; border: none; border-radius: 4px; padding: 12px 24px; font-weight: 600; width: 100%; margin-top: 12px; transition: all 0.3s ease; cursor: pointer; }
button:hover { background-color: #004494; box-shadow: 0 4px 6px rgba(0,0,0,0.1); }
button:disabled { background-color: #9aa7b5; cursor: not-allowed; }
.report h3 { color: #d32f2f; padding-bottom: 10px; border-bottom: 2px solid #e0e0e0; }
.report .body { background: white; padding: 16px; border-radius: 4px; }
.report table { border-collapse: collapse; }
.report td, .report th { border: 1px solid #e0e0e0; padding: 4px 8px; }
"#;

const INTRO: &str = "Paste the EXACT link to the sustainability page.";

enum Banner {
    Info(String),
    Warning(String),
    Error(String),
    Success(String),
}

impl Banner {
    fn render(&self) -> String {
        let (class, text) = match self {
            Banner::Info(text) => ("info", text),
            Banner::Warning(text) => ("warning", text),
            Banner::Error(text) => ("error", text),
            Banner::Success(text) => ("success", text),
        };
        format!(
            r#"<div class="banner {class}" role="status">{}</div>"#,
            ammonia::clean_text(text)
        )
    }
}

/// Model output is Markdown; render it and keep only safe HTML.
fn render_report(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut rendered = String::new();
    html::push_html(&mut rendered, Parser::new_ext(markdown, options));
    ammonia::clean(&rendered)
}

struct PageView<'a> {
    url: &'a str,
    enabled: bool,
    banners: Vec<Banner>,
    report: Option<&'a str>,
}

impl PageView<'_> {
    fn render(&self) -> String {
        let banners: String = self.banners.iter().map(Banner::render).collect();
        let report = self
            .report
            .map(|text| {
                format!(
                    r#"<section class="report"><h3>Compliance Report</h3><div class="body">{}</div></section>"#,
                    render_report(text)
                )
            })
            .unwrap_or_default();
        let disabled = if self.enabled { "" } else { " disabled" };
        let intro = Banner::Info(INTRO.to_string()).render();

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>ZeroWash.ai</title>
<style>{STYLES}</style>
</head>
<body>
<main>
<h1>ZeroWash.ai</h1>
<p class="subtitle">Automated Compliance for the 2026 Green Claims Directive</p>
{intro}
<form method="post" action="/audit">
<label for="url">Target URL (e.g., https://www.hm.com/sustainability)</label>
<input id="url" name="url" type="text" value="{url}">
<button type="submit"{disabled}>Audit Website</button>
</form>
{banners}
{report}
</main>
</body>
</html>
"#,
            url = ammonia::clean_text(self.url),
        )
    }
}

fn missing_key_banner(enabled: bool) -> Vec<Banner> {
    if enabled {
        Vec::new()
    } else {
        vec![Banner::Error(MISSING_API_KEY_MESSAGE.to_string())]
    }
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let enabled = state.auditor.is_some();
    Html(
        PageView {
            url: "",
            enabled,
            banners: missing_key_banner(enabled),
            report: None,
        }
        .render(),
    )
}

pub async fn audit_page(State(state): State<AppState>, Form(form): Form<AuditForm>) -> Response {
    let enabled = state.auditor.is_some();
    let mut view = PageView {
        url: &form.url,
        enabled,
        banners: missing_key_banner(enabled),
        report: None,
    };

    if form.url.trim().is_empty() {
        view.banners
            .push(Banner::Warning(AuditError::EmptyUrl.to_string()));
        return (StatusCode::BAD_REQUEST, Html(view.render())).into_response();
    }

    let Some(auditor) = state.auditor.as_ref() else {
        return (StatusCode::SERVICE_UNAVAILABLE, Html(view.render())).into_response();
    };

    let outcome = auditor.audit(&form.url).await;
    let status = match &outcome {
        Ok(report) => {
            view.banners.push(Banner::Success(format!(
                "Text Extracted. Length: {} chars",
                report.extracted_chars
            )));
            view.report = Some(report.report.as_str());
            StatusCode::OK
        }
        Err(err) => {
            warn!(url = %form.url, error = %err, "audit failed");
            if let AuditError::Completion {
                extracted_chars, ..
            } = err
            {
                view.banners.push(Banner::Success(format!(
                    "Text Extracted. Length: {extracted_chars} chars"
                )));
            }
            view.banners.push(Banner::Error(err.to_string()));
            status_for(err)
        }
    };

    (status, Html(view.render())).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        audit::{Auditor, PromptTemplate},
        completion::{CompletionError, MockCompletionService},
        config::Config,
        fetcher::Fetcher,
    };
    use axum::{
        Router,
        body::Body,
        http::Request,
        routing::{get, post},
    };
    use std::sync::Arc;
    use tower::ServiceExt;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    fn create_test_app(completion: Option<MockCompletionService>) -> Router {
        let auditor = completion.map(|mock| {
            Auditor::new(
                Fetcher::new().unwrap(),
                Arc::new(mock),
                PromptTemplate::new("v-test", "Audit this."),
            )
        });
        let state = AppState::new(Config::new("127.0.0.1:0", None), auditor);

        Router::new()
            .route("/", get(index))
            .route("/audit", post(audit_page))
            .with_state(state)
    }

    fn form_request(url: &str) -> Request<Body> {
        let body = format!("url={}", url.replace(':', "%3A").replace('/', "%2F"));
        Request::builder()
            .method("POST")
            .uri("/audit")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    async fn read_body(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn page_server(body: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/claims"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_index_renders_form() {
        let app = create_test_app(Some(MockCompletionService::new()));
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = read_body(response).await;
        assert!(html.contains("ZeroWash.ai"));
        assert!(html.contains(r#"name="url""#));
        assert!(html.contains("Audit Website"));
        assert!(!html.contains("disabled>"));
    }

    #[tokio::test]
    async fn test_index_without_credential_shows_error() {
        let app = create_test_app(None);
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let html = read_body(app.oneshot(request).await.unwrap()).await;

        assert!(html.contains("Missing&#32;API&#32;Key"));
        assert!(html.contains("disabled>Audit Website"));
    }

    #[tokio::test]
    async fn test_empty_url_warns() {
        let app = create_test_app(Some(MockCompletionService::new()));
        let request = Request::builder()
            .method("POST")
            .uri("/audit")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from("url="))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = read_body(response).await;
        assert!(html.contains(r#"class="banner warning""#));
        assert!(html.contains("Please&#32;enter&#32;a&#32;URL."));
    }

    #[tokio::test]
    async fn test_report_is_rendered_as_markdown() {
        let server = page_server("<p>Greenest brand</p>").await;

        let mut mock = MockCompletionService::new();
        mock.expect_complete().times(1).returning(|_| {
            Ok("RISK SCORE: 10%\n\n* **Greenest** | Vague claim |\n\n<script>alert(1)</script>\n".to_string())
        });
        mock.expect_model().return_const("gemini-test".to_string());

        let app = create_test_app(Some(mock));
        let response = app
            .oneshot(form_request(&format!("{}/claims", server.uri())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = read_body(response).await;
        assert!(html.contains("Compliance Report"));
        assert!(html.contains("Text&#32;Extracted.&#32;Length:&#32;14&#32;chars"));
        assert!(html.contains("<strong>Greenest</strong>"));
        assert!(html.contains("<li>"));
        assert!(!html.contains("<script>"));
        assert!(!html.contains("alert(1)"));
    }

    #[test]
    fn test_render_report_sanitizes_markup() {
        let rendered = render_report(
            "## Verdict\n\n[link](javascript:alert(1)) <img src=x onerror=alert(1)> **bold**",
        );

        assert!(rendered.contains("<h2>Verdict</h2>"));
        assert!(rendered.contains("<strong>bold</strong>"));
        assert!(!rendered.contains("javascript:"));
        assert!(!rendered.contains("onerror"));
    }

    #[tokio::test]
    async fn test_completion_error_still_reports_extraction() {
        let server = page_server("<p>Net Zero</p>").await;

        let mut mock = MockCompletionService::new();
        mock.expect_complete()
            .times(1)
            .returning(|_| Err(CompletionError::Transport("connection reset".to_string())));

        let app = create_test_app(Some(mock));
        let response = app
            .oneshot(form_request(&format!("{}/claims", server.uri())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let html = read_body(response).await;
        assert!(html.contains(r#"class="banner success""#));
        assert!(html.contains(r#"class="banner error""#));
        assert!(html.contains("API&#32;Error"));
        assert!(!html.contains("Compliance Report"));
    }
}
