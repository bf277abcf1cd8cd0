pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::export::handlers as export;
use crate::generation::handlers as generation;
use crate::interview::handlers as interview;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/status", get(health::status_handler))
        // Sessions
        .route("/api/v1/sessions", post(session::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(session::handle_get_session).delete(session::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/api-key",
            put(session::handle_set_api_key),
        )
        .route(
            "/api/v1/sessions/:id/status/test",
            post(session::handle_test_connection),
        )
        .route(
            "/api/v1/sessions/:id/reactions/:kind/:reaction",
            post(session::handle_react),
        )
        // Resume and cover letter
        .route(
            "/api/v1/sessions/:id/resume",
            post(generation::handle_generate_resume).delete(generation::handle_clear_resume),
        )
        .route(
            "/api/v1/sessions/:id/cover-letter",
            post(generation::handle_generate_cover_letter)
                .delete(generation::handle_clear_cover_letter),
        )
        // Advice chat
        .route(
            "/api/v1/sessions/:id/advice",
            get(generation::handle_get_advice)
                .post(generation::handle_ask_advice)
                .delete(generation::handle_clear_advice),
        )
        .route(
            "/api/v1/sessions/:id/advice/topics/:topic",
            post(generation::handle_select_topic),
        )
        // Mock interview
        .route(
            "/api/v1/sessions/:id/interview",
            get(interview::handle_get_interview),
        )
        .route(
            "/api/v1/sessions/:id/interview/generate",
            post(interview::handle_generate_questions),
        )
        .route(
            "/api/v1/sessions/:id/interview/answer",
            post(interview::handle_answer),
        )
        .route(
            "/api/v1/sessions/:id/interview/back",
            post(interview::handle_back),
        )
        .route(
            "/api/v1/sessions/:id/interview/complete",
            post(interview::handle_complete),
        )
        .route(
            "/api/v1/sessions/:id/interview/reset",
            post(interview::handle_reset),
        )
        // Downloads
        .route(
            "/api/v1/sessions/:id/export/:kind/pdf",
            get(export::handle_export_pdf),
        )
        .route(
            "/api/v1/sessions/:id/export/:kind/speech",
            get(export::handle_export_speech),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::export::speech::testing::RecordingSynthesizer;
    use crate::llm_client::testing::ScriptedGenerator;
    use crate::llm_client::MISSING_CREDENTIAL_MESSAGE;
    use crate::session::SessionStore;

    struct TestApp {
        router: Router,
        generator: Arc<ScriptedGenerator>,
        speech: Arc<RecordingSynthesizer>,
    }

    fn app(generator: ScriptedGenerator, configured_key: Option<&str>) -> TestApp {
        let generator = Arc::new(generator);
        let speech = Arc::new(RecordingSynthesizer::default());
        let state = AppState {
            config: Config::for_tests(configured_key),
            generator: generator.clone(),
            speech: speech.clone(),
            sessions: SessionStore::default(),
        };
        TestApp {
            router: build_router(state),
            generator,
            speech,
        }
    }

    impl TestApp {
        async fn raw(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
            let request = Request::builder().method(method).uri(uri);
            let request = match body {
                Some(body) => request
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string())),
                None => request.body(Body::empty()),
            }
            .unwrap();
            self.router.clone().oneshot(request).await.unwrap()
        }

        async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
            let response = self.raw(method, uri, body).await;
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let value = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, value)
        }

        async fn new_session(&self) -> String {
            let (status, body) = self.send(Method::POST, "/api/v1/sessions", None).await;
            assert_eq!(status, StatusCode::CREATED);
            body["id"].as_str().unwrap().to_string()
        }
    }

    #[tokio::test]
    async fn test_health_and_status() {
        let app = app(ScriptedGenerator::default(), Some("configured"));

        let (status, body) = app.send(Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let (status, body) = app.send(Method::GET, "/api/v1/status", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["configured"], true);
        assert_eq!(body["model"], "scripted");
    }

    #[tokio::test]
    async fn test_full_interview_over_http() {
        let app = app(
            ScriptedGenerator::replying(vec![
                Ok("1. Tell me about yourself.\n2. Describe a hard bug.\n3. Why this team?"
                    .to_string()),
                Ok("Strong, specific answers.".to_string()),
            ]),
            Some("configured"),
        );
        let id = app.new_session().await;
        let base = format!("/api/v1/sessions/{id}/interview");

        let (status, view) = app
            .send(
                Method::POST,
                &format!("{base}/generate"),
                Some(json!({ "position": "Backend Engineer", "num_questions": 3 })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["phase"], "IN_PROGRESS");
        assert_eq!(view["total"], 3);
        assert_eq!(view["current"]["text"], "Tell me about yourself.");

        for answer in ["I build APIs.", "A race in a cache.", "Great mentors."] {
            let (status, _) = app
                .send(
                    Method::POST,
                    &format!("{base}/answer"),
                    Some(json!({ "answer": answer })),
                )
                .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (_, view) = app.send(Method::GET, &base, None).await;
        assert_eq!(view["phase"], "COMPLETE");

        let (status, report) = app
            .send(Method::POST, &format!("{base}/complete"), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["feedback"], "Strong, specific answers.");
        assert!(report["transcript"]
            .as_str()
            .unwrap()
            .starts_with("Q1: Tell me about yourself.\nA1: I build APIs."));

        // Cached: no third generator call.
        app.send(Method::POST, &format!("{base}/complete"), None)
            .await;
        assert_eq!(app.generator.calls(), 2);

        let response = app
            .raw(
                Method::GET,
                &format!("/api/v1/sessions/{id}/export/interview_feedback/pdf"),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\"interview_feedback_"));
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF-"));

        let (status, view) = app.send(Method::POST, &format!("{base}/reset"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["phase"], "SETUP");
    }

    #[tokio::test]
    async fn test_back_at_first_question_conflicts() {
        let app = app(
            ScriptedGenerator::ok("1. First?\n2. Second?\n3. Third?"),
            Some("configured"),
        );
        let id = app.new_session().await;
        let base = format!("/api/v1/sessions/{id}/interview");
        app.send(
            Method::POST,
            &format!("{base}/generate"),
            Some(json!({ "position": "Analyst", "num_questions": 3 })),
        )
        .await;

        let (status, body) = app.send(Method::POST, &format!("{base}/back"), None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "INVALID_TRANSITION");
    }

    #[tokio::test]
    async fn test_out_of_range_question_count_is_a_validation_error() {
        let app = app(ScriptedGenerator::ok("unused"), Some("configured"));
        let id = app.new_session().await;
        let uri = format!("/api/v1/sessions/{id}/interview/generate");

        for count in [-1, 300] {
            let (status, body) = app
                .send(
                    Method::POST,
                    &uri,
                    Some(json!({ "position": "Analyst", "num_questions": count })),
                )
                .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        }
        assert_eq!(app.generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_credential_then_session_key() {
        let app = app(ScriptedGenerator::ok("Build a portfolio."), None);
        let id = app.new_session().await;
        let advice = format!("/api/v1/sessions/{id}/advice");

        let (status, body) = app
            .send(
                Method::POST,
                &advice,
                Some(json!({ "question": "How do I switch to UX?" })),
            )
            .await;
        assert_eq!(status, StatusCode::PRECONDITION_FAILED);
        assert_eq!(body["error"]["code"], "MISSING_CREDENTIAL");
        assert_eq!(
            body["error"]["message"],
            format!("Error: {MISSING_CREDENTIAL_MESSAGE}")
        );
        assert_eq!(app.generator.calls(), 0);

        let (status, view) = app
            .send(
                Method::PUT,
                &format!("/api/v1/sessions/{id}/api-key"),
                Some(json!({ "api_key": "typed-key" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["has_session_key"], true);
        assert!(view.get("api_key").is_none());

        let (status, view) = app
            .send(
                Method::POST,
                &advice,
                Some(json!({ "question": "How do I switch to UX?" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["history"][0]["answer"], "Build a portfolio.");
    }

    #[tokio::test]
    async fn test_resume_validation_and_unknown_session() {
        let app = app(ScriptedGenerator::ok("unused"), Some("configured"));
        let id = app.new_session().await;

        let (status, body) = app
            .send(
                Method::POST,
                &format!("/api/v1/sessions/{id}/resume"),
                Some(json!({ "name": "Jane Doe" })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(app.generator.calls(), 0);

        let (status, _) = app
            .send(
                Method::GET,
                "/api/v1/sessions/00000000-0000-0000-0000-000000000000",
                None,
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cover_letter_speech_and_reactions() {
        let app = app(ScriptedGenerator::ok("Dear Hiring Manager,"), Some("configured"));
        let id = app.new_session().await;

        let (status, letter) = app
            .send(
                Method::POST,
                &format!("/api/v1/sessions/{id}/cover-letter"),
                Some(json!({
                    "name": "Sam Rivera",
                    "company": "Acme Health",
                    "position": "Data Analyst"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(letter["kind"], "cover_letter");

        let response = app
            .raw(
                Method::GET,
                &format!("/api/v1/sessions/{id}/export/cover_letter/speech"),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/mpeg");
        assert_eq!(
            app.speech.spoken.lock().unwrap().as_slice(),
            ["Dear Hiring Manager,".to_string()]
        );

        let reactions = format!("/api/v1/sessions/{id}/reactions/cover_letter");
        app.send(Method::POST, &format!("{reactions}/like"), None).await;
        let (status, count) = app
            .send(Method::POST, &format!("{reactions}/dislike"), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(count, json!({ "kind": "cover_letter", "likes": 1, "dislikes": 1 }));

        let (status, _) = app
            .send(
                Method::DELETE,
                &format!("/api/v1/sessions/{id}/cover-letter"),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = app
            .send(
                Method::GET,
                &format!("/api/v1/sessions/{id}/export/cover_letter/pdf"),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_connection_test_reports_failure_in_body() {
        let app = app(ScriptedGenerator::ok("Hello there!"), None);
        let id = app.new_session().await;
        let uri = format!("/api/v1/sessions/{id}/status/test");

        let (status, body) = app.send(Method::POST, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], false);

        app.send(
            Method::PUT,
            &format!("/api/v1/sessions/{id}/api-key"),
            Some(json!({ "api_key": "typed-key" })),
        )
        .await;
        let (_, body) = app.send(Method::POST, &uri, None).await;
        assert_eq!(body["ok"], true);
        assert_eq!(body["response"], "Hello there!");
    }

    #[tokio::test]
    async fn test_deleted_session_is_gone() {
        let app = app(ScriptedGenerator::default(), None);
        let id = app.new_session().await;
        let uri = format!("/api/v1/sessions/{id}");

        let (status, _) = app.send(Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = app.send(Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
