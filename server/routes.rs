use std::io::Cursor;

use serde::Serialize;
use tiny_http::{Header, Method, Request, Response, StatusCode};
use tracing::debug;

use tensor_forge::engine::Engine;
use tensor_forge::error::EngineError;

use crate::handlers;

pub type JsonResponse = Response<Cursor<Vec<u8>>>;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

fn content_type_json() -> Vec<Header> {
    Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
        .ok()
        .into_iter()
        .collect()
}

pub fn json_response<T: Serialize>(status: u16, body: &T) -> JsonResponse {
    match serde_json::to_vec(body) {
        Ok(bytes) => {
            let len = bytes.len();
            Response::new(StatusCode(status), content_type_json(), Cursor::new(bytes), Some(len), None)
        }
        Err(e) => error_body(500, "json_error", &e.to_string()),
    }
}

pub fn error_body(status: u16, error: &str, message: &str) -> JsonResponse {
    let bytes = serde_json::json!({ "error": error, "message": message })
        .to_string()
        .into_bytes();
    let len = bytes.len();
    Response::new(StatusCode(status), content_type_json(), Cursor::new(bytes), Some(len), None)
}

/// 400 for bad input, 422 when the input was well-formed but too thin,
/// 500 for anything on the server side.
pub fn error_response(err: &EngineError) -> JsonResponse {
    let status = match err {
        EngineError::Validation(_) | EngineError::Json(_) => 400,
        EngineError::InsufficientData { .. } => 422,
        EngineError::Io(_) => 500,
    };
    error_body(status, err.kind(), &err.to_string())
}

pub fn not_found() -> JsonResponse {
    error_body(404, "not_found", "no such resource")
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Routes one request and sends its response. Handlers borrow the request so
/// the dispatcher can respond at the end.
pub fn dispatch(mut request: Request, engine: &Engine) {
    let method = request.method().clone();
    let url = request.url().to_owned();
    let path = url.split('?').next().unwrap_or("").trim_end_matches('/');

    let response = match (&method, path) {
        (Method::Get, "/api/health") => handlers::levels::handle_health(),
        (Method::Get, "/api/levels") => handlers::levels::handle_list(engine),
        (Method::Get, p) if p.starts_with("/api/levels/") => {
            match p["/api/levels/".len()..].parse::<u32>() {
                Ok(id) => handlers::levels::handle_get(engine, id),
                Err(_) => not_found(),
            }
        }
        (Method::Post, "/api/train") => handlers::train::handle(&mut request, engine),
        (Method::Post, "/api/simulate") => handlers::simulate::handle(&mut request, engine),
        (Method::Post, "/api/hint") => handlers::hint::handle(&mut request, engine),
        _ => not_found(),
    };

    debug!(method = %method, path, status = response.status_code().0, "request served");
    let _ = request.respond(response);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(response: &JsonResponse) -> u16 {
        response.status_code().0
    }

    #[test]
    fn error_kinds_map_to_statuses() {
        assert_eq!(status(&error_response(&EngineError::validation("bad level"))), 400);

        let json = serde_json::from_str::<u32>("nope").unwrap_err();
        assert_eq!(status(&error_response(&EngineError::from(json))), 400);

        let thin = EngineError::insufficient(3, 1, "training examples");
        assert_eq!(status(&error_response(&thin)), 422);

        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone");
        assert_eq!(status(&error_response(&EngineError::from(io))), 500);
    }

    #[test]
    fn non_utf8_body_is_a_client_error() {
        let engine = Engine::default();
        let mut body = br#"{"level_id": 1, "examples": [{"stroke": [[0,0]], "label": ""#.to_vec();
        body.extend_from_slice(&[0xff, 0xfe]);
        body.extend_from_slice(br#""}]}"#);
        assert_eq!(status(&handlers::simulate::respond(&engine, &body)), 400);
        assert_eq!(status(&handlers::train::respond(&engine, &body)), 400);
        assert_eq!(status(&handlers::hint::respond(&engine, &body)), 400);
    }

    #[test]
    fn truncated_json_is_a_client_error() {
        let engine = Engine::default();
        assert_eq!(status(&handlers::simulate::respond(&engine, br#"{"level_id": 1, "compo"#)), 400);
    }

    #[test]
    fn simulate_on_unknown_level_still_succeeds() {
        let engine = Engine::default();
        let body = br#"{"level_id": 42, "components": [{"id": "neural_layer", "name": "Neural Layer", "kind": "layer"}]}"#;
        assert_eq!(status(&handlers::simulate::respond(&engine, body)), 200);
    }

    #[test]
    fn hint_on_unknown_level_is_rejected() {
        let engine = Engine::default();
        assert_eq!(status(&handlers::hint::respond(&engine, br#"{"level_id": 42}"#)), 400);
        assert_eq!(status(&handlers::hint::respond(&engine, br#"{"level_id": 1}"#)), 200);
    }

    #[test]
    fn train_below_minimum_is_unprocessable() {
        let engine = Engine::default();
        let body = br#"{"level_id": 1, "examples": [{"stroke": [[0,0],[1,1],[2,2],[3,3],[4,4]], "label": "circle"}]}"#;
        assert_eq!(status(&handlers::train::respond(&engine, body)), 422);
    }
}
