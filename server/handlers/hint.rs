use tiny_http::Request;

use tensor_forge::engine::{Engine, HintRequest};

use crate::handlers::{parse_json, read_body};
use crate::routes::{error_response, json_response, JsonResponse};

/// `POST /api/hint`. The client sends its own attempt count; nothing is
/// remembered between calls.
pub fn handle(request: &mut Request, engine: &Engine) -> JsonResponse {
    match read_body(request) {
        Ok(body) => respond(engine, &body),
        Err(e) => error_response(&e),
    }
}

pub fn respond(engine: &Engine, body: &[u8]) -> JsonResponse {
    let body: HintRequest = match parse_json(body) {
        Ok(body) => body,
        Err(e) => return error_response(&e),
    };
    match engine.hint(&body) {
        Ok(hint) => json_response(200, &hint),
        Err(e) => error_response(&e),
    }
}
