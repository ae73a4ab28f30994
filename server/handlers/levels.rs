use serde::Serialize;

use tensor_forge::engine::Engine;
use tensor_forge::level::LevelConfig;

use crate::routes::{json_response, not_found, JsonResponse};

#[derive(Serialize)]
struct Health {
    status: &'static str,
    version: &'static str,
}

/// One row of `GET /api/levels`.
#[derive(Serialize)]
struct LevelSummary<'a> {
    id: u32,
    title: &'a str,
    class_labels: &'a [String],
    target_accuracy: f64,
    target_score: f64,
    components: Vec<&'a str>,
}

impl<'a> From<&'a LevelConfig> for LevelSummary<'a> {
    fn from(level: &'a LevelConfig) -> Self {
        LevelSummary {
            id: level.id,
            title: &level.title,
            class_labels: &level.class_labels,
            target_accuracy: level.target_accuracy,
            target_score: level.simulation.target_score,
            components: level.component_catalog.iter().map(|c| c.id.as_str()).collect(),
        }
    }
}

/// `GET /api/health`
pub fn handle_health() -> JsonResponse {
    json_response(200, &Health { status: "ok", version: env!("CARGO_PKG_VERSION") })
}

/// `GET /api/levels`
pub fn handle_list(engine: &Engine) -> JsonResponse {
    let summaries: Vec<LevelSummary> = engine.catalog().levels.iter().map(LevelSummary::from).collect();
    json_response(200, &summaries)
}

/// `GET /api/levels/{id}`
pub fn handle_get(engine: &Engine, id: u32) -> JsonResponse {
    match engine.catalog().get(id) {
        Some(level) => json_response(200, level),
        None => not_found(),
    }
}
