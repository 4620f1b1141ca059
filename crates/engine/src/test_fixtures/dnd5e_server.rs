//! In-process stand-in for the D&D 5e API.
//!
//! Serves a small canned catalog on an ephemeral local port so the HTTP
//! adapter can be exercised end to end without network access.
//!
//! Special spell indices trigger failure modes:
//! - `broken`: HTTP 500
//! - `garbled`: 200 with a body that is not JSON
//! - `levelless`: a record without a level

use std::net::SocketAddr;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

/// Spells listed by the fixture, in listing order.
pub const FIXTURE_SPELLS: [&str; 3] = ["fireball", "light", "cure-wounds"];

/// A running fixture server.
pub struct FixtureServer {
    pub addr: SocketAddr,
}

impl FixtureServer {
    /// Base URL with the `/api` prefix, as the client expects.
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }
}

/// Start the fixture with the healthy catalog.
pub async fn start() -> FixtureServer {
    serve(router(listing(&FIXTURE_SPELLS))).await
}

/// Start the fixture with a custom spell listing.
pub async fn start_with_listing(indices: &[&str]) -> FixtureServer {
    serve(router(listing(indices))).await
}

/// Start a fixture whose every route answers 503.
pub async fn start_unavailable() -> FixtureServer {
    let app = Router::new().fallback(|| async { StatusCode::SERVICE_UNAVAILABLE });
    serve(app).await
}

async fn serve(app: Router) -> FixtureServer {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve fixture") });
    FixtureServer { addr }
}

fn router(spell_listing: Value) -> Router {
    Router::new()
        .route(
            "/api/spells",
            get(move || {
                let spell_listing = spell_listing.clone();
                async move { Json(spell_listing) }
            }),
        )
        .route("/api/spells/{index}", get(spell_detail))
        .route("/api/classes", get(class_listing))
        .route("/api/classes/{index}/spells", get(class_spells))
}

fn reference(index: &str, name: &str, kind: &str) -> Value {
    json!({ "index": index, "name": name, "url": format!("/api/{kind}/{index}") })
}

fn listing(indices: &[&str]) -> Value {
    let results: Vec<Value> = indices
        .iter()
        .map(|index| reference(index, index, "spells"))
        .collect();
    json!({ "count": results.len(), "results": results })
}

async fn spell_detail(Path(index): Path<String>) -> Response {
    match index.as_str() {
        "fireball" => Json(json!({
            "index": "fireball",
            "name": "Fireball",
            "level": 3,
            "school": reference("evocation", "Evocation", "magic-schools"),
            "casting_time": "1 action",
            "range": "150 feet",
            "duration": "Instantaneous",
            "components": ["V", "S", "M"],
            "material": "A tiny ball of bat guano and sulfur.",
            "ritual": false,
            "concentration": false,
            "desc": [
                "A bright streak flashes from your pointing finger to a point you choose.",
                "The fire spreads around corners."
            ],
            "higher_level": ["The damage increases by 1d6 for each slot level above 3rd."],
            "classes": [
                reference("sorcerer", "Sorcerer", "classes"),
                reference("wizard", "Wizard", "classes")
            ]
        }))
        .into_response(),
        "light" => Json(json!({
            "index": "light",
            "name": "Light",
            "level": 0,
            "school": reference("evocation", "Evocation", "magic-schools"),
            "casting_time": "1 action",
            "range": "Touch",
            "duration": "1 hour",
            "components": ["V", "M"],
            "desc": ["You touch one object that is no larger than 10 feet in any dimension."],
            "classes": [
                reference("cleric", "Cleric", "classes"),
                reference("wizard", "Wizard", "classes")
            ]
        }))
        .into_response(),
        "cure-wounds" => Json(json!({
            "index": "cure-wounds",
            "name": "Cure Wounds",
            "level": 1,
            "school": reference("evocation", "Evocation", "magic-schools"),
            "casting_time": "1 action",
            "range": "Touch",
            "duration": "Instantaneous",
            "components": ["V", "S"],
            "desc": ["A creature you touch regains a number of hit points."],
            "classes": [reference("cleric", "Cleric", "classes")]
        }))
        .into_response(),
        "levelless" => Json(json!({
            "index": "levelless",
            "name": "Levelless",
            "school": reference("evocation", "Evocation", "magic-schools"),
            "desc": []
        }))
        .into_response(),
        "broken" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        "garbled" => (StatusCode::OK, "<html>not json</html>").into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn class_listing() -> Json<Value> {
    Json(json!({
        "count": 4,
        "results": [
            reference("cleric", "Cleric", "classes"),
            reference("fighter", "Fighter", "classes"),
            reference("wizard", "Wizard", "classes"),
            reference("sorcerer", "Sorcerer", "classes")
        ]
    }))
}

async fn class_spells(Path(index): Path<String>) -> Response {
    let spells: &[(&str, &str)] = match index.as_str() {
        "cleric" => &[("light", "Light"), ("cure-wounds", "Cure Wounds")],
        "wizard" => &[("fireball", "Fireball"), ("light", "Light")],
        "sorcerer" => &[("fireball", "Fireball")],
        "fighter" => &[],
        _ => return StatusCode::NOT_FOUND.into_response(),
    };
    let results: Vec<Value> = spells
        .iter()
        .map(|(index, name)| reference(index, name, "spells"))
        .collect();
    Json(json!({ "count": results.len(), "results": results })).into_response()
}
