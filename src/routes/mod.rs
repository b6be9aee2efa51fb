pub mod calendar;
pub mod health;
pub mod menus;
pub mod metrics;
pub mod pages;
pub mod recipes;
pub mod shopping;

use std::fmt::Display;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    routing::{delete, get},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Error half of every handler result.
pub type ApiError = (StatusCode, Json<Value>);

pub(crate) fn api_error(status: StatusCode, message: impl Display) -> ApiError {
    (status, Json(json!({ "error": message.to_string() })))
}

pub(crate) fn internal(e: impl Display) -> ApiError {
    api_error(StatusCode::INTERNAL_SERVER_ERROR, e)
}

pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn router(state: AppState) -> Router {
    // Allow the app's own origin; localhost is always allowed for development.
    let base = state.config.app_base_url.clone();
    let cors_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _| {
        let Ok(o) = origin.to_str() else {
            return false;
        };
        o.starts_with("http://localhost") || o.starts_with("http://127.0.0.1") || o == base
    });

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(cors_origin);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics::metrics_handler))
        // Data API
        .route("/api/recipes", get(recipes::list_recipes))
        .route("/api/menus", get(menus::list_menus))
        .route("/api/menus/{id}", get(menus::get_menu))
        .route("/api/calendar", get(calendar::get_week))
        .route(
            "/api/calendar/entries",
            get(calendar::list_entries).post(calendar::create_entry),
        )
        .route("/api/calendar/entries/{id}", delete(calendar::delete_entry))
        .route("/api/shopping", get(shopping::get_week))
        // Pages
        .route("/", get(pages::show))
        .route("/menu", get(pages::show))
        .route("/calendar", get(pages::show))
        .route("/recipes", get(pages::show))
        .route("/inventory", get(pages::show))
        .route("/shopping", get(pages::show))
        .route("/diary", get(pages::show))
        .route("/menus/{id}", get(pages::show))
        .fallback(pages::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::{
        config::Config,
        db::{memory::Operation, DocumentStore, MemoryStore},
        models::{calendar::CalendarEntryDoc, menu::Menu, recipe::Recipe},
    };

    async fn store() -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        store
            .put_recipe(&Recipe {
                id: "r-chili".into(),
                name: "Chili".into(),
                ..Recipe::default()
            })
            .await
            .unwrap();
        store
            .put_menu(&Menu {
                id: "game-day".into(),
                name: "Game Day".into(),
                description: "Snacks for the match".into(),
                recipes: vec![Recipe {
                    id: "r-chili".into(),
                    name: "Chili".into(),
                    prep_time: "15".into(),
                    cook_time: "60".into(),
                    servings: 6,
                    ingredients: vec![crate::models::recipe::Ingredient::parse_line("500 g beef")],
                    instructions: vec!["Brown beef".into(), "Simmer".into()],
                    ..Recipe::default()
                }],
            })
            .await
            .unwrap();
        store
            .insert_calendar_doc(CalendarEntryDoc {
                id: "dangling".into(),
                date: "2024-03-11".into(),
                menu_id: "deleted-menu".into(),
            })
            .await;
        store
    }

    fn app(store: Arc<MemoryStore>) -> Router {
        router(AppState {
            store: store as Arc<dyn DocumentStore>,
            config: Arc::new(Config::memory()),
        })
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (status, body) = send(app(store().await), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn create_list_and_delete_entries() {
        let store = store().await;

        let (status, body) = send(app(store.clone()), get("/api/calendar/entries")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let (status, created) = send(
            app(store.clone()),
            post_json(
                "/api/calendar/entries",
                json!({ "date": "2024-03-10", "menuId": "game-day" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["date"], "2024-03-10");
        assert_eq!(created["menu"]["name"], "Game Day");

        let (_, week) = send(app(store.clone()), get("/api/calendar?date=2024-03-13")).await;
        assert_eq!(week["start"], "2024-03-10");
        assert_eq!(week["days"][0]["entries"][0]["menuName"], "Game Day");
        assert_eq!(week["days"][0]["entries"][0]["totalMinutes"], 75);
        assert_eq!(week["days"][1]["entries"], json!([]));

        let id = created["id"].as_str().unwrap();
        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/api/calendar/entries/{id}"))
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(app(store.clone()), request).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, body) = send(app(store), get("/api/calendar/entries")).await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn create_rejects_bad_input() {
        let store = store().await;
        let (status, _) = send(
            app(store.clone()),
            post_json("/api/calendar/entries", json!({ "date": "whenever", "menuId": "game-day" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            app(store.clone()),
            post_json("/api/calendar/entries", json!({ "date": "2024-03-10", "menuId": "nope" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("nope"));
        assert_eq!(store.list_calendar_entries().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn menu_search_and_details() {
        let store = store().await;
        let (_, hits) = send(app(store.clone()), get("/api/menus?q=chil")).await;
        assert_eq!(hits.as_array().unwrap().len(), 1);
        let (_, misses) = send(app(store.clone()), get("/api/menus?q=sushi")).await;
        assert_eq!(misses, json!([]));

        let (status, details) = send(app(store.clone()), get("/api/menus/game-day")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(details["recipes"][0]["ingredients"][0], "500 g beef");
        assert_eq!(details["recipes"][0]["instructions"][1], "Simmer");

        let (status, body) = send(app(store), get("/api/menus/unknown")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["state"], "not_found");
    }

    #[tokio::test]
    async fn store_failures_map_to_500() {
        let store = store().await;
        store.fail(Operation::ListRecipes);
        let (status, body) = send(app(store.clone()), get("/api/recipes")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].is_string());

        store.recover(Operation::ListRecipes);
        let (status, body) = send(app(store), get("/api/recipes")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["name"], "Chili");
    }

    #[tokio::test]
    async fn shopping_list_for_week() {
        let store = store().await;
        store
            .create_calendar_entry(chrono::NaiveDate::from_ymd_opt(2024, 3, 12).unwrap(), "game-day")
            .await
            .unwrap();
        let (status, body) = send(app(store), get("/api/shopping?date=2024-03-10")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["items"][0]["line"], "500 g beef");
    }

    #[tokio::test]
    async fn weeks_beyond_the_calendar_are_bad_requests() {
        let store = store().await;
        for uri in ["/api/calendar?date=%2B262142-12-31", "/api/shopping?date=%2B262142-12-31"] {
            let (status, body) = send(app(store.clone()), get(uri)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert!(body["error"].as_str().unwrap().contains("invalid calendar date"), "{uri}");
        }

        let (status, _) = send(app(store), get("/api/calendar?date=2024-03-13")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn pages_resolve_and_unknown_paths_404() {
        let store = store().await;
        let (status, body) = send(app(store.clone()), get("/calendar")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"], "calendar");

        let (_, body) = send(app(store.clone()), get("/menus/game-day")).await;
        assert_eq!(body["page"], "menu_details");
        assert_eq!(body["id"], "game-day");
        assert_eq!(body["endpoints"][0], "/api/menus/game-day");

        let (_, body) = send(app(store.clone()), get("/")).await;
        assert_eq!(body["page"], "menu");

        let (status, _) = send(app(store), get("/settings")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
