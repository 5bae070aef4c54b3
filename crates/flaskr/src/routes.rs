//! HTTP routes for flaskr.

use axum::{response::Html, routing::get, Router};

use crate::app::AppState;

/// Register the application's routes on `router`.
pub fn register(router: Router<AppState>) -> Router<AppState> {
    router.route("/hello", get(hello))
}

/// A simple page that says hello.
pub async fn hello() -> Html<&'static str> {
    Html("Hello World!")
}
