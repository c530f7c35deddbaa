//! Welcome Route

use axum::response::Html;

/// Route templates listed on the welcome page
pub const ROUTES: &[&str] = &[
    "/api/v1.0/precipitation",
    "/api/v1.0/stations",
    "/api/v1.0/tobs",
    "/api/v1.0/<start>",
    "/api/v1.0/<start>/<end>",
];

/// List the available routes
pub async fn index() -> Html<String> {
    let mut body = String::from("Welcome to the Hawaii Climate API!<br/>Available Routes:<br/>");
    for route in ROUTES {
        body.push_str(route);
        body.push_str("<br/>");
    }
    Html(body)
}
