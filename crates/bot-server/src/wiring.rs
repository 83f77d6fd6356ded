use api::state::AppState;
use axum::{routing::get, Router};

pub fn build_app(state: AppState) -> Router {
    debug_assert!(runtime::module_ready());
    debug_assert!(api::module_ready());

    api::app(state).route("/health", get(healthcheck))
}

async fn healthcheck() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use api::state::AppState;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use core_sim::SimConfig;
    use runtime::Dashboard;
    use tower::ServiceExt;

    #[tokio::test]
    async fn server_healthcheck_responds_ok() {
        let state = AppState::new(Dashboard::spawn(SimConfig::default(), 7));
        let app = super::build_app(state);

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn server_mounts_the_dashboard_routes() {
        let state = AppState::new(Dashboard::spawn(SimConfig::default(), 7));
        let app = super::build_app(state);

        let response = app
            .oneshot(Request::get("/dashboard").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
