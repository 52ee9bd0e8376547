use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::colleges::filter::{filter_by_program, is_supported_district, program_matcher};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CollegeQuery {
    pub district: Option<String>,
    pub program: Option<String>,
}

/// GET /api/colleges?district=Kalaburagi&program=science
pub async fn handle_list_colleges(
    State(state): State<AppState>,
    Query(params): Query<CollegeQuery>,
) -> Result<Json<Vec<Value>>, AppError> {
    let district = params.district.as_deref().filter(|d| !d.is_empty());
    if let Some(district) = district {
        if !is_supported_district(district) {
            return Err(AppError::Validation(
                "Only Kalaburagi and Koppal are supported.".to_string(),
            ));
        }
    }

    let matcher = program_matcher(params.program.as_deref().unwrap_or_default())
        .map_err(|e| AppError::Validation(format!("Invalid program filter: {e}")))?;

    let colleges = state.colleges.list(district).await?;
    let colleges = match matcher {
        Some(matcher) => filter_by_program(colleges, &matcher),
        None => colleges,
    };

    Ok(Json(colleges))
}

/// GET /api/colleges/:college_id
pub async fn handle_get_college(
    State(state): State<AppState>,
    Path(college_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let college = state.colleges.get(&college_id).await?;
    Ok(Json(college))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::colleges::client::CollegeClient;
    use crate::generation::orchestrator::Orchestrator;
    use crate::routes::build_router;

    fn state_for(server: &MockServer) -> AppState {
        AppState {
            orchestrator: Arc::new(Orchestrator::new(vec![])),
            colleges: CollegeClient::new(
                reqwest::Client::new(),
                &format!("{}/colleges", server.uri()),
                Duration::from_secs(5),
            )
            .unwrap(),
        }
    }

    async fn get(state: AppState, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = build_router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_list_filters_by_program_alias() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/colleges"))
            .and(query_param("district", "Kalaburagi"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"name": "Sharnbasva University", "programs": ["B.Tech Computer Science"]},
                {"name": "Govt PU College", "programs": ["PUC Arts"]}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let (status, body) = get(
            state_for(&server),
            "/api/colleges?district=Kalaburagi&program=cse",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{"name": "Sharnbasva University", "programs": ["B.Tech Computer Science"]}])
        );
    }

    #[tokio::test]
    async fn test_unsupported_district_is_rejected_before_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let (status, body) = get(state_for(&server), "/api/colleges?district=Mysuru").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_upstream_failure_is_bad_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("stack trace with secrets"))
            .mount(&server)
            .await;

        let (status, body) = get(state_for(&server), "/api/colleges").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(!body.to_string().contains("secrets"));
    }

    #[tokio::test]
    async fn test_get_college_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/colleges/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let (status, _) = get(state_for(&server), "/api/colleges/missing").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
