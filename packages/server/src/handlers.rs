//! HTTP handler functions for the dashboard API.

use actix_web::{HttpResponse, web};
use callcenter_analytics::{apply_filter, dashboard, export};
use callcenter_analytics_models::IncidentFilter;
use callcenter_incident_models::BigCategory;
use callcenter_server_models::{
    ApiCategory, ApiError, ApiHealth, ApiIncident, ApiIncidentPage, DEFAULT_INCIDENT_LIMIT,
    DashboardQueryParams, IncidentsQueryParams,
};

use crate::AppState;

/// Parses the filter parameters, or builds the `400` response to return.
fn parse_filter(params: &DashboardQueryParams) -> Result<IncidentFilter, HttpResponse> {
    params.to_filter().map_err(|e| {
        log::debug!("Rejected filter: {e}");
        HttpResponse::BadRequest().json(ApiError::new(e))
    })
}

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        record_count: state.snapshot.len() as u64,
    })
}

/// `GET /api/categories`
///
/// Returns the coarse category taxonomy in canonical order.
pub async fn categories() -> HttpResponse {
    let categories: Vec<ApiCategory> = BigCategory::all()
        .iter()
        .map(|cat| ApiCategory {
            name: *cat,
            label: cat.label().to_string(),
        })
        .collect();

    HttpResponse::Ok().json(categories)
}

/// `GET /api/overview`
pub async fn overview(
    state: web::Data<AppState>,
    params: web::Query<DashboardQueryParams>,
) -> HttpResponse {
    match parse_filter(&params) {
        Ok(filter) => HttpResponse::Ok().json(dashboard::overview(&state.snapshot, &filter)),
        Err(response) => response,
    }
}

/// `GET /api/distribution`
pub async fn distribution(
    state: web::Data<AppState>,
    params: web::Query<DashboardQueryParams>,
) -> HttpResponse {
    match parse_filter(&params) {
        Ok(filter) => HttpResponse::Ok().json(dashboard::distribution(&state.snapshot, &filter)),
        Err(response) => response,
    }
}

/// `GET /api/trends`
pub async fn trends(
    state: web::Data<AppState>,
    params: web::Query<DashboardQueryParams>,
) -> HttpResponse {
    match parse_filter(&params) {
        Ok(filter) => HttpResponse::Ok().json(dashboard::trends(&state.snapshot, &filter)),
        Err(response) => response,
    }
}

/// `GET /api/validity`
pub async fn validity(
    state: web::Data<AppState>,
    params: web::Query<DashboardQueryParams>,
) -> HttpResponse {
    match parse_filter(&params) {
        Ok(filter) => HttpResponse::Ok().json(dashboard::validity(&state.snapshot, &filter)),
        Err(response) => response,
    }
}

/// `GET /api/insights`
pub async fn insights(
    state: web::Data<AppState>,
    params: web::Query<DashboardQueryParams>,
) -> HttpResponse {
    match parse_filter(&params) {
        Ok(filter) => HttpResponse::Ok().json(dashboard::insights(&state.snapshot, &filter)),
        Err(response) => response,
    }
}

/// `GET /api/incidents`
///
/// Returns one page of the filtered records in snapshot order.
pub async fn incidents(
    state: web::Data<AppState>,
    params: web::Query<IncidentsQueryParams>,
) -> HttpResponse {
    let filter = match parse_filter(&DashboardQueryParams::from(&*params)) {
        Ok(filter) => filter,
        Err(response) => return response,
    };

    let subset = apply_filter(state.snapshot.records(), &filter);
    let limit = params.limit.unwrap_or(DEFAULT_INCIDENT_LIMIT) as usize;
    let offset = params.offset.unwrap_or(0) as usize;

    let incidents: Vec<ApiIncident> = subset
        .iter()
        .skip(offset)
        .take(limit)
        .map(|r| ApiIncident::from(*r))
        .collect();

    HttpResponse::Ok().json(ApiIncidentPage {
        has_more: offset.saturating_add(incidents.len()) < subset.len(),
        total_count: subset.len() as u64,
        incidents,
    })
}

/// `GET /api/export/incidents.csv`
pub async fn export_incidents(
    state: web::Data<AppState>,
    params: web::Query<DashboardQueryParams>,
) -> HttpResponse {
    let filter = match parse_filter(&params) {
        Ok(filter) => filter,
        Err(response) => return response,
    };

    let subset = apply_filter(state.snapshot.records(), &filter);
    csv_response(
        "incidents.csv",
        export::records_csv_string(subset.iter().copied()),
    )
}

/// `GET /api/export/summary.csv`
pub async fn export_summary(
    state: web::Data<AppState>,
    params: web::Query<DashboardQueryParams>,
) -> HttpResponse {
    let filter = match parse_filter(&params) {
        Ok(filter) => filter,
        Err(response) => return response,
    };

    let subset = apply_filter(state.snapshot.records(), &filter);
    csv_response(
        "summary.csv",
        export::category_summary_csv_string(subset.iter().copied()),
    )
}

fn csv_response(file_name: &str, body: Result<String, export::ExportError>) -> HttpResponse {
    match body {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{file_name}\""),
            ))
            .body(body),
        Err(e) => {
            log::error!("Failed to export {file_name}: {e}");
            HttpResponse::InternalServerError().json(ApiError::new("Failed to export CSV"))
        }
    }
}
