//! HTTP handler functions for the `SignalScope` API.

use actix_web::{HttpResponse, web};
use signal_scope_coverage::{DEFAULT_RADIUS_KM, analytics};
use signal_scope_coverage_models::{Carrier, LatLng, NewFavorite, NewSignalReport};
use signal_scope_server_models::{
    AnalyticsResponse, ApiHealth, ApiResolution, CompareQueryParams, CompareResponse,
    FavoriteCompareParams, FavoriteCompareResponse, NearestQueryParams, NearestResponse,
    ResolveQueryParams, TowersQueryParams, parse_carriers,
};

use crate::AppState;

const DEFAULT_NEAREST_LIMIT: usize = 5;

fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": message.into() }))
}

fn not_found(message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": message.into() }))
}

/// Validates an optional `radiusKm` parameter, falling back to the default.
fn radius_or_default(radius_km: Option<f64>) -> Result<f64, HttpResponse> {
    match radius_km {
        None => Ok(DEFAULT_RADIUS_KM),
        Some(r) if r.is_finite() && r >= 0.0 => Ok(r),
        Some(r) => Err(bad_request(format!("Invalid radiusKm: {r}"))),
    }
}

/// Parses an optional carrier filter. `Ok(None)` means no filter.
fn carrier_filter(carrier: Option<&str>) -> Result<Option<Carrier>, HttpResponse> {
    match carrier.map(str::trim).filter(|c| !c.is_empty()) {
        None => Ok(None),
        Some(name) => Carrier::from_report_name(name)
            .map(Some)
            .ok_or_else(|| bad_request(format!("Unknown carrier: {name}"))),
    }
}

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/towers`
///
/// Lists towers, optionally filtered to one carrier.
pub async fn towers(
    state: web::Data<AppState>,
    params: web::Query<TowersQueryParams>,
) -> HttpResponse {
    let carrier = match carrier_filter(params.carrier.as_deref()) {
        Ok(carrier) => carrier,
        Err(response) => return response,
    };

    HttpResponse::Ok().json(analytics::filter_towers(&state.towers, carrier))
}

/// `GET /api/reports`
pub async fn reports(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(&*state.reports())
}

/// `POST /api/reports`
///
/// Validates a submission, stamps it with an id and timestamp, and appends
/// it to the report set.
pub async fn submit_report(
    state: web::Data<AppState>,
    body: web::Json<NewSignalReport>,
) -> HttpResponse {
    let submission = body.into_inner();

    if let Err(e) = submission.validate() {
        log::warn!("Rejected signal report: {e}");
        return bad_request(e.to_string());
    }

    let report = submission.into_report();
    log::info!(
        "Accepted report {} ({} {} dBm)",
        report.id,
        report.carrier,
        report.signal_strength
    );
    state.reports_mut().push(report.clone());

    HttpResponse::Created().json(report)
}

/// `GET /api/markers`
///
/// All towers followed by all reports, tagged by kind.
pub async fn markers(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.snapshot().markers())
}

/// `GET /api/compare`
///
/// Ranks carriers at explicit coordinates or at a resolved free-text
/// query. Coordinates win when both are given.
pub async fn compare(
    state: web::Data<AppState>,
    params: web::Query<CompareQueryParams>,
) -> HttpResponse {
    let radius_km = match radius_or_default(params.radius_km) {
        Ok(r) => r,
        Err(response) => return response,
    };

    let (center, resolution) = match (params.lat, params.lng, params.q.as_deref()) {
        (Some(lat), Some(lng), _) => (LatLng::new(lat, lng), None),
        (None, None, Some(q)) if !q.trim().is_empty() => {
            match signal_scope_geocoder::resolve_detailed(q) {
                Some(resolution) => (resolution.point, Some(ApiResolution::from(resolution))),
                None => return not_found(format!("Location not found: {q}")),
            }
        }
        (Some(_), None, _) | (None, Some(_), _) => {
            return bad_request("lat and lng must be given together");
        }
        _ => return bad_request("Either lat and lng, or q, is required"),
    };

    let carriers = parse_carriers(params.carriers.as_deref());
    let comparisons = state.snapshot().compare(center, radius_km, &carriers);

    HttpResponse::Ok().json(CompareResponse {
        center,
        radius_km,
        resolution,
        comparisons,
    })
}

/// `GET /api/resolve`
pub async fn resolve(params: web::Query<ResolveQueryParams>) -> HttpResponse {
    match signal_scope_geocoder::resolve_detailed(&params.q) {
        Some(resolution) => HttpResponse::Ok().json(ApiResolution::from(resolution)),
        None => not_found(format!("Location not found: {}", params.q)),
    }
}

/// `GET /api/nearest`
pub async fn nearest(
    state: web::Data<AppState>,
    params: web::Query<NearestQueryParams>,
) -> HttpResponse {
    let carrier = match carrier_filter(params.carrier.as_deref()) {
        Ok(carrier) => carrier,
        Err(response) => return response,
    };

    let center = LatLng::new(params.lat, params.lng);
    let towers = analytics::nearest_towers(
        &state.towers,
        center,
        params.limit.unwrap_or(DEFAULT_NEAREST_LIMIT),
        carrier,
    );

    HttpResponse::Ok().json(NearestResponse { center, towers })
}

/// `GET /api/analytics`
pub async fn analytics(state: web::Data<AppState>) -> HttpResponse {
    let reports = state.reports();

    HttpResponse::Ok().json(AnalyticsResponse {
        tower_count: state.towers.len(),
        report_count: reports.len(),
        towers_by_carrier: analytics::towers_by_carrier(&state.towers),
        avg_signal_by_carrier: analytics::average_signal_by_carrier(&reports),
        signal_quality: analytics::signal_quality_breakdown(&reports),
    })
}

/// `GET /api/favorites`
pub async fn list_favorites(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.favorites().all())
}

/// `POST /api/favorites`
///
/// Adds a favorite and writes the collection through to the store. The
/// in-memory collection is rolled back when the write fails.
pub async fn create_favorite(
    state: web::Data<AppState>,
    body: web::Json<NewFavorite>,
) -> HttpResponse {
    let submission = body.into_inner();
    if submission.name.trim().is_empty() {
        return bad_request("Favorite name must not be empty");
    }

    let mut favorites = state.favorites();
    let previous = favorites.clone();
    let favorite = favorites.add(submission);

    if let Err(e) = favorites.save(state.favorites_store.as_ref()) {
        log::error!("Failed to save favorites: {e}");
        *favorites = previous;
        return HttpResponse::InternalServerError().json(serde_json::json!({
            "error": "Failed to save favorites"
        }));
    }

    log::info!("Saved favorite {} ({})", favorite.id, favorite.name);
    HttpResponse::Created().json(favorite)
}

/// `DELETE /api/favorites/{id}`
pub async fn delete_favorite(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    let mut favorites = state.favorites();
    let previous = favorites.clone();

    if favorites.remove(&id).is_none() {
        return not_found(format!("Favorite not found: {id}"));
    }

    if let Err(e) = favorites.save(state.favorites_store.as_ref()) {
        log::error!("Failed to save favorites: {e}");
        *favorites = previous;
        return HttpResponse::InternalServerError().json(serde_json::json!({
            "error": "Failed to save favorites"
        }));
    }

    HttpResponse::NoContent().finish()
}

/// `GET /api/favorites/{id}/compare`
///
/// Ranks every carrier at a saved favorite.
pub async fn favorite_compare(
    state: web::Data<AppState>,
    path: web::Path<String>,
    params: web::Query<FavoriteCompareParams>,
) -> HttpResponse {
    let radius_km = match radius_or_default(params.radius_km) {
        Ok(r) => r,
        Err(response) => return response,
    };

    let id = path.into_inner();
    let Some(favorite) = state.favorites().get(&id).cloned() else {
        return not_found(format!("Favorite not found: {id}"));
    };

    let comparisons = state
        .snapshot()
        .compare(favorite.position(), radius_km, Carrier::all());

    HttpResponse::Ok().json(FavoriteCompareResponse {
        favorite,
        radius_km,
        comparisons,
    })
}
