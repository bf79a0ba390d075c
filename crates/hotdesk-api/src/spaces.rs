use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use hotdesk_types::api::SpaceInput;
use hotdesk_types::models::Space;

use crate::auth::AppState;
use crate::convert;
use crate::error::ApiError;
use crate::middleware::Identity;
use crate::policy::{self, Capability};

#[derive(Debug, Deserialize)]
pub struct SpaceQuery {
    pub location: Option<String>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<f64>,
    /// Comma-separated amenity tags; a space must carry all of them.
    pub amenities: Option<String>,
}

/// Catalog matching policy: case-insensitive location substring, inclusive
/// price upper bound, amenity superset. Availability is filtered at the query
/// level — only available spaces ever reach this.
#[derive(Debug, Default)]
pub struct SpaceFilter {
    location: Option<String>,
    max_price: Option<f64>,
    amenities: Vec<String>,
}

impl SpaceFilter {
    pub fn from_query(query: &SpaceQuery) -> Self {
        Self {
            location: query
                .location
                .as_deref()
                .map(str::to_lowercase)
                .filter(|s| !s.is_empty()),
            max_price: query.max_price,
            amenities: query
                .amenities
                .as_deref()
                .map(|s| {
                    s.split(',')
                        .map(|a| a.trim().to_string())
                        .filter(|a| !a.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    pub fn matches(&self, space: &Space) -> bool {
        if let Some(needle) = &self.location {
            if !space.location.to_lowercase().contains(needle.as_str()) {
                return false;
            }
        }

        if let Some(max) = self.max_price {
            if space.price > max {
                return false;
            }
        }

        self.amenities
            .iter()
            .all(|wanted| space.amenities.iter().any(|have| have == wanted))
    }
}

/// GET /spaces — public. Result order is unspecified.
pub async fn list_spaces(
    State(state): State<AppState>,
    Query(query): Query<SpaceQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    let rows = tokio::task::spawn_blocking(move || db.db.list_available_spaces()).await??;

    let filter = SpaceFilter::from_query(&query);
    let spaces: Vec<Space> = rows
        .into_iter()
        .map(convert::space_from_row)
        .filter(|s| filter.matches(s))
        .collect();

    Ok(Json(spaces))
}

/// POST /spaces — admin only.
pub async fn create_space(
    State(state): State<AppState>,
    Identity(claims): Identity,
    Json(req): Json<SpaceInput>,
) -> Result<impl IntoResponse, ApiError> {
    policy::authorize(&claims, Capability::Admin)?;
    validate_space(&req)?;

    let space_id = Uuid::new_v4();
    let amenities_json = serde_json::to_string(&req.amenities).map_err(anyhow::Error::from)?;

    let db = state.clone();
    let (name, location) = (req.name.clone(), req.location.clone());
    let (price, availability) = (req.price, req.availability);
    tokio::task::spawn_blocking(move || {
        db.db.insert_space(
            &space_id.to_string(),
            &name,
            &location,
            price,
            &amenities_json,
            availability,
        )
    })
    .await??;

    Ok((
        StatusCode::CREATED,
        Json(Space {
            id: space_id,
            name: req.name,
            location: req.location,
            price: req.price,
            amenities: req.amenities,
            availability: req.availability,
            created_at: chrono::Utc::now(),
        }),
    ))
}

/// PUT /spaces/{id} — admin only. Full-record replace.
pub async fn update_space(
    State(state): State<AppState>,
    Identity(claims): Identity,
    Path(space_id): Path<Uuid>,
    Json(req): Json<SpaceInput>,
) -> Result<impl IntoResponse, ApiError> {
    policy::authorize(&claims, Capability::Admin)?;
    validate_space(&req)?;

    let amenities_json = serde_json::to_string(&req.amenities).map_err(anyhow::Error::from)?;

    let db = state.clone();
    let id = space_id.to_string();
    let row = tokio::task::spawn_blocking(move || {
        let found = db.db.update_space(
            &id,
            &req.name,
            &req.location,
            req.price,
            &amenities_json,
            req.availability,
        )?;
        if !found {
            return Ok(None);
        }
        db.db.get_space(&id)
    })
    .await??
    .ok_or(ApiError::NotFound("Space"))?;

    Ok(Json(convert::space_from_row(row)))
}

/// DELETE /spaces/{id} — admin only. Existing bookings are left dangling.
pub async fn delete_space(
    State(state): State<AppState>,
    Identity(claims): Identity,
    Path(space_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    policy::authorize(&claims, Capability::Admin)?;

    let db = state.clone();
    let id = space_id.to_string();
    let deleted = tokio::task::spawn_blocking(move || db.db.delete_space(&id)).await??;

    if !deleted {
        return Err(ApiError::NotFound("Space"));
    }

    Ok(Json(serde_json::json!({ "message": "Space deleted" })))
}

fn validate_space(input: &SpaceInput) -> Result<(), ApiError> {
    if input.name.trim().is_empty() || input.location.trim().is_empty() {
        return Err(ApiError::Validation("Name and location are required".into()));
    }
    if !input.price.is_finite() || input.price < 0.0 {
        return Err(ApiError::Validation(
            "Price must be a non-negative number".into(),
        ));
    }
    Ok(())
}
