use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::models::{ImageQuery, ImageResponse, StoreImageRequest};
use crate::routes::{ApiError, AppState};
use crate::services::ImageKey;

/// Configure image cache routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/images", web::get().to(get_image))
        .route("/images", web::put().to(put_image));
}

/// Look up a cached image URL
///
/// GET /api/v1/images?place={place}&region={region}
async fn get_image(
    state: web::Data<AppState>,
    query: web::Query<ImageQuery>,
) -> Result<HttpResponse, ApiError> {
    query.validate().map_err(|e| ApiError::Validation(e.to_string()))?;

    let key = ImageKey::place(&query.place, query.region.as_deref());
    match state.images.get(&key).await? {
        Some(url) => Ok(HttpResponse::Ok().json(ImageResponse {
            key,
            url: Some(url),
            stored: true,
        })),
        None => Err(ApiError::NotFound(format!("No cached image for {}", key))),
    }
}

/// Store an image URL resolved by a client
///
/// PUT /api/v1/images
async fn put_image(
    state: web::Data<AppState>,
    req: web::Json<StoreImageRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate().map_err(|e| ApiError::Validation(e.to_string()))?;
    if !req.has_web_url() {
        return Err(ApiError::Validation("url must be an absolute http(s) URL".to_string()));
    }

    let key = ImageKey::place(&req.place, req.region.as_deref());
    state.images.put(&key, req.url.trim()).await?;

    Ok(HttpResponse::Ok().json(ImageResponse {
        key,
        url: None,
        stored: true,
    }))
}
