use actix_files::NamedFile;
use actix_web::{get, web, HttpRequest, HttpResponse};
use chrono::{SecondsFormat, Utc};
use log::{debug, error};
use serde_json::json;

use crate::{
    assets::{resolve_asset_path, ASSETS_PREFIX},
    catalog::Catalog,
    error::CatalogError,
    types::MediaKind,
};

/// Route table, logged at startup.
pub const ROUTES: &[(&str, &str)] = &[
    ("GET /api/health", "service status"),
    ("GET /api/photo-categories", "photo categories"),
    ("GET /api/video-categories", "video categories"),
    ("GET /api/photos/{category}", "photos in one category"),
    ("GET /api/videos/{category}", "videos in one category"),
    ("GET /api/photos", "all photos"),
    ("GET /api/videos", "all videos"),
    ("GET /api/media", "all photos then all videos"),
    ("GET /assets/*", "media files"),
];

#[get("/api/health")]
async fn health(catalog: web::Data<Catalog>) -> HttpResponse {
    let registry = catalog.registry();
    HttpResponse::Ok().json(json!({
        "status": "OK",
        "message": "media catalog service is running",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        "photoCategories": registry.keys(MediaKind::Photo),
        "videoCategories": registry.keys(MediaKind::Video),
    }))
}

#[get("/api/photo-categories")]
async fn photo_categories(catalog: web::Data<Catalog>) -> Result<HttpResponse, CatalogError> {
    Ok(HttpResponse::Ok().json(catalog.category_summaries(MediaKind::Photo).await?))
}

#[get("/api/video-categories")]
async fn video_categories(catalog: web::Data<Catalog>) -> Result<HttpResponse, CatalogError> {
    Ok(HttpResponse::Ok().json(catalog.category_summaries(MediaKind::Video).await?))
}

#[get("/api/photos/{category}")]
async fn photos_in_category(catalog: web::Data<Catalog>, category: web::Path<String>) -> Result<HttpResponse, CatalogError> {
    Ok(HttpResponse::Ok().json(catalog.category_items(MediaKind::Photo, &category).await?))
}

#[get("/api/videos/{category}")]
async fn videos_in_category(catalog: web::Data<Catalog>, category: web::Path<String>) -> Result<HttpResponse, CatalogError> {
    Ok(HttpResponse::Ok().json(catalog.category_items(MediaKind::Video, &category).await?))
}

#[get("/api/photos")]
async fn all_photos(catalog: web::Data<Catalog>) -> Result<HttpResponse, CatalogError> {
    Ok(HttpResponse::Ok().json(catalog.all_items(MediaKind::Photo).await?))
}

#[get("/api/videos")]
async fn all_videos(catalog: web::Data<Catalog>) -> Result<HttpResponse, CatalogError> {
    Ok(HttpResponse::Ok().json(catalog.all_items(MediaKind::Video).await?))
}

#[get("/api/media")]
async fn media(catalog: web::Data<Catalog>) -> Result<HttpResponse, CatalogError> {
    Ok(HttpResponse::Ok().json(catalog.combined_media().await?))
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "error": "not found" }))
}

// Uses the raw request path so names decode exactly as `asset_url` encoded them.
#[get("/assets/{tail:.*}")]
async fn asset(catalog: web::Data<Catalog>, req: HttpRequest) -> HttpResponse {
    let tail = match req.path().strip_prefix(ASSETS_PREFIX).and_then(|rest| rest.strip_prefix('/')) {
        Some(tail) => tail,
        None => return not_found(),
    };
    let path = match resolve_asset_path(catalog.config().media_root(), tail) {
        Some(path) => path,
        None => {
            debug!("rejected asset path {}", tail);
            return not_found()
        }
    };

    match tokio::fs::metadata(&path).await {
        Ok(metadata) if metadata.is_file() => {},
        Ok(_) => return not_found(),
        Err(err) if err.kind() == tokio::io::ErrorKind::NotFound => return not_found(),
        Err(err) => return asset_error("stat", &path, err),
    }

    // NamedFile answers Range and conditional requests and guesses the content type.
    match NamedFile::open_async(&path).await {
        Ok(file) => file.into_response(&req),
        Err(err) if err.kind() == tokio::io::ErrorKind::NotFound => not_found(),
        Err(err) => asset_error("open", &path, err),
    }
}

fn asset_error(operation: &str, path: &std::path::Path, err: std::io::Error) -> HttpResponse {
    error!("failed to {} asset {}: {}", operation, path.display(), err);
    HttpResponse::InternalServerError().json(json!({ "error": "failed to read media file" }))
}

async fn fallback() -> HttpResponse {
    not_found()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health)
        .service(photo_categories)
        .service(video_categories)
        .service(photos_in_category)
        .service(videos_in_category)
        .service(all_photos)
        .service(all_videos)
        .service(media)
        .service(asset)
        .default_service(web::route().to(fallback));
}
