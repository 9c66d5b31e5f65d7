//! HTTP surface: JSON shapes, error statuses, and asset round-trips

#[cfg(test)]
mod tests {
    use crate::fixtures::{catalog_at, populated_tree, write_file};
    use actix_web::{http::StatusCode, test, web, App};
    use serde_json::Value;
    use showcase_server::routes;
    use tempfile::TempDir;

    macro_rules! app {
        ($root:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(catalog_at($root)))
                    .configure(routes::configure),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_health() {
        let temp = TempDir::new().unwrap();
        let app = app!(temp.path());

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "OK");
        assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
        assert_eq!(body["photoCategories"], serde_json::json!(["landscapes", "people"]));
        assert_eq!(body["videoCategories"], serde_json::json!(["activity", "TVC"]));
        assert!(body.get("mediaPath").is_none());
    }

    #[actix_web::test]
    async fn test_category_summaries_shape() {
        let temp = TempDir::new().unwrap();
        populated_tree(temp.path());
        let app = app!(temp.path());

        let req = test::TestRequest::get().uri("/api/video-categories").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let summaries = body.as_array().unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0]["key"], "activity");
        assert_eq!(summaries[0]["displayName"], "活动");
        assert_eq!(summaries[0]["itemCount"], 1);
        assert_eq!(summaries[0]["cover"]["url"], "/assets/video/activity/launch.mp4");
        assert!(summaries[1]["cover"].is_null());
    }

    #[actix_web::test]
    async fn test_unknown_category_is_404_without_paths() {
        let temp = TempDir::new().unwrap();
        populated_tree(temp.path());
        let app = app!(temp.path());

        let req = test::TestRequest::get().uri("/api/photos/cats").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        let message = body["error"].as_str().unwrap();
        assert!(message.contains("cats"));
        assert!(!message.contains(temp.path().to_str().unwrap()));
    }

    #[actix_web::test]
    async fn test_items_in_category() {
        let temp = TempDir::new().unwrap();
        populated_tree(temp.path());
        let app = app!(temp.path());

        let req = test::TestRequest::get().uri("/api/photos/people").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["name"], "portrait.webp");
        assert_eq!(items[0]["sizeBytes"], 7);
        assert_eq!(items[0]["kind"], "photo");
        assert_eq!(items[0]["categoryKey"], "people");
        assert_eq!(items[0]["categoryDisplayName"], "人物");
    }

    #[actix_web::test]
    async fn test_media_lists_photos_then_videos() {
        let temp = TempDir::new().unwrap();
        populated_tree(temp.path());
        let app = app!(temp.path());

        let req = test::TestRequest::get().uri("/api/media").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let kinds: Vec<&str> = body.as_array().unwrap().iter().map(|item| item["kind"].as_str().unwrap()).collect();
        assert_eq!(kinds, vec!["photo", "photo", "photo", "video"]);
    }

    #[actix_web::test]
    async fn test_every_url_serves_the_scanned_file() {
        let temp = TempDir::new().unwrap();
        write_file(temp.path(), "photo/landscapes/my photo #1.jpg", 11);
        write_file(temp.path(), "photo/people/夏 天.png", 12);
        write_file(temp.path(), "video/TVC/50%+off.mp4", 13);
        let app = app!(temp.path());

        let req = test::TestRequest::get().uri("/api/media").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 3);

        for item in items {
            let url = item["url"].as_str().unwrap();
            let req = test::TestRequest::get().uri(url).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK, "{}", url);

            let bytes = test::read_body(resp).await;
            assert_eq!(bytes.len() as u64, item["sizeBytes"].as_u64().unwrap(), "{}", url);
        }
    }

    #[actix_web::test]
    async fn test_asset_headers() {
        let temp = TempDir::new().unwrap();
        populated_tree(temp.path());
        let app = app!(temp.path());

        let req = test::TestRequest::get().uri("/assets/video/activity/launch.mp4").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("content-type").unwrap(), "video/mp4");
        assert!(resp.headers().get("content-disposition").unwrap().to_str().unwrap().starts_with("inline"));
        assert!(resp.headers().contains_key("etag"));
        assert!(resp.headers().contains_key("last-modified"));
        assert_eq!(test::read_body(resp).await.len(), 100);
    }

    #[actix_web::test]
    async fn test_asset_range_request_is_partial() {
        let temp = TempDir::new().unwrap();
        populated_tree(temp.path());
        let app = app!(temp.path());

        let req = test::TestRequest::get()
            .uri("/assets/video/activity/launch.mp4")
            .insert_header(("range", "bytes=0-9"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::PARTIAL_CONTENT);
        assert_eq!(resp.headers().get("content-range").unwrap(), "bytes 0-9/100");
        assert_eq!(test::read_body(resp).await.len(), 10);
    }

    #[actix_web::test]
    async fn test_asset_traversal_and_missing_files_are_404() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("media");
        populated_tree(&root);
        write_file(temp.path(), "secret.jpg", 1);
        write_file(&root, "photo/.secret", 1);
        write_file(&root, "photo/.hidden/a.jpg", 1);
        let app = app!(&root);

        for uri in [
            "/assets/%2E%2E/secret.jpg",
            "/assets/photo/.secret",
            "/assets/photo/.hidden/a.jpg",
            "/assets/photo/landscapes/nope.jpg",
            "/assets/photo/landscapes",
            "/assets/",
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", uri);
        }
    }

    #[actix_web::test]
    async fn test_unknown_route_is_json_404() {
        let temp = TempDir::new().unwrap();
        let app = app!(temp.path());

        let req = test::TestRequest::get().uri("/api/nothing").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "not found");
    }
}
