use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use std::sync::Arc;
use tagwiki::web::{router, AppState};
use tagwiki::Config;
use tower::ServiceExt;

const USER_HEADER: &str = "x-remote-user";

fn create_test_app(config_toml: &str) -> Router {
    let config = Config::parse(config_toml).expect("Failed to parse test config");
    let state = AppState::new(config).expect("Failed to build app state");
    router(Arc::new(state))
}

fn default_app() -> Router {
    create_test_app(
        r#"
        [site]
        title = "Test Wiki"

        [auth]
        admins = ["root"]

        [tags]
        seed = ["rust;web", "rust", "cooking"]
        "#,
    )
}

fn get(uri: &str, user: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(user) = user {
        builder = builder.header(USER_HEADER, user);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_form(uri: &str, user: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(user) = user {
        builder = builder.header(USER_HEADER, user);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

mod home_tests {
    use super::*;

    #[tokio::test]
    async fn test_home_anonymous() {
        let response = default_app().oneshot(get("/", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        assert!(body.contains("Not logged in"));
        assert!(body.contains(r#"<a href="/login">Login</a>"#));
        assert!(!body.contains("New page"));
        assert!(!body.contains("Site settings"));
        assert!(body.contains(r#"href="/assets/css/wiki.css""#));
    }

    #[tokio::test]
    async fn test_home_logged_in_user() {
        let response = default_app().oneshot(get("/", Some("alice"))).await.unwrap();
        let body = body_string(response).await;
        assert!(body.contains("Logged in as alice"));
        assert!(body.contains(r#"<a href="/pages/new">New page</a>"#));
        assert!(body.contains(r#"<a href="/logout">Logout</a>"#));
        assert!(!body.contains("Site settings"));
    }

    #[tokio::test]
    async fn test_home_admin_sees_settings() {
        let response = default_app().oneshot(get("/", Some("root"))).await.unwrap();
        let body = body_string(response).await;
        assert!(body.contains(r#"<a href="/settings">Site settings</a>"#));
    }

    #[tokio::test]
    async fn test_home_windows_authentication_hides_logout() {
        let app = create_test_app("[auth]\nwindows_authentication = true");
        let response = app.oneshot(get("/", Some("alice"))).await.unwrap();
        let body = body_string(response).await;
        assert!(body.contains("Logged in as alice"));
        assert!(!body.contains("Logout"));
    }

    #[tokio::test]
    async fn test_home_tag_cloud_classes() {
        let response = default_app().oneshot(get("/", None)).await.unwrap();
        let body = body_string(response).await;
        assert!(body.contains(r#"<li class="tagcloud2"><a href="/pages/tag/rust">rust</a></li>"#));
        assert!(body.contains(r#"<li class="tagcloud1"><a href="/pages/tag/web">web</a></li>"#));
    }

    #[tokio::test]
    async fn test_home_without_tags() {
        let app = create_test_app("");
        let response = app.oneshot(get("/", None)).await.unwrap();
        let body = body_string(response).await;
        assert!(body.contains("No tags yet."));
    }

    #[tokio::test]
    async fn test_app_root_prefixes_links() {
        let app = create_test_app("[site]\napp_root = \"/wiki\"");
        let response = app.oneshot(get("/", None)).await.unwrap();
        let body = body_string(response).await;
        assert!(body.contains(r#"<a href="/wiki/login">Login</a>"#));
        assert!(body.contains(r#"href="/wiki/assets/css/wiki.css""#));
    }
}

mod tag_tests {
    use super::*;

    #[tokio::test]
    async fn test_all_tags_json() {
        let response = default_app()
            .oneshot(get("/pages/alltags", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        let tags: Vec<String> = serde_json::from_str(&body).unwrap();
        assert_eq!(tags, vec!["cooking", "rust", "web"]);
    }

    #[tokio::test]
    async fn test_tag_page() {
        let response = default_app()
            .oneshot(get("/pages/tag/rust", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        assert!(body.contains(r#"<h1 class="tagcloud2">rust</h1>"#));
        assert!(body.contains("2 pages tagged."));
    }

    #[tokio::test]
    async fn test_unknown_tag_is_404() {
        let response = default_app()
            .oneshot(get("/pages/tag/nope", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

mod edit_tests {
    use super::*;

    #[tokio::test]
    async fn test_new_page_form_requires_login() {
        let response = default_app()
            .oneshot(get("/pages/new", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_new_page_form() {
        let response = default_app()
            .oneshot(get("/pages/new", Some("alice")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        assert!(body.contains(r#"src="/assets/scripts/edit.js""#));
        assert!(body.contains(r#"var WIKI_TAGAJAXURL = "/pages/alltags";"#));
        assert!(body.contains(r#"var WIKI_PREVIEWURL = "/pages/preview";"#));
    }

    #[tokio::test]
    async fn test_preview_requires_login() {
        let response = default_app()
            .oneshot(post_form("/pages/preview", None, "id=%2A%2Ahi%2A%2A"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_preview_renders_markup() {
        let response = default_app()
            .oneshot(post_form(
                "/pages/preview",
                Some("alice"),
                "id=%2A%2Ahi%2A%2A+see+%5B%5BMain+Page%5D%5D",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        assert!(body.contains(r#"<div class="preview-content">"#));
        assert!(body.contains("<strong>hi</strong>"));
        assert!(body.contains(r#"href="/pages/Main-Page""#));
    }

    #[tokio::test]
    async fn test_create_page_named_like_fixed_route() {
        let app = default_app();

        let response = app
            .clone()
            .oneshot(post_form(
                "/pages/new",
                Some("alice"),
                "title=new&content=Body+of+new",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert_eq!(location, "/pages/new-2");

        let response = app.clone().oneshot(get(&location, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("Body of new"));
    }

    #[tokio::test]
    async fn test_create_page_flow() {
        let app = default_app();

        let response = app
            .clone()
            .oneshot(post_form(
                "/pages/new",
                Some("alice"),
                "title=Hello%2C+World%21&content=%23+Intro&tags=rust%3Bnewtag",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/pages/Hello-World"
        );

        let response = app
            .clone()
            .oneshot(get("/pages/Hello-World", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("Hello, World!"));
        assert!(body.contains(r#"<h1 id="Intro">Intro</h1>"#));
        assert!(body.contains(
            r#"<span class="tagblock"><a href="/pages/tag/newtag">newtag</a></span>"#
        ));

        let response = app
            .clone()
            .oneshot(get("/pages/alltags", None))
            .await
            .unwrap();
        let tags: Vec<String> = serde_json::from_str(&body_string(response).await).unwrap();
        assert!(tags.contains(&"newtag".to_string()));

        let response = app
            .clone()
            .oneshot(get("/pages/tag/rust", None))
            .await
            .unwrap();
        let body = body_string(response).await;
        assert!(body.contains("3 pages tagged."));
        assert!(body.contains(r#"<a href="/pages/Hello-World">Hello, World!</a>"#));
    }

    #[tokio::test]
    async fn test_create_page_duplicate_title() {
        let app = default_app();
        for expected in ["/pages/Same", "/pages/Same-2"] {
            let response = app
                .clone()
                .oneshot(post_form("/pages/new", Some("alice"), "title=Same"))
                .await
                .unwrap();
            assert_eq!(response.headers().get(header::LOCATION).unwrap(), expected);
        }
    }

    #[tokio::test]
    async fn test_create_page_unusable_title() {
        let response = default_app()
            .oneshot(post_form("/pages/new", Some("alice"), "title=%3F%21%3F"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_page_requires_login() {
        let response = default_app()
            .oneshot(post_form("/pages/new", None, "title=Anything"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_missing_page_is_404() {
        let response = default_app()
            .oneshot(get("/pages/Nothing-Here", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

mod api_tests {
    use super::*;

    #[tokio::test]
    async fn test_slug_endpoint() {
        let response = default_app()
            .oneshot(get("/api/slug?title=Hello%2C%20World%21", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["title"], "Hello, World!");
        assert_eq!(body["slug"], "Hello-World");
    }

    #[tokio::test]
    async fn test_slug_endpoint_unicode() {
        let response = default_app()
            .oneshot(get(
                "/api/slug?title=%E6%97%A5%E6%9C%AC%E8%AA%9E%20%E3%82%BF%E3%82%A4%E3%83%88%E3%83%AB",
                None,
            ))
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["slug"], "日本語-タイトル");
    }

    #[tokio::test]
    async fn test_slug_endpoint_empty_title() {
        let response = default_app()
            .oneshot(get("/api/slug", None))
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["slug"], "");
    }

    #[tokio::test]
    async fn test_static_assets_served() {
        let response = default_app()
            .oneshot(get("/assets/css/wiki.css", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
