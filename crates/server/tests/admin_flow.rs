use std::path::{Path, PathBuf};

use axum::{
    body::Body,
    http::{
        header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
        Request, StatusCode,
    },
    response::Response,
    Router,
};
use configs::AppConfig;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

struct TestApp {
    app: Router,
    data_dir: PathBuf,
    cookie: Option<String>,
}

impl TestApp {
    async fn start() -> anyhow::Result<Self> {
        let data_dir = std::env::temp_dir().join(format!("carwash_http_{}", Uuid::new_v4()));
        let mut cfg = AppConfig::default();
        cfg.storage.data_dir = data_dir.clone();
        let app = server::build_app(&cfg).await?;
        Ok(Self { app, data_dir, cookie: None })
    }

    /// Send a request carrying the session cookie, remembering a new one.
    async fn send(&mut self, req: Request<Body>) -> anyhow::Result<Response> {
        let mut req = req;
        if let Some(c) = &self.cookie {
            req.headers_mut().insert(COOKIE, c.parse()?);
        }
        let resp = self.app.clone().oneshot(req).await?;
        if let Some(set) = resp.headers().get(SET_COOKIE) {
            let pair = set.to_str()?.split(';').next().unwrap_or_default();
            self.cookie = Some(pair.to_string());
        }
        Ok(resp)
    }

    async fn get(&mut self, uri: &str) -> anyhow::Result<Response> {
        self.send(Request::get(uri).body(Body::empty())?).await
    }

    async fn get_json(&mut self, uri: &str) -> anyhow::Result<Value> {
        let resp = self.get(uri).await?;
        assert_eq!(resp.status(), StatusCode::OK, "GET {uri}");
        body_json(resp).await
    }

    async fn form(&mut self, uri: &str, body: &str) -> anyhow::Result<Response> {
        let req = Request::post(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))?;
        self.send(req).await
    }

    async fn json(&mut self, method: &str, uri: &str, body: Value) -> anyhow::Result<Response> {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))?;
        self.send(req).await
    }

    async fn delete(&mut self, uri: &str) -> anyhow::Result<Response> {
        self.send(Request::delete(uri).body(Body::empty())?).await
    }

    async fn login(&mut self) -> anyhow::Result<()> {
        let resp = self.form("/admin/login", "username=admin&password=admin123").await?;
        assert_redirect(&resp, "/admin");
        let view = self.get_json("/admin/login").await?;
        assert_eq!(view["authenticated"], json!(true));
        Ok(())
    }

    fn document(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{name}.json"))
    }

    async fn cleanup(self) {
        let _ = tokio::fs::remove_dir_all(&self.data_dir).await;
    }
}

async fn body_json(resp: Response) -> anyhow::Result<Value> {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn assert_redirect(resp: &Response, to: &str) {
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let location = resp.headers().get(LOCATION).and_then(|v| v.to_str().ok());
    assert_eq!(location, Some(to));
}

fn messages(view: &Value) -> Vec<String> {
    view["notices"]
        .as_array()
        .map(|ns| ns.iter().filter_map(|n| n["message"].as_str().map(str::to_string)).collect())
        .unwrap_or_default()
}

async fn read(path: &Path) -> anyhow::Result<Vec<u8>> {
    Ok(tokio::fs::read(path).await?)
}

async fn list_dir(dir: &Path) -> anyhow::Result<Vec<(String, u64)>> {
    let mut out = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        out.push((entry.file_name().to_string_lossy().into_owned(), entry.metadata().await?.len()));
    }
    out.sort();
    Ok(out)
}

#[tokio::test]
async fn health_is_public() -> anyhow::Result<()> {
    let mut app = TestApp::start().await?;
    let v = app.get_json("/health").await?;
    assert_eq!(v, json!({"status": "ok"}));
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn home_page_shows_seeded_content() -> anyhow::Result<()> {
    let mut app = TestApp::start().await?;
    let v = app.get_json("/").await?;
    assert_eq!(v["services"].as_array().map(Vec::len), Some(3));
    assert_eq!(v["reviews"].as_array().map(Vec::len), Some(2));
    assert!(v["settings"]["work_hours"]["sunday"]["enabled"].as_bool().unwrap_or(false));
    assert!(v["current_year"].as_i64().unwrap_or(0) >= 2024);
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn wrong_password_keeps_admin_locked() -> anyhow::Result<()> {
    let mut app = TestApp::start().await?;
    let before = read(&app.document("services")).await?;

    let resp = app.form("/admin/login", "username=admin&password=nope").await?;
    assert_redirect(&resp, "/admin/login");
    let view = app.get_json("/admin/login").await?;
    assert_eq!(view["authenticated"], json!(false));
    assert_eq!(messages(&view), vec!["Invalid username or password".to_string()]);

    let resp = app
        .json("POST", "/admin/services", json!({"title": "X", "description": "Y", "price": "1"}))
        .await?;
    assert_redirect(&resp, "/admin/login");
    assert_eq!(read(&app.document("services")).await?, before);

    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn exports_require_login() -> anyhow::Result<()> {
    let mut app = TestApp::start().await?;
    for uri in ["/admin/api/services", "/admin/api/reviews", "/admin", "/admin/settings"] {
        let resp = app.get(uri).await?;
        assert_redirect(&resp, "/admin/login");
    }

    app.login().await?;
    let services = app.get_json("/admin/api/services").await?;
    assert_eq!(services.as_array().map(Vec::len), Some(3));
    let reviews = app.get_json("/admin/api/reviews").await?;
    assert_eq!(reviews[0]["id"], json!(1));
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn service_crud_through_admin_panel() -> anyhow::Result<()> {
    let mut app = TestApp::start().await?;
    app.login().await?;

    let resp = app
        .json(
            "POST",
            "/admin/services",
            json!({"title": "Полировка", "description": "Кузов целиком", "price": "от 3000 ₽", "image": ""}),
        )
        .await?;
    assert_redirect(&resp, "/admin");
    let dash = app.get_json("/admin").await?;
    assert_eq!(messages(&dash), vec!["Service #4 added".to_string()]);
    assert_eq!(dash["username"], json!("admin"));

    let created = app.get_json("/admin/services/4").await?;
    assert_eq!(created["title"], json!("Полировка"));
    assert_eq!(created["image"], json!(models::catalog::DEFAULT_SERVICE_IMAGE));

    let resp = app
        .json("PUT", "/admin/services/4", json!({"title": "Полировка+", "description": "", "price": "3500"}))
        .await?;
    assert_redirect(&resp, "/admin");
    let updated = app.get_json("/admin/services/4").await?;
    assert_eq!(updated["title"], json!("Полировка+"));
    assert_eq!(updated["description"], json!(""));

    let resp = app.delete("/admin/services/4").await?;
    assert_redirect(&resp, "/admin");
    let resp = app.get("/admin/services/4").await?;
    assert_redirect(&resp, "/admin");
    let dash = app.get_json("/admin").await?;
    assert_eq!(
        messages(&dash),
        vec!["Service #4 deleted".to_string(), "Service #4 not found".to_string()]
    );

    let resp = app
        .json("POST", "/admin/services", json!({"title": "Воск", "description": "Защита", "price": "900"}))
        .await?;
    assert_redirect(&resp, "/admin");
    let services = app.get_json("/admin/api/services").await?;
    let ids: Vec<u64> = services
        .as_array()
        .map(|a| a.iter().filter_map(|s| s["id"].as_u64()).collect())
        .unwrap_or_default();
    assert_eq!(ids, vec![1, 2, 3, 5]);

    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn review_validation_and_rating_coercion() -> anyhow::Result<()> {
    let mut app = TestApp::start().await?;
    app.login().await?;

    let resp = app.json("POST", "/admin/reviews", json!({"name": "", "text": "ok", "rating": 5})).await?;
    assert_redirect(&resp, "/admin");
    let dash = app.get_json("/admin").await?;
    assert_eq!(dash["reviews"].as_array().map(Vec::len), Some(2));
    assert!(messages(&dash)[0].starts_with("Please check the form"));

    let resp = app
        .json("POST", "/admin/reviews", json!({"name": "Анна", "text": "Быстро и чисто", "rating": "4"}))
        .await?;
    assert_redirect(&resp, "/admin");
    let review = app.get_json("/admin/reviews/3").await?;
    assert_eq!(review["rating"], json!(4));
    assert_eq!(review["date"], json!("Только что"));

    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn undecodable_input_becomes_a_notice() -> anyhow::Result<()> {
    let mut app = TestApp::start().await?;
    app.login().await?;
    let before = read(&app.document("reviews")).await?;

    let resp = app
        .json("POST", "/admin/reviews", json!({"name": "Анна", "text": "Чисто", "rating": "five"}))
        .await?;
    assert_redirect(&resp, "/admin");
    assert_eq!(read(&app.document("reviews")).await?, before);

    let resp = app.get("/admin/services/abc").await?;
    assert_redirect(&resp, "/admin");
    let resp = app.delete("/admin/reviews/-1").await?;
    assert_redirect(&resp, "/admin");

    let dash = app.get_json("/admin").await?;
    let notices = messages(&dash);
    assert_eq!(notices.len(), 3);
    assert!(notices.iter().all(|m| m.starts_with("Please check the form")), "{notices:?}");
    assert_eq!(dash["reviews"].as_array().map(Vec::len), Some(2));

    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn contact_form_with_wrong_encoding_is_sent_back() -> anyhow::Result<()> {
    let mut app = TestApp::start().await?;
    let resp = app.json("POST", "/submit_form", json!({"name": "Ivan", "phone": "1"})).await?;
    assert_redirect(&resp, "/services");
    let view = app.get_json("/services").await?;
    assert_eq!(view["notices"][0]["level"], json!("error"));
    assert!(messages(&view)[0].starts_with("Please check the form"));

    let resp = app.json("POST", "/admin/login", json!({"username": "admin"})).await?;
    assert_redirect(&resp, "/admin/login");
    let view = app.get_json("/admin/login").await?;
    assert_eq!(view["authenticated"], json!(false));

    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn updating_missing_record_leaves_file_untouched() -> anyhow::Result<()> {
    let mut app = TestApp::start().await?;
    app.login().await?;
    let before = read(&app.document("reviews")).await?;

    let resp = app
        .json("PUT", "/admin/reviews/99", json!({"name": "Z", "text": "Z", "rating": 3, "date": "вчера"}))
        .await?;
    assert_redirect(&resp, "/admin");
    assert_eq!(read(&app.document("reviews")).await?, before);
    let dash = app.get_json("/admin").await?;
    assert_eq!(messages(&dash), vec!["Review #99 not found".to_string()]);

    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn settings_patch_and_malformed_document() -> anyhow::Result<()> {
    let mut app = TestApp::start().await?;
    app.login().await?;

    let resp = app
        .json(
            "PUT",
            "/admin/settings",
            json!({"contact_info": {"phone": "+7 (900) 000-00-00"}, "work_hours": {"sunday": {"enabled": false}}}),
        )
        .await?;
    assert_redirect(&resp, "/admin");
    let settings = app.get_json("/admin/settings").await?;
    assert_eq!(settings["contact_info"]["phone"], json!("+7 (900) 000-00-00"));
    assert_eq!(settings["work_hours"]["sunday"]["enabled"], json!(false));
    assert_eq!(settings["work_hours"]["sunday"]["open"], json!("10:00"));

    let broken = json!({"site_name": "X", "work_hours": {}, "social_links": {"vk": "", "instagram": "", "telegram": ""}});
    tokio::fs::write(app.document("settings"), broken.to_string()).await?;
    let before = read(&app.document("settings")).await?;

    let resp = app.json("PUT", "/admin/settings", json!({"contact_info": {"phone": "1"}})).await?;
    assert_redirect(&resp, "/admin");
    assert_eq!(read(&app.document("settings")).await?, before);
    let dash = app.get_json("/admin").await?;
    assert!(messages(&dash).contains(&"Stored data is damaged; nothing was changed".to_string()));

    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn contact_form_flashes_once() -> anyhow::Result<()> {
    let mut app = TestApp::start().await?;
    let files_before = list_dir(&app.data_dir).await?;
    let resp = app.form("/submit_form", "name=Ivan&phone=%2B79000000000&message=").await?;
    assert_redirect(&resp, "/services");
    let view = app.get_json("/services").await?;
    assert_eq!(messages(&view), vec!["Спасибо, Ivan! Ваша заявка принята.".to_string()]);
    let view = app.get_json("/services").await?;
    assert!(messages(&view).is_empty());

    let resp = app.form("/submit_form", "name=Ivan&phone=&message=hi").await?;
    assert_redirect(&resp, "/services");
    let view = app.get_json("/services").await?;
    assert_eq!(view["notices"][0]["level"], json!("error"));
    assert_eq!(list_dir(&app.data_dir).await?, files_before);

    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn logout_locks_the_session_again() -> anyhow::Result<()> {
    let mut app = TestApp::start().await?;
    app.login().await?;
    assert_eq!(app.get("/admin").await?.status(), StatusCode::OK);

    let resp = app.get("/admin/logout").await?;
    assert_redirect(&resp, "/");
    let resp = app.get("/admin").await?;
    assert_redirect(&resp, "/admin/login");

    app.cleanup().await;
    Ok(())
}
