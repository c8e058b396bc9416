mod common;

use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use serde_json::{Value, json};

use mygpa_server::cache::ObjectCache;
use mygpa_server::object_store::ObjectStore;
use mygpa_server::routes;
use mygpa_server::storage::Storage;
use mygpa_server::utils::{json_error_handler, query_error_handler};

use common::{local_object_store, memory_cache, memory_storage, temp_root, unique_email};

const PASSWORD: &str = "Quantum-Ledger-42";

struct Components {
    storage: Arc<dyn Storage>,
    cache: Arc<dyn ObjectCache>,
    object_store: Arc<dyn ObjectStore>,
}

async fn components() -> Components {
    let root = temp_root();
    Components {
        storage: memory_storage().await,
        cache: memory_cache(),
        object_store: local_object_store(&root),
    }
}

macro_rules! test_app {
    ($components:expr) => {
        test::init_service(
            App::new()
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::Data::new($components.storage.clone()))
                .app_data(web::Data::new($components.cache.clone()))
                .app_data(web::Data::new($components.object_store.clone()))
                .configure(routes::configure_routes),
        )
        .await
    };
}

// 每个测试使用不同的客户端 IP，避免共享的限流计数互相影响
fn client_ip() -> String {
    let id = uuid::Uuid::new_v4();
    let bytes = id.as_bytes();
    format!("10.{}.{}.{}", bytes[0], bytes[1], bytes[2])
}

fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

fn multipart_body(boundary: &str, file_name: &str, bytes: &[u8], name: Option<&str>) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some(name) = name {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\n{name}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

#[actix_web::test]
async fn test_signup_login_and_me() {
    let components = components().await;
    let app = test_app!(components);
    let ip = client_ip();
    let email = unique_email("signup");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .insert_header(("X-Forwarded-For", ip.as_str()))
        .set_json(json!({ "name": "Ada", "email": email.to_uppercase(), "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert!(resp.response().cookies().any(|c| c.name() == "refresh_token"));
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["profile"]["name"], "Ada");
    assert_eq!(body["data"]["profile"]["email"], email);

    // 重复注册
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .insert_header(("X-Forwarded-For", ip.as_str()))
        .set_json(json!({ "name": "Ada", "email": email, "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "An account with this email already exists.");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(("X-Forwarded-For", ip.as_str()))
        .set_json(json!({ "email": email, "password": PASSWORD, "remember_me": true }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let token = body["data"]["access_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["profile"]["email"], email);
}

#[actix_web::test]
async fn test_login_failure_messages() {
    let components = components().await;
    let app = test_app!(components);
    let ip = client_ip();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(("X-Forwarded-For", ip.as_str()))
        .set_json(json!({ "email": unique_email("ghost"), "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "No account found with this email.");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(("X-Forwarded-For", ip.as_str()))
        .set_json(json!({ "email": "not-an-email", "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid email address.");
}

#[actix_web::test]
async fn test_login_rate_limit() {
    let components = components().await;
    let app = test_app!(components);
    let ip = client_ip();
    let email = unique_email("limited");

    let mut last_status = StatusCode::OK;
    for attempt in 1..=6u32 {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .insert_header(("X-Forwarded-For", ip.as_str()))
            .set_json(json!({ "email": email, "password": "wrong-password" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        last_status = resp.status();
        if attempt <= 5 {
            let remaining = resp
                .headers()
                .get("x-ratelimit-remaining")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            assert_eq!(remaining, Some((5 - attempt).to_string()));
        }
        if last_status == StatusCode::TOO_MANY_REQUESTS {
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(
                body["message"],
                "Too many failed attempts. Please try again later."
            );
            break;
        }
    }
    assert_eq!(last_status, StatusCode::TOO_MANY_REQUESTS);
}

// 注册新账号，返回 (access_token, email)
macro_rules! signup {
    ($app:expr, $name:expr) => {{
        let email = unique_email($name);
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/signup")
            .insert_header(("X-Forwarded-For", client_ip()))
            .set_json(json!({ "name": $name, "email": email, "password": PASSWORD }))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        (
            body["data"]["access_token"].as_str().unwrap().to_string(),
            email,
        )
    }};
}

#[actix_web::test]
async fn test_academic_record_flow() {
    let components = components().await;
    let app = test_app!(components);
    let (token, _) = signup!(app, "scholar");

    let req = test::TestRequest::post()
        .uri("/api/v1/academic/years")
        .insert_header(bearer(&token))
        .set_json(json!({ "year_name": "  Year 1 " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["year_name"], "Year 1");
    let year_id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/academic/years/{year_id}/semesters"))
        .insert_header(bearer(&token))
        .set_json(json!({ "semester_name": "Semester 1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let semester_id = body["data"]["id"].as_i64().unwrap();

    for (code, credits, grade) in [("CS101", 3.0, "A"), ("CS102", 4.0, "b"), ("CS103", 2.0, "")] {
        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/academic/semesters/{semester_id}/modules"))
            .insert_header(bearer(&token))
            .set_json(json!({
                "module_code": code,
                "module_name": format!("{code} module"),
                "credits": credits,
                "grade": grade,
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    // 非法等级
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/academic/semesters/{semester_id}/modules"))
        .insert_header(bearer(&token))
        .set_json(json!({
            "module_code": "CS104",
            "module_name": "Bad grade",
            "credits": 3.0,
            "grade": "F",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/v1/academic/summary")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let gpa = body["data"]["overall"]["gpa"].as_f64().unwrap();
    assert!((gpa - (3.0 * 4.0 + 4.0 * 3.0) / 7.0).abs() < 1e-9);
    assert_eq!(body["data"]["overall"]["total_credits"], 7.0);
    assert_eq!(
        body["data"]["classification"],
        "Second Class (Upper Division)"
    );

    let req = test::TestRequest::get()
        .uri("/api/v1/academic")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let modules = &body["data"]["years"][0]["semesters"][0]["modules"];
    assert_eq!(modules.as_array().unwrap().len(), 3);
    assert_eq!(modules[1]["grade"], "B");
    assert_eq!(modules[1]["grade_points"], 3.0);
    assert!(modules[2]["grade"].is_null());

    // 其他账号看不到也改不了
    let (other_token, _) = signup!(app, "intruder");
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/academic/years/{year_id}"))
        .insert_header(bearer(&other_token))
        .set_json(json!({ "year_name": "Mine now" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/academic/years/{year_id}"))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/v1/academic")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"]["years"].as_array().unwrap().is_empty());
    assert_eq!(body["data"]["summary"]["classification"], "Not Available");
}

// POST 创建资源，返回新记录 ID
macro_rules! create {
    ($app:expr, $token:expr, $uri:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri(&$uri)
            .insert_header(bearer($token))
            .set_json($body)
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        body["data"]["id"].as_i64().unwrap()
    }};
}

#[actix_web::test]
async fn test_moves_into_foreign_parents_are_rejected() {
    let components = components().await;
    let app = test_app!(components);
    let (token, _) = signup!(app, "mover");
    let (other_token, _) = signup!(app, "landlord");

    let year_id = create!(app, &token, "/api/v1/academic/years".to_string(), json!({ "year_name": "Year 1" }));
    let semester_id = create!(
        app,
        &token,
        format!("/api/v1/academic/years/{year_id}/semesters"),
        json!({ "semester_name": "Semester 1" })
    );
    let module_id = create!(
        app,
        &token,
        format!("/api/v1/academic/semesters/{semester_id}/modules"),
        json!({ "module_code": "MA101", "module_name": "Calculus", "credits": 3.0, "grade": "A" })
    );

    let other_year = create!(app, &other_token, "/api/v1/academic/years".to_string(), json!({ "year_name": "Their Year" }));
    let other_semester = create!(
        app,
        &other_token,
        format!("/api/v1/academic/years/{other_year}/semesters"),
        json!({ "semester_name": "Their Semester" })
    );

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/academic/semesters/{semester_id}"))
        .insert_header(bearer(&token))
        .set_json(json!({ "semester_name": "Moved", "academic_year_id": other_year }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/academic/modules/{module_id}"))
        .insert_header(bearer(&token))
        .set_json(json!({
            "module_code": "MA101",
            "module_name": "Moved",
            "credits": 3.0,
            "grade": "A",
            "semester_id": other_semester,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // 反方向：对方也不能挂到我的学年下
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/academic/semesters/{other_semester}"))
        .insert_header(bearer(&other_token))
        .set_json(json!({ "semester_name": "Moved", "academic_year_id": year_id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri("/api/v1/academic")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let semester = &body["data"]["years"][0]["semesters"][0];
    assert_eq!(semester["id"], semester_id);
    assert_eq!(semester["semester_name"], "Semester 1");
    assert_eq!(semester["modules"][0]["id"], module_id);
    assert_eq!(semester["modules"][0]["module_name"], "Calculus");

    let req = test::TestRequest::get()
        .uri("/api/v1/academic")
        .insert_header(bearer(&other_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let semesters = body["data"]["years"][0]["semesters"].as_array().unwrap();
    assert_eq!(semesters.len(), 1);
    assert_eq!(semesters[0]["semester_name"], "Their Semester");
    assert!(semesters[0]["modules"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_invalid_path_parameter_is_bad_request() {
    let components = components().await;
    let app = test_app!(components);
    let (token, _) = signup!(app, "pathy");

    let req = test::TestRequest::delete()
        .uri("/api/v1/academic/modules/abc")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_requires_authentication() {
    let components = components().await;
    let app = test_app!(components);

    let req = test::TestRequest::get().uri("/api/v1/academic").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/v1/documents")
        .insert_header(bearer("not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_document_lifecycle() {
    let components = components().await;
    let app = test_app!(components);
    let (token, _) = signup!(app, "archivist");

    let boundary = "mygpa-boundary";
    let pdf = b"%PDF-1.4\n% test document\n";
    let req = test::TestRequest::post()
        .uri("/api/v1/documents")
        .insert_header(bearer(&token))
        .insert_header(("X-Forwarded-For", client_ip()))
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(multipart_body(boundary, "transcript.pdf", pdf, Some("My Transcript")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["file_name"], "My Transcript");
    assert_eq!(body["data"]["file_type"], "application/pdf");
    assert_eq!(body["data"]["file_size"], pdf.len());
    let document_id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::get()
        .uri("/api/v1/documents")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["items"][0]["size_label"], "25 Bytes");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/documents/{document_id}/download"))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.starts_with("attachment"));
    let bytes = test::read_body(resp).await;
    assert_eq!(&bytes[..], &pdf[..]);

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/documents/{document_id}"))
        .insert_header(bearer(&token))
        .set_json(json!({ "file_name": "  Final Transcript  " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["file_name"], "Final Transcript");

    let (other_token, _) = signup!(app, "snoop");
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/documents/{document_id}/download"))
        .insert_header(bearer(&other_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/documents/{document_id}"))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/v1/documents")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"]["items"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_document_upload_rejects_mismatched_content() {
    let components = components().await;
    let app = test_app!(components);
    let (token, _) = signup!(app, "forger");

    let boundary = "mygpa-boundary";
    let req = test::TestRequest::post()
        .uri("/api/v1/documents")
        .insert_header(bearer(&token))
        .insert_header(("X-Forwarded-For", client_ip()))
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(multipart_body(boundary, "fake.pdf", b"not a pdf", None))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/v1/documents")
        .insert_header(bearer(&token))
        .insert_header(("X-Forwarded-For", client_ip()))
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(multipart_body(boundary, "script.exe", b"MZ\x90\x00", None))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_avatar_upload_and_public_fetch() {
    let components = components().await;
    let app = test_app!(components);
    let (token, _) = signup!(app, "portrait");

    let png = [
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D,
    ];
    let boundary = "mygpa-boundary";
    let req = test::TestRequest::post()
        .uri("/api/v1/profile/avatar")
        .insert_header(bearer(&token))
        .insert_header(("X-Forwarded-For", client_ip()))
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(multipart_body(boundary, "me.png", &png, None))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let avatar_url = body["data"]["avatar_url"].as_str().unwrap().to_string();
    assert!(avatar_url.starts_with("/api/v1/storage/avatars/"));
    assert_eq!(body["data"]["profile"]["avatar_url"], avatar_url);

    let req = test::TestRequest::get().uri(&avatar_url).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    assert_eq!(content_type.as_deref(), Some("image/png"));

    let req = test::TestRequest::get()
        .uri("/api/v1/storage/avatars/../secret.txt")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// 上传一张 PNG 头像，返回公开地址
macro_rules! upload_avatar {
    ($app:expr, $token:expr, $file_name:expr) => {{
        let png = [
            0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D,
        ];
        let boundary = "mygpa-avatar";
        let req = test::TestRequest::post()
            .uri("/api/v1/profile/avatar")
            .insert_header(bearer($token))
            .insert_header(("X-Forwarded-For", client_ip()))
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            ))
            .set_payload(multipart_body(boundary, $file_name, &png, None))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        body["data"]["avatar_url"].as_str().unwrap().to_string()
    }};
}

#[actix_web::test]
async fn test_avatar_replacement_only_removes_own_objects() {
    let components = components().await;
    let app = test_app!(components);
    let (owner_token, _) = signup!(app, "owner");
    let (other_token, _) = signup!(app, "borrower");

    let owner_url = upload_avatar!(app, &owner_token, "owner.png");

    // 另一个账号把别人的头像地址写进自己的资料，再上传新头像
    let req = test::TestRequest::put()
        .uri("/api/v1/profile")
        .insert_header(bearer(&other_token))
        .set_json(json!({ "avatar_url": owner_url }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let other_url = upload_avatar!(app, &other_token, "borrower.png");
    assert_ne!(other_url, owner_url);

    let req = test::TestRequest::get().uri(&owner_url).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // 换自己的头像时旧对象被删除
    let replaced_url = upload_avatar!(app, &owner_token, "owner-new.png");
    assert_ne!(replaced_url, owner_url);

    let req = test::TestRequest::get().uri(&owner_url).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri(&replaced_url).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_profile_update() {
    let components = components().await;
    let app = test_app!(components);
    let (token, _) = signup!(app, "profiled");

    let req = test::TestRequest::put()
        .uri("/api/v1/profile")
        .insert_header(bearer(&token))
        .set_json(json!({ "university_name": " University of Leeds ", "degree_program": "BSc Physics" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["profile"]["university_name"], "University of Leeds");
    assert_eq!(body["data"]["profile"]["name"], "profiled");

    let req = test::TestRequest::put()
        .uri("/api/v1/profile")
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_password_reset_flow() {
    let components = components().await;
    let app = test_app!(components);
    let (_, email) = signup!(app, "forgetful");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/password-reset")
        .insert_header(("X-Forwarded-For", client_ip()))
        .set_json(json!({ "email": unique_email("nobody") }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "No account found with this email address.");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/password-reset")
        .insert_header(("X-Forwarded-For", client_ip()))
        .set_json(json!({ "email": email }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let reset_token = body["data"]["reset_token"].as_str().unwrap().to_string();

    let new_password = "Harbour-Lantern-77";
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/password-reset/confirm")
        .insert_header(("X-Forwarded-For", client_ip()))
        .set_json(json!({ "token": reset_token, "new_password": new_password }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // 令牌只能使用一次
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/password-reset/confirm")
        .insert_header(("X-Forwarded-For", client_ip()))
        .set_json(json!({ "token": reset_token, "new_password": new_password }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(("X-Forwarded-For", client_ip()))
        .set_json(json!({ "email": email, "password": new_password }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // 同一令牌并发确认，只有一个成功
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/password-reset")
        .insert_header(("X-Forwarded-For", client_ip()))
        .set_json(json!({ "email": email }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let reset_token = body["data"]["reset_token"].as_str().unwrap().to_string();

    let confirm = |password: &str| {
        test::TestRequest::post()
            .uri("/api/v1/auth/password-reset/confirm")
            .insert_header(("X-Forwarded-For", client_ip()))
            .set_json(json!({ "token": reset_token, "new_password": password }))
            .to_request()
    };
    let (first, second) = futures_util::future::join(
        test::call_service(&app, confirm("Orchard-Beacon-31")),
        test::call_service(&app, confirm("Granite-Falcon-58")),
    )
    .await;
    let mut statuses = vec![first.status(), second.status()];
    statuses.sort_by_key(|status| status.as_u16());
    assert_eq!(statuses, vec![StatusCode::OK, StatusCode::BAD_REQUEST]);
}

#[actix_web::test]
async fn test_refresh_and_logout() {
    let components = components().await;
    let app = test_app!(components);
    let email = unique_email("refresher");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .insert_header(("X-Forwarded-For", client_ip()))
        .set_json(json!({ "name": "Refresher", "email": email, "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let refresh_cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "refresh_token")
        .map(|c| c.into_owned())
        .unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .cookie(refresh_cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"]["access_token"].as_str().is_some());

    let req = test::TestRequest::post().uri("/api/v1/auth/refresh").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post().uri("/api/v1/auth/logout").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cleared = resp
        .response()
        .cookies()
        .find(|c| c.name() == "refresh_token")
        .map(|c| c.value().to_string());
    assert_eq!(cleared.as_deref(), Some(""));
}
