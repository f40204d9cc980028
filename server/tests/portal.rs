mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::Value;

use common::{body_bytes, body_text, location, multipart_body, TestApp, BOUNDARY};
use portal_server::models::{EventForm, RegistrationForm};
use portal_server::session::{ADMIN_COOKIE, FLASH_COOKIE};
use portal_server::store::{activity, events, feedback, gallery, materials, registrations};

const PNG: &[u8] = b"\x89PNG\r\n\x1a\nnot-really-a-png";

async fn seed_event(app: &TestApp, title: &str) -> i64 {
    let form = EventForm {
        title: title.into(),
        event_date: "2024-11-20".into(),
        ..EventForm::default()
    };
    events::create(&app.pool, &form, "").await.unwrap()
}

#[tokio::test]
async fn admin_routes_redirect_to_login_without_session() {
    let mut app = TestApp::new().await;

    for uri in ["/dashboard", "/logs", "/edit_event/1", "/event-registrations/1"] {
        let response = app.get(uri).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), "/login", "{uri}");
    }

    feedback::submit(&app.pool, "keep me").await.unwrap();
    let response = app.post_form("/clear_inbox", "").await;
    assert_eq!(location(&response), "/login");
    assert_eq!(feedback::list(&app.pool).await.unwrap().len(), 1);
}

#[tokio::test]
async fn login_opens_the_dashboard_and_logout_closes_it() {
    let mut app = TestApp::new().await;
    app.login().await;
    assert!(app.has_cookie(ADMIN_COOKIE));

    let response = app.get("/dashboard").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Admin dashboard"));

    let response = app.get("/logout").await;
    assert_eq!(location(&response), "/");
    assert!(!app.has_cookie(ADMIN_COOKIE));

    let response = app.get("/dashboard").await;
    assert_eq!(location(&response), "/login");

    let actions: Vec<String> = activity::list(&app.pool)
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.action)
        .collect();
    assert_eq!(actions, ["User logged out", "User logged in: admin"]);
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let mut app = TestApp::new().await;

    let response = app
        .post_form("/login", "username=admin&password=letmein")
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Invalid username or password"));
    assert!(!app.has_cookie(ADMIN_COOKIE));

    let logs = activity::list(&app.pool).await.unwrap();
    assert_eq!(logs[0].action, "Failed login attempt for: admin");
}

#[tokio::test]
async fn forged_session_cookie_is_ignored() {
    let mut app = TestApp::new().await;
    let request = Request::get("/dashboard")
        .header(header::COOKIE, format!("{ADMIN_COOKIE}=1"))
        .body(Body::empty())
        .unwrap();

    let response = app.send(request).await;
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn ajax_feedback_gets_json() {
    let mut app = TestApp::new().await;

    let ajax = |body: &str| {
        Request::post("/submit_feedback")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header("X-Requested-With", "XMLHttpRequest")
            .body(Body::from(body.to_string()))
            .unwrap()
    };

    let response = app.send(ajax("message=+++")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Please enter a message");

    let response = app.send(ajax("message=Library+hours+please")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["success"], true);

    let stored = feedback::list(&app.pool).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].message, "Library hours please");
}

#[tokio::test]
async fn form_feedback_redirects_with_flash() {
    let mut app = TestApp::new().await;

    let response = app.post_form("/submit_feedback", "message=").await;
    assert_eq!(location(&response), "/");
    assert!(app.has_cookie(FLASH_COOKIE));

    let page = body_text(app.get("/").await).await;
    assert!(page.contains("Please enter a message"));
    // Shown once.
    assert!(!app.has_cookie(FLASH_COOKIE));
    assert!(feedback::list(&app.pool).await.unwrap().is_empty());

    app.post_form("/submit_feedback", "message=More+hackathons").await;
    let page = body_text(app.get("/").await).await;
    assert!(page.contains("Your voice matters"));
}

#[tokio::test]
async fn feedback_accepts_multipart_and_answers_bad_bodies_with_json() {
    let mut app = TestApp::new().await;

    let multipart = |xhr: bool| {
        let mut request = Request::post("/submit_feedback").header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
        if xhr {
            request = request.header("X-Requested-With", "XMLHttpRequest");
        }
        request
            .body(Body::from(multipart_body(&[("message", "hello via FormData")], None)))
            .unwrap()
    };

    let response = app.send(multipart(true)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["success"], true);

    let response = app.send(multipart(false)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let response = app
        .send(
            Request::post("/submit_feedback")
                .header(header::CONTENT_TYPE, "application/json")
                .header("X-Requested-With", "XMLHttpRequest")
                .body(Body::from(r#"{"message":"json body"}"#))
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Please enter a message");

    let stored = feedback::list(&app.pool).await.unwrap();
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|f| f.message == "hello via FormData"));
}

#[tokio::test]
async fn clearing_the_inbox_reports_the_count() {
    let mut app = TestApp::new().await;
    for message in ["one", "two", "three"] {
        feedback::submit(&app.pool, message).await.unwrap();
    }

    app.login().await;
    let response = app.post_form("/clear_inbox", "").await;
    assert_eq!(location(&response), "/dashboard");

    let page = body_text(app.get("/dashboard").await).await;
    assert!(page.contains("Successfully deleted 3 feedback message(s)."));
    assert!(feedback::list(&app.pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn registering_twice_is_refused() {
    let mut app = TestApp::new().await;
    let event_id = seed_event(&app, "Robotics Meetup").await;
    let body = "name=Kiran&dept_no=ME21&class_section=B&phone=";

    let response = app.post_form(&format!("/register/{event_id}"), body).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/registration-success/{event_id}"));

    let page = body_text(app.get(&location(&response)).await).await;
    assert!(page.contains("Registration successful!"));

    let response = app.post_form(&format!("/register/{event_id}"), body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("already registered for this event"));

    assert_eq!(
        registrations::list_for_event(&app.pool, event_id).await.unwrap().len(),
        1
    );
}

#[tokio::test]
async fn registration_requires_fields_and_an_event() {
    let mut app = TestApp::new().await;
    let event_id = seed_event(&app, "Quiz").await;

    let response = app
        .post_form(&format!("/register/{event_id}"), "name=Kiran&dept_no=&class_section=B")
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Name, Dept No. and Class Section are required"));

    let response = app
        .post_form("/register/9999", "name=Kiran&dept_no=1&class_section=B")
        .await;
    assert_eq!(location(&response), "/events");
}

#[tokio::test]
async fn disallowed_upload_creates_no_record() {
    let mut app = TestApp::new().await;
    app.login().await;

    let response = app
        .post_multipart(
            "/upload_photo",
            &[("caption", "totally a photo")],
            Some(("payload.exe", b"MZ")),
        )
        .await;
    assert_eq!(location(&response), "/dashboard");
    assert!(gallery::list(&app.pool).await.unwrap().is_empty());
    assert!(!app.upload_dir.join("payload.exe").exists());

    let page = body_text(app.get("/dashboard").await).await;
    assert!(page.contains("Only image files are allowed"));

    app.post_multipart(
        "/upload_photo",
        &[("caption", "Sports day")],
        Some(("sports day.png", PNG)),
    )
    .await;
    let photos = gallery::list(&app.pool).await.unwrap();
    assert_eq!(photos.len(), 1);
    assert_eq!(photos[0].image_file, "sports_day.png");
    assert!(app.upload_dir.join("sports_day.png").exists());
}

#[tokio::test]
async fn uploaded_images_are_served() {
    let mut app = TestApp::new().await;
    app.login().await;
    app.post_multipart("/upload_photo", &[("caption", "")], Some(("logo.png", PNG)))
        .await;

    let response = app.get("/static/uploads/logo.png").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, PNG);
}

#[tokio::test]
async fn deleting_an_event_removes_registrations_and_image() {
    let mut app = TestApp::new().await;
    app.login().await;

    let response = app
        .post_multipart(
            "/add_event",
            &[
                ("title", "Alumni Talk"),
                ("event_date", "2024-12-01"),
                ("event_manager", "Prof. Iyer"),
                ("contact_number", "080-1234"),
                ("description", "Career paths"),
            ],
            Some(("alumni.jpg", PNG)),
        )
        .await;
    assert_eq!(location(&response), "/dashboard");

    let event = events::list(&app.pool).await.unwrap().remove(0);
    assert_eq!(event.image_file, "alumni.jpg");
    assert!(app.upload_dir.join("alumni.jpg").exists());

    let attendee = RegistrationForm {
        name: "Devi".into(),
        dept_no: "CS55".into(),
        class_section: "A".into(),
        phone: String::new(),
    };
    registrations::register(&app.pool, event.id, &attendee)
        .await
        .unwrap();

    let response = app.post_form(&format!("/delete_event/{}", event.id), "").await;
    assert_eq!(location(&response), "/dashboard");

    assert!(events::find(&app.pool, event.id).await.unwrap().is_none());
    assert!(registrations::list_for_event(&app.pool, event.id)
        .await
        .unwrap()
        .is_empty());
    assert!(!app.upload_dir.join("alumni.jpg").exists());
}

#[tokio::test]
async fn event_without_title_is_rejected() {
    let mut app = TestApp::new().await;
    app.login().await;

    app.post_multipart(
        "/add_event",
        &[("title", " "), ("event_date", "2024-12-01")],
        Some(("orphan.png", PNG)),
    )
    .await;

    assert!(events::list(&app.pool).await.unwrap().is_empty());
    assert!(!app.upload_dir.join("orphan.png").exists());
}

#[tokio::test]
async fn materials_round_trip_through_the_dashboard() {
    let mut app = TestApp::new().await;
    app.login().await;

    app.post_form(
        "/add_material",
        "title=OS+Notes&subject=Operating+Systems&target_year=3rd+Year&semester=5\
         &file_link=https%3A%2F%2Fdrive.example.edu%2Fos",
    )
    .await;
    let material = materials::list(&app.pool).await.unwrap().remove(0);
    assert_eq!(material.semester, 5);

    let page = body_text(app.get("/materials").await).await;
    assert!(page.contains("OS Notes"));

    app.post_form(
        &format!("/edit_material/{}", material.id),
        "title=OS+Notes&subject=Operating+Systems&target_year=3rd+Year&semester=six\
         &file_link=https%3A%2F%2Fdrive.example.edu%2Fos",
    )
    .await;
    assert_eq!(materials::get(&app.pool, material.id).await.unwrap().semester, 5);

    app.post_form(&format!("/delete_material/{}", material.id), "")
        .await;
    assert!(materials::list(&app.pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn health_and_security_headers() {
    let mut app = TestApp::new().await;

    let response = app.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::X_FRAME_OPTIONS], "DENY");
    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["database"], "ok");

    let response = app.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(header::CONTENT_SECURITY_POLICY));
}

#[tokio::test]
async fn long_event_title_keeps_the_flash_cookie_small() {
    let mut app = TestApp::new().await;
    app.login().await;

    let title = "T".repeat(3000);
    let response = app
        .post_multipart(
            "/add_event",
            &[("title", title.as_str()), ("event_date", "2024-12-01")],
            None,
        )
        .await;
    assert_eq!(location(&response), "/dashboard");

    let flash_cookie = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .find(|v| v.starts_with(FLASH_COOKIE))
        .expect("flash cookie");
    assert!(flash_cookie.len() < 4096, "cookie is {} bytes", flash_cookie.len());

    let page = body_text(app.get("/dashboard").await).await;
    assert!(page.contains("TTT..."));
}

#[tokio::test]
async fn registration_pages_survive_store_failure() {
    let mut app = TestApp::new().await;
    let event_id = seed_event(&app, "Hackathon").await;
    app.login().await;

    sqlx::query("DROP TABLE event_registrations")
        .execute(&app.pool)
        .await
        .unwrap();
    let response = app.get(&format!("/event-registrations/{event_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Hackathon"));

    app.pool.close().await;
    for uri in [
        format!("/register/{event_id}"),
        format!("/registration-success/{event_id}"),
    ] {
        let response = app.get(&uri).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), "/events");
    }

    let response = app
        .post_form(&format!("/register/{event_id}"), "name=A&dept_no=B&class_section=C")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/events");
}

#[tokio::test]
async fn failed_photo_insert_leaves_no_file() {
    let mut app = TestApp::new().await;
    app.login().await;

    sqlx::query(
        "CREATE TRIGGER reject_photos BEFORE INSERT ON gallery \
         BEGIN SELECT RAISE(ABORT, 'gallery is read-only'); END",
    )
    .execute(&app.pool)
    .await
    .unwrap();

    let response = app
        .post_multipart("/upload_photo", &[("caption", "")], Some(("stray.png", PNG)))
        .await;
    assert_eq!(location(&response), "/dashboard");
    assert!(gallery::list(&app.pool).await.unwrap().is_empty());
    assert!(!app.upload_dir.join("stray.png").exists());
}

#[tokio::test]
async fn replacing_an_image_removes_the_unused_file() {
    let mut app = TestApp::new().await;
    app.login().await;

    app.post_multipart("/upload_photo", &[("caption", "v1")], Some(("first.png", PNG)))
        .await;
    let photo = gallery::list(&app.pool).await.unwrap().remove(0);

    app.post_multipart(
        &format!("/edit_photo/{}", photo.id),
        &[("caption", "v2")],
        Some(("second.png", PNG)),
    )
    .await;
    let photo = gallery::get(&app.pool, photo.id).await.unwrap();
    assert_eq!(photo.image_file, "second.png");
    assert_eq!(photo.caption, "v2");
    assert!(!app.upload_dir.join("first.png").exists());
    assert!(app.upload_dir.join("second.png").exists());

    // An event showing the same file keeps it alive.
    app.post_multipart(
        "/add_event",
        &[("title", "Expo"), ("event_date", "2024-12-01")],
        Some(("second.png", PNG)),
    )
    .await;
    app.post_multipart(
        &format!("/edit_photo/{}", photo.id),
        &[("caption", "v3")],
        Some(("third.png", PNG)),
    )
    .await;
    assert!(app.upload_dir.join("second.png").exists());
    assert!(app.upload_dir.join("third.png").exists());

    let event = events::list(&app.pool).await.unwrap().remove(0);
    app.post_multipart(
        &format!("/edit_event/{}", event.id),
        &[("title", "Expo"), ("event_date", "2024-12-01")],
        Some(("expo.png", PNG)),
    )
    .await;
    assert_eq!(events::get(&app.pool, event.id).await.unwrap().image_file, "expo.png");
    assert!(!app.upload_dir.join("second.png").exists());
}
