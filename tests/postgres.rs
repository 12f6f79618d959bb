//! Runs the Postgres repository against a live database.
//!
//! Ignored by default. Run with:
//! `DATABASE_URL=postgres://... cargo test --test postgres -- --ignored`

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use tower::ServiceExt;

use studentapp::config::StoreConfig;
use studentapp::models::NewStudent;
use studentapp::repository::{PgStudentRepository, StoreError, StudentRepository};
use studentapp::service::StudentService;
use studentapp::session::SessionFactory;

async fn connect() -> Option<SessionFactory> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) if !url.is_empty() => url,
        _ => {
            eprintln!("DATABASE_URL not set, skipping");
            return None;
        }
    };
    let config = StoreConfig {
        url: Some(url.clone()),
        run_migrations: true,
        ..StoreConfig::default()
    };
    Some(SessionFactory::connect(&url, &config).await.unwrap())
}

/// A `reg_no` no earlier run has used, so reruns do not hit the unique constraint.
fn fresh_reg_no(tag: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}-{}-{}", tag, std::process::id(), nanos)
}

fn student(reg_no: &str) -> NewStudent {
    NewStudent {
        name: Some("Ravi Nair".to_string()),
        email: Some("ravi@example.com".to_string()),
        password: Some("pa55word".to_string()),
        phone: Some(9123456780),
        reg_no: Some(reg_no.to_string()),
        marks1: Some(67),
        marks2: Some(0),
        marks3: Some(100),
    }
}

#[tokio::test]
#[ignore]
async fn saved_student_reads_back_field_for_field() {
    let Some(sessions) = connect().await else { return };
    let repo = PgStudentRepository::new(sessions.clone());
    let reg_no = fresh_reg_no("roundtrip");
    let new = student(&reg_no);

    repo.save(&new).await.unwrap();

    let found = repo.find_by_reg_no(&reg_no).await.unwrap().unwrap();
    assert!(found.id > 0);
    assert_eq!(found.name, new.name);
    assert_eq!(found.email, new.email);
    assert_eq!(Some(found.password.clone()), new.password);
    assert_eq!(found.phone, new.phone);
    assert_eq!(Some(found.reg_no.clone()), new.reg_no);
    assert_eq!(found.marks1, new.marks1);
    assert_eq!(found.marks2, new.marks2);
    assert_eq!(found.marks3, new.marks3);

    let by_credentials = repo
        .find_by_reg_no_and_password(&reg_no, "pa55word")
        .await
        .unwrap();
    assert_eq!(by_credentials, Some(found));
    assert_eq!(
        repo.find_by_reg_no_and_password(&reg_no, "PA55WORD").await.unwrap(),
        None
    );

    repo.ping().await.unwrap();
    sessions.close().await;
    assert!(sessions.is_closed());
}

#[tokio::test]
#[ignore]
async fn absent_profile_fields_are_stored_as_null() {
    let Some(sessions) = connect().await else { return };
    let repo = PgStudentRepository::new(sessions.clone());
    let reg_no = fresh_reg_no("sparse");
    let new = NewStudent {
        password: Some("pw".to_string()),
        reg_no: Some(reg_no.clone()),
        ..NewStudent::default()
    };

    repo.save(&new).await.unwrap();

    let found = repo.find_by_reg_no(&reg_no).await.unwrap().unwrap();
    assert_eq!(found.name, None);
    assert_eq!(found.phone, None);
    assert_eq!(found.marks3, None);

    let missing_key = NewStudent {
        password: Some("pw".to_string()),
        ..NewStudent::default()
    };
    assert!(matches!(
        repo.save(&missing_key).await,
        Err(StoreError::Database(_))
    ));
    sessions.close().await;
}

#[tokio::test]
#[ignore]
async fn duplicate_reg_no_is_rejected_by_the_unique_constraint() {
    let Some(sessions) = connect().await else { return };
    let repo = PgStudentRepository::new(sessions.clone());
    let reg_no = fresh_reg_no("dup");

    repo.save(&student(&reg_no)).await.unwrap();
    let mut again = student(&reg_no);
    again.password = Some("other".to_string());
    assert!(matches!(repo.save(&again).await, Err(StoreError::Database(_))));

    let found = repo.find_by_reg_no(&reg_no).await.unwrap().unwrap();
    assert_eq!(found.password, "pa55word");
    sessions.close().await;
}

#[tokio::test]
#[ignore]
async fn duplicate_registration_over_http_is_a_generic_error() {
    let Some(sessions) = connect().await else { return };
    let repository = Arc::new(PgStudentRepository::new(sessions.clone()));
    let app = studentapp::app(StudentService::new(repository));
    let reg_no = fresh_reg_no("http");
    let body = serde_json::json!({"reg_no": reg_no, "password": "pw", "marks1": 50}).to_string();

    let register = |body: String| {
        Request::builder()
            .method(Method::POST)
            .uri("/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    };

    let first = app.clone().oneshot(register(body.clone())).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let second = app.oneshot(register(body)).await.unwrap();
    assert_eq!(second.status(), StatusCode::INTERNAL_SERVER_ERROR);
    sessions.close().await;
}

#[tokio::test]
#[ignore]
async fn failed_bind_still_closes_the_pool() {
    let Some(sessions) = connect().await else { return };
    let repository = Arc::new(PgStudentRepository::new(sessions.clone()));
    let app = studentapp::app(StudentService::new(repository));
    let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = taken.local_addr().unwrap();

    let result = studentapp::run(app, addr, Some(sessions.clone()), std::future::pending::<()>()).await;
    assert!(result.is_err());
    assert!(sessions.is_closed());
}
