//! # 飼い主リソースの統合テスト
//!
//! インメモリストア（`MockClinicStore`）を使い、ルーター経由で
//! 飼い主登録 → ペット登録 → 来院記録 → 削除 の一連の流れを検証する。

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use chrono::NaiveDate;
use petclinic_core_api::{
    app_builder::build_router,
    handler::ClinicState,
    usecase::ClinicUseCaseImpl,
};
use petclinic_domain::{
    clock::FixedClock,
    pet::{PetType, PetTypeId},
    vet::{Specialty, SpecialtyId, Vet, VetId},
};
use petclinic_infra::mock::MockClinicStore;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;

fn test_app(store: &MockClinicStore) -> Router {
    let usecase = ClinicUseCaseImpl::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(FixedClock::on(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap())),
    );
    build_router(Arc::new(ClinicState { usecase }))
}

fn seeded_store() -> MockClinicStore {
    let store = MockClinicStore::new();
    store.add_pet_type(PetType::new(PetTypeId::new(2), "dog"));
    store.add_pet_type(PetType::new(PetTypeId::new(1), "cat"));
    store.add_vet(Vet::new(
        VetId::new(3),
        "Linda",
        "Douglas",
        vec![
            Specialty::new(SpecialtyId::new(2), "surgery"),
            Specialty::new(SpecialtyId::new(3), "dentistry"),
        ],
    ));
    store
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

fn owner_body(last_name: &str) -> Value {
    json!({
        "firstName": "Jean",
        "lastName": last_name,
        "address": "105 N. Lake St.",
        "city": "Monona",
        "telephone": "6085552654"
    })
}

#[tokio::test]
async fn test_飼い主の登録から削除までの一連の流れ() {
    // Given
    let store = seeded_store();
    let app = test_app(&store);

    // 飼い主登録
    let (status, owner) = send(&app, Method::POST, "/owners", Some(owner_body("Coleman"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(owner["new"], false);
    let owner_id = owner["id"].as_i64().unwrap();

    // ペット登録
    let (status, pet) = send(
        &app,
        Method::POST,
        &format!("/owner/{owner_id}/pets"),
        Some(json!({"name": "Samantha", "birthDate": "2022-09-04", "typeId": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(pet["type"], json!({"id": 1, "name": "cat"}));
    let pet_id = pet["id"].as_i64().unwrap();

    // 来院記録（日付省略）
    let (status, visit) = send(
        &app,
        Method::POST,
        &format!("/owner/{owner_id}/pets/{pet_id}/visits"),
        Some(json!({"description": "rabies shot"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(visit["date"], "2026-03-15");

    // 飼い主詳細にペットと来院記録が含まれる
    let (status, detail) = send(&app, Method::GET, &format!("/owner/{owner_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["pets"][0]["name"], "Samantha");
    assert_eq!(detail["pets"][0]["visits"][0]["description"], "rabies shot");

    // 削除
    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/owner/delete/{owner_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Then: 削除後は 404、再削除も 404
    let (status, _) = send(&app, Method::GET, &format!("/owner/{owner_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/owner/delete/{owner_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_不正な飼い主フォームは400() {
    let store = seeded_store();
    let app = test_app(&store);
    let mut body = owner_body("Coleman");
    body["telephone"] = json!("608-555-26");

    let (status, json) = send(&app, Method::POST, "/owners", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["title"], "Validation Error");
    assert_eq!(store.owner_count(), 0);
}

#[tokio::test]
async fn test_必須フィールドが欠けた飼い主フォームは400のproblem_details() {
    let store = seeded_store();
    let app = test_app(&store);
    let body = json!({"firstName": "A", "lastName": "B", "address": "C", "city": "D"});

    let (status, json) = send(&app, Method::POST, "/owners", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["type"],
        "https://petclinic.example.com/errors/validation-error"
    );
    assert_eq!(json["status"], 400);
    assert!(json["detail"].as_str().unwrap().contains("telephone"));
    assert_eq!(store.owner_count(), 0);
}

#[tokio::test]
async fn test_content_typeのない飼い主フォームは400() {
    let store = seeded_store();
    let app = test_app(&store);
    let request = Request::builder()
        .method(Method::POST)
        .uri("/owners")
        .body(Body::from(owner_body("Coleman").to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers()["content-type"],
        "application/json"
    );
    assert_eq!(store.owner_count(), 0);
}

#[tokio::test]
async fn test_列の上限を超える名前は400() {
    let store = seeded_store();
    let app = test_app(&store);
    let mut body = owner_body("Coleman");
    body["firstName"] = json!("J".repeat(31));

    let (status, json) = send(&app, Method::POST, "/owners", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["title"], "Validation Error");
    assert_eq!(store.owner_count(), 0);
}

#[tokio::test]
async fn test_型の合わないペットと来院記録のフォームは400() {
    // Given
    let store = seeded_store();
    let app = test_app(&store);
    let (_, owner) = send(&app, Method::POST, "/owners", Some(owner_body("Coleman"))).await;
    let owner_id = owner["id"].as_i64().unwrap();
    let (_, pet) = send(
        &app,
        Method::POST,
        &format!("/owner/{owner_id}/pets"),
        Some(json!({"name": "Max", "birthDate": "2022-09-04", "typeId": 1})),
    )
    .await;
    let pet_id = pet["id"].as_i64().unwrap();

    // When
    let (pet_status, _) = send(
        &app,
        Method::PUT,
        &format!("/owner/{owner_id}/pets/{pet_id}"),
        Some(json!({"name": "Max", "birthDate": "not-a-date", "typeId": 1})),
    )
    .await;
    let (visit_status, visit_error) = send(
        &app,
        Method::POST,
        &format!("/owner/{owner_id}/pets/{pet_id}/visits"),
        Some(json!({"description": 42})),
    )
    .await;

    // Then
    assert_eq!(pet_status, StatusCode::BAD_REQUEST);
    assert_eq!(visit_status, StatusCode::BAD_REQUEST);
    assert_eq!(visit_error["title"], "Validation Error");
}

#[tokio::test]
async fn test_飼い主の更新と姓での検索() {
    // Given
    let store = seeded_store();
    let app = test_app(&store);
    send(&app, Method::POST, "/owners", Some(owner_body("Davis"))).await;
    let (_, escobito) = send(&app, Method::POST, "/owners", Some(owner_body("Escobito"))).await;
    let id = escobito["id"].as_i64().unwrap();

    // When
    let mut body = owner_body("Escobito");
    body["city"] = json!("Madison");
    let (status, updated) = send(&app, Method::PUT, &format!("/owner/{id}"), Some(body)).await;
    let (_, found) = send(&app, Method::GET, "/owners?lastName=Esc", None).await;
    let (_, all) = send(&app, Method::GET, "/owners", None).await;

    // Then
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["city"], "Madison");
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(all.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_同名ペットの登録は409() {
    let store = seeded_store();
    let app = test_app(&store);
    let (_, owner) = send(&app, Method::POST, "/owners", Some(owner_body("Black"))).await;
    let uri = format!("/owner/{}/pets", owner["id"]);
    let pet = json!({"name": "Lucky", "birthDate": "2021-08-06", "typeId": 2});

    send(&app, Method::POST, &uri, Some(pet.clone())).await;
    let (status, _) = send(&app, Method::POST, &uri, Some(pet)).await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_ペット種別と獣医の一覧() {
    let store = seeded_store();
    let app = test_app(&store);

    let (_, pet_types) = send(&app, Method::GET, "/pettypes", None).await;
    let (_, vets) = send(&app, Method::GET, "/vets", None).await;

    assert_eq!(
        pet_types,
        json!([{"id": 1, "name": "cat"}, {"id": 2, "name": "dog"}])
    );
    assert_eq!(
        vets,
        json!([{
            "id": 3,
            "firstName": "Linda",
            "lastName": "Douglas",
            "specialties": [
                {"id": 3, "name": "dentistry"},
                {"id": 2, "name": "surgery"}
            ],
            "nrOfSpecialties": 2
        }])
    );
}

#[tokio::test]
async fn test_health() {
    let app = test_app(&MockClinicStore::new());

    let (status, json) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}
