use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use books_api::{db, server};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tower::util::ServiceExt; // for `oneshot`

// Helper to create a test database and the full application on top of it
async fn setup_test_app() -> (Router, DatabaseConnection) {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    let app = server::build_router(db.clone(), &[]);
    (app, db)
}

// Helper to create a test author (authors have no endpoint of their own)
async fn create_test_author(db: &DatabaseConnection, name: &str) -> i32 {
    let author = books_api::models::author::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    };
    let res = author.insert(db).await.expect("Failed to create author");
    res.id
}

fn json_request(method: &str, uri: &str, payload: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(payload).unwrap()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("GET")
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

// Helper to POST a book and return its id
async fn post_book(app: &Router, payload: serde_json::Value) -> i64 {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/Books", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["BookId"].as_i64().expect("created book has an id")
}

#[tokio::test]
async fn test_create_then_get_scenario() {
    let (app, db) = setup_test_app().await;
    let author_id = create_test_author(&db, "Frank Herbert").await;

    let payload = serde_json::json!({
        "Title": "Dune",
        "Genre": "SciFi",
        "PublishDate": "1965-08-01",
        "Price": 9.99,
        "Description": "A spice planet story.",
        "AuthorId": author_id
    });

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/Books", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let location = response
        .headers()
        .get(header::LOCATION)
        .expect("Location header")
        .to_str()
        .unwrap()
        .to_string();
    let created = body_json(response).await;
    let book_id = created["BookId"].as_i64().unwrap();
    assert_eq!(location, format!("api/Books/{}", book_id));
    assert_eq!(created["Title"], "Dune");

    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/Books/{}", book_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({
            "Title": "Dune",
            "Author": "Frank Herbert",
            "Genre": "SciFi"
        })
    );

    let response = app
        .oneshot(get_request(&format!("/api/Books/{}/details", book_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({
            "Title": "Dune",
            "Genre": "SciFi",
            "PublishDate": "1965-08-01",
            "Price": 9.99,
            "Description": "A spice planet story.",
            "Author": "Frank Herbert"
        })
    );
}

#[tokio::test]
async fn test_create_ignores_client_supplied_id() {
    let (app, db) = setup_test_app().await;
    let author_id = create_test_author(&db, "Mary Shelley").await;

    let book_id = post_book(
        &app,
        serde_json::json!({ "BookId": 500, "Title": "Frankenstein", "AuthorId": author_id }),
    )
    .await;
    assert_ne!(book_id, 500);

    let response = app.oneshot(get_request("/api/Books/500")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_books_ordered_by_id() {
    let (app, db) = setup_test_app().await;
    let author_id = create_test_author(&db, "Isaac Asimov").await;

    let response = app.clone().oneshot(get_request("/api/Books")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));

    for title in ["Foundation", "I, Robot", "The Gods Themselves"] {
        post_book(
            &app,
            serde_json::json!({ "Title": title, "Genre": "SciFi", "AuthorId": author_id }),
        )
        .await;
    }

    let response = app.oneshot(get_request("/api/Books")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let titles: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["Title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Foundation", "I, Robot", "The Gods Themselves"]);
    assert!(json.as_array().unwrap().iter().all(|b| b["Author"] == "Isaac Asimov"));
}

#[tokio::test]
async fn test_filter_by_genre_substring() {
    let (app, db) = setup_test_app().await;
    let author_id = create_test_author(&db, "Agatha Christie").await;

    post_book(
        &app,
        serde_json::json!({ "Title": "Poirot", "Genre": "Mystery", "AuthorId": author_id }),
    )
    .await;
    post_book(
        &app,
        serde_json::json!({ "Title": "Marple", "Genre": "Cozy Mystery", "AuthorId": author_id }),
    )
    .await;
    post_book(
        &app,
        serde_json::json!({ "Title": "Poems", "Genre": "Poetry", "AuthorId": author_id }),
    )
    .await;

    let response = app.clone().oneshot(get_request("/api/Books/Myst")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 2);

    // No match is an empty list, never a 404
    let response = app.clone().oneshot(get_request("/api/Books/Horror")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));

    // `_` and `%` are matched literally
    for segment in ["_", "Myst_ry", "%25"] {
        let response = app
            .clone()
            .oneshot(get_request(&format!("/api/Books/{}", segment)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!([]));
    }

    let response = app
        .oneshot(get_request("/api/authors/Christi_/books"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn test_filter_by_author_name_and_id() {
    let (app, db) = setup_test_app().await;
    let tolkien = create_test_author(&db, "J.R.R. Tolkien").await;
    let lewis = create_test_author(&db, "C.S. Lewis").await;

    post_book(
        &app,
        serde_json::json!({ "Title": "The Hobbit", "Genre": "Fantasy", "AuthorId": tolkien }),
    )
    .await;
    post_book(
        &app,
        serde_json::json!({ "Title": "Narnia", "Genre": "Fantasy", "AuthorId": lewis }),
    )
    .await;

    let response = app
        .clone()
        .oneshot(get_request("/api/authors/Tolkien/books"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["Title"], "The Hobbit");

    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/authors/{}/books", lewis)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["Author"], "C.S. Lewis");

    let response = app
        .clone()
        .oneshot(get_request("/api/authors/Nobody/books"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));

    let response = app
        .oneshot(get_request("/api/authors/999/books"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn test_update_replaces_every_field() {
    let (app, db) = setup_test_app().await;
    let author_id = create_test_author(&db, "Jane Austen").await;
    let other_author = create_test_author(&db, "Charlotte Bronte").await;

    let book_id = post_book(
        &app,
        serde_json::json!({
            "Title": "Emma",
            "Genre": "Classic",
            "PublishDate": "1815-12-23",
            "Price": 5.5,
            "Description": "Matchmaking gone wrong.",
            "AuthorId": author_id
        }),
    )
    .await;

    // Partial payload: omitted fields are cleared, not merged
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/Books",
            &serde_json::json!({ "BookId": book_id, "Title": "Jane Eyre", "AuthorId": other_author }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!(format!("api/Books/{}", book_id))
    );

    let response = app
        .oneshot(get_request(&format!("/api/Books/{}/details", book_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["Title"], "Jane Eyre");
    assert_eq!(json["Author"], "Charlotte Bronte");
    assert!(json["Genre"].is_null());
    assert!(json["PublishDate"].is_null());
    assert!(json["Price"].is_null());
    assert!(json["Description"].is_null());
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let (app, db) = setup_test_app().await;
    let author_id = create_test_author(&db, "George Orwell").await;

    let book_id = post_book(
        &app,
        serde_json::json!({ "Title": "1984", "Genre": "Dystopia", "AuthorId": author_id }),
    )
    .await;

    let req = Request::builder()
        .uri(format!("/api/Books/{}", book_id))
        .method("DELETE")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(body.is_empty());

    let response = app
        .oneshot(get_request(&format!("/api/Books/{}", book_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_lowercase_route_alias() {
    let (app, db) = setup_test_app().await;
    let author_id = create_test_author(&db, "Homer").await;

    let book_id = post_book(
        &app,
        serde_json::json!({ "Title": "The Odyssey", "Genre": "Epic", "AuthorId": author_id }),
    )
    .await;

    let response = app
        .oneshot(get_request(&format!("/api/books/{}", book_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["Title"], "The Odyssey");
}

#[tokio::test]
async fn test_health_check() {
    let (app, _db) = setup_test_app().await;

    let response = app.oneshot(get_request("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], "ok");
}
