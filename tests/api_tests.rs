use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;
use serde_json::json;

use cinescope_api::engine::{FixedGreeting, Lookups, RankerWeights, Recommender};
use cinescope_api::models::{Movie, PersonRef, User};
use cinescope_api::routes::create_router;
use cinescope_api::state::AppState;
use cinescope_api::store::MemoryStore;

fn movie(id: i64, title: &str) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        original_title: None,
        genres: vec![],
        cast_ids: vec![],
        director_id: None,
        producer_ids: vec![],
        vote_average: None,
        vote_count: 0,
        release_year: None,
        original_language: Some("en".to_string()),
        overview: None,
        poster_path: Some(format!("/poster{}.jpg", id)),
        backdrop_path: None,
        trailer_url: None,
    }
}

fn server_with(store: MemoryStore) -> TestServer {
    let recommender = Arc::new(Recommender::new(
        Arc::new(store),
        Arc::new(Lookups::new()),
        RankerWeights::default(),
        Arc::new(FixedGreeting(0)),
    ));
    let state = AppState::new(recommender, None);
    TestServer::new(create_router(state)).unwrap()
}

fn user_header() -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("x-user-id"),
        HeaderValue::from_static("alice"),
    )
}

/// Seed 1 and candidate 2 reproduce the reference scoring scenario;
/// movie 3 is an unrelated crowd favourite; movie 4 is liked by another fan
fn catalog() -> Vec<Movie> {
    vec![
        Movie {
            genres: vec!["Action".to_string(), "Adventure".to_string()],
            director_id: Some(10),
            vote_average: Some(7.0),
            vote_count: 150,
            release_year: Some("2010".to_string()),
            ..movie(1, "")
        },
        Movie {
            genres: vec!["Action".to_string()],
            director_id: Some(10),
            vote_average: Some(7.5),
            vote_count: 400,
            release_year: Some("2012".to_string()),
            ..movie(2, "")
        },
        Movie {
            genres: vec!["Horror".to_string(), "Thriller".to_string()],
            vote_average: Some(6.5),
            vote_count: 900,
            ..movie(3, "Dread")
        },
        Movie {
            vote_count: 60,
            original_language: Some("hi".to_string()),
            ..movie(4, "Zulu")
        },
    ]
}

fn catalog_server() -> TestServer {
    server_with(MemoryStore::new().with_movies(catalog()))
}

#[tokio::test]
async fn test_health_check() {
    let server = catalog_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_more_like_this_reference_scores() {
    let server = catalog_server();
    let response = server.get("/api/v1/recommendations/more-like-this/1").await;
    response.assert_status_ok();

    let results: Vec<serde_json::Value> = response.json();
    assert!(!results.is_empty());
    assert_eq!(results[0]["id"], 2);
    assert_eq!(results[0]["score"], 52.5);
    assert_eq!(results[0]["common_genres"], json!(["Action"]));
}

#[tokio::test]
async fn test_more_like_this_unknown_seed_serves_popular() {
    let server = catalog_server();
    let response = server
        .get("/api/v1/recommendations/more-like-this/999")
        .await;
    response.assert_status_ok();

    let results: Vec<serde_json::Value> = response.json();
    assert!(!results.is_empty());
    // popularity order: movie 3 has the most votes
    assert_eq!(results[0]["id"], 3);
}

#[tokio::test]
async fn test_more_like_this_collaborative_candidate_scores_100() {
    let store = MemoryStore::new().with_movies(catalog()).with_users(vec![
        User {
            id: "fan".to_string(),
            liked_movies: vec![1, 4],
            disliked_movies: vec![],
        },
        User {
            id: "alice".to_string(),
            liked_movies: vec![1],
            disliked_movies: vec![],
        },
    ]);
    let server = server_with(store);

    let (name, value) = user_header();
    let response = server
        .get("/api/v1/recommendations/more-like-this/1")
        .add_header(name, value)
        .await;
    response.assert_status_ok();

    let results: Vec<serde_json::Value> = response.json();
    assert_eq!(results[0]["id"], 4);
    assert_eq!(results[0]["score"], 100.0);
}

#[tokio::test]
async fn test_more_like_this_caps_at_twelve() {
    let mut movies = vec![Movie {
        genres: vec!["Drama".to_string()],
        vote_average: Some(7.0),
        vote_count: 100,
        ..movie(1, "")
    }];
    for id in 2..=20 {
        movies.push(Movie {
            genres: vec!["Drama".to_string()],
            vote_average: Some(6.0),
            vote_count: 100 + id,
            ..movie(id, "")
        });
    }
    let server = server_with(MemoryStore::new().with_movies(movies));

    let response = server.get("/api/v1/recommendations/more-like-this/1").await;
    response.assert_status_ok();

    let results: Vec<serde_json::Value> = response.json();
    assert_eq!(results.len(), 12);
}

#[tokio::test]
async fn test_chat_identity_question_short_circuits() {
    let server = catalog_server();
    let response = server
        .post("/api/v1/recommendations/chat")
        .json(&json!({ "query": "who are you" }))
        .await;
    response.assert_status_ok();

    let reply: serde_json::Value = response.json();
    assert!(reply["message"]
        .as_str()
        .unwrap()
        .contains("CineScope's movie assistant bot"));
    assert_eq!(reply["results"], json!([]));
    assert_eq!(reply["found_genres"], json!([]));
    assert_eq!(reply["detected_moods"], json!([]));
    assert_eq!(reply["found_people"], json!([]));
    assert_eq!(reply["found_languages"], json!([]));
}

#[tokio::test]
async fn test_chat_scary_and_dark_moods() {
    let server = catalog_server();
    let response = server
        .post("/api/v1/recommendations/chat")
        .json(&json!({ "query": "I want something scary and dark" }))
        .await;
    response.assert_status_ok();

    let reply: serde_json::Value = response.json();
    assert_eq!(reply["detected_moods"], json!(["scary", "dark"]));

    let genres: Vec<String> = reply["found_genres"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g.as_str().unwrap().to_string())
        .collect();
    for expected in ["Horror", "Thriller", "Mystery", "Crime"] {
        assert!(genres.iter().any(|g| g == expected), "missing {}", expected);
    }
    let mut unique = genres.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), genres.len(), "duplicate genres in {:?}", genres);

    // the horror movie is the only match
    let results = reply["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["id"], 3);
}

#[tokio::test]
async fn test_chat_bollywood_maps_to_hindi() {
    let server = catalog_server();
    let response = server
        .post("/api/v1/recommendations/chat")
        .json(&json!({ "query": "show me a bollywood movie" }))
        .await;
    response.assert_status_ok();

    let reply: serde_json::Value = response.json();
    assert_eq!(reply["found_languages"], json!(["hi"]));
    let results = reply["results"].as_array().unwrap();
    assert!(results.iter().all(|m| m["original_language"] == "hi"));
    assert!(!results.is_empty());
}

#[tokio::test]
async fn test_chat_stamps_liked_and_disliked() {
    let store = MemoryStore::new().with_movies(catalog()).with_users(vec![User {
        id: "alice".to_string(),
        liked_movies: vec![3],
        disliked_movies: vec![2],
    }]);
    let server = server_with(store);

    let (name, value) = user_header();
    let response = server
        .post("/api/v1/recommendations/chat")
        .add_header(name, value)
        .json(&json!({ "query": "something scary" }))
        .await;
    response.assert_status_ok();

    let reply: serde_json::Value = response.json();
    assert_eq!(reply["liked_movies"], json!([3]));
    assert_eq!(reply["disliked_movies"], json!([2]));

    let results = reply["results"].as_array().unwrap();
    let horror = results.iter().find(|m| m["id"] == 3).unwrap();
    assert_eq!(horror["liked"], true);
    assert_eq!(horror["disliked"], false);
}

#[tokio::test]
async fn test_chat_caps_at_twelve() {
    let mut movies = Vec::new();
    for id in 1..=30 {
        movies.push(Movie {
            genres: vec!["Comedy".to_string()],
            vote_average: Some(6.0),
            vote_count: 50 + id,
            ..movie(id, "")
        });
    }
    let server = server_with(MemoryStore::new().with_movies(movies));

    let response = server
        .post("/api/v1/recommendations/chat")
        .json(&json!({ "query": "a comedy tonight" }))
        .await;
    response.assert_status_ok();

    let reply: serde_json::Value = response.json();
    assert_eq!(reply["results"].as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn test_chat_no_match_returns_popular_with_notice() {
    let server = catalog_server();
    let response = server
        .post("/api/v1/recommendations/chat")
        .json(&json!({ "query": "a western, please" }))
        .await;
    response.assert_status_ok();

    let reply: serde_json::Value = response.json();
    assert!(reply["message"]
        .as_str()
        .unwrap()
        .starts_with("Sorry, I couldn't find any matches"));
    assert!(!reply["results"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_chat_person_query_finds_their_movies() {
    let mut movies = catalog();
    movies[2].cast_ids = vec![31];
    let store = MemoryStore::new().with_movies(movies).with_people(vec![
        PersonRef {
            id: 31,
            name: "Tom Hanks".to_string(),
        },
        PersonRef {
            id: 6384,
            name: "Keanu Reeves".to_string(),
        },
    ]);
    let server = server_with(store);

    let response = server
        .post("/api/v1/recommendations/chat")
        .json(&json!({ "query": "movies with tom hanks" }))
        .await;
    response.assert_status_ok();

    let reply: serde_json::Value = response.json();
    assert_eq!(reply["found_people"], json!(["Tom Hanks"]));
    let results = reply["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["id"], 3);
}

#[tokio::test]
async fn test_chat_preference_overrides_apply() {
    let server = catalog_server();
    let response = server
        .post("/api/v1/recommendations/chat")
        .json(&json!({
            "query": "anything good",
            "preferences": { "language": "hindi" }
        }))
        .await;
    response.assert_status_ok();

    let reply: serde_json::Value = response.json();
    assert_eq!(reply["found_languages"], json!(["hi"]));
}

#[tokio::test]
async fn test_request_id_header_is_echoed() {
    let server = catalog_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    assert!(response.headers().get("x-request-id").is_some());
}
