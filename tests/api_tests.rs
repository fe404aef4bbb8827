// tests/api_tests.rs

use quiz_backend::{config::Config, db, routes, state::AppState};
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

struct TestApp {
    address: String,
    pool: SqlitePool,
}

/// Helper function to spawn the app on a random port for testing.
/// Each call gets its own in-memory database.
async fn spawn_app() -> TestApp {
    // 1. Create a single-connection pool so every query sees the same in-memory DB
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite database");

    // 2. Run migrations
    db::migrate(&pool).await.expect("Failed to migrate database");

    // 3. Create test configuration and state
    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        port: 0,
        rust_log: "error".to_string(),
        cors_origins: None,
        submit_grace_seconds: 0,
        seed_sample_quiz: false,
    };

    let state = AppState {
        pool: pool.clone(),
        config,
    };

    // 4. Create the router with the app state
    let app = routes::create_router(state);

    // 5. Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // 6. Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp { address, pool }
}

async fn create_quiz(client: &reqwest::Client, address: &str, title: &str) -> i64 {
    let response = client
        .post(&format!("{}/api/quiz", address))
        .json(&serde_json::json!({ "title": title, "description": "A test", "time_limit": 20 }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 201);
    let body: serde_json::Value = response.json().await.unwrap();
    body["quizId"].as_i64().expect("quizId missing")
}

fn two_questions() -> serde_json::Value {
    serde_json::json!({
        "questions": [
            { "text": "Q1", "option1": "A", "option2": "B", "option3": "C", "option4": "D", "correct_option": 1 },
            { "text": "Q2", "option1": "A", "option2": "B", "option3": "C", "option4": "D", "correct_option": 2 }
        ]
    })
}

async fn count_questions(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM questions")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn health_check_404() {
    // Arrange
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(&format!("{}/random_path_that_does_not_exist", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn health_check_works() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/api/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn create_quiz_works() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(&format!("{}/api/quiz", app.address))
        .json(&serde_json::json!({ "title": "Test Quiz", "description": "A test", "time_limit": 20 }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 201);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Quiz created");
    assert!(body["quizId"].as_i64().is_some());
}

#[tokio::test]
async fn create_quiz_without_title_fails() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    for payload in [
        serde_json::json!({ "description": "Missing title" }),
        serde_json::json!({ "title": "   " }),
    ] {
        let response = client
            .post(&format!("{}/api/quiz", app.address))
            .json(&payload)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status().as_u16(), 400);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Title is required");
    }

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quizzes")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn create_quiz_defaults_time_limit() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(&format!("{}/api/quiz", app.address))
        .json(&serde_json::json!({ "title": "No limit", "time_limit": 0 }))
        .send()
        .await
        .unwrap();
    let id = response.json::<serde_json::Value>().await.unwrap()["quizId"]
        .as_i64()
        .unwrap();

    let quiz: serde_json::Value = client
        .get(&format!("{}/api/quiz/{}", app.address, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(quiz["title"], "No limit");
    assert_eq!(quiz["time_limit"], 1800);
    assert!(quiz["description"].is_null());
}

#[tokio::test]
async fn list_quizzes_newest_first() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let first = create_quiz(&client, &app.address, "First").await;
    let second = create_quiz(&client, &app.address, "Second").await;

    let quizzes: Vec<serde_json::Value> = client
        .get(&format!("{}/api/quiz", app.address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();

    assert_eq!(quizzes.len(), 2);
    assert_eq!(quizzes[0]["id"].as_i64(), Some(second));
    assert_eq!(quizzes[1]["id"].as_i64(), Some(first));
    assert_eq!(quizzes[0]["time_limit"], 20);
}

#[tokio::test]
async fn get_unknown_quiz_is_404() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/api/quiz/999", app.address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn add_questions_requires_array() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let quiz_id = create_quiz(&client, &app.address, "Test Quiz").await;

    for payload in [
        serde_json::json!({ "questions": "invalid" }),
        serde_json::json!({ "questions": { "text": "Q1" } }),
        serde_json::json!({}),
    ] {
        let response = client
            .post(&format!("{}/api/quiz/{}/questions", app.address, quiz_id))
            .json(&payload)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status().as_u16(), 400);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Questions must be an array");
    }

    assert_eq!(count_questions(&app.pool).await, 0);
}

#[tokio::test]
async fn add_questions_is_all_or_nothing() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let quiz_id = create_quiz(&client, &app.address, "Test Quiz").await;

    // Second question has an out-of-range correct_option
    let response = client
        .post(&format!("{}/api/quiz/{}/questions", app.address, quiz_id))
        .json(&serde_json::json!({
            "questions": [
                { "text": "Q1", "option1": "A", "option2": "B", "option3": "C", "option4": "D", "correct_option": 1 },
                { "text": "Q2", "option1": "A", "option2": "B", "option3": "C", "option4": "D", "correct_option": 4 }
            ]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(count_questions(&app.pool).await, 0);

    // Blank option
    let response = client
        .post(&format!("{}/api/quiz/{}/questions", app.address, quiz_id))
        .json(&serde_json::json!({
            "questions": [
                { "text": "Q1", "option1": "A", "option2": "", "option3": "C", "option4": "D", "correct_option": 0 }
            ]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(count_questions(&app.pool).await, 0);
}

#[tokio::test]
async fn add_questions_to_unknown_quiz_is_404() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(&format!("{}/api/quiz/12345/questions", app.address))
        .json(&two_questions())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(count_questions(&app.pool).await, 0);
}

#[tokio::test]
async fn questions_flow_hides_answers() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let quiz_id = create_quiz(&client, &app.address, "Test Quiz").await;

    let response = client
        .post(&format!("{}/api/quiz/{}/questions", app.address, quiz_id))
        .json(&two_questions())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Questions added successfully");
    assert_eq!(body["count"], 2);

    // Count-only view
    let count: serde_json::Value = client
        .get(&format!("{}/api/quiz/safe/{}/questions", app.address, quiz_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(count["totalQuestions"], 2);

    // Answer-stripped view
    let questions: Vec<serde_json::Value> = client
        .get(&format!("{}/api/quiz/{}/questions", app.address, quiz_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0]["text"], "Q1");
    assert_eq!(questions[1]["text"], "Q2");
    assert_eq!(questions[0]["option4"], "D");
    assert!(questions[0]["id"].as_i64().unwrap() < questions[1]["id"].as_i64().unwrap());
    for q in &questions {
        assert!(q.get("correct_option").is_none(), "answer key leaked: {}", q);
    }
}

#[tokio::test]
async fn unknown_quiz_has_no_questions() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let questions: Vec<serde_json::Value> = client
        .get(&format!("{}/api/quiz/777/questions", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(questions.is_empty());

    let count: serde_json::Value = client
        .get(&format!("{}/api/quiz/safe/777/questions", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(count["totalQuestions"], 0);
}

#[tokio::test]
async fn delete_quiz_cascades() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let quiz_id = create_quiz(&client, &app.address, "Doomed").await;

    client
        .post(&format!("{}/api/quiz/{}/questions", app.address, quiz_id))
        .json(&two_questions())
        .send()
        .await
        .unwrap();
    assert_eq!(count_questions(&app.pool).await, 2);

    let response = client
        .delete(&format!("{}/api/quiz/{}", app.address, quiz_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 204);
    assert_eq!(count_questions(&app.pool).await, 0);

    let response = client
        .delete(&format!("{}/api/quiz/{}", app.address, quiz_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn markup_only_title_is_stored_verbatim() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(&format!("{}/api/quiz", app.address))
        .json(&serde_json::json!({ "title": "<script>alert(1)</script>", "description": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);
    let id = response.json::<serde_json::Value>().await.unwrap()["quizId"]
        .as_i64()
        .unwrap();

    let stored: (String, Option<String>) =
        sqlx::query_as("SELECT title, description FROM quizzes WHERE id = ?")
            .bind(id)
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert_eq!(stored.0, "<script>alert(1)</script>");
    assert!(stored.1.is_none());
}

#[tokio::test]
async fn question_text_with_symbols_round_trips() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let quiz_id = create_quiz(&client, &app.address, "C++ & Rust <basics>").await;

    let response = client
        .post(&format!("{}/api/quiz/{}/questions", app.address, quiz_id))
        .json(&serde_json::json!({
            "questions": [{
                "text": "Is 2 < 3 & 3 > 2?",
                "option1": "a<b",
                "option2": "a&b",
                "option3": "x >= y",
                "option4": "<b>none</b>",
                "correct_option": 0
            }]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);

    let questions: Vec<serde_json::Value> = client
        .get(&format!("{}/api/quiz/{}/questions", app.address, quiz_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(questions[0]["text"], "Is 2 < 3 & 3 > 2?");
    assert_eq!(questions[0]["option1"], "a<b");
    assert_eq!(questions[0]["option2"], "a&b");
    assert_eq!(questions[0]["option3"], "x >= y");
    assert_eq!(questions[0]["option4"], "<b>none</b>");

    let mut answers = serde_json::Map::new();
    answers.insert(questions[0]["id"].as_i64().unwrap().to_string(), serde_json::json!(0));
    let result: serde_json::Value = client
        .post(&format!("{}/api/quiz/{}/submit", app.address, quiz_id))
        .json(&serde_json::json!({ "answers": answers }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(result["score"], 1);
    assert_eq!(result["results"][0]["questionText"], "Is 2 < 3 & 3 > 2?");
    assert_eq!(
        result["results"][0]["options"],
        serde_json::json!(["a<b", "a&b", "x >= y", "<b>none</b>"])
    );

    let quiz: serde_json::Value = client
        .get(&format!("{}/api/quiz/{}", app.address, quiz_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(quiz["title"], "C++ & Rust <basics>");
}
