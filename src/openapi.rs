// src/openapi.rs

use axum::Json;
use utoipa::OpenApi;

use crate::{
    handlers::{health, question, quiz, submission},
    models::{
        attempt::StartAttemptResponse,
        question::{AddQuestionsRequest, NewQuestion, PublicQuestion, QuestionCount, QuestionsAdded},
        quiz::{CreateQuizRequest, Quiz, QuizCreated},
        submission::{ResultEntry, SubmissionResult, SubmitRequest},
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        quiz::create_quiz,
        quiz::list_quizzes,
        quiz::get_quiz,
        quiz::delete_quiz,
        question::add_questions,
        question::get_questions,
        question::get_question_count,
        submission::start_attempt,
        submission::submit_quiz,
    ),
    components(schemas(
        Quiz,
        CreateQuizRequest,
        QuizCreated,
        NewQuestion,
        AddQuestionsRequest,
        QuestionsAdded,
        PublicQuestion,
        QuestionCount,
        SubmitRequest,
        ResultEntry,
        SubmissionResult,
        StartAttemptResponse,
    )),
    tags(
        (name = "Quiz", description = "Quiz catalog"),
        (name = "Questions", description = "Attaching and presenting questions"),
        (name = "Submission", description = "Attempts and scoring"),
        (name = "System", description = "Health")
    )
)]
pub struct ApiDoc;

/// Serves the generated OpenAPI document.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
