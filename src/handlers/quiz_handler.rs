use actix_multipart::Multipart;
use actix_web::{delete, get, http::header, post, put, web, HttpResponse};
use futures::TryStreamExt;

use crate::{
    app_state::AppState,
    errors::{AppError, AppResult},
    models::{
        domain::Attachment,
        dto::{
            request::{AnswerQuery, QuizForm, UploadedImage},
            response::{NewQuizResponse, QuizResponse, ValidationFailureResponse},
        },
    },
    services::QuizSaveOutcome,
};

#[get("/quizzes")]
async fn list_quizzes(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let quizzes = state.quiz_service.list().await?;
    Ok(HttpResponse::Ok().json(quizzes))
}

#[get("/quizzes/new")]
async fn new_quiz() -> HttpResponse {
    HttpResponse::Ok().json(NewQuizResponse::default())
}

// Identifiers are matched as plain strings so an unknown or malformed id
// uniformly yields the not-found condition instead of an extractor error.
#[get("/quizzes/{id}")]
async fn show_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get(&id).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[post("/quizzes")]
async fn create_quiz(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let form = read_quiz_form(payload).await?;

    match state.quiz_service.create(form).await? {
        QuizSaveOutcome::Saved(quiz) => Ok(redirect_to_quiz(&quiz.id)),
        QuizSaveOutcome::Invalid { quiz, errors } => {
            log::info!("There are errors in the quiz form: {}", errors);
            Ok(HttpResponse::UnprocessableEntity().json(ValidationFailureResponse {
                quiz: QuizResponse::from_quiz(quiz, None),
                errors,
            }))
        }
    }
}

#[get("/quizzes/{id}/edit")]
async fn edit_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get(&id).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[put("/quizzes/{id}")]
async fn update_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let form = read_quiz_form(payload).await?;

    match state.quiz_service.update(&id, form).await? {
        QuizSaveOutcome::Saved(quiz) => Ok(redirect_to_quiz(&quiz.id)),
        QuizSaveOutcome::Invalid { quiz, errors } => {
            log::info!("There are errors in the quiz form: {}", errors);
            Ok(HttpResponse::UnprocessableEntity().json(ValidationFailureResponse {
                quiz: QuizResponse::from_quiz(quiz, None),
                errors,
            }))
        }
    }
}

#[delete("/quizzes/{id}")]
async fn delete_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.quiz_service.delete(&id).await?;
    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/quizzes"))
        .finish())
}

#[get("/quizzes/{id}/attachment")]
async fn quiz_attachment(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let attachment = state.quiz_service.attachment(&id).await?;
    Ok(attachment_response(
        attachment,
        &state.config.placeholder_image_url,
    ))
}

#[get("/quizzes/{id}/play")]
async fn play_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    query: web::Query<AnswerQuery>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .quiz_service
        .play(&id, query.into_inner().answer)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/quizzes/{id}/check")]
async fn check_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    query: web::Query<AnswerQuery>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .quiz_service
        .check(&id, query.into_inner().answer)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[get("/health/ready")]
async fn health_check_ready(state: web::Data<AppState>) -> HttpResponse {
    let db_health = state.db.health_check().await;

    let status = if db_health.is_ok() {
        "ready"
    } else {
        "not_ready"
    };

    let response = serde_json::json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "dependencies": {
            "mongodb": if db_health.is_ok() { "ok" } else { "error" }
        }
    });

    if db_health.is_ok() {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

fn redirect_to_quiz(id: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, format!("/quizzes/{}", id)))
        .finish()
}

/// Stored bytes with the stored mime, or a redirect to the placeholder when
/// there is no attachment or its payload is empty.
fn attachment_response(attachment: Option<Attachment>, placeholder_url: &str) -> HttpResponse {
    match attachment {
        Some(attachment) if attachment.has_image() => HttpResponse::Ok()
            .content_type(attachment.mime)
            .body(attachment.image.bytes),
        _ => HttpResponse::Found()
            .insert_header((header::LOCATION, placeholder_url.to_string()))
            .finish(),
    }
}

/// Drains the multipart stream into the quiz form fields. The `image` part is
/// treated as an upload only when it actually carries bytes; browsers send an
/// empty part when no file was chosen.
async fn read_quiz_form(mut payload: Multipart) -> AppResult<QuizForm> {
    let mut question = String::new();
    let mut answer = String::new();
    let mut upload: Option<UploadedImage> = None;

    while let Some(mut field) = payload.try_next().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let mime = field.content_type().map(|m| m.to_string());

        let mut data = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            data.extend_from_slice(&chunk);
        }

        match name.as_str() {
            "question" => question = String::from_utf8_lossy(&data).into_owned(),
            "answer" => answer = String::from_utf8_lossy(&data).into_owned(),
            "image" if !data.is_empty() => {
                upload = Some(UploadedImage {
                    mime: mime.unwrap_or_else(|| "application/octet-stream".to_string()),
                    bytes: data,
                });
            }
            _ => {}
        }
    }

    Ok(QuizForm::new(question, answer, upload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{body::to_bytes, http::StatusCode, test, App};

    #[actix_web::test]
    async fn test_attachment_response_serves_stored_bytes_and_mime() {
        let attachment = Attachment::new("quiz-1", "image/png", vec![1, 2, 3]);

        let resp = attachment_response(Some(attachment), "/images/none.png");

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()
                .get(header::CONTENT_TYPE)
                .unwrap()
                .to_str()
                .unwrap(),
            "image/png"
        );

        let body = to_bytes(resp.into_body()).await.unwrap();
        assert_eq!(body.as_ref(), [1, 2, 3]);
    }

    #[actix_web::test]
    async fn test_missing_attachment_redirects_to_placeholder() {
        let resp = attachment_response(None, "/images/none.png");

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(
            resp.headers()
                .get(header::LOCATION)
                .unwrap()
                .to_str()
                .unwrap(),
            "/images/none.png"
        );
    }

    #[actix_web::test]
    async fn test_empty_payload_redirects_to_placeholder() {
        let attachment = Attachment::new("quiz-1", "image/png", vec![]);

        let resp = attachment_response(Some(attachment), "/images/none.png");

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(
            resp.headers()
                .get(header::LOCATION)
                .unwrap()
                .to_str()
                .unwrap(),
            "/images/none.png"
        );
    }

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().service(health_check)).await;

        let req = test::TestRequest::get().uri("/health").to_request();

        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn test_new_quiz_renders_blank_form() {
        let app = test::init_service(App::new().service(new_quiz)).await;

        let req = test::TestRequest::get().uri("/quizzes/new").to_request();

        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["question"], "");
        assert_eq!(body["answer"], "");
    }
}
