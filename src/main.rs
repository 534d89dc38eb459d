use actix_web::{middleware::Logger, web, App, HttpServer};
use quiz_server::{app_state::AppState, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = AppState::new(config)
        .await
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err.to_string()))?;

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            // `/quizzes/new` must be registered before `/quizzes/{id}`
            .service(handlers::new_quiz)
            .service(handlers::list_quizzes)
            .service(handlers::create_quiz)
            .service(handlers::edit_quiz)
            .service(handlers::play_quiz)
            .service(handlers::check_quiz)
            .service(handlers::quiz_attachment)
            .service(handlers::show_quiz)
            .service(handlers::update_quiz)
            .service(handlers::delete_quiz)
            .service(handlers::health_check)
            .service(handlers::health_check_ready)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
