use std::sync::Arc;

use serenio_chatbot::{
    config::{Config, local_url},
    logging,
    routes,
    services::chatbot::ChatService,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init(logging::SERVER_FILTER, std::io::stdout);

    let config = Config::from_env()?;
    let chat = ChatService::from_config(&config)?;
    let state = Arc::new(AppState::new(chat));

    let app = routes::create_router().with_state(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;

    tracing::info!("🚀 chatbot running at {}", local_url(listener.local_addr()?));
    axum::serve(listener, app).await?;
    Ok(())
}
