use iron_blog::{service::BlogService, Config, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "iron_blog=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting iron-blog");
    tracing::info!("Web server will listen on: {}", config.web_addr());

    let store = iron_blog::db::open_store(&config).await?;
    let blog = BlogService::new(store);

    if config.seed_demo_posts {
        blog.seed_defaults().await?;
    }

    let app_state = iron_blog::web::AppState::new(blog);

    tokio::select! {
        result = iron_blog::web::serve(config.web_addr(), app_state, config.static_dir.clone()) => {
            if let Err(e) = &result {
                tracing::error!("Web server stopped: {}", e);
            }
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutting down");
        }
    }

    Ok(())
}
