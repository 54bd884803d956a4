use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use log::info;
use std::env;
use std::sync::Arc;

use filestash_backend::db::{self, PgUserStore, UserStore};
use filestash_backend::handlers;
use filestash_backend::utils::s3::{create_s3_client, ObjectStore, S3ObjectStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let pool = db::create_pool().await;
    let s3_client = create_s3_client().await;
    let bucket = env::var("S3_BUCKET_NAME").expect("S3_BUCKET_NAME must be set");
    let region = env::var("AWS_REGION").expect("AWS_REGION must be set");

    // Shared long-lived clients, injected once and reused by every request.
    let object_store: Arc<dyn ObjectStore> = Arc::new(S3ObjectStore::new(s3_client, bucket, region));
    let user_store: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool));

    let port = env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{}", port);
    info!("Starting server at {}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::from(object_store.clone()))
            .app_data(web::Data::from(user_store.clone()))
            .configure(handlers::configure)
    })
    .bind(addr)?
    .run()
    .await
}
