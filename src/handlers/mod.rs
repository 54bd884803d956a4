pub mod file;
pub mod user;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/users")
            .route(web::post().to(user::create_user))
            .route(web::get().to(user::list_users)),
    )
    .service(web::resource("/api/users/{id}").route(web::delete().to(user::delete_user)))
    .service(web::resource("/api/files/download").route(web::post().to(file::download_file)))
    .service(
        web::resource("/api/files")
            .route(web::post().to(file::upload_file))
            .route(web::get().to(file::list_files))
            .route(web::delete().to(file::delete_file)),
    );
}
