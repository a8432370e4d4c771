// server/src/web/routes.rs

use actix_web::web;

use crate::web::handlers::{alert_handlers, auth_handlers, inventory_handlers};

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1")
      .route("/health", web::get().to(health_check_handler))
      .service(
        web::scope("/auth")
          .route("/login", web::post().to(auth_handlers::login_handler))
          .route("/logout", web::post().to(auth_handlers::logout_handler)),
      )
      // Everything below requires a session (`LoggedInUser`).
      .service(
        web::scope("/inventory")
          .service(
            web::resource("")
              .route(web::get().to(inventory_handlers::list_items_handler))
              .route(web::post().to(inventory_handlers::create_item_handler)),
          )
          .service(
            web::resource("/{item_id}")
              .route(web::get().to(inventory_handlers::get_item_handler))
              .route(web::post().to(inventory_handlers::edit_item_handler))
              .route(web::delete().to(inventory_handlers::delete_item_handler)),
          ),
      )
      .service(web::scope("/alerts").route("", web::get().to(alert_handlers::list_alerts_handler))),
  );
}
