// server/src/web/handlers/inventory_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use stockwatch::ItemId;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::LoggedInUser;
use crate::web::forms::{CreateItemForm, EditItemForm};
use crate::web::views::{AlertView, ItemView, ListingView, OutcomeView};

#[instrument(name = "handler::list_items", skip(app_state, user), fields(user_id = user.user_id))]
pub async fn list_items_handler(app_state: web::Data<AppState>, user: LoggedInUser) -> Result<HttpResponse, AppError> {
  let listings = app_state.inventory.list_items().await?;
  info!("Listed {} inventory items.", listings.len());

  let items: Vec<ListingView> = listings
    .iter()
    .map(|listing| ListingView::new(listing, &app_state.display))
    .collect();
  Ok(HttpResponse::Ok().json(json!({
      "message": "Inventory fetched successfully.",
      "items": items,
  })))
}

#[instrument(name = "handler::create_item", skip(app_state, user, form), fields(user_id = user.user_id))]
pub async fn create_item_handler(
  app_state: web::Data<AppState>,
  user: LoggedInUser,
  form: web::Form<CreateItemForm>,
) -> Result<HttpResponse, AppError> {
  let new_item = form.into_inner().into_new_item(Some(user.user_id))?;
  let written = app_state.inventory.create_item(new_item).await?;

  let outcome = written.alert.as_ref().map(|o| OutcomeView::new(o, &app_state.display));
  Ok(HttpResponse::Created().json(json!({
      "message": "Inventory item created.",
      "item": ItemView::new(&written.item, &app_state.display),
      "alert": outcome,
  })))
}

#[instrument(name = "handler::get_item", skip(app_state, _user, path), fields(item_id = %path.as_ref()))]
pub async fn get_item_handler(
  app_state: web::Data<AppState>,
  _user: LoggedInUser,
  path: web::Path<ItemId>,
) -> Result<HttpResponse, AppError> {
  let item_id = path.into_inner();
  let item = app_state.inventory.get_item(item_id).await?;
  let alerts = app_state.inventory.alerts_for_item(item_id).await?;

  Ok(HttpResponse::Ok().json(json!({
      "message": "Inventory item fetched successfully.",
      "item": ItemView::new(&item, &app_state.display),
      "alerts": AlertView::many(&alerts, &app_state.display),
  })))
}

#[instrument(
    name = "handler::edit_item",
    skip(app_state, user, path, form),
    fields(item_id = %path.as_ref(), user_id = user.user_id)
)]
pub async fn edit_item_handler(
  app_state: web::Data<AppState>,
  user: LoggedInUser,
  path: web::Path<ItemId>,
  form: web::Form<EditItemForm>,
) -> Result<HttpResponse, AppError> {
  let item_id = path.into_inner();
  let changes = form.into_inner().into_changes()?;
  let written = app_state
    .inventory
    .update_item(item_id, changes, Some(user.user_id))
    .await?;

  let outcome = written.alert.as_ref().map(|o| OutcomeView::new(o, &app_state.display));
  Ok(HttpResponse::Ok().json(json!({
      "message": "Inventory item updated.",
      "item": ItemView::new(&written.item, &app_state.display),
      "alert": outcome,
  })))
}

#[instrument(
    name = "handler::delete_item",
    skip(app_state, user, path),
    fields(item_id = %path.as_ref(), user_id = user.user_id)
)]
pub async fn delete_item_handler(
  app_state: web::Data<AppState>,
  user: LoggedInUser,
  path: web::Path<ItemId>,
) -> Result<HttpResponse, AppError> {
  let item_id = path.into_inner();
  app_state.inventory.delete_item(item_id).await?;
  Ok(HttpResponse::Ok().json(json!({
      "message": "Inventory item deleted.",
      "itemId": item_id,
  })))
}
