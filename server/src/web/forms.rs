// server/src/web/forms.rs

//! URL-encoded request bodies. Numeric fields arrive as text and are
//! coerced here, so a malformed number is rejected before the inventory
//! service (and therefore the alert evaluator) is reached.

use serde::Deserialize;
use stockwatch::{ItemChanges, NewItem, UserId};

use crate::errors::AppError;

#[derive(Deserialize, Debug)]
pub struct LoginForm {
  pub username: String,
  pub password: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct CreateItemForm {
  pub name: Option<String>,
  pub quantity: Option<String>,
  pub unit: Option<String>,
  pub min_quantity: Option<String>,
}

impl CreateItemForm {
  pub fn into_new_item(self, updated_by: Option<UserId>) -> Result<NewItem, AppError> {
    Ok(NewItem {
      name: required("name", self.name)?,
      quantity: parse_count("quantity", &required("quantity", self.quantity)?)?,
      unit: required("unit", self.unit)?,
      min_quantity: parse_count("min_quantity", &required("min_quantity", self.min_quantity)?)?,
      updated_by,
    })
  }
}

/// Every field is optional; blank fields are treated as not submitted.
#[derive(Deserialize, Debug, Default)]
pub struct EditItemForm {
  pub name: Option<String>,
  pub quantity: Option<String>,
  pub unit: Option<String>,
  pub min_quantity: Option<String>,
}

impl EditItemForm {
  pub fn into_changes(self) -> Result<ItemChanges, AppError> {
    Ok(ItemChanges {
      name: present(self.name),
      quantity: present(self.quantity).map(|q| parse_count("quantity", &q)).transpose()?,
      unit: present(self.unit),
      min_quantity: present(self.min_quantity)
        .map(|m| parse_count("min_quantity", &m))
        .transpose()?,
    })
  }
}

#[derive(Deserialize, Debug, Default)]
pub struct AlertQuery {
  pub status: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
  value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn required(field: &str, value: Option<String>) -> Result<String, AppError> {
  present(value).ok_or_else(|| AppError::Validation(format!("Field '{}' is required.", field)))
}

fn parse_count(field: &str, raw: &str) -> Result<i32, AppError> {
  raw
    .trim()
    .parse::<i32>()
    .map_err(|_| AppError::Validation(format!("Field '{}' must be an integer, got '{}'.", field, raw)))
}
