// tests/pg_store_tests.rs
//
// Run against a live PostgreSQL: `DATABASE_URL=postgres://... cargo test -- --ignored`.
// `sqlx::test` creates a throwaway database per test and applies ./migrations.
mod common;

use std::sync::Arc;

use sqlx::PgPool;
use stockwatch::{
  AlertOutcome, AlertPolicy, AlertStatus, AlertStore, FixedClock, InventoryService, ItemChanges, ItemStore, NewAlert,
  NewItem, NewUser, StockError, UserStore,
};
use stockwatch_app::db::PgStore;

fn new_item(name: &str, quantity: i32, min_quantity: i32) -> NewItem {
  NewItem {
    name: name.to_string(),
    quantity,
    unit: "box".to_string(),
    min_quantity,
    updated_by: None,
  }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn resolved_alert_rows_cannot_be_updated_again(pool: PgPool) {
  common::setup_tracing();
  let store = PgStore::new(pool);
  let item = store.insert_item(new_item("Gauze", 1, 10), common::t0()).await.unwrap();
  let alert = store
    .insert_alert(NewAlert {
      inventory_id: item.id,
      triggered_at: common::t0(),
    })
    .await
    .unwrap();
  assert_eq!(alert.status, AlertStatus::Active);

  let resolved = alert.clone().resolve(common::t0()).unwrap();
  store.update_alert(&resolved).await.unwrap();

  // The stored row is terminal; a stale ACTIVE copy must not overwrite it.
  let err = store.update_alert(&alert).await.unwrap_err();
  assert!(matches!(
    err,
    StockError::InvalidTransition {
      status: AlertStatus::Resolved,
      ..
    }
  ));

  let mut missing = resolved.clone();
  missing.id += 1000;
  assert!(matches!(
    store.update_alert(&missing).await,
    Err(StockError::AlertNotFound { .. })
  ));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn constraint_violations_map_to_domain_errors(pool: PgPool) {
  common::setup_tracing();
  let store = PgStore::new(pool);

  let err = store
    .insert_alert(NewAlert {
      inventory_id: 4242,
      triggered_at: common::t0(),
    })
    .await
    .unwrap_err();
  assert!(matches!(err, StockError::ItemNotFound { item_id: 4242 }));

  let item = store.insert_item(new_item("Masks", 1, 10), common::t0()).await.unwrap();
  let first = NewAlert {
    inventory_id: item.id,
    triggered_at: common::t0(),
  };
  store.insert_alert(first).await.unwrap();
  // alerts_one_active_per_item turns a second ACTIVE row into a store failure.
  assert!(matches!(store.insert_alert(first).await, Err(StockError::Store { .. })));

  let new_user = || NewUser {
    username: "test".to_string(),
    password_hash: "$argon2id$placeholder".to_string(),
    role: "staff".to_string(),
  };
  store.insert_user(new_user()).await.unwrap();
  assert!(matches!(store.insert_user(new_user()).await, Err(StockError::Conflict(_))));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn deleting_an_item_cascades_to_its_alerts(pool: PgPool) {
  common::setup_tracing();
  let store = PgStore::new(pool);
  let item = store.insert_item(new_item("Saline", 1, 10), common::t0()).await.unwrap();
  let alert = store
    .insert_alert(NewAlert {
      inventory_id: item.id,
      triggered_at: common::t0(),
    })
    .await
    .unwrap();
  store.update_alert(&alert.resolve(common::t0()).unwrap()).await.unwrap();
  store
    .insert_alert(NewAlert {
      inventory_id: item.id,
      triggered_at: common::t0(),
    })
    .await
    .unwrap();
  assert_eq!(store.alerts_for_item(item.id).await.unwrap().len(), 2);

  assert!(store.delete_item(item.id).await.unwrap());
  assert!(store.alerts_for_item(item.id).await.unwrap().is_empty());
  assert!(store.list_alerts(None).await.unwrap().is_empty());
  assert!(!store.delete_item(item.id).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn alert_lifecycle_through_the_service(pool: PgPool) {
  common::setup_tracing();
  let clock = Arc::new(FixedClock::new(common::t0()));
  let service = InventoryService::new(Arc::new(PgStore::new(pool)), clock.clone(), AlertPolicy::default());

  let created = service.create_item(new_item("Nitrile gloves", 5, 10)).await.unwrap();
  assert!(matches!(created.alert, Some(AlertOutcome::Raised(_))));

  let still_low = ItemChanges {
    quantity: Some(3),
    ..ItemChanges::default()
  };
  let edited = service.update_item(created.item.id, still_low, None).await.unwrap();
  assert!(matches!(edited.alert, Some(AlertOutcome::StillActive(_))));

  clock.advance(chrono::Duration::hours(1));
  let restocked = ItemChanges {
    quantity: Some(20),
    ..ItemChanges::default()
  };
  let edited = service.update_item(created.item.id, restocked, None).await.unwrap();
  assert!(matches!(edited.alert, Some(AlertOutcome::Resolved(_))));

  assert!(service.list_alerts(Some(AlertStatus::Active)).await.unwrap().is_empty());
  assert_eq!(service.list_alerts(Some(AlertStatus::Resolved)).await.unwrap().len(), 1);
  let listing = service.list_items().await.unwrap();
  assert!(!listing[0].alerting);
}
