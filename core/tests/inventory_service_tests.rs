// tests/inventory_service_tests.rs
mod common;
use common::*;

use stockwatch::{AlertOutcome, AlertPolicy, AlertStatus, AlertStore, ItemChanges, StockError};

fn quantity(q: i32) -> ItemChanges {
  ItemChanges {
    quantity: Some(q),
    ..Default::default()
  }
}

#[tokio::test]
async fn created_low_item_has_exactly_one_active_alert() {
  let h = Harness::new();

  let write = h.service.create_item(new_item("paper cups", 5, 10)).await.unwrap();

  assert!(matches!(write.alert, Some(AlertOutcome::Raised(_))));
  let alerts = h.service.alerts_for_item(write.item.id).await.unwrap();
  assert_eq!(alerts.len(), 1);
  assert_eq!(alerts[0].status, AlertStatus::Active);
}

#[tokio::test]
async fn restocking_resolves_and_drops_out_of_active_listing() {
  let h = Harness::new();
  let created = h.service.create_item(new_item("paper cups", 5, 10)).await.unwrap();
  h.tick(10);

  let edited = h.service.update_item(created.item.id, quantity(20), Some(1)).await.unwrap();

  assert!(matches!(edited.alert, Some(AlertOutcome::Resolved(_))));
  assert_eq!(edited.item.quantity, 20);
  assert_eq!(edited.item.updated_by, Some(1));
  assert!(h.service.list_alerts(Some(AlertStatus::Active)).await.unwrap().is_empty());
  let resolved = h.service.list_alerts(Some(AlertStatus::Resolved)).await.unwrap();
  assert_eq!(resolved.len(), 1);
  assert_eq!(resolved[0].inventory_id, created.item.id);
}

#[tokio::test]
async fn well_stocked_item_creates_no_alerts() {
  let h = Harness::new();

  let write = h.service.create_item(new_item("napkins", 20, 10)).await.unwrap();

  assert_eq!(write.alert, Some(AlertOutcome::NoAlert));
  assert_eq!(h.store.alert_count(), 0);
}

#[tokio::test]
async fn two_low_edits_in_a_row_keep_alert_count_at_one() {
  let h = Harness::new();
  let created = h.service.create_item(new_item("lids", 50, 10)).await.unwrap();

  h.service.update_item(created.item.id, quantity(3), None).await.unwrap();
  h.tick(1);
  let second = h.service.update_item(created.item.id, quantity(2), None).await.unwrap();

  assert!(matches!(second.alert, Some(AlertOutcome::StillActive(_))));
  assert_eq!(h.service.alerts_for_item(created.item.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn raising_the_minimum_can_trigger_an_alert() {
  let h = Harness::new();
  let created = h.service.create_item(new_item("straws", 8, 5)).await.unwrap();

  let changes = ItemChanges {
    min_quantity: Some(12),
    ..Default::default()
  };
  let edited = h.service.update_item(created.item.id, changes, None).await.unwrap();

  assert!(matches!(edited.alert, Some(AlertOutcome::Raised(_))));
}

#[tokio::test]
async fn name_only_edit_skips_evaluation() {
  let h = Harness::new();
  let created = h.service.create_item(new_item("sugar", 1, 5)).await.unwrap();

  let changes = ItemChanges {
    name: Some("cane sugar".to_string()),
    ..Default::default()
  };
  let edited = h.service.update_item(created.item.id, changes, None).await.unwrap();

  assert_eq!(edited.alert, None);
  assert_eq!(edited.item.name, "cane sugar");
  assert_eq!(h.store.alert_count(), 1);
}

#[tokio::test]
async fn editing_or_deleting_a_missing_item_is_not_found() {
  let h = Harness::new();

  let edit = h.service.update_item(42, quantity(1), None).await;
  let delete = h.service.delete_item(42).await;

  assert!(matches!(edit, Err(StockError::ItemNotFound { item_id: 42 })));
  assert!(matches!(delete, Err(StockError::ItemNotFound { item_id: 42 })));
  assert_eq!(h.store.alert_count(), 0);
}

#[tokio::test]
async fn deleting_an_item_cascades_to_all_its_alerts() {
  let h = Harness::new();
  let doomed = h.service.create_item(new_item("filters", 0, 4)).await.unwrap();
  let kept = h.service.create_item(new_item("beans", 1, 4)).await.unwrap();
  // One resolved and one active alert for the doomed item.
  h.service.update_item(doomed.item.id, quantity(9), None).await.unwrap();
  h.service.update_item(doomed.item.id, quantity(0), None).await.unwrap();
  assert_eq!(h.store.alerts_for_item(doomed.item.id).await.unwrap().len(), 2);

  h.service.delete_item(doomed.item.id).await.unwrap();

  assert!(h.store.alerts_for_item(doomed.item.id).await.unwrap().is_empty());
  assert_eq!(h.store.alerts_for_item(kept.item.id).await.unwrap().len(), 1);
  assert!(matches!(
    h.service.get_item(doomed.item.id).await,
    Err(StockError::ItemNotFound { .. })
  ));
}

#[tokio::test]
async fn listing_flags_items_from_persisted_active_alerts() {
  let h = Harness::with_policy(AlertPolicy { auto_resolve: false });
  let low = h.service.create_item(new_item("milk", 1, 6)).await.unwrap();
  let fine = h.service.create_item(new_item("oat milk", 9, 6)).await.unwrap();
  // Stock recovered, but with auto-resolve off the alert row is still ACTIVE,
  // so the listing keeps flagging the item.
  h.service.update_item(low.item.id, quantity(30), None).await.unwrap();

  let listing = h.service.list_items().await.unwrap();

  assert_eq!(listing.len(), 2);
  assert_eq!(listing[0].item.id, low.item.id);
  assert!(listing[0].alerting);
  assert_eq!(listing[1].item.id, fine.item.id);
  assert!(!listing[1].alerting);
}

#[tokio::test]
async fn empty_edit_is_rejected_without_touching_alerts() {
  let h = Harness::new();
  let created = h.service.create_item(new_item("tea", 1, 2)).await.unwrap();

  let result = h.service.update_item(created.item.id, ItemChanges::default(), None).await;

  assert!(matches!(result, Err(StockError::Validation(_))));
  assert_eq!(
    h.store.find_alert(created.item.id, AlertStatus::Active).await.unwrap().map(|a| a.id),
    created.alert.and_then(|o| o.alert().map(|a| a.id))
  );
}
