use super::models::{Entity as SimEntity, SimStatus};
use super::services::{delete_all_sims, insert_sims};
use crate::config::test_helpers::setup_test_db;
use crate::test_helpers::sim;
use sea_orm::{ActiveEnum, EntityTrait, PaginatorTrait};
use serde_json::json;

#[test]
fn test_sim_display_contains_fields() {
    let text = sim(52334, 234, "Italy", SimStatus::WaitingForActivation).to_string();

    assert!(text.contains("52334"));
    assert!(text.contains("234"));
    assert!(text.contains("Italy"));
    assert!(text.contains("Waiting for activation"));
}

#[test]
fn test_sim_status_serialization() {
    assert_eq!(
        serde_json::to_value(SimStatus::WaitingForActivation).unwrap(),
        json!("Waiting for activation")
    );
    assert_eq!(serde_json::to_value(SimStatus::Active).unwrap(), json!("Active"));

    let blocked: SimStatus = serde_json::from_str(r#""Blocked""#).unwrap();
    assert_eq!(blocked, SimStatus::Blocked);

    // Matching is exact
    assert!(serde_json::from_str::<SimStatus>(r#""waiting for activation""#).is_err());
}

#[test]
fn test_sim_status_db_values_match_display() {
    for status in [
        SimStatus::Active,
        SimStatus::WaitingForActivation,
        SimStatus::Deactivated,
        SimStatus::Blocked,
    ] {
        assert_eq!(status.to_value(), status.to_string());
    }
}

#[test]
fn test_sim_json_uses_camel_case() {
    let value = serde_json::to_value(sim(1, 23, "UK", SimStatus::Deactivated)).unwrap();
    assert_eq!(
        value,
        json!({"id": 1, "operatorCode": 23, "country": "UK", "status": "Deactivated"})
    );
}

#[tokio::test]
async fn test_insert_sims_in_batches() {
    let db = setup_test_db().await;
    let sims: Vec<_> = (1..=25)
        .map(|id| sim(id, 10, "Italy", SimStatus::Active))
        .collect();

    let inserted = insert_sims(&db, sims, 10).await.unwrap();

    assert_eq!(inserted, 25);
    assert_eq!(SimEntity::find().count(&db).await.unwrap(), 25);
    let stored = SimEntity::find_by_id(17).one(&db).await.unwrap().unwrap();
    assert_eq!(stored, sim(17, 10, "Italy", SimStatus::Active));
}

#[tokio::test]
async fn test_insert_no_sims_is_a_no_op() {
    let db = setup_test_db().await;

    let inserted = insert_sims(&db, Vec::new(), 10).await.unwrap();

    assert_eq!(inserted, 0);
}

#[tokio::test]
async fn test_sim_ids_are_unique() {
    let db = setup_test_db().await;
    insert_sims(&db, vec![sim(5, 1, "Spain", SimStatus::Active)], 1)
        .await
        .unwrap();

    let duplicate = insert_sims(&db, vec![sim(5, 2, "Spain", SimStatus::Blocked)], 1).await;

    assert!(duplicate.is_err());
}

#[tokio::test]
async fn test_delete_all_sims() {
    let db = setup_test_db().await;
    insert_sims(
        &db,
        vec![
            sim(1, 1, "Spain", SimStatus::Active),
            sim(2, 2, "Spain", SimStatus::Active),
        ],
        10,
    )
    .await
    .unwrap();

    assert_eq!(delete_all_sims(&db).await.unwrap(), 2);
    assert_eq!(SimEntity::find().count(&db).await.unwrap(), 0);
}
