use crate::SyncStatus;

#[test]
fn test_sync_status_empty_table_is_zero_percent() {
    let status = SyncStatus::new(0, 0);
    assert_eq!(status.sync_percentage, 0.0);
}

#[test]
fn test_sync_status_rounds_to_two_decimals() {
    let status = SyncStatus::new(3, 1);
    assert_eq!(status.sync_percentage, 33.33);
    assert_eq!(status.linked_users, 1);
    assert_eq!(status.total_users, 3);
}

#[test]
fn test_sync_status_fully_linked() {
    assert_eq!(SyncStatus::new(4, 4).sync_percentage, 100.0);
}
