//! Common test utilities

use lostfound_daemon::NewItem;
use tempfile::TempDir;

/// Create a temporary directory for testing
#[allow(dead_code)] // Test utility for integration tests
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// A valid submission; tweak fields to exercise validation.
#[allow(dead_code)]
pub fn submission(title: &str, item_type: &str, category: &str) -> NewItem {
    NewItem {
        title: title.to_string(),
        item_type: item_type.to_string(),
        category: category.to_string(),
        description: format!("{title} reported on campus"),
        location_text: "Library 2nd floor".to_string(),
        date_seen: "2024-01-15".to_string(),
        images: vec![],
        posted_by_name: "Sarah Johnson".to_string(),
        posted_by_email: "sarah.j@campus.edu".to_string(),
    }
}

/// The "Red Wallet" found report used across scenarios.
#[allow(dead_code)]
pub fn red_wallet() -> NewItem {
    NewItem {
        description: "Small red leather wallet with student ID".to_string(),
        ..submission("Red Wallet", "Found", "Wallet")
    }
}
