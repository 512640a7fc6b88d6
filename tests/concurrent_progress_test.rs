// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use eco_tracker::db::MemoryDb;
use eco_tracker::models::{ActionCategory, CompletedAction};
use uuid::Uuid;

const NUM_CONCURRENT_ACTIONS: u32 = 50;
const ACTION_CO2_KG: f64 = 0.4;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_logging_loses_no_updates() {
    // Every record runs under the user's entry lock, so concurrent logs
    // must all be counted and the aggregates must match the log.
    let db = MemoryDb::new();
    let user_id = Uuid::new_v4();

    let mut handles = vec![];
    for i in 0..NUM_CONCURRENT_ACTIONS {
        let db_clone = db.clone();
        handles.push(tokio::spawn(async move {
            let action = CompletedAction::new(
                &format!("Short shower {}", i),
                ActionCategory::Water,
                ACTION_CO2_KG,
                chrono::Utc::now(),
            );
            db_clone.record_action(user_id, action).await
        }));
    }

    for handle in handles {
        handle.await.unwrap().expect("record should succeed");
    }

    let progress = db.get_progress(user_id).await.unwrap();
    assert_eq!(progress.actions.len(), NUM_CONCURRENT_ACTIONS as usize);
    assert_eq!(progress.totals.actions, NUM_CONCURRENT_ACTIONS);
    assert_eq!(progress.totals.points, 40 * u64::from(NUM_CONCURRENT_ACTIONS));

    let mut recomputed = progress.clone();
    recomputed.recompute();
    assert_eq!(recomputed, progress);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_log_and_remove() {
    let db = MemoryDb::new();
    let user_id = Uuid::new_v4();

    for _ in 0..NUM_CONCURRENT_ACTIONS {
        let action = CompletedAction::new(
            "Recycled",
            ActionCategory::Waste,
            ACTION_CO2_KG,
            chrono::Utc::now(),
        );
        db.record_action(user_id, action).await.unwrap();
    }

    let mut handles = vec![];
    for _ in 0..NUM_CONCURRENT_ACTIONS / 2 {
        let db_clone = db.clone();
        handles.push(tokio::spawn(async move {
            db_clone.remove_action_by_title(user_id, "Recycled").await
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap().unwrap().is_some());
    }

    let progress = db.get_progress(user_id).await.unwrap();
    assert_eq!(progress.totals.actions, NUM_CONCURRENT_ACTIONS / 2);
    assert_eq!(progress.actions.len(), (NUM_CONCURRENT_ACTIONS / 2) as usize);
}
