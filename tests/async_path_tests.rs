#![cfg(all(feature = "path", feature = "async"))]
//! Integration tests for the asynchronous path compiler.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use rstest::rstest;
use serde_json::{Value, json};

use propflow::path::{
    AsyncAt, AsyncLift, AsyncOn, PathError, async_prop_path, async_read_path, prop_path_async,
    sync_prop_path,
};

async fn slow_double(value: Value) -> Value {
    let number = value.as_i64().unwrap_or_default();
    // Later elements resolve first.
    tokio::time::sleep(Duration::from_millis(100 - number.unsigned_abs().min(9) * 10)).await;
    json!(number * 2)
}

// =============================================================================
// Reads and updates
// =============================================================================

#[rstest]
#[tokio::test(start_paused = true)]
async fn async_read_fans_out_in_element_order() {
    common::init_tracing();
    let root = json!({ "a": { "b": [{ "c": 1 }, { "c": 2 }, { "c": 3 }] } });

    let result = async_read_path("a.b[].c").run(slow_double, root).await;

    assert_eq!(result, Ok(json!([2, 4, 6])));
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn async_update_matches_sync_update() {
    let root = json!({
        "a": { "b": [{ "c": 1, "keep": "x" }, { "c": 2 }] },
        "untouched": [1, 2, 3],
    });

    let asynchronous = async_prop_path("a.b[].c").run(slow_double, root.clone()).await;
    let synchronous =
        sync_prop_path("a.b[].c").run(|value| json!(value.as_i64().unwrap_or_default() * 2), root);

    assert_eq!(asynchronous, synchronous);
    assert_eq!(
        asynchronous,
        Ok(json!({
            "a": { "b": [{ "c": 2, "keep": "x" }, { "c": 4 }] },
            "untouched": [1, 2, 3],
        }))
    );
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn element_transforms_run_concurrently() {
    let root = json!({ "xs": [1, 2, 3, 4] });
    let started = tokio::time::Instant::now();

    let result = async_read_path("xs[]")
        .run(
            |value: Value| async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                value
            },
            root,
        )
        .await;

    assert_eq!(result, Ok(json!([1, 2, 3, 4])));
    assert!(started.elapsed() < Duration::from_millis(100));
}

#[rstest]
#[tokio::test]
async fn compiled_async_accessor_is_reusable() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let accessor = prop_path_async(AsyncOn, AsyncLift, "n").apply(move |value: Value| {
        counter.fetch_add(1, Ordering::SeqCst);
        async move { json!(value.as_i64().unwrap_or_default() + 1) }
    });

    assert_eq!(accessor(json!({ "n": 1 })).await, Ok(json!({ "n": 2 })));
    assert_eq!(accessor(json!({ "n": 10 })).await, Ok(json!({ "n": 11 })));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

// =============================================================================
// Failures
// =============================================================================

#[rstest]
#[tokio::test]
async fn async_shape_error_is_reported() {
    let result = prop_path_async(AsyncAt, AsyncLift, "a.b[]")
        .run(|value: Value| async move { value }, json!({ "a": { "b": "text" } }))
        .await;

    assert_eq!(
        result,
        Err(PathError::NotAnArray {
            key: "b".to_owned(),
            found: "string",
        })
    );
}

#[rstest]
#[tokio::test]
async fn failing_async_transform_fails_the_update() {
    let accessor = async_prop_path("xs[]").try_apply(|value: Value| async move {
        match value.as_str() {
            Some(text) => Ok(json!(text.len())),
            None => Err(PathError::transform(format!("not text: {value}"))),
        }
    });

    assert_eq!(
        accessor(json!({ "xs": ["ab", "c"] })).await,
        Ok(json!({ "xs": [2, 1] }))
    );
    assert_eq!(
        accessor(json!({ "xs": ["ab", 3] })).await,
        Err(PathError::transform("not text: 3"))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_accessor_can_be_shared_across_tasks() {
    let accessor = async_read_path("id").apply(|value: Value| async move { value });
    let handles: Vec<_> = (0..4)
        .map(|id| {
            let accessor = Arc::clone(&accessor);
            tokio::spawn(async move { accessor(json!({ "id": id })).await })
        })
        .collect();

    for (id, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.await.unwrap(), Ok(json!(id)));
    }
}
