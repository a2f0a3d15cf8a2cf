/// Pagination Tests
///
/// Exercises continuation-key handling of query and scan, eager and streamed.
mod helpers;

use aws_sdk_dynamodb::operation::query::{QueryInput, QueryOutput};
use aws_sdk_dynamodb::operation::scan::{ScanInput, ScanOutput};
use aws_sdk_dynamodb::types::AttributeValue;
use dynamo_doc_client::{Error, Item, Key};
use futures_util::TryStreamExt;
use helpers::*;
use std::collections::HashMap;

fn query_input() -> QueryInput {
    QueryInput::builder()
        .table_name("Orders")
        .key_condition_expression("id = :id")
        .expression_attribute_values(":id", AttributeValue::N("1".to_string()))
        .build()
        .unwrap()
}

fn scan_input() -> ScanInput {
    ScanInput::builder().table_name("Orders").build().unwrap()
}

fn query_page(page_items: Vec<Item>, last_evaluated_key: Option<Key>) -> QueryOutput {
    QueryOutput::builder()
        .set_items(Some(page_items))
        .set_last_evaluated_key(last_evaluated_key)
        .build()
}

fn scan_page(page_items: Vec<Item>, last_evaluated_key: Option<Key>) -> ScanOutput {
    ScanOutput::builder()
        .set_items(Some(page_items))
        .set_last_evaluated_key(last_evaluated_key)
        .build()
}

/// A scan follows the continuation key to the second page
#[tokio::test]
async fn test_scan_two_pages() {
    let (client, wrapper) = fake_wrapper();

    client
        .scan
        .ok(scan_page(items([1, 2]), Some(key(2))))
        .ok(scan_page(items([3]), None));

    let result = wrapper.scan(scan_input()).await.unwrap();
    assert_eq!(result, items([1, 2, 3]));

    let calls = client.scan.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].exclusive_start_key, None);
    assert_eq!(calls[1].exclusive_start_key, Some(key(2)));
    assert_eq!(calls[1].table_name.as_deref(), Some("Orders"));
}

/// A query without a continuation key is a single call
#[tokio::test]
async fn test_query_single_page() {
    let (client, wrapper) = fake_wrapper();

    client.query.ok(query_page(items([1, 2]), None));

    let result = wrapper.query(query_input()).await.unwrap();

    assert_eq!(result, items([1, 2]));
    assert_eq!(client.query.calls(), vec![query_input()]);
}

/// A query keeps its expressions on every page
#[tokio::test]
async fn test_query_two_pages() {
    let (client, wrapper) = fake_wrapper();

    client
        .query
        .ok(query_page(items([1]), Some(key(1))))
        .ok(query_page(items([2]), None));

    let result = wrapper.query(query_input()).await.unwrap();
    assert_eq!(result, items([1, 2]));

    let calls = client.query.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[1].key_condition_expression.as_deref(),
        Some("id = :id")
    );
    assert_eq!(calls[1].exclusive_start_key, Some(key(1)));
}

/// An empty page with a continuation key does not end the read
#[tokio::test]
async fn test_query_continues_past_empty_page() {
    let (client, wrapper) = fake_wrapper();

    client
        .query
        .ok(query_page(vec![], Some(key(1))))
        .ok(query_page(items([5]), None));

    let result = wrapper.query(query_input()).await.unwrap();

    assert_eq!(result, items([5]));
    assert_eq!(client.query.call_count(), 2);
}

/// An empty continuation key ends the read
#[tokio::test]
async fn test_scan_empty_continuation_key_ends_read() {
    let (client, wrapper) = fake_wrapper();

    client.scan.ok(scan_page(items([1]), Some(HashMap::new())));

    let result = wrapper.scan(scan_input()).await.unwrap();

    assert_eq!(result, items([1]));
    assert_eq!(client.scan.call_count(), 1);
}

/// A failed page aborts the read
#[tokio::test]
async fn test_query_propagates_failure() {
    let (client, wrapper) = fake_wrapper();

    client
        .query
        .ok(query_page(items([1]), Some(key(1))))
        .respond(Err(query_failure()));

    let err = wrapper.query(query_input()).await.unwrap_err();
    assert!(matches!(err, Error::DynamoQueryError(_)));
}

/// The basic variants issue one call and keep the continuation key
#[tokio::test]
async fn test_basic_variants_return_one_page() {
    let (client, wrapper) = fake_wrapper();

    client.query.ok(query_page(items([1]), Some(key(1))));
    client.scan.ok(scan_page(items([2]), Some(key(2))));

    let query_output = wrapper.query_basic(query_input()).await.unwrap();
    assert_eq!(query_output.items, Some(items([1])));
    assert_eq!(query_output.last_evaluated_key, Some(key(1)));

    let scan_output = wrapper.scan_basic(scan_input()).await.unwrap();
    assert_eq!(scan_output.items, Some(items([2])));
    assert_eq!(scan_output.last_evaluated_key, Some(key(2)));

    assert_eq!(client.query.call_count(), 1);
    assert_eq!(client.scan.call_count(), 1);
}

/// A streamed query yields every item across pages
#[tokio::test]
async fn test_query_stream() {
    let (client, wrapper) = fake_wrapper();

    client
        .query
        .ok(query_page(items([1, 2]), Some(key(2))))
        .ok(query_page(vec![], Some(key(2))))
        .ok(query_page(items([3]), None));

    let streamed: Vec<Item> = wrapper.query_stream(query_input()).try_collect().await.unwrap();

    assert_eq!(streamed, items([1, 2, 3]));
    assert_eq!(client.query.call_count(), 3);
}

/// A streamed scan fetches the next page only when asked
#[tokio::test]
async fn test_scan_stream_is_lazy() {
    let (client, wrapper) = fake_wrapper();

    client
        .scan
        .ok(scan_page(items([1]), Some(key(1))))
        .ok(scan_page(items([2]), None));

    let stream = wrapper.scan_stream(scan_input());
    futures_util::pin_mut!(stream);

    assert_eq!(stream.try_next().await.unwrap(), Some(item(1)));
    assert_eq!(client.scan.call_count(), 1);

    assert_eq!(stream.try_next().await.unwrap(), Some(item(2)));
    assert_eq!(stream.try_next().await.unwrap(), None);
    assert_eq!(client.scan.call_count(), 2);
}

/// Typed reads deserialize every item
#[tokio::test]
async fn test_query_as_and_scan_as() {
    let (client, wrapper) = fake_wrapper();

    client.query.ok(query_page(items([1, 2]), None));
    client.scan.ok(scan_page(items([3]), None));

    let records: Vec<Record> = wrapper.query_as(query_input()).await.unwrap();
    assert_eq!(
        records,
        vec![
            Record { id: 1, name: "item-1".to_string() },
            Record { id: 2, name: "item-2".to_string() },
        ]
    );

    let records: Vec<Record> = wrapper.scan_as(scan_input()).await.unwrap();
    assert_eq!(records[0].id, 3);
}
