//! Items, keys and store responses shared by the wrapper tests

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::batch_get_item::BatchGetItemOutput;
use aws_sdk_dynamodb::types::{
    AttributeValue, DeleteRequest, KeysAndAttributes, PutRequest, WriteRequest,
};
use dynamo_doc_client::{Error, Item, Key};
use serde::Deserialize;
use std::collections::HashMap;

/// Typed form of [`item`]
#[derive(Deserialize, PartialEq, Debug, Clone)]
pub struct Record {
    pub id: i64,
    pub name: String,
}

/// Primary key with numeric `id`
pub fn key(id: i64) -> Key {
    HashMap::from([("id".to_string(), AttributeValue::N(id.to_string()))])
}

/// Keys for every id in `ids`
pub fn keys(ids: impl IntoIterator<Item = i64>) -> Vec<Key> {
    ids.into_iter().map(key).collect()
}

/// Item stored under [`key`]`(id)`
pub fn item(id: i64) -> Item {
    HashMap::from([
        ("id".to_string(), AttributeValue::N(id.to_string())),
        ("name".to_string(), AttributeValue::S(format!("item-{id}"))),
    ])
}

/// Items for every id in `ids`
pub fn items(ids: impl IntoIterator<Item = i64>) -> Vec<Item> {
    ids.into_iter().map(item).collect()
}

/// Unprocessed-keys entry holding `ids`
pub fn keys_and_attributes(ids: impl IntoIterator<Item = i64>) -> KeysAndAttributes {
    KeysAndAttributes::builder()
        .set_keys(Some(keys(ids)))
        .build()
        .unwrap()
}

/// Put of [`item`]`(id)`
pub fn put_request(id: i64) -> WriteRequest {
    WriteRequest::builder()
        .put_request(PutRequest::builder().set_item(Some(item(id))).build().unwrap())
        .build()
}

/// Delete of [`key`]`(id)`
pub fn delete_request(id: i64) -> WriteRequest {
    WriteRequest::builder()
        .delete_request(
            DeleteRequest::builder()
                .set_key(Some(key(id)))
                .build()
                .unwrap(),
        )
        .build()
}

/// BatchGetItem response with `responses` and `unprocessed` keys per table
pub fn batch_get_response(
    responses: &[(&str, Vec<Item>)],
    unprocessed: &[(&str, Vec<i64>)],
) -> BatchGetItemOutput {
    let mut builder = BatchGetItemOutput::builder();

    for (table_name, table_items) in responses {
        builder = builder.responses(*table_name, table_items.clone());
    }

    for (table_name, ids) in unprocessed {
        builder = builder.unprocessed_keys(*table_name, keys_and_attributes(ids.clone()));
    }

    builder.build()
}

/// Keys of `table_name` in a recorded BatchGetItem request
pub fn requested_keys(
    request_items: &Option<HashMap<String, KeysAndAttributes>>,
    table_name: &str,
) -> Option<Vec<Key>> {
    request_items
        .as_ref()
        .and_then(|tables| tables.get(table_name))
        .map(|reads| reads.keys.clone())
}

/// Error as returned for a throttled BatchGetItem call
pub fn batch_get_failure() -> Error {
    Error::DynamoBatchGetItemError(SdkError::construction_failure("throttled"))
}

/// Error as returned for a throttled BatchWriteItem call
pub fn batch_write_failure() -> Error {
    Error::DynamoBatchWriteItemError(SdkError::construction_failure("throttled"))
}

/// Error as returned for a throttled Query call
pub fn query_failure() -> Error {
    Error::DynamoQueryError(SdkError::construction_failure("throttled"))
}
