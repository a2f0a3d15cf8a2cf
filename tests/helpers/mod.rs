//! Test helpers for wrapper tests
//!
//! Provides a scripted in-memory `DocumentClient` and the fixtures used to
//! build its requests and responses.
#![allow(dead_code)]

pub mod fixtures;

pub use fixtures::*;

use async_trait::async_trait;
use aws_sdk_dynamodb::operation::batch_get_item::{BatchGetItemInput, BatchGetItemOutput};
use aws_sdk_dynamodb::operation::batch_write_item::{BatchWriteItemInput, BatchWriteItemOutput};
use aws_sdk_dynamodb::operation::delete_item::{DeleteItemInput, DeleteItemOutput};
use aws_sdk_dynamodb::operation::get_item::{GetItemInput, GetItemOutput};
use aws_sdk_dynamodb::operation::put_item::{PutItemInput, PutItemOutput};
use aws_sdk_dynamodb::operation::query::{QueryInput, QueryOutput};
use aws_sdk_dynamodb::operation::scan::{ScanInput, ScanOutput};
use aws_sdk_dynamodb::operation::update_item::{UpdateItemInput, UpdateItemOutput};
use dynamo_doc_client::{ClientWrapper, DocumentClient, Error};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Recorded inputs and queued responses of one store operation
pub struct Script<I, O> {
    calls: Mutex<Vec<I>>,
    responses: Mutex<VecDeque<Result<O, Error>>>,
}

impl<I, O> Default for Script<I, O> {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            responses: Mutex::new(VecDeque::new()),
        }
    }
}

impl<I: Clone, O> Script<I, O> {
    /// Queue a successful response
    pub fn ok(&self, output: O) -> &Self {
        self.respond(Ok(output))
    }

    /// Queue a response
    pub fn respond(&self, response: Result<O, Error>) -> &Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    /// Inputs received so far, in call order
    pub fn calls(&self) -> Vec<I> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls received so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn call(&self, operation: &str, input: I) -> Result<O, Error> {
        self.calls.lock().unwrap().push(input);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected {operation} call"))
    }
}

/// `DocumentClient` that answers from per-operation scripts
#[derive(Default)]
pub struct FakeDocumentClient {
    pub get_item: Script<GetItemInput, GetItemOutput>,
    pub put_item: Script<PutItemInput, PutItemOutput>,
    pub delete_item: Script<DeleteItemInput, DeleteItemOutput>,
    pub update_item: Script<UpdateItemInput, UpdateItemOutput>,
    pub query: Script<QueryInput, QueryOutput>,
    pub scan: Script<ScanInput, ScanOutput>,
    pub batch_get_item: Script<BatchGetItemInput, BatchGetItemOutput>,
    pub batch_write_item: Script<BatchWriteItemInput, BatchWriteItemOutput>,
}

#[async_trait]
impl DocumentClient for FakeDocumentClient {
    async fn get(&self, input: GetItemInput) -> Result<GetItemOutput, Error> {
        self.get_item.call("GetItem", input)
    }

    async fn put(&self, input: PutItemInput) -> Result<PutItemOutput, Error> {
        self.put_item.call("PutItem", input)
    }

    async fn delete(&self, input: DeleteItemInput) -> Result<DeleteItemOutput, Error> {
        self.delete_item.call("DeleteItem", input)
    }

    async fn update(&self, input: UpdateItemInput) -> Result<UpdateItemOutput, Error> {
        self.update_item.call("UpdateItem", input)
    }

    async fn query(&self, input: QueryInput) -> Result<QueryOutput, Error> {
        self.query.call("Query", input)
    }

    async fn scan(&self, input: ScanInput) -> Result<ScanOutput, Error> {
        self.scan.call("Scan", input)
    }

    async fn batch_get(&self, input: BatchGetItemInput) -> Result<BatchGetItemOutput, Error> {
        self.batch_get_item.call("BatchGetItem", input)
    }

    async fn batch_write(
        &self,
        input: BatchWriteItemInput,
    ) -> Result<BatchWriteItemOutput, Error> {
        self.batch_write_item.call("BatchWriteItem", input)
    }
}

/// A fresh fake client and a wrapper sharing it
pub fn fake_wrapper() -> (
    Arc<FakeDocumentClient>,
    ClientWrapper<Arc<FakeDocumentClient>>,
) {
    let client = Arc::new(FakeDocumentClient::default());
    let wrapper = ClientWrapper::new(client.clone());
    (client, wrapper)
}
