use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::operation::batch_get_item::{BatchGetItemInput, BatchGetItemOutput};
use aws_sdk_dynamodb::operation::batch_write_item::{BatchWriteItemInput, BatchWriteItemOutput};
use aws_sdk_dynamodb::operation::delete_item::{DeleteItemInput, DeleteItemOutput};
use aws_sdk_dynamodb::operation::get_item::{GetItemInput, GetItemOutput};
use aws_sdk_dynamodb::operation::put_item::{PutItemInput, PutItemOutput};
use aws_sdk_dynamodb::operation::query::{QueryInput, QueryOutput};
use aws_sdk_dynamodb::operation::scan::{ScanInput, ScanOutput};
use aws_sdk_dynamodb::operation::update_item::{UpdateItemInput, UpdateItemOutput};
use std::sync::Arc;

use crate::error::Error;

/// The store primitives the wrapper is built on
///
/// Every method issues exactly one request and returns the store's native
/// response. Implemented for [`aws_sdk_dynamodb::Client`]; tests substitute
/// an in-memory implementation.
#[async_trait]
pub trait DocumentClient: Send + Sync {
    /// Single GetItem call
    async fn get(&self, input: GetItemInput) -> Result<GetItemOutput, Error>;

    /// Single PutItem call
    async fn put(&self, input: PutItemInput) -> Result<PutItemOutput, Error>;

    /// Single DeleteItem call
    async fn delete(&self, input: DeleteItemInput) -> Result<DeleteItemOutput, Error>;

    /// Single UpdateItem call
    async fn update(&self, input: UpdateItemInput) -> Result<UpdateItemOutput, Error>;

    /// One page of a Query
    async fn query(&self, input: QueryInput) -> Result<QueryOutput, Error>;

    /// One page of a Scan
    async fn scan(&self, input: ScanInput) -> Result<ScanOutput, Error>;

    /// Single BatchGetItem call, at most 100 keys
    async fn batch_get(&self, input: BatchGetItemInput) -> Result<BatchGetItemOutput, Error>;

    /// Single BatchWriteItem call, at most 25 write requests
    async fn batch_write(&self, input: BatchWriteItemInput)
    -> Result<BatchWriteItemOutput, Error>;
}

#[async_trait]
impl DocumentClient for Client {
    async fn get(&self, input: GetItemInput) -> Result<GetItemOutput, Error> {
        let output = self
            .get_item()
            .set_table_name(input.table_name)
            .set_key(input.key)
            .set_attributes_to_get(input.attributes_to_get)
            .set_consistent_read(input.consistent_read)
            .set_return_consumed_capacity(input.return_consumed_capacity)
            .set_projection_expression(input.projection_expression)
            .set_expression_attribute_names(input.expression_attribute_names)
            .send()
            .await?;

        Ok(output)
    }

    async fn put(&self, input: PutItemInput) -> Result<PutItemOutput, Error> {
        let output = self
            .put_item()
            .set_table_name(input.table_name)
            .set_item(input.item)
            .set_expected(input.expected)
            .set_return_values(input.return_values)
            .set_return_consumed_capacity(input.return_consumed_capacity)
            .set_return_item_collection_metrics(input.return_item_collection_metrics)
            .set_conditional_operator(input.conditional_operator)
            .set_condition_expression(input.condition_expression)
            .set_expression_attribute_names(input.expression_attribute_names)
            .set_expression_attribute_values(input.expression_attribute_values)
            .set_return_values_on_condition_check_failure(
                input.return_values_on_condition_check_failure,
            )
            .send()
            .await?;

        Ok(output)
    }

    async fn delete(&self, input: DeleteItemInput) -> Result<DeleteItemOutput, Error> {
        let output = self
            .delete_item()
            .set_table_name(input.table_name)
            .set_key(input.key)
            .set_expected(input.expected)
            .set_conditional_operator(input.conditional_operator)
            .set_return_values(input.return_values)
            .set_return_consumed_capacity(input.return_consumed_capacity)
            .set_return_item_collection_metrics(input.return_item_collection_metrics)
            .set_condition_expression(input.condition_expression)
            .set_expression_attribute_names(input.expression_attribute_names)
            .set_expression_attribute_values(input.expression_attribute_values)
            .set_return_values_on_condition_check_failure(
                input.return_values_on_condition_check_failure,
            )
            .send()
            .await?;

        Ok(output)
    }

    async fn update(&self, input: UpdateItemInput) -> Result<UpdateItemOutput, Error> {
        let output = self
            .update_item()
            .set_table_name(input.table_name)
            .set_key(input.key)
            .set_attribute_updates(input.attribute_updates)
            .set_expected(input.expected)
            .set_conditional_operator(input.conditional_operator)
            .set_return_values(input.return_values)
            .set_return_consumed_capacity(input.return_consumed_capacity)
            .set_return_item_collection_metrics(input.return_item_collection_metrics)
            .set_update_expression(input.update_expression)
            .set_condition_expression(input.condition_expression)
            .set_expression_attribute_names(input.expression_attribute_names)
            .set_expression_attribute_values(input.expression_attribute_values)
            .set_return_values_on_condition_check_failure(
                input.return_values_on_condition_check_failure,
            )
            .send()
            .await?;

        Ok(output)
    }

    async fn query(&self, input: QueryInput) -> Result<QueryOutput, Error> {
        let output = self
            .query()
            .set_table_name(input.table_name)
            .set_index_name(input.index_name)
            .set_select(input.select)
            .set_attributes_to_get(input.attributes_to_get)
            .set_limit(input.limit)
            .set_consistent_read(input.consistent_read)
            .set_key_conditions(input.key_conditions)
            .set_query_filter(input.query_filter)
            .set_conditional_operator(input.conditional_operator)
            .set_scan_index_forward(input.scan_index_forward)
            .set_exclusive_start_key(input.exclusive_start_key)
            .set_return_consumed_capacity(input.return_consumed_capacity)
            .set_projection_expression(input.projection_expression)
            .set_filter_expression(input.filter_expression)
            .set_key_condition_expression(input.key_condition_expression)
            .set_expression_attribute_names(input.expression_attribute_names)
            .set_expression_attribute_values(input.expression_attribute_values)
            .send()
            .await?;

        Ok(output)
    }

    async fn scan(&self, input: ScanInput) -> Result<ScanOutput, Error> {
        let output = self
            .scan()
            .set_table_name(input.table_name)
            .set_index_name(input.index_name)
            .set_attributes_to_get(input.attributes_to_get)
            .set_limit(input.limit)
            .set_select(input.select)
            .set_scan_filter(input.scan_filter)
            .set_conditional_operator(input.conditional_operator)
            .set_exclusive_start_key(input.exclusive_start_key)
            .set_return_consumed_capacity(input.return_consumed_capacity)
            .set_total_segments(input.total_segments)
            .set_segment(input.segment)
            .set_projection_expression(input.projection_expression)
            .set_filter_expression(input.filter_expression)
            .set_expression_attribute_names(input.expression_attribute_names)
            .set_expression_attribute_values(input.expression_attribute_values)
            .set_consistent_read(input.consistent_read)
            .send()
            .await?;

        Ok(output)
    }

    async fn batch_get(&self, input: BatchGetItemInput) -> Result<BatchGetItemOutput, Error> {
        let output = self
            .batch_get_item()
            .set_request_items(input.request_items)
            .set_return_consumed_capacity(input.return_consumed_capacity)
            .send()
            .await?;

        Ok(output)
    }

    async fn batch_write(
        &self,
        input: BatchWriteItemInput,
    ) -> Result<BatchWriteItemOutput, Error> {
        let output = self
            .batch_write_item()
            .set_request_items(input.request_items)
            .set_return_consumed_capacity(input.return_consumed_capacity)
            .set_return_item_collection_metrics(input.return_item_collection_metrics)
            .send()
            .await?;

        Ok(output)
    }
}

#[async_trait]
impl<C> DocumentClient for Arc<C>
where
    C: DocumentClient + ?Sized,
{
    async fn get(&self, input: GetItemInput) -> Result<GetItemOutput, Error> {
        (**self).get(input).await
    }

    async fn put(&self, input: PutItemInput) -> Result<PutItemOutput, Error> {
        (**self).put(input).await
    }

    async fn delete(&self, input: DeleteItemInput) -> Result<DeleteItemOutput, Error> {
        (**self).delete(input).await
    }

    async fn update(&self, input: UpdateItemInput) -> Result<UpdateItemOutput, Error> {
        (**self).update(input).await
    }

    async fn query(&self, input: QueryInput) -> Result<QueryOutput, Error> {
        (**self).query(input).await
    }

    async fn scan(&self, input: ScanInput) -> Result<ScanOutput, Error> {
        (**self).scan(input).await
    }

    async fn batch_get(&self, input: BatchGetItemInput) -> Result<BatchGetItemOutput, Error> {
        (**self).batch_get(input).await
    }

    async fn batch_write(
        &self,
        input: BatchWriteItemInput,
    ) -> Result<BatchWriteItemOutput, Error> {
        (**self).batch_write(input).await
    }
}
