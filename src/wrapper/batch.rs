use aws_sdk_dynamodb::operation::batch_get_item::BatchGetItemInput;
use aws_sdk_dynamodb::operation::batch_write_item::BatchWriteItemInput;
use aws_sdk_dynamodb::types::{
    KeysAndAttributes, ReturnConsumedCapacity, ReturnItemCollectionMetrics, WriteRequest,
};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, trace, warn};

use crate::client::DocumentClient;
use crate::error::Error;
use crate::wrapper::take::{BatchGetTakeManager, BatchWriteTakeManager};
use crate::wrapper::types::{
    BatchGetOutput, BatchGetRequest, BatchWriteOutput, BatchWriteRequest, RequestItems,
    TableReads,
};

/// Batch get every key of `request`, then check nothing is missing
///
/// Fails with [`Error::NotFound`] carrying `not_found_message` unless every
/// table returned exactly as many items as it requested keys.
pub(crate) async fn batch_get<C>(
    client: &C,
    request: BatchGetRequest,
    max_keys_in_take: usize,
    not_found_message: &str,
) -> Result<BatchGetOutput, Error>
where
    C: DocumentClient + ?Sized,
{
    let expected_counts: Vec<(String, usize)> = request
        .request_items
        .iter()
        .map(|(table_name, reads)| (table_name.to_string(), reads.keys.len()))
        .collect();

    let output = batch_get_all(client, request, max_keys_in_take).await?;

    for (table_name, expected) in &expected_counts {
        let returned = output.items(table_name).len();

        if returned != *expected {
            warn!(
                table = %table_name,
                expected,
                returned,
                "batch get returned fewer items than requested keys"
            );
            return Err(Error::NotFound(not_found_message.to_string()));
        }
    }

    Ok(output)
}

/// Batch get every key of `request`, however many keys and tables it spans
///
/// Keys go out in takes of at most `max_keys_in_take`. Keys the store reports
/// as unprocessed are resubmitted, in the same take, before any new keys are
/// drawn. No completeness check is made on the result.
pub(crate) async fn batch_get_all<C>(
    client: &C,
    request: BatchGetRequest,
    max_keys_in_take: usize,
) -> Result<BatchGetOutput, Error>
where
    C: DocumentClient + ?Sized,
{
    let start_time = Instant::now();
    let return_consumed_capacity = request.return_consumed_capacity;

    let table_names: Vec<String> = request
        .request_items
        .table_names()
        .map(str::to_string)
        .collect();

    let mut output = BatchGetOutput {
        responses: table_names
            .iter()
            .map(|table_name| (table_name.clone(), Vec::new()))
            .collect(),
        ..BatchGetOutput::default()
    };

    let mut take_manager = BatchGetTakeManager::new(request.request_items, max_keys_in_take);

    let Some(mut take) = take_manager.next_take() else {
        output.total_duration = start_time.elapsed();
        return Ok(output);
    };

    loop {
        trace!(
            tables = take.len(),
            keys = take.iter().map(|(_, reads)| reads.keys.len()).sum::<usize>(),
            "submitting batch get take"
        );

        let input = batch_get_input(&take, return_consumed_capacity.clone())?;
        let response = client.batch_get(input).await?;
        output.request_count += 1;

        if let Some(capacities) = response.consumed_capacity {
            output.consumed_capacity.extend(capacities);
        }

        let mut responses = response.responses.unwrap_or_default();
        let mut unprocessed_keys = response.unprocessed_keys.unwrap_or_default();

        for table_name in &table_names {
            if let Some(items) = responses.remove(table_name) {
                output
                    .responses
                    .entry(table_name.clone())
                    .or_default()
                    .extend(items);
            }
        }

        let mut has_unprocessed_keys = false;

        for table_name in &table_names {
            match unprocessed_keys
                .remove(table_name)
                .filter(|keys| !keys.keys.is_empty())
            {
                Some(keys) => {
                    has_unprocessed_keys = true;
                    match take.get_mut(table_name) {
                        Some(reads) => reads.keys = keys.keys,
                        None => {
                            let _ = take.insert(table_name.as_str(), TableReads::from(keys));
                        }
                    }
                }
                None => {
                    let _ = take.remove(table_name);
                }
            }
        }

        if has_unprocessed_keys {
            output.retry_count += 1;
            debug!(
                retry_count = output.retry_count,
                tables = take.len(),
                "resubmitting unprocessed keys"
            );
            continue;
        }

        match take_manager.next_take() {
            Some(next) => take = next,
            None => break,
        }
    }

    output.total_duration = start_time.elapsed();

    debug!(
        requests = output.request_count,
        retries = output.retry_count,
        items = output.item_count(),
        "batch get complete"
    );

    Ok(output)
}

/// Batch write every request of `request`, however many requests and tables
/// it spans
///
/// Write requests go out in takes of at most `max_write_requests_in_take`.
/// Requests the store reports as unprocessed are resubmitted, in the same take,
/// before any new requests are drawn.
pub(crate) async fn batch_write<C>(
    client: &C,
    request: BatchWriteRequest,
    max_write_requests_in_take: usize,
) -> Result<BatchWriteOutput, Error>
where
    C: DocumentClient + ?Sized,
{
    let start_time = Instant::now();
    let return_consumed_capacity = request.return_consumed_capacity;
    let return_item_collection_metrics = request.return_item_collection_metrics;

    let table_names: Vec<String> = request
        .request_items
        .table_names()
        .map(str::to_string)
        .collect();

    let mut output = BatchWriteOutput::default();
    let mut take_manager =
        BatchWriteTakeManager::new(request.request_items, max_write_requests_in_take);

    let Some(mut take) = take_manager.next_take() else {
        output.total_duration = start_time.elapsed();
        return Ok(output);
    };

    loop {
        trace!(
            tables = take.len(),
            requests = take.iter().map(|(_, requests)| requests.len()).sum::<usize>(),
            "submitting batch write take"
        );

        let input = batch_write_input(
            &take,
            return_consumed_capacity.clone(),
            return_item_collection_metrics.clone(),
        )?;
        let response = client.batch_write(input).await?;
        output.request_count += 1;

        if let Some(capacities) = response.consumed_capacity {
            output.consumed_capacity.extend(capacities);
        }

        if let Some(item_collection_metrics) = response.item_collection_metrics {
            for (table_name, values) in item_collection_metrics {
                output
                    .item_collection_metrics
                    .entry(table_name)
                    .or_default()
                    .extend(values);
            }
        }

        let mut unprocessed_items = response.unprocessed_items.unwrap_or_default();
        let mut has_unprocessed_items = false;

        for table_name in &table_names {
            match unprocessed_items
                .remove(table_name)
                .filter(|requests| !requests.is_empty())
            {
                Some(requests) => {
                    has_unprocessed_items = true;
                    let _ = take.insert(table_name.as_str(), requests);
                }
                None => {
                    let _ = take.remove(table_name);
                }
            }
        }

        if has_unprocessed_items {
            output.retry_count += 1;
            debug!(
                retry_count = output.retry_count,
                tables = take.len(),
                "resubmitting unprocessed write requests"
            );
            continue;
        }

        match take_manager.next_take() {
            Some(next) => take = next,
            None => break,
        }
    }

    output.total_duration = start_time.elapsed();

    debug!(
        requests = output.request_count,
        retries = output.retry_count,
        "batch write complete"
    );

    Ok(output)
}

fn batch_get_input(
    take: &RequestItems<TableReads>,
    return_consumed_capacity: Option<ReturnConsumedCapacity>,
) -> Result<BatchGetItemInput, Error> {
    let mut request_items: HashMap<String, KeysAndAttributes> = HashMap::with_capacity(take.len());

    for (table_name, reads) in take.iter() {
        let _ = request_items.insert(
            table_name.to_string(),
            reads.clone().into_keys_and_attributes()?,
        );
    }

    let input = BatchGetItemInput::builder()
        .set_request_items(Some(request_items))
        .set_return_consumed_capacity(return_consumed_capacity)
        .build()?;

    Ok(input)
}

fn batch_write_input(
    take: &RequestItems<Vec<WriteRequest>>,
    return_consumed_capacity: Option<ReturnConsumedCapacity>,
    return_item_collection_metrics: Option<ReturnItemCollectionMetrics>,
) -> Result<BatchWriteItemInput, Error> {
    let request_items: HashMap<String, Vec<WriteRequest>> = take
        .iter()
        .map(|(table_name, requests)| (table_name.to_string(), requests.clone()))
        .collect();

    let input = BatchWriteItemInput::builder()
        .set_request_items(Some(request_items))
        .set_return_consumed_capacity(return_consumed_capacity)
        .set_return_item_collection_metrics(return_item_collection_metrics)
        .build()?;

    Ok(input)
}
