use aws_sdk_dynamodb::error::BuildError;
use aws_sdk_dynamodb::operation::batch_get_item::BatchGetItemInput;
use aws_sdk_dynamodb::operation::batch_write_item::BatchWriteItemInput;
use aws_sdk_dynamodb::operation::query::QueryOutput;
use aws_sdk_dynamodb::operation::scan::ScanOutput;
use aws_sdk_dynamodb::types::{
    AttributeValue, ConsumedCapacity, ItemCollectionMetrics, KeysAndAttributes,
    ReturnConsumedCapacity, ReturnItemCollectionMetrics, WriteRequest,
};
use std::collections::HashMap;
use std::time::Duration;

/// A DynamoDB item as returned by the document API
pub type Item = HashMap<String, AttributeValue>;

/// A DynamoDB primary key (partition key plus optional sort key attributes)
pub type Key = HashMap<String, AttributeValue>;

/// Default message carried by [`Error::NotFound`](crate::Error::NotFound)
pub const DEFAULT_NOT_FOUND_MESSAGE: &str = "[404] Entity Not Found";

/// Per-table request items, iterated in insertion order
///
/// Batch requests span several tables that share one per-call capacity. The
/// order tables are filled in is observable (it decides which keys land in
/// which request), so unlike the SDK's `HashMap` this keeps the order tables
/// were added in. Inserting an existing table replaces its entry in place.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestItems<T> {
    tables: Vec<(String, T)>,
}

impl<T> RequestItems<T> {
    /// Create an empty set of request items
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Add or replace the entry for `table_name`
    ///
    /// Returns the previous entry if the table was already present.
    pub fn insert(&mut self, table_name: impl Into<String>, value: T) -> Option<T> {
        let table_name = table_name.into();

        match self.position(&table_name) {
            Some(index) => Some(std::mem::replace(&mut self.tables[index].1, value)),
            None => {
                self.tables.push((table_name, value));
                None
            }
        }
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, table_name: impl Into<String>, value: T) -> Self {
        let _ = self.insert(table_name, value);
        self
    }

    /// Entry for `table_name`
    pub fn get(&self, table_name: &str) -> Option<&T> {
        self.position(table_name).map(|index| &self.tables[index].1)
    }

    /// Mutable entry for `table_name`
    pub fn get_mut(&mut self, table_name: &str) -> Option<&mut T> {
        self.position(table_name)
            .map(|index| &mut self.tables[index].1)
    }

    /// Remove the entry for `table_name`, keeping the order of the rest
    pub fn remove(&mut self, table_name: &str) -> Option<T> {
        self.position(table_name)
            .map(|index| self.tables.remove(index).1)
    }

    /// Whether `table_name` has an entry
    pub fn contains_table(&self, table_name: &str) -> bool {
        self.position(table_name).is_some()
    }

    /// Number of tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether there are no tables
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Table names in order
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|(name, _)| name.as_str())
    }

    /// Entries in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.tables.iter().map(|(name, value)| (name.as_str(), value))
    }

    fn position(&self, table_name: &str) -> Option<usize> {
        self.tables.iter().position(|(name, _)| name == table_name)
    }
}

impl<T> Default for RequestItems<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S: Into<String>> FromIterator<(S, T)> for RequestItems<T> {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        let mut items = Self::new();
        for (table_name, value) in iter {
            let _ = items.insert(table_name, value);
        }
        items
    }
}

impl<T> IntoIterator for RequestItems<T> {
    type Item = (String, T);
    type IntoIter = std::vec::IntoIter<(String, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.into_iter()
    }
}

/// Read options applied to every key of one table in a batch get
///
/// Copied unchanged into each request carved out of the batch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReadOptions {
    /// Strongly consistent reads
    pub consistent_read: Option<bool>,
    /// Attributes to return
    pub projection_expression: Option<String>,
    /// Substitution tokens for attribute names in the projection expression
    pub expression_attribute_names: Option<HashMap<String, String>>,
    /// Legacy attribute list
    pub attributes_to_get: Option<Vec<String>>,
}

/// Keys to fetch from one table, with the options to fetch them with
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableReads {
    /// Keys in the order they should be requested
    pub keys: Vec<Key>,
    /// Options shared by all keys of this table
    pub options: ReadOptions,
}

impl TableReads {
    /// Read `keys` with default options
    pub fn new(keys: Vec<Key>) -> Self {
        Self {
            keys,
            options: ReadOptions::default(),
        }
    }

    /// Request strongly consistent reads
    pub fn consistent_read(mut self, consistent_read: bool) -> Self {
        self.options.consistent_read = Some(consistent_read);
        self
    }

    /// Restrict the returned attributes
    pub fn projection_expression(mut self, projection_expression: impl Into<String>) -> Self {
        self.options.projection_expression = Some(projection_expression.into());
        self
    }

    /// Add a substitution token for an attribute name
    pub fn expression_attribute_name(
        mut self,
        token: impl Into<String>,
        attribute_name: impl Into<String>,
    ) -> Self {
        let _ = self
            .options
            .expression_attribute_names
            .get_or_insert_with(HashMap::new)
            .insert(token.into(), attribute_name.into());
        self
    }

    /// Convert into the SDK representation
    pub fn into_keys_and_attributes(self) -> Result<KeysAndAttributes, BuildError> {
        let ReadOptions {
            consistent_read,
            projection_expression,
            expression_attribute_names,
            attributes_to_get,
        } = self.options;

        KeysAndAttributes::builder()
            .set_keys(Some(self.keys))
            .set_consistent_read(consistent_read)
            .set_projection_expression(projection_expression)
            .set_expression_attribute_names(expression_attribute_names)
            .set_attributes_to_get(attributes_to_get)
            .build()
    }
}

impl From<KeysAndAttributes> for TableReads {
    fn from(value: KeysAndAttributes) -> Self {
        let KeysAndAttributes {
            keys,
            attributes_to_get,
            consistent_read,
            projection_expression,
            expression_attribute_names,
            ..
        } = value;

        Self {
            keys,
            options: ReadOptions {
                consistent_read,
                projection_expression,
                expression_attribute_names,
                attributes_to_get,
            },
        }
    }
}

/// A batch get spanning any number of keys and tables
///
/// Not limited to the 100 keys a single BatchGetItem call accepts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchGetRequest {
    /// Keys to fetch, per table
    pub request_items: RequestItems<TableReads>,
    /// Capacity reporting level forwarded with every call
    pub return_consumed_capacity: Option<ReturnConsumedCapacity>,
}

impl BatchGetRequest {
    /// Create a request from per-table reads
    pub fn new(request_items: RequestItems<TableReads>) -> Self {
        Self {
            request_items,
            return_consumed_capacity: None,
        }
    }

    /// Add the reads for one table
    pub fn table(mut self, table_name: impl Into<String>, reads: TableReads) -> Self {
        let _ = self.request_items.insert(table_name, reads);
        self
    }

    /// Request consumed capacity reporting
    pub fn return_consumed_capacity(mut self, value: ReturnConsumedCapacity) -> Self {
        self.return_consumed_capacity = Some(value);
        self
    }

    /// Total number of keys across all tables
    pub fn key_count(&self) -> usize {
        self.request_items
            .iter()
            .map(|(_, reads)| reads.keys.len())
            .sum()
    }
}

impl From<BatchGetItemInput> for BatchGetRequest {
    /// Tables follow the input map's iteration order.
    fn from(input: BatchGetItemInput) -> Self {
        Self {
            request_items: input
                .request_items
                .unwrap_or_default()
                .into_iter()
                .map(|(table_name, keys)| (table_name, TableReads::from(keys)))
                .collect(),
            return_consumed_capacity: input.return_consumed_capacity,
        }
    }
}

/// A batch write spanning any number of write requests and tables
///
/// Not limited to the 25 requests a single BatchWriteItem call accepts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchWriteRequest {
    /// Put and delete requests, per table, in execution order
    pub request_items: RequestItems<Vec<WriteRequest>>,
    /// Capacity reporting level forwarded with every call
    pub return_consumed_capacity: Option<ReturnConsumedCapacity>,
    /// Item collection metrics level forwarded with every call
    pub return_item_collection_metrics: Option<ReturnItemCollectionMetrics>,
}

impl BatchWriteRequest {
    /// Create a request from per-table write requests
    pub fn new(request_items: RequestItems<Vec<WriteRequest>>) -> Self {
        Self {
            request_items,
            return_consumed_capacity: None,
            return_item_collection_metrics: None,
        }
    }

    /// Add the write requests for one table
    pub fn table(mut self, table_name: impl Into<String>, requests: Vec<WriteRequest>) -> Self {
        let _ = self.request_items.insert(table_name, requests);
        self
    }

    /// Request consumed capacity reporting
    pub fn return_consumed_capacity(mut self, value: ReturnConsumedCapacity) -> Self {
        self.return_consumed_capacity = Some(value);
        self
    }

    /// Request item collection metrics
    pub fn return_item_collection_metrics(mut self, value: ReturnItemCollectionMetrics) -> Self {
        self.return_item_collection_metrics = Some(value);
        self
    }

    /// Total number of write requests across all tables
    pub fn request_count(&self) -> usize {
        self.request_items
            .iter()
            .map(|(_, requests)| requests.len())
            .sum()
    }
}

impl From<BatchWriteItemInput> for BatchWriteRequest {
    /// Tables follow the input map's iteration order.
    fn from(input: BatchWriteItemInput) -> Self {
        Self {
            request_items: input.request_items.unwrap_or_default().into_iter().collect(),
            return_consumed_capacity: input.return_consumed_capacity,
            return_item_collection_metrics: input.return_item_collection_metrics,
        }
    }
}

/// Batch get output with every requested item and the accumulated metrics
#[must_use = "batch get results contain the fetched items"]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchGetOutput {
    /// Items returned, per table
    ///
    /// Every table of the request has an entry, even when nothing came back.
    pub responses: HashMap<String, Vec<Item>>,
    /// Capacity consumed across all calls
    pub consumed_capacity: Vec<ConsumedCapacity>,
    /// BatchGetItem calls issued
    pub request_count: usize,
    /// Calls that resubmitted unprocessed keys (0 means no retries needed)
    pub retry_count: usize,
    /// Total execution time including all retries
    pub total_duration: Duration,
}

impl BatchGetOutput {
    /// Items returned for `table_name`
    pub fn items(&self, table_name: &str) -> &[Item] {
        self.responses
            .get(table_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of items returned
    pub fn item_count(&self) -> usize {
        self.responses.values().map(Vec::len).sum()
    }
}

/// Batch write output with the accumulated metrics
#[must_use = "batch write results contain metrics that should be checked"]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchWriteOutput {
    /// Capacity consumed across all calls
    pub consumed_capacity: Vec<ConsumedCapacity>,
    /// Item collections affected, per table
    pub item_collection_metrics: HashMap<String, Vec<ItemCollectionMetrics>>,
    /// BatchWriteItem calls issued
    pub request_count: usize,
    /// Calls that resubmitted unprocessed items (0 means no retries needed)
    pub retry_count: usize,
    /// Total execution time including all retries
    pub total_duration: Duration,
}

/// One page of a Query or Scan
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    /// Items on this page
    pub items: Vec<Item>,
    /// Where the next page starts, `None` on the last page
    pub last_evaluated_key: Option<Key>,
}

impl Page {
    fn new(items: Option<Vec<Item>>, last_evaluated_key: Option<Key>) -> Self {
        Self {
            items: items.unwrap_or_default(),
            last_evaluated_key: last_evaluated_key.filter(|key| !key.is_empty()),
        }
    }
}

impl From<QueryOutput> for Page {
    fn from(output: QueryOutput) -> Self {
        Self::new(output.items, output.last_evaluated_key)
    }
}

impl From<ScanOutput> for Page {
    fn from(output: ScanOutput) -> Self {
        Self::new(output.items, output.last_evaluated_key)
    }
}

/// Wrapper configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientOptions {
    /// Message carried by [`Error::NotFound`](crate::Error::NotFound)
    pub not_found_message: String,
    /// Keys per BatchGetItem call
    pub max_keys_in_take: usize,
    /// Write requests per BatchWriteItem call
    pub max_write_requests_in_take: usize,
}

impl ClientOptions {
    /// Override the not-found message
    pub fn not_found_message(mut self, message: impl Into<String>) -> Self {
        self.not_found_message = message.into();
        self
    }

    /// Override the number of keys sent per BatchGetItem call
    pub fn max_keys_in_take(mut self, max_keys_in_take: usize) -> Self {
        self.max_keys_in_take = max_keys_in_take;
        self
    }

    /// Override the number of write requests sent per BatchWriteItem call
    pub fn max_write_requests_in_take(mut self, max_write_requests_in_take: usize) -> Self {
        self.max_write_requests_in_take = max_write_requests_in_take;
        self
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            not_found_message: DEFAULT_NOT_FOUND_MESSAGE.to_string(),
            max_keys_in_take: crate::wrapper::take::MAX_KEYS_IN_TAKE,
            max_write_requests_in_take: crate::wrapper::take::MAX_WRITE_REQUESTS_IN_TAKE,
        }
    }
}
