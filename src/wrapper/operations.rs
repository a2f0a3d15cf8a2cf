use aws_config::SdkConfig;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::operation::batch_get_item::{BatchGetItemInput, BatchGetItemOutput};
use aws_sdk_dynamodb::operation::batch_write_item::{BatchWriteItemInput, BatchWriteItemOutput};
use aws_sdk_dynamodb::operation::delete_item::{DeleteItemInput, DeleteItemOutput};
use aws_sdk_dynamodb::operation::get_item::{GetItemInput, GetItemOutput};
use aws_sdk_dynamodb::operation::put_item::{PutItemInput, PutItemOutput};
use aws_sdk_dynamodb::operation::query::{QueryInput, QueryOutput};
use aws_sdk_dynamodb::operation::scan::{ScanInput, ScanOutput};
use aws_sdk_dynamodb::operation::update_item::{UpdateItemInput, UpdateItemOutput};
use futures_util::{TryStreamExt, stream};
use serde::de::DeserializeOwned;
use serde_dynamo::{from_item, from_items};
use tokio_stream::Stream;

use crate::client::DocumentClient;
use crate::error::Error;
use crate::wrapper::batch;
use crate::wrapper::paginate::{drain_pages, page_stream};
use crate::wrapper::types::{
    BatchGetOutput, BatchGetRequest, BatchWriteOutput, BatchWriteRequest, ClientOptions, Item,
    Page,
};

/// Fully-materialized reads and writes over a [`DocumentClient`]
///
/// `query` and `scan` follow continuation keys until the last page, `batch_get`
/// and `batch_write` accept any number of keys or write requests and keep
/// resubmitting unprocessed work until the store has handled all of it. The
/// `*_basic` variants issue exactly one call and return the raw output.
///
/// Every call keeps its own state, so one wrapper can serve concurrent
/// operations whenever the underlying client can.
///
/// # Example
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::operation::get_item::GetItemInput;
/// use aws_sdk_dynamodb::types::AttributeValue;
/// use dynamo_doc_client::{ClientWrapper, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let wrapper = ClientWrapper::from_env().await;
///
/// let input = GetItemInput::builder()
///     .table_name("users")
///     .key("user_id", AttributeValue::S("123".to_string()))
///     .build()?;
///
/// match wrapper.try_get(input).await? {
///     Some(user) => println!("Found user: {:?}", user),
///     None => println!("User not found"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct ClientWrapper<C = Client> {
    client: C,
    options: ClientOptions,
}

impl ClientWrapper<Client> {
    /// Wrap the process-wide DynamoDB client
    ///
    /// See [`dynamodb_client`](crate::dynamodb_client) for how it is configured.
    pub async fn from_env() -> Self {
        Self::new(crate::dynamodb_client().await.clone())
    }

    /// Wrap a new DynamoDB client built from `config`
    pub fn from_conf(config: &SdkConfig) -> Self {
        Self::new(Client::new(config))
    }
}

impl<C: DocumentClient> ClientWrapper<C> {
    /// Wrap `client` with default options
    pub fn new(client: C) -> Self {
        Self::with_options(client, ClientOptions::default())
    }

    /// Wrap `client` with `options`
    pub fn with_options(client: C, options: ClientOptions) -> Self {
        Self { client, options }
    }

    /// The wrapped client
    pub fn client(&self) -> &C {
        &self.client
    }

    /// The options in effect
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Run a query to completion and return every matching item
    ///
    /// Pages are fetched one after another until the store stops returning a
    /// `LastEvaluatedKey`. An `exclusive_start_key` on the input is honored for
    /// the first page.
    pub async fn query(&self, input: QueryInput) -> Result<Vec<Item>, Error> {
        drain_pages(input, move |params| async move {
            self.client.query(params).await.map(Page::from)
        })
        .await
    }

    /// Run a scan to completion and return every item
    ///
    /// Same paging rules as [`query`](Self::query).
    pub async fn scan(&self, input: ScanInput) -> Result<Vec<Item>, Error> {
        drain_pages(input, move |params| async move {
            self.client.scan(params).await.map(Page::from)
        })
        .await
    }

    /// Run a query to completion and deserialize every matching item
    pub async fn query_as<T: DeserializeOwned>(&self, input: QueryInput) -> Result<Vec<T>, Error> {
        let items = self.query(input).await?;
        Ok(from_items(items)?)
    }

    /// Run a scan to completion and deserialize every item
    pub async fn scan_as<T: DeserializeOwned>(&self, input: ScanInput) -> Result<Vec<T>, Error> {
        let items = self.scan(input).await?;
        Ok(from_items(items)?)
    }

    /// Stream the items of a query, fetching each page on demand
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use aws_sdk_dynamodb::operation::query::QueryInput;
    /// use aws_sdk_dynamodb::types::AttributeValue;
    /// use dynamo_doc_client::{ClientWrapper, Error};
    /// use futures_util::TryStreamExt;
    ///
    /// # async fn example() -> Result<(), Error> {
    /// let wrapper = ClientWrapper::from_env().await;
    /// let input = QueryInput::builder()
    ///     .table_name("orders")
    ///     .key_condition_expression("user_id = :user_id")
    ///     .expression_attribute_values(":user_id", AttributeValue::S("123".to_string()))
    ///     .build()?;
    ///
    /// let stream = wrapper.query_stream(input);
    /// futures_util::pin_mut!(stream);
    ///
    /// while let Some(order) = stream.try_next().await? {
    ///     println!("{:?}", order);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn query_stream(&self, input: QueryInput) -> impl Stream<Item = Result<Item, Error>> + '_ {
        page_stream(input, move |params| async move {
            self.client.query(params).await.map(Page::from)
        })
        .map_ok(|page| stream::iter(page.items.into_iter().map(Ok::<Item, Error>)))
        .try_flatten()
    }

    /// Stream the items of a scan, fetching each page on demand
    pub fn scan_stream(&self, input: ScanInput) -> impl Stream<Item = Result<Item, Error>> + '_ {
        page_stream(input, move |params| async move {
            self.client.scan(params).await.map(Page::from)
        })
        .map_ok(|page| stream::iter(page.items.into_iter().map(Ok::<Item, Error>)))
        .try_flatten()
    }

    /// Single Query call, returned as-is
    pub async fn query_basic(&self, input: QueryInput) -> Result<QueryOutput, Error> {
        self.client.query(input).await
    }

    /// Single Scan call, returned as-is
    pub async fn scan_basic(&self, input: ScanInput) -> Result<ScanOutput, Error> {
        self.client.scan(input).await
    }

    /// Fetch every key of a batch get, across any number of tables
    ///
    /// The request is split into calls of at most
    /// [`max_keys_in_take`](ClientOptions::max_keys_in_take) keys. Unprocessed
    /// keys are resubmitted before new keys are drawn.
    ///
    /// Fails with [`Error::NotFound`] if any table's item count differs from
    /// its key count, even when other tables were served in full.
    pub async fn batch_get(
        &self,
        request: impl Into<BatchGetRequest>,
    ) -> Result<BatchGetOutput, Error> {
        batch::batch_get(
            &self.client,
            request.into(),
            self.options.max_keys_in_take,
            &self.options.not_found_message,
        )
        .await
    }

    /// Single BatchGetItem call, returned as-is
    pub async fn batch_get_basic(
        &self,
        input: BatchGetItemInput,
    ) -> Result<BatchGetItemOutput, Error> {
        self.client.batch_get(input).await
    }

    /// Apply every write request of a batch write, across any number of tables
    ///
    /// The request is split into calls of at most
    /// [`max_write_requests_in_take`](ClientOptions::max_write_requests_in_take)
    /// requests. Unprocessed requests are resubmitted before new ones are drawn.
    pub async fn batch_write(
        &self,
        request: impl Into<BatchWriteRequest>,
    ) -> Result<BatchWriteOutput, Error> {
        batch::batch_write(
            &self.client,
            request.into(),
            self.options.max_write_requests_in_take,
        )
        .await
    }

    /// Single BatchWriteItem call, returned as-is
    pub async fn batch_write_basic(
        &self,
        input: BatchWriteItemInput,
    ) -> Result<BatchWriteItemOutput, Error> {
        self.client.batch_write(input).await
    }

    /// Get an item that must exist
    ///
    /// Fails with [`Error::NotFound`] if the store returns no item.
    pub async fn get(&self, input: GetItemInput) -> Result<Item, Error> {
        self.try_get(input)
            .await?
            .ok_or_else(|| Error::NotFound(self.options.not_found_message.clone()))
    }

    /// Get an item that may not exist
    pub async fn try_get(&self, input: GetItemInput) -> Result<Option<Item>, Error> {
        let output = self.client.get(input).await?;
        Ok(output.item)
    }

    /// Get an item that must exist and deserialize it
    pub async fn get_as<T: DeserializeOwned>(&self, input: GetItemInput) -> Result<T, Error> {
        let item = self.get(input).await?;
        Ok(from_item(item)?)
    }

    /// Get an item that may not exist and deserialize it
    pub async fn try_get_as<T: DeserializeOwned>(
        &self,
        input: GetItemInput,
    ) -> Result<Option<T>, Error> {
        self.try_get(input)
            .await?
            .map(from_item)
            .transpose()
            .map_err(Error::from)
    }

    /// Single GetItem call, returned as-is
    pub async fn get_basic(&self, input: GetItemInput) -> Result<GetItemOutput, Error> {
        self.client.get(input).await
    }

    /// Put an item
    pub async fn put(&self, input: PutItemInput) -> Result<PutItemOutput, Error> {
        self.client.put(input).await
    }

    /// Delete an item
    pub async fn delete(&self, input: DeleteItemInput) -> Result<DeleteItemOutput, Error> {
        self.client.delete(input).await
    }

    /// Update an item
    pub async fn update(&self, input: UpdateItemInput) -> Result<UpdateItemOutput, Error> {
        self.client.update(input).await
    }
}
