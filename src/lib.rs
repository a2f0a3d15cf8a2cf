//! # DynamoDB Document Client
//!
//! Batched, paginated and fully-materialized DynamoDB reads and writes on top
//! of `aws-sdk-dynamodb`:
//! - `query` and `scan` follow continuation keys and return every item
//! - `batch_get` and `batch_write` accept any number of keys or write requests
//!   and split them into calls the store accepts
//! - Unprocessed keys and write requests are resubmitted until none remain
//! - `batch_get` and `get` fail with [`Error::NotFound`] when items are missing
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use aws_sdk_dynamodb::types::AttributeValue;
//! use dynamo_doc_client::{BatchGetRequest, ClientWrapper, Error, TableReads};
//! use std::collections::HashMap;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Error> {
//!     let config = aws_config::defaults(aws_config::BehaviorVersion::latest()).load().await;
//!     dynamo_doc_client::init(&config).await;
//!
//!     let wrapper = ClientWrapper::from_env().await;
//!
//!     let keys = (0..250)
//!         .map(|id| HashMap::from([("id".to_string(), AttributeValue::N(id.to_string()))]))
//!         .collect();
//!
//!     // 250 keys go out as three BatchGetItem calls
//!     let output = wrapper
//!         .batch_get(BatchGetRequest::default().table("users", TableReads::new(keys)))
//!         .await?;
//!
//!     println!("{} users", output.items("users").len());
//!     Ok(())
//! }
//! ```
#![deny(
    bad_style,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused_allocation,
    unused_comparisons,
    unused_parens,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    deprecated,
    unknown_lints,
    unreachable_code,
    unused_mut
)]

mod error;
pub use error::Error;

/// The seam between the wrapper and DynamoDB
pub mod client;

/// Batching, pagination and point operations
pub mod wrapper;

// Re-export main types for convenience
pub use client::DocumentClient;
pub use wrapper::{
    BatchGetOutput, BatchGetRequest, BatchWriteOutput, BatchWriteRequest, ClientOptions,
    ClientWrapper, DEFAULT_NOT_FOUND_MESSAGE, Item, Key, Page, ReadOptions, RequestItems,
    TableReads,
};

// Re-export aws-config types for configuration
pub use aws_config::{
    BehaviorVersion, Region, SdkConfig, defaults,
    meta::region::{ProvideRegion, RegionProviderChain},
    retry::{RetryConfig, RetryMode},
    timeout::TimeoutConfig,
};

// Re-export aws-types for advanced configuration
pub use aws_types::sdk_config::Builder as SdkConfigBuilder;

use aws_sdk_dynamodb::Client as DynamoDbClient;
use tokio::sync::OnceCell;

/// Global DynamoDB client instance
static GLOBAL_CLIENT: OnceCell<DynamoDbClient> = OnceCell::const_new();

/// Build the SDK config used when the global client is not initialized explicitly
///
/// - Adaptive retry mode with 3 max attempts
/// - Exponential backoff starting at 1 second
/// - Connect timeout: 3 seconds
/// - Read timeout: 20 seconds
/// - Operation timeout: 60 seconds
/// - LocalStack endpoint when AWS_PROFILE=localstack
async fn aws_config_defaults() -> SdkConfig {
    use std::time::Duration;

    let timeout_config = TimeoutConfig::builder()
        .connect_timeout(Duration::from_secs(3))
        .read_timeout(Duration::from_secs(20))
        .operation_timeout(Duration::from_secs(60))
        .build();

    let mut loader = defaults(BehaviorVersion::latest())
        .retry_config(
            RetryConfig::adaptive()
                .with_max_attempts(3)
                .with_initial_backoff(Duration::from_secs(1)),
        )
        .timeout_config(timeout_config);

    if is_localstack_profile(std::env::var("AWS_PROFILE").ok().as_deref()) {
        tracing::debug!("using LocalStack endpoint");
        loader = loader.endpoint_url(LOCALSTACK_ENDPOINT);
    }

    loader.load().await
}

const LOCALSTACK_ENDPOINT: &str = "http://127.0.0.1:4566";

fn is_localstack_profile(profile: Option<&str>) -> bool {
    profile == Some("localstack")
}

/// Initialize the global DynamoDB client with a custom AWS config
///
/// Has no effect once the global client exists.
///
/// # Example
///
/// ```rust,no_run
/// #[tokio::main]
/// async fn main() {
///     let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
///         .region(aws_config::Region::new("us-west-2"))
///         .load()
///         .await;
///     dynamo_doc_client::init(&config).await;
/// }
/// ```
pub async fn init(config: &SdkConfig) {
    let _ = GLOBAL_CLIENT
        .get_or_init(|| async { DynamoDbClient::new(config) })
        .await;
}

/// Initialize the global DynamoDB client with a custom client instance
///
/// # Example
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
///
/// #[tokio::main]
/// async fn main() {
///     let config = aws_config::load_from_env().await;
///     let client = Client::new(&config);
///     dynamo_doc_client::init_with_client(client).await;
/// }
/// ```
pub async fn init_with_client(client: DynamoDbClient) {
    let _ = GLOBAL_CLIENT.get_or_init(|| async { client }).await;
}

/// Get a reference to the global DynamoDB client
///
/// Falls back to adaptive retries (3 attempts, 1 second initial backoff) and
/// 3/20/60 second connect/read/operation timeouts if neither [`init`] nor
/// [`init_with_client`] was called first. `AWS_PROFILE=localstack` points the
/// client at a local LocalStack endpoint.
///
/// # Example
///
/// ```rust,no_run
/// # async fn example() {
/// let client = dynamo_doc_client::dynamodb_client().await;
/// let wrapper = dynamo_doc_client::ClientWrapper::new(client.clone());
/// # }
/// ```
pub async fn dynamodb_client() -> &'static DynamoDbClient {
    GLOBAL_CLIENT
        .get_or_init(|| async {
            let config = aws_config_defaults().await;
            DynamoDbClient::new(&config)
        })
        .await
}
