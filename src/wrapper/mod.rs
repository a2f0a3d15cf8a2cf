mod batch;
mod operations;
mod paginate;
mod take;
mod types;

pub use operations::ClientWrapper;
pub use take::{
    BatchGetTakeManager, BatchWriteTakeManager, ChunkCursor, MAX_KEYS_IN_TAKE,
    MAX_WRITE_REQUESTS_IN_TAKE, TakeManager, Takeable,
};
pub use types::{
    BatchGetOutput, BatchGetRequest, BatchWriteOutput, BatchWriteRequest, ClientOptions,
    DEFAULT_NOT_FOUND_MESSAGE, Item, Key, Page, ReadOptions, RequestItems, TableReads,
};
