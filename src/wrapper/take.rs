//! Carving multi-table batch requests into store-legal takes.
//!
//! DynamoDB accepts at most [`MAX_KEYS_IN_TAKE`] keys per BatchGetItem call and
//! [`MAX_WRITE_REQUESTS_IN_TAKE`] write requests per BatchWriteItem call, with
//! every table in the call sharing that one budget. A [`TakeManager`] walks the
//! tables of a request in order and hands out consecutive takes until every
//! key or write request has been handed out exactly once.

use aws_sdk_dynamodb::types::WriteRequest;
use std::ops::Range;

use crate::wrapper::types::{RequestItems, TableReads};

/// Most keys a single BatchGetItem call accepts
pub const MAX_KEYS_IN_TAKE: usize = 100;

/// Most write requests a single BatchWriteItem call accepts
pub const MAX_WRITE_REQUESTS_IN_TAKE: usize = 25;

/// Take manager over batch get requests
pub type BatchGetTakeManager = TakeManager<TableReads>;

/// Take manager over batch write requests
pub type BatchWriteTakeManager = TakeManager<Vec<WriteRequest>>;

/// A per-table request that can be counted and sliced
pub trait Takeable {
    /// Number of units (keys, write requests) in this table's request
    fn take_len(&self) -> usize;

    /// A fresh request holding only the units in `range`
    ///
    /// Anything besides the units themselves is copied unchanged.
    fn take_range(&self, range: Range<usize>) -> Self;
}

impl Takeable for TableReads {
    fn take_len(&self) -> usize {
        self.keys.len()
    }

    fn take_range(&self, range: Range<usize>) -> Self {
        Self {
            keys: self.keys[range].to_vec(),
            options: self.options.clone(),
        }
    }
}

impl<T: Clone> Takeable for Vec<T> {
    fn take_len(&self) -> usize {
        self.len()
    }

    fn take_range(&self, range: Range<usize>) -> Self {
        self[range].to_vec()
    }
}

/// Progress through one table of a batch request
///
/// `next_index` never exceeds `total_count`; the table is exhausted once they
/// are equal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChunkCursor {
    next_index: usize,
    total_count: usize,
}

impl ChunkCursor {
    /// Cursor at the start of a table holding `total_count` units
    pub fn new(total_count: usize) -> Self {
        Self {
            next_index: 0,
            total_count,
        }
    }

    /// Index of the next unit to hand out
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    /// Units in the table
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Units not handed out yet
    pub fn remaining(&self) -> usize {
        self.total_count - self.next_index
    }

    /// Whether every unit has been handed out
    pub fn is_exhausted(&self) -> bool {
        self.next_index >= self.total_count
    }

    fn advance(&mut self, count: usize) -> Range<usize> {
        let start = self.next_index;
        self.next_index = (start + count).min(self.total_count);
        start..self.next_index
    }
}

/// Hands out consecutive takes of a multi-table batch request
///
/// Tables are filled greedily in request order: each take draws from the first
/// table with units left, then the next, until the take holds `take_size`
/// units or every table is exhausted. Within a table units are handed out in
/// their original order. Each call to [`next_take`](Self::next_take) advances
/// the cursors, so consecutive calls return disjoint takes.
#[derive(Clone, Debug)]
pub struct TakeManager<T> {
    request_items: RequestItems<T>,
    cursors: Vec<ChunkCursor>,
    take_size: usize,
}

impl<T: Takeable> TakeManager<T> {
    /// Take manager handing out at most `take_size` units per take
    ///
    /// A `take_size` of zero is treated as one.
    pub fn new(request_items: RequestItems<T>, take_size: usize) -> Self {
        let cursors = request_items
            .iter()
            .map(|(_, table)| ChunkCursor::new(table.take_len()))
            .collect();

        Self {
            request_items,
            cursors,
            take_size: take_size.max(1),
        }
    }

    /// Units per take
    pub fn take_size(&self) -> usize {
        self.take_size
    }

    /// The request being carved up
    pub fn request_items(&self) -> &RequestItems<T> {
        &self.request_items
    }

    /// Cursor for `table_name`
    pub fn cursor(&self, table_name: &str) -> Option<&ChunkCursor> {
        self.request_items
            .table_names()
            .position(|name| name == table_name)
            .map(|index| &self.cursors[index])
    }

    /// Units not handed out yet, across all tables
    pub fn remaining(&self) -> usize {
        self.cursors.iter().map(ChunkCursor::remaining).sum()
    }

    /// Next take, or `None` once every table is exhausted
    ///
    /// A returned take is never empty. Exhausted tables are left out of it.
    pub fn next_take(&mut self) -> Option<RequestItems<T>> {
        let mut take = RequestItems::new();
        let mut units_in_take = 0;

        for ((table_name, table), cursor) in self.request_items.iter().zip(&mut self.cursors) {
            if cursor.is_exhausted() {
                continue;
            }

            let count = cursor.remaining().min(self.take_size - units_in_take);
            let range = cursor.advance(count);
            let _ = take.insert(table_name, table.take_range(range));
            units_in_take += count;

            if units_in_take >= self.take_size {
                break;
            }
        }

        (units_in_take > 0).then_some(take)
    }
}

impl<T: Takeable> Iterator for TakeManager<T> {
    type Item = RequestItems<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_take()
    }
}
