/*
[INPUT]:  `{"total": N, "rows": [...]}` payloads or caller-built row vectors
[OUTPUT]: PagedRowList<T> with total-count bookkeeping across mutations
[POS]:    Decode layer - generic container for every "list of X" response
[UPDATE]: When changing row-list mutation or decode semantics
*/

use serde::Serialize;

use super::error::{DecodeResult, ModelError};
use super::record::RawRecord;
use super::Decode;

/// Default key holding the row array in list responses
pub const ROWS_KEY: &str = "rows";
pub const TOTAL_KEY: &str = "total";

/// A page of decoded rows plus the server-reported total.
///
/// The decoded `total` is kept as reported even when it disagrees with
/// the number of rows in the page. `insert` and `remove` adjust it by
/// one; only `replace_all` recomputes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagedRowList<T> {
    total: u64,
    rows: Vec<T>,
}

impl<T> PagedRowList<T> {
    /// Build a list with an explicit total
    pub fn new(total: u64, rows: Vec<T>) -> Self {
        Self { total, rows }
    }

    /// Build a list whose total is the row count
    pub fn from_rows(rows: Vec<T>) -> Self {
        Self {
            total: rows.len() as u64,
            rows,
        }
    }

    /// Decode `total` and the array under `rows_key`, one row at a time
    pub fn decode_with<F>(
        record: &RawRecord<'_>,
        rows_key: &'static str,
        decoder: F,
    ) -> DecodeResult<Self>
    where
        F: FnMut(&RawRecord<'_>) -> DecodeResult<T>,
    {
        let total = record.u64_or_zero(TOTAL_KEY)?;
        let rows = record.records(rows_key, decoder)?;
        Ok(Self { total, rows })
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.rows.iter()
    }

    pub fn into_rows(self) -> Vec<T> {
        self.rows
    }

    /// Row at `index`
    pub fn get(&self, index: usize) -> DecodeResult<&T> {
        self.rows.get(index).ok_or(ModelError::IndexOutOfRange {
            index,
            len: self.rows.len(),
        })
    }

    /// Replace every row; the total becomes the new row count
    pub fn replace_all(&mut self, rows: Vec<T>) {
        self.total = rows.len() as u64;
        self.rows = rows;
    }
}

impl<T: PartialEq> PagedRowList<T> {
    /// Append `row` unless an equal row is already present.
    ///
    /// Returns `true` when the row was added.
    pub fn insert(&mut self, row: T) -> bool {
        if self.rows.contains(&row) {
            return false;
        }
        self.rows.push(row);
        self.total += 1;
        true
    }

    /// Remove the first row equal to `row`.
    ///
    /// Returns `true` when a row was removed.
    pub fn remove(&mut self, row: &T) -> bool {
        match self.rows.iter().position(|existing| existing == row) {
            Some(index) => {
                self.rows.remove(index);
                self.total = self.total.saturating_sub(1);
                true
            }
            None => false,
        }
    }
}

impl<T> Default for PagedRowList<T> {
    fn default() -> Self {
        Self {
            total: 0,
            rows: Vec::new(),
        }
    }
}

impl<T: Decode> Decode for PagedRowList<T> {
    fn decode(record: &RawRecord<'_>) -> DecodeResult<Self> {
        Self::decode_with(record, ROWS_KEY, T::decode)
    }
}

impl<T> IntoIterator for PagedRowList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a PagedRowList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
