//! Growable paired column storage.
//!
//! Positions and values live in two vectors that only grow together through
//! [`ColumnBuffer::push`]. Capacity doubles when full, using fallible
//! reservation so an allocation failure becomes an error instead of an abort.

use crate::error::{Result, TraceError};
use crate::models::Table;
use tracing::trace;

/// Write-only buffer for `(position, value)` rows
#[derive(Debug)]
pub struct ColumnBuffer {
    positions: Vec<f64>,
    values: Vec<f64>,
    capacity: usize,
    doublings: usize,
}

impl ColumnBuffer {
    /// Allocate both columns for `capacity` rows (at least one)
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let capacity = capacity.max(1);
        let mut buffer = Self {
            positions: Vec::new(),
            values: Vec::new(),
            capacity,
            doublings: 0,
        };
        buffer.reserve_to(capacity)?;
        Ok(buffer)
    }

    /// Append one row, doubling capacity first if the buffer is full
    ///
    /// On error nothing is appended and both columns keep equal length.
    pub fn push(&mut self, position: f64, value: f64) -> Result<()> {
        if self.positions.len() == self.capacity {
            self.grow()?;
        }
        self.positions.push(position);
        self.values.push(value);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Logical capacity in rows
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of times the capacity has doubled
    pub fn doublings(&self) -> usize {
        self.doublings
    }

    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_table(self) -> Table {
        Table::from_parts(self.positions, self.values)
    }

    fn grow(&mut self) -> Result<()> {
        // An overflowing doubling is left for the allocator to reject
        let new_capacity = self.capacity.checked_mul(2).unwrap_or(usize::MAX);

        self.reserve_to(new_capacity)?;
        trace!("Column buffer grew from {} to {} rows", self.capacity, new_capacity);
        self.capacity = new_capacity;
        self.doublings += 1;
        Ok(())
    }

    fn reserve_to(&mut self, capacity: usize) -> Result<()> {
        let exhausted = |source| TraceError::ResourceExhausted {
            requested: capacity,
            source,
        };
        let additional = capacity - self.positions.len();
        self.positions
            .try_reserve_exact(additional)
            .map_err(exhausted)?;
        self.values.try_reserve_exact(additional).map_err(exhausted)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_columns_paired() {
        let mut buffer = ColumnBuffer::with_capacity(4).unwrap();
        buffer.push(0.1, 10.0).unwrap();
        buffer.push(0.2, 20.0).unwrap();
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.positions(), &[0.1, 0.2]);
        assert_eq!(buffer.values(), &[10.0, 20.0]);
    }

    #[test]
    fn test_one_doubling_per_boundary() {
        let mut buffer = ColumnBuffer::with_capacity(2).unwrap();
        let mut seen = Vec::new();
        for i in 0..9 {
            buffer.push(i as f64, (i * 10) as f64).unwrap();
            seen.push((buffer.capacity(), buffer.doublings()));
        }
        // 2 -> 4 at row 3, 4 -> 8 at row 5, 8 -> 16 at row 9
        assert_eq!(
            seen,
            vec![
                (2, 0),
                (2, 0),
                (4, 1),
                (4, 1),
                (8, 2),
                (8, 2),
                (8, 2),
                (8, 2),
                (16, 3),
            ]
        );
    }

    #[test]
    fn test_contents_survive_growth() {
        let mut buffer = ColumnBuffer::with_capacity(3).unwrap();
        let rows: Vec<(f64, f64)> = (0..50).map(|i| (i as f64 * 0.01, i as f64 * 1.5)).collect();
        for &(p, v) in &rows {
            buffer.push(p, v).unwrap();
        }
        let table = buffer.into_table();
        assert_eq!(table.rows().collect::<Vec<_>>(), rows);
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let mut buffer = ColumnBuffer::with_capacity(0).unwrap();
        assert_eq!(buffer.capacity(), 1);
        buffer.push(1.0, 2.0).unwrap();
        buffer.push(3.0, 4.0).unwrap();
        assert_eq!(buffer.capacity(), 2);
        assert_eq!(buffer.doublings(), 1);
    }

    #[test]
    fn test_impossible_capacity_is_resource_error() {
        let err = ColumnBuffer::with_capacity(usize::MAX / 4).unwrap_err();
        assert!(matches!(err, TraceError::ResourceExhausted { .. }));
    }

    #[test]
    fn test_failed_growth_leaves_rows_intact() {
        let mut buffer = ColumnBuffer::with_capacity(2).unwrap();
        buffer.push(0.1, 1.0).unwrap();
        buffer.push(0.2, 2.0).unwrap();
        buffer.capacity = usize::MAX / 8;

        let err = buffer.grow().unwrap_err();
        assert!(matches!(
            err,
            TraceError::ResourceExhausted { requested, .. } if requested == (usize::MAX / 8) * 2
        ));
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.positions(), &[0.1, 0.2]);
        assert_eq!(buffer.values(), &[1.0, 2.0]);
        assert_eq!(buffer.capacity(), usize::MAX / 8);
        assert_eq!(buffer.doublings(), 0);
    }
}
