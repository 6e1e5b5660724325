//! Exact (brute-force) squared-L2 vector store.
//!
//! Rows are stored contiguously. Search scans every row and mirrors the
//! flat-index convention of padding short result lists with a `-1` label,
//! which callers treat as "no match".

use std::cmp::Ordering;

use crate::domain::errors::{IndexError, IndexResult};

/// Label reported for result slots with no stored row behind them.
pub const NO_MATCH: i64 = -1;

const MAGIC: &[u8; 8] = b"PDFAVEC1";
const HEADER_LEN: usize = 8 + 4 + 8;

/// One nearest-neighbour slot: row label and squared distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Row index, or [`NO_MATCH`]
    pub label: i64,
    /// Squared L2 distance (`f32::INFINITY` for padded slots)
    pub distance: f32,
}

/// Contiguous row-major store of fixed-width vectors
#[derive(Debug, Clone, PartialEq)]
pub struct FlatL2Store {
    dimension: usize,
    data: Vec<f32>,
}

impl FlatL2Store {
    /// Create an empty store
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            data: Vec::new(),
        }
    }

    /// Vector width
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of stored rows
    pub fn len(&self) -> usize {
        if self.dimension == 0 {
            0
        } else {
            self.data.len() / self.dimension
        }
    }

    /// Returns true if no rows are stored
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow row `i`
    pub fn row(&self, i: usize) -> Option<&[f32]> {
        let start = i.checked_mul(self.dimension)?;
        self.data.get(start..start + self.dimension)
    }

    /// Append rows. All widths are checked before anything is written.
    pub fn add(&mut self, vectors: &[Vec<f32>]) -> IndexResult<()> {
        if let Some(bad) = vectors.iter().find(|v| v.len() != self.dimension) {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimension,
                actual: bad.len(),
            });
        }

        self.data.reserve(vectors.len() * self.dimension);
        for vector in vectors {
            self.data.extend_from_slice(vector);
        }
        Ok(())
    }

    /// Return `k` slots ordered by ascending distance, ties by row order.
    /// Slots beyond the stored row count carry [`NO_MATCH`].
    ///
    /// All `k` slots are allocated, so callers clamp `k` to [`len`](Self::len)
    /// when it comes from user input.
    pub fn search(&self, query: &[f32], k: usize) -> IndexResult<Vec<Neighbor>> {
        if query.len() != self.dimension {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let mut scored: Vec<(usize, f32)> = (0..self.len())
            .filter_map(|i| self.row(i).map(|row| (i, squared_l2(query, row))))
            .collect();

        scored.sort_by(|a, b| match a.1.total_cmp(&b.1) {
            Ordering::Equal => a.0.cmp(&b.0),
            other => other,
        });

        let mut neighbors: Vec<Neighbor> = scored
            .into_iter()
            .take(k)
            .map(|(i, distance)| Neighbor {
                label: i64::try_from(i).unwrap_or(NO_MATCH),
                distance,
            })
            .collect();

        neighbors.resize(
            k,
            Neighbor {
                label: NO_MATCH,
                distance: f32::INFINITY,
            },
        );

        Ok(neighbors)
    }

    /// Serialize to the blob layout: magic, width (u32 LE), rows (u64 LE),
    /// then row-major f32 LE values.
    pub fn to_bytes(&self) -> IndexResult<Vec<u8>> {
        let dimension = u32::try_from(self.dimension)
            .map_err(|_| IndexError::CorruptIndex(format!("dimension {} too large", self.dimension)))?;

        let mut bytes = Vec::with_capacity(HEADER_LEN + self.data.len() * 4);
        bytes.extend_from_slice(MAGIC);
        bytes.extend_from_slice(&dimension.to_le_bytes());
        bytes.extend_from_slice(&(self.len() as u64).to_le_bytes());
        bytes.extend(self.data.iter().flat_map(|f| f.to_le_bytes()));
        Ok(bytes)
    }

    /// Deserialize a blob written by [`FlatL2Store::to_bytes`]
    pub fn from_bytes(bytes: &[u8]) -> IndexResult<Self> {
        if bytes.len() < HEADER_LEN || &bytes[..8] != MAGIC {
            return Err(IndexError::CorruptIndex(
                "vector blob header missing or unrecognised".to_string(),
            ));
        }

        let mut width = [0u8; 4];
        width.copy_from_slice(&bytes[8..12]);
        let mut rows = [0u8; 8];
        rows.copy_from_slice(&bytes[12..20]);

        let dimension = u32::from_le_bytes(width) as usize;
        let rows = usize::try_from(u64::from_le_bytes(rows))
            .map_err(|_| IndexError::CorruptIndex("row count overflows usize".to_string()))?;

        let body = &bytes[HEADER_LEN..];
        let expected = rows
            .checked_mul(dimension)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| IndexError::CorruptIndex("vector blob size overflows".to_string()))?;

        if body.len() != expected {
            return Err(IndexError::CorruptIndex(format!(
                "vector blob holds {} bytes, header declares {} rows of width {}",
                body.len(),
                rows,
                dimension
            )));
        }

        let data = body
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();

        Ok(Self { dimension, data })
    }
}

/// Squared Euclidean distance
pub fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(rows: &[[f32; 2]]) -> FlatL2Store {
        let mut store = FlatL2Store::new(2);
        let vectors: Vec<Vec<f32>> = rows.iter().map(|r| r.to_vec()).collect();
        store.add(&vectors).unwrap();
        store
    }

    #[test]
    fn test_squared_l2() {
        assert!((squared_l2(&[0.0, 0.0], &[3.0, 4.0]) - 25.0).abs() < f32::EPSILON);
        assert!(squared_l2(&[1.0, 2.0], &[1.0, 2.0]).abs() < f32::EPSILON);
    }

    #[test]
    fn test_add_rejects_wrong_width_without_writing() {
        let mut store = FlatL2Store::new(2);
        let result = store.add(&[vec![1.0, 2.0], vec![1.0]]);
        assert!(matches!(
            result,
            Err(IndexError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_search_orders_by_distance_then_row() {
        let store = store_with(&[[5.0, 5.0], [1.0, 0.0], [0.0, 1.0], [0.0, 0.0]]);
        let neighbors = store.search(&[0.0, 0.0], 4).unwrap();
        let labels: Vec<i64> = neighbors.iter().map(|n| n.label).collect();
        assert_eq!(labels, vec![3, 1, 2, 0]);
        assert!(neighbors[0].distance.abs() < f32::EPSILON);
    }

    #[test]
    fn test_search_pads_with_no_match() {
        let store = store_with(&[[1.0, 1.0]]);
        let neighbors = store.search(&[0.0, 0.0], 3).unwrap();
        assert_eq!(neighbors.len(), 3);
        assert_eq!(neighbors[0].label, 0);
        assert_eq!(neighbors[1].label, NO_MATCH);
        assert_eq!(neighbors[2].label, NO_MATCH);
    }

    #[test]
    fn test_search_wrong_query_width() {
        let store = store_with(&[[1.0, 1.0]]);
        assert!(store.search(&[1.0], 1).is_err());
    }

    #[test]
    fn test_bytes_round_trip() {
        let store = store_with(&[[1.5, -2.0], [0.25, 8.0]]);
        let restored = FlatL2Store::from_bytes(&store.to_bytes().unwrap()).unwrap();
        assert_eq!(restored, store);
        assert_eq!(restored.len(), 2);
    }

    #[test]
    fn test_from_bytes_rejects_truncated_blob() {
        let store = store_with(&[[1.5, -2.0], [0.25, 8.0]]);
        let mut bytes = store.to_bytes().unwrap();
        bytes.truncate(bytes.len() - 3);
        assert!(matches!(
            FlatL2Store::from_bytes(&bytes),
            Err(IndexError::CorruptIndex(_))
        ));
        assert!(FlatL2Store::from_bytes(b"garbage").is_err());
    }
}
