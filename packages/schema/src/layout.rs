//! # Layout Descriptors
//!
//! A `columns` module stores its layout as a string. Two forms are accepted:
//!
//! - `"N"`: N columns of equal width
//! - `"a:b:c"`: one column per part, widths in the ratio a:b:c
//!
//! Every part must be a positive integer, and a layout has at most
//! [`MAX_COLUMNS`] parts.

use crate::error::{SchemaError, SchemaResult};

pub const MAX_COLUMNS: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    parts: Vec<u32>,
}

impl Layout {
    pub fn parse(descriptor: &str) -> SchemaResult<Self> {
        let trimmed = descriptor.trim();
        let malformed = || SchemaError::malformed_layout(descriptor);

        if trimmed.is_empty() {
            return Err(malformed());
        }

        if !trimmed.contains(':') {
            let count = parse_part(trimmed)
                .map(|count| count as usize)
                .filter(|&count| count <= MAX_COLUMNS)
                .ok_or_else(malformed)?;
            return Ok(Self::equal(count));
        }

        if trimmed.split(':').count() > MAX_COLUMNS {
            return Err(malformed());
        }

        let parts = trimmed
            .split(':')
            .map(|part| parse_part(part.trim()))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(malformed)?;

        Ok(Self { parts })
    }

    /// `count` equal parts
    pub fn equal(count: usize) -> Self {
        Self {
            parts: vec![1; count],
        }
    }

    pub fn parts(&self) -> &[u32] {
        &self.parts
    }

    pub fn column_count(&self) -> usize {
        self.parts.len()
    }

    /// Width of each column as a percentage of the row
    pub fn percentages(&self) -> Vec<f64> {
        let total: u64 = self.parts.iter().map(|&p| p as u64).sum();
        if total == 0 {
            return Vec::new();
        }

        self.parts
            .iter()
            .map(|&p| p as f64 / total as f64 * 100.0)
            .collect()
    }
}

fn parse_part(part: &str) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    part.parse::<u32>().ok().filter(|&n| n > 0)
}
