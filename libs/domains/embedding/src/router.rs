//! Query/passage partitioning and position-indexed reassembly.

use crate::error::{EmbeddingError, EmbeddingResult};
use crate::models::{Batch, Role};

/// Texts routed to one model path together with their original positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubBatch {
    positions: Vec<usize>,
    texts: Vec<String>,
}

impl SubBatch {
    fn push(&mut self, position: usize, text: &str) {
        self.positions.push(position);
        self.texts.push(text.to_owned());
    }

    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// A batch split by role. Every input position lands in exactly one
/// sub-batch, and each sub-batch keeps the input's relative order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutedBatch {
    pub queries: SubBatch,
    pub passages: SubBatch,
}

impl RoutedBatch {
    pub fn route(batch: &Batch) -> Self {
        let mut routed = Self::default();
        for item in batch.classified() {
            match item.role {
                Role::Query => routed.queries.push(item.position, item.text),
                Role::Passage => routed.passages.push(item.position, item.text),
            }
        }
        routed
    }

    pub fn len(&self) -> usize {
        self.queries.len() + self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug)]
enum Slot<T> {
    Empty,
    Filled(T),
}

/// Output buffer pre-sized to the batch, written once per position.
#[derive(Debug)]
pub struct Reassembly<T> {
    slots: Vec<Slot<T>>,
}

impl<T> Reassembly<T> {
    pub fn new(len: usize) -> Self {
        let mut slots = Vec::with_capacity(len);
        slots.resize_with(len, || Slot::Empty);
        Self { slots }
    }

    pub fn fill(&mut self, position: usize, value: T) -> EmbeddingResult<()> {
        let len = self.slots.len();
        let slot = self.slots.get_mut(position).ok_or_else(|| {
            EmbeddingError::Reconstruction(format!(
                "position {} is outside a batch of {}",
                position, len
            ))
        })?;

        if let Slot::Filled(_) = slot {
            return Err(EmbeddingError::Reconstruction(format!(
                "position {} was filled twice",
                position
            )));
        }

        *slot = Slot::Filled(value);
        Ok(())
    }

    /// Fill `positions[i]` with `values[i]`; the two must be the same length.
    pub fn scatter(&mut self, positions: &[usize], values: Vec<T>) -> EmbeddingResult<()> {
        if positions.len() != values.len() {
            return Err(EmbeddingError::Reconstruction(format!(
                "sub-batch of {} items produced {} results",
                positions.len(),
                values.len()
            )));
        }

        for (&position, value) in positions.iter().zip(values) {
            self.fill(position, value)?;
        }
        Ok(())
    }

    /// Consume the buffer; fails if any position is still empty.
    pub fn finish(self) -> EmbeddingResult<Vec<T>> {
        let mut out = Vec::with_capacity(self.slots.len());
        for (position, slot) in self.slots.into_iter().enumerate() {
            match slot {
                Slot::Filled(value) => out.push(value),
                Slot::Empty => {
                    return Err(EmbeddingError::Reconstruction(format!(
                        "position {} was never filled",
                        position
                    )));
                }
            }
        }
        Ok(out)
    }
}
