//! Queryable projection of an entity
//!
//! Search, filter and sort never read the entity directly: each entity is
//! first projected once into a [`QueryView`] holding every field value, raw
//! and computed, so derived values (an animal's age) are not recomputed on
//! every comparison.

use crate::core::entity::{ProjectionContext, Queryable};
use crate::core::field::{FieldValue, QueryField};
use std::marker::PhantomData;

/// Field values of one entity, indexed by its field enum
#[derive(Debug, Clone, PartialEq)]
pub struct QueryView<F> {
    position: usize,
    values: Vec<FieldValue>,
    _field: PhantomData<F>,
}

impl<F: QueryField> QueryView<F> {
    /// Project `entity`, found at `position` in its source collection
    pub fn project<T>(position: usize, entity: &T, context: &ProjectionContext) -> Self
    where
        T: Queryable<Field = F>,
    {
        let values = F::all()
            .iter()
            .map(|field| {
                entity
                    .field_value(*field, context)
                    .unwrap_or(FieldValue::Null)
            })
            .collect();

        Self {
            position,
            values,
            _field: PhantomData,
        }
    }

    /// Build a view from explicit values (missing fields are `Null`)
    pub fn from_values(position: usize, values: impl IntoIterator<Item = (F, FieldValue)>) -> Self {
        let mut slots = vec![FieldValue::Null; F::all().len()];
        for (field, value) in values {
            slots[field.index()] = value;
        }
        Self {
            position,
            values: slots,
            _field: PhantomData,
        }
    }

    /// Position of the entity in the source collection
    pub fn position(&self) -> usize {
        self.position
    }

    /// Value of a field; `None` when absent or null
    pub fn get(&self, field: F) -> Option<&FieldValue> {
        self.values.get(field.index()).filter(|v| !v.is_null())
    }
}

/// Project a whole collection, preserving order
pub fn project_all<T: Queryable>(
    items: &[T],
    context: &ProjectionContext,
) -> Vec<QueryView<T::Field>> {
    items
        .iter()
        .enumerate()
        .map(|(position, item)| QueryView::project(position, item, context))
        .collect()
}
