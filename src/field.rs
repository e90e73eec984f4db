// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A real field is anything that can be asked "what is your value at
//! this coordinate?"  Asking is done through a cursor: you position
//! the cursor, then get the value under it.  The field itself is an
//! immutable description; every cursor owns whatever scratch space it
//! needs to compute a value, so a renderer hands one cursor to each of
//! its threads and never shares them.

use crate::errors::MandelboxError;
use num::Float;
use std::fmt::Debug;

/// The floating point types a field can be evaluated in.  Both `f32`
/// and `f64` qualify; constants are written as `f32` literals and
/// widened.
pub trait Real: Float + From<f32> + Debug + Send + Sync + 'static {}

impl<T> Real for T where T: Float + From<f32> + Debug + Send + Sync + 'static {}

/// A scalar field over an n-dimensional real domain.
pub trait RealField<T: Real> {
    /// The cursor type this field hands out.
    type Cursor: FieldCursor<T>;

    /// The number of axes in the domain.
    fn dimension(&self) -> usize;

    /// A new cursor, positioned at the origin.
    fn cursor(&self) -> Self::Cursor;
}

/// A positionable evaluator over a `RealField`.
///
/// Cloning a cursor produces an independent cursor at the same
/// position.  `get` takes `&mut self`: a cursor may only be used by
/// one caller at a time, and a cursor shared across threads must be
/// cloned, not borrowed.
pub trait FieldCursor<T: Real>: Clone + Send {
    /// The number of axes in the domain.
    fn dimension(&self) -> usize;

    /// Move the cursor to `position`, which must have one entry per
    /// axis.
    fn set_position(&mut self, position: &[T]) -> Result<(), MandelboxError>;

    /// Move the cursor along a single axis.
    ///
    /// # Panics
    ///
    /// Panics if `axis` is not less than the dimension.
    fn set_axis(&mut self, value: T, axis: usize);

    /// The current position.
    fn position(&self) -> &[T];

    /// The value of the field under the cursor.
    fn get(&mut self) -> T;

    /// Position, then get.
    fn evaluate(&mut self, position: &[T]) -> Result<T, MandelboxError> {
        self.set_position(position)?;
        Ok(self.get())
    }
}
