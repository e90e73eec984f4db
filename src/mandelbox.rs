// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The Mandelbox distance estimator.
//!
//! The Mandelbox is a fractal defined by repeatedly folding a point
//! into a box and then through a sphere.  The box fold reflects every
//! coordinate back into [-1, 1]; the sphere fold either scales the
//! point outward (when it is very close to the origin) or inverts it
//! (when it is inside the unit sphere), and then adds the original
//! coordinate back in.  After a fixed number of passes the length of
//! the folded point, divided by the scale factor of the last pass, is
//! an estimate of how far the original coordinate is from the surface.
//!
//! Only the final pass's scale factor feeds the estimate: the factor
//! is reset to `scale` at the start of every pass and multiplied at
//! most once.  A scale of zero makes the factor zero, and the estimate
//! comes back infinite or NaN.

use crate::errors::MandelboxError;
use crate::field::{FieldCursor, Real, RealField};

/// The scale used when none is given.
pub const DEFAULT_SCALE: f32 = -1.5;

/// The number of fold passes used when none is given.
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

#[inline]
fn lit<T: Real>(v: f32) -> T {
    <T as From<f32>>::from(v)
}

/// The fixed parameters of a Mandelbox.  Once built, these never
/// change, and they are small enough to copy into every cursor.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Mandelbox<T: Real> {
    dimension: usize,
    scale: T,
    max_iterations: usize,
}

/// A single precision Mandelbox.
pub type FloatMandelbox = Mandelbox<f32>;

/// A double precision Mandelbox.
pub type DoubleMandelbox = Mandelbox<f64>;

impl<T: Real> Mandelbox<T> {
    /// A Mandelbox over `dimension` axes, folding with `scale`, making
    /// `max_iterations` passes per query.
    pub fn new(dimension: usize, scale: T, max_iterations: usize) -> Result<Self, MandelboxError> {
        if dimension == 0 {
            return Err(MandelboxError::ZeroDimension);
        }
        if max_iterations == 0 {
            return Err(MandelboxError::ZeroIterations);
        }
        Ok(Mandelbox {
            dimension,
            scale,
            max_iterations,
        })
    }

    /// A Mandelbox with the default scale.
    pub fn with_iterations(dimension: usize, max_iterations: usize) -> Result<Self, MandelboxError> {
        Self::new(dimension, lit(DEFAULT_SCALE), max_iterations)
    }

    /// A Mandelbox with the default scale and iteration budget.
    pub fn with_dimension(dimension: usize) -> Result<Self, MandelboxError> {
        Self::with_iterations(dimension, DEFAULT_MAX_ITERATIONS)
    }

    /// The fold scale.
    pub fn scale(&self) -> T {
        self.scale
    }

    /// The number of fold passes per query.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// One-off evaluation.  Builds a throwaway cursor; anything that
    /// queries more than once should hold on to a cursor instead.
    pub fn distance(&self, position: &[T]) -> Result<T, MandelboxError> {
        self.cursor().evaluate(position)
    }
}

impl<T: Real> RealField<T> for Mandelbox<T> {
    type Cursor = MandelboxCursor<T>;

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn cursor(&self) -> MandelboxCursor<T> {
        MandelboxCursor {
            field: *self,
            position: vec![T::zero(); self.dimension],
            z: vec![T::zero(); self.dimension],
        }
    }
}

/// A cursor over a Mandelbox.  Owns its position and the working
/// point the folds are applied to.
#[derive(Debug)]
pub struct MandelboxCursor<T: Real> {
    field: Mandelbox<T>,
    position: Vec<T>,
    // Overwritten from `position` at the start of every `get`.
    z: Vec<T>,
}

impl<T: Real> MandelboxCursor<T> {
    /// The Mandelbox this cursor evaluates.
    pub fn field(&self) -> &Mandelbox<T> {
        &self.field
    }
}

impl<T: Real> Clone for MandelboxCursor<T> {
    fn clone(&self) -> Self {
        MandelboxCursor {
            field: self.field,
            position: self.position.clone(),
            z: vec![T::zero(); self.field.dimension],
        }
    }
}

impl<T: Real> FieldCursor<T> for MandelboxCursor<T> {
    fn dimension(&self) -> usize {
        self.field.dimension
    }

    fn set_position(&mut self, position: &[T]) -> Result<(), MandelboxError> {
        if position.len() != self.field.dimension {
            return Err(MandelboxError::DimensionMismatch {
                expected: self.field.dimension,
                found: position.len(),
            });
        }
        self.position.copy_from_slice(position);
        Ok(())
    }

    fn set_axis(&mut self, value: T, axis: usize) {
        self.position[axis] = value;
    }

    fn position(&self) -> &[T] {
        &self.position
    }

    fn get(&mut self) -> T {
        let (one, two, four, quarter) = (T::one(), lit::<T>(2.0), lit::<T>(4.0), lit::<T>(0.25));
        let scale = self.field.scale;
        let position = &self.position;
        let z = &mut self.z;
        z.copy_from_slice(position);

        let mut sum = T::zero();
        let mut f = T::zero();
        for _ in 0..self.field.max_iterations {
            f = scale;
            sum = T::zero();
            for p in z.iter_mut() {
                if *p > one {
                    *p = two - *p;
                } else if *p < -one {
                    *p = -two - *p;
                }
                sum = sum + *p * *p;
            }

            if sum < quarter {
                for (p, c) in z.iter_mut().zip(position.iter()) {
                    *p = *p * four * scale + *c;
                }
                f = f * (scale / quarter);
            } else if sum < one {
                for (p, c) in z.iter_mut().zip(position.iter()) {
                    *p = (*p - sum) * scale + *c;
                }
                f = f * (scale / sum);
            }
        }

        sum.sqrt() / f.abs()
    }
}
