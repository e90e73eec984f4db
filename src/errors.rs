// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can go wrong while building a field, a plane, or a
//! renderer.  Evaluating the field itself never fails; a degenerate
//! scale factor just produces an infinite or NaN estimate.

use failure::Fail;

/// The error type shared by the whole library.
#[derive(Debug, Fail, PartialEq)]
pub enum MandelboxError {
    /// A field must have at least one axis.
    #[fail(display = "The dimension of a field must be at least 1.")]
    ZeroDimension,

    /// The iteration budget must be at least one pass.
    #[fail(display = "The iteration budget must be at least 1.")]
    ZeroIterations,

    /// A coordinate did not have one entry per axis.
    #[fail(
        display = "Expected a coordinate with {} axes, found {}.",
        expected, found
    )]
    DimensionMismatch {
        /// The dimension of the field.
        expected: usize,
        /// The length of the coordinate we were handed.
        found: usize,
    },

    /// The pixel grid or the real rectangle it maps onto is malformed.
    #[fail(display = "Bad plane: {}", _0)]
    BadPlane(String),

    /// A viewport tried to span an axis the field doesn't have, or the
    /// same axis twice.
    #[fail(display = "Axis {} cannot be spanned in a field of dimension {}.", axis, dimension)]
    BadAxis {
        /// The offending axis.
        axis: usize,
        /// The dimension of the field.
        dimension: usize,
    },

    /// A threaded render was asked to run on no threads at all.
    #[fail(display = "A render needs at least one thread.")]
    NoThreads,

    /// One of the render workers died.
    #[fail(display = "A render thread panicked.")]
    RenderPanicked,
}
