#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbox distance field
//!
//! The Mandelbox is a box-like fractal found by Tom Lowe.  Unlike the
//! Mandelbrot it lives comfortably in any number of dimensions: every
//! point is repeatedly folded into a box, then through a sphere, and
//! the original point added back in.  How much the point has been
//! stretched by the end tells you roughly how far it is from the
//! fractal's surface, and that "distance estimate" is what this crate
//! computes.
//!
//! The estimator is a `RealField`: you ask it for a cursor, move the
//! cursor around, and read the value under it.  A cursor owns all of
//! the scratch space the fold needs, so to sample the field from
//! several threads you give each thread its own cursor.  The
//! SliceRenderer does exactly that to render a 2D slice of the field
//! into a pixel buffer, and the shade module turns that buffer into a
//! grayscale image.

extern crate failure;
extern crate crossbeam;
extern crate image;
extern crate itertools;
extern crate log;
extern crate num;
extern crate rand;

pub mod errors;
pub mod field;
pub mod mandelbox;
pub mod planes;
pub mod render;
pub mod scatter;
pub mod shade;

pub use errors::MandelboxError;
pub use field::{FieldCursor, Real, RealField};
pub use mandelbox::{DoubleMandelbox, FloatMandelbox, Mandelbox, MandelboxCursor};
pub use planes::{Pixel, PlaneMapper};
pub use render::{SliceRenderer, Viewport};
pub use scatter::scatter;
