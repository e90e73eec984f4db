// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Renders a 2D slice of an n-dimensional field.
//!
//! A Viewport says which two axes of the field the pixel grid spans,
//! and where every other axis is pinned.  The SliceRenderer walks the
//! grid, positions a cursor at the centre of each pixel, and records
//! the field's value there.  The threaded version hands whole rows out
//! of a shared queue; every thread brings its own cursor, so the only
//! thing the threads share is the queue.

use crate::errors::MandelboxError;
use crate::field::{FieldCursor, Real, RealField};
use crate::planes::{Pixel, PlaneMapper};
use itertools::iproduct;
use log::{debug, info};
use num::NumCast;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Narrow (or keep) an f64 coordinate in the field's precision.
#[inline]
pub(crate) fn real<T: Real>(v: f64) -> T {
    <T as NumCast>::from(v).unwrap_or_else(T::nan)
}

/// A pixel plane placed inside an n-dimensional domain.
#[derive(Clone, Debug)]
pub struct Viewport {
    /// The pixel grid and the real rectangle it covers.
    pub plane: PlaneMapper,
    // The axis the plane's x runs along, and the axis its y runs
    // along.  A one-dimensional domain has no y axis.
    axes: (usize, Option<usize>),
    origin: Vec<f64>,
}

impl Viewport {
    /// A viewport through `origin`, spanning axes 0 and 1.  The
    /// coordinates of `origin` along the spanned axes are ignored.
    pub fn new(plane: PlaneMapper, origin: Vec<f64>) -> Result<Self, MandelboxError> {
        if origin.is_empty() {
            return Err(MandelboxError::ZeroDimension);
        }
        let y = if origin.len() > 1 { Some(1) } else { None };
        Ok(Viewport {
            plane,
            axes: (0, y),
            origin,
        })
    }

    /// Span a different pair of axes.
    pub fn with_axes(mut self, x: usize, y: usize) -> Result<Self, MandelboxError> {
        let dimension = self.origin.len();
        for &axis in &[x, y] {
            if axis >= dimension {
                return Err(MandelboxError::BadAxis { axis, dimension });
            }
        }
        if x == y {
            return Err(MandelboxError::BadAxis { axis: y, dimension });
        }
        self.axes = (x, Some(y));
        Ok(self)
    }

    /// The dimension of the domain this viewport lives in.
    pub fn dimension(&self) -> usize {
        self.origin.len()
    }

    /// The spanned axes.
    pub fn axes(&self) -> (usize, Option<usize>) {
        self.axes
    }

    /// The full n-dimensional coordinate of a pixel's centre.
    pub fn position_of(&self, pixel: &Pixel) -> Vec<f64> {
        let point = self.plane.pixel_to_point(pixel);
        let mut position = self.origin.clone();
        position[self.axes.0] = point.re;
        if let Some(y) = self.axes.1 {
            position[y] = point.im;
        }
        position
    }
}

/// Samples a field over a viewport.
pub struct SliceRenderer<T: Real, F: RealField<T>> {
    field: F,
    viewport: Viewport,
    _precision: PhantomData<T>,
}

impl<T: Real, F: RealField<T>> SliceRenderer<T, F> {
    /// The viewport must live in a domain of the field's dimension.
    pub fn new(field: F, viewport: Viewport) -> Result<Self, MandelboxError> {
        if field.dimension() != viewport.dimension() {
            return Err(MandelboxError::DimensionMismatch {
                expected: field.dimension(),
                found: viewport.dimension(),
            });
        }
        Ok(SliceRenderer {
            field,
            viewport,
            _precision: PhantomData,
        })
    }

    /// The field being rendered.
    pub fn field(&self) -> &F {
        &self.field
    }

    /// Where the field is being rendered.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// A cursor already sitting on the viewport's origin.  Only the
    /// spanned axes move after this.
    pub fn cursor(&self) -> Result<F::Cursor, MandelboxError> {
        let origin: Vec<T> = self.viewport.origin.iter().map(|&v| real(v)).collect();
        let mut cursor = self.field.cursor();
        cursor.set_position(&origin)?;
        Ok(cursor)
    }

    /// The value of the field at the centre of a pixel, using a cursor
    /// from `cursor()`.
    pub fn value_at(&self, cursor: &mut F::Cursor, pixel: &Pixel) -> T {
        let point = self.viewport.plane.pixel_to_point(pixel);
        cursor.set_axis(real(point.re), self.viewport.axes.0);
        if let Some(y) = self.viewport.axes.1 {
            cursor.set_axis(real(point.im), y);
        }
        cursor.get()
    }

    fn render_row(&self, cursor: &mut F::Cursor, row: usize, out: &mut [T]) {
        for (column, value) in out.iter_mut().enumerate() {
            *value = self.value_at(cursor, &Pixel(column, row));
        }
    }

    /// Render the whole viewport on the calling thread.  The buffer is
    /// row-major, one value per pixel.
    pub fn render_single(&self) -> Result<Vec<T>, MandelboxError> {
        let started = Instant::now();
        let mut cursor = self.cursor()?;
        let mut buffer = vec![T::zero(); self.viewport.plane.len()];
        let pixels = iproduct!(0..self.viewport.plane.height(), 0..self.viewport.plane.width());
        for ((row, column), value) in pixels.zip(buffer.iter_mut()) {
            *value = self.value_at(&mut cursor, &Pixel(column, row));
        }
        info!(
            "Rendered {} pixels on one thread in {:?}",
            buffer.len(),
            started.elapsed()
        );
        Ok(buffer)
    }
}

impl<T: Real, F: RealField<T> + Sync> SliceRenderer<T, F> {
    /// A multi-threaded version of `render_single`.  The result is
    /// identical to the single-threaded one.
    pub fn render(&self, threads: usize) -> Result<Vec<T>, MandelboxError> {
        if threads == 0 {
            return Err(MandelboxError::NoThreads);
        }
        let started = Instant::now();
        let cursor = self.cursor()?;
        let mut buffer = vec![T::zero(); self.viewport.plane.len()];
        {
            let rows = Arc::new(Mutex::new(
                buffer.chunks_mut(self.viewport.plane.width()).enumerate(),
            ));
            crossbeam::scope(|spawner| {
                for worker in 0..threads {
                    let rows = rows.clone();
                    let mut cursor = cursor.clone();
                    spawner.spawn(move |_| {
                        let mut rendered = 0;
                        loop {
                            let row = match rows.lock() {
                                Ok(mut rows) => rows.next(),
                                Err(_) => None,
                            };
                            match row {
                                Some((row, out)) => {
                                    self.render_row(&mut cursor, row, out);
                                    rendered += 1;
                                }
                                None => {
                                    break;
                                }
                            }
                        }
                        debug!("Worker {} rendered {} rows", worker, rendered);
                    });
                }
            })
            .map_err(|_| MandelboxError::RenderPanicked)?;
        }
        info!(
            "Rendered {} pixels on {} threads in {:?}",
            buffer.len(),
            threads,
            started.elapsed()
        );
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mandelbox::{DoubleMandelbox, FloatMandelbox};
    use num::Complex;

    fn plane(width: usize, height: usize) -> PlaneMapper {
        PlaneMapper::new(width, height, Complex::new(-4.0, -4.0), Complex::new(4.0, 4.0)).unwrap()
    }

    #[test]
    fn viewport_refuses_bad_axes() {
        let vp = Viewport::new(plane(4, 4), vec![0.0; 3]).unwrap();
        assert_eq!(
            vp.clone().with_axes(0, 3).unwrap_err(),
            MandelboxError::BadAxis {
                axis: 3,
                dimension: 3
            }
        );
        assert!(vp.clone().with_axes(2, 2).is_err());
        assert_eq!(vp.with_axes(2, 0).unwrap().axes(), (2, Some(0)));
        assert!(Viewport::new(plane(4, 4), vec![]).is_err());
    }

    #[test]
    fn viewport_pins_the_other_axes() {
        let vp = Viewport::new(plane(4, 4), vec![9.0, 9.0, 0.25])
            .unwrap()
            .with_axes(2, 0)
            .unwrap();
        assert_eq!(vp.position_of(&Pixel(0, 3)), vec![3.0, 9.0, -3.0]);
    }

    #[test]
    fn one_dimensional_viewports_ignore_y() {
        let vp = Viewport::new(plane(4, 2), vec![0.0]).unwrap();
        assert_eq!(vp.axes(), (0, None));
        assert_eq!(vp.position_of(&Pixel(1, 0)), vp.position_of(&Pixel(1, 1)));
    }

    #[test]
    fn renderer_checks_dimensions() {
        let mb = DoubleMandelbox::with_dimension(3).unwrap();
        let vp = Viewport::new(plane(4, 4), vec![0.0; 2]).unwrap();
        assert!(SliceRenderer::new(mb, vp).is_err());
    }

    #[test]
    fn render_single_evaluates_every_pixel_centre() {
        let mb = DoubleMandelbox::with_dimension(3).unwrap();
        let vp = Viewport::new(plane(7, 5), vec![0.0, 0.0, 0.3]).unwrap();
        let renderer = SliceRenderer::new(mb, vp.clone()).unwrap();
        let buffer = renderer.render_single().unwrap();
        assert_eq!(buffer.len(), 35);
        for (row, column) in iproduct!(0..5, 0..7) {
            let pixel = Pixel(column, row);
            let expected = mb.distance(&vp.position_of(&pixel)).unwrap();
            let offset = vp.plane.pixel_to_offset(&pixel).unwrap();
            assert_eq!(buffer[offset], expected);
        }
    }

    #[test]
    fn threaded_render_matches_single() {
        let mb = DoubleMandelbox::with_dimension(2).unwrap();
        let vp = Viewport::new(plane(33, 17), vec![0.0, 0.0]).unwrap();
        let renderer = SliceRenderer::new(mb, vp).unwrap();
        let single = renderer.render_single().unwrap();
        for &threads in &[1, 3, 8] {
            assert_eq!(renderer.render(threads).unwrap(), single);
        }
    }

    #[test]
    fn threaded_render_needs_a_thread() {
        let mb = FloatMandelbox::with_dimension(2).unwrap();
        let vp = Viewport::new(plane(4, 4), vec![0.0, 0.0]).unwrap();
        let renderer = SliceRenderer::new(mb, vp).unwrap();
        assert_eq!(renderer.render(0), Err(MandelboxError::NoThreads));
        assert_eq!(renderer.render(2).unwrap().len(), 16);
    }
}
