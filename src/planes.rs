// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which relates a rectangle on the
//! integral plane with its origin at 0,0 to a rectangle on the real
//! plane with arbitrary left-lower and right-upper corners.  Points on
//! the real plane are complex numbers, the real part being x and the
//! imaginary part y.
use crate::errors::MandelboxError;
use num::Complex;

/// The width and height of an integral plane starting at 0,0.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// The left-lower and right-upper corners of the real plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RealPlane(pub Complex<f64>, pub Complex<f64>);

/// The column and row of a pixel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixels to points and back.  A pixel covers a small rectangle
/// of the real plane; when asked for "the" point of a pixel, we hand
/// back the centre of that rectangle.
#[derive(Clone, Debug)]
pub struct PlaneMapper {
    /// The size of the pixel grid.
    pub integral_plane: IntegralPlane,
    /// The two corners of the real rectangle, left-lower and right-upper.
    pub real_plane: RealPlane,
    // The size of one pixel on the real plane, along x and y.
    pixel_size: (f64, f64),
}

impl PlaneMapper {
    /// Takes the size of the pixel grid and the two corners of the real
    /// rectangle it covers.
    pub fn new(
        width: usize,
        height: usize,
        leftlower: Complex<f64>,
        rightupper: Complex<f64>,
    ) -> Result<PlaneMapper, MandelboxError> {
        if width == 0 || height == 0 {
            return Err(MandelboxError::BadPlane(format!(
                "The pixel grid {}x{} is empty.",
                width, height
            )));
        }

        if !(rightupper.re > leftlower.re) {
            return Err(MandelboxError::BadPlane(
                "The left lower corner is not to the left of the right upper corner.".to_string(),
            ));
        }

        if !(rightupper.im > leftlower.im) {
            return Err(MandelboxError::BadPlane(
                "The left lower corner is not lower than the right upper corner.".to_string(),
            ));
        }

        let pixel_size = (
            (rightupper.re - leftlower.re) / (width as f64),
            (rightupper.im - leftlower.im) / (height as f64),
        );

        Ok(PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            real_plane: RealPlane(leftlower, rightupper),
            pixel_size,
        })
    }

    /// The number of pixels in the grid.
    pub fn len(&self) -> usize {
        self.integral_plane.0 * self.integral_plane.1
    }

    /// Always false for a plane that made it through `new`; here for
    /// symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.integral_plane.0 == 0 || self.integral_plane.1 == 0
    }

    /// The grid width, in pixels.
    pub fn width(&self) -> usize {
        self.integral_plane.0
    }

    /// The grid height, in pixels.
    pub fn height(&self) -> usize {
        self.integral_plane.1
    }

    /// The centre of a pixel, on the real plane.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            self.real_plane.0.re + ((pixel.0 as f64) + 0.5) * self.pixel_size.0,
            self.real_plane.0.im + ((pixel.1 as f64) + 0.5) * self.pixel_size.1,
        )
    }

    /// The pixel whose rectangle contains the point.  Points left of or
    /// below the plane are clamped to column or row zero; points past
    /// the right or top edge land outside the grid.
    pub fn point_to_pixel(&self, point: &Complex<f64>) -> Pixel {
        let left = (point.re - self.real_plane.0.re) / self.pixel_size.0;
        let top = (point.im - self.real_plane.0.im) / self.pixel_size.1;
        Pixel(left.floor() as usize, top.floor() as usize)
    }

    /// The row-major offset of a pixel in a buffer the size of the
    /// grid, or None if the pixel isn't on the grid.
    pub fn pixel_to_offset(&self, pixel: &Pixel) -> Option<usize> {
        if pixel.0 >= self.integral_plane.0 || pixel.1 >= self.integral_plane.1 {
            return None;
        }
        Some(pixel.1 * self.integral_plane.0 + pixel.0)
    }

    /// The inverse of `pixel_to_offset`.
    pub fn offset_to_pixel(&self, offset: usize) -> Pixel {
        Pixel(offset % self.integral_plane.0, offset / self.integral_plane.0)
    }
}
