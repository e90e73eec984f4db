// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turns distance estimates into an 8-bit grayscale image.  Small
//! distances are close to the surface and come out bright; the
//! largest finite distance in the buffer comes out black, as does
//! anything infinite or NaN.

use crate::field::Real;
use failure::Error;
use image::pnm::{PNMEncoder, PNMSubtype, SampleEncoding};
use image::ColorType;
use num::{clamp, ToPrimitive};
use std::fs::File;
use std::path::Path;

fn brightest<'a, T: Real, I: Iterator<Item = &'a T>>(values: I) -> f64 {
    values
        .filter(|v| v.is_finite())
        .filter_map(|v| v.to_f64())
        .fold(0.0, f64::max)
}

fn gray<T: Real>(value: T, max: f64) -> u8 {
    match value.to_f64() {
        Some(d) if d.is_finite() => {
            if max == 0.0 {
                return 255;
            }
            255 - clamp(255.0 * d.abs() / max, 0.0, 255.0) as u8
        }
        _ => 0,
    }
}

/// Shade a fully rendered buffer.
pub fn shade<T: Real>(distances: &[T]) -> Vec<u8> {
    let max = brightest(distances.iter());
    distances.iter().map(|&d| gray(d, max)).collect()
}

/// Shade a scattered buffer.  Pixels never sampled are black.
pub fn shade_sparse<T: Real>(distances: &[Option<T>]) -> Vec<u8> {
    let max = brightest(distances.iter().filter_map(Option::as_ref));
    distances
        .iter()
        .map(|d| match d {
            Some(d) => gray(*d, max),
            None => 0,
        })
        .collect()
}

/// Write an 8-bit grayscale buffer as a binary PGM.
pub fn write_image<P: AsRef<Path>>(
    outfile: P,
    pixels: &[u8],
    bounds: (usize, usize),
) -> Result<(), Error> {
    let output = File::create(outfile.as_ref())?;
    let mut encoder =
        PNMEncoder::new(output).with_subtype(PNMSubtype::Graymap(SampleEncoding::Binary));
    encoder.encode(pixels, bounds.0 as u32, bounds.1 as u32, ColorType::Gray(8))?;
    Ok(())
}
