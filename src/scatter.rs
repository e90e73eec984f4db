// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Sparse sampling: rather than evaluating every pixel, pick some at
//! random and evaluate only those.  Good for a quick look at a
//! high-iteration field before committing to a full render.

use crate::errors::MandelboxError;
use crate::field::{Real, RealField};
use crate::render::SliceRenderer;
use log::info;
use rand::Rng;
use std::time::Instant;

/// Evaluate the renderer's field at `count` uniformly chosen pixels.
/// The same pixel may be chosen more than once.  Pixels that were
/// never chosen come back as None.
pub fn scatter<T, F, R>(
    renderer: &SliceRenderer<T, F>,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Option<T>>, MandelboxError>
where
    T: Real,
    F: RealField<T>,
    R: Rng + ?Sized,
{
    let started = Instant::now();
    let plane = &renderer.viewport().plane;
    let mut buffer: Vec<Option<T>> = vec![None; plane.len()];
    let mut cursor = renderer.cursor()?;
    for _ in 0..count {
        let offset = rng.gen_range(0, plane.len());
        let pixel = plane.offset_to_pixel(offset);
        buffer[offset] = Some(renderer.value_at(&mut cursor, &pixel));
    }
    info!(
        "Scattered {} samples over {} pixels in {:?}",
        count,
        plane.len(),
        started.elapsed()
    );
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mandelbox::DoubleMandelbox;
    use crate::planes::PlaneMapper;
    use crate::render::Viewport;
    use num::Complex;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn renderer() -> SliceRenderer<f64, DoubleMandelbox> {
        let plane =
            PlaneMapper::new(20, 10, Complex::new(-2.0, -2.0), Complex::new(2.0, 2.0)).unwrap();
        let viewport = Viewport::new(plane, vec![0.0, 0.0]).unwrap();
        SliceRenderer::new(DoubleMandelbox::with_dimension(2).unwrap(), viewport).unwrap()
    }

    #[test]
    fn no_samples_leaves_the_plane_empty() {
        let mut rng = StdRng::seed_from_u64(7);
        let buffer = scatter(&renderer(), 0, &mut rng).unwrap();
        assert_eq!(buffer.len(), 200);
        assert!(buffer.iter().all(Option::is_none));
    }

    #[test]
    fn sampled_pixels_match_a_full_render() {
        let renderer = renderer();
        let full = renderer.render_single().unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let sparse = scatter(&renderer, 150, &mut rng).unwrap();

        let sampled = sparse.iter().filter(|v| v.is_some()).count();
        assert!(sampled > 0 && sampled <= 150);
        for (value, expected) in sparse.iter().zip(full.iter()) {
            if let Some(value) = value {
                assert_eq!(value, expected);
            }
        }
    }
}
