#[macro_use]
extern crate criterion;
extern crate mandelbox;
extern crate num;

use criterion::Criterion;
use mandelbox::{DoubleMandelbox, FieldCursor, FloatMandelbox, PlaneMapper, RealField, SliceRenderer, Viewport};
use num::Complex;

fn evaluate(c: &mut Criterion) {
    let mut cursor = DoubleMandelbox::with_dimension(3).unwrap().cursor();
    c.bench_function("double 3d evaluate", move |b| {
        b.iter(|| cursor.evaluate(&[0.31, -0.72, 0.4]).unwrap())
    });

    let mut cursor = FloatMandelbox::with_dimension(3).unwrap().cursor();
    c.bench_function("single 3d evaluate", move |b| {
        b.iter(|| cursor.evaluate(&[0.31, -0.72, 0.4]).unwrap())
    });
}

fn render(c: &mut Criterion) {
    let plane = PlaneMapper::new(64, 64, Complex::new(-4.0, -4.0), Complex::new(4.0, 4.0)).unwrap();
    let viewport = Viewport::new(plane, vec![0.0, 0.0]).unwrap();
    let renderer = SliceRenderer::new(DoubleMandelbox::with_dimension(2).unwrap(), viewport).unwrap();
    c.bench_function("64x64 slice", move |b| b.iter(|| renderer.render_single().unwrap()));
}

criterion_group!(benches, evaluate, render);
criterion_main!(benches);
