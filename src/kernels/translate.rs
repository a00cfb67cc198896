//! Elementwise vertex translation, scalar and parallel.

use rayon::prelude::*;

use crate::batch::PolygonBatch;
use crate::point::Point;

/// Translates every vertex of a flat vertex slice in place by `delta`.
pub fn translate_scalar(vertices: &mut [Point], delta: Point) {
    for v in vertices {
        *v = *v + delta;
    }
}

/// Identical result to [`translate_scalar`], splitting the work across
/// threads. Only worthwhile once a polygon has enough vertices to amortize
/// the fan-out; [`crate::dispatch`] decides when that is.
pub fn translate_parallel(vertices: &mut [Point], delta: Point) {
    vertices.par_iter_mut().for_each(|v| *v = *v + delta);
}

/// Translates every member of a batch by its own `delta`, in place,
/// single-threaded.
pub fn translate_batch_scalar(batch: &mut PolygonBatch, deltas: &[Point]) {
    for member in 0..batch.len() {
        batch.view(member).translate_in_place(deltas[member]);
    }
}

/// Translates every member of a batch by its own `delta`. The additions
/// are parallelized across members; since a batch's members never share
/// storage, applying the results back is a cheap sequential copy.
pub fn translate_batch_parallel(batch: &mut PolygonBatch, deltas: &[Point]) {
    let translated: Vec<Vec<Point>> = (0..batch.len())
        .into_par_iter()
        .map(|member| {
            batch
                .member_slice(member)
                .iter()
                .map(|&v| v + deltas[member])
                .collect()
        })
        .collect();
    for (member, vertices) in translated.into_iter().enumerate() {
        let mut view = batch.view(member);
        for (i, v) in vertices.into_iter().enumerate() {
            view.set(i, v);
        }
    }
}
