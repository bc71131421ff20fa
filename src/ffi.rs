//! C entry points.
//!
//! Every function validates its pointers and counts, never writes past a
//! declared capacity and never unwinds across the boundary. Failures are
//! reported as zero results (or no write at all for [`ComputeOBB`]); the
//! reason is logged at debug level.
//!
//! Results that do not fit are truncated. The partition and skeleton entry
//! points take an optional out-parameter receiving the size of the full
//! result, so a caller detects truncation as `written < total`.
#![allow(non_snake_case)]

use crate::config::Config;
use crate::error::GeomError;
use crate::flat;
use crate::polygon::Strategy;
use std::os::raw::c_int;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::slice;

/// Input slice of `count * arity` doubles, or `None` for null or a negative
/// count.
unsafe fn input<'a>(ptr: *const f64, count: c_int, arity: usize) -> Option<&'a [f64]> {
    let count = usize::try_from(count).ok()?;
    if ptr.is_null() {
        return None;
    }
    Some(slice::from_raw_parts(ptr, count.checked_mul(arity)?))
}

unsafe fn output<'a, T>(ptr: *mut T, len: c_int, arity: usize) -> Option<&'a mut [T]> {
    let len = usize::try_from(len).ok()?;
    if ptr.is_null() {
        return None;
    }
    Some(slice::from_raw_parts_mut(ptr, len.checked_mul(arity)?))
}

/// Runs `f`, mapping errors and panics to `fallback`.
fn guarded<T>(name: &str, fallback: T, f: impl FnOnce() -> Result<T, GeomError>) -> T {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => value,
        Ok(Err(e)) => {
            log::debug!("{}: {}", name, e);
            fallback
        }
        Err(_) => {
            log::error!("{}: panicked", name);
            fallback
        }
    }
}

fn count_of(n: usize) -> c_int {
    c_int::try_from(n).unwrap_or(c_int::MAX)
}

/// Stores `value` through `ptr` unless it is null.
unsafe fn report(ptr: *mut c_int, value: c_int) {
    if !ptr.is_null() {
        *ptr = value;
    }
}

/// Computes an oriented bounding box of `count` points.
///
/// Writes 8 corners (24 doubles) to `obbCorners`; corner `k` lies at the
/// positive extent of box axis `i` when bit `i` of `k` is set. Nothing is
/// written on failure.
///
/// # Safety
/// - `points` must be valid for reading `count * 3` doubles
/// - `obbCorners` must be valid for writing 24 doubles
#[no_mangle]
pub unsafe extern "C" fn ComputeOBB(points: *const f64, count: c_int, obbCorners: *mut f64) {
    let (Some(points), Some(out)) = (input(points, count, 3), output(obbCorners, 8, 3)) else {
        log::debug!("ComputeOBB: null buffer or negative count");
        return;
    };
    if let Some(corners) = guarded("ComputeOBB", None, || flat::obb_corners(points).map(Some)) {
        out.copy_from_slice(&corners);
    }
}

unsafe fn partition_ffi(
    name: &str,
    strategy: Strategy,
    inputXY: *const f64,
    count: c_int,
    outputXY: *mut f64,
    maxOutputPoints: c_int,
    polygonSizes: *mut c_int,
    maxPolygons: c_int,
    totalPolygons: *mut c_int,
) -> c_int {
    let buffers = (
        input(inputXY, count, 2),
        output(outputXY, maxOutputPoints, 2),
        output(polygonSizes, maxPolygons, 1),
    );
    let (Some(coords), Some(out_xy), Some(sizes)) = buffers else {
        log::debug!("{}: null buffer or negative count", name);
        report(totalPolygons, 0);
        return 0;
    };
    let (written, total) = guarded(name, (0, 0), || {
        let config = Config::default();
        let outcome = flat::partition_into(coords, strategy, &config, out_xy, sizes)?;
        Ok((count_of(outcome.pieces_written), count_of(outcome.pieces_total)))
    });
    report(totalPolygons, total);
    written
}

/// Approximate convex partition (triangulation merged by Hertel-Mehlhorn).
///
/// Writes whole pieces in order: piece `k` has `polygonSizes[k]` points
/// stored consecutively in `outputXY`. Writing stops at the first piece
/// that does not fit in `maxPolygons` or `maxOutputPoints`. Returns the
/// number of pieces written. If `totalPolygons` is not null it receives
/// the number of pieces in the full partition (0 on failure); a total
/// above the return value means the output was truncated.
///
/// # Safety
/// - `inputXY` must be valid for reading `count * 2` doubles
/// - `outputXY` must be valid for writing `maxOutputPoints * 2` doubles
/// - `polygonSizes` must be valid for writing `maxPolygons` ints
/// - `totalPolygons` must be null or valid for writing one int
#[no_mangle]
pub unsafe extern "C" fn PartitionPolygonApprox(
    inputXY: *const f64,
    count: c_int,
    outputXY: *mut f64,
    maxOutputPoints: c_int,
    polygonSizes: *mut c_int,
    maxPolygons: c_int,
    totalPolygons: *mut c_int,
) -> c_int {
    partition_ffi(
        "PartitionPolygonApprox",
        Strategy::Approximate,
        inputXY,
        count,
        outputXY,
        maxOutputPoints,
        polygonSizes,
        maxPolygons,
        totalPolygons,
    )
}

/// Minimum convex partition. Same buffer contract as
/// [`PartitionPolygonApprox`].
///
/// # Safety
/// See [`PartitionPolygonApprox`].
#[no_mangle]
pub unsafe extern "C" fn PartitionPolygonOptimal(
    inputXY: *const f64,
    count: c_int,
    outputXY: *mut f64,
    maxOutputPoints: c_int,
    polygonSizes: *mut c_int,
    maxPolygons: c_int,
    totalPolygons: *mut c_int,
) -> c_int {
    partition_ffi(
        "PartitionPolygonOptimal",
        Strategy::Optimal,
        inputXY,
        count,
        outputXY,
        maxOutputPoints,
        polygonSizes,
        maxPolygons,
        totalPolygons,
    )
}

/// Convex partition through y-monotone pieces. Same buffer contract as
/// [`PartitionPolygonApprox`].
///
/// # Safety
/// See [`PartitionPolygonApprox`].
#[no_mangle]
pub unsafe extern "C" fn PartitionPolygonMonotone(
    inputXY: *const f64,
    count: c_int,
    outputXY: *mut f64,
    maxOutputPoints: c_int,
    polygonSizes: *mut c_int,
    maxPolygons: c_int,
    totalPolygons: *mut c_int,
) -> c_int {
    partition_ffi(
        "PartitionPolygonMonotone",
        Strategy::Monotone,
        inputXY,
        count,
        outputXY,
        maxOutputPoints,
        polygonSizes,
        maxPolygons,
        totalPolygons,
    )
}

/// Computes the interior straight skeleton.
///
/// Vertices are written to `outputXY`: the `count` polygon vertices in input
/// order, then interior nodes. Edges are index pairs in `edgePairs`, each
/// undirected edge once as `(min, max)`; an edge is written only if both
/// its vertices were. If `vertexCount` is not null it receives the number
/// of vertices written. If `totalEdges` is not null it receives the number
/// of edges in the full skeleton (0 on failure); a total above the return
/// value means the output was truncated. Returns the number of edges
/// written.
///
/// # Safety
/// - `inputXY` must be valid for reading `count * 2` doubles
/// - `outputXY` must be valid for writing `maxVertices * 2` doubles
/// - `edgePairs` must be valid for writing `maxEdges * 2` ints
/// - `vertexCount` and `totalEdges` must each be null or valid for writing
///   one int
#[no_mangle]
pub unsafe extern "C" fn ComputeSkeleton(
    inputXY: *const f64,
    count: c_int,
    outputXY: *mut f64,
    maxVertices: c_int,
    edgePairs: *mut c_int,
    maxEdges: c_int,
    vertexCount: *mut c_int,
    totalEdges: *mut c_int,
) -> c_int {
    let buffers = (
        input(inputXY, count, 2),
        output(outputXY, maxVertices, 2),
        output(edgePairs, maxEdges, 2),
    );
    let (Some(coords), Some(out_xy), Some(edges)) = buffers else {
        log::debug!("ComputeSkeleton: null buffer or negative count");
        report(vertexCount, 0);
        report(totalEdges, 0);
        return 0;
    };
    let (vertices, written, total) = guarded("ComputeSkeleton", (0, 0, 0), || {
        let outcome = flat::skeleton_into(coords, &Config::default(), out_xy, edges)?;
        Ok((
            count_of(outcome.vertices_written),
            count_of(outcome.edges_written),
            count_of(outcome.edges_total),
        ))
    });
    report(vertexCount, vertices);
    report(totalEdges, total);
    written
}
