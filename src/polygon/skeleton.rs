//! Interior straight skeleton.
//!
//! The **straight skeleton** is traced by the polygon boundary moving inward
//! at unit speed. Every wavefront edge stays parallel to its polygon edge and
//! every wavefront vertex slides along the bisector of its two edges. The
//! skeleton records where wavefront vertices meet:
//!
//! - an *edge event* happens when a wavefront edge shrinks to zero length
//! - a *split event* happens when a reflex vertex runs into the interior of
//!   another wavefront edge, cutting its loop in two
//!
//! Events are processed in time order over an arena of wavefront vertices
//! linked into loops. All state lives inside one call.
//!
//! A vertex between two collinear edges never takes part in an event. It is
//! left out of the wavefront and joined afterwards: its arc runs along the
//! inward normal of its edge up to the first arc it meets.
//!
//! # Example
//!
//! ```
//! use flatgeom::polygon::{straight_skeleton, Polygon};
//! use flatgeom::Config;
//!
//! let rectangle = Polygon::from_xy(&[0.0, 0.0, 4.0, 0.0, 4.0, 2.0, 0.0, 2.0]);
//!
//! let skeleton = straight_skeleton(&rectangle, &Config::default()).unwrap();
//! // A ridge between (1, 1) and (3, 1), two arcs from each end to the corners.
//! assert_eq!(skeleton.interior_vertex_count(), 2);
//! assert_eq!(skeleton.edges.len(), 5);
//! ```

use super::core::{Meter, Normalized, Polygon};
use crate::config::Config;
use crate::error::{GeomError, Result};
use crate::primitives::{Point2, Vec2};
use num_traits::Float;
use std::collections::BTreeSet;

/// Skeleton as an undirected graph.
///
/// The first [`boundary_count`](Self::boundary_count) vertices are the input
/// polygon vertices in input order; interior nodes follow. Each undirected
/// edge appears once as a `(min, max)` index pair, edges sorted ascending.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkeletonGraph<F> {
    /// Boundary vertices followed by interior nodes
    pub vertices: Vec<Point2<F>>,
    /// Undirected edges as `(min, max)` vertex indices
    pub edges: Vec<(usize, usize)>,
    /// Number of leading vertices copied from the polygon
    pub boundary_count: usize,
}

impl<F: Float> SkeletonGraph<F> {
    /// Number of skeleton nodes strictly inside the polygon.
    pub fn interior_vertex_count(&self) -> usize {
        self.vertices.len() - self.boundary_count
    }

    /// Returns the total length of all skeleton edges.
    pub fn total_length(&self) -> F {
        self.edges.iter().fold(F::zero(), |acc, &(a, b)| {
            acc + self.vertices[a].distance(self.vertices[b])
        })
    }

    /// Returns skeleton edges as line segments.
    pub fn to_segments(&self) -> Vec<(Point2<F>, Point2<F>)> {
        self.edges
            .iter()
            .map(|&(a, b)| (self.vertices[a], self.vertices[b]))
            .collect()
    }

    /// Number of edges incident to vertex `i`.
    pub fn degree(&self, i: usize) -> usize {
        self.edges.iter().filter(|&&(a, b)| a == i || b == i).count()
    }
}

/// Computes the interior straight skeleton of a simple polygon.
///
/// Either orientation is accepted. Collinear vertices each get one arc,
/// perpendicular to their edge. Nodes closer than
/// [`Config::merge_tolerance`] times the bounding-box diagonal are merged.
///
/// # Errors
///
/// - [`GeomError::PreconditionFailure`] for fewer than three vertices or a
///   non-finite coordinate
/// - [`GeomError::InvalidGeometry`] if the polygon is not simple
/// - [`GeomError::NumericDegeneracy`] if the wavefront gets stuck
/// - [`GeomError::BudgetExceeded`] after
///   [`Config::skeleton_event_budget`] events or
///   [`Config::skeleton_step_budget`] inner steps
pub fn straight_skeleton(
    polygon: &Polygon<f64>,
    config: &Config,
) -> Result<SkeletonGraph<f64>> {
    log::debug!("straight_skeleton: {} vertices", polygon.len());
    let norm = Normalized::new(&polygon.vertices, true)?;
    let mut meter = Meter::new(config.skeleton_step_budget);

    let mut wavefront = Wavefront::new(&norm, config)?;
    wavefront.run(config.skeleton_event_budget(norm.len()), &mut meter)?;
    for (c, front) in norm.dropped() {
        wavefront.attach_collinear(&polygon.vertices, c, front, &mut meter)?;
    }
    log::trace!("straight_skeleton: {} steps", meter.steps());

    let mut vertices = polygon.vertices.clone();
    vertices.extend_from_slice(&wavefront.nodes);
    let graph = SkeletonGraph {
        vertices,
        edges: wavefront.arcs.into_iter().collect(),
        boundary_count: polygon.len(),
    };
    log::debug!(
        "straight_skeleton: {} interior nodes, {} edges",
        graph.interior_vertex_count(),
        graph.edges.len()
    );
    Ok(graph)
}

/// Supporting line of a polygon edge.
#[derive(Debug, Clone, Copy)]
struct Front {
    origin: Point2<f64>,
    dir: Vec2<f64>,
    /// Inward unit normal.
    normal: Vec2<f64>,
}

#[derive(Debug, Clone)]
struct WaveVertex {
    /// Position at `born`.
    pos: Point2<f64>,
    born: f64,
    velocity: Vec2<f64>,
    /// Front arriving at this vertex.
    left: usize,
    /// Front leaving this vertex.
    right: usize,
    prev: usize,
    next: usize,
    active: bool,
    /// Output vertex this vertex started from.
    node: usize,
}

#[derive(Debug, Clone, Copy)]
enum Event {
    Edge { v: usize },
    Split { v: usize, e1: usize, at: Point2<f64> },
}

impl Event {
    /// Tie order: edge events first, then by vertex.
    fn rank(&self) -> (u8, usize, usize) {
        match *self {
            Event::Edge { v } => (0, v, 0),
            Event::Split { v, e1, .. } => (1, v, e1),
        }
    }
}

struct Wavefront {
    fronts: Vec<Front>,
    verts: Vec<WaveVertex>,
    /// Input vertex count, collinear ones included.
    boundary: usize,
    /// Interior nodes; output index is `boundary + k`.
    nodes: Vec<Point2<f64>>,
    arcs: BTreeSet<(usize, usize)>,
    time: f64,
    merge_dist: f64,
    param_tol: f64,
    parallel_tol: f64,
}

impl Wavefront {
    fn new(norm: &Normalized, config: &Config) -> Result<Self> {
        let points = &norm.points;
        let n = points.len();

        let mut fronts = Vec::with_capacity(n);
        for i in 0..n {
            let dir = (points[(i + 1) % n] - points[i])
                .normalize()
                .ok_or_else(|| GeomError::degeneracy(format!("edge {} has zero length", i)))?;
            fronts.push(Front {
                origin: points[i],
                dir,
                normal: dir.perpendicular(),
            });
        }

        let (lo, hi) = points.iter().fold(
            (
                Point2::new(f64::INFINITY, f64::INFINITY),
                Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
            ),
            |(lo, hi), p| {
                (
                    Point2::new(lo.x.min(p.x), lo.y.min(p.y)),
                    Point2::new(hi.x.max(p.x), hi.y.max(p.y)),
                )
            },
        );
        let diagonal = lo.distance(hi);

        let mut wavefront = Self {
            fronts,
            verts: Vec::with_capacity(2 * n),
            boundary: norm.input_len,
            nodes: Vec::new(),
            arcs: BTreeSet::new(),
            time: 0.0,
            merge_dist: config.merge_tolerance * diagonal,
            param_tol: config.merge_tolerance.max(f64::EPSILON),
            parallel_tol: config.degenerate_tolerance,
        };
        for i in 0..n {
            let left = (i + n - 1) % n;
            let v = wavefront.spawn(points[i], left, i, norm.source[i])?;
            wavefront.verts[v].prev = left;
            wavefront.verts[v].next = (i + 1) % n;
        }
        Ok(wavefront)
    }

    /// Velocity `w` with `w . n_left = w . n_right = 1`.
    fn velocity(&self, left: usize, right: usize) -> Vec2<f64> {
        let nl = self.fronts[left].normal;
        let nr = self.fronts[right].normal;
        let det = nl.cross(nr);
        if det.abs() <= self.parallel_tol {
            // Collinear fronts move together; opposite fronts have met.
            return if nl.dot(nr) > 0.0 { nl } else { Vec2::zero() };
        }
        Vec2::new((nr.y - nl.y) / det, (nl.x - nr.x) / det)
    }

    fn spawn(
        &mut self,
        pos: Point2<f64>,
        left: usize,
        right: usize,
        node: usize,
    ) -> Result<usize> {
        let velocity = self.velocity(left, right);
        if !(velocity.x.is_finite() && velocity.y.is_finite()) {
            return Err(GeomError::degeneracy("wavefront vertex speed is not finite"));
        }
        let id = self.verts.len();
        self.verts.push(WaveVertex {
            pos,
            born: self.time,
            velocity,
            left,
            right,
            prev: id,
            next: id,
            active: true,
            node,
        });
        Ok(id)
    }

    #[inline]
    fn position(&self, v: usize, t: f64) -> Point2<f64> {
        let vert = &self.verts[v];
        vert.pos + vert.velocity * (t - vert.born)
    }

    /// Output index of the node at `p`, reusing a node within merge distance.
    fn node_at(&mut self, p: Point2<f64>) -> usize {
        if let Some(k) = self.nodes.iter().position(|q| q.distance(p) <= self.merge_dist) {
            return self.boundary + k;
        }
        self.nodes.push(p);
        self.boundary + self.nodes.len() - 1
    }

    fn arc(&mut self, a: usize, b: usize) {
        if a != b {
            self.arcs.insert((a.min(b), a.max(b)));
        }
    }

    fn run(&mut self, budget: usize, meter: &mut Meter) -> Result<()> {
        let mut events = 0usize;
        while self.verts.iter().any(|v| v.active) {
            if events >= budget {
                return Err(GeomError::BudgetExceeded {
                    budget: budget as u64,
                });
            }
            events += 1;

            let (t, event) = self.next_event(meter)?.ok_or_else(|| {
                GeomError::degeneracy(format!("no wavefront event at t = {}", self.time))
            })?;
            log::trace!("skeleton event {:?} at t = {}", event, t);
            self.time = t;
            match event {
                Event::Edge { v } => self.edge_event(v)?,
                Event::Split { v, e1, at } => self.split_event(v, e1, at)?,
            }
        }
        Ok(())
    }

    fn next_event(&self, meter: &mut Meter) -> Result<Option<(f64, Event)>> {
        let mut best: Option<(f64, Event)> = None;
        let mut consider = |t: f64, event: Event| {
            let better = match &best {
                None => true,
                Some((bt, be)) => {
                    t < *bt - self.merge_dist
                        || ((t - *bt).abs() <= self.merge_dist && event.rank() < be.rank())
                }
            };
            if better {
                best = Some((t, event));
            }
        };

        for v in 0..self.verts.len() {
            if !self.verts[v].active {
                continue;
            }
            meter.tick()?;
            if let Some(t) = self.collapse_time(v) {
                consider(t, Event::Edge { v });
            }
            self.split_candidates(v, meter, &mut consider)?;
        }
        Ok(best)
    }

    /// Time at which the edge from `v` to its successor shrinks to zero.
    fn collapse_time(&self, v: usize) -> Option<f64> {
        let vert = &self.verts[v];
        let next = vert.next;
        let dir = self.fronts[vert.right].dir;
        let closing = (vert.velocity - self.verts[next].velocity).dot(dir);
        if !(closing > 0.0) {
            return None;
        }
        let length = (self.position(next, self.time) - self.position(v, self.time)).dot(dir);
        let t = self.time + (length / closing).max(0.0);
        t.is_finite().then_some(t)
    }

    /// Reports where reflex vertex `v` would hit each other edge of its loop.
    fn split_candidates(
        &self,
        v: usize,
        meter: &mut Meter,
        consider: &mut impl FnMut(f64, Event),
    ) -> Result<()> {
        let vert = &self.verts[v];
        if self.fronts[vert.left].dir.cross(self.fronts[vert.right].dir) >= 0.0 {
            return Ok(());
        }
        let p = self.position(v, self.time);

        let mut e1 = vert.next;
        let mut steps = 0;
        while e1 != vert.prev && steps < self.verts.len() {
            steps += 1;
            meter.tick()?;
            let e2 = self.verts[e1].next;
            let front = self.fronts[self.verts[e1].right];
            let approach = 1.0 - vert.velocity.dot(front.normal);
            if approach > self.parallel_tol {
                let gap = (p - front.origin).dot(front.normal) - self.time;
                let dt = gap / approach;
                if dt.is_finite() && dt >= -self.merge_dist {
                    let t = self.time + dt.max(0.0);
                    let at = p + vert.velocity * (t - self.time);
                    let start = self.position(e1, t);
                    let length = (self.position(e2, t) - start).dot(front.dir);
                    if length > 0.0 {
                        let s = (at - start).dot(front.dir) / length;
                        if s >= -self.param_tol && s <= 1.0 + self.param_tol {
                            consider(t, Event::Split { v, e1, at });
                        }
                    }
                }
            }
            e1 = e2;
        }
        Ok(())
    }

    fn edge_event(&mut self, v: usize) -> Result<()> {
        let next = self.verts[v].next;
        let prev = self.verts[v].prev;
        let at = self.position(v, self.time).midpoint(self.position(next, self.time));
        let k = self.node_at(at);
        self.arc(self.verts[v].node, k);
        self.arc(self.verts[next].node, k);
        self.verts[v].active = false;
        self.verts[next].active = false;

        if self.verts[next].next == prev {
            // Triangle: all three edges vanish together.
            self.arc(self.verts[prev].node, k);
            self.verts[prev].active = false;
            return Ok(());
        }

        let after = self.verts[next].next;
        let m = self.spawn(at, self.verts[v].left, self.verts[next].right, k)?;
        self.link(prev, m);
        self.link(m, after);
        Ok(())
    }

    fn split_event(&mut self, v: usize, e1: usize, at: Point2<f64>) -> Result<()> {
        let prev = self.verts[v].prev;
        let next = self.verts[v].next;
        let e2 = self.verts[e1].next;
        let cut = self.verts[e1].right;

        let k = self.node_at(at);
        self.arc(self.verts[v].node, k);
        self.verts[v].active = false;

        let m1 = self.spawn(at, self.verts[v].left, cut, k)?;
        let m2 = self.spawn(at, cut, self.verts[v].right, k)?;
        self.link(prev, m1);
        self.link(m1, e2);
        self.link(e1, m2);
        self.link(m2, next);

        self.close_digon(m1);
        self.close_digon(m2);
        Ok(())
    }

    fn link(&mut self, a: usize, b: usize) {
        self.verts[a].next = b;
        self.verts[b].prev = a;
    }

    /// Output vertex `i`, boundary or interior.
    fn point(&self, boundary: &[Point2<f64>], i: usize) -> Point2<f64> {
        if i < self.boundary {
            boundary[i]
        } else {
            self.nodes[i - self.boundary]
        }
    }

    /// Joins collinear input vertex `c`, lying on `front`, to the first arc
    /// hit by the ray along the front's inward normal. A hit inside an arc
    /// splits it at a new node.
    fn attach_collinear(
        &mut self,
        boundary: &[Point2<f64>],
        c: usize,
        front: usize,
        meter: &mut Meter,
    ) -> Result<()> {
        let p = boundary[c];
        let normal = self.fronts[front].normal;

        let mut hit: Option<(f64, (usize, usize))> = None;
        for &(a, b) in &self.arcs {
            meter.tick()?;
            let start = self.point(boundary, a);
            let along = self.point(boundary, b) - start;
            let det = normal.cross(along);
            if det.abs() <= self.parallel_tol * along.magnitude().max(1.0) {
                continue;
            }
            let offset = start - p;
            let s = offset.cross(along) / det;
            let u = offset.cross(normal) / det;
            if s > self.merge_dist
                && u >= -self.param_tol
                && u <= 1.0 + self.param_tol
                && hit.map_or(true, |(best, _)| s < best - self.merge_dist)
            {
                hit = Some((s, (a, b)));
            }
        }

        let (s, (a, b)) = hit.ok_or_else(|| {
            GeomError::degeneracy(format!("collinear vertex {} meets no arc", c))
        })?;
        let k = self.node_at(p + normal * s);
        if k != a && k != b {
            self.arcs.remove(&(a, b));
            self.arc(a, k);
            self.arc(k, b);
        }
        self.arc(c, k);
        Ok(())
    }

    /// A loop of two vertices is a single arc.
    fn close_digon(&mut self, m: usize) {
        let other = self.verts[m].next;
        if self.verts[m].active && other != m && self.verts[m].prev == other {
            self.arc(self.verts[m].node, self.verts[other].node);
            self.verts[m].active = false;
            self.verts[other].active = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::Containment;
    use approx::assert_relative_eq;

    fn skeleton(coords: &[f64]) -> SkeletonGraph<f64> {
        straight_skeleton(&Polygon::from_xy(coords), &Config::default()).unwrap()
    }

    fn find_node(g: &SkeletonGraph<f64>, x: f64, y: f64) -> Option<usize> {
        (g.boundary_count..g.vertices.len()).find(|&k| {
            let p = g.vertices[k];
            (p.x - x).abs() < 1e-9 && (p.y - y).abs() < 1e-9
        })
    }

    fn has_node(g: &SkeletonGraph<f64>, x: f64, y: f64) -> bool {
        find_node(g, x, y).is_some()
    }

    fn assert_tree(g: &SkeletonGraph<f64>) {
        assert_eq!(g.edges.len() + 1, g.vertices.len());
        for i in 0..g.boundary_count {
            assert_eq!(g.degree(i), 1, "boundary vertex {} should be a leaf", i);
        }
        for &(a, b) in &g.edges {
            assert!(a < b && b < g.vertices.len());
        }
    }

    const L_SHAPE: [f64; 12] = [0.0, 0.0, 2.0, 0.0, 2.0, 1.0, 1.0, 1.0, 1.0, 2.0, 0.0, 2.0];

    #[test]
    fn test_straight_skeleton_triangle() {
        let g = skeleton(&[0.0, 0.0, 4.0, 0.0, 0.0, 3.0]);
        assert_eq!(g.interior_vertex_count(), 1);
        assert_eq!(g.edges, vec![(0, 3), (1, 3), (2, 3)]);
        // Incenter of the 3-4-5 triangle.
        assert!(has_node(&g, 1.0, 1.0));
    }

    #[test]
    fn test_straight_skeleton_square() {
        let g = skeleton(&[0.0, 0.0, 4.0, 0.0, 4.0, 4.0, 0.0, 4.0]);
        assert_eq!(g.interior_vertex_count(), 1);
        assert_eq!(g.edges.len(), 4);
        assert!(has_node(&g, 2.0, 2.0));
        assert_tree(&g);
    }

    #[test]
    fn test_rectangle_ridge() {
        let g = skeleton(&[0.0, 0.0, 4.0, 0.0, 4.0, 2.0, 0.0, 2.0]);
        assert_eq!(g.interior_vertex_count(), 2);
        assert_eq!(g.edges.len(), 5);
        assert!(has_node(&g, 1.0, 1.0));
        assert!(has_node(&g, 3.0, 1.0));
        assert_tree(&g);
        assert_relative_eq!(g.total_length(), 2.0 + 4.0 * 2.0.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn test_l_shape_split() {
        let g = skeleton(&L_SHAPE);
        assert_eq!(g.interior_vertex_count(), 3);
        assert_eq!(g.edges.len(), 8);
        assert!(has_node(&g, 1.5, 0.5));
        assert!(has_node(&g, 0.5, 1.5));
        assert!(has_node(&g, 0.5, 0.5));
        assert_tree(&g);
        // The reflex corner runs to the junction.
        let junction = find_node(&g, 0.5, 0.5).unwrap();
        assert!(g.edges.contains(&(3, junction)));
    }

    #[test]
    fn test_clockwise_input_keeps_input_indices() {
        let cw = Polygon::from_xy(&L_SHAPE).reversed();
        let g = straight_skeleton(&cw, &Config::default()).unwrap();
        assert_eq!(g.vertices[..6], cw.vertices[..]);
        assert_eq!(g.interior_vertex_count(), 3);
        assert_eq!(g.edges.len(), 8);
        assert_tree(&g);
    }

    #[test]
    fn test_collinear_vertex_gets_an_arc() {
        let g = skeleton(&[0.0, 0.0, 2.0, 0.0, 4.0, 0.0, 4.0, 4.0, 0.0, 4.0]);
        assert_eq!(g.interior_vertex_count(), 1);
        assert_eq!(g.edges.len(), 5);
        assert_eq!(g.degree(5), 5);
    }

    #[test]
    fn test_collinear_run_on_one_edge() {
        let g = skeleton(&[0.0, 0.0, 4.0, 0.0, 4.0, 1.0, 3.0, 1.0, 2.0, 1.0, 1.0, 1.0, 0.0, 1.0]);
        assert_eq!(g.interior_vertex_count(), 5);
        assert_eq!(g.edges.len(), 11);
        assert_tree(&g);
        assert!(has_node(&g, 0.5, 0.5));
        assert!(has_node(&g, 3.5, 0.5));
        for (c, x) in [(3, 3.0), (4, 2.0), (5, 1.0)] {
            let foot = find_node(&g, x, 0.5).unwrap();
            assert!(g.edges.contains(&(c, foot)));
            assert_eq!(g.degree(foot), 3);
        }
        assert_relative_eq!(g.total_length(), 3.0 + 1.5 + 4.0 * 0.5.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn test_histogram_with_collinear_floor() {
        let coords = [
            0.0, 0.0, 1.0, 0.0, 2.0, 0.0, 3.0, 0.0, 3.0, 2.0, 2.0, 2.0, 2.0, 1.0, 1.0, 1.0, 1.0,
            2.0, 0.0, 2.0,
        ];
        let g = skeleton(&coords);
        assert_tree(&g);
        assert_eq!(g.interior_vertex_count(), 6);
        for (x, y) in [(0.5, 0.5), (2.5, 0.5), (0.5, 1.5), (2.5, 1.5)] {
            assert!(has_node(&g, x, y));
        }
        assert!(g.edges.contains(&(1, find_node(&g, 1.0, 0.5).unwrap())));
        assert!(g.edges.contains(&(2, find_node(&g, 2.0, 0.5).unwrap())));

        let cw = Polygon::from_xy(&coords).reversed();
        let g = straight_skeleton(&cw, &Config::default()).unwrap();
        assert_tree(&g);
        assert_eq!(g.interior_vertex_count(), 6);
    }

    #[test]
    fn test_step_budget() {
        let config = Config::default().with_skeleton_step_budget(10);
        assert_eq!(
            straight_skeleton(&Polygon::from_xy(&L_SHAPE), &config).unwrap_err(),
            GeomError::BudgetExceeded { budget: 10 }
        );
    }

    #[test]
    fn test_convex_pentagon_is_tree() {
        let g = skeleton(&[0.0, 0.0, 5.0, 0.0, 6.0, 3.0, 3.0, 5.0, 0.0, 3.0]);
        assert_tree(&g);
        assert!(g.interior_vertex_count() >= 1);
        for p in &g.vertices[g.boundary_count..] {
            assert!(Polygon::from_xy(&[0.0, 0.0, 5.0, 0.0, 6.0, 3.0, 3.0, 5.0, 0.0, 3.0])
                .contains(*p)
                == Containment::Inside);
        }
    }

    #[test]
    fn test_reflex_polygons_are_trees() {
        let arrow = skeleton(&[
            0.0, 1.0, 2.0, 1.0, 2.0, 0.0, 4.0, 2.0, 2.0, 4.0, 2.0, 3.0, 0.0, 3.0,
        ]);
        assert_tree(&arrow);
        assert!(has_node(&arrow, 1.0, 2.0));

        let comb = skeleton(&[
            0.0, 0.0, 3.0, 0.0, 3.0, 2.0, 2.0, 2.0, 2.0, 1.0, 1.0, 1.0, 1.0, 2.0, 0.0, 2.0,
        ]);
        assert_tree(&comb);
        assert_eq!(comb.interior_vertex_count(), 4);
        for (x, y) in [(0.5, 0.5), (2.5, 0.5), (0.5, 1.5), (2.5, 1.5)] {
            assert!(has_node(&comb, x, y));
        }
    }

    #[test]
    fn test_to_segments() {
        let g = skeleton(&[0.0, 0.0, 4.0, 0.0, 4.0, 4.0, 0.0, 4.0]);
        let segments = g.to_segments();
        assert_eq!(segments.len(), 4);
        for (a, b) in segments {
            assert_eq!(b, Point2::new(2.0, 2.0));
            assert_relative_eq!(a.distance(b), 8.0.sqrt(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(skeleton(&L_SHAPE), skeleton(&L_SHAPE));
    }

    #[test]
    fn test_rejects_bad_input() {
        let bowtie = Polygon::from_xy(&[0.0, 0.0, 2.0, 2.0, 2.0, 0.0, 0.0, 2.0]);
        assert_eq!(
            straight_skeleton(&bowtie, &Config::default()).unwrap_err(),
            GeomError::InvalidGeometry
        );
        let segment = Polygon::from_xy(&[0.0, 0.0, 1.0, 0.0]);
        assert!(matches!(
            straight_skeleton(&segment, &Config::default()),
            Err(GeomError::PreconditionFailure { .. })
        ));
    }
}
