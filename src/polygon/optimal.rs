//! Minimum convex partition without Steiner points.
//!
//! Dynamic program over sub-polygons `P(i, j)` (vertices `i..=j` closed by
//! the chord `i-j`). The piece that contains the chord is a convex chain
//! `i = v0 < v1 < ... < vk = j` whose links are polygon edges or valid
//! diagonals, so
//!
//! ```text
//! f(i, j) = 1 + min over chains of  sum f(v_t, v_t+1)
//! ```
//!
//! A piece vertex that is convex in the polygon stays convex in the piece,
//! so turns are only checked at reflex vertices. Links are restricted to
//! diagonals with a reflex endpoint: any other diagonal could be removed
//! from a partition without losing convexity.

use super::core::Meter;
use crate::error::{GeomError, Result};
use crate::kernel::{segments_intersect, turn, Turn};
use crate::primitives::Point2;
use std::collections::HashMap;

const UNREACHED: u32 = u32::MAX;

/// O'Rourke's in-cone test: does the segment `a-b` leave `a` into the
/// polygon interior?
fn in_cone(points: &[Point2<f64>], a: usize, b: usize) -> bool {
    let n = points.len();
    let (pa, pb) = (points[a], points[b]);
    let a0 = points[(a + n - 1) % n];
    let a1 = points[(a + 1) % n];
    if !turn(pa, a1, a0).is_right() {
        turn(pa, pb, a0) == Turn::Left && turn(pb, pa, a1) == Turn::Left
    } else {
        !(!turn(pa, pb, a1).is_right() && !turn(pb, pa, a0).is_right())
    }
}

/// Whether `i-j` is a diagonal of the counter-clockwise simple polygon.
pub(crate) fn is_valid_diagonal(points: &[Point2<f64>], i: usize, j: usize) -> bool {
    let n = points.len();
    if i == j || (i + 1) % n == j || (j + 1) % n == i {
        return false;
    }
    if !in_cone(points, i, j) || !in_cone(points, j, i) {
        return false;
    }
    (0..n).all(|k| {
        let k1 = (k + 1) % n;
        k == i || k == j || k1 == i || k1 == j
            || !segments_intersect(points[i], points[j], points[k], points[k1])
    })
}

struct Solver<'a> {
    points: &'a [Point2<f64>],
    n: usize,
    reflex: Vec<bool>,
    usable: Vec<bool>,
    /// `f(i, j)` for every usable chord.
    cost: Vec<u32>,
    /// Chain of the piece on each solved chord.
    chains: HashMap<(usize, usize), Vec<usize>>,
    /// Per pass: cheapest chain ending with the link `a-b`, and the vertex
    /// before `a` on it.
    best: Vec<u32>,
    back: Vec<usize>,
    meter: Meter,
}

impl<'a> Solver<'a> {
    fn new(points: &'a [Point2<f64>], budget: u64) -> Self {
        let n = points.len();
        let reflex: Vec<bool> = (0..n)
            .map(|i| turn(points[(i + n - 1) % n], points[i], points[(i + 1) % n]).is_right())
            .collect();

        let mut usable = vec![false; n * n];
        let mut cost = vec![UNREACHED; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let edge = j == i + 1 || (i == 0 && j == n - 1);
                usable[i * n + j] =
                    edge || ((reflex[i] || reflex[j]) && is_valid_diagonal(points, i, j));
            }
            if i + 1 < n {
                cost[i * n + i + 1] = 0;
            }
        }

        Self {
            points,
            n,
            reflex,
            usable,
            cost,
            chains: HashMap::new(),
            best: vec![UNREACHED; n * n],
            back: vec![usize::MAX; n * n],
            meter: Meter::new(budget),
        }
    }

    #[inline]
    fn at(&self, a: usize, b: usize) -> usize {
        a * self.n + b
    }

    fn turn_at(&self, prev: usize, v: usize, next: usize) -> Turn {
        turn(self.points[prev], self.points[v], self.points[next])
    }

    /// Extends chains from `i` over increasing end vertices. With `first`,
    /// only chains whose second vertex is `first` are considered, which lets
    /// the closing turn at a reflex `i` be checked.
    fn chain_pass(&mut self, i: usize, first: Option<usize>) -> Result<()> {
        let n = self.n;
        for a in i..n {
            for b in (a + 1)..n {
                let k = self.at(a, b);
                self.best[k] = UNREACHED;
            }
        }

        for b in (i + 1)..n {
            if b >= i + 2 && self.usable[self.at(i, b)] {
                self.close(i, b, first)?;
            }

            let opens = match first {
                None => true,
                Some(v1) => b == v1,
            };
            let ib = self.at(i, b);
            if opens && self.usable[ib] && self.cost[ib] != UNREACHED {
                self.best[ib] = self.cost[ib];
                self.back[ib] = i;
            }

            for a in i..b {
                let chain_cost = self.best[self.at(a, b)];
                if chain_cost == UNREACHED {
                    continue;
                }
                for c in (b + 1)..n {
                    let bc = self.at(b, c);
                    if !self.usable[bc] || self.cost[bc] == UNREACHED {
                        continue;
                    }
                    self.meter.tick()?;
                    if self.reflex[b] && self.turn_at(a, b, c) == Turn::Right {
                        continue;
                    }
                    let total = chain_cost + self.cost[bc];
                    if total < self.best[bc] {
                        self.best[bc] = total;
                        self.back[bc] = a;
                    }
                }
            }
        }
        Ok(())
    }

    /// Closes chains ending at `j` into pieces on the chord `i-j`.
    fn close(&mut self, i: usize, j: usize, first: Option<usize>) -> Result<()> {
        let ij = self.at(i, j);
        for a in (i + 1)..j {
            let chain_cost = self.best[self.at(a, j)];
            if chain_cost == UNREACHED {
                continue;
            }
            self.meter.tick()?;
            if self.reflex[j] && self.turn_at(a, j, i) == Turn::Right {
                continue;
            }
            if let Some(v1) = first {
                if self.turn_at(j, i, v1) == Turn::Right {
                    continue;
                }
            }
            if chain_cost + 1 < self.cost[ij] {
                self.cost[ij] = chain_cost + 1;
                let chain = self.trace(i, a, j);
                self.chains.insert((i, j), chain);
            }
        }
        Ok(())
    }

    fn trace(&self, i: usize, a: usize, j: usize) -> Vec<usize> {
        let mut chain = vec![j];
        let (mut x, mut y) = (a, j);
        loop {
            chain.push(x);
            if x == i {
                break;
            }
            let prev = self.back[self.at(x, y)];
            y = x;
            x = prev;
        }
        chain.reverse();
        chain
    }

    fn solve(&mut self) -> Result<()> {
        for i in (0..self.n.saturating_sub(1)).rev() {
            if self.reflex[i] {
                for v1 in (i + 1)..self.n {
                    let k = self.at(i, v1);
                    if self.usable[k] && self.cost[k] != UNREACHED {
                        self.chain_pass(i, Some(v1))?;
                    }
                }
            } else {
                self.chain_pass(i, None)?;
            }
        }
        Ok(())
    }

    fn diagonals(&self) -> Result<Vec<(usize, usize)>> {
        let mut diagonals = Vec::new();
        let mut pending = vec![(0, self.n - 1)];
        while let Some((i, j)) = pending.pop() {
            let chain = self.chains.get(&(i, j)).ok_or_else(|| {
                GeomError::degeneracy(format!("no convex piece on chord {}-{}", i, j))
            })?;
            for w in chain.windows(2) {
                let (a, b) = (w[0], w[1]);
                if b > a + 1 {
                    diagonals.push((a, b));
                    pending.push((a, b));
                }
            }
        }
        Ok(diagonals)
    }
}

/// Diagonals of a minimum convex partition of a counter-clockwise simple
/// polygon without collinear vertices.
///
/// Fails with [`GeomError::BudgetExceeded`] once `budget` inner steps are
/// spent.
pub(crate) fn optimal_diagonals(
    points: &[Point2<f64>],
    budget: u64,
) -> Result<Vec<(usize, usize)>> {
    let mut solver = Solver::new(points, budget);
    if !solver.reflex.iter().any(|&r| r) {
        return Ok(Vec::new());
    }
    solver.solve()?;
    let diagonals = solver.diagonals()?;
    log::trace!(
        "optimal partition: {} pieces after {} steps",
        diagonals.len() + 1,
        solver.meter.steps()
    );
    Ok(diagonals)
}
