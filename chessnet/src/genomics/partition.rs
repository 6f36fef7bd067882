//! Geometric partitioning of a genome's (layer, neuron) grid.
//!
//! A [`Boundary`] is made of four points lying on one line through
//! the grid. Reading the grid layer-major, the points split it into
//! five [`Band`]s, which alternate between the two parents of a
//! crossover.

use crate::genomics::Topology;

use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

use std::fmt;
use std::num::NonZeroUsize;

/// Number of points making up a crossover boundary.
pub const BOUNDARY_POINTS: usize = 4;

/// A point of a crossover boundary. Cells of layer
/// `layer` below neuron `neuron` lie before the point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryPoint {
    pub layer: usize,
    pub neuron: i64,
}

/// One of the parents in a crossover.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Parent {
    First,
    Second,
}

/// A region of the (layer, neuron) grid delimited by a [`Boundary`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Band {
    /// Before the first point.
    A,
    /// Between the first and second points.
    B,
    /// Between the second and third points.
    C,
    /// Between the third and fourth points.
    D,
    /// Everything else.
    E,
}

impl Band {
    /// All bands, in grid order.
    pub const ALL: [Band; 5] = [Band::A, Band::B, Band::C, Band::D, Band::E];

    /// Returns the parent whose neurons are inherited in this band.
    pub fn parent(self) -> Parent {
        match self {
            Band::A | Band::C | Band::E => Parent::First,
            Band::B | Band::D => Parent::Second,
        }
    }
}

/// A four-point piecewise boundary over a genome's
/// (layer, neuron) grid, sorted by layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boundary {
    points: [BoundaryPoint; BOUNDARY_POINTS],
}

impl Boundary {
    /// Creates a boundary from explicit points.
    ///
    /// Points should be sorted by ascending layer,
    /// as a randomly drawn boundary is.
    ///
    /// # Examples
    /// ```
    /// use chessnet::genomics::{Band, Boundary};
    ///
    /// let boundary = Boundary::new([(0, 1), (2, 1), (3, 1), (5, 2)]);
    /// assert_eq!(boundary.band(0, 0), Band::A);
    /// assert_eq!(boundary.band(1, 7), Band::B);
    /// assert_eq!(boundary.band(4, 0), Band::D);
    /// assert_eq!(boundary.band(5, 3), Band::E);
    /// ```
    pub fn new(points: [(usize, i64); BOUNDARY_POINTS]) -> Boundary {
        debug_assert!(points.windows(2).all(|w| w[0].0 <= w[1].0));
        Boundary {
            points: points.map(|(layer, neuron)| BoundaryPoint { layer, neuron }),
        }
    }

    /// Draws a random boundary for grids of the given topology.
    ///
    /// Four distinct layers are sampled and sorted. A vertical
    /// offset is drawn from `[0, neurons_per_layer / offset_divisor]`
    /// for the first point, and the other three points are placed
    /// on the line through the origin of the first segment.
    ///
    /// Networks with fewer than four weight layers use every layer,
    /// and the missing points are placed one layer past the grid,
    /// where they match no cell.
    pub fn random<R: Rng + ?Sized>(
        topology: &Topology,
        offset_divisor: NonZeroUsize,
        rng: &mut R,
    ) -> Boundary {
        let layers = topology.weight_layer_count();
        let mut xs = index::sample(rng, layers, layers.min(BOUNDARY_POINTS)).into_vec();
        xs.sort_unstable();
        xs.resize(BOUNDARY_POINTS, layers);

        let max_offset = topology.neurons_per_layer().get() / offset_divisor.get();
        let y0 = rng.gen_range(0..=max_offset) as i64;

        let slope = y0 as f64 / (xs[1] - xs[0]) as f64;
        let intercept = y0 - (slope * xs[0] as f64).floor() as i64;
        let extend = |x: usize| (slope * x as f64).floor() as i64 + intercept;

        Boundary::new([
            (xs[0], y0),
            (xs[1], extend(xs[1])),
            (xs[2], extend(xs[2])),
            (xs[3], extend(xs[3])),
        ])
    }

    pub fn points(&self) -> &[BoundaryPoint; BOUNDARY_POINTS] {
        &self.points
    }

    /// Classifies a grid cell into its band.
    pub fn band(&self, layer: usize, neuron: usize) -> Band {
        let [p0, p1, p2, p3] = self.points;
        let neuron = neuron as i64;
        let before = |p: BoundaryPoint| layer == p.layer && neuron < p.neuron;
        let between = |lo: BoundaryPoint, hi: BoundaryPoint| lo.layer < layer && layer < hi.layer;

        if layer < p0.layer || before(p0) {
            Band::A
        } else if between(p0, p1) || before(p1) {
            Band::B
        } else if between(p1, p2) || before(p2) {
            Band::C
        } else if between(p2, p3) || before(p3) {
            Band::D
        } else {
            Band::E
        }
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let points: Vec<String> = self
            .points
            .iter()
            .map(|p| format!("({}, {})", p.layer, p.neuron))
            .collect();
        write!(f, "{}", points.join(" -> "))
    }
}
