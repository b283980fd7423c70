//! Closed polygonal contours describing the environment boundary and the
//! obstacles within it
//!

use bevy::math::Vec2;

use crate::error::{ConfigurationError, PolygonRole};

/// Relative distance within which a point is treated as lying on an edge
const EDGE_TOLERANCE: f32 = 1e-5;

/// A closed polygon defined by an ordered sequence of points. The contour is
/// implicitly closed, the last point connects back to the first
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Contour(Vec<Vec2>);

impl Contour {
	/// Create a new instance of [Contour]
	pub fn new(points: Vec<Vec2>) -> Self {
		Contour(points)
	}
	/// Create a contour from `(x, y)` pairs
	pub fn from_xy(points: &[(f32, f32)]) -> Self {
		Contour(points.iter().map(|(x, y)| Vec2::new(*x, *y)).collect())
	}
	/// Create an axis-aligned rectangle spanning `min` to `max`
	pub fn rectangle(min: Vec2, max: Vec2) -> Self {
		Contour(vec![
			min,
			Vec2::new(max.x, min.y),
			max,
			Vec2::new(min.x, max.y),
		])
	}
	/// Get the vertices
	pub fn get_points(&self) -> &[Vec2] {
		&self.0
	}
	/// Number of vertices
	pub fn len(&self) -> usize {
		self.0.len()
	}
	/// Whether the contour has no vertices
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
	/// A contour needs at least three vertices to enclose any area
	pub fn validate(&self, role: PolygonRole) -> Result<(), ConfigurationError> {
		if self.0.len() < 3 {
			return Err(ConfigurationError::DegeneratePolygon {
				role,
				vertices: self.0.len(),
			});
		}
		Ok(())
	}
	/// Iterate over each `(start, end)` edge, including the closing edge from
	/// the last vertex back to the first
	pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
		let count = self.0.len();
		(0..count).map(move |i| (self.0[i], self.0[(i + 1) % count]))
	}
	/// Test whether a point is inside the contour with the even-odd ray
	/// crossing rule.
	///
	/// A horizontal ray is cast towards `+x` and every edge it crosses toggles
	/// the result. Edges are treated as half-open in `y` so a vertex touched by
	/// the ray is never counted twice. The consequence for points lying exactly
	/// on the contour is that left and bottom edges count as inside while
	/// right and top edges count as outside, this holds for classification,
	/// validation and seeding alike.
	///
	/// A contour with fewer than three vertices has no interior and is
	/// reported as a [ConfigurationError] rather than silently answering `false`
	pub fn contains_point(&self, point: Vec2) -> Result<bool, ConfigurationError> {
		if self.0.len() < 3 {
			return Err(ConfigurationError::DegeneratePolygon {
				role: PolygonRole::Standalone,
				vertices: self.0.len(),
			});
		}
		Ok(self.contains_point_unchecked(point))
	}
	/// Ray crossing test for a contour already known to have 3 or more vertices
	pub(crate) fn contains_point_unchecked(&self, point: Vec2) -> bool {
		let mut inside = false;
		let mut j = self.0.len() - 1;
		for i in 0..self.0.len() {
			let pi = self.0[i];
			let pj = self.0[j];
			if (pi.y > point.y) != (pj.y > point.y) {
				let x_crossing = (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x;
				if point.x < x_crossing {
					inside = !inside;
				}
			}
			j = i;
		}
		inside
	}
	/// Whether a point lies on one of the edges, within a small tolerance
	/// scaled by the edge length
	pub fn is_on_edge(&self, point: Vec2) -> bool {
		self.edges().any(|(start, end)| {
			let delta = end - start;
			let length_sq = delta.length_squared();
			if length_sq == 0.0 {
				return start.distance(point) <= EDGE_TOLERANCE;
			}
			let t = ((point - start).dot(delta) / length_sq).clamp(0.0, 1.0);
			let closest = start + delta * t;
			closest.distance(point) <= EDGE_TOLERANCE * length_sq.sqrt().max(1.0)
		})
	}
	/// Walk every edge and produce points spaced no further than `step` apart,
	/// both ends of each edge are included
	pub fn sample_edges(&self, step: f32) -> Vec<Vec2> {
		let mut samples = Vec::new();
		for (start, end) in self.edges() {
			let length = start.distance(end);
			let divisions = (length / step).ceil().max(1.0) as usize;
			let delta = end - start;
			for k in 0..divisions {
				let t = k as f32 / divisions as f32;
				// an axis the edge does not move along stays exact
				samples.push(start + delta * t);
			}
			samples.push(end);
		}
		samples
	}
}
