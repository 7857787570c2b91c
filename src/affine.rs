//! A small builder for 2D homogeneous transformations.
//!
//! Points are row vectors, `p' = p * M`. Every builder call right-multiplies the
//! accumulated matrix, so the first call is the first one applied to a point.

use std::f64::consts::FRAC_PI_2;

type Matrix = [[f64; 3]; 3];

const IDENTITY: Matrix = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transformation {
    m: Matrix,
}

impl Default for Transformation {
    fn default() -> Self {
        Self { m: IDENTITY }
    }
}

impl Transformation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) -> &mut Self {
        self.m = IDENTITY;
        self
    }

    pub fn translate(&mut self, dx: f64, dy: f64) -> &mut Self {
        self.then([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [dx, dy, 1.0]])
    }

    pub fn scale(&mut self, sx: f64, sy: f64) -> &mut Self {
        self.then([[sx, 0.0, 0.0], [0.0, sy, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Mirrors across the x axis: `y -> -y`.
    pub fn reflect_x(&mut self) -> &mut Self {
        self.scale(1.0, -1.0)
    }

    /// Mirrors across the y axis: `x -> -x`.
    pub fn reflect_y(&mut self) -> &mut Self {
        self.scale(-1.0, 1.0)
    }

    /// Rotates by `rad` radians. In a y-down coordinate system a positive angle turns the
    /// x axis towards the y axis.
    pub fn rotate(&mut self, rad: f64) -> &mut Self {
        let (sin, cos) = exact_sin_cos(rad);
        self.then([[cos, sin, 0.0], [-sin, cos, 0.0], [0.0, 0.0, 1.0]])
    }

    pub fn apply_f64(&self, (x, y): (f64, f64)) -> (f64, f64) {
        let m = &self.m;
        let nx = x * m[0][0] + y * m[1][0] + m[2][0];
        let ny = x * m[0][1] + y * m[1][1] + m[2][1];
        let w = x * m[0][2] + y * m[1][2] + m[2][2];
        (nx / w, ny / w)
    }

    pub fn apply(&self, (x, y): (i32, i32)) -> (i32, i32) {
        let (x, y) = self.apply_f64((x as f64, y as f64));
        (x.round() as i32, y.round() as i32)
    }

    fn then(&mut self, rhs: Matrix) -> &mut Self {
        let lhs = self.m;
        for (i, row) in self.m.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                *v = (0..3).map(|k| lhs[i][k] * rhs[k][j]).sum();
            }
        }
        self
    }
}

/// Quarter turns produce exact zeros and ones so that chained rotations don't drift.
fn exact_sin_cos(rad: f64) -> (f64, f64) {
    let quarters = rad / FRAC_PI_2;
    if (quarters - quarters.round()).abs() < 1e-12 {
        return match (quarters.round() as i64).rem_euclid(4) {
            0 => (0.0, 1.0),
            1 => (1.0, 0.0),
            2 => (0.0, -1.0),
            _ => (-1.0, 0.0),
        };
    }
    rad.sin_cos()
}
