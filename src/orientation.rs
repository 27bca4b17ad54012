//! Anatomical coordinate orientations and their direction cosines.
//!
//! An orientation is named by three letters, one per image axis, each
//! telling the anatomical side the axis starts from. `RPI` is an image
//! whose first axis runs from right to left, the second from posterior to
//! anterior and the third from inferior to superior.
//!
//! Direction cosines are given in LPS world coordinates, as three column
//! vectors (one per image axis), so `R` maps to `+x`, `A` to `+y` and `I`
//! to `+z`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A 3x3 direction cosine matrix, stored as one column per image axis.
pub type Direction = [[f64; 3]; 3];

/// The identity direction, which is the orientation `RAI`.
pub const IDENTITY_DIRECTION: Direction = [[1., 0., 0.], [0., 1., 0.], [0., 0., 1.]];

/// The anatomical side an image axis starts from.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum AnatomicalSide {
    /// Right
    Right,
    /// Left
    Left,
    /// Posterior
    Posterior,
    /// Anterior
    Anterior,
    /// Inferior
    Inferior,
    /// Superior
    Superior,
}

impl AnatomicalSide {
    /// The one letter code of the side.
    pub fn letter(self) -> char {
        match self {
            AnatomicalSide::Right => 'R',
            AnatomicalSide::Left => 'L',
            AnatomicalSide::Posterior => 'P',
            AnatomicalSide::Anterior => 'A',
            AnatomicalSide::Inferior => 'I',
            AnatomicalSide::Superior => 'S',
        }
    }

    /// Parse a one letter code, in either case.
    pub fn from_letter(c: char) -> Option<AnatomicalSide> {
        match c.to_ascii_uppercase() {
            'R' => Some(AnatomicalSide::Right),
            'L' => Some(AnatomicalSide::Left),
            'P' => Some(AnatomicalSide::Posterior),
            'A' => Some(AnatomicalSide::Anterior),
            'I' => Some(AnatomicalSide::Inferior),
            'S' => Some(AnatomicalSide::Superior),
            _ => None,
        }
    }

    /// The world axis (0 for x, 1 for y, 2 for z) and sign of an image axis
    /// starting from this side.
    fn world_axis(self) -> (usize, f64) {
        match self {
            AnatomicalSide::Right => (0, 1.),
            AnatomicalSide::Left => (0, -1.),
            AnatomicalSide::Anterior => (1, 1.),
            AnatomicalSide::Posterior => (1, -1.),
            AnatomicalSide::Inferior => (2, 1.),
            AnatomicalSide::Superior => (2, -1.),
        }
    }

    fn from_world_axis(axis: usize, positive: bool) -> AnatomicalSide {
        match (axis, positive) {
            (0, true) => AnatomicalSide::Right,
            (0, false) => AnatomicalSide::Left,
            (1, true) => AnatomicalSide::Anterior,
            (1, false) => AnatomicalSide::Posterior,
            (_, true) => AnatomicalSide::Inferior,
            (_, false) => AnatomicalSide::Superior,
        }
    }
}

/// A full coordinate orientation, one anatomical side per image axis.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct CoordinateOrientation(pub [AnatomicalSide; 3]);

impl CoordinateOrientation {
    /// Transverse slices, as stored by the orientation code 0.
    pub const RPI: CoordinateOrientation = CoordinateOrientation([
        AnatomicalSide::Right,
        AnatomicalSide::Posterior,
        AnatomicalSide::Inferior,
    ]);
    /// Coronal slices, as stored by the orientation code 1.
    pub const RIP: CoordinateOrientation = CoordinateOrientation([
        AnatomicalSide::Right,
        AnatomicalSide::Inferior,
        AnatomicalSide::Posterior,
    ]);
    /// Sagittal slices, as stored by the orientation code 2.
    pub const PIR: CoordinateOrientation = CoordinateOrientation([
        AnatomicalSide::Posterior,
        AnatomicalSide::Inferior,
        AnatomicalSide::Right,
    ]);

    /// The direction cosines of this orientation.
    pub fn to_direction_cosines(&self) -> Direction {
        let mut dir = [[0.; 3]; 3];
        for (column, side) in dir.iter_mut().zip(self.0.iter()) {
            let (axis, sign) = side.world_axis();
            column[axis] = sign;
        }
        dir
    }

    /// Find the orientation closest to the given direction cosines, by
    /// taking the dominant component of each column.
    ///
    /// Returns `None` when a column is null (or not finite), or when two
    /// columns are dominated by the same world axis.
    pub fn from_direction_cosines(dir: &Direction) -> Option<CoordinateOrientation> {
        let mut sides = [AnatomicalSide::Right; 3];
        let mut taken = [false; 3];
        for (side, column) in sides.iter_mut().zip(dir.iter()) {
            let (axis, value) = column
                .iter()
                .cloned()
                .enumerate()
                .max_by(|(_, a), (_, b)| {
                    a.abs().partial_cmp(&b.abs()).unwrap_or(Ordering::Equal)
                })?;
            if !value.is_finite() || value == 0. || taken[axis] {
                return None;
            }
            taken[axis] = true;
            *side = AnatomicalSide::from_world_axis(axis, value > 0.);
        }
        Some(CoordinateOrientation(sides))
    }
}

impl fmt::Display for CoordinateOrientation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for side in &self.0 {
            write!(f, "{}", side.letter())?;
        }
        Ok(())
    }
}

/// Error for strings which do not name a coordinate orientation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOrientationError(String);

impl fmt::Display for ParseOrientationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid coordinate orientation `{}`", self.0)
    }
}

impl std::error::Error for ParseOrientationError {}

impl FromStr for CoordinateOrientation {
    type Err = ParseOrientationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseOrientationError(s.to_string());
        let mut chars = s.chars();
        let mut sides = [AnatomicalSide::Right; 3];
        let mut taken = [false; 3];
        for side in sides.iter_mut() {
            let c = chars.next().ok_or_else(err)?;
            *side = AnatomicalSide::from_letter(c).ok_or_else(err)?;
            let (axis, _) = side.world_axis();
            if taken[axis] {
                return Err(err());
            }
            taken[axis] = true;
        }
        if chars.next().is_some() {
            return Err(err());
        }
        Ok(CoordinateOrientation(sides))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn canonical_direction_cosines() {
        let rpi = CoordinateOrientation::RPI.to_direction_cosines();
        assert_eq!(rpi, [[1., 0., 0.], [0., -1., 0.], [0., 0., 1.]]);
        let pir = CoordinateOrientation::PIR.to_direction_cosines();
        assert_eq!(pir, [[0., -1., 0.], [0., 0., 1.], [1., 0., 0.]]);
        let rip = CoordinateOrientation::RIP.to_direction_cosines();
        assert_eq!(rip, [[1., 0., 0.], [0., 0., 1.], [0., -1., 0.]]);
    }

    #[test]
    fn identity_is_rai() {
        let o = CoordinateOrientation::from_direction_cosines(&IDENTITY_DIRECTION).unwrap();
        assert_eq!(o.to_string(), "RAI");
    }

    #[test]
    fn oblique_directions_snap_to_dominant_axis() {
        let a = 0.1_f64;
        let (c, s) = (a.cos(), a.sin());
        let dir = [[c, -s, 0.], [0., 0., 1.], [-s, -c, 0.]];
        let o = CoordinateOrientation::from_direction_cosines(&dir).unwrap();
        assert_eq!(o, CoordinateOrientation::RIP);
        assert_abs_diff_eq!(o.to_direction_cosines()[0][0], c, epsilon = 0.01);
    }

    #[test]
    fn degenerate_directions() {
        let dir = [[1., 0., 0.], [1., 0., 0.], [0., 0., 1.]];
        assert_eq!(CoordinateOrientation::from_direction_cosines(&dir), None);
        let dir = [[0., 0., 0.], [0., 1., 0.], [0., 0., 1.]];
        assert_eq!(CoordinateOrientation::from_direction_cosines(&dir), None);
    }

    #[test]
    fn parse_and_display() {
        let o: CoordinateOrientation = "pir".parse().unwrap();
        assert_eq!(o, CoordinateOrientation::PIR);
        assert_eq!(o.to_string(), "PIR");
        assert!("RRI".parse::<CoordinateOrientation>().is_err());
        assert!("RP".parse::<CoordinateOrientation>().is_err());
        assert!("RPIS".parse::<CoordinateOrientation>().is_err());
    }
}
