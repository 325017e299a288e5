//! Triangulation templates for the 16 square configurations.
//!
//! Each template is a convex polygon emitted as a triangle fan around its
//! first point. Points are listed clockwise seen from above.

use super::squares::Point::{self, *};

/// How to resolve the two diagonal configurations (5 and 10).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Saddle {
    /// One hexagon joining both active corners.
    Connect,
    /// Two separate corner triangles.
    Split,
}

const CASE_0: &[Point] = &[];
const CASE_1: &[Point] = &[CenterLeft, CenterBottom, BottomLeft];
const CASE_2: &[Point] = &[BottomRight, CenterBottom, CenterRight];
const CASE_3: &[Point] = &[CenterRight, BottomRight, BottomLeft, CenterLeft];
const CASE_4: &[Point] = &[TopRight, CenterRight, CenterTop];
const CASE_5: &[Point] = &[CenterTop, TopRight, CenterRight, CenterBottom, BottomLeft, CenterLeft];
const CASE_6: &[Point] = &[CenterTop, TopRight, BottomRight, CenterBottom];
const CASE_7: &[Point] = &[CenterTop, TopRight, BottomRight, BottomLeft, CenterLeft];
const CASE_8: &[Point] = &[TopLeft, CenterTop, CenterLeft];
const CASE_9: &[Point] = &[TopLeft, CenterTop, CenterBottom, BottomLeft];
const CASE_10: &[Point] = &[TopLeft, CenterTop, CenterRight, BottomRight, CenterBottom, CenterLeft];
const CASE_11: &[Point] = &[TopLeft, CenterTop, CenterRight, BottomRight, BottomLeft];
const CASE_12: &[Point] = &[TopLeft, TopRight, CenterRight, CenterLeft];
const CASE_13: &[Point] = &[TopLeft, TopRight, CenterRight, CenterBottom, BottomLeft];
const CASE_14: &[Point] = &[TopLeft, TopRight, BottomRight, CenterBottom, CenterLeft];
const CASE_15: &[Point] = &[TopLeft, TopRight, BottomRight, BottomLeft];

static CASES: [&[Point]; 16] = [
    CASE_0, CASE_1, CASE_2, CASE_3, CASE_4, CASE_5, CASE_6, CASE_7, CASE_8, CASE_9, CASE_10,
    CASE_11, CASE_12, CASE_13, CASE_14, CASE_15,
];

static SPLIT_5: [&[Point]; 2] = [CASE_4, CASE_1];
static SPLIT_10: [&[Point]; 2] = [CASE_8, CASE_2];

/// Polygons to emit for a configuration.
pub fn polygons(configuration: u8, saddle: Saddle) -> &'static [&'static [Point]] {
    let configuration = (configuration & 0x0f) as usize;
    match (configuration, saddle) {
        (5, Saddle::Split) => &SPLIT_5,
        (10, Saddle::Split) => &SPLIT_10,
        _ => std::slice::from_ref(&CASES[configuration]),
    }
}

/// Fan triangulation of one polygon around its first element.
pub fn fan<T: Copy>(points: &[T]) -> impl Iterator<Item = [T; 3]> + '_ {
    (1..points.len().saturating_sub(1)).map(move |i| [points[0], points[i], points[i + 1]])
}
