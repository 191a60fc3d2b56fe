use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single sampled pen position in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// One pen-down to pen-up motion, in the widget's native column layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stroke {
    pub x: Vec<i32>,
    pub y: Vec<i32>,
}

impl Stroke {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: Point) {
        self.x.push(point.x);
        self.y.push(point.y);
    }

    pub fn len(&self) -> usize {
        self.x.len().min(self.y.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.x
            .iter()
            .zip(self.y.iter())
            .map(|(&x, &y)| Point::new(x, y))
    }
}

impl FromIterator<Point> for Stroke {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        let mut stroke = Stroke::new();
        for point in iter {
            stroke.push(point);
        }
        stroke
    }
}

/// Errors raised when loading a signature from outside the drawing surface
#[derive(Error, Debug)]
pub enum SignatureError {
    #[error("Malformed signature JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Stroke {index} has {x_len} x coordinates but {y_len} y coordinates")]
    MismatchedStroke {
        index: usize,
        x_len: usize,
        y_len: usize,
    },
}

/// All strokes drawn so far, serialized exactly as the native array of
/// `{"x": [...], "y": [...]}` objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signature {
    strokes: Vec<Stroke>,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a signature recorded in native format.
    ///
    /// Unlike the live capture path, recorded input is checked for strokes
    /// whose coordinate columns disagree in length.
    pub fn from_json(json: &str) -> Result<Self, SignatureError> {
        let signature: Signature = serde_json::from_str(json)?;
        for (index, stroke) in signature.strokes.iter().enumerate() {
            if stroke.x.len() != stroke.y.len() {
                return Err(SignatureError::MismatchedStroke {
                    index,
                    x_len: stroke.x.len(),
                    y_len: stroke.y.len(),
                });
            }
        }
        Ok(signature)
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn push(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    pub fn point_count(&self) -> usize {
        self.strokes.iter().map(Stroke::len).sum()
    }
}

impl From<Vec<Stroke>> for Signature {
    fn from(strokes: Vec<Stroke>) -> Self {
        Self { strokes }
    }
}
