use geo::Rect;
use serde::{Deserialize, Serialize};

/// Axis aligned bounding box of a geometry, used to skip exact overlay work
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Extent {
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Extent {
        Extent {
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }

    /// true if the interiors of the two boxes share some area
    pub fn overlaps(&self, other: &Extent) -> bool {
        !(self.xmax <= other.xmin
            || self.xmin >= other.xmax
            || self.ymax <= other.ymin
            || self.ymin >= other.ymax)
    }

    /// like `overlaps` but shared edges and corners count
    pub fn touches(&self, other: &Extent) -> bool {
        !(self.xmax < other.xmin
            || self.xmin > other.xmax
            || self.ymax < other.ymin
            || self.ymin > other.ymax)
    }
}

impl From<Rect> for Extent {
    fn from(r: Rect) -> Self {
        Extent {
            xmin: r.min().x,
            xmax: r.max().x,
            ymin: r.min().y,
            ymax: r.max().y,
        }
    }
}
