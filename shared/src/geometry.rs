//! Layout geometry for placing markers over diagram elements
//!
//! All coordinates are CSS pixels. Client rectangles come straight from
//! `getBoundingClientRect()`; shape bounding boxes come from `getBBox()` and
//! are local to the SVG they live in.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Size { width, height }
    }

    /// Zero or non-finite sizes mean the element is hidden or not laid out yet.
    pub fn is_measurable(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Rect {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn is_measurable(&self) -> bool {
        self.left.is_finite() && self.top.is_finite() && self.size().is_measurable()
    }
}

/// How a stage target is measured.
///
/// Shapes inside the heart diagram report a bounding box in the graphic's own
/// coordinate space, so they carry the graphic's on-screen rectangle as well.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TargetGeometry {
    Rect { client: Rect },
    Shape { local_bbox: Rect, graphic_client: Rect },
}

impl TargetGeometry {
    /// Center of the target relative to `container`, or `None` while either
    /// side is unmeasurable.
    pub fn center_in(&self, container: &Rect) -> Option<Point> {
        if !container.is_measurable() {
            return None;
        }
        let center = match self {
            TargetGeometry::Rect { client } => {
                if !client.is_measurable() {
                    return None;
                }
                Point::new(
                    (client.left - container.left) + client.width / 2.0,
                    (client.top - container.top) + client.height / 2.0,
                )
            }
            TargetGeometry::Shape {
                local_bbox,
                graphic_client,
            } => {
                if !local_bbox.is_measurable() || !graphic_client.is_measurable() {
                    return None;
                }
                let local_center = local_bbox.center();
                Point::new(
                    (graphic_client.left - container.left) + local_center.x,
                    (graphic_client.top - container.top) + local_center.y,
                )
            }
        };
        center.is_finite().then_some(center)
    }
}

/// Container-relative top-left placement for a marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionResult {
    pub x: f64,
    pub y: f64,
    pub valid: bool,
}

impl PositionResult {
    pub const INVALID: PositionResult = PositionResult {
        x: 0.0,
        y: 0.0,
        valid: false,
    };

    pub fn at(point: Point) -> Self {
        PositionResult {
            x: point.x,
            y: point.y,
            valid: true,
        }
    }

    pub fn point(&self) -> Option<Point> {
        self.valid.then(|| Point::new(self.x, self.y))
    }
}

/// Top-left placement that centers a `marker` over `target`.
///
/// Any missing input (element absent from the page) or unmeasurable input
/// (not laid out, hidden) yields [`PositionResult::INVALID`]; the caller skips
/// that frame instead of writing NaN offsets.
pub fn resolve_position(
    target: Option<&TargetGeometry>,
    container: Option<&Rect>,
    marker: Option<Size>,
) -> PositionResult {
    let (Some(target), Some(container), Some(marker)) = (target, container, marker) else {
        return PositionResult::INVALID;
    };
    if !marker.is_measurable() {
        return PositionResult::INVALID;
    }
    match target.center_in(container) {
        Some(center) => PositionResult::at(Point::new(
            center.x - marker.width / 2.0,
            center.y - marker.height / 2.0,
        )),
        None => PositionResult::INVALID,
    }
}

/// Anchor for a free-floating label over a target, relative to `container`.
pub fn resolve_center(target: Option<&TargetGeometry>, container: Option<&Rect>) -> Option<Point> {
    target?.center_in(container?)
}

/// Placement of a connector strip laid between two neighbouring elements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConnectorSpan {
    pub left: f64,
    pub top: f64,
    pub width: f64,
}

/// Connector running from the right edge of `start` to the left edge of `end`,
/// vertically centered on `start`. Overlapping elements give a zero width.
pub fn connector_span(
    start: &Rect,
    end: &Rect,
    container: &Rect,
    connector_height: f64,
) -> Option<ConnectorSpan> {
    if !start.is_measurable() || !end.is_measurable() || !container.is_measurable() {
        return None;
    }
    if !connector_height.is_finite() {
        return None;
    }
    Some(ConnectorSpan {
        left: start.right() - container.left,
        top: start.center().y - container.top - connector_height / 2.0,
        width: (end.left - start.right()).max(0.0),
    })
}
