//! Boundary being digitized, vertex by vertex, before it is finalized.

use crate::geom2::Point;

/// What a click did to the draft.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DraftEvent {
    Added,
    /// The click landed on the first vertex; the ring is closed.
    Closed,
    /// The ring is already closed; the click was ignored.
    Ignored,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Draft {
    points: Vec<Point>,
    undone: Vec<Point>,
    closed: bool,
}

impl Draft {
    /// Add a vertex. With at least 3 vertices, a click within `close_tolerance`
    /// of the first vertex closes the ring instead (the first vertex is
    /// repeated; `Boundary::from_points` drops it again). A new vertex clears
    /// the redo stack.
    pub fn push(&mut self, p: Point, close_tolerance: f64) -> DraftEvent {
        if self.closed {
            return DraftEvent::Ignored;
        }
        if self.points.len() > 2 && (p - self.points[0]).norm() < close_tolerance {
            self.points.push(self.points[0]);
            self.closed = true;
            return DraftEvent::Closed;
        }
        self.points.push(p);
        self.undone.clear();
        DraftEvent::Added
    }

    /// Remove the last vertex (re-opening a closed ring). Returns it.
    pub fn undo(&mut self) -> Option<Point> {
        let p = self.points.pop()?;
        if self.closed {
            self.closed = false;
        } else {
            self.undone.push(p);
        }
        Some(p)
    }

    /// Re-apply the most recently undone vertex.
    pub fn redo(&mut self) -> Option<Point> {
        if self.closed {
            return None;
        }
        let p = self.undone.pop()?;
        self.points.push(p);
        Some(p)
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Take the vertices and reset the draft.
    pub fn take(&mut self) -> Vec<Point> {
        let pts = std::mem::take(&mut self.points);
        *self = Draft::default();
        pts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_near_first_vertex_closes() {
        let mut d = Draft::default();
        assert_eq!(d.push(Point::new(0.0, 0.0), 6.0), DraftEvent::Added);
        // Too few vertices to close: a nearby click is a regular vertex.
        assert_eq!(d.push(Point::new(2.0, 0.0), 6.0), DraftEvent::Added);
        assert_eq!(d.push(Point::new(50.0, 0.0), 6.0), DraftEvent::Added);
        assert_eq!(d.push(Point::new(50.0, 40.0), 6.0), DraftEvent::Added);
        assert_eq!(d.push(Point::new(1.0, 1.0), 6.0), DraftEvent::Closed);
        assert!(d.is_closed());
        assert_eq!(d.len(), 5);
        assert_eq!(d.points()[4], Point::new(0.0, 0.0));
        assert_eq!(d.push(Point::new(9.0, 9.0), 6.0), DraftEvent::Ignored);
    }

    #[test]
    fn undo_redo() {
        let mut d = Draft::default();
        d.push(Point::new(0.0, 0.0), 1.0);
        d.push(Point::new(10.0, 0.0), 1.0);
        d.push(Point::new(10.0, 10.0), 1.0);
        assert_eq!(d.undo(), Some(Point::new(10.0, 10.0)));
        assert_eq!(d.undo(), Some(Point::new(10.0, 0.0)));
        assert_eq!(d.redo(), Some(Point::new(10.0, 0.0)));
        assert_eq!(d.len(), 2);
        // A fresh vertex drops the remaining redo history.
        d.push(Point::new(5.0, 5.0), 1.0);
        assert_eq!(d.redo(), None);
    }

    #[test]
    fn undo_reopens_closed_ring() {
        let mut d = Draft::default();
        for p in [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 0.5)] {
            d.push(Point::new(p.0, p.1), 1.0);
        }
        assert!(d.is_closed());
        assert_eq!(d.len(), 4);
        d.undo();
        assert!(!d.is_closed());
        assert_eq!(d.len(), 3);
        assert_eq!(d.redo(), None);
        let pts = d.take();
        assert_eq!(pts.len(), 3);
        assert!(d.is_empty());
    }
}
