//! The editable point set.
//!
//! Points are matched by a generated [`PointId`], never by coordinates: two
//! points may share a position and still be dragged or deleted independently.

use crate::domain::space::PointPos;

/// Stable identity of a point for the lifetime of its [`PointSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(u64);

impl PointId {
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub id: PointId,
    pub position: PointPos,
}

/// Insertion-ordered points with ids that are never reused.
#[derive(Debug, Clone, Default)]
pub struct PointSet {
    points: Vec<Point>,
    next_id: u64,
}

impl PointSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_positions(positions: impl IntoIterator<Item = PointPos>) -> Self {
        let mut set = Self::new();
        for p in positions {
            set.insert(p);
        }
        set
    }

    /// Add a point and return its freshly generated id.
    pub fn insert(&mut self, position: PointPos) -> PointId {
        let id = PointId(self.next_id);
        self.next_id += 1;
        self.points.push(Point { id, position });
        id
    }

    pub fn remove(&mut self, id: PointId) -> Option<Point> {
        let idx = self.points.iter().position(|p| p.id == id)?;
        Some(self.points.remove(idx))
    }

    /// Move `id` to `position`. Returns `false` if the id is unknown.
    pub fn move_to(&mut self, id: PointId, position: PointPos) -> bool {
        match self.points.iter_mut().find(|p| p.id == id) {
            Some(p) => {
                p.position = position;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: PointId) -> Option<&Point> {
        self.points.iter().find(|p| p.id == id)
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    pub fn positions(&self) -> impl Iterator<Item = PointPos> + '_ {
        self.points.iter().map(|p| p.position)
    }
}
