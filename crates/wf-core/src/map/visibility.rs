//! Field-of-view cache
//!
//! Keeps the `seen` (ever observed) and `visible` (observed this turn) grids
//! for the current map. A sweep only runs when the player position, sight
//! radius, mode or map shape changed since the last one; the overworld has
//! no fog and is always fully visible.

use serde::{Deserialize, Serialize};

use super::{Map, Pos};
use crate::world::Mode;

/// Inputs the last sweep was computed from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CacheTag {
    pos: Pos,
    radius: i32,
    mode: Mode,
    dims: (usize, usize),
}

/// What a call to [`VisibilityCache::recompute`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    /// Nothing changed since the last sweep
    Skipped,
    /// Overworld: everything marked visible
    Revealed,
    /// Line-of-sight sweep ran
    Swept,
}

fn grid(dims: (usize, usize), value: bool) -> Vec<Vec<bool>> {
    vec![vec![value; dims.0]; dims.1]
}

/// Shape of a grid whose rows all have the same length
fn rect_dims(grid: &[Vec<bool>]) -> Option<(usize, usize)> {
    let width = grid.first().map_or(0, Vec::len);
    grid.iter()
        .all(|row| row.len() == width)
        .then_some((width, grid.len()))
}

/// Visibility state over the current map, indexed `[y][x]`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisibilityCache {
    seen: Vec<Vec<bool>>,
    visible: Vec<Vec<bool>>,
    #[serde(skip)]
    tag: Option<CacheTag>,
    /// Number of line-of-sight sweeps run (diagnostics)
    #[serde(skip)]
    sweeps: u64,
}

impl VisibilityCache {
    /// Empty, all-false grids for a map of the given shape
    pub fn new(dims: (usize, usize)) -> Self {
        Self {
            seen: grid(dims, false),
            visible: grid(dims, false),
            tag: None,
            sweeps: 0,
        }
    }

    /// Rebuild from persisted grids; the next recompute always sweeps
    ///
    /// Grids that are ragged or disagree in shape are dropped so the next
    /// recompute reallocates them.
    pub fn from_grids(seen: Vec<Vec<bool>>, visible: Vec<Vec<bool>>) -> Self {
        let shape = rect_dims(&seen);
        if shape.is_none() || shape != rect_dims(&visible) {
            tracing::warn!("discarding malformed visibility grids");
            return Self::default();
        }
        Self {
            seen,
            visible,
            tag: None,
            sweeps: 0,
        }
    }

    /// Copies of the grids for persistence
    pub fn grids(&self) -> (Vec<Vec<bool>>, Vec<Vec<bool>>) {
        (self.seen.clone(), self.visible.clone())
    }

    /// Current grid shape as (width, height)
    ///
    /// Ragged or mismatched grids report (0, 0) so the next recompute
    /// reallocates them.
    pub fn dims(&self) -> (usize, usize) {
        match rect_dims(&self.seen) {
            Some(dims) if rect_dims(&self.visible) == Some(dims) => dims,
            _ => (0, 0),
        }
    }

    /// Number of line-of-sight sweeps run since creation
    pub fn sweeps(&self) -> u64 {
        self.sweeps
    }

    /// Forget the cache tags so the next recompute sweeps
    ///
    /// Call after mutating the map in place (doors, digging).
    pub fn invalidate(&mut self) {
        self.tag = None;
    }

    /// Check if a cell is currently visible
    pub fn is_visible(&self, pos: Pos) -> bool {
        self.cell(&self.visible, pos)
    }

    /// Check if a cell has ever been seen
    pub fn is_seen(&self, pos: Pos) -> bool {
        self.cell(&self.seen, pos)
    }

    fn cell(&self, grid: &[Vec<bool>], pos: Pos) -> bool {
        if pos.x < 0 || pos.y < 0 {
            return false;
        }
        grid.get(pos.y as usize)
            .and_then(|row| row.get(pos.x as usize))
            .copied()
            .unwrap_or(false)
    }

    fn mark(&mut self, pos: Pos) {
        if pos.x < 0 || pos.y < 0 {
            return;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        if let Some(row) = self.visible.get_mut(y) {
            if let Some(cell) = row.get_mut(x) {
                *cell = true;
            }
        }
        if let Some(row) = self.seen.get_mut(y) {
            if let Some(cell) = row.get_mut(x) {
                *cell = true;
            }
        }
    }

    /// Bring the grids up to date with the player's view
    pub fn recompute(&mut self, map: &Map, player: Pos, radius: i32, mode: Mode) -> Recompute {
        let tag = CacheTag {
            pos: player,
            radius,
            mode,
            dims: map.dims(),
        };

        if mode == Mode::World {
            if self.dims() != tag.dims {
                self.seen = grid(tag.dims, true);
                self.visible = grid(tag.dims, true);
            } else {
                for row in self.seen.iter_mut().chain(self.visible.iter_mut()) {
                    row.fill(true);
                }
            }
            self.tag = Some(tag);
            return Recompute::Revealed;
        }

        if self.tag == Some(tag) {
            tracing::trace!(?player, "visibility unchanged, skipping sweep");
            return Recompute::Skipped;
        }

        if self.dims() != tag.dims {
            tracing::debug!(from = ?self.dims(), to = ?tag.dims, "reallocating visibility grids");
            self.seen = grid(tag.dims, false);
            self.visible = grid(tag.dims, false);
        }

        self.sweep(map, player, radius);
        self.tag = Some(tag);
        self.sweeps += 1;
        Recompute::Swept
    }

    /// Recompute, then self-heal if the player's own tile is still dark
    ///
    /// Returns true when the correction path had to run.
    pub fn recompute_checked(&mut self, map: &Map, player: Pos, radius: i32, mode: Mode) -> bool {
        self.recompute(map, player, radius, mode);
        if !map.in_bounds(player) || self.is_visible(player) {
            return false;
        }
        tracing::warn!(?player, "player tile not visible after recompute, forcing sweep");
        self.invalidate();
        self.recompute(map, player, radius, mode);
        self.mark(player);
        true
    }

    /// Raycast from the player out to `radius`
    ///
    /// The radius is clamped to the map's longer side.
    fn sweep(&mut self, map: &Map, player: Pos, radius: i32) {
        let (width, height) = map.dims();
        let radius = radius.clamp(0, width.max(height).min(i32::MAX as usize) as i32);
        for row in &mut self.visible {
            row.fill(false);
        }

        // Player's position is always visible
        if map.in_bounds(player) {
            self.mark(player);
        }

        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy > radius * radius {
                    continue;
                }
                let target = player.offset(dx, dy);
                if map.in_bounds(target) && has_line_of_sight(map, player, target) {
                    self.mark(target);
                }
            }
        }
    }
}

/// Check if there's line of sight between two points (Bresenham's algorithm)
///
/// A blocking tile is itself visible but hides everything behind it.
pub fn has_line_of_sight(map: &Map, from: Pos, to: Pos) -> bool {
    let (mut x, mut y) = (from.x, from.y);
    let dx = (to.x - x).abs();
    let dy = -(to.y - y).abs();
    let sx = if x < to.x { 1 } else { -1 };
    let sy = if y < to.y { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if (x, y) != (from.x, from.y) {
            let here = Pos::new(x, y);
            if !map.in_bounds(here) {
                return false;
            }
            if map.blocks_sight(here) {
                return here == to;
            }
        }

        if x == to.x && y == to.y {
            return true;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Tile;

    fn room() -> Map {
        Map::walled_room(20, 12)
    }

    #[test]
    fn test_initial_state() {
        let vis = VisibilityCache::new((20, 12));
        assert!(!vis.is_seen(Pos::new(5, 5)));
        assert!(!vis.is_visible(Pos::new(5, 5)));
    }

    #[test]
    fn test_sweep_marks_player_and_neighbors() {
        let map = room();
        let mut vis = VisibilityCache::new(map.dims());
        let p = Pos::new(10, 6);
        assert_eq!(vis.recompute(&map, p, 4, Mode::Dungeon), Recompute::Swept);
        assert!(vis.is_visible(p));
        assert!(vis.is_seen(p));
        assert!(vis.is_visible(Pos::new(11, 6)));
        assert!(!vis.is_visible(Pos::new(1, 1)));
    }

    #[test]
    fn test_skip_when_nothing_changed() {
        let map = room();
        let mut vis = VisibilityCache::new(map.dims());
        let p = Pos::new(5, 5);
        vis.recompute(&map, p, 5, Mode::Dungeon);
        assert_eq!(vis.recompute(&map, p, 5, Mode::Dungeon), Recompute::Skipped);
        assert_eq!(vis.sweeps(), 1);

        assert_eq!(vis.recompute(&map, p, 6, Mode::Dungeon), Recompute::Swept);
        assert_eq!(vis.recompute(&map, p, 6, Mode::Settlement), Recompute::Swept);
        assert_eq!(vis.sweeps(), 3);
    }

    #[test]
    fn test_invalidate_forces_sweep() {
        let map = room();
        let mut vis = VisibilityCache::new(map.dims());
        let p = Pos::new(5, 5);
        vis.recompute(&map, p, 5, Mode::Dungeon);
        vis.invalidate();
        assert_eq!(vis.recompute(&map, p, 5, Mode::Dungeon), Recompute::Swept);
    }

    #[test]
    fn test_shape_change_reallocates() {
        let map = room();
        let mut vis = VisibilityCache::new((3, 3));
        vis.recompute(&map, Pos::new(4, 4), 3, Mode::Dungeon);
        assert_eq!(vis.dims(), (20, 12));
        assert!(vis.is_visible(Pos::new(4, 4)));
    }

    #[test]
    fn test_world_reveals_everything() {
        let map = Map::filled(8, 6, Tile::Grass);
        let mut vis = VisibilityCache::new((2, 2));
        assert_eq!(vis.recompute(&map, Pos::new(0, 0), 1, Mode::World), Recompute::Revealed);
        assert!(vis.is_visible(Pos::new(7, 5)));
        assert!(vis.is_seen(Pos::new(7, 5)));
        assert_eq!(vis.recompute(&map, Pos::new(0, 0), 1, Mode::World), Recompute::Revealed);
    }

    #[test]
    fn test_seen_persists_after_moving() {
        let map = Map::walled_room(30, 12);
        let mut vis = VisibilityCache::new(map.dims());
        vis.recompute(&map, Pos::new(5, 5), 3, Mode::Dungeon);
        vis.recompute(&map, Pos::new(20, 5), 3, Mode::Dungeon);
        assert!(vis.is_seen(Pos::new(5, 5)));
        assert!(!vis.is_visible(Pos::new(5, 5)));
        assert!(vis.is_visible(Pos::new(20, 5)));
    }

    #[test]
    fn test_line_of_sight_blocked_by_wall() {
        let mut map = room();
        map.set(Pos::new(10, 5), Tile::Wall);
        assert!(has_line_of_sight(&map, Pos::new(8, 5), Pos::new(9, 5)));
        assert!(has_line_of_sight(&map, Pos::new(8, 5), Pos::new(10, 5)));
        assert!(!has_line_of_sight(&map, Pos::new(8, 5), Pos::new(11, 5)));
    }

    #[test]
    fn test_window_lets_sight_through() {
        let mut map = room();
        map.set(Pos::new(10, 5), Tile::Window);
        assert!(has_line_of_sight(&map, Pos::new(8, 5), Pos::new(12, 5)));
    }

    #[test]
    fn test_checked_recompute_on_player_inside_wall() {
        let mut map = room();
        let p = Pos::new(6, 6);
        map.set(p, Tile::Wall);
        let mut vis = VisibilityCache::new(map.dims());
        vis.recompute_checked(&map, p, 4, Mode::Dungeon);
        assert!(vis.is_visible(p));
    }

    #[test]
    fn test_huge_radius_is_clamped() {
        let map = room();
        let mut vis = VisibilityCache::new(map.dims());
        vis.recompute(&map, Pos::new(5, 5), 50_000, Mode::Dungeon);
        assert!(vis.is_visible(Pos::new(18, 10)));
        assert!(vis.is_visible(Pos::new(5, 5)));
    }

    #[test]
    fn test_ragged_grids_are_rebuilt() {
        let map = room();
        let mut seen = vec![vec![false; 20]; 12];
        seen[7].truncate(3);
        let vis = VisibilityCache::from_grids(seen, vec![vec![false; 20]; 12]);
        assert_eq!(vis.dims(), (0, 0));

        let mut vis = vis;
        let p = Pos::new(10, 7);
        vis.recompute(&map, p, 4, Mode::Dungeon);
        assert_eq!(vis.dims(), (20, 12));
        assert!(vis.is_visible(Pos::new(8, 7)));
    }

    #[test]
    fn test_player_out_of_bounds_is_harmless() {
        let map = room();
        let mut vis = VisibilityCache::new(map.dims());
        assert!(!vis.recompute_checked(&map, Pos::new(-3, 40), 4, Mode::Dungeon));
    }
}
