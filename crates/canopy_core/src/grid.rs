//! Rectangular occupancy grid.
//!
//! A grid only stores entity handles; the being's own state lives in the
//! ECS. Every living occupant is stored in exactly one cell and its
//! `Habitat` component names that same cell.

use crate::environment::DiurnalClock;
use crate::error::{CoreError, Result};
use crate::random::RandomSource;
use canopy_data::{Layer, Location};
use std::sync::Arc;

/// Moore neighbourhood offsets, in a fixed order that is shuffled per query.
const NEIGHBOUR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Debug, Clone)]
pub struct Grid {
    depth: usize,
    width: usize,
    cells: Vec<Option<hecs::Entity>>,
    clock: Arc<DiurnalClock>,
}

impl Grid {
    pub fn new(depth: usize, width: usize, clock: Arc<DiurnalClock>) -> Result<Self> {
        if depth == 0 || width == 0 {
            return Err(CoreError::InvalidDimensions { depth, width });
        }
        Ok(Self {
            depth,
            width,
            cells: vec![None; depth * width],
            clock,
        })
    }

    #[inline(always)]
    fn index(&self, location: Location) -> Option<usize> {
        (location.row < self.depth && location.col < self.width)
            .then(|| location.row * self.width + location.col)
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn contains(&self, location: Location) -> bool {
        self.index(location).is_some()
    }

    /// Binds `occupant` to `location`.
    ///
    /// Placing onto a cell held by another occupant breaks the one-being-per-
    /// cell invariant; callers only place onto cells they found free.
    pub fn place(&mut self, occupant: hecs::Entity, location: Location) {
        let Some(idx) = self.index(location) else {
            debug_assert!(false, "place outside grid at {location}");
            return;
        };
        debug_assert!(
            self.cells[idx].map_or(true, |held| held == occupant),
            "cell {location} already holds another occupant"
        );
        self.cells[idx] = Some(occupant);
    }

    pub fn clear(&mut self, location: Location) {
        if let Some(idx) = self.index(location) {
            self.cells[idx] = None;
        }
    }

    pub fn clear_all(&mut self) {
        self.cells.fill(None);
    }

    #[must_use]
    pub fn occupant_at(&self, location: Location) -> Option<hecs::Entity> {
        self.index(location).and_then(|idx| self.cells[idx])
    }

    /// Signed-coordinate lookup; anything off the grid is empty.
    #[must_use]
    pub fn occupant_at_rc(&self, row: i64, col: i64) -> Option<hecs::Entity> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        self.occupant_at(Location::new(row, col))
    }

    #[must_use]
    pub fn is_free(&self, location: Location) -> bool {
        self.contains(location) && self.occupant_at(location).is_none()
    }

    /// In-bounds Moore neighbours of `location`, in a fresh random order.
    pub fn adjacent_locations<R: RandomSource>(
        &self,
        location: Location,
        rng: &mut R,
    ) -> Vec<Location> {
        let mut neighbours: Vec<Location> = NEIGHBOUR_OFFSETS
            .iter()
            .filter_map(|&(dr, dc)| {
                let row = location.row.checked_add_signed(dr as isize)?;
                let col = location.col.checked_add_signed(dc as isize)?;
                let candidate = Location::new(row, col);
                self.contains(candidate).then_some(candidate)
            })
            .collect();
        rng.shuffle(&mut neighbours);
        neighbours
    }

    /// The unoccupied subset of [`Grid::adjacent_locations`].
    pub fn free_adjacent_locations<R: RandomSource>(
        &self,
        location: Location,
        rng: &mut R,
    ) -> Vec<Location> {
        let mut free = self.adjacent_locations(location, rng);
        free.retain(|loc| self.occupant_at(*loc).is_none());
        free
    }

    pub fn free_adjacent_location<R: RandomSource>(
        &self,
        location: Location,
        rng: &mut R,
    ) -> Option<Location> {
        self.free_adjacent_locations(location, rng).into_iter().next()
    }

    #[must_use]
    pub fn is_night(&self) -> bool {
        self.clock.is_night()
    }

    #[must_use]
    pub fn clock(&self) -> &Arc<DiurnalClock> {
        &self.clock
    }

    /// Every cell in row-major order with its occupant.
    pub fn iter(&self) -> impl Iterator<Item = (Location, Option<hecs::Entity>)> + '_ {
        self.cells.iter().enumerate().map(|(idx, cell)| {
            (Location::new(idx / self.width, idx % self.width), *cell)
        })
    }

    #[must_use]
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

/// The animal grid and the plant grid of one simulation, sharing a clock.
#[derive(Debug, Clone)]
pub struct Fields {
    fauna: Grid,
    flora: Grid,
}

impl Fields {
    pub fn new(depth: usize, width: usize, clock: Arc<DiurnalClock>) -> Result<Self> {
        Ok(Self {
            fauna: Grid::new(depth, width, Arc::clone(&clock))?,
            flora: Grid::new(depth, width, clock)?,
        })
    }

    #[must_use]
    pub fn get(&self, layer: Layer) -> &Grid {
        match layer {
            Layer::Fauna => &self.fauna,
            Layer::Flora => &self.flora,
        }
    }

    pub fn get_mut(&mut self, layer: Layer) -> &mut Grid {
        match layer {
            Layer::Fauna => &mut self.fauna,
            Layer::Flora => &mut self.flora,
        }
    }

    pub fn clear_all(&mut self) {
        self.fauna.clear_all();
        self.flora.clear_all();
    }
}
