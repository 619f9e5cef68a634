/// One grid cell of a snake body. Carries both the discrete (row, col)
/// position and the continuous (x, y) position in grid units used while
/// interpolating between steps. Continuous coordinates point at the
/// cell center, so two adjacent cells are exactly one unit apart.
#[derive(Clone, Copy, Debug)]
pub struct GridCell {
    pub row: i32,
    pub col: i32,
    pub x: f64,
    pub y: f64,
}

impl GridCell {
    pub fn new(row: i32, col: i32) -> Self {
        Self {
            row,
            col,
            x: col as f64 + 0.5,
            y: row as f64 + 0.5,
        }
    }

    pub fn distance_to(&self, other: &GridCell) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

// Equality is the discrete position only; continuous coordinates are
// transient render state.
impl PartialEq for GridCell {
    fn eq(&self, other: &Self) -> bool {
        self.row == other.row && self.col == other.col
    }
}

impl Eq for GridCell {}
