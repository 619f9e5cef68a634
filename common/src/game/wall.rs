/// Visual classification of an obstacle cell. Cells on the outer ring
/// are structural walls, marked interior cells are barriers. The
/// distinction only affects how the cell is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WallKind {
    Structural,
    Barrier,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wall {
    pub row: i32,
    pub col: i32,
    pub kind: WallKind,
}

/// Builds the immutable obstacle set from match-setup grid data: every
/// non-zero cell becomes a wall. Called once at map construction.
pub fn build_obstacles(grid: &[Vec<u8>]) -> Vec<Wall> {
    let rows = grid.len();
    let mut walls = Vec::new();

    for (r, row) in grid.iter().enumerate() {
        let cols = row.len();
        for (c, &value) in row.iter().enumerate() {
            if value == 0 {
                continue;
            }
            let on_ring = r == 0 || c == 0 || r == rows - 1 || c == cols - 1;
            walls.push(Wall {
                row: r as i32,
                col: c as i32,
                kind: if on_ring { WallKind::Structural } else { WallKind::Barrier },
            });
        }
    }

    walls
}
