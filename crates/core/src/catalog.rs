//! Piece catalog - the 7 fixed shape templates and the spawn policy.
//!
//! Shapes are small 0/1 matrices with explicit width and height, matching
//! the classic template list (I, O, T, L, J, S, Z). A spawned piece gets a
//! template and a palette color, each drawn uniformly at random.

use arrayvec::ArrayVec;

use blockfall_types::COLOR_COUNT;

use crate::rng::SimpleRng;

/// Number of shape templates in the catalog
pub const TEMPLATE_COUNT: usize = 7;

/// Maximum side length of a shape matrix
pub const SHAPE_MAX: usize = 4;

/// A piece shape: a width x height matrix of 0/1 flags.
///
/// Stored in a fixed 4x4 backing array so shapes stay `Copy`; only the
/// `width` x `height` corner is meaningful. Rotation replaces the matrix
/// wholesale (dimensions swap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    cells: [[u8; SHAPE_MAX]; SHAPE_MAX],
    width: u8,
    height: u8,
}

impl Shape {
    /// Build a shape from template rows. Rows beyond `height` and columns
    /// beyond `width` stay zero.
    pub(crate) const fn from_rows<const W: usize, const H: usize>(rows: [[u8; W]; H]) -> Self {
        let mut cells = [[0u8; SHAPE_MAX]; SHAPE_MAX];
        let mut y = 0;
        while y < H {
            let mut x = 0;
            while x < W {
                cells[y][x] = rows[y][x];
                x += 1;
            }
            y += 1;
        }
        Self {
            cells,
            width: W as u8,
            height: H as u8,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether the matrix cell at (x, y) is filled. Out-of-matrix lookups
    /// are empty.
    pub fn filled(&self, x: usize, y: usize) -> bool {
        x < self.width as usize && y < self.height as usize && self.cells[y][x] != 0
    }

    /// True when the shape has no filled cells (degenerate; always collides)
    pub fn is_empty(&self) -> bool {
        self.filled_cells().is_empty()
    }

    /// Collect the (x, y) offsets of all filled cells.
    ///
    /// Stack-only; the capacity covers a full 4x4 matrix.
    pub fn filled_cells(&self) -> ArrayVec<(i8, i8), { SHAPE_MAX * SHAPE_MAX }> {
        let mut out = ArrayVec::new();
        for y in 0..self.height as usize {
            for x in 0..self.width as usize {
                if self.cells[y][x] != 0 {
                    out.push((x as i8, y as i8));
                }
            }
        }
        out
    }

    /// The 90-degree rotated variant: transpose, then reverse the row order.
    /// Width and height swap.
    pub fn rotated(&self) -> Shape {
        let w = self.width as usize;
        let h = self.height as usize;
        let mut cells = [[0u8; SHAPE_MAX]; SHAPE_MAX];

        for y in 0..w {
            for x in 0..h {
                cells[y][x] = self.cells[x][w - 1 - y];
            }
        }

        Shape {
            cells,
            width: self.height,
            height: self.width,
        }
    }
}

/// The 7 fixed shape templates
pub const TEMPLATES: [Shape; TEMPLATE_COUNT] = [
    // I
    Shape::from_rows([[1, 1, 1, 1]]),
    // O
    Shape::from_rows([[1, 1], [1, 1]]),
    // T
    Shape::from_rows([[1, 1, 1], [0, 1, 0]]),
    // L
    Shape::from_rows([[1, 1, 1], [1, 0, 0]]),
    // J
    Shape::from_rows([[1, 1, 1], [0, 0, 1]]),
    // S
    Shape::from_rows([[1, 1, 0], [0, 1, 1]]),
    // Z
    Shape::from_rows([[0, 1, 1], [1, 1, 0]]),
];

/// Draw a template and a palette color, each uniformly at random.
pub fn random_template(rng: &mut SimpleRng) -> (Shape, u8) {
    let shape = TEMPLATES[rng.next_range(TEMPLATE_COUNT as u32) as usize];
    let color = rng.next_range(COLOR_COUNT as u32) as u8;
    (shape, color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_have_four_filled_cells() {
        for (i, shape) in TEMPLATES.iter().enumerate() {
            assert_eq!(
                shape.filled_cells().len(),
                4,
                "template {} should have 4 cells",
                i
            );
            assert!(!shape.is_empty());
        }
    }

    #[test]
    fn test_i_rotation_swaps_dimensions() {
        let i = TEMPLATES[0];
        assert_eq!((i.width(), i.height()), (4, 1));

        let rotated = i.rotated();
        assert_eq!((rotated.width(), rotated.height()), (1, 4));
        for y in 0..4 {
            assert!(rotated.filled(0, y));
        }
    }

    #[test]
    fn test_o_rotation_is_identity() {
        let o = TEMPLATES[1];
        assert_eq!(o.rotated(), o);
    }

    #[test]
    fn test_four_rotations_return_to_start() {
        for shape in TEMPLATES {
            let back = shape.rotated().rotated().rotated().rotated();
            assert_eq!(back, shape);
        }
    }

    #[test]
    fn test_rotation_preserves_cell_count() {
        for shape in TEMPLATES {
            assert_eq!(
                shape.rotated().filled_cells().len(),
                shape.filled_cells().len()
            );
        }
    }

    #[test]
    fn test_random_template_in_bounds() {
        let mut rng = SimpleRng::new(99);
        for _ in 0..100 {
            let (shape, color) = random_template(&mut rng);
            assert!(TEMPLATES.contains(&shape));
            assert!(color < COLOR_COUNT);
        }
    }
}
