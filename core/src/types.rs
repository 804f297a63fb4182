/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for card and pair counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Identifier shared by the two cards of a pair.
pub type CardType = u16;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Iterates every coordinate of a `rows x cols` grid in row-major order.
pub fn iter_coords((rows, cols): Coord2) -> impl Iterator<Item = Coord2> {
    (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
}

/// Converts a flat row-major index back into grid coordinates.
pub(crate) fn coords_from_index(index: usize, (_, cols): Coord2) -> Coord2 {
    let cols = usize::from(cols);
    ((index / cols) as Coord, (index % cols) as Coord)
}
