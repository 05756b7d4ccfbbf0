pub type SizeType = usize;

/// A `(row, column)` pair.
pub type Coordinates = (SizeType, SizeType);
