/// Cardinal face directions in shape-description order.
///
/// The ordering (and therefore `index()`) is part of the data format: face `i`
/// of a shape variant and the face index reported in triangle provenance both
/// refer to `FaceDir::ALL[i]`. West is +X and East is -X.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FaceDir {
    South = 0,
    North = 1,
    West = 2,
    East = 3,
    Up = 4,
    Down = 5,
}

impl FaceDir {
    pub const ALL: [FaceDir; 6] = [
        FaceDir::South,
        FaceDir::North,
        FaceDir::West,
        FaceDir::East,
        FaceDir::Up,
        FaceDir::Down,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(i: usize) -> Option<FaceDir> {
        FaceDir::ALL.get(i).copied()
    }

    /// Grid step `(dx,dy,dz)` towards the neighbor this face looks at.
    #[inline]
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            FaceDir::South => (0, 0, -1),
            FaceDir::North => (0, 0, 1),
            FaceDir::West => (1, 0, 0),
            FaceDir::East => (-1, 0, 0),
            FaceDir::Up => (0, 1, 0),
            FaceDir::Down => (0, -1, 0),
        }
    }

    #[inline]
    pub fn opposite(self) -> FaceDir {
        match self {
            FaceDir::South => FaceDir::North,
            FaceDir::North => FaceDir::South,
            FaceDir::West => FaceDir::East,
            FaceDir::East => FaceDir::West,
            FaceDir::Up => FaceDir::Down,
            FaceDir::Down => FaceDir::Up,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_involution_and_negates_delta() {
        for f in FaceDir::ALL {
            assert_eq!(f.opposite().opposite(), f);
            let (dx, dy, dz) = f.delta();
            assert_eq!(f.opposite().delta(), (-dx, -dy, -dz));
        }
    }

    #[test]
    fn index_matches_order() {
        for (i, f) in FaceDir::ALL.iter().enumerate() {
            assert_eq!(f.index(), i);
            assert_eq!(FaceDir::from_index(i), Some(*f));
        }
        assert_eq!(FaceDir::from_index(6), None);
    }
}
