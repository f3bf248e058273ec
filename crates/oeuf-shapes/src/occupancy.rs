use serde::Deserialize;

/// How much of a face a shape's geometry covers.
///
/// Discriminants match the codes used by shape descriptions (`EMPTY = -1`).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[repr(i8)]
pub enum OccupancyClass {
    #[default]
    Empty = -1,
    Tri0 = 0,
    Tri1 = 1,
    Tri2 = 2,
    Tri3 = 3,
    Quad = 4,
    Octagon = 5,
    Slim = 6,
}

impl OccupancyClass {
    pub const ALL: [OccupancyClass; 8] = [
        OccupancyClass::Empty,
        OccupancyClass::Tri0,
        OccupancyClass::Tri1,
        OccupancyClass::Tri2,
        OccupancyClass::Tri3,
        OccupancyClass::Quad,
        OccupancyClass::Octagon,
        OccupancyClass::Slim,
    ];

    #[inline]
    pub fn code(self) -> i8 {
        self as i8
    }

    pub fn from_code(code: i64) -> Option<OccupancyClass> {
        match code {
            -1 => Some(OccupancyClass::Empty),
            0 => Some(OccupancyClass::Tri0),
            1 => Some(OccupancyClass::Tri1),
            2 => Some(OccupancyClass::Tri2),
            3 => Some(OccupancyClass::Tri3),
            4 => Some(OccupancyClass::Quad),
            5 => Some(OccupancyClass::Octagon),
            6 => Some(OccupancyClass::Slim),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<OccupancyClass> {
        match name {
            "empty" => Some(OccupancyClass::Empty),
            "tri0" => Some(OccupancyClass::Tri0),
            "tri1" => Some(OccupancyClass::Tri1),
            "tri2" => Some(OccupancyClass::Tri2),
            "tri3" => Some(OccupancyClass::Tri3),
            "quad" => Some(OccupancyClass::Quad),
            "octagon" => Some(OccupancyClass::Octagon),
            "slim" => Some(OccupancyClass::Slim),
            _ => None,
        }
    }

    /// Row/column in the fits table (`code + 1`, so `Empty` maps to 0).
    #[inline]
    pub fn table_index(self) -> usize {
        (self.code() + 1) as usize
    }

    #[inline]
    pub fn is_triangle(self) -> bool {
        matches!(
            self,
            OccupancyClass::Tri0 | OccupancyClass::Tri1 | OccupancyClass::Tri2 | OccupancyClass::Tri3
        )
    }

    /// The reference partial order: does `self` fit inside `container`?
    pub fn fits_within(self, container: OccupancyClass) -> bool {
        if self == OccupancyClass::Empty || self == container {
            return true;
        }
        container == OccupancyClass::Quad && (self.is_triangle() || self == OccupancyClass::Quad)
    }
}

/// Occupancy as written in shape files: either the numeric code or its lower-case name.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum OccupancySpec {
    Code(i64),
    Name(String),
}

impl OccupancySpec {
    pub fn resolve(&self) -> Option<OccupancyClass> {
        match self {
            OccupancySpec::Code(c) => OccupancyClass::from_code(*c),
            OccupancySpec::Name(n) => OccupancyClass::from_name(n),
        }
    }
}

impl From<OccupancyClass> for OccupancySpec {
    fn from(c: OccupancyClass) -> Self {
        OccupancySpec::Code(c.code() as i64)
    }
}

const CLASS_COUNT: usize = OccupancyClass::ALL.len();

/// Precomputed 8×8 `fits(subject, container)` table; the only face-culling predicate.
#[derive(Clone, Debug)]
pub struct OccupancyMatcher {
    table: [bool; CLASS_COUNT * CLASS_COUNT],
}

impl OccupancyMatcher {
    pub fn new() -> Self {
        let mut table = [false; CLASS_COUNT * CLASS_COUNT];
        for subject in OccupancyClass::ALL {
            for container in OccupancyClass::ALL {
                table[subject.table_index() * CLASS_COUNT + container.table_index()] =
                    subject.fits_within(container);
            }
        }
        Self { table }
    }

    #[inline]
    pub fn fits(&self, subject: OccupancyClass, container: OccupancyClass) -> bool {
        self.table[subject.table_index() * CLASS_COUNT + container.table_index()]
    }
}

impl Default for OccupancyMatcher {
    fn default() -> Self {
        Self::new()
    }
}
