//! Built-in stamp patterns.

/// A named 0/1 mask, rows top to bottom. A `1` marks a live cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub mask: &'static [&'static [u8]],
}

impl Pattern {
    pub fn width(&self) -> usize {
        self.mask.iter().map(|row| row.len()).max().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.mask.len()
    }
}

/// `(dx, dy)` of every `1` entry, row by row
pub(crate) fn mask_offsets<R: AsRef<[u8]>>(mask: &[R]) -> impl Iterator<Item = (i32, i32)> + '_ {
    mask.iter().enumerate().flat_map(|(dy, row)| {
        row.as_ref()
            .iter()
            .enumerate()
            .filter(|&(_, &value)| value == 1)
            .map(move |(dx, _)| (dx as i32, dy as i32))
    })
}

pub const DUCK: Pattern = Pattern {
    name: "Duck",
    mask: &[
        &[0, 0, 1, 1, 1, 0, 0],
        &[0, 1, 1, 1, 1, 1, 0],
        &[1, 1, 0, 1, 0, 1, 1],
        &[1, 1, 1, 1, 1, 1, 1],
        &[0, 1, 1, 0, 1, 1, 0],
        &[0, 0, 1, 1, 1, 0, 0],
    ],
};

pub const GLIDER: Pattern = Pattern {
    name: "Glider",
    mask: &[&[0, 1, 0], &[0, 0, 1], &[1, 1, 1]],
};

pub const BLINKER: Pattern = Pattern {
    name: "Blinker",
    mask: &[&[1, 1, 1]],
};

pub const TOAD: Pattern = Pattern {
    name: "Toad",
    mask: &[&[0, 1, 1, 1], &[1, 1, 1, 0]],
};

pub const BLOCK: Pattern = Pattern {
    name: "Block",
    mask: &[&[1, 1], &[1, 1]],
};

pub const PATTERNS: &[Pattern] = &[DUCK, GLIDER, BLINKER, TOAD, BLOCK];

/// Case-insensitive lookup
pub fn by_name(name: &str) -> Option<&'static Pattern> {
    PATTERNS
        .iter()
        .find(|pattern| pattern.name.eq_ignore_ascii_case(name))
}
