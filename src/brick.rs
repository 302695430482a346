/// 4x4 row-major brick matrix, `1` marks a filled cell.
pub type Shape = [[u8; 4]; 4];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BrickKind {
    I, O, T, S, Z, J, L,
}

impl BrickKind {
    pub const ALL: [BrickKind; 7] = [
        BrickKind::I,
        BrickKind::O,
        BrickKind::T,
        BrickKind::S,
        BrickKind::Z,
        BrickKind::J,
        BrickKind::L,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Rotation states in clockwise order.
    pub fn rotations(self) -> &'static [Shape] {
        match self {
            BrickKind::I => &I_SHAPES,
            BrickKind::O => &O_SHAPES,
            BrickKind::T => &T_SHAPES,
            BrickKind::S => &S_SHAPES,
            BrickKind::Z => &Z_SHAPES,
            BrickKind::J => &J_SHAPES,
            BrickKind::L => &L_SHAPES,
        }
    }

    pub fn spawn_shape(self) -> Shape {
        self.rotations()[0]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BrickKind::I => "I",
            BrickKind::O => "O",
            BrickKind::T => "T",
            BrickKind::S => "S",
            BrickKind::Z => "Z",
            BrickKind::J => "J",
            BrickKind::L => "L",
        }
    }
}

// -------------------------------------------------------------------
// Rotation tables.
const I_SHAPES: [Shape; 2] = [
    [[0, 0, 0, 0],
     [1, 1, 1, 1],
     [0, 0, 0, 0],
     [0, 0, 0, 0]],
    [[0, 0, 1, 0],
     [0, 0, 1, 0],
     [0, 0, 1, 0],
     [0, 0, 1, 0]],
];

const O_SHAPES: [Shape; 1] = [
    [[0, 1, 1, 0],
     [0, 1, 1, 0],
     [0, 0, 0, 0],
     [0, 0, 0, 0]],
];

const T_SHAPES: [Shape; 4] = [
    [[0, 1, 0, 0],
     [1, 1, 1, 0],
     [0, 0, 0, 0],
     [0, 0, 0, 0]],
    [[0, 1, 0, 0],
     [0, 1, 1, 0],
     [0, 1, 0, 0],
     [0, 0, 0, 0]],
    [[0, 0, 0, 0],
     [1, 1, 1, 0],
     [0, 1, 0, 0],
     [0, 0, 0, 0]],
    [[0, 1, 0, 0],
     [1, 1, 0, 0],
     [0, 1, 0, 0],
     [0, 0, 0, 0]],
];

const S_SHAPES: [Shape; 2] = [
    [[0, 1, 1, 0],
     [1, 1, 0, 0],
     [0, 0, 0, 0],
     [0, 0, 0, 0]],
    [[0, 1, 0, 0],
     [0, 1, 1, 0],
     [0, 0, 1, 0],
     [0, 0, 0, 0]],
];

const Z_SHAPES: [Shape; 2] = [
    [[1, 1, 0, 0],
     [0, 1, 1, 0],
     [0, 0, 0, 0],
     [0, 0, 0, 0]],
    [[0, 0, 1, 0],
     [0, 1, 1, 0],
     [0, 1, 0, 0],
     [0, 0, 0, 0]],
];

const J_SHAPES: [Shape; 4] = [
    [[1, 0, 0, 0],
     [1, 1, 1, 0],
     [0, 0, 0, 0],
     [0, 0, 0, 0]],
    [[0, 1, 1, 0],
     [0, 1, 0, 0],
     [0, 1, 0, 0],
     [0, 0, 0, 0]],
    [[0, 0, 0, 0],
     [1, 1, 1, 0],
     [0, 0, 1, 0],
     [0, 0, 0, 0]],
    [[0, 1, 0, 0],
     [0, 1, 0, 0],
     [1, 1, 0, 0],
     [0, 0, 0, 0]],
];

const L_SHAPES: [Shape; 4] = [
    [[0, 0, 1, 0],
     [1, 1, 1, 0],
     [0, 0, 0, 0],
     [0, 0, 0, 0]],
    [[0, 1, 0, 0],
     [0, 1, 0, 0],
     [0, 1, 1, 0],
     [0, 0, 0, 0]],
    [[0, 0, 0, 0],
     [1, 1, 1, 0],
     [1, 0, 0, 0],
     [0, 0, 0, 0]],
    [[1, 1, 0, 0],
     [0, 1, 0, 0],
     [0, 1, 0, 0],
     [0, 0, 0, 0]],
];

/// Iterates the `(col, row)` offsets of the filled cells of a shape.
pub fn filled_cells(shape: &Shape) -> impl Iterator<Item = (i32, i32)> + '_ {
    shape.iter().enumerate().flat_map(|(row, cells)| {
        cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell != 0)
            .map(move |(col, _)| (col as i32, row as i32))
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

// -------------------------------------------------------------------
// Tracks the rotation state of one brick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BrickRotator {
    kind: BrickKind,
    index: usize,
}

impl BrickRotator {
    pub fn new(kind: BrickKind) -> Self {
        Self { kind, index: 0 }
    }

    pub fn kind(&self) -> BrickKind {
        self.kind
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn shape(&self) -> Shape {
        self.kind.rotations()[self.index]
    }

    /// Index and shape one step away in `rotation`, without committing.
    pub fn peek(&self, rotation: Rotation) -> (usize, Shape) {
        let count = self.kind.rotations().len();
        let index = match rotation {
            Rotation::Clockwise => (self.index + 1) % count,
            Rotation::CounterClockwise => (self.index + count - 1) % count,
        };
        (index, self.kind.rotations()[index])
    }

    pub fn set_index(&mut self, index: usize) {
        self.index = index % self.kind.rotations().len();
    }
}
