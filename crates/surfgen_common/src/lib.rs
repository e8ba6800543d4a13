//! Common definitions shared across the surface-code experiment generator.
//!
//! This crate provides the vocabulary used by every other crate in the
//! workspace: qubit roles, stabilizer types, lattice directions, the
//! physical-operation vocabulary with its exact stim text names, and the
//! canonical two-qubit interaction orders for the surface-code schedule.
//! It is dependency-free and usable from any context.

#![no_std]

/// Static role of a qubit within a layout.
///
/// Data qubits carry the encoded logical information; ancilla qubits are
/// measured every round to extract stabilizer parities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Data qubit, part of the logical codeword.
    Data,
    /// Ancilla qubit, mediates one stabilizer parity check.
    Anc,
}

impl Role {
    /// Canonical text label, as used in layout files.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Data => "data",
            Role::Anc => "anc",
        }
    }

    /// Parses a canonical text label.
    pub fn from_name(name: &str) -> Option<Role> {
        match name {
            "data" => Some(Role::Data),
            "anc" => Some(Role::Anc),
            _ => None,
        }
    }
}

/// Pauli basis of the stabilizer check an ancilla performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StabType {
    /// X-type check: the ancilla measures a product of Pauli X operators.
    XType,
    /// Z-type check: the ancilla measures a product of Pauli Z operators.
    ZType,
}

impl StabType {
    /// Canonical text label, as used in layout files.
    pub fn as_str(self) -> &'static str {
        match self {
            StabType::XType => "x_type",
            StabType::ZType => "z_type",
        }
    }

    /// Parses a canonical text label.
    pub fn from_name(name: &str) -> Option<StabType> {
        match name {
            "x_type" => Some(StabType::XType),
            "z_type" => Some(StabType::ZType),
            _ => None,
        }
    }
}

/// Diagonal connection direction between an ancilla and a data qubit.
///
/// On the rotated surface-code lattice every ancilla touches up to four
/// data qubits, one per diagonal. Boundary ancillas are missing some of
/// them, which simply means no gate is scheduled in that direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    /// All four directions in declaration order.
    pub const ALL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// Canonical text label, as used in layout files.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::NorthEast => "north_east",
            Direction::NorthWest => "north_west",
            Direction::SouthEast => "south_east",
            Direction::SouthWest => "south_west",
        }
    }

    /// Parses a canonical text label.
    pub fn from_name(name: &str) -> Option<Direction> {
        match name {
            "north_east" => Some(Direction::NorthEast),
            "north_west" => Some(Direction::NorthWest),
            "south_east" => Some(Direction::SouthEast),
            "south_west" => Some(Direction::SouthWest),
            _ => None,
        }
    }

    /// The direction pointing back from the neighbor to this qubit.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::NorthEast => Direction::SouthWest,
            Direction::NorthWest => Direction::SouthEast,
            Direction::SouthEast => Direction::NorthWest,
            Direction::SouthWest => Direction::NorthEast,
        }
    }

    /// Coordinate shift of the neighbor (east = +x, north = +y).
    pub fn shift(self) -> (i32, i32) {
        match self {
            Direction::NorthEast => (1, 1),
            Direction::NorthWest => (-1, 1),
            Direction::SouthEast => (1, -1),
            Direction::SouthWest => (-1, -1),
        }
    }
}

/// Two-qubit gate order for X-type stabilizers in a surface-code round.
///
/// The X and Z orders are two different permutations of the four diagonals,
/// chosen so that both stabilizer types interleave without qubit conflicts
/// (the Versluis et al. pipelined schedule).
pub const GATE_ORDER_X: [Direction; 4] = [
    Direction::NorthEast,
    Direction::NorthWest,
    Direction::SouthEast,
    Direction::SouthWest,
];

/// Two-qubit gate order for Z-type stabilizers in a surface-code round.
pub const GATE_ORDER_Z: [Direction; 4] = [
    Direction::NorthEast,
    Direction::SouthEast,
    Direction::NorthWest,
    Direction::SouthWest,
];

/// Two-qubit gate order for the repetition code, where every ancilla sits
/// on a line between two data qubits.
pub const GATE_ORDER_REP: [Direction; 2] = [Direction::NorthEast, Direction::SouthWest];

/// Physical operation vocabulary for compiled circuits.
///
/// Each variant corresponds to one instruction name in the stim circuit
/// text format. The split between unitary gates, measurement-like
/// operations and noise channels drives idle bookkeeping and the
/// deterministic frame checks, so it is encoded here once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    /// Hadamard gate.
    Hadamard,
    /// Phase (S) gate.
    SGate,
    /// Pauli X gate.
    XGate,
    /// Pauli Z gate.
    ZGate,
    /// Controlled-phase gate on consecutive target pairs.
    Cphase,
    /// Z-basis measurement, appends one record per target.
    Measure,
    /// Reset to |0>.
    Reset,
    /// Single-qubit depolarizing channel.
    Depolarize1,
    /// Two-qubit depolarizing channel on consecutive target pairs.
    Depolarize2,
    /// Classical X (bit-flip) error channel.
    XError,
    /// General single-qubit Pauli channel with (px, py, pz) arguments.
    PauliChannel1,
}

impl OpKind {
    /// The stim instruction name. This is the interchange contract with
    /// the external simulator and decoder tooling; do not abbreviate.
    pub fn as_str(self) -> &'static str {
        match self {
            OpKind::Hadamard => "H",
            OpKind::SGate => "S",
            OpKind::XGate => "X",
            OpKind::ZGate => "Z",
            OpKind::Cphase => "CZ",
            OpKind::Measure => "M",
            OpKind::Reset => "R",
            OpKind::Depolarize1 => "DEPOLARIZE1",
            OpKind::Depolarize2 => "DEPOLARIZE2",
            OpKind::XError => "X_ERROR",
            OpKind::PauliChannel1 => "PAULI_CHANNEL_1",
        }
    }

    /// Parses a stim instruction name.
    pub fn from_name(name: &str) -> Option<OpKind> {
        let kind = match name {
            "H" => OpKind::Hadamard,
            "S" => OpKind::SGate,
            "X" => OpKind::XGate,
            "Z" => OpKind::ZGate,
            "CZ" => OpKind::Cphase,
            "M" => OpKind::Measure,
            "R" => OpKind::Reset,
            "DEPOLARIZE1" => OpKind::Depolarize1,
            "DEPOLARIZE2" => OpKind::Depolarize2,
            "X_ERROR" => OpKind::XError,
            "PAULI_CHANNEL_1" => OpKind::PauliChannel1,
            _ => return None,
        };
        Some(kind)
    }

    /// True for probabilistic noise channels, which never count as
    /// activity when computing idle sets.
    pub fn is_noise(self) -> bool {
        matches!(
            self,
            OpKind::Depolarize1 | OpKind::Depolarize2 | OpKind::XError | OpKind::PauliChannel1
        )
    }

    /// True for operations that append measurement records.
    pub fn is_measurement(self) -> bool {
        matches!(self, OpKind::Measure)
    }

    /// True for operations acting on consecutive target pairs.
    pub fn is_two_qubit(self) -> bool {
        matches!(self, OpKind::Cphase | OpKind::Depolarize2)
    }
}
