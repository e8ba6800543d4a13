//! Built-in layout generators.
//!
//! The rotated surface code places data qubits on a d x d grid at odd-odd
//! coordinates and ancillas at even-even coordinates in a checkerboard:
//! X-type columns are interior (X stabilizers terminate on the north and
//! south boundaries), Z-type rows are interior. The repetition code is a
//! line of data qubits with one Z-type ancilla between each pair.

use surfgen_common::{
    Direction, StabType, GATE_ORDER_REP, GATE_ORDER_X, GATE_ORDER_Z,
};

use crate::error::{CompileError, Result};
use crate::layout::{Layout, QubitInfo};

/// Rotated surface code of the given odd distance.
///
/// Qubit labels follow the hardware convention: `D1..D{d^2}` row-major from
/// the south-west corner, `X1..` and `Z1..` in lattice scan order. The
/// logical Z support is the southern data row and the logical X support the
/// western data column.
pub fn rotated_surface_code(distance: usize) -> Result<Layout> {
    if distance < 2 {
        return Err(CompileError::InvalidArgument(format!(
            "distance must be at least 2, got {distance}"
        )));
    }
    let d = distance;
    let mut layout = Layout::new(
        format!("rotated-surface-d{d}"),
        format!("rotated surface code, distance {d}"),
    );

    // Data qubits first: the canonical order puts the final measurement
    // block at indices [0, d^2).
    for row in 0..d {
        for col in 0..d {
            let label = format!("D{}", row * d + col + 1);
            let info = QubitInfo::data().with_coords((2 * col + 1) as i32, (2 * row + 1) as i32);
            layout.add_qubit(label, info)?;
        }
    }

    // Ancillas on the even-even grid. The checkerboard parity picks the
    // stabilizer type; boundary pruning keeps X columns and Z rows interior.
    let mut num_x = 0;
    let mut num_z = 0;
    for ay in 0..=d {
        for ax in 0..=d {
            let stab_type = if (ax + ay) % 2 == 0 {
                if ax == 0 || ax == d {
                    continue;
                }
                StabType::XType
            } else {
                if ay == 0 || ay == d {
                    continue;
                }
                StabType::ZType
            };
            let label = match stab_type {
                StabType::XType => {
                    num_x += 1;
                    format!("X{num_x}")
                }
                StabType::ZType => {
                    num_z += 1;
                    format!("Z{num_z}")
                }
            };
            let info =
                QubitInfo::ancilla(stab_type).with_coords((2 * ax) as i32, (2 * ay) as i32);
            layout.add_qubit(label.clone(), info)?;

            for dir in Direction::ALL {
                let (dx, dy) = dir.shift();
                // Data neighbor in `dir` sits at (2*ax + dx, 2*ay + dy).
                let col = if dx > 0 { ax as i32 } else { ax as i32 - 1 };
                let row = if dy > 0 { ay as i32 } else { ay as i32 - 1 };
                if col < 0 || row < 0 || col >= d as i32 || row >= d as i32 {
                    continue;
                }
                let data = format!("D{}", row as usize * d + col as usize + 1);
                layout.connect(&label, dir, &data)?;
            }
        }
    }

    layout.set_interaction_order(vec![
        (StabType::XType, GATE_ORDER_X.to_vec()),
        (StabType::ZType, GATE_ORDER_Z.to_vec()),
    ]);

    let south_row: Vec<String> = (0..d).map(|col| format!("D{}", col + 1)).collect();
    let west_col: Vec<String> = (0..d).map(|row| format!("D{}", row * d + 1)).collect();
    layout.set_logical_support(StabType::ZType, south_row);
    layout.set_logical_support(StabType::XType, west_col);

    Ok(layout)
}

/// Repetition code of the given distance: `d` data qubits on a line with a
/// Z-type ancilla between each adjacent pair.
pub fn repetition_code(distance: usize) -> Result<Layout> {
    if distance < 2 {
        return Err(CompileError::InvalidArgument(format!(
            "distance must be at least 2, got {distance}"
        )));
    }
    let d = distance;
    let mut layout = Layout::new(
        format!("repetition-d{d}"),
        format!("repetition code, distance {d}"),
    );

    for i in 0..d {
        let info = QubitInfo::data().with_coords(2 * i as i32, 0);
        layout.add_qubit(format!("D{}", i + 1), info)?;
    }
    for i in 0..d - 1 {
        let label = format!("A{}", i + 1);
        let info = QubitInfo::ancilla(StabType::ZType).with_coords(2 * i as i32 + 1, 0);
        layout.add_qubit(label.clone(), info)?;
        layout.connect(&label, Direction::SouthWest, &format!("D{}", i + 1))?;
        layout.connect(&label, Direction::NorthEast, &format!("D{}", i + 2))?;
    }

    layout.set_interaction_order(vec![(StabType::ZType, GATE_ORDER_REP.to_vec())]);
    Ok(layout)
}
