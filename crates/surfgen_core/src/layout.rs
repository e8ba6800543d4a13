//! Qubit layout: roster, roles, stabilizer types and neighbor structure.
//!
//! The layout is constructed once, before compilation, and is read-only
//! afterwards. Its insertion order is the canonical qubit ordering: it
//! fixes the stim target index of every qubit and, through the per-role
//! orderings, the measurement-record slot arithmetic of the detector
//! resolver. Reordering a layout silently changes every record offset, so
//! the order is never derived from hash maps.

use std::collections::HashMap;

use surfgen_common::{Direction, Role, StabType};

use crate::error::{CompileError, Result};

/// Static attributes of one qubit.
#[derive(Debug, Clone)]
pub struct QubitInfo {
    pub role: Role,
    /// Stabilizer type; `None` for data qubits.
    pub stab_type: Option<StabType>,
    /// Diagonal neighbors, indexed by `Direction as usize`. Boundary
    /// qubits have fewer than four.
    pub neighbors: [Option<String>; 4],
    /// Optional lattice coordinates, used only for circuit annotation.
    pub coords: Option<(i32, i32)>,
}

impl QubitInfo {
    pub fn data() -> Self {
        QubitInfo {
            role: Role::Data,
            stab_type: None,
            neighbors: [None, None, None, None],
            coords: None,
        }
    }

    pub fn ancilla(stab_type: StabType) -> Self {
        QubitInfo {
            role: Role::Anc,
            stab_type: Some(stab_type),
            neighbors: [None, None, None, None],
            coords: None,
        }
    }

    pub fn with_coords(mut self, x: i32, y: i32) -> Self {
        self.coords = Some((x, y));
        self
    }
}

/// Attribute filter for roster queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct QubitFilter {
    pub role: Option<Role>,
    pub stab_type: Option<StabType>,
}

impl QubitFilter {
    pub fn role(role: Role) -> Self {
        QubitFilter {
            role: Some(role),
            stab_type: None,
        }
    }

    pub fn ancillas_of(stab_type: StabType) -> Self {
        QubitFilter {
            role: Some(Role::Anc),
            stab_type: Some(stab_type),
        }
    }

    fn matches(&self, info: &QubitInfo) -> bool {
        if let Some(role) = self.role {
            if info.role != role {
                return false;
            }
        }
        if let Some(stab_type) = self.stab_type {
            if info.stab_type != Some(stab_type) {
                return false;
            }
        }
        true
    }
}

/// A qubit roster with geometric queries.
#[derive(Debug, Clone)]
pub struct Layout {
    name: String,
    description: String,
    qubits: Vec<(String, QubitInfo)>,
    index: HashMap<String, usize>,
    /// Two-qubit gate order per stabilizer type, in processing order.
    interaction_order: Vec<(StabType, Vec<Direction>)>,
    /// Optional logical operator supports over data qubits.
    log_z: Option<Vec<String>>,
    log_x: Option<Vec<String>>,
}

impl Layout {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Layout {
            name: name.into(),
            description: description.into(),
            qubits: Vec::new(),
            index: HashMap::new(),
            interaction_order: Vec::new(),
            log_z: None,
            log_x: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Appends a qubit to the roster. Labels must be unique.
    pub fn add_qubit(&mut self, label: impl Into<String>, info: QubitInfo) -> Result<()> {
        let label = label.into();
        if self.index.contains_key(&label) {
            return Err(CompileError::InvalidArgument(format!(
                "qubit label '{label}' repeated; labels must be unique"
            )));
        }
        self.index.insert(label.clone(), self.qubits.len());
        self.qubits.push((label, info));
        Ok(())
    }

    /// Records a neighbor relation and its mirror image.
    pub fn connect(&mut self, qubit: &str, direction: Direction, neighbor: &str) -> Result<()> {
        let a = self.index_of(qubit)?;
        let b = self.index_of(neighbor)?;
        self.qubits[a].1.neighbors[direction as usize] = Some(neighbor.to_owned());
        self.qubits[b].1.neighbors[direction.opposite() as usize] = Some(qubit.to_owned());
        Ok(())
    }

    pub fn set_interaction_order(&mut self, order: Vec<(StabType, Vec<Direction>)>) {
        self.interaction_order = order;
    }

    pub fn interaction_order(&self) -> &[(StabType, Vec<Direction>)] {
        &self.interaction_order
    }

    pub fn set_logical_support(&mut self, stab_type: StabType, qubits: Vec<String>) {
        match stab_type {
            StabType::ZType => self.log_z = Some(qubits),
            StabType::XType => self.log_x = Some(qubits),
        }
    }

    /// The logical operator support for the given measurement basis, if
    /// one is defined on the layout.
    pub fn logical_support(&self, stab_type: StabType) -> Option<&[String]> {
        match stab_type {
            StabType::ZType => self.log_z.as_deref(),
            StabType::XType => self.log_x.as_deref(),
        }
    }

    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// All qubits matching the filter, in canonical order.
    pub fn get_qubits(&self, filter: QubitFilter) -> Vec<&str> {
        self.qubits
            .iter()
            .filter(|(_, info)| filter.matches(info))
            .map(|(label, _)| label.as_str())
            .collect()
    }

    pub fn data_qubits(&self) -> Vec<&str> {
        self.get_qubits(QubitFilter::role(Role::Data))
    }

    pub fn anc_qubits(&self) -> Vec<&str> {
        self.get_qubits(QubitFilter::role(Role::Anc))
    }

    fn info(&self, qubit: &str) -> Result<&QubitInfo> {
        self.index
            .get(qubit)
            .map(|&i| &self.qubits[i].1)
            .ok_or_else(|| CompileError::UnknownQubit(qubit.to_owned()))
    }

    pub fn role(&self, qubit: &str) -> Result<Role> {
        Ok(self.info(qubit)?.role)
    }

    pub fn stab_type(&self, qubit: &str) -> Result<Option<StabType>> {
        Ok(self.info(qubit)?.stab_type)
    }

    pub fn coords(&self, qubit: &str) -> Result<Option<(i32, i32)>> {
        Ok(self.info(qubit)?.coords)
    }

    /// Neighbors of a qubit, optionally restricted to one direction and
    /// filtered by attributes. Missing directions contribute nothing.
    pub fn get_neighbors(
        &self,
        qubit: &str,
        direction: Option<Direction>,
        filter: QubitFilter,
    ) -> Result<Vec<&str>> {
        let info = self.info(qubit)?;
        let mut neighbors = Vec::new();
        for dir in Direction::ALL {
            if direction.is_some() && direction != Some(dir) {
                continue;
            }
            if let Some(neighbor) = &info.neighbors[dir as usize] {
                let n_info = self.info(neighbor)?;
                if filter.matches(n_info) {
                    neighbors.push(neighbor.as_str());
                }
            }
        }
        Ok(neighbors)
    }

    /// (ancilla, neighbor) pairs for one interaction step: every listed
    /// ancilla paired with its neighbor in `direction`, skipping ancillas
    /// that have none there.
    pub fn neighbor_pairs<'a>(
        &'a self,
        ancillas: &[&'a str],
        direction: Direction,
    ) -> Result<Vec<(&'a str, &'a str)>> {
        let mut pairs = Vec::new();
        for &anc in ancillas {
            let info = self.info(anc)?;
            if let Some(neighbor) = &info.neighbors[direction as usize] {
                pairs.push((anc, neighbor.as_str()));
            }
        }
        Ok(pairs)
    }

    /// Canonical index of a qubit, used as its stim target id.
    pub fn index_of(&self, qubit: &str) -> Result<usize> {
        self.index
            .get(qubit)
            .copied()
            .ok_or_else(|| CompileError::UnknownQubit(qubit.to_owned()))
    }

    /// Index of a data qubit within the data-qubit ordering. This is the
    /// slot the qubit occupies in the final measurement block.
    pub fn data_index_of(&self, qubit: &str) -> Result<usize> {
        self.data_qubits()
            .iter()
            .position(|&q| q == qubit)
            .ok_or_else(|| CompileError::UnknownQubit(qubit.to_owned()))
    }

    /// Index of an ancilla within the ancilla ordering, its slot in every
    /// syndrome measurement block.
    pub fn anc_index_of(&self, qubit: &str) -> Result<usize> {
        self.anc_qubits()
            .iter()
            .position(|&q| q == qubit)
            .ok_or_else(|| CompileError::UnknownQubit(qubit.to_owned()))
    }

    /// A copy of the layout restricted to the given qubits. Neighbor links
    /// pointing outside the subset are dropped.
    pub fn sub_layout(&self, keep: &[&str], name: impl Into<String>) -> Result<Layout> {
        let mut sub = Layout::new(name, self.description.clone());
        sub.interaction_order = self.interaction_order.clone();
        for &label in keep {
            let info = self.info(label)?;
            let mut pruned = info.clone();
            for slot in pruned.neighbors.iter_mut() {
                if let Some(n) = slot {
                    if !keep.contains(&n.as_str()) {
                        *slot = None;
                    }
                }
            }
            sub.add_qubit(label, pruned)?;
        }
        Ok(sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_layout() -> Layout {
        let mut layout = Layout::new("toy", "");
        layout.add_qubit("D1", QubitInfo::data()).unwrap();
        layout.add_qubit("D2", QubitInfo::data()).unwrap();
        layout
            .add_qubit("A1", QubitInfo::ancilla(StabType::ZType))
            .unwrap();
        layout.connect("A1", Direction::SouthWest, "D1").unwrap();
        layout.connect("A1", Direction::NorthEast, "D2").unwrap();
        layout
    }

    #[test]
    fn duplicate_labels_rejected() {
        let mut layout = toy_layout();
        let err = layout.add_qubit("D1", QubitInfo::data()).unwrap_err();
        assert!(matches!(err, CompileError::InvalidArgument(_)));
    }

    #[test]
    fn roster_queries_preserve_order() {
        let layout = toy_layout();
        assert_eq!(layout.data_qubits(), vec!["D1", "D2"]);
        assert_eq!(layout.anc_qubits(), vec!["A1"]);
        assert_eq!(
            layout.get_qubits(QubitFilter::ancillas_of(StabType::ZType)),
            vec!["A1"]
        );
        assert!(layout.get_qubits(QubitFilter::ancillas_of(StabType::XType)).is_empty());
    }

    #[test]
    fn neighbor_relations_are_mirrored() {
        let layout = toy_layout();
        let from_anc = layout
            .get_neighbors("A1", Some(Direction::NorthEast), QubitFilter::default())
            .unwrap();
        assert_eq!(from_anc, vec!["D2"]);
        let back = layout
            .get_neighbors("D2", Some(Direction::SouthWest), QubitFilter::default())
            .unwrap();
        assert_eq!(back, vec!["A1"]);
    }

    #[test]
    fn missing_direction_contributes_nothing() {
        let layout = toy_layout();
        let pairs = layout.neighbor_pairs(&["A1"], Direction::NorthWest).unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn unknown_qubit_is_fatal() {
        let layout = toy_layout();
        assert!(matches!(
            layout.index_of("Q99"),
            Err(CompileError::UnknownQubit(_))
        ));
    }

    #[test]
    fn data_and_anc_slots() {
        let layout = toy_layout();
        assert_eq!(layout.data_index_of("D2").unwrap(), 1);
        assert_eq!(layout.anc_index_of("A1").unwrap(), 0);
    }

    #[test]
    fn sub_layout_drops_external_links() {
        let layout = toy_layout();
        let sub = layout.sub_layout(&["D1", "A1"], "sub").unwrap();
        let neighbors = sub.get_neighbors("A1", None, QubitFilter::default()).unwrap();
        assert_eq!(neighbors, vec!["D1"]);
    }
}
