//! JSON documents for layouts and hardware setups.
//!
//! The on-disk schema mirrors the in-memory types field by field, with
//! roles, stabilizer types and directions spelled out as their canonical
//! text labels. Neighbor links are stored on the ancilla side only; the
//! mirror links on data qubits are reconstructed on load.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use surfgen_common::{Direction, Role, StabType};
use surfgen_core::{Layout, QubitFilter, QubitInfo, Setup};

#[derive(Debug, Serialize, Deserialize)]
pub struct QubitDef {
    pub label: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stab_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coords: Option<(i32, i32)>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub neighbors: BTreeMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LayoutDef {
    pub name: String,
    pub description: String,
    pub qubits: Vec<QubitDef>,
    pub interaction_order: Vec<(String, Vec<String>)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_z: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_x: Option<Vec<String>>,
}

/// Serializable snapshot of a [`Layout`].
pub fn layout_to_def(layout: &Layout) -> Result<LayoutDef> {
    let mut qubits = Vec::new();
    for label in layout.get_qubits(QubitFilter::default()) {
        let role = layout.role(label)?;
        let mut neighbors = BTreeMap::new();
        if role == Role::Anc {
            for dir in Direction::ALL {
                for neighbor in layout.get_neighbors(label, Some(dir), QubitFilter::default())? {
                    neighbors.insert(dir.as_str().to_owned(), neighbor.to_owned());
                }
            }
        }
        qubits.push(QubitDef {
            label: label.to_owned(),
            role: role.as_str().to_owned(),
            stab_type: layout.stab_type(label)?.map(|s| s.as_str().to_owned()),
            coords: layout.coords(label)?,
            neighbors,
        });
    }
    Ok(LayoutDef {
        name: layout.name().to_owned(),
        description: layout.description().to_owned(),
        qubits,
        interaction_order: layout
            .interaction_order()
            .iter()
            .map(|(stab_type, order)| {
                (
                    stab_type.as_str().to_owned(),
                    order.iter().map(|d| d.as_str().to_owned()).collect(),
                )
            })
            .collect(),
        log_z: layout
            .logical_support(StabType::ZType)
            .map(|s| s.to_vec()),
        log_x: layout
            .logical_support(StabType::XType)
            .map(|s| s.to_vec()),
    })
}

/// Rebuild a [`Layout`] from its on-disk form.
pub fn layout_from_def(def: &LayoutDef) -> Result<Layout> {
    let mut layout = Layout::new(def.name.clone(), def.description.clone());

    for qubit in &def.qubits {
        let role = Role::from_name(&qubit.role)
            .ok_or_else(|| anyhow!("qubit {}: unknown role {:?}", qubit.label, qubit.role))?;
        let stab_type = match &qubit.stab_type {
            Some(name) => Some(StabType::from_name(name).ok_or_else(|| {
                anyhow!("qubit {}: unknown stabilizer type {name:?}", qubit.label)
            })?),
            None => None,
        };
        let mut info = match role {
            Role::Data => QubitInfo::data(),
            Role::Anc => {
                let stab_type = stab_type
                    .ok_or_else(|| anyhow!("ancilla {} lacks a stabilizer type", qubit.label))?;
                QubitInfo::ancilla(stab_type)
            }
        };
        if let Some((x, y)) = qubit.coords {
            info = info.with_coords(x, y);
        }
        layout.add_qubit(qubit.label.clone(), info)?;
    }

    for qubit in &def.qubits {
        for (dir_name, neighbor) in &qubit.neighbors {
            let dir = Direction::from_name(dir_name)
                .ok_or_else(|| anyhow!("qubit {}: unknown direction {dir_name:?}", qubit.label))?;
            layout.connect(&qubit.label, dir, neighbor)?;
        }
    }

    let mut interaction_order = Vec::new();
    for (stab_name, order) in &def.interaction_order {
        let stab_type = StabType::from_name(stab_name)
            .ok_or_else(|| anyhow!("unknown stabilizer type {stab_name:?}"))?;
        let mut dirs = Vec::with_capacity(order.len());
        for dir_name in order {
            dirs.push(
                Direction::from_name(dir_name)
                    .ok_or_else(|| anyhow!("unknown direction {dir_name:?}"))?,
            );
        }
        interaction_order.push((stab_type, dirs));
    }
    layout.set_interaction_order(interaction_order);

    if let Some(support) = &def.log_z {
        layout.set_logical_support(StabType::ZType, support.clone());
    }
    if let Some(support) = &def.log_x {
        layout.set_logical_support(StabType::XType, support.clone());
    }

    Ok(layout)
}

pub fn load_layout_file<P: AsRef<Path>>(path: P) -> Result<Layout> {
    let text = fs::read_to_string(&path)
        .with_context(|| format!("failed to read layout file {}", path.as_ref().display()))?;
    let def: LayoutDef = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse layout file {}", path.as_ref().display()))?;
    layout_from_def(&def)
}

pub fn save_layout_file<P: AsRef<Path>>(path: P, layout: &Layout) -> Result<()> {
    let def = layout_to_def(layout)?;
    let text = serde_json::to_string_pretty(&def)?;
    fs::write(&path, text)
        .with_context(|| format!("failed to write layout file {}", path.as_ref().display()))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ParamDef {
    pub param: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub qubits: Vec<String>,
    pub value: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetupDef {
    pub name: String,
    pub description: String,
    pub params: Vec<ParamDef>,
}

/// Serializable snapshot of a [`Setup`], entries sorted for stable
/// output.
pub fn setup_to_def(setup: &Setup) -> SetupDef {
    let mut params: Vec<ParamDef> = setup
        .entries()
        .map(|(param, qubits, value)| ParamDef {
            param: param.to_owned(),
            qubits: qubits.to_vec(),
            value,
        })
        .collect();
    params.sort_by(|a, b| (&a.param, &a.qubits).cmp(&(&b.param, &b.qubits)));
    SetupDef {
        name: setup.name().to_owned(),
        description: setup.description().to_owned(),
        params,
    }
}

pub fn setup_from_def(def: &SetupDef) -> Setup {
    let mut setup = Setup::new(def.name.clone(), def.description.clone());
    for entry in &def.params {
        let qubits: Vec<&str> = entry.qubits.iter().map(String::as_str).collect();
        setup.set(&entry.param, &qubits, entry.value);
    }
    setup
}

pub fn load_setup_file<P: AsRef<Path>>(path: P) -> Result<Setup> {
    let text = fs::read_to_string(&path)
        .with_context(|| format!("failed to read setup file {}", path.as_ref().display()))?;
    let def: SetupDef = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse setup file {}", path.as_ref().display()))?;
    Ok(setup_from_def(&def))
}

pub fn save_setup_file<P: AsRef<Path>>(path: P, setup: &Setup) -> Result<()> {
    let text = serde_json::to_string_pretty(&setup_to_def(setup))?;
    fs::write(&path, text)
        .with_context(|| format!("failed to write setup file {}", path.as_ref().display()))
}
