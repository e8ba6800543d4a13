//! Stim circuit text writing and parsing.
//!
//! Writing is the `Display` implementation on
//! [`Circuit`](surfgen_core::Circuit); this module adds the file plumbing
//! and the inverse direction, a line-oriented nom parser covering the
//! instruction subset the generator emits. Blank lines and `#` comments
//! are ignored.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use nom::branch::alt;
use nom::bytes::complete::{tag, take_while1};
use nom::character::complete::{char, i32 as nom_i32, space1, u32 as nom_u32};
use nom::combinator::{all_consuming, map, map_opt, opt};
use nom::multi::{many0, separated_list1};
use nom::number::complete::double;
use nom::sequence::{delimited, preceded, separated_pair, tuple};
use nom::IResult;

use surfgen_common::OpKind;
use surfgen_core::{Circuit, Instruction};

enum Line {
    Tick,
    Detector(Vec<i32>),
    Observable(u32, Vec<i32>),
    Coords(u32, f64, f64),
    Gate(Instruction),
}

fn rec_ref(input: &str) -> IResult<&str, i32> {
    delimited(tag("rec["), nom_i32, char(']'))(input)
}

fn rec_list(input: &str) -> IResult<&str, Vec<i32>> {
    many0(preceded(space1, rec_ref))(input)
}

fn tick(input: &str) -> IResult<&str, Line> {
    map(tag("TICK"), |_| Line::Tick)(input)
}

fn detector(input: &str) -> IResult<&str, Line> {
    map(preceded(tag("DETECTOR"), rec_list), Line::Detector)(input)
}

fn observable(input: &str) -> IResult<&str, Line> {
    map(
        tuple((
            preceded(
                tag("OBSERVABLE_INCLUDE"),
                delimited(char('('), nom_u32, char(')')),
            ),
            rec_list,
        )),
        |(index, offsets)| Line::Observable(index, offsets),
    )(input)
}

fn qubit_coords(input: &str) -> IResult<&str, Line> {
    map(
        tuple((
            preceded(
                tag("QUBIT_COORDS"),
                delimited(
                    char('('),
                    separated_pair(double, char(','), double),
                    char(')'),
                ),
            ),
            preceded(space1, nom_u32),
        )),
        |((x, y), qubit)| Line::Coords(qubit, x, y),
    )(input)
}

fn gate(input: &str) -> IResult<&str, Line> {
    map_opt(
        tuple((
            take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_'),
            opt(delimited(
                char('('),
                separated_list1(char(','), double),
                char(')'),
            )),
            many0(preceded(space1, nom_u32)),
        )),
        |(name, args, targets)| {
            let kind = OpKind::from_name(name)?;
            Some(Line::Gate(Instruction::with_args(
                kind,
                targets,
                args.unwrap_or_default(),
            )))
        },
    )(input)
}

fn line(input: &str) -> IResult<&str, Line> {
    // Named instructions first so the generic gate parser cannot eat
    // their keywords.
    alt((tick, detector, observable, qubit_coords, gate))(input)
}

/// Parse a full circuit from stim text.
pub fn parse_circuit(text: &str) -> Result<Circuit> {
    let mut circuit = Circuit::new();
    for (number, raw) in text.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let (_, parsed) = all_consuming(line)(trimmed)
            .map_err(|e| anyhow!("line {}: cannot parse {trimmed:?}: {e}", number + 1))?;
        match parsed {
            Line::Tick => circuit.tick(),
            Line::Detector(offsets) => circuit.detector(offsets),
            Line::Observable(index, offsets) => circuit.observable_include(index, offsets),
            Line::Coords(qubit, x, y) => circuit.qubit_coords(qubit, x, y),
            Line::Gate(instruction) => circuit.push(instruction),
        }
    }
    Ok(circuit)
}

/// Read and parse a stim circuit file.
pub fn load_circuit_file<P: AsRef<Path>>(path: P) -> Result<Circuit> {
    let text = fs::read_to_string(&path)
        .with_context(|| format!("failed to read circuit file {}", path.as_ref().display()))?;
    parse_circuit(&text)
}

/// Render a circuit and write it to a file.
pub fn write_circuit_file<P: AsRef<Path>>(path: P, circuit: &Circuit) -> Result<()> {
    fs::write(&path, circuit.to_string())
        .with_context(|| format!("failed to write circuit file {}", path.as_ref().display()))
}
