//! Text rendering of circuits for terminal output.
//!
//! Operations are packed into columns: each one lands in the first column to
//! the right of everything already placed on the wires it spans. Multi-qubit
//! gates and barriers span every wire between their outermost qubits. Barrier
//! labels are printed on a header line above their column.
//!
//! ```text
//!       Bell State
//! q0: ─H──■───░─
//!         │   ░
//! q1: ────⊕───░─
//! ```

use std::fmt;

use crate::circuit::Circuit;
use crate::gate::StandardGate;
use crate::instruction::{Instruction, InstructionKind};

const WIRE: char = '─';
const VERTICAL: char = '│';
const BARRIER: char = '░';

/// One placed operation: the text for each qubit row it touches, plus
/// whether the rows between them carry a connector.
struct Cell {
    top: usize,
    bottom: usize,
    symbols: Vec<(usize, String)>,
    connector: char,
    label: Option<String>,
}

fn cell_for(inst: &Instruction) -> Option<Cell> {
    let rows: Vec<usize> = inst.qubits.iter().map(|q| q.index()).collect();
    let top = *rows.iter().min()?;
    let bottom = *rows.iter().max()?;

    let (symbols, connector, label) = match &inst.kind {
        InstructionKind::Gate(gate) => {
            let symbols = match *gate {
                StandardGate::CX => vec![(rows[0], "■".to_string()), (rows[1], "⊕".to_string())],
                other => rows.iter().map(|&r| (r, other.symbol())).collect(),
            };
            (symbols, VERTICAL, None)
        }
        InstructionKind::Measure => {
            let target = inst
                .clbits
                .first()
                .map_or_else(|| "M".to_string(), |c| format!("M→{c}"));
            (vec![(rows[0], target)], VERTICAL, None)
        }
        InstructionKind::Barrier { label } => (
            (top..=bottom).map(|r| (r, BARRIER.to_string())).collect(),
            BARRIER,
            label.clone(),
        ),
    };

    Some(Cell {
        top,
        bottom,
        symbols,
        connector,
        label,
    })
}

fn width(s: &str) -> usize {
    s.chars().count()
}

fn centered(text: &str, column_width: usize, fill: char) -> String {
    let pad = column_width.saturating_sub(width(text));
    let left = pad / 2;
    let right = pad - left;
    let mut out = String::with_capacity(column_width * 3);
    out.extend(std::iter::repeat_n(fill, left));
    out.push_str(text);
    out.extend(std::iter::repeat_n(fill, right));
    out
}

/// Render `circuit` as a multi-line text diagram.
pub fn draw(circuit: &Circuit) -> String {
    let num_rows = circuit.num_qubits();
    if num_rows == 0 {
        return String::new();
    }

    // Column packing.
    let mut columns: Vec<Vec<Cell>> = vec![];
    let mut next_free = vec![0usize; num_rows];
    for inst in circuit.instructions() {
        let Some(cell) = cell_for(inst) else {
            continue;
        };
        let col = next_free[cell.top..=cell.bottom]
            .iter()
            .copied()
            .max()
            .unwrap_or(0);
        if columns.len() <= col {
            columns.resize_with(col + 1, Vec::new);
        }
        for slot in &mut next_free[cell.top..=cell.bottom] {
            *slot = col + 1;
        }
        columns[col].push(cell);
    }

    let widths: Vec<usize> = columns
        .iter()
        .map(|cells| {
            cells
                .iter()
                .flat_map(|c| {
                    c.symbols
                        .iter()
                        .map(|(_, s)| width(s))
                        .chain(c.label.as_deref().map(width))
                })
                .max()
                .unwrap_or(1)
                + 2
        })
        .collect();

    let names: Vec<String> = circuit.qubits().iter().map(|q| format!("{q}: ")).collect();
    let margin = names.iter().map(|n| width(n)).max().unwrap_or(0);

    let mut lines = Vec::with_capacity(2 * num_rows);

    let has_labels = columns.iter().flatten().any(|c| c.label.is_some());
    if has_labels {
        let mut header = " ".repeat(margin + 1);
        for (cells, &w) in columns.iter().zip(&widths) {
            let label = cells.iter().find_map(|c| c.label.as_deref()).unwrap_or("");
            header.push_str(&centered(label, w, ' '));
        }
        lines.push(header.trim_end().to_string());
    }

    for row in 0..num_rows {
        let mut wire = format!("{:<margin$}{WIRE}", names[row]);
        let mut gap = format!("{:<margin$} ", "");

        for (cells, &w) in columns.iter().zip(&widths) {
            let here = cells.iter().find(|c| c.top <= row && row <= c.bottom);
            let symbol = here.and_then(|c| {
                c.symbols
                    .iter()
                    .find(|(r, _)| *r == row)
                    .map(|(_, s)| s.as_str())
            });
            match (here, symbol) {
                (_, Some(s)) => wire.push_str(&centered(s, w, WIRE)),
                (Some(c), None) => {
                    wire.push_str(&centered(&c.connector.to_string(), w, WIRE));
                }
                (None, None) => wire.extend(std::iter::repeat_n(WIRE, w)),
            }

            if row + 1 < num_rows {
                match cells.iter().find(|c| c.top <= row && row < c.bottom) {
                    Some(c) => gap.push_str(&centered(&c.connector.to_string(), w, ' ')),
                    None => gap.push_str(&" ".repeat(w)),
                }
            }
        }

        lines.push(wire);
        if row + 1 < num_rows {
            lines.push(gap.trim_end().to_string());
        }
    }

    lines.join("\n")
}

impl Circuit {
    /// Render the circuit as a text diagram.
    pub fn draw(&self) -> String {
        draw(self)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.draw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qubit::{ClbitId, QubitId};

    #[test]
    fn test_empty_circuit_draws_nothing() {
        assert_eq!(draw(&Circuit::new("empty")), "");
    }

    #[test]
    fn test_bell_circuit_layout() {
        let mut circuit = Circuit::with_size("bell", 2, 0);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap();

        let text = circuit.draw();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("q0: "));
        assert!(lines[0].contains('H'));
        assert!(lines[0].contains('■'));
        assert!(lines[1].contains('│'));
        assert!(lines[2].starts_with("q1: "));
        assert!(lines[2].contains('⊕'));
    }

    #[test]
    fn test_barrier_label_in_header() {
        let mut circuit = Circuit::with_size("t", 2, 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .labelled_barrier("Decode")
            .unwrap()
            .measure(QubitId(0), ClbitId(1))
            .unwrap();

        let text = circuit.draw();
        let lines: Vec<_> = text.lines().collect();
        assert!(lines[0].contains("Decode"));
        assert!(lines[1].contains('░'));
        assert!(lines[1].contains("M→c1"));
        assert!(lines[3].contains('░'));
    }

    #[test]
    fn test_independent_gates_share_a_column() {
        let mut circuit = Circuit::with_size("t", 2, 0);
        circuit.x(QubitId(0)).unwrap().z(QubitId(1)).unwrap();

        let text = circuit.draw();
        let lines: Vec<_> = text.lines().collect();
        let x_col = lines[0].find('X').unwrap();
        let z_col = lines[2].find('Z').unwrap();
        assert_eq!(x_col, z_col);
    }
}
