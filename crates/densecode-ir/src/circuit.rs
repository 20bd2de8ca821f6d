//! High-level circuit builder API.

use crate::dag::CircuitDag;
use crate::error::IrResult;
use crate::gate::StandardGate;
use crate::instruction::Instruction;
use crate::qubit::{Clbit, ClbitId, Qubit, QubitId};

/// A quantum circuit.
///
/// Thin builder over [`CircuitDag`]: every gate method validates its operands
/// and returns `&mut Self`, so construction chains with `?`.
#[derive(Debug, Clone)]
pub struct Circuit {
    name: String,
    qubits: Vec<Qubit>,
    clbits: Vec<Clbit>,
    dag: CircuitDag,
    next_qubit_id: u32,
    next_clbit_id: u32,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: vec![],
            clbits: vec![],
            dag: CircuitDag::new(),
            next_qubit_id: 0,
            next_clbit_id: 0,
        }
    }

    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        for _ in 0..num_qubits {
            circuit.add_qubit();
        }
        for _ in 0..num_clbits {
            circuit.add_clbit();
        }
        circuit
    }

    /// Add a single qubit to the circuit.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(self.next_qubit_id);
        self.next_qubit_id += 1;
        self.qubits.push(Qubit::new(id));
        self.dag.add_qubit(id);
        id
    }

    /// Add a quantum register with multiple qubits.
    pub fn add_qreg(&mut self, name: impl Into<String>, size: u32) -> Vec<QubitId> {
        let name = name.into();
        (0..size)
            .map(|i| {
                let id = QubitId(self.next_qubit_id);
                self.next_qubit_id += 1;
                self.qubits.push(Qubit::with_register(id, &name, i));
                self.dag.add_qubit(id);
                id
            })
            .collect()
    }

    /// Add a single classical bit to the circuit.
    pub fn add_clbit(&mut self) -> ClbitId {
        let id = ClbitId(self.next_clbit_id);
        self.next_clbit_id += 1;
        self.clbits.push(Clbit::new(id));
        self.dag.add_clbit(id);
        id
    }

    /// Add a classical register with multiple bits.
    pub fn add_creg(&mut self, name: impl Into<String>, size: u32) -> Vec<ClbitId> {
        let name = name.into();
        (0..size)
            .map(|i| {
                let id = ClbitId(self.next_clbit_id);
                self.next_clbit_id += 1;
                self.clbits.push(Clbit::with_register(id, &name, i));
                self.dag.add_clbit(id);
                id
            })
            .collect()
    }

    // =========================================================================
    // Gates
    // =========================================================================

    fn single(&mut self, gate: StandardGate, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::single_qubit_gate(gate, qubit))?;
        Ok(self)
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::H, qubit)
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::X, qubit)
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::Z, qubit)
    }

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::two_qubit_gate(
            StandardGate::CX,
            control,
            target,
        ))?;
        Ok(self)
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::measure(qubit, clbit))?;
        Ok(self)
    }

    /// Apply a barrier across all qubits, with a label shown in drawings.
    pub fn labelled_barrier(&mut self, label: impl Into<String>) -> IrResult<&mut Self> {
        let qubits: Vec<_> = self.qubits.iter().map(|q| q.id).collect();
        self.dag
            .apply(Instruction::barrier(qubits, Some(label.into())))?;
        Ok(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.clbits.len()
    }

    /// Get the circuit depth.
    pub fn depth(&self) -> usize {
        self.dag.depth()
    }

    /// Instructions in an execution order consistent with every wire.
    pub fn instructions(&self) -> Vec<&Instruction> {
        self.dag
            .topological_ops()
            .into_iter()
            .map(|(_, inst)| inst)
            .collect()
    }

    /// Get the qubits in the circuit.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// Get the classical bits in the circuit.
    pub fn clbits(&self) -> &[Clbit] {
        &self.clbits
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Create a measured Bell state circuit.
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::with_size("bell", 2, 2);
        let q0 = QubitId(0);
        let q1 = QubitId(1);

        circuit
            .h(q0)?
            .cx(q0, q1)?
            .measure(q0, ClbitId(0))?
            .measure(q1, ClbitId(1))?;

        Ok(circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("test");
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 0);
        assert_eq!(circuit.num_clbits(), 0);
    }

    #[test]
    fn test_add_registers() {
        let mut circuit = Circuit::new("test");
        let qreg = circuit.add_qreg("q", 2);
        let creg = circuit.add_creg("c", 2);

        assert_eq!(qreg, vec![QubitId(0), QubitId(1)]);
        assert_eq!(creg, vec![ClbitId(0), ClbitId(1)]);
        assert_eq!(format!("{}", circuit.qubits()[1]), "q[1]");
    }

    #[test]
    fn test_bell_state() {
        let circuit = Circuit::bell().unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.num_clbits(), 2);
        assert_eq!(circuit.depth(), 3); // H, CX, parallel measures
    }

    #[test]
    fn test_single_qubit_gates_stack_on_one_wire() {
        let mut circuit = Circuit::with_size("test", 1, 0);
        circuit
            .z(QubitId(0))
            .unwrap()
            .x(QubitId(0))
            .unwrap()
            .h(QubitId(0))
            .unwrap();

        assert_eq!(circuit.depth(), 3);
        let names: Vec<_> = circuit.instructions().iter().map(|i| i.name()).collect();
        assert_eq!(names, ["z", "x", "h"]);
    }

    #[test]
    fn test_labelled_barrier_spans_all_qubits() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        circuit
            .h(QubitId(0))
            .unwrap()
            .labelled_barrier("Bell State")
            .unwrap();

        let insts = circuit.instructions();
        assert_eq!(insts.len(), 2);
        assert!(insts[1].is_barrier());
        assert_eq!(insts[1].qubits.len(), 2);
    }

    #[test]
    fn test_invalid_operand_propagates() {
        let mut circuit = Circuit::with_size("test", 1, 1);
        assert!(circuit.cx(QubitId(0), QubitId(1)).is_err());
        assert!(circuit.measure(QubitId(0), ClbitId(2)).is_err());
    }
}
