//! DAG-based circuit representation.

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex as PetNodeIndex};
use petgraph::visit::{EdgeRef, Topo, Walker};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{ClbitId, QubitId};

/// Node index type for the circuit DAG.
pub type NodeIndex = PetNodeIndex<u32>;

/// A node in the circuit DAG.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DagNode {
    /// Input node for a wire.
    In(WireId),
    /// Output node for a wire.
    Out(WireId),
    /// Operation node containing an instruction.
    Op(Instruction),
}

impl DagNode {
    /// Check if this is an operation node.
    #[inline]
    pub fn is_op(&self) -> bool {
        matches!(self, DagNode::Op(_))
    }

    /// Get the instruction if this is an operation node.
    #[inline]
    pub fn instruction(&self) -> Option<&Instruction> {
        match self {
            DagNode::Op(inst) => Some(inst),
            _ => None,
        }
    }
}

/// Identifier for a wire in the DAG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireId {
    /// A quantum wire.
    Qubit(QubitId),
    /// A classical wire.
    Clbit(ClbitId),
}

impl From<QubitId> for WireId {
    fn from(q: QubitId) -> Self {
        WireId::Qubit(q)
    }
}

impl From<ClbitId> for WireId {
    fn from(c: ClbitId) -> Self {
        WireId::Clbit(c)
    }
}

/// An edge in the circuit DAG representing a wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DagEdge {
    /// The wire this edge represents.
    pub wire: WireId,
}

/// DAG-based circuit representation.
///
/// Every wire runs from its `In` node through the operations that touch it,
/// in application order, to its `Out` node. Operations on disjoint wires are
/// unordered with respect to each other, which is what [`CircuitDag::depth`]
/// measures.
///
/// The DAG keeps a `wire_front` index mapping each wire to the node just
/// before its output node, so `apply()` finds predecessors in O(1).
#[derive(Debug, Clone, Default)]
pub struct CircuitDag {
    graph: DiGraph<DagNode, DagEdge, u32>,
    qubit_inputs: FxHashMap<QubitId, NodeIndex>,
    qubit_outputs: FxHashMap<QubitId, NodeIndex>,
    clbit_inputs: FxHashMap<ClbitId, NodeIndex>,
    clbit_outputs: FxHashMap<ClbitId, NodeIndex>,
    wire_front: FxHashMap<WireId, NodeIndex>,
}

impl CircuitDag {
    /// Create a new empty circuit DAG.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a qubit to the circuit. Adding an existing qubit is a no-op.
    pub fn add_qubit(&mut self, qubit: QubitId) {
        if self.qubit_inputs.contains_key(&qubit) {
            return;
        }
        let (in_node, out_node) = self.add_wire(WireId::Qubit(qubit));
        self.qubit_inputs.insert(qubit, in_node);
        self.qubit_outputs.insert(qubit, out_node);
    }

    /// Add a classical bit to the circuit. Adding an existing bit is a no-op.
    pub fn add_clbit(&mut self, clbit: ClbitId) {
        if self.clbit_inputs.contains_key(&clbit) {
            return;
        }
        let (in_node, out_node) = self.add_wire(WireId::Clbit(clbit));
        self.clbit_inputs.insert(clbit, in_node);
        self.clbit_outputs.insert(clbit, out_node);
    }

    fn add_wire(&mut self, wire: WireId) -> (NodeIndex, NodeIndex) {
        let in_node = self.graph.add_node(DagNode::In(wire));
        let out_node = self.graph.add_node(DagNode::Out(wire));
        self.graph.add_edge(in_node, out_node, DagEdge { wire });
        self.wire_front.insert(wire, in_node);
        (in_node, out_node)
    }

    /// Apply an instruction to the end of the circuit.
    ///
    /// Fails if a gate gets the wrong number of qubits, an operand is not part
    /// of the circuit, or a qubit appears twice.
    #[allow(clippy::cast_possible_truncation)]
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<NodeIndex> {
        let gate_name = match &instruction.kind {
            InstructionKind::Gate(gate) => Some(gate.name().to_string()),
            _ => None,
        };

        if let InstructionKind::Gate(gate) = &instruction.kind {
            let expected = gate.num_qubits() as usize;
            let got = instruction.qubits.len();
            if expected != got {
                return Err(IrError::QubitCountMismatch {
                    gate_name: gate.name().to_string(),
                    expected: expected as u32,
                    got: got as u32,
                });
            }
        }

        for &qubit in &instruction.qubits {
            if !self.qubit_inputs.contains_key(&qubit) {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: gate_name.clone(),
                });
            }
        }

        for &clbit in &instruction.clbits {
            if !self.clbit_inputs.contains_key(&clbit) {
                return Err(IrError::ClbitNotFound {
                    clbit,
                    gate_name: gate_name.clone(),
                });
            }
        }

        let mut seen = FxHashSet::default();
        for &qubit in &instruction.qubits {
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: gate_name.clone(),
                });
            }
        }

        let wires: Vec<(WireId, NodeIndex)> = instruction
            .qubits
            .iter()
            .map(|q| (WireId::Qubit(*q), self.qubit_outputs[q]))
            .chain(
                instruction
                    .clbits
                    .iter()
                    .map(|c| (WireId::Clbit(*c), self.clbit_outputs[c])),
            )
            .collect();

        let op_node = self.graph.add_node(DagNode::Op(instruction));

        for (wire, out_node) in wires {
            let prev_node = self.wire_front[&wire];
            let eid = self
                .graph
                .edges_directed(prev_node, Direction::Outgoing)
                .find(|e| e.weight().wire == wire && e.target() == out_node)
                .map(|e| e.id())
                .ok_or_else(|| {
                    IrError::InvalidDag(format!(
                        "Missing edge from predecessor to output for wire {wire:?}"
                    ))
                })?;
            self.graph.remove_edge(eid);
            self.graph.add_edge(prev_node, op_node, DagEdge { wire });
            self.graph.add_edge(op_node, out_node, DagEdge { wire });
            self.wire_front.insert(wire, op_node);
        }

        Ok(op_node)
    }

    /// Operations in a topological order.
    ///
    /// Operations sharing a wire always appear in the order they were applied.
    pub fn topological_ops(&self) -> Vec<(NodeIndex, &Instruction)> {
        Topo::new(&self.graph)
            .iter(&self.graph)
            .filter_map(|idx| self.graph[idx].instruction().map(|inst| (idx, inst)))
            .collect()
    }

    /// Get an instruction by node index.
    #[inline]
    pub fn get_instruction(&self, node: NodeIndex) -> Option<&Instruction> {
        self.graph.node_weight(node).and_then(DagNode::instruction)
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.qubit_inputs.len()
    }

    /// Get the number of classical bits.
    #[inline]
    pub fn num_clbits(&self) -> usize {
        self.clbit_inputs.len()
    }

    /// Get the number of operations.
    #[inline]
    pub fn num_ops(&self) -> usize {
        let io_nodes = 2 * (self.qubit_inputs.len() + self.clbit_inputs.len());
        self.graph.node_count().saturating_sub(io_nodes)
    }

    /// Calculate the circuit depth. Barriers do not count as a layer.
    pub fn depth(&self) -> usize {
        let mut depths: FxHashMap<NodeIndex, usize> =
            FxHashMap::with_capacity_and_hasher(self.graph.node_count(), Default::default());
        let mut max_depth = 0usize;

        for node in Topo::new(&self.graph).iter(&self.graph) {
            let max_pred_depth = self
                .graph
                .edges_directed(node, Direction::Incoming)
                .map(|e| depths.get(&e.source()).copied().unwrap_or(0))
                .max()
                .unwrap_or(0);

            let counts = self.graph[node]
                .instruction()
                .is_some_and(|inst| !inst.is_barrier());
            let node_depth = max_pred_depth + usize::from(counts);

            max_depth = max_depth.max(node_depth);
            depths.insert(node, node_depth);
        }

        max_depth
    }

    /// Iterate over qubits, in ascending order.
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> + '_ {
        let mut ids: Vec<_> = self.qubit_inputs.keys().copied().collect();
        ids.sort_unstable();
        ids.into_iter()
    }

    /// Iterate over classical bits, in ascending order.
    pub fn clbits(&self) -> impl Iterator<Item = ClbitId> + '_ {
        let mut ids: Vec<_> = self.clbit_inputs.keys().copied().collect();
        ids.sort_unstable();
        ids.into_iter()
    }

    /// Get a reference to the underlying graph.
    pub fn graph(&self) -> &DiGraph<DagNode, DagEdge, u32> {
        &self.graph
    }

    /// Verify the structural integrity of the DAG.
    ///
    /// Checks the graph is acyclic and that each wire forms a single path
    /// from its `In` node to its `Out` node.
    pub fn verify_integrity(&self) -> IrResult<()> {
        if petgraph::algo::is_cyclic_directed(&self.graph) {
            return Err(IrError::InvalidDag("Graph contains a cycle".into()));
        }

        let qubit_wires = self
            .qubit_inputs
            .iter()
            .map(|(q, n)| (WireId::Qubit(*q), *n, self.qubit_outputs.get(q).copied()));
        let clbit_wires = self
            .clbit_inputs
            .iter()
            .map(|(c, n)| (WireId::Clbit(*c), *n, self.clbit_outputs.get(c).copied()));

        for (wire, in_node, out_node) in qubit_wires.chain(clbit_wires) {
            let out_node = out_node
                .ok_or_else(|| IrError::InvalidDag(format!("Wire {wire:?} has no output node")))?;

            let mut current = in_node;
            let mut steps = 0usize;
            while current != out_node {
                let next: Vec<_> = self
                    .graph
                    .edges_directed(current, Direction::Outgoing)
                    .filter(|e| e.weight().wire == wire)
                    .map(|e| e.target())
                    .collect();
                if next.len() != 1 {
                    return Err(IrError::InvalidDag(format!(
                        "Wire {wire:?} branches or breaks at node {}",
                        current.index()
                    )));
                }
                current = next[0];
                steps += 1;
                if steps > self.graph.node_count() {
                    return Err(IrError::InvalidDag(format!(
                        "Wire {wire:?} never reaches its output node"
                    )));
                }
            }
        }

        Ok(())
    }
}
