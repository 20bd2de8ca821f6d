//! Circuit construction for the superdense coding protocol.
//!
//! ```text
//!         Bell State        Encode: 11        Decode
//! q[0]: ──────░───────H──■──────░───────Z──X────░─────■───H────M→c1─
//!             ░          │      ░               ░     │
//! q[1]: ──────░──────────⊕──────░───────────────░─────⊕──M→c0───────
//! ```

use densecode_ir::{Circuit, ClbitId, QubitId};

use crate::error::ProtocolResult;
use crate::message::Message;

/// Alice's half of the Bell pair; carries the encoding.
pub const ALICE: QubitId = QubitId(0);
/// Bob's half of the Bell pair.
pub const BOB: QubitId = QubitId(1);

/// Entangle Alice and Bob: H on Alice, then CX from Alice to Bob.
pub fn bell_pair(circuit: &mut Circuit, alice: QubitId, bob: QubitId) -> ProtocolResult<()> {
    circuit.h(alice)?.cx(alice, bob)?;
    Ok(())
}

/// Apply Alice's encoding of `message` to her qubit.
///
/// | message | operations |
/// |---------|------------|
/// | 00      | none       |
/// | 01      | X          |
/// | 10      | Z          |
/// | 11      | Z then X   |
pub fn encode(circuit: &mut Circuit, alice: QubitId, message: Message) -> ProtocolResult<()> {
    if message.high() {
        circuit.z(alice)?;
    }
    if message.low() {
        circuit.x(alice)?;
    }
    Ok(())
}

/// Bob's decoding: undo the Bell pair and measure.
///
/// Alice's qubit is measured into `c1` and Bob's into `c0`, so the outcome
/// bitstring (`c1 c0`) reads the same as the message.
pub fn decode(circuit: &mut Circuit, alice: QubitId, bob: QubitId) -> ProtocolResult<()> {
    circuit
        .cx(alice, bob)?
        .h(alice)?
        .measure(alice, ClbitId(1))?
        .measure(bob, ClbitId(0))?;
    Ok(())
}

/// The full two-qubit protocol circuit for `message`.
pub fn superdense_circuit(message: Message) -> ProtocolResult<Circuit> {
    let mut circuit = Circuit::new(format!("superdense_{message}"));
    circuit.add_qreg("q", 2);
    circuit.add_creg("c", 2);

    circuit.labelled_barrier("Bell State")?;
    bell_pair(&mut circuit, ALICE, BOB)?;

    circuit.labelled_barrier(format!("Encode: {message}"))?;
    encode(&mut circuit, ALICE, message)?;

    circuit.labelled_barrier("Decode")?;
    decode(&mut circuit, ALICE, BOB)?;

    Ok(circuit)
}
