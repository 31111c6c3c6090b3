/*!
cpu - 6502 instruction engine, split along the fetch/decode/execute seam.

Layout
======
- `state`: architectural registers, status flags, stack helpers
- `addressing`: mode tags and effective-address resolution
- `opcodes`: the static 256-entry descriptor table
- `execute`: per-mnemonic semantics (ALU, stack choreography, branches)
- `dispatch`: single-instruction fetch/decode/execute
- `core`: the host-facing `Cpu` facade (run loop, halt latch, IRQ entry)

Hosts normally touch only `Cpu`, `CpuState`, the flag constants and
`JmpIndirect`; the inner modules stay crate-private.
*/

pub mod addressing;
pub mod core;
mod dispatch;
mod execute;
pub mod opcodes;
pub mod state;

pub use addressing::{AddrMode, JmpIndirect};
pub use self::core::Cpu;
pub use state::{
    BREAK, BREAK2, CARRY, CpuState, DECIMAL, IRQ_DISABLE, IRQ_VECTOR, NEGATIVE, OVERFLOW,
    RESET_VECTOR, ZERO,
};
