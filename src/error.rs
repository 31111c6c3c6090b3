/*!
error.rs - Fatal CPU execution errors.

An unknown opcode means the program has wandered into bytes this core does
not emulate; continuing would silently corrupt machine state, so dispatch
surfaces it as an error and the run loop stops. Nothing here is
recoverable or retryable — see the addressing module for the separate
class of table-misconfiguration panics.
*/

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CpuError {
    /// Fetched a byte with no entry in the opcode table. `pc` is the
    /// address the byte was fetched from.
    #[error("illegal opcode ${opcode:02X} at ${pc:04X}")]
    IllegalOpcode { opcode: u8, pc: u16 },
}
