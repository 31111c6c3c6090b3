/*!
rs6502 - An instruction-level MOS 6502 CPU core.

Executes the 151 documented opcodes against a pluggable 16-bit memory
bus, with instruction-granularity cycle accounting (base cost plus
page-cross and branch penalties). Decimal mode and undocumented opcodes
are out of scope: the former is ignored as a flag, the latter surface as
`CpuError::IllegalOpcode`.

```no_run
use rs6502::{Cpu, Ram, RESET_VECTOR};
use rs6502::bus::Bus;

let mut ram = Ram::new();
ram.load(0x8000, &[0xA9, 0x42, 0xEA]); // LDA #$42; NOP
ram.write_word(RESET_VECTOR, 0x8000);

let mut cpu = Cpu::new();
cpu.reset(&mut ram);
cpu.run(&mut ram, 2).unwrap();
assert_eq!(cpu.state().a, 0x42);
```
*/

pub mod bus;
pub mod cpu;
pub mod error;
pub mod test_utils;

#[cfg(test)]
mod tests;

pub use bus::{Bus, Ram};
pub use cpu::{
    AddrMode, BREAK, BREAK2, CARRY, Cpu, CpuState, DECIMAL, IRQ_DISABLE, IRQ_VECTOR, JmpIndirect,
    NEGATIVE, OVERFLOW, RESET_VECTOR, ZERO,
};
pub use error::CpuError;
