/*!
core.rs - Host-facing CPU facade: lifecycle, run loop, interrupt entry.

Overview
========
`Cpu` wraps the architectural `CpuState` with everything a host embedding
the core needs and the instruction set itself does not define: total cycle
accounting, the JMP (indirect) behavior choice, a halt latch, and maskable
interrupt injection.

Halting
=======
Nothing in the instruction set stops the machine — BRK is a software
interrupt that vectors and keeps going, exactly like hardware. Stopping is
a host decision: call `halt` (from a memory-mapped device, a debugger, a
test harness) and `run` returns after the current instruction. The latch
survives until `resume` or `reset`.

Interrupts
==========
`interrupt` models a maskable IRQ line assertion, polled between
instructions: honored only when IRQ_DISABLE is clear, pushes PC and status
with BREAK *clear* (the bit that distinguishes an IRQ frame from a BRK
frame), masks further IRQs, and vectors through $FFFE. Seven cycles, same
as BRK.
*/

use log::{debug, trace};

use crate::bus::Bus;
use crate::cpu::addressing::JmpIndirect;
use crate::cpu::dispatch;
use crate::cpu::state::{CpuState, IRQ_DISABLE, IRQ_VECTOR};
use crate::error::CpuError;

/// Cycles consumed by an interrupt entry sequence (BRK or IRQ).
const INTERRUPT_CYCLES: u64 = 7;

/// The 6502 instruction engine.
#[derive(Debug, Clone)]
pub struct Cpu {
    state: CpuState,
    jmp_indirect: JmpIndirect,
    cycles: u64,
    halted: bool,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// Create a CPU with zeroed registers and the hardware JMP (indirect)
    /// page-wrap behavior. Call `reset` before executing.
    pub fn new() -> Self {
        Self {
            state: CpuState::new(),
            jmp_indirect: JmpIndirect::default(),
            cycles: 0,
            halted: false,
        }
    }

    /// Create a CPU with an explicit JMP (indirect) vector-read behavior.
    pub fn with_jmp_indirect(behavior: JmpIndirect) -> Self {
        Self {
            jmp_indirect: behavior,
            ..Self::new()
        }
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// Reset registers, clear the halt latch and cycle counter, and load
    /// PC from the reset vector at $FFFC/$FFFD.
    pub fn reset<B: Bus>(&mut self, bus: &mut B) {
        self.state.reset(bus);
        self.cycles = 0;
        self.halted = false;
        debug!("reset: pc={:04X}", self.state.pc);
    }

    /// Latch the halt signal; `run` returns after the instruction in
    /// flight and `step` becomes a no-op until `resume` or `reset`.
    pub fn halt(&mut self) {
        trace!("halt latched at pc={:04X}", self.state.pc);
        self.halted = true;
    }

    /// Clear the halt latch.
    pub fn resume(&mut self) {
        self.halted = false;
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    // ---------------------------------------------------------------------
    // Execution
    // ---------------------------------------------------------------------

    /// Execute one instruction and return the cycles it consumed
    /// (0 while halted).
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32, CpuError> {
        if self.halted {
            return Ok(0);
        }
        let cycles = dispatch::step(&mut self.state, bus, self.jmp_indirect)?;
        self.cycles += cycles as u64;
        Ok(cycles)
    }

    /// Execute up to `max_instructions` instructions, stopping early if
    /// the halt latch is set. Returns the number actually executed; the
    /// first illegal opcode aborts the loop with its error.
    pub fn run<B: Bus>(&mut self, bus: &mut B, max_instructions: u64) -> Result<u64, CpuError> {
        let mut executed = 0;
        while executed < max_instructions && !self.halted {
            self.step(bus)?;
            executed += 1;
        }
        Ok(executed)
    }

    /// Assert the maskable IRQ line. Ignored while IRQ_DISABLE is set;
    /// otherwise enters the interrupt sequence and returns true.
    pub fn interrupt<B: Bus>(&mut self, bus: &mut B) -> bool {
        if self.state.is_flag_set(IRQ_DISABLE) {
            return false;
        }
        trace!("irq taken at pc={:04X}", self.state.pc);
        let pc = self.state.pc;
        self.state.push_word(bus, pc);
        let status = self.state.status_for_push(false);
        self.state.push(bus, status);
        self.state.set_flag_bit(IRQ_DISABLE);
        self.state.pc = bus.read_word(IRQ_VECTOR);
        self.cycles += INTERRUPT_CYCLES;
        true
    }

    // ---------------------------------------------------------------------
    // Inspection
    // ---------------------------------------------------------------------

    /// Architectural register file, for snapshotting and test setup.
    pub fn state(&self) -> &CpuState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut CpuState {
        &mut self.state
    }

    /// Total cycles consumed since the last reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn jmp_indirect(&self) -> JmpIndirect {
        self.jmp_indirect
    }

    pub fn set_jmp_indirect(&mut self, behavior: JmpIndirect) {
        self.jmp_indirect = behavior;
    }
}
