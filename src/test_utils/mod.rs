//! Shared test utilities for assembling small machine-code programs.
//!
//! These helpers de-duplicate machine setup across tests in the CPU
//! modules: a flat-RAM machine with the program at a known origin and the
//! reset vector pointed at it. They intentionally support just what the
//! test suite needs.

#![allow(dead_code)]

use crate::bus::{Bus, Ram};
use crate::cpu::Cpu;
use crate::cpu::state::RESET_VECTOR;

/// Default program origin used by the test suite.
pub const ORIGIN: u16 = 0x8000;

/// Build a flat-RAM machine: `program` at `ORIGIN`, reset vector set,
/// CPU reset and ready to step.
pub fn machine(program: &[u8]) -> (Cpu, Ram) {
    machine_at(ORIGIN, program)
}

/// Same as `machine` with an explicit program origin.
pub fn machine_at(origin: u16, program: &[u8]) -> (Cpu, Ram) {
    let mut ram = Ram::new();
    ram.load(origin, program);
    ram.write_word(RESET_VECTOR, origin);
    let mut cpu = Cpu::new();
    cpu.reset(&mut ram);
    (cpu, ram)
}

/// Build a machine and execute exactly `instructions` instructions,
/// panicking on any execution error.
pub fn run_program(program: &[u8], instructions: u64) -> (Cpu, Ram) {
    let (mut cpu, mut ram) = machine(program);
    let executed = cpu
        .run(&mut ram, instructions)
        .unwrap_or_else(|e| panic!("program failed: {e}"));
    assert_eq!(executed, instructions);
    (cpu, ram)
}
