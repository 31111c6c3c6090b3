/*!
addressing.rs - Addressing-mode tags and effective-address resolution.

Overview
========
Every opcode descriptor carries an `AddrMode` tag; `operand_addr` turns
that tag plus the current PC into the effective operand address, reading
operand bytes from the bus. The resolver never advances PC — dispatch
advances it by (instruction length - 1) after the operation runs, which
keeps PC bookkeeping in exactly one place.

Page Crossing
=============
Indexed modes return a `crossed` flag that is true when adding the index
changed the high byte of the address. Whether that costs an extra cycle is
a property of the *encoding*, not the mode: read-type encodings charge +1,
store/RMW encodings bake the worst case into their base cycle count. The
opcode table records this per entry and dispatch applies it.

JMP (indirect)
==============
The original 6502 fetches the high pointer byte without carrying into the
page: a vector at $xxFF wraps to $xx00 instead of crossing. `JmpIndirect`
makes the choice explicit — `Hardware` reproduces the wrap, `Corrected`
reads the vector straight. Only JMP ($6C) consults it.

Misuse
======
Implied and Accumulator instructions have no operand address. Passing
those tags here is a bug in the opcode table, so the resolver panics
rather than inventing an address.
*/

use crate::bus::Bus;
use crate::cpu::state::CpuState;

/// Addressing-mode tag stored in each opcode descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrMode {
    Implied,
    Accumulator,
    Immediate,
    Relative,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
}

/// Behavior of the JMP (indirect) vector read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JmpIndirect {
    /// Reproduce the hardware page-wrap: a vector at $xxFF takes its high
    /// byte from $xx00.
    #[default]
    Hardware,
    /// Read the vector as a plain little-endian word.
    Corrected,
}

/// Resolve the effective operand address for `mode` with PC at the first
/// operand byte. Returns the address and whether an index addition
/// crossed a page boundary.
///
/// # Panics
///
/// Panics on `Implied` and `Accumulator`: those modes have no operand
/// address and reaching here means the opcode table is misconfigured.
pub(crate) fn operand_addr<B: Bus>(cpu: &CpuState, bus: &mut B, mode: AddrMode) -> (u16, bool) {
    match mode {
        // The operand byte itself lives at PC.
        AddrMode::Immediate | AddrMode::Relative => (cpu.pc, false),

        AddrMode::ZeroPage => (bus.read_byte(cpu.pc) as u16, false),
        AddrMode::ZeroPageX => (bus.read_byte(cpu.pc).wrapping_add(cpu.x) as u16, false),
        AddrMode::ZeroPageY => (bus.read_byte(cpu.pc).wrapping_add(cpu.y) as u16, false),

        AddrMode::Absolute => (bus.read_word(cpu.pc), false),
        AddrMode::AbsoluteX => indexed(bus.read_word(cpu.pc), cpu.x),
        AddrMode::AbsoluteY => indexed(bus.read_word(cpu.pc), cpu.y),

        // Word at PC is a pointer; the word it points at is the address.
        // Plain read here; the hardware wrap variant is JMP-only and
        // handled via `jmp_indirect_target`.
        AddrMode::Indirect => {
            let ptr = bus.read_word(cpu.pc);
            (bus.read_word(ptr), false)
        }

        AddrMode::IndirectX => {
            let zp = bus.read_byte(cpu.pc).wrapping_add(cpu.x);
            (read_word_zero_page(bus, zp), false)
        }
        AddrMode::IndirectY => {
            let zp = bus.read_byte(cpu.pc);
            indexed(read_word_zero_page(bus, zp), cpu.y)
        }

        AddrMode::Implied | AddrMode::Accumulator => {
            panic!("addressing mode {mode:?} has no operand address (opcode table bug)")
        }
    }
}

/// Resolve the JMP (indirect) target for the pointer word at PC,
/// honoring the configured vector-read behavior.
pub(crate) fn jmp_indirect_target<B: Bus>(
    cpu: &CpuState,
    bus: &mut B,
    behavior: JmpIndirect,
) -> u16 {
    let ptr = bus.read_word(cpu.pc);
    match behavior {
        JmpIndirect::Hardware => read_word_wrapped_page(bus, ptr),
        JmpIndirect::Corrected => bus.read_word(ptr),
    }
}

#[inline]
fn indexed(base: u16, index: u8) -> (u16, bool) {
    let addr = base.wrapping_add(index as u16);
    (addr, (base & 0xFF00) != (addr & 0xFF00))
}

/// Read a little-endian pointer word from zero page, wrapping the high
/// pointer byte within page zero (standard zero-page indirect behavior).
#[inline]
fn read_word_zero_page<B: Bus>(bus: &mut B, base: u8) -> u16 {
    let lo = bus.read_byte(base as u16) as u16;
    let hi = bus.read_byte(base.wrapping_add(1) as u16) as u16;
    (hi << 8) | lo
}

/// Read a word whose high byte fetch wraps within the same page (the
/// JMP (indirect) hardware behavior).
#[inline]
fn read_word_wrapped_page<B: Bus>(bus: &mut B, addr: u16) -> u16 {
    let lo = bus.read_byte(addr) as u16;
    let hi = bus.read_byte((addr & 0xFF00) | (addr.wrapping_add(1) & 0x00FF)) as u16;
    (hi << 8) | lo
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::Ram;

    fn state_at(pc: u16) -> CpuState {
        CpuState { pc, ..CpuState::new() }
    }

    #[test]
    fn immediate_is_pc_itself() {
        let cpu = state_at(0x8000);
        let mut ram = Ram::new();
        assert_eq!(operand_addr(&cpu, &mut ram, AddrMode::Immediate), (0x8000, false));
    }

    #[test]
    fn zero_page_indexing_wraps() {
        let mut cpu = state_at(0x8000);
        cpu.x = 0x10;
        let mut ram = Ram::new();
        ram.write_byte(0x8000, 0xF8);
        let (addr, crossed) = operand_addr(&cpu, &mut ram, AddrMode::ZeroPageX);
        assert_eq!(addr, 0x0008); // 0xF8 + 0x10 wraps inside page zero
        assert!(!crossed);
    }

    #[test]
    fn absolute_x_reports_page_cross() {
        let mut cpu = state_at(0x8000);
        cpu.x = 0x10;
        let mut ram = Ram::new();
        ram.write_word(0x8000, 0x01FF);
        let (addr, crossed) = operand_addr(&cpu, &mut ram, AddrMode::AbsoluteX);
        assert_eq!(addr, 0x020F);
        assert!(crossed);

        ram.write_word(0x8000, 0x0180);
        let (addr, crossed) = operand_addr(&cpu, &mut ram, AddrMode::AbsoluteX);
        assert_eq!(addr, 0x0190);
        assert!(!crossed);
    }

    #[test]
    fn indirect_x_pointer_wraps_in_zero_page() {
        let mut cpu = state_at(0x8000);
        cpu.x = 0x01;
        let mut ram = Ram::new();
        ram.write_byte(0x8000, 0xFE); // 0xFE + X = 0xFF
        ram.write_byte(0x00FF, 0x34); // pointer low
        ram.write_byte(0x0000, 0x12); // pointer high wraps to $00
        let (addr, _) = operand_addr(&cpu, &mut ram, AddrMode::IndirectX);
        assert_eq!(addr, 0x1234);
    }

    #[test]
    fn indirect_y_adds_after_pointer_read() {
        let mut cpu = state_at(0x8000);
        cpu.y = 0x10;
        let mut ram = Ram::new();
        ram.write_byte(0x8000, 0x40);
        ram.write_word(0x0040, 0x12F8);
        let (addr, crossed) = operand_addr(&cpu, &mut ram, AddrMode::IndirectY);
        assert_eq!(addr, 0x1308);
        assert!(crossed);
    }

    #[test]
    fn jmp_indirect_hardware_wraps_within_page() {
        let cpu = state_at(0x8000);
        let mut ram = Ram::new();
        ram.write_word(0x8000, 0x10FF);
        ram.write_byte(0x10FF, 0x34);
        ram.write_byte(0x1000, 0x12); // wrapped high byte
        ram.write_byte(0x1100, 0x56); // carried high byte
        assert_eq!(jmp_indirect_target(&cpu, &mut ram, JmpIndirect::Hardware), 0x1234);
        assert_eq!(jmp_indirect_target(&cpu, &mut ram, JmpIndirect::Corrected), 0x5634);
    }

    #[test]
    #[should_panic(expected = "no operand address")]
    fn implied_mode_is_a_table_bug() {
        let cpu = state_at(0x8000);
        let mut ram = Ram::new();
        let _ = operand_addr(&cpu, &mut ram, AddrMode::Implied);
    }
}
