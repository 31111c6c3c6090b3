/*!
execute.rs - Instruction semantic helpers (ALU, stack, shifts, RMW,
branch arithmetic).

Overview
========
Centralizes the side-effect logic of each mnemonic so dispatch stays a
thin match over tags. Helpers mutate `CpuState` (and the bus where the
instruction touches memory) and nothing else: no PC bookkeeping beyond
what the instruction itself defines, no cycle accounting except the
branch helper, which returns its dynamic penalty for dispatch to add.

Flag Discipline
===============
Loads, transfers (except TXS), logical ops, arithmetic, inc/dec and
shifts/rotates end in `update_zn`. Stores and flag toggles touch no flags.
BIT, ADC/SBC and the compares have their own flag rules, implemented here
verbatim from the hardware definition.
*/

use crate::bus::Bus;
use crate::cpu::state::{CARRY, CpuState, NEGATIVE, OVERFLOW, ZERO};

// ---------------------------------------------------------------------------
// Loads / transfers
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn lda(cpu: &mut CpuState, v: u8) {
    cpu.a = v;
    cpu.update_zn(v);
}

#[inline]
pub(crate) fn ldx(cpu: &mut CpuState, v: u8) {
    cpu.x = v;
    cpu.update_zn(v);
}

#[inline]
pub(crate) fn ldy(cpu: &mut CpuState, v: u8) {
    cpu.y = v;
    cpu.update_zn(v);
}

#[inline]
pub(crate) fn tax(cpu: &mut CpuState) {
    cpu.x = cpu.a;
    cpu.update_zn(cpu.x);
}

#[inline]
pub(crate) fn tay(cpu: &mut CpuState) {
    cpu.y = cpu.a;
    cpu.update_zn(cpu.y);
}

#[inline]
pub(crate) fn txa(cpu: &mut CpuState) {
    cpu.a = cpu.x;
    cpu.update_zn(cpu.a);
}

#[inline]
pub(crate) fn tya(cpu: &mut CpuState) {
    cpu.a = cpu.y;
    cpu.update_zn(cpu.a);
}

#[inline]
pub(crate) fn tsx(cpu: &mut CpuState) {
    cpu.x = cpu.sp;
    cpu.update_zn(cpu.x);
}

/// TXS is the one transfer that leaves the flags alone.
#[inline]
pub(crate) fn txs(cpu: &mut CpuState) {
    cpu.sp = cpu.x;
}

// ---------------------------------------------------------------------------
// Stack
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn pha<B: Bus>(cpu: &mut CpuState, bus: &mut B) {
    let a = cpu.a;
    cpu.push(bus, a);
}

#[inline]
pub(crate) fn php<B: Bus>(cpu: &mut CpuState, bus: &mut B) {
    let v = cpu.status_for_push(true);
    cpu.push(bus, v);
}

#[inline]
pub(crate) fn pla<B: Bus>(cpu: &mut CpuState, bus: &mut B) {
    let v = cpu.pull(bus);
    cpu.a = v;
    cpu.update_zn(v);
}

#[inline]
pub(crate) fn plp<B: Bus>(cpu: &mut CpuState, bus: &mut B) {
    let v = cpu.pull(bus);
    cpu.restore_status_from_pull(v);
}

// ---------------------------------------------------------------------------
// Logical
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn and(cpu: &mut CpuState, v: u8) {
    cpu.a &= v;
    cpu.update_zn(cpu.a);
}

#[inline]
pub(crate) fn ora(cpu: &mut CpuState, v: u8) {
    cpu.a |= v;
    cpu.update_zn(cpu.a);
}

#[inline]
pub(crate) fn eor(cpu: &mut CpuState, v: u8) {
    cpu.a ^= v;
    cpu.update_zn(cpu.a);
}

/// BIT leaves A untouched: Z from the masked test, N and V copied
/// straight out of operand bits 7 and 6.
#[inline]
pub(crate) fn bit(cpu: &mut CpuState, v: u8) {
    cpu.assign_flag(ZERO, (cpu.a & v) == 0);
    cpu.assign_flag(NEGATIVE, (v & 0x80) != 0);
    cpu.assign_flag(OVERFLOW, (v & 0x40) != 0);
}

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

/// Binary-mode add with carry. Decimal mode is not emulated.
#[inline]
pub(crate) fn adc(cpu: &mut CpuState, v: u8) {
    let a = cpu.a;
    let carry_in = cpu.is_flag_set(CARRY) as u16;
    let sum = a as u16 + v as u16 + carry_in;
    let result = sum as u8;

    cpu.assign_flag(CARRY, sum > 0xFF);
    // Signed overflow: operand and old A agree in sign, result disagrees.
    cpu.assign_flag(OVERFLOW, ((v ^ result) & (result ^ a) & 0x80) != 0);
    cpu.a = result;
    cpu.update_zn(result);
}

/// SBC is ADC of the operand's complement; the incoming carry supplies
/// the +1 that completes the two's-complement negation.
#[inline]
pub(crate) fn sbc(cpu: &mut CpuState, v: u8) {
    adc(cpu, v ^ 0xFF);
}

// ---------------------------------------------------------------------------
// Compare
// ---------------------------------------------------------------------------

/// Shared CMP/CPX/CPY rule: Carry iff register >= operand, Z/N from the
/// wrapping difference.
#[inline]
pub(crate) fn compare(cpu: &mut CpuState, reg: u8, v: u8) {
    cpu.assign_flag(CARRY, reg >= v);
    cpu.update_zn(reg.wrapping_sub(v));
}

// ---------------------------------------------------------------------------
// Increment / decrement (registers)
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn inx(cpu: &mut CpuState) {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.update_zn(cpu.x);
}

#[inline]
pub(crate) fn iny(cpu: &mut CpuState) {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.update_zn(cpu.y);
}

#[inline]
pub(crate) fn dex(cpu: &mut CpuState) {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.update_zn(cpu.x);
}

#[inline]
pub(crate) fn dey(cpu: &mut CpuState) {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.update_zn(cpu.y);
}

// ---------------------------------------------------------------------------
// Shifts / rotates
// ---------------------------------------------------------------------------
//
// The bit shifted out becomes the new Carry; ROL/ROR feed the old Carry
// into the vacated bit. The `*_value` helpers compute result + flags so
// the accumulator and memory forms share one definition.

#[inline]
pub(crate) fn asl_value(cpu: &mut CpuState, v: u8) -> u8 {
    cpu.assign_flag(CARRY, (v & 0x80) != 0);
    let r = v << 1;
    cpu.update_zn(r);
    r
}

#[inline]
pub(crate) fn lsr_value(cpu: &mut CpuState, v: u8) -> u8 {
    cpu.assign_flag(CARRY, (v & 0x01) != 0);
    let r = v >> 1;
    cpu.update_zn(r);
    r
}

#[inline]
pub(crate) fn rol_value(cpu: &mut CpuState, v: u8) -> u8 {
    let carry_in = cpu.is_flag_set(CARRY) as u8;
    cpu.assign_flag(CARRY, (v & 0x80) != 0);
    let r = (v << 1) | carry_in;
    cpu.update_zn(r);
    r
}

#[inline]
pub(crate) fn ror_value(cpu: &mut CpuState, v: u8) -> u8 {
    let carry_in = if cpu.is_flag_set(CARRY) { 0x80 } else { 0 };
    cpu.assign_flag(CARRY, (v & 0x01) != 0);
    let r = (v >> 1) | carry_in;
    cpu.update_zn(r);
    r
}

// ---------------------------------------------------------------------------
// Read-modify-write choreography (memory operands)
// ---------------------------------------------------------------------------

/// Read the operand, run the transform, write the result back. Shared by
/// the memory forms of the shifts/rotates and INC/DEC.
#[inline]
pub(crate) fn modify<B, F>(cpu: &mut CpuState, bus: &mut B, addr: u16, transform: F)
where
    B: Bus,
    F: FnOnce(&mut CpuState, u8) -> u8,
{
    let old = bus.read_byte(addr);
    let new = transform(cpu, old);
    bus.write_byte(addr, new);
}

#[inline]
pub(crate) fn inc_mem<B: Bus>(cpu: &mut CpuState, bus: &mut B, addr: u16) {
    modify(cpu, bus, addr, |c, old| {
        let r = old.wrapping_add(1);
        c.update_zn(r);
        r
    });
}

#[inline]
pub(crate) fn dec_mem<B: Bus>(cpu: &mut CpuState, bus: &mut B, addr: u16) {
    modify(cpu, bus, addr, |c, old| {
        let r = old.wrapping_sub(1);
        c.update_zn(r);
        r
    });
}

// ---------------------------------------------------------------------------
// Branch arithmetic
// ---------------------------------------------------------------------------

/// Conditionally apply a relative branch. PC sits on the displacement
/// byte; dispatch adds (len - 1) = 1 afterwards, so a taken branch lands
/// one byte short of the target here.
///
/// Returns the dynamic cycle penalty: 0 not taken, 1 taken, 2 taken
/// across a page boundary (relative to the address after the branch).
pub(crate) fn branch<B: Bus>(cpu: &mut CpuState, bus: &mut B, take: bool) -> u32 {
    let offset = bus.read_byte(cpu.pc) as i8;
    if !take {
        return 0;
    }

    let next = cpu.pc.wrapping_add(1);
    let target = next.wrapping_add(offset as i16 as u16);
    let mut extra = 1;
    if (next & 0xFF00) != (target & 0xFF00) {
        extra += 1;
    }
    cpu.pc = target.wrapping_sub(1);
    extra
}
