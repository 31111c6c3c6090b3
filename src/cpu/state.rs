/*!
state.rs - Architectural 6502 register file, status flags, and stack
helpers.

Overview
========
`CpuState` owns everything the programmer's model of the 6502 exposes:
A, X, Y, SP, PC, and the status byte. It deliberately excludes decode,
dispatch, and timing, which live in the opcode table and dispatch modules,
and it never decides *when* flags change — instruction semantics do.

6502 Status Register Bit Layout
===============================
Bit: 7 6 5 4 3 2 1 0
     N V 1 B D I Z C
Where:
  N = NEGATIVE
  V = OVERFLOW
  1 = BREAK2 (bit 5; reads as 1 when the status byte is pushed)
  B = BREAK (set in pushes from BRK/PHP, clear in pushes from IRQ)
  D = DECIMAL (decimal arithmetic itself is not emulated)
  I = IRQ_DISABLE
  Z = ZERO
  C = CARRY

Stack
=====
The stack lives on the fixed page 0x0100-0x01FF. Push writes at
0x0100 | SP then decrements SP; pull increments SP then reads. SP wraps at
8 bits, so a full stack silently overwrites — that is hardware behavior,
not an error.
*/

use crate::bus::Bus;

/// Processor status flag bit masks (canonical definitions).
pub const CARRY: u8 = 0b0000_0001;
pub const ZERO: u8 = 0b0000_0010;
pub const IRQ_DISABLE: u8 = 0b0000_0100;
pub const DECIMAL: u8 = 0b0000_1000;
pub const BREAK: u8 = 0b0001_0000;
pub const BREAK2: u8 = 0b0010_0000;
pub const OVERFLOW: u8 = 0b0100_0000;
pub const NEGATIVE: u8 = 0b1000_0000;

/// Base of the fixed stack page.
pub(crate) const STACK_BASE: u16 = 0x0100;

/// Reset vector: PC is loaded from this word by `reset`.
pub const RESET_VECTOR: u16 = 0xFFFC;

/// Interrupt vector used by BRK and maskable IRQ entry.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Pure architectural register / flag container for the 6502 CPU.
///
/// Constructed zero-initialized; `reset` establishes the defined startup
/// state. Fields are public for snapshotting and test setup, but
/// instruction code goes through the helper methods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuState {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: u8,
}

impl CpuState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset registers and load PC from the reset vector at $FFFC/$FFFD:
    /// A/X/Y = 0, SP = 0xFF, status cleared.
    pub fn reset<B: Bus>(&mut self, bus: &mut B) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0xFF;
        self.status = 0;
        self.pc = bus.read_word(RESET_VECTOR);
    }

    // ---------------------------------------------------------------------
    // Program counter helpers
    // ---------------------------------------------------------------------

    /// Advance PC by `delta` (wrapping at 16 bits).
    #[inline]
    pub fn advance_pc(&mut self, delta: u16) {
        self.pc = self.pc.wrapping_add(delta);
    }

    #[inline]
    pub fn advance_pc_one(&mut self) {
        self.advance_pc(1);
    }

    // ---------------------------------------------------------------------
    // Flag operations
    // ---------------------------------------------------------------------

    /// Return true if all bits of `mask` are set.
    #[inline]
    pub fn is_flag_set(&self, mask: u8) -> bool {
        (self.status & mask) != 0
    }

    /// Set flag bits (OR).
    #[inline]
    pub fn set_flag_bit(&mut self, mask: u8) {
        self.status |= mask;
    }

    /// Clear flag bits (AND NOT).
    #[inline]
    pub fn clear_flag_bit(&mut self, mask: u8) {
        self.status &= !mask;
    }

    /// Set or clear flag bits based on `value`.
    #[inline]
    pub fn assign_flag(&mut self, mask: u8, value: bool) {
        if value {
            self.set_flag_bit(mask);
        } else {
            self.clear_flag_bit(mask);
        }
    }

    /// Composite: update ZERO and NEGATIVE from an 8-bit result.
    #[inline]
    pub fn update_zn(&mut self, result: u8) {
        self.assign_flag(ZERO, result == 0);
        self.assign_flag(NEGATIVE, (result & 0x80) != 0);
    }

    /// Compose the status byte for a stack push.
    ///
    /// BREAK2 is always forced set in the pushed copy; BREAK is set for
    /// BRK/PHP pushes and clear for hardware interrupt pushes.
    #[inline]
    pub fn status_for_push(&self, set_break: bool) -> u8 {
        let mut v = self.status | BREAK2;
        if set_break {
            v |= BREAK;
        } else {
            v &= !BREAK;
        }
        v
    }

    /// Restore status from a byte pulled off the stack (PLP/RTI).
    ///
    /// The stored BREAK bit is discarded and BREAK2 comes back set,
    /// whatever was pushed — the hardware quirk, preserved bit-for-bit.
    #[inline]
    pub fn restore_status_from_pull(&mut self, pulled: u8) {
        self.status = (pulled | BREAK2) & !BREAK;
    }

    // ---------------------------------------------------------------------
    // Stack helpers
    // ---------------------------------------------------------------------

    /// Push a byte onto the fixed stack page.
    #[inline]
    pub fn push<B: Bus>(&mut self, bus: &mut B, value: u8) {
        bus.write_byte(STACK_BASE | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    /// Pull (pop) a byte from the fixed stack page.
    #[inline]
    pub fn pull<B: Bus>(&mut self, bus: &mut B) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        bus.read_byte(STACK_BASE | self.sp as u16)
    }

    /// Push a word high byte first, so it pulls back low-then-high
    /// (the 6502 return-address convention).
    #[inline]
    pub fn push_word<B: Bus>(&mut self, bus: &mut B, value: u16) {
        self.push(bus, (value >> 8) as u8);
        self.push(bus, value as u8);
    }

    /// Pull a word pushed by `push_word` (low byte first).
    #[inline]
    pub fn pull_word<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.pull(bus) as u16;
        let hi = self.pull(bus) as u16;
        (hi << 8) | lo
    }
}
