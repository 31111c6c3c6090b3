/*!
opcodes.rs - Static descriptor table for the documented 6502 opcode set.

Overview
========
One immutable, densely indexed table: `OPCODES[byte]` is `Some` descriptor
for each of the 151 documented encodings and `None` for everything else.
A descriptor carries the raw opcode byte, instruction byte length, base
cycle cost, addressing-mode tag, the page-cross accounting rule, and a
`Mnemonic` tag. Dispatch runs a single exhaustive `match` over the tag —
no function pointers, and the compiler proves every mnemonic is handled.

Cycle Accounting
================
`cycles` is the baseline cost. Encodings with `extra_on_cross` charge one
more cycle when their indexed address calculation crosses a page (reads);
indexed stores and read-modify-write encodings instead carry the worst
case in `cycles`, matching hardware timing. Branch penalties (+1 taken,
+1 page cross) are dynamic and added by the branch handler.

Byte Lengths
============
`len` counts opcode plus operand bytes; dispatch advances PC by `len - 1`
after the operation (the opcode byte was consumed by the fetch). Control
transfers (JMP/JSR) are entered with `len` 1 even though they have
operands: the operation loads PC itself and the final advance must not
disturb it.
*/

use crate::cpu::addressing::AddrMode;

/// Instruction tag: one variant per documented mnemonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mnemonic {
    // Loads / stores
    Lda, Ldx, Ldy, Sta, Stx, Sty,
    // Transfers
    Tax, Tay, Txa, Tya, Tsx, Txs,
    // Stack
    Pha, Php, Pla, Plp,
    // Logical
    And, Eor, Ora, Bit,
    // Arithmetic
    Adc, Sbc,
    // Compare
    Cmp, Cpx, Cpy,
    // Increment / decrement
    Inc, Inx, Iny, Dec, Dex, Dey,
    // Shifts / rotates
    Asl, Lsr, Rol, Ror,
    // Jumps / calls
    Jmp, Jsr, Rts,
    // Branches
    Bcc, Bcs, Beq, Bmi, Bne, Bpl, Bvc, Bvs,
    // Flag toggles
    Clc, Cld, Cli, Clv, Sec, Sed, Sei,
    // System
    Brk, Nop, Rti,
}

/// Immutable per-encoding descriptor.
#[derive(Debug, Clone, Copy)]
pub struct Opcode {
    pub code: u8,
    pub mnemonic: Mnemonic,
    pub mode: AddrMode,
    /// Total instruction bytes (opcode + operands); see module docs for
    /// the control-transfer exception.
    pub len: u8,
    /// Base cycle cost before dynamic penalties.
    pub cycles: u32,
    /// Charge +1 cycle when the indexed address calculation crosses a
    /// page boundary.
    pub extra_on_cross: bool,
}

const fn op(code: u8, mnemonic: Mnemonic, mode: AddrMode, len: u8, cycles: u32) -> Option<Opcode> {
    Some(Opcode {
        code,
        mnemonic,
        mode,
        len,
        cycles,
        extra_on_cross: false,
    })
}

/// Entry for a read-type indexed encoding that charges the page-cross
/// penalty dynamically.
const fn op_cross(
    code: u8,
    mnemonic: Mnemonic,
    mode: AddrMode,
    len: u8,
    cycles: u32,
) -> Option<Opcode> {
    Some(Opcode {
        code,
        mnemonic,
        mode,
        len,
        cycles,
        extra_on_cross: true,
    })
}

/// Look up the descriptor for an opcode byte.
#[inline]
pub(crate) fn lookup(code: u8) -> Option<&'static Opcode> {
    OPCODES[code as usize].as_ref()
}

/// The 256-entry dispatch table, built once at compile time.
pub(crate) static OPCODES: [Option<Opcode>; 256] = {
    use AddrMode::*;
    use Mnemonic::*;

    let mut t: [Option<Opcode>; 256] = [None; 256];

    // ------ Loads ------
    t[0xA9] = op(0xA9, Lda, Immediate, 2, 2);
    t[0xA5] = op(0xA5, Lda, ZeroPage, 2, 3);
    t[0xB5] = op(0xB5, Lda, ZeroPageX, 2, 4);
    t[0xAD] = op(0xAD, Lda, Absolute, 3, 4);
    t[0xBD] = op_cross(0xBD, Lda, AbsoluteX, 3, 4);
    t[0xB9] = op_cross(0xB9, Lda, AbsoluteY, 3, 4);
    t[0xA1] = op(0xA1, Lda, IndirectX, 2, 6);
    t[0xB1] = op_cross(0xB1, Lda, IndirectY, 2, 5);

    t[0xA2] = op(0xA2, Ldx, Immediate, 2, 2);
    t[0xA6] = op(0xA6, Ldx, ZeroPage, 2, 3);
    t[0xB6] = op(0xB6, Ldx, ZeroPageY, 2, 4);
    t[0xAE] = op(0xAE, Ldx, Absolute, 3, 4);
    t[0xBE] = op_cross(0xBE, Ldx, AbsoluteY, 3, 4);

    t[0xA0] = op(0xA0, Ldy, Immediate, 2, 2);
    t[0xA4] = op(0xA4, Ldy, ZeroPage, 2, 3);
    t[0xB4] = op(0xB4, Ldy, ZeroPageX, 2, 4);
    t[0xAC] = op(0xAC, Ldy, Absolute, 3, 4);
    t[0xBC] = op_cross(0xBC, Ldy, AbsoluteX, 3, 4);

    // ------ Stores (no flags, no dynamic penalty) ------
    t[0x85] = op(0x85, Sta, ZeroPage, 2, 3);
    t[0x95] = op(0x95, Sta, ZeroPageX, 2, 4);
    t[0x8D] = op(0x8D, Sta, Absolute, 3, 4);
    t[0x9D] = op(0x9D, Sta, AbsoluteX, 3, 5);
    t[0x99] = op(0x99, Sta, AbsoluteY, 3, 5);
    t[0x81] = op(0x81, Sta, IndirectX, 2, 6);
    t[0x91] = op(0x91, Sta, IndirectY, 2, 6);

    t[0x86] = op(0x86, Stx, ZeroPage, 2, 3);
    t[0x96] = op(0x96, Stx, ZeroPageY, 2, 4);
    t[0x8E] = op(0x8E, Stx, Absolute, 3, 4);

    t[0x84] = op(0x84, Sty, ZeroPage, 2, 3);
    t[0x94] = op(0x94, Sty, ZeroPageX, 2, 4);
    t[0x8C] = op(0x8C, Sty, Absolute, 3, 4);

    // ------ Transfers ------
    t[0xAA] = op(0xAA, Tax, Implied, 1, 2);
    t[0xA8] = op(0xA8, Tay, Implied, 1, 2);
    t[0x8A] = op(0x8A, Txa, Implied, 1, 2);
    t[0x98] = op(0x98, Tya, Implied, 1, 2);
    t[0xBA] = op(0xBA, Tsx, Implied, 1, 2);
    t[0x9A] = op(0x9A, Txs, Implied, 1, 2);

    // ------ Stack ------
    t[0x48] = op(0x48, Pha, Implied, 1, 3);
    t[0x08] = op(0x08, Php, Implied, 1, 3);
    t[0x68] = op(0x68, Pla, Implied, 1, 4);
    t[0x28] = op(0x28, Plp, Implied, 1, 4);

    // ------ Logical ------
    t[0x29] = op(0x29, And, Immediate, 2, 2);
    t[0x25] = op(0x25, And, ZeroPage, 2, 3);
    t[0x35] = op(0x35, And, ZeroPageX, 2, 4);
    t[0x2D] = op(0x2D, And, Absolute, 3, 4);
    t[0x3D] = op_cross(0x3D, And, AbsoluteX, 3, 4);
    t[0x39] = op_cross(0x39, And, AbsoluteY, 3, 4);
    t[0x21] = op(0x21, And, IndirectX, 2, 6);
    t[0x31] = op_cross(0x31, And, IndirectY, 2, 5);

    t[0x49] = op(0x49, Eor, Immediate, 2, 2);
    t[0x45] = op(0x45, Eor, ZeroPage, 2, 3);
    t[0x55] = op(0x55, Eor, ZeroPageX, 2, 4);
    t[0x4D] = op(0x4D, Eor, Absolute, 3, 4);
    t[0x5D] = op_cross(0x5D, Eor, AbsoluteX, 3, 4);
    t[0x59] = op_cross(0x59, Eor, AbsoluteY, 3, 4);
    t[0x41] = op(0x41, Eor, IndirectX, 2, 6);
    t[0x51] = op_cross(0x51, Eor, IndirectY, 2, 5);

    t[0x09] = op(0x09, Ora, Immediate, 2, 2);
    t[0x05] = op(0x05, Ora, ZeroPage, 2, 3);
    t[0x15] = op(0x15, Ora, ZeroPageX, 2, 4);
    t[0x0D] = op(0x0D, Ora, Absolute, 3, 4);
    t[0x1D] = op_cross(0x1D, Ora, AbsoluteX, 3, 4);
    t[0x19] = op_cross(0x19, Ora, AbsoluteY, 3, 4);
    t[0x01] = op(0x01, Ora, IndirectX, 2, 6);
    t[0x11] = op_cross(0x11, Ora, IndirectY, 2, 5);

    t[0x24] = op(0x24, Bit, ZeroPage, 2, 3);
    t[0x2C] = op(0x2C, Bit, Absolute, 3, 4);

    // ------ Arithmetic ------
    t[0x69] = op(0x69, Adc, Immediate, 2, 2);
    t[0x65] = op(0x65, Adc, ZeroPage, 2, 3);
    t[0x75] = op(0x75, Adc, ZeroPageX, 2, 4);
    t[0x6D] = op(0x6D, Adc, Absolute, 3, 4);
    t[0x7D] = op_cross(0x7D, Adc, AbsoluteX, 3, 4);
    t[0x79] = op_cross(0x79, Adc, AbsoluteY, 3, 4);
    t[0x61] = op(0x61, Adc, IndirectX, 2, 6);
    t[0x71] = op_cross(0x71, Adc, IndirectY, 2, 5);

    t[0xE9] = op(0xE9, Sbc, Immediate, 2, 2);
    t[0xE5] = op(0xE5, Sbc, ZeroPage, 2, 3);
    t[0xF5] = op(0xF5, Sbc, ZeroPageX, 2, 4);
    t[0xED] = op(0xED, Sbc, Absolute, 3, 4);
    t[0xFD] = op_cross(0xFD, Sbc, AbsoluteX, 3, 4);
    t[0xF9] = op_cross(0xF9, Sbc, AbsoluteY, 3, 4);
    t[0xE1] = op(0xE1, Sbc, IndirectX, 2, 6);
    t[0xF1] = op_cross(0xF1, Sbc, IndirectY, 2, 5);

    // ------ Compare ------
    t[0xC9] = op(0xC9, Cmp, Immediate, 2, 2);
    t[0xC5] = op(0xC5, Cmp, ZeroPage, 2, 3);
    t[0xD5] = op(0xD5, Cmp, ZeroPageX, 2, 4);
    t[0xCD] = op(0xCD, Cmp, Absolute, 3, 4);
    t[0xDD] = op_cross(0xDD, Cmp, AbsoluteX, 3, 4);
    t[0xD9] = op_cross(0xD9, Cmp, AbsoluteY, 3, 4);
    t[0xC1] = op(0xC1, Cmp, IndirectX, 2, 6);
    t[0xD1] = op_cross(0xD1, Cmp, IndirectY, 2, 5);

    t[0xE0] = op(0xE0, Cpx, Immediate, 2, 2);
    t[0xE4] = op(0xE4, Cpx, ZeroPage, 2, 3);
    t[0xEC] = op(0xEC, Cpx, Absolute, 3, 4);

    t[0xC0] = op(0xC0, Cpy, Immediate, 2, 2);
    t[0xC4] = op(0xC4, Cpy, ZeroPage, 2, 3);
    t[0xCC] = op(0xCC, Cpy, Absolute, 3, 4);

    // ------ Increment / Decrement ------
    t[0xE6] = op(0xE6, Inc, ZeroPage, 2, 5);
    t[0xF6] = op(0xF6, Inc, ZeroPageX, 2, 6);
    t[0xEE] = op(0xEE, Inc, Absolute, 3, 6);
    t[0xFE] = op(0xFE, Inc, AbsoluteX, 3, 7);
    t[0xE8] = op(0xE8, Inx, Implied, 1, 2);
    t[0xC8] = op(0xC8, Iny, Implied, 1, 2);

    t[0xC6] = op(0xC6, Dec, ZeroPage, 2, 5);
    t[0xD6] = op(0xD6, Dec, ZeroPageX, 2, 6);
    t[0xCE] = op(0xCE, Dec, Absolute, 3, 6);
    t[0xDE] = op(0xDE, Dec, AbsoluteX, 3, 7);
    t[0xCA] = op(0xCA, Dex, Implied, 1, 2);
    t[0x88] = op(0x88, Dey, Implied, 1, 2);

    // ------ Shifts / Rotates ------
    t[0x0A] = op(0x0A, Asl, Accumulator, 1, 2);
    t[0x06] = op(0x06, Asl, ZeroPage, 2, 5);
    t[0x16] = op(0x16, Asl, ZeroPageX, 2, 6);
    t[0x0E] = op(0x0E, Asl, Absolute, 3, 6);
    t[0x1E] = op(0x1E, Asl, AbsoluteX, 3, 7);

    t[0x4A] = op(0x4A, Lsr, Accumulator, 1, 2);
    t[0x46] = op(0x46, Lsr, ZeroPage, 2, 5);
    t[0x56] = op(0x56, Lsr, ZeroPageX, 2, 6);
    t[0x4E] = op(0x4E, Lsr, Absolute, 3, 6);
    t[0x5E] = op(0x5E, Lsr, AbsoluteX, 3, 7);

    t[0x2A] = op(0x2A, Rol, Accumulator, 1, 2);
    t[0x26] = op(0x26, Rol, ZeroPage, 2, 5);
    t[0x36] = op(0x36, Rol, ZeroPageX, 2, 6);
    t[0x2E] = op(0x2E, Rol, Absolute, 3, 6);
    t[0x3E] = op(0x3E, Rol, AbsoluteX, 3, 7);

    t[0x6A] = op(0x6A, Ror, Accumulator, 1, 2);
    t[0x66] = op(0x66, Ror, ZeroPage, 2, 5);
    t[0x76] = op(0x76, Ror, ZeroPageX, 2, 6);
    t[0x6E] = op(0x6E, Ror, Absolute, 3, 6);
    t[0x7E] = op(0x7E, Ror, AbsoluteX, 3, 7);

    // ------ Jumps / Calls ------
    // len 1: these load PC themselves and the post-dispatch advance must
    // not move past the freshly set target.
    t[0x4C] = op(0x4C, Jmp, Absolute, 1, 3);
    t[0x6C] = op(0x6C, Jmp, Indirect, 1, 5);
    t[0x20] = op(0x20, Jsr, Absolute, 1, 6);
    t[0x60] = op(0x60, Rts, Implied, 1, 6);

    // ------ Branches (dynamic penalty: +1 taken, +1 page cross) ------
    t[0x90] = op(0x90, Bcc, Relative, 2, 2);
    t[0xB0] = op(0xB0, Bcs, Relative, 2, 2);
    t[0xF0] = op(0xF0, Beq, Relative, 2, 2);
    t[0x30] = op(0x30, Bmi, Relative, 2, 2);
    t[0xD0] = op(0xD0, Bne, Relative, 2, 2);
    t[0x10] = op(0x10, Bpl, Relative, 2, 2);
    t[0x50] = op(0x50, Bvc, Relative, 2, 2);
    t[0x70] = op(0x70, Bvs, Relative, 2, 2);

    // ------ Flag toggles ------
    t[0x18] = op(0x18, Clc, Implied, 1, 2);
    t[0xD8] = op(0xD8, Cld, Implied, 1, 2);
    t[0x58] = op(0x58, Cli, Implied, 1, 2);
    t[0xB8] = op(0xB8, Clv, Implied, 1, 2);
    t[0x38] = op(0x38, Sec, Implied, 1, 2);
    t[0xF8] = op(0xF8, Sed, Implied, 1, 2);
    t[0x78] = op(0x78, Sei, Implied, 1, 2);

    // ------ System ------
    t[0x00] = op(0x00, Brk, Implied, 1, 7);
    t[0xEA] = op(0xEA, Nop, Implied, 1, 2);
    t[0x40] = op(0x40, Rti, Implied, 1, 6);

    t
};
