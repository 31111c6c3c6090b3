/*!
dispatch.rs - Fetch/decode/execute for a single instruction.

Overview
========
`step` performs one full instruction: fetch the opcode byte at PC, look it
up in the descriptor table, run one arm of an exhaustive `match` over the
`Mnemonic` tag, then settle PC and cycle accounting centrally.

An opcode byte with no table entry is a fault, not a NOP: execution state
past an unknown encoding is unknowable, so `step` returns
`CpuError::IllegalOpcode` with the fetch address and leaves PC one past
the offending byte.

PC Protocol
===========
`step` advances PC past the opcode byte immediately after the fetch, so
every handler sees PC at the first operand byte. After the handler runs,
PC advances by (len - 1) to consume the operands. Control transfers carry
len 1 and load PC themselves; branches pre-compensate for the final +1
(see `execute::branch`).

Cycle Accounting
================
The returned count is the descriptor's base cost, plus one when an
`extra_on_cross` encoding crossed a page during address resolution, plus
whatever the branch helper reports.
*/

use log::trace;

use crate::bus::Bus;
use crate::cpu::addressing::{AddrMode, JmpIndirect, jmp_indirect_target, operand_addr};
use crate::cpu::execute;
use crate::cpu::opcodes::{self, Mnemonic};
use crate::cpu::state::{
    CARRY, CpuState, DECIMAL, IRQ_DISABLE, IRQ_VECTOR, NEGATIVE, OVERFLOW, ZERO,
};
use crate::error::CpuError;

/// Resolve the operand address and read the operand byte.
#[inline]
fn fetch_operand<B: Bus>(cpu: &CpuState, bus: &mut B, mode: AddrMode) -> (u8, bool) {
    let (addr, crossed) = operand_addr(cpu, bus, mode);
    (bus.read_byte(addr), crossed)
}

/// Execute one instruction. Returns the cycles it consumed, or an error
/// if the fetched byte is not a documented opcode.
pub(crate) fn step<B: Bus>(
    cpu: &mut CpuState,
    bus: &mut B,
    jmp_indirect: JmpIndirect,
) -> Result<u32, CpuError> {
    let fetch_pc = cpu.pc;
    let code = bus.read_byte(fetch_pc);
    cpu.advance_pc_one();

    let opcode = opcodes::lookup(code).ok_or(CpuError::IllegalOpcode {
        opcode: code,
        pc: fetch_pc,
    })?;

    trace!(
        "{fetch_pc:04X}  {code:02X}  {:?} {:?}",
        opcode.mnemonic, opcode.mode
    );

    let mut cycles = opcode.cycles;
    let mut crossed = false;

    match opcode.mnemonic {
        // ------ Loads ------
        Mnemonic::Lda => {
            let (v, c) = fetch_operand(cpu, bus, opcode.mode);
            crossed = c;
            execute::lda(cpu, v);
        }
        Mnemonic::Ldx => {
            let (v, c) = fetch_operand(cpu, bus, opcode.mode);
            crossed = c;
            execute::ldx(cpu, v);
        }
        Mnemonic::Ldy => {
            let (v, c) = fetch_operand(cpu, bus, opcode.mode);
            crossed = c;
            execute::ldy(cpu, v);
        }

        // ------ Stores (flags untouched) ------
        Mnemonic::Sta => {
            let (addr, _) = operand_addr(cpu, bus, opcode.mode);
            bus.write_byte(addr, cpu.a);
        }
        Mnemonic::Stx => {
            let (addr, _) = operand_addr(cpu, bus, opcode.mode);
            bus.write_byte(addr, cpu.x);
        }
        Mnemonic::Sty => {
            let (addr, _) = operand_addr(cpu, bus, opcode.mode);
            bus.write_byte(addr, cpu.y);
        }

        // ------ Transfers ------
        Mnemonic::Tax => execute::tax(cpu),
        Mnemonic::Tay => execute::tay(cpu),
        Mnemonic::Txa => execute::txa(cpu),
        Mnemonic::Tya => execute::tya(cpu),
        Mnemonic::Tsx => execute::tsx(cpu),
        Mnemonic::Txs => execute::txs(cpu),

        // ------ Stack ------
        Mnemonic::Pha => execute::pha(cpu, bus),
        Mnemonic::Php => execute::php(cpu, bus),
        Mnemonic::Pla => execute::pla(cpu, bus),
        Mnemonic::Plp => execute::plp(cpu, bus),

        // ------ Logical ------
        Mnemonic::And => {
            let (v, c) = fetch_operand(cpu, bus, opcode.mode);
            crossed = c;
            execute::and(cpu, v);
        }
        Mnemonic::Eor => {
            let (v, c) = fetch_operand(cpu, bus, opcode.mode);
            crossed = c;
            execute::eor(cpu, v);
        }
        Mnemonic::Ora => {
            let (v, c) = fetch_operand(cpu, bus, opcode.mode);
            crossed = c;
            execute::ora(cpu, v);
        }
        Mnemonic::Bit => {
            let (v, _) = fetch_operand(cpu, bus, opcode.mode);
            execute::bit(cpu, v);
        }

        // ------ Arithmetic ------
        Mnemonic::Adc => {
            let (v, c) = fetch_operand(cpu, bus, opcode.mode);
            crossed = c;
            execute::adc(cpu, v);
        }
        Mnemonic::Sbc => {
            let (v, c) = fetch_operand(cpu, bus, opcode.mode);
            crossed = c;
            execute::sbc(cpu, v);
        }

        // ------ Compare ------
        Mnemonic::Cmp => {
            let (v, c) = fetch_operand(cpu, bus, opcode.mode);
            crossed = c;
            let a = cpu.a;
            execute::compare(cpu, a, v);
        }
        Mnemonic::Cpx => {
            let (v, _) = fetch_operand(cpu, bus, opcode.mode);
            let x = cpu.x;
            execute::compare(cpu, x, v);
        }
        Mnemonic::Cpy => {
            let (v, _) = fetch_operand(cpu, bus, opcode.mode);
            let y = cpu.y;
            execute::compare(cpu, y, v);
        }

        // ------ Increment / decrement ------
        Mnemonic::Inc => {
            let (addr, _) = operand_addr(cpu, bus, opcode.mode);
            execute::inc_mem(cpu, bus, addr);
        }
        Mnemonic::Dec => {
            let (addr, _) = operand_addr(cpu, bus, opcode.mode);
            execute::dec_mem(cpu, bus, addr);
        }
        Mnemonic::Inx => execute::inx(cpu),
        Mnemonic::Iny => execute::iny(cpu),
        Mnemonic::Dex => execute::dex(cpu),
        Mnemonic::Dey => execute::dey(cpu),

        // ------ Shifts / rotates ------
        Mnemonic::Asl => rmw(cpu, bus, opcode.mode, execute::asl_value),
        Mnemonic::Lsr => rmw(cpu, bus, opcode.mode, execute::lsr_value),
        Mnemonic::Rol => rmw(cpu, bus, opcode.mode, execute::rol_value),
        Mnemonic::Ror => rmw(cpu, bus, opcode.mode, execute::ror_value),

        // ------ Jumps / calls ------
        Mnemonic::Jmp => {
            cpu.pc = match opcode.mode {
                AddrMode::Indirect => jmp_indirect_target(cpu, bus, jmp_indirect),
                _ => bus.read_word(cpu.pc),
            };
        }
        Mnemonic::Jsr => {
            // PC sits on the operand low byte; the return address pushed
            // is (last byte of this instruction), RTS adds the final +1.
            let target = bus.read_word(cpu.pc);
            let ret = cpu.pc.wrapping_add(1);
            cpu.push_word(bus, ret);
            cpu.pc = target;
        }
        Mnemonic::Rts => {
            cpu.pc = cpu.pull_word(bus).wrapping_add(1);
        }

        // ------ Branches ------
        Mnemonic::Bcc => cycles += execute::branch(cpu, bus, !cpu.is_flag_set(CARRY)),
        Mnemonic::Bcs => cycles += execute::branch(cpu, bus, cpu.is_flag_set(CARRY)),
        Mnemonic::Beq => cycles += execute::branch(cpu, bus, cpu.is_flag_set(ZERO)),
        Mnemonic::Bne => cycles += execute::branch(cpu, bus, !cpu.is_flag_set(ZERO)),
        Mnemonic::Bmi => cycles += execute::branch(cpu, bus, cpu.is_flag_set(NEGATIVE)),
        Mnemonic::Bpl => cycles += execute::branch(cpu, bus, !cpu.is_flag_set(NEGATIVE)),
        Mnemonic::Bvs => cycles += execute::branch(cpu, bus, cpu.is_flag_set(OVERFLOW)),
        Mnemonic::Bvc => cycles += execute::branch(cpu, bus, !cpu.is_flag_set(OVERFLOW)),

        // ------ Flag toggles ------
        Mnemonic::Clc => cpu.clear_flag_bit(CARRY),
        Mnemonic::Cld => cpu.clear_flag_bit(DECIMAL),
        Mnemonic::Cli => cpu.clear_flag_bit(IRQ_DISABLE),
        Mnemonic::Clv => cpu.clear_flag_bit(OVERFLOW),
        Mnemonic::Sec => cpu.set_flag_bit(CARRY),
        Mnemonic::Sed => cpu.set_flag_bit(DECIMAL),
        Mnemonic::Sei => cpu.set_flag_bit(IRQ_DISABLE),

        // ------ System ------
        Mnemonic::Brk => {
            // Software interrupt: push the address of the byte after the
            // (two-byte) BRK slot, push status with BREAK set, mask IRQs,
            // vector through $FFFE.
            let ret = cpu.pc.wrapping_add(1);
            cpu.push_word(bus, ret);
            let status = cpu.status_for_push(true);
            cpu.push(bus, status);
            cpu.set_flag_bit(IRQ_DISABLE);
            cpu.pc = bus.read_word(IRQ_VECTOR);
        }
        Mnemonic::Rti => {
            let pulled = cpu.pull(bus);
            cpu.restore_status_from_pull(pulled);
            cpu.pc = cpu.pull_word(bus);
        }
        Mnemonic::Nop => {}
    }

    if opcode.extra_on_cross && crossed {
        cycles += 1;
    }
    cpu.advance_pc(opcode.len as u16 - 1);

    Ok(cycles)
}

/// Route a shift/rotate to the accumulator or through memory.
#[inline]
fn rmw<B: Bus>(
    cpu: &mut CpuState,
    bus: &mut B,
    mode: AddrMode,
    transform: fn(&mut CpuState, u8) -> u8,
) {
    if mode == AddrMode::Accumulator {
        let v = cpu.a;
        cpu.a = transform(cpu, v);
    } else {
        let (addr, _) = operand_addr(cpu, bus, mode);
        execute::modify(cpu, bus, addr, transform);
    }
}
