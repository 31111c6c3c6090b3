/*!
bus.rs - Memory bus contract consumed by the CPU core.

Overview
========
The CPU never owns memory. Every byte it fetches, every stack push, and
every vector load goes through the `Bus` trait, which models a 64KB
byte-addressable space with little-endian word access.

A host embedding this core (an NES-style machine, a monitor, a test
harness) supplies the implementation: RAM mirrors, ROM banks, memory-mapped
device registers. The core only assumes the four access methods below.

`Ram` is the trivial implementation: a flat 64KB array with no mapping.
It is what the unit and integration tests run programs against, and it is
enough for hosts that just want to execute machine code out of plain
memory.

Word Convention
===============
Words are little-endian: low byte at `addr`, high byte at `addr + 1`.
Address arithmetic wraps at 16 bits; a word read at 0xFFFF takes its high
byte from 0x0000.
*/

/// Byte/word access over a 16-bit address space.
///
/// Reads take `&mut self` because real buses have read side effects
/// (device registers, open-bus latches); a plain RAM implementation simply
/// ignores the mutability.
pub trait Bus {
    fn read_byte(&mut self, addr: u16) -> u8;
    fn write_byte(&mut self, addr: u16, value: u8);

    /// Read a little-endian word (low byte first).
    fn read_word(&mut self, addr: u16) -> u16 {
        let lo = self.read_byte(addr) as u16;
        let hi = self.read_byte(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Write a little-endian word (low byte first).
    fn write_word(&mut self, addr: u16, value: u16) {
        self.write_byte(addr, value as u8);
        self.write_byte(addr.wrapping_add(1), (value >> 8) as u8);
    }
}

/// Flat 64KB memory with no mapping or mirroring.
pub struct Ram {
    bytes: Box<[u8; 0x1_0000]>,
}

impl Ram {
    pub fn new() -> Self {
        Self {
            bytes: Box::new([0; 0x1_0000]),
        }
    }

    /// Copy `data` into memory starting at `addr` (wrapping at the top of
    /// the address space).
    pub fn load(&mut self, addr: u16, data: &[u8]) {
        let mut at = addr;
        for &b in data {
            self.bytes[at as usize] = b;
            at = at.wrapping_add(1);
        }
    }
}

impl Default for Ram {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for Ram {
    #[inline]
    fn read_byte(&mut self, addr: u16) -> u8 {
        self.bytes[addr as usize]
    }

    #[inline]
    fn write_byte(&mut self, addr: u16, value: u8) {
        self.bytes[addr as usize] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_round_trip() {
        let mut ram = Ram::new();
        ram.write_byte(0x1234, 0xAB);
        assert_eq!(ram.read_byte(0x1234), 0xAB);
        assert_eq!(ram.read_byte(0x1235), 0x00);
    }

    #[test]
    fn word_little_endian_layout() {
        let mut ram = Ram::new();
        ram.write_word(0x0200, 0xBEEF);
        assert_eq!(ram.read_byte(0x0200), 0xEF);
        assert_eq!(ram.read_byte(0x0201), 0xBE);
        assert_eq!(ram.read_word(0x0200), 0xBEEF);
    }

    #[test]
    fn word_read_wraps_address_space() {
        let mut ram = Ram::new();
        ram.write_byte(0xFFFF, 0x34);
        ram.write_byte(0x0000, 0x12);
        assert_eq!(ram.read_word(0xFFFF), 0x1234);
    }

    #[test]
    fn load_places_program_bytes() {
        let mut ram = Ram::new();
        ram.load(0x8000, &[0xA9, 0x10, 0x00]);
        assert_eq!(ram.read_byte(0x8000), 0xA9);
        assert_eq!(ram.read_byte(0x8001), 0x10);
        assert_eq!(ram.read_byte(0x8002), 0x00);
    }
}
