//! Task File Layout Constants.
//!
//! All multi-byte values in a task file are little-endian 32-bit words. The file is
//! laid out as:
//! 1. **Register bank:** PC followed by x1..x31 (32 words).
//! 2. **Code segment:** base address, byte length, then the instruction words.
//! 3. **Data segments:** address, length (always 4), value; one triple per entry.

/// Size of one serialized word in bytes.
pub const WORD_BYTES: usize = 4;

/// Size of one RV32 instruction in bytes.
pub const INSTRUCTION_BYTES: u32 = 4;

/// Number of architectural integer registers.
pub const REGISTER_COUNT: usize = 32;

/// Size of the register bank section (PC + x1..x31).
pub const REGISTER_BANK_BYTES: usize = REGISTER_COUNT * WORD_BYTES;

/// Size of a segment header (base address + byte length).
pub const SEGMENT_HEADER_BYTES: usize = 2 * WORD_BYTES;

/// Payload length recorded for every data segment.
pub const DATA_SEGMENT_LEN: u32 = 4;

/// Size of one serialized data segment (header + one word).
pub const DATA_SEGMENT_BYTES: usize = SEGMENT_HEADER_BYTES + DATA_SEGMENT_LEN as usize;

/// Default base address of the generated code block.
pub const DEFAULT_CODE_BASE: u32 = 0x1000;

/// Default base address of the first data word.
pub const DEFAULT_DATA_BASE: u32 = 0x2000;

/// Default distance between consecutive data words (16 cache lines of 64 bytes).
pub const DEFAULT_DATA_STRIDE: u32 = 1024;
