/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use super::{
    encode, AluType, BranchType, CondType, MemType, OpcodeDescriptor, OpcodeFlags as F,
};

const fn jump(name: &'static str) -> OpcodeDescriptor {
    OpcodeDescriptor::new(name).with_branch(BranchType::Jump)
}

const fn branch(name: &'static str, cond: CondType) -> OpcodeDescriptor {
    OpcodeDescriptor::new(name)
        .with_branch(BranchType::Branch)
        .with_condition(cond)
}

const fn cop_branch(name: &'static str, kind: BranchType, cond: CondType) -> OpcodeDescriptor {
    OpcodeDescriptor::new(name)
        .with_branch(kind)
        .with_condition(cond)
}

const fn load(name: &'static str, mem: MemType) -> OpcodeDescriptor {
    OpcodeDescriptor::new(name)
        .with_memory(mem)
        .with_flags(F::LOAD)
}

const fn store(name: &'static str, mem: MemType) -> OpcodeDescriptor {
    OpcodeDescriptor::new(name)
        .with_memory(mem)
        .with_flags(F::STORE)
}

const fn alu_address(name: &'static str, alu: AluType) -> OpcodeDescriptor {
    OpcodeDescriptor::new(name)
        .with_alu(alu)
        .with_flags(F::ALU_ADDRESS)
}

const fn cond_move(name: &'static str, cond: CondType) -> OpcodeDescriptor {
    OpcodeDescriptor::new(name)
        .with_alu(AluType::CondMove)
        .with_condition(cond)
}

static UNKNOWN: OpcodeDescriptor = OpcodeDescriptor::UNKNOWN;

static ERET: OpcodeDescriptor = OpcodeDescriptor::new("eret").with_branch(BranchType::Eret);

/// Keyed by bits 31..26.
static PRIMARY: [OpcodeDescriptor; 64] = {
    let mut t = [OpcodeDescriptor::UNKNOWN; 64];

    t[0x02] = jump("j");
    t[0x03] = jump("jal").with_flags(F::LINKED);
    t[0x04] = branch("beq", CondType::Eq);
    t[0x05] = branch("bne", CondType::Ne);
    t[0x06] = branch("blez", CondType::Lez);
    t[0x07] = branch("bgtz", CondType::Gtz);
    t[0x08] = alu_address("addi", AluType::Addi);
    t[0x09] = alu_address("addiu", AluType::Addi);

    t[0x14] = branch("beql", CondType::Eq).with_flags(F::LIKELY);
    t[0x15] = branch("bnel", CondType::Ne).with_flags(F::LIKELY);
    t[0x16] = branch("blezl", CondType::Lez).with_flags(F::LIKELY);
    t[0x17] = branch("bgtzl", CondType::Gtz).with_flags(F::LIKELY);
    t[0x18] = alu_address("daddi", AluType::Addi);
    t[0x19] = alu_address("daddiu", AluType::Addi);
    t[0x1A] = load("ldl", MemType::Dword).with_flags(F::LEFT);
    t[0x1B] = load("ldr", MemType::Dword).with_flags(F::RIGHT);
    t[0x1E] = load("lq", MemType::Qword);
    t[0x1F] = store("sq", MemType::Qword);

    t[0x20] = load("lb", MemType::Byte);
    t[0x21] = load("lh", MemType::Half);
    t[0x22] = load("lwl", MemType::Word).with_flags(F::LEFT);
    t[0x23] = load("lw", MemType::Word);
    t[0x24] = load("lbu", MemType::Byte);
    t[0x25] = load("lhu", MemType::Half);
    t[0x26] = load("lwr", MemType::Word).with_flags(F::RIGHT);
    t[0x27] = load("lwu", MemType::Word);
    t[0x28] = store("sb", MemType::Byte);
    t[0x29] = store("sh", MemType::Half);
    t[0x2A] = store("swl", MemType::Word).with_flags(F::LEFT);
    t[0x2B] = store("sw", MemType::Word);
    t[0x2C] = store("sdl", MemType::Dword).with_flags(F::LEFT);
    t[0x2D] = store("sdr", MemType::Dword).with_flags(F::RIGHT);
    t[0x2E] = store("swr", MemType::Word).with_flags(F::RIGHT);

    t[0x31] = load("lwc1", MemType::Word);
    t[0x36] = load("lqc2", MemType::Qword);
    t[0x37] = load("ld", MemType::Dword);
    t[0x39] = store("swc1", MemType::Word);
    t[0x3E] = store("sqc2", MemType::Qword);
    t[0x3F] = store("sd", MemType::Dword);

    t
};

/// Primary opcode 0x00, keyed by the function field.
static SPECIAL: [OpcodeDescriptor; 64] = {
    let mut t = [OpcodeDescriptor::UNKNOWN; 64];

    t[0x08] = OpcodeDescriptor::new("jr").with_branch(BranchType::Register);
    t[0x09] = OpcodeDescriptor::new("jalr")
        .with_branch(BranchType::Register)
        .with_flags(F::LINKED);
    t[0x0A] = cond_move("movz", CondType::Eq);
    t[0x0B] = cond_move("movn", CondType::Ne);
    t[0x0C] = OpcodeDescriptor::new("syscall").with_branch(BranchType::Syscall);

    t[0x20] = alu_address("add", AluType::Add);
    t[0x21] = alu_address("addu", AluType::Add);
    t[0x22] = alu_address("sub", AluType::Sub);
    t[0x23] = alu_address("subu", AluType::Sub);
    t[0x2C] = alu_address("dadd", AluType::Add);
    t[0x2D] = alu_address("daddu", AluType::Add);
    t[0x2E] = alu_address("dsub", AluType::Sub);
    t[0x2F] = alu_address("dsubu", AluType::Sub);

    t
};

/// Primary opcode 0x01, keyed by the rt field.
static REGIMM: [OpcodeDescriptor; 32] = {
    let mut t = [OpcodeDescriptor::UNKNOWN; 32];

    t[0x00] = branch("bltz", CondType::Ltz);
    t[0x01] = branch("bgez", CondType::Gez);
    t[0x02] = branch("bltzl", CondType::Ltz).with_flags(F::LIKELY);
    t[0x03] = branch("bgezl", CondType::Gez).with_flags(F::LIKELY);

    t[0x10] = branch("bltzal", CondType::Ltz).with_flags(F::LINKED);
    t[0x11] = branch("bgezal", CondType::Gez).with_flags(F::LINKED);
    t[0x12] = branch("bltzall", CondType::Ltz).with_flags(F::LINKED.union(F::LIKELY));
    t[0x13] = branch("bgezall", CondType::Gez).with_flags(F::LINKED.union(F::LIKELY));

    t
};

/// `bc0f`, `bc0t`, `bc0fl`, `bc0tl`, keyed by the rt field.
static BC0: [OpcodeDescriptor; 4] = [
    cop_branch("bc0f", BranchType::Bc0, CondType::Eq),
    cop_branch("bc0t", BranchType::Bc0, CondType::Ne),
    cop_branch("bc0fl", BranchType::Bc0, CondType::Eq).with_flags(F::LIKELY),
    cop_branch("bc0tl", BranchType::Bc0, CondType::Ne).with_flags(F::LIKELY),
];

/// `bc1f`, `bc1t`, `bc1fl`, `bc1tl`, keyed by the rt field.
static BC1: [OpcodeDescriptor; 4] = [
    cop_branch("bc1f", BranchType::Bc1, CondType::Eq),
    cop_branch("bc1t", BranchType::Bc1, CondType::Ne),
    cop_branch("bc1fl", BranchType::Bc1, CondType::Eq).with_flags(F::LIKELY),
    cop_branch("bc1tl", BranchType::Bc1, CondType::Ne).with_flags(F::LIKELY),
];

const COP_RS_BC: u8 = 0x08;
const COP_RS_CO: u8 = 0x10;
const COP0_FUNCT_ERET: u8 = 0x18;

fn cop_branch_entry(table: &'static [OpcodeDescriptor; 4], word: u32) -> &'static OpcodeDescriptor {
    table
        .get(usize::from(encode::rt(word)))
        .unwrap_or(&UNKNOWN)
}

/// Classifies an instruction word.
///
/// Total over every `u32`: encodings the tables don't know about get a descriptor that is
/// neither a branch, a memory access nor an interesting ALU operation.
#[must_use]
pub fn classify(word: u32) -> &'static OpcodeDescriptor {
    match encode::op(word) {
        0x00 => &SPECIAL[usize::from(encode::funct(word))],
        0x01 => &REGIMM[usize::from(encode::rt(word))],
        0x10 => match encode::rs(word) {
            COP_RS_BC => cop_branch_entry(&BC0, word),
            COP_RS_CO if encode::funct(word) == COP0_FUNCT_ERET => &ERET,
            _ => &UNKNOWN,
        },
        0x11 => match encode::rs(word) {
            COP_RS_BC => cop_branch_entry(&BC1, word),
            _ => &UNKNOWN,
        },
        op => &PRIMARY[usize::from(op)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcodes::LoadStoreSide;

    use pretty_assertions::assert_eq;

    #[test]
    fn classification_is_stable() {
        for word in [0x00000000, 0x03E00008, 0x0C000100, 0x1000FFFF, 0xFFFFFFFF, 0x4200_0018] {
            let a = classify(word);
            let b = classify(word);

            assert!(core::ptr::eq(a, b));
            assert_eq!(a, b);
        }
    }

    #[test]
    fn nop_is_nothing() {
        assert!(classify(0x00000000).is_unknown());
        // madd
        assert!(classify(0x70000000).is_unknown());
    }

    #[test]
    fn jumps() {
        let j = classify(0x08000040);
        assert_eq!(j.name(), "j");
        assert_eq!(j.branch_type(), Some(BranchType::Jump));
        assert!(!j.is_linked());

        let jal = classify(0x0C000040);
        assert_eq!(jal.branch_type(), Some(BranchType::Jump));
        assert!(jal.is_linked());

        let jr_ra = classify(0x03E00008);
        assert_eq!(jr_ra.name(), "jr");
        assert_eq!(jr_ra.branch_type(), Some(BranchType::Register));

        let jalr = classify(0x0320F809);
        assert_eq!(jalr.branch_type(), Some(BranchType::Register));
        assert!(jalr.is_linked());
    }

    #[test]
    fn conditional_branches() {
        // beq $zero, $zero, -1
        let beq = classify(0x1000FFFF);
        assert_eq!(beq.branch_type(), Some(BranchType::Branch));
        assert_eq!(beq.condition(), Some(CondType::Eq));
        assert!(!beq.is_likely());

        // bnel $a0, $a1, 4
        let bnel = classify(0x54850004);
        assert_eq!(bnel.condition(), Some(CondType::Ne));
        assert!(bnel.is_likely());

        // bgezal $a0, 4
        let bgezal = classify(0x04910004);
        assert_eq!(bgezal.name(), "bgezal");
        assert_eq!(bgezal.condition(), Some(CondType::Gez));
        assert!(bgezal.is_linked());

        // bc1tl 4
        let bc1tl = classify(0x45030004);
        assert_eq!(bc1tl.branch_type(), Some(BranchType::Bc1));
        assert_eq!(bc1tl.condition(), Some(CondType::Ne));
        assert!(bc1tl.is_likely());

        // bc0f 4
        let bc0f = classify(0x41000004);
        assert_eq!(bc0f.branch_type(), Some(BranchType::Bc0));
        assert_eq!(bc0f.condition(), Some(CondType::Eq));
    }

    #[test]
    fn system_branches() {
        assert_eq!(classify(0x0000000C).branch_type(), Some(BranchType::Syscall));
        assert_eq!(classify(0x42000018).branch_type(), Some(BranchType::Eret));
        // tlbwi shares the CO encoding but is not a branch
        assert!(classify(0x42000002).is_unknown());
    }

    #[test]
    fn memory_accesses() {
        // lwl $v0, 4($a0)
        let lwl = classify(0x88820004);
        assert_eq!(lwl.mem_type(), Some(MemType::Word));
        assert_eq!(lwl.load_store_side(), Some(LoadStoreSide::Left));
        assert!(lwl.is_load());

        // sdr $v0, 0($a0)
        let sdr = classify(0xB4820000);
        assert_eq!(sdr.mem_type(), Some(MemType::Dword));
        assert_eq!(sdr.load_store_side(), Some(LoadStoreSide::Right));
        assert!(sdr.is_store());

        // lq $v0, 0($sp)
        let lq = classify(0x7BA20000);
        assert_eq!(lq.mem_type(), Some(MemType::Qword));
        assert_eq!(lq.load_store_side(), None);
    }

    #[test]
    fn alu() {
        // addiu $v0, $zero, 1
        let addiu = classify(0x24020001);
        assert_eq!(addiu.alu_type(), Some(AluType::Addi));
        assert!(addiu.alu_is_address());

        // movn $v0, $a0, $a1
        let movn = classify(0x0085100B);
        assert_eq!(movn.alu_type(), Some(AluType::CondMove));
        assert_eq!(movn.condition(), Some(CondType::Ne));
        assert!(!movn.alu_is_address());
    }
}
