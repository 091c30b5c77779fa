/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use crate::{
    addresses::Vram,
    memory::{DebugInterface, RegisterCategory},
    opcodes::{classify, encode, AluType, BranchType, CondType, LoadStoreSide, MemType},
};

use super::targets::{pc_relative, region_jump};

/// Where `syscall` transfers control to: the EE's general exception vector.
pub const SYSCALL_VECTOR: Vram = Vram::new(0x80000000 + 0x180);

const STATUS_ERL: u32 = 1 << 2;
const FCR31_CONDITION: u32 = 0x00800000;

/// What a single instruction does given the current register contents.
///
/// Meant for debugger front-ends: branch arrows, "condition met" markers, memory watch
/// highlights.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct OpcodeInfo {
    address: Vram,
    encoded_opcode: u32,

    is_branch: bool,
    is_conditional: bool,
    is_linked_branch: bool,
    is_likely_branch: bool,
    is_branch_to_register: bool,
    branch_register_num: Option<u8>,
    is_syscall: bool,
    branch_target: Option<Vram>,
    condition_met: bool,

    is_data_access: bool,
    data_size: u32,
    data_address: Vram,
    load_store_side: Option<LoadStoreSide>,

    relevant_address: Option<Vram>,
}

impl Default for OpcodeInfo {
    fn default() -> Self {
        Self {
            address: Vram::new(0),
            encoded_opcode: 0,
            is_branch: false,
            is_conditional: false,
            is_linked_branch: false,
            is_likely_branch: false,
            is_branch_to_register: false,
            branch_register_num: None,
            is_syscall: false,
            branch_target: None,
            condition_met: false,
            is_data_access: false,
            data_size: 0,
            data_address: Vram::new(0),
            load_store_side: None,
            relevant_address: None,
        }
    }
}

impl OpcodeInfo {
    #[must_use]
    pub const fn address(&self) -> Vram {
        self.address
    }
    #[must_use]
    pub const fn encoded_opcode(&self) -> u32 {
        self.encoded_opcode
    }

    #[must_use]
    pub const fn is_branch(&self) -> bool {
        self.is_branch
    }
    /// Branches and conditional moves whose outcome depends on register contents.
    #[must_use]
    pub const fn is_conditional(&self) -> bool {
        self.is_conditional
    }
    #[must_use]
    pub const fn is_linked_branch(&self) -> bool {
        self.is_linked_branch
    }
    #[must_use]
    pub const fn is_likely_branch(&self) -> bool {
        self.is_likely_branch
    }
    #[must_use]
    pub const fn is_branch_to_register(&self) -> bool {
        self.is_branch_to_register
    }
    #[must_use]
    pub const fn branch_register_num(&self) -> Option<u8> {
        self.branch_register_num
    }
    #[must_use]
    pub const fn is_syscall(&self) -> bool {
        self.is_syscall
    }
    #[must_use]
    pub const fn branch_target(&self) -> Option<Vram> {
        self.branch_target
    }
    #[must_use]
    pub const fn condition_met(&self) -> bool {
        self.condition_met
    }

    #[must_use]
    pub const fn is_data_access(&self) -> bool {
        self.is_data_access
    }
    /// Bytes touched by the access, zero if this isn't a load or store.
    #[must_use]
    pub const fn data_size(&self) -> u32 {
        self.data_size
    }
    #[must_use]
    pub const fn data_address(&self) -> Vram {
        self.data_address
    }
    #[must_use]
    pub const fn load_store_side(&self) -> Option<LoadStoreSide> {
        self.load_store_side
    }

    /// The accessed address for loads and stores, the computed value for address arithmetic.
    #[must_use]
    pub const fn relevant_address(&self) -> Option<Vram> {
        self.relevant_address
    }
}

fn gpr_u32<D: DebugInterface>(cpu: &D, index: u8) -> u32 {
    cpu.register(RegisterCategory::Gpr, usize::from(index))
        .u32_lo()
}

fn gpr_u64<D: DebugInterface>(cpu: &D, index: u8) -> u64 {
    cpu.register(RegisterCategory::Gpr, usize::from(index))
        .u64_lo()
}

/// Reads a GPR as a signed value, sign extending it from 32 bits on 32-bit register banks.
fn gpr_signed<D: DebugInterface>(cpu: &D, index: u8) -> i64 {
    if cpu.register_size(RegisterCategory::Gpr) == 32 {
        i64::from(gpr_u32(cpu, index) as i32)
    } else {
        gpr_u64(cpu, index) as i64
    }
}

impl OpcodeInfo {
    fn fill_branch<D: DebugInterface>(&mut self, cpu: &D, branch: BranchType, cond: Option<CondType>) {
        let word = self.encoded_opcode;
        let address = self.address;

        match branch {
            BranchType::Jump => {
                self.is_conditional = false;
                self.branch_target = Some(region_jump(address, word));
            }
            BranchType::Branch => {
                self.is_conditional = true;
                self.branch_target = Some(pc_relative(address, word));

                let rs_num = encode::rs(word);
                let rt_num = encode::rt(word);
                let rs = gpr_signed(cpu, rs_num);
                let rt = gpr_signed(cpu, rt_num);

                self.condition_met = match cond {
                    Some(CondType::Eq) => {
                        if rs_num == rt_num {
                            self.is_conditional = false;
                        }
                        rs == rt
                    }
                    Some(CondType::Ne) => {
                        if rs_num == rt_num {
                            self.is_conditional = false;
                        }
                        rs != rt
                    }
                    Some(CondType::Lez) => rs <= 0,
                    Some(CondType::Gtz) => rs > 0,
                    Some(CondType::Ltz) => rs < 0,
                    Some(CondType::Gez) => rs >= 0,
                    None => false,
                };
            }
            BranchType::Register => {
                let register = encode::rs(word);

                self.is_conditional = false;
                self.is_branch_to_register = true;
                self.branch_register_num = Some(register);
                self.branch_target = Some(Vram::new(gpr_u32(cpu, register)));
            }
            BranchType::Syscall => {
                self.is_conditional = false;
                self.is_syscall = true;
                self.branch_target = Some(SYSCALL_VECTOR);
            }
            BranchType::Eret => {
                let status = cpu
                    .register(RegisterCategory::Cp0, RegisterCategory::CP0_STATUS)
                    .u32_lo();
                let epc = if status & STATUS_ERL != 0 {
                    RegisterCategory::CP0_ERROR_EPC
                } else {
                    RegisterCategory::CP0_EPC
                };

                self.is_conditional = false;
                self.branch_target =
                    Some(Vram::new(cpu.register(RegisterCategory::Cp0, epc).u32_lo()));
            }
            BranchType::Bc1 | BranchType::Bc0 => {
                let flag = if branch == BranchType::Bc1 {
                    cpu.register(RegisterCategory::Fcr, RegisterCategory::FCR_CONTROL_STATUS)
                        .u32_lo()
                        & FCR31_CONDITION
                        != 0
                } else {
                    cpu.cp_cond0()
                };

                self.is_conditional = true;
                self.branch_target = Some(pc_relative(address, word));
                self.condition_met = match cond {
                    Some(CondType::Eq) => !flag,
                    Some(CondType::Ne) => flag,
                    _ => false,
                };
            }
        }
    }

    fn fill_data_access<D: DebugInterface>(&mut self, cpu: &D, mem: MemType, side: Option<LoadStoreSide>) {
        let word = self.encoded_opcode;
        let base = gpr_u32(cpu, encode::rs(word));
        let mut data_address = base.wrapping_add_signed(i32::from(encode::imm16(word)));

        if side == Some(LoadStoreSide::Left) {
            match mem {
                MemType::Word => data_address = data_address.wrapping_sub(3),
                MemType::Dword => data_address = data_address.wrapping_sub(7),
                MemType::Byte | MemType::Half | MemType::Qword => {}
            }
        }

        self.is_data_access = true;
        self.load_store_side = side;
        self.data_size = mem.size();
        self.data_address = Vram::new(data_address);
        self.relevant_address = Some(self.data_address);
    }

    fn fill_alu<D: DebugInterface>(&mut self, cpu: &D, alu: AluType, cond: Option<CondType>) {
        let word = self.encoded_opcode;
        let rs = gpr_u64(cpu, encode::rs(word));
        let rt = gpr_u64(cpu, encode::rt(word));

        let value = match alu {
            AluType::Addi => rs.wrapping_add_signed(i64::from(encode::imm16(word))),
            AluType::Add => rs.wrapping_add(rt),
            AluType::Sub => rs.wrapping_sub(rt),
            AluType::CondMove => {
                self.is_conditional = true;
                self.condition_met = match cond {
                    Some(CondType::Eq) => rt == 0,
                    Some(CondType::Ne) => rt != 0,
                    _ => false,
                };
                return;
            }
        };

        self.relevant_address = Some(Vram::new(value as u32));
    }
}

/// Describes the instruction at `address` using the live state of `cpu`.
///
/// Unmapped addresses get an empty [`OpcodeInfo`].
#[must_use]
pub fn describe_opcode<D: DebugInterface>(cpu: &D, address: Vram) -> OpcodeInfo {
    let mut info = OpcodeInfo::default();

    if !cpu.is_valid_address(address) {
        return info;
    }

    info.address = address;
    info.encoded_opcode = cpu.read32(address);
    let descriptor = classify(info.encoded_opcode);

    if let Some(branch) = descriptor.branch_type() {
        info.is_branch = true;
        info.is_linked_branch = descriptor.is_linked();
        info.is_likely_branch = descriptor.is_likely();
        info.fill_branch(cpu, branch, descriptor.condition());
    }

    if let Some(mem) = descriptor.mem_type() {
        info.fill_data_access(cpu, mem, descriptor.load_store_side());
    }

    if let Some(alu) = descriptor.alu_type() {
        info.fill_alu(cpu, alu, descriptor.condition());
    }

    info
}

#[cfg(test)]
mod tests {
    use crate::memory::{DebugSnapshot, MemoryImage};

    use super::*;

    use pretty_assertions::assert_eq;

    const BASE: u32 = 0x00100000;

    fn snapshot(words: &[u32]) -> DebugSnapshot {
        DebugSnapshot::new(MemoryImage::from_words(Vram::new(BASE), words))
    }

    #[test]
    fn unmapped_addresses_are_empty() {
        let cpu = snapshot(&[0x03E00008]);

        assert_eq!(describe_opcode(&cpu, Vram::new(0x00200000)), OpcodeInfo::default());
    }

    #[test]
    fn jump() {
        // jal 0x00100040
        let cpu = snapshot(&[0x0C040010]);
        let info = describe_opcode(&cpu, Vram::new(BASE));

        assert!(info.is_branch());
        assert!(info.is_linked_branch());
        assert!(!info.is_conditional());
        assert_eq!(info.branch_target(), Some(Vram::new(0x00100040)));
    }

    #[test]
    fn conditional_branch_uses_registers() {
        // bne $a0, $a1, 4
        let cpu = snapshot(&[0x14850004])
            .with_gpr(4, 1)
            .with_gpr(5, 2);
        let info = describe_opcode(&cpu, Vram::new(BASE));

        assert!(info.is_conditional());
        assert!(info.condition_met());
        assert_eq!(info.branch_target(), Some(Vram::new(BASE + 0x14)));
    }

    #[test]
    fn comparing_a_register_to_itself_is_unconditional() {
        // beq $zero, $zero, -1
        let cpu = snapshot(&[0x1000FFFF]);
        let info = describe_opcode(&cpu, Vram::new(BASE));

        assert!(!info.is_conditional());
        assert!(info.condition_met());
        assert_eq!(info.branch_target(), Some(Vram::new(BASE)));
    }

    #[test]
    fn narrow_registers_are_sign_extended() {
        // bltz $a0, 4
        let narrow = snapshot(&[0x04800004])
            .with_gpr(4, 0x80000000)
            .with_gpr_size(32);
        let wide = narrow.clone().with_gpr_size(64);

        assert!(describe_opcode(&narrow, Vram::new(BASE)).condition_met());
        assert!(!describe_opcode(&wide, Vram::new(BASE)).condition_met());
    }

    #[test]
    fn syscall_and_eret() {
        let cpu = snapshot(&[0x0000000C, 0x42000018])
            .with_cp0(RegisterCategory::CP0_EPC, 0x00100400)
            .with_cp0(RegisterCategory::CP0_ERROR_EPC, 0x00100800);

        let syscall = describe_opcode(&cpu, Vram::new(BASE));
        assert!(syscall.is_syscall());
        assert_eq!(syscall.branch_target(), Some(Vram::new(0x80000180)));

        let eret = describe_opcode(&cpu, Vram::new(BASE + 4));
        assert_eq!(eret.branch_target(), Some(Vram::new(0x00100400)));

        let cpu = cpu.with_cp0(RegisterCategory::CP0_STATUS, STATUS_ERL);
        let eret = describe_opcode(&cpu, Vram::new(BASE + 4));
        assert_eq!(eret.branch_target(), Some(Vram::new(0x00100800)));
    }

    #[test]
    fn coprocessor_conditions() {
        // bc1t 4, bc0f 4
        let cpu = snapshot(&[0x45010004, 0x41000004])
            .with_fcr(RegisterCategory::FCR_CONTROL_STATUS, FCR31_CONDITION)
            .with_cp_cond0(true);

        let bc1t = describe_opcode(&cpu, Vram::new(BASE));
        assert!(bc1t.is_conditional());
        assert!(bc1t.condition_met());

        let bc0f = describe_opcode(&cpu, Vram::new(BASE + 4));
        assert!(bc0f.is_conditional());
        assert!(!bc0f.condition_met());
        assert_eq!(bc0f.branch_target(), Some(Vram::new(BASE + 0x18)));
    }

    #[test]
    fn doubleword_left_access() {
        // ldl $v0, 8($a0)
        let cpu = snapshot(&[0x68820008]).with_gpr(4, 0x2000);
        let info = describe_opcode(&cpu, Vram::new(BASE));

        assert!(info.is_data_access());
        assert_eq!(info.data_size(), 8);
        assert_eq!(info.data_address(), Vram::new(0x2001));
        assert_eq!(info.load_store_side(), Some(LoadStoreSide::Left));
        assert_eq!(info.relevant_address(), Some(Vram::new(0x2001)));
    }

    #[test]
    fn address_arithmetic() {
        // addiu $v0, $a0, -16
        // subu  $v0, $a0, $a1
        let cpu = snapshot(&[0x2482FFF0, 0x00851023])
            .with_gpr(4, 0x00100020)
            .with_gpr(5, 0x20);

        assert_eq!(
            describe_opcode(&cpu, Vram::new(BASE)).relevant_address(),
            Some(Vram::new(0x00100010))
        );
        assert_eq!(
            describe_opcode(&cpu, Vram::new(BASE + 4)).relevant_address(),
            Some(Vram::new(0x00100000))
        );
    }

    #[test]
    fn conditional_moves() {
        // movz $v0, $a0, $a1
        let cpu = snapshot(&[0x0085100A]);
        let info = describe_opcode(&cpu, Vram::new(BASE));

        assert!(info.is_conditional());
        assert!(info.condition_met());
        assert!(!info.is_branch());
        assert_eq!(info.relevant_address(), None);
    }
}
