/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use mipsanalyst::{
    addresses::Vram,
    analysis::{branch_target, jump_target, sure_branch_target},
    memory::MemoryImage,
};

use pretty_assertions::assert_eq;

fn single(address: u32, word: u32) -> MemoryImage {
    MemoryImage::from_words(Vram::new(address), &[word])
}

#[test]
fn jump_targets_use_the_region_of_the_jump() {
    for address in [0x00100000, 0x0FFFFFFC, 0x80001000, 0xBFC00000] {
        for field in [0x0000000, 0x0000001, 0x0123456, 0x3FFFFFF] {
            for op in [0x08000000, 0x0C000000] {
                let reader = single(address, op | field);

                assert_eq!(
                    jump_target(&reader, Vram::new(address)),
                    Some(Vram::new((address & 0xF0000000) | (field << 2)))
                );
            }
        }
    }
}

#[test]
fn non_jumps_have_no_jump_target() {
    // nop, jr $ra, beq $zero, $zero, -1, lw $v0, 0($sp)
    for word in [0x00000000, 0x03E00008, 0x1000FFFF, 0x8FA20000] {
        let reader = single(0x00100000, word);

        assert_eq!(jump_target(&reader, Vram::new(0x00100000)), None);
    }
}

#[test]
fn branch_targets_are_relative_to_the_delay_slot() {
    let address = 0x00100000u32;

    for imm in [0i16, 1, -1, 0x7FFF, -0x8000] {
        // beq $a0, $a1, imm
        let reader = single(address, 0x10850000 | u32::from(imm as u16));
        let expected = address
            .wrapping_add(4)
            .wrapping_add_signed(i32::from(imm) << 2);

        assert_eq!(
            branch_target(&reader, Vram::new(address)),
            Some(Vram::new(expected))
        );
    }
}

#[test]
fn sure_branches_never_guess() {
    let address = Vram::new(0x00100000);

    for rs in 0..32u32 {
        for rt in 0..32u32 {
            // beq and bne
            for op in [0x10000000u32, 0x14000000] {
                let reader = single(address.inner(), op | (rs << 21) | (rt << 16) | 4);
                let target = sure_branch_target(&reader, address);

                assert_eq!(target.is_some(), rs == rt, "{:08X}", op | (rs << 21) | (rt << 16));
            }
        }

        // blez, bgtz, bltz, bgez
        for word in [0x18000000u32, 0x1C000000, 0x04000000, 0x04010000] {
            let reader = single(address.inner(), word | (rs << 21) | 4);
            let target = sure_branch_target(&reader, address);

            assert_eq!(target.is_some(), rs == 0, "{:08X}", word | (rs << 21));
        }
    }
}

#[test]
fn sure_branch_outcomes() {
    let address = Vram::new(0x00100000);
    let taken = Some(Vram::new(0x00100014));
    let not_taken = Some(Vram::new(0x00100008));

    for (word, expected) in [
        (0x10000004, taken),     // beq  $zero, $zero
        (0x14000004, not_taken), // bne  $zero, $zero
        (0x18000004, taken),     // blez $zero
        (0x04010004, taken),     // bgez $zero
        (0x1C000004, not_taken), // bgtz $zero
        (0x04000004, not_taken), // bltz $zero
    ] {
        let reader = single(address.inner(), word);

        assert_eq!(sure_branch_target(&reader, address), expected, "{:08X}", word);
    }
}
