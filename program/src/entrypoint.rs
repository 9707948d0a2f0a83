use pinocchio::{
    account_info::AccountInfo, msg, program_entrypoint, program_error::ProgramError,
    pubkey::Pubkey, ProgramResult,
};

use crate::instruction::{self, ExampleInstruction};

// Entrypoint macro
program_entrypoint!(process_instruction);

#[inline(always)]
fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    if *program_id != crate::ID {
        return Err(ProgramError::IncorrectProgramId);
    }

    // single-byte discriminator + raw payload
    let (disc, payload) = instruction_data
        .split_first()
        .ok_or(ProgramError::InvalidInstructionData)?;

    match ExampleInstruction::try_from(disc)? {
        ExampleInstruction::Initialize => {
            msg!("Instruction: Initialize");
            instruction::process_initialize(program_id, accounts, payload)
        }
        ExampleInstruction::RefreshReserve => {
            msg!("Instruction: RefreshReserve");
            instruction::process_refresh_reserve(accounts, payload)
        }
        ExampleInstruction::RefreshObligation => {
            msg!("Instruction: RefreshObligation");
            instruction::process_refresh_obligation(accounts, payload)
        }
    }
}
