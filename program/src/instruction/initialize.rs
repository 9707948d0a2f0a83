use pinocchio::{account_info::AccountInfo, msg, pubkey::Pubkey, ProgramResult};
use pinocchio_log::log;

use crate::error::{to_program_error, ExampleError};

pub fn process_initialize(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    payload: &[u8],
) -> ProgramResult {
    // InitializeArgs has no fields, so its encoding is empty
    if !payload.is_empty() {
        return Err(to_program_error(ExampleError::UnexpectedPayload));
    }

    msg!("Greetings from:");
    pinocchio::pubkey::log(program_id);
    log!("initialize: {} accounts passed", accounts.len());

    Ok(())
}
