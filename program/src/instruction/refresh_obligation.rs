use pinocchio::{account_info::AccountInfo, program_error::ProgramError, ProgramResult};

use crate::{
    cpi::lending::{check_lending_program, RefreshObligation},
    error::{to_program_error, ExampleError},
};

pub fn process_refresh_obligation(accounts: &[AccountInfo], payload: &[u8]) -> ProgramResult {
    let [lending_program, obligation, clock, reserves @ ..] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    if !payload.is_empty() {
        return Err(to_program_error(ExampleError::UnexpectedPayload));
    }
    check_lending_program(lending_program)?;

    // the CPI wrapper rejects more than MAX_OBLIGATION_RESERVES
    RefreshObligation {
        obligation,
        clock_sysvar: clock,
        reserves,
    }
    .invoke()
}
