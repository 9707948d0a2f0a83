use pinocchio::{account_info::AccountInfo, program_error::ProgramError, ProgramResult};

use crate::{
    cpi::lending::{check_lending_program, RefreshReserve},
    error::{to_program_error, ExampleError},
};

pub fn process_refresh_reserve(accounts: &[AccountInfo], payload: &[u8]) -> ProgramResult {
    let [lending_program, reserve, pyth_price, switchboard_feed, clock, _rest @ ..] = accounts
    else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    if !payload.is_empty() {
        return Err(to_program_error(ExampleError::UnexpectedPayload));
    }
    check_lending_program(lending_program)?;

    RefreshReserve {
        reserve,
        pyth_price,
        switchboard_feed,
        clock_sysvar: clock,
    }
    .invoke()
}
