use pinocchio::program_error::ProgramError;
use shank::ShankInstruction;

pub mod initialize;
pub use initialize::*;

pub mod refresh_reserve;
pub use refresh_reserve::*;

pub mod refresh_obligation;
pub use refresh_obligation::*;

#[repr(u8)]
#[rustfmt::skip]
#[derive(Clone, Copy, Debug, PartialEq, Eq, ShankInstruction)]
pub enum ExampleInstruction {
    /// Takes the empty `InitializeArgs`; any accounts are ignored.
    Initialize,

    /// Forward a reserve refresh to the lending program.
    #[account(0, name = "lending_program", desc = "Token-lending program")]
    #[account(1, writable, name = "reserve", desc = "Reserve to refresh")]
    #[account(2, name = "pyth_price", desc = "Pyth price account of the reserve")]
    #[account(3, name = "switchboard_feed", desc = "Switchboard feed of the reserve")]
    #[account(4, name = "clock", desc = "Clock sysvar")]
    RefreshReserve,

    /// Forward an obligation refresh to the lending program.
    /// Deposit then borrow reserves follow the fixed accounts.
    #[account(0, name = "lending_program", desc = "Token-lending program")]
    #[account(1, writable, name = "obligation", desc = "Obligation to refresh")]
    #[account(2, name = "clock", desc = "Clock sysvar")]
    RefreshObligation,
}

impl TryFrom<&u8> for ExampleInstruction {
    type Error = ProgramError;

    fn try_from(value: &u8) -> Result<Self, Self::Error> {
        match *value {
            0 => Ok(ExampleInstruction::Initialize),
            1 => Ok(ExampleInstruction::RefreshReserve),
            2 => Ok(ExampleInstruction::RefreshObligation),
            _ => Err(ProgramError::InvalidInstructionData),
        }
    }
}
