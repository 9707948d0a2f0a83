use pinocchio::program_error::ProgramError;

// internal error enum; codes are stable for ProgramError::Custom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExampleError {
    UnexpectedPayload,
    InvalidLendingProgram,
    InvalidTokenProgram,
    TooManyReserves,
    TooManyAccounts,
    InvalidReserveConfig,
}

impl ExampleError {
    pub const fn code(self) -> u32 {
        match self {
            ExampleError::UnexpectedPayload => 0,
            ExampleError::InvalidLendingProgram => 1,
            ExampleError::InvalidTokenProgram => 2,
            ExampleError::TooManyReserves => 3,
            ExampleError::TooManyAccounts => 4,
            ExampleError::InvalidReserveConfig => 5,
        }
    }
}

// map internal errors to standard program error
pub fn to_program_error(err: ExampleError) -> ProgramError {
    match err {
        ExampleError::UnexpectedPayload => ProgramError::InvalidInstructionData,
        ExampleError::InvalidLendingProgram | ExampleError::InvalidTokenProgram => {
            ProgramError::IncorrectProgramId
        }
        other => ProgramError::Custom(other.code()),
    }
}

impl From<ExampleError> for ProgramError {
    fn from(err: ExampleError) -> Self {
        to_program_error(err)
    }
}
