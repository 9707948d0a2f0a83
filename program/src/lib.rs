//! The `example` program.
//!
//! `initialize` takes no arguments and only logs a greeting. The two refresh
//! instructions forward to the token-lending program through the wrappers in
//! [`cpi::lending`], which cover the lending instruction set for other
//! programs to reuse.
#![cfg_attr(feature = "sbf", no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod cpi;
pub mod error;
pub mod instruction;

#[cfg(not(feature = "no-entrypoint"))]
pub mod entrypoint;

pinocchio_pubkey::declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[cfg(feature = "sbf")]
#[panic_handler]
fn panic(_info: &core::panic::PanicInfo) -> ! {
    loop {}
}

// no heap on chain; CPI data lives in stack buffers
#[cfg(feature = "sbf")]
pinocchio::no_allocator!();
