//! `extdir init` — generate a starter tenants file.
//!
//! Supports two modes:
//! - **Template mode** (default): writes a static template tenants file.
//! - **Interactive mode** (`--interactive`): walks through a step-by-step wizard.

mod interactive;
mod serialize;
mod template;

use crate::cli::InitArgs;
use crate::error::ExtdirError;

pub fn execute(args: &InitArgs) -> Result<(), ExtdirError> {
    if args.interactive {
        interactive::run(args)
    } else {
        template::run(args)
    }
}
