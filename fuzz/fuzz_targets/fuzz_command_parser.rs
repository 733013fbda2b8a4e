//! Fuzz target: `ProgramBuilder::enter`
//!
//! Splits arbitrary text into lines and feeds each one to a program
//! builder.  The builder must never panic, must only ever hold
//! vocabulary commands, and must reject everything after `done`.
//!
//! cargo fuzz run fuzz_command_parser

#![no_main]

use finchcontrol::app::commands::Command;
use finchcontrol::app::program::{ProgramBuilder, ProgramEntry, ProgramError};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };

    let mut builder = ProgramBuilder::new();
    for line in text.lines() {
        let was_closed = builder.is_closed();
        match builder.enter(line) {
            Ok(ProgramEntry::Appended(cmd)) => {
                assert!(!was_closed);
                assert!(cmd != Command::None && cmd != Command::Done);
            }
            Ok(ProgramEntry::Closed) => assert!(!was_closed),
            Err(ProgramError::Closed) => assert!(was_closed),
            Err(ProgramError::Unrecognized(_)) => {}
        }
    }

    let program = builder.finish();
    assert!(program.commands().iter().all(|c| Command::VOCABULARY.contains(c)));
});
