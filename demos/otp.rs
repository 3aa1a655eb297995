//! Interactive demo - a 6-digit code entry row.
//!
//! Type digits to fill boxes, Backspace to clear and walk back, arrows to
//! move, paste a full 6-digit code to fill everything at once.
//! Escape or Ctrl+C quits.
//!
//! Run with: cargo run --example otp

use std::io::{self, Write, stdout};
use std::time::Duration;

use crossterm::cursor;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use spark_signals::{Signal, signal};

use otp_tui::state::{focus, input};
use otp_tui::widget::{OtpInputProps, otp_input};
use otp_tui::{project, render};

const CODE_LENGTH: usize = 6;

fn main() -> io::Result<()> {
    let code = signal(String::new());
    let cleanup = otp_input(OtpInputProps {
        auto_focus: true,
        ..OtpInputProps::new(code.clone(), CODE_LENGTH)
    });

    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnableBracketedPaste, cursor::Hide)?;

    let result = run(&mut out, &code);

    execute!(out, DisableBracketedPaste, cursor::Show)?;
    disable_raw_mode()?;
    cleanup();
    println!();
    result
}

fn run(out: &mut impl Write, code: &Signal<String>) -> io::Result<()> {
    loop {
        let slots = project(&code.get(), CODE_LENGTH);
        render::draw(out, &slots, focus::get_focused_box())?;

        let Some(event) = input::poll_event(Duration::from_millis(33))? else {
            continue;
        };

        if let input::InputEvent::Key(ref key) = event {
            if key.key == "Escape" || (key.key == "c" && key.modifiers.ctrl) {
                return Ok(());
            }
        }
        input::route_event(event);
    }
}
