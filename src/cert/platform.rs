/* src/cert/platform.rs */

use std::process::Command;

/// Keeps the certificate tool from flashing a console window.
///
/// Only Windows opens one for console children of a GUI-subsystem parent;
/// everywhere else this does nothing.
pub fn hide_console_window(cmd: &mut Command) {
    hide_console_window_inner(cmd);
}

#[cfg(target_os = "windows")]
fn hide_console_window_inner(cmd: &mut Command) {
    use std::os::windows::process::CommandExt;

    const CREATE_NO_WINDOW: u32 = 0x0800_0000;
    cmd.creation_flags(CREATE_NO_WINDOW);
}

#[cfg(not(target_os = "windows"))]
fn hide_console_window_inner(_cmd: &mut Command) {}
