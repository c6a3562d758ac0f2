use std::{io, panic};

use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, LeaveAlternateScreen},
};

/// Restores the terminal before the default hook prints the panic, so the
/// message is not lost inside the alternate screen.
pub fn install_terminal_restore_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);

        tracing::error!(panic = %panic_info, "termchat panicked");
        default_hook(panic_info);
    }));
}
