use color_eyre::eyre::{Result, WrapErr};
use ratatui::DefaultTerminal;

/// Raw mode and the alternate screen for as long as the guard lives.
pub struct TerminalGuard {
    terminal: DefaultTerminal,
}

impl TerminalGuard {
    /// Enter raw mode and the alternate screen. On failure whatever was
    /// already switched on is switched back off before the error returns.
    pub fn acquire() -> Result<Self> {
        match ratatui::try_init() {
            Ok(terminal) => Ok(TerminalGuard { terminal }),
            Err(err) => {
                ratatui::restore();
                Err(err).wrap_err("failed to initialise the terminal")
            }
        }
    }

    pub fn terminal(&mut self) -> &mut DefaultTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        ratatui::restore();
    }
}

/// Chain a hook that leaves the alternate screen before the panic message
/// is printed.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));
}
