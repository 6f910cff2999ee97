//! Narrow interfaces for interactive input and browser hand-off.
//!
//! The request and cache logic stays deterministic by only ever talking to
//! these traits; the terminal implementations live here.

use std::sync::Arc;

use dialoguer::{Input, theme::ColorfulTheme};

use crate::error::Result;

/// Reads a single line of input from the operator
pub trait Prompter {
    fn prompt(&self, message: &str) -> Result<String>;
}

impl<P: Prompter + ?Sized> Prompter for Arc<P> {
    fn prompt(&self, message: &str) -> Result<String> {
        (**self).prompt(message)
    }
}

/// Terminal prompter backed by dialoguer
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn prompt(&self, message: &str) -> Result<String> {
        let value: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .interact_text()?;
        Ok(value)
    }
}

/// Opens a URL in the operator's browser
pub trait UrlOpener {
    fn open(&self, url: &str) -> std::io::Result<()>;
}

impl<O: UrlOpener + ?Sized> UrlOpener for Arc<O> {
    fn open(&self, url: &str) -> std::io::Result<()> {
        (**self).open(url)
    }
}

/// Opener that shells out to the platform launcher
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn open(&self, url: &str) -> std::io::Result<()> {
        #[cfg(target_os = "macos")]
        let mut command = {
            let mut c = std::process::Command::new("open");
            c.arg(url);
            c
        };

        #[cfg(target_os = "windows")]
        let mut command = {
            let mut c = std::process::Command::new("cmd");
            c.args(["/C", "start", "", url]);
            c
        };

        #[cfg(all(unix, not(target_os = "macos")))]
        let mut command = {
            let mut c = std::process::Command::new("xdg-open");
            c.arg(url);
            c
        };

        command.spawn().map(|_| ())
    }
}
