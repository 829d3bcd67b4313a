use crate::console::commands::CallableTrait;

pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct WelcomeCommand;

impl WelcomeCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WelcomeCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CallableTrait for WelcomeCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        println!("Welcome to Gorbit CLI!");
        Ok(())
    }
}

/// `gorbit version`
pub struct VersionCommand;

impl VersionCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for VersionCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CallableTrait for VersionCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        println!("Gorbit CLI Version: {}", CLI_VERSION);
        Ok(())
    }
}
