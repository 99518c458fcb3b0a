// Players module - Contains all decision strategies
//
// This module organizes the PlayerStrategy implementations

pub mod automated;
pub mod human;
pub mod scripted;

// Re-export strategy implementations for ease of use
pub use self::automated::AutomatedStrategy;
pub use self::human::HumanStrategy;
pub use self::scripted::ScriptedStrategy;
