pub mod commit_button;
pub mod greeting_input;
pub mod heading;
pub mod help_bar;

// Re-export core Component trait
pub use greeter_core::Component;

pub use commit_button::{CommitButton, CommitButtonProps};
pub use greeting_input::{GreetingInput, GreetingInputProps, PLACEHOLDER};
pub use heading::{GreetingHeading, GreetingHeadingProps};
pub use help_bar::{HelpBar, HelpBarProps};
