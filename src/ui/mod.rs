pub mod layout;
pub mod onboarding;
pub mod reveal;
pub mod theme;
