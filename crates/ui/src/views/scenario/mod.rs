mod mfa;
mod password;
mod phishing;

pub use mfa::MfaCard;
pub use password::PasswordCard;
pub use phishing::PhishingCard;
