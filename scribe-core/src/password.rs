//! Password strength evaluation for the registration form

use std::fmt;

/// Symbols that count towards the "special character" criterion
pub const SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Minimum number of satisfied criteria before registration is allowed
pub const MIN_REGISTRATION_SCORE: u8 = 3;

/// The five independent criteria
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PasswordChecks {
    pub length: bool,
    pub lowercase: bool,
    pub uppercase: bool,
    pub digit: bool,
    pub symbol: bool,
}

impl PasswordChecks {
    /// Each criterion with a short label, in display order
    pub fn labeled(&self) -> [(&'static str, bool); 5] {
        [
            ("8+ characters", self.length),
            ("lowercase", self.lowercase),
            ("uppercase", self.uppercase),
            ("digits", self.digit),
            ("symbols", self.symbol),
        ]
    }

    pub fn score(&self) -> u8 {
        self.labeled().iter().filter(|(_, ok)| *ok).count() as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

impl PasswordStrength {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=1 => PasswordStrength::Weak,
            2..=3 => PasswordStrength::Medium,
            _ => PasswordStrength::Strong,
        }
    }
}

impl fmt::Display for PasswordStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PasswordStrength::Weak => "weak",
            PasswordStrength::Medium => "medium",
            PasswordStrength::Strong => "strong",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordReport {
    pub checks: PasswordChecks,
    pub score: u8,
    pub strength: PasswordStrength,
}

impl PasswordReport {
    pub fn allows_registration(&self) -> bool {
        self.score >= MIN_REGISTRATION_SCORE
    }
}

/// Evaluate a candidate password
pub fn evaluate(password: &str) -> PasswordReport {
    let checks = PasswordChecks {
        length: password.chars().count() >= 8,
        lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
        uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
        digit: password.chars().any(|c| c.is_ascii_digit()),
        symbol: password.chars().any(|c| SYMBOLS.contains(c)),
    };
    let score = checks.score();

    PasswordReport {
        checks,
        score,
        strength: PasswordStrength::from_score(score),
    }
}
