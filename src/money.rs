//! Currency codes and the fixed conversion rule.

use std::fmt;

use crate::Amount;

/// Fixed exchange rate: 1 EUR = 5 RON.
pub const RON_PER_EUR: i64 = 5;

/// Supported currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    Ron,
    Eur,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Ron => "RON",
            Currency::Eur => "EUR",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "RON" => Some(Currency::Ron),
            "EUR" => Some(Currency::Eur),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An amount tagged with its currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Money {
    pub amount: Amount,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount: Amount, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Express this value in `target` currency under the fixed 5:1 rule.
    ///
    /// Every balance check and every balance mutation goes through this one
    /// function, so the two can never disagree about the converted amount.
    pub fn convert_to(self, target: Currency) -> Money {
        if self.currency == target {
            return self;
        }
        let amount = match target {
            // EUR -> RON
            Currency::Ron => self.amount.scale_by(RON_PER_EUR),
            // RON -> EUR
            Currency::Eur => self.amount.div_round(RON_PER_EUR),
        };
        Money::new(amount, target)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}
