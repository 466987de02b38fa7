//! Random password generation.
//!
//! The generator never owns a random source. Callers hand in the source for
//! their worker so a single seeded stream serves every call on that worker.

use rand::Rng;

use crate::error::ConfigError;

/// Distinct password symbols, in first-occurrence order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    /// Build an alphabet from the characters of `symbols`, dropping duplicates
    pub fn new(symbols: &str) -> Result<Self, ConfigError> {
        let mut distinct: Vec<char> = Vec::new();
        for symbol in symbols.chars() {
            if !distinct.contains(&symbol) {
                distinct.push(symbol);
            }
        }
        if distinct.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }
        Ok(Self { symbols: distinct })
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }
}

/// Draws fixed-length passwords uniformly from an alphabet
#[derive(Debug, Clone)]
pub struct PasswordGenerator {
    length: usize,
    alphabet: Alphabet,
}

impl PasswordGenerator {
    pub fn new(length: usize, alphabet: Alphabet) -> Result<Self, ConfigError> {
        if length == 0 {
            return Err(ConfigError::ZeroPasswordLength);
        }
        Ok(Self { length, alphabet })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Number of distinct passwords this generator can produce, saturating at `u128::MAX`
    pub fn password_space(&self) -> u128 {
        let base = self.alphabet.len() as u128;
        u32::try_from(self.length)
            .ok()
            .and_then(|exp| base.checked_pow(exp))
            .unwrap_or(u128::MAX)
    }

    /// Generate one password, each position drawn independently
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let symbols = self.alphabet.symbols();
        (0..self.length)
            .map(|_| symbols[rng.gen_range(0..symbols.len())])
            .collect()
    }
}
