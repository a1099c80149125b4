//! Core diária domain types.

use std::fmt::Display;

use time::OffsetDateTime;

use crate::Error;

/// The monthly allowance used when none is configured.
pub const DEFAULT_SALDO_MENSAL: f64 = 60_000.0;

/// Database identifier for a diária.
pub type DiariaId = i64;

/// A military member's name as it is stored: trimmed and in uppercase.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MilitarNome(String);

impl MilitarNome {
    /// Normalize `name` by trimming surrounding whitespace and converting it
    /// to uppercase.
    ///
    /// The name is not required to be non-empty; blank names are rejected
    /// only by the insert form.
    pub fn new(name: &str) -> Self {
        Self(name.trim().to_uppercase())
    }

    /// Create a name from a stored value without normalizing it.
    ///
    /// Names are only normalized on the write paths, so values read back
    /// from the store are kept exactly as they are.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl AsRef<str> for MilitarNome {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for MilitarNome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An amount of the monthly allowance spent on one military member.
#[derive(Debug, Clone, PartialEq)]
pub struct Diaria {
    /// The id assigned by the store.
    pub id: DiariaId,
    /// Who the allowance was paid to.
    pub militar_nome: MilitarNome,
    /// The amount in reais.
    pub valor: f64,
    /// When the record was created, in UTC. Doubles as the record's date.
    pub created_at: OffsetDateTime,
}

/// Parse the text of a value input as a decimal number.
///
/// Both `.` and `,` are accepted as the decimal separator.
///
/// # Errors
///
/// Returns [Error::InvalidValor] if `raw` is not a finite number.
pub fn parse_valor(raw: &str) -> Result<f64, Error> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|valor| valor.is_finite())
        .ok_or_else(|| Error::InvalidValor(raw.to_owned()))
}

/// The text to prefill a value input with, e.g. `150` or `12.5`.
pub fn valor_input_text(valor: f64) -> String {
    valor.to_string()
}

#[cfg(test)]
mod militar_nome_tests {
    use super::MilitarNome;

    #[test]
    fn new_trims_and_uppercases() {
        let name = MilitarNome::new("  joão silva ");

        assert_eq!(name.as_ref(), "JOÃO SILVA");
    }

    #[test]
    fn new_keeps_inner_whitespace() {
        let name = MilitarNome::new("\tsgt  pereira\n");

        assert_eq!(name.as_ref(), "SGT  PEREIRA");
    }

    #[test]
    fn new_unchecked_keeps_value() {
        let name = MilitarNome::new_unchecked(" cabo lima");

        assert_eq!(name.to_string(), " cabo lima");
    }
}
