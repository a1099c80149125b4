//! Pure projections of the record list: filtering, totals and the
//! per-person summary.
//!
//! Nothing here mutates the records. Every view of the page is recomputed
//! from the current snapshot on each render.

use std::collections::HashMap;

use crate::diaria::{Diaria, MilitarNome, parse_valor};

/// The raw contents of the filter bar.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct Filters {
    /// A substring of the name, matched case-insensitively.
    #[serde(default)]
    pub militar: String,
    /// The smallest value to show, empty for no lower bound.
    #[serde(default)]
    pub valor_min: String,
    /// The largest value to show, empty for no upper bound.
    #[serde(default)]
    pub valor_max: String,
}

impl Filters {
    /// Whether every filter field is empty.
    pub fn is_empty(&self) -> bool {
        self.militar.is_empty() && self.valor_min.is_empty() && self.valor_max.is_empty()
    }

    /// Whether `diaria` passes all three filters.
    pub fn matches(&self, diaria: &Diaria) -> bool {
        let name_matches = diaria
            .militar_nome
            .as_ref()
            .to_lowercase()
            .contains(&self.militar.to_lowercase());
        let min_matches = bound(&self.valor_min).is_none_or(|min| diaria.valor >= min);
        let max_matches = bound(&self.valor_max).is_none_or(|max| diaria.valor <= max);

        name_matches && min_matches && max_matches
    }
}

/// An unset bound is `None`. A bound that does not parse is NaN, which no
/// value compares against successfully.
fn bound(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        None
    } else {
        Some(parse_valor(raw).unwrap_or(f64::NAN))
    }
}

/// Keep the records that pass `filters`, in their original order.
pub fn filter_diarias<'a>(records: &'a [Diaria], filters: &Filters) -> Vec<&'a Diaria> {
    records
        .iter()
        .filter(|diaria| filters.matches(diaria))
        .collect()
}

/// The sum of the values of all `records`.
pub fn total_gasto(records: &[Diaria]) -> f64 {
    records.iter().map(|diaria| diaria.valor).sum()
}

/// What is left of the monthly allowance. Negative when overspent.
pub fn saldo_disponivel(saldo_mensal: f64, total_gasto: f64) -> f64 {
    saldo_mensal - total_gasto
}

/// How much of the allowance was spent, as a percentage capped at 100.
pub fn percentual_gasto(saldo_mensal: f64, total_gasto: f64) -> f64 {
    if saldo_mensal <= 0.0 {
        return 100.0;
    }

    (total_gasto / saldo_mensal * 100.0).min(100.0)
}

/// The number of diárias and their total for one military member.
#[derive(Debug, Clone, PartialEq)]
pub struct MilitarSummary {
    pub nome: MilitarNome,
    pub quantidade: usize,
    pub total: f64,
}

/// Group `records` by name and sort the groups by total, largest first.
///
/// Groups with the same total keep the order in which their names first
/// appear in `records`.
pub fn summarize_by_militar<'a>(
    records: impl IntoIterator<Item = &'a Diaria>,
) -> Vec<MilitarSummary> {
    let mut summaries: Vec<MilitarSummary> = Vec::new();
    let mut index_by_name: HashMap<&MilitarNome, usize> = HashMap::new();

    for diaria in records {
        match index_by_name.get(&diaria.militar_nome) {
            Some(&index) => {
                summaries[index].quantidade += 1;
                summaries[index].total += diaria.valor;
            }
            None => {
                index_by_name.insert(&diaria.militar_nome, summaries.len());
                summaries.push(MilitarSummary {
                    nome: diaria.militar_nome.clone(),
                    quantidade: 1,
                    total: diaria.valor,
                });
            }
        }
    }

    // `sort_by` is stable, which gives the first-seen order for ties.
    summaries.sort_by(|a, b| b.total.total_cmp(&a.total));
    summaries
}

/// Everything the page derives from the records and the filters.
#[derive(Debug, PartialEq)]
pub struct DiariasView<'a> {
    pub filtered: Vec<&'a Diaria>,
    pub total_gasto: f64,
    pub saldo_disponivel: f64,
    pub percentual_gasto: f64,
    pub resumo: Vec<MilitarSummary>,
}

impl<'a> DiariasView<'a> {
    /// Derive the page's views. The totals cover all of `records`, while the
    /// list and the summary only cover the records that pass `filters`.
    pub fn compute(records: &'a [Diaria], filters: &Filters, saldo_mensal: f64) -> Self {
        let filtered = filter_diarias(records, filters);
        let total_gasto = total_gasto(records);
        let resumo = summarize_by_militar(filtered.iter().copied());

        Self {
            filtered,
            total_gasto,
            saldo_disponivel: saldo_disponivel(saldo_mensal, total_gasto),
            percentual_gasto: percentual_gasto(saldo_mensal, total_gasto),
            resumo,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_data {
    use time::{Duration, OffsetDateTime, macros::datetime};

    use crate::diaria::{Diaria, MilitarNome};

    /// Records named and valued as given, newest first, one minute apart.
    pub(crate) fn diarias(entries: &[(&str, f64)]) -> Vec<Diaria> {
        let newest: OffsetDateTime = datetime!(2025-06-30 12:00 UTC);

        entries
            .iter()
            .enumerate()
            .map(|(i, (name, valor))| Diaria {
                id: (entries.len() - i) as i64,
                militar_nome: MilitarNome::new(name),
                valor: *valor,
                created_at: newest - Duration::minutes(i as i64),
            })
            .collect()
    }
}

#[cfg(test)]
mod filter_tests {
    use crate::diaria::Diaria;

    use super::{Filters, filter_diarias, test_data::diarias};

    fn values(records: &[&Diaria]) -> Vec<f64> {
        records.iter().map(|diaria| diaria.valor).collect()
    }

    #[test]
    fn empty_filters_match_everything() {
        let records = diarias(&[("ALICE", 100.0), ("BOB", 50.0)]);

        let got = filter_diarias(&records, &Filters::default());

        assert_eq!(got.len(), 2);
    }

    #[test]
    fn min_and_max_are_inclusive_bounds() {
        let records = diarias(&[("A", 50.0), ("B", 150.0), ("C", 250.0)]);
        let filters = Filters {
            valor_min: "100".to_owned(),
            valor_max: "200".to_owned(),
            ..Default::default()
        };

        let got = filter_diarias(&records, &filters);

        assert_eq!(values(&got), vec![150.0]);

        let filters = Filters {
            valor_min: "150".to_owned(),
            valor_max: "150".to_owned(),
            ..Default::default()
        };
        assert_eq!(values(&filter_diarias(&records, &filters)), vec![150.0]);
    }

    #[test]
    fn name_filter_is_case_insensitive_substring() {
        let records = diarias(&[("JOÃO SILVA", 10.0), ("MARIA", 20.0), ("JOANA", 30.0)]);
        let filters = Filters {
            militar: "jo".to_owned(),
            ..Default::default()
        };

        let got = filter_diarias(&records, &filters);

        assert_eq!(values(&got), vec![10.0, 30.0]);
    }

    #[test]
    fn unparseable_bound_matches_nothing() {
        let records = diarias(&[("A", 50.0), ("B", 150.0)]);
        let filters = Filters {
            valor_min: "abc".to_owned(),
            ..Default::default()
        };

        assert!(filter_diarias(&records, &filters).is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let records = diarias(&[
            ("ALICE", 100.0),
            ("BOB", 50.0),
            ("ALICE", 200.0),
            ("CARLA", 175.0),
        ]);
        let filters = Filters {
            militar: "a".to_owned(),
            valor_min: "90".to_owned(),
            valor_max: "190".to_owned(),
        };

        let once: Vec<Diaria> = filter_diarias(&records, &filters)
            .into_iter()
            .cloned()
            .collect();
        let twice: Vec<Diaria> = filter_diarias(&once, &filters)
            .into_iter()
            .cloned()
            .collect();

        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn is_empty_checks_every_field() {
        assert!(Filters::default().is_empty());
        assert!(
            !Filters {
                valor_max: "1".to_owned(),
                ..Default::default()
            }
            .is_empty()
        );
    }
}
