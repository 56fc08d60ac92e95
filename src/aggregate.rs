use crate::model::Record;

/// Income, expense and their difference.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Totals {
    pub total_receitas: f64,
    pub total_despesas: f64,
    pub saldo: f64,
}

impl Totals {
    pub fn from_records(receitas: &[Record], despesas: &[Record]) -> Self {
        let total_receitas = sum(receitas);
        let total_despesas = sum(despesas);
        Self {
            total_receitas,
            total_despesas,
            saldo: total_receitas - total_despesas,
        }
    }
}

fn sum(records: &[Record]) -> f64 {
    records.iter().map(|r| r.valor.value()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{sample_despesas, sample_receitas};

    #[test]
    fn sums_both_collections() {
        let totals = Totals::from_records(&sample_receitas(), &sample_despesas());

        assert_eq!(totals.total_receitas, 5300.0);
        assert_eq!(totals.total_despesas, 2170.75);
        assert_eq!(totals.saldo, 3129.25);
    }

    #[test]
    fn saldo_is_exactly_the_difference() {
        let receitas = vec![Record::new(1, "a", 0.1), Record::new(2, "b", 0.2)];
        let despesas = vec![Record::new(1, "c", 0.3), Record::new(2, "d", -7.77)];

        let totals = Totals::from_records(&receitas, &despesas);

        assert_eq!(totals.saldo, totals.total_receitas - totals.total_despesas);
    }

    #[test]
    fn empty_collections_total_zero() {
        assert_eq!(Totals::from_records(&[], &[]), Totals::default());
    }

    #[test]
    fn non_numeric_valor_counts_as_zero() {
        let record: Record =
            serde_json::from_str(r#"{"id": 1, "descricao": "x", "valor": "abc"}"#).unwrap();

        let totals = Totals::from_records(&[record], &[]);

        assert_eq!(totals.total_receitas, 0.0);
        assert_eq!(totals.saldo, 0.0);
    }
}
