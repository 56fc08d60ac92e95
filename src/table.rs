use yew::prelude::*;

use crate::model::{Record, RecordKind};

/// What one table row shows.
#[derive(Clone, Debug, PartialEq)]
pub struct TableRow {
    pub id: i64,
    pub descricao: String,
    pub valor: String,
}

/// One row per record, same order as the input.
pub fn table_rows(records: &[Record]) -> Vec<TableRow> {
    records
        .iter()
        .map(|r| TableRow {
            id: r.id,
            descricao: r.descricao.clone(),
            valor: format!("{:.2}", r.valor.value()),
        })
        .collect()
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Formats an amount the Brazilian way: `R$ 1.234,56`.
pub fn format_currency(amount: f64, symbol: &str) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{} {},{}", sign, symbol, group_thousands(int_part), cents)
}

#[derive(Properties, PartialEq)]
pub struct RecordTableProps {
    pub kind: RecordKind,
    pub records: Vec<Record>,
    pub on_delete: Callback<(RecordKind, i64)>,
    #[prop_or_default]
    pub busy: bool,
}

#[function_component(RecordTable)]
pub fn record_table(props: &RecordTableProps) -> Html {
    let kind = props.kind;
    let rows = table_rows(&props.records);

    html! {
        <div class="table-responsive">
            <table id={kind.table_id()} class="table table-hover align-middle mb-0">
                <thead>
                    <tr class="text-muted small text-uppercase">
                        <th>{"ID"}</th>
                        <th>{"Descrição"}</th>
                        <th class="text-end">{"Valor"}</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    { for rows.into_iter().map(|row| {
                        let on_delete = props.on_delete.clone();
                        let id = row.id;
                        html! {
                            <tr key={row.id}>
                                <td>{ row.id.to_string() }</td>
                                <td>{ row.descricao }</td>
                                <td class="text-end">{ row.valor }</td>
                                <td class="text-end">
                                    <button
                                        type="button"
                                        class="btn btn-sm btn-danger"
                                        disabled={props.busy}
                                        onclick={Callback::from(move |_| on_delete.emit((kind, id)))}
                                    >
                                        {"Excluir"}
                                    </button>
                                </td>
                            </tr>
                        }
                    }) }
                </tbody>
            </table>
            if props.records.is_empty() {
                <p class="text-muted small text-center py-3 mb-0">
                    { format!("Nenhuma {} cadastrada.", kind.singular().to_lowercase()) }
                </p>
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_row_per_record_in_input_order() {
        let records = vec![
            Record::new(3, "Transporte", 220.0),
            Record::new(1, "Aluguel", 1500.0),
            Record::new(2, "Supermercado", 450.75),
        ];

        let rows = table_rows(&records);

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(rows[2].descricao, "Supermercado");
    }

    #[test]
    fn amounts_have_two_decimals() {
        let rows = table_rows(&[Record::new(1, "Internet", 99.9), Record::new(2, "x", 5.0)]);

        assert_eq!(rows[0].valor, "99.90");
        assert_eq!(rows[1].valor, "5.00");
    }

    #[test]
    fn rerendering_empty_collection_yields_no_rows() {
        let before = table_rows(&[Record::new(1, "Aluguel", 1500.0)]);
        assert_eq!(before.len(), 1);

        assert!(table_rows(&[]).is_empty());
    }

    #[test]
    fn currency_uses_brazilian_separators() {
        assert_eq!(format_currency(0.0, "R$"), "R$ 0,00");
        assert_eq!(format_currency(450.75, "R$"), "R$ 450,75");
        assert_eq!(format_currency(4500.0, "R$"), "R$ 4.500,00");
        assert_eq!(format_currency(1234567.891, "R$"), "R$ 1.234.567,89");
        assert_eq!(format_currency(-2170.75, "R$"), "-R$ 2.170,75");
    }

    #[test]
    fn tiny_negative_amounts_do_not_show_a_sign() {
        assert_eq!(format_currency(-0.001, "R$"), "R$ 0,00");
    }
}
