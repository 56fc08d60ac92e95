use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// An income or expense entry as the API returns it.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Record {
    pub id: i64,
    #[serde(default)]
    pub descricao: String,
    #[serde(default)]
    pub valor: Amount,
    /// Timestamp exactly as the server serialized it.
    #[serde(default)]
    pub data: Option<String>,
}

impl Record {
    pub fn new(id: i64, descricao: &str, valor: f64) -> Self {
        Self {
            id,
            descricao: descricao.to_string(),
            valor: Amount::new(valor),
            data: None,
        }
    }
}

/// A monetary value coerced to a finite number.
///
/// The API is not strict about `valor`: numbers, numeric strings, `null` and
/// garbage all show up. Anything that is not a finite number counts as zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(from = "RawAmount", into = "f64")]
pub struct Amount(f64);

impl Amount {
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(value)
        } else {
            Self(0.0)
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<Amount> for f64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl From<RawAmount> for Amount {
    fn from(raw: RawAmount) -> Self {
        match raw {
            RawAmount::Number(n) => Amount::new(n),
            RawAmount::Text(s) => Amount::new(s.trim().parse::<f64>().unwrap_or(0.0)),
            RawAmount::Other(_) => Amount::default(),
        }
    }
}

/// Which of the two collections a record belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Receitas,
    Despesas,
}

impl RecordKind {
    /// Path segment under `/usuarios/{id}/`.
    pub fn path(self) -> &'static str {
        match self {
            RecordKind::Receitas => "receitas",
            RecordKind::Despesas => "despesas",
        }
    }

    pub fn table_id(self) -> &'static str {
        match self {
            RecordKind::Receitas => "tabelaReceitas",
            RecordKind::Despesas => "tabelaDespesas",
        }
    }

    pub fn form_id(self) -> &'static str {
        match self {
            RecordKind::Receitas => "formReceita",
            RecordKind::Despesas => "formDespesa",
        }
    }

    pub fn modal_id(self) -> &'static str {
        match self {
            RecordKind::Receitas => "modalReceita",
            RecordKind::Despesas => "modalDespesa",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            RecordKind::Receitas => "Receitas",
            RecordKind::Despesas => "Despesas",
        }
    }

    pub fn singular(self) -> &'static str {
        match self {
            RecordKind::Receitas => "Receita",
            RecordKind::Despesas => "Despesa",
        }
    }

    pub fn added_message(self) -> &'static str {
        match self {
            RecordKind::Receitas => "Receita adicionada!",
            RecordKind::Despesas => "Despesa adicionada!",
        }
    }

    pub fn add_failed_message(self) -> &'static str {
        match self {
            RecordKind::Receitas => "Erro ao adicionar receita",
            RecordKind::Despesas => "Erro ao adicionar despesa",
        }
    }
}

/// Body of a create request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewRecord {
    pub descricao: String,
    pub valor: f64,
    pub data: String,
}

impl NewRecord {
    /// Builds a record stamped with the current instant.
    pub fn now(descricao: String, valor: f64) -> Self {
        Self {
            descricao,
            valor,
            data: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Income shown when the API cannot be reached.
pub fn sample_receitas() -> Vec<Record> {
    vec![
        Record::new(1, "Salário", 4500.00),
        Record::new(2, "Freelance", 800.00),
    ]
}

/// Expenses shown when the API cannot be reached.
pub fn sample_despesas() -> Vec<Record> {
    vec![
        Record::new(1, "Aluguel", 1500.00),
        Record::new(2, "Supermercado", 450.75),
        Record::new(3, "Transporte", 220.00),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Record {
        serde_json::from_str(json).expect("record should deserialize")
    }

    #[test]
    fn numeric_valor_is_kept() {
        let record = parse(r#"{"id": 7, "descricao": "Luz", "valor": 120.5, "data": "2024-03-01T10:00:00"}"#);

        assert_eq!(record.id, 7);
        assert_eq!(record.descricao, "Luz");
        assert_eq!(record.valor.value(), 120.5);
        assert_eq!(record.data.as_deref(), Some("2024-03-01T10:00:00"));
    }

    #[test]
    fn numeric_string_valor_is_parsed() {
        let record = parse(r#"{"id": 1, "descricao": "Água", "valor": " 89.90 "}"#);
        assert_eq!(record.valor.value(), 89.9);
    }

    #[test]
    fn non_numeric_valor_becomes_zero() {
        let record = parse(r#"{"id": 1, "descricao": "x", "valor": "abc"}"#);
        assert_eq!(record.valor.value(), 0.0);
    }

    #[test]
    fn null_or_missing_valor_becomes_zero() {
        assert_eq!(parse(r#"{"id": 1, "valor": null}"#).valor.value(), 0.0);
        assert_eq!(parse(r#"{"id": 1, "descricao": "x"}"#).valor.value(), 0.0);
        assert_eq!(parse(r#"{"id": 1, "valor": {"a": 1}}"#).valor.value(), 0.0);
    }

    #[test]
    fn non_finite_strings_become_zero() {
        assert_eq!(parse(r#"{"id": 1, "valor": "NaN"}"#).valor.value(), 0.0);
        assert_eq!(parse(r#"{"id": 1, "valor": "inf"}"#).valor.value(), 0.0);
    }

    #[test]
    fn new_record_serializes_api_fields() {
        let body = NewRecord::now("Internet".to_string(), 99.9);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["descricao"], "Internet");
        assert_eq!(json["valor"], 99.9);
        let data = json["data"].as_str().unwrap();
        assert!(data.ends_with('Z'), "expected a UTC timestamp, got {data}");
        assert!(chrono::DateTime::parse_from_rfc3339(data).is_ok());
    }

    #[test]
    fn sample_data_matches_the_fallback_figures() {
        let receitas: Vec<_> = sample_receitas()
            .into_iter()
            .map(|r| (r.descricao, r.valor.value()))
            .collect();
        let despesas: Vec<_> = sample_despesas()
            .into_iter()
            .map(|r| (r.descricao, r.valor.value()))
            .collect();

        assert_eq!(
            receitas,
            vec![("Salário".to_string(), 4500.0), ("Freelance".to_string(), 800.0)]
        );
        assert_eq!(
            despesas,
            vec![
                ("Aluguel".to_string(), 1500.0),
                ("Supermercado".to_string(), 450.75),
                ("Transporte".to_string(), 220.0),
            ]
        );
    }
}
