use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::{
    domain::error::RepositoryError,
    infrastructure::{
        schema::{Schema, SchemaVersion},
        supabase_client::TableGateway,
    },
};

struct Table {
    columns: Vec<&'static str>,
    unique: Vec<Vec<&'static str>>,
    rows: Vec<Value>,
}

/// In-memory PostgREST stand-in that rejects unknown tables and columns the
/// way the real service does
#[derive(Clone, Default)]
pub struct FakeGateway {
    tables: Arc<Mutex<HashMap<String, Table>>>,
    failures: Arc<Mutex<HashMap<String, RepositoryError>>>,
    next_id: Arc<Mutex<u64>>,
}

impl FakeGateway {
    /// Tables laid out as `version` declares them
    pub fn with_schema(version: SchemaVersion) -> Self {
        let gateway = Self::default();
        gateway.install(version.schema());
        gateway
    }

    pub fn install(&self, s: &Schema) {
        let mut users = vec!["id", "nome_completo", s.user_document, "data_nascimento", "email"];
        users.extend(s.user_account);
        self.table(s.users, users, vec![vec![s.user_document], vec!["email"]]);
        self.table(
            s.providers,
            vec![
                "id",
                s.provider_user_fk,
                "nome",
                "sobrenome",
                s.user_document,
                "genero",
                "email",
                "tempo_experiencia",
                "nickname",
                "foto_url",
                "descricao",
                "rede_social",
                "linkedin",
                "disponibilidade",
                "idiomas",
                "telefone",
                "email_profissional",
            ],
            vec![vec!["nickname"], vec!["telefone"], vec!["email_profissional"]],
        );
        self.table(
            s.provider_categories,
            vec!["id", "prestador_id", "area_id"],
            vec![vec!["prestador_id", "area_id"]],
        );
        self.table(
            s.provider_services,
            vec!["id", "prestador_id", "servico_id"],
            vec![vec!["prestador_id", "servico_id"]],
        );
        self.table(s.attachments, vec!["id", "prestador_id", "tipo", "url"], vec![]);
        self.table(s.categories, vec!["id", "nome"], vec![vec!["nome"]]);
        let services = if s.services_have_area {
            vec!["id", "nome", "area_id"]
        } else {
            vec!["id", "nome"]
        };
        self.table(s.services, services, vec![vec!["nome"]]);
    }

    pub fn table(
        &self,
        name: &str,
        columns: Vec<&'static str>,
        unique: Vec<Vec<&'static str>>,
    ) {
        self.tables.lock().unwrap().insert(
            name.to_string(),
            Table {
                columns,
                unique,
                rows: Vec::new(),
            },
        );
    }

    /// Every call touching `table` fails with `error`
    pub fn fail(&self, table: &str, error: RepositoryError) {
        self.failures
            .lock()
            .unwrap()
            .insert(table.to_string(), error);
    }

    pub fn seed(&self, table: &str, rows: Vec<Value>) {
        let mut tables = self.tables.lock().unwrap();
        let table = tables.get_mut(table).unwrap();
        table.rows.extend(rows);
    }

    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .map(|t| t.rows.clone())
            .unwrap_or_default()
    }

    fn check_failure(&self, table: &str) -> Result<(), RepositoryError> {
        match self.failures.lock().unwrap().get(table) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

fn missing_table(name: &str) -> RepositoryError {
    RepositoryError::SchemaMismatch(format!("PGRST205: Could not find the table 'public.{name}'"))
}

fn missing_column(table: &str, column: &str) -> RepositoryError {
    RepositoryError::SchemaMismatch(format!("42703: column {table}.{column} does not exist"))
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl TableGateway for FakeGateway {
    async fn insert(&self, table: &str, rows: Vec<Value>) -> Result<Vec<Value>, RepositoryError> {
        self.check_failure(table)?;
        let mut tables = self.tables.lock().unwrap();
        let stored = tables.get_mut(table).ok_or_else(|| missing_table(table))?;

        let mut inserted = Vec::new();
        for mut row in rows {
            let object = row.as_object().cloned().unwrap_or_default();
            if let Some(column) = object
                .keys()
                .find(|k| !stored.columns.iter().any(|c| *c == k.as_str()))
            {
                return Err(RepositoryError::SchemaMismatch(format!(
                    "PGRST204: Could not find the '{column}' column of '{table}'"
                )));
            }
            let clash = stored.unique.iter().any(|key| {
                stored.rows.iter().chain(inserted.iter()).any(|existing: &Value| {
                    key.iter().all(|column| {
                        object.get(*column).is_some_and(|v| !v.is_null())
                            && existing.get(*column) == object.get(*column)
                    })
                })
            });
            if clash {
                return Err(RepositoryError::Conflict(format!(
                    "23505: duplicate key value violates unique constraint on {table}"
                )));
            }
            if row.get("id").is_none() {
                let mut next = self.next_id.lock().unwrap();
                *next += 1;
                row["id"] = json!(format!("{table}-{next}"));
            }
            inserted.push(row);
        }
        stored.rows.extend(inserted.iter().cloned());
        Ok(inserted)
    }

    async fn select_by_field(
        &self,
        table: &str,
        _columns: &str,
        filters: &[(&str, &str)],
    ) -> Result<Vec<Value>, RepositoryError> {
        self.check_failure(table)?;
        let tables = self.tables.lock().unwrap();
        let stored = tables.get(table).ok_or_else(|| missing_table(table))?;
        if let Some((column, _)) = filters
            .iter()
            .find(|(c, _)| !stored.columns.iter().any(|known| known == c))
        {
            return Err(missing_column(table, column));
        }
        Ok(stored
            .rows
            .iter()
            .filter(|row| {
                filters
                    .iter()
                    .all(|(column, value)| row.get(*column).map(text).as_deref() == Some(*value))
            })
            .cloned()
            .collect())
    }

    async fn select_all(
        &self,
        table: &str,
        _columns: &str,
        order: &str,
    ) -> Result<Vec<Value>, RepositoryError> {
        self.check_failure(table)?;
        let tables = self.tables.lock().unwrap();
        let stored = tables.get(table).ok_or_else(|| missing_table(table))?;
        let mut rows = stored.rows.clone();
        rows.sort_by_key(|row| row.get(order).map(text).unwrap_or_default());
        Ok(rows)
    }
}
