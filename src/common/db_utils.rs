use sqlx::error::ErrorKind;

use crate::common::error::AppError;

// ---
// Tradução dos erros de escrita do Postgres
// ---
/// Converte violações de constraint em erros 400; o resto vira 500.
///
/// Depende dos nomes padrão do Postgres: `<tabela>_<coluna>_key` para UNIQUE e
/// `<tabela>_<coluna>_fkey` para chaves estrangeiras.
pub(crate) fn map_write_error(table: &str, entity: &str, e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        let constraint = db_err.constraint().unwrap_or_default();
        match db_err.kind() {
            ErrorKind::UniqueViolation => {
                let field = constraint_column(table, constraint, "_key").unwrap_or("value");
                return AppError::AlreadyExists(format!(
                    "{} with this {} already exists.",
                    entity, field
                ));
            }
            ErrorKind::ForeignKeyViolation => {
                let column = constraint_column(table, constraint, "_fkey").unwrap_or("record");
                let referenced = column.strip_suffix("_id").unwrap_or(column);
                return AppError::InvalidReference(referenced.to_string());
            }
            ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
                return AppError::InvalidPayload(
                    "The information received is invalid or necessary information is missing."
                        .to_string(),
                );
            }
            _ => {}
        }
    }
    e.into()
}

fn constraint_column<'c>(table: &str, constraint: &'c str, suffix: &str) -> Option<&'c str> {
    constraint
        .strip_prefix(table)?
        .strip_prefix('_')?
        .strip_suffix(suffix)
}
