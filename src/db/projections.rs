// src/db/projections.rs

//! Fragmentos SQL que montam as entidades relacionadas como JSONB.
//!
//! As chaves batem com os nomes serde dos models (`createdAt`/`updatedAt`),
//! então a coluna resultante decodifica direto em `sqlx::types::Json<T>`.
//! Nenhum fragmento expõe colunas de chave estrangeira.

/// `NULL` quando o LEFT JOIN não encontrou linha, senão o objeto.
pub(crate) fn nullable(alias: &str, object: &str) -> String {
    format!("CASE WHEN {alias}.id IS NULL THEN NULL ELSE {object} END")
}

pub(crate) fn department_json(alias: &str) -> String {
    format!(
        "jsonb_build_object('id', {a}.id, 'name', {a}.name, \
         'createdAt', {a}.created_at, 'updatedAt', {a}.updated_at)",
        a = alias
    )
}

pub(crate) fn city_json(alias: &str) -> String {
    format!(
        "jsonb_build_object('id', {a}.id, 'name', {a}.name, \
         'createdAt', {a}.created_at, 'updatedAt', {a}.updated_at)",
        a = alias
    )
}

pub(crate) fn insurer_json(alias: &str) -> String {
    format!(
        "jsonb_build_object('id', {a}.id, 'name', {a}.name, 'nit', {a}.nit, \
         'address', {a}.address, 'phone', {a}.phone, 'email', {a}.email, \
         'available', {a}.available, \
         'createdAt', {a}.created_at, 'updatedAt', {a}.updated_at)",
        a = alias
    )
}

/// Seguradora com departamento e cidade aninhados.
pub(crate) fn insurer_detail_json(insurer: &str, department: &str, city: &str) -> String {
    format!(
        "({} || jsonb_build_object('department', {}, 'city', {}))",
        insurer_json(insurer),
        nullable(department, &department_json(department)),
        nullable(city, &city_json(city)),
    )
}

pub(crate) fn insurance_type_json(alias: &str) -> String {
    format!(
        "jsonb_build_object('id', {a}.id, 'name', {a}.name, 'available', {a}.available, \
         'createdAt', {a}.created_at, 'updatedAt', {a}.updated_at)",
        a = alias
    )
}

/// Tipo de seguro com a seguradora (e a localização dela) aninhada.
pub(crate) fn insurance_type_detail_json(
    insurance_type: &str,
    insurer: &str,
    department: &str,
    city: &str,
) -> String {
    format!(
        "({} || jsonb_build_object('insurer', {}))",
        insurance_type_json(insurance_type),
        nullable(insurer, &insurer_detail_json(insurer, department, city)),
    )
}

pub(crate) fn insurance_json(alias: &str) -> String {
    format!(
        "jsonb_build_object('id', {a}.id, 'name', {a}.name, \
         'percentage_to_insure', {a}.percentage_to_insure, \
         'min_to_insure', {a}.min_to_insure, 'available', {a}.available, \
         'createdAt', {a}.created_at, 'updatedAt', {a}.updated_at)",
        a = alias
    )
}

/// Lista de colunas "planas" de uma tabela, prefixadas pelo alias.
pub(crate) fn columns(alias: &str, names: &[&str]) -> String {
    names
        .iter()
        .map(|name| format!("{alias}.{name}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nullable_wraps_on_the_join_alias() {
        assert_eq!(
            nullable("d", "X"),
            "CASE WHEN d.id IS NULL THEN NULL ELSE X END"
        );
    }

    #[test]
    fn objects_use_wire_names_and_skip_foreign_keys() {
        let sql = insurer_detail_json("i", "d", "c");
        assert!(sql.contains("'createdAt', i.created_at"));
        assert!(sql.contains("'department', CASE WHEN d.id IS NULL"));
        assert!(sql.contains("'city', CASE WHEN c.id IS NULL"));
        assert!(!sql.contains("department_id"));
        assert!(!sql.contains("city_id"));

        let sql = insurance_json("s");
        assert!(sql.contains("'percentage_to_insure', s.percentage_to_insure"));
        assert!(!sql.contains("insurance_type_id"));
    }

    #[test]
    fn columns_are_prefixed() {
        assert_eq!(columns("t", &["id", "name"]), "t.id, t.name");
    }
}
