use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_code")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub product_name: String,
    #[sea_orm(unique)]
    pub code: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Four blocks of four uppercase alphanumerics, e.g. `ABCD-1234-EFGH-5678`.
pub const CODE_PATTERN: &str = r"^[A-Z0-9]{4}(-[A-Z0-9]{4}){3}$";

static CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(CODE_PATTERN).expect("product code pattern compiles"));

/// A product code that passed validation and is ready to be inserted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewProductCode {
    product_name: String,
    code: String,
}

impl NewProductCode {
    /// Validate the name first, then the code. The code is uppercased but not trimmed;
    /// the name is stored as given.
    pub fn parse(product_name: &str, code: &str) -> Result<Self, ModelError> {
        validate_product_name(product_name)?;
        let code = validate_code(code)?;
        Ok(Self { product_name: product_name.to_string(), code })
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

/// ASCII-only uppercase fold. Characters whose full uppercase mapping is longer
/// (`ß` -> `SS`, `ﬀ` -> `FF`) are left alone so they fail the pattern.
pub fn normalize_code(raw: &str) -> String {
    raw.to_ascii_uppercase()
}

pub fn validate_code(raw: &str) -> Result<String, ModelError> {
    let code = normalize_code(raw);
    if !CODE_RE.is_match(&code) {
        return Err(ModelError::Validation(
            "code must be 16 characters in format XXXX-XXXX-XXXX-XXXX (A-Z, 0-9)".into(),
        ));
    }
    Ok(code)
}

pub fn validate_product_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("product_name is required".into()));
    }
    Ok(())
}

/// All rows, ascending by id.
pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find().order_by_asc(Column::Id).all(db).await?)
}

pub async fn insert<C: ConnectionTrait>(db: &C, new: NewProductCode) -> Result<Model, ModelError> {
    let am = ActiveModel {
        product_name: Set(new.product_name),
        code: Set(new.code),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

/// Returns the number of rows removed (0 or 1).
pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<u64, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_sqlite_memory;

    #[test]
    fn uppercases_before_matching() {
        assert_eq!(validate_code("abcd-1234-efgh-5678").unwrap(), "ABCD-1234-EFGH-5678");
        assert_eq!(validate_code("ZZZZ-9999-YYYY-8888").unwrap(), "ZZZZ-9999-YYYY-8888");
    }

    #[test]
    fn fold_never_changes_length() {
        for raw in ["ßab-1234", "ﬀab-1234", "éabc"] {
            let folded = normalize_code(raw);
            assert_eq!(folded.chars().count(), raw.chars().count(), "{raw:?} -> {folded:?}");
        }
        assert_eq!(normalize_code("ßab"), "ßAB");
    }

    #[test]
    fn rejects_malformed_codes() {
        for bad in [
            "INVALID-CODE",
            "",
            "ABCD1234EFGH5678",
            "ABCD-1234-EFGH-567",
            "ABCD-1234-EFGH-56789",
            "ABCD-1234-EFGH-5678-",
            " ABCD-1234-EFGH-5678",
            "ABCD-1234-EFGH-5678 ",
            "ABCD_1234_EFGH_5678",
            "ABÇD-1234-EFGH-5678",
            "ABCD-1234-EF*H-5678",
            "ßAB-1234-EFGH-5678",
            "ﬀAB-1234-EFGH-5678",
            "abcd-1234-efgh-567ß",
        ] {
            assert!(matches!(validate_code(bad), Err(ModelError::Validation(_))), "accepted {bad:?}");
        }
    }

    #[test]
    fn name_must_have_visible_characters() {
        assert!(validate_product_name("Widget").is_ok());
        assert!(validate_product_name("  Widget  ").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(" \t\n").is_err());
    }

    #[test]
    fn parse_keeps_name_verbatim() {
        let new = NewProductCode::parse("  Pro Suite ", "wxyz-0000-abcd-1111").unwrap();
        assert_eq!(new.product_name(), "  Pro Suite ");
        assert_eq!(new.code(), "WXYZ-0000-ABCD-1111");
    }

    #[test]
    fn parse_checks_name_before_code() {
        let err = NewProductCode::parse("", "bad").unwrap_err();
        assert_eq!(err.to_string(), "validation error: product_name is required");
    }

    #[tokio::test]
    async fn insert_list_delete_roundtrip() -> anyhow::Result<()> {
        let db = connect_sqlite_memory().await?;
        assert!(list(&db).await?.is_empty());

        let a = insert(&db, NewProductCode::parse("A", "aaaa-1111-aaaa-1111")?).await?;
        let b = insert(&db, NewProductCode::parse("B", "BBBB-2222-BBBB-2222")?).await?;
        assert!(a.id < b.id);
        assert_eq!(a.code, "AAAA-1111-AAAA-1111");

        let rows = list(&db).await?;
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![a.id, b.id]);

        assert_eq!(delete(&db, a.id).await?, 1);
        assert_eq!(delete(&db, a.id).await?, 0);
        let rows = list(&db).await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, b.id);
        Ok(())
    }

    #[tokio::test]
    async fn long_names_are_stored_whole() -> anyhow::Result<()> {
        let db = connect_sqlite_memory().await?;
        let name = "n".repeat(300);
        let row = insert(&db, NewProductCode::parse(&name, "long-0000-name-0000")?).await?;
        assert_eq!(row.product_name.len(), 300);
        assert_eq!(list(&db).await?[0].product_name, name);
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_code_is_a_conflict() -> anyhow::Result<()> {
        let db = connect_sqlite_memory().await?;
        insert(&db, NewProductCode::parse("first", "dupe-0000-dupe-0000")?).await?;
        let err = insert(&db, NewProductCode::parse("second", "DUPE-0000-DUPE-0000")?)
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::Conflict(_)), "got {err:?}");

        let rows = list(&db).await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].product_name, "first");
        Ok(())
    }
}
