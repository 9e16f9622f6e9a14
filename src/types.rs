//! Store type parsing and CLR type resolution.
//!
//! Store types arrive as SQL Server type text (`int`, `nvarchar(50)`,
//! `[decimal](18, 2)`). They are tokenized with the MsSql dialect so that
//! bracket quoting, `max` and whitespace are handled the same way the
//! server spells them.

use crate::error::{Result, ScaffoldError};
use crate::model::NativeType;
use sqlparser::dialect::MsSqlDialect;
use sqlparser::tokenizer::{Token, Tokenizer};
use std::fmt;

/// Length facet value used for `(max)` types.
pub const MAX_LENGTH: i32 = -1;

/// A store type split into its base name and parenthesized facets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreType {
    /// Lowercased base type name, dotted if schema-qualified
    pub name: String,
    /// First facet: length or precision, `MAX_LENGTH` for `max`
    pub first: Option<i32>,
    /// Second facet: scale
    pub second: Option<i32>,
}

impl StoreType {
    /// Tokenize a store type definition.
    pub fn parse(store_type: &str) -> Result<Self> {
        let malformed = |reason: &str| ScaffoldError::StoreType {
            store_type: store_type.to_string(),
            reason: reason.to_string(),
        };

        let dialect = MsSqlDialect {};
        let tokens = Tokenizer::new(&dialect, store_type)
            .tokenize()
            .map_err(|e| malformed(&e.to_string()))?;
        let mut tokens = tokens
            .into_iter()
            .filter(|token| !matches!(token, Token::Whitespace(_)))
            .peekable();

        let mut parts = Vec::new();
        loop {
            match tokens.next() {
                Some(Token::Word(word)) => parts.push(word.value.to_lowercase()),
                _ => return Err(malformed("expected a type name")),
            }
            if !matches!(tokens.peek(), Some(Token::Period)) {
                break;
            }
            tokens.next();
        }

        let mut facets = Vec::new();
        if matches!(tokens.peek(), Some(Token::LParen)) {
            tokens.next();
            loop {
                let facet = match tokens.next() {
                    Some(Token::Number(n, _)) => n
                        .parse::<i32>()
                        .map_err(|_| malformed("facet is not an integer"))?,
                    Some(Token::Word(word)) if word.value.eq_ignore_ascii_case("max") => {
                        MAX_LENGTH
                    }
                    _ => return Err(malformed("expected a facet value")),
                };
                facets.push(facet);

                match tokens.next() {
                    Some(Token::Comma) => continue,
                    Some(Token::RParen) => break,
                    _ => return Err(malformed("unterminated facet list")),
                }
            }
        }

        if tokens.next().is_some() {
            return Err(malformed("unexpected trailing tokens"));
        }
        if facets.len() > 2 {
            return Err(malformed("too many facets"));
        }

        Ok(Self {
            name: parts.join("."),
            first: facets.first().copied(),
            second: facets.get(1).copied(),
        })
    }
}

/// A target-language type as seen by the generators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeReference {
    /// C# type name, e.g. `int`, `DateTime`, `byte[]`
    pub name: String,
    /// Whether the type is a value type that needs `?` to be nullable
    pub value_type: bool,
    pub nullable: bool,
    /// Member of `System.Data.SqlDbType` used for parameter objects
    pub db_type: String,
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable && self.value_type {
            write!(f, "{}?", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// Maps native store types to target-language type references.
///
/// Implementations must be deterministic and cheap; the generators call
/// them once per parameter and once per result column.
pub trait TypeResolver {
    fn resolve_clr_type(&self, native: &NativeType) -> Result<TypeReference>;

    fn render_type_reference(&self, reference: &TypeReference) -> String {
        reference.to_string()
    }
}

impl<T: TypeResolver + ?Sized> TypeResolver for &T {
    fn resolve_clr_type(&self, native: &NativeType) -> Result<TypeReference> {
        (**self).resolve_clr_type(native)
    }

    fn render_type_reference(&self, reference: &TypeReference) -> String {
        (**self).render_type_reference(reference)
    }
}

/// Default resolver for SQL Server store types.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlServerTypeMapper;

impl SqlServerTypeMapper {
    /// Look up the CLR type name, value-type flag and `SqlDbType` member.
    fn lookup(store_type: &str) -> Option<(&'static str, bool, &'static str)> {
        let mapping = match store_type {
            "bigint" => ("long", true, "BigInt"),
            "int" => ("int", true, "Int"),
            "smallint" => ("short", true, "SmallInt"),
            "tinyint" => ("byte", true, "TinyInt"),
            "bit" => ("bool", true, "Bit"),
            "decimal" | "numeric" => ("decimal", true, "Decimal"),
            "money" => ("decimal", true, "Money"),
            "smallmoney" => ("decimal", true, "SmallMoney"),
            "float" => ("double", true, "Float"),
            "real" => ("float", true, "Real"),
            "date" => ("DateTime", true, "Date"),
            "datetime" => ("DateTime", true, "DateTime"),
            "datetime2" => ("DateTime", true, "DateTime2"),
            "smalldatetime" => ("DateTime", true, "SmallDateTime"),
            "datetimeoffset" => ("DateTimeOffset", true, "DateTimeOffset"),
            "time" => ("TimeSpan", true, "Time"),
            "uniqueidentifier" => ("Guid", true, "UniqueIdentifier"),
            "char" => ("string", false, "Char"),
            "nchar" => ("string", false, "NChar"),
            "varchar" => ("string", false, "VarChar"),
            "nvarchar" | "sysname" => ("string", false, "NVarChar"),
            "text" => ("string", false, "Text"),
            "ntext" => ("string", false, "NText"),
            "xml" => ("string", false, "Xml"),
            "binary" => ("byte[]", false, "Binary"),
            "varbinary" => ("byte[]", false, "VarBinary"),
            "image" => ("byte[]", false, "Image"),
            "timestamp" | "rowversion" => ("byte[]", false, "Timestamp"),
            "sql_variant" => ("object", false, "Variant"),
            _ => return None,
        };
        Some(mapping)
    }
}

impl TypeResolver for SqlServerTypeMapper {
    fn resolve_clr_type(&self, native: &NativeType) -> Result<TypeReference> {
        let store_type = native.store_type.to_lowercase();
        let (name, value_type, db_type) = Self::lookup(&store_type)
            .ok_or_else(|| ScaffoldError::UnsupportedType(native.store_type.clone()))?;

        Ok(TypeReference {
            name: name.to_string(),
            value_type,
            nullable: native.nullable,
            db_type: db_type.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_type() {
        let parsed = StoreType::parse("INT").unwrap();
        assert_eq!(parsed.name, "int");
        assert_eq!(parsed.first, None);
        assert_eq!(parsed.second, None);
    }

    #[test]
    fn test_parse_length_and_max() {
        let parsed = StoreType::parse("nvarchar(50)").unwrap();
        assert_eq!(parsed.name, "nvarchar");
        assert_eq!(parsed.first, Some(50));

        let parsed = StoreType::parse("[varbinary](MAX)").unwrap();
        assert_eq!(parsed.name, "varbinary");
        assert_eq!(parsed.first, Some(MAX_LENGTH));
    }

    #[test]
    fn test_parse_precision_and_scale() {
        let parsed = StoreType::parse("DECIMAL( 18 , 2 )").unwrap();
        assert_eq!(parsed.name, "decimal");
        assert_eq!(parsed.first, Some(18));
        assert_eq!(parsed.second, Some(2));
    }

    #[test]
    fn test_parse_schema_qualified_type() {
        let parsed = StoreType::parse("dbo.OrderList").unwrap();
        assert_eq!(parsed.name, "dbo.orderlist");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "(10)", "decimal(18,", "varchar(10) extra", "decimal(1,2,3)"] {
            let err = StoreType::parse(bad).unwrap_err();
            assert!(
                matches!(err, ScaffoldError::StoreType { .. }),
                "{bad:?} should be malformed, got {err:?}"
            );
        }
    }

    #[test]
    fn test_resolve_value_and_reference_types() {
        let mapper = SqlServerTypeMapper;

        let int = mapper.resolve_clr_type(&NativeType::new("int")).unwrap();
        assert_eq!(mapper.render_type_reference(&int), "int");
        assert_eq!(int.db_type, "Int");

        let nullable = mapper
            .resolve_clr_type(&NativeType::new("datetime").nullable())
            .unwrap();
        assert_eq!(mapper.render_type_reference(&nullable), "DateTime?");

        let text = mapper
            .resolve_clr_type(&NativeType::new("nvarchar").nullable())
            .unwrap();
        assert_eq!(mapper.render_type_reference(&text), "string");
        assert_eq!(text.db_type, "NVarChar");
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let mapper = SqlServerTypeMapper;
        let reference = mapper
            .resolve_clr_type(&NativeType::new("UniqueIdentifier"))
            .unwrap();
        assert_eq!(reference.name, "Guid");
    }

    #[test]
    fn test_resolve_unknown_type_fails() {
        let err = SqlServerTypeMapper
            .resolve_clr_type(&NativeType::new("geography"))
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::UnsupportedType(ref t) if t == "geography"));
    }
}
