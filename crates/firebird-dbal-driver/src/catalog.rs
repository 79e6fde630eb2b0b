//! Catalog field-type decoding.
//!
//! The engine packs a column's type into a field-type code plus subtype,
//! scale, length, and precision fields. This module is the exact inverse of
//! the platform's type-declaration mapping: every decodable combination maps
//! to exactly one logical type, and combinations with no known mapping
//! surface a hard [`DriverError::CatalogDecode`] instead of a silent
//! default.

use firebird_dbal_core::{DefaultValue, DialectTier, FbType};

use crate::error::{DriverError, Result};

/// The engine's internal catalog field-type identifiers.
///
/// Mirrors the values stored in the fields catalog; the mapping to logical
/// types is total in this direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum FieldTypeCode {
    /// 16-bit integer.
    SmallInt = 7,
    /// 32-bit integer.
    Integer = 8,
    /// Single-precision float.
    Float = 10,
    /// Date.
    Date = 12,
    /// Time.
    Time = 13,
    /// Fixed-length character string.
    Char = 14,
    /// 64-bit integer.
    BigInt = 16,
    /// Boolean (3.0+ servers only).
    Boolean = 23,
    /// Double-precision float.
    Double = 27,
    /// Timestamp.
    Timestamp = 35,
    /// Variable-length character string.
    Varchar = 37,
    /// Binary or character large object, per subtype.
    Blob = 261,
}

impl FieldTypeCode {
    /// Looks up a catalog code.
    ///
    /// Returns `None` for codes outside the documented set; the caller
    /// surfaces those as decode inconsistencies with column context.
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            7 => Some(Self::SmallInt),
            8 => Some(Self::Integer),
            10 => Some(Self::Float),
            12 => Some(Self::Date),
            13 => Some(Self::Time),
            14 => Some(Self::Char),
            16 => Some(Self::BigInt),
            23 => Some(Self::Boolean),
            27 => Some(Self::Double),
            35 => Some(Self::Timestamp),
            37 => Some(Self::Varchar),
            261 => Some(Self::Blob),
            _ => None,
        }
    }

    /// Returns the raw catalog code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// The packed type metadata of one catalog column row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackedType {
    /// Raw field-type code.
    pub code: i32,
    /// Field subtype (fixed-point flavor for integers, text flavor for
    /// blobs).
    pub sub_type: i32,
    /// Catalog scale; fixed-point scales are stored negated.
    pub scale: i32,
    /// Declared precision, or 0 when the engine left it unset.
    pub precision: i32,
    /// Length in bytes.
    pub byte_length: i32,
    /// Length in characters, when the charset makes it differ from the
    /// byte length.
    pub char_length: Option<i32>,
}

fn decode_error(column: &str, detail: impl Into<String>) -> DriverError {
    DriverError::CatalogDecode {
        column: column.to_string(),
        detail: detail.into(),
    }
}

/// Normalizes an unset fixed-point precision to the storage class's natural
/// digit count.
///
/// This is the documented lossy field of the round-trip property: a column
/// created without an explicit precision introspects with the default.
const fn default_precision(code: FieldTypeCode) -> u8 {
    match code {
        FieldTypeCode::SmallInt => 4,
        FieldTypeCode::BigInt => 18,
        _ => 9,
    }
}

fn decode_fixed_point(
    column: &str,
    code: FieldTypeCode,
    packed: &PackedType,
) -> Result<FbType> {
    let scale = u8::try_from(-packed.scale)
        .map_err(|_| decode_error(column, format!("invalid scale {}", packed.scale)))?;
    let precision = if packed.precision > 0 {
        u8::try_from(packed.precision)
            .map_err(|_| decode_error(column, format!("invalid precision {}", packed.precision)))?
    } else {
        default_precision(code)
    };
    match packed.sub_type {
        2 => Ok(FbType::Decimal { precision, scale }),
        // Subtype 0 with a nonzero scale is an implicitly numeric column.
        0 | 1 => Ok(FbType::Numeric { precision, scale }),
        other => Err(decode_error(
            column,
            format!("unknown integer subtype {other}"),
        )),
    }
}

fn string_length(column: &str, packed: &PackedType) -> Result<u32> {
    // Prefer the character length: with a multi-byte charset the byte
    // length overstates the declared width.
    let len = packed.char_length.filter(|l| *l > 0).unwrap_or(packed.byte_length);
    u32::try_from(len).map_err(|_| decode_error(column, format!("invalid length {len}")))
}

/// Decodes one packed catalog type into a logical type.
///
/// `code + sub_type + scale` jointly determine the result: an integer code
/// with a nonzero scale or fixed-point subtype is NUMERIC/DECIMAL, not an
/// integer. Every combination outside the documented set fails.
pub fn decode_field_type(
    tier: DialectTier,
    column: &str,
    packed: &PackedType,
) -> Result<FbType> {
    let code = FieldTypeCode::from_code(packed.code)
        .ok_or_else(|| decode_error(column, format!("unknown field-type code {}", packed.code)))?;

    if packed.scale > 0 {
        return Err(decode_error(
            column,
            format!("positive scale {} is not representable", packed.scale),
        ));
    }

    match code {
        FieldTypeCode::SmallInt | FieldTypeCode::Integer | FieldTypeCode::BigInt => {
            if packed.scale != 0 || packed.sub_type != 0 {
                decode_fixed_point(column, code, packed)
            } else {
                Ok(match code {
                    FieldTypeCode::SmallInt => FbType::SmallInt,
                    FieldTypeCode::Integer => FbType::Integer,
                    _ => FbType::BigInt,
                })
            }
        }
        FieldTypeCode::Float => Ok(FbType::Float),
        FieldTypeCode::Double => Ok(FbType::Double),
        FieldTypeCode::Date => Ok(FbType::Date),
        FieldTypeCode::Time => Ok(FbType::Time),
        FieldTypeCode::Timestamp => Ok(FbType::Timestamp),
        FieldTypeCode::Char => Ok(FbType::Char(string_length(column, packed)?)),
        FieldTypeCode::Varchar => Ok(FbType::Varchar(string_length(column, packed)?)),
        FieldTypeCode::Blob => match packed.sub_type {
            0 => Ok(FbType::Blob),
            1 => Ok(FbType::Text),
            other => Err(decode_error(
                column,
                format!("unknown blob subtype {other}"),
            )),
        },
        FieldTypeCode::Boolean => {
            if tier.capabilities().native_boolean {
                Ok(FbType::Boolean)
            } else {
                Err(decode_error(
                    column,
                    format!("BOOLEAN code on the {} tier", tier.platform_name()),
                ))
            }
        }
    }
}

/// Parses the human-readable default-source catalog field.
///
/// The source is the textual `DEFAULT <literal>` fragment, not the packed
/// binary default field. Parsing strips the keyword and unwraps quoted
/// literals; anything that is not a recognizable literal is preserved as a
/// raw expression.
#[must_use]
pub fn parse_default_source(source: Option<&str>) -> DefaultValue {
    let Some(source) = source.map(str::trim).filter(|s| !s.is_empty()) else {
        return DefaultValue::None;
    };

    let rest = source
        .get(..7)
        .filter(|head| head.eq_ignore_ascii_case("DEFAULT"))
        .map_or(source, |_| source[7..].trim_start());

    if rest.eq_ignore_ascii_case("NULL") {
        return DefaultValue::Null;
    }
    if rest.eq_ignore_ascii_case("TRUE") {
        return DefaultValue::Bool(true);
    }
    if rest.eq_ignore_ascii_case("FALSE") {
        return DefaultValue::Bool(false);
    }
    if rest.len() >= 2 && rest.starts_with('\'') && rest.ends_with('\'') {
        let body = &rest[1..rest.len() - 1];
        return DefaultValue::Str(body.replace("''", "'"));
    }
    if let Ok(i) = rest.parse::<i64>() {
        return DefaultValue::Int(i);
    }
    if let Ok(f) = rest.parse::<f64>() {
        return DefaultValue::Float(f);
    }
    DefaultValue::Expression(rest.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packed(code: i32) -> PackedType {
        PackedType {
            code,
            ..PackedType::default()
        }
    }

    #[test]
    fn test_plain_types_decode() {
        let cases = [
            (7, FbType::SmallInt),
            (8, FbType::Integer),
            (16, FbType::BigInt),
            (10, FbType::Float),
            (27, FbType::Double),
            (12, FbType::Date),
            (13, FbType::Time),
            (35, FbType::Timestamp),
        ];
        for (code, expected) in cases {
            let got = decode_field_type(DialectTier::V3, "c", &packed(code)).unwrap();
            assert_eq!(got, expected, "code {code}");
        }
    }

    #[test]
    fn test_integer_code_with_scale_is_fixed_point_not_integer() {
        let numeric = PackedType {
            code: 8,
            sub_type: 1,
            scale: -2,
            precision: 10,
            ..PackedType::default()
        };
        assert_eq!(
            decode_field_type(DialectTier::V3, "c", &numeric).unwrap(),
            FbType::Numeric {
                precision: 10,
                scale: 2
            }
        );

        let decimal = PackedType {
            code: 16,
            sub_type: 2,
            scale: -4,
            precision: 18,
            ..PackedType::default()
        };
        assert_eq!(
            decode_field_type(DialectTier::V3, "c", &decimal).unwrap(),
            FbType::Decimal {
                precision: 18,
                scale: 4
            }
        );
    }

    #[test]
    fn test_unset_precision_normalizes_to_storage_default() {
        for (code, expected) in [(7, 4), (8, 9), (16, 18)] {
            let p = PackedType {
                code,
                sub_type: 1,
                scale: -1,
                precision: 0,
                ..PackedType::default()
            };
            let got = decode_field_type(DialectTier::V3, "c", &p).unwrap();
            assert_eq!(
                got,
                FbType::Numeric {
                    precision: expected,
                    scale: 1
                },
                "code {code}"
            );
        }
    }

    #[test]
    fn test_string_lengths_prefer_character_length() {
        let utf8_char = PackedType {
            code: 14,
            byte_length: 40,
            char_length: Some(10),
            ..PackedType::default()
        };
        assert_eq!(
            decode_field_type(DialectTier::V3, "c", &utf8_char).unwrap(),
            FbType::Char(10)
        );

        let single_byte = PackedType {
            code: 37,
            byte_length: 255,
            char_length: None,
            ..PackedType::default()
        };
        assert_eq!(
            decode_field_type(DialectTier::V3, "c", &single_byte).unwrap(),
            FbType::Varchar(255)
        );
    }

    #[test]
    fn test_blob_subtypes() {
        let blob = PackedType {
            code: 261,
            sub_type: 0,
            ..PackedType::default()
        };
        assert_eq!(
            decode_field_type(DialectTier::V3, "c", &blob).unwrap(),
            FbType::Blob
        );

        let text = PackedType {
            code: 261,
            sub_type: 1,
            ..PackedType::default()
        };
        assert_eq!(
            decode_field_type(DialectTier::V3, "c", &text).unwrap(),
            FbType::Text
        );

        let unknown = PackedType {
            code: 261,
            sub_type: 9,
            ..PackedType::default()
        };
        assert!(decode_field_type(DialectTier::V3, "c", &unknown).is_err());
    }

    #[test]
    fn test_boolean_requires_a_supporting_tier() {
        assert_eq!(
            decode_field_type(DialectTier::V3, "c", &packed(23)).unwrap(),
            FbType::Boolean
        );

        let err = decode_field_type(DialectTier::Base, "flag", &packed(23)).unwrap_err();
        assert!(matches!(
            err,
            DriverError::CatalogDecode { ref column, .. } if column == "flag"
        ));
    }

    #[test]
    fn test_unknown_code_is_a_hard_error() {
        let err = decode_field_type(DialectTier::V5, "c", &packed(99)).unwrap_err();
        assert!(matches!(err, DriverError::CatalogDecode { .. }));
    }

    #[test]
    fn test_unknown_integer_subtype_is_a_hard_error() {
        let p = PackedType {
            code: 8,
            sub_type: 3,
            scale: -2,
            ..PackedType::default()
        };
        assert!(decode_field_type(DialectTier::V3, "c", &p).is_err());
    }

    #[test]
    fn test_parse_default_source_literals() {
        assert_eq!(parse_default_source(None), DefaultValue::None);
        assert_eq!(parse_default_source(Some("")), DefaultValue::None);
        assert_eq!(parse_default_source(Some("DEFAULT NULL")), DefaultValue::Null);
        assert_eq!(
            parse_default_source(Some("DEFAULT 42")),
            DefaultValue::Int(42)
        );
        assert_eq!(
            parse_default_source(Some("DEFAULT 1.5")),
            DefaultValue::Float(1.5)
        );
        assert_eq!(
            parse_default_source(Some("DEFAULT 'abc'")),
            DefaultValue::Str("abc".to_string())
        );
        assert_eq!(
            parse_default_source(Some("DEFAULT 'o''brien'")),
            DefaultValue::Str("o'brien".to_string())
        );
        assert_eq!(
            parse_default_source(Some("default true")),
            DefaultValue::Bool(true)
        );
        assert_eq!(
            parse_default_source(Some("DEFAULT CURRENT_TIMESTAMP")),
            DefaultValue::Expression("CURRENT_TIMESTAMP".to_string())
        );
    }

    #[test]
    fn test_field_type_code_round_trip() {
        for code in [7, 8, 10, 12, 13, 14, 16, 23, 27, 35, 37, 261] {
            let decoded = FieldTypeCode::from_code(code).unwrap();
            assert_eq!(decoded.code(), code);
        }
        assert_eq!(FieldTypeCode::from_code(999), None);
    }
}
