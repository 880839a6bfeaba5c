//! Lexical grammars of the FHIR R4 primitive types
//!
//! The patterns are the regexes published in the R4 datatypes
//! specification, anchored so a value must match in full. Offset bounds for
//! dateTime/instant (`-13:00..+14:00`) are encoded in the patterns
//! themselves.

use once_cell::sync::Lazy;
use regex::Regex;

macro_rules! pattern {
    ($name:ident, $pattern:literal) => {
        pub(crate) static $name: Lazy<Regex> = Lazy::new(|| {
            Regex::new(concat!("^(?:", $pattern, ")$")).expect("pattern must compile")
        });
    };
}

pattern!(CODE, r"[^\s]+(\s[^\s]+)*");
pattern!(ID, r"[A-Za-z0-9\-\.]{1,64}");
pattern!(URI, r"\S*");
pattern!(OID, r"urn:oid:[0-2](\.(0|[1-9][0-9]*))+");
pattern!(
    UUID,
    r"urn:uuid:[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}"
);
pattern!(BASE64_BINARY, r"(\s*([0-9a-zA-Z\+/=]){4}\s*)+");
pattern!(
    DATE,
    r"([0-9]([0-9]([0-9][1-9]|[1-9]0)|[1-9]00)|[1-9]000)(-(0[1-9]|1[0-2])(-(0[0-9]|[1-2][0-9]|3[0-1]))?)?"
);
// Offsets run from -13:59 to +14:00; only the positive side reaches 14.
pattern!(
    DATE_TIME,
    r"([0-9]([0-9]([0-9][1-9]|[1-9]0)|[1-9]00)|[1-9]000)(-(0[1-9]|1[0-2])(-(0[0-9]|[1-2][0-9]|3[0-1])(T([01][0-9]|2[0-3]):[0-5][0-9]:([0-5][0-9]|60)(\.[0-9]+)?(Z|\+((0[0-9]|1[0-3]):[0-5][0-9]|14:00)|-(0[0-9]|1[0-3]):[0-5][0-9]))?)?)?"
);
pattern!(
    INSTANT,
    r"([0-9]([0-9]([0-9][1-9]|[1-9]0)|[1-9]00)|[1-9]000)-(0[1-9]|1[0-2])-(0[0-9]|[1-2][0-9]|3[0-1])T([01][0-9]|2[0-3]):[0-5][0-9]:([0-5][0-9]|60)(\.[0-9]+)?(Z|\+((0[0-9]|1[0-3]):[0-5][0-9]|14:00)|-(0[0-9]|1[0-3]):[0-5][0-9])"
);
pattern!(TIME, r"([01][0-9]|2[0-3]):[0-5][0-9]:([0-5][0-9]|60)(\.[0-9]+)?");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_partial_precision() {
        assert!(DATE.is_match("2021"));
        assert!(DATE.is_match("2021-11"));
        assert!(DATE.is_match("2021-11-19"));
        assert!(!DATE.is_match("2021-13"));
        assert!(!DATE.is_match("21-11-19"));
        assert!(!DATE.is_match("2021-11-32"));
    }

    #[test]
    fn test_date_time_requires_offset_with_time() {
        assert!(DATE_TIME.is_match("2021-11-19T14:30:00Z"));
        assert!(DATE_TIME.is_match("2021-11-19T14:30:00+02:00"));
        assert!(DATE_TIME.is_match("2021-11-19T14:30:00.123-05:00"));
        assert!(DATE_TIME.is_match("2021"));
        assert!(!DATE_TIME.is_match("2021-11-19T14:30:00"));
    }

    #[test]
    fn test_date_time_offset_bounds() {
        assert!(DATE_TIME.is_match("2021-11-19T14:30:00+14:00"));
        assert!(DATE_TIME.is_match("2021-11-19T14:30:00-13:59"));
        assert!(!DATE_TIME.is_match("2021-11-19T14:30:00+14:30"));
        assert!(!DATE_TIME.is_match("2021-11-19T14:30:00-14:00"));
        assert!(!DATE_TIME.is_match("2021-11-19T14:30:00-15:00"));
    }

    #[test]
    fn test_instant_requires_full_precision() {
        assert!(INSTANT.is_match("2021-11-19T14:30:00Z"));
        assert!(!INSTANT.is_match("2021-11-19"));
        assert!(!INSTANT.is_match("2021-11-19T14:30:00"));
    }

    #[test]
    fn test_time_has_no_offset() {
        assert!(TIME.is_match("14:30:00"));
        assert!(TIME.is_match("14:30:00.5"));
        assert!(!TIME.is_match("14:30"));
        assert!(!TIME.is_match("14:30:00Z"));
        assert!(!TIME.is_match("24:00:00"));
    }

    #[test]
    fn test_code_forbids_leading_trailing_whitespace() {
        assert!(CODE.is_match("final"));
        assert!(CODE.is_match("not yet started"));
        assert!(!CODE.is_match(" final"));
        assert!(!CODE.is_match("final "));
        assert!(!CODE.is_match("two  spaces"));
        assert!(!CODE.is_match(""));
    }

    #[test]
    fn test_id_charset_and_length() {
        assert!(ID.is_match("patient-01.v2"));
        assert!(!ID.is_match("under_score"));
        assert!(!ID.is_match(&"a".repeat(65)));
    }

    #[test]
    fn test_oid_and_uuid_urn_forms() {
        assert!(OID.is_match("urn:oid:1.2.840.10065.1.12.1.1"));
        assert!(!OID.is_match("1.2.840.10065.1.12.1.1"));
        assert!(!OID.is_match("urn:oid:3.2"));

        assert!(UUID.is_match("urn:uuid:53fefa32-fcbb-4ff8-8a92-55ee120877b7"));
        assert!(!UUID.is_match("53fefa32-fcbb-4ff8-8a92-55ee120877b7"));
        assert!(!UUID.is_match("urn:uuid:53FEFA32-FCBB-4FF8-8A92-55EE120877B7"));
    }

    #[test]
    fn test_base64() {
        assert!(BASE64_BINARY.is_match("SGVsbG8="));
        assert!(BASE64_BINARY.is_match("AAECAwQF"));
        assert!(!BASE64_BINARY.is_match("SGVsbG8"));
    }
}
