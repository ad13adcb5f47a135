//! Tests for lenient CSV parsing

use crate::app::services::reference_registry::ReferenceRegistry;
use crate::app::services::reference_registry::parser::*;

#[test]
fn test_parse_csv_uses_first_line_as_header() {
    let rows = parse_csv("ident,name\nKJFK,John F Kennedy\nKLAX,Los Angeles\n");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["ident"], "KJFK");
    assert_eq!(rows[0]["name"], "John F Kennedy");
    assert_eq!(rows[1]["ident"], "KLAX");
}

#[test]
fn test_parse_csv_keeps_quoted_commas() {
    let rows = parse_csv("ident,municipality\nKEWR,\"Newark, NJ\"\n");
    assert_eq!(rows[0]["municipality"], "Newark, NJ");
}

#[test]
fn test_parse_csv_decodes_doubled_quotes() {
    let rows = parse_csv("ident,note\nX,\"She said \"\"hi\"\"\"\n");
    assert_eq!(rows[0]["note"], "She said \"hi\"");
}

#[test]
fn test_parse_csv_accepts_crlf_and_skips_blank_lines() {
    let rows =
        parse_csv("\r\n  \r\nident,name\r\n\r\nKSFO,San Francisco\r\n   \r\nKSEA,Seattle\r\n");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["ident"], "KSFO");
    assert_eq!(rows[0]["name"], "San Francisco");
    assert_eq!(rows[1]["name"], "Seattle");
}

#[test]
fn test_parse_csv_keeps_line_breaks_inside_quotes() {
    let rows = parse_csv("ident,name\nX,\"a\nb\"\nY,c\n");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["ident"], "X");
    assert_eq!(rows[0]["name"], "a\nb");
    assert_eq!(rows[1]["ident"], "Y");
    assert_eq!(rows[1]["name"], "c");
}

#[test]
fn test_parse_csv_treats_lone_carriage_return_as_content() {
    let rows = parse_csv("ident,name\nX,a\rb\nY,c\n");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["ident"], "X");
    assert_eq!(rows[0]["name"], "a\rb");
    assert_eq!(rows[1]["ident"], "Y");

    let registry = ReferenceRegistry::from_csv("ident,name\nX,a\rb\nY,c\n");
    assert_eq!(registry.len(), 2);
    assert!(!registry.contains("B"));
}

#[test]
fn test_parse_csv_strips_crlf_after_quoted_field() {
    let rows = parse_csv("ident,municipality\r\nKEWR,\"Newark, NJ\"\r\nKJFK,\"New York\"\r\n");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["municipality"], "Newark, NJ");
    assert_eq!(rows[1]["municipality"], "New York");
}

#[test]
fn test_parse_csv_pads_missing_trailing_fields() {
    let rows = parse_csv("ident,name,iata_code\nKBOS\n");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["ident"], "KBOS");
    assert_eq!(rows[0]["name"], "");
    assert_eq!(rows[0]["iata_code"], "");
}

#[test]
fn test_parse_csv_ignores_surplus_fields() {
    let rows = parse_csv("ident,name\nKORD,O'Hare,extra,more\n");

    assert_eq!(rows[0].len(), 2);
    assert_eq!(rows[0]["name"], "O'Hare");
}

#[test]
fn test_parse_csv_empty_input() {
    assert!(parse_csv("").is_empty());
    assert!(parse_csv("\n\n  \n").is_empty());
    assert!(parse_csv("ident,name\n").is_empty());
}

#[test]
fn test_parse_reference_record_uppercases_and_drops_empty_fields() {
    let rows = parse_csv("ident,name,iata_code,municipality,iso_country\nrjtt,Haneda,,Tokyo,JP\n");

    let record = parse_reference_record(&rows[0]).unwrap();
    assert_eq!(record.icao, "RJTT");
    assert_eq!(record.name.as_deref(), Some("Haneda"));
    assert_eq!(record.iata, None);
    assert_eq!(record.municipality.as_deref(), Some("Tokyo"));
    assert_eq!(record.iso_country.as_deref(), Some("JP"));
}

#[test]
fn test_parse_reference_record_requires_ident() {
    let rows = parse_csv("ident,name\n,Unnamed\n");
    assert!(parse_reference_record(&rows[0]).is_none());

    let rows = parse_csv("name\nNo ident column\n");
    assert!(parse_reference_record(&rows[0]).is_none());
}
