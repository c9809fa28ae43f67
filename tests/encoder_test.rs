//! Integration tests for CSV encoding and the decode/encode round trip

use email_archive::decoder::decode;
use email_archive::encoder::{encode, encode_with, QuotePolicy};
use email_archive::models::{Column, Email};
use proptest::prelude::*;

const HEADER: &str = "fecha,de,para,asunto,es_respuesta,cuerpo,cc,bcc,message_id,in_reply_to,references,adjuntos,tipo_mail,de_rol,para_rol,tag_tema";

#[test]
fn test_empty_collection_is_header_only() {
    let out = encode(&Vec::<Email>::new());
    assert_eq!(out, format!("{HEADER}\n"));
}

#[test]
fn test_subject_and_body_are_quoted() {
    let mut email = Email::new(0);
    email.asunto = r#"Re: "Q3" budget"#.into();
    email.cuerpo = "line1\nline2".into();
    email.de = "ana@example.com".into();
    email.tag_tema = "budget".into();

    let out = encode([&email]);
    let body = out.strip_prefix(&format!("{HEADER}\n")).unwrap();
    assert_eq!(
        body,
        ",ana@example.com,,\"Re: \"\"Q3\"\" budget\",,\"line1\nline2\",,,,,,,,,,budget\n"
    );
}

#[test]
fn test_id_and_read_are_not_exported() {
    let mut email = Email::new(42);
    email.read = true;
    let out = encode([&email]);
    assert!(!out.contains("42"));
    assert!(!out.contains("true"));
    assert!(!out.lines().next().unwrap().contains("read"));
}

#[test]
fn test_collection_order_is_kept() {
    let mut first = Email::new(0);
    first.de = "first".into();
    let mut second = Email::new(1);
    second.de = "second".into();

    let out = encode([&second, &first]);
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines[1].contains("second"));
    assert!(lines[2].contains("first"));
}

#[test]
fn test_quote_all_policy() {
    let mut email = Email::new(0);
    email.tag_tema = "a, \"b\"".into();
    let out = encode_with([&email], QuotePolicy::All);
    assert!(out.starts_with("\"fecha\",\"de\""));
    assert!(out.contains("\"a, \"\"b\"\"\""));

    // with every field quoted, commas and quotes survive the round trip
    let decoded = decode(&out).unwrap();
    assert_eq!(decoded[0].tag_tema, "a, \"b\"");
}

#[test]
fn test_multi_value_fields_are_quoted_when_needed() {
    let mut email = Email::new(0);
    email.de_rol = "legal, finance".into();
    email.para_rol = "hr".into();
    let out = encode([&email]);
    let row = out.lines().nth(1).unwrap();
    assert!(row.ends_with(",\"legal, finance\",hr,"));
}

#[test]
fn test_free_text_policy_leaves_other_fields_raw() {
    let mut email = Email::new(0);
    email.tag_tema = "a, b".into();
    let out = encode_with([&email], QuotePolicy::FreeText);
    assert!(out.lines().nth(1).unwrap().ends_with(",a, b"));

    // the raw comma splits the field on the way back in
    let decoded = decode(&out).unwrap();
    assert_eq!(decoded[0].tag_tema, "a");
}

#[test]
fn test_round_trip_sample_file() {
    let csv = format!(
        "{HEADER}\n\
         Tue 1 Jul 2003,ana,beto,\"Hola, \"\"equipo\"\"\",true,\"Primera línea\n\nTercera\",,,<1@x>,,,,externo,legal,hr,\"budget, q3\"\n\
         ,,,,,,,,,,,,,,,\n"
    );
    let first = decode(&csv).unwrap();
    let second = decode(&encode(&first)).unwrap();
    assert_eq!(first, second);
}

fn plain_field() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9@._<> -]{0,12}".prop_map(|s| s.trim().to_string())
}

fn free_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,;\"\n\táéñ-]{0,40}".prop_map(|s| s.trim().to_string())
}

fn token_list() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{1,6}", 0..4).prop_map(|tokens| tokens.join(", "))
}

prop_compose! {
    fn decoded_email()(
        plain in prop::collection::vec(plain_field(), 10),
        de in "[a-zA-Z]{1,8}",
        asunto in free_text(),
        cuerpo in free_text(),
        de_rol in token_list(),
        para_rol in token_list(),
        tag_tema in token_list(),
    ) -> Email {
        let mut email = Email::new(0);
        email.fecha = plain[0].clone();
        email.de = de;
        email.para = plain[1].clone();
        email.asunto = if asunto.is_empty() { email.asunto } else { asunto };
        email.es_respuesta = plain[2].clone();
        email.cuerpo = cuerpo;
        email.cc = plain[3].clone();
        email.bcc = plain[4].clone();
        email.message_id = plain[5].clone();
        email.in_reply_to = plain[6].clone();
        email.references = plain[7].clone();
        email.adjuntos = plain[8].clone();
        email.tipo_mail = plain[9].clone();
        email.de_rol = de_rol;
        email.para_rol = para_rol;
        email.tag_tema = tag_tema;
        email
    }
}

proptest! {
    #[test]
    fn prop_decode_encode_round_trip(mut emails in prop::collection::vec(decoded_email(), 1..8)) {
        for (id, email) in emails.iter_mut().enumerate() {
            email.id = id;
        }

        let decoded = decode(&encode(&emails)).unwrap();
        prop_assert_eq!(decoded.len(), emails.len());
        for (before, after) in emails.iter().zip(&decoded) {
            for column in Column::ALL {
                prop_assert_eq!(before.field(column), after.field(column), "column {}", column.name());
            }
            prop_assert_eq!(before.id, after.id);
            prop_assert!(!after.read);
        }
    }
}
