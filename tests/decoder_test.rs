//! Integration tests for CSV decoding

use email_archive::decoder::decode;
use email_archive::error::DecodeError;
use email_archive::models::{NO_SUBJECT, UNKNOWN_SENDER};

const FULL_HEADER: &str = "fecha,de,para,asunto,es_respuesta,cuerpo,cc,bcc,message_id,in_reply_to,references,adjuntos,tipo_mail,de_rol,para_rol,tag_tema";

#[test]
fn test_decode_full_row() {
    let csv = format!(
        "{FULL_HEADER}\n2024-01-15 09:30:00,ana@example.com,beto@example.com,\"Re: \"\"Q3\"\" budget\",true,\"line1\nline2\",cc@example.com,,<m1@x>,<m0@x>,<m0@x>,report.pdf,interno,\"legal, finance\",hr,\"budget, q3\"\n"
    );
    let emails = decode(&csv).expect("decode failed");
    assert_eq!(emails.len(), 1);

    let email = &emails[0];
    assert_eq!(email.id, 0);
    assert_eq!(email.fecha, "2024-01-15 09:30:00");
    assert_eq!(email.de, "ana@example.com");
    assert_eq!(email.para, "beto@example.com");
    assert_eq!(email.asunto, r#"Re: "Q3" budget"#);
    assert_eq!(email.es_respuesta, "true");
    assert!(email.is_reply());
    assert_eq!(email.cuerpo, "line1\nline2");
    assert_eq!(email.cc, "cc@example.com");
    assert_eq!(email.bcc, "");
    assert_eq!(email.message_id, "<m1@x>");
    assert_eq!(email.in_reply_to, "<m0@x>");
    assert_eq!(email.references, "<m0@x>");
    assert_eq!(email.adjuntos, "report.pdf");
    assert_eq!(email.tipo_mail, "interno");
    assert_eq!(email.de_rol, "legal, finance");
    assert_eq!(email.para_rol, "hr");
    assert_eq!(email.tag_tema, "budget, q3");
    assert!(!email.read);
}

#[test]
fn test_ids_follow_row_order() {
    let emails = decode("de\nana\nbeto\ncarla\n").unwrap();
    let ids: Vec<usize> = emails.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![0, 1, 2]);
    assert_eq!(emails[2].de, "carla");
}

#[test]
fn test_cells_are_trimmed_not_folded() {
    let emails = decode("de,asunto,cuerpo\n  Ana María  ,  Hola   Mundo ,\"  body\n  text  \"\n").unwrap();
    assert_eq!(emails[0].de, "Ana María");
    assert_eq!(emails[0].asunto, "Hola   Mundo");
    assert_eq!(emails[0].cuerpo, "body\n  text");
}

#[test]
fn test_defaults_for_blank_sender_and_subject() {
    let emails = decode("de,asunto,para\n  ,   ,x@example.com\n").unwrap();
    assert_eq!(emails[0].de, UNKNOWN_SENDER);
    assert_eq!(emails[0].asunto, NO_SUBJECT);
    assert_eq!(emails[0].para, "x@example.com");
}

#[test]
fn test_missing_columns_decode_empty_and_defaults_apply() {
    let emails = decode("tag_tema\nlegal\n").unwrap();
    let email = &emails[0];
    assert_eq!(email.tag_tema, "legal");
    assert_eq!(email.fecha, "");
    assert_eq!(email.cuerpo, "");
    assert_eq!(email.de, UNKNOWN_SENDER);
    assert_eq!(email.asunto, NO_SUBJECT);
}

#[test]
fn test_reordered_and_unknown_columns() {
    let emails = decode("extra,asunto,de,Fecha\nignored,Hola,ana,2024-01-01\n").unwrap();
    assert_eq!(emails[0].asunto, "Hola");
    assert_eq!(emails[0].de, "ana");
    // header matching is case-sensitive
    assert_eq!(emails[0].fecha, "");
}

#[test]
fn test_ragged_rows_are_tolerated() {
    let emails = decode("de,asunto,tag_tema\nana\nbeto,hola,legal,extra\n").unwrap();
    assert_eq!(emails.len(), 2);
    assert_eq!(emails[0].de, "ana");
    assert_eq!(emails[0].tag_tema, "");
    assert_eq!(emails[1].tag_tema, "legal");
}

#[test]
fn test_es_respuesta_is_not_coerced() {
    let emails = decode("es_respuesta\nTRUE\n1\ntrue\n").unwrap();
    assert_eq!(emails[0].es_respuesta, "TRUE");
    assert!(!emails[0].is_reply());
    assert!(!emails[1].is_reply());
    assert!(emails[2].is_reply());
}

#[test]
fn test_header_only_is_empty() {
    assert_eq!(decode(&format!("{FULL_HEADER}\n")), Err(DecodeError::Empty));
}

#[test]
fn test_blank_input_is_empty() {
    assert_eq!(decode(""), Err(DecodeError::Empty));
    assert_eq!(decode("\n\n"), Err(DecodeError::Empty));
}

#[test]
fn test_unterminated_quote_is_malformed() {
    let err = decode("de,asunto\nana,\"never closed\nbeto,hola\n").unwrap_err();
    match err {
        DecodeError::MalformedCsv(detail) => assert!(detail.contains("line 2"), "{detail}"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_crlf_line_endings() {
    let emails = decode("de,asunto\r\nana,hola\r\nbeto,adios\r\n").unwrap();
    assert_eq!(emails.len(), 2);
    assert_eq!(emails[1].asunto, "adios");
}
