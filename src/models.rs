//! Data models for the email archive
//!
//! This module contains the record type decoded from a CSV export, the fixed
//! column set it is read from and written to, and the selector used to pick one
//! of its multi-value fields.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a record within one loaded collection (its source row index)
pub type EmailId = usize;

/// Sender value used when the `de` cell is blank
pub const UNKNOWN_SENDER: &str = "Unknown";

/// Subject value used when the `asunto` cell is blank
pub const NO_SUBJECT: &str = "(No Subject)";

/// Literal `es_respuesta` token that marks a reply
pub const REPLY_FLAG: &str = "true";

/// One decoded email entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    /// Zero-based source row index, unique within the collection
    pub id: EmailId,
    /// Free-form date string
    pub fecha: String,
    /// Sender display string
    pub de: String,
    /// Recipients
    pub para: String,
    /// Subject line
    pub asunto: String,
    /// Reply marker; only the literal `"true"` counts
    pub es_respuesta: String,
    /// Body text, may span several lines
    pub cuerpo: String,
    /// Carbon-copy recipients
    pub cc: String,
    /// Blind carbon-copy recipients
    pub bcc: String,
    /// Message-ID header
    pub message_id: String,
    /// In-Reply-To header
    pub in_reply_to: String,
    /// References header
    pub references: String,
    /// Attachment listing
    pub adjuntos: String,
    /// Mail type label
    pub tipo_mail: String,
    /// Comma-separated sender roles
    pub de_rol: String,
    /// Comma-separated recipient roles
    pub para_rol: String,
    /// Comma-separated topic tags
    pub tag_tema: String,
    /// Session-local read marker, never exported
    pub read: bool,
}

impl Email {
    /// Create a record with the given id, defaulted sender and subject and
    /// every other field empty
    #[must_use]
    pub fn new(id: EmailId) -> Self {
        Self {
            id,
            fecha: String::new(),
            de: UNKNOWN_SENDER.to_string(),
            para: String::new(),
            asunto: NO_SUBJECT.to_string(),
            es_respuesta: String::new(),
            cuerpo: String::new(),
            cc: String::new(),
            bcc: String::new(),
            message_id: String::new(),
            in_reply_to: String::new(),
            references: String::new(),
            adjuntos: String::new(),
            tipo_mail: String::new(),
            de_rol: String::new(),
            para_rol: String::new(),
            tag_tema: String::new(),
            read: false,
        }
    }

    /// Value of one data column
    #[must_use]
    pub fn field(&self, column: Column) -> &str {
        match column {
            Column::Fecha => &self.fecha,
            Column::De => &self.de,
            Column::Para => &self.para,
            Column::Asunto => &self.asunto,
            Column::EsRespuesta => &self.es_respuesta,
            Column::Cuerpo => &self.cuerpo,
            Column::Cc => &self.cc,
            Column::Bcc => &self.bcc,
            Column::MessageId => &self.message_id,
            Column::InReplyTo => &self.in_reply_to,
            Column::References => &self.references,
            Column::Adjuntos => &self.adjuntos,
            Column::TipoMail => &self.tipo_mail,
            Column::DeRol => &self.de_rol,
            Column::ParaRol => &self.para_rol,
            Column::TagTema => &self.tag_tema,
        }
    }

    /// Mutable access to one data column
    pub fn field_mut(&mut self, column: Column) -> &mut String {
        match column {
            Column::Fecha => &mut self.fecha,
            Column::De => &mut self.de,
            Column::Para => &mut self.para,
            Column::Asunto => &mut self.asunto,
            Column::EsRespuesta => &mut self.es_respuesta,
            Column::Cuerpo => &mut self.cuerpo,
            Column::Cc => &mut self.cc,
            Column::Bcc => &mut self.bcc,
            Column::MessageId => &mut self.message_id,
            Column::InReplyTo => &mut self.in_reply_to,
            Column::References => &mut self.references,
            Column::Adjuntos => &mut self.adjuntos,
            Column::TipoMail => &mut self.tipo_mail,
            Column::DeRol => &mut self.de_rol,
            Column::ParaRol => &mut self.para_rol,
            Column::TagTema => &mut self.tag_tema,
        }
    }

    /// True iff `es_respuesta` is exactly `"true"`
    #[must_use]
    pub fn is_reply(&self) -> bool {
        self.es_respuesta == REPLY_FLAG
    }

    /// True when the record carries no topic tags
    #[must_use]
    pub fn is_untagged(&self) -> bool {
        self.tag_tema.trim().is_empty()
    }

    /// Best-effort parse of `fecha` for display and sorting.
    ///
    /// Accepts RFC 2822 and RFC 3339 timestamps, plus `YYYY-MM-DD HH:MM:SS`,
    /// `YYYY-MM-DDTHH:MM:SS` and bare `YYYY-MM-DD` (read as UTC). Returns
    /// `None` for empty or unrecognised values; `fecha` itself is untouched.
    #[must_use]
    pub fn parsed_date(&self) -> Option<DateTime<FixedOffset>> {
        let raw = self.fecha.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(date) = DateTime::parse_from_rfc2822(raw) {
            return Some(date);
        }
        if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
            return Some(date);
        }

        let naive = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })?;

        Some(Utc.from_utc_datetime(&naive).fixed_offset())
    }
}

/// The sixteen data columns, in export order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    /// `fecha`
    Fecha,
    /// `de`
    De,
    /// `para`
    Para,
    /// `asunto`
    Asunto,
    /// `es_respuesta`
    EsRespuesta,
    /// `cuerpo`
    Cuerpo,
    /// `cc`
    Cc,
    /// `bcc`
    Bcc,
    /// `message_id`
    MessageId,
    /// `in_reply_to`
    InReplyTo,
    /// `references`
    References,
    /// `adjuntos`
    Adjuntos,
    /// `tipo_mail`
    TipoMail,
    /// `de_rol`
    DeRol,
    /// `para_rol`
    ParaRol,
    /// `tag_tema`
    TagTema,
}

impl Column {
    /// Every column in header order
    pub const ALL: [Self; 16] = [
        Self::Fecha,
        Self::De,
        Self::Para,
        Self::Asunto,
        Self::EsRespuesta,
        Self::Cuerpo,
        Self::Cc,
        Self::Bcc,
        Self::MessageId,
        Self::InReplyTo,
        Self::References,
        Self::Adjuntos,
        Self::TipoMail,
        Self::DeRol,
        Self::ParaRol,
        Self::TagTema,
    ];

    /// Header name as it appears in the CSV file
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fecha => "fecha",
            Self::De => "de",
            Self::Para => "para",
            Self::Asunto => "asunto",
            Self::EsRespuesta => "es_respuesta",
            Self::Cuerpo => "cuerpo",
            Self::Cc => "cc",
            Self::Bcc => "bcc",
            Self::MessageId => "message_id",
            Self::InReplyTo => "in_reply_to",
            Self::References => "references",
            Self::Adjuntos => "adjuntos",
            Self::TipoMail => "tipo_mail",
            Self::DeRol => "de_rol",
            Self::ParaRol => "para_rol",
            Self::TagTema => "tag_tema",
        }
    }

    /// Case-sensitive lookup by header name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|column| column.name() == name)
    }

    /// Free-text columns that are always quoted on export
    #[must_use]
    pub const fn is_free_text(self) -> bool {
        matches!(self, Self::Asunto | Self::Cuerpo)
    }
}

/// Selector for the comma-separated multi-value fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenField {
    /// Sender roles (`de_rol`)
    DeRol,
    /// Recipient roles (`para_rol`)
    ParaRol,
    /// Topic tags (`tag_tema`)
    TagTema,
}

impl TokenField {
    /// Raw joined value of this field on a record
    #[must_use]
    pub fn value(self, email: &Email) -> &str {
        email.field(self.column())
    }

    /// Column backing this field
    #[must_use]
    pub const fn column(self) -> Column {
        match self {
            Self::DeRol => Column::DeRol,
            Self::ParaRol => Column::ParaRol,
            Self::TagTema => Column::TagTema,
        }
    }
}
