use bytes::Bytes;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use url::Url;

/// Character encoding of a fetched page body, as detected by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Charset {
    Utf8,
    Windows1252,
    ShiftJis,
    Gbk,
    Big5,
    Other(String),
}

impl Charset {
    pub fn from_encoding(encoding: &'static encoding_rs::Encoding) -> Self {
        match encoding.name() {
            "UTF-8" => Self::Utf8,
            "windows-1252" => Self::Windows1252,
            "Shift_JIS" => Self::ShiftJis,
            "GBK" | "gb18030" => Self::Gbk,
            "Big5" => Self::Big5,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn to_encoding(&self) -> &'static encoding_rs::Encoding {
        match self {
            Self::Utf8 => encoding_rs::UTF_8,
            Self::Windows1252 => encoding_rs::WINDOWS_1252,
            Self::ShiftJis => encoding_rs::SHIFT_JIS,
            Self::Gbk => encoding_rs::GBK,
            Self::Big5 => encoding_rs::BIG5,
            Self::Other(name) => encoding_rs::Encoding::for_label(name.as_bytes())
                .unwrap_or(encoding_rs::UTF_8),
        }
    }
}

/// A successfully fetched and decoded post page.
///
/// A failed fetch is a `FetchError`, never a partial response; downstream
/// feature extraction treats an empty `body_utf8` as "no signal".
#[derive(Debug, Clone)]
pub struct PageResponse {
    pub url_final: Url,
    pub status: StatusCode,
    pub body_raw: Bytes,
    pub body_utf8: String,
    pub charset: Charset,
    pub fetched_at: DateTime<Utc>,
}
