use model::pagination::cursor::{Cursor, CursorError, PARAM_LIMIT, PARAM_OFFSET, PARAM_QUERY};
use url::{Url, form_urlencoded};

pub const FETCH_PATH: &str = "fetch";

/// Turns cursors into continuation URIs and back.
///
/// The URI is the only place pagination state lives, so encoding is
/// lossless: `decode(encode(c)) == c` for every cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorCodec {
    fetch_url: Url,
}

impl CursorCodec {
    /// `external` is the address clients use to reach the gateway, with or
    /// without scheme (`localhost:8080` means `http://localhost:8080`).
    pub fn new(external: &str) -> Result<Self, CursorError> {
        let external = external.trim();
        let raw = if external.contains("://") {
            external.to_string()
        } else {
            format!("http://{external}")
        };

        let mut fetch_url =
            Url::parse(&raw).map_err(|e| CursorError::InvalidUri(format!("{raw}: {e}")))?;
        fetch_url
            .path_segments_mut()
            .map_err(|_| CursorError::InvalidUri(format!("{raw}: not a base URI")))?
            .pop_if_empty()
            .push(FETCH_PATH);
        fetch_url.set_query(None);
        fetch_url.set_fragment(None);

        Ok(CursorCodec { fetch_url })
    }

    pub fn fetch_url(&self) -> &Url {
        &self.fetch_url
    }

    pub fn encode(&self, cursor: &Cursor) -> String {
        let mut url = self.fetch_url.clone();
        url.query_pairs_mut()
            .append_pair(PARAM_QUERY, cursor.statement.as_str())
            .append_pair(PARAM_LIMIT, &cursor.window.limit().to_string())
            .append_pair(PARAM_OFFSET, &cursor.window.offset().to_string());
        url.into()
    }

    /// Parse a continuation URI. Only the query string is interpreted.
    pub fn decode(&self, uri: &str) -> Result<Cursor, CursorError> {
        let url = Url::parse(uri).map_err(|e| CursorError::InvalidUri(e.to_string()))?;
        Self::decode_query(url.query().unwrap_or_default())
    }

    /// Parse the query string of a continuation URI, without the leading
    /// `?`. The first occurrence of each parameter wins.
    pub fn decode_query(query_string: &str) -> Result<Cursor, CursorError> {
        let (mut query, mut limit, mut offset) = (None, None, None);
        for (key, value) in form_urlencoded::parse(query_string.as_bytes()) {
            let slot = match &*key {
                PARAM_QUERY => &mut query,
                PARAM_LIMIT => &mut limit,
                PARAM_OFFSET => &mut offset,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        Cursor::from_params(query.as_deref(), limit.as_deref(), offset.as_deref())
    }
}
