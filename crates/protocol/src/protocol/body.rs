//! Request payloads.
//!
//! A request body can carry raw bytes, url-encoded form fields, file attachments, or a
//! mix of fields and files. All three are dropped together by [`RequestBody::clear`],
//! which is what a method downgrade during redirect following needs.

use bytes::Bytes;
use mime::Mime;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestBody {
    raw: Option<Bytes>,
    fields: Vec<(String, String)>,
    files: Vec<FilePart>,
}

/// A file attached to a multipart request.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    field: String,
    file_name: String,
    content_type: Mime,
    data: Bytes,
}

impl FilePart {
    pub fn new<F: Into<String>, N: Into<String>>(field: F, file_name: N, content_type: Mime, data: Bytes) -> Self {
        Self { field: field.into(), file_name: file_name.into(), content_type, data }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &Mime {
        &self.content_type
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }
}

impl RequestBody {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn bytes<B: Into<Bytes>>(bytes: B) -> Self {
        Self { raw: Some(bytes.into()), ..Self::default() }
    }

    pub fn form<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self { fields: fields.into_iter().map(|(k, v)| (k.into(), v.into())).collect(), ..Self::default() }
    }

    pub fn with_field<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    pub fn with_file(mut self, file: FilePart) -> Self {
        self.files.push(file);
        self
    }

    pub fn raw(&self) -> Option<&Bytes> {
        self.raw.as_ref()
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn files(&self) -> &[FilePart] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.raw.as_ref().is_none_or(Bytes::is_empty) && self.fields.is_empty() && self.files.is_empty()
    }

    /// Drops raw bytes, form fields and files at once.
    pub fn clear(&mut self) {
        self.raw = None;
        self.fields.clear();
        self.files.clear();
    }

    /// The content type a transport should announce for this payload.
    ///
    /// Files force `multipart/form-data`, fields alone are url-encoded, and raw bytes
    /// carry no implied type.
    pub fn content_type(&self) -> Option<Mime> {
        if !self.files.is_empty() {
            Some(mime::MULTIPART_FORM_DATA)
        } else if !self.fields.is_empty() {
            Some(mime::APPLICATION_WWW_FORM_URLENCODED)
        } else {
            None
        }
    }

    /// Encodes the form fields as `application/x-www-form-urlencoded`.
    pub fn encode_fields(&self) -> Result<String, serde_urlencoded::ser::Error> {
        serde_urlencoded::to_string(&self.fields)
    }
}

impl From<Bytes> for RequestBody {
    fn from(bytes: Bytes) -> Self {
        Self::bytes(bytes)
    }
}

impl From<String> for RequestBody {
    fn from(value: String) -> Self {
        Self::bytes(value)
    }
}

impl From<&'static str> for RequestBody {
    fn from(value: &'static str) -> Self {
        Self::bytes(value)
    }
}

impl From<()> for RequestBody {
    fn from((): ()) -> Self {
        Self::empty()
    }
}
